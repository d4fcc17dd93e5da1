//! Deployed Base Station contracts and the functions the app calls on them.

use crate::abi::{FunctionFragment, Param, StateMutability};
use alloy_primitives::{address, Address};

/// Onchain social board (`saySomething`).
pub const SOCIAL_CONTRACT_ADDRESS: Address = address!("1685288Ac824609262548e485aE0427104e74817");

/// ERC-20 launcher (`deployToken`).
pub const TOKEN_DEPLOYER_ADDRESS: Address = address!("46f67e2C642b0c51A2bcB976458E7eEd8C0CeEEB");

/// ERC-1155 collection launcher (`deployCollection`).
pub const NFT_DEPLOYER_ADDRESS: Address = address!("2F85293E2B5e97fB0Cb6Dd630fb2105002E535eb");

/// VIP membership pass (`mint`).
pub const VIP_PASS_ADDRESS: Address = address!("e0F17A4B633E45199d4D520698BAf32e47cDd9dC");

/// Shared tap counter (`tap` / `count`). Placeholder deployment, set
/// `counter_address` in the station config for a real one.
pub const TAP_COUNTER_ADDRESS: Address = address!("7a9Ec1d04904907De0ED7b6839CcdD59c3716AC9");

pub const SAY_SOMETHING: FunctionFragment = FunctionFragment::new(
    "saySomething",
    &[Param::string("action"), Param::string("message")],
    StateMutability::Payable,
);

pub const DEPLOY_TOKEN: FunctionFragment = FunctionFragment::new(
    "deployToken",
    &[
        Param::string("name"),
        Param::string("symbol"),
        Param::uint256("supply"),
    ],
    StateMutability::Payable,
);

pub const DEPLOY_COLLECTION: FunctionFragment = FunctionFragment::new(
    "deployCollection",
    &[Param::string("uri"), Param::string("name")],
    StateMutability::Payable,
);

pub const MINT: FunctionFragment = FunctionFragment::new("mint", &[], StateMutability::Payable);

pub const TAP: FunctionFragment = FunctionFragment::new("tap", &[], StateMutability::NonPayable);

pub const COUNT: FunctionFragment = FunctionFragment::new("count", &[], StateMutability::View);
