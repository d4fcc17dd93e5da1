//! Base Station contract interface
//!
//! ABI fragments, calldata encoding and deployed addresses of the contracts
//! the Base Station client writes to.

pub mod abi;
pub mod contracts;

pub use abi::{AbiError, AbiValue, FunctionFragment, Param, ParamKind, StateMutability};
pub use alloy_primitives::{Address, Bytes, B256, U256};
