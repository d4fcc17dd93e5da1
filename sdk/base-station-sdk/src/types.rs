use crate::error::StationError;
use alloy_primitives::{Address, Bytes, B256, U256};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The closed set of user actions the station can dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionId {
    SocialPost,
    MintPass,
    DeployToken,
    DeployCollection,
    TapCounter,
}

impl ActionId {
    pub const ALL: [ActionId; 5] = [
        ActionId::SocialPost,
        ActionId::MintPass,
        ActionId::DeployToken,
        ActionId::DeployCollection,
        ActionId::TapCounter,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            ActionId::SocialPost => "social-post",
            ActionId::MintPass => "mint-pass",
            ActionId::DeployToken => "deploy-token",
            ActionId::DeployCollection => "deploy-collection",
            ActionId::TapCounter => "tap-counter",
        }
    }
}

impl std::fmt::Display for ActionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionId {
    type Err = StationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActionId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| StationError::UnknownAction(s.to_string()))
    }
}

/// A fully shaped write, ready for the wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionRequest {
    pub to: Address,
    pub value: U256,
    pub data: Bytes,
}

/// Produced by an accepted submission. Lives in the lifecycle tracker
/// until the transaction reaches a terminal state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionHandle {
    pub hash: B256,
    pub action: ActionId,
    /// Whether confirmation should trigger a shared-state re-read
    pub refreshes_counter: bool,
}

/// What the notification area shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case", tag = "kind", content = "message")]
pub enum Notification {
    None,
    Pending,
    Confirmed,
    Error(String),
}
