use alloy_primitives::{Address, Bytes, B256};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::error::Error;

/// Outcome of a mined transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub success: bool,
    pub revert_reason: Option<String>,
}

impl Receipt {
    pub fn success() -> Self {
        Self {
            success: true,
            revert_reason: None,
        }
    }

    pub fn reverted(reason: Option<String>) -> Self {
        Self {
            success: false,
            revert_reason: reason,
        }
    }
}

#[async_trait]
pub trait ChainConnection: Send + Sync {
    /// `eth_call` against `target` with raw calldata.
    async fn read(
        &self,
        target: Address,
        data: &Bytes,
    ) -> Result<Bytes, Box<dyn Error + Send + Sync>>;

    /// Resolves once the transaction is included in a block but not yet
    /// final. Clients that cannot tell inclusion from finality keep the
    /// default, which resolves immediately.
    async fn wait_for_inclusion(&self, _hash: &B256) -> Result<(), Box<dyn Error + Send + Sync>> {
        Ok(())
    }

    async fn wait_for_receipt(&self, hash: &B256)
        -> Result<Receipt, Box<dyn Error + Send + Sync>>;
}
