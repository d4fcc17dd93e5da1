use crate::error::SubmissionReason;
use crate::types::TransactionRequest;
use alloy_primitives::{Address, B256};
use async_trait::async_trait;
use std::error::Error;
use thiserror::Error;

/// Errors reported by a wallet connector.
#[derive(Debug, Error)]
pub enum WalletError {
    #[error("User rejected the request")]
    UserRejected,

    #[error("Wallet is not connected")]
    NotConnected,

    #[error("RPC rejected the transaction: {0}")]
    Rpc(String),

    #[error(transparent)]
    Other(Box<dyn Error + Send + Sync>),
}

impl WalletError {
    pub fn reason(&self) -> SubmissionReason {
        match self {
            WalletError::UserRejected => SubmissionReason::UserRejected,
            WalletError::NotConnected => SubmissionReason::NotConnected,
            WalletError::Rpc(_) => SubmissionReason::RpcRejected,
            WalletError::Other(_) => SubmissionReason::Unknown,
        }
    }
}

/// Abstraction over an injected browser wallet (or any signer that can
/// submit a transaction on the user's behalf).
///
/// The engine never signs anything itself: it hands a fully shaped
/// [`TransactionRequest`] to the connector and receives the hash back.
#[async_trait]
pub trait WalletConnector: Send + Sync {
    async fn connect(&self) -> Result<Address, WalletError>;

    async fn disconnect(&self) -> Result<(), WalletError>;

    fn current_address(&self) -> Option<Address>;

    /// Ask the wallet to sign and broadcast. May suspend while the user
    /// reviews the request.
    async fn submit(&self, request: &TransactionRequest) -> Result<B256, WalletError>;
}
