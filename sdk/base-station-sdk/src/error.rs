use crate::core::wallet::WalletError;
use base_station_interface::AbiError;
use serde::Serialize;
use thiserror::Error;

/// Why the wallet refused a request (a submission or a connection change).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SubmissionReason {
    UserRejected,
    NotConnected,
    RpcRejected,
    Unknown,
}

impl SubmissionReason {
    pub const fn as_str(&self) -> &'static str {
        match self {
            SubmissionReason::UserRejected => "user-rejected",
            SubmissionReason::NotConnected => "not-connected",
            SubmissionReason::RpcRejected => "rpc-rejected",
            SubmissionReason::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for SubmissionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a submitted transaction ended in `failed`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case", tag = "kind", content = "detail")]
pub enum FailureReason {
    /// Mined but reverted, with the revert reason when the chain reports one.
    Reverted(Option<String>),
    /// The configured receipt timeout elapsed.
    Timeout,
    /// The chain collaborator failed while waiting for inclusion or receipt.
    Rpc(String),
}

impl std::fmt::Display for FailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureReason::Reverted(Some(reason)) => write!(f, "reverted: {}", reason),
            FailureReason::Reverted(None) => f.write_str("reverted"),
            FailureReason::Timeout => f.write_str("timeout"),
            FailureReason::Rpc(message) => write!(f, "rpc error: {}", message),
        }
    }
}

/// Error types for Base Station dispatch operations
#[derive(Debug, Error)]
pub enum StationError {
    /// Action identifier outside the supported set
    #[error("Unknown action: {0}")]
    UnknownAction(String),

    /// Bad user input, rejected before submission
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Wallet or RPC refused the transaction before a hash existed
    #[error("Submission failed ({reason}): {detail}")]
    Submission {
        reason: SubmissionReason,
        detail: String,
    },

    /// Wallet connect or disconnect failed
    #[error("Wallet connection failed ({reason}): {detail}")]
    Connection {
        reason: SubmissionReason,
        detail: String,
    },

    /// A transaction is already pending or confirming
    #[error("A transaction is already in flight")]
    ConcurrentDispatch,

    /// No transaction is being tracked
    #[error("No transaction is being tracked")]
    NotTracking,

    /// Transaction hash existed but the transaction did not confirm
    #[error("Transaction failed: {reason}")]
    ReceiptFailure { reason: FailureReason },

    /// Counter refresh read failed
    #[error("Read error: {0}")]
    Read(String),

    /// Attribution identifier could not be encoded
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {0}")]
    Config(String),
}

impl StationError {
    pub(crate) fn submission(reason: SubmissionReason, detail: impl Into<String>) -> Self {
        StationError::Submission {
            reason,
            detail: detail.into(),
        }
    }
}

impl From<WalletError> for StationError {
    /// Connection-side wallet failures. Submission failures go through
    /// `StationError::Submission` instead.
    fn from(e: WalletError) -> Self {
        StationError::Connection {
            reason: e.reason(),
            detail: e.to_string(),
        }
    }
}

impl From<AbiError> for StationError {
    fn from(e: AbiError) -> Self {
        StationError::InvalidArgument(e.to_string())
    }
}

/// Result type alias for station operations
pub type Result<T> = std::result::Result<T, StationError>;
