pub mod attribution;
pub mod basic;
pub mod celebration;
pub mod config;
pub mod core;
pub mod dispatcher;
pub mod error;
pub mod lifecycle;
pub mod refresh;
pub mod registry;
pub mod types;
pub mod utils;

pub use crate::attribution::AttributionSuffix;
pub use crate::basic::actions::{Action, SocialKind};
pub use crate::basic::forms::{CollectionForm, SessionState, Tab, TokenForm};
pub use crate::basic::session::StationSession;
pub use crate::config::StationConfig;
pub use crate::core::connection::{ChainConnection, Receipt};
pub use crate::core::wallet::{WalletConnector, WalletError};
pub use crate::error::{FailureReason, Result, StationError, SubmissionReason};
pub use crate::lifecycle::{LifecycleTracker, TransactionState, Transition};
pub use crate::refresh::{CounterSnapshot, FetchStatus, ReadRefreshCoordinator};
pub use crate::registry::{ActionRegistry, ActionTemplate};
pub use crate::types::{ActionId, Notification, TransactionHandle, TransactionRequest};

pub mod interface {
    pub use base_station_interface::*;
}
