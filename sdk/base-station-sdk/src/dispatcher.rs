use crate::attribution::AttributionSuffix;
use crate::basic::actions::Action;
use crate::core::wallet::WalletConnector;
use crate::error::{Result, StationError, SubmissionReason};
use crate::lifecycle::LifecycleTracker;
use crate::registry::ensure_target;
use crate::types::{TransactionHandle, TransactionRequest};
use crate::utils;
use alloy_primitives::Bytes;
use tracing::{debug, info, warn};

/// Turns actions into wallet submissions.
#[derive(Debug, Clone)]
pub struct TransactionDispatcher {
    suffix: AttributionSuffix,
}

impl TransactionDispatcher {
    pub fn new(suffix: AttributionSuffix) -> Self {
        Self { suffix }
    }

    pub fn suffix(&self) -> &AttributionSuffix {
        &self.suffix
    }

    /// Build the request: `[selector][abi args]` followed by the attribution
    /// suffix when the action asks for it.
    pub fn build_request(&self, action: &Action) -> Result<TransactionRequest> {
        action.validate()?;
        ensure_target(action.template())?;

        let mut data = action.function().encode_call(action.args())?;
        if action.requires_attribution() {
            data.extend_from_slice(self.suffix.as_bytes());
        }

        debug!(
            action = %action.id(),
            signature = %action.function().signature(),
            len = data.len(),
            "built transaction request"
        );

        Ok(TransactionRequest {
            to: action.target(),
            value: action.value(),
            data: Bytes::from(data),
        })
    }

    /// Validate, build and submit `action`, moving the tracker to `pending`
    /// once the wallet hands back a hash.
    ///
    /// Nothing reaches the wallet while another transaction is in flight,
    /// when the input is invalid, or when no account is connected. Any
    /// failure before a hash exists leaves the tracker in `idle`.
    pub async fn dispatch<W>(
        &self,
        wallet: &W,
        tracker: &mut LifecycleTracker,
        action: &Action,
    ) -> Result<TransactionHandle>
    where
        W: WalletConnector + ?Sized,
    {
        if tracker.is_in_flight() {
            warn!(action = %action.id(), state = %tracker.state(), "dispatch rejected, transaction in flight");
            return Err(StationError::ConcurrentDispatch);
        }
        tracker.reset();

        let request = self.build_request(action)?;

        if wallet.current_address().is_none() {
            return Err(StationError::submission(
                SubmissionReason::NotConnected,
                "connect a wallet first",
            ));
        }

        let hash = wallet.submit(&request).await.map_err(|e| {
            warn!(action = %action.id(), error = %e, "submission rejected");
            StationError::submission(e.reason(), e.to_string())
        })?;
        info!(
            action = %action.id(),
            %hash,
            fee = %utils::format_fee(request.value),
            "transaction submitted"
        );

        let handle = TransactionHandle {
            hash,
            action: action.id(),
            refreshes_counter: action.affects_shared_read(),
        };
        tracker.begin(handle.clone())?;
        Ok(handle)
    }
}
