//! Transaction lifecycle state machine.
//!
//! ```text
//! idle -> pending -> confirming -> confirmed
//!                              \-> failed
//! ```
//!
//! Any state may go back to `idle` on reset. Every transition is delivered
//! to each subscriber exactly once, in order.

use crate::core::connection::ChainConnection;
use crate::error::{FailureReason, Result, StationError};
use crate::types::TransactionHandle;
use alloy_primitives::B256;
use serde::Serialize;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case", tag = "state", content = "reason")]
pub enum TransactionState {
    Idle,
    Pending,
    Confirming,
    Confirmed,
    Failed(FailureReason),
}

impl TransactionState {
    pub fn name(&self) -> &'static str {
        match self {
            TransactionState::Idle => "idle",
            TransactionState::Pending => "pending",
            TransactionState::Confirming => "confirming",
            TransactionState::Confirmed => "confirmed",
            TransactionState::Failed(_) => "failed",
        }
    }

    pub fn is_in_flight(&self) -> bool {
        matches!(
            self,
            TransactionState::Pending | TransactionState::Confirming
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TransactionState::Confirmed | TransactionState::Failed(_)
        )
    }
}

impl std::fmt::Display for TransactionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Forward edges of the machine. Resets to `idle` are handled separately.
pub fn is_valid_transition(from: &TransactionState, to: &TransactionState) -> bool {
    use TransactionState::*;
    matches!(
        (from, to),
        (Idle, Pending) | (Pending, Confirming) | (Confirming, Confirmed) | (Confirming, Failed(_))
    ) || (!matches!(from, Idle) && matches!(to, Idle))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transition {
    pub hash: Option<B256>,
    pub from: TransactionState,
    pub to: TransactionState,
}

#[derive(Debug)]
pub struct LifecycleTracker {
    state: TransactionState,
    handle: Option<TransactionHandle>,
    observers: Vec<mpsc::UnboundedSender<Transition>>,
}

impl Default for LifecycleTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl LifecycleTracker {
    pub fn new() -> Self {
        Self {
            state: TransactionState::Idle,
            handle: None,
            observers: Vec::new(),
        }
    }

    pub fn state(&self) -> &TransactionState {
        &self.state
    }

    pub fn handle(&self) -> Option<&TransactionHandle> {
        self.handle.as_ref()
    }

    pub fn is_in_flight(&self) -> bool {
        self.state.is_in_flight()
    }

    /// Receive every transition from now on.
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<Transition> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.observers.push(tx);
        rx
    }

    /// `idle -> pending`, taking ownership of the handle.
    pub fn begin(&mut self, handle: TransactionHandle) -> Result<()> {
        if self.is_in_flight() {
            return Err(StationError::ConcurrentDispatch);
        }
        if self.state.is_terminal() {
            self.reset();
        }
        self.handle = Some(handle);
        self.transition(TransactionState::Pending);
        Ok(())
    }

    /// `pending -> confirming`. No-op in any other state.
    pub fn mark_included(&mut self) {
        if self.state == TransactionState::Pending {
            self.transition(TransactionState::Confirming);
        }
    }

    /// `confirming -> confirmed`, releasing the handle.
    pub fn confirm(&mut self) -> Option<TransactionHandle> {
        if !self.is_in_flight() {
            return None;
        }
        self.mark_included();
        self.transition(TransactionState::Confirmed);
        self.handle.take()
    }

    /// Drive an in-flight transaction to `failed`, passing through
    /// `confirming` if it was still pending.
    pub fn fail(&mut self, reason: FailureReason) -> Option<TransactionHandle> {
        if !self.is_in_flight() {
            return None;
        }
        self.mark_included();
        self.transition(TransactionState::Failed(reason));
        self.handle.take()
    }

    /// Back to `idle` from anywhere, discarding the handle.
    pub fn reset(&mut self) {
        if self.state != TransactionState::Idle {
            self.transition(TransactionState::Idle);
        }
        self.handle = None;
    }

    /// Wait for the tracked transaction to reach a terminal state.
    ///
    /// Returns the released handle on confirmation. Reverts, collaborator
    /// errors and the optional timeout end in `failed` and come back as
    /// [`StationError::ReceiptFailure`].
    pub async fn track<C>(&mut self, chain: &C, timeout: Option<Duration>) -> Result<TransactionHandle>
    where
        C: ChainConnection + ?Sized,
    {
        let hash = match &self.handle {
            Some(handle) if self.is_in_flight() => handle.hash,
            _ => return Err(StationError::NotTracking),
        };

        let outcome = match timeout {
            Some(limit) => tokio::time::timeout(limit, self.wait_terminal(chain, hash))
                .await
                .unwrap_or(Err(FailureReason::Timeout)),
            None => self.wait_terminal(chain, hash).await,
        };

        match outcome {
            Ok(()) => self.confirm().ok_or(StationError::NotTracking),
            Err(reason) => {
                warn!(%hash, %reason, "transaction failed");
                self.fail(reason.clone());
                Err(StationError::ReceiptFailure { reason })
            },
        }
    }

    async fn wait_terminal<C>(&mut self, chain: &C, hash: B256) -> std::result::Result<(), FailureReason>
    where
        C: ChainConnection + ?Sized,
    {
        chain
            .wait_for_inclusion(&hash)
            .await
            .map_err(|e| FailureReason::Rpc(e.to_string()))?;
        self.mark_included();

        let receipt = chain
            .wait_for_receipt(&hash)
            .await
            .map_err(|e| FailureReason::Rpc(e.to_string()))?;
        if receipt.success {
            Ok(())
        } else {
            Err(FailureReason::Reverted(receipt.revert_reason))
        }
    }

    fn transition(&mut self, to: TransactionState) {
        debug_assert!(
            is_valid_transition(&self.state, &to),
            "invalid transition {} -> {}",
            self.state,
            to
        );
        let from = std::mem::replace(&mut self.state, to.clone());
        let hash = self.handle.as_ref().map(|h| h.hash);
        info!(?hash, %from, %to, "transaction state");

        let transition = Transition { hash, from, to };
        self.observers.retain(|observer| observer.send(transition.clone()).is_ok());
        debug!(observers = self.observers.len(), "transition delivered");
    }
}
