use crate::attribution::AttributionSuffix;
use crate::basic::actions::{Action, SocialKind};
use crate::basic::forms::{SessionState, Tab};
use crate::celebration::CelebrationTimer;
use crate::config::StationConfig;
use crate::core::connection::ChainConnection;
use crate::core::constants::MAX_NOTIFICATION_LEN;
use crate::core::wallet::WalletConnector;
use crate::dispatcher::TransactionDispatcher;
use crate::error::{Result, StationError};
use crate::lifecycle::{LifecycleTracker, TransactionState, Transition};
use crate::refresh::{CounterSnapshot, ReadRefreshCoordinator};
use crate::registry::ActionRegistry;
use crate::types::{Notification, TransactionHandle};
use crate::utils;
use alloy_primitives::{Address, U256};
use base_station_interface::contracts::COUNT;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tracing::{info, warn};

/// A single user session: one wallet, one chain endpoint, at most one
/// transaction in flight.
///
/// All operations take `&mut self`, so events are processed one at a time
/// and each runs to completion before the next.
pub struct StationSession<W, C> {
    wallet: W,
    chain: C,
    registry: ActionRegistry,
    dispatcher: TransactionDispatcher,
    tracker: LifecycleTracker,
    celebration: CelebrationTimer,
    counter: ReadRefreshCoordinator,
    state: SessionState,
    receipt_timeout: Option<Duration>,
    last_error: Option<String>,
}

impl<W, C> StationSession<W, C>
where
    W: WalletConnector,
    C: ChainConnection,
{
    pub fn new(config: &StationConfig, wallet: W, chain: C) -> Result<Self> {
        config.validate()?;
        let suffix = AttributionSuffix::new(&config.builder_code)?;
        let registry = ActionRegistry::from_config(config);
        let counter = ReadRefreshCoordinator::new(registry.counter_target(), COUNT);

        Ok(Self {
            state: SessionState {
                account: wallet.current_address(),
                ..SessionState::default()
            },
            wallet,
            chain,
            registry,
            dispatcher: TransactionDispatcher::new(suffix),
            tracker: LifecycleTracker::new(),
            celebration: CelebrationTimer::new(config.celebration_duration()),
            counter,
            receipt_timeout: config.receipt_timeout(),
            last_error: None,
        })
    }

    pub fn wallet(&self) -> &W {
        &self.wallet
    }

    pub fn chain(&self) -> &C {
        &self.chain
    }

    pub fn registry(&self) -> &ActionRegistry {
        &self.registry
    }

    pub fn suffix(&self) -> &AttributionSuffix {
        self.dispatcher.suffix()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut SessionState {
        &mut self.state
    }

    pub fn select_tab(&mut self, tab: Tab) {
        self.state.active_tab = tab;
    }

    pub fn transaction_state(&self) -> &TransactionState {
        self.tracker.state()
    }

    pub fn handle(&self) -> Option<&TransactionHandle> {
        self.tracker.handle()
    }

    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<Transition> {
        self.tracker.subscribe()
    }

    pub fn counter(&self) -> &CounterSnapshot {
        self.counter.snapshot()
    }

    pub fn counter_reads(&self) -> u64 {
        self.counter.reads_issued()
    }

    pub fn is_celebrating(&self) -> bool {
        self.celebration.is_active()
    }

    pub fn watch_celebration(&self) -> watch::Receiver<bool> {
        self.celebration.subscribe()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub async fn connect(&mut self) -> Result<Address> {
        let address = match self.wallet.connect().await {
            Ok(address) => address,
            Err(e) => {
                warn!(error = %e, "wallet connect failed");
                let err = StationError::from(e);
                self.record_error(&err);
                return Err(err);
            },
        };
        info!(account = %address, "wallet connected");
        self.state.account = Some(address);
        self.last_error = None;
        Ok(address)
    }

    pub async fn disconnect(&mut self) -> Result<()> {
        if let Err(e) = self.wallet.disconnect().await {
            warn!(error = %e, "wallet disconnect failed");
            let err = StationError::from(e);
            self.record_error(&err);
            return Err(err);
        }
        info!("wallet disconnected");
        self.state.account = None;
        Ok(())
    }

    /// Submit `action`. On success the session is `pending` and the returned
    /// handle identifies the transaction; call [`Self::track`] to follow it.
    pub async fn dispatch(&mut self, action: &Action) -> Result<TransactionHandle> {
        let result = self
            .dispatcher
            .dispatch(&self.wallet, &mut self.tracker, action)
            .await;
        match &result {
            Ok(_) => self.last_error = None,
            Err(StationError::ConcurrentDispatch) => {},
            Err(e) => self.record_error(e),
        }
        result
    }

    /// Follow the in-flight transaction to a terminal state. On confirmation
    /// the celebration starts and, for counter writes, the counter is read
    /// once. A failed read is reported in the counter snapshot only.
    pub async fn track(&mut self) -> Result<TransactionHandle> {
        let handle = match self.tracker.track(&self.chain, self.receipt_timeout).await {
            Ok(handle) => handle,
            Err(e) => {
                self.record_error(&e);
                return Err(e);
            },
        };

        self.celebration.activate();
        if let Some(Err(e)) = self.counter.on_confirmed(&self.chain, &handle).await {
            warn!(hash = %handle.hash, error = %e, "post-confirmation refresh failed");
        }
        Ok(handle)
    }

    /// Dispatch and track in one go.
    pub async fn execute(&mut self, action: &Action) -> Result<TransactionHandle> {
        self.dispatch(action).await?;
        self.track().await
    }

    pub async fn refresh_counter(&mut self) -> Result<U256> {
        self.counter.refresh(&self.chain).await
    }

    pub async fn say(&mut self, kind: SocialKind) -> Result<TransactionHandle> {
        let action = Action::social_post(&self.registry, kind);
        self.dispatch(&action).await
    }

    pub async fn mint_pass(&mut self) -> Result<TransactionHandle> {
        let action = Action::mint_pass(&self.registry);
        self.dispatch(&action).await
    }

    pub async fn tap(&mut self) -> Result<TransactionHandle> {
        let action = Action::tap_counter(&self.registry);
        self.dispatch(&action).await
    }

    /// Dispatch a `deploy-token` built from the token form.
    pub async fn submit_token_form(&mut self) -> Result<TransactionHandle> {
        let action = match self.state.token.to_action(&self.registry) {
            Ok(action) => action,
            Err(e) => {
                self.record_error(&e);
                return Err(e);
            },
        };
        self.dispatch(&action).await
    }

    /// Dispatch a `deploy-collection` built from the collection form.
    pub async fn submit_collection_form(&mut self) -> Result<TransactionHandle> {
        let action = self.state.collection.to_action(&self.registry);
        self.dispatch(&action).await
    }

    /// Clear the transaction state and any displayed error. Does not touch
    /// a transaction already on chain.
    pub fn reset(&mut self) {
        self.tracker.reset();
        self.last_error = None;
    }

    pub fn notification(&self) -> Notification {
        if self.tracker.is_in_flight() {
            Notification::Pending
        } else if self.celebration.is_active() {
            Notification::Confirmed
        } else if let Some(message) = &self.last_error {
            Notification::Error(message.clone())
        } else {
            Notification::None
        }
    }

    /// Tear the session down; the pending celebration deactivation is
    /// cancelled.
    pub fn shutdown(&mut self) {
        self.celebration.cancel();
    }

    fn record_error(&mut self, error: &StationError) {
        self.last_error = Some(utils::truncate_message(
            &error.to_string(),
            MAX_NOTIFICATION_LEN,
        ));
    }
}
