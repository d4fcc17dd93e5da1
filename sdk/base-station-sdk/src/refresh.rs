use crate::core::connection::ChainConnection;
use crate::error::{Result, StationError};
use crate::types::TransactionHandle;
use alloy_primitives::{Address, Bytes, U256};
use base_station_interface::abi::decode_uint;
use base_station_interface::FunctionFragment;
use serde::Serialize;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case", tag = "status", content = "error")]
pub enum FetchStatus {
    Idle,
    Loading,
    Ready,
    Failed(String),
}

/// Last known value of the shared counter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CounterSnapshot {
    pub value: Option<U256>,
    pub status: FetchStatus,
}

impl Default for CounterSnapshot {
    fn default() -> Self {
        Self {
            value: None,
            status: FetchStatus::Idle,
        }
    }
}

/// Owns the counter snapshot and re-reads it after confirmed writes that
/// touch it.
#[derive(Debug)]
pub struct ReadRefreshCoordinator {
    target: Address,
    function: FunctionFragment,
    snapshot: CounterSnapshot,
    reads_issued: u64,
}

impl ReadRefreshCoordinator {
    pub fn new(target: Address, function: FunctionFragment) -> Self {
        Self {
            target,
            function,
            snapshot: CounterSnapshot::default(),
            reads_issued: 0,
        }
    }

    pub fn snapshot(&self) -> &CounterSnapshot {
        &self.snapshot
    }

    pub fn reads_issued(&self) -> u64 {
        self.reads_issued
    }

    /// Issue one read and update the snapshot. A failed read keeps the
    /// previous value and can simply be retried.
    pub async fn refresh<C>(&mut self, chain: &C) -> Result<U256>
    where
        C: ChainConnection + ?Sized,
    {
        let call = Bytes::from(self.function.encode_call(&[])?);
        self.snapshot.status = FetchStatus::Loading;
        self.reads_issued += 1;

        let result = chain
            .read(self.target, &call)
            .await
            .map_err(|e| StationError::Read(e.to_string()))
            .and_then(|data| decode_uint(&data).map_err(|e| StationError::Read(e.to_string())));

        match result {
            Ok(value) => {
                debug!(contract = %self.target, %value, "counter refreshed");
                self.snapshot.value = Some(value);
                self.snapshot.status = FetchStatus::Ready;
                Ok(value)
            },
            Err(e) => {
                warn!(contract = %self.target, error = %e, "counter refresh failed");
                self.snapshot.status = FetchStatus::Failed(e.to_string());
                Err(e)
            },
        }
    }

    /// Called once per confirmed transaction. Reads only for writes that
    /// affect the counter; returns `None` when no read was issued.
    pub async fn on_confirmed<C>(
        &mut self,
        chain: &C,
        handle: &TransactionHandle,
    ) -> Option<Result<U256>>
    where
        C: ChainConnection + ?Sized,
    {
        if !handle.refreshes_counter {
            return None;
        }
        Some(self.refresh(chain).await)
    }
}
