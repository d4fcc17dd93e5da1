#![allow(dead_code)]

use async_trait::async_trait;
use base_station_sdk::interface::contracts::{TAP, TAP_COUNTER_ADDRESS};
use base_station_sdk::{
    ChainConnection, Receipt, StationConfig, StationSession, TransactionRequest,
    WalletConnector, WalletError,
};
use alloy_primitives::{address, Address, Bytes, B256, U256};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const USER: Address = address!("0000000000000000000000000000000000001234");
pub const BUILDER_CODE: &str = "bc_station";

/// Shared view of "the chain" used by both mocks.
#[derive(Default)]
pub struct Ledger {
    submitted: Mutex<Vec<(B256, TransactionRequest)>>,
    counter: Mutex<U256>,
    reads: AtomicUsize,
}

impl Ledger {
    pub fn submissions(&self) -> Vec<TransactionRequest> {
        self.submitted
            .lock()
            .unwrap()
            .iter()
            .map(|(_, r)| r.clone())
            .collect()
    }

    pub fn submission_count(&self) -> usize {
        self.submitted.lock().unwrap().len()
    }

    pub fn set_counter(&self, value: u64) {
        *self.counter.lock().unwrap() = U256::from(value);
    }

    pub fn counter(&self) -> U256 {
        *self.counter.lock().unwrap()
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    fn request(&self, hash: &B256) -> Option<TransactionRequest> {
        self.submitted
            .lock()
            .unwrap()
            .iter()
            .find(|(h, _)| h == hash)
            .map(|(_, r)| r.clone())
    }
}

#[derive(Debug, Clone)]
pub enum Rejection {
    User,
    Rpc(String),
    Other(String),
}

pub struct MockWallet {
    ledger: Arc<Ledger>,
    account: Mutex<Option<Address>>,
    rejection: Mutex<Option<Rejection>>,
    connection_failure: Mutex<Option<Rejection>>,
}

impl MockWallet {
    pub fn new(ledger: Arc<Ledger>, account: Option<Address>) -> Self {
        Self {
            ledger,
            account: Mutex::new(account),
            rejection: Mutex::new(None),
            connection_failure: Mutex::new(None),
        }
    }

    /// Refuse every submission from now on.
    pub fn reject_with(&self, rejection: Rejection) {
        *self.rejection.lock().unwrap() = Some(rejection);
    }

    pub fn accept(&self) {
        *self.rejection.lock().unwrap() = None;
    }

    /// Make connect and disconnect fail (or succeed again with `None`).
    pub fn fail_connection(&self, failure: Option<Rejection>) {
        *self.connection_failure.lock().unwrap() = failure;
    }

    fn connection_error(&self) -> Option<WalletError> {
        self.connection_failure.lock().unwrap().clone().map(Rejection::into_wallet_error)
    }
}

impl Rejection {
    fn into_wallet_error(self) -> WalletError {
        match self {
            Rejection::User => WalletError::UserRejected,
            Rejection::Rpc(message) => WalletError::Rpc(message),
            Rejection::Other(message) => WalletError::Other(message.into()),
        }
    }
}

#[async_trait]
impl WalletConnector for MockWallet {
    async fn connect(&self) -> Result<Address, WalletError> {
        if let Some(e) = self.connection_error() {
            return Err(e);
        }
        *self.account.lock().unwrap() = Some(USER);
        Ok(USER)
    }

    async fn disconnect(&self) -> Result<(), WalletError> {
        if let Some(e) = self.connection_error() {
            return Err(e);
        }
        *self.account.lock().unwrap() = None;
        Ok(())
    }

    fn current_address(&self) -> Option<Address> {
        *self.account.lock().unwrap()
    }

    async fn submit(&self, request: &TransactionRequest) -> Result<B256, WalletError> {
        if let Some(rejection) = self.rejection.lock().unwrap().clone() {
            return Err(rejection.into_wallet_error());
        }
        if self.current_address().is_none() {
            return Err(WalletError::NotConnected);
        }

        let mut submitted = self.ledger.submitted.lock().unwrap();
        let hash = B256::with_last_byte(submitted.len() as u8 + 1);
        submitted.push((hash, request.clone()));
        Ok(hash)
    }
}

#[derive(Debug, Clone)]
pub enum ReceiptScript {
    Success,
    Revert(Option<String>),
}

pub struct MockChain {
    ledger: Arc<Ledger>,
    receipt: Mutex<ReceiptScript>,
    receipt_delay: Mutex<Option<Duration>>,
    inclusion_error: Mutex<Option<String>>,
    read_error: Mutex<Option<String>>,
}

impl MockChain {
    pub fn new(ledger: Arc<Ledger>) -> Self {
        Self {
            ledger,
            receipt: Mutex::new(ReceiptScript::Success),
            receipt_delay: Mutex::new(None),
            inclusion_error: Mutex::new(None),
            read_error: Mutex::new(None),
        }
    }

    pub fn script_receipt(&self, script: ReceiptScript) {
        *self.receipt.lock().unwrap() = script;
    }

    pub fn delay_receipts(&self, delay: Duration) {
        *self.receipt_delay.lock().unwrap() = Some(delay);
    }

    pub fn fail_inclusion(&self, message: &str) {
        *self.inclusion_error.lock().unwrap() = Some(message.to_string());
    }

    pub fn fail_reads(&self, message: Option<&str>) {
        *self.read_error.lock().unwrap() = message.map(str::to_string);
    }
}

#[async_trait]
impl ChainConnection for MockChain {
    async fn read(
        &self,
        target: Address,
        data: &Bytes,
    ) -> Result<Bytes, Box<dyn std::error::Error + Send + Sync>> {
        self.ledger.reads.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = self.read_error.lock().unwrap().clone() {
            return Err(message.into());
        }
        if target != TAP_COUNTER_ADDRESS || data.len() != 4 {
            return Err("unexpected read".into());
        }
        Ok(Bytes::from(self.ledger.counter().to_be_bytes::<32>().to_vec()))
    }

    async fn wait_for_inclusion(
        &self,
        _hash: &B256,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        match self.inclusion_error.lock().unwrap().clone() {
            Some(message) => Err(message.into()),
            None => Ok(()),
        }
    }

    async fn wait_for_receipt(
        &self,
        hash: &B256,
    ) -> Result<Receipt, Box<dyn std::error::Error + Send + Sync>> {
        let delay = *self.receipt_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let request = self.ledger.request(hash).ok_or("unknown transaction")?;
        let script = self.receipt.lock().unwrap().clone();
        match script {
            ReceiptScript::Success => {
                if request.to == TAP_COUNTER_ADDRESS && request.data.starts_with(&TAP.selector()) {
                    let mut counter = self.ledger.counter.lock().unwrap();
                    *counter += U256::from(1);
                }
                Ok(Receipt::success())
            },
            ReceiptScript::Revert(reason) => Ok(Receipt::reverted(reason)),
        }
    }
}

pub type TestSession = StationSession<MockWallet, MockChain>;

pub fn test_config() -> StationConfig {
    StationConfig::default().with_builder_code(BUILDER_CODE)
}

pub fn setup_session_with(config: &StationConfig, account: Option<Address>) -> (TestSession, Arc<Ledger>) {
    let ledger = Arc::new(Ledger::default());
    let wallet = MockWallet::new(Arc::clone(&ledger), account);
    let chain = MockChain::new(Arc::clone(&ledger));
    let session = StationSession::new(config, wallet, chain).expect("valid test config");
    (session, ledger)
}

pub fn setup_session() -> (TestSession, Arc<Ledger>) {
    setup_session_with(&test_config(), Some(USER))
}
