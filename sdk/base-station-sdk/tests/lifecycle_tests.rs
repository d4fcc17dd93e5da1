use base_station_sdk::{
    Action, FailureReason, Notification, StationConfig, StationError, TransactionState, Transition,
};
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;

mod common;
use common::*;

fn drain(rx: &mut UnboundedReceiver<Transition>) -> Vec<Transition> {
    let mut transitions = Vec::new();
    while let Ok(t) = rx.try_recv() {
        transitions.push(t);
    }
    transitions
}

fn names(transitions: &[Transition]) -> Vec<&'static str> {
    transitions.iter().map(|t| t.to.name()).collect()
}

/// Every log must walk idle -> pending -> confirming -> terminal.
fn assert_valid_path(transitions: &[Transition]) {
    let mut previous = TransactionState::Idle;
    for t in transitions {
        assert_eq!(t.from, previous, "transition log skipped a state");
        assert!(
            base_station_sdk::lifecycle::is_valid_transition(&t.from, &t.to),
            "{} -> {} is not a valid transition",
            t.from,
            t.to
        );
        previous = t.to.clone();
    }
}

#[test_log::test(tokio::test)]
async fn test_confirmed_path() {
    let (mut session, _ledger) = setup_session();
    let mut rx = session.subscribe();

    let handle = session.mint_pass().await.unwrap();
    let confirmed = session.track().await.unwrap();
    assert_eq!(confirmed, handle);

    let log = drain(&mut rx);
    assert_valid_path(&log);
    assert_eq!(names(&log), vec!["pending", "confirming", "confirmed"]);
    assert!(log.iter().all(|t| t.hash == Some(handle.hash)));
    assert!(session.handle().is_none());
}

#[test_log::test(tokio::test)]
async fn test_revert_ends_failed() {
    let (mut session, _ledger) = setup_session();
    session
        .chain()
        .script_receipt(ReceiptScript::Revert(Some("sold out".to_string())));
    let mut rx = session.subscribe();

    session.mint_pass().await.unwrap();
    let err = session.track().await.unwrap_err();

    let expected = FailureReason::Reverted(Some("sold out".to_string()));
    assert!(matches!(err, StationError::ReceiptFailure { ref reason } if *reason == expected));
    assert_eq!(session.transaction_state(), &TransactionState::Failed(expected));
    assert!(session.handle().is_none());
    assert!(!session.is_celebrating());
    assert!(matches!(session.notification(), Notification::Error(ref m) if m.contains("sold out")));

    let log = drain(&mut rx);
    assert_valid_path(&log);
    assert_eq!(names(&log), vec!["pending", "confirming", "failed"]);
}

#[test_log::test(tokio::test)]
async fn test_inclusion_error_passes_through_confirming() {
    let (mut session, _ledger) = setup_session();
    session.chain().fail_inclusion("node unavailable");
    let mut rx = session.subscribe();

    session.tap().await.unwrap();
    let err = session.track().await.unwrap_err();
    assert!(matches!(
        err,
        StationError::ReceiptFailure {
            reason: FailureReason::Rpc(ref m)
        } if m.contains("node unavailable")
    ));

    let log = drain(&mut rx);
    assert_valid_path(&log);
    assert_eq!(names(&log), vec!["pending", "confirming", "failed"]);
    // nothing confirmed, nothing to re-read
    assert_eq!(session.counter_reads(), 0);
}

#[test_log::test(tokio::test(start_paused = true))]
async fn test_receipt_timeout() {
    let config = StationConfig {
        receipt_timeout_secs: Some(5),
        ..test_config()
    };
    let (mut session, _ledger) = setup_session_with(&config, Some(USER));
    session.chain().delay_receipts(Duration::from_secs(60));
    let mut rx = session.subscribe();

    session.mint_pass().await.unwrap();
    let started = tokio::time::Instant::now();
    let err = session.track().await.unwrap_err();

    assert_eq!(started.elapsed(), Duration::from_secs(5));
    assert!(matches!(
        err,
        StationError::ReceiptFailure {
            reason: FailureReason::Timeout
        }
    ));
    assert_eq!(
        session.transaction_state(),
        &TransactionState::Failed(FailureReason::Timeout)
    );
    assert_eq!(names(&drain(&mut rx)), vec!["pending", "confirming", "failed"]);
}

#[test_log::test(tokio::test(start_paused = true))]
async fn test_no_timeout_waits_for_slow_receipt() {
    let (mut session, _ledger) = setup_session();
    session.chain().delay_receipts(Duration::from_secs(600));

    session.mint_pass().await.unwrap();
    session.track().await.unwrap();
    assert_eq!(session.transaction_state(), &TransactionState::Confirmed);
}

#[test_log::test(tokio::test)]
async fn test_track_without_transaction() {
    let (mut session, _ledger) = setup_session();
    let err = session.track().await.unwrap_err();
    assert!(matches!(err, StationError::NotTracking));
    assert_eq!(session.transaction_state(), &TransactionState::Idle);
}

#[test_log::test(tokio::test)]
async fn test_reset_discards_handle() {
    let (mut session, _ledger) = setup_session();
    let mut rx = session.subscribe();

    session.tap().await.unwrap();
    session.reset();
    assert_eq!(session.transaction_state(), &TransactionState::Idle);
    assert!(session.handle().is_none());
    assert_eq!(session.notification(), Notification::None);

    assert_eq!(names(&drain(&mut rx)), vec!["pending", "idle"]);
    assert!(matches!(
        session.track().await,
        Err(StationError::NotTracking)
    ));
}

#[test_log::test(tokio::test)]
async fn test_every_subscriber_sees_every_transition() {
    let (mut session, _ledger) = setup_session();
    let mut first = session.subscribe();
    let mut second = session.subscribe();

    let action = Action::mint_pass(session.registry());
    session.execute(&action).await.unwrap();

    assert_eq!(drain(&mut first), drain(&mut second));
}
