mod common;

use std::time::Duration;

use combat_core::LocationId;
use engine::{DeclaredResult, EngineError, PlayerId};

use common::{TTL, ayla, harness};

fn arena() -> LocationId {
    LocationId::from("arena")
}

#[tokio::test]
async fn untouched_session_expires_and_is_recorded_as_abandoned() {
    let h = harness();
    let started = h.engine.start(&ayla(), &arena()).await.unwrap();

    h.clock.advance(TTL);
    let err = h
        .engine
        .attack(&started.session_id, 200.0)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::SessionExpired(id) if id == started.session_id));

    let account = h.ledger.account(&ayla()).expect("abandonment committed");
    assert_eq!(account.history.abandons, 1);
    assert_eq!(account.gold, 0);

    assert!(matches!(
        h.engine
            .complete(&started.session_id, DeclaredResult::Defeat)
            .await,
        Err(EngineError::SessionNotFound(_))
    ));
    h.engine
        .start(&ayla(), &arena())
        .await
        .expect("player is free after expiry");
}

#[tokio::test]
async fn complete_after_expiry_fails() {
    let h = harness();
    let started = h.engine.start(&ayla(), &arena()).await.unwrap();
    h.engine.attack(&started.session_id, 200.0).await.unwrap();

    h.clock.advance(TTL + Duration::from_secs(1));
    let err = h
        .engine
        .complete(&started.session_id, DeclaredResult::Victory)
        .await
        .unwrap_err();

    assert!(matches!(err, EngineError::SessionExpired(_)));
    // The earned victory is still recorded.
    let account = h.ledger.account(&ayla()).unwrap();
    assert_eq!(account.history.wins, 1);
    assert_eq!(h.ledger.commit_count(), 1);
}

#[tokio::test]
async fn rejected_attack_does_not_keep_a_finished_session_alive() {
    let h = harness();
    let started = h.engine.start(&ayla(), &arena()).await.unwrap();
    h.engine.attack(&started.session_id, 200.0).await.unwrap();

    h.clock.advance(Duration::from_secs(10 * 60));
    assert!(matches!(
        h.engine.attack(&started.session_id, 200.0).await,
        Err(EngineError::SessionNotActive { .. })
    ));

    h.clock.advance(Duration::from_secs(5 * 60));
    let err = h
        .engine
        .complete(&started.session_id, DeclaredResult::Victory)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::SessionExpired(_)));
    assert_eq!(h.ledger.account(&ayla()).unwrap().history.wins, 1);
}

#[tokio::test]
async fn activity_keeps_a_session_alive() {
    let h = harness();
    let started = h.engine.start(&ayla(), &arena()).await.unwrap();

    for _ in 0..3 {
        h.clock.advance(Duration::from_secs(10 * 60));
        h.engine
            .attack(&started.session_id, 1.0)
            .await
            .expect("attack within the window");
    }

    assert_eq!(h.ledger.commit_count(), 0);
}

#[tokio::test]
async fn sweep_records_every_expired_session() {
    let h = harness();
    h.engine.start(&ayla(), &arena()).await.unwrap();
    h.engine
        .start(&PlayerId::from("borin"), &arena())
        .await
        .unwrap();

    h.clock.advance(TTL);
    assert_eq!(h.engine.sweep_expired().await.unwrap(), 2);
    assert!(h.engine.store().is_empty());
    assert_eq!(h.ledger.commit_count(), 2);
    assert_eq!(h.engine.sweep_expired().await.unwrap(), 0);
}

#[tokio::test]
async fn expired_leftover_does_not_block_a_new_start() {
    let h = harness();
    let stale = h.engine.start(&ayla(), &arena()).await.unwrap();

    h.clock.advance(TTL);
    let fresh = h.engine.start(&ayla(), &arena()).await.unwrap();
    assert_ne!(fresh.session_id, stale.session_id);

    assert_eq!(h.engine.sweep_expired().await.unwrap(), 1);
    assert_eq!(h.ledger.account(&ayla()).unwrap().history.abandons, 1);
    assert!(h.engine.store().get(&fresh.session_id).is_ok());
}

#[tokio::test]
async fn reaper_sweeps_in_the_background() {
    let h = harness();
    h.engine.start(&ayla(), &arena()).await.unwrap();
    h.clock.advance(TTL);

    let reaper = h.engine.spawn_reaper(Duration::from_millis(5));
    for _ in 0..200 {
        if h.engine.store().is_empty() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    reaper.shutdown().await.expect("reaper stops cleanly");

    assert!(h.engine.store().is_empty());
    assert_eq!(h.ledger.account(&ayla()).unwrap().history.abandons, 1);
}
