use std::path::PathBuf;
use std::sync::Arc;

use combat_content::ContentFactory;
use combat_core::{EncounterStatus, EnemyId, HitZone, LocationId, PcgRng};
use engine::{
    CombatEngine, DeclaredResult, EngineConfig, InMemoryLedger, PlayerId, StaticCollaborators,
};

fn content_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../content")
}

fn engine(seed: u64) -> (CombatEngine, Arc<InMemoryLedger>) {
    let bundle = ContentFactory::load_dir(content_dir()).expect("shipped content loads");
    let ledger = Arc::new(InMemoryLedger::new());

    let engine = CombatEngine::builder()
        .config(EngineConfig::new(bundle.config))
        .collaborators(StaticCollaborators::from_bundle(&bundle).with_ledger(ledger.clone()))
        .enemy_pools(bundle.enemy_pools.clone())
        .loot(bundle.loot.clone())
        .rng(PcgRng::seeded(seed))
        .build()
        .expect("engine builds from content");

    (engine, ledger)
}

/// Plays a full encounter from shipped content, tapping the middle of the
/// normal band every turn.
#[tokio::test]
async fn shipped_content_plays_a_full_encounter() {
    let (engine, ledger) = engine(7);
    let player = PlayerId::from("ayla");

    let started = engine
        .start(&player, &LocationId::from("whispering_woods"))
        .await
        .expect("start");
    assert!(
        [EnemyId::from("wolf"), EnemyId::from("boar")].contains(&started.enemy.id),
        "forest pool drew {}",
        started.enemy.id
    );

    let (_, low, high) = started.bands.ranges()[3];
    let angle = (low + high) / 2.0;

    let mut status = EncounterStatus::Ongoing;
    for _ in 0..200 {
        let report = engine.attack(&started.session_id, angle).await.expect("attack");
        assert_eq!(report.zone, HitZone::Normal);
        assert!(report.damage_dealt >= 1);
        status = report.status;
        if status != EncounterStatus::Ongoing {
            break;
        }
    }

    let declared = match status {
        EncounterStatus::Victory => DeclaredResult::Victory,
        EncounterStatus::Defeat => DeclaredResult::Defeat,
        other => panic!("encounter did not finish: {other}"),
    };
    let completed = engine
        .complete(&started.session_id, declared)
        .await
        .expect("complete");

    assert_eq!(completed.history.attempts, 1);
    assert_eq!(ledger.commit_count(), 1);
    if declared == DeclaredResult::Victory {
        assert_eq!(completed.rewards.loot.len(), 2);
        assert!(completed.rewards.loot.iter().all(|drop| drop.style.is_some()));
    }
}

#[tokio::test]
async fn unmatched_biome_uses_the_default_enemy() {
    let (engine, _) = engine(11);

    let started = engine
        .start(&PlayerId::from("cass"), &LocationId::from("old_road"))
        .await
        .unwrap();

    assert_eq!(started.enemy.id, EnemyId::from("slime"));
    assert_eq!(started.difficulty, 2);
    // Difficulty 2 adds 10% to the template's 16 HP.
    assert_eq!(started.enemy.hit_points, 17);
}
