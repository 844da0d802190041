//! End-to-end dispatcher scenarios using the deterministic test doubles.

use armory_core::testing::{EmptyArmory, RecordingArmory, ScriptedAdvisor, ScriptedExtractor};
use armory_core::{
    Catalog, Command, DamageType, DispatchError, Dispatcher, MatchKind, SelectionReason,
    SharedRng,
};
use std::sync::Arc;

fn recording(seed: u64) -> (Dispatcher<RecordingArmory>, RecordingArmory) {
    let armory = RecordingArmory::new(Catalog::armory());
    let dispatcher = Dispatcher::new(armory.clone(), SharedRng::seeded(seed));
    (dispatcher, armory)
}

// =============================================================================
// Targeted attacks
// =============================================================================

#[tokio::test]
async fn test_colossus_gets_the_soulshard_dagger() {
    let (dispatcher, armory) = recording(1);

    for _ in 0..50 {
        let engagement = dispatcher
            .engage(&Command::new("attack The Colossus of a Thousand Patches"))
            .await
            .unwrap();

        assert_eq!(engagement.selection.weapon.name, "enchant_soulshard_dagger");
        assert_eq!(
            engagement.target.as_deref(),
            Some("The Colossus of a Thousand Patches")
        );

        let result = &engagement.result;
        assert_eq!(result.damage_type, DamageType::ArcanePiercing);
        assert!((12..=18).contains(&result.base_damage));
        assert!((0.25..=0.40).contains(&result.critical_hit_chance));
    }
    assert_eq!(armory.call_count(), 50);
}

#[tokio::test]
async fn test_shared_counter_resolves_to_first_declared() {
    let (dispatcher, _) = recording(2);

    for _ in 0..20 {
        let engagement = dispatcher
            .engage(&Command::new("attack The Weaver of Spaghetti Code"))
            .await
            .unwrap();
        assert_eq!(engagement.selection.weapon.name, "forge_broadsword");
    }
}

#[tokio::test]
async fn test_every_documented_adversary_is_countered() {
    let (dispatcher, _) = recording(3);
    let catalog = Catalog::armory();

    for weapon in catalog.iter() {
        for counter in weapon.counters {
            let engagement = dispatcher
                .engage(&Command::new(format!("attack {counter}")))
                .await
                .unwrap();
            assert!(
                matches!(
                    engagement.selection.reason,
                    SelectionReason::Matched { kind: MatchKind::Exact, .. }
                ),
                "{counter} was not matched exactly"
            );
            assert!(
                engagement
                    .selection
                    .weapon
                    .counters
                    .contains(counter),
                "{counter} resolved to {}",
                engagement.selection.weapon.name
            );
        }
    }
}

// =============================================================================
// Random fallback
// =============================================================================

#[tokio::test]
async fn test_bare_attack_draws_a_valid_weapon() {
    let (dispatcher, armory) = recording(4);

    let engagement = dispatcher.engage(&Command::new("attack")).await.unwrap();
    assert_eq!(engagement.target, None);
    assert_eq!(engagement.selection.reason, SelectionReason::Random { label: None });
    assert!(Catalog::armory().get(engagement.selection.weapon.name).is_some());
    assert_eq!(armory.calls(), vec![engagement.selection.weapon.name.to_string()]);
}

#[tokio::test]
async fn test_random_selection_is_uniform() {
    const TRIALS: usize = 2400;
    let (dispatcher, armory) = recording(5);

    for _ in 0..TRIALS {
        dispatcher.engage(&Command::new("attack")).await.unwrap();
    }

    let tally = armory.tally();
    let expected = TRIALS / 12;
    assert_eq!(tally.len(), 12, "some weapons never drawn: {tally:?}");
    for (weapon, count) in &tally {
        assert!(
            count.abs_diff(expected) <= 70,
            "{weapon} drawn {count} times, expected about {expected}"
        );
    }
}

#[tokio::test]
async fn test_unknown_monster_falls_back_to_random() {
    let (dispatcher, armory) = recording(6);

    let engagement = dispatcher
        .engage(&Command::new("attack a friendly duck"))
        .await
        .unwrap();
    assert_eq!(
        engagement.selection.reason,
        SelectionReason::Random {
            label: Some("a friendly duck".into())
        }
    );
    assert_eq!(armory.call_count(), 1);
}

#[tokio::test]
async fn test_generic_or_fragment_targets_draw_at_random() {
    let dispatcher = Dispatcher::new(Catalog::armory(), SharedRng::seeded(1));

    for (text, label) in [
        ("attack the", "the"),
        ("attack Hyperion the Titan", "Hyperion the Titan"),
        ("attack the Tim", "the Tim"),
    ] {
        let engagement = dispatcher.engage(&Command::new(text)).await.unwrap();
        assert_eq!(
            engagement.selection.reason,
            SelectionReason::Random {
                label: Some(label.into())
            },
            "{text} resolved to {}",
            engagement.selection.weapon.name
        );
    }
}

#[tokio::test]
async fn test_extraction_failure_degrades_to_random() {
    let armory = RecordingArmory::new(Catalog::armory());
    let dispatcher = Dispatcher::new(armory.clone(), SharedRng::seeded(7))
        .with_extractor(ScriptedExtractor::failing());

    let engagement = dispatcher
        .engage(&Command::new("attack Obfuscation"))
        .await
        .unwrap();
    assert_eq!(engagement.target, None);
    assert!(matches!(engagement.selection.reason, SelectionReason::Random { .. }));
    assert_eq!(armory.call_count(), 1);
}

#[tokio::test]
async fn test_silent_extractor_means_no_target() {
    let extractor = ScriptedExtractor::silent();
    let dispatcher = Dispatcher::new(Catalog::armory(), SharedRng::seeded(18))
        .with_extractor(extractor.clone());

    let engagement = dispatcher
        .engage(&Command::new("attack Obfuscation"))
        .await
        .unwrap();
    assert_eq!(engagement.target, None);
    assert_eq!(engagement.selection.reason, SelectionReason::Random { label: None });
    assert_eq!(extractor.seen().len(), 1);
}

// =============================================================================
// Extractor and advisor seams
// =============================================================================

#[tokio::test]
async fn test_custom_extractor_supplies_target() {
    let extractor = ScriptedExtractor::answering("Perfectionism");
    let dispatcher = Dispatcher::new(Catalog::armory(), SharedRng::seeded(8))
        .with_extractor(extractor.clone());

    let engagement = dispatcher
        .engage(&Command::new("go get the one in the gilded cage"))
        .await
        .unwrap();
    assert_eq!(engagement.selection.weapon.name, "strike_the_gilded_gavel");
    assert_eq!(engagement.result.base_damage, 0);
    assert_eq!(extractor.seen(), vec!["go get the one in the gilded cage".to_string()]);
}

#[tokio::test]
async fn test_advisor_resolves_unmatched_label() {
    let armory = RecordingArmory::new(Catalog::armory());
    let dispatcher = Dispatcher::new(armory.clone(), SharedRng::seeded(9))
        .with_advisor(ScriptedAdvisor::naming("forge_container_gauntlet"));

    let engagement = dispatcher
        .engage(&Command::new("attack the flaky staging server"))
        .await
        .unwrap();
    assert_eq!(engagement.selection.weapon.name, "forge_container_gauntlet");
    assert_eq!(
        engagement.selection.reason,
        SelectionReason::Advised {
            label: "the flaky staging server".into()
        }
    );
    assert_eq!(armory.calls(), vec!["forge_container_gauntlet".to_string()]);
}

#[tokio::test]
async fn test_advisor_not_consulted_for_explicit_matches() {
    let dispatcher = Dispatcher::new(Catalog::armory(), SharedRng::seeded(10))
        .with_advisor(ScriptedAdvisor::naming("use_simple_sling"));

    let engagement = dispatcher.engage(&Command::new("attack Hype")).await.unwrap();
    assert_eq!(engagement.selection.weapon.name, "raise_shield_of_lts");
}

#[tokio::test]
async fn test_advisor_inventing_weapons_is_ignored() {
    let armory = RecordingArmory::new(Catalog::armory());
    let dispatcher = Dispatcher::new(armory.clone(), SharedRng::seeded(11))
        .with_advisor(ScriptedAdvisor::naming("summon_dragon"));

    let engagement = dispatcher
        .engage(&Command::new("attack the flaky staging server"))
        .await
        .unwrap();
    assert!(matches!(engagement.selection.reason, SelectionReason::Random { .. }));
    assert_ne!(armory.calls(), vec!["summon_dragon".to_string()]);
    assert_eq!(armory.call_count(), 1);
}

#[tokio::test]
async fn test_advisor_failure_keeps_random_draw() {
    let dispatcher = Dispatcher::new(Catalog::armory(), SharedRng::seeded(12))
        .with_advisor(ScriptedAdvisor::failing());

    let engagement = dispatcher
        .engage(&Command::new("attack the flaky staging server"))
        .await
        .unwrap();
    assert!(matches!(engagement.selection.reason, SelectionReason::Random { .. }));
}

// =============================================================================
// Failures
// =============================================================================

#[tokio::test]
async fn test_invocation_failure_is_surfaced() {
    let (dispatcher, armory) = recording(13);
    armory.fail_strikes(true);

    let err = dispatcher
        .engage(&Command::new("attack Obfuscation"))
        .await
        .unwrap_err();
    match err {
        DispatchError::Invocation { weapon, .. } => assert_eq!(weapon, "focus_lens_of_clarity"),
        other => panic!("unexpected error: {other}"),
    }
    // Attempted exactly once, no retry, no fabricated result.
    assert_eq!(armory.call_count(), 1);
}

#[tokio::test]
async fn test_empty_armory_is_fatal() {
    let dispatcher = Dispatcher::new(EmptyArmory::new(), SharedRng::seeded(14));

    let err = dispatcher.engage(&Command::new("attack")).await.unwrap_err();
    assert!(matches!(err, DispatchError::EmptyCatalog));
    assert!(err.to_string().contains("empty"));
}

// =============================================================================
// Summary and concurrency
// =============================================================================

#[tokio::test]
async fn test_summary_carries_damage_points() {
    let (dispatcher, _) = recording(15);

    for text in ["attack", "attack Dogma", "attack The Timeless Slumber"] {
        let engagement = dispatcher.engage(&Command::new(text)).await.unwrap();
        let summary = engagement.summary();
        assert!(
            summary.contains(&format!("{} damage points", engagement.result.base_damage)),
            "{summary}"
        );
        assert!(summary.contains(&engagement.result.weapon_name));
        assert!(summary.contains(&engagement.result.special_effect));
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_commands_each_strike_once() {
    let armory = RecordingArmory::new(Catalog::armory());
    let dispatcher = Arc::new(Dispatcher::new(armory.clone(), SharedRng::seeded(16)));

    let handles: Vec<_> = (0..64)
        .map(|i| {
            let dispatcher = Arc::clone(&dispatcher);
            tokio::spawn(async move {
                let text = if i % 2 == 0 { "attack Obfuscation" } else { "attack" };
                dispatcher.engage(&Command::new(text)).await
            })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap().unwrap();
    }
    assert_eq!(armory.call_count(), 64);
    assert!(armory.tally()["focus_lens_of_clarity"] >= 32);
}

#[test]
fn test_engagement_serializes() {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let (dispatcher, _) = recording(17);
    let engagement = rt
        .block_on(dispatcher.engage(&Command::new("attack Obfuscation")))
        .unwrap();

    let value = serde_json::to_value(&engagement).unwrap();
    assert_eq!(value["selection"]["reason"]["by"], "matched");
    assert_eq!(value["selection"]["reason"]["kind"], "exact");
    assert_eq!(value["result"]["weapon_name"], "Lens of Clarity");
    assert_eq!(value["result"]["damage_type"], "Revelation");
}
