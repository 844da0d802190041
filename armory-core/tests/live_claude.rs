//! Integration tests that call the real Claude API.
//!
//! These tests require ANTHROPIC_API_KEY to be set (via .env file or environment).
//! Run with: `cargo test -p armory-core --test live_claude -- --ignored`

use armory_core::{
    ArmoryConfig, Catalog, ClaudeAdvisor, ClaudeExtractor, Command, Dispatcher, SelectionReason,
    SharedRng, TargetExtractor, WeaponAdvisor,
};
use claude::Claude;

fn setup() {
    let _ = dotenvy::dotenv();
}

fn has_api_key() -> bool {
    std::env::var("ANTHROPIC_API_KEY").is_ok()
}

#[tokio::test]
#[ignore] // Run with: cargo test -p armory-core --test live_claude -- --ignored
async fn test_extractor_finds_named_monster() {
    setup();
    if !has_api_key() {
        eprintln!("Skipping test: ANTHROPIC_API_KEY not set");
        return;
    }

    let config = ArmoryConfig::from_env().expect("config");
    let extractor = ClaudeExtractor::new(Claude::from_env().expect("client"), &config);

    let target = extractor
        .extract("Shadowblade, move in and take down The Colossus of a Thousand Patches now.")
        .await
        .expect("extraction should succeed");
    let target = target.expect("a target should be named");
    assert!(target.contains("Colossus"), "got {target}");
}

#[tokio::test]
#[ignore]
async fn test_extractor_reports_no_target() {
    setup();
    if !has_api_key() {
        eprintln!("Skipping test: ANTHROPIC_API_KEY not set");
        return;
    }

    let config = ArmoryConfig::from_env().expect("config");
    let extractor = ClaudeExtractor::new(Claude::from_env().expect("client"), &config);

    // The model may still invent something; only check the call round-trips.
    let result = extractor.extract("attack").await;
    assert!(result.is_ok(), "{result:?}");
}

#[tokio::test]
#[ignore]
async fn test_advisor_names_a_catalog_weapon() {
    setup();
    if !has_api_key() {
        eprintln!("Skipping test: ANTHROPIC_API_KEY not set");
        return;
    }

    let config = ArmoryConfig::from_env().expect("config");
    let advisor = ClaudeAdvisor::new(Claude::from_env().expect("client"), &config);
    let catalog = Catalog::armory();

    let name = advisor
        .advise("an over-engineered plugin framework with one plugin", &catalog)
        .await
        .expect("advice should succeed");
    if let Some(name) = name {
        assert!(catalog.get(&name).is_some(), "advisor invented {name}");
    }
}

#[tokio::test]
#[ignore]
async fn test_full_llm_engagement() {
    setup();
    if !has_api_key() {
        eprintln!("Skipping test: ANTHROPIC_API_KEY not set");
        return;
    }

    let config = ArmoryConfig::from_env().expect("config");
    let client = Claude::from_env().expect("client");
    let dispatcher = Dispatcher::new(Catalog::armory(), SharedRng::seeded(1))
        .with_extractor(ClaudeExtractor::new(client.clone(), &config))
        .with_advisor(ClaudeAdvisor::new(client, &config));

    let engagement = dispatcher
        .engage(&Command::new("Eliminate Dogma: The Zealot of Stubborn Conventions."))
        .await
        .expect("engagement should resolve");

    println!("{}", engagement.summary());
    assert!(engagement.summary().contains("damage points"));
    if matches!(engagement.selection.reason, SelectionReason::Matched { .. }) {
        assert_eq!(engagement.selection.weapon.name, "craft_granite_maul");
    }
}
