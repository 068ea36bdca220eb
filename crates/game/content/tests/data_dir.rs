//! Loads the bundled data directory end to end.

use std::fs;
use std::path::PathBuf;

use downfall_content::{ContentFactory, StandardLevels};
use downfall_core::{Board, Difficulty, EntityKind, GoalTarget};

fn bundled() -> ContentFactory {
    ContentFactory::new(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data"))
}

// ============================================================================
// Bundled content
// ============================================================================

#[test]
fn test_bundled_config_loads() {
    let config = bundled().load_config().unwrap();
    assert_eq!(config.difficulty, Difficulty::Normal);
    assert_eq!(config.default_seed, 13_693_969);
    assert!(config.auto_settle);
}

#[test]
fn test_bundled_roster_matches_standard() {
    let catalog = bundled().load_entities().unwrap();
    for template in &downfall_core::EntityCatalog::standard().templates {
        let loaded = catalog.get(template.kind).unwrap();
        assert_eq!(loaded.hp, template.hp, "{}", template.kind);
        assert_eq!(loaded.attack.damage, template.attack.damage, "{}", template.kind);
        assert_eq!(loaded.attack.directions, template.attack.directions, "{}", template.kind);
        assert_eq!(loaded.carry.gold, template.carry.gold, "{}", template.kind);
    }
}

#[test]
fn test_every_bundled_level_builds_a_board() {
    let factory = bundled();
    let catalog = factory.load_entities().unwrap();
    let names = factory.level_names().unwrap();
    assert_eq!(names, vec!["first".to_owned(), "pillars".to_owned()]);

    for name in names {
        let level = factory.load_level(&name, &catalog).unwrap();
        let player = catalog.spawn(EntityKind::Player).unwrap();
        let board = Board::build(&level, catalog.clone(), player, 7).unwrap();
        assert_eq!(board.tiles().len(), level.board_size, "{name}");
        assert!(board.player_coord().is_some(), "{name}");
    }
}

#[test]
fn test_pillar_level_reads_layout() {
    let factory = bundled();
    let level = factory
        .load_level("pillars", &factory.load_entities().unwrap())
        .unwrap();
    assert_eq!(level.difficulty, Difficulty::Hard);
    assert_eq!(level.pillars.len(), 2);
    assert_eq!(level.monster_for_roll(99), Some(EntityKind::Bat));
    assert_eq!(level.goals[0].target, GoalTarget::Pillar);
}

// ============================================================================
// Overrides in a scratch directory
// ============================================================================

#[test]
fn test_missing_roster_falls_back_to_standard() {
    let dir = tempfile::tempdir().unwrap();
    let factory = ContentFactory::new(dir.path());
    assert_eq!(
        factory.load_entities().unwrap(),
        downfall_core::EntityCatalog::standard()
    );
    assert!(factory.load_config().is_err());
}

#[test]
fn test_level_needs_roster_templates() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("levels")).unwrap();
    fs::write(
        dir.path().join("entities.ron"),
        "[(kind: Rat, hp: 2, damage: 1, directions: [South])]",
    )
    .unwrap();
    fs::write(
        dir.path().join("levels/dragons.ron"),
        "(board_size: 6, monsters: [(Dragon, 100)], max_monster_ratio: 5)",
    )
    .unwrap();

    let factory = ContentFactory::new(dir.path());
    let catalog = factory.load_entities().unwrap();
    let err = factory.load_level("dragons", &catalog).unwrap_err();
    assert!(err.to_string().contains("Dragon"), "{err}");
}

#[test]
fn test_standard_campaign_agrees_with_config_seed() {
    let config = bundled().load_config().unwrap();
    let campaign = StandardLevels::from_config(&config).campaign();
    assert_eq!(campaign.len() as u32, StandardLevels::DEPTHS);
    assert_eq!(campaign, StandardLevels::from_config(&config).campaign());
}
