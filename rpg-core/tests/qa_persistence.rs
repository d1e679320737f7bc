//! QA tests for saving and loading adventures.
//!
//! Run with: `cargo test -p rpg-core --test qa_persistence`

use rpg_core::battle::Battle;
use rpg_core::catalog::Catalog;
use rpg_core::character::Character;
use rpg_core::dice::RngDice;
use rpg_core::dungeon::{DungeonConfig, DungeonLevel};
use rpg_core::persist::{list_saves, save_path, PersistError, SavedAdventure};
use tempfile::TempDir;

fn hero(name: &str) -> Character {
    Character::new_hero(name, &"rogue".into(), &Catalog::standard()).unwrap()
}

#[tokio::test]
async fn test_save_and_load_hero_only() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = save_path(temp_dir.path(), "Vex");

    let saved = SavedAdventure::new(hero("Vex"), None, None).unwrap();
    saved.save_json(&path).await.expect("Save should succeed");
    assert!(path.exists());

    let loaded = SavedAdventure::load_json(&path)
        .await
        .expect("Load should succeed");
    assert_eq!(loaded, saved);
    assert_eq!(loaded.metadata.class, "rogue");
    assert!(loaded.battle.is_none());
    assert!(loaded.level.is_none());
}

#[tokio::test]
async fn test_mid_battle_save_resumes_identically() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("battle.json");
    let catalog = Catalog::standard();
    let mut dice = RngDice::seeded(17);

    let mut battle = Battle::start(hero("Vex"), 1, false, &catalog, &mut dice).unwrap();
    battle
        .resolve_turn(&"strike".into(), &catalog, &mut dice)
        .unwrap();
    let level = DungeonLevel::generate(1, &DungeonConfig::default(), &mut dice).unwrap();

    let saved =
        SavedAdventure::new(battle.hero.clone(), Some(battle.clone()), Some(level.clone()))
            .unwrap();
    saved.save_json(&path).await.unwrap();
    let loaded = SavedAdventure::load_json(&path).await.unwrap();

    assert_eq!(loaded.battle.as_ref(), Some(&battle));
    assert_eq!(loaded.level.as_ref(), Some(&level));

    // Both copies play out the same with the same dice.
    let mut original = battle;
    let mut restored = loaded.battle.unwrap();
    let mut a = RngDice::seeded(5);
    let mut b = RngDice::seeded(5);
    if !original.is_over() {
        let left = original.resolve_turn(&"strike".into(), &catalog, &mut a).unwrap();
        let right = restored.resolve_turn(&"strike".into(), &catalog, &mut b).unwrap();
        assert_eq!(left, right);
    }
}

#[tokio::test]
async fn test_load_rejects_garbage() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("broken.json");
    tokio::fs::write(&path, "{ not json").await.unwrap();

    assert!(matches!(
        SavedAdventure::load_json(&path).await,
        Err(PersistError::Json(_))
    ));
    assert!(matches!(
        SavedAdventure::load_json(temp_dir.path().join("missing.json")).await,
        Err(PersistError::Io(_))
    ));
}

#[tokio::test]
async fn test_list_saves_sorted_by_name() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    for name in ["Charlie", "Alpha", "Beta"] {
        let saved = SavedAdventure::new(hero(name), None, None).unwrap();
        saved
            .save_json(save_path(temp_dir.path(), name))
            .await
            .unwrap();
    }
    tokio::fs::write(temp_dir.path().join("notes.json"), "[]")
        .await
        .unwrap();
    tokio::fs::write(temp_dir.path().join("readme.txt"), "hello")
        .await
        .unwrap();

    let saves = list_saves(temp_dir.path()).await.unwrap();
    let names: Vec<_> = saves.iter().map(|s| s.metadata.hero_name.as_str()).collect();
    assert_eq!(names, vec!["Alpha", "Beta", "Charlie"]);
}
