//! Core rules for a turn-based dungeon RPG.
//!
//! This crate provides:
//! - Character stats derived from class, equipment and active effects
//! - Skill resolution into immutable [`Action`]s and their application
//! - One-on-one battles with enemy skill selection and rewards
//! - Hero progression: experience, levelling, shop and rest
//! - Procedural dungeon levels with pathfinding
//! - JSON save/load snapshots
//!
//! All randomness goes through the [`Dice`] trait, so a battle can be
//! replayed exactly with [`RngDice::seeded`] or scripted in tests.
//!
//! # Quick Start
//!
//! ```no_run
//! use rpg_core::{Battle, Catalog, Character, RngDice};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let catalog = Catalog::standard();
//! let mut dice = RngDice::thread();
//!
//! let hero = Character::new_hero("Ayla", &"warrior".into(), &catalog)?;
//! let mut battle = Battle::start(hero, 1, false, &catalog, &mut dice)?;
//!
//! while !battle.is_over() {
//!     let outcome = battle.resolve_turn(&"strike".into(), &catalog, &mut dice)?;
//!     println!("{:?}", outcome.state);
//! }
//! # Ok(())
//! # }
//! ```

pub mod battle;
pub mod catalog;
pub mod character;
pub mod dice;
pub mod dungeon;
pub mod persist;
pub mod tables;
pub mod testing;

// Primary public API
pub use battle::{Battle, BattleConfig, BattleError, BattleState, Turn, TurnOutcome};
pub use catalog::{Catalog, CatalogError, ClassId, EquipmentId, MonsterId, SkillId, Target};
pub use character::{Action, ActionError, Character, HeroError, Reward};
pub use dice::{Dice, RngDice};
pub use dungeon::{DungeonConfig, DungeonError, DungeonGenerator, DungeonLevel, MapError};
pub use persist::{PersistError, SavedAdventure};
