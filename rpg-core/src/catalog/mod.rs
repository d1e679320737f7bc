//! Read-only game content catalogue.
//!
//! Resolves class, skill, equipment and monster IDs to their records and
//! builds the weighted pools the shop and encounter tables draw from.
//!
//! # Example
//!
//! ```
//! use rpg_core::catalog::Catalog;
//!
//! let catalog = Catalog::standard();
//! let strike = catalog.get_skill(&"strike".into()).unwrap();
//! assert_eq!(strike.name, "Strike");
//! ```

mod content;
pub mod records;

pub use records::{
    BaseStats, ClassId, ClassRecord, EquipmentId, EquipmentRecord, ItemKind, MonsterId,
    MonsterRecord, Property, PropertyKind, Rarity, Resistances, SkillEffect, SkillId, SkillRecord,
    Target, WeaponStats,
};

use crate::dice::Dice;
use crate::tables::EquipmentCategory;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

/// Errors from catalogue lookups and loading.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("no monster for zone {zone} (boss: {is_boss})")]
    NoMonster { zone: u32, is_boss: bool },

    #[error("duplicate {kind} id: {id}")]
    Duplicate { kind: &'static str, id: String },

    #[error("{owner} references unknown {kind} {id}")]
    Dangling {
        owner: String,
        kind: &'static str,
        id: String,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// The raw content lists, in the shape content files are written in.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogData {
    #[serde(default)]
    pub classes: Vec<ClassRecord>,
    #[serde(default)]
    pub skills: Vec<SkillRecord>,
    #[serde(default)]
    pub equipment: Vec<EquipmentRecord>,
    #[serde(default)]
    pub monsters: Vec<MonsterRecord>,
}

/// Indexed, validated content.
#[derive(Debug, Clone)]
pub struct Catalog {
    classes: BTreeMap<ClassId, ClassRecord>,
    skills: BTreeMap<SkillId, SkillRecord>,
    equipment: BTreeMap<EquipmentId, EquipmentRecord>,
    /// Kept in content order so encounter draws are stable for a given seed.
    monsters: Vec<MonsterRecord>,
}

impl Catalog {
    /// Index and validate a content set.
    ///
    /// Fails on duplicate IDs and on references to records that don't exist.
    pub fn new(data: CatalogData) -> Result<Self, CatalogError> {
        check_unique("class", data.classes.iter().map(|c| c.id.as_str()))?;
        check_unique("skill", data.skills.iter().map(|s| s.id.as_str()))?;
        check_unique("equipment", data.equipment.iter().map(|e| e.id.as_str()))?;
        check_unique("monster", data.monsters.iter().map(|m| m.id.as_str()))?;

        let catalog = Self::index(data);
        catalog.check_references()?;

        tracing::debug!(
            classes = catalog.classes.len(),
            skills = catalog.skills.len(),
            equipment = catalog.equipment.len(),
            monsters = catalog.monsters.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    /// Parse and validate a JSON content file.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let data: CatalogData = serde_json::from_str(json)?;
        Self::new(data)
    }

    /// The built-in content set.
    pub fn standard() -> Self {
        Self::index(content::STANDARD.clone())
    }

    fn index(data: CatalogData) -> Self {
        Self {
            classes: data.classes.into_iter().map(|c| (c.id.clone(), c)).collect(),
            skills: data.skills.into_iter().map(|s| (s.id.clone(), s)).collect(),
            equipment: data
                .equipment
                .into_iter()
                .map(|e| (e.id.clone(), e))
                .collect(),
            monsters: data.monsters,
        }
    }

    fn check_references(&self) -> Result<(), CatalogError> {
        for class in self.classes.values() {
            for skill in &class.starting_skills {
                self.require_skill(class.id.as_str(), skill)?;
            }
            for (_, item) in &class.starting_equipment {
                if !self.equipment.contains_key(item) {
                    return Err(dangling(class.id.as_str(), "equipment", item.as_str()));
                }
            }
        }
        for skill in self.skills.values() {
            if let Some(class) = &skill.class {
                if !self.classes.contains_key(class) {
                    return Err(dangling(skill.id.as_str(), "class", class.as_str()));
                }
            }
        }
        for monster in &self.monsters {
            for skill in &monster.skills {
                self.require_skill(monster.id.as_str(), skill)?;
            }
        }
        Ok(())
    }

    fn require_skill(&self, owner: &str, skill: &SkillId) -> Result<(), CatalogError> {
        if self.skills.contains_key(skill) {
            Ok(())
        } else {
            Err(dangling(owner, "skill", skill.as_str()))
        }
    }

    // ========================================================================
    // Lookups
    // ========================================================================

    pub fn get_skill(&self, id: &SkillId) -> Result<&SkillRecord, CatalogError> {
        self.skills.get(id).ok_or_else(|| not_found("skill", id.as_str()))
    }

    pub fn get_equipment(&self, id: &EquipmentId) -> Result<&EquipmentRecord, CatalogError> {
        self.equipment
            .get(id)
            .ok_or_else(|| not_found("equipment", id.as_str()))
    }

    pub fn get_class(&self, id: &ClassId) -> Result<&ClassRecord, CatalogError> {
        self.classes.get(id).ok_or_else(|| not_found("class", id.as_str()))
    }

    pub fn get_monster_by_id(&self, id: &MonsterId) -> Result<&MonsterRecord, CatalogError> {
        self.monsters
            .iter()
            .find(|m| &m.id == id)
            .ok_or_else(|| not_found("monster", id.as_str()))
    }

    /// Draw a random monster template for an encounter.
    pub fn get_monster(
        &self,
        zone: u32,
        is_boss: bool,
        dice: &mut dyn Dice,
    ) -> Result<&MonsterRecord, CatalogError> {
        let pool: Vec<&MonsterRecord> = self
            .monsters
            .iter()
            .filter(|m| m.zone == zone && m.is_boss == is_boss)
            .collect();
        dice.choose_index(pool.len())
            .map(|i| pool[i])
            .ok_or(CatalogError::NoMonster { zone, is_boss })
    }

    pub fn classes(&self) -> impl Iterator<Item = &ClassRecord> {
        self.classes.values()
    }

    pub fn skills(&self) -> impl Iterator<Item = &SkillRecord> {
        self.skills.values()
    }

    pub fn monsters(&self) -> &[MonsterRecord] {
        &self.monsters
    }

    /// Skills a class can learn, excluding shared ones.
    pub fn class_skills(&self, class: &ClassId) -> Vec<&SkillRecord> {
        self.skills
            .values()
            .filter(|s| s.class.as_ref() == Some(class))
            .collect()
    }

    /// Draw up to `count` distinct items for a shop or loot roll.
    ///
    /// Only items the class can use and whose level is at most `level` are
    /// eligible. Each draw is weighted by rarity and by category, favouring
    /// weapons and body armour.
    pub fn weighted_items(
        &self,
        class: &ClassId,
        count: usize,
        level: u32,
        dice: &mut dyn Dice,
    ) -> Vec<EquipmentId> {
        let mut pool: Vec<&EquipmentRecord> = self
            .equipment
            .values()
            .filter(|e| e.usable_by(class) && u32::from(e.level) <= level)
            .collect();

        let mut picked = Vec::with_capacity(count.min(pool.len()));
        while picked.len() < count {
            let weights: Vec<u32> = pool.iter().map(|e| item_weight(e)).collect();
            let Some(index) = dice.weighted_index(&weights) else {
                break;
            };
            picked.push(pool.swap_remove(index).id.clone());
        }
        picked
    }
}

fn item_weight(item: &EquipmentRecord) -> u32 {
    let category = match item.category {
        EquipmentCategory::Weapon => 3,
        EquipmentCategory::BodyArmour | EquipmentCategory::Shield => 2,
        _ => 1,
    };
    item.rarity.weight() * category
}

fn check_unique<'a>(
    kind: &'static str,
    ids: impl Iterator<Item = &'a str>,
) -> Result<(), CatalogError> {
    let mut seen = BTreeSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(CatalogError::Duplicate {
                kind,
                id: id.to_string(),
            });
        }
    }
    Ok(())
}

fn not_found(kind: &'static str, id: &str) -> CatalogError {
    CatalogError::NotFound {
        kind,
        id: id.to_string(),
    }
}

fn dangling(owner: &str, kind: &'static str, id: &str) -> CatalogError {
    CatalogError::Dangling {
        owner: owner.to_string(),
        kind,
        id: id.to_string(),
    }
}
