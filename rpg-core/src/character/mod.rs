//! The character aggregate: heroes and enemies.
//!
//! A [`Character`] is plain data. Everything derived from it (effective
//! stats, hit points, armour class, condition flags) is computed on demand by
//! the accessors in [`stats`], so reading never changes state.
//!
//! Role-specific data lives in [`Role`]: a hero carries gold, experience and
//! progression state, an enemy carries its monster template data.

pub mod action;
mod apply;
pub mod effects;
pub mod hero;
mod resolve;
mod stats;

pub use action::{Action, Damage, Heal};
pub use effects::{AuxiliaryEffect, StatusEffect};
pub use hero::{HeroError, PendingLevelUp, Reward};
pub use resolve::ActionError;

use crate::catalog::{
    BaseStats, Catalog, CatalogError, ClassId, EquipmentId, EquipmentRecord, MonsterId,
    MonsterRecord, Resistances, SkillId, SkillRecord, WeaponStats,
};
use crate::tables::EquipmentSlot;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CharacterId(pub Uuid);

impl CharacterId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CharacterId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Whether a character can still act.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifeStatus {
    Alive,
    Dead,
    Retired,
}

/// A skill the character knows, with uses left until the next rest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnownSkill {
    pub skill_id: SkillId,
    pub remaining_uses: u32,
}

impl KnownSkill {
    pub fn new(skill: &SkillRecord) -> Self {
        Self {
            skill_id: skill.id.clone(),
            remaining_uses: skill.max_uses,
        }
    }
}

/// Hero-only state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeroData {
    pub class: ClassId,
    pub gold: u32,
    pub experience: u32,
    pub day: u32,
    pub kills: u32,
    /// Item IDs currently on offer in the shop.
    pub shop_items: Vec<EquipmentId>,
    pub pending_level_up: Option<PendingLevelUp>,
    pub slain_by: Option<String>,
}

/// Enemy-only state, copied from the monster template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyData {
    pub monster: MonsterId,
    pub challenge: u32,
    pub zone: u32,
    pub is_boss: bool,
    /// Damage dealt when no weapon is in hand.
    pub natural_weapon: WeaponStats,
    pub natural_armour_class: i32,
}

/// What kind of combatant a character is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum Role {
    Hero(HeroData),
    Enemy(EnemyData),
}

/// A hero or an enemy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    pub status: LifeStatus,
    pub level: u8,
    pub stats: BaseStats,
    /// Hit points before the constitution adjustment.
    pub base_hit_points: i32,
    /// Maximum hit points before constitution and effect adjustments.
    pub base_max_hit_points: i32,
    pub resistances: Resistances,
    pub equipment: BTreeMap<EquipmentSlot, EquipmentRecord>,
    pub skills: Vec<KnownSkill>,
    pub status_effects: Vec<StatusEffect>,
    pub auxiliary_effects: Vec<AuxiliaryEffect>,
    pub role: Role,
}

impl Character {
    /// A level-1 hero of the given class with its starting kit.
    pub fn new_hero(
        name: impl Into<String>,
        class_id: &ClassId,
        catalog: &Catalog,
    ) -> Result<Self, CatalogError> {
        let class = catalog.get_class(class_id)?;

        let skills = class
            .starting_skills
            .iter()
            .map(|id| catalog.get_skill(id).map(KnownSkill::new))
            .collect::<Result<Vec<_>, _>>()?;

        let mut equipment = BTreeMap::new();
        for (slot, item) in &class.starting_equipment {
            equipment.insert(*slot, catalog.get_equipment(item)?.clone());
        }

        let name = name.into();
        tracing::debug!(name = %name, class = %class.id, "creating hero");

        Ok(Self {
            id: CharacterId::new(),
            name,
            status: LifeStatus::Alive,
            level: 1,
            stats: class.stats,
            base_hit_points: class.hit_points,
            base_max_hit_points: class.hit_points,
            resistances: class.resistances.clone(),
            equipment,
            skills,
            status_effects: Vec::new(),
            auxiliary_effects: Vec::new(),
            role: Role::Hero(HeroData {
                class: class.id.clone(),
                gold: class.starting_gold,
                experience: 0,
                day: 1,
                kills: 0,
                shop_items: Vec::new(),
                pending_level_up: None,
                slain_by: None,
            }),
        })
    }

    /// An enemy built from a monster template at `level`.
    ///
    /// Hit points grow by the template's per-level increment for every level
    /// above the first.
    pub fn new_enemy(
        monster: &MonsterRecord,
        level: u8,
        catalog: &Catalog,
    ) -> Result<Self, CatalogError> {
        let level = level.max(1);
        let hit_points =
            monster.hit_points + monster.hit_points_per_level * (i32::from(level) - 1);

        let skills = monster
            .skills
            .iter()
            .map(|id| catalog.get_skill(id).map(KnownSkill::new))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            id: CharacterId::new(),
            name: monster.name.clone(),
            status: LifeStatus::Alive,
            level,
            stats: monster.stats,
            base_hit_points: hit_points,
            base_max_hit_points: hit_points,
            resistances: monster.resistances.clone(),
            equipment: BTreeMap::new(),
            skills,
            status_effects: Vec::new(),
            auxiliary_effects: Vec::new(),
            role: Role::Enemy(EnemyData {
                monster: monster.id.clone(),
                challenge: monster.challenge,
                zone: monster.zone,
                is_boss: monster.is_boss,
                natural_weapon: WeaponStats {
                    weapon_type: crate::tables::WeaponType::Unarmed,
                    damage_type: monster.damage_type,
                    min_damage: monster.min_damage,
                    max_damage: monster.max_damage,
                },
                natural_armour_class: monster.armour_class,
            }),
        })
    }

    pub fn hero(&self) -> Option<&HeroData> {
        match &self.role {
            Role::Hero(hero) => Some(hero),
            Role::Enemy(_) => None,
        }
    }

    pub fn hero_mut(&mut self) -> Option<&mut HeroData> {
        match &mut self.role {
            Role::Hero(hero) => Some(hero),
            Role::Enemy(_) => None,
        }
    }

    pub fn enemy(&self) -> Option<&EnemyData> {
        match &self.role {
            Role::Enemy(enemy) => Some(enemy),
            Role::Hero(_) => None,
        }
    }

    pub fn is_hero(&self) -> bool {
        matches!(self.role, Role::Hero(_))
    }

    pub fn known_skill(&self, id: &SkillId) -> Option<&KnownSkill> {
        self.skills.iter().find(|s| &s.skill_id == id)
    }

    pub fn knows_skill(&self, id: &SkillId) -> bool {
        self.known_skill(id).is_some()
    }

    /// Learn a skill with a full set of uses. Already known skills are left alone.
    pub fn learn_skill(&mut self, skill: &SkillRecord) {
        if !self.knows_skill(&skill.id) {
            self.skills.push(KnownSkill::new(skill));
        }
    }

    /// Whether any active status or auxiliary effect came from `skill`.
    pub fn has_effect_from(&self, skill: &SkillId) -> bool {
        self.status_effects.iter().any(|e| &e.source_skill == skill)
            || self.auxiliary_effects.iter().any(|e| &e.source_skill == skill)
    }
}
