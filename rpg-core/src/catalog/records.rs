//! Catalogue record types.
//!
//! These are the read-only shapes the content catalogue hands out: classes,
//! skills and their effects, equipment, and monsters.

use crate::tables::{
    AuxiliaryEffectKind, AuxiliaryStat, DamageType, EquipmentCategory, EquipmentSlot, Stat,
    WeaponType,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// ============================================================================
// ID Types
// ============================================================================

macro_rules! catalog_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

catalog_id!(
    /// Identifier of a character class.
    ClassId
);
catalog_id!(
    /// Identifier of a skill.
    SkillId
);
catalog_id!(
    /// Identifier of an equipment item.
    EquipmentId
);
catalog_id!(
    /// Identifier of a monster template.
    MonsterId
);

// ============================================================================
// Stat blocks
// ============================================================================

/// The six base stats of a character or template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStats {
    pub strength: i32,
    pub dexterity: i32,
    pub constitution: i32,
    pub intelligence: i32,
    pub wisdom: i32,
    pub charisma: i32,
}

impl BaseStats {
    pub fn new(str: i32, dex: i32, con: i32, int: i32, wis: i32, cha: i32) -> Self {
        Self {
            strength: str,
            dexterity: dex,
            constitution: con,
            intelligence: int,
            wisdom: wis,
            charisma: cha,
        }
    }

    pub fn get(&self, stat: Stat) -> i32 {
        match stat {
            Stat::Strength => self.strength,
            Stat::Dexterity => self.dexterity,
            Stat::Constitution => self.constitution,
            Stat::Intelligence => self.intelligence,
            Stat::Wisdom => self.wisdom,
            Stat::Charisma => self.charisma,
        }
    }

    pub fn set(&mut self, stat: Stat, value: i32) {
        match stat {
            Stat::Strength => self.strength = value,
            Stat::Dexterity => self.dexterity = value,
            Stat::Constitution => self.constitution = value,
            Stat::Intelligence => self.intelligence = value,
            Stat::Wisdom => self.wisdom = value,
            Stat::Charisma => self.charisma = value,
        }
    }
}

impl Default for BaseStats {
    fn default() -> Self {
        Self::new(10, 10, 10, 10, 10, 10)
    }
}

/// Base resistances, one per damage type, each within -100..=100.
///
/// Types not present in the map resist nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Resistances(BTreeMap<DamageType, i32>);

impl Resistances {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, damage_type: DamageType, value: i32) -> Self {
        self.set(damage_type, value);
        self
    }

    pub fn get(&self, damage_type: DamageType) -> i32 {
        self.0.get(&damage_type).copied().unwrap_or(0)
    }

    pub fn set(&mut self, damage_type: DamageType, value: i32) {
        self.0.insert(damage_type, value.clamp(-100, 100));
    }
}

// ============================================================================
// Properties
// ============================================================================

/// What a property modifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyKind {
    Stat(Stat),
    Resistance(DamageType),
    /// Percentage bonus to damage of a type.
    Damage(DamageType),
    Auxiliary(AuxiliaryStat),
}

/// A typed numeric modifier carried by equipment and status effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    pub kind: PropertyKind,
    pub value: i32,
}

impl Property {
    pub fn stat(stat: Stat, value: i32) -> Self {
        Self {
            kind: PropertyKind::Stat(stat),
            value,
        }
    }

    pub fn resistance(damage_type: DamageType, value: i32) -> Self {
        Self {
            kind: PropertyKind::Resistance(damage_type),
            value,
        }
    }

    pub fn damage(damage_type: DamageType, value: i32) -> Self {
        Self {
            kind: PropertyKind::Damage(damage_type),
            value,
        }
    }

    pub fn auxiliary(stat: AuxiliaryStat, value: i32) -> Self {
        Self {
            kind: PropertyKind::Auxiliary(stat),
            value,
        }
    }
}

// ============================================================================
// Skills
// ============================================================================

/// Who an effect lands on, relative to whoever used the skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Target {
    #[serde(rename = "self")]
    Caster,
    #[serde(rename = "enemy")]
    Enemy,
}

/// One effect of a skill, resolved in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SkillEffect {
    WeaponDamage {
        target: Target,
        multiplier: f64,
    },
    Damage {
        target: Target,
        damage_type: DamageType,
        min: i32,
        max: i32,
    },
    Heal {
        target: Target,
        min: i32,
        max: i32,
    },
    Status {
        target: Target,
        properties: Vec<Property>,
        duration: u32,
        #[serde(default)]
        saving_modifier: Option<Stat>,
        #[serde(default)]
        difficulty: Option<i32>,
    },
    Auxiliary {
        target: Target,
        effect: AuxiliaryEffectKind,
        duration: u32,
        #[serde(default)]
        saving_modifier: Option<Stat>,
        #[serde(default)]
        difficulty: Option<i32>,
    },
}

impl SkillEffect {
    pub fn target(&self) -> Target {
        match self {
            SkillEffect::WeaponDamage { target, .. }
            | SkillEffect::Damage { target, .. }
            | SkillEffect::Heal { target, .. }
            | SkillEffect::Status { target, .. }
            | SkillEffect::Auxiliary { target, .. } => *target,
        }
    }
}

/// A skill definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillRecord {
    pub id: SkillId,
    pub name: String,
    #[serde(default)]
    pub icon: String,
    /// Class allowed to learn the skill; `None` means anyone (monsters included).
    #[serde(default)]
    pub class: Option<ClassId>,
    /// Uses per rest. Zero means unlimited.
    #[serde(default)]
    pub max_uses: u32,
    pub effects: Vec<SkillEffect>,
}

impl SkillRecord {
    pub fn is_unlimited(&self) -> bool {
        self.max_uses == 0
    }

    /// Whether any effect heals whoever uses the skill.
    pub fn heals_caster(&self) -> bool {
        self.effects
            .iter()
            .any(|e| matches!(e, SkillEffect::Heal { target: Target::Caster, .. }))
    }

    /// Whether any status or auxiliary effect lands on `target`.
    pub fn applies_effect_to(&self, target: Target) -> bool {
        self.effects.iter().any(|e| {
            matches!(
                e,
                SkillEffect::Status { .. } | SkillEffect::Auxiliary { .. }
            ) && e.target() == target
        })
    }
}

// ============================================================================
// Equipment
// ============================================================================

/// Rarity tier, which drives how often an item shows up in shops and loot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Legendary,
}

impl Rarity {
    pub fn weight(&self) -> u32 {
        match self {
            Rarity::Common => 60,
            Rarity::Uncommon => 25,
            Rarity::Rare => 10,
            Rarity::Legendary => 5,
        }
    }
}

/// Damage profile of a weapon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaponStats {
    pub weapon_type: WeaponType,
    pub damage_type: DamageType,
    pub min_damage: i32,
    pub max_damage: i32,
}

/// What an equipment item does in combat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ItemKind {
    Weapon(WeaponStats),
    Armour { armour_class: i32 },
    Accessory,
}

/// An equipment item definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentRecord {
    pub id: EquipmentId,
    pub name: String,
    pub category: EquipmentCategory,
    pub kind: ItemKind,
    pub rarity: Rarity,
    /// Minimum hero level for the item to appear in shops.
    pub level: u8,
    pub price: u32,
    /// Classes allowed to use the item; empty means any class.
    #[serde(default)]
    pub classes: Vec<ClassId>,
    #[serde(default)]
    pub properties: Vec<Property>,
}

impl EquipmentRecord {
    pub fn weapon(&self) -> Option<&WeaponStats> {
        match &self.kind {
            ItemKind::Weapon(stats) => Some(stats),
            _ => None,
        }
    }

    pub fn armour_class(&self) -> i32 {
        match self.kind {
            ItemKind::Armour { armour_class } => armour_class,
            _ => 0,
        }
    }

    pub fn usable_by(&self, class: &ClassId) -> bool {
        self.classes.is_empty() || self.classes.contains(class)
    }

    pub fn fits(&self, slot: EquipmentSlot) -> bool {
        self.category.fits(slot)
    }
}

// ============================================================================
// Classes and monsters
// ============================================================================

/// A playable class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassRecord {
    pub id: ClassId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub stats: BaseStats,
    pub hit_points: i32,
    /// Base max hit points gained per level.
    pub hit_points_per_level: i32,
    #[serde(default)]
    pub resistances: Resistances,
    pub starting_skills: Vec<SkillId>,
    #[serde(default)]
    pub starting_equipment: Vec<(EquipmentSlot, EquipmentId)>,
    #[serde(default)]
    pub starting_gold: u32,
}

/// A monster template that enemies are built from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonsterRecord {
    pub id: MonsterId,
    pub name: String,
    pub zone: u32,
    #[serde(default)]
    pub is_boss: bool,
    pub challenge: u32,
    pub stats: BaseStats,
    pub hit_points: i32,
    pub hit_points_per_level: i32,
    #[serde(default)]
    pub resistances: Resistances,
    pub armour_class: i32,
    pub damage_type: DamageType,
    pub min_damage: i32,
    pub max_damage: i32,
    pub skills: Vec<SkillId>,
}
