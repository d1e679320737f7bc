//! Static game tables.
//!
//! Pure lookups shared by the character engine and the dungeon generator:
//! ability modifiers, the experience curve, which stat drives each weapon
//! type, hit-type multipliers and which slots an item category may occupy.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Highest level a character can reach.
pub const MAX_LEVEL: u8 = 30;

/// Natural roll needed on the crit die for a critical hit.
pub const CRIT_THRESHOLD: i32 = 20;

/// Damage multiplier applied while the target is bleeding.
pub const BLEED_MULTIPLIER: f64 = 1.5;

/// Divisor applied to max hit points for one poison tick.
pub const POISON_DIVISOR: i32 = 8;

// ============================================================================
// Stats
// ============================================================================

/// The six base stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stat {
    Strength,
    Dexterity,
    Constitution,
    Intelligence,
    Wisdom,
    Charisma,
}

impl Stat {
    pub fn abbreviation(&self) -> &'static str {
        match self {
            Stat::Strength => "STR",
            Stat::Dexterity => "DEX",
            Stat::Constitution => "CON",
            Stat::Intelligence => "INT",
            Stat::Wisdom => "WIS",
            Stat::Charisma => "CHA",
        }
    }

    pub fn all() -> [Stat; 6] {
        [
            Stat::Strength,
            Stat::Dexterity,
            Stat::Constitution,
            Stat::Intelligence,
            Stat::Wisdom,
            Stat::Charisma,
        ]
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

/// Modifier for an ability score.
///
/// Floor division so odd scores below 10 round down: 8-9 = -1, 10-11 = 0,
/// 12-13 = +1.
pub fn ability_modifier(score: i32) -> i32 {
    (score - 10).div_euclid(2)
}

// ============================================================================
// Damage types
// ============================================================================

/// The ten damage types. Every character carries one resistance per type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageType {
    Slashing,
    Piercing,
    Bludgeoning,
    Fire,
    Cold,
    Lightning,
    Acid,
    Poison,
    Necrotic,
    Radiant,
}

impl DamageType {
    pub fn name(&self) -> &'static str {
        match self {
            DamageType::Slashing => "slashing",
            DamageType::Piercing => "piercing",
            DamageType::Bludgeoning => "bludgeoning",
            DamageType::Fire => "fire",
            DamageType::Cold => "cold",
            DamageType::Lightning => "lightning",
            DamageType::Acid => "acid",
            DamageType::Poison => "poison",
            DamageType::Necrotic => "necrotic",
            DamageType::Radiant => "radiant",
        }
    }

    pub fn all() -> [DamageType; 10] {
        [
            DamageType::Slashing,
            DamageType::Piercing,
            DamageType::Bludgeoning,
            DamageType::Fire,
            DamageType::Cold,
            DamageType::Lightning,
            DamageType::Acid,
            DamageType::Poison,
            DamageType::Necrotic,
            DamageType::Radiant,
        ]
    }

    /// Stat whose modifier is added to direct damage of this type.
    ///
    /// Poison has no governing stat.
    pub fn governing_stat(&self) -> Option<Stat> {
        match self {
            DamageType::Slashing | DamageType::Piercing | DamageType::Bludgeoning => {
                Some(Stat::Strength)
            }
            DamageType::Fire
            | DamageType::Cold
            | DamageType::Lightning
            | DamageType::Acid
            | DamageType::Necrotic => Some(Stat::Intelligence),
            DamageType::Radiant => Some(Stat::Wisdom),
            DamageType::Poison => None,
        }
    }
}

impl fmt::Display for DamageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ============================================================================
// Auxiliary stats and effects
// ============================================================================

/// Secondary stats that only come from equipment and status effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuxiliaryStat {
    ArmourClass,
    HitBonus,
    CritBonus,
    MaxHitPoints,
}

/// Timed conditions tracked one-per-kind on a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuxiliaryEffectKind {
    Poison,
    Stun,
    Bleed,
    Disarm,
}

impl AuxiliaryEffectKind {
    pub fn name(&self) -> &'static str {
        match self {
            AuxiliaryEffectKind::Poison => "poison",
            AuxiliaryEffectKind::Stun => "stun",
            AuxiliaryEffectKind::Bleed => "bleed",
            AuxiliaryEffectKind::Disarm => "disarm",
        }
    }
}

// ============================================================================
// Hit types
// ============================================================================

/// Outcome of an attack roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HitType {
    Miss,
    Hit,
    Crit,
}

impl HitType {
    /// Damage multiplier for this outcome.
    pub fn multiplier(&self) -> f64 {
        match self {
            HitType::Miss => 0.0,
            HitType::Hit => 1.0,
            HitType::Crit => 2.0,
        }
    }
}

// ============================================================================
// Weapons
// ============================================================================

/// Weapon families. Each is keyed to the stat whose modifier adds damage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeaponType {
    Axe,
    Sword,
    Mace,
    Spear,
    Dagger,
    Bow,
    Crossbow,
    Staff,
    Wand,
    Unarmed,
}

impl WeaponType {
    pub fn stat(&self) -> Stat {
        match self {
            WeaponType::Axe
            | WeaponType::Sword
            | WeaponType::Mace
            | WeaponType::Spear
            | WeaponType::Unarmed => Stat::Strength,
            WeaponType::Dagger | WeaponType::Bow | WeaponType::Crossbow => Stat::Dexterity,
            WeaponType::Staff | WeaponType::Wand => Stat::Intelligence,
        }
    }
}

// ============================================================================
// Equipment slots
// ============================================================================

/// The ten equipment slots every character has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentSlot {
    Head,
    Neck,
    Body,
    Waist,
    Hands,
    Feet,
    Finger1,
    Finger2,
    Hand1,
    Hand2,
}

impl EquipmentSlot {
    pub fn all() -> [EquipmentSlot; 10] {
        [
            EquipmentSlot::Head,
            EquipmentSlot::Neck,
            EquipmentSlot::Body,
            EquipmentSlot::Waist,
            EquipmentSlot::Hands,
            EquipmentSlot::Feet,
            EquipmentSlot::Finger1,
            EquipmentSlot::Finger2,
            EquipmentSlot::Hand1,
            EquipmentSlot::Hand2,
        ]
    }

    pub fn is_hand(&self) -> bool {
        matches!(self, EquipmentSlot::Hand1 | EquipmentSlot::Hand2)
    }
}

/// What kind of thing an equipment item is, which decides where it goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentCategory {
    Helmet,
    Amulet,
    BodyArmour,
    Belt,
    Gloves,
    Boots,
    Ring,
    Weapon,
    Shield,
}

impl EquipmentCategory {
    /// Slots an item of this category may be equipped in.
    pub fn slots(&self) -> &'static [EquipmentSlot] {
        match self {
            EquipmentCategory::Helmet => &[EquipmentSlot::Head],
            EquipmentCategory::Amulet => &[EquipmentSlot::Neck],
            EquipmentCategory::BodyArmour => &[EquipmentSlot::Body],
            EquipmentCategory::Belt => &[EquipmentSlot::Waist],
            EquipmentCategory::Gloves => &[EquipmentSlot::Hands],
            EquipmentCategory::Boots => &[EquipmentSlot::Feet],
            EquipmentCategory::Ring => &[EquipmentSlot::Finger1, EquipmentSlot::Finger2],
            EquipmentCategory::Weapon => &[EquipmentSlot::Hand1, EquipmentSlot::Hand2],
            EquipmentCategory::Shield => &[EquipmentSlot::Hand2],
        }
    }

    pub fn fits(&self, slot: EquipmentSlot) -> bool {
        self.slots().contains(&slot)
    }
}

// ============================================================================
// Experience and rewards
// ============================================================================

/// Total experience required to reach each level (index 0 = level 1).
pub const EXPERIENCE_TABLE: [u32; MAX_LEVEL as usize] = [
    0, 300, 900, 2_700, 6_500, 14_000, 23_000, 34_000, 48_000, 64_000, 85_000, 100_000,
    120_000, 140_000, 165_000, 195_000, 225_000, 265_000, 305_000, 355_000, 405_000, 460_000,
    520_000, 585_000, 655_000, 730_000, 810_000, 895_000, 985_000, 1_080_000,
];

/// Experience needed to reach `level`, or `None` past the cap.
pub fn experience_for_level(level: u8) -> Option<u32> {
    if level == 0 {
        return Some(0);
    }
    EXPERIENCE_TABLE.get(level as usize - 1).copied()
}

/// Gold yielded by defeating an enemy.
pub fn gold_reward(level: u8, challenge: u32) -> u32 {
    100 * (level as u32 + challenge)
}

/// Experience yielded by defeating an enemy.
pub fn experience_reward(level: u8, challenge: u32) -> u32 {
    50 * (level as u32 + challenge)
}
