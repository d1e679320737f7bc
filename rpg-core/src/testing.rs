//! Testing utilities.
//!
//! - [`ScriptedDice`] replays a fixed sequence of draws for deterministic tests
//! - [`sample_hero`] / [`sample_enemy`] build small, predictable combatants
//! - [`init_test_logging`] routes `tracing` output to the test harness

use crate::catalog::{BaseStats, EquipmentRecord, ItemKind, Rarity, Resistances, WeaponStats};
use crate::character::{
    Character, CharacterId, EnemyData, HeroData, KnownSkill, LifeStatus, Role,
};
use crate::dice::Dice;
use crate::tables::{DamageType, EquipmentCategory, EquipmentSlot, WeaponType};
use std::collections::{BTreeMap, VecDeque};

/// Dice that return scripted values in order.
///
/// Each value is clamped into the range requested by the caller. Once the
/// script runs out, every draw returns the fallback (clamped the same way),
/// or the bottom of the range if no fallback was set.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDice {
    values: VecDeque<i32>,
    fallback: Option<i32>,
    draws: usize,
}

impl ScriptedDice {
    pub fn new(values: impl IntoIterator<Item = i32>) -> Self {
        Self {
            values: values.into_iter().collect(),
            fallback: None,
            draws: 0,
        }
    }

    pub fn with_fallback(mut self, value: i32) -> Self {
        self.fallback = Some(value);
        self
    }

    /// Queue more values after the ones already scripted.
    pub fn push(&mut self, values: impl IntoIterator<Item = i32>) {
        self.values.extend(values);
    }

    /// How many draws have been made so far.
    pub fn draws(&self) -> usize {
        self.draws
    }

    /// Scripted values not yet consumed.
    pub fn remaining(&self) -> usize {
        self.values.len()
    }
}

impl Dice for ScriptedDice {
    fn range(&mut self, min: i32, max: i32) -> i32 {
        self.draws += 1;
        let max = max.max(min);
        let value = self.values.pop_front().or(self.fallback).unwrap_or(min);
        value.clamp(min, max)
    }
}

/// A level-1 warrior hero with plain stats and only a short sword.
///
/// Strength 12 (+1), dexterity 14 (+2), everything else 10, 14 hit points,
/// no armour. Knows `strike` and `power_attack` (3 uses).
pub fn sample_hero() -> Character {
    let sword = EquipmentRecord {
        id: "short_sword".into(),
        name: "Short Sword".to_string(),
        category: EquipmentCategory::Weapon,
        kind: ItemKind::Weapon(WeaponStats {
            weapon_type: WeaponType::Sword,
            damage_type: DamageType::Slashing,
            min_damage: 1,
            max_damage: 6,
        }),
        rarity: Rarity::Common,
        level: 1,
        price: 20,
        classes: Vec::new(),
        properties: Vec::new(),
    };

    Character {
        id: CharacterId::new(),
        name: "Tester".to_string(),
        status: LifeStatus::Alive,
        level: 1,
        stats: BaseStats::new(12, 14, 10, 10, 10, 10),
        base_hit_points: 14,
        base_max_hit_points: 14,
        resistances: Resistances::new(),
        equipment: BTreeMap::from([(EquipmentSlot::Hand1, sword)]),
        skills: vec![known("strike", 0), known("power_attack", 3)],
        status_effects: Vec::new(),
        auxiliary_effects: Vec::new(),
        role: Role::Hero(HeroData {
            class: "warrior".into(),
            gold: 0,
            experience: 0,
            day: 1,
            kills: 0,
            shop_items: Vec::new(),
            pending_level_up: None,
            slain_by: None,
        }),
    }
}

/// A level-1 enemy with all stats at 10, 20 hit points and armour class 12.
///
/// Hits for 1-4 slashing and only knows `strike`.
pub fn sample_enemy() -> Character {
    Character {
        id: CharacterId::new(),
        name: "Training Dummy".to_string(),
        status: LifeStatus::Alive,
        level: 1,
        stats: BaseStats::default(),
        base_hit_points: 20,
        base_max_hit_points: 20,
        resistances: Resistances::new(),
        equipment: BTreeMap::new(),
        skills: vec![known("strike", 0)],
        status_effects: Vec::new(),
        auxiliary_effects: Vec::new(),
        role: Role::Enemy(EnemyData {
            monster: "training_dummy".into(),
            challenge: 1,
            zone: 1,
            is_boss: false,
            natural_weapon: WeaponStats {
                weapon_type: WeaponType::Unarmed,
                damage_type: DamageType::Slashing,
                min_damage: 1,
                max_damage: 4,
            },
            natural_armour_class: 12,
        }),
    }
}

fn known(skill: &str, remaining_uses: u32) -> KnownSkill {
    KnownSkill {
        skill_id: skill.into(),
        remaining_uses,
    }
}

/// Install a `tracing` subscriber that writes through the test harness.
///
/// Honours `RUST_LOG`; safe to call from every test.
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
