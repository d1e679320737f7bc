//! Resolved skill uses.

use super::effects::{AuxiliaryEffect, StatusEffect};
use crate::catalog::{SkillId, SkillRecord, Target};
use crate::tables::{DamageType, HitType};
use serde::{Deserialize, Serialize};

/// One resolved hit.
///
/// `value` can be negative when resistance exceeds 100%; it is floored at 0
/// when applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Damage {
    pub target: Target,
    pub damage_type: DamageType,
    pub hit_type: HitType,
    pub value: i32,
    pub source: SkillId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heal {
    pub target: Target,
    pub value: i32,
    pub source: SkillId,
}

/// The outcome of one skill use, before it is applied to anyone.
///
/// Targets are relative to the caster. The caster applies the `Caster`
/// entries to itself and the opponent applies the `Enemy` entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub skill_id: SkillId,
    pub skill_name: String,
    pub self_name: String,
    pub enemy_name: String,
    /// The caster's auxiliary effects when the action was created.
    pub auxiliary_effects: Vec<AuxiliaryEffect>,
    /// The caster was stunned and lost the turn.
    pub stunned: bool,
    /// One entry per weapon swung, each holding one hit per weapon-damage effect.
    pub weapon_damage: Vec<Vec<Damage>>,
    pub damage: Vec<Damage>,
    pub heal: Vec<Heal>,
    pub status: Vec<StatusEffect>,
    pub auxiliary: Vec<AuxiliaryEffect>,
}

impl Action {
    pub(crate) fn new(
        skill: &SkillRecord,
        self_name: &str,
        enemy_name: &str,
        auxiliary_effects: Vec<AuxiliaryEffect>,
    ) -> Self {
        Self {
            skill_id: skill.id.clone(),
            skill_name: skill.name.clone(),
            self_name: self_name.to_string(),
            enemy_name: enemy_name.to_string(),
            auxiliary_effects,
            stunned: false,
            weapon_damage: Vec::new(),
            damage: Vec::new(),
            heal: Vec::new(),
            status: Vec::new(),
            auxiliary: Vec::new(),
        }
    }

    /// Whether the action carries no outcomes at all.
    pub fn is_empty(&self) -> bool {
        self.weapon_damage.iter().all(Vec::is_empty)
            && self.damage.is_empty()
            && self.heal.is_empty()
            && self.status.is_empty()
            && self.auxiliary.is_empty()
    }

    /// Sum of all damage aimed at `target`, as it will be applied.
    pub fn total_damage(&self, target: Target) -> i32 {
        self.weapon_damage
            .iter()
            .flatten()
            .chain(self.damage.iter())
            .filter(|d| d.target == target)
            .map(|d| d.value.max(0))
            .sum()
    }
}
