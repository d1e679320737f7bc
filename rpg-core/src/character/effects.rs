//! Timed effects and their per-turn upkeep.

use super::{Character, LifeStatus};
use crate::catalog::{Property, SkillId, Target};
use crate::tables::{AuxiliaryEffectKind, DamageType, Stat, POISON_DIVISOR};
use serde::{Deserialize, Serialize};

/// A timed bundle of property modifiers from a skill.
///
/// The same shape is used for the outcome carried by an [`Action`] and for the
/// effect once it is active on a character.
///
/// [`Action`]: super::Action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEffect {
    pub source_skill: SkillId,
    pub target: Target,
    pub properties: Vec<Property>,
    pub remaining: u32,
    pub duration: u32,
    pub saving_modifier: Option<Stat>,
    pub difficulty: Option<i32>,
    /// The target resisted; saved outcomes are never applied.
    pub saved: bool,
}

/// A timed poison, stun, bleed or disarm condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuxiliaryEffect {
    pub source_skill: SkillId,
    pub effect: AuxiliaryEffectKind,
    pub target: Target,
    pub remaining: u32,
    pub duration: u32,
    pub saving_modifier: Option<Stat>,
    pub difficulty: Option<i32>,
    pub saved: bool,
}

impl Character {
    pub fn has_auxiliary(&self, kind: AuxiliaryEffectKind) -> bool {
        self.auxiliary_effects.iter().any(|e| e.effect == kind)
    }

    pub fn is_stunned(&self) -> bool {
        self.has_auxiliary(AuxiliaryEffectKind::Stun)
    }

    pub fn is_poisoned(&self) -> bool {
        self.has_auxiliary(AuxiliaryEffectKind::Poison)
    }

    pub fn is_bleeding(&self) -> bool {
        self.has_auxiliary(AuxiliaryEffectKind::Bleed)
    }

    pub fn is_disarmed(&self) -> bool {
        self.has_auxiliary(AuxiliaryEffectKind::Disarm)
    }

    /// Apply this turn's poison damage, if poisoned.
    ///
    /// Deals an eighth of max hit points, reduced by poison resistance.
    /// Returns the damage taken.
    pub fn tick_poison(&mut self) -> i32 {
        if !self.is_poisoned() || !self.is_alive() {
            return 0;
        }
        let raw = self.max_hit_points().div_euclid(POISON_DIVISOR);
        let resistance = f64::from(self.resistance(DamageType::Poison)) / 100.0;
        let value = (f64::from(raw) * (1.0 - resistance)).round() as i32;
        let taken = self.take_damage(value);
        tracing::debug!(name = %self.name, damage = taken, "poison tick");
        taken
    }

    /// Count down every timed effect and drop the ones that ran out.
    ///
    /// Afterwards, a living character whose hit points fell below 1 only
    /// because derived stats shrank is left on 1 hit point.
    pub fn tick_effects(&mut self) {
        for effect in &mut self.status_effects {
            effect.remaining = effect.remaining.saturating_sub(1);
        }
        for effect in &mut self.auxiliary_effects {
            effect.remaining = effect.remaining.saturating_sub(1);
        }

        let before = self.status_effects.len() + self.auxiliary_effects.len();
        self.status_effects.retain(|e| e.remaining > 0);
        self.auxiliary_effects.retain(|e| e.remaining > 0);
        let expired = before - self.status_effects.len() - self.auxiliary_effects.len();
        if expired > 0 {
            tracing::debug!(name = %self.name, expired, "effects expired");
        }

        self.clamp_hit_points();
        self.constitution_check();
    }

    fn constitution_check(&mut self) {
        if self.status == LifeStatus::Alive && self.hit_points() < 1 {
            self.base_hit_points += 1 - self.hit_points();
            tracing::debug!(name = %self.name, "hit points clamped to 1");
        }
    }
}
