//! Applying an [`Action`] to one of its participants.

use super::action::Action;
use super::effects::{AuxiliaryEffect, StatusEffect};
use super::{Character, LifeStatus};
use crate::catalog::Target;

impl Character {
    /// Apply every outcome of `action` aimed at `selector`.
    ///
    /// The caster passes [`Target::Caster`], its opponent [`Target::Enemy`].
    /// Order: weapon damage, direct damage, heals, status effects, then
    /// auxiliary effects. Saved outcomes are skipped.
    pub fn handle_action(&mut self, action: &Action, selector: Target) {
        for hit in action
            .weapon_damage
            .iter()
            .flatten()
            .chain(action.damage.iter())
            .filter(|d| d.target == selector)
        {
            let taken = self.take_damage(hit.value);
            tracing::debug!(
                name = %self.name,
                damage = taken,
                damage_type = %hit.damage_type,
                hit_type = ?hit.hit_type,
                "damage taken"
            );
        }

        for heal in action.heal.iter().filter(|h| h.target == selector) {
            self.heal(heal.value);
        }

        for status in action
            .status
            .iter()
            .filter(|s| s.target == selector && !s.saved)
        {
            self.apply_status(status);
        }

        for auxiliary in action
            .auxiliary
            .iter()
            .filter(|a| a.target == selector && !a.saved)
        {
            self.apply_auxiliary(auxiliary);
        }
    }

    /// Lose up to `value` hit points (negative values do nothing).
    ///
    /// Returns the amount actually subtracted.
    pub fn take_damage(&mut self, value: i32) -> i32 {
        let value = value.max(0);
        self.clamp_hit_points();
        self.base_hit_points -= value;
        self.check_alive();
        value
    }

    /// Regain hit points, never beyond the maximum.
    pub fn heal(&mut self, value: i32) {
        if !self.is_alive() {
            return;
        }
        self.base_hit_points += value.max(0);
        self.clamp_hit_points();
        tracing::debug!(
            name = %self.name,
            healed = value,
            hit_points = self.hit_points(),
            "healed"
        );
    }

    /// Reapplying a status from the same skill refreshes its duration.
    fn apply_status(&mut self, status: &StatusEffect) {
        if let Some(existing) = self
            .status_effects
            .iter_mut()
            .find(|e| e.source_skill == status.source_skill)
        {
            existing.remaining = status.duration;
            return;
        }
        self.status_effects.push(status.clone());
        self.check_alive();
    }

    /// Reapplying an active auxiliary effect extends it.
    fn apply_auxiliary(&mut self, auxiliary: &AuxiliaryEffect) {
        if let Some(existing) = self
            .auxiliary_effects
            .iter_mut()
            .find(|e| e.effect == auxiliary.effect)
        {
            existing.remaining += auxiliary.duration;
            return;
        }
        self.auxiliary_effects.push(auxiliary.clone());
    }

    fn check_alive(&mut self) {
        if self.status == LifeStatus::Alive && self.hit_points() <= 0 {
            self.status = LifeStatus::Dead;
            tracing::info!(name = %self.name, "character died");
        }
    }
}
