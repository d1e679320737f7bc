//! Turning a skill into an [`Action`].
//!
//! Each skill effect is resolved in declaration order against whoever it
//! targets. Resolution only reads the two combatants; the one mutation is
//! spending a use of the skill.

use super::action::{Action, Damage, Heal};
use super::effects::{AuxiliaryEffect, StatusEffect};
use super::Character;
use crate::catalog::{Catalog, CatalogError, SkillEffect, SkillId, SkillRecord, Target};
use crate::dice::Dice;
use crate::tables::{DamageType, HitType, Stat, BLEED_MULTIPLIER};
use thiserror::Error;

/// Errors from creating an action.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error("skill not available: {0}")]
    SkillNotFound(SkillId),

    #[error("no uses remaining for skill: {0}")]
    NoUsesRemaining(SkillId),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl Character {
    /// Check that `skill_id` can be used right now without changing anything.
    pub fn check_skill<'a>(
        &self,
        skill_id: &SkillId,
        catalog: &'a Catalog,
    ) -> Result<&'a SkillRecord, ActionError> {
        let known = self
            .known_skill(skill_id)
            .ok_or_else(|| ActionError::SkillNotFound(skill_id.clone()))?;
        let record = catalog.get_skill(skill_id)?;
        if !record.is_unlimited() && known.remaining_uses == 0 {
            return Err(ActionError::NoUsesRemaining(skill_id.clone()));
        }
        Ok(record)
    }

    /// Use a skill against `target`.
    ///
    /// A stunned caster loses the turn: the returned action is empty and no
    /// use is spent.
    pub fn create_action(
        &mut self,
        skill_id: &SkillId,
        target: &Character,
        catalog: &Catalog,
        dice: &mut dyn Dice,
    ) -> Result<Action, ActionError> {
        let record = self.check_skill(skill_id, catalog)?;
        let mut action = Action::new(
            record,
            &self.name,
            &target.name,
            self.auxiliary_effects.clone(),
        );

        if self.is_stunned() {
            tracing::debug!(name = %self.name, skill = %skill_id, "stunned, turn lost");
            action.stunned = true;
            return Ok(action);
        }

        if !record.is_unlimited() {
            if let Some(known) = self.skills.iter_mut().find(|s| &s.skill_id == skill_id) {
                known.remaining_uses -= 1;
            }
        }

        let caster: &Character = self;
        let weapons = caster.weapons();
        if record
            .effects
            .iter()
            .any(|e| matches!(e, SkillEffect::WeaponDamage { .. }))
        {
            action.weapon_damage = vec![Vec::new(); weapons.len()];
        }

        for effect in &record.effects {
            let defender = match effect.target() {
                Target::Caster => caster,
                Target::Enemy => target,
            };
            match effect {
                SkillEffect::WeaponDamage { target, multiplier } => {
                    for (hits, weapon) in action.weapon_damage.iter_mut().zip(&weapons) {
                        let roll = dice.range(weapon.min_damage, weapon.max_damage);
                        let modifier = caster.modifier(weapon.weapon_type.stat());
                        let bonus = caster.bonus_multiplier(weapon.damage_type);
                        let hit_type = caster.hit_type(defender.armour_class(), dice);
                        let bleed = if defender.is_bleeding() {
                            BLEED_MULTIPLIER
                        } else {
                            1.0
                        };
                        let resistance = defender.resistance_fraction(weapon.damage_type);

                        let value = (f64::from(roll + modifier)
                            * multiplier
                            * bonus
                            * hit_type.multiplier()
                            * bleed
                            * (1.0 - resistance))
                            .round() as i32;

                        hits.push(Damage {
                            target: *target,
                            damage_type: weapon.damage_type,
                            hit_type,
                            value,
                            source: record.id.clone(),
                        });
                    }
                }
                SkillEffect::Damage {
                    target,
                    damage_type,
                    min,
                    max,
                } => {
                    let roll = dice.range(*min, *max);
                    let modifier = damage_type
                        .governing_stat()
                        .map(|stat| caster.modifier(stat))
                        .unwrap_or(0);
                    let value = (f64::from(roll + modifier)
                        * caster.bonus_multiplier(*damage_type)
                        * (1.0 - defender.resistance_fraction(*damage_type)))
                        .round() as i32;

                    action.damage.push(Damage {
                        target: *target,
                        damage_type: *damage_type,
                        hit_type: HitType::Hit,
                        value,
                        source: record.id.clone(),
                    });
                }
                SkillEffect::Heal { target, min, max } => {
                    let value = dice.range(*min, *max) + caster.modifier(Stat::Wisdom);
                    action.heal.push(Heal {
                        target: *target,
                        value,
                        source: record.id.clone(),
                    });
                }
                SkillEffect::Status {
                    target,
                    properties,
                    duration,
                    saving_modifier,
                    difficulty,
                } => {
                    let saved = saving_throw(defender, *saving_modifier, *difficulty, dice);
                    action.status.push(StatusEffect {
                        source_skill: record.id.clone(),
                        target: *target,
                        properties: properties.clone(),
                        remaining: *duration,
                        duration: *duration,
                        saving_modifier: *saving_modifier,
                        difficulty: *difficulty,
                        saved,
                    });
                }
                SkillEffect::Auxiliary {
                    target,
                    effect,
                    duration,
                    saving_modifier,
                    difficulty,
                } => {
                    let saved = saving_throw(defender, *saving_modifier, *difficulty, dice);
                    action.auxiliary.push(AuxiliaryEffect {
                        source_skill: record.id.clone(),
                        effect: *effect,
                        target: *target,
                        remaining: *duration,
                        duration: *duration,
                        saving_modifier: *saving_modifier,
                        difficulty: *difficulty,
                        saved,
                    });
                }
            }
        }

        tracing::debug!(
            caster = %action.self_name,
            skill = %action.skill_name,
            damage = action.total_damage(Target::Enemy),
            "action created"
        );
        Ok(action)
    }

    fn bonus_multiplier(&self, damage_type: DamageType) -> f64 {
        1.0 + f64::from(self.damage_bonus(damage_type)) / 100.0
    }

    fn resistance_fraction(&self, damage_type: DamageType) -> f64 {
        f64::from(self.resistance(damage_type)) / 100.0
    }
}

/// Roll `d20 + modifier` against the difficulty. Effects without a save always land.
fn saving_throw(
    defender: &Character,
    saving_modifier: Option<Stat>,
    difficulty: Option<i32>,
    dice: &mut dyn Dice,
) -> bool {
    match (saving_modifier, difficulty) {
        (Some(stat), Some(difficulty)) => dice.d20() + defender.modifier(stat) >= difficulty,
        _ => false,
    }
}
