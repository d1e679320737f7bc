//! Turn-based battles between a hero and one enemy.
//!
//! A [`Battle`] owns both combatants for its duration. Each call to
//! [`Battle::resolve_turn`] runs one full turn: the faster combatant acts,
//! the slower one answers if both are still standing, timed effects tick,
//! and the outcome is evaluated.

use crate::catalog::{Catalog, CatalogError, SkillId, Target};
use crate::character::{Action, ActionError, Character, HeroError, Reward};
use crate::dice::Dice;
use crate::tables::{experience_reward, gold_reward, Stat};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Errors from running a battle.
#[derive(Debug, Error)]
pub enum BattleError {
    #[error("battle is already over")]
    BattleOver,

    #[error("only an active hero can start a battle")]
    HeroNotActive,

    #[error(transparent)]
    Action(#[from] ActionError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Hero(#[from] HeroError),
}

/// Battle tuning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleConfig {
    /// Whether the hero acts first when both combatants are equally fast.
    pub hero_first_on_tie: bool,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            hero_first_on_tie: true,
        }
    }
}

impl BattleConfig {
    pub fn with_hero_first_on_tie(mut self, hero_first: bool) -> Self {
        self.hero_first_on_tie = hero_first;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BattleState {
    Active,
    Won,
    Lost,
}

/// Poison damage dealt to one combatant at the end of a turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoisonTick {
    pub name: String,
    pub value: i32,
}

/// One recorded turn: the actions in execution order plus end-of-turn poison.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Turn {
    pub actions: Vec<Action>,
    pub poison: Vec<PoisonTick>,
}

/// What a resolved turn produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnOutcome {
    pub turn: Turn,
    pub state: BattleState,
    pub reward: Option<Reward>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Battle {
    pub id: Uuid,
    pub hero: Character,
    pub enemy: Character,
    pub turns: Vec<Turn>,
    pub state: BattleState,
    pub reward: Option<Reward>,
    #[serde(default)]
    pub config: BattleConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Hero,
    Enemy,
}

impl Battle {
    pub fn new(hero: Character, enemy: Character) -> Self {
        Self {
            id: Uuid::new_v4(),
            hero,
            enemy,
            turns: Vec::new(),
            state: BattleState::Active,
            reward: None,
            config: BattleConfig::default(),
        }
    }

    pub fn with_config(mut self, config: BattleConfig) -> Self {
        self.config = config;
        self
    }

    /// Start an encounter in `zone`, drawing a monster at the hero's level.
    pub fn start(
        hero: Character,
        zone: u32,
        is_boss: bool,
        catalog: &Catalog,
        dice: &mut dyn Dice,
    ) -> Result<Self, BattleError> {
        if !hero.is_hero() || !hero.is_alive() {
            return Err(BattleError::HeroNotActive);
        }
        let monster = catalog.get_monster(zone, is_boss, dice)?;
        let enemy = Character::new_enemy(monster, hero.level, catalog)?;
        tracing::info!(hero = %hero.name, enemy = %enemy.name, zone, is_boss, "battle started");
        Ok(Self::new(hero, enemy))
    }

    pub fn is_over(&self) -> bool {
        self.state != BattleState::Active
    }

    /// Hand the hero back once the battle is done with.
    pub fn into_hero(self) -> Character {
        self.hero
    }

    /// Which side acts first this turn.
    fn first_side(&self) -> Side {
        let hero = self.hero.attribute(Stat::Dexterity);
        let enemy = self.enemy.attribute(Stat::Dexterity);
        if hero > enemy || (hero == enemy && self.config.hero_first_on_tie) {
            Side::Hero
        } else {
            Side::Enemy
        }
    }

    /// Run one turn with the hero using `hero_skill`.
    ///
    /// The hero's skill is validated before anything happens, so an error
    /// leaves the battle untouched.
    pub fn resolve_turn(
        &mut self,
        hero_skill: &SkillId,
        catalog: &Catalog,
        dice: &mut dyn Dice,
    ) -> Result<TurnOutcome, BattleError> {
        if self.is_over() {
            return Err(BattleError::BattleOver);
        }
        self.hero.check_skill(hero_skill, catalog)?;

        let mut turn = Turn::default();
        let order = match self.first_side() {
            Side::Hero => [Side::Hero, Side::Enemy],
            Side::Enemy => [Side::Enemy, Side::Hero],
        };

        for side in order {
            if !self.hero.is_alive() || !self.enemy.is_alive() {
                break;
            }
            let action = match side {
                Side::Hero => Some(self.hero_acts(hero_skill, catalog, dice)?),
                Side::Enemy => self.enemy_acts(catalog, dice),
            };
            turn.actions.extend(action);
        }

        for combatant in [&mut self.hero, &mut self.enemy] {
            let value = combatant.tick_poison();
            if value > 0 {
                turn.poison.push(PoisonTick {
                    name: combatant.name.clone(),
                    value,
                });
            }
            combatant.tick_effects();
        }

        self.evaluate(catalog, dice)?;
        self.turns.push(turn.clone());

        Ok(TurnOutcome {
            turn,
            state: self.state,
            reward: self.reward,
        })
    }

    fn hero_acts(
        &mut self,
        skill: &SkillId,
        catalog: &Catalog,
        dice: &mut dyn Dice,
    ) -> Result<Action, BattleError> {
        let action = self.hero.create_action(skill, &self.enemy, catalog, dice)?;
        self.hero.handle_action(&action, Target::Caster);
        self.enemy.handle_action(&action, Target::Enemy);
        Ok(action)
    }

    /// The enemy never blocks the turn: if it cannot act, it is skipped.
    fn enemy_acts(&mut self, catalog: &Catalog, dice: &mut dyn Dice) -> Option<Action> {
        let skill = choose_enemy_skill(&self.enemy, &self.hero, catalog, dice)?;
        match self.enemy.create_action(&skill, &self.hero, catalog, dice) {
            Ok(action) => {
                self.enemy.handle_action(&action, Target::Caster);
                self.hero.handle_action(&action, Target::Enemy);
                Some(action)
            }
            Err(err) => {
                tracing::warn!(
                    enemy = %self.enemy.name,
                    skill = %skill,
                    error = %err,
                    "enemy skipped its turn"
                );
                None
            }
        }
    }

    fn evaluate(&mut self, catalog: &Catalog, dice: &mut dyn Dice) -> Result<(), BattleError> {
        if !self.hero.is_alive() {
            self.state = BattleState::Lost;
            self.hero.mark_slain(&self.enemy.name)?;
            tracing::info!(hero = %self.hero.name, enemy = %self.enemy.name, "battle lost");
        } else if !self.enemy.is_alive() {
            let challenge = self.enemy.enemy().map_or(0, |e| e.challenge);
            let reward = Reward {
                gold: gold_reward(self.enemy.level, challenge),
                experience: experience_reward(self.enemy.level, challenge),
            };
            self.state = BattleState::Won;
            self.reward = Some(reward);
            if self.hero.is_hero() {
                self.hero.apply_reward(reward, catalog, dice)?;
            }
            tracing::info!(
                hero = %self.hero.name,
                gold = reward.gold,
                experience = reward.experience,
                "battle won"
            );
        }
        Ok(())
    }
}

/// Skills the enemy would consider this turn, before falling back.
///
/// Skips self-heals at full health, buffs already active on the enemy and
/// debuffs already active on the hero.
pub fn eligible_enemy_skills(
    enemy: &Character,
    hero: &Character,
    catalog: &Catalog,
) -> Vec<SkillId> {
    enemy
        .skills
        .iter()
        .filter_map(|known| {
            let record = catalog.get_skill(&known.skill_id).ok()?;
            let usable = record.is_unlimited() || known.remaining_uses > 0;
            let wasted = (record.heals_caster() && enemy.hit_points() >= enemy.max_hit_points())
                || (record.applies_effect_to(Target::Caster) && enemy.has_effect_from(&record.id))
                || (record.applies_effect_to(Target::Enemy) && hero.has_effect_from(&record.id));
            (usable && !wasted).then(|| record.id.clone())
        })
        .collect()
}

/// Pick the enemy's skill for this turn.
///
/// Chooses uniformly among the eligible skills. When none are eligible it
/// falls back to any usable skill, then to the whole list.
pub fn choose_enemy_skill(
    enemy: &Character,
    hero: &Character,
    catalog: &Catalog,
    dice: &mut dyn Dice,
) -> Option<SkillId> {
    let mut candidates = eligible_enemy_skills(enemy, hero, catalog);
    if candidates.is_empty() {
        candidates = enemy
            .skills
            .iter()
            .filter(|known| {
                catalog
                    .get_skill(&known.skill_id)
                    .map(|r| r.is_unlimited() || known.remaining_uses > 0)
                    .unwrap_or(false)
            })
            .map(|known| known.skill_id.clone())
            .collect();
    }
    if candidates.is_empty() {
        candidates = enemy.skills.iter().map(|k| k.skill_id.clone()).collect();
    }
    let index = dice.choose_index(candidates.len())?;
    Some(candidates.swap_remove(index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{sample_enemy, sample_hero, ScriptedDice};

    #[test]
    fn test_tie_goes_to_hero_by_default() {
        let mut hero = sample_hero();
        hero.stats.dexterity = 10;
        let battle = Battle::new(hero, sample_enemy());
        assert_eq!(battle.first_side(), Side::Hero);

        let battle = battle.with_config(BattleConfig::default().with_hero_first_on_tie(false));
        assert_eq!(battle.first_side(), Side::Enemy);
    }

    #[test]
    fn test_invalid_skill_leaves_battle_untouched() {
        let catalog = Catalog::standard();
        let mut battle = Battle::new(sample_hero(), sample_enemy());
        let before = battle.clone();
        let mut dice = ScriptedDice::new([]);

        let err = battle
            .resolve_turn(&"firebolt".into(), &catalog, &mut dice)
            .unwrap_err();
        assert!(matches!(err, BattleError::Action(ActionError::SkillNotFound(_))));
        assert_eq!(battle, before);
    }

    #[test]
    fn test_finished_battle_rejects_turns() {
        let catalog = Catalog::standard();
        let mut battle = Battle::new(sample_hero(), sample_enemy());
        battle.state = BattleState::Won;
        let mut dice = ScriptedDice::new([]);
        assert!(matches!(
            battle.resolve_turn(&"strike".into(), &catalog, &mut dice),
            Err(BattleError::BattleOver)
        ));
    }

    #[test]
    fn test_start_rejects_enemies() {
        let catalog = Catalog::standard();
        let mut dice = ScriptedDice::new([]);
        assert!(matches!(
            Battle::start(sample_enemy(), 1, false, &catalog, &mut dice),
            Err(BattleError::HeroNotActive)
        ));
    }
}
