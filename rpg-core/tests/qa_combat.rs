//! QA tests for skill resolution, action application and full battles.
//!
//! Every random draw is scripted, so each test spells out the exact dice.
//! Run with: `cargo test -p rpg-core --test qa_combat`

use rpg_core::battle::{
    choose_enemy_skill, eligible_enemy_skills, Battle, BattleState, PoisonTick,
};
use rpg_core::catalog::{Catalog, Property, Resistances, SkillId, Target};
use rpg_core::character::{
    Action, AuxiliaryEffect, Character, KnownSkill, LifeStatus, Role, StatusEffect,
};
use rpg_core::tables::{AuxiliaryEffectKind, DamageType, HitType, Stat};
use rpg_core::testing::{init_test_logging, sample_enemy, sample_hero, ScriptedDice};

fn empty_action(skill: &str) -> Action {
    Action {
        skill_id: skill.into(),
        skill_name: skill.to_string(),
        self_name: "Caster".to_string(),
        enemy_name: "Target".to_string(),
        auxiliary_effects: Vec::new(),
        stunned: false,
        weapon_damage: Vec::new(),
        damage: Vec::new(),
        heal: Vec::new(),
        status: Vec::new(),
        auxiliary: Vec::new(),
    }
}

fn weapon_hit(hero: &mut Character, enemy: &Character, dice: &[i32]) -> Action {
    let catalog = Catalog::standard();
    let mut dice = ScriptedDice::new(dice.iter().copied());
    hero.create_action(&"strike".into(), enemy, &catalog, &mut dice)
        .expect("strike is always available")
}

// =============================================================================
// Damage resolution
// =============================================================================

#[test]
fn test_weapon_damage_scenario() {
    init_test_logging();
    let mut hero = sample_hero();
    let mut enemy = sample_enemy();
    assert_eq!(hero.modifier(Stat::Dexterity), 2);
    assert_eq!(hero.modifier(Stat::Strength), 1);

    // damage 4, hit roll 15 (+2 vs AC 12), crit roll 1
    let action = weapon_hit(&mut hero, &enemy, &[4, 15, 1]);
    assert_eq!(action.weapon_damage.len(), 1);
    let hit = &action.weapon_damage[0][0];
    assert_eq!(hit.hit_type, HitType::Hit);
    assert_eq!(hit.damage_type, DamageType::Slashing);
    assert_eq!(hit.value, 5);

    let before = enemy.hit_points();
    enemy.handle_action(&action, Target::Enemy);
    assert_eq!(enemy.hit_points(), before - 5);
}

#[test]
fn test_crit_doubles_damage() {
    let mut hero = sample_hero();
    let enemy = sample_enemy();
    let action = weapon_hit(&mut hero, &enemy, &[4, 15, 19]);
    let hit = &action.weapon_damage[0][0];
    assert_eq!(hit.hit_type, HitType::Crit);
    assert_eq!(hit.value, 10);
}

#[test]
fn test_miss_despite_crit_roll() {
    let mut hero = sample_hero();
    let mut enemy = sample_enemy();
    if let Role::Enemy(data) = &mut enemy.role {
        data.natural_armour_class = 30;
    }
    let action = weapon_hit(&mut hero, &enemy, &[6, 1, 20]);
    let hit = &action.weapon_damage[0][0];
    assert_eq!(hit.hit_type, HitType::Miss);
    assert_eq!(hit.value, 0);
}

#[test]
fn test_resistance_above_100_deals_nothing() {
    let mut hero = sample_hero();
    let mut enemy = sample_enemy();
    enemy.resistances = Resistances::new().with(DamageType::Slashing, 100);
    enemy.status_effects.push(StatusEffect {
        source_skill: "harden".into(),
        target: Target::Caster,
        properties: vec![Property::resistance(DamageType::Slashing, 50)],
        remaining: 2,
        duration: 2,
        saving_modifier: None,
        difficulty: None,
        saved: false,
    });
    assert_eq!(enemy.resistance(DamageType::Slashing), 150);

    let action = weapon_hit(&mut hero, &enemy, &[4, 15, 1]);
    assert!(action.weapon_damage[0][0].value <= 0);

    let before = enemy.hit_points();
    enemy.handle_action(&action, Target::Enemy);
    assert_eq!(enemy.hit_points(), before);
    assert!(enemy.is_alive());
}

// =============================================================================
// Application
// =============================================================================

#[test]
fn test_heal_clamps_to_max() {
    let mut hero = sample_hero();
    hero.stats.wisdom = 14;
    hero.take_damage(3);

    let catalog = Catalog::from_json(
        r#"{"skills": [{"id": "mend", "name": "Mend", "effects": [
            {"type": "heal", "target": "self", "min": 5, "max": 5}
        ]}]}"#,
    )
    .unwrap();
    hero.skills.push(KnownSkill::new(catalog.get_skill(&"mend".into()).unwrap()));

    let enemy = sample_enemy();
    let mut dice = ScriptedDice::new([]);
    let action = hero
        .create_action(&"mend".into(), &enemy, &catalog, &mut dice)
        .unwrap();
    assert_eq!(action.heal[0].value, 7);

    hero.handle_action(&action, Target::Caster);
    assert_eq!(hero.hit_points(), hero.max_hit_points());
}

#[test]
fn test_auxiliary_extends_and_status_refreshes() {
    let mut enemy = sample_enemy();
    enemy.auxiliary_effects.push(AuxiliaryEffect {
        source_skill: "shield_bash".into(),
        effect: AuxiliaryEffectKind::Stun,
        target: Target::Enemy,
        remaining: 1,
        duration: 1,
        saving_modifier: None,
        difficulty: None,
        saved: false,
    });
    enemy.status_effects.push(StatusEffect {
        source_skill: "weaken".into(),
        target: Target::Enemy,
        properties: vec![Property::stat(Stat::Strength, -3)],
        remaining: 1,
        duration: 5,
        saving_modifier: None,
        difficulty: None,
        saved: false,
    });

    let mut action = empty_action("combo");
    action.auxiliary.push(AuxiliaryEffect {
        source_skill: "disarm".into(),
        effect: AuxiliaryEffectKind::Stun,
        target: Target::Enemy,
        remaining: 2,
        duration: 2,
        saving_modifier: None,
        difficulty: None,
        saved: false,
    });
    action.status.push(StatusEffect {
        source_skill: "weaken".into(),
        target: Target::Enemy,
        properties: vec![Property::stat(Stat::Strength, -3)],
        remaining: 5,
        duration: 5,
        saving_modifier: None,
        difficulty: None,
        saved: false,
    });
    enemy.handle_action(&action, Target::Enemy);

    assert_eq!(enemy.auxiliary_effects.len(), 1);
    assert_eq!(enemy.auxiliary_effects[0].remaining, 3);
    assert_eq!(enemy.status_effects.len(), 1);
    assert_eq!(enemy.status_effects[0].remaining, 5);
    assert_eq!(enemy.attribute(Stat::Strength), 7);
}

#[test]
fn test_saved_outcomes_are_ignored() {
    let mut enemy = sample_enemy();
    let mut action = empty_action("weaken");
    action.status.push(StatusEffect {
        source_skill: "weaken".into(),
        target: Target::Enemy,
        properties: vec![Property::stat(Stat::Strength, -3)],
        remaining: 3,
        duration: 3,
        saving_modifier: Some(Stat::Wisdom),
        difficulty: Some(12),
        saved: true,
    });
    enemy.handle_action(&action, Target::Enemy);
    assert!(enemy.status_effects.is_empty());
}

#[test]
fn test_effects_removed_at_zero() {
    let mut hero = sample_hero();
    hero.auxiliary_effects.push(AuxiliaryEffect {
        source_skill: "venom_spit".into(),
        effect: AuxiliaryEffectKind::Poison,
        target: Target::Enemy,
        remaining: 2,
        duration: 2,
        saving_modifier: None,
        difficulty: None,
        saved: false,
    });

    hero.tick_effects();
    assert!(hero.is_poisoned());
    assert_eq!(hero.auxiliary_effects[0].remaining, 1);

    hero.tick_effects();
    assert!(!hero.is_poisoned());
    assert!(hero.auxiliary_effects.is_empty());
}

#[test]
fn test_poison_tick() {
    let mut hero = sample_hero();
    assert_eq!(hero.tick_poison(), 0);

    hero.auxiliary_effects.push(AuxiliaryEffect {
        source_skill: "venom_spit".into(),
        effect: AuxiliaryEffectKind::Poison,
        target: Target::Enemy,
        remaining: 2,
        duration: 2,
        saving_modifier: None,
        difficulty: None,
        saved: false,
    });
    // 14 max hit points / 8
    assert_eq!(hero.tick_poison(), 1);
    assert_eq!(hero.hit_points(), 13);
}

#[test]
fn test_derived_stats_are_idempotent() {
    let hero = Character::new_hero("Aria", &"warrior".into(), &Catalog::standard()).unwrap();
    let first = (
        hero.attribute(Stat::Strength),
        hero.resistance(DamageType::Bludgeoning),
        hero.armour_class(),
        hero.max_hit_points(),
        hero.hit_points(),
    );
    let second = (
        hero.attribute(Stat::Strength),
        hero.resistance(DamageType::Bludgeoning),
        hero.armour_class(),
        hero.max_hit_points(),
        hero.hit_points(),
    );
    assert_eq!(first, second);
}

// =============================================================================
// Enemy skill choice
// =============================================================================

#[test]
fn test_enemy_skips_heal_at_full_health() {
    let catalog = Catalog::standard();
    let hero = sample_hero();
    let mut enemy = sample_enemy();
    enemy
        .skills
        .push(KnownSkill::new(catalog.get_skill(&"regenerate".into()).unwrap()));

    let eligible = eligible_enemy_skills(&enemy, &hero, &catalog);
    assert_eq!(eligible, vec![SkillId::from("strike")]);

    enemy.take_damage(5);
    let eligible = eligible_enemy_skills(&enemy, &hero, &catalog);
    assert!(eligible.contains(&SkillId::from("regenerate")));
}

fn active_status(skill: &str, target: Target) -> StatusEffect {
    StatusEffect {
        source_skill: skill.into(),
        target,
        properties: Vec::new(),
        remaining: 2,
        duration: 2,
        saving_modifier: None,
        difficulty: None,
        saved: false,
    }
}

fn learn(enemy: &mut Character, catalog: &Catalog, skill: &str) {
    enemy
        .skills
        .push(KnownSkill::new(catalog.get_skill(&skill.into()).unwrap()));
}

#[test]
fn test_enemy_skips_buff_already_active() {
    let catalog = Catalog::standard();
    let hero = sample_hero();
    let mut enemy = sample_enemy();
    learn(&mut enemy, &catalog, "harden");

    let eligible = eligible_enemy_skills(&enemy, &hero, &catalog);
    assert_eq!(eligible, vec![SkillId::from("strike"), SkillId::from("harden")]);

    enemy
        .status_effects
        .push(active_status("harden", Target::Caster));
    let eligible = eligible_enemy_skills(&enemy, &hero, &catalog);
    assert_eq!(eligible, vec![SkillId::from("strike")]);
}

#[test]
fn test_enemy_skips_debuff_already_on_hero() {
    let catalog = Catalog::standard();
    let mut hero = sample_hero();
    let mut enemy = sample_enemy();
    learn(&mut enemy, &catalog, "roar");
    assert!(eligible_enemy_skills(&enemy, &hero, &catalog).contains(&SkillId::from("roar")));

    hero.status_effects.push(active_status("roar", Target::Enemy));
    let eligible = eligible_enemy_skills(&enemy, &hero, &catalog);
    assert_eq!(eligible, vec![SkillId::from("strike")]);

    // The same effect on the enemy itself does not count.
    hero.status_effects.clear();
    enemy.status_effects.push(active_status("roar", Target::Enemy));
    assert!(eligible_enemy_skills(&enemy, &hero, &catalog).contains(&SkillId::from("roar")));
}

#[test]
fn test_enemy_falls_back_to_usable_skills() {
    let catalog = Catalog::standard();
    let hero = sample_hero();
    let mut enemy = sample_enemy();
    enemy.skills = vec![
        KnownSkill {
            skill_id: "power_attack".into(),
            remaining_uses: 0,
        },
        KnownSkill::new(catalog.get_skill(&"harden".into()).unwrap()),
        KnownSkill::new(catalog.get_skill(&"regenerate".into()).unwrap()),
    ];
    enemy
        .status_effects
        .push(active_status("harden", Target::Caster));
    assert!(eligible_enemy_skills(&enemy, &hero, &catalog).is_empty());

    // Usable fallback is [harden, regenerate]; power_attack has no uses left.
    let mut dice = ScriptedDice::new([0]);
    let chosen = choose_enemy_skill(&enemy, &hero, &catalog, &mut dice);
    assert_eq!(chosen, Some(SkillId::from("harden")));

    let mut dice = ScriptedDice::new([1]);
    let chosen = choose_enemy_skill(&enemy, &hero, &catalog, &mut dice);
    assert_eq!(chosen, Some(SkillId::from("regenerate")));

    let mut dice = ScriptedDice::new([2]);
    let chosen = choose_enemy_skill(&enemy, &hero, &catalog, &mut dice);
    assert_eq!(chosen, Some(SkillId::from("regenerate")));
}

#[test]
fn test_enemy_falls_back_to_full_list() {
    let catalog = Catalog::standard();
    let hero = sample_hero();
    let mut enemy = sample_enemy();
    enemy.skills = vec![KnownSkill {
        skill_id: "power_attack".into(),
        remaining_uses: 0,
    }];
    assert!(eligible_enemy_skills(&enemy, &hero, &catalog).is_empty());

    let mut dice = ScriptedDice::new([0]);
    let chosen = choose_enemy_skill(&enemy, &hero, &catalog, &mut dice);
    assert_eq!(chosen, Some(SkillId::from("power_attack")));

    enemy.skills.clear();
    let mut dice = ScriptedDice::new([]);
    assert_eq!(choose_enemy_skill(&enemy, &hero, &catalog, &mut dice), None);
}

// =============================================================================
// Battles
// =============================================================================

#[test]
fn test_turn_order_and_both_actions() {
    let catalog = Catalog::standard();
    let mut battle = Battle::new(sample_hero(), sample_enemy());
    // hero: damage 4, hit 15, crit 1; enemy: skill pick, damage 1, hit 1, crit 1
    let mut dice = ScriptedDice::new([4, 15, 1, 0, 1, 1, 1]);

    let outcome = battle
        .resolve_turn(&"strike".into(), &catalog, &mut dice)
        .unwrap();
    assert_eq!(outcome.state, BattleState::Active);
    assert_eq!(outcome.turn.actions.len(), 2);
    assert_eq!(outcome.turn.actions[0].self_name, "Tester");
    assert_eq!(outcome.turn.actions[1].self_name, "Training Dummy");
    assert_eq!(battle.enemy.hit_points(), 15);
    assert_eq!(battle.hero.hit_points(), 13);
    assert_eq!(battle.turns.len(), 1);
}

#[test]
fn test_battle_won_pays_reward() {
    let catalog = Catalog::standard();
    let mut enemy = sample_enemy();
    enemy.base_hit_points = 3;
    let mut battle = Battle::new(sample_hero(), enemy);
    let mut dice = ScriptedDice::new([4, 15, 1]);

    let outcome = battle
        .resolve_turn(&"strike".into(), &catalog, &mut dice)
        .unwrap();
    assert_eq!(outcome.state, BattleState::Won);
    assert_eq!(outcome.turn.actions.len(), 1);

    let reward = outcome.reward.unwrap();
    assert_eq!(reward.gold, 200);
    assert_eq!(reward.experience, 100);

    let hero = battle.hero.hero().unwrap();
    assert_eq!(hero.gold, 200);
    assert_eq!(hero.experience, 100);
    assert_eq!(hero.kills, 1);
    assert!(hero.pending_level_up.is_none());
}

#[test]
fn test_battle_lost_marks_hero_slain() {
    let catalog = Catalog::standard();
    let mut hero = sample_hero();
    hero.base_hit_points = 1;
    let mut enemy = sample_enemy();
    enemy.stats.dexterity = 18;
    let mut battle = Battle::new(hero, enemy);
    // enemy first: skill pick, damage 4, hit 15, crit 1
    let mut dice = ScriptedDice::new([0, 4, 15, 1]);

    let outcome = battle
        .resolve_turn(&"strike".into(), &catalog, &mut dice)
        .unwrap();
    assert_eq!(outcome.state, BattleState::Lost);
    assert!(outcome.reward.is_none());
    assert_eq!(outcome.turn.actions.len(), 1);
    assert_eq!(battle.hero.status, LifeStatus::Dead);
    assert_eq!(
        battle.hero.hero().unwrap().slain_by.as_deref(),
        Some("Training Dummy")
    );
}

#[test]
fn test_seeded_battle_runs_to_completion() {
    init_test_logging();
    let catalog = Catalog::standard();
    let mut dice = rpg_core::RngDice::seeded(11);
    let hero = Character::new_hero("Aria", &"warrior".into(), &catalog).unwrap();
    let mut battle = Battle::start(hero, 1, false, &catalog, &mut dice).unwrap();

    for _ in 0..200 {
        if battle.is_over() {
            break;
        }
        battle
            .resolve_turn(&"strike".into(), &catalog, &mut dice)
            .unwrap();
    }
    assert!(battle.is_over());
    assert!(matches!(battle.state, BattleState::Won | BattleState::Lost));
}

fn poisoned(remaining: u32) -> AuxiliaryEffect {
    AuxiliaryEffect {
        source_skill: "venom_spit".into(),
        effect: AuxiliaryEffectKind::Poison,
        target: Target::Enemy,
        remaining,
        duration: remaining,
        saving_modifier: None,
        difficulty: None,
        saved: false,
    }
}

#[test]
fn test_poison_ticks_once_after_both_actions() {
    let catalog = Catalog::standard();
    let mut enemy = sample_enemy();
    enemy.auxiliary_effects.push(poisoned(2));
    let mut battle = Battle::new(sample_hero(), enemy);
    let mut dice = ScriptedDice::new([4, 15, 1, 0, 1, 1, 1]);

    let outcome = battle
        .resolve_turn(&"strike".into(), &catalog, &mut dice)
        .unwrap();
    assert_eq!(outcome.turn.actions.len(), 2);
    assert_eq!(
        outcome.turn.poison,
        vec![PoisonTick {
            name: "Training Dummy".to_string(),
            value: 2,
        }]
    );
    // 20 - 5 from the strike - 2 from a single poison tick.
    assert_eq!(battle.enemy.hit_points(), 13);
    assert_eq!(battle.enemy.auxiliary_effects[0].remaining, 1);
}

#[test]
fn test_poison_kill_lands_after_second_actor() {
    let catalog = Catalog::standard();
    let mut enemy = sample_enemy();
    enemy.base_hit_points = 2;
    enemy.auxiliary_effects.push(poisoned(3));
    let mut battle = Battle::new(sample_hero(), enemy);
    // hero misses (hit roll 1); enemy: skill pick, damage 1, hit 1, crit 1
    let mut dice = ScriptedDice::new([4, 1, 1, 0, 1, 1, 1]);

    let outcome = battle
        .resolve_turn(&"strike".into(), &catalog, &mut dice)
        .unwrap();
    assert_eq!(outcome.turn.actions.len(), 2);
    assert_eq!(outcome.turn.poison.len(), 1);
    assert_eq!(outcome.state, BattleState::Won);
    assert_eq!(battle.hero.hit_points(), 13);
}
