//! Hero progression: resting, the shop, equipment and levelling.

use super::{Character, HeroData, LifeStatus};
use crate::catalog::{Catalog, CatalogError, ClassId, EquipmentId, EquipmentRecord, SkillId};
use crate::dice::Dice;
use crate::tables::{experience_for_level, EquipmentSlot, MAX_LEVEL};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of items the shop offers after each rest.
pub const SHOP_SIZE: usize = 6;

/// Most skills offered to choose from on level-up.
pub const SKILL_CHOICES: usize = 3;

/// Errors from hero operations.
#[derive(Debug, Error)]
pub enum HeroError {
    #[error("character is not a hero")]
    NotAHero,

    #[error("hero is no longer active")]
    NotActive,

    #[error("item is not for sale: {0}")]
    NotInStock(EquipmentId),

    #[error("insufficient gold: need {price}, have {gold}")]
    InsufficientGold { price: u32, gold: u32 },

    #[error("{item} cannot be used by class {class}")]
    NotUsableByClass { item: EquipmentId, class: ClassId },

    #[error("{item} does not fit slot {slot:?}")]
    InvalidSlot { item: EquipmentId, slot: EquipmentSlot },

    #[error("nothing equipped in slot {0:?}")]
    EmptySlot(EquipmentSlot),

    #[error("no level-up pending")]
    NoLevelUpPending,

    #[error("skill is not one of the offered choices: {0}")]
    InvalidSkillChoice(SkillId),

    #[error("a skill must be chosen")]
    SkillChoiceRequired,

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// A level-up waiting for the player to pick a skill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingLevelUp {
    pub new_level: u8,
    pub skill_choices: Vec<SkillId>,
}

/// Gold and experience paid out for a won battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reward {
    pub gold: u32,
    pub experience: u32,
}

impl Character {
    fn active_hero(&self) -> Result<&HeroData, HeroError> {
        let hero = self.hero().ok_or(HeroError::NotAHero)?;
        if !self.is_alive() {
            return Err(HeroError::NotActive);
        }
        Ok(hero)
    }

    fn active_hero_mut(&mut self) -> Result<&mut HeroData, HeroError> {
        if !self.is_alive() {
            return Err(if self.is_hero() {
                HeroError::NotActive
            } else {
                HeroError::NotAHero
            });
        }
        self.hero_mut().ok_or(HeroError::NotAHero)
    }

    /// Rest until the next day.
    ///
    /// Restores hit points and skill uses, clears timed effects and restocks
    /// the shop.
    pub fn rest(&mut self, catalog: &Catalog, dice: &mut dyn Dice) -> Result<(), HeroError> {
        let class = self.active_hero()?.class.clone();

        let mut skills = Vec::with_capacity(self.skills.len());
        for known in &self.skills {
            skills.push(catalog.get_skill(&known.skill_id)?.max_uses);
        }
        for (known, max_uses) in self.skills.iter_mut().zip(skills) {
            known.remaining_uses = max_uses;
        }

        self.status_effects.clear();
        self.auxiliary_effects.clear();
        self.base_hit_points = self.max_hit_points() - self.constitution_bonus();

        let level = u32::from(self.level);
        let stock = catalog.weighted_items(&class, SHOP_SIZE, level, dice);
        let hero = self.active_hero_mut()?;
        hero.day += 1;
        hero.shop_items = stock;

        tracing::info!(name = %self.name, day = self.hero().map_or(0, |h| h.day), "rested");
        Ok(())
    }

    /// Put `item` in `slot`, returning whatever was there.
    pub fn equip(
        &mut self,
        item: EquipmentRecord,
        slot: EquipmentSlot,
    ) -> Result<Option<EquipmentRecord>, HeroError> {
        let hero = self.active_hero()?;
        if !item.fits(slot) {
            return Err(HeroError::InvalidSlot {
                item: item.id,
                slot,
            });
        }
        if !item.usable_by(&hero.class) {
            return Err(HeroError::NotUsableByClass {
                item: item.id,
                class: hero.class.clone(),
            });
        }
        let displaced = self.equipment.insert(slot, item);
        self.clamp_hit_points();
        Ok(displaced)
    }

    pub fn unequip(&mut self, slot: EquipmentSlot) -> Result<EquipmentRecord, HeroError> {
        self.active_hero()?;
        let item = self
            .equipment
            .remove(&slot)
            .ok_or(HeroError::EmptySlot(slot))?;
        self.clamp_hit_points();
        Ok(item)
    }

    /// Buy a shop item straight into `slot`.
    ///
    /// Anything already in the slot is sold back for half its price. Returns
    /// the displaced item.
    pub fn buy(
        &mut self,
        item_id: &EquipmentId,
        slot: EquipmentSlot,
        catalog: &Catalog,
    ) -> Result<Option<EquipmentRecord>, HeroError> {
        let hero = self.active_hero()?;
        let stock_index = hero
            .shop_items
            .iter()
            .position(|id| id == item_id)
            .ok_or_else(|| HeroError::NotInStock(item_id.clone()))?;
        let record = catalog.get_equipment(item_id)?;
        if hero.gold < record.price {
            return Err(HeroError::InsufficientGold {
                price: record.price,
                gold: hero.gold,
            });
        }

        let displaced = self.equip(record.clone(), slot)?;
        let refund = displaced.as_ref().map_or(0, |d| d.price / 2);

        let hero = self.active_hero_mut()?;
        hero.gold = hero.gold - record.price + refund;
        hero.shop_items.remove(stock_index);

        tracing::info!(item = %record.id, price = record.price, refund, "item bought");
        Ok(displaced)
    }

    /// Sell the item in `slot` for half its price. Returns the gold received.
    pub fn sell(&mut self, slot: EquipmentSlot) -> Result<u32, HeroError> {
        let item = self.unequip(slot)?;
        let value = item.price / 2;
        self.active_hero_mut()?.gold += value;
        tracing::info!(item = %item.id, value, "item sold");
        Ok(value)
    }

    /// Add experience, queueing a level-up once the next threshold is reached.
    ///
    /// Returns whether a level-up is now pending.
    pub fn gain_experience(
        &mut self,
        amount: u32,
        catalog: &Catalog,
        dice: &mut dyn Dice,
    ) -> Result<bool, HeroError> {
        let level = self.level;
        let hero = self.active_hero_mut()?;
        hero.experience = hero.experience.saturating_add(amount);

        if hero.pending_level_up.is_some() || level >= MAX_LEVEL {
            return Ok(hero.pending_level_up.is_some());
        }
        let threshold = experience_for_level(level + 1).unwrap_or(u32::MAX);
        if hero.experience < threshold {
            return Ok(false);
        }

        let class = hero.class.clone();
        let mut unknown: Vec<SkillId> = catalog
            .class_skills(&class)
            .into_iter()
            .map(|s| s.id.clone())
            .filter(|id| !self.knows_skill(id))
            .collect();
        let mut skill_choices = Vec::new();
        while skill_choices.len() < SKILL_CHOICES {
            let Some(index) = dice.choose_index(unknown.len()) else {
                break;
            };
            skill_choices.push(unknown.swap_remove(index));
        }

        tracing::info!(name = %self.name, new_level = level + 1, "level-up pending");
        self.active_hero_mut()?.pending_level_up = Some(PendingLevelUp {
            new_level: level + 1,
            skill_choices,
        });
        Ok(true)
    }

    /// Take the pending level-up, learning `choice` if skills were offered.
    pub fn level_up(
        &mut self,
        choice: Option<&SkillId>,
        catalog: &Catalog,
    ) -> Result<(), HeroError> {
        let hero = self.active_hero()?;
        let pending = hero
            .pending_level_up
            .clone()
            .ok_or(HeroError::NoLevelUpPending)?;
        let class = catalog.get_class(&hero.class)?;

        let skill = match choice {
            Some(id) if pending.skill_choices.contains(id) => Some(catalog.get_skill(id)?),
            Some(id) => return Err(HeroError::InvalidSkillChoice(id.clone())),
            None if pending.skill_choices.is_empty() => None,
            None => return Err(HeroError::SkillChoiceRequired),
        };

        self.level = pending.new_level;
        self.base_max_hit_points += class.hit_points_per_level;
        self.base_hit_points += class.hit_points_per_level;
        if let Some(skill) = skill {
            self.learn_skill(skill);
        }
        self.active_hero_mut()?.pending_level_up = None;

        tracing::info!(name = %self.name, level = self.level, "levelled up");
        Ok(())
    }

    /// Collect a battle reward.
    pub fn apply_reward(
        &mut self,
        reward: Reward,
        catalog: &Catalog,
        dice: &mut dyn Dice,
    ) -> Result<(), HeroError> {
        let hero = self.active_hero_mut()?;
        hero.gold = hero.gold.saturating_add(reward.gold);
        hero.kills += 1;
        self.gain_experience(reward.experience, catalog, dice)?;
        Ok(())
    }

    pub fn retire(&mut self) -> Result<(), HeroError> {
        self.active_hero()?;
        self.status = LifeStatus::Retired;
        tracing::info!(name = %self.name, "hero retired");
        Ok(())
    }

    /// Record the hero's death at the hands of `by`.
    pub fn mark_slain(&mut self, by: &str) -> Result<(), HeroError> {
        let hero = self.hero_mut().ok_or(HeroError::NotAHero)?;
        hero.slain_by = Some(by.to_string());
        self.status = LifeStatus::Dead;
        tracing::info!(name = %self.name, by, "hero slain");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedDice;

    fn hero(class: &str) -> (Character, Catalog) {
        let catalog = Catalog::standard();
        let hero = Character::new_hero("Aria", &class.into(), &catalog).unwrap();
        (hero, catalog)
    }

    #[test]
    fn test_equip_validates_slot_and_class() {
        let (mut hero, catalog) = hero("mage");
        let axe = catalog.get_equipment(&"battle_axe".into()).unwrap().clone();
        let helm = catalog.get_equipment(&"iron_helm".into()).unwrap().clone();

        assert!(matches!(
            hero.equip(axe, EquipmentSlot::Hand1),
            Err(HeroError::NotUsableByClass { .. })
        ));
        assert!(matches!(
            hero.equip(helm.clone(), EquipmentSlot::Feet),
            Err(HeroError::InvalidSlot { .. })
        ));
        assert_eq!(hero.equip(helm, EquipmentSlot::Head).unwrap(), None);
        assert_eq!(hero.armour_class(), 11);
    }

    #[test]
    fn test_unequip_empty_slot() {
        let (mut hero, _) = hero("warrior");
        assert!(matches!(
            hero.unequip(EquipmentSlot::Neck),
            Err(HeroError::EmptySlot(EquipmentSlot::Neck))
        ));
    }

    #[test]
    fn test_damage_counts_after_belt_removed() {
        let (mut hero, catalog) = hero("warrior");
        let belt = catalog.get_equipment(&"belt_of_giants".into()).unwrap().clone();
        hero.equip(belt, EquipmentSlot::Waist).unwrap();
        hero.heal(100);
        assert_eq!(hero.hit_points(), 21);

        hero.unequip(EquipmentSlot::Waist).unwrap();
        assert_eq!(hero.hit_points(), 16);
        hero.take_damage(4);
        assert_eq!(hero.hit_points(), 12);
    }

    #[test]
    fn test_sold_belt_leaves_no_spare_hit_points() {
        let (mut hero, catalog) = hero("warrior");
        let belt = catalog.get_equipment(&"belt_of_giants".into()).unwrap().clone();
        hero.equip(belt, EquipmentSlot::Waist).unwrap();
        hero.heal(100);

        assert_eq!(hero.sell(EquipmentSlot::Waist).unwrap(), 100);
        hero.take_damage(4);
        assert_eq!(hero.hit_points(), 12);
    }

    #[test]
    fn test_buy_replaces_and_refunds() {
        let (mut hero, catalog) = hero("warrior");
        let data = hero.hero_mut().unwrap();
        data.gold = 100;
        data.shop_items = vec!["chain_shirt".into()];

        let displaced = hero
            .buy(&"chain_shirt".into(), EquipmentSlot::Body, &catalog)
            .unwrap();

        // Chain shirt costs 80, leather armour sells back for 10.
        assert_eq!(displaced.unwrap().id.as_str(), "leather_armour");
        let data = hero.hero().unwrap();
        assert_eq!(data.gold, 30);
        assert!(data.shop_items.is_empty());
        assert_eq!(hero.equipment[&EquipmentSlot::Body].id.as_str(), "chain_shirt");
    }

    #[test]
    fn test_buy_errors_leave_state_untouched() {
        let (mut hero, catalog) = hero("mage");
        let data = hero.hero_mut().unwrap();
        data.gold = 10;
        data.shop_items = vec!["iron_helm".into(), "hand_axe".into()];
        let before = hero.clone();

        assert!(matches!(
            hero.buy(&"plate_armour".into(), EquipmentSlot::Body, &catalog),
            Err(HeroError::NotInStock(_))
        ));
        assert!(matches!(
            hero.buy(&"iron_helm".into(), EquipmentSlot::Head, &catalog),
            Err(HeroError::InsufficientGold { price: 30, gold: 10 })
        ));

        hero.hero_mut().unwrap().gold = 1000;
        let rich = hero.clone();
        assert!(matches!(
            hero.buy(&"hand_axe".into(), EquipmentSlot::Hand1, &catalog),
            Err(HeroError::NotUsableByClass { .. })
        ));
        assert!(matches!(
            hero.buy(&"iron_helm".into(), EquipmentSlot::Hand2, &catalog),
            Err(HeroError::InvalidSlot { .. })
        ));
        assert_eq!(hero, rich);
        assert_eq!(before.equipment, hero.equipment);
    }

    #[test]
    fn test_sell() {
        let (mut hero, _) = hero("warrior");
        let gold = hero.hero().unwrap().gold;
        assert_eq!(hero.sell(EquipmentSlot::Hand1).unwrap(), 10);
        assert_eq!(hero.hero().unwrap().gold, gold + 10);
        assert!(!hero.equipment.contains_key(&EquipmentSlot::Hand1));
    }

    #[test]
    fn test_rest_restores_everything() {
        let (mut hero, catalog) = hero("warrior");
        let mut dice = ScriptedDice::new([]);
        hero.skills[1].remaining_uses = 0;
        hero.take_damage(10);

        hero.rest(&catalog, &mut dice).unwrap();

        assert_eq!(hero.hit_points(), hero.max_hit_points());
        assert_eq!(hero.skills[1].remaining_uses, 3);
        let data = hero.hero().unwrap();
        assert_eq!(data.day, 2);
        assert_eq!(data.shop_items.len(), SHOP_SIZE);
    }

    #[test]
    fn test_level_up_flow() {
        let (mut hero, catalog) = hero("warrior");
        let mut dice = ScriptedDice::new([]);

        assert!(!hero.gain_experience(299, &catalog, &mut dice).unwrap());
        assert!(hero.gain_experience(1, &catalog, &mut dice).unwrap());

        let pending = hero.hero().unwrap().pending_level_up.clone().unwrap();
        assert_eq!(pending.new_level, 2);
        assert_eq!(pending.skill_choices.len(), SKILL_CHOICES);
        for choice in &pending.skill_choices {
            assert!(!hero.knows_skill(choice));
        }

        assert!(matches!(
            hero.level_up(Some(&"firebolt".into()), &catalog),
            Err(HeroError::InvalidSkillChoice(_))
        ));

        let max_before = hero.max_hit_points();
        let choice = pending.skill_choices[0].clone();
        hero.level_up(Some(&choice), &catalog).unwrap();

        assert_eq!(hero.level, 2);
        assert!(hero.knows_skill(&choice));
        // +8 base per level, +2 constitution for the extra level.
        assert_eq!(hero.max_hit_points(), max_before + 10);
        assert!(hero.hero().unwrap().pending_level_up.is_none());
        assert!(matches!(
            hero.level_up(None, &catalog),
            Err(HeroError::NoLevelUpPending)
        ));
    }

    #[test]
    fn test_inactive_heroes_reject_changes() {
        let (mut hero, catalog) = hero("rogue");
        let mut dice = ScriptedDice::new([]);
        hero.retire().unwrap();

        assert!(matches!(hero.rest(&catalog, &mut dice), Err(HeroError::NotActive)));
        assert!(matches!(hero.sell(EquipmentSlot::Hand1), Err(HeroError::NotActive)));
        assert!(matches!(hero.retire(), Err(HeroError::NotActive)));
    }

    #[test]
    fn test_mark_slain() {
        let (mut hero, _) = hero("cleric");
        hero.mark_slain("Goblin Chief").unwrap();
        assert_eq!(hero.status, LifeStatus::Dead);
        assert_eq!(hero.hero().unwrap().slain_by.as_deref(), Some("Goblin Chief"));
    }
}
