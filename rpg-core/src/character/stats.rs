//! Derived stats.
//!
//! Everything here is a pure function of the character's current state.

use super::{Character, LifeStatus, Role};
use crate::catalog::{Property, PropertyKind, WeaponStats};
use crate::dice::Dice;
use crate::tables::{
    ability_modifier, AuxiliaryStat, DamageType, EquipmentSlot, HitType, Stat, WeaponType,
    CRIT_THRESHOLD,
};

/// Bare-handed damage for characters without a usable weapon.
const UNARMED: WeaponStats = WeaponStats {
    weapon_type: WeaponType::Unarmed,
    damage_type: DamageType::Bludgeoning,
    min_damage: 1,
    max_damage: 3,
};

impl Character {
    /// Every property currently modifying this character: equipment first,
    /// then active status effects.
    fn properties(&self) -> impl Iterator<Item = &Property> {
        self.equipment
            .values()
            .flat_map(|item| item.properties.iter())
            .chain(self.status_effects.iter().flat_map(|e| e.properties.iter()))
    }

    fn property_sum(&self, kind: PropertyKind) -> i32 {
        self.properties()
            .filter(|p| p.kind == kind)
            .map(|p| p.value)
            .sum()
    }

    /// Effective score: base plus equipment plus active effects.
    pub fn attribute(&self, stat: Stat) -> i32 {
        self.stats.get(stat) + self.property_sum(PropertyKind::Stat(stat))
    }

    pub fn modifier(&self, stat: Stat) -> i32 {
        ability_modifier(self.attribute(stat))
    }

    /// Effective resistance in percent. Not re-clamped, so it may leave -100..=100.
    pub fn resistance(&self, damage_type: DamageType) -> i32 {
        self.resistances.get(damage_type) + self.property_sum(PropertyKind::Resistance(damage_type))
    }

    /// Percentage bonus to damage of a type.
    pub fn damage_bonus(&self, damage_type: DamageType) -> i32 {
        self.property_sum(PropertyKind::Damage(damage_type))
    }

    pub fn auxiliary(&self, stat: AuxiliaryStat) -> i32 {
        self.property_sum(PropertyKind::Auxiliary(stat))
    }

    pub fn hit_bonus(&self) -> i32 {
        self.auxiliary(AuxiliaryStat::HitBonus)
    }

    pub fn crit_bonus(&self) -> i32 {
        self.auxiliary(AuxiliaryStat::CritBonus)
    }

    pub(super) fn constitution_bonus(&self) -> i32 {
        self.modifier(Stat::Constitution) * i32::from(self.level)
    }

    pub fn max_hit_points(&self) -> i32 {
        self.base_max_hit_points
            + self.constitution_bonus()
            + self.auxiliary(AuxiliaryStat::MaxHitPoints)
    }

    /// Current hit points, never above [`max_hit_points`](Self::max_hit_points).
    pub fn hit_points(&self) -> i32 {
        (self.base_hit_points + self.constitution_bonus()).min(self.max_hit_points())
    }

    /// Pull stored hit points down to the current cap.
    ///
    /// Must run whenever a max hit point bonus can disappear, otherwise the
    /// surplus would soak up later damage.
    pub(super) fn clamp_hit_points(&mut self) {
        let cap = self.max_hit_points() - self.constitution_bonus();
        self.base_hit_points = self.base_hit_points.min(cap);
    }

    /// Equipment armour plus armour-class bonuses; enemies add natural armour.
    ///
    /// A character with no armour at all has armour class 0.
    pub fn armour_class(&self) -> i32 {
        let equipped: i32 = self.equipment.values().map(|e| e.armour_class()).sum();
        let natural = match &self.role {
            Role::Enemy(enemy) => enemy.natural_armour_class,
            Role::Hero(_) => 0,
        };
        equipped + natural + self.auxiliary(AuxiliaryStat::ArmourClass)
    }

    pub fn is_alive(&self) -> bool {
        self.status == LifeStatus::Alive
    }

    /// Weapons used for weapon-damage effects, main hand first.
    ///
    /// Disarmed or empty-handed characters fight with their natural weapon:
    /// bare fists for heroes, the template's attack for enemies.
    pub fn weapons(&self) -> Vec<WeaponStats> {
        let held: Vec<WeaponStats> = if self.is_disarmed() {
            Vec::new()
        } else {
            [EquipmentSlot::Hand1, EquipmentSlot::Hand2]
                .iter()
                .filter_map(|slot| self.equipment.get(slot))
                .filter_map(|item| item.weapon().copied())
                .collect()
        };

        if held.is_empty() {
            vec![self.natural_weapon()]
        } else {
            held
        }
    }

    fn natural_weapon(&self) -> WeaponStats {
        match &self.role {
            Role::Enemy(enemy) => enemy.natural_weapon,
            Role::Hero(_) => UNARMED,
        }
    }

    /// Roll to hit against `armour_class`.
    ///
    /// The hit and crit rolls are independent. A crit only upgrades a hit; it
    /// never turns a miss into a hit.
    pub fn hit_type(&self, armour_class: i32, dice: &mut dyn Dice) -> HitType {
        let dexterity = self.modifier(Stat::Dexterity);
        let hit_roll = dice.d20() + dexterity + self.hit_bonus();
        let crit_roll = dice.d20() + dexterity + self.crit_bonus();

        if hit_roll >= armour_class && crit_roll >= CRIT_THRESHOLD {
            HitType::Crit
        } else if hit_roll >= armour_class {
            HitType::Hit
        } else {
            HitType::Miss
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, Target};
    use crate::character::StatusEffect;
    use crate::testing::ScriptedDice;

    fn warrior() -> Character {
        Character::new_hero("Aria", &"warrior".into(), &Catalog::standard()).unwrap()
    }

    #[test]
    fn test_attribute_sums_equipment_and_effects() {
        let catalog = Catalog::standard();
        let mut hero = warrior();
        let ring = catalog.get_equipment(&"ring_of_strength".into()).unwrap();
        hero.equipment.insert(EquipmentSlot::Finger1, ring.clone());
        hero.status_effects.push(StatusEffect {
            source_skill: "battle_cry".into(),
            target: Target::Caster,
            properties: vec![
                Property::stat(Stat::Strength, 2),
                Property::stat(Stat::Strength, 1),
            ],
            remaining: 3,
            duration: 3,
            saving_modifier: None,
            difficulty: None,
            saved: false,
        });

        assert_eq!(hero.attribute(Stat::Strength), 16 + 2 + 2 + 1);
        assert_eq!(hero.attribute(Stat::Dexterity), 12);
    }

    #[test]
    fn test_armour_class_and_hit_points() {
        let hero = warrior();
        // Wooden shield 2 + leather armour 11.
        assert_eq!(hero.armour_class(), 13);
        assert_eq!(hero.max_hit_points(), 16);
        assert_eq!(hero.hit_points(), 16);
    }

    #[test]
    fn test_accessors_are_idempotent() {
        let hero = warrior();
        let first = (
            hero.attribute(Stat::Strength),
            hero.resistance(DamageType::Fire),
            hero.hit_points(),
            hero.max_hit_points(),
            hero.armour_class(),
            hero.is_stunned(),
        );
        for _ in 0..3 {
            let again = (
                hero.attribute(Stat::Strength),
                hero.resistance(DamageType::Fire),
                hero.hit_points(),
                hero.max_hit_points(),
                hero.armour_class(),
                hero.is_stunned(),
            );
            assert_eq!(first, again);
        }
    }

    #[test]
    fn test_miss_despite_crit_roll() {
        let hero = warrior();
        // Dexterity 12 gives +1: hit roll 5 + 1 = 6, crit roll 20 + 1 = 21.
        let mut dice = ScriptedDice::new([5, 20]);
        assert_eq!(hero.hit_type(15, &mut dice), HitType::Miss);
    }

    #[test]
    fn test_crit_requires_hit() {
        let hero = warrior();
        let mut dice = ScriptedDice::new([14, 19]);
        assert_eq!(hero.hit_type(15, &mut dice), HitType::Crit);

        let mut dice = ScriptedDice::new([14, 10]);
        assert_eq!(hero.hit_type(15, &mut dice), HitType::Hit);
    }

    #[test]
    fn test_weapons_fall_back_to_unarmed() {
        let mut hero = warrior();
        assert_eq!(hero.weapons().len(), 1);
        assert_eq!(hero.weapons()[0].weapon_type, WeaponType::Sword);

        hero.equipment.clear();
        assert_eq!(hero.weapons(), vec![UNARMED]);
    }
}
