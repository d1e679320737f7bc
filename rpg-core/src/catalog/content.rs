//! Built-in game content.
//!
//! The standard classes, skills, equipment and monsters that
//! [`Catalog::standard`](super::Catalog::standard) serves when no external
//! content file is loaded.

use super::records::{
    BaseStats, ClassId, ClassRecord, EquipmentId, EquipmentRecord, ItemKind, MonsterRecord,
    Property, Rarity, Resistances, SkillEffect, SkillRecord, Target, WeaponStats,
};
use super::CatalogData;
use crate::tables::{
    AuxiliaryEffectKind, AuxiliaryStat, DamageType, EquipmentCategory, EquipmentSlot, Stat,
    WeaponType,
};

// ============================================================================
// Builders
// ============================================================================

impl SkillRecord {
    fn new(id: &str, name: &str, class: Option<&str>, max_uses: u32) -> Self {
        Self {
            id: id.into(),
            name: name.to_string(),
            icon: format!("icons/skills/{id}.png"),
            class: class.map(ClassId::from),
            max_uses,
            effects: Vec::new(),
        }
    }

    fn with_effect(mut self, effect: SkillEffect) -> Self {
        self.effects.push(effect);
        self
    }
}

fn weapon_damage(multiplier: f64) -> SkillEffect {
    SkillEffect::WeaponDamage {
        target: Target::Enemy,
        multiplier,
    }
}

fn direct_damage(damage_type: DamageType, min: i32, max: i32) -> SkillEffect {
    SkillEffect::Damage {
        target: Target::Enemy,
        damage_type,
        min,
        max,
    }
}

fn self_heal(min: i32, max: i32) -> SkillEffect {
    SkillEffect::Heal {
        target: Target::Caster,
        min,
        max,
    }
}

fn buff(properties: Vec<Property>, duration: u32) -> SkillEffect {
    SkillEffect::Status {
        target: Target::Caster,
        properties,
        duration,
        saving_modifier: None,
        difficulty: None,
    }
}

fn debuff(properties: Vec<Property>, duration: u32, save: Stat, difficulty: i32) -> SkillEffect {
    SkillEffect::Status {
        target: Target::Enemy,
        properties,
        duration,
        saving_modifier: Some(save),
        difficulty: Some(difficulty),
    }
}

fn affliction(
    effect: AuxiliaryEffectKind,
    duration: u32,
    save: Stat,
    difficulty: i32,
) -> SkillEffect {
    SkillEffect::Auxiliary {
        target: Target::Enemy,
        effect,
        duration,
        saving_modifier: Some(save),
        difficulty: Some(difficulty),
    }
}

impl EquipmentRecord {
    fn new_weapon(
        id: &str,
        name: &str,
        weapon_type: WeaponType,
        damage_type: DamageType,
        min_damage: i32,
        max_damage: i32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.to_string(),
            category: EquipmentCategory::Weapon,
            kind: ItemKind::Weapon(WeaponStats {
                weapon_type,
                damage_type,
                min_damage,
                max_damage,
            }),
            rarity: Rarity::Common,
            level: 1,
            price: 0,
            classes: Vec::new(),
            properties: Vec::new(),
        }
    }

    fn new_armour(id: &str, name: &str, category: EquipmentCategory, armour_class: i32) -> Self {
        Self {
            id: id.into(),
            name: name.to_string(),
            category,
            kind: ItemKind::Armour { armour_class },
            rarity: Rarity::Common,
            level: 1,
            price: 0,
            classes: Vec::new(),
            properties: Vec::new(),
        }
    }

    fn new_accessory(id: &str, name: &str, category: EquipmentCategory) -> Self {
        Self {
            id: id.into(),
            name: name.to_string(),
            category,
            kind: ItemKind::Accessory,
            rarity: Rarity::Common,
            level: 1,
            price: 0,
            classes: Vec::new(),
            properties: Vec::new(),
        }
    }

    fn with_rarity(mut self, rarity: Rarity, level: u8) -> Self {
        self.rarity = rarity;
        self.level = level;
        self
    }

    fn with_price(mut self, price: u32) -> Self {
        self.price = price;
        self
    }

    fn with_classes(mut self, classes: &[&str]) -> Self {
        self.classes = classes.iter().map(|c| ClassId::from(*c)).collect();
        self
    }

    fn with_properties(mut self, properties: Vec<Property>) -> Self {
        self.properties = properties;
        self
    }
}

fn skills(ids: &[&str]) -> Vec<super::records::SkillId> {
    ids.iter().map(|id| (*id).into()).collect()
}

fn gear(items: &[(EquipmentSlot, &str)]) -> Vec<(EquipmentSlot, EquipmentId)> {
    items
        .iter()
        .map(|(slot, id)| (*slot, EquipmentId::from(*id)))
        .collect()
}

lazy_static::lazy_static! {
    /// The standard content set.
    pub static ref STANDARD: CatalogData = CatalogData {
        classes: classes(),
        skills: skills_table(),
        equipment: equipment(),
        monsters: monsters(),
    };
}

// ============================================================================
// Classes
// ============================================================================

fn classes() -> Vec<ClassRecord> {
    vec![
        ClassRecord {
            id: "warrior".into(),
            name: "Warrior".to_string(),
            description: "A front-line fighter who trades blows and shrugs them off.".to_string(),
            stats: BaseStats::new(16, 12, 14, 8, 10, 10),
            hit_points: 14,
            hit_points_per_level: 8,
            resistances: Resistances::new().with(DamageType::Bludgeoning, 10),
            starting_skills: skills(&["strike", "power_attack", "shield_bash"]),
            starting_equipment: gear(&[
                (EquipmentSlot::Hand1, "short_sword"),
                (EquipmentSlot::Hand2, "wooden_shield"),
                (EquipmentSlot::Body, "leather_armour"),
            ]),
            starting_gold: 50,
        },
        ClassRecord {
            id: "rogue".into(),
            name: "Rogue".to_string(),
            description: "Quick and precise, fights with a blade in each hand.".to_string(),
            stats: BaseStats::new(10, 16, 12, 12, 10, 12),
            hit_points: 10,
            hit_points_per_level: 6,
            resistances: Resistances::new().with(DamageType::Poison, 20),
            starting_skills: skills(&["strike", "backstab", "evade"]),
            starting_equipment: gear(&[
                (EquipmentSlot::Hand1, "dagger"),
                (EquipmentSlot::Hand2, "dagger"),
                (EquipmentSlot::Body, "leather_armour"),
            ]),
            starting_gold: 80,
        },
        ClassRecord {
            id: "mage".into(),
            name: "Mage".to_string(),
            description: "Frail, but bends fire and frost to their will.".to_string(),
            stats: BaseStats::new(8, 12, 10, 16, 14, 10),
            hit_points: 8,
            hit_points_per_level: 4,
            resistances: Resistances::new()
                .with(DamageType::Fire, 10)
                .with(DamageType::Cold, 10),
            starting_skills: skills(&["strike", "firebolt", "arcane_shield"]),
            starting_equipment: gear(&[
                (EquipmentSlot::Hand1, "oak_staff"),
                (EquipmentSlot::Body, "robe"),
            ]),
            starting_gold: 60,
        },
        ClassRecord {
            id: "cleric".into(),
            name: "Cleric".to_string(),
            description: "A devout warrior who mends wounds and smites the unholy.".to_string(),
            stats: BaseStats::new(12, 10, 12, 10, 16, 12),
            hit_points: 10,
            hit_points_per_level: 6,
            resistances: Resistances::new()
                .with(DamageType::Necrotic, 20)
                .with(DamageType::Radiant, 20),
            starting_skills: skills(&["strike", "smite", "heal"]),
            starting_equipment: gear(&[
                (EquipmentSlot::Hand1, "mace"),
                (EquipmentSlot::Hand2, "wooden_shield"),
                (EquipmentSlot::Body, "chain_shirt"),
            ]),
            starting_gold: 50,
        },
    ]
}

// ============================================================================
// Skills
// ============================================================================

fn skills_table() -> Vec<SkillRecord> {
    vec![
        // Shared
        SkillRecord::new("strike", "Strike", None, 0).with_effect(weapon_damage(1.0)),
        // Warrior
        SkillRecord::new("power_attack", "Power Attack", Some("warrior"), 3)
            .with_effect(weapon_damage(1.5)),
        SkillRecord::new("shield_bash", "Shield Bash", Some("warrior"), 2)
            .with_effect(weapon_damage(0.5))
            .with_effect(affliction(AuxiliaryEffectKind::Stun, 1, Stat::Constitution, 12)),
        SkillRecord::new("battle_cry", "Battle Cry", Some("warrior"), 2).with_effect(buff(
            vec![
                Property::stat(Stat::Strength, 2),
                Property::auxiliary(AuxiliaryStat::HitBonus, 2),
            ],
            3,
        )),
        SkillRecord::new("second_wind", "Second Wind", Some("warrior"), 1)
            .with_effect(self_heal(6, 10)),
        SkillRecord::new("cleave", "Cleave", Some("warrior"), 2)
            .with_effect(weapon_damage(1.0))
            .with_effect(affliction(AuxiliaryEffectKind::Bleed, 2, Stat::Dexterity, 13)),
        // Rogue
        SkillRecord::new("backstab", "Backstab", Some("rogue"), 3).with_effect(weapon_damage(2.0)),
        SkillRecord::new("poison_blade", "Poison Blade", Some("rogue"), 2)
            .with_effect(weapon_damage(1.0))
            .with_effect(affliction(AuxiliaryEffectKind::Poison, 3, Stat::Constitution, 13)),
        SkillRecord::new("evade", "Evade", Some("rogue"), 2).with_effect(buff(
            vec![Property::auxiliary(AuxiliaryStat::ArmourClass, 4)],
            2,
        )),
        SkillRecord::new("disarm", "Disarm", Some("rogue"), 2)
            .with_effect(affliction(AuxiliaryEffectKind::Disarm, 2, Stat::Strength, 12)),
        SkillRecord::new("sharpen", "Sharpen", Some("rogue"), 1).with_effect(buff(
            vec![
                Property::auxiliary(AuxiliaryStat::CritBonus, 4),
                Property::damage(DamageType::Piercing, 20),
            ],
            3,
        )),
        // Mage
        SkillRecord::new("firebolt", "Firebolt", Some("mage"), 0)
            .with_effect(direct_damage(DamageType::Fire, 3, 8)),
        SkillRecord::new("frost_lance", "Frost Lance", Some("mage"), 3)
            .with_effect(direct_damage(DamageType::Cold, 4, 10))
            .with_effect(debuff(
                vec![Property::stat(Stat::Dexterity, -2)],
                2,
                Stat::Constitution,
                12,
            )),
        SkillRecord::new("arcane_shield", "Arcane Shield", Some("mage"), 2).with_effect(buff(
            vec![
                Property::auxiliary(AuxiliaryStat::ArmourClass, 3),
                Property::resistance(DamageType::Fire, 25),
            ],
            3,
        )),
        SkillRecord::new("chain_lightning", "Chain Lightning", Some("mage"), 2)
            .with_effect(direct_damage(DamageType::Lightning, 6, 14))
            .with_effect(affliction(AuxiliaryEffectKind::Stun, 1, Stat::Dexterity, 14)),
        // Cleric
        SkillRecord::new("smite", "Smite", Some("cleric"), 3)
            .with_effect(weapon_damage(1.0))
            .with_effect(direct_damage(DamageType::Radiant, 2, 6)),
        SkillRecord::new("heal", "Heal", Some("cleric"), 3).with_effect(self_heal(8, 12)),
        SkillRecord::new("weaken", "Weaken", Some("cleric"), 2).with_effect(debuff(
            vec![Property::stat(Stat::Strength, -3)],
            3,
            Stat::Wisdom,
            12,
        )),
        SkillRecord::new("sanctuary", "Sanctuary", Some("cleric"), 1).with_effect(buff(
            vec![
                Property::resistance(DamageType::Necrotic, 50),
                Property::auxiliary(AuxiliaryStat::MaxHitPoints, 10),
            ],
            4,
        )),
        // Monsters
        SkillRecord::new("rend", "Rend", None, 0)
            .with_effect(weapon_damage(0.75))
            .with_effect(affliction(AuxiliaryEffectKind::Bleed, 2, Stat::Dexterity, 12)),
        SkillRecord::new("venom_spit", "Venom Spit", None, 0)
            .with_effect(direct_damage(DamageType::Poison, 2, 5))
            .with_effect(affliction(AuxiliaryEffectKind::Poison, 3, Stat::Constitution, 12)),
        SkillRecord::new("regenerate", "Regenerate", None, 0).with_effect(self_heal(4, 8)),
        SkillRecord::new("roar", "Roar", None, 0).with_effect(debuff(
            vec![
                Property::stat(Stat::Strength, -2),
                Property::auxiliary(AuxiliaryStat::HitBonus, -2),
            ],
            2,
            Stat::Wisdom,
            11,
        )),
        SkillRecord::new("harden", "Harden", None, 0).with_effect(buff(
            vec![Property::auxiliary(AuxiliaryStat::ArmourClass, 3)],
            3,
        )),
    ]
}

// ============================================================================
// Equipment
// ============================================================================

fn equipment() -> Vec<EquipmentRecord> {
    use EquipmentCategory::*;

    vec![
        // Weapons
        EquipmentRecord::new_weapon(
            "short_sword",
            "Short Sword",
            WeaponType::Sword,
            DamageType::Slashing,
            1,
            6,
        )
        .with_price(20),
        EquipmentRecord::new_weapon(
            "dagger",
            "Dagger",
            WeaponType::Dagger,
            DamageType::Piercing,
            1,
            4,
        )
        .with_price(10),
        EquipmentRecord::new_weapon("mace", "Mace", WeaponType::Mace, DamageType::Bludgeoning, 2, 6)
            .with_price(25),
        EquipmentRecord::new_weapon(
            "oak_staff",
            "Oak Staff",
            WeaponType::Staff,
            DamageType::Bludgeoning,
            1,
            6,
        )
        .with_price(20)
        .with_properties(vec![Property::stat(Stat::Intelligence, 1)]),
        EquipmentRecord::new_weapon(
            "hand_axe",
            "Hand Axe",
            WeaponType::Axe,
            DamageType::Slashing,
            1,
            8,
        )
        .with_price(45)
        .with_classes(&["warrior", "cleric"]),
        EquipmentRecord::new_weapon(
            "battle_axe",
            "Battle Axe",
            WeaponType::Axe,
            DamageType::Slashing,
            2,
            10,
        )
        .with_rarity(Rarity::Uncommon, 3)
        .with_price(120)
        .with_classes(&["warrior"]),
        EquipmentRecord::new_weapon("spear", "Spear", WeaponType::Spear, DamageType::Piercing, 2, 7)
            .with_rarity(Rarity::Common, 2)
            .with_price(40)
            .with_classes(&["warrior", "cleric"]),
        EquipmentRecord::new_weapon(
            "longbow",
            "Longbow",
            WeaponType::Bow,
            DamageType::Piercing,
            2,
            8,
        )
        .with_rarity(Rarity::Uncommon, 2)
        .with_price(90)
        .with_classes(&["rogue"]),
        EquipmentRecord::new_weapon(
            "hand_crossbow",
            "Hand Crossbow",
            WeaponType::Crossbow,
            DamageType::Piercing,
            2,
            6,
        )
        .with_rarity(Rarity::Uncommon, 3)
        .with_price(110)
        .with_classes(&["rogue"]),
        EquipmentRecord::new_weapon(
            "flame_wand",
            "Flame Wand",
            WeaponType::Wand,
            DamageType::Fire,
            2,
            6,
        )
        .with_rarity(Rarity::Rare, 5)
        .with_price(300)
        .with_classes(&["mage"])
        .with_properties(vec![Property::damage(DamageType::Fire, 10)]),
        EquipmentRecord::new_weapon(
            "sunblade",
            "Sunblade",
            WeaponType::Sword,
            DamageType::Radiant,
            3,
            10,
        )
        .with_rarity(Rarity::Legendary, 10)
        .with_price(1500)
        .with_classes(&["warrior", "cleric"])
        .with_properties(vec![Property::damage(DamageType::Radiant, 25)]),
        // Armour
        EquipmentRecord::new_armour("wooden_shield", "Wooden Shield", Shield, 2)
            .with_price(15)
            .with_classes(&["warrior", "cleric"]),
        EquipmentRecord::new_armour("tower_shield", "Tower Shield", Shield, 4)
            .with_rarity(Rarity::Uncommon, 4)
            .with_price(160)
            .with_classes(&["warrior"]),
        EquipmentRecord::new_armour("robe", "Robe", BodyArmour, 10)
            .with_price(15)
            .with_classes(&["mage"])
            .with_properties(vec![Property::stat(Stat::Intelligence, 1)]),
        EquipmentRecord::new_armour("leather_armour", "Leather Armour", BodyArmour, 11)
            .with_price(20),
        EquipmentRecord::new_armour("chain_shirt", "Chain Shirt", BodyArmour, 13)
            .with_rarity(Rarity::Common, 2)
            .with_price(80)
            .with_classes(&["warrior", "cleric"]),
        EquipmentRecord::new_armour("plate_armour", "Plate Armour", BodyArmour, 17)
            .with_rarity(Rarity::Rare, 6)
            .with_price(600)
            .with_classes(&["warrior"]),
        EquipmentRecord::new_armour("iron_helm", "Iron Helm", Helmet, 1).with_price(30),
        EquipmentRecord::new_armour("leather_boots", "Leather Boots", Boots, 1)
            .with_price(25)
            .with_properties(vec![Property::stat(Stat::Dexterity, 1)]),
        // Accessories
        EquipmentRecord::new_accessory("gauntlets_of_precision", "Gauntlets of Precision", Gloves)
            .with_rarity(Rarity::Uncommon, 2)
            .with_price(150)
            .with_properties(vec![Property::auxiliary(AuxiliaryStat::HitBonus, 1)]),
        EquipmentRecord::new_accessory("belt_of_giants", "Belt of Giants", Belt)
            .with_rarity(Rarity::Uncommon, 3)
            .with_price(200)
            .with_properties(vec![
                Property::stat(Stat::Strength, 1),
                Property::auxiliary(AuxiliaryStat::MaxHitPoints, 5),
            ]),
        EquipmentRecord::new_accessory("ring_of_strength", "Ring of Strength", Ring)
            .with_rarity(Rarity::Rare, 4)
            .with_price(400)
            .with_properties(vec![Property::stat(Stat::Strength, 2)]),
        EquipmentRecord::new_accessory("ring_of_protection", "Ring of Protection", Ring)
            .with_rarity(Rarity::Uncommon, 3)
            .with_price(250)
            .with_properties(vec![Property::auxiliary(AuxiliaryStat::ArmourClass, 1)]),
        EquipmentRecord::new_accessory("amulet_of_health", "Amulet of Health", Amulet)
            .with_rarity(Rarity::Rare, 5)
            .with_price(500)
            .with_properties(vec![Property::stat(Stat::Constitution, 2)]),
        EquipmentRecord::new_accessory("fire_ward", "Fire Ward", Amulet)
            .with_rarity(Rarity::Uncommon, 2)
            .with_price(180)
            .with_properties(vec![Property::resistance(DamageType::Fire, 25)]),
    ]
}

// ============================================================================
// Monsters
// ============================================================================

fn monsters() -> Vec<MonsterRecord> {
    vec![
        // Zone 1
        MonsterRecord {
            id: "giant_rat".into(),
            name: "Giant Rat".to_string(),
            zone: 1,
            is_boss: false,
            challenge: 1,
            stats: BaseStats::new(7, 15, 11, 2, 10, 4),
            hit_points: 7,
            hit_points_per_level: 3,
            resistances: Resistances::new().with(DamageType::Poison, 25),
            armour_class: 10,
            damage_type: DamageType::Piercing,
            min_damage: 1,
            max_damage: 3,
            skills: skills(&["strike", "rend"]),
        },
        MonsterRecord {
            id: "goblin".into(),
            name: "Goblin".to_string(),
            zone: 1,
            is_boss: false,
            challenge: 1,
            stats: BaseStats::new(8, 14, 10, 10, 8, 8),
            hit_points: 8,
            hit_points_per_level: 4,
            resistances: Resistances::new(),
            armour_class: 12,
            damage_type: DamageType::Slashing,
            min_damage: 1,
            max_damage: 6,
            skills: skills(&["strike", "rend"]),
        },
        MonsterRecord {
            id: "cave_spider".into(),
            name: "Cave Spider".to_string(),
            zone: 1,
            is_boss: false,
            challenge: 2,
            stats: BaseStats::new(10, 16, 12, 2, 11, 4),
            hit_points: 10,
            hit_points_per_level: 4,
            resistances: Resistances::new().with(DamageType::Poison, 50),
            armour_class: 11,
            damage_type: DamageType::Piercing,
            min_damage: 1,
            max_damage: 4,
            skills: skills(&["strike", "venom_spit"]),
        },
        MonsterRecord {
            id: "goblin_chief".into(),
            name: "Goblin Chief".to_string(),
            zone: 1,
            is_boss: true,
            challenge: 4,
            stats: BaseStats::new(14, 12, 14, 10, 10, 12),
            hit_points: 28,
            hit_points_per_level: 6,
            resistances: Resistances::new().with(DamageType::Slashing, 10),
            armour_class: 14,
            damage_type: DamageType::Slashing,
            min_damage: 2,
            max_damage: 8,
            skills: skills(&["strike", "roar", "regenerate"]),
        },
        // Zone 2
        MonsterRecord {
            id: "skeleton".into(),
            name: "Skeleton".to_string(),
            zone: 2,
            is_boss: false,
            challenge: 3,
            stats: BaseStats::new(10, 14, 15, 6, 8, 5),
            hit_points: 13,
            hit_points_per_level: 5,
            resistances: Resistances::new()
                .with(DamageType::Piercing, 50)
                .with(DamageType::Poison, 100)
                .with(DamageType::Bludgeoning, -50),
            armour_class: 13,
            damage_type: DamageType::Slashing,
            min_damage: 2,
            max_damage: 6,
            skills: skills(&["strike", "harden"]),
        },
        MonsterRecord {
            id: "ghoul".into(),
            name: "Ghoul".to_string(),
            zone: 2,
            is_boss: false,
            challenge: 3,
            stats: BaseStats::new(13, 15, 10, 7, 10, 6),
            hit_points: 15,
            hit_points_per_level: 5,
            resistances: Resistances::new()
                .with(DamageType::Necrotic, 50)
                .with(DamageType::Radiant, -50),
            armour_class: 12,
            damage_type: DamageType::Slashing,
            min_damage: 2,
            max_damage: 7,
            skills: skills(&["strike", "rend", "venom_spit"]),
        },
        MonsterRecord {
            id: "bone_dragon".into(),
            name: "Bone Dragon".to_string(),
            zone: 2,
            is_boss: true,
            challenge: 6,
            stats: BaseStats::new(18, 10, 16, 8, 12, 10),
            hit_points: 45,
            hit_points_per_level: 8,
            resistances: Resistances::new()
                .with(DamageType::Fire, 25)
                .with(DamageType::Poison, 100)
                .with(DamageType::Radiant, -25),
            armour_class: 16,
            damage_type: DamageType::Slashing,
            min_damage: 3,
            max_damage: 12,
            skills: skills(&["strike", "roar", "harden", "regenerate"]),
        },
    ]
}
