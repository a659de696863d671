//! Closed string vocabularies used by the demo schema.

use respack::prelude::*;

pub const SLOTS_KEY: &str = "Slots";

pub const RARE_LEVELS: &[&str] = &["Rare1", "Rare2", "Rare3"];
pub const ENTRY_TYPES: &[&str] = &["Attack", "Defense", "Special"];
pub const SLOT_TYPES: &[&str] = &["Attack", "Defense", "Special", "Extra"];
pub const EQUIPMENT_TYPES: &[&str] = &["Equipment1", "Equipment2", "Equipment3"];

pub const ATTRIBUTES: &[&str] = &[
    "MaxHealth",
    "MaxHealthUp",
    "MaxHealthDown",
    "HealthCure",
    "HealthCureUp",
    "HealthCureDown",
    "MaxStamina",
    "MaxStaminaUp",
    "MaxStaminaDown",
    "ExtraStamina",
    "StaminaRecovery",
    "StaminaRecoveryUp",
    "StaminaRecoveryDown",
    "Damage",
    "Attack",
    "AttackUp",
    "AttackDown",
    "Defense",
    "DefenseUp",
    "DefenseDown",
    "CriticalChance",
    "CriticalDamage",
    "BonusUp",
    "BonusDown",
    "PhysicalBonusUp",
    "PhysicalBonusDown",
    "ElementalBonusUp",
    "ElementalBonusDown",
    "MagicalBonusUp",
    "MagicalBonusDown",
    "CutBonusUp",
    "CutBonusDown",
    "BluntBonusUp",
    "BluntBonusDown",
    "AmmoBonusUp",
    "AmmoBonusDown",
    "FireBonusUp",
    "FireBonusDown",
    "IceBonusUp",
    "IceBonusDown",
    "ThunderBonusUp",
    "ThunderBonusDown",
    "Resistance",
    "ResistancePass",
    "PhysicalResistance",
    "PhysicalResistancePass",
    "ElementalResistance",
    "ElementalResistancePass",
    "MagicalResistance",
    "MagicalResistancePass",
    "CutResistance",
    "CutResistancePass",
    "BluntResistance",
    "BluntResistancePass",
    "AmmoResistance",
    "AmmoResistancePass",
    "FireResistance",
    "FireResistancePass",
    "IceResistance",
    "IceResistancePass",
    "ThunderResistance",
    "ThunderResistancePass",
    "GuardShield",
    "GuardShieldPass",
    "BlockShield",
    "BlockShieldPass",
    "DodgeShield",
    "DodgeShieldPass",
    "EndureShield",
    "EndureShieldPass",
    "Break",
    "BreakUp",
    "BreakDown",
];

#[must_use]
pub fn is_attribute(name: &str) -> bool {
    ATTRIBUTES.contains(&name)
}

pub fn expect_attribute<D: Declared + ?Sized>(
    value: &D,
    path: &FieldPath,
) -> Result<Option<String>, ValidateError> {
    expect_enum_member(value, ATTRIBUTES, path, Rule::new())
}

pub fn expect_rare_level<D: Declared + ?Sized>(
    value: &D,
    path: &FieldPath,
) -> Result<Option<String>, ValidateError> {
    expect_enum_member(value, RARE_LEVELS, path, Rule::new())
}
