use crate::{
    accessory::Accessory,
    buff::Buff,
    character::Character,
    entry::Entry,
    equipment::Equipment,
    random::{RandomAttribute, RandomAttributes, RandomEntries, RandomEntry},
    script::{Script, TickScript},
    shape::Shape,
};
use respack::prelude::*;
use serde_json::json;

/// Ids in declaration order.
pub const SAMPLE_IDS: &[&str] = &[
    "Buff.burn",
    "Entry.fury",
    "Equipment.flameblade",
    "Equipment.sword",
    "RandomAttributes.ring",
    "RandomEntries.gems",
    "Accessory.ring",
    "Character.hero",
];

/// Declare a small but complete content set. `Equipment.flameblade` is
/// declared before its parent.
pub fn declare_sample(registry: &mut Registry) -> Result<(), RegistryError> {
    let mut burn = Buff::new("burn", "Burn", "icons/buff/burn.png")?.argument("damage", 5.0);
    burn.on_hit = Some(Script::hit("target.burn += 1"));
    burn.on_tick = Some(Script::Tick(TickScript {
        interval: 2,
        times: 3,
        ..TickScript::new("target.hp -= damage")
    }));
    burn.declare(registry)?;

    Entry::new("fury", "Attack", 2)?
        .piece("Attack", json!([5, 10]))
        .piece("Buff.burn", json!([{}, {"damage": 8}]))
        .plus("CriticalChance", json!([0.01, 0.02, 0.03, 0.04]))
        .display("Fury", "Rare2", "icons/entry/fury.png")
        .declare(registry)?;

    Equipment::new("flameblade", "Equipment1", (5, 7))?
        .parent("Equipment.sword", 5)
        .material(&[("Equipment.sword", 1)])
        .material(&[("Buff.burn", 1), ("Entry.fury", 2)])
        .value("Attack", json!([30, 40]))
        .value("Slots", json!([["Attack"], ["Attack", "Extra"]]))
        .value("Entry.fury", json!([[1, 0], [2, 1]]))
        .value("Buff.burn", json!([{}, {"damage": 10}]))
        .script(Script::build("self.attack_speed *= 1.1"))
        .display("Flameblade", "Rare3", "icons/eq/flameblade.png", "icons/eq/fire.png")
        .declare(registry)?;

    Equipment::new("sword", "Equipment1", (0, 5))?
        .value("Attack", json!([10, 12, 14, 16, 18]))
        .display("Sword", "Rare1", "icons/eq/sword.png", "")
        .declare(registry)?;

    RandomAttributes::new("ring", 3)?
        .roll(RandomAttribute::new(0, "MaxHealth", &[10.0, 20.0, 30.0]))
        .roll(RandomAttribute::new(1, "Defense", &[1.0, 2.0, 3.0]))
        .declare(registry)?;

    RandomEntries::new("gems", 3)?
        .roll(RandomEntry::new(0, "Entry.fury", &[(1, 0), (1, 1), (2, 0)]))
        .declare(registry)?;

    Accessory::new("ring", 3)?
        .value("MaxHealth", json!([50, 60, 70]))
        .random("RandomAttributes.ring")
        .random("RandomEntries.gems")
        .display("Ring", "Rare2", "icons/acc/ring.png")
        .declare(registry)?;

    Character::new("hero", "Hero", (1, 60), Shape::capsule(0.9, 0.3).at([0.0, 0.9, 0.0]))?
        .attribute("MaxHealth", 100.0)
        .attribute("Attack", 12.0)
        .declare(registry)?;

    Ok(())
}

///
/// TESTS
///
