use crate::{
    levels::{LevelKeys, level_count, serialize_level_values},
    script::Script,
    vocab::{EQUIPMENT_TYPES, expect_rare_level},
};
use respack::prelude::*;
use std::collections::BTreeMap;

/// Scripts an equipment piece may carry; heal hooks belong to buffs only.
pub const EQUIPMENT_SCRIPTS: VariantSet = VariantSet::new(
    "Script",
    &["BuildScript", "HitScript", "HurtScript", "TickScript"],
);

const LEVEL_RANGE: (i64, i64) = (0, 99);

///
/// Equipment
///
/// A node in the equipment tree. `parents` maps a parent equipment id to
/// the parent level at which this node unlocks; `values` lists hold one
/// item per level step in `level`.
///

#[derive(Debug)]
pub struct Equipment {
    pub id: Id,
    pub kind: String,
    pub level: (i64, i64),
    pub parents: BTreeMap<String, i64>,
    pub materials: Vec<BTreeMap<String, i64>>,
    pub values: BTreeMap<String, Value>,
    pub scripts: Vec<Script>,
    pub name: String,
    pub rare: String,
    pub icon: String,
    pub sub_icon: String,
}

impl Equipment {
    pub fn new(local: &str, kind: &str, level: (i64, i64)) -> Result<Self, RegistryError> {
        Ok(Self {
            id: Id::new(Self::TYPE, local)?,
            kind: kind.to_string(),
            level,
            parents: BTreeMap::new(),
            materials: Vec::new(),
            values: BTreeMap::new(),
            scripts: Vec::new(),
            name: local.to_string(),
            rare: "Rare1".to_string(),
            icon: String::new(),
            sub_icon: String::new(),
        })
    }

    #[must_use]
    pub fn parent(mut self, id: &str, level: i64) -> Self {
        self.parents.insert(id.to_string(), level);
        self
    }

    #[must_use]
    pub fn material(mut self, materials: &[(&str, i64)]) -> Self {
        self.materials.push(
            materials
                .iter()
                .map(|&(id, count)| (id.to_string(), count))
                .collect(),
        );
        self
    }

    #[must_use]
    pub fn value(mut self, key: &str, values: Value) -> Self {
        self.values.insert(key.to_string(), values);
        self
    }

    #[must_use]
    pub fn script(mut self, script: Script) -> Self {
        self.scripts.push(script);
        self
    }

    #[must_use]
    pub fn display(mut self, name: &str, rare: &str, icon: &str, sub_icon: &str) -> Self {
        self.name = name.to_string();
        self.rare = rare.to_string();
        self.icon = icon.to_string();
        self.sub_icon = sub_icon.to_string();
        self
    }

    fn serialize_parents(&self, registry: &FrozenRegistry) -> Result<Value, ValidateError> {
        let path = Self::here("parents");

        for (id, &level) in &self.parents {
            let parent = registry
                .resolve_as::<Self>(id)
                .map_err(|err| ValidateError::reference(&path.key(), err))?;

            if parent.kind != self.kind {
                return Err(ValidateError::invalid(
                    &path.value(),
                    format!("type must equal to parent {}, got {}", parent.kind, self.kind),
                ));
            }

            let (lo, hi) = parent.level;
            if level < lo || hi < level {
                return Err(ValidateError::invalid(
                    &path.value(),
                    format!("level must be in parent's range [{lo}, {hi}], got {level}"),
                ));
            }
        }

        let parents = expect_mapping(&self.parents, &path, Rule::new())?;

        Ok(parents.map_or(Value::Null, Value::Object))
    }

    fn serialize_materials(&self, registry: &FrozenRegistry) -> Result<Option<Value>, ValidateError> {
        let rows = expect_sequence(
            &self.materials,
            &Self::here("materials"),
            Rule::new(),
            |item, item_path| {
                let materials = require(
                    expect_mapping(&item, item_path, Rule::new())?,
                    item_path,
                    "a Mapping",
                )?;

                for (id, count) in &materials {
                    if !registry.contains(id) {
                        return Err(ValidateError::reference(
                            &item_path.key(),
                            RegistryError::NotFound(id.clone()),
                        ));
                    }
                    expect_int(count, &item_path.value(), Rule::new().min(0))?;
                }

                Ok(Value::Object(materials))
            },
        )?;

        Ok(rows.and_then(list_table))
    }

    fn serialize_scripts(&self) -> Result<Vec<Value>, ValidateError> {
        let item_path = Self::here("scripts").item();

        self.scripts
            .iter()
            .map(|script| {
                EQUIPMENT_SCRIPTS.check(script.tag(), &item_path.field("type"))?;
                script.serialize(&item_path)
            })
            .collect()
    }
}

impl Kind for Equipment {
    const TYPE: &'static str = "Equipment";
}

impl Record for Equipment {
    fn type_name(&self) -> &'static str {
        Self::TYPE
    }

    fn id(&self) -> &Id {
        &self.id
    }

    fn serialize(&self, registry: &FrozenRegistry) -> Result<Value, ValidateError> {
        let (lo, hi) = LEVEL_RANGE;
        let level_path = Self::here("level");
        let level = require(
            expect_ordered_range(&self.level, &level_path, Rule::range(lo, hi))?,
            &level_path,
            "a pair of ints",
        )?;
        let steps = level_count(level.1 - level.0);

        let values = serialize_level_values(
            &self.values,
            steps,
            LevelKeys::ALL,
            &Self::here("values"),
            registry,
        )?;

        Ok(self
            .header()
            .with("type", expect_enum_member(&self.kind, EQUIPMENT_TYPES, &Self::here("type"), Rule::new())?)
            .with("level", vec![level.0, level.1])
            .with("parents", self.serialize_parents(registry)?)
            .with("materials", self.serialize_materials(registry)?)
            .merge(values)
            .with("scripts", self.serialize_scripts()?)
            .with("name", expect_string(&self.name, &Self::here("name"), Rule::new())?)
            .with("rare", expect_rare_level(&self.rare, &Self::here("rare"))?)
            .with("icon", expect_string(&self.icon, &Self::here("icon"), Rule::new())?)
            .with("sub_icon", expect_string(&self.sub_icon, &Self::here("sub_icon"), Rule::new())?)
            .finish())
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{buff::Buff, entry::Entry};
    use serde_json::json;

    fn registry(extra: Vec<Equipment>) -> FrozenRegistry {
        let mut reg = Registry::new();
        reg.register(Buff::new("burn", "Burn", "burn.png").unwrap()).unwrap();
        reg.register(Entry::new("fury", "Attack", 1).unwrap()).unwrap();
        reg.register(Equipment::new("sword", "Equipment1", (0, 5)).unwrap()).unwrap();
        for equipment in extra {
            reg.register(equipment).unwrap();
        }
        reg.freeze()
    }

    fn serialize_last(equipment: Equipment) -> Result<Value, ValidateError> {
        let id = equipment.id.clone();
        let reg = registry(vec![equipment]);

        reg.resolve_as::<Equipment>(id.as_str()).unwrap().serialize(&reg)
    }

    #[test]
    fn values_split_by_key_kind() {
        let blade = Equipment::new("blade", "Equipment1", (0, 2))
            .unwrap()
            .parent("Equipment.sword", 5)
            .material(&[("Equipment.sword", 1)])
            .material(&[("Buff.burn", 2), ("Entry.fury", 1)])
            .value("Attack", json!([10, 20]))
            .value("Slots", json!([["Attack"], ["Attack", "Extra"]]))
            .value("Entry.fury", json!([[1, 0], [1, 1]]))
            .value("Buff.burn", json!([{}, {}]))
            .script(Script::hit("target.hp -= 1"));

        let value = serialize_last(blade).unwrap();

        assert_eq!(value["level"], json!([0, 2]));
        assert_eq!(value["parents"], json!({"Equipment.sword": 5}));
        assert_eq!(value["materials"]["type"], "ListTable");
        assert_eq!(value["materials"]["columns"], 2);
        assert_eq!(value["attributes"]["data"]["Attack"], json!([10, 20]));
        assert_eq!(value["slots"]["rows"], 2);
        assert_eq!(value["entries"]["data"]["Entry.fury"], json!([[1, 0], [1, 1]]));
        assert_eq!(value["buffs"]["rows"], 2);
        assert_eq!(value["scripts"], json!([{"type": "HitScript", "script": "target.hp -= 1"}]));

        let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            [
                "id", "type", "level", "parents", "materials", "attributes", "slots", "entries",
                "buffs", "scripts", "name", "rare", "icon", "sub_icon"
            ]
        );
    }

    #[test]
    fn parent_must_share_type_and_range() {
        let err = serialize_last(
            Equipment::new("shield", "Equipment2", (0, 1))
                .unwrap()
                .parent("Equipment.sword", 1),
        )
        .unwrap_err();
        assert_eq!(err.path, "Equipment ~ parents.(value)");

        let err = serialize_last(
            Equipment::new("blade", "Equipment1", (0, 1))
                .unwrap()
                .parent("Equipment.sword", 6),
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Equipment ~ parents.(value) => level must be in parent's range [0, 5], got 6"
        );

        let err = serialize_last(
            Equipment::new("blade", "Equipment1", (0, 1))
                .unwrap()
                .parent("Entry.fury", 0),
        )
        .unwrap_err();
        assert_eq!(err.class(), ValidateClass::Reference);
    }

    #[test]
    fn materials_must_exist_and_be_counted() {
        let err = serialize_last(
            Equipment::new("blade", "Equipment1", (0, 1))
                .unwrap()
                .material(&[("Item.ore", 1)]),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Equipment ~ materials.(item).(key) => Item.ore not found");

        let err = serialize_last(
            Equipment::new("blade", "Equipment1", (0, 1))
                .unwrap()
                .material(&[("Buff.burn", -1)]),
        )
        .unwrap_err();
        assert_eq!(err.class(), ValidateClass::Range);
    }

    #[test]
    fn heal_scripts_are_not_allowed() {
        let err = serialize_last(
            Equipment::new("blade", "Equipment1", (0, 1))
                .unwrap()
                .script(Script::heal("self.hp += 1")),
        )
        .unwrap_err();

        assert_eq!(err.path, "Equipment ~ scripts.(item).type");
        assert_eq!(err.class(), ValidateClass::Enum);
    }

    #[test]
    fn level_range_must_be_ordered() {
        let err = serialize_last(Equipment::new("blade", "Equipment1", (3, 3)).unwrap()).unwrap_err();

        assert_eq!(err.class(), ValidateClass::Order);
    }
}
