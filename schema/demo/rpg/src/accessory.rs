use crate::{
    levels::{LevelKeys, level_count, serialize_level_values},
    random::{RandomAttributes, RandomEntries},
    vocab::expect_rare_level,
};
use respack::prelude::*;
use std::collections::BTreeMap;

///
/// Accessory
///
/// Equippable item whose stats are partly rolled. `random_values` names
/// random pools; each pool must cover the same level count.
///

#[derive(Debug)]
pub struct Accessory {
    pub id: Id,
    pub max_level: i64,
    pub values: BTreeMap<String, Value>,
    pub random_values: Vec<String>,
    pub name: String,
    pub rare: String,
    pub icon: String,
}

impl Accessory {
    pub fn new(local: &str, max_level: i64) -> Result<Self, RegistryError> {
        Ok(Self {
            id: Id::new(Self::TYPE, local)?,
            max_level,
            values: BTreeMap::new(),
            random_values: Vec::new(),
            name: local.to_string(),
            rare: "Rare1".to_string(),
            icon: String::new(),
        })
    }

    #[must_use]
    pub fn value(mut self, key: &str, values: Value) -> Self {
        self.values.insert(key.to_string(), values);
        self
    }

    #[must_use]
    pub fn random(mut self, id: &str) -> Self {
        self.random_values.push(id.to_string());
        self
    }

    #[must_use]
    pub fn display(mut self, name: &str, rare: &str, icon: &str) -> Self {
        self.name = name.to_string();
        self.rare = rare.to_string();
        self.icon = icon.to_string();
        self
    }

    fn serialize_random_values(&self, registry: &FrozenRegistry) -> Result<FieldMap, ValidateError> {
        let path = Self::here("random_values").item();
        let mut attributes = Vec::new();
        let mut entries = Vec::new();

        for id in &self.random_values {
            let pool_level = if registry.is_of_type(id, RandomAttributes::TYPE) {
                attributes.push(Value::from(id.as_str()));
                registry
                    .resolve_as::<RandomAttributes>(id)
                    .map_err(|err| ValidateError::reference(&path, err))?
                    .max_level
            } else if registry.is_of_type(id, RandomEntries::TYPE) {
                entries.push(Value::from(id.as_str()));
                registry
                    .resolve_as::<RandomEntries>(id)
                    .map_err(|err| ValidateError::reference(&path, err))?
                    .max_level
            } else {
                return Err(ValidateError::invalid(
                    &path,
                    format!("must be a RandomAttributesID|RandomEntriesID, got '{id}'"),
                ));
            };

            if pool_level != self.max_level {
                return Err(ValidateError::invalid(
                    &path,
                    format!(
                        "{id} max_level must equal to {}, got {pool_level}",
                        self.max_level
                    ),
                ));
            }
        }

        Ok(FieldMap::new()
            .with("random_attributes", attributes)
            .with("random_entries", entries)
            .clean(BlankSet::NULL_OR_EMPTY_ARRAY))
    }
}

impl Kind for Accessory {
    const TYPE: &'static str = "Accessory";
}

impl Record for Accessory {
    fn type_name(&self) -> &'static str {
        Self::TYPE
    }

    fn id(&self) -> &Id {
        &self.id
    }

    fn serialize(&self, registry: &FrozenRegistry) -> Result<Value, ValidateError> {
        let level_path = Self::here("max_level");
        let max_level = require(
            expect_int(&self.max_level, &level_path, Rule::range(0, 99))?,
            &level_path,
            i64::EXPECTED,
        )?;

        let values = serialize_level_values(
            &self.values,
            level_count(max_level),
            LevelKeys::ALL,
            &Self::here("values"),
            registry,
        )?;

        Ok(self
            .header()
            .with("max_level", max_level)
            .merge(values)
            .merge(self.serialize_random_values(registry)?)
            .with("name", expect_string(&self.name, &Self::here("name"), Rule::new())?)
            .with("rare", expect_rare_level(&self.rare, &Self::here("rare"))?)
            .with("icon", expect_string(&self.icon, &Self::here("icon"), Rule::new())?)
            .finish())
    }
}

///
/// TESTS
///
