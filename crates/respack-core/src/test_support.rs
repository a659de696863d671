use crate::{
    id::Id,
    record::{Kind, Record},
    registry::FrozenRegistry,
    table::dict_table,
    validate::{Rule, ValidateError, expect_int, expect_number_list, expect_resource_reference},
    value::{Map, Value},
};
use std::collections::BTreeMap;

///
/// Widget
/// Minimal per-level record used across the crate's tests.
///

#[derive(Debug)]
pub struct Widget {
    pub id: Id,
    pub max_level: i64,
    pub attributes: BTreeMap<String, Vec<i64>>,
}

impl Widget {
    pub fn new(local: &str, max_level: i64) -> Self {
        Self {
            id: Id::new(Self::TYPE, local).unwrap(),
            max_level,
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_id(raw: &str, max_level: i64) -> Self {
        Self {
            id: Id::parse(raw).unwrap(),
            max_level,
            attributes: BTreeMap::new(),
        }
    }

    pub fn attribute(mut self, name: &str, values: Vec<i64>) -> Self {
        self.attributes.insert(name.to_string(), values);
        self
    }
}

impl Kind for Widget {
    const TYPE: &'static str = "Widget";
}

impl Record for Widget {
    fn type_name(&self) -> &'static str {
        Self::TYPE
    }

    fn id(&self) -> &Id {
        &self.id
    }

    fn serialize(&self, _: &FrozenRegistry) -> Result<Value, ValidateError> {
        let max_level = expect_int(&self.max_level, &Self::here("max_level"), Rule::range(0, 99))?
            .unwrap_or_default();
        let rows = usize::try_from(max_level).unwrap_or_default();

        let mut columns = Map::new();
        for (name, values) in &self.attributes {
            let path = Self::here("attributes").value();
            if let Some(list) = expect_number_list(values, rows, &path, Rule::<i64>::new())? {
                columns.insert(name.clone(), Value::Array(list));
            }
        }

        Ok(self
            .header()
            .with("maxLevel", max_level)
            .with("attributes", dict_table(columns, rows, &Self::here("attributes"))?)
            .finish())
    }
}

///
/// Gadget
/// Record with an optional cross-reference to a Widget.
///

#[derive(Debug)]
pub struct Gadget {
    pub id: Id,
    pub target: Option<String>,
}

impl Gadget {
    pub fn new(local: &str) -> Self {
        Self {
            id: Id::new(Self::TYPE, local).unwrap(),
            target: None,
        }
    }

    pub fn targeting(mut self, target: &str) -> Self {
        self.target = Some(target.to_string());
        self
    }
}

impl Kind for Gadget {
    const TYPE: &'static str = "Gadget";
}

impl Record for Gadget {
    fn type_name(&self) -> &'static str {
        Self::TYPE
    }

    fn id(&self) -> &Id {
        &self.id
    }

    fn cache(&self) -> Option<bool> {
        Some(true)
    }

    fn serialize(&self, registry: &FrozenRegistry) -> Result<Value, ValidateError> {
        let target = expect_resource_reference(
            &self.target,
            Widget::TYPE,
            &Self::here("target"),
            registry,
            Rule::new().optional(),
        )?;

        Ok(self.header().with("target", target).finish())
    }
}
