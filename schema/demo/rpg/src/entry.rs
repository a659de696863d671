use crate::{
    levels::{LevelKeys, level_count, serialize_level_values},
    vocab::{ENTRY_TYPES, expect_rare_level},
};
use respack::prelude::*;
use std::collections::BTreeMap;

///
/// Entry
///
/// Stackable affix. Each piece adds `piece_values[level]`; plus points
/// stack twice as deep as pieces, so `plus_values` lists hold
/// `max_piece * 2` items.
///

#[derive(Debug)]
pub struct Entry {
    pub id: Id,
    pub kind: String,
    pub max_piece: i64,
    pub piece_values: BTreeMap<String, Value>,
    pub plus_values: BTreeMap<String, Value>,
    pub name: String,
    pub rare: String,
    pub icon: String,
}

impl Entry {
    pub fn new(local: &str, kind: &str, max_piece: i64) -> Result<Self, RegistryError> {
        Ok(Self {
            id: Id::new(Self::TYPE, local)?,
            kind: kind.to_string(),
            max_piece,
            piece_values: BTreeMap::new(),
            plus_values: BTreeMap::new(),
            name: local.to_string(),
            rare: "Rare1".to_string(),
            icon: String::new(),
        })
    }

    #[must_use]
    pub fn piece(mut self, key: &str, values: Value) -> Self {
        self.piece_values.insert(key.to_string(), values);
        self
    }

    #[must_use]
    pub fn plus(mut self, key: &str, values: Value) -> Self {
        self.plus_values.insert(key.to_string(), values);
        self
    }

    #[must_use]
    pub fn display(mut self, name: &str, rare: &str, icon: &str) -> Self {
        self.name = name.to_string();
        self.rare = rare.to_string();
        self.icon = icon.to_string();
        self
    }
}

impl Kind for Entry {
    const TYPE: &'static str = "Entry";
}

impl Record for Entry {
    fn type_name(&self) -> &'static str {
        Self::TYPE
    }

    fn id(&self) -> &Id {
        &self.id
    }

    fn serialize(&self, registry: &FrozenRegistry) -> Result<Value, ValidateError> {
        let max_path = Self::here("max_piece");
        let max_piece = require(
            expect_int(&self.max_piece, &max_path, Rule::range(0, 99))?,
            &max_path,
            i64::EXPECTED,
        )?;
        let pieces = level_count(max_piece);

        let piece = serialize_level_values(
            &self.piece_values,
            pieces,
            LevelKeys::PIECES,
            &Self::here("piece_values"),
            registry,
        )?;
        let plus = serialize_level_values(
            &self.plus_values,
            pieces * 2,
            LevelKeys::ATTRIBUTES,
            &Self::here("plus_values"),
            registry,
        )?;

        Ok(self
            .header()
            .with("type", expect_enum_member(&self.kind, ENTRY_TYPES, &Self::here("type"), Rule::new())?)
            .with("max_piece", max_piece)
            .with("piece", piece.finish())
            .with("plus", plus.finish())
            .with("name", expect_string(&self.name, &Self::here("name"), Rule::new())?)
            .with("rare", expect_rare_level(&self.rare, &Self::here("rare"))?)
            .with("icon", expect_string(&self.icon, &Self::here("icon"), Rule::new())?)
            .finish_with(BlankSet::NULL_OR_EMPTY_OBJECT))
    }
}

///
/// TESTS
///
