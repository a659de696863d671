//! Per-level value lists and the level-values mapping shared by entries,
//! equipment and accessories.

use crate::{
    buff::{Buff, expect_args_list},
    entry::Entry,
    vocab::{SLOT_TYPES, SLOTS_KEY, is_attribute},
};
use respack::prelude::*;
use std::collections::BTreeMap;

const PIECE_RANGE: (i64, i64) = (0, 99);

/// Levels are range-checked before use; a negative count reads as zero.
#[must_use]
pub fn level_count(levels: i64) -> usize {
    usize::try_from(levels).unwrap_or_default()
}

/// One number per level.
pub fn expect_attributes_list<D: Declared + ?Sized>(
    value: &D,
    levels: usize,
    path: &FieldPath,
) -> Result<Option<Vec<Value>>, ValidateError> {
    expect_number_list(value, levels, path, Rule::<f64>::new())
}

/// One list of slot types per level; encoded as a list table since rows
/// may differ in width.
pub fn expect_slots_list<D: Declared + ?Sized>(
    value: &D,
    levels: usize,
    path: &FieldPath,
) -> Result<Option<Value>, ValidateError> {
    let rows = expect_fixed_length_sequence(value, levels, path, Rule::new(), |row, row_path| {
        let slots = expect_sequence(&row, row_path, Rule::new(), |slot, slot_path| {
            expect_enum_member(&slot, SLOT_TYPES, slot_path, Rule::new()).map(Value::from)
        })?;

        Ok(slots.map_or(Value::Null, Value::from))
    })?;

    Ok(rows.and_then(list_table))
}

/// One `[piece, plus]` pair per level.
pub fn expect_entries_list<D: Declared + ?Sized>(
    value: &D,
    levels: usize,
    path: &FieldPath,
) -> Result<Option<Vec<Value>>, ValidateError> {
    let (lo, hi) = PIECE_RANGE;

    expect_fixed_length_sequence(value, levels, path, Rule::new(), |pair, pair_path| {
        expect_number_list(&pair, 2, pair_path, Rule::range(lo, hi)).map(Value::from)
    })
}

///
/// LevelKeys
/// Which key kinds a level-values mapping accepts besides attributes.
///

#[derive(Clone, Copy, Debug)]
pub struct LevelKeys {
    pub slots: bool,
    pub entries: bool,
    pub buffs: bool,
}

impl LevelKeys {
    pub const ATTRIBUTES: Self = Self {
        slots: false,
        entries: false,
        buffs: false,
    };
    pub const PIECES: Self = Self {
        slots: false,
        entries: false,
        buffs: true,
    };
    pub const ALL: Self = Self {
        slots: true,
        entries: true,
        buffs: true,
    };

    fn expected(self) -> String {
        let mut kinds = vec!["Attribute"];
        if self.slots {
            kinds.push("\"Slots\"");
        }
        if self.entries {
            kinds.push("EntryID");
        }
        if self.buffs {
            kinds.push("BuffID");
        }

        format!("must be an {}", kinds.join("|"))
    }
}

/// Split a level-values mapping by key kind into its tables. Keys are
/// attribute names, `"Slots"`, entry ids or buff ids; every list must hold
/// exactly `levels` items.
pub fn serialize_level_values(
    values: &BTreeMap<String, Value>,
    levels: usize,
    keys: LevelKeys,
    path: &FieldPath,
    registry: &FrozenRegistry,
) -> Result<FieldMap, ValidateError> {
    let value_path = path.value();
    let mut attributes = Map::new();
    let mut entries = Map::new();
    let mut buffs = Map::new();
    let mut slots = None;

    for (key, list) in values {
        if is_attribute(key) {
            if let Some(list) = expect_attributes_list(list, levels, &value_path)? {
                attributes.insert(key.clone(), Value::Array(list));
            }
        } else if keys.slots && key == SLOTS_KEY {
            slots = expect_slots_list(list, levels, &value_path)?;
        } else if keys.entries && registry.is_of_type(key, Entry::TYPE) {
            if let Some(list) = expect_entries_list(list, levels, &value_path)? {
                entries.insert(key.clone(), Value::Array(list));
            }
        } else if keys.buffs && registry.is_of_type(key, Buff::TYPE) {
            let buff = registry
                .resolve_as::<Buff>(key)
                .map_err(|err| ValidateError::reference(&path.key(), err))?;
            if let Some(list) = expect_args_list(list, levels, buff, &value_path)? {
                buffs.insert(key.clone(), Value::Array(list));
            }
        } else {
            return Err(ValidateError::invalid(&path.key(), format!("{}, got '{key}'", keys.expected())));
        }
    }

    Ok(FieldMap::new()
        .with("attributes", dict_table(attributes, levels, path)?)
        .with("slots", slots)
        .with("entries", dict_table(entries, levels, path)?)
        .with("buffs", dict_table(buffs, levels, path)?)
        .clean(BlankSet::NULL))
}

///
/// TESTS
///
