//! Table descriptors for per-level and per-tier data.
//!
//! A table wraps its data with explicit `rows` and `columns` counts so the
//! runtime can allocate before reading. Empty inputs encode to `None` and the
//! owning field is dropped.

use crate::{
    path::FieldPath,
    validate::{ValidateError, ValidateErrorKind},
    value::{Map, TYPE_KEY, Value},
};

pub const DICT_TABLE: &str = "DictTable";
pub const LIST_TABLE: &str = "ListTable";

/// Column-keyed table. Every column must hold exactly `rows` items; the
/// first offending column fails at `path.(value)`.
pub fn dict_table(
    columns: Map<String, Value>,
    rows: usize,
    path: &FieldPath,
) -> Result<Option<Value>, ValidateError> {
    if columns.is_empty() {
        return Ok(None);
    }

    let value_path = path.value();
    for column in columns.values() {
        let actual = match column {
            Value::Array(items) => items.len(),
            other => {
                return Err(ValidateError::new(
                    &value_path,
                    ValidateErrorKind::type_error("a Sequence", other),
                ));
            }
        };

        if actual != rows {
            return Err(ValidateError::new(
                &value_path,
                ValidateErrorKind::Length {
                    expected: rows,
                    actual,
                },
            ));
        }
    }

    let width = columns.len();
    Ok(Some(descriptor(DICT_TABLE, rows, width, Value::Object(columns))))
}

/// Row-ordered table. Ragged rows are kept as declared; the column count is
/// the widest row, and a scalar row counts as one column.
#[must_use]
pub fn list_table(rows: Vec<Value>) -> Option<Value> {
    if rows.is_empty() {
        return None;
    }

    let columns = rows.iter().map(row_width).max().unwrap_or(0);

    Some(descriptor(LIST_TABLE, rows.len(), columns, Value::Array(rows)))
}

fn row_width(row: &Value) -> usize {
    match row {
        Value::Array(items) => items.len(),
        Value::Object(map) => map.len(),
        _ => 1,
    }
}

fn descriptor(tag: &str, rows: usize, columns: usize, data: Value) -> Value {
    let mut map = Map::new();
    map.insert(TYPE_KEY.to_string(), Value::from(tag));
    map.insert("rows".to_string(), Value::from(rows));
    map.insert("columns".to_string(), Value::from(columns));
    map.insert("data".to_string(), data);

    Value::Object(map)
}

///
/// TESTS
///
