use crate::{
    path::FieldPath,
    validate::{Declared, Numeric, Rule, ValidateError, ValidateErrorKind, check_number, present},
    value::{Map, Value},
};

/// Check a per-level sequence: its length must equal `len` exactly and
/// every item must pass `item`, which receives the `.(item)` path.
pub fn expect_fixed_length_sequence<D, F>(
    value: &D,
    len: usize,
    path: &FieldPath,
    rule: Rule,
    item: F,
) -> Result<Option<Vec<Value>>, ValidateError>
where
    D: Declared + ?Sized,
    F: FnMut(Value, &FieldPath) -> Result<Value, ValidateError>,
{
    let Some(items) = sequence(value, path, &rule)? else {
        return Ok(None);
    };

    if items.len() != len {
        return Err(ValidateError::new(
            path,
            ValidateErrorKind::Length {
                expected: len,
                actual: items.len(),
            },
        ));
    }

    map_items(items, path, item).map(Some)
}

/// Check a sequence of any length; `rule.min`/`rule.max` bound the length.
pub fn expect_sequence<D, F>(
    value: &D,
    path: &FieldPath,
    rule: Rule<usize>,
    item: F,
) -> Result<Option<Vec<Value>>, ValidateError>
where
    D: Declared + ?Sized,
    F: FnMut(Value, &FieldPath) -> Result<Value, ValidateError>,
{
    let Some(items) = sequence(value, path, &rule)? else {
        return Ok(None);
    };

    let actual = items.len();
    if let Some(min) = rule.min
        && actual < min
    {
        return Err(ValidateError::new(
            path,
            ValidateErrorKind::TooShort { min, actual },
        ));
    }
    if let Some(max) = rule.max
        && actual > max
    {
        return Err(ValidateError::new(
            path,
            ValidateErrorKind::TooLong { max, actual },
        ));
    }

    map_items(items, path, item).map(Some)
}

/// Per-level numeric list; items are bounded by `rule` and passed through
/// unchanged so ints stay ints in the canonical output.
pub fn expect_number_list<T: Numeric, D: Declared + ?Sized>(
    value: &D,
    len: usize,
    path: &FieldPath,
    rule: Rule<T>,
) -> Result<Option<Vec<Value>>, ValidateError> {
    expect_fixed_length_sequence(value, len, path, rule.presence(), |item, item_path| {
        check_number(&item, item_path, &rule)?;
        Ok(item)
    })
}

/// Fixed-size numeric vector, returned typed (translations, rotations).
pub fn expect_number_vec<T: Numeric, D: Declared + ?Sized>(
    value: &D,
    len: usize,
    path: &FieldPath,
    rule: Rule<T>,
) -> Result<Option<Vec<T>>, ValidateError> {
    let Some(items) = expect_number_list(value, len, path, rule)? else {
        return Ok(None);
    };

    let item_path = path.item();
    let unbounded = Rule::<T>::new();
    items
        .iter()
        .map(|item| check_number(item, &item_path, &unbounded))
        .collect::<Result<_, _>>()
        .map(Some)
}

/// Two-element inclusive range; the first item must be strictly less
/// than the second.
pub fn expect_ordered_range<T: Numeric, D: Declared + ?Sized>(
    value: &D,
    path: &FieldPath,
    rule: Rule<T>,
) -> Result<Option<(T, T)>, ValidateError> {
    let Some(items) = expect_number_list(value, 2, path, rule)? else {
        return Ok(None);
    };

    let item_rule = Rule::<T>::new();
    let lo = check_number(&items[0], &path.item(), &item_rule)?;
    let hi = check_number(&items[1], &path.item(), &item_rule)?;

    if lo < hi {
        Ok(Some((lo, hi)))
    } else {
        Err(ValidateError::new(
            path,
            ValidateErrorKind::Order {
                lo: lo.to_string(),
                hi: hi.to_string(),
            },
        ))
    }
}

/// Mapping-shaped input; keys and values are left to the caller.
pub fn expect_mapping<D: Declared + ?Sized>(
    value: &D,
    path: &FieldPath,
    rule: Rule,
) -> Result<Option<Map<String, Value>>, ValidateError> {
    const EXPECTED: &str = "a Mapping";

    let Some(value) = present(value, &rule, path, EXPECTED)? else {
        return Ok(None);
    };

    match value {
        Value::Object(map) => Ok(Some(map)),
        other => Err(ValidateError::new(
            path,
            ValidateErrorKind::type_error(EXPECTED, &other),
        )),
    }
}

fn sequence<D: Declared + ?Sized, T>(
    value: &D,
    path: &FieldPath,
    rule: &Rule<T>,
) -> Result<Option<Vec<Value>>, ValidateError> {
    const EXPECTED: &str = "a Sequence";

    let Some(value) = present(value, rule, path, EXPECTED)? else {
        return Ok(None);
    };

    match value {
        Value::Array(items) => Ok(Some(items)),
        other => Err(ValidateError::new(
            path,
            ValidateErrorKind::type_error(EXPECTED, &other),
        )),
    }
}

fn map_items<F>(items: Vec<Value>, path: &FieldPath, mut item: F) -> Result<Vec<Value>, ValidateError>
where
    F: FnMut(Value, &FieldPath) -> Result<Value, ValidateError>,
{
    let item_path = path.item();

    items
        .into_iter()
        .map(|value| item(value, &item_path))
        .collect()
}

///
/// TESTS
///
