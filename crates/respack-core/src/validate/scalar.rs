use crate::{
    path::FieldPath,
    validate::{Declared, Rule, ValidateError, ValidateErrorKind, present},
    value::Value,
};
use std::fmt::Display;

///
/// Numeric
/// Number kinds accepted by the numeric validators.
///

pub trait Numeric: Copy + PartialOrd + Display + Into<Value> {
    const EXPECTED: &'static str;

    fn from_value(value: &Value) -> Option<Self>;
}

impl Numeric for i64 {
    const EXPECTED: &'static str = "an int";

    fn from_value(value: &Value) -> Option<Self> {
        value.as_i64()
    }
}

impl Numeric for f64 {
    const EXPECTED: &'static str = "an int|float";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_f64(),
            _ => None,
        }
    }
}

pub fn expect_bool<D: Declared + ?Sized>(
    value: &D,
    path: &FieldPath,
    rule: Rule,
) -> Result<Option<bool>, ValidateError> {
    const EXPECTED: &str = "a bool";

    let Some(value) = present(value, &rule, path, EXPECTED)? else {
        return Ok(None);
    };

    value
        .as_bool()
        .map(Some)
        .ok_or_else(|| ValidateError::new(path, ValidateErrorKind::type_error(EXPECTED, &value)))
}

/// Check a number of kind `T` against inclusive bounds.
pub fn expect_number<T: Numeric, D: Declared + ?Sized>(
    value: &D,
    path: &FieldPath,
    rule: Rule<T>,
) -> Result<Option<T>, ValidateError> {
    let Some(value) = present(value, &rule, path, T::EXPECTED)? else {
        return Ok(None);
    };

    check_number(&value, path, &rule).map(Some)
}

pub fn expect_int<D: Declared + ?Sized>(
    value: &D,
    path: &FieldPath,
    rule: Rule<i64>,
) -> Result<Option<i64>, ValidateError> {
    expect_number(value, path, rule)
}

pub fn expect_float<D: Declared + ?Sized>(
    value: &D,
    path: &FieldPath,
    rule: Rule<f64>,
) -> Result<Option<f64>, ValidateError> {
    expect_number(value, path, rule)
}

pub fn expect_string<D: Declared + ?Sized>(
    value: &D,
    path: &FieldPath,
    rule: Rule,
) -> Result<Option<String>, ValidateError> {
    const EXPECTED: &str = "a str";

    let Some(value) = present(value, &rule, path, EXPECTED)? else {
        return Ok(None);
    };

    match value {
        Value::String(s) => Ok(Some(s)),
        other => Err(ValidateError::new(
            path,
            ValidateErrorKind::type_error(EXPECTED, &other),
        )),
    }
}

/// Check membership in a closed set of string values.
pub fn expect_enum_member<D: Declared + ?Sized>(
    value: &D,
    allowed: &[&str],
    path: &FieldPath,
    rule: Rule,
) -> Result<Option<String>, ValidateError> {
    let Some(member) = expect_string(value, path, rule)? else {
        return Ok(None);
    };

    if allowed.contains(&member.as_str()) {
        Ok(Some(member))
    } else {
        Err(ValidateError::new(
            path,
            ValidateErrorKind::Enum {
                allowed: allowed.join(", "),
                actual: member,
            },
        ))
    }
}

// check_number
// type + bounds check on an already-present value
pub(crate) fn check_number<T: Numeric>(
    value: &Value,
    path: &FieldPath,
    rule: &Rule<T>,
) -> Result<T, ValidateError> {
    let n = T::from_value(value)
        .ok_or_else(|| ValidateError::new(path, ValidateErrorKind::type_error(T::EXPECTED, value)))?;
    rule.check_bounds(&n, path)?;

    Ok(n)
}

///
/// TESTS
///
