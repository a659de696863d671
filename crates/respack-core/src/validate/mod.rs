//! Field validators shared by every record schema.
//!
//! Validators take any [`Declared`] input plus a [`FieldPath`], and either
//! return the checked value or a [`ValidateError`] carrying the rendered path.
//! An absent input is accepted only when the rule is optional; it then comes
//! back as `None` and the field is dropped from the canonical mapping.

mod declared;
mod reference;
mod scalar;
mod sequence;

pub use declared::*;
pub use reference::*;
pub use scalar::*;
pub use sequence::*;

use crate::{ThisError, path::FieldPath, registry::RegistryError, value::Value};
use std::fmt;

///
/// ValidateError
///

#[derive(Debug, ThisError)]
#[error("{path} => {kind}")]
pub struct ValidateError {
    pub path: String,
    pub kind: ValidateErrorKind,
}

impl ValidateError {
    #[must_use]
    pub fn new(path: &FieldPath, kind: ValidateErrorKind) -> Self {
        Self {
            path: path.to_string(),
            kind,
        }
    }

    /// Schema-specific rule violation with a free-form message.
    #[must_use]
    pub fn invalid(path: &FieldPath, message: impl Into<String>) -> Self {
        Self::new(path, ValidateErrorKind::Invalid(message.into()))
    }

    #[must_use]
    pub fn reference(path: &FieldPath, err: RegistryError) -> Self {
        Self::new(path, ValidateErrorKind::Reference(err))
    }

    #[must_use]
    pub const fn class(&self) -> ValidateClass {
        self.kind.class()
    }
}

///
/// ValidateErrorKind
///

#[derive(Debug, ThisError)]
#[remain::sorted]
pub enum ValidateErrorKind {
    #[error("must be at most {max}, got {actual}")]
    AboveMax { max: String, actual: String },

    #[error("'{tag}' is abstract and cannot be instantiated")]
    AbstractVariant { tag: String },

    #[error("must be at least {min}, got {actual}")]
    BelowMin { min: String, actual: String },

    #[error("must be one of [{allowed}], got {actual}")]
    Enum { allowed: String, actual: String },

    #[error("{0}")]
    Invalid(String),

    #[error("size must equal to {expected}, got {actual}")]
    Length { expected: usize, actual: usize },

    #[error("is required, must be {expected}")]
    Missing { expected: &'static str },

    #[error("first item must be less than second item, got [{lo}, {hi}]")]
    Order { lo: String, hi: String },

    #[error(transparent)]
    Reference(RegistryError),

    #[error("size must be at most {max}, got {actual}")]
    TooLong { max: usize, actual: usize },

    #[error("size must be at least {min}, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("must be {expected}, got {actual}")]
    Type { expected: &'static str, actual: String },
}

impl ValidateErrorKind {
    #[must_use]
    pub const fn class(&self) -> ValidateClass {
        match self {
            Self::AbstractVariant { .. } | Self::Missing { .. } | Self::Type { .. } => {
                ValidateClass::Type
            }
            Self::AboveMax { .. } | Self::BelowMin { .. } => ValidateClass::Range,
            Self::Enum { .. } => ValidateClass::Enum,
            Self::Invalid(_) => ValidateClass::Rule,
            Self::Length { .. } | Self::TooLong { .. } | Self::TooShort { .. } => {
                ValidateClass::Shape
            }
            Self::Order { .. } => ValidateClass::Order,
            Self::Reference(_) => ValidateClass::Reference,
        }
    }

    pub(crate) fn type_error(expected: &'static str, actual: &Value) -> Self {
        Self::Type {
            expected,
            actual: describe(actual),
        }
    }
}

///
/// ValidateClass
/// Coarse failure taxonomy used for reporting.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ValidateClass {
    Type,
    Range,
    Shape,
    Order,
    Enum,
    Reference,
    Rule,
}

impl fmt::Display for ValidateClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Type => "type",
            Self::Range => "range",
            Self::Shape => "shape",
            Self::Order => "order",
            Self::Enum => "enum",
            Self::Reference => "reference",
            Self::Rule => "rule",
        };
        write!(f, "{label}")
    }
}

///
/// Rule
///
/// Per-field constraints. `min`/`max` are inclusive; for sequence
/// validators they bound the item values, for `expect_sequence` the length.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct Rule<T = ()> {
    pub optional: bool,
    pub min: Option<T>,
    pub max: Option<T>,
}

impl<T> Rule<T> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            optional: false,
            min: None,
            max: None,
        }
    }

    #[must_use]
    pub fn range(min: T, max: T) -> Self {
        Self::new().min(min).max(max)
    }

    #[must_use]
    pub const fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    #[must_use]
    pub fn min(mut self, min: T) -> Self {
        self.min = Some(min);
        self
    }

    #[must_use]
    pub fn max(mut self, max: T) -> Self {
        self.max = Some(max);
        self
    }

    /// Same presence, no bounds; used for the item rule of nested values.
    #[must_use]
    pub const fn presence<U>(&self) -> Rule<U> {
        Rule {
            optional: self.optional,
            min: None,
            max: None,
        }
    }
}

impl<T: PartialOrd + fmt::Display> Rule<T> {
    /// Check inclusive bounds.
    pub fn check_bounds(&self, value: &T, path: &FieldPath) -> Result<(), ValidateError> {
        if let Some(min) = &self.min
            && value < min
        {
            return Err(ValidateError::new(
                path,
                ValidateErrorKind::BelowMin {
                    min: min.to_string(),
                    actual: value.to_string(),
                },
            ));
        }
        if let Some(max) = &self.max
            && value > max
        {
            return Err(ValidateError::new(
                path,
                ValidateErrorKind::AboveMax {
                    max: max.to_string(),
                    actual: value.to_string(),
                },
            ));
        }

        Ok(())
    }
}

// present
// shared optional short-circuit; required + absent is a type failure
pub(crate) fn present<D: Declared + ?Sized, T>(
    value: &D,
    rule: &Rule<T>,
    path: &FieldPath,
    expected: &'static str,
) -> Result<Option<Value>, ValidateError> {
    match value.declared() {
        Some(value) => Ok(Some(value)),
        None if rule.optional => Ok(None),
        None => Err(ValidateError::new(
            path,
            ValidateErrorKind::Missing { expected },
        )),
    }
}

/// Unwrap the result of a required validator.
pub fn require<T>(
    value: Option<T>,
    path: &FieldPath,
    expected: &'static str,
) -> Result<T, ValidateError> {
    value.ok_or_else(|| ValidateError::new(path, ValidateErrorKind::Missing { expected }))
}

// describe
// compact rendering of an offending value for error messages
fn describe(value: &Value) -> String {
    const MAX_LEN: usize = 48;

    let mut out = value.to_string();
    if out.len() > MAX_LEN {
        let cut = (0..=MAX_LEN)
            .rev()
            .find(|&i| out.is_char_boundary(i))
            .unwrap_or(0);
        out.truncate(cut);
        out.push_str("...");
    }

    out
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_message_names_path_bound_and_value() {
        let path = FieldPath::at("Entry", "max_piece");
        let err = Rule::range(0_i64, 99).check_bounds(&120, &path).unwrap_err();

        assert_eq!(err.to_string(), "Entry ~ max_piece => must be at most 99, got 120");
        assert_eq!(err.class(), ValidateClass::Range);
    }

    #[test]
    fn bounds_are_inclusive() {
        let path = FieldPath::new("T");
        let rule = Rule::range(1.5_f64, 2.5);

        assert!(rule.check_bounds(&1.5, &path).is_ok());
        assert!(rule.check_bounds(&2.5, &path).is_ok());
        assert!(rule.check_bounds(&1.49, &path).is_err());
    }

    #[test]
    fn describe_truncates_long_values() {
        let long = Value::String("x".repeat(200));
        let text = describe(&long);

        assert!(text.len() <= 51);
        assert!(text.ends_with("..."));
    }
}
