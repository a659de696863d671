use derive_more::Display;
use respack_config::ConfigError;
use respack_core::{
    registry::RegistryError,
    validate::{ValidateClass, ValidateError},
};
use respack_store::StoreError;
use serde::Serialize;
use thiserror::Error as ThisError;

///
/// Error
/// Public error type with a stable kind + origin taxonomy.
///

#[derive(Debug, Serialize, ThisError)]
#[error("{message}")]
pub struct Error {
    pub kind: ErrorKind,
    pub origin: ErrorOrigin,
    pub message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            kind,
            origin,
            message: message.into(),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        let kind = match err {
            ConfigError::Io { .. } => ErrorKind::Io,
            ConfigError::Invalid(_) | ConfigError::Parse(_) => ErrorKind::Config,
        };

        Self::new(kind, ErrorOrigin::Config, err.to_string())
    }
}

impl From<RegistryError> for Error {
    fn from(err: RegistryError) -> Self {
        let kind = match err {
            RegistryError::DuplicateId(_) => ErrorKind::Declare(DeclareErrorKind::DuplicateId),
            RegistryError::ForeignPrefix { .. } | RegistryError::InvalidId(_) => {
                ErrorKind::Declare(DeclareErrorKind::InvalidId)
            }
            RegistryError::NotFound(_) | RegistryError::TypeMismatch { .. } => {
                ErrorKind::Validate(ValidateErrorKind::Reference)
            }
        };

        Self::new(kind, ErrorOrigin::Registry, err.to_string())
    }
}

impl From<ValidateError> for Error {
    fn from(err: ValidateError) -> Self {
        Self::new(
            ErrorKind::Validate(err.class().into()),
            ErrorOrigin::Serialize,
            err.to_string(),
        )
    }
}

impl From<StoreError> for Error {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Validate(err) => err.into(),
            StoreError::DuplicateId(_) => Self::new(
                ErrorKind::Declare(DeclareErrorKind::DuplicateId),
                ErrorOrigin::Store,
                err.to_string(),
            ),
            StoreError::Corrupt(_) | StoreError::NotCommitted(_) => {
                Self::new(ErrorKind::Corrupt, ErrorOrigin::Store, err.to_string())
            }
            StoreError::Encode(_) | StoreError::Io { .. } => {
                Self::new(ErrorKind::Io, ErrorOrigin::Store, err.to_string())
            }
        }
    }
}

///
/// ErrorKind
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum ErrorKind {
    Declare(DeclareErrorKind),
    Validate(ValidateErrorKind),

    /// Build configuration could not be parsed or is inconsistent.
    Config,

    /// Store artifacts are unreadable or were never committed.
    Corrupt,

    /// Filesystem or encoding failure; nothing the content author can fix.
    Io,
}

///
/// DeclareErrorKind
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum DeclareErrorKind {
    DuplicateId,
    InvalidId,
}

///
/// ValidateErrorKind
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum ValidateErrorKind {
    Type,
    Range,
    Shape,
    Order,
    Enum,
    Reference,
    Rule,
}

impl From<ValidateClass> for ValidateErrorKind {
    fn from(class: ValidateClass) -> Self {
        match class {
            ValidateClass::Type => Self::Type,
            ValidateClass::Range => Self::Range,
            ValidateClass::Shape => Self::Shape,
            ValidateClass::Order => Self::Order,
            ValidateClass::Enum => Self::Enum,
            ValidateClass::Reference => Self::Reference,
            ValidateClass::Rule => Self::Rule,
        }
    }
}

///
/// ErrorOrigin
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq, Serialize)]
pub enum ErrorOrigin {
    Config,
    Registry,
    Serialize,
    Store,
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use respack_core::{id::Id, path::FieldPath, validate::ValidateErrorKind as CoreKind};

    #[test]
    fn duplicate_declaration_maps_to_declare_kind() {
        let err: Error = RegistryError::DuplicateId(Id::parse("Buff.burn").unwrap()).into();

        assert_eq!(err.kind, ErrorKind::Declare(DeclareErrorKind::DuplicateId));
        assert_eq!(err.origin, ErrorOrigin::Registry);
        assert_eq!(err.to_string(), "Buff.burn => id conflict");
    }

    #[test]
    fn validation_inside_store_keeps_its_class() {
        let inner = ValidateError::new(
            &FieldPath::at("Entry", "max_piece"),
            CoreKind::AboveMax {
                max: "99".to_string(),
                actual: "120".to_string(),
            },
        );
        let err: Error = StoreError::Validate(inner).into();

        assert_eq!(err.kind, ErrorKind::Validate(ValidateErrorKind::Range));
        assert_eq!(err.origin, ErrorOrigin::Serialize);
        assert_eq!(err.message, "Entry ~ max_piece => must be at most 99, got 120");
    }

    #[test]
    fn origin_displays_its_name() {
        assert_eq!(ErrorOrigin::Store.to_string(), "Store");
    }
}
