use crate::registry::RegistryError;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;

/// Separator between the type prefix and the local name.
pub const ID_SEPARATOR: char = '.';

///
/// Id
///
/// Resource identifier of the form `<TypeName>.<localName>`.
/// The type prefix is everything before the first separator.
///

#[derive(Clone, Debug, Deserialize, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(try_from = "String", into = "String")]
pub struct Id(String);

impl Id {
    /// Build an id from a type name and a local name.
    pub fn new(type_name: &str, local: &str) -> Result<Self, RegistryError> {
        Self::parse(&format!("{type_name}{ID_SEPARATOR}{local}"))
    }

    /// Parse an id, rejecting empty segments and a missing separator.
    pub fn parse(raw: &str) -> Result<Self, RegistryError> {
        match raw.split_once(ID_SEPARATOR) {
            Some((ty, local)) if !ty.is_empty() && !local.is_empty() => Ok(Self(raw.to_string())),
            _ => Err(RegistryError::InvalidId(raw.to_string())),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn type_name(&self) -> &str {
        self.0
            .split_once(ID_SEPARATOR)
            .map_or(self.0.as_str(), |(ty, _)| ty)
    }

    #[must_use]
    pub fn local_name(&self) -> &str {
        self.0
            .split_once(ID_SEPARATOR)
            .map_or("", |(_, local)| local)
    }

    /// Prefix probe only; says nothing about registration.
    #[must_use]
    pub fn has_type(&self, type_name: &str) -> bool {
        self.type_name() == type_name
    }
}

/// Prefix probe on a raw string, used before an id has been parsed.
#[must_use]
pub fn has_type_prefix(raw: &str, type_name: &str) -> bool {
    raw.strip_prefix(type_name)
        .and_then(|rest| rest.strip_prefix(ID_SEPARATOR))
        .is_some_and(|local| !local.is_empty())
}

impl Borrow<str> for Id {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Id {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Id {
    type Error = RegistryError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::parse(&raw)
    }
}

impl From<Id> for String {
    fn from(id: Id) -> Self {
        id.0
    }
}

impl From<&Id> for serde_json::Value {
    fn from(id: &Id) -> Self {
        Self::String(id.0.clone())
    }
}

impl From<Id> for serde_json::Value {
    fn from(id: Id) -> Self {
        Self::String(id.0)
    }
}

///
/// TESTS
///
