use crate::{
    ThisError,
    id::{Id, has_type_prefix},
    record::{Kind, Record},
};
use derive_more::Deref;
use std::{any::Any, collections::HashMap};
use tracing::{debug, info};

///
/// RegistryError
///

#[derive(Debug, ThisError)]
#[remain::sorted]
pub enum RegistryError {
    #[error("{0} => id conflict")]
    DuplicateId(Id),

    #[error("{id} => id prefix does not match declaring type '{declared}'")]
    ForeignPrefix { id: Id, declared: &'static str },

    #[error("invalid resource id '{0}', expected '<TypeName>.<localName>'")]
    InvalidId(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("{id} is not a {expected} id")]
    TypeMismatch { id: String, expected: String },
}

///
/// RecordSet
///
/// Registration-ordered record storage with an id index.
/// Both registry phases expose it read-only through `Deref`.
///

#[derive(Debug, Default)]
pub struct RecordSet {
    records: Vec<Box<dyn Record>>,
    positions: HashMap<Id, usize>,
}

impl RecordSet {
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.positions.contains_key(id)
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&dyn Record> {
        self.positions.get(id).map(|&pos| &*self.records[pos])
    }

    /// All records in registration order.
    pub fn records(&self) -> impl ExactSizeIterator<Item = &dyn Record> {
        self.records.iter().map(Box::as_ref)
    }

    /// Resolve an id, checking the type prefix before the lookup.
    pub fn resolve(&self, id: &str, expected: &str) -> Result<&dyn Record, RegistryError> {
        if !has_type_prefix(id, expected) {
            return Err(RegistryError::TypeMismatch {
                id: id.to_string(),
                expected: expected.to_string(),
            });
        }

        self.get(id)
            .ok_or_else(|| RegistryError::NotFound(id.to_string()))
    }

    /// Resolve an id and downcast to the concrete record type.
    pub fn resolve_as<T: Record + Kind>(&self, id: &str) -> Result<&T, RegistryError> {
        let record: &dyn Any = self.resolve(id, T::TYPE)?;

        record
            .downcast_ref::<T>()
            .ok_or_else(|| RegistryError::TypeMismatch {
                id: id.to_string(),
                expected: T::TYPE.to_string(),
            })
    }

    /// Non-failing probe: prefix matches and the id is registered.
    #[must_use]
    pub fn is_of_type(&self, id: &str, type_name: &str) -> bool {
        has_type_prefix(id, type_name) && self.contains(id)
    }
}

///
/// Registry
///
/// Declare-phase registry. Records are appended by `register` and never
/// removed or replaced; `freeze` ends the declare phase.
///

#[derive(Debug, Default, Deref)]
pub struct Registry(RecordSet);

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<R: Record>(&mut self, record: R) -> Result<(), RegistryError> {
        self.register_boxed(Box::new(record))
    }

    pub fn register_boxed(&mut self, record: Box<dyn Record>) -> Result<(), RegistryError> {
        let id = record.id().clone();
        let declared = record.type_name();

        if !id.has_type(declared) {
            return Err(RegistryError::ForeignPrefix { id, declared });
        }
        if self.0.positions.contains_key(&id) {
            return Err(RegistryError::DuplicateId(id));
        }

        debug!(id = %id, "registered record");

        self.0.positions.insert(id, self.0.records.len());
        self.0.records.push(record);

        Ok(())
    }

    /// End the declare phase; the returned view is read-only.
    #[must_use]
    pub fn freeze(self) -> FrozenRegistry {
        info!(records = self.0.len(), "registry frozen");

        FrozenRegistry(self.0)
    }
}

///
/// FrozenRegistry
/// Commit-phase view; no mutation entry points.
///

#[derive(Debug, Deref)]
pub struct FrozenRegistry(RecordSet);

///
/// TESTS
///
