use crate::{
    id::Id,
    path::{FieldPath, PathSegment},
    registry::{FrozenRegistry, Registry, RegistryError},
    validate::ValidateError,
    value::{FieldMap, Value},
};
use std::{any::Any, fmt::Debug};

///
/// Kind
/// Static type name of a record or value-object; the id prefix of records.
///

pub trait Kind {
    const TYPE: &'static str;

    /// Path of a top-level field on this kind.
    #[must_use]
    fn here(field: impl Into<PathSegment>) -> FieldPath
    where
        Self: Sized,
    {
        FieldPath::at(Self::TYPE, field)
    }
}

///
/// Record
///
/// One declared content entity. Records are immutable after construction;
/// `declare` is the only way they enter a registry.
///

pub trait Record: Any + Debug {
    fn type_name(&self) -> &'static str;

    fn id(&self) -> &Id;

    /// Advisory runtime cache flag, copied into the store index.
    fn cache(&self) -> Option<bool> {
        None
    }

    /// Validate and convert into the canonical value.
    /// Cross-references are resolved against the frozen registry.
    fn serialize(&self, registry: &FrozenRegistry) -> Result<Value, ValidateError>;

    /// Fields shared by every record, placed ahead of the type's own fields.
    fn header(&self) -> FieldMap {
        FieldMap::new().with("id", self.id())
    }

    /// Insert into the registry; a duplicate id aborts the declare phase.
    fn declare(self, registry: &mut Registry) -> Result<(), RegistryError>
    where
        Self: Sized,
    {
        registry.register(self)
    }
}
