//! Core of the resource pack compiler: identifiers, the record contract,
//! the two-phase registry, field validators, canonical values and tables.
//!
//! Concrete schemas implement [`record::Record`] against these services; the
//! store crate persists what they produce.

pub mod id;
pub mod path;
pub mod record;
pub mod registry;
pub mod table;
pub mod validate;
pub mod value;
pub mod variant;

// test
#[cfg(test)]
pub(crate) mod test_support;

use thiserror::Error as ThisError;

///
/// Prelude
///
/// Everything a schema module needs to declare and serialize records.
///

pub mod prelude {
    pub use crate::{
        id::Id,
        path::FieldPath,
        record::{Kind, Record},
        registry::{FrozenRegistry, RecordSet, Registry, RegistryError},
        table::{dict_table, list_table},
        validate::*,
        value::{BlankSet, FieldMap, Map, Value, tagged},
        variant::VariantSet,
    };
}
