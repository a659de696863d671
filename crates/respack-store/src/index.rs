use indexmap::IndexMap;
use respack_core::id::Id;
use serde::{Deserialize, Serialize};

///
/// IndexEntry
///
/// Location of one record in the data blob, encoded as
/// `[offset, length, cacheFlag]`. `length` excludes the trailing newline.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct IndexEntry(pub u64, pub u64, pub u8);

impl IndexEntry {
    #[must_use]
    pub fn new(offset: u64, length: u64, cache: bool) -> Self {
        Self(offset, length, u8::from(cache))
    }

    #[must_use]
    pub const fn offset(&self) -> u64 {
        self.0
    }

    #[must_use]
    pub const fn length(&self) -> u64 {
        self.1
    }

    /// Byte offset one past the record, before the delimiter.
    #[must_use]
    pub const fn end(&self) -> u64 {
        self.0 + self.1
    }

    #[must_use]
    pub const fn cached(&self) -> bool {
        self.2 != 0
    }
}

///
/// StoreIndex
/// Id to span mapping, in write order.
///

pub type StoreIndex = IndexMap<Id, IndexEntry>;

///
/// TESTS
///
