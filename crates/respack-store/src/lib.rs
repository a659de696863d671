//! Two-file resource store: a newline-delimited data blob plus a compact
//! JSON index of `id -> [offset, length, cacheFlag]`.
//!
//! Writes are all-or-nothing. A session that does not commit leaves both
//! files empty, so a partially written store is never observable.

mod error;
mod index;
mod reader;
mod report;
mod session;
mod writer;

pub use error::StoreError;
pub use index::{IndexEntry, StoreIndex};
pub use reader::StoreReader;
pub use report::StoreReport;
pub use session::{CommitSummary, StoreSession};
pub use writer::write_all;

use thiserror::Error as ThisError;
