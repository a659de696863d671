use crate::{
    error::StoreError,
    index::{IndexEntry, StoreIndex},
};
use respack_config::StoreConfig;
use respack_core::{id::Id, value::Value};
use std::{fs, path::Path};
use tracing::debug;

///
/// StoreReader
///
/// Loads a committed store into memory and hands out records by id.
/// Every span is checked against the blob when the store is opened.
///

#[derive(Debug)]
pub struct StoreReader {
    data: Vec<u8>,
    index: StoreIndex,
}

impl StoreReader {
    pub fn open(dir: &Path, config: &StoreConfig) -> Result<Self, StoreError> {
        let data_path = config.data_path(dir);
        let index_path = config.index_path(dir);

        let index_bytes = fs::read(&index_path).map_err(StoreError::io(&index_path))?;
        if index_bytes.is_empty() {
            return Err(StoreError::NotCommitted(dir.to_path_buf()));
        }
        let data = fs::read(&data_path).map_err(StoreError::io(&data_path))?;

        let index: StoreIndex = serde_json::from_slice(&index_bytes)
            .map_err(|err| StoreError::corrupt(format!("unreadable index: {err}")))?;
        check_spans(&index, data.len() as u64)?;

        debug!(records = index.len(), bytes = data.len(), "store opened");

        Ok(Self { data, index })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Ids in write order.
    pub fn ids(&self) -> impl ExactSizeIterator<Item = &Id> {
        self.index.keys()
    }

    #[must_use]
    pub fn entry(&self, id: &str) -> Option<IndexEntry> {
        self.index.get(id).copied()
    }

    /// Raw record bytes, without the delimiter.
    #[must_use]
    pub fn raw(&self, id: &str) -> Option<&[u8]> {
        let entry = self.index.get(id)?;
        let start = usize::try_from(entry.offset()).ok()?;
        let end = usize::try_from(entry.end()).ok()?;

        self.data.get(start..end)
    }

    /// Decode one record back into its canonical value.
    pub fn get(&self, id: &str) -> Result<Option<Value>, StoreError> {
        self.raw(id)
            .map(|bytes| {
                serde_json::from_slice(bytes)
                    .map_err(|err| StoreError::corrupt(format!("record '{id}': {err}")))
            })
            .transpose()
    }
}

// check_spans
// spans must lie inside the blob, in write order, without overlap
fn check_spans(index: &StoreIndex, data_len: u64) -> Result<(), StoreError> {
    let mut next = 0_u64;

    for (id, entry) in index {
        if entry.offset() < next {
            return Err(StoreError::corrupt(format!(
                "record '{id}' at offset {} overlaps the previous record",
                entry.offset()
            )));
        }
        if entry.end() > data_len {
            return Err(StoreError::corrupt(format!(
                "record '{id}' ends at {} past the data size {data_len}",
                entry.end()
            )));
        }

        next = entry.end();
    }

    Ok(())
}

///
/// TESTS
///
