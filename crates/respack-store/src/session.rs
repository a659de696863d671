use crate::{
    error::StoreError,
    index::{IndexEntry, StoreIndex},
};
use respack_config::StoreConfig;
use respack_core::{id::Id, value::Value};
use std::{
    fs::{self, File, OpenOptions},
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

const DELIMITER: &[u8] = b"\n";

///
/// CommitSummary
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CommitSummary {
    pub records: usize,
    pub data_bytes: u64,
    pub index_bytes: u64,
}

///
/// StoreSession
///
/// One write session over the data blob and the index. Both files are
/// truncated on creation. The index is only written by `commit`; every other
/// way out of the session (an explicit `discard`, an error during commit, or
/// dropping an unfinished session) truncates both files back to empty.
///

#[derive(Debug)]
pub struct StoreSession {
    data: Option<BufWriter<File>>,
    index_file: Option<File>,
    data_path: PathBuf,
    index_path: PathBuf,
    index: StoreIndex,
    position: u64,
    sync: bool,
}

impl StoreSession {
    pub fn create(dir: &Path, config: &StoreConfig) -> Result<Self, StoreError> {
        fs::create_dir_all(dir).map_err(StoreError::io(dir))?;

        let data_path = config.data_path(dir);
        let index_path = config.index_path(dir);
        // index first: if the blob cannot be opened, no index survives to
        // point into it
        let index_file = truncate_open(&index_path)?;
        let data = truncate_open(&data_path)?;

        debug!(data = %data_path.display(), index = %index_path.display(), "store session opened");

        Ok(Self {
            data: Some(BufWriter::new(data)),
            index_file: Some(index_file),
            data_path,
            index_path,
            index: StoreIndex::new(),
            position: 0,
            sync: config.sync,
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: &Id) -> bool {
        self.index.contains_key(id)
    }

    /// Append one canonical record. Ids are unique within the session.
    pub fn write(&mut self, id: &Id, value: &Value, cache: bool) -> Result<IndexEntry, StoreError> {
        if self.index.contains_key(id) {
            return Err(StoreError::DuplicateId(id.clone()));
        }

        let bytes = serde_json::to_vec(value)?;
        let data = self
            .data
            .as_mut()
            .ok_or_else(|| closed(&self.data_path))?;
        data.write_all(&bytes)
            .and_then(|()| data.write_all(DELIMITER))
            .map_err(StoreError::io(&self.data_path))?;

        let length = bytes.len() as u64;
        let entry = IndexEntry::new(self.position, length, cache);
        self.position += length + DELIMITER.len() as u64;
        self.index.insert(id.clone(), entry);

        debug!(id = %id, offset = entry.offset(), length, "record written");

        Ok(entry)
    }

    /// Flush the blob and write the index. Any failure discards the store.
    pub fn commit(mut self) -> Result<CommitSummary, StoreError> {
        match self.try_commit() {
            Ok(summary) => {
                info!(
                    records = summary.records,
                    data_bytes = summary.data_bytes,
                    index_bytes = summary.index_bytes,
                    "store committed"
                );
                Ok(summary)
            }
            Err(err) => {
                warn!(error = %err, "store commit failed, discarding output");
                self.truncate_all();
                Err(err)
            }
        }
    }

    /// Drop everything written so far, leaving both files empty.
    pub fn discard(mut self) -> Result<(), StoreError> {
        warn!(records = self.index.len(), "store session discarded");

        match self.truncate_all() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn try_commit(&mut self) -> Result<CommitSummary, StoreError> {
        let index_bytes = serde_json::to_vec(&self.index)?;

        let data = self
            .data
            .as_mut()
            .ok_or_else(|| closed(&self.data_path))?;
        data.flush().map_err(StoreError::io(&self.data_path))?;
        if self.sync {
            data.get_ref()
                .sync_all()
                .map_err(StoreError::io(&self.data_path))?;
        }

        let index_path = self.index_path.clone();
        let sync = self.sync;
        let index_file = self
            .index_file
            .as_mut()
            .ok_or_else(|| closed(&index_path))?;
        index_file
            .write_all(&index_bytes)
            .and_then(|()| index_file.flush())
            .and_then(|()| if sync { index_file.sync_all() } else { Ok(()) })
            .map_err(StoreError::io(&index_path))?;

        // both artifacts are complete; close without truncating
        self.data = None;
        self.index_file = None;

        Ok(CommitSummary {
            records: self.index.len(),
            data_bytes: self.position,
            index_bytes: index_bytes.len() as u64,
        })
    }

    // truncate_all
    // the buffered writer is unwrapped without flushing, so no buffered
    // bytes can land after the truncation; both files are always attempted
    // and the first failure is returned
    fn truncate_all(&mut self) -> Option<StoreError> {
        let data = self.data.take().map(|writer| writer.into_parts().0);
        let index = self.index_file.take();

        self.index.clear();
        self.position = 0;

        let mut first = None;
        for (file, path) in [(index, &self.index_path), (data, &self.data_path)] {
            let Some(file) = file else { continue };
            if let Err(source) = file.set_len(0) {
                warn!(path = %path.display(), error = %source, "failed to truncate store artifact");
                first.get_or_insert_with(|| StoreError::Io {
                    path: path.clone(),
                    source,
                });
            }
        }

        first
    }
}

impl Drop for StoreSession {
    fn drop(&mut self) {
        if self.data.is_some() || self.index_file.is_some() {
            warn!(
                data = %self.data_path.display(),
                "unfinished store session dropped, discarding output"
            );
            self.truncate_all();
        }
    }
}

fn truncate_open(path: &Path) -> Result<File, StoreError> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .map_err(StoreError::io(path))
}

fn closed(path: &Path) -> StoreError {
    StoreError::Io {
        path: path.to_path_buf(),
        source: io::Error::other("store session is closed"),
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn id(raw: &str) -> Id {
        Id::parse(raw).unwrap()
    }

    fn sizes(dir: &Path) -> (u64, u64) {
        let config = StoreConfig::default();
        (
            fs::metadata(config.data_path(dir)).unwrap().len(),
            fs::metadata(config.index_path(dir)).unwrap().len(),
        )
    }

    #[test]
    fn commit_writes_blob_and_index() {
        let dir = tempfile::tempdir().unwrap();
        let config = StoreConfig::default();

        let mut session = StoreSession::create(dir.path(), &config).unwrap();
        let a = session.write(&id("Widget.a"), &json!({"id": "Widget.a"}), false).unwrap();
        let b = session.write(&id("Widget.b"), &json!({"id": "Widget.b"}), true).unwrap();
        let summary = session.commit().unwrap();

        assert_eq!(a, IndexEntry::new(0, 17, false));
        assert_eq!(b, IndexEntry::new(18, 17, true));
        assert_eq!(summary.records, 2);
        assert_eq!(summary.data_bytes, 36);

        let data = fs::read_to_string(config.data_path(dir.path())).unwrap();
        assert_eq!(data, "{\"id\":\"Widget.a\"}\n{\"id\":\"Widget.b\"}\n");

        let index = fs::read_to_string(config.index_path(dir.path())).unwrap();
        assert_eq!(index, r#"{"Widget.a":[0,17,0],"Widget.b":[18,17,1]}"#);
    }

    #[test]
    fn duplicate_id_in_session_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = StoreSession::create(dir.path(), &StoreConfig::default()).unwrap();

        session.write(&id("Widget.a"), &json!(1), false).unwrap();
        let err = session.write(&id("Widget.a"), &json!(2), false).unwrap_err();

        assert!(matches!(err, StoreError::DuplicateId(_)));
        assert_eq!(session.len(), 1);
    }

    #[test]
    fn discard_leaves_both_files_empty() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = StoreSession::create(dir.path(), &StoreConfig::default()).unwrap();

        session.write(&id("Widget.a"), &json!({"id": "Widget.a"}), false).unwrap();
        session.discard().unwrap();

        assert_eq!(sizes(dir.path()), (0, 0));
    }

    #[test]
    fn dropping_an_unfinished_session_discards() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut session = StoreSession::create(dir.path(), &StoreConfig::default()).unwrap();
            for n in 0..64 {
                let raw = format!("Widget.w{n}");
                session.write(&id(&raw), &json!({"id": raw}), false).unwrap();
            }
        }

        assert_eq!(sizes(dir.path()), (0, 0));
    }

    #[test]
    fn create_truncates_a_previous_store() {
        let dir = tempfile::tempdir().unwrap();
        let config = StoreConfig::default();

        let mut session = StoreSession::create(dir.path(), &config).unwrap();
        session.write(&id("Widget.a"), &json!(1), false).unwrap();
        session.commit().unwrap();
        assert_ne!(sizes(dir.path()), (0, 0));

        let session = StoreSession::create(dir.path(), &config).unwrap();
        assert_eq!(sizes(dir.path()), (0, 0));
        session.discard().unwrap();
    }

    #[test]
    fn failed_blob_open_leaves_no_index() {
        let dir = tempfile::tempdir().unwrap();
        let config = StoreConfig::default();

        let mut session = StoreSession::create(dir.path(), &config).unwrap();
        session.write(&id("Widget.a"), &json!(1), false).unwrap();
        session.commit().unwrap();

        let data_path = config.data_path(dir.path());
        fs::remove_file(&data_path).unwrap();
        fs::create_dir(&data_path).unwrap();

        let err = StoreSession::create(dir.path(), &config).unwrap_err();
        assert!(matches!(err, StoreError::Io { ref path, .. } if *path == data_path));

        let index = fs::metadata(config.index_path(dir.path())).unwrap();
        assert_eq!(index.len(), 0);
    }

    #[test]
    fn failed_index_open_keeps_the_previous_blob() {
        let dir = tempfile::tempdir().unwrap();
        let config = StoreConfig::default();

        let data_path = config.data_path(dir.path());
        fs::write(&data_path, "{}\n").unwrap();
        fs::create_dir(config.index_path(dir.path())).unwrap();

        let err = StoreSession::create(dir.path(), &config).unwrap_err();
        assert!(matches!(err, StoreError::Io { ref path, .. } if *path == config.index_path(dir.path())));
        assert_eq!(fs::read_to_string(&data_path).unwrap(), "{}\n");
    }

    #[test]
    fn truncation_clears_both_files_and_repeats_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let config = StoreConfig::default();

        let mut session = StoreSession::create(dir.path(), &config).unwrap();
        session.write(&id("Widget.a"), &json!({"id": "Widget.a"}), false).unwrap();
        assert!(session.truncate_all().is_none());
        assert_eq!(sizes(dir.path()), (0, 0));
        assert!(session.is_empty());

        // a second pass over closed handles is a no-op
        assert!(session.truncate_all().is_none());
    }

    #[test]
    fn create_makes_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("out/pack");

        let session = StoreSession::create(&nested, &StoreConfig::default()).unwrap();
        session.commit().unwrap();

        assert_eq!(fs::read_to_string(nested.join("db.tpi")).unwrap(), "{}");
    }
}
