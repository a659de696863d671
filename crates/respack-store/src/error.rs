use crate::ThisError;
use respack_core::{id::Id, validate::ValidateError};
use std::{io, path::PathBuf};

///
/// StoreError
///

#[derive(Debug, ThisError)]
#[remain::sorted]
pub enum StoreError {
    #[error("store is corrupt: {0}")]
    Corrupt(String),

    #[error("{0} => id conflict in store session")]
    DuplicateId(Id),

    #[error("failed to encode store data: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("store i/o error on '{path}': {source}")]
    Io { path: PathBuf, source: io::Error },

    #[error("store at '{0}' has no committed index")]
    NotCommitted(PathBuf),

    #[error(transparent)]
    Validate(#[from] ValidateError),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> Self {
        let path = path.into();

        move |source| Self::Io { path, source }
    }

    pub(crate) fn corrupt(message: impl Into<String>) -> Self {
        Self::Corrupt(message.into())
    }
}
