//! ## Crate layout
//! - `core`: identifiers, records, the registry, validators, tables.
//! - `config`: TOML build configuration.
//! - `store`: the transactional two-file store writer and its reader.
//!
//! A build declares every record into a [`Registry`](core::registry::Registry),
//! then hands it to [`build`], which freezes it and writes the store.

pub use respack_config as config;
pub use respack_core as core;
pub use respack_store as store;

mod error;

pub use error::{DeclareErrorKind, Error, ErrorKind, ErrorOrigin, ValidateErrorKind};

use respack_config::BuildConfig;
use respack_core::registry::Registry;
use respack_store::StoreReport;
use tracing::info;

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Freeze the registry and write the store into `config.output_dir`.
pub fn build(registry: Registry, config: &BuildConfig) -> Result<StoreReport, Error> {
    config.validate()?;

    let registry = registry.freeze();
    let report = respack_store::write_all(&registry, &config.output_dir, &config.store)?;

    info!(
        output_dir = %config.output_dir.display(),
        records = report.records,
        data_bytes = report.data_bytes,
        "build finished"
    );

    Ok(report)
}

///
/// Prelude
/// Everything a schema crate needs to declare records and run a build.
///

pub mod prelude {
    pub use crate::{Error, build};
    pub use respack_config::BuildConfig;
    pub use respack_core::prelude::*;
    pub use respack_store::{StoreReader, StoreReport};
}
