use crate::{error::StoreError, report::StoreReport, session::StoreSession};
use respack_config::StoreConfig;
use respack_core::registry::FrozenRegistry;
use std::path::Path;
use tracing::{info, warn};

/// Serialize every record in registration order and persist the store.
///
/// All or nothing: the first serialization or I/O failure discards the
/// session, so both artifacts are left empty.
pub fn write_all(
    registry: &FrozenRegistry,
    dir: &Path,
    config: &StoreConfig,
) -> Result<StoreReport, StoreError> {
    let mut session = StoreSession::create(dir, config)?;
    let mut report = StoreReport::default();

    let written = registry.records().try_for_each(|record| {
        let value = record.serialize(registry)?;
        let cached = record.cache().unwrap_or(false);
        session.write(record.id(), &value, cached)?;
        report.record(record.type_name(), cached);

        Ok::<_, StoreError>(())
    });

    if let Err(err) = written {
        warn!(error = %err, "store write aborted");
        if let Err(discard_err) = session.discard() {
            warn!(error = %discard_err, "failed to discard store session");
        }
        return Err(err);
    }

    let summary = session.commit()?;
    report.data_bytes = summary.data_bytes;
    report.index_bytes = summary.index_bytes;

    info!(
        records = report.records,
        cached = report.cached,
        types = report.by_type.len(),
        "store written"
    );

    Ok(report)
}

///
/// TESTS
///
