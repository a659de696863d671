use serde::Serialize;
use std::collections::BTreeMap;

///
/// StoreReport
/// Summary of one committed store.
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct StoreReport {
    pub records: usize,
    pub data_bytes: u64,
    pub index_bytes: u64,
    pub cached: usize,
    pub by_type: BTreeMap<String, usize>,
}

impl StoreReport {
    pub(crate) fn record(&mut self, type_name: &str, cached: bool) {
        self.records += 1;
        if cached {
            self.cached += 1;
        }
        *self.by_type.entry(type_name.to_string()).or_default() += 1;
    }
}
