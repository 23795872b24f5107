//! Document source helpers
//!
//! Datasets are JSON arrays of flat objects whose values are strings or
//! null. Each dataset file holds postings for one search (for example
//! "data scientist"), so the category label is stamped onto every record
//! after loading.

pub mod host;

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use tracing::debug;

use crate::error::Result;
use crate::types::Record;

pub use host::{hosts_by_category, page_host, top_hosts};

/// Load records from a JSON array file
pub fn load_records(path: impl AsRef<Path>) -> Result<Vec<Record>> {
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);
    let records: Vec<Record> = serde_json::from_reader(reader)?;
    debug!(path = %path.display(), records = records.len(), "loaded records");
    Ok(records)
}

/// Set `field` to `label` on every record
pub fn label_records(records: &mut [Record], field: &str, label: &str) {
    for record in records {
        record.set(field, label);
    }
}
