// ============================================================
// IMPORT REPORT
// ============================================================
// Counters collected over one import run

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Result of an import run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportReport {
    pub path: PathBuf,
    pub database: String,
    pub collection: String,

    /// The collection did not exist before this run
    pub collection_created: bool,

    /// Data lines after the header, empty ones included
    pub lines_read: usize,

    pub empty_lines_skipped: usize,

    pub records_parsed: usize,

    /// Records whose price resolved to 0 by fallback
    pub price_defaulted: usize,

    /// Lines with fewer fields than a full record
    pub short_lines: usize,

    pub duplicates_skipped: usize,

    pub inserted: u64,

    pub elapsed_ms: u64,
}

impl ImportReport {
    pub fn summary(&self) -> String {
        format!(
            "Imported {} document(s) into {}.{} from {} ({} line(s) read, {} empty, {} duplicate(s) skipped, {} price default(s), {} short line(s)) in {} ms",
            self.inserted,
            self.database,
            self.collection,
            self.path.display(),
            self.lines_read,
            self.empty_lines_skipped,
            self.duplicates_skipped,
            self.price_defaulted,
            self.short_lines,
            self.elapsed_ms
        )
    }
}
