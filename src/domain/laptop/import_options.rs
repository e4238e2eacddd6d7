// ============================================================
// IMPORT OPTIONS
// ============================================================
// Caller-controlled side effects of an import run

use serde::{Deserialize, Serialize};

/// Options for a single import run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportOptions {
    /// Create the target collection when it does not exist (default: true)
    pub create_if_missing: bool,

    /// Skip records whose content already exists in the collection (default: false)
    pub skip_duplicates: bool,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            create_if_missing: true,
            skip_duplicates: false,
        }
    }
}

impl ImportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_create_if_missing(mut self, create: bool) -> Self {
        self.create_if_missing = create;
        self
    }

    pub fn with_skip_duplicates(mut self, skip: bool) -> Self {
        self.skip_duplicates = skip;
        self
    }
}
