// ============================================================
// LINE PARSERS
// ============================================================
// Split one data line into positional fields

use csv::{ReaderBuilder, StringRecord, Trim};

/// Splits a single line of input into raw field values.
///
/// The importer only sees the returned fields, so a parser can be swapped
/// without touching record mapping or the insert path.
pub trait LineParser: Send + Sync {
    fn split(&self, line: &str) -> Vec<String>;
}

/// Plain split on commas.
///
/// There is no quoting or escaping: a value that itself contains a comma is
/// cut in two and every later field shifts one position to the right. Rows
/// affected this way are still imported, with misaligned values.
#[derive(Debug, Clone, Default)]
pub struct CommaSplitParser;

impl CommaSplitParser {
    pub fn new() -> Self {
        Self
    }
}

impl LineParser for CommaSplitParser {
    fn split(&self, line: &str) -> Vec<String> {
        line.split(',').map(str::to_string).collect()
    }
}

/// Quote-aware parser backed by the `csv` crate.
///
/// Handles `"a, b"` style fields and doubled quotes. A quoted value that
/// spans several physical lines is not supported because input is split into
/// lines before parsing.
#[derive(Debug, Clone, Default)]
pub struct QuotedLineParser;

impl QuotedLineParser {
    pub fn new() -> Self {
        Self
    }

    fn read_record(&self, line: &str) -> Option<StringRecord> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .delimiter(b',')
            .trim(Trim::None)
            .flexible(true)
            .from_reader(line.as_bytes());

        let mut record = StringRecord::new();
        match reader.read_record(&mut record) {
            Ok(true) => Some(record),
            _ => None,
        }
    }
}

impl LineParser for QuotedLineParser {
    fn split(&self, line: &str) -> Vec<String> {
        match self.read_record(line) {
            Some(record) => record.iter().map(str::to_string).collect(),
            // Unbalanced input falls back to a plain split
            None => CommaSplitParser.split(line),
        }
    }
}
