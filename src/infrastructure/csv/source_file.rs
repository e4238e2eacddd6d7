// ============================================================
// SOURCE FILE
// ============================================================
// Load an export into memory and walk its data lines

use std::path::Path;

use crate::domain::error::{AppError, Result};

/// Read the whole file as UTF-8 text, stripping a leading byte-order mark.
pub fn read_source(path: &Path) -> Result<String> {
    let buffer = std::fs::read(path).map_err(|e| {
        AppError::IoError(format!("Failed to read {}: {}", path.display(), e))
    })?;

    let (content, had_errors) = encoding_rs::UTF_8.decode_with_bom_removal(&buffer);
    if had_errors {
        return Err(AppError::IoError(format!(
            "{} is not valid UTF-8",
            path.display()
        )));
    }

    Ok(content.into_owned())
}

/// A line after the header, with its 1-based position in the file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataLine<'a> {
    pub line_number: usize,
    pub text: &'a str,
}

impl DataLine<'_> {
    /// Only a zero-length line counts; whitespace-only lines still become records.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Every line except the first (header) one. `\r\n` endings are accepted.
pub fn data_lines(content: &str) -> impl Iterator<Item = DataLine<'_>> {
    content
        .lines()
        .enumerate()
        .skip(1)
        .map(|(idx, text)| DataLine {
            line_number: idx + 1,
            text,
        })
}
