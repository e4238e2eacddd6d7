// ============================================================
// CSV INFRASTRUCTURE LAYER
// ============================================================
// File loading and line splitting

mod line_parser;
mod source_file;

pub use line_parser::{CommaSplitParser, LineParser, QuotedLineParser};
pub use source_file::{data_lines, read_source, DataLine};
