// ============================================================
// LAPTOP DOMAIN LAYER
// ============================================================
// Core types for the listing import
// No I/O, no async

mod import_options;
mod import_report;
mod laptop_record;

pub use import_options::ImportOptions;
pub use import_report::ImportReport;
pub use laptop_record::{
    parse_price, LaptopRecord, ParsedRecord, FIELD_COUNT, FIELD_NAMES,
};
