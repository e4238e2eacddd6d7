// ============================================================
// LAPTOP RECORD
// ============================================================
// One listing row, mapped positionally from a split CSV line

use serde::{Deserialize, Serialize};

/// Number of positional fields expected on every data line
pub const FIELD_COUNT: usize = 13;

/// Attribute names in input column order.
///
/// `gpu_model` precedes `gpu_brand`, unlike the cpu pair. The exports this
/// loader consumes are laid out that way and the order is kept as-is.
pub const FIELD_NAMES: [&str; FIELD_COUNT] = [
    "url",
    "title",
    "price",
    "brand",
    "ram",
    "cpu_brand",
    "cpu_model",
    "gpu_model",
    "gpu_brand",
    "display_size",
    "refresh_rate",
    "resolution",
    "storage",
];

const PRICE_INDEX: usize = 2;

/// A single laptop listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaptopRecord {
    pub url: String,
    pub title: String,
    pub price: f64,
    pub brand: String,
    pub ram: String,
    pub cpu_brand: String,
    pub cpu_model: String,
    pub gpu_model: String,
    pub gpu_brand: String,
    pub display_size: String,
    pub refresh_rate: String,
    pub resolution: String,
    pub storage: String,
}

/// Outcome of mapping one line of fields
#[derive(Debug, Clone)]
pub struct ParsedRecord {
    pub record: LaptopRecord,

    /// Price fell back to 0 because the raw value was missing or unparseable
    pub price_defaulted: bool,

    /// Line carried fewer than [`FIELD_COUNT`] fields
    pub short_line: bool,
}

impl LaptopRecord {
    /// Map positional fields onto a record.
    ///
    /// Missing trailing fields become empty strings and extra fields are
    /// dropped. Nothing here can fail; a misaligned line simply produces a
    /// record with shifted values.
    pub fn from_fields<S: AsRef<str>>(fields: &[S]) -> ParsedRecord {
        let field = |idx: usize| -> String {
            fields
                .get(idx)
                .map(|s| s.as_ref().to_string())
                .unwrap_or_default()
        };

        let (price, price_defaulted) = match fields.get(PRICE_INDEX) {
            Some(raw) => match parse_price(raw.as_ref()) {
                Some(value) => (value, false),
                None => (0.0, true),
            },
            None => (0.0, true),
        };

        let record = Self {
            url: field(0),
            title: field(1),
            price,
            brand: field(3),
            ram: field(4),
            cpu_brand: field(5),
            cpu_model: field(6),
            gpu_model: field(7),
            gpu_brand: field(8),
            display_size: field(9),
            refresh_rate: field(10),
            resolution: field(11),
            storage: field(12),
        };

        ParsedRecord {
            record,
            price_defaulted,
            short_line: fields.len() < FIELD_COUNT,
        }
    }
}

/// Parse a raw price value, returning `None` when it has to fall back to 0.
///
/// Non-finite values ("NaN", "inf") are rejected since they have no JSON form.
pub fn parse_price(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}
