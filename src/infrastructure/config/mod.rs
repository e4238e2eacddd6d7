use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::domain::error::{AppError, Result};
use crate::domain::laptop::ImportOptions;
use crate::infrastructure::csv::{CommaSplitParser, LineParser, QuotedLineParser};

pub const DEFAULT_CONFIG_FILE: &str = "laptop_import.toml";
pub const ENV_PREFIX: &str = "LAPTOP_IMPORT_";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParserKind {
    /// Plain split on commas, no quoting
    Comma,
    /// Quote-aware splitting
    Quoted,
}

impl ParserKind {
    pub fn build(self) -> Box<dyn LineParser> {
        match self {
            ParserKind::Comma => Box::new(CommaSplitParser::new()),
            ParserKind::Quoted => Box::new(QuotedLineParser::new()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Directory holding one `<database>.db` file per database name
    pub data_dir: PathBuf,
    /// Fallback tracing filter when RUST_LOG is unset
    pub log_filter: String,
    pub create_if_missing: bool,
    pub skip_duplicates: bool,
    pub parser: ParserKind,
}

impl Default for Settings {
    fn default() -> Self {
        let options = ImportOptions::default();
        Self {
            data_dir: PathBuf::from("data"),
            log_filter: "info".to_string(),
            create_if_missing: options.create_if_missing,
            skip_duplicates: options.skip_duplicates,
            parser: ParserKind::Comma,
        }
    }
}

impl Settings {
    /// Defaults, then the TOML file (if present), then `LAPTOP_IMPORT_*` env vars.
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        let file = config_file
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

        if config_file.is_some() && !file.exists() {
            return Err(AppError::ConfigError(format!(
                "Config file not found: {}",
                file.display()
            )));
        }

        Self::figment(&file)
            .extract::<Settings>()
            .map_err(AppError::from)
    }

    fn figment(file: &Path) -> Figment {
        Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file(file))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    pub fn import_options(&self) -> ImportOptions {
        ImportOptions::new()
            .with_create_if_missing(self.create_if_missing)
            .with_skip_duplicates(self.skip_duplicates)
    }
}

impl From<figment::Error> for AppError {
    fn from(err: figment::Error) -> Self {
        AppError::ConfigError(err.to_string())
    }
}
