use std::path::PathBuf;

use clap::Parser;

use crate::infrastructure::config::{ParserKind, Settings};

#[derive(Parser, Debug)]
#[command(
    name = "laptop-import",
    about = "Load a laptop listing CSV export into a document collection"
)]
pub struct ImportCli {
    /// CSV export to load; the first line is a header and is skipped
    pub path: PathBuf,

    /// Target database name (stored as <data-dir>/<name>.db)
    #[arg(long)]
    pub database: String,

    /// Target collection inside the database
    #[arg(long)]
    pub collection: String,

    /// Create a missing collection even if config turns that off
    #[arg(long, conflicts_with = "no_create")]
    pub create: bool,

    /// Fail instead of creating a missing collection
    #[arg(long)]
    pub no_create: bool,

    /// Skip rows whose content already exists in the collection
    #[arg(long)]
    pub skip_duplicates: bool,

    /// Honour double-quoted fields instead of plain comma splitting
    #[arg(long)]
    pub quoted: bool,

    /// Directory holding database files
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Config file (defaults to ./laptop_import.toml when present)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl ImportCli {
    /// Flags win over file and environment settings, but only when given.
    pub fn apply(&self, settings: &mut Settings) {
        if self.create {
            settings.create_if_missing = true;
        }
        if self.no_create {
            settings.create_if_missing = false;
        }
        if self.skip_duplicates {
            settings.skip_duplicates = true;
        }
        if self.quoted {
            settings.parser = ParserKind::Quoted;
        }
        if let Some(dir) = &self.data_dir {
            settings.data_dir = dir.clone();
        }
    }
}
