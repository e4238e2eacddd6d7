use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use crate::application::CsvImportUseCase;
use crate::domain::error::{AppError, Result};
use crate::domain::laptop::{ImportOptions, ImportReport};
use crate::infrastructure::bootstrap::open_document_store;
use crate::infrastructure::config::Settings;
use crate::infrastructure::csv::read_source;
use crate::infrastructure::storage::validate_database_name;
use crate::interfaces::cli::ImportCli;

/// Import `path` into `collection` of `database` with default options:
/// create the collection when missing, keep duplicates.
///
/// Uses [`Settings::default`]: databases live under `./data` and lines are
/// split on plain commas. No config file or environment variable is read.
pub async fn import_csv(path: &Path, database: &str, collection: &str) -> Result<ImportReport> {
    import_csv_with(path, database, collection, ImportOptions::default()).await
}

pub async fn import_csv_with(
    path: &Path,
    database: &str,
    collection: &str,
    options: ImportOptions,
) -> Result<ImportReport> {
    import_with_settings(&Settings::default(), path, database, collection, options).await
}

/// The source file is read before the data directory or database file is
/// created, so a bad path leaves nothing behind.
pub async fn import_with_settings(
    settings: &Settings,
    path: &Path,
    database: &str,
    collection: &str,
    options: ImportOptions,
) -> Result<ImportReport> {
    validate_database_name(database)?;
    let content = read_source(path)?;

    let store = Arc::new(open_document_store(settings, database).await?);
    let use_case = CsvImportUseCase::new(store.clone()).with_parser(settings.parser.build());

    let result = use_case
        .import_content(path, &content, database, collection, options)
        .await;
    store.close().await;
    result
}

pub fn run() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cli = ImportCli::parse();

    let settings = match Settings::load(cli.config.as_deref()) {
        Ok(mut settings) => {
            cli.apply(&mut settings);
            settings
        }
        Err(err) => {
            init_tracing(&Settings::default().log_filter);
            error!(error = %err, "Failed to load configuration");
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };
    init_tracing(&settings.log_filter);

    match execute(&cli, &settings) {
        Ok(report) => {
            println!("{}", report.summary());
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(error = %err, path = %cli.path.display(), "Import failed");
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn execute(cli: &ImportCli, settings: &Settings) -> Result<ImportReport> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| AppError::Internal(format!("Failed to start runtime: {}", e)))?;

    runtime.block_on(import_with_settings(
        settings,
        &cli.path,
        &cli.database,
        &cli.collection,
        settings.import_options(),
    ))
}

/// RUST_LOG wins over the configured filter.
fn init_tracing(fallback: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
