use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::error::{AppError, Result};

const DATABASE_EXTENSION: &str = "db";

pub fn ensure_data_dir(data_dir: &Path) -> std::io::Result<PathBuf> {
    ensure_dir(data_dir)?;
    Ok(data_dir.to_path_buf())
}

/// File backing a logical database name: `<data_dir>/<name>.db`.
pub fn database_path(data_dir: &Path, database_name: &str) -> Result<PathBuf> {
    validate_database_name(database_name)?;
    Ok(data_dir.join(format!("{}.{}", database_name.trim(), DATABASE_EXTENSION)))
}

/// Database names become file names, so they must stay a single path component.
pub fn validate_database_name(name: &str) -> Result<()> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(AppError::ValidationError(
            "Database name must not be empty".to_string(),
        ));
    }
    if trimmed.contains(['/', '\\']) || trimmed == "." || trimmed.contains("..") {
        return Err(AppError::ValidationError(format!(
            "Database name must not contain path separators: {}",
            name
        )));
    }
    Ok(())
}

fn ensure_dir(path: &Path) -> std::io::Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}
