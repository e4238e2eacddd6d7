use tracing::error;

use crate::domain::error::Result;
use crate::infrastructure::config::Settings;
use crate::infrastructure::db::SqliteDocumentStore;
use crate::infrastructure::storage::{database_path, ensure_data_dir};

/// Open the document database backing `database`, creating the data
/// directory and database file as needed.
pub async fn open_document_store(settings: &Settings, database: &str) -> Result<SqliteDocumentStore> {
    let data_dir = ensure_data_dir(&settings.data_dir).map_err(|err| {
        error!(
            error = %err,
            data_dir = %settings.data_dir.display(),
            "Failed to create data dir"
        );
        err
    })?;

    let db_path = database_path(&data_dir, database)?;
    SqliteDocumentStore::open(&db_path).await.map_err(|err| {
        error!(error = %err, db_path = %db_path.display(), "Failed to open document database");
        err
    })
}
