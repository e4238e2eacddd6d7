use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteSynchronous,
};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use crate::domain::error::{AppError, Result};

const DOCSTORE_SCHEMA: &str = include_str!("../../../resources/docstore/schema.sql");

const DOCSTORE_SCHEMA_VERSION: i32 = 1;

/// Open (creating if needed) a document database file and bring its schema
/// up to the supported version.
pub async fn init_document_db(db_path: &Path) -> Result<SqlitePool> {
    let pool = connect_pool(db_path).await?;

    // If DB is newer than this build expects, fail fast.
    let current_version = read_user_version(&pool).await?;
    if current_version > DOCSTORE_SCHEMA_VERSION {
        return Err(AppError::DatabaseError(format!(
            "Document database schema too new: db user_version={} > supported_version={}",
            current_version, DOCSTORE_SCHEMA_VERSION
        )));
    }

    apply_schema(&pool).await?;
    set_user_version(&pool, DOCSTORE_SCHEMA_VERSION).await?;

    sqlx::query("SELECT 1")
        .execute(&pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Document database health check failed: {e}")))?;

    tracing::debug!(
        db_path = %db_path.display(),
        version = DOCSTORE_SCHEMA_VERSION,
        "Document database ready"
    );

    Ok(pool)
}

fn db_path_to_url(db_path: &Path) -> Result<String> {
    let db_path_str = db_path.to_str().ok_or_else(|| {
        AppError::DatabaseError("Document database path is not valid UTF-8".to_string())
    })?;
    Ok(format!("sqlite://{}", db_path_str.replace('\\', "/")))
}

async fn connect_pool(db_path: &Path) -> Result<SqlitePool> {
    let db_url = db_path_to_url(db_path)?;
    let options = SqliteConnectOptions::from_str(&db_url)
        .map_err(|e| AppError::DatabaseError(format!("Failed to parse document DB URL: {e}")))?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .busy_timeout(Duration::from_secs(5));

    SqlitePoolOptions::new()
        .max_connections(4)
        .acquire_timeout(Duration::from_secs(5))
        .connect_with(options)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to connect document DB: {e}")))
}

async fn apply_schema(pool: &SqlitePool) -> Result<()> {
    for stmt in split_sql_statements(DOCSTORE_SCHEMA) {
        sqlx::query(&stmt)
            .execute(pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to apply schema statement: {e}")))?;
    }
    Ok(())
}

async fn read_user_version(pool: &SqlitePool) -> Result<i32> {
    sqlx::query_scalar("PRAGMA user_version")
        .fetch_one(pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to read PRAGMA user_version: {e}")))
}

async fn set_user_version(pool: &SqlitePool, version: i32) -> Result<()> {
    let sql = format!("PRAGMA user_version = {}", version);
    sqlx::query(&sql)
        .execute(pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to set PRAGMA user_version: {e}")))?;
    Ok(())
}

/// Split a schema file into statements. Line comments are dropped; the
/// schema has no triggers or string literals containing `;`.
fn split_sql_statements(sql: &str) -> Vec<String> {
    let without_comments: String = sql
        .lines()
        .map(|line| match line.find("--") {
            Some(pos) => &line[..pos],
            None => line,
        })
        .collect::<Vec<_>>()
        .join("\n");

    without_comments
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
