// ============================================================
// CSV IMPORT USE CASE
// ============================================================
// Load a listing export into a document collection in one pass

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use crate::application::use_cases::hashing::fingerprint;
use crate::domain::document_entities::DocumentInput;
use crate::domain::error::{AppError, Result};
use crate::domain::laptop::{ImportOptions, ImportReport, LaptopRecord};
use crate::infrastructure::csv::{data_lines, read_source, CommaSplitParser, LineParser};
use crate::infrastructure::db::DocumentStore;

/// Records parsed from one file, before any store interaction
#[derive(Debug, Clone, Default)]
pub struct ParsedBatch {
    pub records: Vec<LaptopRecord>,
    pub lines_read: usize,
    pub empty_lines_skipped: usize,
    pub price_defaulted: usize,
    pub short_lines: usize,
}

/// Import use case bound to one document database
pub struct CsvImportUseCase {
    store: Arc<dyn DocumentStore>,
    parser: Box<dyn LineParser>,
}

impl CsvImportUseCase {
    /// Create an importer using plain comma splitting
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            parser: Box::new(CommaSplitParser::new()),
        }
    }

    /// Replace the line parser
    pub fn with_parser(mut self, parser: Box<dyn LineParser>) -> Self {
        self.parser = parser;
        self
    }

    /// Import `path` into `collection`.
    ///
    /// The file is read before anything touches the store, so an unreadable
    /// file never creates a collection. Malformed rows are imported as-is.
    /// All records go to the store in a single bulk insert.
    pub async fn import_file(
        &self,
        path: &Path,
        database: &str,
        collection: &str,
        options: ImportOptions,
    ) -> Result<ImportReport> {
        validate_collection_name(collection)?;
        let content = read_source(path)?;
        self.import_content(path, &content, database, collection, options)
            .await
    }

    /// Import already-loaded file content. `source` is only used for the report.
    pub async fn import_content(
        &self,
        source: &Path,
        content: &str,
        database: &str,
        collection: &str,
        options: ImportOptions,
    ) -> Result<ImportReport> {
        let start = Instant::now();
        validate_collection_name(collection)?;

        tracing::info!(
            path = %source.display(),
            database,
            collection,
            create_if_missing = options.create_if_missing,
            skip_duplicates = options.skip_duplicates,
            "Starting CSV import"
        );

        let collection_created = self.ensure_collection(collection, options).await?;

        let batch = self.parse_content(content);

        let (documents, duplicates_skipped) = self
            .build_documents(collection, &batch.records, options.skip_duplicates)
            .await?;

        let expected = documents.len() as u64;
        let before = self.store.count(collection).await?;
        let inserted = if documents.is_empty() {
            0
        } else {
            self.store.insert_many(collection, documents).await?
        };
        let after = self.store.count(collection).await?;

        if inserted != expected || after - before != inserted as i64 {
            tracing::warn!(
                collection,
                expected,
                inserted,
                before,
                after,
                "Document count mismatch after insert"
            );
        }

        let report = ImportReport {
            path: source.to_path_buf(),
            database: database.to_string(),
            collection: collection.to_string(),
            collection_created,
            lines_read: batch.lines_read,
            empty_lines_skipped: batch.empty_lines_skipped,
            records_parsed: batch.records.len(),
            price_defaulted: batch.price_defaulted,
            short_lines: batch.short_lines,
            duplicates_skipped,
            inserted,
            elapsed_ms: start.elapsed().as_millis() as u64,
        };

        tracing::info!(
            collection,
            inserted = report.inserted,
            lines_read = report.lines_read,
            duplicates_skipped = report.duplicates_skipped,
            price_defaulted = report.price_defaulted,
            elapsed_ms = report.elapsed_ms,
            "CSV import finished"
        );

        Ok(report)
    }

    /// Split `content` into records. The first line is treated as a header.
    pub fn parse_content(&self, content: &str) -> ParsedBatch {
        let mut batch = ParsedBatch::default();

        for line in data_lines(content) {
            batch.lines_read += 1;
            if line.is_empty() {
                batch.empty_lines_skipped += 1;
                continue;
            }

            let fields = self.parser.split(line.text);
            let parsed = LaptopRecord::from_fields(&fields);

            if parsed.price_defaulted {
                batch.price_defaulted += 1;
                tracing::debug!(
                    line = line.line_number,
                    raw = fields.get(2).map(String::as_str).unwrap_or(""),
                    "Price not numeric, stored as 0"
                );
            }
            if parsed.short_line {
                batch.short_lines += 1;
            }

            batch.records.push(parsed.record);
        }

        batch
    }

    async fn ensure_collection(&self, collection: &str, options: ImportOptions) -> Result<bool> {
        if self.store.collection_exists(collection).await? {
            return Ok(false);
        }

        if !options.create_if_missing {
            return Err(AppError::NotFound(format!(
                "Collection not found: {}",
                collection
            )));
        }

        let created = self.store.create_collection(collection).await?;
        if created {
            tracing::info!(collection, "Created collection");
        }
        Ok(created)
    }

    async fn build_documents(
        &self,
        collection: &str,
        records: &[LaptopRecord],
        skip_duplicates: bool,
    ) -> Result<(Vec<DocumentInput>, usize)> {
        let mut seen: HashSet<String> = if skip_duplicates {
            self.store.existing_hashes(collection).await?
        } else {
            HashSet::new()
        };

        let mut documents = Vec::with_capacity(records.len());
        let mut skipped = 0usize;

        for record in records {
            let body = serde_json::to_value(record).map_err(|e| {
                AppError::Internal(format!("Failed to serialize record: {}", e))
            })?;
            let content_hash = fingerprint(&body);

            if skip_duplicates && !seen.insert(content_hash.clone()) {
                skipped += 1;
                continue;
            }

            documents.push(DocumentInput { body, content_hash });
        }

        Ok((documents, skipped))
    }
}

fn validate_collection_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(AppError::ValidationError(
            "Collection name must not be empty".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::document_entities::{DocumentCollection, StoredDocument};
    use crate::infrastructure::csv::QuotedLineParser;
    use crate::infrastructure::db::{InMemoryDocumentStore, SqliteDocumentStore};
    use async_trait::async_trait;
    use std::io::Write;

    const HEADER: &str = "url,title,price,brand,ram,cpu_brand,cpu_model,gpu_model,gpu_brand,display_size,refresh_rate,resolution,storage";
    const THINKPAD: &str = "http://x.com,ThinkPad X1,1499.00,Lenovo,16GB,Intel,i7-1165G7,Intel,Iris Xe,14,60Hz,1920x1080,512GB SSD";
    const NA_PRICE: &str = "http://y.com,Aspire 5,N/A,Acer,8GB,AMD,Ryzen 5 5500U,AMD,Radeon,15.6,60Hz,1920x1080,256GB SSD";
    const EMPTY_PRICE: &str = "http://z.com,Zenbook,,Asus,16GB,Intel,i5-1240P,Intel,Iris Xe,13.3,90Hz,2880x1800,1TB SSD";

    fn write_csv(lines: &[&str]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        file
    }

    fn importer(store: &Arc<InMemoryDocumentStore>) -> CsvImportUseCase {
        CsvImportUseCase::new(store.clone())
    }

    #[tokio::test]
    async fn test_imports_one_document_per_data_line() {
        let store = Arc::new(InMemoryDocumentStore::new());
        let file = write_csv(&[HEADER, THINKPAD, NA_PRICE, EMPTY_PRICE]);

        let report = importer(&store)
            .import_file(file.path(), "shop", "laptops", ImportOptions::default())
            .await
            .unwrap();

        assert_eq!(report.inserted, 3);
        assert_eq!(report.lines_read, 3);
        assert_eq!(report.price_defaulted, 2);
        assert!(report.collection_created);
        assert_eq!(store.count("laptops").await.unwrap(), 3);

        let docs = store.find("laptops", 10).await.unwrap();
        assert_eq!(docs[0].body["url"], "http://x.com");
        assert_eq!(docs[0].body["title"], "ThinkPad X1");
        assert_eq!(docs[0].body["price"], 1499.0);
        assert_eq!(docs[0].body["gpu_model"], "Intel");
        assert_eq!(docs[0].body["gpu_brand"], "Iris Xe");
        assert_eq!(docs[0].body["storage"], "512GB SSD");
        assert_eq!(docs[1].body["price"], 0.0);
        assert_eq!(docs[2].body["price"], 0.0);
    }

    #[tokio::test]
    async fn test_valid_price_is_exact() {
        let store = Arc::new(InMemoryDocumentStore::new());
        let line = THINKPAD.replace("1499.00", "999.99");
        let file = write_csv(&[HEADER, &line]);

        importer(&store)
            .import_file(file.path(), "shop", "laptops", ImportOptions::default())
            .await
            .unwrap();

        let docs = store.find("laptops", 1).await.unwrap();
        assert_eq!(docs[0].body["price"].as_f64(), Some(999.99));
    }

    #[tokio::test]
    async fn test_header_only_inserts_nothing() {
        let store = Arc::new(InMemoryDocumentStore::new());
        let file = write_csv(&[HEADER]);

        let report = importer(&store)
            .import_file(file.path(), "shop", "laptops", ImportOptions::default())
            .await
            .unwrap();

        assert_eq!(report.inserted, 0);
        assert_eq!(store.count("laptops").await.unwrap(), 0);
        assert!(store.collection_exists("laptops").await.unwrap());
    }

    #[tokio::test]
    async fn test_second_run_doubles_by_default() {
        let store = Arc::new(InMemoryDocumentStore::new());
        let file = write_csv(&[HEADER, THINKPAD, NA_PRICE]);
        let use_case = importer(&store);

        let first = use_case
            .import_file(file.path(), "shop", "laptops", ImportOptions::default())
            .await
            .unwrap();
        let second = use_case
            .import_file(file.path(), "shop", "laptops", ImportOptions::default())
            .await
            .unwrap();

        assert!(first.collection_created);
        assert!(!second.collection_created);
        assert_eq!(second.duplicates_skipped, 0);
        assert_eq!(store.count("laptops").await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_skip_duplicates_across_runs_and_within_batch() {
        let store = Arc::new(InMemoryDocumentStore::new());
        let file = write_csv(&[HEADER, THINKPAD, THINKPAD, NA_PRICE]);
        let use_case = importer(&store);
        let options = ImportOptions::new().with_skip_duplicates(true);

        let first = use_case
            .import_file(file.path(), "shop", "laptops", options)
            .await
            .unwrap();
        assert_eq!(first.inserted, 2);
        assert_eq!(first.duplicates_skipped, 1);

        let second = use_case
            .import_file(file.path(), "shop", "laptops", options)
            .await
            .unwrap();
        assert_eq!(second.inserted, 0);
        assert_eq!(second.duplicates_skipped, 3);
        assert_eq!(store.count("laptops").await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_missing_collection_without_create() {
        let store = Arc::new(InMemoryDocumentStore::new());
        let file = write_csv(&[HEADER, THINKPAD]);
        let options = ImportOptions::new().with_create_if_missing(false);

        let err = importer(&store)
            .import_file(file.path(), "shop", "laptops", options)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
        assert!(!store.collection_exists("laptops").await.unwrap());
    }

    #[tokio::test]
    async fn test_missing_file_fails_before_any_write() {
        let store = Arc::new(InMemoryDocumentStore::new());

        let err = importer(&store)
            .import_file(
                Path::new("/no/such/export.csv"),
                "shop",
                "laptops",
                ImportOptions::default(),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::IoError(_)));
        assert!(store.list_collections().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_collection_name_rejected() {
        let store = Arc::new(InMemoryDocumentStore::new());
        let file = write_csv(&[HEADER, THINKPAD]);

        let err = importer(&store)
            .import_file(file.path(), "shop", " ", ImportOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[test]
    fn test_embedded_comma_shifts_fields() {
        let store = Arc::new(InMemoryDocumentStore::new());
        let content = format!(
            "{}\nhttp://q.com,\"Swift 3, 14 inch\",799,Acer,8GB,Intel,i5,Intel,UHD,14,60Hz,1920x1080,512GB\n",
            HEADER
        );

        let batch = importer(&store).parse_content(&content);
        let record = &batch.records[0];
        assert_eq!(record.title, "\"Swift 3");
        assert_eq!(record.price, 0.0);
        assert_eq!(record.brand, "799");
        assert_eq!(batch.short_lines, 0);
    }

    #[test]
    fn test_quoted_parser_keeps_alignment() {
        let store = Arc::new(InMemoryDocumentStore::new());
        let content = format!(
            "{}\nhttp://q.com,\"Swift 3, 14 inch\",799,Acer,8GB,Intel,i5,Intel,UHD,14,60Hz,1920x1080,512GB\n",
            HEADER
        );

        let batch = importer(&store)
            .with_parser(Box::new(QuotedLineParser::new()))
            .parse_content(&content);
        let record = &batch.records[0];
        assert_eq!(record.title, "Swift 3, 14 inch");
        assert_eq!(record.price, 799.0);
        assert_eq!(record.storage, "512GB");
    }

    #[test]
    fn test_empty_and_short_lines() {
        let store = Arc::new(InMemoryDocumentStore::new());
        let content = format!("{}\n\nhttp://a.com,Only title\n   \n", HEADER);

        let batch = importer(&store).parse_content(&content);
        assert_eq!(batch.lines_read, 3);
        assert_eq!(batch.empty_lines_skipped, 1);
        assert_eq!(batch.records.len(), 2);
        assert_eq!(batch.short_lines, 2);
        assert_eq!(batch.price_defaulted, 2);
        assert_eq!(batch.records[1].url, "   ");
    }

    #[tokio::test]
    async fn test_import_content_without_file() {
        let store = Arc::new(InMemoryDocumentStore::new());
        let content = format!("{}\n{}\n", HEADER, THINKPAD);

        let report = importer(&store)
            .import_content(
                Path::new("inline.csv"),
                &content,
                "shop",
                "laptops",
                ImportOptions::default(),
            )
            .await
            .unwrap();

        assert_eq!(report.inserted, 1);
        assert_eq!(report.path, Path::new("inline.csv"));
        assert_eq!(store.count("laptops").await.unwrap(), 1);
    }

    struct FailingStore;

    #[async_trait]
    impl DocumentStore for FailingStore {
        async fn collection_exists(&self, _name: &str) -> Result<bool> {
            Ok(true)
        }
        async fn create_collection(&self, _name: &str) -> Result<bool> {
            Ok(false)
        }
        async fn list_collections(&self) -> Result<Vec<DocumentCollection>> {
            Ok(Vec::new())
        }
        async fn insert_many(&self, _c: &str, _d: Vec<DocumentInput>) -> Result<u64> {
            Err(AppError::DatabaseError("disk full".to_string()))
        }
        async fn count(&self, _c: &str) -> Result<i64> {
            Ok(0)
        }
        async fn find(&self, _c: &str, _l: i64) -> Result<Vec<StoredDocument>> {
            Ok(Vec::new())
        }
        async fn existing_hashes(&self, _c: &str) -> Result<HashSet<String>> {
            Ok(HashSet::new())
        }
    }

    #[tokio::test]
    async fn test_store_write_error_is_surfaced() {
        let file = write_csv(&[HEADER, THINKPAD]);

        let err = CsvImportUseCase::new(Arc::new(FailingStore))
            .import_file(file.path(), "shop", "laptops", ImportOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::DatabaseError(_)));
    }

    #[tokio::test]
    async fn test_sqlite_store_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(
            SqliteDocumentStore::open(&dir.path().join("shop.db"))
                .await
                .unwrap(),
        );
        let file = write_csv(&[HEADER, THINKPAD, NA_PRICE]);
        let use_case = CsvImportUseCase::new(store.clone());

        for _ in 0..2 {
            use_case
                .import_file(file.path(), "shop", "laptops", ImportOptions::default())
                .await
                .unwrap();
        }

        assert_eq!(store.count("laptops").await.unwrap(), 4);
        let docs = store.find("laptops", 1).await.unwrap();
        assert_eq!(docs[0].body["ram"], "16GB");
        assert_eq!(docs[0].body["price"], 1499.0);
    }
}
