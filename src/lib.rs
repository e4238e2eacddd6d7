pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;

mod app;

pub use app::{import_csv, import_csv_with, import_with_settings, run};
pub use application::CsvImportUseCase;
pub use domain::error::{AppError, Result};
pub use domain::laptop::{ImportOptions, ImportReport, LaptopRecord};
