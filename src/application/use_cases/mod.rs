pub mod csv_import;
pub(crate) mod hashing;
