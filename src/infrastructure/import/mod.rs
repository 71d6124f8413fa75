//! External CSV import file

pub mod csv_import;

pub use csv_import::{archive_import_file, ingest_external_file, parse_import, IngestOutcome};
