//! Infrastructure layer - external concerns

pub mod database;
pub mod import;

pub use database::{DatabaseConfig, SeaOrmReservationRepository, StorageHandle};
pub use import::{ingest_external_file, IngestOutcome};
