pub mod export;
pub mod services;

// Re-export key types for convenience
pub use export::{export_csv, export_filename, export_json};
pub use services::LedgerService;
