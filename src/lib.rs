//! # Reservation Ledger
//!
//! A small hotel reservation ledger over a single SQLite table: paginated
//! listing, validated creation, ingestion of an external CSV file and export
//! as CSV or JSON.
//!
//! ## Architecture
//!
//! - **domain**: the `Reservation` record, input validation, repository trait
//! - **application**: the ledger service (init/seed guard, import step) and exporters
//! - **infrastructure**: SQLite storage via SeaORM, CSV ingestion
//! - **interfaces**: HTTP API (axum)
//! - **server**: runtime lifecycle and tracing setup
//! - **shared**: error and pagination types, shutdown signal

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig, ConfigError};

pub use application::LedgerService;
pub use domain::{DomainError, DomainResult, Reservation};
pub use infrastructure::{DatabaseConfig, SeaOrmReservationRepository};
pub use interfaces::http::create_api_router;
