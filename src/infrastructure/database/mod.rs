pub mod entities;
pub mod repositories;
pub mod schema;

use std::path::{Path, PathBuf};

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::{debug, warn};

use crate::domain::{DomainError, DomainResult};

pub use repositories::SeaOrmReservationRepository;

/// Database configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// SQLite database file (created on first open)
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self::sqlite(Path::new("data/reservas.db"))
    }
}

impl DatabaseConfig {
    /// Create config for SQLite
    pub fn sqlite(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Connection URL (e.g., "sqlite://data/reservas.db?mode=rwc")
    pub fn url(&self) -> String {
        format!("sqlite://{}?mode=rwc", self.path.display())
    }
}

/// A connection scoped to one ledger operation.
///
/// Opened at the start of an operation and closed before it returns; nothing
/// holds a handle across operations.
pub struct StorageHandle {
    conn: DatabaseConnection,
}

impl StorageHandle {
    pub async fn open(config: &DatabaseConfig) -> DomainResult<Self> {
        if let Some(parent) = config.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                DomainError::StorageUnavailable(format!(
                    "cannot create {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let mut opts = ConnectOptions::new(config.url());
        opts.max_connections(1).min_connections(1).sqlx_logging(false);

        let conn = Database::connect(opts).await.map_err(|e| {
            DomainError::StorageUnavailable(format!(
                "cannot open {}: {}",
                config.path.display(),
                e
            ))
        })?;
        debug!("Opened storage handle for {}", config.path.display());
        Ok(Self { conn })
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.conn
    }

    pub async fn close(self) {
        if let Err(e) = self.conn.close().await {
            warn!("Error closing database connection: {}", e);
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use tempfile::TempDir;

    use super::DatabaseConfig;

    /// A database file inside a temp dir that lives as long as the guard.
    pub struct TempDatabase {
        pub config: DatabaseConfig,
        _dir: TempDir,
    }

    impl TempDatabase {
        pub fn new() -> Self {
            let dir = tempfile::tempdir().expect("temp dir");
            let config = DatabaseConfig::sqlite(dir.path().join("data").join("reservas.db"));
            Self { config, _dir: dir }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::TempDatabase;
    use super::*;

    #[test]
    fn url_uses_rwc_mode() {
        let cfg = DatabaseConfig::sqlite("data/reservas.db");
        assert_eq!(cfg.url(), "sqlite://data/reservas.db?mode=rwc");
    }

    #[tokio::test]
    async fn open_creates_missing_directory_and_file() {
        let db = TempDatabase::new();
        assert!(!db.config.path.exists());

        let handle = StorageHandle::open(&db.config).await.unwrap();
        handle.close().await;

        assert!(db.config.path.exists());
    }

    #[tokio::test]
    async fn open_fails_when_location_is_unusable() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, b"file").unwrap();

        let cfg = DatabaseConfig::sqlite(blocker.join("reservas.db"));
        let err = StorageHandle::open(&cfg).await.err().unwrap();
        assert!(matches!(err, DomainError::StorageUnavailable(_)));
    }
}
