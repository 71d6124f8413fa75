//! Reservation ledger service
//!
//! Owns the "ready" precondition that runs before every ledger request:
//! schema creation and seeding once per process, then the import step
//! according to the configured [`ImportMode`].

use std::path::Path;
use std::sync::Arc;

use tokio::sync::{Mutex, OnceCell};
use tracing::{info, warn};

use crate::config::{AppConfig, ImportMode, ImportSettings, PaginationSettings};
use crate::domain::{
    DomainError, DomainResult, NewReservation, Reservation, ReservationFields, ReservationRepository,
};
use crate::infrastructure::import::{archive_import_file, ingest_external_file, IngestOutcome};
use crate::infrastructure::SeaOrmReservationRepository;
use crate::shared::types::{PageRequest, PaginatedResult};

/// Service for ledger operations
pub struct LedgerService {
    repo: Arc<dyn ReservationRepository>,
    import: ImportSettings,
    pagination: PaginationSettings,
    initialized: OnceCell<()>,
    /// Serializes imports; `true` once a file has been ingested.
    imported: Mutex<bool>,
}

impl LedgerService {
    pub fn new(
        repo: Arc<dyn ReservationRepository>,
        import: ImportSettings,
        pagination: PaginationSettings,
    ) -> Self {
        Self {
            repo,
            import,
            pagination,
            initialized: OnceCell::new(),
            imported: Mutex::new(false),
        }
    }

    /// Build the service over the SQLite database named in `config`.
    pub fn from_config(config: &AppConfig) -> Self {
        let repo = SeaOrmReservationRepository::new(config.database.to_database_config());
        Self::new(
            Arc::new(repo),
            config.import.clone(),
            config.pagination.clone(),
        )
    }

    pub fn repository(&self) -> &Arc<dyn ReservationRepository> {
        &self.repo
    }

    pub fn default_per_page(&self) -> u32 {
        self.pagination.default_per_page
    }

    /// Create the table and seed demo data, once per process.
    ///
    /// A failure leaves the guard unset so the next call retries.
    pub async fn initialize(&self) -> DomainResult<()> {
        self.initialized
            .get_or_try_init(|| async {
                self.repo.ensure_schema().await?;
                let seeded = self.repo.seed_if_empty().await?;
                info!("Ledger initialized ({} demo rows seeded)", seeded);
                Ok::<(), DomainError>(())
            })
            .await
            .map(|_| ())
    }

    /// Per-request precondition: initialize, then run the import step.
    ///
    /// Only storage initialization errors are returned; import problems are
    /// logged and the request goes on without the imported rows.
    pub async fn prepare(&self) -> DomainResult<()> {
        self.initialize().await?;
        self.run_import().await;
        Ok(())
    }

    /// Best-effort import according to the configured mode.
    pub async fn run_import(&self) -> Option<IngestOutcome> {
        let mut imported = self.imported.lock().await;
        match self.import.mode {
            ImportMode::Disabled => return None,
            ImportMode::Once if *imported => return None,
            ImportMode::Once | ImportMode::EveryRequest => {}
        }

        match self.ingest(&self.import.path).await {
            Ok(outcome) => {
                if matches!(outcome, IngestOutcome::Ingested { .. }) {
                    *imported = true;
                }
                Some(outcome)
            }
            Err(e) => {
                warn!("Import CSV failed: {}", e);
                None
            }
        }
    }

    /// Ingest `path` (or the configured import file) now, regardless of mode.
    /// Errors are returned instead of logged.
    pub async fn import_now(&self, path: Option<&Path>) -> DomainResult<IngestOutcome> {
        self.initialize().await?;
        let _guard = self.imported.lock().await;
        self.ingest(path.unwrap_or(&self.import.path)).await
    }

    async fn ingest(&self, path: &Path) -> DomainResult<IngestOutcome> {
        let outcome = ingest_external_file(self.repo.as_ref(), path).await?;
        if self.import.archive_processed && matches!(outcome, IngestOutcome::Ingested { .. }) {
            let now = chrono::Local::now().naive_local();
            if let Err(e) = archive_import_file(path, now).await {
                warn!("{}", e);
            }
        }
        Ok(outcome)
    }

    /// Validate and insert a new reservation; returns its id.
    pub async fn create(&self, fields: ReservationFields) -> DomainResult<i32> {
        let reservation = NewReservation::from_fields(fields)?;
        let id = self.repo.insert(reservation).await?;
        info!("Reservation {} created", id);
        Ok(id)
    }

    /// One page of the ledger, newest first, with the total row count.
    pub async fn list(&self, page: i64, per_page: i64) -> DomainResult<PaginatedResult<Reservation>> {
        let request = PageRequest::new(page, per_page, self.pagination.default_per_page)
            .capped(self.pagination.max_per_page);
        let total = self.repo.count().await?;
        let items = self.repo.find_page(request).await?;
        Ok(PaginatedResult::new(items, total, request))
    }

    /// The whole ledger, newest first.
    pub async fn list_all(&self) -> DomainResult<Vec<Reservation>> {
        self.repo.find_all().await
    }
}
