//! SeaORM implementation of ReservationRepository

use async_trait::async_trait;
use sea_orm::{
    ConnectionTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, QuerySelect,
    Select, Set, Statement, TransactionTrait,
};
use tracing::{debug, info};

use crate::domain::reservation::{demo_reservations, NewReservation, Reservation, ReservationRepository};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::reservation;
use crate::infrastructure::database::{schema, DatabaseConfig, StorageHandle};
use crate::shared::types::PageRequest;

pub struct SeaOrmReservationRepository {
    config: DatabaseConfig,
}

impl SeaOrmReservationRepository {
    pub fn new(config: DatabaseConfig) -> Self {
        Self { config }
    }

    async fn open(&self) -> DomainResult<StorageHandle> {
        StorageHandle::open(&self.config).await
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: reservation::Model) -> Reservation {
    Reservation {
        id: m.id,
        name: m.nombre,
        email: m.correo,
        phone: m.telefono,
        arrival_date: m.fecha_llegada,
        departure_date: m.fecha_salida,
        room_count: m.habitaciones,
        total_amount: m.total,
        created_at: m.created_at,
    }
}

fn to_active_model(r: NewReservation) -> reservation::ActiveModel {
    reservation::ActiveModel {
        nombre: Set(r.name),
        correo: Set(Some(r.email)),
        telefono: Set(Some(r.phone)),
        fecha_llegada: Set(Some(r.arrival_date)),
        fecha_salida: Set(Some(r.departure_date)),
        habitaciones: Set(Some(r.room_count)),
        total: Set(Some(r.total_amount)),
        ..Default::default()
    }
}

fn newest_first() -> Select<reservation::Entity> {
    reservation::Entity::find()
        .order_by_desc(reservation::Column::CreatedAt)
        .order_by_desc(reservation::Column::Id)
}

/// Rows per `INSERT` statement. Seven bind variables per row keeps every
/// statement under SQLite's oldest host-parameter limit (999).
const INSERT_CHUNK_ROWS: usize = 100;

/// Insert every row or none: chunks share one transaction.
async fn insert_batch(
    db: &DatabaseConnection,
    reservations: Vec<NewReservation>,
) -> DomainResult<u64> {
    if reservations.is_empty() {
        return Ok(0);
    }
    let inserted = reservations.len() as u64;

    let txn = db.begin().await?;
    let mut rows = reservations.into_iter().map(to_active_model).peekable();
    while rows.peek().is_some() {
        let chunk: Vec<_> = rows.by_ref().take(INSERT_CHUNK_ROWS).collect();
        reservation::Entity::insert_many(chunk).exec(&txn).await?;
    }
    txn.commit().await?;

    Ok(inserted)
}

// ── ReservationRepository impl ──────────────────────────────────

#[async_trait]
impl ReservationRepository for SeaOrmReservationRepository {
    async fn ensure_schema(&self) -> DomainResult<()> {
        let handle = self.open().await?;
        let result = schema::ensure_schema(handle.connection()).await;
        handle.close().await;
        result
    }

    async fn seed_if_empty(&self) -> DomainResult<u64> {
        let handle = self.open().await?;
        let db = handle.connection();

        let result: DomainResult<u64> = async {
            let existing = reservation::Entity::find().count(db).await?;
            if existing > 0 {
                return Ok(0);
            }
            let inserted = insert_batch(db, demo_reservations()).await?;
            info!("Seeded {} demo reservations", inserted);
            Ok(inserted)
        }
        .await;

        handle.close().await;
        result
    }

    async fn count(&self) -> DomainResult<u64> {
        let handle = self.open().await?;
        let result = reservation::Entity::find()
            .count(handle.connection())
            .await
            .map_err(Into::into);
        handle.close().await;
        result
    }

    async fn insert(&self, r: NewReservation) -> DomainResult<i32> {
        debug!("Inserting reservation for {}", r.name);

        let handle = self.open().await?;
        let result = reservation::Entity::insert(to_active_model(r))
            .exec(handle.connection())
            .await
            .map(|res| res.last_insert_id)
            .map_err(Into::into);
        handle.close().await;
        result
    }

    async fn insert_many(&self, reservations: Vec<NewReservation>) -> DomainResult<u64> {
        debug!("Inserting batch of {} reservations", reservations.len());

        let handle = self.open().await?;
        let result = insert_batch(handle.connection(), reservations).await;
        handle.close().await;
        result
    }

    async fn find_page(&self, page: PageRequest) -> DomainResult<Vec<Reservation>> {
        let handle = self.open().await?;
        let result = newest_first()
            .offset(page.offset())
            .limit(page.limit())
            .all(handle.connection())
            .await;
        handle.close().await;
        Ok(result?.into_iter().map(model_to_domain).collect())
    }

    async fn find_all(&self) -> DomainResult<Vec<Reservation>> {
        let handle = self.open().await?;
        let result = newest_first().all(handle.connection()).await;
        handle.close().await;
        Ok(result?.into_iter().map(model_to_domain).collect())
    }

    async fn ping(&self) -> DomainResult<()> {
        let handle = self.open().await?;
        let db = handle.connection();
        let result = db
            .execute(Statement::from_string(
                db.get_database_backend(),
                "SELECT 1".to_string(),
            ))
            .await
            .map(|_| ())
            .map_err(Into::into);
        handle.close().await;
        result
    }
}

// ── Tests ──────────────────────────────────────────────────────
