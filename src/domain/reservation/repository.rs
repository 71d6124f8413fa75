//! Reservation repository interface

use async_trait::async_trait;

use super::model::{NewReservation, Reservation};
use crate::domain::DomainResult;
use crate::shared::types::PageRequest;

/// Append-only access to the reservation ledger.
///
/// Every method is one logical operation and uses its own storage handle.
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Create the reservation table if it does not exist
    async fn ensure_schema(&self) -> DomainResult<()>;

    /// Insert the demo dataset when the table is empty. Returns rows inserted.
    async fn seed_if_empty(&self) -> DomainResult<u64>;

    /// Total number of reservations
    async fn count(&self) -> DomainResult<u64>;

    /// Insert one reservation and return its assigned id
    async fn insert(&self, reservation: NewReservation) -> DomainResult<i32>;

    /// Insert a batch in a single statement. Returns rows inserted.
    async fn insert_many(&self, reservations: Vec<NewReservation>) -> DomainResult<u64>;

    /// One page, newest first (`created_at DESC, id DESC`)
    async fn find_page(&self, page: PageRequest) -> DomainResult<Vec<Reservation>>;

    /// Every reservation, newest first
    async fn find_all(&self) -> DomainResult<Vec<Reservation>>;

    /// Round-trip a trivial query to check storage is reachable
    async fn ping(&self) -> DomainResult<()>;
}
