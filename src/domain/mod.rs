//! Ledger domain: the reservation record, its inputs and the repository port.

pub mod reservation;

pub use reservation::{NewReservation, Reservation, ReservationFields, ReservationRepository};

// Re-export DomainError from shared for convenience
pub use crate::shared::types::{DomainError, DomainResult};
