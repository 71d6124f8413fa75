//! Reservation aggregate
//!
//! Contains the Reservation record, its validated insert form, the demo
//! dataset, and the repository interface.

pub mod model;
pub mod repository;
pub mod seed;

pub use model::{NewReservation, Reservation, ReservationFields};
pub use repository::ReservationRepository;
pub use seed::demo_reservations;
