//! Reservation domain types

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{DomainError, DomainResult};

pub const DEFAULT_ROOM_COUNT: i32 = 1;
pub const DEFAULT_TOTAL_AMOUNT: f64 = 0.0;

/// A stored reservation.
///
/// Field order and serialized names follow the `reservas` table; both the CSV
/// and the JSON export rely on this order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Reservation {
    pub id: i32,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "correo")]
    pub email: Option<String>,
    #[serde(rename = "telefono")]
    pub phone: Option<String>,
    #[serde(rename = "fecha_llegada")]
    pub arrival_date: Option<String>,
    #[serde(rename = "fecha_salida")]
    pub departure_date: Option<String>,
    #[serde(rename = "habitaciones")]
    pub room_count: Option<i32>,
    #[serde(rename = "total")]
    pub total_amount: Option<f64>,
    /// Insertion time as stamped by the storage engine (`YYYY-MM-DD HH:MM:SS`, UTC)
    pub created_at: Option<String>,
}

/// Raw, unvalidated input for a new reservation (e.g. a submitted form).
#[derive(Debug, Clone, Default)]
pub struct ReservationFields {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub arrival_date: Option<String>,
    pub departure_date: Option<String>,
    pub room_count: Option<String>,
    pub total_amount: Option<String>,
}

/// A reservation ready to be inserted. `id` and `created_at` are assigned by
/// storage.
#[derive(Debug, Clone, PartialEq)]
pub struct NewReservation {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub arrival_date: String,
    pub departure_date: String,
    pub room_count: i32,
    pub total_amount: f64,
}

impl NewReservation {
    /// Validate caller input.
    ///
    /// The name is trimmed and must not be empty. Email and phone are trimmed;
    /// dates are kept verbatim. Absent or blank numbers take their defaults.
    pub fn from_fields(fields: ReservationFields) -> DomainResult<Self> {
        let name = fields.name.as_deref().unwrap_or_default().trim().to_string();
        if name.is_empty() {
            return Err(DomainError::validation("nombre", "name required"));
        }

        let room_count = parse_or_default(fields.room_count.as_deref(), DEFAULT_ROOM_COUNT)
            .map_err(|_| DomainError::validation("habitaciones", "room count must be an integer"))?;
        let total_amount = parse_or_default(fields.total_amount.as_deref(), DEFAULT_TOTAL_AMOUNT)
            .map_err(|_| DomainError::validation("total", "total must be a number"))?;

        Ok(Self {
            name,
            email: trimmed(fields.email),
            phone: trimmed(fields.phone),
            arrival_date: fields.arrival_date.unwrap_or_default(),
            departure_date: fields.departure_date.unwrap_or_default(),
            room_count,
            total_amount,
        })
    }
}

impl From<&Reservation> for NewReservation {
    /// Re-import an exported record; storage reassigns `id` and `created_at`.
    fn from(r: &Reservation) -> Self {
        Self {
            name: r.name.clone(),
            email: r.email.clone().unwrap_or_default(),
            phone: r.phone.clone().unwrap_or_default(),
            arrival_date: r.arrival_date.clone().unwrap_or_default(),
            departure_date: r.departure_date.clone().unwrap_or_default(),
            room_count: r.room_count.unwrap_or(DEFAULT_ROOM_COUNT),
            total_amount: r.total_amount.unwrap_or(DEFAULT_TOTAL_AMOUNT),
        }
    }
}

/// Parse a numeric field, treating absent or blank input as `default`.
pub fn parse_or_default<T: FromStr>(raw: Option<&str>, default: T) -> Result<T, T::Err> {
    match raw.map(str::trim) {
        None | Some("") => Ok(default),
        Some(value) => value.parse(),
    }
}

fn trimmed(value: Option<String>) -> String {
    value.map(|v| v.trim().to_string()).unwrap_or_default()
}

// ── Tests ──────────────────────────────────────────────────────
