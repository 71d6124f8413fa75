//! Reservation DTOs

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::{Reservation, ReservationFields};
use crate::shared::types::PaginatedResult;

/// Query for the paginated listing.
///
/// Values that are not integers are ignored, like a missing parameter.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListReservationsQuery {
    /// Page number, 1-based. Default: 1
    pub page: Option<String>,
    /// Page size. Default: the configured `default_per_page`
    pub per_page: Option<String>,
}

impl ListReservationsQuery {
    pub fn page(&self) -> i64 {
        lenient_int(self.page.as_deref()).unwrap_or(1)
    }

    pub fn per_page(&self, default: u32) -> i64 {
        lenient_int(self.per_page.as_deref()).unwrap_or(i64::from(default))
    }
}

fn lenient_int(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|v| v.trim().parse().ok())
}

/// One page of the ledger
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReservationPageDto {
    pub reservas: Vec<Reservation>,
    pub page: u32,
    pub per_page: u32,
    pub total: u64,
    pub total_pages: u64,
}

impl From<PaginatedResult<Reservation>> for ReservationPageDto {
    fn from(result: PaginatedResult<Reservation>) -> Self {
        Self {
            reservas: result.items,
            page: result.page,
            per_page: result.per_page,
            total: result.total,
            total_pages: result.total_pages,
        }
    }
}

/// Form-encoded submission of `POST /reservas/new`. Every field is text.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ReservationForm {
    pub nombre: Option<String>,
    pub correo: Option<String>,
    pub telefono: Option<String>,
    pub fecha_llegada: Option<String>,
    pub fecha_salida: Option<String>,
    pub habitaciones: Option<String>,
    pub total: Option<String>,
}

impl From<ReservationForm> for ReservationFields {
    fn from(form: ReservationForm) -> Self {
        Self {
            name: form.nombre,
            email: form.correo,
            phone: form.telefono,
            arrival_date: form.fecha_llegada,
            departure_date: form.fecha_salida,
            room_count: form.habitaciones,
            total_amount: form.total,
        }
    }
}

/// JSON body of `POST /api/reservas`
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateReservationRequest {
    /// Guest name; surrounding whitespace is trimmed and the rest must not be empty
    #[validate(length(min = 1, message = "name required"))]
    pub nombre: String,
    pub correo: Option<String>,
    pub telefono: Option<String>,
    /// Free-form date text
    pub fecha_llegada: Option<String>,
    pub fecha_salida: Option<String>,
    /// Default: 1
    pub habitaciones: Option<i32>,
    /// Default: 0.0
    pub total: Option<f64>,
}

impl From<CreateReservationRequest> for ReservationFields {
    fn from(req: CreateReservationRequest) -> Self {
        Self {
            name: Some(req.nombre),
            email: req.correo,
            phone: req.telefono,
            arrival_date: req.fecha_llegada,
            departure_date: req.fecha_salida,
            room_count: req.habitaciones.map(|n| n.to_string()),
            total_amount: req.total.map(|t| t.to_string()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateReservationResponse {
    pub id: i32,
}
