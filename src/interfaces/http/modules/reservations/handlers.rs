//! Reservation HTTP handlers
//!
//! All routes here sit behind the `prepare_ledger` middleware, so the table
//! exists and the import step has run by the time a handler is entered.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Redirect, Response};
use axum::{Form, Json};

use crate::application::{export_csv, export_filename, export_json, LedgerService};
use crate::application::export::{CSV_CONTENT_TYPE, JSON_CONTENT_TYPE};
use crate::domain::{DomainError, Reservation};
use crate::interfaces::http::common::{ApiError, ApiResponse, ValidatedJson};

use super::dto::*;

pub const LIST_PATH: &str = "/reservas";
pub const NEW_PATH: &str = "/reservas/new";

#[utoipa::path(
    get,
    path = "/reservas",
    tag = "Reservations",
    params(ListReservationsQuery),
    responses(
        (status = 200, description = "One page of reservations, newest first", body = ReservationPageDto),
        (status = 503, description = "Storage unavailable")
    )
)]
pub async fn list_reservations(
    State(ledger): State<Arc<LedgerService>>,
    Query(query): Query<ListReservationsQuery>,
) -> Result<Json<ReservationPageDto>, ApiError> {
    let per_page = query.per_page(ledger.default_per_page());
    let page = ledger.list(query.page(), per_page).await?;
    Ok(Json(page.into()))
}

/// Form submission. Answers with a `303` either way: back to the listing on
/// success, back to the form with `?error=<field>` when a field is rejected.
#[utoipa::path(
    post,
    path = "/reservas/new",
    tag = "Reservations",
    request_body(content = ReservationForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Redirect to /reservas, or to /reservas/new?error=<field>"),
        (status = 503, description = "Storage unavailable")
    )
)]
pub async fn create_reservation_form(
    State(ledger): State<Arc<LedgerService>>,
    Form(form): Form<ReservationForm>,
) -> Result<Redirect, ApiError> {
    match ledger.create(form.into()).await {
        Ok(_) => Ok(Redirect::to(LIST_PATH)),
        Err(DomainError::Validation { field, .. }) => {
            Ok(Redirect::to(&format!("{}?error={}", NEW_PATH, field)))
        }
        Err(e) => Err(e.into()),
    }
}

#[utoipa::path(
    post,
    path = "/api/reservas",
    tag = "Reservations",
    request_body = CreateReservationRequest,
    responses(
        (status = 201, description = "Reservation created", body = ApiResponse<CreateReservationResponse>),
        (status = 400, description = "Malformed JSON"),
        (status = 422, description = "Validation failed")
    )
)]
pub async fn create_reservation(
    State(ledger): State<Arc<LedgerService>>,
    ValidatedJson(request): ValidatedJson<CreateReservationRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CreateReservationResponse>>), ApiError> {
    let id = ledger.create(request.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(CreateReservationResponse { id })),
    ))
}

#[utoipa::path(
    get,
    path = "/reservas/export",
    tag = "Export",
    responses(
        (status = 200, description = "Every reservation as a CSV attachment", body = String, content_type = "text/csv"),
        (status = 500, description = "Export failed")
    )
)]
pub async fn export_reservations_csv(
    State(ledger): State<Arc<LedgerService>>,
) -> Result<Response, ApiError> {
    let records = ledger.list_all().await?;
    let body = export_csv(&records)?;
    let filename = export_filename(chrono::Local::now().naive_local());

    Ok((
        [
            (header::CONTENT_TYPE, CSV_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        body,
    )
        .into_response())
}

#[utoipa::path(
    get,
    path = "/api/reservas",
    tag = "Export",
    responses(
        (status = 200, description = "Every reservation, newest first", body = Vec<Reservation>)
    )
)]
pub async fn export_reservations_json(
    State(ledger): State<Arc<LedgerService>>,
) -> Result<Response, ApiError> {
    let records = ledger.list_all().await?;
    let body = export_json(&records)?;
    Ok(([(header::CONTENT_TYPE, JSON_CONTENT_TYPE)], body).into_response())
}
