//! Ledger preparation middleware
//!
//! Every ledger route runs [`LedgerService::prepare`] first: schema and seed
//! once per process, then the import step. A storage failure answers `503`
//! before the handler runs; import problems never fail the request.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::application::LedgerService;

use super::common::ApiError;

pub async fn prepare_ledger(
    State(ledger): State<Arc<LedgerService>>,
    request: Request,
    next: Next,
) -> Response {
    if let Err(e) = ledger.prepare().await {
        return ApiError::from(e).into_response();
    }
    next.run(request).await
}
