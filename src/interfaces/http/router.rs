//! API router and OpenAPI document

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::application::LedgerService;
use crate::domain::Reservation;

use super::middleware::prepare_ledger;
use super::modules::health::{self, HealthState};
use super::modules::reservations;

pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Ledger
        reservations::list_reservations,
        reservations::create_reservation_form,
        reservations::create_reservation,
        // Export
        reservations::export_reservations_csv,
        reservations::export_reservations_json,
    ),
    components(schemas(
        Reservation,
        reservations::ReservationPageDto,
        reservations::CreateReservationRequest,
        reservations::CreateReservationResponse,
        reservations::ReservationForm,
        health::HealthResponse,
        health::ComponentHealth,
    )),
    tags(
        (name = "Reservations", description = "Listing and creation of reservations"),
        (name = "Export", description = "Full ledger as CSV or JSON"),
        (name = "Health", description = "Liveness and storage check"),
    ),
    info(title = "Reservation Ledger API")
)]
pub struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the HTTP router over a ledger service.
///
/// Ledger routes run `prepare_ledger` first; `/health` and the OpenAPI
/// document do not touch the import file.
pub fn create_api_router(ledger: Arc<LedgerService>) -> Router {
    let ledger_routes = Router::new()
        .route(
            reservations::LIST_PATH,
            get(reservations::list_reservations),
        )
        .route(
            reservations::NEW_PATH,
            post(reservations::create_reservation_form),
        )
        .route(
            "/reservas/export",
            get(reservations::export_reservations_csv),
        )
        .route(
            "/api/reservas",
            get(reservations::export_reservations_json).post(reservations::create_reservation),
        )
        .route_layer(middleware::from_fn_with_state(
            ledger.clone(),
            prepare_ledger,
        ))
        .with_state(ledger.clone());

    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .with_state(HealthState::new(ledger));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(ledger_routes)
        .merge(health_routes)
        .route(OPENAPI_PATH, get(openapi_json))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
pub(crate) mod tests {
    use axum::body::Body;
    use axum::http::{header, Request, Response, StatusCode};
    use tower::Service;

    use super::*;
    use crate::config::{AppConfig, ImportMode};
    use crate::infrastructure::database::testing::TempDatabase;

    /// A router over a fresh database, with the import file inside `dir`.
    pub(crate) struct TestApp {
        pub router: Router,
        pub import_path: std::path::PathBuf,
        _db: TempDatabase,
        _dir: tempfile::TempDir,
    }

    impl TestApp {
        pub fn new(mode: ImportMode) -> Self {
            let db = TempDatabase::new();
            let dir = tempfile::tempdir().unwrap();
            let mut config = AppConfig::default();
            config.database.path = db.config.path.clone();
            config.import.path = dir.path().join("import_reservas.csv");
            config.import.mode = mode;

            let ledger = Arc::new(LedgerService::from_config(&config));
            Self {
                router: create_api_router(ledger),
                import_path: config.import.path,
                _db: db,
                _dir: dir,
            }
        }

        pub async fn send(&self, req: Request<Body>) -> Response<Body> {
            let mut svc = self.router.clone().into_service();
            svc.call(req).await.unwrap()
        }

        pub async fn get(&self, uri: &str) -> Response<Body> {
            self.send(Request::get(uri).body(Body::empty()).unwrap()).await
        }
    }

    pub(crate) async fn json_body(resp: Response<Body>) -> serde_json::Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_is_ok_without_preparing_the_ledger() {
        let app = TestApp::new(ImportMode::EveryRequest);
        std::fs::write(&app.import_path, "nombre\nX\n").unwrap();

        let resp = app.get("/health").await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = json_body(resp).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["database"]["status"], "ok");

        // The import file was not touched: the first ledger request sees
        // seed rows plus one import.
        let body = json_body(app.get("/reservas").await).await;
        assert_eq!(body["total"], 4);
    }

    #[tokio::test]
    async fn unusable_storage_is_503_everywhere() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, b"x").unwrap();

        let mut config = AppConfig::default();
        config.database.path = blocker.join("reservas.db");
        config.import.mode = ImportMode::Disabled;
        let mut svc = create_api_router(Arc::new(LedgerService::from_config(&config))).into_service();

        for uri in ["/health", "/reservas", "/api/reservas", "/reservas/export"] {
            let resp = svc
                .call(Request::get(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE, "{uri}");
        }
    }

    #[tokio::test]
    async fn openapi_document_lists_ledger_paths() {
        let app = TestApp::new(ImportMode::Disabled);
        let resp = app.get(OPENAPI_PATH).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let doc = json_body(resp).await;
        for path in ["/reservas", "/reservas/new", "/reservas/export", "/api/reservas", "/health"] {
            assert!(doc["paths"].get(path).is_some(), "{path}");
        }
    }

    #[tokio::test]
    async fn cors_headers_are_present() {
        let app = TestApp::new(ImportMode::Disabled);
        let resp = app
            .send(
                Request::get("/health")
                    .header(header::ORIGIN, "http://localhost:3000")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await;
        assert_eq!(
            resp.headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .unwrap(),
            "*"
        );
    }

    #[tokio::test]
    async fn unknown_route_is_404() {
        let app = TestApp::new(ImportMode::Disabled);
        assert_eq!(app.get("/nope").await.status(), StatusCode::NOT_FOUND);
    }
}
