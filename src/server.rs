//! Reusable server runtime.
//!
//! [`ServerHandle`] owns the HTTP listener task and its shutdown signal.
//! Both the `reservas-ledger` launcher and the `reservas` CLI start the
//! service through it.

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{error, info, warn};

use crate::application::LedgerService;
use crate::config::AppConfig;
use crate::interfaces::http::create_api_router;
use crate::shared::shutdown::ShutdownCoordinator;

// ── Options ────────────────────────────────────────────────────────

/// Options for starting the ledger server.
pub struct ServerOptions {
    /// Application configuration.
    pub config: AppConfig,
    /// Create the table and seed demo rows before accepting requests
    /// (default: true). The per-request guard does it lazily otherwise.
    pub eager_init: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            eager_init: true,
        }
    }
}

// ── ServerHandle ───────────────────────────────────────────────────

/// Handle to a running ledger server.
///
/// ```rust,no_run
/// use reservas_ledger::server::{ServerHandle, ServerOptions};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let handle = ServerHandle::start(ServerOptions::default()).await?;
///     handle.install_signal_handler();
///     handle.wait().await;
///     Ok(())
/// }
/// ```
pub struct ServerHandle {
    /// The ledger shared by every request.
    pub ledger: Arc<LedgerService>,
    /// The configuration the server was started with.
    pub config: AppConfig,

    local_addr: SocketAddr,
    shutdown: ShutdownCoordinator,
    api_task: tokio::task::JoinHandle<()>,
}

impl ServerHandle {
    /// Start the HTTP server with the given options.
    ///
    /// 1. Build the ledger service over the configured SQLite file
    /// 2. Create the schema and seed demo rows (if `eager_init`)
    /// 3. Bind the listener and serve the API until shutdown
    pub async fn start(opts: ServerOptions) -> Result<Self, Box<dyn std::error::Error>> {
        let config = opts.config;

        info!("Starting reservation ledger...");
        info!("Database: {}", config.database.connection_url());
        info!(
            "Import file: {} (mode: {:?})",
            config.import.path.display(),
            config.import.mode
        );

        let ledger = Arc::new(LedgerService::from_config(&config));
        if opts.eager_init {
            ledger.initialize().await?;
        }

        let shutdown = ShutdownCoordinator::new(config.server.shutdown_timeout);

        let router = create_api_router(ledger.clone());
        let listener = tokio::net::TcpListener::bind(config.server.address()).await?;
        let local_addr = listener.local_addr()?;
        info!("REST API listening on http://{}", local_addr);
        info!("OpenAPI document at http://{}/api-docs/openapi.json", local_addr);

        let api_shutdown = shutdown.signal();
        let api_server = axum::serve(listener, router).with_graceful_shutdown(async move {
            api_shutdown.wait().await;
            info!("🛑 REST API server received shutdown signal");
        });

        let api_task = tokio::spawn(async move {
            if let Err(e) = api_server.await {
                error!("REST API server error: {}", e);
            }
        });

        Ok(Self {
            ledger,
            config,
            local_addr,
            shutdown,
            api_task,
        })
    }

    /// Address the listener is bound to (useful with port 0).
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Install OS signal listeners (SIGTERM, SIGINT) that trigger shutdown.
    pub fn install_signal_handler(&self) {
        self.shutdown.start_signal_listener();
    }

    /// Trigger graceful shutdown (non-blocking).
    pub fn trigger_shutdown(&self) {
        self.shutdown.signal().trigger();
    }

    /// Wait for the server to stop.
    ///
    /// In-flight requests get `shutdown_timeout` seconds after the signal;
    /// the task is aborted when they overrun it.
    pub async fn wait(self) {
        let signal = self.shutdown.signal();
        let timeout = self.shutdown.timeout();
        let mut api_task = self.api_task;

        tokio::select! {
            result = &mut api_task => {
                report(result);
                return;
            }
            _ = signal.wait() => {}
        }

        info!("⏳ Waiting up to {}s for in-flight requests...", timeout.as_secs());
        match tokio::time::timeout(timeout, &mut api_task).await {
            Ok(result) => report(result),
            Err(_) => {
                warn!("Shutdown timeout elapsed; aborting server task");
                api_task.abort();
            }
        }
        info!("👋 Reservation ledger shutdown complete");
    }

    /// Trigger shutdown and wait for completion.
    pub async fn shutdown(self) {
        self.trigger_shutdown();
        self.wait().await;
    }

    pub fn is_running(&self) -> bool {
        !self.api_task.is_finished()
    }
}

fn report(result: Result<(), tokio::task::JoinError>) {
    match result {
        Ok(()) => info!("REST API server stopped"),
        Err(e) => error!("REST API server task panicked: {}", e),
    }
}

/// Initialize tracing (logging) from the application config.
///
/// `RUST_LOG` takes precedence over `logging.level`. Call once at process
/// startup, before [`ServerHandle::start`].
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    match config.logging.format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }
}
