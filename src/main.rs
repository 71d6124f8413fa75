//! Reservation ledger HTTP server.
//!
//! Reads configuration from a TOML file (`RESERVAS_CONFIG`, else
//! `~/.config/reservas-ledger/config.toml`) and serves until SIGINT/SIGTERM.
//! The `reservas` CLI offers the same server plus export/import commands.

use tracing::{error, info};

use reservas_ledger::server::{init_tracing, ServerHandle, ServerOptions};
use reservas_ledger::{default_config_path, AppConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = default_config_path();
    let config = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            init_tracing(&cfg);
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            let cfg = AppConfig::default();
            init_tracing(&cfg);
            error!("Failed to load config: {}. Using defaults.", e);
            cfg
        }
    };

    let handle = ServerHandle::start(ServerOptions {
        config,
        ..Default::default()
    })
    .await?;
    handle.install_signal_handler();
    handle.wait().await;
    Ok(())
}
