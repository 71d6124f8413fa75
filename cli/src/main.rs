//! Reservas: CLI server and maintenance tool
//!
//! ```sh
//! # Serve the API with the default config (~/.config/reservas-ledger/config.toml)
//! reservas
//!
//! # Custom config path and port
//! reservas --config /etc/reservas/config.toml serve --port 8080
//!
//! # Validate config without starting
//! reservas check
//!
//! # Dump the ledger
//! reservas export --format json --output reservas.json
//!
//! # Apply an import file once
//! reservas import --path data/import_reservas.csv
//! ```

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use tracing::{error, info};

use reservas_ledger::application::{export_csv, export_json};
use reservas_ledger::infrastructure::IngestOutcome;
use reservas_ledger::server::{init_tracing, ServerHandle, ServerOptions};
use reservas_ledger::{AppConfig, LedgerService};

/// Reservas: hotel reservation ledger over SQLite.
#[derive(Parser, Debug)]
#[command(
    name = "reservas",
    version,
    about = "Hotel reservation ledger: HTTP API, CSV import and export",
    long_about = "Reservas: JSON/form HTTP API over a single SQLite table of reservations, \
                  with CSV ingestion and CSV/JSON export.\n\n\
                  Default config: ~/.config/reservas-ledger/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, global = true, env = "RESERVAS_CONFIG")]
    config: Option<PathBuf>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default).
    Serve {
        /// Override the listen host.
        #[arg(long)]
        host: Option<String>,
        /// Override the listen port.
        #[arg(long)]
        port: Option<u16>,
    },
    /// Validate the configuration file and exit.
    Check,
    /// Write every reservation, newest first.
    Export {
        #[arg(long, value_enum, default_value_t = ExportFormat::Csv)]
        format: ExportFormat,
        /// Output file; stdout when omitted.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Ingest an import file now, regardless of `import.mode`.
    Import {
        /// CSV file; defaults to `import.path`.
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum ExportFormat {
    Csv,
    Json,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(reservas_ledger::default_config_path);

    let (mut config, load_error) = match AppConfig::load(&config_path) {
        Ok(cfg) => (cfg, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };
    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }
    init_tracing(&config);

    match load_error {
        None => info!("Configuration loaded from {}", config_path.display()),
        Some(ref e) => {
            error!("Failed to load config from {}: {}", config_path.display(), e);
            error!("Using default configuration.");
        }
    }

    match cli.command.unwrap_or(Command::Serve {
        host: None,
        port: None,
    }) {
        Command::Serve { host, port } => {
            if let Some(host) = host {
                info!("CLI override: host = {}", host);
                config.server.host = host;
            }
            if let Some(port) = port {
                info!("CLI override: port = {}", port);
                config.server.port = port;
            }
            serve(config).await
        }
        Command::Check => {
            if let Some(e) = load_error {
                return Err(e.into());
            }
            check(&config_path, &config);
            Ok(())
        }
        Command::Export { format, output } => export(&config, format, output.as_deref()).await,
        Command::Import { path } => import(&config, path.as_deref()).await,
    }
}

async fn serve(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let handle = ServerHandle::start(ServerOptions {
        config,
        ..Default::default()
    })
    .await?;

    handle.install_signal_handler();
    info!("🚀 Press Ctrl+C to shutdown gracefully.");

    handle.wait().await;
    Ok(())
}

fn check(config_path: &Path, config: &AppConfig) {
    println!("✅ Configuration is valid");
    println!("   Config file : {}", config_path.display());
    println!("   Address     : {}", config.server.address());
    println!("   Database    : {}", config.database.connection_url());
    println!(
        "   Import      : {} ({:?}{})",
        config.import.path.display(),
        config.import.mode,
        if config.import.archive_processed {
            ", archived after ingest"
        } else {
            ""
        }
    );
    println!(
        "   Page size   : {} (max: {})",
        config.pagination.default_per_page,
        config
            .pagination
            .max_per_page
            .map_or_else(|| "unbounded".to_string(), |m| m.to_string())
    );
    println!("   Log level   : {}", config.logging.level);
}

async fn export(
    config: &AppConfig,
    format: ExportFormat,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let ledger = LedgerService::from_config(config);
    ledger.initialize().await?;
    let records = ledger.list_all().await?;

    let bytes = match format {
        ExportFormat::Csv => export_csv(&records)?,
        ExportFormat::Json => {
            let mut bytes = export_json(&records)?;
            bytes.push(b'\n');
            bytes
        }
    };

    match output {
        Some(path) => {
            std::fs::write(path, &bytes)?;
            info!("Exported {} reservations to {}", records.len(), path.display());
        }
        None => std::io::stdout().write_all(&bytes)?,
    }
    Ok(())
}

async fn import(config: &AppConfig, path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let ledger = LedgerService::from_config(config);
    let shown = path.unwrap_or(&config.import.path).display().to_string();

    match ledger.import_now(path).await? {
        IngestOutcome::Absent => println!("No import file at {}", shown),
        IngestOutcome::Ingested { rows } => println!("Imported {} reservations from {}", rows, shown),
    }
    Ok(())
}
