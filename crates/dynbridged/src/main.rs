// # dynbridged - DynDNS to Hetzner DNS bridge
//
// This daemon is a THIN integration layer:
// - DO NOT add DynDNS, zone or record logic here
// - All update logic lives in dynbridge-core
// - Configuration is via environment variables ONLY
//
// The dynbridged daemon is responsible for:
// 1. Reading configuration from environment variables
// 2. Initializing logging and the runtime
// 3. Building the Hetzner client and the update bridge
// 4. Serving HTTP until SIGTERM/SIGINT
//
// ## Configuration
//
// ### DNS Provider
// - `HETZNER_DNS_API_KEY`: Hetzner DNS API token (required)
// - `HETZNER_DNS_API_URL`: API base URL (default: https://dns.hetzner.com/api/v1)
//
// ### Update endpoint
// - `DYNDNS_USERNAME`: Basic-Auth username (default: admin)
// - `DYNDNS_PASSWORD`: Basic-Auth password (required)
// - `DYNDNS_PORT`: Listen port (default: 8080)
//
// ### Logging
// - `DYNDNS_LOG_LEVEL`: trace, debug, info, warn, error (default: info)
//
// ## Example
//
// ```bash
// export HETZNER_DNS_API_KEY=your_token
// export DYNDNS_PASSWORD=router_secret
//
// dynbridged
// ```
//
// Routers then call `http://host:8080/update?hostname=home.example.com&myip=1.2.3.4`.

mod server;

use anyhow::{Context, Result};
use dynbridge_core::config::{DEFAULT_PORT, DEFAULT_USERNAME};
use dynbridge_core::{BridgeConfig, Credentials, ProviderConfig, ServerConfig, UpdateBridge};
use dynbridge_provider_hetzner::HetznerClient;
use std::env;
use std::net::SocketAddr;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

#[cfg(unix)]
use tokio::signal::unix::{SignalKind, signal};

/// Exit codes for different termination scenarios
///
/// These codes follow systemd conventions:
/// - 0: Clean shutdown
/// - 1: Configuration or startup error
/// - 2: Runtime error (unexpected)
#[derive(Debug, Clone, Copy)]
enum BridgeExitCode {
    /// Clean shutdown (normal exit)
    CleanShutdown = 0,
    /// Configuration error or startup failure
    ConfigError = 1,
    /// Runtime error (unexpected failure)
    RuntimeError = 2,
}

impl From<BridgeExitCode> for ExitCode {
    fn from(code: BridgeExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Application configuration
struct Config {
    api_key: String,
    api_url: Option<String>,
    username: String,
    password: String,
    port: u16,
    log_level: String,
}

impl Config {
    /// Load configuration from environment variables
    fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable lookup
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let api_key = var("HETZNER_DNS_API_KEY").context(
            "HETZNER_DNS_API_KEY is required. \
            Set it via: export HETZNER_DNS_API_KEY=your_token",
        )?;

        let password = var("DYNDNS_PASSWORD").context(
            "DYNDNS_PASSWORD is required. \
            Set it via: export DYNDNS_PASSWORD=your_password",
        )?;

        let port = match var("DYNDNS_PORT") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("DYNDNS_PORT must be a port number. Got: {}", raw))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            api_key,
            api_url: var("HETZNER_DNS_API_URL"),
            username: var("DYNDNS_USERNAME").unwrap_or_else(|| DEFAULT_USERNAME.to_string()),
            password,
            port,
            log_level: var("DYNDNS_LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        })
    }

    /// Convert into the library configuration
    fn bridge_config(&self) -> BridgeConfig {
        let mut config = BridgeConfig::new(
            Credentials::new(self.username.clone(), self.password.clone()),
            ProviderConfig::Hetzner {
                api_key: self.api_key.clone(),
                base_url: self.api_url.clone(),
            },
        );
        config.server = ServerConfig { port: self.port };
        config
    }

    /// Validate the configuration
    fn validate(&self) -> Result<()> {
        self.log_level()?;

        self.bridge_config()
            .validate()
            .context("Invalid bridge configuration")?;

        Ok(())
    }

    fn log_level(&self) -> Result<Level> {
        match self.log_level.to_lowercase().as_str() {
            "trace" => Ok(Level::TRACE),
            "debug" => Ok(Level::DEBUG),
            "info" => Ok(Level::INFO),
            "warn" => Ok(Level::WARN),
            "error" => Ok(Level::ERROR),
            _ => anyhow::bail!(
                "DYNDNS_LOG_LEVEL '{}' is not valid. \
                Valid levels: trace, debug, info, warn, error",
                self.log_level
            ),
        }
    }
}

fn main() -> ExitCode {
    // Load configuration from environment
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {:#}", e);
            return BridgeExitCode::ConfigError.into();
        }
    };

    // Validate configuration
    if let Err(e) = config.validate() {
        eprintln!("Configuration validation error: {:#}", e);
        return BridgeExitCode::ConfigError.into();
    }

    // Initialize tracing
    let log_level = config.log_level().unwrap_or(Level::INFO);
    let subscriber = FmtSubscriber::builder().with_max_level(log_level).finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return BridgeExitCode::ConfigError.into();
    }

    info!("Starting dynbridged {}", env!("CARGO_PKG_VERSION"));

    // Enter tokio runtime
    let rt = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return BridgeExitCode::RuntimeError.into();
        }
    };

    let result = rt.block_on(async {
        if let Err(e) = run_daemon(config).await {
            error!("Daemon error: {:#}", e);
            BridgeExitCode::RuntimeError
        } else {
            BridgeExitCode::CleanShutdown
        }
    });

    result.into()
}

/// Run the daemon
async fn run_daemon(config: Config) -> Result<()> {
    let bridge_config = config.bridge_config();

    let client = HetznerClient::from_config(&bridge_config.provider)
        .context("Failed to create Hetzner DNS client")?;
    info!(
        "Using {} provider at {}",
        bridge_config.provider.type_name(),
        client.base_url()
    );

    let bridge = UpdateBridge::from_config(Arc::new(client), &bridge_config)
        .context("Failed to create update bridge")?;
    let app = server::router(Arc::new(bridge));

    let addr = SocketAddr::from(([0, 0, 0, 0], bridge_config.server.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Listening on {}", addr);
    info!("Update endpoint: http://{}/update", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("HTTP server error")?;

    info!("Shutting down daemon");
    Ok(())
}

/// Resolve once SIGTERM or SIGINT is received
///
/// If the handlers cannot be installed the error is logged and the server
/// keeps running until the process is killed.
async fn shutdown_signal() {
    match wait_for_shutdown().await {
        Ok(signal) => info!("Received shutdown signal: {}", signal),
        Err(e) => {
            error!("Shutdown signal error: {:#}", e);
            std::future::pending::<()>().await;
        }
    }
}

/// Wait for shutdown signals (SIGTERM, SIGINT)
///
/// Returns the name of the signal received.
#[cfg(unix)]
async fn wait_for_shutdown() -> Result<&'static str> {
    let mut sigterm =
        signal(SignalKind::terminate()).context("Failed to setup SIGTERM handler")?;
    let mut sigint = signal(SignalKind::interrupt()).context("Failed to setup SIGINT handler")?;

    Ok(tokio::select! {
        _ = sigterm.recv() => "SIGTERM",
        _ = sigint.recv() => "SIGINT",
    })
}

/// Wait for shutdown signals (SIGINT only)
///
/// Fallback implementation for non-Unix platforms.
#[cfg(not(unix))]
async fn wait_for_shutdown() -> Result<&'static str> {
    tokio::signal::ctrl_c()
        .await
        .context("Failed to wait for CTRL-C")?;
    Ok("SIGINT")
}
