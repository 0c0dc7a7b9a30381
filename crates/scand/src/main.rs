//! scand - Scan Proxy Daemon
//!
//! Accepts file uploads, forwards them to a remote scanning backend and
//! answers with a reshaped scan result.
//!
//! Usage:
//!   scand [OPTIONS] [config.toml]
//!
//! The scanner base URL is taken from `EMBER_API_URL`, then
//! `NEXT_PUBLIC_EMBER_API_URL`, then `[backend] url` in the config file, and
//! finally a built-in default. `--backend-url` overrides all of them.

mod config;

use std::sync::Arc;

use scan_api::config::backend_url_from_env;
use scan_api::{create_router_with_limits, AppState};
use scan_client::ScannerClient;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ScandConfig;

/// Parsed command-line arguments
struct Args {
    /// Server config file (TOML)
    config_path: Option<String>,
    /// Listener port override
    port: Option<u16>,
    /// Scanner base URL override
    backend_url: Option<String>,
}

fn parse_args() -> anyhow::Result<Args> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut result = Args {
        config_path: None,
        port: None,
        backend_url: None,
    };

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--port" | "-p" => {
                if i + 1 < args.len() {
                    result.port = Some(args[i + 1].parse()?);
                    i += 2;
                } else {
                    anyhow::bail!("Missing argument for --port");
                }
            }
            "--backend-url" | "-u" => {
                if i + 1 < args.len() {
                    result.backend_url = Some(args[i + 1].clone());
                    i += 2;
                } else {
                    anyhow::bail!("Missing argument for --backend-url");
                }
            }
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            arg if !arg.starts_with('-') => {
                // Positional argument = config file
                result.config_path = Some(arg.to_string());
                i += 1;
            }
            _ => {
                tracing::warn!("Unknown argument: {}", args[i]);
                i += 1;
            }
        }
    }

    Ok(result)
}

fn print_help() {
    eprintln!(
        r#"scand - Scan Proxy Daemon

Usage: scand [OPTIONS] [config.toml]

Options:
  -p, --port <port>          Listen on this port (overrides [server] port)
  -u, --backend-url <url>    Scanner base URL (overrides environment and config)
  -h, --help                 Print this help message

Environment:
  EMBER_API_URL              Scanner base URL
  NEXT_PUBLIC_EMBER_API_URL  Scanner base URL, if EMBER_API_URL is unset
  RUST_LOG                   Log filter (default: scand=info,scan_api=info,scan_client=info)

Examples:
  # Run with defaults
  scand

  # Run with config file
  scand scand.toml

  # Point at a local scanner
  scand --backend-url http://localhost:8000 --port 8080
"#
    );
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scand=info,scan_api=info,scan_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting scand (Scan Proxy Daemon)");

    let args = parse_args()?;

    let mut config = match args.config_path {
        Some(ref path) => {
            tracing::info!("Loading config from: {}", path);
            ScandConfig::load(path).map_err(anyhow::Error::msg)?
        }
        None => ScandConfig::default(),
    };
    if let Some(port) = args.port {
        config.server.port = port;
    }

    let backend_url = args
        .backend_url
        .clone()
        .unwrap_or_else(|| backend_url_from_env(config.backend.url.as_deref()));
    let backend = ScannerClient::new(&backend_url)?;
    tracing::info!(scan_url = %backend.scan_url(), "Using scanner backend");

    let state = AppState::new(Arc::new(backend));
    let app = create_router_with_limits(state, config.limits());

    let addr = config.socket_addr().map_err(anyhow::Error::msg)?;
    tracing::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
