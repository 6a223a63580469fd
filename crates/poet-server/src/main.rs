//! poet-server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens the
//! SQLite catalogue, and either serves the JSON API over HTTP or imports a
//! chinese-poetry corpus directory.
//!
//! # Importing
//!
//! ```
//! cargo run -p poet-server -- import ./chinese-poetry/全唐诗
//! ```

mod settings;

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use axum::{Router, http::Method};
use clap::{Parser, Subcommand};
use poet_store_sqlite::{Corpus, SqliteStore};
use tokio::net::TcpListener;
use tower_http::{
  cors::{Any, CorsLayer},
  trace::TraceLayer,
};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::settings::ServerConfig;

#[derive(Parser)]
#[command(author, version, about = "Tang poetry catalogue server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
  /// Serve the JSON API (the default).
  Serve,
  /// Load `authors.tang.json` and `poet.tang.*.json` from a directory.
  Import {
    /// Corpus directory.
    dir: PathBuf,
  },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let server_cfg =
    ServerConfig::load(&cli.config).context("failed to load configuration")?;

  let store_path = server_cfg.resolved_store_path();
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;
  tracing::info!("Connected to database: {}", store_path.display());

  match cli.command.unwrap_or(Command::Serve) {
    Command::Serve => serve(store.clone(), &server_cfg).await?,
    Command::Import { dir } => {
      let corpus = Corpus::load(&dir)
        .await
        .with_context(|| format!("failed to read corpus at {dir:?}"))?;
      store
        .import_corpus(corpus)
        .await
        .context("corpus import failed")?;
    }
  }

  store.close().await.context("failed to close store")?;
  Ok(())
}

async fn serve(store: SqliteStore, server_cfg: &ServerConfig) -> anyhow::Result<()> {
  let app = router(store);
  let address = server_cfg.address();

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("server error")?;

  tracing::info!("Server stopped");
  Ok(())
}

fn router(store: SqliteStore) -> Router {
  poet_api::api_router(Arc::new(store))
    .layer(cors())
    .layer(TraceLayer::new_for_http())
}

/// Any origin may call the API, as browsers load the front-end from a
/// separate dev server.
fn cors() -> CorsLayer {
  CorsLayer::new()
    .allow_origin(Any)
    .allow_methods([
      Method::GET,
      Method::POST,
      Method::PUT,
      Method::PATCH,
      Method::DELETE,
      Method::HEAD,
      Method::OPTIONS,
    ])
    .allow_headers(Any)
}

async fn shutdown_signal() {
  let ctrl_c = async {
    if let Err(e) = tokio::signal::ctrl_c().await {
      tracing::error!("failed to listen for ctrl-c: {e}");
      std::future::pending::<()>().await;
    }
  };

  #[cfg(unix)]
  let terminate = async {
    match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
      Ok(mut sig) => {
        sig.recv().await;
      }
      Err(e) => {
        tracing::error!("failed to listen for SIGTERM: {e}");
        std::future::pending::<()>().await;
      }
    }
  };

  #[cfg(not(unix))]
  let terminate = std::future::pending::<()>();

  tokio::select! {
    () = ctrl_c => {},
    () = terminate => {},
  }
  tracing::info!("Shutdown signal received");
}
