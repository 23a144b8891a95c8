//! keyloom-server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens the
//! SQLite research store, runs startup initialization, and serves the JSON
//! API over HTTP.
//!
//! # Provisioning
//!
//! To create or upgrade a store in place without starting the server (schema
//! errors propagate here instead of being swallowed):
//!
//! ```
//! cargo run -p keyloom-api --bin keyloom-server -- --provision
//! ```

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use clap::Parser;
use keyloom_api::ServerConfig;
use keyloom_store_sqlite::{SqliteStore, init};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Keyloom keyword-research server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Provision the store schema and exit instead of serving.
  #[arg(long)]
  provision: bool,
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

  // Load configuration.
  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("KEYLOOM"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  // Expand `~` in store path.
  let store_path = expand_tilde(&server_cfg.store_path);

  // Open SQLite store.
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  // Operator path: run both schema steps once, loudly.
  if cli.provision {
    store
      .ensure_base_schema()
      .await
      .context("base schema provisioning failed")?;
    store
      .ensure_extended_schema()
      .await
      .context("extended schema provisioning failed")?;
    println!("store at {store_path:?} provisioned");
    return Ok(());
  }

  // Boot path: schema failures are logged and swallowed so the server comes
  // up regardless; row operations report their own errors later.
  init::initialize(&store).await;

  let app = keyloom_api::api_router(Arc::new(store))
    .layer(TraceLayer::new_for_http());
  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
