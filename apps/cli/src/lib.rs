//! # GoMarketplace CLI Library
//!
//! ## Module Organization
//! ```text
//! gomarketplace_cli/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── args.rs         ◄─── clap definitions
//! ├── commands/
//! │   ├── mod.rs      ◄─── execute(): scope → handle → command
//! │   └── cart.rs     ◄─── list / add / increment / decrement
//! └── error.rs        ◄─── CliError printed on failure
//! ```

pub mod args;
pub mod commands;
pub mod error;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use gomarketplace_cart::{CartConfig, CartProvider, CartStore, Scope};
use gomarketplace_storage::{SqliteStore, StorageConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

use args::Cli;
use commands::cart::CartResponse;
use error::CliError;

/// Parses arguments, runs the command and prints the result as JSON.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Initialize Logging ── stderr, RUST_LOG or "info,sqlx=warn"          │
/// │  2. Load Config ───────── defaults → cart.toml → GOMARKETPLACE_* env    │
/// │  3. Open Storage ──────── SQLite (WAL), run migrations                  │
/// │  4. Activate Provider ─── load-on-init                                  │
/// │  5. Execute Command ───── JSON CartResponse or CliError on stdout       │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    match execute_cli(&cli).await {
        Ok(response) => print_json(&response, ExitCode::SUCCESS),
        Err(err) => print_json(&err, ExitCode::FAILURE),
    }
}

/// Runs one parsed invocation end to end.
pub async fn execute_cli(cli: &Cli) -> Result<CartResponse, CliError> {
    let mut config = CartConfig::load(cli.config.clone())?;
    if let Some(path) = &cli.database {
        config.storage.database_path = Some(path.clone());
    }

    let db_path = database_path(&config)?;
    info!(?db_path, "Database path determined");

    let storage = SqliteStore::new(StorageConfig::new(db_path)).await?;

    let provider = CartProvider::new(CartStore::new(Arc::new(storage.clone()), &config));
    let result = match provider.activate().await {
        Ok(_) => {
            let scope = Scope::root().provide(&provider);
            commands::execute(&cli.command, &scope).await
        }
        Err(err) => Err(CliError::from(err)),
    };

    storage.close().await;
    result
}

fn print_json<T: serde::Serialize>(value: &T, code: ExitCode) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{}", json);
            code
        }
        Err(err) => {
            eprintln!("failed to render output: {}", err);
            ExitCode::FAILURE
        }
    }
}

/// Initializes the tracing subscriber.
///
/// Logs go to stderr so stdout stays machine-readable.
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Resolves the database file and makes sure its directory exists.
fn database_path(config: &CartConfig) -> Result<PathBuf, CliError> {
    let path = config
        .database_path()
        .ok_or_else(|| CliError::config("Could not determine app data directory"))?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            CliError::config(format!("Cannot create {}: {}", parent.display(), e))
        })?;
    }

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::{AddArgs, Commands};

    fn cli(dir: &std::path::Path, command: Commands) -> Cli {
        Cli {
            command,
            config: Some(dir.join("absent.toml")),
            database: Some(dir.join("nested").join("cart.db")),
        }
    }

    async fn write_record(db: &std::path::Path, record: &str) {
        use gomarketplace_storage::KeyValueStore;

        let storage = SqliteStore::new(StorageConfig::new(db)).await.unwrap();
        storage
            .set(gomarketplace_core::CART_STORAGE_KEY, record)
            .await
            .unwrap();
        storage.close().await;
    }

    #[tokio::test]
    async fn test_cart_survives_between_invocations() {
        let dir = tempfile::tempdir().unwrap();

        let add = Commands::Add(AddArgs {
            id: "p1".to_string(),
            title: "Shirt".to_string(),
            image_url: "u".to_string(),
            price: 10.0,
        });
        execute_cli(&cli(dir.path(), add)).await.unwrap();
        execute_cli(&cli(dir.path(), Commands::Increment { id: "p1".to_string() }))
            .await
            .unwrap();

        let listed = execute_cli(&cli(dir.path(), Commands::List)).await.unwrap();

        assert_eq!(listed.items.len(), 1);
        assert_eq!(listed.items[0].title, "Shirt");
        assert_eq!(listed.items[0].quantity, 2);
    }

    #[tokio::test]
    async fn test_empty_database_lists_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let listed = execute_cli(&cli(dir.path(), Commands::List)).await.unwrap();
        assert!(listed.items.is_empty());
        assert_eq!(listed.totals.total_quantity, 0);
    }

    #[tokio::test]
    async fn test_strict_load_failure_releases_database() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("cart.toml");
        std::fs::write(&config_path, "[load]\npolicy = \"strict\"\n").unwrap();
        let db = dir.path().join("cart.db");
        write_record(&db, "{bad").await;

        let strict = Cli {
            command: Commands::List,
            config: Some(config_path),
            database: Some(db.clone()),
        };
        let err = execute_cli(&strict).await.unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::CorruptRecord);

        // Repair the record and run again.
        write_record(&db, "[]").await;
        let listed = execute_cli(&strict).await.unwrap();
        assert!(listed.items.is_empty());
    }
}
