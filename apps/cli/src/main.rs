//! # GoMarketplace CLI Entry Point
//!
//! ## Startup Sequence
//! 1. Parse arguments
//! 2. Initialize tracing (stderr)
//! 3. Load configuration
//! 4. Open the SQLite store & run migrations
//! 5. Activate the cart provider (load-on-init)
//! 6. Run the command, print JSON to stdout

use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    // The actual setup is in lib.rs for testability
    gomarketplace_cli::run().await
}
