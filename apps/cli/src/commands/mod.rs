//! # Commands Module
//!
//! ## Command Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  gomarketplace increment p1                                             │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  execute(&Commands::Increment { id }, &scope)                           │
//! │         │                                                               │
//! │         │  use_cart(&scope)  ◄── Err(OutsideProvider) if not provided   │
//! │         ▼                                                               │
//! │  cart::increment(&handle, "p1")                                         │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  CartResponse ──► JSON on stdout                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cart;

use gomarketplace_cart::{use_cart, Scope};
use gomarketplace_core::NewLineItem;

use crate::args::Commands;
use crate::error::CliError;
use cart::CartResponse;

/// Runs one command against the cart provided in `scope`.
pub async fn execute(command: &Commands, scope: &Scope) -> Result<CartResponse, CliError> {
    let handle = use_cart(scope)?;

    match command {
        Commands::List => Ok(cart::get_cart(&handle)),
        Commands::Add(args) => {
            let candidate =
                NewLineItem::new(&args.id, &args.title, &args.image_url, args.price);
            cart::add_to_cart(&handle, candidate).await
        }
        Commands::Increment { id } => cart::increment(&handle, id).await,
        Commands::Decrement { id } => cart::decrement(&handle, id).await,
    }
}
