//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// GoMarketplace cart
///
/// Inspect and change the locally persisted shopping cart.
#[derive(Parser, Debug)]
#[command(name = "gomarketplace")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true, env = "GOMARKETPLACE_CONFIG")]
    pub config: Option<PathBuf>,

    /// SQLite database file (overrides config)
    #[arg(long, global = true)]
    pub database: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Print the cart
    List,

    /// Add one unit of a product
    Add(AddArgs),

    /// Add one unit to a product already in the cart
    Increment {
        /// Product id
        id: String,
    },

    /// Remove one unit from a product (stops at zero)
    Decrement {
        /// Product id
        id: String,
    },
}

/// Arguments for the add command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct AddArgs {
    /// Product id
    #[arg(long)]
    pub id: String,

    /// Display title
    #[arg(long)]
    pub title: String,

    /// Display image URL
    #[arg(long)]
    pub image_url: String,

    /// Unit price
    #[arg(long, value_parser = parse_price)]
    pub price: f64,
}

/// Parses a price, refusing NaN and infinities.
fn parse_price(raw: &str) -> Result<f64, String> {
    let price: f64 = raw.parse().map_err(|e| format!("{}", e))?;
    if !price.is_finite() {
        return Err(format!("price must be a finite number, got {}", raw));
    }
    Ok(price)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_add() {
        let cli = Cli::try_parse_from([
            "gomarketplace",
            "add",
            "--id",
            "p1",
            "--title",
            "Shirt",
            "--image-url",
            "u",
            "--price",
            "10",
        ])
        .unwrap();

        assert_eq!(
            cli.command,
            Commands::Add(AddArgs {
                id: "p1".to_string(),
                title: "Shirt".to_string(),
                image_url: "u".to_string(),
                price: 10.0,
            })
        );
    }

    #[test]
    fn test_parse_global_database_after_subcommand() {
        let cli =
            Cli::try_parse_from(["gomarketplace", "increment", "p1", "--database", "/tmp/c.db"])
                .unwrap();

        assert_eq!(cli.command, Commands::Increment { id: "p1".to_string() });
        assert_eq!(cli.database, Some(PathBuf::from("/tmp/c.db")));
    }

    #[test]
    fn test_add_rejects_non_finite_price() {
        for price in ["NaN", "inf", "-inf"] {
            let result = Cli::try_parse_from([
                "gomarketplace",
                "add",
                "--id",
                "p1",
                "--title",
                "Shirt",
                "--image-url",
                "u",
                "--price",
                price,
            ]);
            assert!(result.is_err(), "accepted --price {}", price);
        }
    }

    #[test]
    fn test_add_requires_price() {
        let result = Cli::try_parse_from(["gomarketplace", "add", "--id", "p1"]);
        assert!(result.is_err());
    }
}
