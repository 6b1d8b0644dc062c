//! Cartwheel CLI - command-line storefront surface.
//!
//! Plays the role of a UI surface over the session engine: it fetches
//! product snapshots from a local catalog file, runs the caller-side checks
//! (self-purchase), and drives the cart and favorites stores.
//!
//! # Usage
//!
//! ```bash
//! # Add one unit of a product to the cart
//! cartwheel cart add prod-123
//!
//! # Show cart lines and totals
//! cartwheel cart show
//!
//! # Toggle a product in the favorites list
//! cartwheel fav toggle prod-123
//!
//! # Buy now: validate, add to cart, hand off to checkout
//! cartwheel buy prod-123
//! ```
//!
//! # Commands
//!
//! - `cart add|remove|delete|clear|show` - operate on the shopping cart
//! - `fav add|remove|toggle|show` - operate on the favorites list
//! - `buy` - add-to-cart validation plus checkout hand-off
//! - `checkout` - hand the current cart off to checkout

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod catalog;
mod commands;
mod config;

#[derive(Parser)]
#[command(name = "cartwheel")]
#[command(author, version, about = "Cartwheel storefront CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Operate on the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Operate on the favorites list
    Fav {
        #[command(subcommand)]
        action: FavAction,
    },
    /// Buy a product now: same validation as `cart add`, then checkout
    Buy {
        /// Product ID from the catalog
        id: String,
    },
    /// Hand the current cart off to checkout
    Checkout,
}

#[derive(Subcommand)]
enum CartAction {
    /// Add one unit of a product
    Add {
        /// Product ID from the catalog
        id: String,
    },
    /// Step a product's quantity down by one
    Remove {
        /// Product ID from the catalog
        id: String,
    },
    /// Delete a product's line outright, regardless of quantity
    Delete {
        /// Product ID from the catalog
        id: String,
    },
    /// Empty the cart
    Clear,
    /// Show cart lines and totals
    Show,
}

#[derive(Subcommand)]
enum FavAction {
    /// Save a product
    Add {
        /// Product ID from the catalog
        id: String,
    },
    /// Remove a saved product
    Remove {
        /// Product ID from the catalog
        id: String,
    },
    /// Toggle a product's membership
    Toggle {
        /// Product ID from the catalog
        id: String,
    },
    /// Show saved products
    Show,
}

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), commands::CliError> {
    let config = config::CliConfig::from_env();
    let surface = commands::Surface::open(&config);

    match cli.command {
        Commands::Cart { action } => match action {
            CartAction::Add { id } => commands::cart::add(&surface, &id.into())?,
            CartAction::Remove { id } => commands::cart::remove(&surface, &id.into()),
            CartAction::Delete { id } => commands::cart::delete(&surface, &id.into()),
            CartAction::Clear => commands::cart::clear(&surface),
            CartAction::Show => commands::cart::show(&surface),
        },
        Commands::Fav { action } => match action {
            FavAction::Add { id } => commands::fav::add(&surface, &id.into())?,
            FavAction::Remove { id } => commands::fav::remove(&surface, &id.into()),
            FavAction::Toggle { id } => commands::fav::toggle(&surface, &id.into())?,
            FavAction::Show => commands::fav::show(&surface),
        },
        Commands::Buy { id } => commands::checkout::buy_now(&surface, &id.into())?,
        Commands::Checkout => commands::checkout::checkout(&surface)?,
    }
    Ok(())
}
