//! PrintEase CLI - command-line storefront.
//!
//! Commands:
//! - `printease cart` - Add, list, change and remove cart items
//! - `printease totals` - Show subtotal, shipping and total
//! - `printease checkout` - Place an order for the current cart
//! - `printease contact` - Send the contact form
//! - `printease design` - Send a custom design request
//! - `printease config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use printease_commerce::CommerceError;
use tracing_subscriber::EnvFilter;

use commands::{CartArgs, CheckoutArgs, ConfigArgs, ContactArgs, DesignArgs};

/// PrintEase - custom printing storefront from the terminal
#[derive(Parser)]
#[command(name = "printease")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the shopping cart
    Cart(CartArgs),

    /// Show cart totals
    Totals,

    /// Check out the current cart
    Checkout(CheckoutArgs),

    /// Send a message through the contact form
    Contact(ContactArgs),

    /// Request a custom design print
    Design(DesignArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let config_path = cli.config.as_deref();
    let ctx = context::Context::load(config_path, output)?;

    // Execute command
    let result = match cli.command {
        Commands::Cart(args) => commands::cart::run(args, &ctx).await,
        Commands::Totals => commands::cart::totals(&ctx).await,
        Commands::Checkout(args) => commands::checkout::run(args, &ctx).await,
        Commands::Contact(args) => commands::forms::contact(args, &ctx).await,
        Commands::Design(args) => commands::forms::design(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        // 2 for input the shopper can fix, 1 for everything else
        let recoverable = e
            .downcast_ref::<CommerceError>()
            .is_some_and(CommerceError::is_recoverable);
        std::process::exit(if recoverable { 2 } else { 1 });
    }

    Ok(())
}

/// Logs go to stderr. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
