//! CLI command implementations.

pub mod cart;
pub mod checkout;
pub mod config;
pub mod forms;

use clap::{Args, Subcommand};
use printease_commerce::checkout::OrderSubmitter;
use printease_commerce::session::{SessionSignal, StorefrontSession};
use printease_store::Store;

use crate::output::{NotificationLog, Output};

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: CartCommand,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Add one unit of a product.
    Add {
        /// Product id.
        #[arg(long)]
        id: String,

        /// Display name.
        #[arg(long)]
        name: String,

        /// Unit price in major units (e.g. 49.99).
        #[arg(long)]
        price: String,

        /// Product image path or URL.
        #[arg(long, default_value = "")]
        image: String,
    },
    /// List cart contents.
    List,
    /// Change a row's quantity by a delta; zero or below removes it.
    Qty {
        /// Product id.
        id: String,

        /// Amount to add (negative to subtract).
        #[arg(allow_hyphen_values = true)]
        delta: i64,
    },
    /// Remove a row.
    Remove {
        /// Product id.
        id: String,
    },
    /// Empty the cart.
    Clear,
}

/// Arguments for the checkout command.
#[derive(Args)]
pub struct CheckoutArgs {
    /// Payment method: cod, gcash, paymaya or bank.
    #[arg(short, long)]
    pub payment: Option<String>,

    /// Full name.
    #[arg(long)]
    pub name: Option<String>,

    /// Email address.
    #[arg(long)]
    pub email: Option<String>,

    /// Phone number.
    #[arg(long)]
    pub phone: Option<String>,

    /// Delivery address.
    #[arg(long)]
    pub address: Option<String>,

    /// Skip real-time waits.
    #[arg(long)]
    pub no_wait: bool,
}

/// Arguments for the contact command.
#[derive(Args)]
pub struct ContactArgs {
    #[arg(long, default_value = "")]
    pub name: String,

    #[arg(long, default_value = "")]
    pub email: String,

    #[arg(long, default_value = "")]
    pub subject: String,

    #[arg(long, default_value = "")]
    pub message: String,

    /// Skip real-time waits.
    #[arg(long)]
    pub no_wait: bool,
}

/// Arguments for the design command.
#[derive(Args)]
pub struct DesignArgs {
    /// Item to print on (t-shirt, mug, sticker, ...).
    #[arg(long, default_value = "")]
    pub item_type: String,

    #[arg(long, default_value_t = 1)]
    pub quantity: i64,

    #[arg(long, default_value = "")]
    pub notes: String,

    #[arg(long, default_value = "")]
    pub email: String,

    /// Artwork file to upload.
    #[arg(long)]
    pub file: Option<String>,

    /// Skip real-time waits.
    #[arg(long)]
    pub no_wait: bool,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,

        /// Write printease.json instead of printease.toml.
        #[arg(long)]
        as_json: bool,
    },
    /// Print the path of the config file in use.
    Path,
}

/// Run session timers until `done` holds or nothing is pending.
///
/// Sleeps in real time between timers unless `no_wait` is set. Notifications
/// are printed as they appear. Returns every signal observed.
pub async fn drive_until<S, O>(
    session: &mut StorefrontSession<S, O>,
    output: &Output,
    log: &mut NotificationLog,
    no_wait: bool,
    done: impl Fn(&StorefrontSession<S, O>, &[SessionSignal]) -> bool,
) -> Vec<SessionSignal>
where
    S: Store,
    O: OrderSubmitter,
{
    let mut seen = Vec::new();
    log.show_new(output, session.notifications());

    while let Some(wait) = session.time_until_next_event() {
        if !no_wait && !wait.is_zero() {
            let spinner = output.spinner("Waiting...");
            tokio::time::sleep(wait).await;
            spinner.finish_and_clear();
        }

        seen.extend(session.advance(wait));
        log.show_new(output, session.notifications());
        tracing::debug!(now_ms = session.now().as_millis() as u64, "advanced session clock");

        if done(session, &seen) {
            break;
        }
    }

    seen
}
