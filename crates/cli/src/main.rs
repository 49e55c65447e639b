//! Éclat Essence CLI - drive the storefront against a local store.
//!
//! # Usage
//!
//! ```bash
//! # Create an account and log in
//! eclat signup -n "Ava Sharma" -e ava@mail.com --password rosewater
//! eclat login -e ava@mail.com --password rosewater
//!
//! # Browse and fill the cart
//! eclat catalog --category women --sort price-low
//! eclat cart add rose-noir
//! eclat cart update 0 1
//!
//! # Place the order and print the receipt
//! eclat checkout --first-name Ava --last-name Sharma ... --payment upi
//! eclat receipt --print
//! ```
//!
//! # Commands
//!
//! - `signup`, `login`, `logout`, `whoami` - Account session
//! - `home` - Home page with featured products
//! - `catalog` - Products page with filter and sort
//! - `cart` - Show and edit the cart
//! - `checkout` - Submit the cart as an order
//! - `receipt` - Show the last order
//! - `music` - Background music player status
//! - `session end` - End the browsing session

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::print_stdout)]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use secrecy::SecretString;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use eclat_core::PaymentMethod;
use eclat_storefront::config::StorefrontConfig;
use eclat_storefront::services::catalog::{CategoryFilter, SortOrder};
use eclat_storefront::state::AppState;

mod commands;
mod error;
mod output;

use error::CliError;

#[derive(Parser)]
#[command(name = "eclat")]
#[command(author, version, about = "Éclat Essence storefront CLI")]
struct Cli {
    /// Directory holding the local and session stores
    #[arg(long, global = true, env = "ECLAT_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account
    Signup {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        email: String,

        #[arg(long, env = "ECLAT_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Log in
    Login {
        #[arg(short, long)]
        email: String,

        #[arg(long, env = "ECLAT_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Log out and empty the cart
    Logout,
    /// Show who is logged in
    Whoami,
    /// Show the home page
    Home {
        /// Follow the logo link, replaying the intro loader
        #[arg(long)]
        replay_intro: bool,

        /// YAML catalog file (defaults to the built-in collection)
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Browse the products page
    Catalog {
        /// Category to show (`all` or a category name)
        #[arg(short, long, default_value = "all")]
        category: CategoryFilter,

        /// `featured`, `price-low`, `price-high` or `name`
        #[arg(short, long, default_value = "featured")]
        sort: SortOrder,

        /// YAML catalog file (defaults to the built-in collection)
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Show and edit the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Submit the cart as an order
    Checkout(Box<CheckoutArgs>),
    /// Show the last order
    Receipt {
        /// Print the plain-text receipt
        #[arg(long)]
        print: bool,
    },
    /// Show the background music player
    Music,
    /// Browsing session
    Session {
        #[command(subcommand)]
        action: SessionAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show the cart
    Show,
    /// Add one unit of a product
    Add {
        product_id: String,

        /// YAML catalog file (defaults to the built-in collection)
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Change a line's quantity by `delta`
    Update {
        index: usize,

        #[arg(allow_hyphen_values = true)]
        delta: i64,
    },
    /// Remove a line
    Remove { index: usize },
    /// Empty the cart
    Clear,
    /// Continue to checkout
    Checkout,
}

#[derive(Subcommand)]
enum SessionAction {
    /// End the browsing session, clearing its transient flags
    End,
}

/// Checkout form fields.
#[derive(clap::Args)]
struct CheckoutArgs {
    #[arg(long)]
    first_name: String,
    #[arg(long)]
    last_name: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    phone: String,
    #[arg(long)]
    address: String,
    #[arg(long)]
    city: String,
    #[arg(long)]
    state: String,
    #[arg(long)]
    zip: String,
    #[arg(long)]
    country: String,

    /// `card`, `paypal`, `upi` or `cod`
    #[arg(long, default_value = "card")]
    payment: PaymentMethod,

    #[arg(long, env = "ECLAT_CARD_NUMBER", hide_env_values = true)]
    card_number: Option<String>,
    #[arg(long)]
    card_name: Option<String>,
    /// `MM/YY`
    #[arg(long)]
    expiry: Option<String>,
    #[arg(long, env = "ECLAT_CARD_CVV", hide_env_values = true)]
    cvv: Option<String>,
}

fn init_tracing(json: bool) {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "eclat_cli=info,eclat_storefront=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json.then(|| tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr)))
        .with((!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr)))
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let mut config = StorefrontConfig::from_env()?;
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }
    let state = AppState::open(config)?;

    match cli.command {
        Commands::Signup {
            name,
            email,
            password,
        } => commands::account::signup(&state, name, email, SecretString::from(password)),
        Commands::Login { email, password } => {
            commands::account::login(&state, email, SecretString::from(password));
        }
        Commands::Logout => commands::account::logout(&state),
        Commands::Whoami => commands::account::whoami(&state),
        Commands::Home { replay_intro, file } => {
            let catalog = commands::catalog::load(file.as_deref()).await?;
            commands::catalog::home(&state, &catalog, replay_intro);
        }
        Commands::Catalog {
            category,
            sort,
            file,
        } => {
            let catalog = commands::catalog::load(file.as_deref()).await?;
            commands::catalog::browse(&state, &catalog, category, sort);
        }
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&state),
            CartAction::Add { product_id, file } => {
                let catalog = commands::catalog::load(file.as_deref()).await?;
                commands::cart::add(&state, &catalog, &product_id);
            }
            CartAction::Update { index, delta } => commands::cart::update(&state, index, delta),
            CartAction::Remove { index } => commands::cart::remove(&state, index),
            CartAction::Clear => commands::cart::clear(&state),
            CartAction::Checkout => commands::cart::proceed(&state),
        },
        Commands::Checkout(args) => {
            commands::checkout::place_order(&state, args.into_form()).await;
        }
        Commands::Receipt { print } => commands::checkout::receipt(&state, print),
        Commands::Music => commands::music::status(&state).await,
        Commands::Session { action } => match action {
            SessionAction::End => commands::account::end_session(&state)?,
        },
    }

    Ok(())
}

impl CheckoutArgs {
    fn into_form(self) -> eclat_storefront::services::checkout::CheckoutForm {
        use eclat_storefront::services::checkout::{CardDetails, CheckoutForm, format_expiry};

        let card = self.payment.requires_card_details().then(|| CardDetails {
            number: SecretString::from(self.card_number.unwrap_or_default()),
            holder: self.card_name.unwrap_or_default(),
            expiry: self.expiry.as_deref().map(format_expiry).unwrap_or_default(),
            cvv: SecretString::from(self.cvv.unwrap_or_default()),
        });

        CheckoutForm {
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
            address: self.address,
            city: self.city,
            state: self.state,
            zip: self.zip,
            country: self.country,
            payment_method: self.payment,
            card,
        }
    }
}
