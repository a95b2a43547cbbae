//! Kalartz CLI - drive the storefront state machines from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # List the demo catalog
//! kalartz catalog
//!
//! # Register a customer (signed in immediately) or a vendor (pending approval)
//! kalartz register -e jane@example.com -n "Jane" -r customer
//!
//! # Sign in, fill the cart, and pay through the simulated processor
//! kalartz checkout -e customer@kalartz.com -r customer -p 1 -p 3 -p 3 --method upi
//! ```
//!
//! # Environment Variables
//!
//! See `kalartz_storefront::config` for the storefront settings. `RUST_LOG`
//! overrides the default log filter.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kalartz_core::{PaymentMethod, Role};
use kalartz_storefront::config::StorefrontConfig;

mod commands;

use commands::CommandError;

#[derive(Parser)]
#[command(name = "kalartz")]
#[command(author, version, about = "Kalartz marketplace storefront")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List catalog products with availability
    Catalog,
    /// Register a new account
    Register {
        /// Email address
        #[arg(short, long)]
        email: String,

        /// Display name
        #[arg(short, long)]
        name: String,

        /// Account type (`customer` or `vendor`)
        #[arg(short, long, default_value = "customer")]
        role: Role,
    },
    /// Sign in, add products to the cart, and check out
    Checkout {
        /// Email address of an existing account
        #[arg(short, long)]
        email: String,

        /// Account type (`customer`, `vendor`, or `admin`)
        #[arg(short, long, default_value = "customer")]
        role: Role,

        /// Password (any non-empty value is accepted)
        #[arg(long, default_value = "password")]
        password: String,

        /// Product ID to add; repeat to add more units
        #[arg(short, long = "product", required = true)]
        products: Vec<i32>,

        /// Payment method (`card`, `upi`, `wallet`, `razorpay`, `phonepe`)
        #[arg(short, long, default_value = "card")]
        method: PaymentMethod,
    },
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "kalartz_storefront=info,kalartz_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match StorefrontConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_tracing();
            tracing::error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    // Sentry must be initialized before the tracing subscriber
    let _sentry_guard = init_sentry(&config);
    init_tracing();

    if let Err(e) = run(cli, config).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: StorefrontConfig) -> Result<(), CommandError> {
    match cli.command {
        Commands::Catalog => commands::catalog::list(&config),
        Commands::Register { email, name, role } => {
            commands::register::register(&email, &name, role)?;
        }
        Commands::Checkout {
            email,
            role,
            password,
            products,
            method,
        } => {
            let request = commands::checkout::CheckoutArgs {
                email,
                role,
                password,
                products,
                method,
            };
            commands::checkout::run(config, request).await?;
        }
    }
    Ok(())
}
