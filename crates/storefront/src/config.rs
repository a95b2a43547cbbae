//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `KALARTZ_CURRENCY` - Store currency code (default: USD)
//! - `KALARTZ_MAX_LINE_QUANTITY` - Quantity ceiling per cart line (default: 99)
//! - `KALARTZ_PAYMENT_TIMEOUT_SECS` - Checkout payment timeout (default: 30)
//! - `KALARTZ_PAYMENT_LATENCY_MS` - Simulated processor latency (default: 2000)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::time::Duration;

use kalartz_core::CurrencyCode;
use thiserror::Error;

const DEFAULT_MAX_LINE_QUANTITY: u32 = 99;
const DEFAULT_PAYMENT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_PAYMENT_LATENCY_MS: u64 = 2000;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Currency every price and total is displayed in
    pub currency: CurrencyCode,
    /// Highest quantity a single cart line can reach
    pub max_line_quantity: u32,
    /// Payment processor settings
    pub payment: PaymentConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

/// Payment processor settings.
#[derive(Debug, Clone)]
pub struct PaymentConfig {
    /// How long checkout waits for the processor before failing
    pub timeout: Duration,
    /// Artificial latency of the simulated processor
    pub simulated_latency: Duration,
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_PAYMENT_TIMEOUT_SECS),
            simulated_latency: Duration::from_millis(DEFAULT_PAYMENT_LATENCY_MS),
        }
    }
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            currency: CurrencyCode::default(),
            max_line_quantity: DEFAULT_MAX_LINE_QUANTITY,
            payment: PaymentConfig::default(),
            sentry_dsn: None,
            sentry_environment: None,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but malformed or out of
    /// range.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let currency = get_env_or_default("KALARTZ_CURRENCY", CurrencyCode::default().code())
            .parse::<CurrencyCode>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("KALARTZ_CURRENCY".to_string(), e.to_string())
            })?;
        let max_line_quantity =
            get_positive_env("KALARTZ_MAX_LINE_QUANTITY", DEFAULT_MAX_LINE_QUANTITY)?;

        let payment = PaymentConfig::from_env()?;

        Ok(Self {
            currency,
            max_line_quantity,
            payment,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }
}

impl PaymentConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let timeout_secs =
            get_positive_env("KALARTZ_PAYMENT_TIMEOUT_SECS", DEFAULT_PAYMENT_TIMEOUT_SECS)?;
        let latency_ms = get_env_or_default(
            "KALARTZ_PAYMENT_LATENCY_MS",
            &DEFAULT_PAYMENT_LATENCY_MS.to_string(),
        )
        .parse::<u64>()
        .map_err(|e| {
            ConfigError::InvalidEnvVar("KALARTZ_PAYMENT_LATENCY_MS".to_string(), e.to_string())
        })?;

        Ok(Self {
            timeout: Duration::from_secs(timeout_secs),
            simulated_latency: Duration::from_millis(latency_ms),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Get a numeric environment variable that must be at least 1.
fn get_positive_env<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr + PartialOrd + From<u8>,
    T::Err: std::fmt::Display,
{
    let Some(raw) = get_optional_env(key) else {
        return Ok(default);
    };
    let value = raw
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if value < T::from(1) {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "must be at least 1".to_string(),
        ));
    }
    Ok(value)
}
