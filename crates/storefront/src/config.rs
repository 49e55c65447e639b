//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `ECLAT_DATA_DIR` - Directory holding the store files (default: .eclat)
//! - `ECLAT_CURRENCY_SYMBOL` - Display currency glyph (default: ₹)
//! - `ECLAT_CONVERSION_RATE` - Display units per base unit (default: 83)
//! - `ECLAT_DIGIT_GROUPING` - `indian` or `western` (default: indian)
//! - `ECLAT_PROCESSING_DELAY_MS` - Checkout processing delay (default: 2000)
//! - `ECLAT_MUSIC_AUTOPLAY` - Start background music on page load (default: true)
//! - `ECLAT_MUSIC_VOLUME` - Background music volume, 0 to 1 (default: 0.5)
//! - `ECLAT_AUTOPLAY_DELAY_MS` - Delay before auto-play (default: 500)

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use rust_decimal::Decimal;
use thiserror::Error;

use eclat_core::{DigitGrouping, DisplayCurrency};

const DEFAULT_DATA_DIR: &str = ".eclat";
const DEFAULT_PROCESSING_DELAY_MS: u64 = 2000;
const DEFAULT_AUTOPLAY_DELAY_MS: u64 = 500;
const DEFAULT_MUSIC_VOLUME: f32 = 0.5;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Directory for `local.json` and `session.json`
    pub data_dir: PathBuf,
    /// Currency prices are displayed in
    pub currency: DisplayCurrency,
    /// How long "Processing..." shows before the receipt
    pub processing_delay: Duration,
    /// Background music settings
    pub music: MusicConfig,
}

/// Background music settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MusicConfig {
    /// Try to start playback when the player is shown
    pub autoplay: bool,
    /// Playback volume between 0 and 1
    pub volume: f32,
    /// Wait before the auto-play attempt
    pub autoplay_delay: Duration,
}

impl Default for MusicConfig {
    fn default() -> Self {
        Self {
            autoplay: true,
            volume: DEFAULT_MUSIC_VOLUME,
            autoplay_delay: Duration::from_millis(DEFAULT_AUTOPLAY_DELAY_MS),
        }
    }
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            currency: DisplayCurrency::rupee(),
            processing_delay: Duration::from_millis(DEFAULT_PROCESSING_DELAY_MS),
            music: MusicConfig::default(),
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
    /// Returns `ConfigError` if a variable is set to an unparseable or
    /// out-of-range value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparseable or
    /// out-of-range value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let data_dir = lookup("ECLAT_DATA_DIR").map_or(defaults.data_dir, PathBuf::from);

        let symbol = lookup("ECLAT_CURRENCY_SYMBOL").unwrap_or(defaults.currency.symbol);
        let rate: Decimal =
            parse_or("ECLAT_CONVERSION_RATE", &lookup, defaults.currency.rate)?;
        if rate <= Decimal::ZERO {
            return Err(ConfigError::InvalidEnvVar(
                "ECLAT_CONVERSION_RATE".to_string(),
                "must be greater than zero".to_string(),
            ));
        }
        let grouping: DigitGrouping =
            parse_or("ECLAT_DIGIT_GROUPING", &lookup, defaults.currency.grouping)?;

        let processing_delay = Duration::from_millis(parse_or(
            "ECLAT_PROCESSING_DELAY_MS",
            &lookup,
            DEFAULT_PROCESSING_DELAY_MS,
        )?);

        let music = MusicConfig::from_lookup(&lookup)?;

        Ok(Self {
            data_dir,
            currency: DisplayCurrency {
                symbol,
                rate,
                grouping,
            },
            processing_delay,
            music,
        })
    }
}

impl MusicConfig {
    fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let autoplay = parse_or("ECLAT_MUSIC_AUTOPLAY", lookup, true)?;
        let volume: f32 = parse_or("ECLAT_MUSIC_VOLUME", lookup, DEFAULT_MUSIC_VOLUME)?;
        if !(0.0..=1.0).contains(&volume) {
            return Err(ConfigError::InvalidEnvVar(
                "ECLAT_MUSIC_VOLUME".to_string(),
                format!("must be between 0 and 1 (got {volume})"),
            ));
        }
        let autoplay_delay = Duration::from_millis(parse_or(
            "ECLAT_AUTOPLAY_DELAY_MS",
            lookup,
            DEFAULT_AUTOPLAY_DELAY_MS,
        )?);

        Ok(Self {
            autoplay,
            volume,
            autoplay_delay,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse a variable if set, falling back to `default` when absent.
fn parse_or<T, F>(key: &str, lookup: &F, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
        None => Ok(default),
    }
}
