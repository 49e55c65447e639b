//! CLI errors.
//!
//! Storefront actions report their own failures as notices; these are the
//! errors that stop a command before it reaches the storefront.

use std::path::PathBuf;

use thiserror::Error;

use eclat_storefront::config::ConfigError;
use eclat_storefront::storage::StorageError;

#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid environment configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The stores could not be opened.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// The catalog file could not be read.
    #[error("Failed to read catalog {}: {source}", path.display())]
    CatalogRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The catalog file is not valid YAML.
    #[error("Invalid catalog {}: {source}", path.display())]
    CatalogParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}
