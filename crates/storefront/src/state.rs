//! Application state shared across page controllers.

use std::sync::Arc;

use eclat_core::DisplayCurrency;

use crate::config::StorefrontConfig;
use crate::storage::{FileStore, Storage, StorageError};

/// File name of the durable store inside the data directory.
pub const LOCAL_STORE_FILE: &str = "local.json";

/// File name of the browsing-session store inside the data directory.
pub const SESSION_STORE_FILE: &str = "session.json";

/// Application state shared across all page controllers.
///
/// This struct is cheaply cloneable via `Arc`. It owns the two stores; every
/// controller reloads what it needs from them on entry, so no page keeps
/// state of its own between actions.
#[derive(Clone, Debug)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

#[derive(Debug)]
struct AppStateInner {
    config: StorefrontConfig,
    local: Storage,
    session: Storage,
}

impl AppState {
    /// Create application state over existing stores.
    #[must_use]
    pub fn new(config: StorefrontConfig, local: Storage, session: Storage) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                local,
                session,
            }),
        }
    }

    /// State backed by fresh in-memory stores.
    #[must_use]
    pub fn in_memory(config: StorefrontConfig) -> Self {
        Self::new(config, Storage::in_memory(), Storage::in_memory())
    }

    /// State backed by the store files in `config.data_dir`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if either file exists but cannot be read or
    /// parsed.
    pub fn open(config: StorefrontConfig) -> Result<Self, StorageError> {
        let local = FileStore::open(config.data_dir.join(LOCAL_STORE_FILE))?;
        let session = FileStore::open(config.data_dir.join(SESSION_STORE_FILE))?;

        tracing::debug!(data_dir = %config.data_dir.display(), "Opened storefront stores");

        Ok(Self::new(
            config,
            Storage::new(Arc::new(local)),
            Storage::new(Arc::new(session)),
        ))
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// The durable store (cart, accounts, session user, last order).
    #[must_use]
    pub fn local(&self) -> &Storage {
        &self.inner.local
    }

    /// The browsing-session store (loader flag, music position).
    #[must_use]
    pub fn session(&self) -> &Storage {
        &self.inner.session
    }

    /// Currency used for every displayed amount.
    #[must_use]
    pub fn currency(&self) -> &DisplayCurrency {
        &self.inner.config.currency
    }

    /// Drop everything scoped to the browsing session, as closing the
    /// browser would.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the session store cannot be written.
    pub fn end_browsing_session(&self) -> Result<(), StorageError> {
        self.session().clear()?;
        tracing::info!("Browsing session ended");
        Ok(())
    }
}
