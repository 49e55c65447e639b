//! Session-related types.
//!
//! Types stored in the local store to track who is logged in, plus the names
//! of every key the storefront reads or writes.

use serde::{Deserialize, Serialize};

use eclat_core::Email;

/// The logged-in shopper.
///
/// Minimal identity copied from the registered account on login. Never
/// carries credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    /// Display name shown in the navigation greeting.
    pub name: String,
    /// Email the shopper logged in with.
    pub email: Email,
}

/// Storage keys.
pub mod keys {
    /// Local key for the cart line array.
    pub const CART: &str = "eclatCart";

    /// Local key for the registered shopper list.
    pub const USERS: &str = "eclatUsers";

    /// Local key for the logged-in shopper.
    pub const CURRENT_USER: &str = "eclatUser";

    /// Local key for the last submitted order.
    pub const LAST_ORDER: &str = "eclatOrder";

    /// Session key set once the intro loader has played.
    pub const LOADER_SHOWN: &str = "loaderShown";

    /// Session key for the background music position in seconds.
    pub const MUSIC_CURRENT_TIME: &str = "musicCurrentTime";

    /// Session key set while background music is playing.
    pub const MUSIC_WAS_PLAYING: &str = "musicWasPlaying";
}
