//! Registered shopper accounts.

use serde::{Deserialize, Serialize};

use eclat_core::{Email, PasswordDigest};

use super::session::CurrentUser;

/// A shopper who has signed up.
///
/// Registered accounts are keyed by email; the list never holds two entries
/// with the same address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredUser {
    pub name: String,
    pub email: Email,
    /// Argon2id digest of the password.
    pub password_hash: PasswordDigest,
}

impl RegisteredUser {
    /// The session identity for this account.
    #[must_use]
    pub fn to_current_user(&self) -> CurrentUser {
        CurrentUser {
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}
