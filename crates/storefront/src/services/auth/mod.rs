//! Authentication service.
//!
//! Email and password accounts kept in the local store. Signing up registers
//! an account without logging in; logging in copies the account's name and
//! email into the session record that gates the cart and the catalog.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use secrecy::{ExposeSecret, SecretString};
use tracing::instrument;

use eclat_core::{Email, PasswordDigest};

use crate::models::{Cart, CurrentUser, RegisteredUser, keys};
use crate::services::music;
use crate::state::AppState;
use crate::storage::Storage;

/// Whether a shopper is logged in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    LoggedOut,
    LoggedIn(CurrentUser),
}

impl SessionState {
    /// The logged-in shopper, if any.
    #[must_use]
    pub const fn user(&self) -> Option<&CurrentUser> {
        match self {
            Self::LoggedOut => None,
            Self::LoggedIn(user) => Some(user),
        }
    }

    /// Whether a shopper is logged in.
    #[must_use]
    pub const fn is_logged_in(&self) -> bool {
        matches!(self, Self::LoggedIn(_))
    }
}

/// Authentication service.
///
/// Handles signup, login, logout and session lookup.
pub struct AuthService<'a> {
    local: &'a Storage,
    session: &'a Storage,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub fn new(state: &'a AppState) -> Self {
        Self {
            local: state.local(),
            session: state.session(),
        }
    }

    /// Register a new account.
    ///
    /// Does not log the shopper in.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingName` or `AuthError::MissingPassword` for
    /// blank input, `AuthError::InvalidEmail` if the email format is invalid,
    /// and `AuthError::DuplicateEmail` if the email is already registered.
    #[instrument(skip(self, name, password))]
    pub fn signup(
        &self,
        name: &str,
        email: &str,
        password: &SecretString,
    ) -> Result<RegisteredUser, AuthError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AuthError::MissingName);
        }
        let email = Email::parse(email)?;
        let password = password.expose_secret();
        if password.is_empty() {
            return Err(AuthError::MissingPassword);
        }

        let mut users = self.registered_users()?;
        if users.iter().any(|user| user.email == email) {
            return Err(AuthError::DuplicateEmail);
        }

        let user = RegisteredUser {
            name: name.to_owned(),
            email,
            password_hash: hash_password(password)?,
        };
        users.push(user.clone());
        self.local.save(keys::USERS, &users)?;

        tracing::info!(email = %user.email, "Account registered");
        Ok(user)
    }

    /// Log in with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` if the email format is invalid, and
    /// `AuthError::InvalidCredentials` if no account matches.
    #[instrument(skip(self, password))]
    pub fn login(&self, email: &str, password: &SecretString) -> Result<CurrentUser, AuthError> {
        let email = Email::parse(email)?;
        let password = password.expose_secret();
        if password.is_empty() {
            return Err(AuthError::MissingPassword);
        }

        let users = self.registered_users()?;
        let account = users
            .iter()
            .find(|user| user.email == email)
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &account.password_hash)?;

        let user = account.to_current_user();
        self.local.save(keys::CURRENT_USER, &user)?;

        tracing::info!(email = %user.email, "User logged in");
        Ok(user)
    }

    /// Log out, emptying the cart and forgetting the music position.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` if a store cannot be written.
    #[instrument(skip(self))]
    pub fn logout(&self) -> Result<(), AuthError> {
        self.local.remove(keys::CURRENT_USER)?;
        self.local.save(keys::CART, &Cart::new())?;
        music::forget_saved_state(self.session)?;

        tracing::info!("User logged out");
        Ok(())
    }

    /// The current session state.
    ///
    /// A malformed session record is discarded and reads as logged out.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` if the store cannot be read.
    pub fn session(&self) -> Result<SessionState, AuthError> {
        Ok(self
            .current_user()?
            .map_or(SessionState::LoggedOut, SessionState::LoggedIn))
    }

    /// The logged-in shopper, if any.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` if the store cannot be read.
    pub fn current_user(&self) -> Result<Option<CurrentUser>, AuthError> {
        Ok(self.local.load_or_discard(keys::CURRENT_USER)?)
    }

    /// Whether a shopper is logged in.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` if the store cannot be read.
    pub fn is_logged_in(&self) -> Result<bool, AuthError> {
        Ok(self.current_user()?.is_some())
    }

    /// All registered accounts. An unreadable list is discarded.
    fn registered_users(&self) -> Result<Vec<RegisteredUser>, AuthError> {
        Ok(self
            .local
            .load_or_discard::<Vec<RegisteredUser>>(keys::USERS)?
            .unwrap_or_default())
    }
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<PasswordDigest, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| PasswordDigest::new(hash.to_string()))
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a stored digest.
fn verify_password(password: &str, digest: &PasswordDigest) -> Result<(), AuthError> {
    let parsed_hash =
        PasswordHash::new(digest.as_str()).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}
