//! Signup, login and logout actions from the navigation bar.

use secrecy::SecretString;
use tracing::instrument;

use super::{Notice, PageOutcome};
use crate::error::Result;
use crate::services::auth::AuthService;
use crate::state::AppState;

/// Signup form data.
#[derive(Debug, Clone)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: SecretString,
}

/// Login form data.
#[derive(Debug, Clone)]
pub struct LoginForm {
    pub email: String,
    pub password: SecretString,
}

/// Register an account and reopen the login dialog for it.
///
/// # Errors
///
/// Returns `AppError::Auth` for invalid input or an already-registered email.
#[instrument(skip(state, form), fields(email = %form.email))]
pub fn signup(state: &AppState, form: &SignupForm) -> Result<PageOutcome<()>> {
    AuthService::new(state).signup(&form.name, &form.email, &form.password)?;
    Ok(PageOutcome::PromptLogin(Notice::success(
        "Account created! Please login to continue.",
    )))
}

/// Log in.
///
/// # Errors
///
/// Returns `AppError::Auth` if the email or password is wrong.
#[instrument(skip(state, form), fields(email = %form.email))]
pub fn login(state: &AppState, form: &LoginForm) -> Result<PageOutcome<()>> {
    AuthService::new(state).login(&form.email, &form.password)?;
    Ok(PageOutcome::Notify(Notice::success(
        "Welcome back! Login successful.",
    )))
}

/// Log out, emptying the cart.
///
/// # Errors
///
/// Returns `AppError::Auth` if a store cannot be written.
#[instrument(skip(state))]
pub fn logout(state: &AppState) -> Result<PageOutcome<()>> {
    AuthService::new(state).logout()?;
    Ok(PageOutcome::Notify(Notice::success("Logged out successfully!")))
}
