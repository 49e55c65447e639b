//! Account session commands.

use secrecy::SecretString;

use eclat_storefront::pages::{self, account};
use eclat_storefront::services::auth::{AuthService, SessionState};
use eclat_storefront::state::AppState;

use crate::error::CliError;
use crate::output;

/// Register an account.
pub fn signup(
    state: &AppState,
    name: String,
    email: String,
    password: SecretString,
) {
    let form = account::SignupForm {
        name,
        email,
        password,
    };
    output::action(pages::resolve(account::signup(state, &form)));
}

/// Log in.
pub fn login(state: &AppState, email: String, password: SecretString) {
    let form = account::LoginForm { email, password };
    output::action(pages::resolve(account::login(state, &form)));
}

/// Log out.
pub fn logout(state: &AppState) {
    output::action(pages::resolve(account::logout(state)));
}

/// Show the logged-in shopper.
pub fn whoami(state: &AppState) {
    match AuthService::new(state).session() {
        Ok(SessionState::LoggedIn(user)) => println!("{} <{}>", user.name, user.email),
        Ok(SessionState::LoggedOut) => println!("Not logged in"),
        Err(e) => output::action(pages::resolve(Err(e.into()))),
    }
}

/// End the browsing session.
pub fn end_session(state: &AppState) -> Result<(), CliError> {
    state.end_browsing_session()?;
    println!("Browsing session ended");
    Ok(())
}
