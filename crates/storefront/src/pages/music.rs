//! Background music player across page loads.
//!
//! Every page attaches a player on load, re-syncs it after login or logout
//! and saves its position when the shopper navigates away.

use tracing::instrument;

use crate::error::Result;
use crate::models::keys;
use crate::services::auth::AuthService;
use crate::services::music::{AudioSink, MusicPlayer, forget_saved_state};
use crate::state::AppState;

/// Player status as shown in the navigation bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MusicView {
    pub visible: bool,
    pub playing: bool,
    pub muted: bool,
    /// Position saved by the previous page, in seconds.
    pub resume_at: Option<f64>,
}

impl MusicView {
    /// Snapshot the player.
    ///
    /// # Errors
    ///
    /// Returns `AppError` if the session store cannot be read.
    pub fn new<S: AudioSink>(state: &AppState, player: &MusicPlayer<S>) -> Result<Self> {
        let resume_at = state
            .session()
            .raw(keys::MUSIC_CURRENT_TIME)?
            .and_then(|raw| raw.trim().parse::<f64>().ok());

        Ok(Self {
            visible: player.is_visible(),
            playing: player.is_playing(),
            muted: player.is_muted(),
            resume_at,
        })
    }
}

/// Attach the player to a freshly loaded page.
///
/// Restores the saved position, shows the player to a logged-in shopper and
/// attempts auto-play.
///
/// # Errors
///
/// Returns `AppError` if a store cannot be read.
#[instrument(skip(state, sink))]
pub async fn load<S: AudioSink>(state: &AppState, sink: S) -> Result<MusicPlayer<S>> {
    let mut player = MusicPlayer::new(sink, state.session().clone(), state.config().music)?;
    player.sync_visibility(AuthService::new(state).is_logged_in()?);
    player.autoplay().await;
    Ok(player)
}

/// Re-sync the player after the shopper logged in or out.
///
/// Logging out hides and pauses the player and drops the saved position.
///
/// # Errors
///
/// Returns `AppError` if a store cannot be read or written.
pub fn after_auth_change<S: AudioSink>(
    state: &AppState,
    player: &mut MusicPlayer<S>,
) -> Result<()> {
    let logged_in = AuthService::new(state).is_logged_in()?;
    player.sync_visibility(logged_in);
    if !logged_in {
        forget_saved_state(state.session())?;
    }
    Ok(())
}

/// Periodic position update while music plays.
///
/// # Errors
///
/// Returns `AppError` if the session store cannot be written.
pub fn tick<S: AudioSink>(player: &MusicPlayer<S>) -> Result<()> {
    Ok(player.record_position()?)
}

/// Save the player state as the shopper leaves the page.
///
/// # Errors
///
/// Returns `AppError` if the session store cannot be written.
pub fn leave<S: AudioSink>(player: &MusicPlayer<S>) -> Result<()> {
    Ok(player.save_state()?)
}
