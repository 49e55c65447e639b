//! Background music player.
//!
//! The player is only visible to logged-in shoppers. Playback goes through an
//! [`AudioSink`], which may refuse to start (browsers block auto-play until
//! the user interacts with the page); a refused start is logged and ignored.
//! While music plays, its position is mirrored into the session store so the
//! next page can resume where the last one stopped.

use thiserror::Error;

use crate::config::MusicConfig;
use crate::models::keys;
use crate::storage::{Storage, StorageError};

/// The audio output refused to start playback.
#[derive(Debug, Clone, Error)]
#[error("playback rejected: {reason}")]
pub struct PlaybackRejected {
    pub reason: String,
}

impl PlaybackRejected {
    /// A rejection with the given reason.
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Something that can play the background track.
pub trait AudioSink: Send {
    /// Start or resume playback.
    ///
    /// # Errors
    ///
    /// Returns `PlaybackRejected` if the output refuses to start.
    fn play(&mut self) -> Result<(), PlaybackRejected>;

    /// Pause playback.
    fn pause(&mut self);

    /// Mute or unmute without pausing.
    fn set_muted(&mut self, muted: bool);

    /// Set the volume between 0 and 1.
    fn set_volume(&mut self, volume: f32);

    /// Playback position in seconds.
    fn current_time(&self) -> f64;

    /// Jump to a position in seconds.
    fn seek(&mut self, seconds: f64);
}

/// The background music player.
pub struct MusicPlayer<S> {
    sink: S,
    session: Storage,
    config: MusicConfig,
    visible: bool,
    playing: bool,
    muted: bool,
}

impl<S: AudioSink> MusicPlayer<S> {
    /// Create a hidden, paused player and restore the saved position.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the session store cannot be read.
    pub fn new(mut sink: S, session: Storage, config: MusicConfig) -> Result<Self, StorageError> {
        sink.set_volume(config.volume);
        let mut player = Self {
            sink,
            session,
            config,
            visible: false,
            playing: false,
            muted: false,
        };
        player.restore()?;
        Ok(player)
    }

    /// Whether the player is shown.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Whether music is playing.
    #[must_use]
    pub const fn is_playing(&self) -> bool {
        self.playing
    }

    /// Whether the output is muted.
    #[must_use]
    pub const fn is_muted(&self) -> bool {
        self.muted
    }

    /// The underlying sink.
    #[must_use]
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    /// Try to start playback. Returns whether it started.
    pub fn play(&mut self) -> bool {
        match self.sink.play() {
            Ok(()) => {
                self.playing = true;
                true
            }
            Err(err) => {
                tracing::debug!(error = %err, "Audio play failed");
                false
            }
        }
    }

    /// Pause playback.
    pub fn pause(&mut self) {
        self.sink.pause();
        self.playing = false;
    }

    /// Play if paused, pause if playing.
    pub fn toggle_play_pause(&mut self) {
        if self.playing {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Flip mute. Returns the new muted state.
    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.sink.set_muted(self.muted);
        self.muted
    }

    /// Show the player.
    pub const fn show(&mut self) {
        self.visible = true;
    }

    /// Hide the player and pause.
    pub fn hide(&mut self) {
        self.visible = false;
        self.pause();
    }

    /// Show the player for a logged-in shopper, hide it otherwise.
    pub fn sync_visibility(&mut self, logged_in: bool) {
        match (logged_in, self.visible) {
            (true, false) => self.show(),
            (false, true) => self.hide(),
            _ => {}
        }
    }

    /// Attempt auto-play after the configured delay.
    ///
    /// Does nothing when auto-play is disabled or the player is hidden.
    /// Returns whether playback started.
    pub async fn autoplay(&mut self) -> bool {
        if !self.config.autoplay || !self.visible {
            return false;
        }

        tokio::time::sleep(self.config.autoplay_delay).await;
        self.play()
    }

    /// Mirror the playback position into the session store while playing.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the session store cannot be written.
    pub fn record_position(&self) -> Result<(), StorageError> {
        if self.playing {
            self.session
                .set_raw(keys::MUSIC_CURRENT_TIME, self.sink.current_time().to_string())?;
        }
        Ok(())
    }

    /// Save position and playing flag before leaving the page.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the session store cannot be written.
    pub fn save_state(&self) -> Result<(), StorageError> {
        if self.playing {
            self.record_position()?;
            self.session.set_raw(keys::MUSIC_WAS_PLAYING, "true")?;
        }
        Ok(())
    }

    /// Seek to the saved position, if one was recorded.
    fn restore(&mut self) -> Result<(), StorageError> {
        let Some(raw) = self.session.raw(keys::MUSIC_CURRENT_TIME)? else {
            return Ok(());
        };

        match raw.trim().parse::<f64>() {
            Ok(seconds) if seconds.is_finite() && seconds >= 0.0 => self.sink.seek(seconds),
            _ => tracing::debug!(value = %raw, "Ignoring unreadable music position"),
        }
        Ok(())
    }
}

/// Remove the saved music position and playing flag.
///
/// # Errors
///
/// Returns `StorageError` if the session store cannot be written.
pub fn forget_saved_state(session: &Storage) -> Result<(), StorageError> {
    session.remove(keys::MUSIC_CURRENT_TIME)?;
    session.remove(keys::MUSIC_WAS_PLAYING)
}
