//! Background music status.

use eclat_storefront::pages::{self, PageOutcome, music};
use eclat_storefront::services::music::{AudioSink, PlaybackRejected};
use eclat_storefront::state::AppState;

use crate::output;

/// The terminal has no audio output, so playback is always refused.
#[derive(Debug, Default)]
struct NoAudio {
    position: f64,
}

impl AudioSink for NoAudio {
    fn play(&mut self) -> Result<(), PlaybackRejected> {
        Err(PlaybackRejected::new("no audio output"))
    }

    fn pause(&mut self) {}

    fn set_muted(&mut self, _muted: bool) {}

    fn set_volume(&mut self, _volume: f32) {}

    fn current_time(&self) -> f64 {
        self.position
    }

    fn seek(&mut self, seconds: f64) {
        self.position = seconds;
    }
}

/// Show the music player as the current page would.
pub async fn status(state: &AppState) {
    let loaded = match music::load(state, NoAudio::default()).await {
        Ok(player) => music::MusicView::new(state, &player)
            .and_then(|view| music::leave(&player).map(|()| PageOutcome::Render(view))),
        Err(e) => Err(e),
    };

    output::outcome(pages::resolve(loaded), |view| {
        if !view.visible {
            println!("Music player hidden. Log in to listen.");
            return;
        }
        match view.resume_at {
            Some(seconds) => println!("Music player shown, resumes at {seconds:.1}s"),
            None => println!("Music player shown"),
        }
    });
}
