//! Background-music playback flag.
//!
//! The flag mirrors what the page believes the audio element is doing. It is
//! never persisted and starts `false` on every load.
//!
//! - [`PlaybackToggle::toggle`] flips the flag and commands the audio
//! - [`PlaybackToggle::on_started`] / [`PlaybackToggle::on_stopped`] follow
//!   changes made outside the toggle (media keys, the element ending)

mod audio;
mod toggle;

pub use audio::{AudioCollaborator, AudioCommand, RecordingAudio};
pub use toggle::PlaybackToggle;

use thiserror::Error;

/// Error returned by an audio collaborator.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PlaybackError {
    /// The host refused to start playback (autoplay policy, no user gesture).
    #[error("Playback was rejected: {0}")]
    Rejected(String),

    /// No playable source is loaded.
    #[error("No audio source available")]
    NoSource,
}
