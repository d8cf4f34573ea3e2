//! Contract with the audio element.

use crate::PlaybackError;
use parking_lot::Mutex;

/// The host's audio output.
pub trait AudioCollaborator: Send + Sync {
    /// Start or resume playback.
    fn play(&self) -> Result<(), PlaybackError>;

    /// Pause playback. Never fails.
    fn pause(&self);
}

/// A command issued to the collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCommand {
    Play,
    Pause,
}

/// A collaborator that records commands for testing.
#[derive(Debug, Default)]
pub struct RecordingAudio {
    commands: Mutex<Vec<AudioCommand>>,
    rejection: Mutex<Option<PlaybackError>>,
}

impl RecordingAudio {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following `play` fail with `error`.
    pub fn reject_play_with(&self, error: PlaybackError) {
        *self.rejection.lock() = Some(error);
    }

    pub fn allow_play(&self) {
        *self.rejection.lock() = None;
    }

    /// Returns all recorded commands.
    pub fn commands(&self) -> Vec<AudioCommand> {
        self.commands.lock().clone()
    }

    pub fn clear(&self) {
        self.commands.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.commands.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AudioCollaborator for RecordingAudio {
    fn play(&self) -> Result<(), PlaybackError> {
        self.commands.lock().push(AudioCommand::Play);
        match self.rejection.lock().clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn pause(&self) {
        self.commands.lock().push(AudioCommand::Pause);
    }
}
