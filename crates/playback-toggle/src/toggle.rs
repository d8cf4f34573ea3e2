use crate::audio::AudioCollaborator;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, warn};

/// The playing flag plus an optional handle to the audio element.
///
/// Until an element is attached, [`toggle`](Self::toggle) does nothing.
#[derive(Default)]
pub struct PlaybackToggle {
    audio: Option<Arc<dyn AudioCollaborator>>,
    playing: AtomicBool,
}

impl PlaybackToggle {
    /// A toggle with no audio attached.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_audio(audio: Arc<dyn AudioCollaborator>) -> Self {
        Self {
            audio: Some(audio),
            playing: AtomicBool::new(false),
        }
    }

    /// Attach (or replace) the audio element. The flag is left as is.
    pub fn attach(&mut self, audio: Arc<dyn AudioCollaborator>) {
        self.audio = Some(audio);
    }

    pub fn detach(&mut self) {
        self.audio = None;
    }

    pub fn is_attached(&self) -> bool {
        self.audio.is_some()
    }

    pub fn is_playing(&self) -> bool {
        self.playing.load(Ordering::SeqCst)
    }

    /// Pause if playing, play otherwise. Returns the new flag.
    ///
    /// A rejected `play` is logged; the flag still flips to `true`.
    pub fn toggle(&self) -> bool {
        let Some(audio) = &self.audio else {
            debug!("Playback toggle ignored, no audio attached");
            return self.is_playing();
        };

        if self.is_playing() {
            audio.pause();
        } else if let Err(err) = audio.play() {
            warn!(error = %err, "Audio play failed");
        }

        let now_playing = !self.playing.fetch_xor(true, Ordering::SeqCst);
        debug!(playing = now_playing, "Playback toggled");
        now_playing
    }

    /// The element started playing on its own.
    pub fn on_started(&self) {
        self.playing.store(true, Ordering::SeqCst);
    }

    /// The element paused or ended on its own.
    pub fn on_stopped(&self) {
        self.playing.store(false, Ordering::SeqCst);
    }
}

impl std::fmt::Debug for PlaybackToggle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackToggle")
            .field("attached", &self.is_attached())
            .field("playing", &self.is_playing())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{AudioCommand, RecordingAudio};
    use crate::PlaybackError;

    fn attached() -> (Arc<RecordingAudio>, PlaybackToggle) {
        let audio = Arc::new(RecordingAudio::new());
        let toggle = PlaybackToggle::with_audio(audio.clone());
        (audio, toggle)
    }

    #[test]
    fn starts_not_playing() {
        let (audio, toggle) = attached();
        assert!(!toggle.is_playing());
        assert!(audio.is_empty());
    }

    #[test]
    fn toggle_alternates_play_and_pause() {
        let (audio, toggle) = attached();

        assert!(toggle.toggle());
        assert!(!toggle.toggle());
        assert!(toggle.toggle());

        assert_eq!(
            audio.commands(),
            vec![AudioCommand::Play, AudioCommand::Pause, AudioCommand::Play]
        );
    }

    #[test]
    fn rejected_play_still_flips_flag() {
        let (audio, toggle) = attached();
        audio.reject_play_with(PlaybackError::Rejected("autoplay blocked".to_string()));

        assert!(toggle.toggle());
        assert!(toggle.is_playing());

        // The next toggle pauses, as the flag says we are playing.
        assert!(!toggle.toggle());
        assert_eq!(audio.commands(), vec![AudioCommand::Play, AudioCommand::Pause]);
    }

    #[test]
    fn external_events_resync_without_commands() {
        let (audio, toggle) = attached();

        toggle.on_started();
        assert!(toggle.is_playing());
        toggle.on_stopped();
        assert!(!toggle.is_playing());

        assert!(audio.is_empty());
    }

    #[test]
    fn toggle_after_external_start_pauses() {
        let (audio, toggle) = attached();

        toggle.on_started();
        assert!(!toggle.toggle());
        assert_eq!(audio.commands(), vec![AudioCommand::Pause]);
    }

    #[test]
    fn unattached_toggle_is_a_no_op() {
        let mut toggle = PlaybackToggle::new();
        assert!(!toggle.toggle());
        assert!(!toggle.is_playing());

        let audio = Arc::new(RecordingAudio::new());
        toggle.attach(audio.clone());
        assert!(toggle.toggle());
        assert_eq!(audio.commands(), vec![AudioCommand::Play]);

        toggle.detach();
        assert!(toggle.toggle());
        assert_eq!(audio.len(), 1);
    }
}
