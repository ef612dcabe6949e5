use crate::utils::error::Result;
use std::path::Path;

/// Converts English text to IPA.
pub trait Transcriber {
    /// Best single transcription.
    fn transcribe(&self, text: &str) -> String;

    /// Every plausible transcription, best first. Empty for empty input.
    fn transcribe_all(&self, text: &str) -> Vec<String>;
}

/// Blocking playback of one audio clip.
pub trait AudioPlayer {
    fn play(&self, clip: &Path) -> Result<()>;
}
