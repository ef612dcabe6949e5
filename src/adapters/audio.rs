use crate::domain::ports::AudioPlayer;
use crate::utils::error::{Result, SpellerError};
use std::path::Path;
use std::process::{Command, Stdio};

/// Plays clips by running an external player and waiting for it to exit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandPlayer {
    program: String,
    args: Vec<String>,
}

impl CommandPlayer {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// `afplay` on macOS, `aplay -q` on other Unix systems.
    pub fn platform_default() -> Option<Self> {
        if cfg!(target_os = "macos") {
            Some(Self::new("afplay", Vec::new()))
        } else if cfg!(unix) {
            Some(Self::new("aplay", vec!["-q".to_string()]))
        } else {
            None
        }
    }
}

impl AudioPlayer for CommandPlayer {
    fn play(&self, clip: &Path) -> Result<()> {
        if !clip.is_file() {
            return Err(SpellerError::AudioError {
                clip: clip.to_path_buf(),
                message: "clip not found".to_string(),
            });
        }

        tracing::debug!("🔊 {} {:?} {}", self.program, self.args, clip.display());
        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(clip)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| SpellerError::AudioError {
                clip: clip.to_path_buf(),
                message: format!("failed to start '{}': {}", self.program, e),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SpellerError::AudioError {
                clip: clip.to_path_buf(),
                message: format!(
                    "'{}' exited with {}: {}",
                    self.program,
                    output.status,
                    stderr.trim()
                ),
            });
        }
        Ok(())
    }
}

/// Logs instead of playing; used with `--no-audio`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentPlayer;

impl AudioPlayer for SilentPlayer {
    fn play(&self, clip: &Path) -> Result<()> {
        tracing::info!("🔇 Skipping playback of {}", clip.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_missing_clip_is_reported() {
        let player = CommandPlayer::new("true", Vec::new());
        let err = player.play(Path::new("no/such/Blarb.wav")).unwrap_err();
        assert!(matches!(err, SpellerError::AudioError { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_player_exit_status() {
        let clip = NamedTempFile::new().unwrap();

        let ok = CommandPlayer::new("true", Vec::new());
        assert!(ok.play(clip.path()).is_ok());

        let failing = CommandPlayer::new("false", Vec::new());
        assert!(failing.play(clip.path()).is_err());

        let missing = CommandPlayer::new("definitely-not-an-audio-player", Vec::new());
        let err = missing.play(clip.path()).unwrap_err();
        assert!(err.to_string().contains("failed to start"));
    }

    #[test]
    fn test_silent_player_never_fails() {
        assert!(SilentPlayer.play(Path::new("missing.wav")).is_ok());
    }
}
