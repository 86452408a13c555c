//! Speech synthesis back-ends.
//!
//! - [`CommandSpeech`] runs an external speech program such as `espeak`.
//! - [`LogSpeech`] writes the utterance to the log, for headless hosts.
//! - [`NullSpeech`] reports speech as unavailable.

use std::io::ErrorKind;
use std::process::Stdio;

use tokio::process::Command;
use tokio::runtime::Handle;
use tracing::{debug, info, warn};

use crate::port::{SpeechError, SpeechSynthesizer, Utterance};

/// Speech is not available on this host.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSpeech;

impl SpeechSynthesizer for NullSpeech {
    fn speak(&self, _utterance: Utterance) -> Result<(), SpeechError> {
        Err(SpeechError::Unavailable("speech disabled".into()))
    }
}

/// Logs each utterance at `info` instead of speaking it.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSpeech;

impl SpeechSynthesizer for LogSpeech {
    fn speak(&self, utterance: Utterance) -> Result<(), SpeechError> {
        info!(
            text = %utterance.text,
            rate = utterance.rate,
            pitch = utterance.pitch,
            volume = utterance.volume,
            "Speaking alert"
        );
        Ok(())
    }
}

/// Spawns an `espeak`-compatible program for each utterance.
///
/// Voice parameters map onto espeak flags: rate scales the default 175 words
/// per minute (`-s`), pitch scales the default 50 (`-p`), volume maps 0..1
/// onto amplitude 0..100 (`-a`). The child runs detached; `speak` returns as
/// soon as it has been spawned.
#[derive(Debug, Clone)]
pub struct CommandSpeech {
    program: String,
    voice: Option<String>,
}

impl CommandSpeech {
    pub const DEFAULT_PROGRAM: &'static str = "espeak";

    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            voice: None,
        }
    }

    #[must_use]
    pub fn with_voice(mut self, voice: Option<String>) -> Self {
        self.voice = voice.filter(|v| !v.trim().is_empty());
        self
    }

    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Command-line arguments for an utterance, text last.
    #[must_use]
    pub fn args(&self, utterance: &Utterance) -> Vec<String> {
        let speed = (175.0 * utterance.rate).round() as i64;
        let pitch = (50.0 * utterance.pitch).round().clamp(0.0, 99.0) as i64;
        let amplitude = (100.0 * utterance.volume).round().clamp(0.0, 200.0) as i64;

        let mut args = vec![
            "-s".to_string(),
            speed.to_string(),
            "-p".to_string(),
            pitch.to_string(),
            "-a".to_string(),
            amplitude.to_string(),
        ];
        if let Some(voice) = &self.voice {
            args.push("-v".to_string());
            args.push(voice.clone());
        }
        args.push(utterance.text.clone());
        args
    }
}

impl Default for CommandSpeech {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PROGRAM)
    }
}

impl SpeechSynthesizer for CommandSpeech {
    fn speak(&self, utterance: Utterance) -> Result<(), SpeechError> {
        let handle = Handle::try_current()
            .map_err(|_| SpeechError::Unavailable("no async runtime".into()))?;

        let mut child = Command::new(&self.program)
            .args(self.args(&utterance))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(false)
            .spawn()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound | ErrorKind::PermissionDenied => {
                    SpeechError::Unavailable(format!("{}: {e}", self.program))
                }
                _ => SpeechError::Failed(format!("{}: {e}", self.program)),
            })?;

        let program = self.program.clone();
        handle.spawn(async move {
            match child.wait().await {
                Ok(status) if status.success() => debug!(program = %program, "Speech finished"),
                Ok(status) => warn!(program = %program, %status, "Speech program failed"),
                Err(e) => warn!(program = %program, error = %e, "Speech program wait failed"),
            }
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_speech_is_unavailable() {
        let result = NullSpeech.speak(Utterance::alert("hello"));
        assert!(matches!(result, Err(SpeechError::Unavailable(_))));
    }

    #[test]
    fn log_speech_always_succeeds() {
        assert!(LogSpeech.speak(Utterance::alert("hello")).is_ok());
    }

    #[test]
    fn alert_voice_maps_to_espeak_flags() {
        let speech = CommandSpeech::default();
        let args = speech.args(&Utterance::alert("Team Alpha is behind"));
        assert_eq!(
            args,
            vec!["-s", "158", "-p", "50", "-a", "100", "Team Alpha is behind"]
        );
    }

    #[test]
    fn voice_flag_is_added_when_configured() {
        let speech = CommandSpeech::default().with_voice(Some("en-us".into()));
        let args = speech.args(&Utterance::alert("hi"));
        assert_eq!(&args[6..], ["-v", "en-us", "hi"]);
    }

    #[test]
    fn blank_voice_is_ignored() {
        let speech = CommandSpeech::default().with_voice(Some("  ".into()));
        assert_eq!(speech.args(&Utterance::alert("hi")).len(), 7);
    }

    #[test]
    fn command_speech_without_runtime_is_unavailable() {
        let result = CommandSpeech::default().speak(Utterance::alert("hi"));
        assert!(matches!(result, Err(SpeechError::Unavailable(_))));
    }

    #[tokio::test]
    async fn missing_program_is_unavailable() {
        let speech = CommandSpeech::new("definitely-not-a-speech-program-7f3a");
        let result = speech.speak(Utterance::alert("hi"));
        assert!(matches!(result, Err(SpeechError::Unavailable(_))));
    }
}
