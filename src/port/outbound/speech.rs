//! Speech synthesis port for spoken alerts.

use thiserror::Error;

/// Text to speak together with voice parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub text: String,
    /// Speaking rate, 1.0 is normal speed.
    pub rate: f32,
    /// Voice pitch, 1.0 is the default pitch.
    pub pitch: f32,
    /// Volume from 0.0 to 1.0.
    pub volume: f32,
}

impl Utterance {
    /// An utterance with the default alert voice: rate 0.9, pitch 1.0, volume 1.0.
    #[must_use]
    pub fn alert(text: impl Into<String>) -> Self {
        Voice::default().utter(text)
    }
}

/// Voice parameters shared by every alert.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Voice {
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
}

impl Voice {
    #[must_use]
    pub fn utter(&self, text: impl Into<String>) -> Utterance {
        Utterance {
            text: text.into(),
            rate: self.rate,
            pitch: self.pitch,
            volume: self.volume,
        }
    }
}

impl Default for Voice {
    fn default() -> Self {
        Self {
            rate: 0.9,
            pitch: 1.0,
            volume: 1.0,
        }
    }
}

/// Why an utterance could not be spoken.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SpeechError {
    /// No speech capability in this environment.
    #[error("speech synthesis unavailable: {0}")]
    Unavailable(String),

    /// The speech engine was found but refused the utterance.
    #[error("speech synthesis failed: {0}")]
    Failed(String),
}

/// A best-effort speech output.
///
/// `speak` is fire-and-forget: it must return promptly and must not wait for
/// the audio to finish. Callers log errors and carry on.
pub trait SpeechSynthesizer: Send + Sync {
    fn speak(&self, utterance: Utterance) -> Result<(), SpeechError>;
}
