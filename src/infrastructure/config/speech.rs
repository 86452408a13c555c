//! Speech back-end configuration.

use serde::{Deserialize, Serialize};

use crate::port::Voice;

/// Which speech back-end speaks alerts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeechBackend {
    /// Run an external program such as `espeak`.
    #[default]
    Command,
    /// Write alerts to the log only.
    Log,
    /// Disable speech.
    None,
}

/// Speech settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SpeechConfig {
    #[serde(default)]
    pub backend: SpeechBackend,
    /// Program for the `command` back-end.
    #[serde(default = "default_program")]
    pub program: String,
    /// Optional voice name passed to the program.
    #[serde(default)]
    pub voice: Option<String>,
    /// 1.0 is normal speed (default: 0.9).
    #[serde(default = "default_rate")]
    pub rate: f32,
    /// 1.0 is the default pitch.
    #[serde(default = "default_one")]
    pub pitch: f32,
    /// 0.0 to 1.0.
    #[serde(default = "default_one")]
    pub volume: f32,
}

fn default_program() -> String {
    "espeak".into()
}

const fn default_rate() -> f32 {
    0.9
}

const fn default_one() -> f32 {
    1.0
}

impl SpeechConfig {
    #[must_use]
    pub fn voice_params(&self) -> Voice {
        Voice {
            rate: self.rate,
            pitch: self.pitch,
            volume: self.volume,
        }
    }
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            backend: SpeechBackend::default(),
            program: default_program(),
            voice: None,
            rate: default_rate(),
            pitch: default_one(),
            volume: default_one(),
        }
    }
}
