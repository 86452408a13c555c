//! Test doubles for outbound ports.

use std::sync::Arc;

use chrono::{NaiveDateTime, Duration};
use parking_lot::Mutex;
use tokio::time::Instant;

use crate::port::{Clock, SpeechError, SpeechSynthesizer, Utterance};

/// A clock frozen at a settable instant.
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: Arc<Mutex<NaiveDateTime>>,
}

impl FixedClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            now: Arc::new(Mutex::new(now)),
        }
    }

    pub fn set(&self, now: NaiveDateTime) {
        *self.now.lock() = now;
    }

    pub fn advance(&self, by: Duration) {
        *self.now.lock() += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        *self.now.lock()
    }
}

/// A wall clock driven by tokio's (pausable) timer.
///
/// Reports `start` plus the tokio time elapsed since construction, so tests
/// running with `start_paused = true` see wall time move with
/// `tokio::time::advance` and auto-advance.
#[derive(Debug, Clone)]
pub struct TokioClock {
    start: NaiveDateTime,
    origin: Instant,
}

impl TokioClock {
    pub fn starting_at(start: NaiveDateTime) -> Self {
        Self {
            start,
            origin: Instant::now(),
        }
    }
}

impl Clock for TokioClock {
    fn now(&self) -> NaiveDateTime {
        let elapsed = Duration::from_std(self.origin.elapsed()).unwrap_or(Duration::zero());
        self.start + elapsed
    }
}

/// Records every utterance; optionally fails each call.
#[derive(Debug, Default)]
pub struct RecordingSpeech {
    spoken: Mutex<Vec<Utterance>>,
    attempts: Mutex<usize>,
    fail: bool,
}

impl RecordingSpeech {
    /// A speech engine whose every call reports it is unavailable.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Utterances successfully spoken so far.
    pub fn spoken(&self) -> Vec<Utterance> {
        self.spoken.lock().clone()
    }

    /// Calls to `speak`, including failed ones.
    pub fn attempts(&self) -> usize {
        *self.attempts.lock()
    }
}

impl SpeechSynthesizer for RecordingSpeech {
    fn speak(&self, utterance: Utterance) -> Result<(), SpeechError> {
        *self.attempts.lock() += 1;
        if self.fail {
            return Err(SpeechError::Unavailable("recording speech set to fail".into()));
        }
        self.spoken.lock().push(utterance);
        Ok(())
    }
}
