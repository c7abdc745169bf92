//! Audio cues
//!
//! The sequencer emits discrete named cues at phase transitions; a sink
//! turns them into sound. Playback failures must never reach the sequencer,
//! so every sink swallows its own errors.

use std::io::Write;

use serde::{Deserialize, Serialize};

/// Cue events fired at sequencer phase transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AudioCue {
    /// A new drill run started
    GameStart,
    /// "Get Ready" dwell began
    GetReady,
    /// Last operand shown, calculating dwell began
    Calculating,
    /// The answer was revealed
    AnswerReveal,
    /// The post-answer dwell ended
    ProblemComplete,
    /// The final problem finished
    GameComplete,
    Pause,
    Resume,
}

/// Playback seam between the sequencer and whatever makes noise.
///
/// Implementations must not block and must not propagate failures.
pub trait AudioSink {
    fn play(&mut self, cue: AudioCue);
}

/// Discards every cue. Used in tests and headless runs.
#[derive(Debug, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _cue: AudioCue) {}
}

/// Terminal-bell sink: distinct BEL patterns per cue, write errors ignored.
#[derive(Debug)]
pub struct TerminalAudio {
    muted: bool,
}

impl TerminalAudio {
    pub fn new(muted: bool) -> Self {
        Self { muted }
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Number of bell pulses for a cue
    fn pulses(cue: AudioCue) -> usize {
        match cue {
            AudioCue::GameStart | AudioCue::GameComplete => 3,
            AudioCue::AnswerReveal | AudioCue::ProblemComplete => 2,
            AudioCue::GetReady
            | AudioCue::Calculating
            | AudioCue::Pause
            | AudioCue::Resume => 1,
        }
    }
}

impl AudioSink for TerminalAudio {
    fn play(&mut self, cue: AudioCue) {
        if self.muted {
            return;
        }
        let mut stdout = std::io::stdout();
        for _ in 0..Self::pulses(cue) {
            // A failed write means no beep, nothing more
            let _ = stdout.write_all(b"\x07");
        }
        let _ = stdout.flush();
    }
}
