//! Flash Anzan - a timed mental-arithmetic drill engine
//!
//! Core modules:
//! - `drill`: Deterministic core (question generator, presentation sequencer)
//! - `settings`: Drill configuration with validation and persistence
//! - `audio`: Cue events and playback sinks
//!
//! The library knows nothing about rendering: the front end polls
//! [`drill::Sequencer::display`] each frame and draws whatever the payload
//! says, and feeds the cues returned by [`drill::Sequencer::tick`] to an
//! [`audio::AudioSink`].

pub mod audio;
pub mod drill;
pub mod settings;

pub use audio::{AudioCue, AudioSink};
pub use drill::{Problem, Sequencer};
pub use settings::{DigitSize, OperationMode, Settings};

/// Timing constants
pub mod consts {
    /// Frame timestep for the driving loop (60 Hz is plenty for 0.2s gaps)
    pub const TICK_DT: f32 = 1.0 / 60.0;

    /// Dim-the-display gap between two operands, independent of level
    pub const FLASH_GAP_SECS: f32 = 0.2;
    /// "Get Ready" dwell before each problem
    pub const GET_READY_SECS: f32 = 1.5;
    /// Dwell on the revealed answer before advancing
    pub const POST_ANSWER_SECS: f32 = 1.5;
}
