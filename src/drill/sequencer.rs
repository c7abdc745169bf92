//! Presentation sequencer
//!
//! A single dt-driven state machine walks the batch one problem at a time:
//! reveal each operand, dim briefly between operands, dwell while the user
//! calculates, reveal the answer, advance. The owner calls [`Sequencer::tick`]
//! from its frame loop and polls [`Sequencer::display`] for what to draw.
//!
//! There are no timer callbacks anywhere: pausing freezes the remaining
//! delay of the current phase, and restart just resets state, so nothing
//! stale can ever fire against a superseded cursor.

use serde::{Deserialize, Serialize};

use super::problem::{Operator, Problem};
use crate::audio::AudioCue;
use crate::consts::{FLASH_GAP_SECS, GET_READY_SECS, POST_ANSWER_SECS};

/// Seconds an operand stays on screen at the given level (floor 0.5s)
pub fn number_delay(level: u8) -> f32 {
    (2.0 - (level.clamp(1, 5) - 1) as f32 * 0.5).max(0.5)
}

/// Seconds of "calculating" dwell before the answer at the given level
/// (floor 0.8s)
pub fn answer_delay(level: u8) -> f32 {
    (5.0 - (level.clamp(1, 5) - 1) as f32 * 0.6).max(0.8)
}

/// Current presentation phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// "Get Ready" dwell before a problem starts
    AwaitingStart,
    /// An operand (and its preceding operator) is on screen
    RevealingOperand,
    /// Brief dim between two operands; pure visual cue
    FlashGap,
    /// "Calculating..." dwell before the answer
    Calculating,
    /// The answer is on screen
    RevealingAnswer,
    /// Transient hop between one problem's answer and the next's get-ready;
    /// never dwelt in
    BetweenProblems,
    /// Terminal; no further timing activity
    Complete,
}

/// What the renderer should currently put on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisplayValue {
    /// "Get Ready" plus the problem counter
    GetReady,
    /// An operand, with the operator that precedes it (None for the first)
    Operand { value: u32, operator: Option<Operator> },
    /// Dimmed display during the flash gap
    Blank,
    /// "Calculating..." indicator
    Calculating,
    /// The problem's answer
    Answer(u32),
    /// Drill finished
    Done,
}

/// Per-tick handoff to the rendering collaborator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplayPayload {
    pub phase: Phase,
    pub problem_index: usize,
    pub operand_index: usize,
    pub value: DisplayValue,
    /// Fraction of the drill presented so far, 0.0 to 1.0
    pub progress: f32,
}

/// Timed presentation state machine for one drill run.
///
/// Owns the cursor exclusively; the batch is immutable for the lifetime of
/// the run and discarded on restart.
#[derive(Debug, Clone)]
pub struct Sequencer {
    batch: Vec<Problem>,
    level: u8,
    problem_index: usize,
    operand_index: usize,
    phase: Phase,
    /// Seconds left in the current phase; frozen while paused
    remaining: f32,
    paused: bool,
    /// Cues emitted since the last tick drained them
    pending_cues: Vec<AudioCue>,
}

impl Default for Sequencer {
    fn default() -> Self {
        Self::new()
    }
}

impl Sequencer {
    /// Idle sequencer with no batch; ticks are no-ops until [`begin`] runs.
    ///
    /// [`begin`]: Sequencer::begin
    pub fn new() -> Self {
        Self {
            batch: Vec::new(),
            level: 1,
            problem_index: 0,
            operand_index: 0,
            phase: Phase::AwaitingStart,
            remaining: 0.0,
            paused: false,
            pending_cues: Vec::new(),
        }
    }

    /// Install a freshly generated batch and start the run from
    /// (0, 0, AwaitingStart). Any previous run is discarded.
    pub fn begin(&mut self, batch: Vec<Problem>, level: u8) {
        self.restart();
        self.batch = batch;
        self.level = level.clamp(1, 5);
        self.remaining = GET_READY_SECS;
        if !self.batch.is_empty() {
            self.pending_cues.push(AudioCue::GameStart);
            self.pending_cues.push(AudioCue::GetReady);
        }
    }

    /// Advance the state machine by `dt` seconds. Returns the audio cues
    /// emitted, including any queued by pause/resume since the last tick.
    ///
    /// Leftover dt carries across phase boundaries, so one oversized tick
    /// still visits every transition in order instead of skipping phases.
    pub fn tick(&mut self, dt: f32) -> Vec<AudioCue> {
        let cues = std::mem::take(&mut self.pending_cues);
        if self.paused || self.phase == Phase::Complete || self.batch.is_empty() {
            return cues;
        }

        let mut cues = cues;
        let mut dt = dt;
        // `>=` drains zero-width phases (BetweenProblems) in the same tick
        while dt >= self.remaining {
            dt -= self.remaining;
            self.advance(&mut cues);
            if self.phase == Phase::Complete {
                return cues;
            }
        }
        self.remaining -= dt;
        cues
    }

    /// One phase transition. `remaining` has elapsed when this runs.
    fn advance(&mut self, cues: &mut Vec<AudioCue>) {
        let operand_count = self.batch[self.problem_index].operand_count();
        match self.phase {
            Phase::AwaitingStart => {
                self.phase = Phase::RevealingOperand;
                self.operand_index = 0;
                self.remaining = number_delay(self.level);
            }
            Phase::RevealingOperand => {
                if self.operand_index + 1 < operand_count {
                    self.phase = Phase::FlashGap;
                    self.remaining = FLASH_GAP_SECS;
                } else {
                    self.phase = Phase::Calculating;
                    self.remaining = answer_delay(self.level);
                    cues.push(AudioCue::Calculating);
                }
            }
            Phase::FlashGap => {
                self.operand_index += 1;
                self.phase = Phase::RevealingOperand;
                self.remaining = number_delay(self.level);
            }
            Phase::Calculating => {
                self.phase = Phase::RevealingAnswer;
                self.remaining = POST_ANSWER_SECS;
                cues.push(AudioCue::AnswerReveal);
            }
            Phase::RevealingAnswer => {
                cues.push(AudioCue::ProblemComplete);
                if self.problem_index + 1 < self.batch.len() {
                    // Zero-width; the tick loop advances it immediately
                    self.phase = Phase::BetweenProblems;
                    self.remaining = 0.0;
                } else {
                    self.phase = Phase::Complete;
                    self.remaining = 0.0;
                    cues.push(AudioCue::GameComplete);
                }
            }
            Phase::BetweenProblems => {
                self.problem_index += 1;
                self.operand_index = 0;
                self.phase = Phase::AwaitingStart;
                self.remaining = GET_READY_SECS;
                cues.push(AudioCue::GetReady);
            }
            Phase::Complete => {}
        }
    }

    /// Freeze timing without touching the cursor or the remaining delay.
    /// No-op when already paused or complete.
    pub fn pause(&mut self) {
        if self.paused || self.phase == Phase::Complete {
            return;
        }
        self.paused = true;
        self.pending_cues.push(AudioCue::Pause);
    }

    /// Thaw timing from the frozen phase. No-op when not paused.
    pub fn resume(&mut self) {
        if !self.paused {
            return;
        }
        self.paused = false;
        self.pending_cues.push(AudioCue::Resume);
    }

    /// Discard the batch and reset the cursor to (0, 0, AwaitingStart).
    /// Safe from any phase, including `Complete`.
    pub fn restart(&mut self) {
        self.batch.clear();
        self.problem_index = 0;
        self.operand_index = 0;
        self.phase = Phase::AwaitingStart;
        self.remaining = 0.0;
        self.paused = false;
        self.pending_cues.clear();
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn problem_index(&self) -> usize {
        self.problem_index
    }

    pub fn operand_index(&self) -> usize {
        self.operand_index
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_complete(&self) -> bool {
        self.phase == Phase::Complete
    }

    /// True once [`begin`] has installed a batch that hasn't been discarded.
    ///
    /// [`begin`]: Sequencer::begin
    pub fn is_running(&self) -> bool {
        !self.batch.is_empty() && self.phase != Phase::Complete
    }

    pub fn problem_count(&self) -> usize {
        self.batch.len()
    }

    /// The problem currently under the cursor, if a batch is installed
    pub fn current_problem(&self) -> Option<&Problem> {
        self.batch.get(self.problem_index)
    }

    /// Fraction of the drill presented so far.
    ///
    /// `(problem_index * N + operand_index + 1 if the answer is showing)
    /// / (problem_count * N)`; 0.0 when idle, 1.0 once complete.
    pub fn progress(&self) -> f32 {
        let Some(first) = self.batch.first() else {
            return 0.0;
        };
        if self.phase == Phase::Complete {
            return 1.0;
        }
        let n = first.operand_count();
        let answer_shown = usize::from(self.phase == Phase::RevealingAnswer);
        let presented = self.problem_index * n + self.operand_index + answer_shown;
        presented as f32 / (self.batch.len() * n) as f32
    }

    /// What should currently be on screen
    pub fn display(&self) -> DisplayPayload {
        let value = match self.phase {
            Phase::AwaitingStart | Phase::BetweenProblems => DisplayValue::GetReady,
            Phase::RevealingOperand => {
                let problem = &self.batch[self.problem_index];
                DisplayValue::Operand {
                    value: problem.operands[self.operand_index],
                    operator: if self.operand_index > 0 {
                        Some(problem.operators[self.operand_index - 1])
                    } else {
                        None
                    },
                }
            }
            Phase::FlashGap => DisplayValue::Blank,
            Phase::Calculating => DisplayValue::Calculating,
            Phase::RevealingAnswer => {
                DisplayValue::Answer(self.batch[self.problem_index].answer)
            }
            Phase::Complete => DisplayValue::Done,
        };
        DisplayPayload {
            phase: self.phase,
            problem_index: self.problem_index,
            operand_index: self.operand_index,
            value,
            progress: self.progress(),
        }
    }
}
