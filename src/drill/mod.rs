//! Deterministic drill core
//!
//! Everything that decides what the user sees lives here. This module must
//! be pure and deterministic:
//! - Seeded RNG only (same seed + settings => same batch)
//! - dt-driven timing only, no wall-clock reads
//! - No rendering, audio, or storage dependencies

pub mod problem;
pub mod sequencer;

pub use problem::{Operator, Problem, generate_batch, generate_number, generate_problem};
pub use sequencer::{
    DisplayPayload, DisplayValue, Phase, Sequencer, answer_delay, number_delay,
};
