//! Drill settings and preferences
//!
//! Persisted as JSON next to the binary; load failures silently fall back
//! to defaults so a corrupt or missing file never blocks a session.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Magnitude bucket an operand is drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DigitSize {
    One,
    Two,
    Three,
}

impl DigitSize {
    /// Inclusive random range for this bucket
    pub fn range(&self) -> (u32, u32) {
        match self {
            DigitSize::One => (1, 9),
            DigitSize::Two => (10, 99),
            DigitSize::Three => (100, 999),
        }
    }

    /// Whether `value` falls inside this bucket
    pub fn contains(&self, value: u32) -> bool {
        let (lo, hi) = self.range();
        (lo..=hi).contains(&value)
    }
}

/// Which operators the generator may pick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OperationMode {
    #[default]
    AdditionOnly,
    AdditionAndSubtraction,
}

impl OperationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationMode::AdditionOnly => "Addition",
            OperationMode::AdditionAndSubtraction => "Addition & Subtraction",
        }
    }
}

/// Validation failures surfaced to the user before a drill starts
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error("number of problems must be between 1 and 50 (got {0})")]
    ProblemCount(u32),

    #[error("numbers per problem must be between 2 and 20 (got {0})")]
    OperandCount(u32),

    #[error("level must be between 1 and 5 (got {0})")]
    Level(u8),
}

/// Drill settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    // === Number generation ===
    /// Draw 1-digit operands (1-9)
    pub one_digit: bool,
    /// Draw 2-digit operands (10-99)
    pub two_digit: bool,
    /// Draw 3-digit operands (100-999)
    pub three_digit: bool,
    /// Addition only, or addition and subtraction
    pub operation_mode: OperationMode,

    // === Drill shape ===
    /// Problems per drill (1-50)
    pub problem_count: u32,
    /// Operands per problem (2-20)
    pub operands_per_problem: u32,
    /// Pace level 1-5; affects timing only, never the numbers
    pub level: u8,

    // === Audio ===
    /// Mute audio cues
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            one_digit: true,
            two_digit: false,
            three_digit: false,
            operation_mode: OperationMode::AdditionOnly,

            problem_count: 10,
            operands_per_problem: 3,
            level: 1,

            muted: false,
        }
    }
}

impl Settings {
    /// Enabled digit-size buckets, in ascending order. May be empty; the
    /// generator substitutes 1-digit in that case rather than erroring.
    pub fn enabled_digit_sizes(&self) -> Vec<DigitSize> {
        let mut sizes = Vec::with_capacity(3);
        if self.one_digit {
            sizes.push(DigitSize::One);
        }
        if self.two_digit {
            sizes.push(DigitSize::Two);
        }
        if self.three_digit {
            sizes.push(DigitSize::Three);
        }
        sizes
    }

    /// Reject out-of-range drill shapes before a session starts. An empty
    /// digit-size set is deliberately not an error.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(1..=50).contains(&self.problem_count) {
            return Err(SettingsError::ProblemCount(self.problem_count));
        }
        if !(2..=20).contains(&self.operands_per_problem) {
            return Err(SettingsError::OperandCount(self.operands_per_problem));
        }
        if !(1..=5).contains(&self.level) {
            return Err(SettingsError::Level(self.level));
        }
        Ok(())
    }

    /// Storage file for round-tripped settings
    const STORAGE_FILE: &'static str = "flash_anzan_settings.json";

    /// Load settings from the storage file, falling back to defaults on any
    /// failure (missing file, bad JSON, unreadable disk). Never fatal.
    pub fn load() -> Self {
        match std::fs::read_to_string(Self::STORAGE_FILE) {
            Ok(json) => Self::load_from_json(&json),
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Parse persisted settings, falling back to defaults on corrupt JSON
    fn load_from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", Self::STORAGE_FILE);
                settings
            }
            Err(err) => {
                log::warn!("Ignoring corrupt settings file: {err}");
                Self::default()
            }
        }
    }

    /// Save settings to the storage file. Failures are logged and ignored.
    pub fn save(&self) {
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(err) = std::fs::write(Self::STORAGE_FILE, json) {
                    log::warn!("Failed to save settings: {err}");
                } else {
                    log::info!("Settings saved");
                }
            }
            Err(err) => log::warn!("Failed to serialize settings: {err}"),
        }
    }
}
