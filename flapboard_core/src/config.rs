//! Board settings as read from a configuration file.
//!
//! Every field has a default so a partial file (or none at all) works.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cell::StepPolicy;
use crate::error::{BoardError, Result};
use crate::grid::{DEFAULT_COLS, DEFAULT_ROWS, GridConfig, Justification, LetterCase};
use crate::scheduler::Scheduler;
use crate::symbol::{DEFAULT_ALPHABET, SafeAlphabet};

pub const DEFAULT_FLIP: Duration = Duration::from_millis(150);
pub const DEFAULT_CYCLE: Duration = Duration::from_secs(8);
pub const DEFAULT_WARM_UP: Duration = Duration::from_millis(500);

/// Clock settings for one board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    /// Length of one flap step.
    pub flip: Duration,
    /// Time between playlist advances.
    pub cycle: Duration,
    /// Delay before the first message goes up.
    pub warm_up: Duration,
}

impl Timing {
    pub fn new(flip: Duration, cycle: Duration, warm_up: Duration) -> Result<Self> {
        if flip.is_zero() {
            return Err(BoardError::InvalidTiming("flip interval must be positive"));
        }
        if cycle.is_zero() {
            return Err(BoardError::InvalidTiming("cycle period must be positive"));
        }
        Ok(Self { flip, cycle, warm_up })
    }
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            flip: DEFAULT_FLIP,
            cycle: DEFAULT_CYCLE,
            warm_up: DEFAULT_WARM_UP,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardSettings {
    pub rows: usize,
    pub cols: usize,
    pub justification: Justification,
    pub letter_case: LetterCase,
    /// Wheel symbols in flip order.
    pub alphabet: String,
    pub cycle_secs: f32,
    pub flip_ms: u64,
    pub warm_up_ms: u64,
    pub policy: StepPolicy,
    pub seed: u64,
    pub playlist: Vec<String>,
}

impl Default for BoardSettings {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            justification: Justification::Center,
            letter_case: LetterCase::Upper,
            alphabet: DEFAULT_ALPHABET.to_owned(),
            cycle_secs: DEFAULT_CYCLE.as_secs_f32(),
            flip_ms: DEFAULT_FLIP.as_millis() as u64,
            warm_up_ms: DEFAULT_WARM_UP.as_millis() as u64,
            policy: StepPolicy::Cycle,
            seed: 0x5eed,
            playlist: vec!["WELCOME TO OMNI BOARD".to_owned()],
        }
    }
}

impl BoardSettings {
    pub fn grid_config(&self) -> Result<GridConfig> {
        let alphabet = SafeAlphabet::parse(&self.alphabet)?;
        Ok(GridConfig::new(self.rows, self.cols, self.justification, alphabet)?
            .with_letter_case(self.letter_case))
    }

    pub fn timing(&self) -> Result<Timing> {
        let cycle = Duration::try_from_secs_f32(self.cycle_secs).map_err(|_| {
            BoardError::InvalidTiming("cycle seconds must be a finite, non-negative number")
        })?;
        Timing::new(
            Duration::from_millis(self.flip_ms),
            cycle,
            Duration::from_millis(self.warm_up_ms),
        )
    }

    /// Validate everything and build a fresh board.
    pub fn build(&self) -> Result<Scheduler> {
        let scheduler = Scheduler::new(
            self.grid_config()?,
            &self.playlist,
            self.timing()?,
            self.policy.validate()?,
        )?;
        Ok(scheduler.with_seed(self.seed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_describe_the_original_board() {
        let settings = BoardSettings::default();
        let grid = settings.grid_config().unwrap();
        assert_eq!((grid.rows(), grid.cols()), (6, 22));
        assert_eq!(grid.letter_case(), LetterCase::Upper);
        assert_eq!(settings.timing().unwrap(), Timing::default());
    }

    #[test]
    fn bad_settings_are_rejected() {
        let settings = BoardSettings { rows: 0, ..BoardSettings::default() };
        assert_eq!(settings.build().err(), Some(BoardError::ZeroRows));

        let settings = BoardSettings {
            rows: 1 << 40,
            cols: 1 << 30,
            ..BoardSettings::default()
        };
        assert_eq!(
            settings.grid_config().err(),
            Some(BoardError::BoardTooLarge { rows: 1 << 40, cols: 1 << 30 })
        );

        let settings = BoardSettings { alphabet: String::new(), ..BoardSettings::default() };
        assert_eq!(settings.build().err(), Some(BoardError::EmptyAlphabet));

        let settings = BoardSettings { cycle_secs: -1.0, ..BoardSettings::default() };
        assert!(matches!(settings.build().err(), Some(BoardError::InvalidTiming(_))));

        let settings = BoardSettings { flip_ms: 0, ..BoardSettings::default() };
        assert!(matches!(settings.build().err(), Some(BoardError::InvalidTiming(_))));
    }

    #[test]
    fn build_composes_the_playlist() {
        let settings = BoardSettings {
            playlist: vec!["one".into(), "two".into()],
            ..BoardSettings::default()
        };
        let board = settings.build().unwrap();
        assert_eq!(board.playlist().len(), 2);
        assert_eq!(board.cells().len(), 6 * 22);
    }
}
