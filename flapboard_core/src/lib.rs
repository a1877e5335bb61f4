//! Split-flap board engine.
//!
//! [`layout::format`] turns a message into a [`Frame`] for a given
//! [`GridConfig`]; a [`Scheduler`] owns one flip state machine per cell and
//! rotates through a playlist of frames on a fixed cycle.
//!
//! ```
//! use std::time::Duration;
//! use flapboard_core::{BoardSettings, Scheduler};
//!
//! let settings = BoardSettings {
//!     rows: 1,
//!     cols: 4,
//!     playlist: vec!["hi".into()],
//!     ..BoardSettings::default()
//! };
//! let mut board: Scheduler = settings.build().unwrap();
//! board.advance(Duration::from_secs(5));
//! assert_eq!(board.rows_text(), [" HI "]);
//! ```

pub mod cell;
pub mod config;
pub mod driver;
pub mod error;
pub mod grid;
pub mod layout;
pub mod patterns;
pub mod playlist;
pub mod scheduler;
pub mod symbol;

pub use cell::{CellState, StepPolicy};
pub use config::{BoardSettings, Timing};
pub use error::{BoardError, Result};
pub use grid::{GridConfig, Justification, LetterCase};
pub use layout::{Frame, format};
pub use playlist::Playlist;
pub use scheduler::Scheduler;
pub use symbol::{SafeAlphabet, Symbol};
