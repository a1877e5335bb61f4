//! Flip scheduler: one state machine per cell and the playlist cycle, all
//! driven from a single logical clock.
//!
//! Nothing here sleeps. The owner calls [`Scheduler::advance`] with however
//! much time has passed; every deadline that falls inside that window fires
//! in time order. When the cycle tick and cell steps fall on the same
//! instant the tick goes first, so a new frame's targets are all in place
//! before any cell takes its next step.

use std::time::Duration;

use tracing::{debug, info, trace, warn};

use crate::cell::{CellState, FlapRng, StepOutcome, StepPolicy};
use crate::config::Timing;
use crate::error::{BoardError, Result};
use crate::grid::GridConfig;
use crate::layout::{Frame, format};
use crate::playlist::Playlist;
use crate::symbol::{SafeAlphabet, Symbol};

const DEFAULT_SEED: u64 = 0x5eed;

#[derive(Debug, Clone)]
pub struct Scheduler {
    config: GridConfig,
    playlist: Playlist,
    timing: Timing,
    policy: StepPolicy,
    rng: FlapRng,
    cells: Vec<CellState>,
    now: Duration,
    next_cycle: Option<Duration>,
    cycles: u64,
}

impl Scheduler {
    pub fn new<S: AsRef<str>>(
        config: GridConfig,
        entries: &[S],
        timing: Timing,
        policy: StepPolicy,
    ) -> Result<Self> {
        let timing = Timing::new(timing.flip, timing.cycle, timing.warm_up)?;
        let policy = policy.validate()?;
        let playlist = Playlist::compose(entries, &config);
        info!(
            rows = config.rows(),
            cols = config.cols(),
            frames = playlist.len(),
            policy = policy.name(),
            "flap board built"
        );
        Ok(Self {
            cells: vec![CellState::default(); config.cell_count()],
            config,
            playlist,
            timing,
            policy,
            rng: FlapRng::seeded(DEFAULT_SEED),
            now: Duration::ZERO,
            next_cycle: Some(timing.warm_up),
            cycles: 0,
        })
    }

    /// Reseed the blur generator.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = FlapRng::seeded(seed);
        self
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn timing(&self) -> Timing {
        self.timing
    }

    pub fn policy(&self) -> StepPolicy {
        self.policy
    }

    pub fn cells(&self) -> &[CellState] {
        &self.cells
    }

    pub fn cell(&self, index: usize) -> Option<&CellState> {
        self.cells.get(index)
    }

    /// Time since the board was built.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Index of the frame the next cycle tick will show.
    pub fn cursor(&self) -> usize {
        self.playlist.cursor()
    }

    /// Number of cycle ticks so far.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn is_paused(&self) -> bool {
        self.next_cycle.is_none()
    }

    /// True when no cell is turning.
    pub fn is_settled(&self) -> bool {
        self.cells.iter().all(|c| !c.is_animating())
    }

    /// What the board shows right now, one string per row.
    pub fn rows_text(&self) -> Vec<String> {
        self.cells
            .chunks(self.config.cols())
            .map(|row| row.iter().map(|c| c.current().as_str()).collect())
            .collect()
    }

    /// Progress of the step in flight on `index`, if it is turning.
    pub fn step_progress(&self, index: usize) -> Option<f32> {
        self.cells.get(index)?.progress(self.now, self.timing.flip)
    }

    /// Point one cell at `symbol`. Symbols a flap cannot show become a space.
    pub fn set_target(&mut self, index: usize, symbol: Symbol) -> Result<()> {
        let len = self.cells.len();
        let cell = self
            .cells
            .get_mut(index)
            .ok_or(BoardError::CellOutOfRange { index, len })?;
        let alphabet = self.config.alphabet();
        retarget(cell, index, symbol, alphabet, self.policy, &mut self.rng, self.now);
        Ok(())
    }

    /// Put a whole frame up at once, cell by cell in index order.
    pub fn show_frame(&mut self, frame: &Frame) {
        let alphabet = self.config.alphabet();
        let cells = self.cells.iter_mut().zip(frame.cells());
        for (index, (cell, symbol)) in cells.enumerate() {
            retarget(cell, index, symbol.clone(), alphabet, self.policy, &mut self.rng, self.now);
        }
    }

    /// Lay out and show a one-off message without touching the playlist.
    pub fn show_message(&mut self, message: &str) {
        let frame = format(message, &self.config);
        debug!(text = message, "showing ad-hoc message");
        self.show_frame(&frame);
    }

    /// Stop advancing the playlist. Cells already turning still settle.
    pub fn pause(&mut self) {
        if self.next_cycle.take().is_some() {
            debug!(now = ?self.now, "playlist paused");
        }
    }

    /// Resume the playlist; the next frame goes up one cycle from now.
    pub fn resume(&mut self) {
        if self.next_cycle.is_none() {
            self.next_cycle = Some(self.now + self.timing.cycle);
            debug!(now = ?self.now, "playlist resumed");
        }
    }

    /// Show the next frame immediately.
    pub fn skip(&mut self) {
        self.cycle_tick();
        if self.next_cycle.is_some() {
            self.next_cycle = Some(self.now + self.timing.cycle);
        }
    }

    /// Earliest pending deadline, cycle or cell step.
    pub fn next_deadline(&self) -> Option<Duration> {
        let flip = self.timing.flip;
        self.cells
            .iter()
            .filter_map(|c| c.deadline(flip))
            .chain(self.next_cycle)
            .min()
    }

    /// Move the clock forward by `elapsed`, firing everything due on the way.
    pub fn advance(&mut self, elapsed: Duration) {
        let until = self.now + elapsed;
        while let Some(deadline) = self.next_deadline().filter(|d| *d <= until) {
            self.now = self.now.max(deadline);
            self.fire_due();
        }
        self.now = until;
    }

    fn fire_due(&mut self) {
        if let Some(at) = self.next_cycle {
            if at <= self.now {
                self.cycle_tick();
                self.next_cycle = Some(self.now + self.timing.cycle);
            }
        }

        let flip = self.timing.flip;
        let now = self.now;
        let alphabet = self.config.alphabet();
        for (index, cell) in self.cells.iter_mut().enumerate() {
            if cell.deadline(flip).is_some_and(|d| d <= now) {
                let outcome = cell.complete_step(alphabet, self.policy, &mut self.rng, now);
                if outcome == StepOutcome::Settled {
                    trace!(index, symbol = %cell.current(), "cell settled");
                }
            }
        }
    }

    fn cycle_tick(&mut self) {
        self.cycles += 1;
        let Some(frame) = self.playlist.current().cloned() else {
            debug!("playlist empty, nothing to show");
            return;
        };
        debug!(cursor = self.playlist.cursor(), cycle = self.cycles, "showing playlist frame");
        self.show_frame(&frame);
        self.playlist.advance();
    }
}

fn retarget(
    cell: &mut CellState,
    index: usize,
    symbol: Symbol,
    alphabet: &SafeAlphabet,
    policy: StepPolicy,
    rng: &mut FlapRng,
    now: Duration,
) {
    let symbol = if symbol.is_displayable() {
        symbol
    } else {
        warn!(index, symbol = ?symbol.as_str(), "undisplayable symbol replaced with space");
        Symbol::space()
    };
    if cell.retarget(symbol, alphabet, policy, rng, now) {
        trace!(index, target = %cell.target(), "cell started turning");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Justification;

    const FLIP: Duration = Duration::from_millis(100);

    fn board(entries: &[&str]) -> Scheduler {
        let wheel = SafeAlphabet::parse(" ABC").unwrap();
        let config = GridConfig::new(1, 3, Justification::Left, wheel).unwrap();
        let timing = Timing::new(FLIP, Duration::from_secs(2), Duration::from_millis(500)).unwrap();
        Scheduler::new(config, entries, timing, StepPolicy::Cycle).unwrap()
    }

    #[test]
    fn starts_blank_and_idle() {
        let board = board(&["ABC"]);
        assert_eq!(board.rows_text(), ["   "]);
        assert!(board.is_settled());
        assert_eq!(board.next_deadline(), Some(Duration::from_millis(500)));
    }

    #[test]
    fn nothing_moves_before_warm_up() {
        let mut board = board(&["ABC"]);
        board.advance(Duration::from_millis(499));
        assert!(board.is_settled());
        assert_eq!(board.cycles(), 0);
        board.advance(Duration::from_millis(1));
        assert_eq!(board.cycles(), 1);
        assert!(!board.is_settled());
        assert_eq!(board.rows_text(), ["   "]);
    }

    #[test]
    fn frame_settles_after_enough_steps() {
        let mut board = board(&["CAB"]);
        board.advance(Duration::from_millis(500) + FLIP * 3);
        assert_eq!(board.rows_text(), ["CAB"]);
        assert!(board.is_settled());
    }

    #[test]
    fn one_big_advance_matches_many_small_ones() {
        let mut coarse = board(&["CAB", "BCA"]);
        let mut fine = board(&["CAB", "BCA"]);
        coarse.advance(Duration::from_millis(2_730));
        for _ in 0..273 {
            fine.advance(Duration::from_millis(10));
        }
        assert_eq!(coarse.rows_text(), fine.rows_text());
        assert_eq!(coarse.cycles(), fine.cycles());
        assert_eq!(coarse.now(), fine.now());
    }

    #[test]
    fn empty_playlist_ticks_quietly() {
        let mut board = board(&[]);
        board.advance(Duration::from_secs(10));
        assert!(board.cycles() >= 5);
        assert!(board.is_settled());
        assert_eq!(board.rows_text(), ["   "]);
    }

    #[test]
    fn out_of_range_target_is_an_error() {
        let mut board = board(&[]);
        assert_eq!(
            board.set_target(3, Symbol::from("A")),
            Err(BoardError::CellOutOfRange { index: 3, len: 3 })
        );
    }

    #[test]
    fn undisplayable_target_becomes_space() {
        let mut board = board(&[]);
        board.set_target(0, Symbol::from("A")).unwrap();
        board.advance(FLIP);
        assert_eq!(board.rows_text(), ["A  "]);
        board.set_target(0, Symbol::from("\u{1b}")).unwrap();
        assert_eq!(board.cell(0).unwrap().target(), &Symbol::space());
    }

    #[test]
    fn pause_holds_the_playlist() {
        let mut board = board(&["AAA", "BBB"]);
        board.advance(Duration::from_millis(500));
        board.pause();
        board.advance(Duration::from_secs(10));
        assert_eq!(board.rows_text(), ["AAA"]);
        assert_eq!(board.cycles(), 1);
        board.resume();
        board.advance(Duration::from_secs(2) + FLIP * 2);
        assert_eq!(board.rows_text(), ["BBB"]);
    }

    #[test]
    fn skip_shows_next_frame_now() {
        let mut board = board(&["AAA", "CCC"]);
        board.skip();
        assert_eq!(board.cursor(), 1);
        board.advance(FLIP);
        assert_eq!(board.rows_text(), ["AAA"]);
        assert_eq!(board.next_deadline(), Some(Duration::from_secs(2)));
    }

    #[test]
    fn show_frame_sanitizes_every_cell() {
        let mut board = board(&[]);
        let config = board.config().clone();
        let frame = format("A\u{7}C", &config);
        board.show_frame(&frame);
        let targets: Vec<&Symbol> = board.cells().iter().map(CellState::target).collect();
        assert_eq!(targets, [&Symbol::from("A"), &Symbol::space(), &Symbol::from("C")]);
        board.advance(FLIP * 3);
        assert_eq!(board.rows_text(), ["A C"]);
    }

    #[test]
    fn show_message_bypasses_the_playlist() {
        let mut board = board(&["AAA"]);
        board.show_message("B");
        board.advance(FLIP * 2);
        assert_eq!(board.rows_text(), ["B  "]);
        assert_eq!(board.cursor(), 0);
    }

    #[test]
    fn step_progress_is_reported() {
        let mut board = board(&[]);
        board.set_target(1, Symbol::from("B")).unwrap();
        board.advance(FLIP / 2);
        let progress = board.step_progress(1).unwrap();
        assert!((progress - 0.5).abs() < 1e-4);
        assert_eq!(board.step_progress(0), None);
    }
}
