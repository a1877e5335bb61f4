// main.rs - Split-flap departure board on an egui canvas
// Board logic lives in flapboard_core; this crate owns the window and panel

use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use eframe::egui;
use flapboard_core::driver::play_blocking;
use flapboard_core::patterns;
use flapboard_core::{BoardSettings, Scheduler};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod settings; // Config file + presentation settings
mod ui;       // eframe::App implementation

use settings::AppConfig;

#[derive(Parser, Debug)]
#[command(name = "flapboard", about = "Split-flap message board")]
struct Args {
    /// TOML configuration file
    config: Option<PathBuf>,

    /// Run without a window for this many seconds and print the board
    #[arg(long, value_name = "SECS")]
    headless: Option<f32>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => {
            info!(path = %path.display(), "loading configuration");
            AppConfig::load(path)?
        }
        None => AppConfig::default(),
    };

    if let Some(seconds) = args.headless {
        return run_headless(&config.board, seconds);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0]),
        ..Default::default()
    };

    let app = FlapBoard::new(config)?;
    eframe::run_native(
        "Flap Board",
        options,
        Box::new(move |_cc| Box::new(app)),
    )?;
    Ok(())
}

/// Play the board on a timer for `seconds` and print what it shows.
fn run_headless(settings: &BoardSettings, seconds: f32) -> Result<(), Box<dyn std::error::Error>> {
    let mut board = settings.build()?;
    let until = Duration::try_from_secs_f32(seconds)?;
    let ticks = play_blocking(&mut board, Duration::from_millis(50), |b| b.now() >= until)?;
    info!(ticks, cycles = board.cycles(), "headless run finished");
    for row in board.rows_text() {
        println!("|{row}|");
    }
    Ok(())
}

/// Board window state: the running core plus the panel's pending edits
pub struct FlapBoard {
    board: Scheduler,

    pub config: AppConfig,      // Edited by the panel
    pub applied: BoardSettings, // What `board` was built from
    pub last_tick: Instant,
    pub selected_preset: usize,
    pub art_seed: u64,
    pub ad_hoc: String,
    pub error: Option<String>,
    pub fullscreen: bool,
}

impl FlapBoard {
    pub fn new(config: AppConfig) -> Result<Self, flapboard_core::BoardError> {
        let board = config.board.build()?;
        Ok(Self {
            board,
            applied: config.board.clone(),
            config,
            last_tick: Instant::now(),
            selected_preset: 0,
            art_seed: 1,
            ad_hoc: String::new(),
            error: None,
            fullscreen: false,
        })
    }

    pub fn board(&self) -> &Scheduler {
        &self.board
    }

    pub fn is_dirty(&self) -> bool {
        self.config.board != self.applied
    }
}

/// Actions the control panel can take on the board
pub trait BoardInterface {
    fn tick_clock(&mut self);
    fn rebuild(&mut self);
    fn toggle_pause(&mut self);
    fn skip(&mut self);
    fn send_message(&mut self);
    fn apply_selected_preset(&mut self);
    fn apply_random_art(&mut self);
    fn toggle_fullscreen(&mut self) -> bool;
}

impl BoardInterface for FlapBoard {
    fn tick_clock(&mut self) {
        let now = Instant::now();
        self.board.advance(now - self.last_tick);
        self.last_tick = now;
    }

    fn rebuild(&mut self) {
        match self.config.board.build() {
            Ok(board) => {
                self.board = board;
                self.applied = self.config.board.clone();
                self.last_tick = Instant::now();
                self.error = None;
            }
            Err(e) => {
                warn!(error = %e, "keeping previous board");
                self.error = Some(e.to_string());
            }
        }
    }

    fn toggle_pause(&mut self) {
        if self.board.is_paused() {
            self.board.resume();
        } else {
            self.board.pause();
        }
    }

    fn skip(&mut self) {
        self.board.skip();
    }

    fn send_message(&mut self) {
        if !self.ad_hoc.trim().is_empty() {
            self.board.show_message(&self.ad_hoc);
        }
    }

    fn apply_selected_preset(&mut self) {
        if let Some(preset) = patterns::PRESETS.get(self.selected_preset) {
            self.config.board.playlist = preset.entries.iter().map(|e| e.to_string()).collect();
            self.rebuild();
        }
    }

    fn apply_random_art(&mut self) {
        let (rows, cols) = (self.config.board.rows, self.config.board.cols);
        self.config.board.playlist = patterns::random_art_playlist(rows, cols, self.art_seed, 4);
        self.art_seed = self.art_seed.wrapping_add(4);
        self.rebuild();
    }

    fn toggle_fullscreen(&mut self) -> bool {
        self.fullscreen = !self.fullscreen;
        self.fullscreen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> FlapBoard {
        let mut config = AppConfig::default();
        config.board.rows = 2;
        config.board.cols = 5;
        FlapBoard::new(config).unwrap()
    }

    #[test]
    fn invalid_edit_keeps_running_board() {
        let mut app = app();
        app.config.board.cols = 0;
        assert!(app.is_dirty());
        app.rebuild();
        assert!(app.error.is_some());
        assert_eq!(app.board().config().cols(), 5);
    }

    #[test]
    fn rebuild_applies_edits() {
        let mut app = app();
        app.config.board.rows = 3;
        app.rebuild();
        assert!(!app.is_dirty());
        assert_eq!(app.board().cells().len(), 15);
        assert!(app.error.is_none());
    }

    #[test]
    fn preset_replaces_playlist() {
        let mut app = app();
        app.selected_preset = 3;
        app.apply_selected_preset();
        assert_eq!(app.board().playlist().len(), patterns::PRESETS[3].entries.len());
    }

    #[test]
    fn random_art_moves_the_seed() {
        let mut app = app();
        app.apply_random_art();
        assert_eq!(app.board().playlist().len(), 4);
        assert_eq!(app.art_seed, 5);
    }

    #[test]
    fn pause_toggles() {
        let mut app = app();
        app.toggle_pause();
        assert!(app.board().is_paused());
        app.toggle_pause();
        assert!(!app.board().is_paused());
    }

    #[test]
    fn fullscreen_toggles_without_touching_the_board() {
        let mut app = app();
        assert!(app.toggle_fullscreen());
        assert!(app.fullscreen);
        assert!(!app.is_dirty());
        assert_eq!(app.board().cells().len(), 10);
        assert!(!app.toggle_fullscreen());
        assert!(!app.fullscreen);
    }
}
