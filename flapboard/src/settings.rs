// settings.rs - Application configuration: board settings plus presentation

use std::path::{Path, PathBuf};

use egui::{Color32, FontFamily};
use flapboard_core::{BoardError, BoardSettings};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid configuration file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid board settings: {0}")]
    Board(#[from] BoardError),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub board: BoardSettings,
    pub style: StyleSettings,
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let text = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    /// Parse and validate; a board that cannot be built is rejected here.
    pub fn parse(text: &str) -> Result<Self, SettingsError> {
        let config: AppConfig = toml::from_str(text)?;
        config.board.build()?;
        Ok(config)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Black,
    White,
}

impl Theme {
    pub const ALL: [Theme; 2] = [Theme::Black, Theme::White];

    pub fn name(self) -> &'static str {
        match self {
            Theme::Black => "Black",
            Theme::White => "White",
        }
    }

    /// Text, flap and backdrop colors.
    pub fn palette(self) -> ([u8; 3], [u8; 3], [u8; 3]) {
        match self {
            Theme::Black => ([240, 240, 230], [28, 28, 28], [8, 8, 8]),
            Theme::White => ([20, 20, 20], [236, 236, 230], [200, 200, 196]),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontChoice {
    #[default]
    Monospace,
    Proportional,
}

impl FontChoice {
    pub const ALL: [FontChoice; 2] = [FontChoice::Monospace, FontChoice::Proportional];

    pub fn name(self) -> &'static str {
        match self {
            FontChoice::Monospace => "Monospace",
            FontChoice::Proportional => "Proportional",
        }
    }

    pub fn family(self) -> FontFamily {
        match self {
            FontChoice::Monospace => FontFamily::Monospace,
            FontChoice::Proportional => FontFamily::Proportional,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleSettings {
    pub theme: Theme,
    /// Overrides for the theme palette.
    pub text_color: Option<[u8; 3]>,
    pub fill_color: Option<[u8; 3]>,
    pub backdrop_color: Option<[u8; 3]>,
    pub font: FontChoice,
    pub bold: bool,
    pub italic: bool,
    /// Glyph size relative to the flap height.
    pub size: f32,
}

impl StyleSettings {
    /// Switch theme, dropping any color overrides.
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        self.text_color = None;
        self.fill_color = None;
        self.backdrop_color = None;
    }

    pub fn text_rgb(&self) -> [u8; 3] {
        self.text_color.unwrap_or(self.theme.palette().0)
    }

    pub fn fill_rgb(&self) -> [u8; 3] {
        self.fill_color.unwrap_or(self.theme.palette().1)
    }

    pub fn backdrop_rgb(&self) -> [u8; 3] {
        self.backdrop_color.unwrap_or(self.theme.palette().2)
    }

    pub fn text(&self) -> Color32 {
        rgb(self.text_rgb())
    }

    pub fn fill(&self) -> Color32 {
        rgb(self.fill_rgb())
    }

    pub fn backdrop(&self) -> Color32 {
        rgb(self.backdrop_rgb())
    }
}

impl Default for StyleSettings {
    fn default() -> Self {
        Self {
            theme: Theme::Black,
            text_color: None,
            fill_color: None,
            backdrop_color: None,
            font: FontChoice::Monospace,
            bold: true,
            italic: false,
            size: 1.0,
        }
    }
}

fn rgb([r, g, b]: [u8; 3]) -> Color32 {
    Color32::from_rgb(r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flapboard_core::{Justification, StepPolicy};

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(AppConfig::parse("").unwrap(), AppConfig::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = AppConfig::parse(
            r#"
            [board]
            rows = 3
            cols = 12
            justification = "right"
            cycle_secs = 4.5
            playlist = ["GATE 4", "BOARDING\nNOW"]

            [board.policy]
            kind = "blur"
            snap_chance = 0.2
            max_steps = 10

            [style]
            theme = "white"
            italic = true
            "#,
        )
        .unwrap();
        assert_eq!(config.board.rows, 3);
        assert_eq!(config.board.justification, Justification::Right);
        assert_eq!(config.board.policy, StepPolicy::Blur { snap_chance: 0.2, max_steps: 10 });
        assert_eq!(config.board.playlist.len(), 2);
        assert_eq!(config.board.flip_ms, 150);
        assert_eq!(config.style.theme, Theme::White);
        assert!(config.style.italic);
        assert_eq!(config.style.fill_rgb(), Theme::White.palette().1);
    }

    #[test]
    fn unbuildable_board_is_rejected() {
        let err = AppConfig::parse("[board]\ncols = 0\n").unwrap_err();
        assert!(matches!(err, SettingsError::Board(BoardError::ZeroCols)));

        let err = AppConfig::parse("[board]\nrows = 100000\ncols = 100000\n").unwrap_err();
        assert!(matches!(
            err,
            SettingsError::Board(BoardError::BoardTooLarge { rows: 100_000, cols: 100_000 })
        ));

        let err = AppConfig::parse("[board]\nrows = \"six\"\n").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn theme_switch_drops_overrides() {
        let mut style = StyleSettings {
            fill_color: Some([255, 0, 0]),
            ..StyleSettings::default()
        };
        assert_eq!(style.fill(), Color32::from_rgb(255, 0, 0));
        style.set_theme(Theme::White);
        assert_eq!(style.fill_color, None);
        assert_eq!(style.text(), Color32::from_rgb(20, 20, 20));
    }
}
