//! Session configuration.
//!
//! A [`GameConfig`] describes how a timeline starts: who plays, how strong
//! the computer is, and optionally a position and move list to resume from.
//! Configs are usually built in code or read from a TOML file:
//!
//! ```toml
//! mode = "ai"
//! difficulty = "hard"
//! player_color = "black"
//! hints = true
//! ```

use std::path::Path;

use chess_core::Color;
use opponent::Difficulty;
use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

use crate::error::TimelineError;
use crate::save::SavedGame;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    /// Human against the computer opponent.
    #[default]
    Ai,
    /// Two humans sharing the board.
    Local,
    /// Free play for learning; no computer moves.
    Tutorial,
}

impl GameMode {
    /// Name shown in save lists, e.g. "vs AI (Medium)".
    pub fn label(self, difficulty: Option<Difficulty>) -> String {
        match (self, difficulty) {
            (GameMode::Local, _) => "Local Hotseat".to_string(),
            (GameMode::Tutorial, _) => "Tutorial".to_string(),
            (GameMode::Ai, Some(d)) => format!("vs AI ({})", d.label()),
            (GameMode::Ai, None) => "vs AI".to_string(),
        }
    }

    /// Inverse of [`GameMode::label`]. Unknown labels count as local games.
    pub fn from_label(label: &str) -> (GameMode, Option<Difficulty>) {
        let label = label.trim();
        if let Some(rest) = label.strip_prefix("vs AI") {
            let difficulty = rest
                .trim()
                .strip_prefix('(')
                .and_then(|r| r.strip_suffix(')'))
                .and_then(|d| d.parse().ok());
            (GameMode::Ai, difficulty)
        } else if label == "Tutorial" {
            (GameMode::Tutorial, None)
        } else {
            (GameMode::Local, None)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerColor {
    #[default]
    White,
    Black,
    Random,
}

impl PlayerColor {
    pub fn resolve<R: Rng + ?Sized>(self, rng: &mut R) -> Color {
        match self {
            PlayerColor::White => Color::White,
            PlayerColor::Black => Color::Black,
            PlayerColor::Random => {
                if rng.gen_bool(0.5) {
                    Color::White
                } else {
                    Color::Black
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub mode: GameMode,
    /// `None` means the configured tier was not recognised; the opponent
    /// then searches at the default depth and always plays its best move.
    #[serde(
        deserialize_with = "lenient_difficulty",
        skip_serializing_if = "Option::is_none"
    )]
    pub difficulty: Option<Difficulty>,
    pub player_color: PlayerColor,
    pub hints: bool,
    /// Position to resume from when the move list is missing or unplayable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fen: Option<String>,
    /// SAN moves from the standard start position.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub history: Vec<String>,
    /// Seeds the session RNG for reproducible opponents.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            mode: GameMode::Ai,
            difficulty: Some(Difficulty::Medium),
            player_color: PlayerColor::White,
            hints: false,
            fen: None,
            history: Vec::new(),
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn ai(difficulty: Difficulty, player_color: PlayerColor) -> Self {
        Self {
            mode: GameMode::Ai,
            difficulty: Some(difficulty),
            player_color,
            ..Self::default()
        }
    }

    pub fn local() -> Self {
        Self {
            mode: GameMode::Local,
            ..Self::default()
        }
    }

    pub fn tutorial() -> Self {
        Self {
            mode: GameMode::Tutorial,
            hints: true,
            ..Self::default()
        }
    }

    pub fn from_toml_str(text: &str) -> Result<Self, TimelineError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, TimelineError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| TimelineError::io(path, e))?;
        Self::from_toml_str(&text)
    }

    /// Same settings, fresh board.
    pub fn new_game(&self) -> Self {
        Self {
            fen: None,
            history: Vec::new(),
            ..self.clone()
        }
    }

    /// Config that resumes `saved`. Mode and difficulty come from the save's
    /// label when it names them; everything else comes from `base`.
    pub fn resume(saved: &SavedGame, base: &GameConfig) -> Self {
        let (mode, difficulty) = GameMode::from_label(&saved.mode);
        Self {
            mode,
            difficulty: difficulty.or(base.difficulty),
            fen: Some(saved.fen.clone()),
            history: saved.history.clone(),
            ..base.clone()
        }
    }

    pub fn is_resume(&self) -> bool {
        self.fen.is_some() || !self.history.is_empty()
    }

    pub fn mode_label(&self) -> String {
        self.mode.label(self.difficulty)
    }
}

fn lenient_difficulty<'de, D>(deserializer: D) -> Result<Option<Difficulty>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|name| match name.parse() {
        Ok(d) => Some(d),
        Err(e) => {
            warn!(error = %e, "using default search for unrecognised difficulty");
            None
        }
    }))
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
