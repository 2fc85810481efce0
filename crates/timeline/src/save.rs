//! Saved games and the JSON file that keeps them.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::clock::format_elapsed;
use crate::error::TimelineError;

/// Enough of a finished or paused game to resume it later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedGame {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    /// Elapsed play time as shown on the clock.
    pub duration: String,
    /// Mode label, e.g. "vs AI (Hard)".
    pub mode: String,
    pub fen: String,
    /// SAN moves from the start position.
    pub history: Vec<String>,
}

impl SavedGame {
    pub fn new(mode: String, fen: String, history: Vec<String>, elapsed_secs: u64) -> Self {
        Self {
            id: Uuid::new_v4(),
            date: Utc::now(),
            duration: format_elapsed(elapsed_secs),
            mode,
            fen,
            history,
        }
    }
}

/// Saved games, newest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SaveList {
    pub games: Vec<SavedGame>,
}

impl SaveList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TimelineError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| TimelineError::io(path, e))?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Like [`SaveList::load`], but a missing file is an empty list.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, TimelineError> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::new())
        }
    }

    /// Save to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), TimelineError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|e| TimelineError::io(path, e))
    }

    pub fn add(&mut self, game: SavedGame) {
        info!(id = %game.id, mode = %game.mode, plies = game.history.len(), "game saved");
        self.games.insert(0, game);
    }

    pub fn remove(&mut self, id: Uuid) -> Option<SavedGame> {
        let idx = self.games.iter().position(|g| g.id == id)?;
        Some(self.games.remove(idx))
    }

    pub fn get(&self, id: Uuid) -> Option<&SavedGame> {
        self.games.iter().find(|g| g.id == id)
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}

#[cfg(test)]
#[path = "save_tests.rs"]
mod save_tests;
