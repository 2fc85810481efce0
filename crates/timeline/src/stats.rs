//! Post-game statistics and the player's rating against the computer.

use std::collections::BTreeMap;
use std::path::Path;

use opponent::Difficulty;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::TimelineError;

/// Rating a new player starts from
pub const INITIAL_RATING: f64 = 1200.0;

/// K-factor for rating updates
pub const K_FACTOR: f64 = 32.0;

/// Plies of the move list that identify an opening.
pub const OPENING_PLIES: usize = 6;

/// Result of a game from the human's side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Win,
    Loss,
    Draw,
}

impl Outcome {
    pub fn score(self) -> f64 {
        match self {
            Outcome::Win => 1.0,
            Outcome::Loss => 0.0,
            Outcome::Draw => 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub played: u32,
    pub won: u32,
    pub lost: u32,
    pub drawn: u32,
    /// Games per opening, keyed by the first plies in SAN.
    pub openings: BTreeMap<String, u32>,
    pub rating: f64,
}

impl Default for PlayerStats {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerStats {
    pub fn new() -> Self {
        Self {
            played: 0,
            won: 0,
            lost: 0,
            drawn: 0,
            openings: BTreeMap::new(),
            rating: INITIAL_RATING,
        }
    }

    /// Load stats from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TimelineError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| TimelineError::io(path, e))?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Like [`PlayerStats::load`], but a missing file means a new player.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, TimelineError> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::new())
        }
    }

    /// Save stats to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), TimelineError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|e| TimelineError::io(path, e))
    }

    /// Expected score against a computer rated `opponent`
    pub fn expected_score(&self, opponent: f64) -> f64 {
        1.0 / (1.0 + 10.0_f64.powf((opponent - self.rating) / 400.0))
    }

    /// Count a finished game against the computer at `difficulty`.
    pub fn record_game(&mut self, outcome: Outcome, difficulty: Difficulty, sans: &[String]) {
        self.played += 1;
        match outcome {
            Outcome::Win => self.won += 1,
            Outcome::Loss => self.lost += 1,
            Outcome::Draw => self.drawn += 1,
        }

        let expected = self.expected_score(difficulty.ai_rating());
        let before = self.rating;
        self.rating = (self.rating + K_FACTOR * (outcome.score() - expected)).round();

        if !sans.is_empty() {
            let key = opening_key(sans);
            *self.openings.entry(key).or_insert(0) += 1;
        }

        info!(
            outcome = ?outcome,
            difficulty = %difficulty,
            rating = self.rating,
            change = self.rating - before,
            "game recorded"
        );
    }

    /// Openings sorted by how often they were played.
    pub fn top_openings(&self) -> Vec<(&str, u32)> {
        let mut entries: Vec<_> = self
            .openings
            .iter()
            .map(|(k, &n)| (k.as_str(), n))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries
    }
}

/// The first [`OPENING_PLIES`] SAN moves joined by spaces.
pub fn opening_key(sans: &[String]) -> String {
    sans.iter()
        .take(OPENING_PLIES)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
#[path = "stats_tests.rs"]
mod stats_tests;
