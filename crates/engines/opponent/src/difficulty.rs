//! Difficulty tiers and the search depth each one uses.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::selector::SelectionPolicy;

/// Depth used when no recognised tier is configured.
pub const DEFAULT_DEPTH: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Master,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown difficulty '{0}' (expected easy, medium, hard or master)")]
pub struct UnknownDifficulty(pub String);

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Master,
    ];

    /// Capitalised name for menus and save records.
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::Master => "Master",
        }
    }

    /// Nominal Elo of the computer at this tier, used for post-game rating
    /// updates.
    pub fn ai_rating(self) -> f64 {
        match self {
            Difficulty::Easy => 1200.0,
            Difficulty::Medium => 1500.0,
            Difficulty::Hard => 1800.0,
            Difficulty::Master => 2100.0,
        }
    }

    /// Search depth for a position holding `pieces` pieces (both sides).
    pub fn depth(self, pieces: usize) -> u8 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium if pieces <= 14 => 3,
            Difficulty::Medium => 2,
            Difficulty::Hard if pieces <= 12 => 4,
            Difficulty::Hard => 3,
            Difficulty::Master => 4,
        }
    }

    pub fn policy(self) -> SelectionPolicy {
        SelectionPolicy::for_difficulty(Some(self))
    }
}

/// Depth for an optional tier; `None` stands for an unrecognised one.
pub fn search_depth(difficulty: Option<Difficulty>, pieces: usize) -> u8 {
    difficulty.map_or(DEFAULT_DEPTH, |d| d.depth(pieces))
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Master => "master",
        };
        f.write_str(name)
    }
}

impl FromStr for Difficulty {
    type Err = UnknownDifficulty;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            "master" => Ok(Difficulty::Master),
            _ => Err(UnknownDifficulty(s.to_string())),
        }
    }
}

#[cfg(test)]
#[path = "difficulty_tests.rs"]
mod difficulty_tests;
