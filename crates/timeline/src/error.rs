use std::path::PathBuf;

use chess_core::IllegalMove;
use thiserror::Error;

/// Failures reading or writing session files.
#[derive(Debug, Error)]
pub enum TimelineError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid game config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
}

impl TimelineError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        TimelineError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Why the timeline refused a move.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("the game is over")]
    GameOver,

    #[error("no promotion is pending")]
    NoPendingPromotion,

    #[error(transparent)]
    Illegal(#[from] IllegalMove),
}
