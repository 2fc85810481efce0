//! Error types for notation parsing and move application.

use thiserror::Error;

/// Failure to decode a FEN string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenError {
    #[error("expected at least 4 FEN fields, found {0}")]
    MissingFields(usize),

    #[error("board section must have 8 ranks, found {0}")]
    RankCount(usize),

    #[error("rank {rank} does not describe exactly 8 files")]
    RankWidth { rank: usize },

    #[error("invalid piece character '{0}'")]
    PieceChar(char),

    #[error("invalid side to move '{0}'")]
    SideToMove(String),

    #[error("invalid castling character '{0}'")]
    CastlingChar(char),

    #[error("invalid en-passant square '{0}'")]
    EnPassant(String),

    #[error("invalid move counter '{0}'")]
    Counter(String),

    #[error("each side needs exactly one king")]
    Kings,
}

/// Failure to resolve a SAN or coordinate move against a position.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SanError {
    #[error("empty move text")]
    Empty,

    #[error("no legal move matches '{0}'")]
    NoMatch(String),

    #[error("'{0}' is ambiguous in this position")]
    Ambiguous(String),
}

/// A move that is not legal in the position it was offered to.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("illegal move {mv} in position {fen}")]
pub struct IllegalMove {
    pub mv: String,
    pub fen: String,
}
