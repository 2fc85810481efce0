use chess_core::{Color, GameStatus, PieceKind};

/// Notifications for the host, collected until drained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimelineEvent {
    /// The canonical move list changed.
    PositionChanged { plies: usize, fen: String },
    GameOver {
        status: GameStatus,
        winner: Option<Color>,
    },
    HintAvailable { from: u8, to: u8 },
    HintCleared,
    /// A pawn reached the last rank; the host must ask for a piece.
    PromotionPending { from: u8, to: u8 },
    /// `None` when the promotion was cancelled.
    PromotionResolved { piece: Option<PieceKind> },
}
