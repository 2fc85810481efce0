//! A played game: start position, the moves made from it and enough
//! bookkeeping to take them back and to spot repetitions.

use std::fmt;

use crate::board::{Position, Undo};
use crate::error::{FenError, IllegalMove, SanError};
use crate::san::{parse_san, to_san};
use crate::types::*;
use crate::uci::move_to_uci;

/// Verbose record of one played move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveRecord {
    pub mv: Move,
    pub color: Color,
    pub piece: PieceKind,
    pub captured: Option<PieceKind>,
    pub san: String,
}

impl MoveRecord {
    pub fn from(&self) -> u8 {
        self.mv.from
    }
    pub fn to(&self) -> u8 {
        self.mv.to
    }
    pub fn promotion(&self) -> Option<PieceKind> {
        self.mv.promo
    }

    fn describe(pos: &Position, mv: Move) -> MoveRecord {
        let color = pos.side_to_move;
        let piece = pos.piece_at(mv.from).map_or(PieceKind::Pawn, |p| p.kind);
        let captured = if mv.is_en_passant {
            Some(PieceKind::Pawn)
        } else {
            pos.piece_at(mv.to).map(|p| p.kind)
        };
        MoveRecord {
            mv,
            color,
            piece,
            captured,
            san: to_san(pos, mv),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GameStatus {
    Ongoing,
    Checkmate { winner: Color },
    Stalemate,
    ThreefoldRepetition,
    InsufficientMaterial,
    FiftyMoveRule,
}

impl GameStatus {
    pub fn is_over(self) -> bool {
        self != GameStatus::Ongoing
    }

    pub fn is_draw(self) -> bool {
        !matches!(self, GameStatus::Ongoing | GameStatus::Checkmate { .. })
    }

    pub fn winner(self) -> Option<Color> {
        match self {
            GameStatus::Checkmate { winner } => Some(winner),
            _ => None,
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::Ongoing => write!(f, "in progress"),
            GameStatus::Checkmate { winner } => write!(f, "checkmate, {winner} wins"),
            GameStatus::Stalemate => write!(f, "draw by stalemate"),
            GameStatus::ThreefoldRepetition => write!(f, "draw by threefold repetition"),
            GameStatus::InsufficientMaterial => write!(f, "draw by insufficient material"),
            GameStatus::FiftyMoveRule => write!(f, "draw by the fifty-move rule"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Game {
    start: Position,
    position: Position,
    plies: Vec<(Move, Undo)>,
    // keys[0] is the start position, keys[i] the position after ply i
    keys: Vec<u64>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    pub fn new() -> Self {
        Self::from_position(Position::startpos())
    }

    pub fn from_position(start: Position) -> Self {
        let key = start.position_hash();
        Game {
            position: start.clone(),
            start,
            plies: Vec::new(),
            keys: vec![key],
        }
    }

    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        Position::from_fen(fen).map(Self::from_position)
    }

    /// Standard start position followed by the given SAN moves.
    pub fn replay<S: AsRef<str>>(sans: &[S]) -> Result<Self, SanError> {
        let mut game = Game::new();
        for san in sans {
            game.play_san(san.as_ref())?;
        }
        Ok(game)
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn start_position(&self) -> &Position {
        &self.start
    }

    pub fn side_to_move(&self) -> Color {
        self.position.side_to_move
    }

    pub fn fen(&self) -> String {
        self.position.to_fen()
    }

    pub fn piece_count(&self) -> usize {
        self.position.piece_count()
    }

    /// Number of plies played since the start position.
    pub fn len(&self) -> usize {
        self.plies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plies.is_empty()
    }

    pub fn moves(&self) -> impl Iterator<Item = Move> + '_ {
        self.plies.iter().map(|(mv, _)| *mv)
    }

    pub fn last_move(&self) -> Option<Move> {
        self.plies.last().map(|(mv, _)| *mv)
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        crate::movegen::legal_moves(&self.position)
    }

    pub fn legal_moves_from(&self, from: u8) -> Vec<Move> {
        crate::movegen::legal_moves_from(&self.position, from)
    }

    /// Validate and play a move. Flags on `mv` are ignored; the legal move
    /// with the same squares and promotion is what gets played.
    pub fn play(&mut self, mv: Move) -> Result<MoveRecord, IllegalMove> {
        let Some(legal) = self.position.find_legal(mv) else {
            return Err(IllegalMove {
                mv: move_to_uci(mv),
                fen: self.fen(),
            });
        };
        let record = MoveRecord::describe(&self.position, legal);
        self.push(legal);
        Ok(record)
    }

    pub fn play_san(&mut self, text: &str) -> Result<MoveRecord, SanError> {
        let mv = parse_san(&self.position, text)?;
        let record = MoveRecord::describe(&self.position, mv);
        self.push(mv);
        Ok(record)
    }

    /// Play a move already known to be legal, skipping validation.
    pub fn push(&mut self, mv: Move) {
        let undo = self.position.make_move(mv);
        self.plies.push((mv, undo));
        self.keys.push(self.position.position_hash());
    }

    pub fn undo(&mut self) -> Option<Move> {
        let (mv, undo) = self.plies.pop()?;
        self.keys.pop();
        self.position.unmake_move(mv, undo);
        Some(mv)
    }

    /// Copy of this game holding only its first `plies` moves.
    pub fn truncated(&self, plies: usize) -> Game {
        let mut game = Game::from_position(self.start.clone());
        for mv in self.moves().take(plies) {
            game.push(mv);
        }
        game
    }

    /// Verbose records, rebuilt by replaying from the start position.
    pub fn history(&self) -> Vec<MoveRecord> {
        let mut pos = self.start.clone();
        let mut out = Vec::with_capacity(self.plies.len());
        for (mv, _) in &self.plies {
            out.push(MoveRecord::describe(&pos, *mv));
            pos.make_move(*mv);
        }
        out
    }

    pub fn san_history(&self) -> Vec<String> {
        self.history().into_iter().map(|r| r.san).collect()
    }

    pub fn in_check(&self) -> bool {
        self.position.in_check(self.position.side_to_move)
    }

    pub fn is_checkmate(&self) -> bool {
        self.position.is_checkmate()
    }

    pub fn is_stalemate(&self) -> bool {
        self.position.is_stalemate()
    }

    pub fn is_insufficient_material(&self) -> bool {
        self.position.is_insufficient_material()
    }

    pub fn is_threefold_repetition(&self) -> bool {
        let Some(&current) = self.keys.last() else {
            return false;
        };
        self.keys.iter().filter(|&&k| k == current).count() >= 3
    }

    pub fn is_draw(&self) -> bool {
        self.status().is_draw()
    }

    pub fn is_game_over(&self) -> bool {
        self.status().is_over()
    }

    pub fn status(&self) -> GameStatus {
        let stm = self.position.side_to_move;
        if !self.position.has_legal_move() {
            return if self.position.in_check(stm) {
                GameStatus::Checkmate { winner: stm.other() }
            } else {
                GameStatus::Stalemate
            };
        }
        if self.is_threefold_repetition() {
            GameStatus::ThreefoldRepetition
        } else if self.position.is_insufficient_material() {
            GameStatus::InsufficientMaterial
        } else if self.position.is_fifty_move_draw() {
            GameStatus::FiftyMoveRule
        } else {
            GameStatus::Ongoing
        }
    }
}

#[cfg(test)]
#[path = "game_tests.rs"]
mod game_tests;
