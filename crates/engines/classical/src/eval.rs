//! Static evaluation: material, piece-square tables and pawn structure.
//!
//! Scores are centipawns from White's point of view regardless of who is to
//! move. Checkmate is ±[`MATE`], every drawn position is exactly 0.

use chess_core::{file_of, rank_of, Color, Game, GameStatus, PieceKind, Position};

/// Score of a checkmated position (negated when White is mated).
pub const MATE: i32 = 1_000_000_000;

/// Material values in centipawns, indexed by PieceKind::idx().
/// Order: Pawn, Knight, Bishop, Rook, Queen, King
pub const PIECE_VALUES: [i32; 6] = [100, 320, 330, 500, 900, 20_000];

const DOUBLED_PAWN_PENALTY: i32 = 15;
const ISOLATED_PAWN_PENALTY: i32 = 12;

// Tables are laid out as seen from White's side of the board: row 0 is the
// eighth rank, row 7 the first. Black reads the pawn, bishop, rook and king
// tables rank-reversed; knight and queen share one table read as-is.
type Table = [[i32; 8]; 8];

const PAWN_TABLE: Table = [
    [0, 0, 0, 0, 0, 0, 0, 0],
    [50, 50, 50, 50, 50, 50, 50, 50],
    [10, 10, 20, 30, 30, 20, 10, 10],
    [5, 5, 10, 25, 25, 10, 5, 5],
    [0, 0, 0, 20, 20, 0, 0, 0],
    [5, -5, -10, 0, 0, -10, -5, 5],
    [5, 10, 10, -20, -20, 10, 10, 5],
    [0, 0, 0, 0, 0, 0, 0, 0],
];

const KNIGHT_TABLE: Table = [
    [-50, -40, -30, -30, -30, -30, -40, -50],
    [-40, -20, 0, 0, 0, 0, -20, -40],
    [-30, 0, 10, 15, 15, 10, 0, -30],
    [-30, 5, 15, 20, 20, 15, 5, -30],
    [-30, 0, 15, 20, 20, 15, 0, -30],
    [-30, 5, 10, 15, 15, 10, 5, -30],
    [-40, -20, 0, 5, 5, 0, -20, -40],
    [-50, -40, -30, -30, -30, -30, -40, -50],
];

const BISHOP_TABLE: Table = [
    [-20, -10, -10, -10, -10, -10, -10, -20],
    [-10, 0, 0, 0, 0, 0, 0, -10],
    [-10, 0, 5, 10, 10, 5, 0, -10],
    [-10, 5, 5, 10, 10, 5, 5, -10],
    [-10, 0, 10, 10, 10, 10, 0, -10],
    [-10, 10, 10, 10, 10, 10, 10, -10],
    [-10, 5, 0, 0, 0, 0, 5, -10],
    [-20, -10, -10, -10, -10, -10, -10, -20],
];

const ROOK_TABLE: Table = [
    [0, 0, 0, 0, 0, 0, 0, 0],
    [5, 10, 10, 10, 10, 10, 10, 5],
    [-5, 0, 0, 0, 0, 0, 0, -5],
    [-5, 0, 0, 0, 0, 0, 0, -5],
    [-5, 0, 0, 0, 0, 0, 0, -5],
    [-5, 0, 0, 0, 0, 0, 0, -5],
    [-5, 0, 0, 0, 0, 0, 0, -5],
    [0, 0, 0, 5, 5, 0, 0, 0],
];

const QUEEN_TABLE: Table = [
    [-20, -10, -10, -5, -5, -10, -10, -20],
    [-10, 0, 0, 0, 0, 0, 0, -10],
    [-10, 0, 5, 5, 5, 5, 0, -10],
    [-5, 0, 5, 5, 5, 5, 0, -5],
    [0, 0, 5, 5, 5, 5, 0, -5],
    [-10, 5, 5, 5, 5, 5, 0, -10],
    [-10, 0, 5, 0, 0, 0, 0, -10],
    [-20, -10, -10, -5, -5, -10, -10, -20],
];

const KING_TABLE: Table = [
    [-30, -40, -40, -50, -50, -40, -40, -30],
    [-30, -40, -40, -50, -50, -40, -40, -30],
    [-30, -40, -40, -50, -50, -40, -40, -30],
    [-30, -40, -40, -50, -50, -40, -40, -30],
    [-20, -30, -30, -40, -40, -30, -30, -20],
    [-10, -20, -20, -20, -20, -20, -20, -10],
    [20, 20, 0, 0, 0, 0, 20, 20],
    [20, 30, 10, 0, 0, 10, 30, 20],
];

fn table(kind: PieceKind) -> &'static Table {
    match kind {
        PieceKind::Pawn => &PAWN_TABLE,
        PieceKind::Knight => &KNIGHT_TABLE,
        PieceKind::Bishop => &BISHOP_TABLE,
        PieceKind::Rook => &ROOK_TABLE,
        PieceKind::Queen => &QUEEN_TABLE,
        PieceKind::King => &KING_TABLE,
    }
}

/// Whether Black reads `kind`'s table rank-reversed.
fn mirrored_for_black(kind: PieceKind) -> bool {
    !matches!(kind, PieceKind::Knight | PieceKind::Queen)
}

/// Piece-square bonus for `kind` of `color` standing on `sq`.
///
/// Knight and queen values do not depend on colour, so evaluation is only
/// antisymmetric under a colour flip for positions without those pieces.
pub fn piece_square_value(kind: PieceKind, color: Color, sq: u8) -> i32 {
    let row = match color {
        Color::Black if mirrored_for_black(kind) => rank_of(sq),
        _ => 7 - rank_of(sq),
    };
    table(kind)[row as usize][file_of(sq) as usize]
}

/// Evaluate the game's current position.
///
/// Terminal positions short-circuit: a mated White scores `-MATE`, a mated
/// Black `+MATE`, and stalemate, repetition, insufficient material and the
/// fifty-move rule all score 0.
pub fn evaluate(game: &Game) -> i32 {
    match game.status() {
        GameStatus::Checkmate { winner } => winner.sign() * MATE,
        GameStatus::Ongoing => evaluate_position(game.position()),
        _ => 0,
    }
}

/// Material, piece-square and pawn-structure terms only; terminal states
/// are not detected here.
pub fn evaluate_position(pos: &Position) -> i32 {
    let mut score = 0i32;
    for (s, pc) in pos.board.iter().enumerate() {
        let Some(pc) = pc else { continue };
        let value = PIECE_VALUES[pc.kind.idx()] + piece_square_value(pc.kind, pc.color, s as u8);
        score += value * pc.color.sign();
    }
    score + pawn_structure(pos)
}

/// White-relative pawn structure adjustment: White's doubled and isolated
/// pawns count against the score, Black's count for it.
pub fn pawn_structure(pos: &Position) -> i32 {
    let mut files = [[0i32; 8]; 2];
    for (s, pc) in pos.board.iter().enumerate() {
        if let Some(pc) = pc {
            if pc.kind == PieceKind::Pawn {
                files[pc.color.idx()][file_of(s as u8) as usize] += 1;
            }
        }
    }

    let penalty = |counts: &[i32; 8]| -> i32 {
        let mut total = 0;
        for f in 0..8 {
            if counts[f] == 0 {
                continue;
            }
            if counts[f] > 1 {
                total += DOUBLED_PAWN_PENALTY * (counts[f] - 1);
            }
            let left = f > 0 && counts[f - 1] > 0;
            let right = f < 7 && counts[f + 1] > 0;
            if !left && !right {
                total += ISOLATED_PAWN_PENALTY;
            }
        }
        total
    };

    penalty(&files[Color::Black.idx()]) - penalty(&files[Color::White.idx()])
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod eval_tests;
