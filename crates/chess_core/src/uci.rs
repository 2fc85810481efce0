//! Coordinate ("long algebraic") move notation, e.g. `e2e4`, `e7e8q`.

use crate::{board::Position, types::*};

pub fn move_to_uci(mv: Move) -> String {
    let mut s = String::with_capacity(5);
    s.push_str(&sq_to_coord(mv.from));
    s.push_str(&sq_to_coord(mv.to));
    if let Some(p) = mv.promo {
        let ch = match p {
            PieceKind::Rook => 'r',
            PieceKind::Bishop => 'b',
            PieceKind::Knight => 'n',
            _ => 'q',
        };
        s.push(ch);
    }
    s
}

/// Parse coordinate text and match it against the legal moves so the
/// castle/en-passant flags are correct. A promotion without a piece letter
/// resolves to a queen.
pub fn parse_uci_move(pos: &Position, txt: &str) -> Option<Move> {
    let txt = txt.trim();
    if txt.len() < 4 || !txt.is_ascii() {
        return None;
    }
    let from = coord_to_sq(&txt[0..2])?;
    let to = coord_to_sq(&txt[2..4])?;
    let promo = match txt.as_bytes().get(4) {
        Some(&b) => Some(PieceKind::from_letter(b as char).filter(|k| {
            matches!(
                k,
                PieceKind::Queen | PieceKind::Rook | PieceKind::Bishop | PieceKind::Knight
            )
        })?),
        None => None,
    };

    let candidates: Vec<Move> = crate::movegen::legal_moves(pos)
        .into_iter()
        .filter(|m| m.from == from && m.to == to)
        .collect();
    match promo {
        Some(_) => candidates.into_iter().find(|m| m.promo == promo),
        None => candidates
            .iter()
            .find(|m| m.promo.is_none())
            .or_else(|| candidates.iter().find(|m| m.promo == Some(PieceKind::Queen)))
            .copied(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_castle_flag() {
        let pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let mv = parse_uci_move(&pos, "e1g1").unwrap();
        assert!(mv.is_castle);
        assert_eq!(move_to_uci(mv), "e1g1");
    }

    #[test]
    fn test_promotion_defaults_to_queen() {
        let pos = Position::from_fen("8/P6k/8/8/8/8/8/K7 w - - 0 1").unwrap();
        let bare = parse_uci_move(&pos, "a7a8").unwrap();
        assert_eq!(bare.promo, Some(PieceKind::Queen));
        let knight = parse_uci_move(&pos, "a7a8n").unwrap();
        assert_eq!(knight.promo, Some(PieceKind::Knight));
        assert!(parse_uci_move(&pos, "a7a8k").is_none());
    }

    #[test]
    fn test_rejects_garbage() {
        let pos = Position::startpos();
        assert!(parse_uci_move(&pos, "e2").is_none());
        assert!(parse_uci_move(&pos, "z9e4").is_none());
        assert!(parse_uci_move(&pos, "e2e5").is_none());
    }
}
