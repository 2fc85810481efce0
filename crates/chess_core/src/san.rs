//! Standard Algebraic Notation.
//!
//! Encoding produces the canonical form (`Nbd7`, `exd6`, `e8=Q+`, `O-O#`).
//! Decoding is lenient about decorations: check marks, annotation glyphs,
//! zero-castling (`0-0`), a missing `=` before the promotion letter, an
//! `e.p.` suffix and plain coordinate text (`e2e4`) are all accepted.

use crate::board::Position;
use crate::error::SanError;
use crate::movegen::legal_moves;
use crate::types::*;
use crate::uci::parse_uci_move;

/// SAN for a move that is legal in `pos`.
pub fn to_san(pos: &Position, mv: Move) -> String {
    let Some(piece) = pos.piece_at(mv.from) else {
        return format!("{}{}", sq_to_coord(mv.from), sq_to_coord(mv.to));
    };

    let mut san = String::with_capacity(8);

    if mv.is_castle {
        san.push_str(if mv.to > mv.from { "O-O" } else { "O-O-O" });
    } else {
        let is_capture = pos.piece_at(mv.to).is_some() || mv.is_en_passant;

        match piece.kind.san_letter() {
            Some(letter) => {
                san.push(letter);
                san.push_str(&disambiguation(pos, mv, piece));
            }
            None => {
                if is_capture {
                    san.push((b'a' + (mv.from % 8)) as char);
                }
            }
        }

        if is_capture {
            san.push('x');
        }
        san.push_str(&sq_to_coord(mv.to));

        if let Some(promo) = mv.promo {
            san.push('=');
            san.push(promo.san_letter().unwrap_or('Q'));
        }
    }

    let mut after = pos.clone();
    after.make_move(mv);
    if after.in_check(after.side_to_move) {
        san.push(if after.has_legal_move() { '+' } else { '#' });
    }
    san
}

// File if it is unique among the rivals, else rank if unique, else both.
fn disambiguation(pos: &Position, mv: Move, piece: Piece) -> String {
    let rivals: Vec<u8> = legal_moves(pos)
        .into_iter()
        .filter(|m| m.to == mv.to && m.from != mv.from)
        .filter(|m| pos.piece_at(m.from) == Some(piece))
        .map(|m| m.from)
        .collect();
    if rivals.is_empty() {
        return String::new();
    }

    let coord = sq_to_coord(mv.from);
    let (file, rank) = coord.split_at(1);
    if rivals.iter().all(|&s| file_of(s) != file_of(mv.from)) {
        file.to_string()
    } else if rivals.iter().all(|&s| rank_of(s) != rank_of(mv.from)) {
        rank.to_string()
    } else {
        coord
    }
}

/// Resolve SAN (or coordinate) text against the legal moves of `pos`.
pub fn parse_san(pos: &Position, text: &str) -> Result<Move, SanError> {
    let cleaned = clean(text);
    if cleaned.is_empty() {
        return Err(SanError::Empty);
    }

    if let Some(mv) = parse_castle(pos, &cleaned) {
        return Ok(mv);
    }

    let no_match = || SanError::NoMatch(text.trim().to_string());

    let legal = legal_moves(pos);

    // Piece letter, if any. A lowercase leading 'b' is always a pawn file.
    let mut chars: Vec<char> = cleaned.chars().collect();
    let kind = match chars.first() {
        Some(&c) if c.is_ascii_uppercase() => {
            let k = PieceKind::from_letter(c).ok_or_else(no_match)?;
            chars.remove(0);
            k
        }
        _ => PieceKind::Pawn,
    };

    // A destination always ends in a digit, so a trailing letter on a pawn
    // move can only be the promotion piece ("e8=Q", "e8Q", "e7e8q").
    let mut promo = None;
    if kind == PieceKind::Pawn {
        if let Some(&last) = chars.last() {
            if last.is_ascii_alphabetic() {
                let k = PieceKind::from_letter(last)
                    .filter(|k| PieceKind::PROMOTIONS.contains(k))
                    .ok_or_else(no_match)?;
                promo = Some(k);
                chars.pop();
                if chars.last() == Some(&'=') {
                    chars.pop();
                }
            }
        }
    }

    chars.retain(|&c| c != 'x' && c != ':' && c != '-');
    if chars.len() < 2 {
        return parse_uci_move(pos, &cleaned).ok_or_else(no_match);
    }

    let dest_text: String = chars[chars.len() - 2..].iter().collect();
    let Some(to) = coord_to_sq(&dest_text) else {
        return parse_uci_move(pos, &cleaned).ok_or_else(no_match);
    };

    let mut from_file = None;
    let mut from_rank = None;
    for &c in &chars[..chars.len() - 2] {
        match c {
            'a'..='h' => from_file = Some(c as i8 - 'a' as i8),
            '1'..='8' => from_rank = Some(c as i8 - '1' as i8),
            _ => return parse_uci_move(pos, &cleaned).ok_or_else(no_match),
        }
    }

    let matches: Vec<Move> = legal
        .iter()
        .copied()
        .filter(|m| m.to == to)
        .filter(|m| matches!(pos.piece_at(m.from), Some(pc) if pc.kind == kind))
        .filter(|m| from_file.map_or(true, |f| file_of(m.from) == f))
        .filter(|m| from_rank.map_or(true, |r| rank_of(m.from) == r))
        .filter(|m| match (m.promo, promo) {
            (None, None) => true,
            (Some(a), Some(b)) => a == b,
            // Bare "e8" for a promotion means a queen.
            (Some(a), None) => a == PieceKind::Queen,
            (None, Some(_)) => false,
        })
        .collect();

    match matches.len() {
        1 => Ok(matches[0]),
        0 => parse_uci_move(pos, &cleaned).ok_or_else(no_match),
        _ => Err(SanError::Ambiguous(text.trim().to_string())),
    }
}

fn clean(text: &str) -> String {
    let mut s = text.trim().to_string();
    if let Some(stripped) = s.strip_suffix("e.p.") {
        s = stripped.trim_end().to_string();
    }
    s.retain(|c| !matches!(c, '+' | '#' | '!' | '?' | ' '));
    s
}

fn parse_castle(pos: &Position, s: &str) -> Option<Move> {
    let long = match s {
        "O-O" | "0-0" | "OO" | "00" => false,
        "O-O-O" | "0-0-0" | "OOO" | "000" => true,
        _ => return None,
    };
    legal_moves(pos)
        .into_iter()
        .find(|m| m.is_castle && (m.to < m.from) == long)
}

#[cfg(test)]
#[path = "san_tests.rs"]
mod san_tests;
