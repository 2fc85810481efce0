//! Game-end detection through the `Game` record: checkmate, stalemate,
//! fifty-move rule, threefold repetition and insufficient material.

use chess_core::{Color, Game, GameStatus, Position};

fn game(fen: &str) -> Game {
    Game::from_fen(fen).unwrap()
}

// =============================================================================
// Checkmate / Stalemate
// =============================================================================

#[test]
fn test_scholars_mate_is_checkmate() {
    let g = game("r1bqkb1r/pppp1Qpp/2n2n2/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 4");
    assert!(g.is_checkmate());
    assert!(!g.is_stalemate());
    assert_eq!(
        g.status(),
        GameStatus::Checkmate {
            winner: Color::White
        }
    );
    assert!(g.is_game_over());
    assert!(!g.is_draw());
}

#[test]
fn test_fools_mate_by_replay() {
    let g = Game::replay(&["f3", "e5", "g4", "Qh4#"]).unwrap();
    assert_eq!(g.status().winner(), Some(Color::Black));
}

#[test]
fn test_check_is_not_checkmate() {
    let g = game("rnbqkbnr/ppppp1pp/8/5p1Q/4P3/8/PPPP1PPP/RNB1KBNR b KQkq - 1 2");
    assert!(g.in_check());
    assert_eq!(g.status(), GameStatus::Ongoing);
}

#[test]
fn test_stalemate_king_in_corner() {
    let g = game("k7/2K5/1Q6/8/8/8/8/8 b - - 0 1");
    assert!(g.legal_moves().is_empty());
    assert!(!g.in_check());
    assert_eq!(g.status(), GameStatus::Stalemate);
    assert!(g.is_draw());
}

#[test]
fn test_stalemate_king_and_pawn_endgame() {
    let g = game("6k1/6P1/6K1/8/8/8/8/8 b - - 0 1");
    assert_eq!(g.status(), GameStatus::Stalemate);
}

#[test]
fn test_stalemate_outranks_insufficient_material() {
    // K+B v K with the lone king stalemated: stalemate is reported first.
    let g = game("k7/2K5/1B6/8/8/8/8/8 b - - 0 1");
    assert!(g.is_insufficient_material());
    assert_eq!(g.status(), GameStatus::Stalemate);
}

// =============================================================================
// Fifty-Move Rule
// =============================================================================

#[test]
fn test_fifty_move_rule_at_100_halfmoves() {
    let g = game("8/8/8/4k3/8/4K3/8/R7 w - - 100 60");
    assert_eq!(g.status(), GameStatus::FiftyMoveRule);
}

#[test]
fn test_fifty_move_rule_at_99_halfmoves() {
    let mut g = game("8/8/8/4k3/8/4K3/8/R7 w - - 99 60");
    assert_eq!(g.status(), GameStatus::Ongoing);
    g.play_san("Ra2").unwrap();
    assert_eq!(g.status(), GameStatus::FiftyMoveRule);
    g.undo();
    assert_eq!(g.status(), GameStatus::Ongoing);
}

#[test]
fn test_fifty_move_rule_reset_on_pawn_move() {
    let mut g = game("8/8/8/4k3/8/3K4/4P3/8 w - - 99 60");
    g.play_san("e4").unwrap();
    assert_eq!(g.position().halfmove_clock, 0);
    assert!(!g.position().is_fifty_move_draw());
}

// =============================================================================
// Insufficient Material
// =============================================================================

#[test]
fn test_insufficient_material_cases() {
    for fen in [
        "8/8/8/4k3/8/4K3/8/8 w - - 0 1",
        "8/8/8/4k3/8/4KB2/8/8 w - - 0 1",
        "8/8/8/4k3/8/4KN2/8/8 w - - 0 1",
        "8/8/4b3/4k3/8/4K3/8/8 w - - 0 1",
        "8/8/4n3/4k3/8/4K3/8/8 w - - 0 1",
        // c1 and f8 are both dark squares
        "5b2/8/8/4k3/8/4K3/8/2B5 w - - 0 1",
    ] {
        let g = game(fen);
        assert!(g.is_insufficient_material(), "{fen}");
        assert_eq!(g.status(), GameStatus::InsufficientMaterial, "{fen}");
    }
}

#[test]
fn test_sufficient_material_cases() {
    for fen in [
        // opposite-coloured bishops
        "2b5/8/8/4k3/8/4K3/8/2B5 w - - 0 1",
        "8/8/8/4k3/8/4K3/4P3/8 w - - 0 1",
        "8/8/8/4k3/8/4K3/8/4R3 w - - 0 1",
        "8/8/8/4k3/8/4K3/8/4Q3 w - - 0 1",
        "8/8/8/4k3/8/4K3/3NN3/8 w - - 0 1",
        "8/8/8/4k3/8/4K3/3NB3/8 w - - 0 1",
    ] {
        assert!(!game(fen).is_insufficient_material(), "{fen}");
    }
}

#[test]
fn test_capture_into_bare_kings() {
    let mut g = game("k7/8/8/8/4r3/4K3/8/8 w - - 0 1");
    g.play_san("Kxe4").unwrap();
    assert_eq!(g.status(), GameStatus::InsufficientMaterial);
}

// =============================================================================
// Threefold Repetition
// =============================================================================

#[test]
fn test_threefold_repetition_by_knight_shuffle() {
    let mut g = Game::new();
    for san in ["Nf3", "Nf6", "Ng1", "Ng8", "Nf3", "Nf6", "Ng1"] {
        g.play_san(san).unwrap();
        assert!(!g.is_threefold_repetition(), "early repetition at {san}");
    }
    g.play_san("Ng8").unwrap();
    assert!(g.is_threefold_repetition());
    assert_eq!(g.status(), GameStatus::ThreefoldRepetition);

    g.undo();
    assert_eq!(g.status(), GameStatus::Ongoing);
}

#[test]
fn test_lost_castling_right_breaks_repetition() {
    // The rook shuffle forfeits kingside castling, so the start position
    // never recurs.
    let mut g = game("4k3/8/8/8/8/8/8/4K2R w K - 0 1");
    for san in ["Rh2", "Kd8", "Rh1", "Ke8", "Rh2", "Kd8", "Rh1", "Ke8"] {
        g.play_san(san).unwrap();
    }
    assert_eq!(g.status(), GameStatus::Ongoing);

    for san in ["Rh2", "Kd8", "Rh1", "Ke8"] {
        g.play_san(san).unwrap();
    }
    assert_eq!(g.status(), GameStatus::ThreefoldRepetition);
}

#[test]
fn test_same_board_same_hash_regardless_of_clocks() {
    let a = Position::from_fen(
        "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3",
    )
    .unwrap();
    let b = Position::from_fen(
        "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 6 5",
    )
    .unwrap();
    assert_eq!(a.position_hash(), b.position_hash());
}
