use super::*;
use crate::board::START_FEN;

#[test]
fn test_play_returns_verbose_record() {
    let mut g = Game::new();
    let rec = g.play(Move::new(12, 28)).unwrap(); // e2e4
    assert_eq!(rec.san, "e4");
    assert_eq!((rec.from(), rec.to()), (12, 28));
    assert_eq!(rec.color, Color::White);
    assert_eq!(rec.piece, PieceKind::Pawn);
    assert_eq!(rec.captured, None);
    assert_eq!(rec.promotion(), None);
    assert_eq!(g.len(), 1);
    assert_eq!(g.side_to_move(), Color::Black);
}

#[test]
fn test_illegal_move_leaves_game_untouched() {
    let mut g = Game::new();
    let before = g.fen();
    let err = g.play(Move::new(12, 36)).unwrap_err(); // e2e5
    assert_eq!(err.mv, "e2e5");
    assert_eq!(err.fen, before);
    assert_eq!(g.fen(), before);
    assert!(g.is_empty());
}

#[test]
fn test_play_fills_castle_flag_from_position() {
    let mut g = Game::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    let rec = g.play(Move::new(4, 2)).unwrap();
    assert_eq!(rec.san, "O-O-O");
    assert!(rec.mv.is_castle);
    assert_eq!(g.fen(), "r3k2r/8/8/8/8/8/8/2KR3R b kq - 1 1");
}

#[test]
fn test_undo_walks_back_to_start() {
    let mut g = Game::replay(&["e4", "e5", "Nf3", "Nc6", "Bb5", "a6"]).unwrap();
    assert_eq!(g.len(), 6);
    while g.undo().is_some() {}
    assert_eq!(g.fen(), START_FEN);
    assert!(g.undo().is_none());
}

#[test]
fn test_history_is_replayed_from_start() {
    let sans = ["e4", "d5", "exd5", "Qxd5", "Nc3", "Qa5"];
    let g = Game::replay(&sans).unwrap();
    assert_eq!(g.san_history(), sans);
    let hist = g.history();
    assert_eq!(hist[2].captured, Some(PieceKind::Pawn));
    assert_eq!(hist[3].piece, PieceKind::Queen);
    assert_eq!(hist[3].color, Color::Black);
}

#[test]
fn test_replay_reports_first_bad_move() {
    let err = Game::replay(&["e4", "e5", "Ke3"]).unwrap_err();
    assert_eq!(err, SanError::NoMatch("Ke3".to_string()));
}

#[test]
fn test_truncated_keeps_prefix_only() {
    let g = Game::replay(&["d4", "d5", "c4", "e6"]).unwrap();
    let t = g.truncated(2);
    assert_eq!(t.san_history(), ["d4", "d5"]);
    assert_eq!(t.fen(), Game::replay(&["d4", "d5"]).unwrap().fen());
    assert_eq!(g.truncated(99).len(), 4);
}

#[test]
fn test_history_from_custom_start() {
    let mut g = Game::from_fen("8/P6k/8/8/8/8/8/K7 w - - 0 1").unwrap();
    let rec = g.play(Move::with_promo(48, 56, PieceKind::Knight)).unwrap();
    assert_eq!(rec.san, "a8=N");
    assert_eq!(g.san_history(), ["a8=N"]);
    assert_eq!(g.start_position().to_fen(), "8/P6k/8/8/8/8/8/K7 w - - 0 1");
}

#[test]
fn test_status_display() {
    assert_eq!(
        GameStatus::Checkmate {
            winner: Color::Black
        }
        .to_string(),
        "checkmate, Black wins"
    );
    assert!(GameStatus::Stalemate.is_draw());
    assert!(!GameStatus::Ongoing.is_over());
}
