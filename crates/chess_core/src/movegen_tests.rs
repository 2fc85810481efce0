use super::*;

#[test]
fn test_startpos_moves() {
    let pos = Position::startpos();
    // Starting position has 20 legal moves
    assert_eq!(legal_moves(&pos).len(), 20);
}

#[test]
fn test_kiwipete_moves() {
    // Kiwipete position - complex with many move types
    let pos =
        Position::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -")
            .unwrap();
    let moves = legal_moves(&pos);
    assert_eq!(moves.len(), 48);
    assert_eq!(moves.iter().filter(|m| m.is_castle).count(), 2);
}

#[test]
fn test_legal_moves_from_square() {
    let pos = Position::startpos();
    let knight = legal_moves_from(&pos, 6); // g1
    assert_eq!(knight.len(), 2);
    assert!(knight.iter().all(|m| m.from == 6));

    assert!(legal_moves_from(&pos, 28).is_empty()); // empty e4
    assert!(legal_moves_from(&pos, 52).is_empty()); // black pawn, white to move
}

#[test]
fn test_pinned_piece_cannot_move() {
    // Knight on e2 pinned by the rook on e8.
    let pos = Position::from_fen("4r1k1/8/8/8/8/8/4N3/4K3 w - - 0 1").unwrap();
    assert!(legal_moves_from(&pos, 12).is_empty());
}

#[test]
fn test_no_castling_through_attacked_square() {
    // Black rook on f8 covers f1.
    let pos = Position::from_fen("5rk1/8/8/8/8/8/8/R3K2R w KQ - 0 1").unwrap();
    let castles: Vec<Move> = legal_moves(&pos).into_iter().filter(|m| m.is_castle).collect();
    assert_eq!(castles.len(), 1);
    assert_eq!(castles[0].to, 2);
}

#[test]
fn test_four_promotions_per_pawn_push() {
    let pos = Position::from_fen("8/4P2k/8/8/8/8/8/K7 w - - 0 1").unwrap();
    let promos: Vec<Move> = legal_moves_from(&pos, 52);
    assert_eq!(promos.len(), 4);
    for kind in PieceKind::PROMOTIONS {
        assert!(promos.iter().any(|m| m.promo == Some(kind)));
    }
}

#[test]
fn test_en_passant_generated_and_flagged() {
    let pos =
        Position::from_fen("rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3")
            .unwrap();
    let ep: Vec<Move> = legal_moves(&pos)
        .into_iter()
        .filter(|m| m.is_en_passant)
        .collect();
    assert_eq!(ep.len(), 1);
    assert_eq!(ep[0].to, 45); // f6
}

#[test]
fn test_checkmate_and_stalemate_queries() {
    let mate =
        Position::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3")
            .unwrap();
    assert!(mate.is_checkmate());
    assert!(!mate.is_stalemate());

    let stale = Position::from_fen("k7/2K5/1Q6/8/8/8/8/8 b - - 0 1").unwrap();
    assert!(stale.is_stalemate());
    assert!(!stale.is_checkmate());
}

#[test]
fn test_find_legal_fills_flags() {
    let pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    let mv = pos.find_legal(Move::new(4, 6)).unwrap();
    assert!(mv.is_castle);
    assert!(pos.find_legal(Move::new(4, 20)).is_none());
}
