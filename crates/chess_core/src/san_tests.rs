use super::*;

fn pos(fen: &str) -> Position {
    Position::from_fen(fen).unwrap()
}

fn san_of(p: &Position, uci: &str) -> String {
    let mv = parse_uci_move(p, uci).unwrap();
    to_san(p, mv)
}

#[test]
fn test_basic_moves() {
    let p = Position::startpos();
    assert_eq!(san_of(&p, "e2e4"), "e4");
    assert_eq!(san_of(&p, "g1f3"), "Nf3");
}

#[test]
fn test_pawn_capture_uses_file() {
    let p = pos("rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 2");
    assert_eq!(san_of(&p, "e4d5"), "exd5");
}

#[test]
fn test_en_passant_written_as_capture() {
    let p = pos("rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3");
    assert_eq!(san_of(&p, "e5f6"), "exf6");
}

#[test]
fn test_castling_and_mate_suffixes() {
    let p = pos("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    assert_eq!(san_of(&p, "e1g1"), "O-O");
    assert_eq!(san_of(&p, "e1c1"), "O-O-O");

    // Fool's mate
    let p = pos("rnbqkbnr/pppp1ppp/8/4p3/6P1/5P2/PPPPP2P/RNBQKBNR b KQkq g3 0 2");
    assert_eq!(san_of(&p, "d8h4"), "Qh4#");

    let p = pos("4k3/8/8/8/8/8/8/R3K3 w - - 0 1");
    assert_eq!(san_of(&p, "a1a8"), "Ra8+");
}

#[test]
fn test_disambiguation_by_file_rank_and_square() {
    // Knights on b1 and f1 both reach d2.
    let p = pos("4k3/8/8/8/8/8/8/1N2KN2 w - - 0 1");
    assert_eq!(san_of(&p, "b1d2"), "Nbd2");

    // Rooks on a1 and a5 both reach a3.
    let p = pos("4k3/8/8/R7/8/8/8/R3K3 w - - 0 1");
    assert_eq!(san_of(&p, "a1a3"), "R1a3");

    // Queens on a1, a3 and c1 all reach b2: file and rank are both shared.
    let p = pos("4k3/8/8/8/8/Q7/8/Q1Q1K3 w - - 0 1");
    assert_eq!(san_of(&p, "a1b2"), "Qa1b2");
}

#[test]
fn test_promotion() {
    let p = pos("8/P6k/8/8/8/8/8/K7 w - - 0 1");
    assert_eq!(san_of(&p, "a7a8q"), "a8=Q");
    assert_eq!(san_of(&p, "a7a8n"), "a8=N");
}

#[test]
fn test_parse_round_trips_every_legal_move() {
    for fen in [
        crate::board::START_FEN,
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        "4k3/1P6/8/8/8/8/8/4K3 w - - 0 1",
    ] {
        let p = pos(fen);
        for mv in legal_moves(&p) {
            let text = to_san(&p, mv);
            assert_eq!(parse_san(&p, &text), Ok(mv), "{fen}: {text}");
        }
    }
}

#[test]
fn test_parse_is_lenient() {
    let p = pos("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    assert!(parse_san(&p, "0-0").unwrap().is_castle);
    assert!(parse_san(&p, "O-O-O+").unwrap().is_castle);

    let p = Position::startpos();
    assert_eq!(parse_san(&p, "e2e4"), parse_san(&p, "e4"));
    assert_eq!(parse_san(&p, "g1f3"), parse_san(&p, "Nf3!?"));

    let p = pos("8/P6k/8/8/8/8/8/K7 w - - 0 1");
    assert_eq!(parse_san(&p, "a8Q").unwrap().promo, Some(PieceKind::Queen));
    assert_eq!(parse_san(&p, "a8").unwrap().promo, Some(PieceKind::Queen));
    assert_eq!(parse_san(&p, "a8=R").unwrap().promo, Some(PieceKind::Rook));
}

#[test]
fn test_parse_errors() {
    let p = Position::startpos();
    assert_eq!(parse_san(&p, "  "), Err(SanError::Empty));
    assert!(matches!(parse_san(&p, "e5"), Err(SanError::NoMatch(_))));
    assert!(matches!(parse_san(&p, "Zf3"), Err(SanError::NoMatch(_))));

    let p = pos("4k3/8/8/8/8/8/8/1N2KN2 w - - 0 1");
    assert!(matches!(parse_san(&p, "Nd2"), Err(SanError::Ambiguous(_))));
}
