use super::*;
use chess_core::{legal_moves, parse_san, Position};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn opponent_returns_legal_move() {
    let game = Game::new();
    let mut rng = StdRng::seed_from_u64(1);
    for d in [Difficulty::Easy, Difficulty::Medium] {
        let mut opp = Opponent::new(Some(d));
        let mv = opp.pick(&game, &mut rng).unwrap();
        assert!(legal_moves(game.position()).contains(&mv));
    }
}

#[test]
fn opponent_handles_checkmate() {
    let game =
        Game::from_fen("r1bqkbnr/pppp1Qpp/2n5/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 1")
            .unwrap();
    let mut rng = StdRng::seed_from_u64(1);
    assert!(Opponent::new(Some(Difficulty::Easy)).pick(&game, &mut rng).is_none());
}

#[test]
fn opponent_handles_stalemate() {
    let game = Game::from_position(Position::from_fen("k7/8/1Q6/8/8/8/8/1K6 b - - 0 1").unwrap());
    let mut rng = StdRng::seed_from_u64(1);
    assert!(Opponent::new(None).pick(&game, &mut rng).is_none());
}

#[test]
fn depth_follows_material() {
    let opp = Opponent::new(Some(Difficulty::Medium));
    assert_eq!(opp.depth(&Game::new()), 2);
    let sparse = Game::from_fen("4k3/pppp4/8/8/8/8/PPPP4/4K3 w - - 0 1").unwrap();
    assert_eq!(opp.depth(&sparse), 3);
    assert_eq!(Opponent::new(None).depth(&Game::new()), DEFAULT_DEPTH);
}

#[test]
fn easy_opponent_takes_mate_in_one_when_only_mate_is_close() {
    // Every other move is far below the mating score, so even the easy
    // filter keeps only the mate.
    let game = Game::from_fen("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1").unwrap();
    let mate = parse_san(game.position(), "Ra8#").unwrap();
    let mut rng = StdRng::seed_from_u64(8);
    let mut opp = Opponent::new(Some(Difficulty::Easy));
    for _ in 0..20 {
        assert_eq!(opp.pick(&game, &mut rng), Some(mate));
    }
}

#[test]
fn best_ignores_randomness() {
    let game = Game::new();
    let mut opp = Opponent::new(Some(Difficulty::Easy));
    let best = opp.best(&game);
    assert!(best.is_some());
    assert_eq!(best, opp.best(&game));
}
