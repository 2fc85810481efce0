use super::*;
use crate::eval::MATE;
use chess_core::{parse_san, to_san, Move};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::sync::atomic::{AtomicBool, Ordering};

/// Plain minimax with no pruning, the reference for alpha-beta.
fn minimax(game: &Game, depth: u8, maximizing: bool) -> i32 {
    if depth == 0 || game.is_game_over() {
        return evaluate(game);
    }
    let scores = game.legal_moves().into_iter().map(|mv| {
        let mut child = game.clone();
        child.push(mv);
        minimax(&child, depth - 1, !maximizing)
    });
    let best = if maximizing { scores.max() } else { scores.min() };
    best.unwrap()
}

fn random_games(seed: u64, count: usize, max_plies: usize) -> Vec<Game> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|i| {
            let mut g = Game::new();
            for _ in 0..(4 + i * 5 % max_plies) {
                let moves = g.legal_moves();
                let Some(&mv) = moves.choose(&mut rng) else {
                    break;
                };
                g.push(mv);
            }
            g
        })
        .collect()
}

fn san_of(game: &Game, mv: Move) -> String {
    to_san(game.position(), mv)
}

#[test]
fn alpha_beta_matches_exhaustive_minimax() {
    for (i, g) in random_games(42, 12, 40).into_iter().enumerate() {
        let white = g.side_to_move() == Color::White;
        let max_depth = if i < 4 { 3 } else { 2 };
        for depth in 1..=max_depth {
            assert_eq!(
                search(&g, depth, i32::MIN, i32::MAX, white),
                minimax(&g, depth, white),
                "{} depth {depth}",
                g.fen()
            );
        }
    }
}

#[test]
fn alpha_beta_matches_minimax_in_sparse_endgames() {
    for fen in [
        "8/8/4k3/8/2P5/8/4K3/8 w - - 0 1",
        "6k1/5ppp/8/8/8/8/5PPP/R5K1 b - - 0 1",
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
    ] {
        let g = Game::from_fen(fen).unwrap();
        let white = g.side_to_move() == Color::White;
        assert_eq!(
            search(&g, 3, i32::MIN, i32::MAX, white),
            minimax(&g, 3, white),
            "{fen}"
        );
    }
}

#[test]
fn rank_puts_best_first_for_both_sides() {
    for g in random_games(5, 10, 30) {
        let ranked = rank(&g, 2);
        if ranked.is_empty() {
            assert!(g.is_game_over());
            continue;
        }
        let scores: Vec<i32> = ranked.iter().map(|s| s.score).collect();
        if g.side_to_move() == Color::White {
            assert!(scores.windows(2).all(|w| w[0] >= w[1]));
        } else {
            assert!(scores.windows(2).all(|w| w[0] <= w[1]));
        }
        assert_eq!(ranked.len(), g.legal_moves().len());
    }
}

#[test]
fn rank_depth_one_first_move_has_best_immediate_score() {
    for g in random_games(9, 10, 30) {
        let ranked = rank(&g, 1);
        let Some(first) = ranked.first() else { continue };
        let immediate: Vec<i32> = g
            .legal_moves()
            .into_iter()
            .map(|mv| {
                let mut child = g.clone();
                child.push(mv);
                evaluate(&child)
            })
            .collect();
        let best = if g.side_to_move() == Color::White {
            immediate.iter().max()
        } else {
            immediate.iter().min()
        };
        assert_eq!(Some(&first.score), best);
    }
}

#[test]
fn opening_development_beats_rim_knight() {
    let g = Game::new();
    let ranked = rank(&g, 1);
    assert_eq!(ranked.len(), 20);

    let score_of = |san: &str| {
        let mv = parse_san(g.position(), san).unwrap();
        ranked.iter().find(|s| s.mv == mv).unwrap().score
    };
    let na3 = score_of("Na3");
    for good in ["e4", "d4", "Nf3", "Nc3"] {
        assert!(score_of(good) > na3, "{good} should outrank Na3");
    }
}

#[test]
fn rank_is_deterministic() {
    let g = Game::replay(&["e4", "e5", "Nf3"]).unwrap();
    let a = rank(&g, 2);
    let b = rank(&g, 2);
    assert_eq!(a, b);
    assert_eq!(a[0].mv, b[0].mv);
}

#[test]
fn finds_back_rank_mate_for_white() {
    let g = Game::from_fen("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1").unwrap();
    let ranked = rank(&g, 1);
    assert_eq!(san_of(&g, ranked[0].mv), "Ra8#");
    assert_eq!(ranked[0].score, MATE);
}

#[test]
fn finds_back_rank_mate_for_black() {
    let g = Game::from_fen("r5k1/8/8/8/8/8/5PPP/6K1 b - - 0 1").unwrap();
    let ranked = rank(&g, 1);
    assert_eq!(san_of(&g, ranked[0].mv), "Ra1#");
    assert_eq!(ranked[0].score, -MATE);
}

#[test]
fn avoids_hanging_the_queen_at_depth_two() {
    // White queen on d4 is attacked by the e5 pawn.
    let g = Game::from_fen("rnbqkbnr/pppp1ppp/8/4p3/3Q4/8/PPP1PPPP/RNB1KBNR w KQkq - 0 3")
        .unwrap();
    let ranked = rank(&g, 2);
    let first = ranked[0].mv;
    assert_eq!(first.from, 27, "the queen should move");

    let mut after = g.clone();
    after.push(first);
    assert!(after.legal_moves().iter().all(|m| m.to != first.to));
}

#[test]
fn no_moves_when_game_is_over() {
    let mated = Game::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3")
        .unwrap();
    assert!(rank(&mated, 3).is_empty());
    assert_eq!(search(&mated, 3, i32::MIN, i32::MAX, true), -MATE);
}

#[test]
fn rank_until_gives_up_once_stopped() {
    let g = Game::new();
    let stop = AtomicBool::new(false);
    assert_eq!(rank_until(&g, 2, &stop), Some(rank(&g, 2)));

    stop.store(true, Ordering::Relaxed);
    assert_eq!(rank_until(&g, 4, &stop), None);
}
