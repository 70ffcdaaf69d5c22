//! Search results against plain minimax, plus tactical and cache scenarios

use rduel_core::connect::{Column, Connect4, ConnectEvaluator, ConnectWeights, WIN_SCORE};
use rduel_core::othello::{self, Move, Othello};
use rduel_core::tt::{NodeType, TranspositionTable};
use rduel_core::{Evaluator, Game, INFINITE, Score, SearchConfig, Searcher, Side, TablePolicy, best_move};

/// Plain minimax: no pruning, no cache, no ordering.
fn minimax<G: Game>(pos: &mut G, depth: u32, maximizing: Side, to_move: Side) -> Score {
    if let Some(value) = pos.terminal_value(maximizing) {
        return value;
    }
    if depth == 0 {
        return G::Eval::default().evaluate(pos, maximizing);
    }
    let moves = pos.legal_moves(to_move);
    if moves.is_empty() {
        return minimax(pos, depth - 1, maximizing, !to_move);
    }
    let mut best = if to_move == maximizing { -INFINITE } else { INFINITE };
    for mv in moves {
        let undo = pos.apply_move(mv, to_move);
        let score = minimax(pos, depth - 1, maximizing, !to_move);
        pos.undo_move(mv, to_move, undo);
        best = if to_move == maximizing { best.max(score) } else { best.min(score) };
    }
    best
}

fn alpha_beta<G: Game>(pos: &G, depth: u32, side: Side) -> Score {
    let mut searcher = Searcher::<G>::new(SearchConfig::with_depth(depth));
    searcher.think(pos, side).score
}

fn replay(cols: &[usize]) -> Connect4 {
    let mut pos = Connect4::new();
    for (ply, &c) in cols.iter().enumerate() {
        let side = if ply % 2 == 0 { Side::Black } else { Side::White };
        pos.apply_move(Column::new(c).unwrap(), side);
    }
    pos
}

#[test]
fn alpha_beta_matches_minimax_connect4() {
    let positions = [
        Connect4::new(),
        replay(&[3, 3, 4, 2]),
        replay(&[3, 2, 3, 2, 4, 4, 1]),
        replay(&[0, 6, 1, 5, 2]),
    ];
    for pos in &positions {
        let side = pos.side_to_move();
        for depth in 1..=4 {
            let expected = minimax(&mut pos.clone(), depth, side, side);
            assert_eq!(
                alpha_beta(pos, depth, side),
                expected,
                "depth {depth} position {pos:?}"
            );
        }
    }
}

#[test]
fn alpha_beta_matches_minimax_othello() {
    let mut pos = Othello::initial();
    for depth in 1..=4 {
        let expected = minimax(&mut pos.clone(), depth, Side::Black, Side::Black);
        assert_eq!(alpha_beta(&pos, depth, Side::Black), expected, "depth {depth}");
    }

    // a few plies in, white to move
    for (name, side) in [("d3", Side::Black), ("c5", Side::White), ("e6", Side::Black)] {
        let mv: Move = name.parse().unwrap();
        assert!(pos.legal_moves(side).contains(&mv), "{name} not legal");
        pos.apply_move(mv, side);
    }
    let expected = minimax(&mut pos.clone(), 3, Side::White, Side::White);
    assert_eq!(alpha_beta(&pos, 3, Side::White), expected);
}

#[test]
fn alpha_beta_matches_minimax_through_pass() {
    // white cannot move; black's replies decide the game
    let black = bits(&["a1", "c1", "h8"]);
    let white = bits(&["b1", "d1"]);
    let pos = Othello::from_masks(black, white).unwrap();
    assert!(pos.legal_moves(Side::White).is_empty());
    assert!(!pos.is_terminal());
    for depth in 1..=3 {
        let expected = minimax(&mut pos.clone(), depth, Side::White, Side::White);
        assert_eq!(alpha_beta(&pos, depth, Side::White), expected, "depth {depth}");
    }
}

#[test]
fn search_is_deterministic() {
    let pos = replay(&[3, 2, 4]);
    let mut a = Searcher::<Connect4>::new(SearchConfig::with_depth(5));
    let mut b = Searcher::<Connect4>::new(SearchConfig::with_depth(5));
    let first = a.think(&pos, Side::White);
    let second = b.think(&pos, Side::White);
    assert_eq!(first.best_move, second.best_move);
    assert_eq!(first.score, second.score);
    assert_eq!(first.stats, second.stats);

    // the same searcher again, table cleared in between
    let third = a.think(&pos, Side::White);
    assert_eq!(first, third);
}

#[test]
fn othello_opening_depth_four() {
    let pos = Othello::initial();
    let mv = best_move(&pos, Side::Black, 4).expect("black has moves");
    assert!([19, 26, 37, 44].contains(&mv.index()), "unexpected {mv}");
}

#[test]
fn othello_prefers_corner_over_x_square() {
    // black may take a1 or play into the x-square g7 next to an empty h8
    let black = bits(&["c3", "e5"]);
    let white = bits(&["b2", "f6"]);
    let pos = Othello::from_masks(black, white).unwrap();
    let moves: Vec<String> = pos
        .legal_moves(Side::Black)
        .iter()
        .map(|m| m.to_string())
        .collect();
    assert_eq!(moves, ["a1", "g7"]);
    let mv = best_move(&pos, Side::Black, 2).unwrap();
    assert_eq!(mv.to_string(), "a1");
}

#[test]
fn connect4_search_never_misses_a_forced_block() {
    // black threatens to complete the bottom row at column 3
    let pos = replay(&[0, 6, 1, 6, 2]);
    for depth in 1..=5 {
        assert_eq!(
            best_move(&pos, Side::White, depth),
            Column::new(3),
            "depth {depth}"
        );
    }
}

#[test]
fn table_read_consistency() {
    let mut tt = TranspositionTable::<Column>::new(TablePolicy::ClearPerSearch);
    let key = Connect4::new().fingerprint();
    tt.store(key, 3, 42, NodeType::Exact, Column::new(3));
    for depth in 0..=3 {
        assert_eq!(tt.lookup(key, depth), Some(42));
    }
    assert_eq!(tt.lookup(key, 4), None);
}

#[test]
fn terminal_scores_dominate_evaluation() {
    // black owns every cell of the grid: the most any evaluator sum can be
    let full = Connect4::from_rows(&["XXXXXXX"; 6]).unwrap();
    let eval = ConnectEvaluator::new(ConnectWeights::default());
    let ceiling = eval.evaluate(&full, Side::Black);
    assert!(ceiling > 0);
    assert!(ceiling < WIN_SCORE);
    assert!(-eval.evaluate(&full, Side::White) < WIN_SCORE);

    let all_black = Othello::from_masks(!0, 0).unwrap();
    let eval = othello::OthelloEvaluator::default();
    assert!(eval.evaluate(&all_black, Side::Black).abs() < othello::WIN_SCORE);
    assert_eq!(all_black.terminal_value(Side::Black), Some(othello::WIN_SCORE));
}

#[test]
fn persisted_table_respects_capacity() {
    let config = SearchConfig {
        depth: Some(4),
        table: TablePolicy::Persist { capacity: 64 },
    };
    let mut searcher = Searcher::<Connect4>::new(config);
    let pos = replay(&[3, 3]);
    let result = searcher.think(&pos, Side::Black);
    assert!(result.best_move.is_some());
    assert!(searcher.tt().len() <= 64);
    assert!(searcher.tt().hashfull() <= 1000);
}

fn bits(names: &[&str]) -> u64 {
    names
        .iter()
        .map(|n| n.parse::<Move>().unwrap().bit())
        .fold(0, |acc, b| acc | b)
}
