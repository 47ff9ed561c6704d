// src/game/search/tests.rs

use std::time::Duration;

use shakmaty::{Color, Square};

use super::*;
use crate::constants::MATE_SCORE;
use crate::game::rules::{BoardSnapshot, PositionKey};
use crate::game::GameState;

fn searcher(max_depth: u8) -> Searcher {
    Searcher::new(SearchConfig {
        max_depth,
        time_limit_ms: 600_000,
        ..SearchConfig::default()
    })
}

#[test]
fn test_finds_mate_in_one() {
    let mut game = GameState::from_fen("7k/1R6/8/8/8/8/8/R5K1 w - - 0 1").unwrap();
    let report = searcher(4).search(&mut game).unwrap();
    assert_eq!(report.best_move.to_string(), "a1a8");
    assert_eq!(report.score, MATE_SCORE - 1);
    assert_eq!(report.source, MoveSource::Search);
    // Deepening stops as soon as the mate is proven
    assert_eq!(report.depth, 1);
    assert_eq!(game.ply(), 0);
}

#[test]
fn test_finds_mate_in_two() {
    let mut game = GameState::from_fen("7k/8/8/8/8/8/8/RR4K1 w - - 0 1").unwrap();
    let report = searcher(4).search(&mut game).unwrap();
    assert_eq!(report.score, MATE_SCORE - 3);
    assert_eq!(report.depth, 3);
}

#[test]
fn test_wins_hanging_queen() {
    let mut game = GameState::from_fen("4k3/8/8/3q4/8/8/8/3RK3 w - - 0 1").unwrap();
    let mv = searcher(3).get_best_move(&mut game).unwrap();
    assert_eq!(mv.to_string(), "d1d5");
}

#[test]
fn test_no_move_when_stalemated() {
    let mut game = GameState::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
    assert!(game.is_stalemate());
    assert!(searcher(3).search(&mut game).is_none());
    assert!(searcher(3).get_best_move(&mut game).is_none());
}

#[test]
fn test_no_move_when_checkmated() {
    let mut game = GameState::from_fen(
        "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3",
    )
    .unwrap();
    assert!(searcher(2).get_best_move(&mut game).is_none());
}

#[test]
fn test_starting_position_depth_one() {
    let mut game = GameState::new();
    let legal = game.legal_moves(None);
    let report = searcher(1).search(&mut game).unwrap();
    assert!(legal.contains(&report.best_move));
    assert!(report.score >= 0);
    assert_eq!(report.depth, 1);
    assert_eq!(game.position_key(), GameState::new().position_key());
}

#[test]
fn test_search_is_deterministic() {
    let mut game = GameState::from_fen(
        "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3",
    )
    .unwrap();
    let first = searcher(3).search(&mut game).unwrap();
    let second = searcher(3).search(&mut game).unwrap();
    assert_eq!(first.best_move, second.best_move);
    assert_eq!(first.score, second.score);
    assert_eq!(first.stats, second.stats);
}

#[test]
fn test_reused_searcher_matches_fresh_one() {
    let mut game = GameState::from_fen("4k3/8/8/3q4/8/2N5/8/3RK3 w - - 0 1").unwrap();
    let mut reused = searcher(3);
    let mut other = GameState::new();
    reused.search(&mut other).unwrap();

    let after_reuse = reused.search(&mut game).unwrap();
    let fresh = searcher(3).search(&mut game).unwrap();
    assert_eq!(after_reuse.best_move, fresh.best_move);
    assert_eq!(after_reuse.score, fresh.score);
}

#[test]
fn test_zero_time_budget_falls_back_to_first_legal_move() {
    let mut game = GameState::new();
    let mut searcher = Searcher::new(SearchConfig {
        time_limit_ms: 0,
        ..SearchConfig::default()
    });
    let report = searcher.search(&mut game).unwrap();
    assert_eq!(report.source, MoveSource::FirstLegal);
    assert_eq!(report.best_move, game.legal_moves(None)[0]);
    assert_eq!(report.score, 0);
}

#[test]
fn test_timeout_is_not_cached() {
    let mut game = GameState::new();
    let mut searcher = searcher(4);
    let deadline = Deadline::after(Duration::ZERO);
    std::thread::sleep(Duration::from_millis(2));

    let result = searcher.negamax(&mut game, 3, -INFINITY, INFINITY, 0, &deadline);
    assert_eq!(result, Err(SearchError::Timeout));
    assert!(searcher.tt.is_empty());
    assert_eq!(game.ply(), 0);
}

#[test]
fn test_quiescence_on_quiet_position_is_static_eval() {
    let mut game = GameState::from_fen("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1").unwrap();
    let mut searcher = searcher(1);
    let expected = searcher.evaluator.evaluate(&game, Color::White);
    let score = searcher
        .quiescence(&mut game, -INFINITY, INFINITY, 0, &Deadline::unbounded())
        .unwrap();
    assert_eq!(score, expected);
}

#[test]
fn test_quiescence_resolves_exchange() {
    // Pawn takes the undefended knight
    let mut game = GameState::from_fen("4k3/8/8/3n4/4P3/8/8/4K3 w - - 0 1").unwrap();
    let mut searcher = searcher(1);
    let standing_pat = searcher.evaluator.evaluate(&game, Color::White);
    let score = searcher
        .quiescence(&mut game, -INFINITY, INFINITY, 0, &Deadline::unbounded())
        .unwrap();
    assert!(score > standing_pat + 200);
    assert!(searcher.stats.qnodes > 1);
    assert_eq!(game.ply(), 0);
}

#[test]
fn test_quiescence_searches_quiet_promotion() {
    let mut game = GameState::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    let mut searcher = searcher(1);
    let standing_pat = searcher.evaluator.evaluate(&game, Color::White);
    let score = searcher
        .quiescence(&mut game, -INFINITY, INFINITY, 0, &Deadline::unbounded())
        .unwrap();
    assert!(score > standing_pat + 500);
    assert_eq!(game.ply(), 0);
}

#[test]
fn test_stats_count_tt_hits_and_cutoffs() {
    let mut game = GameState::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 0 1").unwrap();
    let mut searcher = searcher(4);
    assert_eq!(searcher.config().max_depth, 4);
    let report = searcher.search(&mut game).unwrap();
    assert_eq!(report.depth, 4);
    assert!(report.stats.cutoffs > 0);
    assert!(report.stats.tt_hits > 0);
}

#[test]
fn test_depth_zero_negamax_equals_quiescence() {
    let fen = "r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4";
    let mut game = GameState::from_fen(fen).unwrap();
    let deadline = Deadline::unbounded();

    let from_negamax = searcher(1)
        .negamax(&mut game, 0, -INFINITY, INFINITY, 0, &deadline)
        .unwrap();
    let from_quiescence = searcher(1)
        .quiescence(&mut game, -INFINITY, INFINITY, 0, &deadline)
        .unwrap();
    assert_eq!(from_negamax, from_quiescence);
}

#[test]
fn test_static_eval_at_horizon_without_quiescence() {
    let mut game = GameState::from_fen("4k3/8/8/3n4/4P3/8/8/4K3 w - - 0 1").unwrap();
    let mut searcher = Searcher::new(SearchConfig {
        use_quiescence_search: false,
        ..SearchConfig::default()
    });
    let expected = searcher.evaluator.evaluate(&game, Color::White);
    let score = searcher
        .negamax(&mut game, 0, -INFINITY, INFINITY, 0, &Deadline::unbounded())
        .unwrap();
    assert_eq!(score, expected);
    assert_eq!(searcher.stats.qnodes, 0);
}

#[test]
fn test_completed_root_is_stored_exact() {
    let mut game = GameState::from_fen("4k3/8/8/3q4/8/8/8/3RK3 w - - 0 1").unwrap();
    let mut searcher = searcher(2);
    let report = searcher.search(&mut game).unwrap();

    let entry = searcher.tt.probe(game.position_key()).unwrap();
    assert_eq!(entry.bound, Bound::Exact);
    assert_eq!(entry.best_move, Some(report.best_move));
    assert_eq!(entry.score, report.score);
}

#[test]
fn test_quick_move_fallback_on_quiet_start() {
    let mut game = GameState::new();
    let mv = Searcher::default().get_quick_move(&mut game).unwrap();
    assert!(game.legal_moves(None).contains(&mv));
    assert_eq!(game.ply(), 0);
}

/// Rules engine whose `apply` always fails.
struct BrokenRules {
    inner: GameState,
}

impl Rules for BrokenRules {
    fn side_to_move(&self) -> Color {
        self.inner.side_to_move()
    }

    fn legal_moves(&self, from: Option<Square>) -> Vec<Move> {
        self.inner.legal_moves(from)
    }

    fn apply(&mut self, mv: &Move) -> Result<(), RulesError> {
        Err(RulesError::IllegalMove { mv: mv.to_string() })
    }

    fn undo(&mut self) -> Result<(), RulesError> {
        Err(RulesError::NothingToUndo)
    }

    fn is_checkmate(&self) -> bool {
        self.inner.is_checkmate()
    }

    fn is_stalemate(&self) -> bool {
        self.inner.is_stalemate()
    }

    fn is_draw(&self) -> bool {
        self.inner.is_draw()
    }

    fn in_check(&self) -> bool {
        self.inner.in_check()
    }

    fn board_snapshot(&self) -> BoardSnapshot {
        self.inner.board_snapshot()
    }

    fn position_key(&self) -> PositionKey {
        self.inner.position_key()
    }
}

#[test]
fn test_rules_failure_falls_back_without_panicking() {
    let mut game = BrokenRules { inner: GameState::new() };
    let first_legal = game.legal_moves(None)[0];

    let report = searcher(3).search(&mut game).unwrap();
    assert_eq!(report.source, MoveSource::QuickMove);
    assert_eq!(report.best_move, first_legal);

    let quick = Searcher::default().get_quick_move(&mut game);
    assert_eq!(quick, Some(first_legal));
}

/// Rules engine that sleeps inside `apply`, starting at the given root move.
struct SlowRules {
    inner: GameState,
    root_applies: usize,
    slow_from_root_apply: usize,
    delay: Duration,
    sleep_once: bool,
    slept: bool,
}

impl SlowRules {
    fn new(fen: &str, slow_from_root_apply: usize, delay: Duration, sleep_once: bool) -> Self {
        Self {
            inner: GameState::from_fen(fen).unwrap(),
            root_applies: 0,
            slow_from_root_apply,
            delay,
            sleep_once,
            slept: false,
        }
    }
}

impl Rules for SlowRules {
    fn side_to_move(&self) -> Color {
        self.inner.side_to_move()
    }

    fn legal_moves(&self, from: Option<Square>) -> Vec<Move> {
        self.inner.legal_moves(from)
    }

    fn apply(&mut self, mv: &Move) -> Result<(), RulesError> {
        if self.inner.ply() == 0 {
            self.root_applies += 1;
        }
        if self.root_applies >= self.slow_from_root_apply && !(self.sleep_once && self.slept) {
            std::thread::sleep(self.delay);
            self.slept = true;
        }
        self.inner.apply(mv)
    }

    fn undo(&mut self) -> Result<(), RulesError> {
        self.inner.undo()
    }

    fn is_checkmate(&self) -> bool {
        self.inner.is_checkmate()
    }

    fn is_stalemate(&self) -> bool {
        self.inner.is_stalemate()
    }

    fn is_draw(&self) -> bool {
        self.inner.is_draw()
    }

    fn in_check(&self) -> bool {
        self.inner.in_check()
    }

    fn board_snapshot(&self) -> BoardSnapshot {
        self.inner.board_snapshot()
    }

    fn position_key(&self) -> PositionKey {
        self.inner.position_key()
    }
}

const HANGING_QUEEN: &str = "4k3/8/8/3q4/8/8/8/3RK3 w - - 0 1";

#[test]
fn test_unfinished_iteration_keeps_previous_depth() {
    let root_moves = GameState::from_fen(HANGING_QUEEN).unwrap().legal_moves(None).len();
    // Depth 1 runs at full speed, depth 2 cannot finish its first root move
    let mut game = SlowRules::new(HANGING_QUEEN, root_moves + 1, Duration::from_millis(50), false);
    let mut searcher = Searcher::new(SearchConfig {
        max_depth: 6,
        time_limit_ms: 150,
        ..SearchConfig::default()
    });

    let report = searcher.search(&mut game).unwrap();
    assert_eq!(report.source, MoveSource::Search);
    assert_eq!(report.depth, 1);
    assert_eq!(report.best_move.to_string(), "d1d5");
    assert_eq!(game.inner.ply(), 0);
}

#[test]
fn test_no_new_depth_after_time_fraction() {
    // The first root move eats 60% of the budget
    let mut game = SlowRules::new(HANGING_QUEEN, 1, Duration::from_millis(120), true);
    let mut searcher = Searcher::new(SearchConfig {
        max_depth: 6,
        time_limit_ms: 200,
        deepening_time_fraction: 0.5,
        ..SearchConfig::default()
    });

    let report = searcher.search(&mut game).unwrap();
    assert_eq!(report.source, MoveSource::Search);
    assert_eq!(report.depth, 1);
    assert_eq!(report.best_move.to_string(), "d1d5");
    assert_eq!(game.inner.ply(), 0);
}
