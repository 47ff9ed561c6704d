// src/game/search.rs

pub mod negamax;
pub mod ordering;
pub mod quick;
pub mod quiescence;
pub mod tt;

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::constants::{INFINITY, MATE_THRESHOLD};
use crate::error::{RulesError, SearchError};
use crate::game::evaluation::{EvalWeights, Evaluator};
use crate::game::rules::{Move, Rules};
use ordering::MoveOrderer;
use tt::{Bound, TranspositionTable};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SearchConfig {
    pub max_depth: u8,
    pub time_limit_ms: u64,
    pub tt_capacity: usize,
    /// Share of the time budget after which no new depth is started.
    pub deepening_time_fraction: f64,
    pub use_quiescence_search: bool,
    pub use_killer_moves: bool,
    pub use_history_heuristic: bool,
    pub eval: EvalWeights,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: 6,
            time_limit_ms: 2500,
            tt_capacity: 1 << 20,
            deepening_time_fraction: 0.65,
            use_quiescence_search: true,
            use_killer_moves: true,
            use_history_heuristic: true,
            eval: EvalWeights::default(),
        }
    }
}

/// Wall-clock limit shared by every node of one search.
#[derive(Clone, Copy, Debug)]
pub struct Deadline {
    start: Instant,
    limit: Option<Duration>,
}

impl Deadline {
    pub fn after(limit: Duration) -> Self {
        Self { start: Instant::now(), limit: Some(limit) }
    }

    pub fn unbounded() -> Self {
        Self { start: Instant::now(), limit: None }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    pub fn expired(&self) -> bool {
        self.limit.is_some_and(|limit| self.start.elapsed() > limit)
    }

    /// Elapsed share of the budget; always 0.0 without a limit.
    pub fn fraction_elapsed(&self) -> f64 {
        match self.limit {
            Some(limit) if !limit.is_zero() => self.start.elapsed().as_secs_f64() / limit.as_secs_f64(),
            Some(_) => 1.0,
            None => 0.0,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes: u64,
    pub qnodes: u64,
    pub tt_hits: u64,
    pub cutoffs: u64,
}

/// How the reported move was chosen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveSource {
    Search,
    QuickMove,
    FirstLegal,
}

#[derive(Clone, Debug)]
pub struct SearchReport {
    pub best_move: Move,
    /// Score for the side to move; 0 when the move did not come from a search.
    pub score: i32,
    pub depth: u8,
    pub stats: SearchStats,
    pub elapsed: Duration,
    pub source: MoveSource,
}

struct RootOutcome {
    best: Option<(Move, i32)>,
    completed: bool,
}

/// Iterative-deepening alpha-beta searcher.
///
/// The transposition table, killer moves and history weights belong to
/// one searcher and are reset at the start of every top-level search.
pub struct Searcher {
    config: SearchConfig,
    evaluator: Evaluator,
    tt: TranspositionTable,
    orderer: MoveOrderer,
    stats: SearchStats,
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

impl Searcher {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            evaluator: Evaluator::new(config.eval.clone()),
            tt: TranspositionTable::new(config.tt_capacity),
            orderer: MoveOrderer::new(config.use_killer_moves, config.use_history_heuristic),
            stats: SearchStats::default(),
            config,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    /// Best move for the side to move, or `None` if the game is over.
    pub fn get_best_move<G: Rules>(&mut self, game: &mut G) -> Option<Move> {
        self.search(game).map(|report| report.best_move)
    }

    /// Runs a full search and reports how the move was found.
    ///
    /// Never fails: a rules-engine error falls back to the quick move and a
    /// starved search falls back to the first legal move.
    pub fn search<G: Rules>(&mut self, game: &mut G) -> Option<SearchReport> {
        if game.is_game_over() {
            debug!("position is already decided, no move to search");
            return None;
        }

        self.reset();
        let deadline = Deadline::after(Duration::from_millis(self.config.time_limit_ms));

        match self.iterative_deepening(game, &deadline) {
            Ok(Some(report)) => {
                info!(
                    best_move = %report.best_move,
                    score = report.score,
                    depth = report.depth,
                    nodes = report.stats.nodes,
                    qnodes = report.stats.qnodes,
                    tt_hits = report.stats.tt_hits,
                    cutoffs = report.stats.cutoffs,
                    elapsed_ms = report.elapsed.as_millis() as u64,
                    "search finished"
                );
                Some(report)
            }
            Ok(None) => {
                warn!("no depth produced a move, falling back to the first legal move");
                let best_move = game.legal_moves(None).into_iter().next()?;
                Some(self.fallback_report(best_move, MoveSource::FirstLegal, &deadline))
            }
            Err(err) => {
                warn!(error = %err, "rules engine failed during search, falling back to quick move");
                let best_move = self.get_quick_move(game)?;
                Some(self.fallback_report(best_move, MoveSource::QuickMove, &deadline))
            }
        }
    }

    /// Cheap one-ply move choice without tree search.
    pub fn get_quick_move<G: Rules>(&self, game: &mut G) -> Option<Move> {
        match quick::quick_move(game) {
            Ok(mv) => mv,
            Err(err) => {
                warn!(error = %err, "quick move failed, using the first legal move");
                game.legal_moves(None).into_iter().next()
            }
        }
    }

    fn reset(&mut self) {
        self.tt.clear();
        self.orderer.reset();
        self.stats = SearchStats::default();
    }

    fn fallback_report(&self, best_move: Move, source: MoveSource, deadline: &Deadline) -> SearchReport {
        SearchReport {
            best_move,
            score: 0,
            depth: 0,
            stats: self.stats,
            elapsed: deadline.elapsed(),
            source,
        }
    }

    fn iterative_deepening<G: Rules>(
        &mut self,
        game: &mut G,
        deadline: &Deadline,
    ) -> Result<Option<SearchReport>, RulesError> {
        let mut best: Option<(Move, i32, u8)> = None;

        for depth in 1..=self.config.max_depth {
            if deadline.fraction_elapsed() > self.config.deepening_time_fraction {
                debug!(depth, "not enough time left to start another iteration");
                break;
            }

            let outcome = self.root_search(game, i32::from(depth), deadline)?;

            if let Some((mv, score)) = outcome.best {
                best = Some((mv, score, depth));
                debug!(
                    depth,
                    score,
                    best_move = %mv,
                    nodes = self.stats.nodes,
                    qnodes = self.stats.qnodes,
                    tt_hits = self.stats.tt_hits,
                    cutoffs = self.stats.cutoffs,
                    elapsed_ms = deadline.elapsed().as_millis() as u64,
                    completed = outcome.completed,
                    "iteration done"
                );
            }

            if !outcome.completed {
                debug!(depth, "deadline reached inside the iteration");
                break;
            }
            if outcome.best.is_some_and(|(_, score)| score.abs() >= MATE_THRESHOLD) {
                debug!(depth, "forced mate found");
                break;
            }
        }

        Ok(best.map(|(best_move, score, depth)| SearchReport {
            best_move,
            score,
            depth,
            stats: self.stats,
            elapsed: deadline.elapsed(),
            source: MoveSource::Search,
        }))
    }

    /// Searches every root move at `depth`. An aborted pass still reports
    /// the best of the moves it finished.
    fn root_search<G: Rules>(
        &mut self,
        game: &mut G,
        depth: i32,
        deadline: &Deadline,
    ) -> Result<RootOutcome, RulesError> {
        let key = game.position_key();
        let side = game.side_to_move();
        let tt_move = self.tt.probe(key).and_then(|entry| entry.best_move);
        let moves = self.orderer.order(game.legal_moves(None), side, 0, tt_move);

        let mut best: Option<(Move, i32)> = None;
        let mut alpha = -INFINITY;
        let mut completed = true;

        for mv in moves {
            if deadline.expired() {
                completed = false;
                break;
            }

            game.apply(&mv)?;
            let child = self.negamax(game, depth - 1, -INFINITY, -alpha, 1, deadline);
            game.undo()?;

            let score = match child {
                Ok(score) => -score,
                Err(SearchError::Timeout) => {
                    completed = false;
                    break;
                }
                Err(SearchError::Rules(err)) => return Err(err),
            };

            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((mv, score));
            }
            if score > alpha {
                alpha = score;
            }
        }

        if completed {
            if let Some((mv, score)) = best {
                self.tt.store(key, depth, score, Bound::Exact, Some(mv));
            }
        }

        Ok(RootOutcome { best, completed })
    }
}

#[cfg(test)]
mod tests;
