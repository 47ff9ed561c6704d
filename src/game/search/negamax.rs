// src/game/search/negamax.rs

//! Depth-limited negamax with alpha-beta pruning.
//!
//! Scores are always from the point of view of the side to move; a child's
//! score is negated and the window swapped at every ply. Every node checks
//! the deadline first and gives up with [`SearchError::Timeout`], so a
//! subtree cut short by the clock is never cached or compared as a score.

use crate::constants::INFINITY;
use crate::error::SearchError;
use crate::game::evaluation::mate_score;
use crate::game::rules::Rules;
use super::tt::Bound;
use super::{Deadline, Searcher};

impl Searcher {
    pub(crate) fn negamax<G: Rules>(
        &mut self,
        game: &mut G,
        depth: i32,
        mut alpha: i32,
        beta: i32,
        ply: usize,
        deadline: &Deadline,
    ) -> Result<i32, SearchError> {
        if deadline.expired() {
            return Err(SearchError::Timeout);
        }
        self.stats.nodes += 1;

        let key = game.position_key();
        let tt_move = match self.tt.probe(key) {
            Some(entry) => {
                if let Some(score) = entry.resolve(depth, alpha, beta) {
                    self.stats.tt_hits += 1;
                    return Ok(score);
                }
                entry.best_move
            }
            None => None,
        };

        if game.is_checkmate() {
            // Mate scores count plies from the root and are cached as is,
            // with no adjustment when a later probe hits at another ply.
            return Ok(-mate_score(ply));
        }
        if game.is_stalemate() || game.is_draw() {
            return Ok(0);
        }

        if depth <= 0 {
            if self.config.use_quiescence_search {
                return self.quiescence(game, alpha, beta, ply, deadline);
            }
            return Ok(self.evaluator.evaluate_at(game, game.side_to_move(), ply));
        }

        let side = game.side_to_move();
        let moves = self.orderer.order(game.legal_moves(None), side, ply, tt_move);

        let mut bound = Bound::Upper;
        let mut best_score = -INFINITY;
        let mut best_move = None;

        for mv in moves {
            game.apply(&mv)?;
            let child = self.negamax(game, depth - 1, -beta, -alpha, ply + 1, deadline);
            game.undo()?;
            let score = -child?;

            if score > best_score {
                best_score = score;
                best_move = Some(mv);
            }
            if score > alpha {
                alpha = score;
                bound = Bound::Exact;
            }
            if alpha >= beta {
                if !mv.is_capture() {
                    self.orderer.record_cutoff(mv, side, ply, depth);
                }
                self.stats.cutoffs += 1;
                bound = Bound::Lower;
                break;
            }
        }

        self.tt.store(key, depth, best_score, bound, best_move);
        Ok(best_score)
    }
}
