// src/game/search/quiescence.rs

use crate::error::SearchError;
use crate::game::rules::{Move, Rules};
use super::ordering::mvv_lva;
use super::{Deadline, Searcher};

impl Searcher {
    /// Extends the search along captures and promotions until the position
    /// is quiet, so the horizon never lands in the middle of an exchange.
    ///
    /// Each capture removes a piece and each promotion uses up a pawn, so
    /// every line ends on its own; the deadline is the only other stop.
    pub(crate) fn quiescence<G: Rules>(
        &mut self,
        game: &mut G,
        mut alpha: i32,
        beta: i32,
        ply: usize,
        deadline: &Deadline,
    ) -> Result<i32, SearchError> {
        if deadline.expired() {
            return Err(SearchError::Timeout);
        }
        self.stats.qnodes += 1;

        let standing_pat = self.evaluator.evaluate_at(game, game.side_to_move(), ply);
        if standing_pat >= beta {
            return Ok(beta);
        }
        if alpha < standing_pat {
            alpha = standing_pat;
        }

        let mut forcing: Vec<Move> = game
            .legal_moves(None)
            .into_iter()
            .filter(|mv| mv.is_capture() || mv.is_promotion())
            .collect();
        forcing.sort_by_key(|mv| std::cmp::Reverse(mvv_lva(mv)));

        for mv in forcing {
            game.apply(&mv)?;
            let child = self.quiescence(game, -beta, -alpha, ply + 1, deadline);
            game.undo()?;
            let score = -child?;

            if score >= beta {
                return Ok(beta);
            }
            if score > alpha {
                alpha = score;
            }
        }

        Ok(alpha)
    }
}
