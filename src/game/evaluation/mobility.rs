// src/game/evaluation/mobility.rs

use crate::game::rules::Rules;
use super::EvalWeights;

/// Mobility and check terms, both belonging to the side to move.
///
/// The result is from the mover's point of view: its legal-move count is
/// a bonus and standing in check is a penalty.
pub fn evaluate<G: Rules>(game: &G, weights: &EvalWeights) -> i32 {
    let moves = game.legal_moves(None).len() as i32;
    let mut score = moves * weights.mobility;
    if game.in_check() {
        score -= weights.check_penalty;
    }
    score
}
