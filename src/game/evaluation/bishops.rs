//! Evaluation terms for bishops.

use shakmaty::{Color, Role};

use crate::game::rules::BoardSnapshot;
use super::EvalWeights;

/// Bishop pair bonus for `color`.
pub fn evaluate(snapshot: &BoardSnapshot, color: Color, weights: &EvalWeights) -> i32 {
    let bishops = snapshot
        .iter()
        .flatten()
        .flatten()
        .filter(|piece| piece.role == Role::Bishop && piece.color == color)
        .count();

    if bishops >= 2 {
        weights.bishop_pair
    } else {
        0
    }
}
