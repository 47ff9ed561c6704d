//! Evaluation terms for rooks.

use shakmaty::{Color, Role};

use crate::game::rules::BoardSnapshot;
use super::pawn_structure::PawnFiles;
use super::EvalWeights;

/// Evaluates the files the rooks of `color` stand on.
pub fn evaluate(snapshot: &BoardSnapshot, pawns: &PawnFiles, color: Color, weights: &EvalWeights) -> i32 {
    let mut score = 0;

    for row in snapshot {
        for (file, square) in row.iter().enumerate() {
            match square {
                Some(piece) if piece.role == Role::Rook && piece.color == color => {
                    score += evaluate_file(pawns, color, file, weights);
                }
                _ => {}
            }
        }
    }

    score
}

/// An open file beats a semi-open one; a file with our own pawns earns nothing.
fn evaluate_file(pawns: &PawnFiles, color: Color, file: usize, weights: &EvalWeights) -> i32 {
    if pawns.is_open(file) {
        weights.rook_open_file
    } else if pawns.count(color, file) == 0 {
        weights.rook_semi_open_file
    } else {
        0
    }
}
