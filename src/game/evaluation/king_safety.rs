// src/game/evaluation/king_safety.rs

use shakmaty::{Color, Piece, Role};

use crate::game::rules::BoardSnapshot;
use super::pawn_structure::PawnFiles;
use super::EvalWeights;

pub fn evaluate(snapshot: &BoardSnapshot, pawns: &PawnFiles, color: Color, weights: &EvalWeights) -> i32 {
    match find_king(snapshot, color) {
        Some((rank, file)) => {
            evaluate_pawn_shield(pawns, color, file, weights)
                - evaluate_exposed_center(color, rank, file, weights)
        }
        None => 0,
    }
}

fn find_king(snapshot: &BoardSnapshot, color: Color) -> Option<(usize, usize)> {
    let king = Piece { role: Role::King, color };
    snapshot.iter().enumerate().find_map(|(rank, row)| {
        row.iter()
            .position(|square| *square == Some(king))
            .map(|file| (rank, file))
    })
}

/// Rewards own pawns on the king's file and its neighbours, and punishes
/// files where only the enemy still has pawns.
fn evaluate_pawn_shield(pawns: &PawnFiles, color: Color, king_file: usize, weights: &EvalWeights) -> i32 {
    let mut shield_score = 0;

    for file in king_file.saturating_sub(1)..=(king_file + 1).min(7) {
        let ours = pawns.count(color, file);
        let theirs = pawns.count(!color, file);

        if ours > 0 {
            shield_score += weights.king_shield_pawn;
        } else {
            shield_score -= weights.king_shield_missing;
            if theirs > 0 {
                shield_score -= weights.king_file_enemy_pawn;
            }
        }
    }

    shield_score
}

/// A king on files c-f that has left its back rank.
fn evaluate_exposed_center(color: Color, rank: usize, file: usize, weights: &EvalWeights) -> i32 {
    let back_rank = match color {
        Color::White => 0,
        Color::Black => 7,
    };
    if (2..=5).contains(&file) && rank != back_rank {
        weights.king_exposed_center
    } else {
        0
    }
}
