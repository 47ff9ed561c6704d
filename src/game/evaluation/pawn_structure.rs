// src/game/evaluation/pawn_structure.rs

use shakmaty::{Color, Role};

use crate::game::rules::BoardSnapshot;
use super::EvalWeights;

/// Pawn counts per file for both sides.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PawnFiles {
    white: [u8; 8],
    black: [u8; 8],
}

impl PawnFiles {
    pub fn from_snapshot(snapshot: &BoardSnapshot) -> Self {
        let mut files = Self::default();
        for row in snapshot {
            for (file, square) in row.iter().enumerate() {
                if let Some(piece) = square {
                    if piece.role == Role::Pawn {
                        match piece.color {
                            Color::White => files.white[file] += 1,
                            Color::Black => files.black[file] += 1,
                        }
                    }
                }
            }
        }
        files
    }

    pub fn of(&self, color: Color) -> &[u8; 8] {
        match color {
            Color::White => &self.white,
            Color::Black => &self.black,
        }
    }

    pub fn count(&self, color: Color, file: usize) -> u8 {
        self.of(color)[file]
    }

    /// No pawns of either side on the file.
    pub fn is_open(&self, file: usize) -> bool {
        self.white[file] == 0 && self.black[file] == 0
    }
}

/// Pawn structure score for `color`: penalties only, so never positive.
pub fn evaluate(pawns: &PawnFiles, color: Color, weights: &EvalWeights) -> i32 {
    let ours = pawns.of(color);
    let mut score = 0;

    for file in 0..8 {
        let count = i32::from(ours[file]);
        if count == 0 {
            continue;
        }
        if count > 1 {
            score -= weights.doubled_pawn * (count - 1);
        }
        let left_empty = file == 0 || ours[file - 1] == 0;
        let right_empty = file == 7 || ours[file + 1] == 0;
        if left_empty && right_empty {
            score -= weights.isolated_pawn;
        }
    }

    score
}
