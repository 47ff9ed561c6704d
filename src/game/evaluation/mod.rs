//! Evaluation of a chess position.

pub mod bishops;
pub mod king_safety;
pub mod mobility;
pub mod pawn_structure;
pub mod pst;
pub mod rooks;

use serde::{Deserialize, Serialize};
use shakmaty::{Color, Role};

use crate::constants::{
    BISHOP_PAIR_BONUS, BISHOP_VALUE, CHECK_PENALTY, DOUBLED_PAWN_PENALTY, ISOLATED_PAWN_PENALTY,
    KING_EXPOSED_CENTER_PENALTY, KING_FILE_ENEMY_PAWN_PENALTY, KING_SAFETY_PHASE_LIMIT,
    KING_SHIELD_MISSING_PENALTY, KING_SHIELD_PAWN_BONUS, KNIGHT_VALUE, MATE_SCORE, MOBILITY_BONUS,
    PAWN_VALUE, QUEEN_VALUE, ROOK_OPEN_FILE_BONUS, ROOK_SEMI_OPEN_FILE_BONUS, ROOK_VALUE,
    TOTAL_PHASE_MATERIAL,
};
use crate::game::rules::{BoardSnapshot, Rules};
use pawn_structure::PawnFiles;

/// Tunable weights of the positional terms, in centipawns.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EvalWeights {
    pub bishop_pair: i32,
    pub doubled_pawn: i32,
    pub isolated_pawn: i32,
    pub rook_open_file: i32,
    pub rook_semi_open_file: i32,
    pub king_shield_pawn: i32,
    pub king_shield_missing: i32,
    pub king_file_enemy_pawn: i32,
    pub king_exposed_center: i32,
    pub mobility: i32,
    pub check_penalty: i32,
}

impl Default for EvalWeights {
    fn default() -> Self {
        Self {
            bishop_pair: BISHOP_PAIR_BONUS,
            doubled_pawn: DOUBLED_PAWN_PENALTY,
            isolated_pawn: ISOLATED_PAWN_PENALTY,
            rook_open_file: ROOK_OPEN_FILE_BONUS,
            rook_semi_open_file: ROOK_SEMI_OPEN_FILE_BONUS,
            king_shield_pawn: KING_SHIELD_PAWN_BONUS,
            king_shield_missing: KING_SHIELD_MISSING_PENALTY,
            king_file_enemy_pawn: KING_FILE_ENEMY_PAWN_PENALTY,
            king_exposed_center: KING_EXPOSED_CENTER_PENALTY,
            mobility: MOBILITY_BONUS,
            check_penalty: CHECK_PENALTY,
        }
    }
}

pub fn get_piece_value(role: Role) -> i32 {
    match role {
        Role::Pawn => PAWN_VALUE,
        Role::Knight => KNIGHT_VALUE,
        Role::Bishop => BISHOP_VALUE,
        Role::Rook => ROOK_VALUE,
        Role::Queen => QUEEN_VALUE,
        Role::King => 0, // The king has no material value
    }
}

/// Score of a mate delivered `ply` half-moves from the search root.
///
/// Nearer mates are worth more, so the search prefers the fastest win and
/// the slowest loss.
pub fn mate_score(ply: usize) -> i32 {
    MATE_SCORE - ply as i32
}

/// Calculates the game phase.
///
/// The phase is a value between 0.0 and 1.0, where 0.0 means all pieces
/// are still on the board and 1.0 means only kings and pawns remain.
pub fn game_phase(snapshot: &BoardSnapshot) -> f64 {
    let material: i32 = snapshot
        .iter()
        .flatten()
        .flatten()
        .filter(|piece| piece.role != Role::Pawn && piece.role != Role::King)
        .map(|piece| get_piece_value(piece.role))
        .sum();
    (1.0 - f64::from(material) / f64::from(TOTAL_PHASE_MATERIAL)).clamp(0.0, 1.0)
}

#[derive(Clone, Debug, Default)]
pub struct Evaluator {
    weights: EvalWeights,
}

impl Evaluator {
    pub fn new(weights: EvalWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &EvalWeights {
        &self.weights
    }

    /// Evaluates the position for `side`: high is good for `side`, and
    /// `evaluate(game, !side) == -evaluate(game, side)`.
    ///
    /// Returns a score in centipawns.
    pub fn evaluate<G: Rules>(&self, game: &G, side: Color) -> i32 {
        self.evaluate_at(game, side, 0)
    }

    /// Like [`Evaluator::evaluate`], with mates scored relative to `ply`.
    pub fn evaluate_at<G: Rules>(&self, game: &G, side: Color, ply: usize) -> i32 {
        if game.is_checkmate() {
            return if game.side_to_move() == side {
                -mate_score(ply)
            } else {
                mate_score(ply)
            };
        }
        if game.is_stalemate() || game.is_draw() {
            return 0;
        }

        let mut score = self.static_score(&game.board_snapshot());

        let mover_sign = match game.side_to_move() {
            Color::White => 1,
            Color::Black => -1,
        };
        score += mover_sign * mobility::evaluate(game, &self.weights);

        match side {
            Color::White => score,
            Color::Black => -score,
        }
    }

    /// Material, piece-square and structural terms from White's point of view.
    pub fn static_score(&self, snapshot: &BoardSnapshot) -> i32 {
        let phase = game_phase(snapshot);
        let pawns = PawnFiles::from_snapshot(snapshot);
        let mut white_score = 0;
        let mut black_score = 0;

        for (rank, row) in snapshot.iter().enumerate() {
            for (file, square) in row.iter().enumerate() {
                if let Some(piece) = square {
                    let score = get_piece_value(piece.role)
                        + pst::score(piece.color, piece.role, rank, file, phase);
                    match piece.color {
                        Color::White => white_score += score,
                        Color::Black => black_score += score,
                    }
                }
            }
        }

        white_score += self.structure(snapshot, &pawns, Color::White, phase);
        black_score += self.structure(snapshot, &pawns, Color::Black, phase);

        white_score - black_score
    }

    fn structure(&self, snapshot: &BoardSnapshot, pawns: &PawnFiles, color: Color, phase: f64) -> i32 {
        let mut score = bishops::evaluate(snapshot, color, &self.weights)
            + pawn_structure::evaluate(pawns, color, &self.weights)
            + rooks::evaluate(snapshot, pawns, color, &self.weights);

        if phase < KING_SAFETY_PHASE_LIMIT {
            score += king_safety::evaluate(snapshot, pawns, color, &self.weights);
        }

        score
    }
}
