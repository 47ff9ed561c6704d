// src/game/search/ordering.rs

//! Move ordering for alpha-beta search.
//!
//! Good ordering only makes cutoffs happen sooner; it never adds or drops
//! moves. Scores combine the transposition-table move, MVV-LVA for
//! captures, a promotion bonus, two killer slots per ply and the history
//! heuristic for quiet moves.

use shakmaty::Color;

use crate::constants::{
    CAPTURE_BONUS, FIRST_KILLER_BONUS, MAX_PLY, PROMOTION_BONUS, SECOND_KILLER_BONUS, TT_MOVE_BONUS,
};
use crate::game::evaluation::get_piece_value;
use crate::game::rules::Move;

/// Most valuable victim, least valuable attacker.
///
/// A promotion without a capture counts its victim as a pawn.
pub fn mvv_lva(mv: &Move) -> i32 {
    let victim = mv.captured.map_or(get_piece_value(shakmaty::Role::Pawn), get_piece_value);
    victim * 10 - get_piece_value(mv.piece)
}

/// Up to two quiet moves per ply that caused a beta cutoff, newest first.
#[derive(Clone, Debug)]
pub struct KillerMoves {
    slots: [[Option<Move>; 2]; MAX_PLY],
}

impl Default for KillerMoves {
    fn default() -> Self {
        Self { slots: [[None; 2]; MAX_PLY] }
    }
}

impl KillerMoves {
    pub fn get(&self, ply: usize) -> [Option<Move>; 2] {
        self.slots.get(ply).copied().unwrap_or([None, None])
    }

    pub fn store(&mut self, mv: Move, ply: usize) {
        if let Some(slot) = self.slots.get_mut(ply) {
            if !slot[0].is_some_and(|killer| killer.same_squares(&mv)) {
                slot[1] = slot[0];
                slot[0] = Some(mv);
            }
        }
    }

    pub fn clear(&mut self) {
        self.slots = [[None; 2]; MAX_PLY];
    }
}

/// Cutoff weights per side, indexed by from and to square.
#[derive(Clone, Debug)]
pub struct HistoryTable {
    table: Vec<[[i32; 64]; 64]>,
}

impl Default for HistoryTable {
    fn default() -> Self {
        Self { table: vec![[[0; 64]; 64]; 2] }
    }
}

impl HistoryTable {
    pub fn update(&mut self, mv: &Move, side: Color, depth: i32) {
        let cell = &mut self.table[side as usize][mv.from as usize][mv.to as usize];
        *cell = cell.saturating_add(depth * depth);
    }

    pub fn score(&self, mv: &Move, side: Color) -> i32 {
        self.table[side as usize][mv.from as usize][mv.to as usize]
    }

    pub fn clear(&mut self) {
        for side in &mut self.table {
            *side = [[0; 64]; 64];
        }
    }
}

#[derive(Clone, Debug)]
pub struct MoveOrderer {
    killers: KillerMoves,
    history: HistoryTable,
    use_killer_moves: bool,
    use_history_heuristic: bool,
}

impl MoveOrderer {
    pub fn new(use_killer_moves: bool, use_history_heuristic: bool) -> Self {
        Self {
            killers: KillerMoves::default(),
            history: HistoryTable::default(),
            use_killer_moves,
            use_history_heuristic,
        }
    }

    pub fn reset(&mut self) {
        self.killers.clear();
        self.history.clear();
    }

    /// Sorts `moves` best-first. Equal scores keep their input order.
    pub fn order(&self, moves: Vec<Move>, side: Color, ply: usize, tt_move: Option<Move>) -> Vec<Move> {
        let mut scored: Vec<(i32, Move)> = moves
            .into_iter()
            .map(|mv| (self.score_move(&mv, side, ply, tt_move.as_ref()), mv))
            .collect();
        scored.sort_by(|a, b| b.0.cmp(&a.0));
        scored.into_iter().map(|(_, mv)| mv).collect()
    }

    /// Remembers a quiet move that caused a beta cutoff.
    pub fn record_cutoff(&mut self, mv: Move, side: Color, ply: usize, depth: i32) {
        if self.use_killer_moves {
            self.killers.store(mv, ply);
        }
        if self.use_history_heuristic {
            self.history.update(&mv, side, depth);
        }
    }

    fn score_move(&self, mv: &Move, side: Color, ply: usize, tt_move: Option<&Move>) -> i32 {
        let mut score = 0;

        if tt_move.is_some_and(|best| best.same_squares(mv)) {
            score += TT_MOVE_BONUS;
        }
        if mv.is_capture() {
            score += CAPTURE_BONUS + mvv_lva(mv);
        }
        if mv.is_promotion() {
            score += PROMOTION_BONUS;
        }
        if self.use_killer_moves {
            let [first, second] = self.killers.get(ply);
            if first.is_some_and(|killer| killer.same_squares(mv)) {
                score += FIRST_KILLER_BONUS;
            }
            if second.is_some_and(|killer| killer.same_squares(mv)) {
                score += SECOND_KILLER_BONUS;
            }
        }
        if self.use_history_heuristic {
            score += self.history.score(mv, side);
        }

        score
    }
}
