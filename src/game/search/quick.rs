// src/game/search/quick.rs

//! One-ply move choice used when there is no time, or no trustworthy
//! state, for a real search.

use shakmaty::{Color, Rank, Role, Square};

use crate::constants::{
    QUICK_CASTLE_BONUS, QUICK_CENTER_BONUS, QUICK_CHECK_BONUS, QUICK_DEVELOPMENT_BONUS,
    QUICK_EXTENDED_CENTER_BONUS, QUICK_MATE_BONUS,
};
use crate::error::RulesError;
use crate::game::rules::{Move, Rules};
use super::ordering::mvv_lva;

const CENTER: [Square; 4] = [Square::D4, Square::E4, Square::D5, Square::E5];

/// Picks the highest scoring legal move; ties go to the earlier move.
pub fn quick_move<G: Rules>(game: &mut G) -> Result<Option<Move>, RulesError> {
    let side = game.side_to_move();
    let mut best: Option<(Move, i32)> = None;

    for mv in game.legal_moves(None) {
        let score = score_move(game, &mv, side)?;
        if best.map_or(true, |(_, best_score)| score > best_score) {
            best = Some((mv, score));
        }
    }

    Ok(best.map(|(mv, _)| mv))
}

fn score_move<G: Rules>(game: &mut G, mv: &Move, side: Color) -> Result<i32, RulesError> {
    let mut score = 0;

    if mv.is_capture() {
        score += mvv_lva(mv);
    }

    game.apply(mv)?;
    let (mates, checks) = (game.is_checkmate(), game.in_check());
    game.undo()?;

    if mates {
        score += QUICK_MATE_BONUS;
    } else if checks {
        score += QUICK_CHECK_BONUS;
    }

    score += center_bonus(mv.to);

    let home_rank = match side {
        Color::White => Rank::First,
        Color::Black => Rank::Eighth,
    };
    if matches!(mv.piece, Role::Knight | Role::Bishop) && mv.from.rank() == home_rank {
        score += QUICK_DEVELOPMENT_BONUS;
    }
    if mv.is_castle() {
        score += QUICK_CASTLE_BONUS;
    }

    Ok(score)
}

fn center_bonus(sq: Square) -> i32 {
    if CENTER.contains(&sq) {
        return QUICK_CENTER_BONUS;
    }
    let (file, rank) = (sq.file() as usize, sq.rank() as usize);
    if (2..=5).contains(&file) && (2..=5).contains(&rank) {
        QUICK_EXTENDED_CENTER_BONUS
    } else {
        0
    }
}
