// src/selfplay.rs

//! Engine-versus-engine games, used to compare search profiles.

use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info};

use crate::error::RulesError;
use crate::game::rules::{Move, Rules};
use crate::game::search::Searcher;
use crate::game::GameState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    WhiteWin,
    BlackWin,
    Draw,
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            GameResult::WhiteWin => "1-0",
            GameResult::BlackWin => "0-1",
            GameResult::Draw => "1/2-1/2",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SelfPlayOptions {
    /// Random legal plies played before the engines take over.
    pub random_plies: usize,
    /// The game is scored as a draw once this many plies were played.
    pub max_plies: usize,
}

impl Default for SelfPlayOptions {
    fn default() -> Self {
        Self { random_plies: 4, max_plies: 200 }
    }
}

#[derive(Debug, Clone)]
pub struct PlayedGame {
    pub result: GameResult,
    pub moves: Vec<Move>,
}

impl PlayedGame {
    /// Moves in numbered UCI notation, e.g. `1. e2e4 e7e5 2. g1f3`.
    pub fn movetext(&self) -> String {
        let mut text = String::new();
        for (i, mv) in self.moves.iter().enumerate() {
            if i % 2 == 0 {
                text.push_str(&format!("{}. ", i / 2 + 1));
            }
            text.push_str(&format!("{mv} "));
        }
        text.trim_end().to_string()
    }
}

/// Plays one game from `game`, which is left at the final position.
pub fn play_game<R: Rng>(
    game: &mut GameState,
    white: &mut Searcher,
    black: &mut Searcher,
    options: &SelfPlayOptions,
    rng: &mut R,
) -> Result<PlayedGame, RulesError> {
    let mut moves = Vec::new();

    while !game.is_game_over() && moves.len() < options.max_plies {
        let mv = if moves.len() < options.random_plies {
            game.legal_moves(None).choose(rng).copied()
        } else if game.side_to_move().is_white() {
            white.get_best_move(game)
        } else {
            black.get_best_move(game)
        };

        let Some(mv) = mv else { break };
        debug!(ply = moves.len(), mv = %mv, "move played");
        game.apply(&mv)?;
        moves.push(mv);
    }

    let result = if game.is_checkmate() {
        if game.side_to_move().is_white() {
            GameResult::BlackWin
        } else {
            GameResult::WhiteWin
        }
    } else {
        GameResult::Draw
    };
    info!(result = %result, plies = moves.len(), "game finished");

    Ok(PlayedGame { result, moves })
}
