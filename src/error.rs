//! Error types for the rules adapter and the search.

use thiserror::Error;

/// Failures reported by a rules engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RulesError {
    /// The move is not legal in the current position
    #[error("Illegal move {mv} in the current position")]
    IllegalMove { mv: String },

    /// Undo was requested with no applied move on the stack
    #[error("No move to undo")]
    NothingToUndo,

    /// The FEN string could not be parsed
    #[error("Invalid FEN: {0}")]
    InvalidFen(String),

    /// The FEN parsed but does not describe a legal chess position
    #[error("Invalid position: {0}")]
    InvalidPosition(String),
}

/// Reasons a search node stops without producing a score.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("Search deadline reached")]
    Timeout,

    #[error(transparent)]
    Rules(#[from] RulesError),
}
