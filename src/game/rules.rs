// src/game/rules.rs

//! The contract between the search and a chess rules engine.
//!
//! The search never re-derives legality. It asks the rules engine for the
//! legal moves of the current position, applies and undoes them in strict
//! LIFO order, and reads a board snapshot and a position key.

use std::fmt;

use shakmaty::{Color, Piece, Role, Square};

use crate::error::RulesError;

/// Canonical identity of a position: board, side to move, castling rights
/// and en-passant target.
pub type PositionKey = u64;

/// Board contents indexed `[rank][file]`, rank 0 being the first rank.
pub type BoardSnapshot = [[Option<Piece>; 8]; 8];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveKind {
    Normal,
    Castle,
    EnPassant,
}

/// A legal move as produced by the rules engine.
///
/// Castling moves carry the king's destination square.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub piece: Role,
    pub promotion: Option<Role>,
    pub captured: Option<Role>,
    pub kind: MoveKind,
}

impl Move {
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    pub fn is_promotion(&self) -> bool {
        self.promotion.is_some()
    }

    pub fn is_castle(&self) -> bool {
        self.kind == MoveKind::Castle
    }

    pub fn is_en_passant(&self) -> bool {
        self.kind == MoveKind::EnPassant
    }

    /// True if both moves travel between the same two squares.
    pub fn same_squares(&self, other: &Move) -> bool {
        self.from == other.from && self.to == other.to
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(role) = self.promotion {
            write!(f, "{}", role.char())?;
        }
        Ok(())
    }
}

/// Operations the search needs from a rules engine.
pub trait Rules {
    fn side_to_move(&self) -> Color;

    /// All legal moves, or only those leaving `from` when given.
    fn legal_moves(&self, from: Option<Square>) -> Vec<Move>;

    fn apply(&mut self, mv: &Move) -> Result<(), RulesError>;

    fn undo(&mut self) -> Result<(), RulesError>;

    fn is_checkmate(&self) -> bool;

    fn is_stalemate(&self) -> bool;

    fn is_draw(&self) -> bool;

    fn in_check(&self) -> bool;

    fn board_snapshot(&self) -> BoardSnapshot;

    fn position_key(&self) -> PositionKey;

    fn is_game_over(&self) -> bool {
        self.is_checkmate() || self.is_stalemate() || self.is_draw()
    }
}
