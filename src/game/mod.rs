// game/mod.rs

pub mod evaluation;
pub mod rules;
pub mod search;

use shakmaty::fen::Fen;
use shakmaty::uci::UciMove;
use shakmaty::zobrist::{Zobrist64, ZobristHash};
use shakmaty::{CastlingMode, Chess, Color, EnPassantMode, File, Position, Role, Square};

use crate::error::RulesError;
use rules::{BoardSnapshot, Move, MoveKind, PositionKey, Rules};

const FIFTY_MOVE_HALFMOVES: u32 = 100;
const REPETITION_LIMIT: usize = 3;

/// A game backed by `shakmaty`, keeping every position reached so moves
/// can be undone and repetitions detected.
#[derive(Clone, Debug)]
pub struct GameState {
    positions: Vec<Chess>,
    keys: Vec<PositionKey>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::from_position(Chess::default())
    }
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_fen(fen: &str) -> Result<Self, RulesError> {
        let fen: Fen = fen
            .trim()
            .parse()
            .map_err(|e: shakmaty::fen::ParseFenError| RulesError::InvalidFen(e.to_string()))?;
        let chess: Chess = fen
            .into_position(CastlingMode::Standard)
            .map_err(|e| RulesError::InvalidPosition(e.to_string()))?;
        Ok(Self::from_position(chess))
    }

    pub fn from_position(chess: Chess) -> Self {
        let key = zobrist_key(&chess);
        Self {
            positions: vec![chess],
            keys: vec![key],
        }
    }

    pub fn position(&self) -> &Chess {
        // `positions` always holds at least the starting position
        &self.positions[self.positions.len() - 1]
    }

    /// Number of moves applied since the game was created.
    pub fn ply(&self) -> usize {
        self.positions.len() - 1
    }

    /// Plays a move given in UCI notation, e.g. `e2e4` or `e7e8q`.
    pub fn play_uci(&mut self, uci: &str) -> Result<Move, RulesError> {
        let illegal = || RulesError::IllegalMove { mv: uci.to_string() };
        let uci_move: UciMove = uci.parse().map_err(|_| illegal())?;
        let m = uci_move.to_move(self.position()).map_err(|_| illegal())?;
        let mv = convert_move(&m).ok_or_else(illegal)?;
        self.apply(&mv)?;
        Ok(mv)
    }

    fn repetitions(&self) -> usize {
        let current = self.keys[self.keys.len() - 1];
        self.keys.iter().filter(|&&key| key == current).count()
    }
}

impl Rules for GameState {
    fn side_to_move(&self) -> Color {
        self.position().turn()
    }

    fn legal_moves(&self, from: Option<Square>) -> Vec<Move> {
        self.position()
            .legal_moves()
            .iter()
            .filter_map(convert_move)
            .filter(|mv| from.map_or(true, |sq| mv.from == sq))
            .collect()
    }

    fn apply(&mut self, mv: &Move) -> Result<(), RulesError> {
        let current = self.position();
        let legal = current
            .legal_moves()
            .into_iter()
            .find(|m| convert_move(m).as_ref() == Some(mv))
            .ok_or_else(|| RulesError::IllegalMove { mv: mv.to_string() })?;

        let mut next = current.clone();
        next.play_unchecked(legal);
        self.keys.push(zobrist_key(&next));
        self.positions.push(next);
        Ok(())
    }

    fn undo(&mut self) -> Result<(), RulesError> {
        if self.positions.len() <= 1 {
            return Err(RulesError::NothingToUndo);
        }
        self.positions.pop();
        self.keys.pop();
        Ok(())
    }

    fn is_checkmate(&self) -> bool {
        self.position().is_checkmate()
    }

    fn is_stalemate(&self) -> bool {
        self.position().is_stalemate()
    }

    fn is_draw(&self) -> bool {
        let pos = self.position();
        pos.is_insufficient_material()
            || pos.halfmoves() >= FIFTY_MOVE_HALFMOVES
            || self.repetitions() >= REPETITION_LIMIT
    }

    fn in_check(&self) -> bool {
        self.position().is_check()
    }

    fn board_snapshot(&self) -> BoardSnapshot {
        let board = self.position().board();
        let mut snapshot: BoardSnapshot = [[None; 8]; 8];
        for square in Square::ALL {
            snapshot[square.rank() as usize][square.file() as usize] = board.piece_at(square);
        }
        snapshot
    }

    fn position_key(&self) -> PositionKey {
        self.keys[self.keys.len() - 1]
    }
}

fn zobrist_key(pos: &Chess) -> PositionKey {
    pos.zobrist_hash::<Zobrist64>(EnPassantMode::Legal).0
}

/// Converts a shakmaty move into the search's move representation.
fn convert_move(m: &shakmaty::Move) -> Option<Move> {
    match *m {
        shakmaty::Move::Normal { role, from, capture, to, promotion } => Some(Move {
            from,
            to,
            piece: role,
            promotion,
            captured: capture,
            kind: MoveKind::Normal,
        }),
        shakmaty::Move::EnPassant { from, to } => Some(Move {
            from,
            to,
            piece: Role::Pawn,
            promotion: None,
            captured: Some(Role::Pawn),
            kind: MoveKind::EnPassant,
        }),
        shakmaty::Move::Castle { king, rook } => {
            let file = if rook.file() as usize > king.file() as usize {
                File::G
            } else {
                File::C
            };
            Some(Move {
                from: king,
                to: Square::from_coords(file, king.rank()),
                piece: Role::King,
                promotion: None,
                captured: None,
                kind: MoveKind::Castle,
            })
        }
        shakmaty::Move::Put { .. } => None,
    }
}
