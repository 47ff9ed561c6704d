//! Piece-Square Tables (PSTs) for chess evaluation.
//!
//! The values are from the [Chess Programming Wiki](https://www.chessprogramming.org/Simplified_Evaluation_Function).
//! Tables are written from White's point of view with row 0 being the
//! eighth rank. The lookup tables below are re-indexed by rank so that
//! `table[rank][file]` works directly with a board snapshot.

use shakmaty::{Color, Role};

type Pst = [[i32; 8]; 8];

const fn flip(pst: &Pst) -> Pst {
    let mut flipped = [[0; 8]; 8];
    let mut i = 0;
    while i < 8 {
        let mut j = 0;
        while j < 8 {
            flipped[i][j] = pst[7 - i][j];
            j += 1;
        }
        i += 1;
    }
    flipped
}

#[rustfmt::skip]
const PAWN_PST_BASE: Pst = [
    [  0,   0,   0,   0,   0,   0,   0,   0],
    [ 50,  50,  50,  50,  50,  50,  50,  50],
    [ 10,  10,  20,  30,  30,  20,  10,  10],
    [  5,   5,  10,  25,  25,  10,   5,   5],
    [  0,   0,   0,  20,  20,   0,   0,   0],
    [  5,  -5, -10,   0,   0, -10,  -5,   5],
    [  5,  10,  10, -20, -20,  10,  10,   5],
    [  0,   0,   0,   0,   0,   0,   0,   0],
];

#[rustfmt::skip]
const KNIGHT_PST_BASE: Pst = [
    [-50, -40, -30, -30, -30, -30, -40, -50],
    [-40, -20,   0,   0,   0,   0, -20, -40],
    [-30,   0,  10,  15,  15,  10,   0, -30],
    [-30,   5,  15,  20,  20,  15,   5, -30],
    [-30,   0,  15,  20,  20,  15,   0, -30],
    [-30,   5,  10,  15,  15,  10,   5, -30],
    [-40, -20,   0,   5,   5,   0, -20, -40],
    [-50, -40, -30, -30, -30, -30, -40, -50],
];

#[rustfmt::skip]
const BISHOP_PST_BASE: Pst = [
    [-20, -10, -10, -10, -10, -10, -10, -20],
    [-10,   0,   0,   0,   0,   0,   0, -10],
    [-10,   0,   5,  10,  10,   5,   0, -10],
    [-10,   5,   5,  10,  10,   5,   5, -10],
    [-10,   0,  10,  10,  10,  10,   0, -10],
    [-10,  10,  10,  10,  10,  10,  10, -10],
    [-10,   5,   0,   0,   0,   0,   5, -10],
    [-20, -10, -10, -10, -10, -10, -10, -20],
];

#[rustfmt::skip]
const ROOK_PST_BASE: Pst = [
    [  0,   0,   0,   0,   0,   0,   0,   0],
    [  5,  10,  10,  10,  10,  10,  10,   5],
    [ -5,   0,   0,   0,   0,   0,   0,  -5],
    [ -5,   0,   0,   0,   0,   0,   0,  -5],
    [ -5,   0,   0,   0,   0,   0,   0,  -5],
    [ -5,   0,   0,   0,   0,   0,   0,  -5],
    [ -5,   0,   0,   0,   0,   0,   0,  -5],
    [  0,   0,   0,   5,   5,   0,   0,   0],
];

#[rustfmt::skip]
const QUEEN_PST_BASE: Pst = [
    [-20, -10, -10,  -5,  -5, -10, -10, -20],
    [-10,   0,   0,   0,   0,   0,   0, -10],
    [-10,   0,   5,   5,   5,   5,   0, -10],
    [ -5,   0,   5,   5,   5,   5,   0,  -5],
    [  0,   0,   5,   5,   5,   5,   0,  -5],
    [-10,   5,   5,   5,   5,   5,   0, -10],
    [-10,   0,   5,   0,   0,   0,   0, -10],
    [-20, -10, -10,  -5,  -5, -10, -10, -20],
];

#[rustfmt::skip]
const KING_PST_MIDDLEGAME: Pst = [
    [-30, -40, -40, -50, -50, -40, -40, -30],
    [-30, -40, -40, -50, -50, -40, -40, -30],
    [-30, -40, -40, -50, -50, -40, -40, -30],
    [-30, -40, -40, -50, -50, -40, -40, -30],
    [-20, -30, -30, -40, -40, -30, -30, -20],
    [-10, -20, -20, -20, -20, -20, -20, -10],
    [ 20,  20,   0,   0,   0,   0,  20,  20],
    [ 20,  30,  10,   0,   0,  10,  30,  20],
];

#[rustfmt::skip]
const KING_PST_ENDGAME: Pst = [
    [-50, -40, -30, -20, -20, -30, -40, -50],
    [-30, -20, -10,   0,   0, -10, -20, -30],
    [-30, -10,  20,  30,  30,  20, -10, -30],
    [-30, -10,  30,  40,  40,  30, -10, -30],
    [-30, -10,  30,  40,  40,  30, -10, -30],
    [-30, -10,  20,  30,  30,  20, -10, -30],
    [-30, -30,   0,   0,   0,   0, -30, -30],
    [-50, -30, -30, -30, -30, -30, -30, -50],
];

// White reads the tables bottom-up, Black reads them as written.
const WHITE_PAWN_PST: Pst = flip(&PAWN_PST_BASE);
const WHITE_KNIGHT_PST: Pst = flip(&KNIGHT_PST_BASE);
const WHITE_BISHOP_PST: Pst = flip(&BISHOP_PST_BASE);
const WHITE_ROOK_PST: Pst = flip(&ROOK_PST_BASE);
const WHITE_QUEEN_PST: Pst = flip(&QUEEN_PST_BASE);
const WHITE_KING_PST_MIDDLEGAME: Pst = flip(&KING_PST_MIDDLEGAME);
const WHITE_KING_PST_ENDGAME: Pst = flip(&KING_PST_ENDGAME);

fn table(color: Color, role: Role) -> (&'static Pst, &'static Pst) {
    match (color, role) {
        (Color::White, Role::Pawn) => (&WHITE_PAWN_PST, &WHITE_PAWN_PST),
        (Color::White, Role::Knight) => (&WHITE_KNIGHT_PST, &WHITE_KNIGHT_PST),
        (Color::White, Role::Bishop) => (&WHITE_BISHOP_PST, &WHITE_BISHOP_PST),
        (Color::White, Role::Rook) => (&WHITE_ROOK_PST, &WHITE_ROOK_PST),
        (Color::White, Role::Queen) => (&WHITE_QUEEN_PST, &WHITE_QUEEN_PST),
        (Color::White, Role::King) => (&WHITE_KING_PST_MIDDLEGAME, &WHITE_KING_PST_ENDGAME),
        (Color::Black, Role::Pawn) => (&PAWN_PST_BASE, &PAWN_PST_BASE),
        (Color::Black, Role::Knight) => (&KNIGHT_PST_BASE, &KNIGHT_PST_BASE),
        (Color::Black, Role::Bishop) => (&BISHOP_PST_BASE, &BISHOP_PST_BASE),
        (Color::Black, Role::Rook) => (&ROOK_PST_BASE, &ROOK_PST_BASE),
        (Color::Black, Role::Queen) => (&QUEEN_PST_BASE, &QUEEN_PST_BASE),
        (Color::Black, Role::King) => (&KING_PST_MIDDLEGAME, &KING_PST_ENDGAME),
    }
}

/// Positional bonus for a piece on `(rank, file)`.
///
/// Only the king has distinct middlegame and endgame tables; they are
/// blended by `phase` (0 = opening material, 1 = bare endgame).
pub fn score(color: Color, role: Role, rank: usize, file: usize, phase: f64) -> i32 {
    let (middlegame, endgame) = table(color, role);
    if role != Role::King {
        return middlegame[rank][file];
    }
    let mg = f64::from(middlegame[rank][file]);
    let eg = f64::from(endgame[rank][file]);
    (mg * (1.0 - phase) + eg * phase).round() as i32
}
