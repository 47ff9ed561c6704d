// --- Piece values ---
pub const PAWN_VALUE: i32 = 100;
pub const KNIGHT_VALUE: i32 = 320;
pub const BISHOP_VALUE: i32 = 330;
pub const ROOK_VALUE: i32 = 500;
pub const QUEEN_VALUE: i32 = 900;

// Non-pawn, non-king material of both sides in the starting position
pub const TOTAL_PHASE_MATERIAL: i32 =
    2 * (2 * ROOK_VALUE + 2 * KNIGHT_VALUE + 2 * BISHOP_VALUE + QUEEN_VALUE);

// Bishop Evaluation
pub const BISHOP_PAIR_BONUS: i32 = 30;

// Pawn Structure Evaluation
pub const DOUBLED_PAWN_PENALTY: i32 = 20;
pub const ISOLATED_PAWN_PENALTY: i32 = 15;

// Rook Evaluation
pub const ROOK_OPEN_FILE_BONUS: i32 = 20;
pub const ROOK_SEMI_OPEN_FILE_BONUS: i32 = 10;

// King Safety Evaluation
pub const KING_SAFETY_PHASE_LIMIT: f64 = 0.7;
pub const KING_SHIELD_PAWN_BONUS: i32 = 10;
pub const KING_SHIELD_MISSING_PENALTY: i32 = 15;
pub const KING_FILE_ENEMY_PAWN_PENALTY: i32 = 20;
pub const KING_EXPOSED_CENTER_PENALTY: i32 = 30;

// Mobility Evaluation
pub const MOBILITY_BONUS: i32 = 2;
pub const CHECK_PENALTY: i32 = 25;

// Move Ordering
pub const TT_MOVE_BONUS: i32 = 10_000;
pub const CAPTURE_BONUS: i32 = 1_000;
pub const PROMOTION_BONUS: i32 = 900;
pub const FIRST_KILLER_BONUS: i32 = 800;
pub const SECOND_KILLER_BONUS: i32 = 700;
pub const MAX_PLY: usize = 64;

// Quick Move
pub const QUICK_MATE_BONUS: i32 = 100_000;
pub const QUICK_CHECK_BONUS: i32 = 50;
pub const QUICK_CENTER_BONUS: i32 = 30;
pub const QUICK_EXTENDED_CENTER_BONUS: i32 = 10;
pub const QUICK_DEVELOPMENT_BONUS: i32 = 20;
pub const QUICK_CASTLE_BONUS: i32 = 40;

// Search
pub const INFINITY: i32 = 1_000_000;
pub const MATE_SCORE: i32 = 900_000;
// Scores at least this large mean a forced mate was found
pub const MATE_THRESHOLD: i32 = MATE_SCORE - 100;
