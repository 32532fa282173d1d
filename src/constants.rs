//! Board geometry and square encoding.
//!
//! The board is stored as a 1D array with one ring of padding around the
//! 8x8 playing area. Padding squares hold [`OUT`], so a ray walk stops at
//! the edge without any explicit bounds check.

// =============================================================================
// Board Geometry
// =============================================================================

/// Playable board size (NxN).
pub const N: usize = 8;

/// Board width including the padding column on each side.
pub const W: usize = N + 2;

/// Total board array size including all padding.
pub const BOARDSIZE: usize = W * W;

/// Number of playable squares.
pub const NUM_SQUARES: usize = N * N;

// =============================================================================
// Ray Offsets
// =============================================================================

/// Offsets to the eight neighbouring squares in the 1D board array.
/// Order: North, NE, East, SE, South, SW, West, NW
pub const DELTA: [isize; 8] = [
    -(W as isize),     // North (up one row)
    -(W as isize) + 1, // NE
    1,                 // East
    (W as isize) + 1,  // SE
    W as isize,        // South (down one row)
    (W as isize) - 1,  // SW
    -1,                // West
    -(W as isize) - 1, // NW
];

// =============================================================================
// Square Encoding
// =============================================================================

/// Black piece.
pub const BLACK: u8 = b'b';

/// White piece.
pub const WHITE: u8 = b'w';

/// Empty square.
pub const EMPTY: u8 = b'-';

/// Out of bounds (padding).
pub const OUT: u8 = b'*';
