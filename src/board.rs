//! Othello board representation, legal-move generation and flip resolution.
//!
//! The grid is a 1D array with a ring of [`OUT`] padding (see
//! [`crate::constants`]). Legal moves and flips are both computed by the
//! same ray walk, so the two can never disagree about what a move does.
//!
//! Coordinates are 1-indexed `(row, col)` pairs in `1..=8`, which is also
//! how they map onto the padded array: `index = row * W + col`.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::constants::{BLACK, BOARDSIZE, DELTA, EMPTY, N, NUM_SQUARES, OUT, W, WHITE};
use crate::error::GameError;

/// A player colour.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Color {
    Black,
    White,
}

impl Color {
    /// Both colours, Black first.
    pub const ALL: [Color; 2] = [Color::Black, Color::White];

    pub fn opponent(self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    fn square(self) -> u8 {
        match self {
            Color::Black => BLACK,
            Color::White => WHITE,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => write!(f, "Black"),
            Color::White => write!(f, "White"),
        }
    }
}

/// Contents of one playable square.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Black,
    White,
}

impl Cell {
    /// The colour occupying this cell, if any.
    pub fn color(self) -> Option<Color> {
        match self {
            Cell::Empty => None,
            Cell::Black => Some(Color::Black),
            Cell::White => Some(Color::White),
        }
    }
}

impl From<Color> for Cell {
    fn from(color: Color) -> Self {
        match color {
            Color::Black => Cell::Black,
            Color::White => Cell::White,
        }
    }
}

/// A playable square, 1-indexed. Always on the board once constructed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    row: u8,
    col: u8,
}

impl Coord {
    /// Build a coordinate from raw row/column values.
    ///
    /// # Errors
    /// `GameError::InvalidPosition` if either value is outside `1..=8`.
    pub fn new(row: i64, col: i64) -> Result<Self, GameError> {
        let range = 1..=N as i64;
        if !range.contains(&row) || !range.contains(&col) {
            return Err(GameError::InvalidPosition { row, col });
        }
        Ok(Coord {
            row: row as u8,
            col: col as u8,
        })
    }

    pub fn row(self) -> u8 {
        self.row
    }

    pub fn col(self) -> u8 {
        self.col
    }

    /// Every playable square in row-major order.
    pub fn all() -> impl Iterator<Item = Coord> {
        (1..=N as u8).flat_map(|row| (1..=N as u8).map(move |col| Coord { row, col }))
    }

    /// Index into the padded board array.
    #[inline]
    fn point(self) -> usize {
        self.row as usize * W + self.col as usize
    }

    /// Inverse of [`Coord::point`]. Only valid for playable indices.
    #[inline]
    fn from_point(pt: usize) -> Coord {
        Coord {
            row: (pt / W) as u8,
            col: (pt % W) as u8,
        }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Parses `"4 3"`, `"4,3"` or `"(4, 3)"`.
impl FromStr for Coord {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse_error = || GameError::Parse(s.trim().to_string());
        let cleaned: String = s
            .chars()
            .map(|c| if matches!(c, ',' | '(' | ')') { ' ' } else { c })
            .collect();
        let parts: Vec<&str> = cleaned.split_whitespace().collect();
        let [row, col] = parts.as_slice() else {
            return Err(parse_error());
        };
        let row = row.parse::<i64>().map_err(|_| parse_error())?;
        let col = col.parse::<i64>().map_err(|_| parse_error())?;
        Coord::new(row, col)
    }
}

/// Characters used when rendering the board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Glyphs {
    pub black: char,
    pub white: char,
    pub empty: char,
}

impl Default for Glyphs {
    fn default() -> Self {
        Self {
            black: BLACK as char,
            white: WHITE as char,
            empty: EMPTY as char,
        }
    }
}

/// An Othello board.
///
/// Besides the padded grid, the board caches the set of squares held by
/// each colour. The caches are updated by every mutation and always match
/// the grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    /// Padded grid: `BLACK`, `WHITE`, `EMPTY`, or `OUT` for the border
    squares: [u8; BOARDSIZE],
    black: BTreeSet<Coord>,
    white: BTreeSet<Coord>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// A board in the standard opening position.
    pub fn new() -> Self {
        let mut board = Self::empty();
        board.reset();
        board
    }

    /// A board with no pieces at all.
    fn empty() -> Self {
        let mut board = Board {
            squares: [OUT; BOARDSIZE],
            black: BTreeSet::new(),
            white: BTreeSet::new(),
        };
        board.clear();
        board
    }

    /// Build a board holding exactly the given pieces.
    ///
    /// # Errors
    /// `GameError::Occupied` if a square is listed for both colours.
    pub fn with_pieces(black: &[Coord], white: &[Coord]) -> Result<Self, GameError> {
        let mut board = Self::empty();
        for &coord in black {
            board.place(Color::Black, coord);
        }
        for &coord in white {
            if board.cell(coord) == Cell::Black {
                return Err(GameError::Occupied(coord));
            }
            board.place(Color::White, coord);
        }
        Ok(board)
    }

    /// Reset to the opening position: d4 and e5 White, e4 and d5 Black.
    pub fn reset(&mut self) {
        self.clear();
        self.place(Color::White, Coord { row: 4, col: 4 });
        self.place(Color::White, Coord { row: 5, col: 5 });
        self.place(Color::Black, Coord { row: 4, col: 5 });
        self.place(Color::Black, Coord { row: 5, col: 4 });
    }

    fn clear(&mut self) {
        for (pt, sq) in self.squares.iter_mut().enumerate() {
            let (row, col) = (pt / W, pt % W);
            *sq = if (1..=N).contains(&row) && (1..=N).contains(&col) {
                EMPTY
            } else {
                OUT
            };
        }
        self.black.clear();
        self.white.clear();
    }

    /// Squares currently held by `color`.
    pub fn positions_of(&self, color: Color) -> &BTreeSet<Coord> {
        match color {
            Color::Black => &self.black,
            Color::White => &self.white,
        }
    }

    fn positions_mut(&mut self, color: Color) -> &mut BTreeSet<Coord> {
        match color {
            Color::Black => &mut self.black,
            Color::White => &mut self.white,
        }
    }

    pub fn cell(&self, coord: Coord) -> Cell {
        match self.squares[coord.point()] {
            BLACK => Cell::Black,
            WHITE => Cell::White,
            _ => Cell::Empty,
        }
    }

    /// Number of pieces `color` has on the board.
    pub fn count(&self, color: Color) -> usize {
        self.positions_of(color).len()
    }

    pub fn empty_cell_count(&self) -> usize {
        NUM_SQUARES - self.black.len() - self.white.len()
    }

    /// Walk from `start` along `delta` over a run of opponent pieces.
    ///
    /// Returns the square that ends the run together with the run itself,
    /// but only if the run holds at least one piece and the ending square
    /// holds `terminal`. `start` must be a playable square; the walk only
    /// advances over playable squares, so the border stops it.
    fn walk_ray(
        &self,
        start: usize,
        delta: isize,
        color: Color,
        terminal: u8,
    ) -> Option<(usize, Vec<usize>)> {
        let opp = color.opponent().square();
        let mut run = Vec::new();
        let mut pt = step(start, delta);
        while self.squares[pt] == opp {
            run.push(pt);
            pt = step(pt, delta);
        }
        (!run.is_empty() && self.squares[pt] == terminal).then_some((pt, run))
    }

    /// All squares where `color` can legally play.
    ///
    /// Empty both when `color` has no pieces and when none of its pieces
    /// bound an opponent run that ends in an empty square.
    pub fn legal_moves(&self, color: Color) -> BTreeSet<Coord> {
        self.positions_of(color)
            .iter()
            .flat_map(|&from| {
                DELTA
                    .into_iter()
                    .filter_map(move |d| self.walk_ray(from.point(), d, color, EMPTY))
            })
            .map(|(end, _)| Coord::from_point(end))
            .collect()
    }

    /// Opponent pieces that would flip if `color` played at `dest`.
    ///
    /// Computed against the current board, before any mutation. Runs are
    /// listed direction by direction, nearest piece first. Occupied
    /// destinations flip nothing.
    pub fn flips_for(&self, color: Color, dest: Coord) -> Vec<Coord> {
        let start = dest.point();
        if self.squares[start] != EMPTY {
            return Vec::new();
        }
        DELTA
            .into_iter()
            .filter_map(|d| self.walk_ray(start, d, color, color.square()))
            .flat_map(|(_, run)| run)
            .map(Coord::from_point)
            .collect()
    }

    /// Place a piece for `color` at `dest` and flip the captured runs.
    ///
    /// `dest` must be one of [`Board::legal_moves`] for `color`; this is not
    /// checked again here. Returns the flipped squares.
    pub fn apply_move(&mut self, color: Color, dest: Coord) -> Vec<Coord> {
        let flips = self.flips_for(color, dest);
        self.place(color, dest);
        for &coord in &flips {
            self.place(color, coord);
        }
        flips
    }

    /// Set a square to `color`, keeping both position caches in sync.
    fn place(&mut self, color: Color, coord: Coord) {
        self.squares[coord.point()] = color.square();
        self.positions_mut(color.opponent()).remove(&coord);
        self.positions_mut(color).insert(coord);
    }

    /// Render with custom glyphs.
    pub fn display_with<'a>(&'a self, glyphs: &'a Glyphs) -> BoardDisplay<'a> {
        BoardDisplay {
            board: self,
            glyphs,
        }
    }

    pub fn render_with(&self, glyphs: &Glyphs) -> String {
        self.display_with(glyphs).to_string()
    }

    /// Text snapshot of the grid with 1-indexed row and column headers.
    pub fn render(&self) -> String {
        self.render_with(&Glyphs::default())
    }
}

#[inline]
fn step(pt: usize, delta: isize) -> usize {
    (pt as isize + delta) as usize
}

/// Borrowed board plus the glyphs to draw it with.
pub struct BoardDisplay<'a> {
    board: &'a Board,
    glyphs: &'a Glyphs,
}

impl fmt::Display for BoardDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  ")?;
        for col in 1..=N {
            write!(f, " {col}")?;
        }
        writeln!(f)?;
        for row in 1..=N as u8 {
            write!(f, "{row} ")?;
            for col in 1..=N as u8 {
                let ch = match self.board.cell(Coord { row, col }) {
                    Cell::Black => self.glyphs.black,
                    Cell::White => self.glyphs.white,
                    Cell::Empty => self.glyphs.empty,
                };
                write!(f, "|{ch}")?;
            }
            writeln!(f, "|")?;
        }
        Ok(())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.display_with(&Glyphs::default()).fmt(f)
    }
}
