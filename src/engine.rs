//! Core board representation for the queens placement puzzle.
//!
//! This module defines the puzzle's fundamental components:
//! - `Placement`: The full board state, one row index per column. A queen
//!   may share a row or diagonal with another; that is exactly what the
//!   solvers minimize.
//! - `threatens`: The row/diagonal threat predicate between two squares.
//! - Board-size bounds used by interactive hosts when resizing the board.
use rand::Rng;
use std::fmt;
use thiserror::Error;

/// Smallest board size a host should offer.
pub const MIN_BOARD_SIZE: usize = 4;

/// Largest board size a host should offer.
pub const MAX_BOARD_SIZE: usize = 18;

/// Errors produced when constructing or parsing a `Placement`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlacementError {
    /// The placement contained no columns at all.
    #[error("placement is empty")]
    Empty,

    /// A row index was not inside `[0, size)` for the placement's size.
    #[error("row {row} in column {col} is out of range for board size {size}")]
    RowOutOfRange {
        /// Column holding the offending entry.
        col: usize,
        /// The out-of-range row index.
        row: usize,
        /// Board size the placement was constructed with.
        size: usize,
    },

    /// A textual placement contained a token that is not a row index.
    #[error("unrecognized token '{token}' at position {index}")]
    InvalidToken {
        /// The token that failed to parse.
        token: String,
        /// Zero-based position of the token in the input.
        index: usize,
    },
}

/// Returns `true` if queens on squares `a` and `b` threaten each other.
///
/// Squares are `(column, row)` pairs. Two queens threaten each other when
/// they share a row or sit on a common diagonal (equal absolute column and
/// row deltas). A square never threatens itself, and two squares in the same
/// column never threaten each other; column conflicts cannot arise because a
/// placement holds exactly one queen per column.
///
/// # Examples
/// ```
/// use queens_solver::engine::threatens;
/// assert!(threatens((0, 2), (5, 2))); // shared row
/// assert!(threatens((1, 1), (3, 3))); // shared diagonal
/// assert!(!threatens((2, 4), (2, 4))); // identical square
/// assert!(!threatens((0, 1), (2, 2)));
/// ```
pub fn threatens(a: (usize, usize), b: (usize, usize)) -> bool {
    if a == b {
        return false;
    }
    let col_delta = (a.0 as i64 - b.0 as i64).abs();
    let row_delta = (a.1 as i64 - b.1 as i64).abs();
    a.1 == b.1 || col_delta == row_delta
}

/// The full board state: one queen per column, identified by its row.
///
/// A placement is validated once at construction and immutable afterwards;
/// a "move" always produces a fresh placement via [`Placement::with_queen_moved`].
/// The value derives `Hash` and `Eq`, so a placement is its own canonical
/// deduplication key in visited/tabu sets (injective over distinct
/// placements, independent of any heuristic score).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Placement {
    rows: Vec<usize>,
}

impl Placement {
    /// Creates a placement from one row index per column.
    ///
    /// # Arguments
    /// * `rows`: Row occupied by the queen in each column, in column order.
    ///
    /// # Returns
    /// * `Ok(Placement)` when `rows` is non-empty and every entry is below
    ///   the board size (which equals `rows.len()`).
    /// * `Err(PlacementError)` otherwise.
    ///
    /// # Examples
    /// ```
    /// use queens_solver::engine::Placement;
    /// let placement = Placement::new(vec![1, 3, 0, 2]).unwrap();
    /// assert_eq!(placement.size(), 4);
    /// assert!(Placement::new(vec![]).is_err());
    /// assert!(Placement::new(vec![0, 4, 1, 2]).is_err());
    /// ```
    pub fn new(rows: Vec<usize>) -> Result<Self, PlacementError> {
        if rows.is_empty() {
            return Err(PlacementError::Empty);
        }
        let size = rows.len();
        for (col, &row) in rows.iter().enumerate() {
            if row >= size {
                return Err(PlacementError::RowOutOfRange { col, row, size });
            }
        }
        Ok(Placement { rows })
    }

    /// Creates a placement with a uniformly random row for each column.
    ///
    /// The random source is injected so callers can fix the seed for
    /// reproducible boards.
    ///
    /// # Panics
    /// Panics if `size` is zero.
    pub fn random(size: usize, rng: &mut impl Rng) -> Self {
        assert!(size > 0, "board size must be at least 1");
        let rows = (0..size).map(|_| rng.gen_range(0..size)).collect();
        Placement { rows }
    }

    /// Returns the board size (number of columns, equal to the number of rows).
    pub fn size(&self) -> usize {
        self.rows.len()
    }

    /// Returns the row occupied by the queen in column `col`.
    ///
    /// # Panics
    /// Panics if `col` is outside the board.
    pub fn row(&self, col: usize) -> usize {
        self.rows[col]
    }

    /// Returns the row of every queen, in column order.
    pub fn rows(&self) -> &[usize] {
        &self.rows
    }

    /// Returns the `(column, row)` square of the queen in column `col`.
    ///
    /// # Panics
    /// Panics if `col` is outside the board.
    pub fn queen(&self, col: usize) -> (usize, usize) {
        (col, self.rows[col])
    }

    /// Returns a copy of this placement with column `col`'s queen moved to `row`.
    ///
    /// The receiver is left untouched; parent and child states never alias.
    ///
    /// # Panics
    /// Panics if `col` or `row` is outside the board.
    pub fn with_queen_moved(&self, col: usize, row: usize) -> Self {
        assert!(col < self.size(), "column {} outside board of size {}", col, self.size());
        assert!(row < self.size(), "row {} outside board of size {}", row, self.size());
        let mut rows = self.rows.clone();
        rows[col] = row;
        Placement { rows }
    }
}

impl fmt::Display for Placement {
    /// Renders the board as a character grid, row 0 at the top, with `Q`
    /// marking queens.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let size = self.size();
        for row in 0..size {
            for col in 0..size {
                let mark = if self.rows[col] == row { 'Q' } else { '.' };
                f.write_fmt(format_args!("{} ", mark))?;
            }
            if row < size - 1 {
                f.write_str("\n")?;
            }
        }
        Ok(())
    }
}
