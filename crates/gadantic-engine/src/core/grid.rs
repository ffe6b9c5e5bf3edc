use std::fmt;

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use super::{FIELD_HEIGHT, FIELD_WIDTH};

/// A cell coordinate: `x` is the column, `y` the row (row 0 is the top).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    #[must_use]
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Row-major index of this position in a field of the standard width.
    #[must_use]
    pub const fn index(self) -> usize {
        self.y * FIELD_WIDTH + self.x
    }

    /// Inverse of [`Position::index`].
    #[must_use]
    pub const fn from_index(index: usize) -> Self {
        Self::new(index % FIELD_WIDTH, index / FIELD_WIDTH)
    }

    /// Returns the position shifted by `(dx, dy)`, or `None` if either coordinate would
    /// become negative.
    #[must_use]
    pub const fn offset(self, dx: isize, dy: isize) -> Option<Self> {
        match (self.x.checked_add_signed(dx), self.y.checked_add_signed(dy)) {
            (Some(x), Some(y)) => Some(Self::new(x, y)),
            _ => None,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Orthogonal neighbor offsets: north, south, west, east.
const NEIGHBOR_OFFSETS: [(isize, isize); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

/// Fixed-size two-dimensional container addressed by [`Position`].
///
/// Storage is a `H`-element array of `W`-element rows, so the size is part of the type
/// and every grid lives on the stack. Indexing out of bounds panics; use [`Grid::get`] or
/// [`Grid::contains`] when a position may fall outside.
///
/// # Example
///
/// ```
/// use gadantic_engine::{FieldGrid, Position};
///
/// let mut grid: FieldGrid<u8> = FieldGrid::filled(0);
/// grid.set(Position::new(2, 1), 7);
///
/// assert_eq!(*grid.at(Position::new(2, 1)), 7);
/// assert!(!grid.contains(Position::new(9, 0)));
/// assert_eq!(grid.iter().filter(|(_, v)| **v == 7).count(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T, const W: usize, const H: usize> {
    rows: [[T; W]; H],
}

/// The 9×9 garden field grid.
pub type FieldGrid<T> = Grid<T, FIELD_WIDTH, FIELD_HEIGHT>;

impl<T, const W: usize, const H: usize> Grid<T, W, H> {
    pub const WIDTH: usize = W;
    pub const HEIGHT: usize = H;

    /// Creates a grid by calling `f` for every position in row-major order.
    pub fn from_fn<F>(mut f: F) -> Self
    where
        F: FnMut(Position) -> T,
    {
        Self {
            rows: std::array::from_fn(|y| std::array::from_fn(|x| f(Position::new(x, y)))),
        }
    }

    /// Creates a grid with every cell set to `value`.
    pub fn filled(value: T) -> Self
    where
        T: Clone,
    {
        Self::from_fn(|_| value.clone())
    }

    #[must_use]
    pub const fn width(&self) -> usize {
        W
    }

    #[must_use]
    pub const fn height(&self) -> usize {
        H
    }

    /// Returns `true` if `pos` lies inside the grid.
    #[must_use]
    pub const fn contains(&self, pos: Position) -> bool {
        pos.x < W && pos.y < H
    }

    /// Returns the value at `pos`.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is outside the grid.
    #[must_use]
    pub fn at(&self, pos: Position) -> &T {
        &self.rows[pos.y][pos.x]
    }

    /// Returns the value at `pos`, or `None` if it is outside the grid.
    #[must_use]
    pub fn get(&self, pos: Position) -> Option<&T> {
        self.rows.get(pos.y).and_then(|row| row.get(pos.x))
    }

    /// Replaces the value at `pos`.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is outside the grid.
    pub fn set(&mut self, pos: Position, value: T) {
        self.rows[pos.y][pos.x] = value;
    }

    /// Returns the in-bounds orthogonal neighbors of `pos` (diagonals excluded).
    #[must_use]
    pub fn neighbors(&self, pos: Position) -> ArrayVec<Position, 4> {
        NEIGHBOR_OFFSETS
            .iter()
            .filter_map(|&(dx, dy)| pos.offset(dx, dy))
            .filter(|p| self.contains(*p))
            .collect()
    }

    /// Iterates over every `(position, value)` pair in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, &T)> + '_ {
        self.rows.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .map(move |(x, value)| (Position::new(x, y), value))
        })
    }

    /// Iterates over every position in row-major order.
    pub fn positions() -> impl Iterator<Item = Position> {
        (0..H).flat_map(|y| (0..W).map(move |x| Position::new(x, y)))
    }
}
