use std::fmt;

use serde::Serialize;

use crate::{FIELD_HEIGHT, FIELD_WIDTH, FieldGrid, Genotype, Position};

/// Square footprint anchored at its top-left cell `(x0, y0)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Square {
    pub x0: usize,
    pub y0: usize,
    pub edge: usize,
}

impl Square {
    #[must_use]
    pub const fn new(origin: Position, edge: usize) -> Self {
        Self {
            x0: origin.x,
            y0: origin.y,
            edge,
        }
    }

    #[must_use]
    pub const fn origin(&self) -> Position {
        Position::new(self.x0, self.y0)
    }

    /// Exclusive right bound.
    #[must_use]
    pub const fn x1(&self) -> usize {
        self.x0 + self.edge
    }

    /// Exclusive bottom bound.
    #[must_use]
    pub const fn y1(&self) -> usize {
        self.y0 + self.edge
    }

    /// Same origin, different edge.
    #[must_use]
    pub const fn with_edge(&self, edge: usize) -> Self {
        Self { edge, ..*self }
    }

    /// Returns `true` if `other` lies entirely inside `self` (a square contains itself).
    #[must_use]
    pub const fn contains(&self, other: &Self) -> bool {
        other.x0 >= self.x0
            && other.y0 >= self.y0
            && other.x1() <= self.x1()
            && other.y1() <= self.y1()
    }

    /// Returns `true` if the square stays within the field.
    #[must_use]
    pub const fn fits(&self) -> bool {
        self.x1() <= FIELD_WIDTH && self.y1() <= FIELD_HEIGHT
    }

    /// Iterates over the covered cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Position> + use<> {
        let Self { x0, y0, edge } = *self;
        (y0..y0 + edge).flat_map(move |y| (x0..x0 + edge).map(move |x| Position::new(x, y)))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}@({}, {})", self.edge, self.edge, self.x0, self.y0)
    }
}

/// Outcome of checking a footprint against the recorded squares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum Check {
    /// The footprint is legal and should be recorded.
    Override,
    /// The footprint leaves the field or partially overlaps a recorded square.
    Reject,
    /// The footprint lies inside a recorded square; nothing to record.
    Ignore,
}

/// Per-cell record of the footprints accepted so far.
///
/// Every cell of a recorded square holds that square or a square containing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementGrid {
    cells: FieldGrid<Option<Square>>,
}

impl Default for PlacementGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl PlacementGrid {
    #[must_use]
    pub fn new() -> Self {
        Self {
            cells: FieldGrid::filled(None),
        }
    }

    /// Returns the square recorded at `pos`, if any.
    #[must_use]
    pub fn square_at(&self, pos: Position) -> Option<Square> {
        self.cells.get(pos).copied().flatten()
    }

    /// Checks `square` against the recorded squares without modifying the grid.
    #[must_use]
    pub fn check(&self, square: Square) -> Check {
        if !square.fits() {
            return Check::Reject;
        }
        for pos in square.cells() {
            let Some(current) = self.cells.at(pos) else {
                continue;
            };
            if !square.contains(current) {
                return if current.contains(&square) {
                    Check::Ignore
                } else {
                    Check::Reject
                };
            }
        }
        Check::Override
    }

    /// Records `square` over its footprint.
    ///
    /// # Panics
    ///
    /// Panics if `square` does not fit in the field.
    pub fn fill(&mut self, square: Square) {
        for pos in square.cells() {
            self.cells.set(pos, Some(square));
        }
    }

    /// Checks `square` and records it on [`Check::Override`].
    pub fn place(&mut self, square: Square) -> Check {
        let check = self.check(square);
        if check.is_override() {
            self.fill(square);
        }
        check
    }

    /// Shrinks `square` one edge step at a time until it is no longer rejected, recording
    /// the result on [`Check::Override`]. Returns the accepted square.
    ///
    /// A single cell is never rejected, so the result has edge 1 at worst.
    pub fn place_shrinking(&mut self, mut square: Square) -> Square {
        while square.edge > 1 && self.check(square).is_reject() {
            square = square.with_edge(square.edge - 1);
        }
        self.place(square);
        square
    }
}

/// Returns `true` if the genotype describes a legal plot.
///
/// Footprints are checked in row-major order; see the [module documentation](self) for the
/// packing rule.
///
/// # Example
///
/// ```
/// use gadantic_engine::{CropId, Genotype, Position, validate};
///
/// let mut genotype = Genotype::filled(CropId::TOMATOES);
/// genotype.set(Position::new(0, 0), CropId::APPLES);
/// assert!(validate(&genotype));
///
/// // An apple tree anchored two cells from the right edge overflows the field.
/// genotype.set(Position::new(7, 0), CropId::APPLES);
/// assert!(!validate(&genotype));
/// ```
#[must_use]
pub fn validate(genotype: &Genotype) -> bool {
    let mut grid = PlacementGrid::new();
    for (pos, crop) in genotype.iter() {
        let square = Square::new(pos, crop.edge());
        if grid.place(square).is_reject() {
            tracing::trace!(%square, crop = crop.name(), "genotype rejected");
            return false;
        }
    }
    tracing::trace!("genotype accepted");
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CropId;

    fn sq(x0: usize, y0: usize, edge: usize) -> Square {
        Square::new(Position::new(x0, y0), edge)
    }

    #[test]
    fn test_square_contains() {
        let big = sq(0, 0, 3);
        assert!(big.contains(&big));
        assert!(big.contains(&sq(1, 1, 2)));
        assert!(big.contains(&sq(2, 2, 1)));
        assert!(!big.contains(&sq(2, 2, 2)));
        assert!(!sq(1, 1, 2).contains(&big));
    }

    #[test]
    fn test_square_fits() {
        assert!(sq(6, 6, 3).fits());
        assert!(!sq(7, 6, 3).fits());
        assert!(!sq(6, 7, 3).fits());
        assert!(sq(8, 8, 1).fits());
    }

    #[test]
    fn test_square_cells() {
        let cells: Vec<_> = sq(3, 4, 2).cells().collect();
        assert_eq!(
            cells,
            vec![
                Position::new(3, 4),
                Position::new(4, 4),
                Position::new(3, 5),
                Position::new(4, 5),
            ]
        );
    }

    #[test]
    fn test_check_outcomes() {
        let mut grid = PlacementGrid::new();
        assert_eq!(grid.place(sq(0, 0, 2)), Check::Override);
        // inside the recorded square
        assert_eq!(grid.check(sq(1, 1, 1)), Check::Ignore);
        // partial overlap
        assert_eq!(grid.check(sq(1, 1, 2)), Check::Reject);
        // containing the recorded square
        assert_eq!(grid.check(sq(0, 0, 3)), Check::Override);
        // out of the field
        assert_eq!(grid.check(sq(8, 0, 2)), Check::Reject);
        assert_eq!(grid.square_at(Position::new(1, 1)), Some(sq(0, 0, 2)));
        assert_eq!(grid.square_at(Position::new(2, 2)), None);
    }

    #[test]
    fn test_place_shrinking_stops_at_first_fit() {
        let mut grid = PlacementGrid::new();
        grid.fill(sq(2, 2, 2));
        assert_eq!(grid.place_shrinking(sq(0, 0, 3)), sq(0, 0, 2));
        assert_eq!(grid.square_at(Position::new(1, 1)), Some(sq(0, 0, 2)));
        // Inside a recorded square, the first non-rejected edge is ignored.
        assert_eq!(grid.place_shrinking(sq(1, 1, 3)), sq(1, 1, 1));
        assert_eq!(grid.square_at(Position::new(1, 1)), Some(sq(0, 0, 2)));
    }

    #[test]
    fn test_validate_uniform_field() {
        for crop in [CropId::TOMATOES, CropId::RICE, CropId::CARROTS, CropId::COTTON] {
            assert!(validate(&Genotype::filled(crop)));
        }
    }

    #[test]
    fn test_validate_genes_inside_footprint_are_ignored() {
        let mut genotype = Genotype::filled(CropId::TOMATOES);
        genotype.set(Position::new(0, 0), CropId::APPLES);
        // a 2x2 crop fully inside the apple footprint
        genotype.set(Position::new(1, 1), CropId::PUMPKINS);
        assert!(validate(&genotype));
    }

    #[test]
    fn test_validate_rejects_partial_overlap() {
        let mut genotype = Genotype::filled(CropId::TOMATOES);
        genotype.set(Position::new(0, 0), CropId::PEPPERS);
        genotype.set(Position::new(1, 1), CropId::PUMPKINS);
        assert!(!validate(&genotype));

        let mut genotype = Genotype::filled(CropId::TOMATOES);
        genotype.set(Position::new(1, 0), CropId::BLUEBERRIES);
        genotype.set(Position::new(0, 1), CropId::BEANS);
        assert!(!validate(&genotype));
    }

    #[test]
    fn test_validate_rejects_overflow() {
        let mut genotype = Genotype::filled(CropId::POTATOES);
        genotype.set(Position::new(8, 3), CropId::BLUEBERRIES);
        assert!(!validate(&genotype));

        let mut genotype = Genotype::filled(CropId::POTATOES);
        genotype.set(Position::new(3, 8), CropId::PEPPERS);
        assert!(!validate(&genotype));

        let mut genotype = Genotype::filled(CropId::POTATOES);
        genotype.set(Position::new(6, 6), CropId::APPLES);
        assert!(validate(&genotype));
    }

    #[test]
    fn test_validate_tiled_apples() {
        let mut genotype = Genotype::filled(CropId::WHEAT);
        for y in [0, 3, 6] {
            for x in [0, 3, 6] {
                genotype.set(Position::new(x, y), CropId::APPLES);
            }
        }
        assert!(validate(&genotype));
    }
}
