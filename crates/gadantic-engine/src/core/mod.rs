pub use self::{crop::*, genotype::*, grid::*};

pub(crate) mod crop;
pub(crate) mod genotype;
pub(crate) mod grid;

/// Width of the garden field in cells.
pub const FIELD_WIDTH: usize = 9;
/// Height of the garden field in cells.
pub const FIELD_HEIGHT: usize = 9;
/// Total number of cells (and genes) in the garden field.
pub const FIELD_CELLS: usize = FIELD_WIDTH * FIELD_HEIGHT;
