//! Footprint packing: deciding whether a genotype describes a legal plot, and making it
//! legal when it does not.
//!
//! - [`validate`] - Accepts or rejects a genotype (pure, order independent)
//! - [`repair`] / [`plan_repair`] - Shrinks offending footprints in a caller-chosen order
//! - [`VisitingOrder`] - The permutation of cells the repairer walks
//! - [`Square`] - Axis-aligned footprint box anchored at its top-left cell
//!
//! # Packing Rule
//!
//! Every cell names a crop whose square footprint would be anchored there. Scanning cells,
//! each footprint is checked against the squares already recorded on a 9×9 placement grid:
//!
//! 1. **Reject** when the box leaves the field past the right or bottom edge
//! 2. For each covered cell holding a recorded square that the new box does not contain:
//!    **Ignore** the new box if that square contains it (the gene sits inside an existing
//!    crop), otherwise **Reject** (partial overlap)
//! 3. Otherwise **Override**: record the new box over its whole footprint
//!
//! A genotype is feasible when a row-major scan never rejects. The recorded squares then
//! partition the field into non-overlapping footprints.
//!
//! # Design Decisions
//!
//! ## Substitution Instead of Random Replacement
//!
//! When the repairer has to shrink a footprint, it replaces the crop with the catalog entry
//! of the same perk and the largest edge that fits ([`CropId::substitute`]). Repair is
//! therefore a pure function of the genotype and the visiting order; all randomness comes
//! from the caller through [`VisitingOrder`].
//!
//! ## Early Return for Feasible Genotypes
//!
//! Walking a feasible genotype in an arbitrary order can visit a gene that lies inside a
//! larger footprint before that footprint is recorded and shrink it needlessly. Repair
//! therefore checks feasibility first and hands feasible genotypes back untouched, which
//! makes it idempotent for every order.
//!
//! [`CropId::substitute`]: crate::CropId::substitute

pub use self::{repair::*, square::*, visiting_order::*};

mod repair;
mod square;
mod visiting_order;
