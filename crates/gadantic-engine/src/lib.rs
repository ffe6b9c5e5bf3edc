//! Packing engine for 9×9 garden plots.
//!
//! This crate holds the data model and the constraint logic shared by every other part of
//! the workspace:
//!
//! - [`core`] - The crop catalog ([`CropId`], [`Perk`]), the generic [`Grid`] container and
//!   the [`Genotype`] encoding (one crop id per cell, row-major)
//! - [`placement`] - The placement validator ([`validate`]) and the order-dependent
//!   repairer ([`repair`]) that shrinks overlapping or overflowing footprints
//!
//! # Example
//!
//! ```
//! use gadantic_engine::{Genotype, VisitingOrder, repair, validate};
//! use rand::SeedableRng as _;
//! use rand_pcg::Pcg32;
//!
//! let mut rng = Pcg32::seed_from_u64(42);
//! let candidate = Genotype::random(&mut rng);
//!
//! let order = VisitingOrder::shuffled(&mut rng);
//! let feasible = repair(&candidate, &order);
//! assert!(validate(&feasible));
//! ```

pub use self::{core::*, placement::*};

pub mod core;
pub mod placement;

/// Error returned when raw integers do not form a well-formed genotype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum GenotypeError {
    #[display("genotype must contain exactly {expected} genes, got {actual}")]
    WrongLength { expected: usize, actual: usize },
    #[display("gene at index {index} holds crop id {value}, expected a value in [0, {limit})")]
    CropOutOfRange {
        index: usize,
        value: usize,
        limit: usize,
    },
}

/// Error returned when a crop table breaks the catalog invariants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum CatalogError {
    #[display("no crop with footprint edge 1 provides the {_0} perk")]
    MissingUnitCrop(#[error(not(source))] Perk),
    #[display("crop {name} has unsupported footprint edge {edge}")]
    InvalidEdge { name: &'static str, edge: usize },
}
