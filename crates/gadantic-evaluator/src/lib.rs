//! Scoring of feasible garden plots.
//!
//! This crate turns a feasible [`Genotype`](gadantic_engine::Genotype) into something worth
//! comparing:
//!
//! 1. **Decoding** ([`plot`]) - Builds the placed tiles, propagates perk buffs between
//!    neighboring crops and aggregates coverage, diversity, efficiency and symmetry into an
//!    immutable [`Plot`](plot::Plot)
//! 2. **Fitness** ([`fitness`]) - Collapses a plot into one scalar using configurable
//!    [`FitnessWeights`](fitness::FitnessWeights)
//!
//! # Architecture
//!
//! ```text
//! Genotype (81 crop ids, feasible)
//!     ↓ plot::decode
//! Plot (tiles, perk counters, aggregates, layout string)
//!     ↓ fitness::fitness
//! f64 (weighted mean of normalized scores)
//! ```
//!
//! Feasibility is the engine's concern: run candidates through
//! [`repair`](gadantic_engine::repair) before decoding them.
//!
//! # Example
//!
//! ```
//! use gadantic_engine::{Genotype, VisitingOrder, repair};
//! use gadantic_evaluator::{
//!     fitness::{FitnessWeights, GenotypeEvaluator as _, PlotEvaluator},
//!     plot::decode,
//! };
//! use rand::SeedableRng as _;
//! use rand_pcg::Pcg32;
//!
//! let mut rng = Pcg32::seed_from_u64(1);
//! let genotype = repair(&Genotype::random(&mut rng), &VisitingOrder::shuffled(&mut rng));
//!
//! let plot = decode(&genotype);
//! println!("{plot}");
//! println!("{}", plot.layout_url());
//!
//! let evaluator = PlotEvaluator::new(FitnessWeights::default()).unwrap();
//! let fitness = evaluator.evaluate(&genotype);
//! assert!((0.0..=1.0).contains(&fitness));
//! ```

pub mod fitness;
pub mod plot;

#[cfg(test)]
mod test_fixtures;
