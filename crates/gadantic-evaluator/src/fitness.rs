//! Fitness: collapsing a plot into one comparable number.
//!
//! # Formula
//!
//! ```text
//! fitness = Σ(wᵢ × scoreᵢ) / Σwᵢ
//!
//! where the scores, each in [0, 1], are:
//!   water, weed, quality, harvest = coverage(perk) / 81
//!   unique                        = distinct crop kinds / 15
//!   efficiency                    = threshold crossings / (4 × tiles)
//!   *_symmetry                    = symmetry ratios
//! ```
//!
//! The result is a weighted mean and therefore also lies in \[0, 1\]. A zero weight disables
//! its term; when every weight is zero the fitness is `0.0`.
//!
//! # Configuration
//!
//! [`FitnessWeights`] is a plain serde value. Missing fields take their defaults (1.0 for
//! coverage, unique and efficiency, 0.0 for the symmetry terms), so a weights file only
//! needs the fields it changes:
//!
//! ```
//! use gadantic_evaluator::fitness::FitnessWeights;
//!
//! let weights: FitnessWeights = serde_json::from_str(r#"{ "rotational_symmetry": 0.5 }"#)?;
//! assert!((weights.water - 1.0).abs() < f64::EPSILON);
//! assert!((weights.rotational_symmetry - 0.5).abs() < f64::EPSILON);
//! # Ok::<(), serde_json::Error>(())
//! ```

use std::fmt;

use gadantic_engine::{Genotype, Perk};
use serde::{Deserialize, Serialize};

use crate::plot::{DecodeError, Plot, decode, try_decode};

/// Relative importance of each fitness term.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitnessWeights {
    pub water: f64,
    pub weed: f64,
    pub quality: f64,
    pub harvest: f64,
    pub unique: f64,
    pub efficiency: f64,
    pub horizontal_symmetry: f64,
    pub vertical_symmetry: f64,
    pub rotational_symmetry: f64,
}

impl Default for FitnessWeights {
    fn default() -> Self {
        Self {
            water: 1.0,
            weed: 1.0,
            quality: 1.0,
            harvest: 1.0,
            unique: 1.0,
            efficiency: 1.0,
            horizontal_symmetry: 0.0,
            vertical_symmetry: 0.0,
            rotational_symmetry: 0.0,
        }
    }
}

/// Error returned by [`FitnessWeights::validate`].
#[derive(Debug, Clone, Copy, PartialEq, derive_more::Display, derive_more::Error)]
pub enum WeightsError {
    #[display("weight `{name}` must not be negative, got {value}")]
    Negative { name: &'static str, value: f64 },
    #[display("weight `{name}` must be finite, got {value}")]
    NonFinite { name: &'static str, value: f64 },
}

impl FitnessWeights {
    fn named(&self) -> [(&'static str, f64); 9] {
        [
            ("water", self.water),
            ("weed", self.weed),
            ("quality", self.quality),
            ("harvest", self.harvest),
            ("unique", self.unique),
            ("efficiency", self.efficiency),
            ("horizontal_symmetry", self.horizontal_symmetry),
            ("vertical_symmetry", self.vertical_symmetry),
            ("rotational_symmetry", self.rotational_symmetry),
        ]
    }

    /// Checks that every weight is finite and non-negative.
    pub fn validate(&self) -> Result<(), WeightsError> {
        for (name, value) in self.named() {
            if !value.is_finite() {
                return Err(WeightsError::NonFinite { name, value });
            }
            if value < 0.0 {
                return Err(WeightsError::Negative { name, value });
            }
        }
        Ok(())
    }

    /// Sum of all weights.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.named().iter().map(|(_, value)| value).sum()
    }
}

/// Normalized scores in the same order as [`FitnessWeights::named`].
fn scores(plot: &Plot) -> [f64; 9] {
    let symmetry = plot.symmetry();
    [
        plot.coverage_ratio(Perk::Water),
        plot.coverage_ratio(Perk::Weed),
        plot.coverage_ratio(Perk::Quality),
        plot.coverage_ratio(Perk::Harvest),
        plot.diversity(),
        plot.efficiency(),
        symmetry.horizontal,
        symmetry.vertical,
        symmetry.rotational,
    ]
}

/// Weighted mean of the plot's normalized scores.
///
/// `weights` are expected to have passed [`FitnessWeights::validate`].
#[must_use]
pub fn fitness(plot: &Plot, weights: &FitnessWeights) -> f64 {
    let total = weights.total();
    if total <= 0.0 {
        return 0.0;
    }
    let weighted: f64 = weights
        .named()
        .iter()
        .zip(scores(plot))
        .map(|((_, weight), score)| weight * score)
        .sum();
    weighted / total
}

/// Scores genotypes for the search loop.
pub trait GenotypeEvaluator: fmt::Debug + Send + Sync {
    /// Scores a feasible genotype (higher is better).
    fn evaluate(&self, genotype: &Genotype) -> f64;
}

/// Decodes genotypes and scores them with validated weights.
#[derive(Debug, Clone)]
pub struct PlotEvaluator {
    weights: FitnessWeights,
}

impl PlotEvaluator {
    pub fn new(weights: FitnessWeights) -> Result<Self, WeightsError> {
        weights.validate()?;
        Ok(Self { weights })
    }

    #[must_use]
    pub fn weights(&self) -> &FitnessWeights {
        &self.weights
    }

    #[must_use]
    pub fn evaluate_plot(&self, plot: &Plot) -> f64 {
        fitness(plot, &self.weights)
    }

    /// Like [`GenotypeEvaluator::evaluate`], but fails instead of panicking on an infeasible
    /// genotype.
    pub fn try_evaluate(&self, genotype: &Genotype) -> Result<f64, DecodeError> {
        Ok(self.evaluate_plot(&try_decode(genotype)?))
    }
}

impl GenotypeEvaluator for PlotEvaluator {
    /// # Panics
    ///
    /// Panics if the genotype is infeasible, see [`decode`].
    fn evaluate(&self, genotype: &Genotype) -> f64 {
        self.evaluate_plot(&decode(genotype))
    }
}
