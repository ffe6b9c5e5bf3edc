use std::path::PathBuf;

use anyhow::Context as _;
use gadantic_evaluator::{
    fitness::{FitnessWeights, PlotEvaluator},
    plot::{PlotSummary, try_decode},
};
use serde::Serialize;

use crate::{
    command::GenotypeArg,
    util::{self, Output},
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct EvaluateArg {
    #[clap(flatten)]
    genotype: GenotypeArg,
    /// Fitness weights JSON file; defaults apply to omitted fields
    #[arg(long)]
    weights: Option<PathBuf>,
    /// Output file path for the report
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct EvaluationReport {
    fitness: f64,
    weights: FitnessWeights,
    plot: PlotSummary,
}

pub(crate) fn run(arg: &EvaluateArg) -> anyhow::Result<()> {
    let EvaluateArg {
        genotype,
        weights,
        output,
    } = arg;

    let genotype = util::read_genotype_file(&genotype.genotype)?;
    let weights = match weights {
        Some(path) => util::read_weights_file(path)?,
        None => FitnessWeights::default(),
    };
    let evaluator = PlotEvaluator::new(weights).context("Invalid fitness weights")?;

    let plot = try_decode(&genotype)
        .context("Cannot evaluate genotype; run `gadantic repair` on it first")?;
    let report = EvaluationReport {
        fitness: evaluator.evaluate_plot(&plot),
        weights,
        plot: plot.summary(),
    };
    eprintln!("Fitness: {:.4}", report.fitness);

    Output::save_json(&report, output.as_deref())?;
    Ok(())
}
