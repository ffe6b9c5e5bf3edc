use std::path::PathBuf;

use clap::{Parser, Subcommand};

use self::{
    decode::DecodeArg, evaluate::EvaluateArg, repair::RepairArg, validate::ValidateArg,
};

mod decode;
mod evaluate;
mod repair;
mod validate;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What to do with the genotype
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Check whether a genotype places without overlap or overflow
    Validate(#[clap(flatten)] ValidateArg),
    /// Shrink conflicting footprints until the genotype is feasible
    Repair(#[clap(flatten)] RepairArg),
    /// Draw a feasible genotype as a plot table
    Decode(#[clap(flatten)] DecodeArg),
    /// Score a feasible genotype and write a JSON report
    Evaluate(#[clap(flatten)] EvaluateArg),
}

/// Genotype source shared by every subcommand.
#[derive(Debug, Clone, clap::Args)]
pub(crate) struct GenotypeArg {
    /// Genotype JSON file (81 crop ids, row-major), or `-` for standard input
    #[arg(long, short = 'g')]
    genotype: PathBuf,
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Validate(arg) => validate::run(&arg)?,
        Mode::Repair(arg) => repair::run(&arg)?,
        Mode::Decode(arg) => decode::run(&arg)?,
        Mode::Evaluate(arg) => evaluate::run(&arg)?,
    }
    Ok(())
}
