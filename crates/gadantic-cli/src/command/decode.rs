use std::fmt;

use anyhow::Context as _;
use gadantic_engine::{CROP_COUNT, FIELD_CELLS, Perk};
use gadantic_evaluator::plot::{Plot, legend, try_decode};

use crate::{command::GenotypeArg, util};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct DecodeArg {
    #[clap(flatten)]
    genotype: GenotypeArg,
}

pub(crate) fn run(arg: &DecodeArg) -> anyhow::Result<()> {
    let DecodeArg { genotype } = arg;

    let genotype = util::read_genotype_file(&genotype.genotype)?;
    let plot = try_decode(&genotype)
        .context("Cannot decode genotype; run `gadantic repair` on it first")?;

    println!("{plot}");
    println!("{}", legend());
    println!();
    print!("{}", MetricsPrinter(&plot));
    println!();
    println!("{}", plot.layout_url());
    Ok(())
}

struct MetricsPrinter<'a>(&'a Plot);

impl fmt::Display for MetricsPrinter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self(plot) = self;
        let summary = plot.summary();
        for (perk, coverage) in Perk::ALL.iter().zip([
            summary.water,
            summary.weed,
            summary.quality,
            summary.harvest,
        ]) {
            writeln!(
                f,
                "{:<12} {:>2}/{FIELD_CELLS} ({:>3}%)",
                format!("{perk}:"),
                coverage.count,
                coverage.percent
            )?;
        }
        writeln!(
            f,
            "{:<12} {:>2}/{CROP_COUNT} ({:>3}%)",
            "distinct:", summary.distinct.count, summary.distinct.percent
        )?;
        writeln!(f, "{:<12} {:.3}", "efficiency:", summary.efficiency)?;
        writeln!(
            f,
            "{:<12} h={:.3} v={:.3} r={:.3}",
            "symmetry:",
            summary.symmetry.horizontal,
            summary.symmetry.vertical,
            summary.symmetry.rotational
        )?;
        Ok(())
    }
}
