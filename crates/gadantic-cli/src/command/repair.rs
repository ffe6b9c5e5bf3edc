use std::path::PathBuf;

use gadantic_engine::{
    FIELD_HEIGHT, FIELD_WIDTH, OrderSeed, Position, VisitingOrder, apply_repair, plan_repair,
};

use crate::{
    command::GenotypeArg,
    util::{self, Output},
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct RepairArg {
    #[clap(flatten)]
    genotype: GenotypeArg,
    /// Seed of the random visiting order (32 hex digits); drawn at random when omitted
    #[arg(long, conflicts_with = "priority")]
    seed: Option<OrderSeed>,
    /// Cells to visit first, as `x,y`; the rest follow in row-major order
    #[arg(long, num_args = 1.., value_parser = parse_position)]
    priority: Vec<Position>,
    /// Output file path for the repaired genotype
    #[arg(long)]
    output: Option<PathBuf>,
}

fn parse_position(s: &str) -> Result<Position, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected `x,y`, got `{s}`"))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<usize>()
            .map_err(|e| format!("invalid coordinate `{v}`: {e}"))
    };
    Ok(Position::new(parse(x)?, parse(y)?))
}

pub(crate) fn run(arg: &RepairArg) -> anyhow::Result<()> {
    let RepairArg {
        genotype,
        seed,
        priority,
        output,
    } = arg;

    let genotype = util::read_genotype_file(&genotype.genotype)?;
    let order = visiting_order(*seed, priority);

    let substitutions = plan_repair(&genotype, &order);
    if substitutions.is_empty() {
        eprintln!("Genotype is already feasible");
    } else {
        eprintln!("Substituted {} crops:", substitutions.len());
        for substitution in &substitutions {
            eprintln!("  {substitution}");
        }
    }
    let repaired = apply_repair(&genotype, &substitutions);

    Output::save_json(&repaired, output.as_deref())?;
    Ok(())
}

fn visiting_order(seed: Option<OrderSeed>, priority: &[Position]) -> VisitingOrder {
    if !priority.is_empty() {
        for pos in priority {
            if pos.x >= FIELD_WIDTH || pos.y >= FIELD_HEIGHT {
                eprintln!("Ignoring priority cell outside the field: {pos}");
            }
        }
        tracing::debug!(count = priority.len(), "visiting priority cells first");
        return VisitingOrder::prioritized(priority);
    }
    let seed = seed.unwrap_or_else(rand::random);
    eprintln!("Visiting order seed: {seed}");
    VisitingOrder::from_seed(seed)
}
