use gadantic_engine::validate;

use crate::{command::GenotypeArg, util};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ValidateArg {
    #[clap(flatten)]
    genotype: GenotypeArg,
}

pub(crate) fn run(arg: &ValidateArg) -> anyhow::Result<()> {
    let ValidateArg { genotype } = arg;

    let genotype = util::read_genotype_file(&genotype.genotype)?;
    // Infeasibility is a verdict, not a failure.
    if validate(&genotype) {
        println!("valid");
    } else {
        println!("invalid");
    }
    Ok(())
}
