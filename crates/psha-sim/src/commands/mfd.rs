use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use psha_hazard::load_config;
use psha_source::{MagnitudeBin, MagnitudeFrequencyModel};
use serde::Serialize;

#[derive(Args, Debug)]
pub struct MfdArgs {
    /// YAML configuration to read the recurrence parameters from.
    #[arg(long)]
    pub config: PathBuf,
}

#[derive(Serialize)]
struct MfdSummary<'a> {
    source_rate: f64,
    bins: &'a [MagnitudeBin],
    annual_rates: Vec<f64>,
}

/// Prints the discretized recurrence as pretty JSON on stdout.
pub fn run(args: &MfdArgs) -> Result<(), Box<dyn Error>> {
    let inputs = load_config(&args.config)?.to_inputs()?;
    let mfd = MagnitudeFrequencyModel::doubly_bounded(inputs.recurrence)?;
    let summary = MfdSummary {
        source_rate: mfd.source_rate,
        bins: &mfd.bins,
        annual_rates: mfd.bin_rates(),
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
