use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use psha_hazard::{load_config, run_hazard, write_artifacts, write_canonical_json};
use tracing::info;

#[derive(Args, Debug)]
pub struct RunArgs {
    /// YAML configuration; omitted fields take the reference defaults.
    #[arg(long)]
    pub config: PathBuf,
    /// Output directory for the rupture table, curve and report.
    #[arg(long)]
    pub out: PathBuf,
    /// Also write the scaling table used for the rupture lengths.
    #[arg(long)]
    pub keep_intermediate: bool,
}

/// Runs the full hazard computation and persists canonical artifacts.
pub fn run(args: &RunArgs) -> Result<(), Box<dyn Error>> {
    let config = load_config(&args.config)?;
    let inputs = config.to_inputs()?;
    let run = run_hazard(&inputs)?;
    let (paths, report) = write_artifacts(&args.out, &inputs, &run)?;
    if args.keep_intermediate {
        write_canonical_json(&run.scaling, &args.out.join("scaling.json"))?;
        write_canonical_json(&run.mfd, &args.out.join("mfd.json"))?;
    }

    info!(
        out = %args.out.display(),
        ruptures = report.rupture_count,
        input_hash = %report.provenance.input_hash,
        "hazard run complete"
    );
    println!("{}", paths.report_json.display());
    Ok(())
}
