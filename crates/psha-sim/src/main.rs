//! Command-line driver for single-source hazard runs.

use std::error::Error;

use clap::{Parser, Subcommand};
use commands::{
    mfd::{self, MfdArgs},
    run::{self, RunArgs},
    template::{self, TemplateArgs},
};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser, Debug)]
#[command(name = "psha-sim", about = "Probabilistic seismic hazard for a single line source")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute the rupture table and hazard curve and write them to disk.
    Run(RunArgs),
    /// Write the default configuration as YAML.
    Template(TemplateArgs),
    /// Print the magnitude bins and source rate of a configuration.
    Mfd(MfdArgs),
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("warn,psha_sim=info,psha_hazard=info,psha_source=info,psha_gmm=info")
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<(), Box<dyn Error>> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Command::Run(args) => run::run(&args),
        Command::Template(args) => template::run(&args),
        Command::Mfd(args) => mfd::run(&args),
    }
}
