use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Args;
use psha_hazard::HazardConfig;

#[derive(Args, Debug)]
pub struct TemplateArgs {
    /// Destination of the YAML configuration.
    #[arg(long)]
    pub out: PathBuf,
}

pub fn run(args: &TemplateArgs) -> Result<(), Box<dyn Error>> {
    if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(&args.out, HazardConfig::default().to_yaml_string()?)?;
    Ok(())
}
