#![allow(dead_code)]

use std::path::PathBuf;

use psha_hazard::{HazardConfig, HazardInputs};

pub fn fixture_path(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join(relative)
}

pub fn reference_inputs() -> HazardInputs {
    HazardConfig::default().to_inputs().unwrap()
}
