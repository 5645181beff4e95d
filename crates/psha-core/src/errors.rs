//! Structured error types shared across PSHA crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Pipeline stage that detected a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Great-circle primitives and coordinate parsing.
    Geodesy,
    /// Fault characterization.
    Fault,
    /// Magnitude-frequency distribution.
    Mfd,
    /// Magnitude-area scaling and rupture length derivation.
    Scaling,
    /// Rupture mesh generation.
    Mesh,
    /// Source-to-site distance evaluation.
    Distance,
    /// Ground-motion prediction.
    Gmm,
    /// Hazard integration.
    Hazard,
    /// Configuration loading and validation.
    Config,
    /// Artifact export.
    Export,
}

impl Stage {
    /// Returns the stable lowercase label of the stage.
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Geodesy => "geodesy",
            Stage::Fault => "fault",
            Stage::Mfd => "mfd",
            Stage::Scaling => "scaling",
            Stage::Mesh => "mesh",
            Stage::Distance => "distance",
            Stage::Gmm => "gmm",
            Stage::Hazard => "hazard",
            Stage::Config => "config",
            Stage::Export => "export",
        }
    }
}

impl Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured payload attached to every [`PshaError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Stage of the pipeline that raised the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<Stage>,
    /// Contextual key value pairs (offending values, indices, etc.).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            stage: None,
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Records the stage that detected the error.
    pub fn at(mut self, stage: Stage) -> Self {
        self.stage = Some(stage);
        self
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.context.insert(key.into(), value.to_string());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for the PSHA engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum PshaError {
    /// Invalid or out-of-domain input.
    #[error("configuration error: {0}")]
    Configuration(ErrorInfo),
    /// Degenerate geometry (coincident points, zero width or length).
    #[error("domain error: {0}")]
    Domain(ErrorInfo),
    /// A statistical function would receive a non-positive or non-finite argument.
    #[error("numeric error: {0}")]
    Numeric(ErrorInfo),
    /// Serialization, I/O and export errors.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(stage) = &self.stage {
            write!(f, "[{stage}] ")?;
        }
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

impl PshaError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            PshaError::Configuration(info)
            | PshaError::Domain(info)
            | PshaError::Numeric(info)
            | PshaError::Serde(info) => info,
        }
    }

    /// Returns the stage that raised the error, when recorded.
    pub fn stage(&self) -> Option<Stage> {
        self.info().stage
    }

    /// Shorthand for a configuration error raised at `stage`.
    pub fn configuration(stage: Stage, code: &str, message: impl Into<String>) -> Self {
        PshaError::Configuration(ErrorInfo::new(code, message).at(stage))
    }

    /// Shorthand for a domain error raised at `stage`.
    pub fn domain(stage: Stage, code: &str, message: impl Into<String>) -> Self {
        PshaError::Domain(ErrorInfo::new(code, message).at(stage))
    }

    /// Shorthand for a numeric error raised at `stage`.
    pub fn numeric(stage: Stage, code: &str, message: impl Into<String>) -> Self {
        PshaError::Numeric(ErrorInfo::new(code, message).at(stage))
    }
}
