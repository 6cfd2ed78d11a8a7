//! Report generation for compatibility diff results.
//!
//! Two output formats:
//! - JSON: structured data for programmatic integration
//! - Text: human-readable terminal output grouped by severity
//!
//! Reporters are pure string producers; the caller decides where the
//! output goes.

mod json;
mod text;

pub use json::JsonReporter;
pub use text::TextReporter;

use crate::diff::{CompatibilityIssue, IncompatibilityScore, SeverityScores};
use crate::error::Result;
use crate::model::ApiModel;

/// Output format selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ReportFormat {
    Json,
    Text,
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Text => write!(f, "text"),
        }
    }
}

/// File paths and scoring context threaded into every report.
#[derive(Debug, Clone, Default)]
pub struct ReportContext {
    pub old_snapshot_path: Option<String>,
    pub new_snapshot_path: Option<String>,
    /// Score table in effect, used to render per-issue effective scores.
    pub scores: SeverityScores,
}

/// Trait for report generators.
pub trait ReportGenerator {
    /// Render a full compatibility report.
    fn generate(
        &self,
        issues: &[CompatibilityIssue],
        score: &IncompatibilityScore,
        old_model: &ApiModel,
        new_model: &ApiModel,
        context: &ReportContext,
    ) -> Result<String>;
}

/// Construct the reporter for a format.
#[must_use]
pub fn reporter_for(format: ReportFormat) -> Box<dyn ReportGenerator> {
    match format {
        ReportFormat::Json => Box::new(JsonReporter::new()),
        ReportFormat::Text => Box::new(TextReporter::new()),
    }
}
