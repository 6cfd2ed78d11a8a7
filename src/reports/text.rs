//! Plain-text report generator for terminal output.

use super::{ReportContext, ReportGenerator};
use crate::diff::{CompatibilityIssue, IncompatibilityScore, Severity};
use crate::error::Result;
use crate::model::ApiModel;
use std::fmt::Write as _;

/// Human-readable report grouped by severity, worst first.
pub struct TextReporter;

impl TextReporter {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for TextReporter {
    fn default() -> Self {
        Self::new()
    }
}

const SEVERITY_ORDER: [Severity; 4] = [
    Severity::Error,
    Severity::Critical,
    Severity::Warning,
    Severity::Info,
];

impl ReportGenerator for TextReporter {
    fn generate(
        &self,
        issues: &[CompatibilityIssue],
        score: &IncompatibilityScore,
        old_model: &ApiModel,
        new_model: &ApiModel,
        context: &ReportContext,
    ) -> Result<String> {
        let mut out = String::new();

        let _ = writeln!(out, "C++ API Compatibility Report");
        let _ = writeln!(out, "============================");
        if let Some(path) = &context.old_snapshot_path {
            let _ = writeln!(out, "Old snapshot: {path} ({} elements)", old_model.surface_count());
        }
        if let Some(path) = &context.new_snapshot_path {
            let _ = writeln!(out, "New snapshot: {path} ({} elements)", new_model.surface_count());
        }
        let _ = writeln!(out);

        if issues.is_empty() {
            let _ = writeln!(out, "No compatibility issues detected.");
            return Ok(out);
        }

        for level in SEVERITY_ORDER {
            let group: Vec<&CompatibilityIssue> =
                issues.iter().filter(|i| i.level == level).collect();
            if group.is_empty() {
                continue;
            }
            let _ = writeln!(
                out,
                "{} ({}) - {}",
                level.label(),
                group.len(),
                level.description()
            );
            for issue in group {
                let _ = writeln!(out, "  [{}] {}", issue.element_kind, issue.description);
                if let Some(sig) = &issue.old_signature {
                    let _ = writeln!(out, "    old: {sig}");
                }
                if let Some(sig) = &issue.new_signature {
                    let _ = writeln!(out, "    new: {sig}");
                }
            }
            let _ = writeln!(out);
        }

        let _ = writeln!(out, "Assessment");
        let _ = writeln!(out, "----------");
        let _ = writeln!(
            out,
            "Issues: {} ({} breaking, {} compatible, {} additions)",
            score.total_issues,
            score.error_count + score.critical_count,
            score.warning_count,
            score.info_count
        );
        let _ = writeln!(
            out,
            "Incompatibility: {:.1}% ({:.1} of {:.1})",
            score.incompatibility_percentage, score.total_score, score.max_possible_score
        );
        let _ = writeln!(
            out,
            "Old API breakage: {:.1}% ({} of {} elements)",
            score.old_api_breakage_percentage, score.broken_old_api_count, score.old_api_count
        );
        let _ = writeln!(out, "Risk level: {}", score.risk_level.label());

        Ok(out)
    }
}
