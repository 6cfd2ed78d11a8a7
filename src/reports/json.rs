//! JSON report generator.

use super::{ReportContext, ReportGenerator};
use crate::diff::{summarize, ChangeKind, CompatibilityIssue, ElementKind, IncompatibilityScore};
use crate::error::{ApiDiffError, ReportErrorKind, Result};
use crate::model::ApiModel;
use chrono::Utc;
use serde::Serialize;

/// JSON report generator.
pub struct JsonReporter {
    pretty: bool,
}

impl JsonReporter {
    #[must_use]
    pub const fn new() -> Self {
        Self { pretty: true }
    }

    /// Set pretty printing.
    #[must_use]
    pub const fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for JsonReporter {
    fn generate(
        &self,
        issues: &[CompatibilityIssue],
        score: &IncompatibilityScore,
        old_model: &ApiModel,
        new_model: &ApiModel,
        context: &ReportContext,
    ) -> Result<String> {
        let summary = summarize(issues);

        let report = JsonReport {
            metadata: ReportMetadata {
                tool: ToolInfo {
                    name: "cpp-api-diff",
                    version: env!("CARGO_PKG_VERSION"),
                },
                generated_at: Utc::now().to_rfc3339(),
                old_snapshot: SnapshotInfo {
                    file_path: context.old_snapshot_path.clone(),
                    surface_count: old_model.surface_count(),
                },
                new_snapshot: SnapshotInfo {
                    file_path: context.new_snapshot_path.clone(),
                    surface_count: new_model.surface_count(),
                },
            },
            incompatibility_assessment: Assessment {
                total_score: score.total_score,
                max_possible_score: score.max_possible_score,
                incompatibility_percentage: score.incompatibility_percentage,
                risk_level: score.risk_level.label(),
                breakdown: Breakdown {
                    error: score.error_count,
                    critical: score.critical_count,
                    warning: score.warning_count,
                    info: score.info_count,
                },
                old_api_compatibility: OldApiCompatibility {
                    old_api_count: score.old_api_count,
                    broken_old_api_count: score.broken_old_api_count,
                    old_api_breakage_percentage: score.old_api_breakage_percentage,
                },
            },
            summary: Summary {
                total_issues: summary.total_issues,
                breaking_changes: summary.breaking_changes,
                backward_compatible: summary.backward_compatible,
                api_additions: summary.api_additions,
            },
            issues: issues
                .iter()
                .map(|issue| IssueRecord {
                    change_type: issue.kind,
                    severity: issue.level.label(),
                    severity_description: issue.level.description(),
                    severity_score: issue.effective_score(&context.scores),
                    element: &issue.element_name,
                    element_kind: issue.element_kind,
                    description: &issue.description,
                    old_signature: issue.old_signature.as_deref(),
                    new_signature: issue.new_signature.as_deref(),
                })
                .collect(),
        };

        let rendered = if self.pretty {
            serde_json::to_string_pretty(&report)
        } else {
            serde_json::to_string(&report)
        };
        rendered.map_err(|e| ApiDiffError::Report {
            context: "json report".to_string(),
            source: ReportErrorKind::JsonSerializationError(e.to_string()),
        })
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    metadata: ReportMetadata,
    incompatibility_assessment: Assessment,
    summary: Summary,
    issues: Vec<IssueRecord<'a>>,
}

#[derive(Serialize)]
struct ReportMetadata {
    tool: ToolInfo,
    generated_at: String,
    old_snapshot: SnapshotInfo,
    new_snapshot: SnapshotInfo,
}

#[derive(Serialize)]
struct ToolInfo {
    name: &'static str,
    version: &'static str,
}

#[derive(Serialize)]
struct SnapshotInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    file_path: Option<String>,
    surface_count: usize,
}

#[derive(Serialize)]
struct Assessment {
    total_score: f64,
    max_possible_score: f64,
    incompatibility_percentage: f64,
    risk_level: &'static str,
    breakdown: Breakdown,
    old_api_compatibility: OldApiCompatibility,
}

#[derive(Serialize)]
struct Breakdown {
    error: usize,
    critical: usize,
    warning: usize,
    info: usize,
}

#[derive(Serialize)]
struct OldApiCompatibility {
    old_api_count: usize,
    broken_old_api_count: usize,
    old_api_breakage_percentage: f64,
}

#[derive(Serialize)]
struct Summary {
    total_issues: usize,
    breaking_changes: usize,
    backward_compatible: usize,
    api_additions: usize,
}

#[derive(Serialize)]
struct IssueRecord<'a> {
    change_type: ChangeKind,
    severity: &'static str,
    severity_description: &'static str,
    severity_score: f64,
    element: &'a str,
    element_kind: ElementKind,
    description: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    old_signature: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    new_signature: Option<&'a str>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::{score_issues, Severity, SeverityScores};

    fn removal_issue() -> CompatibilityIssue {
        CompatibilityIssue {
            kind: ChangeKind::FunctionRemoved,
            level: Severity::Error,
            score_override: None,
            old_signature: Some("int getValue()".to_string()),
            new_signature: None,
            description: "Function 'getValue' has been removed".to_string(),
            element_name: "getValue".to_string(),
            element_kind: ElementKind::Function,
        }
    }

    #[test]
    fn test_json_report_structure() {
        let issues = vec![removal_issue()];
        let old = ApiModel::new();
        let score = score_issues(&issues, &old, &SeverityScores::default());
        let out = JsonReporter::new()
            .generate(&issues, &score, &old, &ApiModel::new(), &ReportContext::default())
            .expect("report renders");

        let parsed: serde_json::Value = serde_json::from_str(&out).expect("valid json");
        assert_eq!(parsed["metadata"]["tool"]["name"], "cpp-api-diff");
        assert_eq!(parsed["issues"][0]["change_type"], "function_removed");
        assert_eq!(parsed["issues"][0]["severity"], "ERROR");
        assert_eq!(parsed["issues"][0]["severity_score"], 10.0);
        assert_eq!(parsed["issues"][0]["old_signature"], "int getValue()");
        assert!(parsed["issues"][0].get("new_signature").is_none());
        assert_eq!(
            parsed["incompatibility_assessment"]["risk_level"],
            "CRITICAL"
        );
        assert_eq!(parsed["summary"]["breaking_changes"], 1);
    }

    #[test]
    fn test_compact_output_has_no_newlines() {
        let issues = vec![removal_issue()];
        let old = ApiModel::new();
        let score = score_issues(&issues, &old, &SeverityScores::default());
        let out = JsonReporter::new()
            .pretty(false)
            .generate(&issues, &score, &old, &ApiModel::new(), &ReportContext::default())
            .expect("report renders");
        assert!(!out.contains('\n'));
    }

    #[test]
    fn test_deprecated_override_shows_reduced_score() {
        let mut issue = removal_issue();
        issue.score_override = Some(5.0);
        let issues = vec![issue];
        let old = ApiModel::new();
        let score = score_issues(&issues, &old, &SeverityScores::default());
        let out = JsonReporter::new()
            .generate(&issues, &score, &old, &ApiModel::new(), &ReportContext::default())
            .expect("report renders");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("valid json");
        assert_eq!(parsed["issues"][0]["severity_score"], 5.0);
    }
}
