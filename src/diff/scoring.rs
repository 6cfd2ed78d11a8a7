//! Issue aggregation and incompatibility scoring.

use super::issue::{CompatibilityIssue, ElementKind};
use super::severity::{Severity, SeverityScores};
use crate::model::ApiModel;
use serde::Serialize;
use std::collections::HashSet;

/// Qualitative risk band derived from the numeric assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Critical,
    High,
    Medium,
    Low,
    None,
}

impl RiskLevel {
    /// Classify an assessment. Pure function of the percentage and the
    /// ERROR/CRITICAL counts so bands are directly testable.
    #[must_use]
    pub fn from_assessment(percentage: f64, error_count: usize, critical_count: usize) -> Self {
        if error_count == 0 && critical_count == 0 && percentage <= 0.0 {
            return Self::None;
        }
        if error_count > 0 && percentage >= 80.0 {
            Self::Critical
        } else if error_count > 0 || percentage >= 50.0 {
            Self::High
        } else if critical_count > 0 || percentage >= 20.0 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Critical => "CRITICAL",
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
            Self::None => "NONE",
        }
    }
}

/// Aggregate incompatibility assessment for one diff run.
#[derive(Debug, Clone, Serialize)]
pub struct IncompatibilityScore {
    /// Sum of effective severity scores across all issues.
    pub total_score: f64,
    /// Worst case: every issue at ERROR weight.
    pub max_possible_score: f64,
    /// `100 * total / max`, 0 when there are no issues.
    pub incompatibility_percentage: f64,
    pub total_issues: usize,
    pub error_count: usize,
    pub critical_count: usize,
    pub warning_count: usize,
    pub info_count: usize,
    /// Addressable elements in the old API surface.
    pub old_api_count: usize,
    /// Distinct old elements touched by any non-INFO issue.
    pub broken_old_api_count: usize,
    /// `100 * broken / total`, 0 for an empty old API.
    pub old_api_breakage_percentage: f64,
    pub risk_level: RiskLevel,
}

/// Legacy rollup kept for report compatibility.
#[derive(Debug, Clone, Serialize)]
pub struct CompatibilitySummary {
    pub total_issues: usize,
    /// ERROR + CRITICAL
    pub breaking_changes: usize,
    /// WARNING
    pub backward_compatible: usize,
    /// INFO
    pub api_additions: usize,
}

/// Roll issues up into the legacy summary counts.
#[must_use]
pub fn summarize(issues: &[CompatibilityIssue]) -> CompatibilitySummary {
    let mut summary = CompatibilitySummary {
        total_issues: issues.len(),
        breaking_changes: 0,
        backward_compatible: 0,
        api_additions: 0,
    };
    for issue in issues {
        match issue.level {
            Severity::Error | Severity::Critical => summary.breaking_changes += 1,
            Severity::Warning => summary.backward_compatible += 1,
            Severity::Info => summary.api_additions += 1,
        }
    }
    summary
}

/// Aggregate all issues against the old API surface.
///
/// Never fails: an empty issue list scores 0%, an empty old API breaks 0%.
#[must_use]
pub fn score_issues(
    issues: &[CompatibilityIssue],
    old_model: &ApiModel,
    scores: &SeverityScores,
) -> IncompatibilityScore {
    let mut total_score = 0.0;
    let mut error_count = 0;
    let mut critical_count = 0;
    let mut warning_count = 0;
    let mut info_count = 0;

    for issue in issues {
        total_score += issue.effective_score(scores);
        match issue.level {
            Severity::Error => error_count += 1,
            Severity::Critical => critical_count += 1,
            Severity::Warning => warning_count += 1,
            Severity::Info => info_count += 1,
        }
    }

    let max_possible_score = issues.len() as f64 * scores.error;
    let incompatibility_percentage = if max_possible_score > 0.0 {
        total_score / max_possible_score * 100.0
    } else {
        0.0
    };

    let old_api_count = old_model.surface_count();
    let broken_old_api_count = count_broken_elements(issues);
    let old_api_breakage_percentage = if old_api_count > 0 {
        broken_old_api_count as f64 / old_api_count as f64 * 100.0
    } else {
        0.0
    };

    IncompatibilityScore {
        total_score,
        max_possible_score,
        incompatibility_percentage,
        total_issues: issues.len(),
        error_count,
        critical_count,
        warning_count,
        info_count,
        old_api_count,
        broken_old_api_count,
        old_api_breakage_percentage,
        risk_level: RiskLevel::from_assessment(
            incompatibility_percentage,
            error_count,
            critical_count,
        ),
    }
}

/// Count distinct old-API elements touched by any non-INFO issue.
///
/// A broken method also flags its owning class, a broken enum member its
/// owning enum: both granularities matter for reporting, so the double
/// count is intentional.
fn count_broken_elements(issues: &[CompatibilityIssue]) -> usize {
    let mut broken: HashSet<String> = HashSet::new();

    for issue in issues {
        if !issue.breaks_old_api() {
            continue;
        }
        match issue.element_kind {
            ElementKind::Method => {
                if let Some(class_name) = issue.element_name.split("::").next() {
                    if class_name != issue.element_name {
                        broken.insert(format!("class:{class_name}"));
                    }
                }
                broken.insert(format!("method:{}", issue.element_name));
            }
            ElementKind::EnumMember => {
                if let Some(enum_name) = issue.element_name.split("::").next() {
                    if enum_name != issue.element_name {
                        broken.insert(format!("enum:{enum_name}"));
                    }
                }
                broken.insert(format!("enum_member:{}", issue.element_name));
            }
            kind => {
                broken.insert(format!("{kind}:{}", issue.element_name));
            }
        }
    }

    broken.len()
}
