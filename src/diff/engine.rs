//! Top-level diff orchestration.

use super::classes::ClassDiffer;
use super::enums::EnumDiffer;
use super::functions::FunctionDiffer;
use super::issue::CompatibilityIssue;
use super::macros::MacroDiffer;
use super::scoring::{score_issues, IncompatibilityScore};
use super::severity::SeverityPolicy;
use crate::model::ApiModel;
use tracing::{debug, info};

/// Compares two API snapshots and produces compatibility issues.
///
/// The engine is a pure function of its inputs: no I/O, no mutation of the
/// models, deterministic issue order (classes, free functions, enums,
/// macros, each in declaration order of the old snapshot).
pub struct CompatEngine {
    policy: SeverityPolicy,
}

impl Default for CompatEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl CompatEngine {
    #[must_use]
    pub fn new() -> Self {
        Self {
            policy: SeverityPolicy::new(),
        }
    }

    #[must_use]
    pub fn with_policy(policy: SeverityPolicy) -> Self {
        Self { policy }
    }

    #[must_use]
    pub fn policy(&self) -> &SeverityPolicy {
        &self.policy
    }

    /// Diff two snapshots into a flat issue list.
    pub fn diff(&self, old: &ApiModel, new: &ApiModel) -> Vec<CompatibilityIssue> {
        // Identical content hashes mean identical surfaces; a zero hash
        // means the hash was never computed, so fall through and compare.
        if old.content_hash != 0 && old.content_hash == new.content_hash {
            debug!(hash = old.content_hash, "content hashes match, skipping diff");
            return Vec::new();
        }

        let class_differ = ClassDiffer::new(&self.policy);
        let function_differ = FunctionDiffer::new(&self.policy);
        let enum_differ = EnumDiffer::new(&self.policy);
        let macro_differ = MacroDiffer::new(&self.policy);

        let ((mut class_issues, function_issues), (enum_issues, macro_issues)) = rayon::join(
            || {
                rayon::join(
                    || class_differ.diff(&old.classes, &new.classes),
                    || function_differ.diff(&old.functions, &new.functions),
                )
            },
            || {
                rayon::join(
                    || enum_differ.diff(&old.enums, &new.enums),
                    || macro_differ.diff(&old.macros, &new.macros),
                )
            },
        );

        class_issues.extend(function_issues);
        class_issues.extend(enum_issues);
        class_issues.extend(macro_issues);

        info!(issues = class_issues.len(), "api diff complete");
        class_issues
    }

    /// Aggregate issues against the old snapshot's surface.
    #[must_use]
    pub fn score(&self, issues: &[CompatibilityIssue], old: &ApiModel) -> IncompatibilityScore {
        score_issues(issues, old, self.policy.scores())
    }
}
