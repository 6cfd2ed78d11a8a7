//! Issue types produced by the element differs.

use super::severity::{ChangeKind, Severity, SeverityScores};
use serde::Serialize;
use std::fmt;

/// API element categories referenced by issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Class,
    Method,
    Function,
    Enum,
    EnumMember,
    Macro,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Class => "class",
            Self::Method => "method",
            Self::Function => "function",
            Self::Enum => "enum",
            Self::EnumMember => "enum_member",
            Self::Macro => "macro",
        };
        f.write_str(s)
    }
}

/// One detected compatibility change.
///
/// Immutable once produced. `element_name` is fully qualified as
/// `Class::member` for methods and enum members.
#[derive(Debug, Clone, Serialize)]
pub struct CompatibilityIssue {
    pub kind: ChangeKind,
    pub level: Severity,
    /// Adjusted score (deprecated-element weighting). When absent the
    /// level's canonical score applies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score_override: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_signature: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_signature: Option<String>,
    pub description: String,
    pub element_name: String,
    pub element_kind: ElementKind,
}

impl CompatibilityIssue {
    /// The numeric weight this issue contributes to the aggregate score.
    #[must_use]
    pub fn effective_score(&self, scores: &SeverityScores) -> f64 {
        self.score_override
            .unwrap_or_else(|| scores.score_of(self.level))
    }

    /// Whether this issue touches the old API surface at all.
    #[must_use]
    pub fn breaks_old_api(&self) -> bool {
        self.level != Severity::Info
    }
}
