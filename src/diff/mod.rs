//! Compatibility diff engine.
//!
//! The [`CompatEngine`] compares two [`crate::model::ApiModel`] snapshots
//! and produces a flat list of [`CompatibilityIssue`]s, one per observed
//! change, each carrying a severity level resolved by the configured
//! [`SeverityPolicy`]. Element differs live in their own modules and share
//! no state; [`scoring`] aggregates the issue list into an overall
//! incompatibility assessment.

pub mod classes;
pub mod engine;
pub mod enums;
pub mod functions;
pub mod issue;
pub mod macros;
pub mod scoring;
pub mod severity;

pub use classes::ClassDiffer;
pub use engine::CompatEngine;
pub use enums::EnumDiffer;
pub use functions::FunctionDiffer;
pub use issue::{CompatibilityIssue, ElementKind};
pub use macros::MacroDiffer;
pub use scoring::{score_issues, summarize, CompatibilitySummary, IncompatibilityScore, RiskLevel};
pub use severity::{ChangeKind, Severity, SeverityContext, SeverityPolicy, SeverityScores};
