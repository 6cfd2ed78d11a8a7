//! Severity model: levels, change catalogue, and the severity policy.
//!
//! The base kind-to-level table is configuration data, not engine state:
//! historical deployments disagree on a few entries (most visibly whether a
//! macro value change is WARNING or CRITICAL), so the table lives in an
//! injectable [`SeverityPolicy`] with presets rather than hard-coded
//! constants.

use crate::error::ApiDiffError;
use crate::model::MacroDecl;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Compatibility severity, ordered by increasing risk.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Backward compatible, usually new features
    Info,
    /// Needs attention but won't immediately fail
    Warning,
    /// May cause runtime errors
    Critical,
    /// Will cause compilation failure
    Error,
}

impl Severity {
    /// Uppercase label for report output.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Error => "ERROR",
            Self::Critical => "CRITICAL",
            Self::Warning => "WARNING",
            Self::Info => "INFO",
        }
    }

    /// Human-readable risk description.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Error => "Will cause compilation failure",
            Self::Critical => "May cause runtime errors",
            Self::Warning => "Needs attention but won't immediately fail",
            Self::Info => "Backward compatible, usually new features",
        }
    }
}

/// Canonical numeric scores per severity level.
///
/// The only invariant is strict ordering: `error > critical > warning >
/// info >= 0`. [`SeverityPolicy::with_scores`] rejects anything else.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeverityScores {
    pub error: f64,
    pub critical: f64,
    pub warning: f64,
    pub info: f64,
}

impl Default for SeverityScores {
    fn default() -> Self {
        Self {
            error: 10.0,
            critical: 5.0,
            warning: 1.0,
            info: 0.0,
        }
    }
}

impl SeverityScores {
    /// Score for one severity level.
    #[must_use]
    pub const fn score_of(&self, level: Severity) -> f64 {
        match level {
            Severity::Error => self.error,
            Severity::Critical => self.critical,
            Severity::Warning => self.warning,
            Severity::Info => self.info,
        }
    }

    fn validate(&self) -> Result<(), String> {
        if self.error > self.critical
            && self.critical > self.warning
            && self.warning > self.info
            && self.info >= 0.0
        {
            Ok(())
        } else {
            Err(format!(
                "severity scores must satisfy error > critical > warning > info >= 0, \
                 got {}/{}/{}/{}",
                self.error, self.critical, self.warning, self.info
            ))
        }
    }
}

/// Every distinguishable structural API edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    // Function / method
    FunctionAdded,
    FunctionRemoved,
    FunctionReturnTypeChanged,
    FunctionParameterAdded,
    FunctionParameterRemoved,
    FunctionParameterTypeChanged,
    FunctionModifierChanged,

    // Class
    ClassAdded,
    ClassRemoved,
    ClassInheritanceChanged,
    ClassFinalModifierChanged,

    // Enum
    EnumAdded,
    EnumRemoved,
    EnumMemberAdded,
    EnumMemberRemoved,
    EnumMemberValueChanged,

    // Macro
    MacroAdded,
    MacroRemoved,
    MacroValueChanged,
}

/// Evaluation-time context for severity resolution.
///
/// Differs fill in whatever is known about the change site; anything left
/// at `None`/`false` simply means "not applicable".
#[derive(Debug, Clone, Copy, Default)]
pub struct SeverityContext {
    /// For parameter additions: whether every appended parameter carries a
    /// default value.
    pub added_params_have_defaults: Option<bool>,
    /// The old element is marked deprecated.
    pub old_deprecated: bool,
    /// The macro looks like a conditional-compilation flag or header guard.
    pub conditional_macro: bool,
}

impl SeverityContext {
    /// Context for a change against a possibly deprecated old element.
    #[must_use]
    pub const fn for_old_element(old_deprecated: bool) -> Self {
        Self {
            added_params_have_defaults: None,
            old_deprecated,
            conditional_macro: false,
        }
    }
}

/// Multiplier applied to the score of issues against deprecated elements.
const DEPRECATED_SCORE_FACTOR: f64 = 0.5;

/// Header-guard style name suffixes (matched case-insensitively).
const GUARD_SUFFIXES: &[&str] = &["_H", "_HPP", "_HXX", "_INCLUDED", "_HEADER_"];

/// Conventional feature-flag prefixes.
const FLAG_PREFIXES: &[&str] = &["HAVE_", "USE_", "ENABLE_", "DISABLE_"];

/// Injectable severity policy: base table, scores, and adjustments.
#[derive(Debug, Clone)]
pub struct SeverityPolicy {
    base: HashMap<ChangeKind, Severity>,
    scores: SeverityScores,
    /// Product-specific feature-flag prefixes, checked in addition to the
    /// conventional set when classifying conditional-compilation macros.
    feature_flag_prefixes: Vec<String>,
}

impl Default for SeverityPolicy {
    fn default() -> Self {
        Self {
            base: Self::default_table(),
            scores: SeverityScores::default(),
            feature_flag_prefixes: Vec::new(),
        }
    }
}

impl SeverityPolicy {
    /// Default policy: macro value changes are WARNING.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Strict policy: macro removals and value changes are both CRITICAL.
    ///
    /// Appropriate when consumers are known to depend on exact macro
    /// values (serialization constants, protocol versions).
    #[must_use]
    pub fn strict() -> Self {
        let mut policy = Self::default();
        policy
            .base
            .insert(ChangeKind::MacroValueChanged, Severity::Critical);
        policy
    }

    fn default_table() -> HashMap<ChangeKind, Severity> {
        use ChangeKind::*;
        use Severity::*;
        HashMap::from([
            (FunctionAdded, Info),
            (FunctionRemoved, Error),
            (FunctionReturnTypeChanged, Error),
            (FunctionParameterAdded, Warning),
            (FunctionParameterRemoved, Error),
            (FunctionParameterTypeChanged, Error),
            (FunctionModifierChanged, Critical),
            (ClassAdded, Info),
            (ClassRemoved, Error),
            (ClassInheritanceChanged, Error),
            (ClassFinalModifierChanged, Critical),
            (EnumAdded, Info),
            (EnumRemoved, Error),
            (EnumMemberAdded, Info),
            (EnumMemberRemoved, Error),
            (EnumMemberValueChanged, Error),
            (MacroAdded, Info),
            (MacroRemoved, Critical),
            (MacroValueChanged, Warning),
        ])
    }

    /// Replace the canonical per-level scores.
    pub fn with_scores(mut self, scores: SeverityScores) -> Result<Self, ApiDiffError> {
        scores.validate().map_err(ApiDiffError::Config)?;
        self.scores = scores;
        Ok(self)
    }

    /// Override the base level for one change kind.
    #[must_use]
    pub fn with_base_level(mut self, kind: ChangeKind, level: Severity) -> Self {
        self.base.insert(kind, level);
        self
    }

    /// Add product-specific feature-flag prefixes (e.g. `MYLIB_FEATURE_`)
    /// to the conditional-compilation macro heuristic.
    #[must_use]
    pub fn with_feature_flag_prefixes(mut self, prefixes: Vec<String>) -> Self {
        self.feature_flag_prefixes = prefixes;
        self
    }

    /// Canonical per-level scores.
    #[must_use]
    pub const fn scores(&self) -> &SeverityScores {
        &self.scores
    }

    /// Resolve the effective severity level for a change.
    ///
    /// Resolution is a pure function of (kind, context): the base table
    /// entry, overridden where the context decides the outcome.
    #[must_use]
    pub fn level_for(&self, kind: ChangeKind, ctx: &SeverityContext) -> Severity {
        // Appended parameters with defaults keep existing call sites
        // compiling; any appended parameter without one breaks them.
        if kind == ChangeKind::FunctionParameterAdded {
            match ctx.added_params_have_defaults {
                Some(true) => return Severity::Info,
                Some(false) => return Severity::Error,
                None => {}
            }
        }

        // Conditional-compilation macros are assumed not to be part of the
        // meaningful public contract.
        if ctx.conditional_macro {
            match kind {
                ChangeKind::MacroRemoved => return Severity::Warning,
                ChangeKind::MacroValueChanged => return Severity::Info,
                _ => {}
            }
        }

        self.base.get(&kind).copied().unwrap_or(Severity::Warning)
    }

    /// Score adjustment for one issue, if any.
    ///
    /// Issues against deprecated old elements carry half the canonical
    /// weight; the reported level is unchanged.
    #[must_use]
    pub fn score_override(&self, level: Severity, ctx: &SeverityContext) -> Option<f64> {
        if ctx.old_deprecated {
            Some(self.scores.score_of(level) * DEPRECATED_SCORE_FACTOR)
        } else {
            None
        }
    }

    /// Classify a macro as "likely conditional compilation".
    ///
    /// Matches header-guard suffixes, conventional and configured
    /// feature-flag prefixes, and valueless defines.
    #[must_use]
    pub fn is_conditional_macro(&self, decl: &MacroDecl) -> bool {
        let upper = decl.name.to_ascii_uppercase();
        if GUARD_SUFFIXES.iter().any(|suffix| upper.ends_with(suffix)) {
            return true;
        }
        if FLAG_PREFIXES.iter().any(|prefix| upper.starts_with(prefix)) {
            return true;
        }
        if self
            .feature_flag_prefixes
            .iter()
            .any(|prefix| upper.starts_with(&prefix.to_ascii_uppercase()))
        {
            return true;
        }
        decl.value_token().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn macro_decl(name: &str, value: Option<&str>) -> MacroDecl {
        MacroDecl {
            name: name.to_string(),
            value: value.map(str::to_string),
            parameters: vec![],
        }
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Error > Severity::Critical);
        assert!(Severity::Critical > Severity::Warning);
        assert!(Severity::Warning > Severity::Info);
    }

    #[test]
    fn test_default_scores_strictly_ordered() {
        let scores = SeverityScores::default();
        assert!(scores.error > scores.critical);
        assert!(scores.critical > scores.warning);
        assert!(scores.warning > scores.info);
        assert!(scores.info >= 0.0);
    }

    #[test]
    fn test_with_scores_rejects_unordered() {
        let result = SeverityPolicy::new().with_scores(SeverityScores {
            error: 5.0,
            critical: 5.0,
            warning: 1.0,
            info: 0.0,
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_parameter_added_context_override() {
        let policy = SeverityPolicy::new();
        let with_defaults = SeverityContext {
            added_params_have_defaults: Some(true),
            ..Default::default()
        };
        let without_defaults = SeverityContext {
            added_params_have_defaults: Some(false),
            ..Default::default()
        };
        let no_context = SeverityContext::default();

        assert_eq!(
            policy.level_for(ChangeKind::FunctionParameterAdded, &with_defaults),
            Severity::Info
        );
        assert_eq!(
            policy.level_for(ChangeKind::FunctionParameterAdded, &without_defaults),
            Severity::Error
        );
        // Neutral fallback when no caller supplies context
        assert_eq!(
            policy.level_for(ChangeKind::FunctionParameterAdded, &no_context),
            Severity::Warning
        );
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let policy = SeverityPolicy::new();
        let ctx = SeverityContext {
            added_params_have_defaults: Some(false),
            old_deprecated: true,
            conditional_macro: false,
        };
        let first = policy.level_for(ChangeKind::FunctionParameterAdded, &ctx);
        let second = policy.level_for(ChangeKind::FunctionParameterAdded, &ctx);
        assert_eq!(first, second);
    }

    #[test]
    fn test_conditional_macro_downgrades() {
        let policy = SeverityPolicy::new();
        let ctx = SeverityContext {
            conditional_macro: true,
            ..Default::default()
        };
        assert_eq!(
            policy.level_for(ChangeKind::MacroRemoved, &ctx),
            Severity::Warning
        );
        assert_eq!(
            policy.level_for(ChangeKind::MacroValueChanged, &ctx),
            Severity::Info
        );
    }

    #[test]
    fn test_macro_classification() {
        let policy = SeverityPolicy::new();
        assert!(policy.is_conditional_macro(&macro_decl("WIDGET_H", None)));
        assert!(policy.is_conditional_macro(&macro_decl("widget_hpp", Some("1"))));
        assert!(policy.is_conditional_macro(&macro_decl("HAVE_THREADS", Some("1"))));
        assert!(policy.is_conditional_macro(&macro_decl("ENABLE_LOGGING", Some("0"))));
        // Valueless define counts even without a recognized name shape
        assert!(policy.is_conditional_macro(&macro_decl("SOMETHING", None)));
        // Plain value macro does not
        assert!(!policy.is_conditional_macro(&macro_decl("MAX_SIZE", Some("100"))));
    }

    #[test]
    fn test_configured_feature_flag_prefix() {
        let policy = SeverityPolicy::new()
            .with_feature_flag_prefixes(vec!["MYLIB_FEATURE_".to_string()]);
        assert!(policy.is_conditional_macro(&macro_decl("MYLIB_FEATURE_GPU", Some("1"))));
        assert!(!SeverityPolicy::new()
            .is_conditional_macro(&macro_decl("MYLIB_FEATURE_GPU", Some("1"))));
    }

    #[test]
    fn test_deprecated_score_override() {
        let policy = SeverityPolicy::new();
        let ctx = SeverityContext::for_old_element(true);
        assert_eq!(policy.score_override(Severity::Error, &ctx), Some(5.0));
        let fresh = SeverityContext::for_old_element(false);
        assert_eq!(policy.score_override(Severity::Error, &fresh), None);
    }

    #[test]
    fn test_strict_preset_macro_value() {
        let strict = SeverityPolicy::strict();
        let ctx = SeverityContext::default();
        assert_eq!(
            strict.level_for(ChangeKind::MacroValueChanged, &ctx),
            Severity::Critical
        );
        // Conditional downgrade still applies under strict
        let conditional = SeverityContext {
            conditional_macro: true,
            ..Default::default()
        };
        assert_eq!(
            strict.level_for(ChangeKind::MacroValueChanged, &conditional),
            Severity::Info
        );
    }
}
