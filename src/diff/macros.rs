//! Macro change computer.

use super::issue::{CompatibilityIssue, ElementKind};
use super::severity::{ChangeKind, SeverityContext, SeverityPolicy};
use crate::model::MacroDecl;
use indexmap::IndexMap;

/// Computes macro-level changes.
///
/// Macros classified as conditional-compilation flags (header guards,
/// feature toggles, valueless defines) are downgraded: their removal or
/// value drift rarely affects consumers.
pub struct MacroDiffer<'a> {
    policy: &'a SeverityPolicy,
}

impl<'a> MacroDiffer<'a> {
    #[must_use]
    pub const fn new(policy: &'a SeverityPolicy) -> Self {
        Self { policy }
    }

    #[must_use]
    pub fn diff(
        &self,
        old: &IndexMap<String, MacroDecl>,
        new: &IndexMap<String, MacroDecl>,
    ) -> Vec<CompatibilityIssue> {
        let mut issues = Vec::new();

        for (name, decl) in old {
            if new.contains_key(name) {
                continue;
            }
            let ctx = SeverityContext {
                conditional_macro: self.policy.is_conditional_macro(decl),
                ..Default::default()
            };
            let level = self.policy.level_for(ChangeKind::MacroRemoved, &ctx);
            issues.push(CompatibilityIssue {
                kind: ChangeKind::MacroRemoved,
                level,
                score_override: None,
                old_signature: Some(decl.signature()),
                new_signature: None,
                description: format!("Macro '{name}' has been removed"),
                element_name: name.clone(),
                element_kind: ElementKind::Macro,
            });
        }

        for (name, decl) in new {
            if old.contains_key(name) {
                continue;
            }
            let ctx = SeverityContext::default();
            let level = self.policy.level_for(ChangeKind::MacroAdded, &ctx);
            issues.push(CompatibilityIssue {
                kind: ChangeKind::MacroAdded,
                level,
                score_override: None,
                old_signature: None,
                new_signature: Some(decl.signature()),
                description: format!("Macro '{name}' has been added"),
                element_name: name.clone(),
                element_kind: ElementKind::Macro,
            });
        }

        for (name, old_macro) in old {
            let Some(new_macro) = new.get(name) else {
                continue;
            };
            // Absent value and empty value are the same token.
            if old_macro.value_token() == new_macro.value_token() {
                continue;
            }
            let ctx = SeverityContext {
                conditional_macro: self.policy.is_conditional_macro(old_macro),
                ..Default::default()
            };
            let level = self.policy.level_for(ChangeKind::MacroValueChanged, &ctx);
            issues.push(CompatibilityIssue {
                kind: ChangeKind::MacroValueChanged,
                level,
                score_override: None,
                old_signature: Some(old_macro.signature()),
                new_signature: Some(new_macro.signature()),
                description: format!("Macro '{name}' value changed"),
                element_name: name.clone(),
                element_kind: ElementKind::Macro,
            });
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::severity::Severity;

    fn macro_decl(name: &str, value: Option<&str>) -> MacroDecl {
        MacroDecl {
            name: name.to_string(),
            value: value.map(str::to_string),
            parameters: vec![],
        }
    }

    fn map(macros: Vec<MacroDecl>) -> IndexMap<String, MacroDecl> {
        macros.into_iter().map(|m| (m.name.clone(), m)).collect()
    }

    #[test]
    fn test_value_change_is_warning_with_signatures() {
        let policy = SeverityPolicy::new();
        let differ = MacroDiffer::new(&policy);
        let old = map(vec![macro_decl("MAX_SIZE", Some("100"))]);
        let new = map(vec![macro_decl("MAX_SIZE", Some("200"))]);

        let issues = differ.diff(&old, &new);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind, ChangeKind::MacroValueChanged);
        assert_eq!(issues[0].level, Severity::Warning);
        assert_eq!(issues[0].old_signature.as_deref(), Some("#define MAX_SIZE 100"));
        assert_eq!(issues[0].new_signature.as_deref(), Some("#define MAX_SIZE 200"));
    }

    #[test]
    fn test_removed_macro_is_critical() {
        let policy = SeverityPolicy::new();
        let differ = MacroDiffer::new(&policy);
        let old = map(vec![macro_decl("API_VERSION", Some("3"))]);
        let new = IndexMap::new();

        let issues = differ.diff(&old, &new);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind, ChangeKind::MacroRemoved);
        assert_eq!(issues[0].level, Severity::Critical);
    }

    #[test]
    fn test_header_guard_removal_downgraded() {
        let policy = SeverityPolicy::new();
        let differ = MacroDiffer::new(&policy);
        let old = map(vec![macro_decl("WIDGET_H", None)]);
        let new = IndexMap::new();

        let issues = differ.diff(&old, &new);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].level, Severity::Warning);
    }

    #[test]
    fn test_feature_flag_value_change_downgraded_to_info() {
        let policy = SeverityPolicy::new();
        let differ = MacroDiffer::new(&policy);
        let old = map(vec![macro_decl("ENABLE_LOGGING", Some("0"))]);
        let new = map(vec![macro_decl("ENABLE_LOGGING", Some("1"))]);

        let issues = differ.diff(&old, &new);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind, ChangeKind::MacroValueChanged);
        assert_eq!(issues[0].level, Severity::Info);
    }

    #[test]
    fn test_absent_and_empty_values_compare_equal() {
        let policy = SeverityPolicy::new();
        let differ = MacroDiffer::new(&policy);
        let old = map(vec![macro_decl("FLAG", None)]);
        let new = map(vec![macro_decl("FLAG", Some(""))]);
        assert!(differ.diff(&old, &new).is_empty());
    }

    #[test]
    fn test_added_macro_is_info() {
        let policy = SeverityPolicy::new();
        let differ = MacroDiffer::new(&policy);
        let old = IndexMap::new();
        let new = map(vec![macro_decl("NEW_LIMIT", Some("64"))]);

        let issues = differ.diff(&old, &new);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind, ChangeKind::MacroAdded);
        assert_eq!(issues[0].level, Severity::Info);
    }
}
