//! Class change computer.

use super::functions::FunctionDiffer;
use super::issue::{CompatibilityIssue, ElementKind};
use super::severity::{ChangeKind, SeverityContext, SeverityPolicy};
use crate::model::ClassDecl;
use indexmap::IndexMap;
use std::collections::BTreeSet;

/// Computes class-level changes, delegating nested method comparison to
/// [`FunctionDiffer`].
///
/// Comparison is purely structural: a renamed class is indistinguishable
/// from a removal plus an addition, since the name is the join key.
pub struct ClassDiffer<'a> {
    policy: &'a SeverityPolicy,
}

impl<'a> ClassDiffer<'a> {
    #[must_use]
    pub const fn new(policy: &'a SeverityPolicy) -> Self {
        Self { policy }
    }

    #[must_use]
    pub fn diff(
        &self,
        old: &IndexMap<String, ClassDecl>,
        new: &IndexMap<String, ClassDecl>,
    ) -> Vec<CompatibilityIssue> {
        let mut issues = Vec::new();
        let ctx = SeverityContext::default();

        for name in old.keys() {
            if new.contains_key(name) {
                continue;
            }
            let level = self.policy.level_for(ChangeKind::ClassRemoved, &ctx);
            issues.push(CompatibilityIssue {
                kind: ChangeKind::ClassRemoved,
                level,
                score_override: None,
                old_signature: None,
                new_signature: None,
                description: format!("Class '{name}' has been removed"),
                element_name: name.clone(),
                element_kind: ElementKind::Class,
            });
        }

        for name in new.keys() {
            if old.contains_key(name) {
                continue;
            }
            let level = self.policy.level_for(ChangeKind::ClassAdded, &ctx);
            issues.push(CompatibilityIssue {
                kind: ChangeKind::ClassAdded,
                level,
                score_override: None,
                old_signature: None,
                new_signature: None,
                description: format!("Class '{name}' has been added"),
                element_name: name.clone(),
                element_kind: ElementKind::Class,
            });
        }

        for (name, old_class) in old {
            let Some(new_class) = new.get(name) else {
                continue;
            };
            self.diff_pair(old_class, new_class, &mut issues);
        }

        issues
    }

    fn diff_pair(
        &self,
        old: &ClassDecl,
        new: &ClassDecl,
        issues: &mut Vec<CompatibilityIssue>,
    ) {
        let ctx = SeverityContext::default();

        // Base-class order carries no meaning; compare as sets.
        let old_bases: BTreeSet<&str> = old.base_classes.iter().map(String::as_str).collect();
        let new_bases: BTreeSet<&str> = new.base_classes.iter().map(String::as_str).collect();
        if old_bases != new_bases {
            let level = self
                .policy
                .level_for(ChangeKind::ClassInheritanceChanged, &ctx);
            issues.push(CompatibilityIssue {
                kind: ChangeKind::ClassInheritanceChanged,
                level,
                score_override: None,
                old_signature: Some(old.inheritance_signature()),
                new_signature: Some(new.inheritance_signature()),
                description: format!("Class '{}' inheritance has changed", old.name),
                element_name: old.name.clone(),
                element_kind: ElementKind::Class,
            });
        }

        if old.is_final != new.is_final {
            let level = self
                .policy
                .level_for(ChangeKind::ClassFinalModifierChanged, &ctx);
            issues.push(CompatibilityIssue {
                kind: ChangeKind::ClassFinalModifierChanged,
                level,
                score_override: None,
                old_signature: Some(format!("final: {}", old.is_final)),
                new_signature: Some(format!("final: {}", new.is_final)),
                description: format!("Class '{}' final modifier has changed", old.name),
                element_name: old.name.clone(),
                element_kind: ElementKind::Class,
            });
        }

        FunctionDiffer::new(self.policy).diff_methods(
            &old.methods,
            &new.methods,
            &old.name,
            issues,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::severity::Severity;
    use crate::model::{AccessLevel, FunctionDecl};

    fn method(name: &str, return_type: &str, access: AccessLevel) -> FunctionDecl {
        FunctionDecl {
            name: name.to_string(),
            return_type: return_type.to_string(),
            parameters: vec![],
            access_level: access,
            is_virtual: false,
            is_pure_virtual: false,
            is_static: false,
            is_const: false,
            is_noexcept: false,
            is_override: false,
            is_final: false,
            is_deprecated: false,
        }
    }

    fn class(name: &str, bases: &[&str], methods: Vec<FunctionDecl>) -> ClassDecl {
        ClassDecl {
            name: name.to_string(),
            base_classes: bases.iter().map(|s| (*s).to_string()).collect(),
            is_final: false,
            methods,
            members: vec![],
        }
    }

    fn map(classes: Vec<ClassDecl>) -> IndexMap<String, ClassDecl> {
        classes.into_iter().map(|c| (c.name.clone(), c)).collect()
    }

    #[test]
    fn test_class_removed_and_added() {
        let policy = SeverityPolicy::new();
        let differ = ClassDiffer::new(&policy);
        let old = map(vec![class("Gone", &[], vec![])]);
        let new = map(vec![class("Fresh", &[], vec![])]);

        let issues = differ.diff(&old, &new);
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].kind, ChangeKind::ClassRemoved);
        assert_eq!(issues[0].level, Severity::Error);
        assert_eq!(issues[1].kind, ChangeKind::ClassAdded);
        assert_eq!(issues[1].level, Severity::Info);
    }

    #[test]
    fn test_inheritance_order_is_insignificant() {
        let policy = SeverityPolicy::new();
        let differ = ClassDiffer::new(&policy);
        let old = map(vec![class("W", &["A", "B"], vec![])]);
        let new = map(vec![class("W", &["B", "A"], vec![])]);
        assert!(differ.diff(&old, &new).is_empty());
    }

    #[test]
    fn test_inheritance_change_is_error() {
        let policy = SeverityPolicy::new();
        let differ = ClassDiffer::new(&policy);
        let old = map(vec![class("W", &["QObject"], vec![])]);
        let new = map(vec![class("W", &["QObject", "Serializable"], vec![])]);

        let issues = differ.diff(&old, &new);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind, ChangeKind::ClassInheritanceChanged);
        assert_eq!(issues[0].level, Severity::Error);
        assert_eq!(
            issues[0].old_signature.as_deref(),
            Some("Inheritance: QObject")
        );
        assert_eq!(
            issues[0].new_signature.as_deref(),
            Some("Inheritance: QObject, Serializable")
        );
    }

    #[test]
    fn test_final_modifier_change_is_critical() {
        let policy = SeverityPolicy::new();
        let differ = ClassDiffer::new(&policy);
        let old = map(vec![class("W", &[], vec![])]);
        let mut sealed = class("W", &[], vec![]);
        sealed.is_final = true;
        let new = map(vec![sealed]);

        let issues = differ.diff(&old, &new);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind, ChangeKind::ClassFinalModifierChanged);
        assert_eq!(issues[0].level, Severity::Critical);
        assert_eq!(issues[0].old_signature.as_deref(), Some("final: false"));
    }

    #[test]
    fn test_private_method_changes_are_invisible() {
        let policy = SeverityPolicy::new();
        let differ = ClassDiffer::new(&policy);
        let old = map(vec![class(
            "Widget",
            &[],
            vec![
                {
                    let mut m = method("getValue", "int", AccessLevel::Public);
                    m.is_const = true;
                    m
                },
                method("helper", "void", AccessLevel::Private),
            ],
        )]);
        let new = map(vec![class("Widget", &[], vec![{
            let mut m = method("getValue", "double", AccessLevel::Public);
            m.is_const = true;
            m
        }])]);

        let issues = differ.diff(&old, &new);
        // helper's removal is filtered out entirely; only the public
        // return-type change survives.
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind, ChangeKind::FunctionReturnTypeChanged);
        assert_eq!(issues[0].element_name, "Widget::getValue");
        assert_eq!(issues[0].element_kind, ElementKind::Method);
        assert_eq!(
            issues[0].old_signature.as_deref(),
            Some("const int getValue()")
        );
        assert_eq!(
            issues[0].new_signature.as_deref(),
            Some("const double getValue()")
        );
    }

    #[test]
    fn test_method_issue_is_class_qualified() {
        let policy = SeverityPolicy::new();
        let differ = ClassDiffer::new(&policy);
        let old = map(vec![class(
            "Widget",
            &[],
            vec![method("show", "void", AccessLevel::Public)],
        )]);
        let new = map(vec![class("Widget", &[], vec![])]);

        let issues = differ.diff(&old, &new);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].element_name, "Widget::show");
    }
}
