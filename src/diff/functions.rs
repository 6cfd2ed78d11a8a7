//! Function and method change computer.
//!
//! Operates identically over free functions and class methods; only the
//! element kind tag and name qualification differ. Entities are keyed by
//! name, not full overload signature. This is a documented approximation:
//! when an overload set changes shape, two overloads sharing a name are
//! compared as if they were one entity and can produce spurious
//! parameter-mismatch issues.

use super::issue::{CompatibilityIssue, ElementKind};
use super::severity::{ChangeKind, SeverityContext, SeverityPolicy};
use crate::model::FunctionDecl;
use indexmap::IndexMap;

/// Modifier flags compared pairwise, one issue per differing flag.
const COMPARED_MODIFIERS: &[(&str, fn(&FunctionDecl) -> bool)] = &[
    ("virtual", |f| f.is_virtual),
    ("static", |f| f.is_static),
    ("const", |f| f.is_const),
    ("noexcept", |f| f.is_noexcept),
    ("final", |f| f.is_final),
];

/// Computes function-level changes between two snapshots.
pub struct FunctionDiffer<'a> {
    policy: &'a SeverityPolicy,
}

impl<'a> FunctionDiffer<'a> {
    #[must_use]
    pub const fn new(policy: &'a SeverityPolicy) -> Self {
        Self { policy }
    }

    /// Diff two free-function maps. Free functions are implicitly public;
    /// no access filter applies.
    #[must_use]
    pub fn diff(
        &self,
        old: &IndexMap<String, FunctionDecl>,
        new: &IndexMap<String, FunctionDecl>,
    ) -> Vec<CompatibilityIssue> {
        let old_by_name: IndexMap<&str, &FunctionDecl> =
            old.iter().map(|(k, v)| (k.as_str(), v)).collect();
        let new_by_name: IndexMap<&str, &FunctionDecl> =
            new.iter().map(|(k, v)| (k.as_str(), v)).collect();
        let mut issues = Vec::new();
        self.diff_into(&old_by_name, &new_by_name, None, &mut issues);
        issues
    }

    /// Diff two method lists scoped to a class. Only public methods
    /// participate; protected and private members are invisible to
    /// consumers and excluded entirely, including from removal and
    /// addition reporting.
    ///
    /// Overloads collapse onto one map entry (last declaration wins).
    pub fn diff_methods(
        &self,
        old_methods: &[FunctionDecl],
        new_methods: &[FunctionDecl],
        class_name: &str,
        issues: &mut Vec<CompatibilityIssue>,
    ) {
        let old_by_name: IndexMap<&str, &FunctionDecl> =
            old_methods.iter().map(|m| (m.name.as_str(), m)).collect();
        let new_by_name: IndexMap<&str, &FunctionDecl> =
            new_methods.iter().map(|m| (m.name.as_str(), m)).collect();
        self.diff_into(&old_by_name, &new_by_name, Some(class_name), issues);
    }

    fn diff_into(
        &self,
        old: &IndexMap<&str, &FunctionDecl>,
        new: &IndexMap<&str, &FunctionDecl>,
        class_name: Option<&str>,
        issues: &mut Vec<CompatibilityIssue>,
    ) {
        let is_method = class_name.is_some();

        for (name, decl) in old {
            if new.contains_key(name) {
                continue;
            }
            if is_method && !decl.access_level.is_public() {
                continue;
            }
            let ctx = SeverityContext::for_old_element(decl.is_deprecated);
            let level = self.policy.level_for(ChangeKind::FunctionRemoved, &ctx);
            issues.push(CompatibilityIssue {
                kind: ChangeKind::FunctionRemoved,
                level,
                score_override: self.policy.score_override(level, &ctx),
                old_signature: Some(decl.signature()),
                new_signature: None,
                description: format!(
                    "{} '{}' has been removed",
                    noun(is_method),
                    name
                ),
                element_name: qualify(class_name, name),
                element_kind: element_kind(is_method),
            });
        }

        for (name, decl) in new {
            if old.contains_key(name) {
                continue;
            }
            if is_method && !decl.access_level.is_public() {
                continue;
            }
            let ctx = SeverityContext::default();
            let level = self.policy.level_for(ChangeKind::FunctionAdded, &ctx);
            issues.push(CompatibilityIssue {
                kind: ChangeKind::FunctionAdded,
                level,
                score_override: None,
                old_signature: None,
                new_signature: Some(decl.signature()),
                description: format!("{} '{}' has been added", noun(is_method), name),
                element_name: qualify(class_name, name),
                element_kind: element_kind(is_method),
            });
        }

        for (name, old_decl) in old {
            let Some(new_decl) = new.get(name) else {
                continue;
            };
            if is_method && !old_decl.access_level.is_public() {
                continue;
            }
            self.diff_pair(old_decl, new_decl, class_name, issues);
        }
    }

    /// Compare one old/new pair sharing a name.
    fn diff_pair(
        &self,
        old: &FunctionDecl,
        new: &FunctionDecl,
        class_name: Option<&str>,
        issues: &mut Vec<CompatibilityIssue>,
    ) {
        let is_method = class_name.is_some();
        let full_name = qualify(class_name, &old.name);
        let ctx = SeverityContext::for_old_element(old.is_deprecated);

        if old.return_type != new.return_type {
            let level = self
                .policy
                .level_for(ChangeKind::FunctionReturnTypeChanged, &ctx);
            issues.push(CompatibilityIssue {
                kind: ChangeKind::FunctionReturnTypeChanged,
                level,
                score_override: self.policy.score_override(level, &ctx),
                old_signature: Some(old.signature()),
                new_signature: Some(new.signature()),
                description: format!(
                    "{} '{}' return type changed from '{}' to '{}'",
                    noun(is_method),
                    old.name,
                    old.return_type,
                    new.return_type
                ),
                element_name: full_name.clone(),
                element_kind: element_kind(is_method),
            });
        }

        self.diff_parameters(old, new, &full_name, is_method, issues);
        self.diff_modifiers(old, new, &full_name, is_method, issues);
    }

    fn diff_parameters(
        &self,
        old: &FunctionDecl,
        new: &FunctionDecl,
        full_name: &str,
        is_method: bool,
        issues: &mut Vec<CompatibilityIssue>,
    ) {
        let old_params = &old.parameters;
        let new_params = &new.parameters;

        if old_params.len() > new_params.len() {
            // Fewer parameters breaks call sites expecting more.
            let ctx = SeverityContext::for_old_element(old.is_deprecated);
            let level = self
                .policy
                .level_for(ChangeKind::FunctionParameterRemoved, &ctx);
            issues.push(CompatibilityIssue {
                kind: ChangeKind::FunctionParameterRemoved,
                level,
                score_override: self.policy.score_override(level, &ctx),
                old_signature: Some(old.signature()),
                new_signature: Some(new.signature()),
                description: format!(
                    "{} '{}' has fewer parameters",
                    noun(is_method),
                    old.name
                ),
                element_name: full_name.to_string(),
                element_kind: element_kind(is_method),
            });
        } else if old_params.len() < new_params.len() {
            // Only the positional tail beyond the old count matters.
            let appended = &new_params[old_params.len()..];
            let all_defaulted = appended.iter().all(|p| p.default_value.is_some());
            let ctx = SeverityContext {
                added_params_have_defaults: Some(all_defaulted),
                old_deprecated: old.is_deprecated,
                conditional_macro: false,
            };
            let level = self
                .policy
                .level_for(ChangeKind::FunctionParameterAdded, &ctx);
            let description = if all_defaulted {
                format!(
                    "{} '{}' added parameters with default values",
                    noun(is_method),
                    old.name
                )
            } else {
                format!(
                    "{} '{}' added required parameters",
                    noun(is_method),
                    old.name
                )
            };
            issues.push(CompatibilityIssue {
                kind: ChangeKind::FunctionParameterAdded,
                level,
                score_override: self.policy.score_override(level, &ctx),
                old_signature: Some(old.signature()),
                new_signature: Some(new.signature()),
                description,
                element_name: full_name.to_string(),
                element_kind: element_kind(is_method),
            });
        }

        // Pairwise type comparison up to the shorter length, one issue per
        // differing position.
        let ctx = SeverityContext::for_old_element(old.is_deprecated);
        for (old_param, new_param) in old_params.iter().zip(new_params.iter()) {
            if old_param.type_name == new_param.type_name {
                continue;
            }
            let level = self
                .policy
                .level_for(ChangeKind::FunctionParameterTypeChanged, &ctx);
            issues.push(CompatibilityIssue {
                kind: ChangeKind::FunctionParameterTypeChanged,
                level,
                score_override: self.policy.score_override(level, &ctx),
                old_signature: Some(old_param.to_string()),
                new_signature: Some(new_param.to_string()),
                description: format!(
                    "{} '{}' parameter '{}' type changed from '{}' to '{}'",
                    noun(is_method),
                    old.name,
                    old_param.name,
                    old_param.type_name,
                    new_param.type_name
                ),
                element_name: full_name.to_string(),
                element_kind: element_kind(is_method),
            });
        }
    }

    fn diff_modifiers(
        &self,
        old: &FunctionDecl,
        new: &FunctionDecl,
        full_name: &str,
        is_method: bool,
        issues: &mut Vec<CompatibilityIssue>,
    ) {
        let ctx = SeverityContext::for_old_element(old.is_deprecated);
        for (modifier_name, flag) in COMPARED_MODIFIERS {
            if flag(old) == flag(new) {
                continue;
            }
            let level = self
                .policy
                .level_for(ChangeKind::FunctionModifierChanged, &ctx);
            issues.push(CompatibilityIssue {
                kind: ChangeKind::FunctionModifierChanged,
                level,
                score_override: self.policy.score_override(level, &ctx),
                old_signature: Some(old.signature()),
                new_signature: Some(new.signature()),
                description: format!(
                    "{} '{}' {} modifier changed",
                    noun(is_method),
                    old.name,
                    modifier_name
                ),
                element_name: full_name.to_string(),
                element_kind: element_kind(is_method),
            });
        }
    }
}

const fn noun(is_method: bool) -> &'static str {
    if is_method {
        "Method"
    } else {
        "Function"
    }
}

const fn element_kind(is_method: bool) -> ElementKind {
    if is_method {
        ElementKind::Method
    } else {
        ElementKind::Function
    }
}

fn qualify(class_name: Option<&str>, name: &str) -> String {
    match class_name {
        Some(class) => format!("{class}::{name}"),
        None => name.to_string(),
    }
}
