//! Enum change computer.

use super::issue::{CompatibilityIssue, ElementKind};
use super::severity::{ChangeKind, SeverityContext, SeverityPolicy};
use crate::model::EnumDecl;
use indexmap::IndexMap;

/// Computes enum-level changes.
///
/// Enums have no access concept in this model; the whole declaration
/// always participates. Member value tokens are compared verbatim: enum
/// values are routinely relied on for serialization and ABI, so any change
/// is breaking by default.
pub struct EnumDiffer<'a> {
    policy: &'a SeverityPolicy,
}

impl<'a> EnumDiffer<'a> {
    #[must_use]
    pub const fn new(policy: &'a SeverityPolicy) -> Self {
        Self { policy }
    }

    #[must_use]
    pub fn diff(
        &self,
        old: &IndexMap<String, EnumDecl>,
        new: &IndexMap<String, EnumDecl>,
    ) -> Vec<CompatibilityIssue> {
        let mut issues = Vec::new();
        let ctx = SeverityContext::default();

        for name in old.keys() {
            if new.contains_key(name) {
                continue;
            }
            let level = self.policy.level_for(ChangeKind::EnumRemoved, &ctx);
            issues.push(CompatibilityIssue {
                kind: ChangeKind::EnumRemoved,
                level,
                score_override: None,
                old_signature: None,
                new_signature: None,
                description: format!("Enum '{name}' has been removed"),
                element_name: name.clone(),
                element_kind: ElementKind::Enum,
            });
        }

        for name in new.keys() {
            if old.contains_key(name) {
                continue;
            }
            let level = self.policy.level_for(ChangeKind::EnumAdded, &ctx);
            issues.push(CompatibilityIssue {
                kind: ChangeKind::EnumAdded,
                level,
                score_override: None,
                old_signature: None,
                new_signature: None,
                description: format!("Enum '{name}' has been added"),
                element_name: name.clone(),
                element_kind: ElementKind::Enum,
            });
        }

        for (name, old_enum) in old {
            let Some(new_enum) = new.get(name) else {
                continue;
            };
            self.diff_members(old_enum, new_enum, &mut issues);
        }

        issues
    }

    fn diff_members(
        &self,
        old: &EnumDecl,
        new: &EnumDecl,
        issues: &mut Vec<CompatibilityIssue>,
    ) {
        let ctx = SeverityContext::default();
        let old_members: IndexMap<&str, &crate::model::EnumMember> =
            old.members.iter().map(|m| (m.name.as_str(), m)).collect();
        let new_members: IndexMap<&str, &crate::model::EnumMember> =
            new.members.iter().map(|m| (m.name.as_str(), m)).collect();

        for name in old_members.keys() {
            if new_members.contains_key(name) {
                continue;
            }
            let level = self.policy.level_for(ChangeKind::EnumMemberRemoved, &ctx);
            issues.push(CompatibilityIssue {
                kind: ChangeKind::EnumMemberRemoved,
                level,
                score_override: None,
                old_signature: None,
                new_signature: None,
                description: format!(
                    "Enum '{}' member '{}' has been removed",
                    old.name, name
                ),
                element_name: format!("{}::{}", old.name, name),
                element_kind: ElementKind::EnumMember,
            });
        }

        for name in new_members.keys() {
            if old_members.contains_key(name) {
                continue;
            }
            let level = self.policy.level_for(ChangeKind::EnumMemberAdded, &ctx);
            issues.push(CompatibilityIssue {
                kind: ChangeKind::EnumMemberAdded,
                level,
                score_override: None,
                old_signature: None,
                new_signature: None,
                description: format!("Enum '{}' added member '{}'", old.name, name),
                element_name: format!("{}::{}", old.name, name),
                element_kind: ElementKind::EnumMember,
            });
        }

        for (name, old_member) in &old_members {
            let Some(new_member) = new_members.get(name) else {
                continue;
            };
            if old_member.value == new_member.value {
                continue;
            }
            let level = self
                .policy
                .level_for(ChangeKind::EnumMemberValueChanged, &ctx);
            issues.push(CompatibilityIssue {
                kind: ChangeKind::EnumMemberValueChanged,
                level,
                score_override: None,
                old_signature: Some(old_member.signature()),
                new_signature: Some(new_member.signature()),
                description: format!(
                    "Enum '{}' member '{}' value changed",
                    old.name, name
                ),
                element_name: format!("{}::{}", old.name, name),
                element_kind: ElementKind::EnumMember,
            });
        }
    }
}
