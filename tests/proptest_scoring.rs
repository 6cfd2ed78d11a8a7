//! Property-based tests for severity scoring invariants.
//!
//! Ensures the aggregate assessment stays within its documented bounds for
//! arbitrary issue lists, independent of how the issues were produced.

use cpp_api_diff::diff::{
    score_issues, summarize, ChangeKind, CompatibilityIssue, ElementKind, RiskLevel, Severity,
    SeverityScores,
};
use cpp_api_diff::model::ApiModel;
use proptest::prelude::*;

fn severity_strategy() -> impl Strategy<Value = Severity> {
    prop_oneof![
        Just(Severity::Info),
        Just(Severity::Warning),
        Just(Severity::Critical),
        Just(Severity::Error),
    ]
}

fn issue_strategy() -> impl Strategy<Value = CompatibilityIssue> {
    (severity_strategy(), "[a-z]{1,12}", any::<bool>()).prop_map(
        |(level, name, deprecated)| {
            let scores = SeverityScores::default();
            let score_override = deprecated.then(|| scores.score_of(level) * 0.5);
            CompatibilityIssue {
                kind: ChangeKind::FunctionRemoved,
                level,
                score_override,
                old_signature: None,
                new_signature: None,
                description: String::new(),
                element_name: name,
                element_kind: ElementKind::Function,
            }
        },
    )
}

proptest! {
    #[test]
    fn percentage_stays_in_bounds(issues in prop::collection::vec(issue_strategy(), 0..64)) {
        let score = score_issues(&issues, &ApiModel::new(), &SeverityScores::default());
        prop_assert!(score.incompatibility_percentage >= 0.0);
        prop_assert!(score.incompatibility_percentage <= 100.0);
        prop_assert!(score.total_score <= score.max_possible_score);
        prop_assert!(score.total_score >= 0.0);
    }

    #[test]
    fn level_counts_partition_issues(issues in prop::collection::vec(issue_strategy(), 0..64)) {
        let score = score_issues(&issues, &ApiModel::new(), &SeverityScores::default());
        prop_assert_eq!(
            score.error_count + score.critical_count + score.warning_count + score.info_count,
            issues.len()
        );

        let summary = summarize(&issues);
        prop_assert_eq!(
            summary.breaking_changes + summary.backward_compatible + summary.api_additions,
            summary.total_issues
        );
    }

    #[test]
    fn risk_none_only_for_harmless_diffs(issues in prop::collection::vec(issue_strategy(), 0..64)) {
        let score = score_issues(&issues, &ApiModel::new(), &SeverityScores::default());
        if score.risk_level == RiskLevel::None {
            prop_assert_eq!(score.error_count, 0);
            prop_assert_eq!(score.critical_count, 0);
            prop_assert!(score.incompatibility_percentage <= 0.0);
        }
    }

    #[test]
    fn broken_count_never_exceeds_non_info_issues(
        issues in prop::collection::vec(issue_strategy(), 0..64)
    ) {
        let score = score_issues(&issues, &ApiModel::new(), &SeverityScores::default());
        let non_info = issues.iter().filter(|i| i.level != Severity::Info).count();
        // Function issues never flag an owner, so broken elements are
        // bounded by the breaking issue count.
        prop_assert!(score.broken_old_api_count <= non_info);
    }
}
