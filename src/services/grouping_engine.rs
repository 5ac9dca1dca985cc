use std::collections::BTreeMap;
use crate::enums::group_by::GroupBy;
use crate::structs::issue_group::IssueGroup;
use crate::structs::security_issue::SecurityIssue;

/// Bucket order for severity grouping. Unrecognized labels land after
/// `low`, in first-seen order.
const SEVERITY_BUCKET_ORDER: &[&str] = &["high", "medium", "low"];

/// Buckets and orders issue records for table rendering. Pure and
/// side-effect-free: the same input always yields the same output.
pub struct GroupingEngine;

impl GroupingEngine {
    /// `None` means "no grouping" - the caller renders a flat table in
    /// insertion order (optionally pre-sorted via [`Self::sort_by_severity`]).
    pub fn group(issues: &[SecurityIssue], by: GroupBy) -> Option<Vec<IssueGroup>> {
        match by {
            GroupBy::None => None,
            GroupBy::Severity => Some(Self::group_by_severity(issues)),
            GroupBy::File => Some(Self::group_by_file(issues)),
        }
    }

    fn group_by_severity(issues: &[SecurityIssue]) -> Vec<IssueGroup> {
        // Insertion-ordered buckets: a Vec of (key, bucket) pairs keeps
        // unrecognized severities in first-seen order.
        let mut buckets: Vec<(String, Vec<SecurityIssue>)> = Vec::new();

        for issue in issues {
            let key = issue.severity_key();
            match buckets.iter_mut().find(|(name, _)| *name == key) {
                Some((_, bucket)) => bucket.push(issue.clone()),
                None => buckets.push((key, vec![issue.clone()])),
            }
        }

        let mut groups = Vec::new();

        for &known in SEVERITY_BUCKET_ORDER {
            if let Some(position) = buckets.iter().position(|(name, _)| name == known) {
                let (group_name, issues) = buckets.remove(position);
                groups.push(IssueGroup { group_name, issues });
            }
        }

        // Whatever is left is unrecognized and sorts after low.
        for (group_name, issues) in buckets {
            groups.push(IssueGroup { group_name, issues });
        }

        groups
    }

    fn group_by_file(issues: &[SecurityIssue]) -> Vec<IssueGroup> {
        let mut buckets: BTreeMap<String, Vec<SecurityIssue>> = BTreeMap::new();

        for issue in issues {
            buckets
                .entry(issue.file_name.clone())
                .or_default()
                .push(issue.clone());
        }

        buckets
            .into_iter()
            .map(|(group_name, issues)| IssueGroup { group_name, issues })
            .collect()
    }

    /// Flat-table pre-sort for the un-grouped view: critical=1, high=2,
    /// medium=3, low=4, unrecognized last. Stable - ties keep their
    /// original relative order.
    pub fn sort_by_severity(issues: &mut [SecurityIssue]) {
        issues.sort_by_key(SecurityIssue::severity_rank);
    }
}
