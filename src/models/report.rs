//! Ordered collection of issues produced by a parse run.

use std::slice;

use serde::Serialize;

use crate::models::issue::{Issue, Severity};

/// Issues in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Report {
    issues: Vec<Issue>,
}

/// Per-severity issue counts of a report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeveritySummary {
    pub error: usize,
    pub high: usize,
    pub normal: usize,
    pub low: usize,
    pub total: usize,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, issue: Issue) {
        self.issues.push(issue);
    }

    /// Append every issue of `other`, keeping its order.
    pub fn add_all(&mut self, other: Report) {
        self.issues.extend(other.issues);
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Issue> {
        self.issues.get(index)
    }

    pub fn iter(&self) -> slice::Iter<'_, Issue> {
        self.issues.iter()
    }

    /// Number of issues with the given severity.
    pub fn size_of(&self, severity: Severity) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.severity() == severity)
            .count()
    }

    pub fn summary(&self) -> SeveritySummary {
        let mut summary = SeveritySummary::default();
        for issue in &self.issues {
            match issue.severity() {
                Severity::Error => summary.error += 1,
                Severity::WarningHigh => summary.high += 1,
                Severity::WarningNormal => summary.normal += 1,
                Severity::WarningLow => summary.low += 1,
            }
        }
        summary.total = self.issues.len();
        summary
    }
}

impl IntoIterator for Report {
    type Item = Issue;
    type IntoIter = std::vec::IntoIter<Issue>;

    fn into_iter(self) -> Self::IntoIter {
        self.issues.into_iter()
    }
}

impl<'a> IntoIterator for &'a Report {
    type Item = &'a Issue;
    type IntoIter = slice::Iter<'a, Issue>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<Issue> for Report {
    fn from_iter<I: IntoIterator<Item = Issue>>(iter: I) -> Self {
        Self {
            issues: iter.into_iter().collect(),
        }
    }
}
