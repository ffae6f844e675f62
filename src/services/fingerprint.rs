//! Fingerprint computation for deduplicating issues across scans.
//!
//! The fingerprint covers the fields that identify a vulnerable package in a
//! target and excludes scanner prose (title, description) and severity, which
//! change between database updates without the underlying issue changing.

use sha2::{Digest, Sha256};

use crate::models::issue::Issue;

/// Compute an issue fingerprint.
///
/// Inputs: file_name, category, package_name, type.
pub fn compute(issue: &Issue) -> String {
    hash(&format!(
        "SCA:{}:{}:{}:{}",
        issue.file_name(),
        issue.category(),
        issue.package_name(),
        issue.issue_type()
    ))
}

/// SHA-256 hash a string and return hex-encoded digest.
fn hash(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::issue::{IssueBuilder, Severity};

    fn bash_issue() -> IssueBuilder {
        IssueBuilder::new()
            .file_name("ubuntu (ubuntu 20.04)")
            .category("ubuntu")
            .package_name("bash")
            .issue_type("CVE-2019-18276")
    }

    #[test]
    fn same_inputs_same_fingerprint() {
        let fp1 = compute(&bash_issue().build());
        let fp2 = compute(&bash_issue().build());
        assert_eq!(fp1, fp2);
        assert_eq!(fp1.len(), 64);
    }

    #[test]
    fn ignores_prose_and_severity() {
        let fp1 = compute(&bash_issue().message("old title").build());
        let fp2 = compute(
            &bash_issue()
                .message("new title")
                .description("updated advisory text")
                .severity(Severity::WarningHigh)
                .build(),
        );
        assert_eq!(fp1, fp2);
    }

    #[test]
    fn different_cve_different_fingerprint() {
        let fp1 = compute(&bash_issue().build());
        let fp2 = compute(&bash_issue().issue_type("CVE-2022-3715").build());
        assert_ne!(fp1, fp2);
    }

    #[test]
    fn different_target_different_fingerprint() {
        let fp1 = compute(&bash_issue().build());
        let fp2 = compute(&bash_issue().file_name("debian (debian 11.6)").build());
        assert_ne!(fp1, fp2);
    }
}
