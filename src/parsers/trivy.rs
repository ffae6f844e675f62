//! Trivy vulnerability report parser.
//!
//! Walks the JSON array Trivy emits (one object per scanned target, each with
//! a `Vulnerabilities` array) and turns every vulnerability into an issue.
//! Schema deviations are tolerated: anything that is not where it should be
//! is skipped or replaced by a default instead of failing the run.

use std::io::Read;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::errors::ParsingError;
use crate::models::issue::{Issue, IssueBuilder, Severity};
use crate::models::report::Report;
use crate::parsers::json::{get_array, get_string, objects};
use crate::parsers::{IssueParser, ReaderFactory};

const REPORT_TARGET: &str = "Target";
const REPORT_TYPE: &str = "Type";
const REPORT_ISSUES: &str = "Vulnerabilities";

const ISSUE_SEVERITY: &str = "Severity";
const ISSUE_PKG_NAME: &str = "PkgName";
const ISSUE_TYPE: &str = "VulnerabilityID";
const ISSUE_TITLE: &str = "Title";
const ISSUE_DESCRIPTION: &str = "Description";

/// Parser for Trivy JSON reports.
#[derive(Debug, Default)]
pub struct TrivyParser;

impl TrivyParser {
    pub fn new() -> Self {
        Self
    }

    /// Convert an already decoded document into issues.
    ///
    /// Any root other than an array yields an empty report.
    pub fn parse_value(&self, document: &Value) -> Report {
        let mut report = Report::new();

        let Some(entries) = document.as_array() else {
            tracing::debug!("Report root is not an array, nothing to extract");
            return report;
        };

        for entry in objects(entries) {
            report.add_all(self.extract(entry));
        }

        let skipped = entries.iter().filter(|e| !e.is_object()).count();
        if skipped > 0 {
            tracing::debug!(skipped, "Skipped non-object report entries");
        }

        report
    }

    /// Extract the issues of a single report object.
    pub fn extract(&self, report_object: &Map<String, Value>) -> Report {
        let mut report = Report::new();

        let file_name = get_string(report_object, REPORT_TARGET, "");
        let category = get_string(report_object, REPORT_TYPE, "");

        let Some(vulnerabilities) = get_array(report_object, REPORT_ISSUES) else {
            tracing::debug!(target_name = file_name, "Report object has no vulnerability array");
            return report;
        };

        tracing::debug!(
            target_name = file_name,
            category,
            count = vulnerabilities.len(),
            "Extracting vulnerabilities"
        );

        for vulnerability in objects(vulnerabilities) {
            report.add(self.create_issue(vulnerability, file_name, category));
        }

        report
    }

    /// Map a Trivy severity to the four-level scale.
    ///
    /// Matching is exact and case-sensitive. `LOW`, `UNKNOWN` and anything
    /// unrecognized all land on `WarningLow`.
    pub fn map_severity(&self, tool_severity: &str) -> Severity {
        match tool_severity {
            "CRITICAL" => Severity::Error,
            "HIGH" => Severity::WarningHigh,
            "MEDIUM" => Severity::WarningNormal,
            "LOW" | "UNKNOWN" => Severity::WarningLow,
            _ => Severity::WarningLow,
        }
    }

    fn create_issue(
        &self,
        vulnerability: &Map<String, Value>,
        file_name: &str,
        category: &str,
    ) -> Issue {
        IssueBuilder::new()
            .file_name(file_name)
            .message(get_string(vulnerability, ISSUE_TITLE, ""))
            .description(get_string(vulnerability, ISSUE_DESCRIPTION, ""))
            .severity(self.map_severity(get_string(vulnerability, ISSUE_SEVERITY, "")))
            .package_name(get_string(vulnerability, ISSUE_PKG_NAME, ""))
            .category(category)
            .issue_type(get_string(vulnerability, ISSUE_TYPE, ""))
            .build()
    }
}

/// Decode the first JSON value of `reader`.
///
/// Text after that value is never read. Nesting depth is unbounded; deep
/// structures grow the stack on the heap instead of overflowing it.
fn read_document(reader: impl Read) -> Result<Value, serde_json::Error> {
    let mut deserializer = serde_json::Deserializer::from_reader(reader);
    deserializer.disable_recursion_limit();
    Value::deserialize(serde_stacker::Deserializer::new(&mut deserializer))
}

impl IssueParser for TrivyParser {
    fn parse(&self, reader_factory: &dyn ReaderFactory) -> Result<Report, ParsingError> {
        let document = {
            let reader = reader_factory.create()?;
            read_document(reader)?
        };

        let report = self.parse_value(&document);
        tracing::info!(
            source = %reader_factory.file_name(),
            issues = report.len(),
            "Parsed Trivy report"
        );
        Ok(report)
    }

    fn source_tool(&self) -> &str {
        "Trivy"
    }
}
