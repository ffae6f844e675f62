//! End-to-end tests reading Trivy reports from disk.

use std::io::Write;

use tempfile::NamedTempFile;
use trivy_issues::errors::ParsingError;
use trivy_issues::models::issue::Severity;
use trivy_issues::models::report::Report;
use trivy_issues::parsers::trivy::TrivyParser;
use trivy_issues::parsers::{FileReaderFactory, IssueParser, ReaderFactory};
use trivy_issues::services::fingerprint;

fn write_report(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(content.as_bytes()).expect("write report");
    file.flush().expect("flush report");
    file
}

fn parse_file(file: &NamedTempFile) -> Result<Report, ParsingError> {
    TrivyParser::new().parse(&FileReaderFactory::new(file.path()))
}

#[test]
fn parses_report_file() {
    let file = write_report(include_str!("fixtures/trivy.json"));
    let report = parse_file(&file).unwrap();

    assert_eq!(report.len(), 2);
    let packages: Vec<&str> = report.iter().map(|i| i.package_name()).collect();
    assert_eq!(packages, vec!["bash", "coreutils"]);
    assert!(report
        .iter()
        .all(|i| i.file_name() == "ubuntu (ubuntu 20.04)" && i.category() == "ubuntu"));
    assert_eq!(report.size_of(Severity::WarningLow), 2);
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let factory = FileReaderFactory::new(dir.path().join("absent.json"));
    let result = TrivyParser::new().parse(&factory);

    let err = result.unwrap_err();
    assert!(matches!(err, ParsingError::Io(_)));
    assert!(err.is_io());
    assert!(factory.file_name().ends_with("absent.json"));
}

#[test]
fn truncated_file_is_decode_error() {
    let file = write_report("[{\"Target\": \"alpine\", \"Vulnerabilities\": [");
    let err = parse_file(&file).unwrap_err();
    assert!(matches!(err, ParsingError::Decode(_)));
}

#[test]
fn object_root_yields_no_issues() {
    let file = write_report(r#"{"SchemaVersion": 2, "Results": []}"#);
    let report = parse_file(&file).unwrap();
    assert!(report.is_empty());
}

#[test]
fn merged_reports_keep_file_order() {
    let first = write_report(include_str!("fixtures/trivy.json"));
    let second = write_report(include_str!("fixtures/trivy_mixed.json"));

    let mut merged = Report::new();
    merged.add_all(parse_file(&first).unwrap());
    merged.add_all(parse_file(&second).unwrap());

    assert_eq!(merged.len(), 8);
    assert_eq!(merged.get(0).unwrap().package_name(), "bash");
    assert_eq!(merged.get(2).unwrap().package_name(), "libcrypto3");
    assert_eq!(merged.get(2).unwrap().severity(), Severity::Error);
    assert_eq!(merged.summary().total, 8);
}

#[test]
fn fingerprints_are_stable_across_runs() {
    let file = write_report(include_str!("fixtures/trivy_mixed.json"));
    let first: Vec<String> = parse_file(&file)
        .unwrap()
        .iter()
        .map(fingerprint::compute)
        .collect();
    let second: Vec<String> = parse_file(&file)
        .unwrap()
        .iter()
        .map(fingerprint::compute)
        .collect();
    assert_eq!(first, second);
}

#[test]
fn text_after_report_in_file_is_ignored() {
    let content = format!("{}\n%EOF\n", include_str!("fixtures/trivy.json"));
    let file = write_report(&content);
    let report = parse_file(&file).unwrap();
    assert_eq!(report.len(), 2);
}
