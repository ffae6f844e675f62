use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use mimalloc::MiMalloc;
use serde::Serialize;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use trivy_issues::config::AppConfig;
use trivy_issues::models::issue::Issue;
use trivy_issues::models::report::Report;
use trivy_issues::parsers::trivy::TrivyParser;
use trivy_issues::parsers::{BufferReaderFactory, FileReaderFactory, IssueParser, ReaderFactory};
use trivy_issues::services::fingerprint;

// M-MIMALLOC-APP: Use mimalloc as global allocator for improved performance.
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser, Debug)]
#[command(name = "trivy-issues")]
#[command(version, about = "Convert Trivy JSON reports into normalized issues", long_about = None)]
struct Args {
    /// Trivy JSON reports to read; `-` or none reads stdin
    reports: Vec<PathBuf>,

    /// Print per-severity counts instead of the issues
    #[arg(long)]
    summary: bool,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// Attach a deduplication fingerprint to every issue
    #[arg(long)]
    fingerprints: bool,
}

#[derive(Serialize)]
struct FingerprintedIssue<'a> {
    fingerprint: String,
    #[serde(flatten)]
    issue: &'a Issue,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let config = AppConfig::from_env();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            config
                .log_json
                .then(|| fmt::layer().json().with_writer(io::stderr)),
        )
        .with((!config.log_json).then(|| fmt::layer().with_writer(io::stderr)))
        .init();

    let parser = TrivyParser::new();
    let mut report = Report::new();

    let stdin_only = args.reports.is_empty();
    let sources = if stdin_only {
        vec![PathBuf::from("-")]
    } else {
        args.reports.clone()
    };

    for path in &sources {
        let factory: Box<dyn ReaderFactory> = if path.as_os_str() == "-" {
            Box::new(
                BufferReaderFactory::from_reader("<stdin>", io::stdin().lock())
                    .context("Failed to read report from stdin")?,
            )
        } else {
            Box::new(FileReaderFactory::new(path))
        };

        let parsed = parser
            .parse(factory.as_ref())
            .with_context(|| format!("Failed to parse {}", factory.file_name()))?;
        report.add_all(parsed);
    }

    tracing::info!(
        tool = parser.source_tool(),
        sources = sources.len(),
        issues = report.len(),
        "Conversion finished"
    );

    let pretty = args.pretty || config.pretty_output;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if args.summary {
        write_json(&mut out, &report.summary(), pretty)?;
    } else if args.fingerprints {
        let issues: Vec<FingerprintedIssue<'_>> = report
            .iter()
            .map(|issue| FingerprintedIssue {
                fingerprint: fingerprint::compute(issue),
                issue,
            })
            .collect();
        write_json(&mut out, &issues, pretty)?;
    } else {
        write_json(&mut out, &report, pretty)?;
    }

    Ok(())
}

fn write_json<T: Serialize>(out: &mut impl Write, value: &T, pretty: bool) -> anyhow::Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *out, value)?;
    } else {
        serde_json::to_writer(&mut *out, value)?;
    }
    writeln!(out)?;
    Ok(())
}
