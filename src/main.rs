//! cpp-api-diff: structural C++ API compatibility checker
//!
//! Compares two extracted API snapshots and reports breaking changes.

#![allow(clippy::needless_pass_by_value)]

use anyhow::{Context, Result};
use clap::Parser;
use cpp_api_diff::{
    diff::{CompatEngine, SeverityPolicy},
    loader::load_model,
    reports::{reporter_for, ReportContext, ReportFormat},
};
use std::io::Write as _;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "cpp-api-diff")]
#[command(version)]
#[command(about = "Structural C++ API compatibility diff and scoring tool", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Compatible (no breaking changes, or --fail-on-breaking not set)
    1  Breaking changes detected (with --fail-on-breaking)
    2  Error occurred

EXAMPLES:
    # Human-readable compatibility report
    cpp-api-diff v1.json v2.json

    # CI/CD gate on breaking changes
    cpp-api-diff v1.json v2.json --format json --fail-on-breaking

    # Write the report to a file
    cpp-api-diff v1.json v2.json -O report.json --format json")]
struct Cli {
    /// Path to the old/baseline API snapshot
    old: PathBuf,

    /// Path to the new API snapshot
    new: PathBuf,

    /// Output format
    #[arg(short, long, default_value = "text")]
    format: ReportFormat,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    /// Severity policy preset
    #[arg(long, default_value = "default")]
    policy: PolicyPreset,

    /// Additional feature-flag macro prefixes treated as
    /// conditional-compilation (repeatable)
    #[arg(long = "feature-flag-prefix")]
    feature_flag_prefixes: Vec<String>,

    /// Exit non-zero when any ERROR or CRITICAL issue is found
    #[arg(long)]
    fail_on_breaking: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum PolicyPreset {
    /// Macro value changes are WARNING
    Default,
    /// Macro value changes are CRITICAL
    Strict,
}

fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    // Exit 1 is reserved for the --fail-on-breaking gate; hard failures
    // (unreadable snapshot, report error) exit 2 so CI can tell them apart.
    match run(cli) {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(err) => {
            eprintln!("error: {err:#}");
            std::process::exit(2);
        }
    }
}

fn run(cli: Cli) -> Result<i32> {
    let old = load_model(&cli.old)
        .with_context(|| format!("loading old snapshot {}", cli.old.display()))?;
    let new = load_model(&cli.new)
        .with_context(|| format!("loading new snapshot {}", cli.new.display()))?;

    let mut policy = match cli.policy {
        PolicyPreset::Default => SeverityPolicy::new(),
        PolicyPreset::Strict => SeverityPolicy::strict(),
    };
    if !cli.feature_flag_prefixes.is_empty() {
        policy = policy.with_feature_flag_prefixes(cli.feature_flag_prefixes.clone());
    }

    let engine = CompatEngine::with_policy(policy);
    let issues = engine.diff(&old, &new);
    let score = engine.score(&issues, &old);

    let context = ReportContext {
        old_snapshot_path: Some(cli.old.display().to_string()),
        new_snapshot_path: Some(cli.new.display().to_string()),
        scores: *engine.policy().scores(),
    };
    let report = reporter_for(cli.format)
        .generate(&issues, &score, &old, &new, &context)
        .context("rendering report")?;

    match &cli.output_file {
        Some(path) => {
            let mut file = std::fs::File::create(path)
                .with_context(|| format!("creating {}", path.display()))?;
            file.write_all(report.as_bytes())
                .with_context(|| format!("writing {}", path.display()))?;
        }
        None => {
            print!("{report}");
        }
    }

    let breaking = score.error_count + score.critical_count;
    if cli.fail_on_breaking && breaking > 0 {
        tracing::warn!(breaking, "breaking changes detected");
        return Ok(1);
    }
    Ok(0)
}
