//! headerlint - file-level DocBlock linter
//!
//! The `headerlint` command checks that every PHP source file opens with the
//! canonical DocBlock header:
//!
//! ```text
//! /**
//!  * @see       https://github.com/<owner>/<name> for the canonical source repository
//!  * @copyright https://github.com/<owner>/<name>/blob/master/COPYRIGHT.md Copyright
//!  * @license   https://github.com/<owner>/<name>/blob/master/LICENSE.md New BSD License
//!  */
//! ```
//!
//! ## Commands
//!
//! - `check`: report header findings, optionally fixing them in place

mod walk;

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::task::JoinSet;
use tracing::{info, warn, Level};
use uuid::Uuid;

use headerlint_core::obs::FileSpan;
use headerlint_core::{
    render_finding, render_summary, resolve_identity, write_report_json, FileHeaderCheck,
    FileReport, FixMode, FsLicenseFiles, HeaderLintConfig, LicenseRegenerator, NoopRegenerator,
    RecordingRegenerator, RepositoryIdentity, RunReport, METRICS,
};

#[derive(Parser)]
#[command(name = "headerlint")]
#[command(author = "Stevedores Org")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "File-level DocBlock header linter", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check file-level DocBlocks
    Check(CheckArgs),
}

#[derive(clap::Args, Debug, Clone)]
struct CheckArgs {
    /// Files or directories to check
    #[arg(default_value = ".")]
    paths: Vec<PathBuf>,

    /// Apply fixes in place
    #[arg(long)]
    fix: bool,

    /// Repository identity (owner/name)
    #[arg(long, env = "HEADERLINT_REPOSITORY")]
    repository: Option<String>,

    /// Config file (default: <project-root>/headerlint.toml if present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Project root used for identity lookup and licence files
    #[arg(long, default_value = ".")]
    project_root: PathBuf,

    /// Write a JSON report to this path
    #[arg(long)]
    report: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };
    headerlint_core::telemetry::init_tracing(cli.json, level);

    match cli.command {
        Commands::Check(args) => {
            let run = cmd_check(&args).await?;
            print!("{}", render_run(&run));
            METRICS.flush();
            if run.has_unfixed_errors() {
                Ok(ExitCode::FAILURE)
            } else {
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

/// Run the check over every collected file and return the run report.
async fn cmd_check(args: &CheckArgs) -> Result<RunReport> {
    let config = match &args.config {
        Some(path) => HeaderLintConfig::load(path),
        None => HeaderLintConfig::load_from_root(&args.project_root),
    }
    .context("Failed to load headerlint config")?;

    let identity = resolve_identity(
        &args.project_root,
        args.repository.as_deref(),
        config.repository.as_deref(),
    )
    .context("Failed to resolve repository identity")?;
    let identity = Arc::new(identity);

    let mode = if args.fix {
        FixMode::Apply
    } else {
        FixMode::Report
    };
    // regeneration requests are collected during the parallel run and
    // applied once after it
    let license_files = license_files_for(mode, &config, &args.project_root, &identity);
    let recorder = Arc::new(RecordingRegenerator::new());
    let regenerator: Arc<dyn LicenseRegenerator> = match &license_files {
        Some(_) => Arc::clone(&recorder) as Arc<dyn LicenseRegenerator>,
        None => Arc::new(NoopRegenerator),
    };
    let check = Arc::new(FileHeaderCheck::new(Arc::clone(&identity), regenerator));

    let files = walk::collect_files(&args.paths, &config)?;
    let run_id = Uuid::new_v4().to_string();
    info!(
        run_id = %run_id,
        repository = %identity,
        files = files.len(),
        fix = args.fix,
        "check started"
    );

    let mut set = JoinSet::new();
    for path in files {
        let check = Arc::clone(&check);
        set.spawn_blocking(move || check_file(&check, &path, mode));
    }

    let mut reports = Vec::new();
    while let Some(joined) = set.join_next().await {
        match joined {
            Ok(Some(report)) => reports.push(report),
            Ok(None) => {}
            Err(e) => warn!(error = %e, "file check task failed"),
        }
    }
    reports.sort_by(|a, b| a.path.cmp(&b.path));

    if let (Some(files), Some(range)) = (&license_files, recorder.merged()) {
        files.regenerate(&range);
    }

    let run = RunReport::new(run_id, identity.to_string(), reports);
    if let Some(path) = &args.report {
        write_report_json(path, &run)
            .with_context(|| format!("Failed to write report {:?}", path))?;
    }
    Ok(run)
}

fn license_files_for(
    mode: FixMode,
    config: &HeaderLintConfig,
    project_root: &Path,
    identity: &RepositoryIdentity,
) -> Option<FsLicenseFiles> {
    (mode == FixMode::Apply && config.regenerate_license_files).then(|| {
        FsLicenseFiles::new(project_root, config.copyright_holder_for(identity))
    })
}

/// Check one file; write the fixed text back when fixes landed. Unreadable
/// files are logged and skipped.
fn check_file(check: &FileHeaderCheck, path: &Path, mode: FixMode) -> Option<FileReport> {
    let name = path.display().to_string();
    let _span = FileSpan::enter(&name);

    let source = match std::fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) => {
            warn!(error = %e, "skipping unreadable file");
            return None;
        }
    };

    Some(check_and_write(check, name, &source, mode, |text| {
        std::fs::write(path, text)
    }))
}

/// Check `source` and hand the fixed text, if any, to `write`. A failed
/// write is logged and the file is reported as not fixed.
fn check_and_write(
    check: &FileHeaderCheck,
    name: String,
    source: &str,
    mode: FixMode,
    write: impl FnOnce(&str) -> std::io::Result<()>,
) -> FileReport {
    let result = check.check_source(&name, source, mode);
    let fixed = match result.fixed.as_deref().map(write) {
        Some(Ok(())) => true,
        Some(Err(e)) => {
            warn!(error = %e, "failed to write fixes");
            false
        }
        None => false,
    };
    FileReport::new(name, source, result.report, fixed)
}

fn render_run(run: &RunReport) -> String {
    let mut out = String::new();
    for file in &run.files {
        for diag in &file.diagnostics {
            out.push_str(&render_finding(&file.path, diag));
        }
    }
    if !out.is_empty() {
        out.push('\n');
    }
    out.push_str(&render_summary(&run.totals));
    out
}
