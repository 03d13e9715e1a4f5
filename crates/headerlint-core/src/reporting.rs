use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::check::{CheckReport, HeaderState};
use crate::domain::diagnostic::{Diagnostic, Severity};
use crate::domain::error::Result;

pub const REPORT_SCHEMA_VERSION: &str = "1.0";

/// One checked file in the persisted report.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FileReport {
    pub path: String,
    pub state: HeaderState,
    pub has_header: Option<bool>,
    /// SHA-256 of the source as read, before any fix.
    pub content_digest: String,
    pub fixed: bool,
    pub diagnostics: Vec<Diagnostic>,
}

impl FileReport {
    pub fn new(path: impl Into<String>, source: &str, report: CheckReport, fixed: bool) -> Self {
        Self {
            path: path.into(),
            state: report.state,
            has_header: report.has_header,
            content_digest: content_digest(source),
            fixed,
            diagnostics: report.diagnostics,
        }
    }

    /// Errors still present on disk: zero once the file was rewritten with
    /// fixes for every error.
    pub fn unfixed_errors(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.is_error() && !(self.fixed && d.fixable))
            .count()
    }
}

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct RunTotals {
    pub files: usize,
    pub files_with_header: usize,
    pub errors: usize,
    pub warnings: usize,
    pub fixed_files: usize,
    pub unfixed_errors: usize,
}

/// Artifact written by `--report`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RunReport {
    pub schema_version: String,
    pub generated_at: DateTime<Utc>,
    pub run_id: String,
    pub repository: String,
    pub files: Vec<FileReport>,
    pub totals: RunTotals,
}

impl RunReport {
    pub fn new(
        run_id: impl Into<String>,
        repository: impl Into<String>,
        files: Vec<FileReport>,
    ) -> Self {
        let totals = totals(&files);
        Self {
            schema_version: REPORT_SCHEMA_VERSION.to_string(),
            generated_at: Utc::now(),
            run_id: run_id.into(),
            repository: repository.into(),
            files,
            totals,
        }
    }

    pub fn has_unfixed_errors(&self) -> bool {
        self.totals.unfixed_errors > 0
    }
}

fn totals(files: &[FileReport]) -> RunTotals {
    let mut totals = RunTotals {
        files: files.len(),
        ..RunTotals::default()
    };
    for file in files {
        if file.has_header == Some(true) {
            totals.files_with_header += 1;
        }
        if file.fixed {
            totals.fixed_files += 1;
        }
        for diag in &file.diagnostics {
            match diag.severity {
                Severity::Error => totals.errors += 1,
                Severity::Warning => totals.warnings += 1,
            }
        }
        totals.unfixed_errors += file.unfixed_errors();
    }
    totals
}

/// Hex SHA-256 of `source`.
pub fn content_digest(source: &str) -> String {
    hex::encode(Sha256::digest(source.as_bytes()))
}

/// Write the report as pretty JSON.
pub fn write_report_json(path: &Path, report: &RunReport) -> Result<()> {
    let content = serde_json::to_string_pretty(report)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Human-readable block for one finding.
pub fn render_finding(path: &str, diag: &Diagnostic) -> String {
    let level = match diag.severity {
        Severity::Error => "error",
        Severity::Warning => "warning",
    };
    let mut out = format!(
        "{level}[{}]: {}\n  --> {path}:{}\n",
        diag.code, diag.message, diag.line
    );
    if diag.fixable {
        out.push_str("  = fixable with --fix\n");
    }
    out
}

pub fn render_summary(totals: &RunTotals) -> String {
    format!(
        "checked {} file(s): {} error(s), {} warning(s), {} file(s) fixed, {} error(s) remaining\n",
        totals.files, totals.errors, totals.warnings, totals.fixed_files, totals.unfixed_errors
    )
}
