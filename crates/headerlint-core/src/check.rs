//! File-level DocBlock check.
//!
//! Single pass over one file's [`TokenStream`]:
//!
//! 1. locate the leading DocBlock (or stop: skipped, wrong style, missing)
//! 2. blank-line rules around it
//! 3. walk its tags: duplicates, the deprecated `@link` alias, content
//!    presence and the canonical content of each required tag
//! 4. presence and order of the required tags
//!
//! Fixable findings carry a [`ProposedEdit`]; the [`Fixer`] decides whether it
//! lands. Diagnostics are the same in report and apply mode.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::diagnostic::{Diagnostic, DiagnosticCode, ProposedEdit, Severity};
use crate::domain::tag::{DocTag, FoundTags};
use crate::domain::token::{DocBlockSpan, TokenKind, TokenStream};
use crate::fixer::{FixMode, Fixer};
use crate::identity::RepositoryIdentity;
use crate::lexer::lex;
use crate::locator::{check_spacing, locate, Located};
use crate::metrics::METRICS;
use crate::obs::{emit_file_checked, emit_fix_applied};
use crate::order::check_order;
use crate::regenerate::LicenseRegenerator;
use crate::validator::validate_content;

/// Terminal state of one file's check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderState {
    /// Reserved auxiliary file; nothing inspected.
    Skipped,
    /// No start-of-file marker.
    NotApplicable,
    WrongStyle,
    Missing,
    /// A file-level DocBlock exists; tag findings may still be present.
    Valid,
}

impl HeaderState {
    pub fn as_str(self) -> &'static str {
        match self {
            HeaderState::Skipped => "skipped",
            HeaderState::NotApplicable => "not_applicable",
            HeaderState::WrongStyle => "wrong_style",
            HeaderState::Missing => "missing",
            HeaderState::Valid => "valid",
        }
    }
}

/// Everything one check produced.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CheckReport {
    pub state: HeaderState,

    /// In emission order.
    pub diagnostics: Vec<Diagnostic>,

    /// "File has header block" metric; `None` when it was not recorded.
    pub has_header: Option<bool>,

    /// Token index the host may skip to. Always the end of the stream: only
    /// the leading block is ever inspected.
    pub resume_at: usize,
}

impl CheckReport {
    pub fn errors(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warnings(&self) -> usize {
        self.count(Severity::Warning)
    }

    fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }
}

/// Result of [`FileHeaderCheck::check_source`].
#[derive(Debug, Clone)]
pub struct SourceCheck {
    pub report: CheckReport,
    /// Rewritten text, present only when at least one fix landed.
    pub fixed: Option<String>,
}

/// The header check. Holds only read-only state, so one instance can serve
/// parallel file checks.
pub struct FileHeaderCheck {
    identity: Arc<RepositoryIdentity>,
    regenerator: Arc<dyn LicenseRegenerator>,
}

impl FileHeaderCheck {
    pub fn new(
        identity: Arc<RepositoryIdentity>,
        regenerator: Arc<dyn LicenseRegenerator>,
    ) -> Self {
        Self {
            identity,
            regenerator,
        }
    }

    pub fn identity(&self) -> &RepositoryIdentity {
        &self.identity
    }

    /// Lex `source`, check it, and return the rewritten text if fixes landed.
    pub fn check_source(&self, file_name: &str, source: &str, mode: FixMode) -> SourceCheck {
        let stream = lex(source);
        let mut fixer = Fixer::new(&stream, mode);
        let report = self.check(file_name, &stream, &mut fixer);
        let fixed = fixer.changed().then(|| fixer.render());
        SourceCheck { report, fixed }
    }

    /// Check one file's header.
    pub fn check(&self, file_name: &str, stream: &TokenStream, fixer: &mut Fixer) -> CheckReport {
        METRICS.inc_files_checked();
        let mut run = CheckRun {
            check: self,
            stream,
            fixer,
            diagnostics: Vec::new(),
        };

        let (state, has_header) = match locate(file_name, stream) {
            Located::Skipped => (HeaderState::Skipped, None),
            Located::NotApplicable => (HeaderState::NotApplicable, None),
            Located::WrongStyle { comment, .. } => {
                run.error(
                    DiagnosticCode::WrongStyle,
                    "You must use \"/**\" style comments for a file-level DocBlock".to_string(),
                    comment,
                );
                (HeaderState::WrongStyle, Some(false))
            }
            Located::Missing { start } => {
                run.error(
                    DiagnosticCode::Missing,
                    "Missing file-level DocBlock".to_string(),
                    start,
                );
                (HeaderState::Missing, Some(false))
            }
            Located::Valid { start, open, close } => {
                for diag in check_spacing(stream, start, open, close) {
                    run.report(diag);
                }
                if let Some(block) = stream.block_at(open) {
                    let found = run.walk_tags(block);
                    run.diagnostics
                        .extend(check_order(&found, stream, block.close));
                }
                (HeaderState::Valid, Some(true))
            }
        };

        if let Some(has_header) = has_header {
            METRICS.record_has_header(has_header);
        }

        let report = CheckReport {
            state,
            diagnostics: run.diagnostics,
            has_header,
            resume_at: stream.len(),
        };
        emit_file_checked(
            file_name,
            state.as_str(),
            report.errors(),
            report.warnings(),
            run.fixer.changed(),
        );
        report
    }
}

/// Mutable scan state of one check, never shared.
struct CheckRun<'a> {
    check: &'a FileHeaderCheck,
    stream: &'a TokenStream,
    fixer: &'a mut Fixer,
    diagnostics: Vec<Diagnostic>,
}

impl CheckRun<'_> {
    fn line(&self, token: usize) -> u32 {
        self.stream.get(token).map(|t| t.line).unwrap_or_default()
    }

    fn error(&mut self, code: DiagnosticCode, message: String, token: usize) {
        let line = self.line(token);
        self.diagnostics
            .push(Diagnostic::error(code, message, token, line));
    }

    /// Record `diag` and try its fix. Returns whether the fix landed.
    fn report(&mut self, diag: Diagnostic) -> bool {
        let applied = match &diag.proposed_edit {
            Some(edit) => self.fixer.apply(edit),
            None => false,
        };
        if applied {
            METRICS.inc_fixes_applied();
            emit_fix_applied(diag.code, diag.token);
        }
        self.diagnostics.push(diag);
        applied
    }

    fn walk_tags(&mut self, block: &DocBlockSpan) -> FoundTags {
        let stream = self.stream;
        let mut found = FoundTags::new();

        for &tag_idx in &block.tags {
            let Some(token) = stream.get(tag_idx) else {
                continue;
            };
            let name = token.text.as_str();
            let tag = DocTag::from_name(name);

            if let Some(tag) = tag.filter(|t| t.is_required()) {
                if found.contains(name) {
                    self.error(
                        DiagnosticCode::Duplicate(tag),
                        format!("Only one {name} tag is allowed in a file-level DocBlock"),
                        tag_idx,
                    );
                }
            }

            found.push(name, tag_idx);

            let Some(tag) = tag else {
                continue;
            };

            if tag.is_alias() {
                let diag = Diagnostic::error(
                    DiagnosticCode::DeprecatedLinkTag,
                    format!(
                        "Deprecated {} tag, use {} instead",
                        tag.name(),
                        tag.canonical().name()
                    ),
                    tag_idx,
                    token.line,
                )
                .with_fix(ProposedEdit::replace(
                    tag_idx,
                    format!("{} ", tag.canonical().name()),
                ));
                self.report(diag);
            }

            let content = stream
                .find_next_in(tag_idx + 1, block.close, |t| t.kind == TokenKind::DocString)
                .filter(|&i| stream.get(i).is_some_and(|t| t.line == token.line));
            // alias content is reported under the canonical tag, like validation
            let Some(content) = content else {
                self.error(
                    DiagnosticCode::Empty(tag.canonical()),
                    format!("Content missing for {name} tag in file-level DocBlock"),
                    tag_idx,
                );
                continue;
            };

            self.validate(tag.canonical(), content);
        }

        found
    }

    fn validate(&mut self, tag: DocTag, content: usize) {
        let stream = self.stream;
        let Some(token) = stream.get(content) else {
            return;
        };
        let check = validate_content(tag, &token.text, &self.check.identity);
        if check.matches {
            return;
        }

        let diag = Diagnostic::error(
            DiagnosticCode::Invalid(tag),
            format!("Expected \"{}\" for {} tag", check.expected, tag.name()),
            content,
            token.line,
        )
        .with_fix(ProposedEdit::replace(content, check.expected.clone()));

        let applied = self.report(diag);
        if applied && tag == DocTag::Copyright {
            if let Some(range) = check.date_range {
                METRICS.inc_regenerations();
                self.check.regenerator.regenerate(&range);
            }
        }
    }
}
