//! headerlint core library
//!
//! Checks the file-level DocBlock of PHP sources: its presence and style, the
//! blank lines around it, and the `@see` / `@copyright` / `@license` tags with
//! their canonical content and order. Fixable findings carry token edits;
//! fixing `@copyright` content regenerates the project's licence files.

pub mod check;
pub mod config;
pub mod date_range;
pub mod domain;
pub mod fixer;
pub mod identity;
pub mod lexer;
pub mod locator;
pub mod metrics;
pub mod obs;
pub mod order;
pub mod regenerate;
pub mod reporting;
pub mod telemetry;
pub mod validator;

pub use check::{CheckReport, FileHeaderCheck, HeaderState, SourceCheck};
pub use config::{HeaderLintConfig, CONFIG_FILE};
pub use date_range::{parse_date_range, DateRange};
pub use domain::{
    DeclarationKeyword, Diagnostic, DiagnosticCode, DocBlockSpan, DocTag, EditOp, FoundTags,
    HeaderLintError, ProposedEdit, Result, Severity, Token, TokenKind, TokenStream,
    REQUIRED_ORDER,
};
pub use fixer::{FixMode, Fixer};
pub use identity::{parse_remote_url, resolve_identity, RepositoryIdentity};
pub use lexer::lex;
pub use locator::{is_skipped_file, locate, Located, SKIPPED_FILE_NAMES};
pub use metrics::METRICS;
pub use regenerate::{
    FsLicenseFiles, LicenseRegenerator, NoopRegenerator, RecordingRegenerator, COPYRIGHT_FILE,
    LICENSE_FILE,
};
pub use reporting::{
    content_digest, render_finding, render_summary, write_report_json, FileReport, RunReport,
    RunTotals,
};
pub use validator::{expected_content, validate_content, ContentCheck};

/// Crate version, reported by the CLI.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
