//! Diagnostics emitted by the header check.

use serde::{Deserialize, Serialize, Serializer};

use crate::domain::tag::DocTag;

/// Severity level for a diagnostic.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Warning,
    Error,
}

/// Closed table of diagnostic codes. Per-tag codes are keyed by [`DocTag`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCode {
    WrongStyle,
    Missing,
    SpacingAfterOpen,
    SpacingAfterComment,
    DeprecatedLinkTag,
    Duplicate(DocTag),
    Empty(DocTag),
    Invalid(DocTag),
    MissingTag(DocTag),
    TagOrder(DocTag),
}

impl DiagnosticCode {
    pub fn as_str(self) -> &'static str {
        use DocTag::*;
        match self {
            DiagnosticCode::WrongStyle => "WrongStyle",
            DiagnosticCode::Missing => "Missing",
            DiagnosticCode::SpacingAfterOpen => "SpacingAfterOpen",
            DiagnosticCode::SpacingAfterComment => "SpacingAfterComment",
            DiagnosticCode::DeprecatedLinkTag => "DeprecatedLinkTag",
            DiagnosticCode::Duplicate(See) => "DuplicateSeeTag",
            DiagnosticCode::Duplicate(Link) => "DuplicateLinkTag",
            DiagnosticCode::Duplicate(Copyright) => "DuplicateCopyrightTag",
            DiagnosticCode::Duplicate(License) => "DuplicateLicenseTag",
            DiagnosticCode::Empty(See) => "EmptySeeTag",
            DiagnosticCode::Empty(Link) => "EmptyLinkTag",
            DiagnosticCode::Empty(Copyright) => "EmptyCopyrightTag",
            DiagnosticCode::Empty(License) => "EmptyLicenseTag",
            DiagnosticCode::Invalid(See) => "InvalidSeeTag",
            DiagnosticCode::Invalid(Link) => "InvalidLinkTag",
            DiagnosticCode::Invalid(Copyright) => "InvalidCopyrightTag",
            DiagnosticCode::Invalid(License) => "InvalidLicenseTag",
            DiagnosticCode::MissingTag(See) => "MissingSeeTag",
            DiagnosticCode::MissingTag(Link) => "MissingLinkTag",
            DiagnosticCode::MissingTag(Copyright) => "MissingCopyrightTag",
            DiagnosticCode::MissingTag(License) => "MissingLicenseTag",
            DiagnosticCode::TagOrder(See) => "SeeTagOrder",
            DiagnosticCode::TagOrder(Link) => "LinkTagOrder",
            DiagnosticCode::TagOrder(Copyright) => "CopyrightTagOrder",
            DiagnosticCode::TagOrder(License) => "LicenseTagOrder",
        }
    }
}

impl std::fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for DiagnosticCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Text operation on a single token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "text", rename_all = "snake_case")]
pub enum EditOp {
    Replace(String),
    InsertAfter(String),
}

/// Deterministic correction for a fixable diagnostic.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProposedEdit {
    /// Index of the token in the file's stream.
    pub token: usize,
    pub op: EditOp,
}

impl ProposedEdit {
    pub fn replace(token: usize, text: impl Into<String>) -> Self {
        Self {
            token,
            op: EditOp::Replace(text.into()),
        }
    }

    pub fn insert_after(token: usize, text: impl Into<String>) -> Self {
        Self {
            token,
            op: EditOp::InsertAfter(text.into()),
        }
    }
}

/// A single finding.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Diagnostic {
    pub severity: Severity,

    pub code: DiagnosticCode,

    /// Human-readable message.
    pub message: String,

    /// Token the finding is anchored to.
    pub token: usize,

    /// Line number (1-indexed).
    pub line: u32,

    pub fixable: bool,

    pub proposed_edit: Option<ProposedEdit>,
}

impl Diagnostic {
    fn new(
        severity: Severity,
        code: DiagnosticCode,
        message: String,
        token: usize,
        line: u32,
    ) -> Self {
        Self {
            severity,
            code,
            message,
            token,
            line,
            fixable: false,
            proposed_edit: None,
        }
    }

    pub fn error(code: DiagnosticCode, message: String, token: usize, line: u32) -> Self {
        Self::new(Severity::Error, code, message, token, line)
    }

    pub fn warning(code: DiagnosticCode, message: String, token: usize, line: u32) -> Self {
        Self::new(Severity::Warning, code, message, token, line)
    }

    /// Attach a correction and mark the diagnostic fixable.
    pub fn with_fix(mut self, edit: ProposedEdit) -> Self {
        self.fixable = true;
        self.proposed_edit = Some(edit);
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}
