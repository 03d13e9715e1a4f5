//! Domain models for headerlint.
//!
//! - `token`: the immutable token stream a check consumes
//! - `tag`: the tag vocabulary and the found-tag log
//! - `diagnostic`: findings and their proposed edits
//! - `error`: startup and I/O failures

pub mod diagnostic;
pub mod error;
pub mod tag;
pub mod token;

pub use diagnostic::{Diagnostic, DiagnosticCode, EditOp, ProposedEdit, Severity};
pub use error::{HeaderLintError, Result};
pub use tag::{DocTag, FoundTags, REQUIRED_ORDER};
pub use token::{DeclarationKeyword, DocBlockSpan, Token, TokenKind, TokenStream};
