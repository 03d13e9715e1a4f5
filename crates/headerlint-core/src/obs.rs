//! Structured observability hooks for file checks.
//!
//! This module provides:
//! - File-scoped tracing spans via the `FileSpan` RAII guard
//! - Emission functions for check results, applied fixes and licence
//!   regeneration
//!
//! Events are emitted at `info!` level except failures (`warn!`) and per-fix
//! events (`debug!`).

use std::path::Path;

use tracing::{debug, info, warn};

use crate::domain::diagnostic::DiagnosticCode;

/// RAII guard that enters a file-scoped span for the duration of a check.
///
/// ```ignore
/// let _span = FileSpan::enter("src/Foo.php");
/// // every event below carries file = "src/Foo.php"
/// ```
pub struct FileSpan {
    _span: tracing::span::EnteredSpan,
}

impl FileSpan {
    pub fn enter(file: &str) -> Self {
        let span = tracing::info_span!("headerlint.file", file = %file);
        Self {
            _span: span.entered(),
        }
    }
}

/// Emit event: a file was checked.
pub fn emit_file_checked(file: &str, state: &str, errors: usize, warnings: usize, fixed: bool) {
    info!(
        event = "file.checked",
        file = %file,
        state = %state,
        errors = errors,
        warnings = warnings,
        fixed = fixed,
    );
}

/// Emit event: a fix landed on a token.
pub fn emit_fix_applied(code: DiagnosticCode, token: usize) {
    debug!(event = "fix.applied", code = %code, token = token);
}

/// Emit event: licensing files were rewritten.
pub fn emit_regeneration(root: &Path, years: &str) {
    info!(event = "license.regenerated", root = %root.display(), years = %years);
}

/// Emit event: licensing files could not be rewritten (warning level).
pub fn emit_regeneration_error(root: &Path, error: &dyn std::fmt::Display) {
    warn!(event = "license.regeneration_error", root = %root.display(), error = %error);
}
