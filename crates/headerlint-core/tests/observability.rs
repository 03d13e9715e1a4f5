//! Observability tests for file checks.
//!
//! These verify that the structured tracing hooks emit without panicking
//! under a captured subscriber, both directly and from inside a check.

use std::path::Path;
use std::sync::Arc;

use headerlint_core::obs::{
    emit_file_checked, emit_fix_applied, emit_regeneration, emit_regeneration_error, FileSpan,
};
use headerlint_core::{
    DiagnosticCode, FileHeaderCheck, FixMode, NoopRegenerator, RepositoryIdentity,
};
use tracing_test::traced_test;

#[traced_test]
#[test]
fn test_emit_file_checked() {
    emit_file_checked("src/Foo.php", "valid", 0, 1, false);
}

#[traced_test]
#[test]
fn test_emit_fix_applied_at_debug() {
    emit_fix_applied(DiagnosticCode::DeprecatedLinkTag, 4);
}

#[traced_test]
#[test]
fn test_emit_regeneration_events() {
    emit_regeneration(Path::new("/tmp/project"), "2015-2018");
    // warn level
    emit_regeneration_error(Path::new("/tmp/project"), &"permission denied");
}

#[traced_test]
#[test]
fn test_file_span_enter() {
    let span = FileSpan::enter("src/Foo.php");
    drop(span);
}

#[traced_test]
#[test]
fn test_check_emits_file_checked_inside_span() {
    let check = FileHeaderCheck::new(
        Arc::new(RepositoryIdentity::parse("foo/bar").expect("valid")),
        Arc::new(NoopRegenerator),
    );
    let _span = FileSpan::enter("src/Missing.php");
    let result = check.check_source("src/Missing.php", "<?php\nclass A {}\n", FixMode::Report);
    assert_eq!(result.report.errors(), 1);
}
