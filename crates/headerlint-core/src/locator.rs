//! Finds the file-level DocBlock and checks the blank lines around it.

use serde::{Deserialize, Serialize};

use crate::domain::diagnostic::{Diagnostic, DiagnosticCode, ProposedEdit};
use crate::domain::token::{TokenKind, TokenStream};
use crate::regenerate::{COPYRIGHT_FILE, LICENSE_FILE};

/// Auxiliary files that are never checked.
pub const SKIPPED_FILE_NAMES: [&str; 2] = [LICENSE_FILE, COPYRIGHT_FILE];

/// Where the check ended up after looking for the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Located {
    /// Reserved auxiliary file name.
    Skipped,
    /// No start-of-file marker in the stream.
    NotApplicable,
    /// First thing after the marker is a non-structured comment.
    WrongStyle { start: usize, comment: usize },
    /// No DocBlock, or it documents the declaration that follows.
    Missing { start: usize },
    Valid {
        start: usize,
        open: usize,
        close: usize,
    },
}

pub fn is_skipped_file(file_name: &str) -> bool {
    SKIPPED_FILE_NAMES
        .iter()
        .any(|reserved| file_name.ends_with(reserved))
}

/// Locate the leading DocBlock of `stream`.
pub fn locate(file_name: &str, stream: &TokenStream) -> Located {
    if is_skipped_file(file_name) {
        return Located::Skipped;
    }
    let Some(start) = stream.first_of_kind(TokenKind::OpenTag) else {
        return Located::NotApplicable;
    };

    let Some(first) = stream.next_non_whitespace(start + 1) else {
        return Located::Missing { start };
    };
    let kind = stream.tokens()[first].kind;
    if kind == TokenKind::Comment {
        return Located::WrongStyle {
            start,
            comment: first,
        };
    }
    if kind != TokenKind::DocOpen {
        return Located::Missing { start };
    }
    let Some(block) = stream.block_at(first) else {
        return Located::Missing { start };
    };

    // a DocBlock directly above a declaration documents that declaration
    if let Some(next) = stream.next_meaningful(block.close + 1) {
        if matches!(stream.tokens()[next].kind, TokenKind::Keyword(_)) {
            return Located::Missing { start };
        }
    }

    Located::Valid {
        start,
        open: block.open,
        close: block.close,
    }
}

/// Blank-line rules around a valid header.
pub fn check_spacing(
    stream: &TokenStream,
    start: usize,
    open: usize,
    close: usize,
) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    let tokens = stream.tokens();

    if tokens[open].line != tokens[start].line + 1 {
        diagnostics.push(Diagnostic::error(
            DiagnosticCode::SpacingAfterOpen,
            "There must be no blank lines before the file-level DocBlock".to_string(),
            open,
            tokens[open].line,
        ));
    }

    if let Some(next) = stream.next_non_whitespace(close + 1) {
        if tokens[next].line != tokens[close].line + 2 {
            diagnostics.push(
                Diagnostic::error(
                    DiagnosticCode::SpacingAfterComment,
                    "There must be exactly one blank line after the file-level DocBlock"
                        .to_string(),
                    close,
                    tokens[close].line,
                )
                .with_fix(spacing_fix(stream, close, next)),
            );
        }
    }

    diagnostics
}

/// Edit that leaves exactly one blank line between `close` and `next`,
/// written with the line ending the file already uses.
fn spacing_fix(stream: &TokenStream, close: usize, next: usize) -> ProposedEdit {
    match next - close {
        1 => {
            let nl = line_ending(stream, None);
            ProposedEdit::insert_after(close, format!("{nl}{nl}"))
        }
        2 => {
            let ws = &stream.tokens()[close + 1].text;
            let nl = line_ending(stream, Some(ws));
            let indent = match ws.rfind('\n') {
                Some(idx) => &ws[idx + 1..],
                None => "",
            };
            ProposedEdit::replace(close + 1, format!("{nl}{nl}{indent}"))
        }
        // split whitespace from a host tokenizer
        _ => ProposedEdit::insert_after(close, line_ending(stream, None)),
    }
}

/// `"\r\n"` when `ws` (or else the first line break of the file) is CRLF.
fn line_ending(stream: &TokenStream, ws: Option<&str>) -> &'static str {
    let first_break = |text: &str| text.find('\n').map(|idx| text[..idx].ends_with('\r'));
    let crlf = ws
        .and_then(first_break)
        .or_else(|| stream.tokens().iter().find_map(|t| first_break(t.text.as_str())))
        .unwrap_or(false);
    if crlf {
        "\r\n"
    } else {
        "\n"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::diagnostic::EditOp;
    use crate::lexer::lex;

    #[test]
    fn test_skipped_names() {
        assert!(is_skipped_file("LICENSE.md"));
        assert!(is_skipped_file("/repo/COPYRIGHT.md"));
        assert!(!is_skipped_file("src/License.php"));
        assert_eq!(locate("/repo/LICENSE.md", &lex("<?php\n")), Located::Skipped);
    }

    #[test]
    fn test_not_applicable_without_open_tag() {
        assert_eq!(locate("a.php", &lex("hello")), Located::NotApplicable);
    }

    #[test]
    fn test_wrong_style() {
        let stream = lex("<?php\n// header\n\nnamespace A;\n");
        assert_eq!(
            locate("a.php", &stream),
            Located::WrongStyle {
                start: 0,
                comment: 2
            }
        );
        let stream = lex("<?php\n/* header */\n");
        assert!(matches!(locate("a.php", &stream), Located::WrongStyle { .. }));
    }

    #[test]
    fn test_missing_when_code_first() {
        let stream = lex("<?php\nnamespace A;\n");
        assert_eq!(locate("a.php", &stream), Located::Missing { start: 0 });
        assert_eq!(locate("a.php", &lex("<?php")), Located::Missing { start: 0 });
    }

    #[test]
    fn test_missing_when_block_documents_declaration() {
        for decl in [
            "class A {}",
            "final class A {}",
            "function f() {}",
            "require 'x.php';",
            "const A = 1;",
        ] {
            let src = format!("<?php\n/**\n * Doc\n */\n{decl}\n");
            assert_eq!(
                locate("a.php", &lex(&src)),
                Located::Missing { start: 0 },
                "{decl}"
            );
        }
    }

    #[test]
    fn test_valid_before_namespace_even_with_comment_between() {
        let stream = lex("<?php\n/**\n * Doc\n */\n\n// note\nnamespace A;\n");
        assert!(matches!(
            locate("a.php", &stream),
            Located::Valid { start: 0, open: 2, .. }
        ));
    }

    #[test]
    fn test_unterminated_block_is_missing() {
        assert_eq!(
            locate("a.php", &lex("<?php\n/** never closed")),
            Located::Missing { start: 0 }
        );
    }

    fn spacing(src: &str) -> Vec<Diagnostic> {
        let stream = lex(src);
        match locate("a.php", &stream) {
            Located::Valid { start, open, close } => check_spacing(&stream, start, open, close),
            other => panic!("expected Valid, got {:?}", other),
        }
    }

    #[test]
    fn test_spacing_ok() {
        assert!(spacing("<?php\n/**\n * Doc\n */\n\nnamespace A;\n").is_empty());
        // nothing after the block
        assert!(spacing("<?php\n/**\n * Doc\n */\n").is_empty());
    }

    #[test]
    fn test_spacing_blank_line_before_block() {
        let diags = spacing("<?php\n\n/**\n * Doc\n */\n\nnamespace A;\n");
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, DiagnosticCode::SpacingAfterOpen);
        assert!(!diags[0].fixable);
    }

    #[test]
    fn test_spacing_missing_blank_line_after_block() {
        let diags = spacing("<?php\n/**\n * Doc\n */\nnamespace A;\n");
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, DiagnosticCode::SpacingAfterComment);
        assert!(diags[0].fixable);
        let edit = diags[0].proposed_edit.as_ref().expect("edit");
        assert_eq!(edit.op, EditOp::Replace("\n\n".to_string()));
    }

    #[test]
    fn test_spacing_too_many_blank_lines_after_block() {
        let diags = spacing("<?php\n/**\n * Doc\n */\n\n\n\nnamespace A;\n");
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, DiagnosticCode::SpacingAfterComment);
    }

    #[test]
    fn test_spacing_next_on_same_line() {
        let diags = spacing("<?php\n/** Doc */namespace A;\n");
        let edit = diags[0].proposed_edit.as_ref().expect("edit");
        assert_eq!(edit.op, EditOp::InsertAfter("\n\n".to_string()));
    }

    #[test]
    fn test_spacing_fix_keeps_crlf_line_endings() {
        let diags = spacing("<?php\r\n/**\r\n * Doc\r\n */\r\nnamespace A;\r\n");
        let edit = diags[0].proposed_edit.as_ref().expect("edit");
        assert_eq!(edit.op, EditOp::Replace("\r\n\r\n".to_string()));

        let diags = spacing("<?php\r\n/** Doc */namespace A;\r\n");
        let edit = diags[0].proposed_edit.as_ref().expect("edit");
        assert_eq!(edit.op, EditOp::InsertAfter("\r\n\r\n".to_string()));
    }
}
