//! Presence and canonical order of the required tags.

use crate::domain::diagnostic::{Diagnostic, DiagnosticCode};
use crate::domain::tag::{FoundTags, REQUIRED_ORDER};
use crate::domain::token::TokenStream;

/// Walk [`REQUIRED_ORDER`] against the tags found in one block.
///
/// A missing tag is an error anchored at `close`. A present tag whose slot
/// holds another name is a warning anchored at that slot's tag. The position
/// counter moves on for every required tag, found or not, and the walk stops
/// once it runs past the found sequence.
pub fn check_order(found: &FoundTags, stream: &TokenStream, close: usize) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    let view = found.ordering_view();
    let close_line = stream.get(close).map(|t| t.line).unwrap_or_default();
    let mut pos = 0;

    for tag in REQUIRED_ORDER {
        if !view.contains(&tag.name()) {
            diagnostics.push(Diagnostic::error(
                DiagnosticCode::MissingTag(tag),
                format!("Missing {} tag in file-level DocBlock", tag.name()),
                close,
                close_line,
            ));
            pos += 1;
            continue;
        }

        let Some(at_pos) = view.get(pos) else {
            break;
        };
        if *at_pos != tag.name() {
            let token = found.token_at(pos).unwrap_or(close);
            let line = stream.get(token).map(|t| t.line).unwrap_or(close_line);
            diagnostics.push(Diagnostic::warning(
                DiagnosticCode::TagOrder(tag),
                format!(
                    "The tag in position {} should be the {} tag",
                    pos + 1,
                    tag.name()
                ),
                token,
                line,
            ));
        }
        pos += 1;
    }

    diagnostics
}
