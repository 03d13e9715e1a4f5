//! Token-level text substitution for fixable diagnostics.

use serde::{Deserialize, Serialize};

use crate::domain::diagnostic::{EditOp, ProposedEdit};
use crate::domain::token::TokenStream;

/// Whether proposed edits are applied or only reported.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FixMode {
    /// Compute diagnostics and edits, touch nothing.
    #[default]
    Report,
    /// Apply every proposed edit.
    Apply,
}

/// Per-file copy of token texts that edits are applied to.
#[derive(Debug, Clone)]
pub struct Fixer {
    mode: FixMode,
    texts: Vec<String>,
    applied: usize,
}

impl Fixer {
    pub fn new(stream: &TokenStream, mode: FixMode) -> Self {
        Self {
            mode,
            texts: stream.tokens().iter().map(|t| t.text.clone()).collect(),
            applied: 0,
        }
    }

    /// Apply `edit`; returns whether it landed. Always `false` in
    /// [`FixMode::Report`] or when the token does not exist.
    pub fn apply(&mut self, edit: &ProposedEdit) -> bool {
        if self.mode == FixMode::Report {
            return false;
        }
        let Some(text) = self.texts.get_mut(edit.token) else {
            return false;
        };
        match &edit.op {
            EditOp::Replace(new) => {
                text.clear();
                text.push_str(new);
            }
            EditOp::InsertAfter(extra) => text.push_str(extra),
        }
        self.applied += 1;
        true
    }

    pub fn applied(&self) -> usize {
        self.applied
    }

    pub fn changed(&self) -> bool {
        self.applied > 0
    }

    /// Current file text with all applied edits.
    pub fn render(&self) -> String {
        self.texts.concat()
    }
}
