//! Immutable token stream consumed by the header check.
//!
//! A [`TokenStream`] is materialised once per file (by the
//! [`lexer`](crate::lexer) or by a host tokenizer) and only queried afterwards.

use serde::{Deserialize, Serialize};

/// Keywords that introduce a declaration or statement. A DocBlock directly
/// followed by one of these documents that declaration, not the file.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DeclarationKeyword {
    Class,
    Interface,
    Trait,
    Function,
    Closure,
    Public,
    Private,
    Protected,
    Final,
    Static,
    Abstract,
    Const,
    Property,
    Include,
    IncludeOnce,
    Require,
    RequireOnce,
}

impl DeclarationKeyword {
    /// Classify a bare word, case-insensitively. `function` is returned as
    /// [`Function`](Self::Function); the lexer upgrades it to `Closure`.
    pub fn from_word(word: &str) -> Option<Self> {
        let kw = match word.to_ascii_lowercase().as_str() {
            "class" => Self::Class,
            "interface" => Self::Interface,
            "trait" => Self::Trait,
            "function" => Self::Function,
            "public" => Self::Public,
            "private" => Self::Private,
            "protected" => Self::Protected,
            "final" => Self::Final,
            "static" => Self::Static,
            "abstract" => Self::Abstract,
            "const" => Self::Const,
            "var" => Self::Property,
            "include" => Self::Include,
            "include_once" => Self::IncludeOnce,
            "require" => Self::Require,
            "require_once" => Self::RequireOnce,
            _ => return None,
        };
        Some(kw)
    }
}

/// Lexical kind of a token.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// Text before the start-of-file marker.
    InlineHtml,
    /// Start-of-file marker (`<?php`).
    OpenTag,
    Whitespace,
    /// Single-line or non-structured block comment.
    Comment,
    /// `/**`
    DocOpen,
    /// `*/`
    DocClose,
    /// Leading `*` on a DocBlock line.
    DocStar,
    DocWhitespace,
    /// `@name`
    DocTag,
    /// Free text inside a DocBlock, at most one line.
    DocString,
    Keyword(DeclarationKeyword),
    Other,
    /// Remainder of the file, never inspected.
    Rest,
}

impl TokenKind {
    pub fn is_whitespace(self) -> bool {
        matches!(self, TokenKind::Whitespace | TokenKind::DocWhitespace)
    }

    /// Comment tokens, structured or not.
    pub fn is_comment(self) -> bool {
        matches!(
            self,
            TokenKind::Comment
                | TokenKind::DocOpen
                | TokenKind::DocClose
                | TokenKind::DocStar
                | TokenKind::DocWhitespace
                | TokenKind::DocTag
                | TokenKind::DocString
        )
    }
}

/// A single token. `line` is 1-based and refers to the first character.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub line: u32,
    pub text: String,
}

impl Token {
    pub fn new(kind: TokenKind, line: u32, text: impl Into<String>) -> Self {
        Self {
            kind,
            line,
            text: text.into(),
        }
    }
}

/// Open/close pairing of a structured comment plus the positions of its tags
/// in source order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocBlockSpan {
    pub open: usize,
    pub close: usize,
    pub tags: Vec<usize>,
}

/// Randomly indexable, read-only token sequence for one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenStream {
    tokens: Vec<Token>,
    blocks: Vec<DocBlockSpan>,
}

impl TokenStream {
    pub fn new(tokens: Vec<Token>, blocks: Vec<DocBlockSpan>) -> Self {
        Self { tokens, blocks }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Block whose opening token sits at `open`.
    pub fn block_at(&self, open: usize) -> Option<&DocBlockSpan> {
        self.blocks.iter().find(|b| b.open == open)
    }

    /// First index in `from..end` whose token satisfies `pred`.
    pub fn find_next_in<F>(&self, from: usize, end: usize, pred: F) -> Option<usize>
    where
        F: Fn(&Token) -> bool,
    {
        let end = end.min(self.tokens.len());
        (from..end).find(|&i| pred(&self.tokens[i]))
    }

    /// First index at or after `from` whose token satisfies `pred`.
    pub fn find_next<F>(&self, from: usize, pred: F) -> Option<usize>
    where
        F: Fn(&Token) -> bool,
    {
        self.find_next_in(from, self.tokens.len(), pred)
    }

    pub fn first_of_kind(&self, kind: TokenKind) -> Option<usize> {
        self.find_next(0, |t| t.kind == kind)
    }

    /// First token at or after `from` that is not whitespace.
    pub fn next_non_whitespace(&self, from: usize) -> Option<usize> {
        self.find_next(from, |t| !t.kind.is_whitespace())
    }

    /// First token at or after `from` that is neither whitespace nor comment.
    pub fn next_meaningful(&self, from: usize) -> Option<usize> {
        self.find_next(from, |t| !t.kind.is_whitespace() && !t.kind.is_comment())
    }

    /// Concatenated token texts.
    pub fn render(&self) -> String {
        self.tokens.iter().map(|t| t.text.as_str()).collect()
    }
}
