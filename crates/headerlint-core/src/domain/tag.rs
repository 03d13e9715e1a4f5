//! Tag vocabulary of the file-level DocBlock.

use serde::{Deserialize, Serialize};

/// Tags the check knows about. Anything else is ignored.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DocTag {
    See,
    /// Deprecated alias of [`See`](Self::See).
    Link,
    Copyright,
    License,
}

/// Canonical order of the required tags.
pub const REQUIRED_ORDER: [DocTag; 3] = [DocTag::See, DocTag::Copyright, DocTag::License];

impl DocTag {
    /// Source spelling, including the `@`.
    pub fn name(self) -> &'static str {
        match self {
            DocTag::See => "@see",
            DocTag::Link => "@link",
            DocTag::Copyright => "@copyright",
            DocTag::License => "@license",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "@see" => Some(DocTag::See),
            "@link" => Some(DocTag::Link),
            "@copyright" => Some(DocTag::Copyright),
            "@license" => Some(DocTag::License),
            _ => None,
        }
    }

    pub fn is_required(self) -> bool {
        REQUIRED_ORDER.contains(&self)
    }

    pub fn is_alias(self) -> bool {
        self == DocTag::Link
    }

    /// The required tag this one stands for.
    pub fn canonical(self) -> DocTag {
        match self {
            DocTag::Link => DocTag::See,
            other => other,
        }
    }
}

/// Append-only log of tag names, with their token positions, in the order
/// they were met in one block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FoundTags {
    entries: Vec<(String, usize)>,
}

impl FoundTags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, token: usize) {
        self.entries.push((name.into(), token));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(|(n, _)| n.as_str())
    }

    /// Token position of the entry at `index`.
    pub fn token_at(&self, index: usize) -> Option<usize> {
        self.entries.get(index).map(|(_, t)| *t)
    }

    /// Read-only view used by the order check: a leading `@link` counts as
    /// `@see`. An alias anywhere else is left as is.
    pub fn ordering_view(&self) -> Vec<&str> {
        let mut view: Vec<&str> = self.entries.iter().map(|(n, _)| n.as_str()).collect();
        if let Some(first) = view.first_mut() {
            if *first == DocTag::Link.name() {
                *first = DocTag::See.name();
            }
        }
        view
    }
}
