use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier assigned to a question by the persistence layer on first save.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(String);

impl QuestionId {
    /// Create a new identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check if the identifier is blank.
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for QuestionId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for QuestionId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// A reference to a question in a page-scoped list.
///
/// Saved questions are addressed by their persisted id. Questions that have not
/// been saved yet have no id, so they are addressed by their position in the
/// list instead. The same type serves as the identity token of a question and
/// as the stored form of branch targets and parent links.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum QuestionRef {
    /// Address by persisted id.
    Persisted(QuestionId),

    /// Address by position in the list (unsaved question).
    Positional(usize),
}

impl QuestionRef {
    /// Create a persisted reference.
    pub fn persisted(id: impl Into<QuestionId>) -> Self {
        Self::Persisted(id.into())
    }

    /// Create a positional reference.
    pub fn positional(index: usize) -> Self {
        Self::Positional(index)
    }

    pub fn is_persisted(&self) -> bool {
        matches!(self, Self::Persisted(_))
    }

    /// The position this reference points at, if it is positional.
    pub fn as_position(&self) -> Option<usize> {
        match self {
            Self::Positional(index) => Some(*index),
            Self::Persisted(_) => None,
        }
    }

    /// The persisted id this reference points at, if any.
    pub fn as_id(&self) -> Option<&QuestionId> {
        match self {
            Self::Persisted(id) => Some(id),
            Self::Positional(_) => None,
        }
    }

    /// Check for a reference that cannot point at anything (blank persisted id).
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Persisted(id) => id.is_empty(),
            Self::Positional(_) => false,
        }
    }

    /// Rewrite a positional reference through an index mapping.
    ///
    /// Persisted references are returned unchanged. Returns `None` when the
    /// mapping drops the referenced position.
    pub fn remap(&self, map: impl Fn(usize) -> Option<usize>) -> Option<Self> {
        match self {
            Self::Persisted(id) => Some(Self::Persisted(id.clone())),
            Self::Positional(index) => map(*index).map(Self::Positional),
        }
    }
}

impl fmt::Display for QuestionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Persisted(id) => write!(f, "{id}"),
            Self::Positional(index) => write!(f, "temp_{index}"),
        }
    }
}

impl From<QuestionId> for QuestionRef {
    fn from(id: QuestionId) -> Self {
        Self::Persisted(id)
    }
}

impl From<usize> for QuestionRef {
    fn from(index: usize) -> Self {
        Self::Positional(index)
    }
}
