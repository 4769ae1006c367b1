//! A single named value

use serde::Serialize;

use super::names_match;

/// A named text value with an optional leading comment
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Key {
    pub name: String,
    pub value: String,
    /// Comment lines that precede the key, joined with `\n`. Empty when absent.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub comment: String,
}

impl Key {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            comment: String::new(),
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    /// Returns true if this key answers to `name`
    pub fn is_named(&self, name: &str) -> bool {
        names_match(&self.name, name)
    }

    pub fn has_comment(&self) -> bool {
        !self.comment.is_empty()
    }
}
