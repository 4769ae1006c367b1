//! A named group of keys

use serde::Serialize;

use super::{names_match, Key};

/// A named, ordered group of keys
///
/// Keys keep their insertion order. The section with an empty name is the
/// default section.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Section {
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub comment: String,
    pub(crate) keys: Vec<Key>,
}

impl Section {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            comment: String::new(),
            keys: Vec::new(),
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    /// The unnamed section that holds keys appearing before any header
    pub fn is_default(&self) -> bool {
        self.name.is_empty()
    }

    pub fn is_named(&self, name: &str) -> bool {
        names_match(&self.name, name)
    }

    pub fn has_comment(&self) -> bool {
        !self.comment.is_empty()
    }

    pub fn keys(&self) -> impl ExactSizeIterator<Item = &Key> {
        self.keys.iter()
    }

    pub fn key_count(&self) -> usize {
        self.keys.len()
    }

    pub fn find_key(&self, name: &str) -> Option<&Key> {
        self.keys.iter().find(|k| k.is_named(name))
    }

    pub(crate) fn key_index(&self, name: &str) -> Option<usize> {
        self.keys.iter().position(|k| k.is_named(name))
    }

    pub(crate) fn key_mut(&mut self, name: &str) -> Option<&mut Key> {
        self.keys.iter_mut().find(|k| k.is_named(name))
    }

    /// Removes the first key answering to `name`
    pub(crate) fn remove_key(&mut self, name: &str) -> Option<Key> {
        let index = self.key_index(name)?;
        Some(self.keys.remove(index))
    }

    /// Inserts `key` or updates the existing key with the same name.
    ///
    /// The value always replaces the old one; the comment only when non-empty.
    /// Returns true if anything changed.
    pub(crate) fn upsert_key(&mut self, key: Key) -> bool {
        match self.key_mut(&key.name) {
            Some(existing) => {
                let replaces_comment = key.has_comment() && existing.comment != key.comment;
                let mut changed = false;
                if existing.value != key.value {
                    existing.value = key.value;
                    changed = true;
                }
                if replaces_comment {
                    existing.comment = key.comment;
                    changed = true;
                }
                changed
            }
            None => {
                self.keys.push(key);
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server() -> Section {
        let mut section = Section::new("Server");
        section.upsert_key(Key::new("Host", "localhost"));
        section.upsert_key(Key::new("Port", "8080").with_comment("; listen port"));
        section
    }

    #[test]
    fn find_key_is_case_insensitive() {
        let section = server();
        assert_eq!(section.find_key("PORT").map(|k| k.value.as_str()), Some("8080"));
        assert!(section.find_key("missing").is_none());
    }

    #[test]
    fn keys_keep_insertion_order() {
        let section = server();
        let names: Vec<_> = section.keys().map(|k| k.name.as_str()).collect();
        assert_eq!(names, vec!["Host", "Port"]);
    }

    #[test]
    fn upsert_keeps_comment_when_new_one_is_empty() {
        let mut section = server();
        assert!(section.upsert_key(Key::new("port", "9090")));

        let key = section.find_key("Port").unwrap();
        assert_eq!(key.value, "9090");
        assert_eq!(key.comment, "; listen port");
        assert_eq!(key.name, "Port");
        assert_eq!(section.key_count(), 2);
    }

    #[test]
    fn upsert_reports_no_change_for_same_value() {
        let mut section = server();
        assert!(!section.upsert_key(Key::new("Host", "localhost")));
    }

    #[test]
    fn upsert_replaces_value_and_comment_together() {
        let mut section = server();
        assert!(section.upsert_key(Key::new("port", "9090").with_comment("; moved")));

        let key = section.find_key("Port").unwrap();
        assert_eq!(key.value, "9090");
        assert_eq!(key.comment, "; moved");
        assert_eq!(section.key_count(), 2);
    }

    #[test]
    fn upsert_replaces_only_comment() {
        let mut section = server();
        assert!(section.upsert_key(Key::new("Port", "8080").with_comment("; other")));
        assert_eq!(section.find_key("port").unwrap().comment, "; other");
    }

    #[test]
    fn upsert_appends_new_keys() {
        let mut section = server();
        assert!(section.upsert_key(Key::new("Timeout", "30")));
        assert_eq!(section.keys().last().unwrap().name, "Timeout");
    }

    #[test]
    fn remove_key_removes_first_match() {
        let mut section = server();
        let removed = section.remove_key("host").unwrap();
        assert_eq!(removed.name, "Host");
        assert_eq!(section.key_count(), 1);
        assert!(section.remove_key("host").is_none());
    }

    #[test]
    fn default_section_has_empty_name() {
        assert!(Section::new("").is_default());
        assert!(!server().is_default());
    }
}
