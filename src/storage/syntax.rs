//! Format characters and auto-creation policy
//!
//! Both are per-store settings. The first character of each indicator set is
//! the canonical one used when writing.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use super::DataFileError;

pub const DEFAULT_COMMENT_INDICATORS: &str = ";#";
pub const DEFAULT_EQUAL_INDICATORS: &str = "=:";

const LINE_BREAKS: [char; 2] = ['\n', '\r'];

/// Characters recognized as comment starts and key/value separators
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Syntax {
    comment_indicators: String,
    equal_indicators: String,
}

impl Syntax {
    pub fn new(
        comment_indicators: impl Into<String>,
        equal_indicators: impl Into<String>,
    ) -> Result<Self, DataFileError> {
        let comment_indicators = comment_indicators.into();
        let equal_indicators = equal_indicators.into();

        if comment_indicators.is_empty() {
            return Err(DataFileError::InvalidSyntax(
                "at least one comment indicator is required".to_string(),
            ));
        }
        if equal_indicators.is_empty() {
            return Err(DataFileError::InvalidSyntax(
                "at least one equality indicator is required".to_string(),
            ));
        }
        if let Some(c) = comment_indicators
            .chars()
            .find(|c| equal_indicators.contains(*c))
        {
            return Err(DataFileError::InvalidSyntax(format!(
                "'{}' cannot be both a comment and an equality indicator",
                c
            )));
        }
        if let Some(c) = comment_indicators
            .chars()
            .chain(equal_indicators.chars())
            .find(|c| c.is_whitespace() || *c == '[' || *c == ']')
        {
            return Err(DataFileError::InvalidSyntax(format!(
                "'{}' cannot be used as an indicator",
                c.escape_default()
            )));
        }

        Ok(Self {
            comment_indicators,
            equal_indicators,
        })
    }

    pub fn comment_indicators(&self) -> &str {
        &self.comment_indicators
    }

    pub fn equal_indicators(&self) -> &str {
        &self.equal_indicators
    }

    /// Indicator written in front of comments that lack one
    pub fn canonical_comment(&self) -> char {
        self.comment_indicators.chars().next().unwrap_or(';')
    }

    /// Separator written between key and value
    pub fn canonical_equals(&self) -> char {
        self.equal_indicators.chars().next().unwrap_or('=')
    }

    pub fn is_comment(&self, trimmed_line: &str) -> bool {
        trimmed_line
            .chars()
            .next()
            .is_some_and(|c| self.comment_indicators.contains(c))
    }

    /// Byte offset of the first equality indicator in `line`
    pub fn find_equals(&self, line: &str) -> Option<usize> {
        line.find(|c: char| self.equal_indicators.contains(c))
    }

    /// Trims `name` and checks that it reads back as the same key.
    ///
    /// A key line may not be empty on the left, start like a comment or a
    /// header, hold an equality indicator, or span lines.
    pub fn key_name<'a>(&self, name: &'a str) -> Result<&'a str, DataFileError> {
        let name = name.trim();
        if name.is_empty()
            || self.is_comment(name)
            || name.starts_with('[')
            || self.find_equals(name).is_some()
            || name.contains(LINE_BREAKS)
        {
            return Err(DataFileError::InvalidKeyName(name.to_string()));
        }
        Ok(name)
    }

    /// Trims `name` and checks that it fits inside `[...]` on one line
    pub fn section_name<'a>(&self, name: &'a str) -> Result<&'a str, DataFileError> {
        let name = name.trim();
        if name.contains(['[', ']']) || name.contains(LINE_BREAKS) {
            return Err(DataFileError::InvalidSectionName(name.to_string()));
        }
        Ok(name)
    }

    /// Trims `value` and checks that it stays on its key's line
    pub fn value<'a>(&self, value: &'a str) -> Result<&'a str, DataFileError> {
        let value = value.trim();
        if value.contains(LINE_BREAKS) {
            return Err(DataFileError::InvalidValue(value.to_string()));
        }
        Ok(value)
    }
}

impl Default for Syntax {
    fn default() -> Self {
        Self {
            comment_indicators: DEFAULT_COMMENT_INDICATORS.to_string(),
            equal_indicators: DEFAULT_EQUAL_INDICATORS.to_string(),
        }
    }
}

/// Auto-creation policy bits consulted by writes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Flags(u32);

impl Flags {
    /// Create a missing target section on write
    pub const AUTOCREATE_SECTIONS: Flags = Flags(1 << 1);
    /// Create a missing target key on write
    pub const AUTOCREATE_KEYS: Flags = Flags(1 << 2);

    pub const fn empty() -> Self {
        Flags(0)
    }

    pub const fn all() -> Self {
        Flags(Self::AUTOCREATE_SECTIONS.0 | Self::AUTOCREATE_KEYS.0)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn contains(self, other: Flags) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn insert(&mut self, other: Flags) {
        self.0 |= other.0;
    }

    pub fn remove(&mut self, other: Flags) {
        self.0 &= !other.0;
    }

    pub fn set(&mut self, other: Flags, enabled: bool) {
        if enabled {
            self.insert(other);
        } else {
            self.remove(other);
        }
    }
}

impl Default for Flags {
    fn default() -> Self {
        Flags::all()
    }
}

impl BitOr for Flags {
    type Output = Flags;

    fn bitor(self, rhs: Flags) -> Flags {
        Flags(self.0 | rhs.0)
    }
}

impl BitOrAssign for Flags {
    fn bitor_assign(&mut self, rhs: Flags) {
        self.insert(rhs);
    }
}

impl fmt::Display for Flags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names = Vec::new();
        if self.contains(Flags::AUTOCREATE_SECTIONS) {
            names.push("AUTOCREATE_SECTIONS");
        }
        if self.contains(Flags::AUTOCREATE_KEYS) {
            names.push("AUTOCREATE_KEYS");
        }
        if names.is_empty() {
            write!(f, "(none)")
        } else {
            write!(f, "{}", names.join(" | "))
        }
    }
}
