//! The section/key store
//!
//! [`DataFile`] owns the ordered section list, the path it is bound to, the
//! dirty flag and the per-instance syntax and auto-creation policy. Loading
//! and saving go through [`parser`](super::parser) and
//! [`writer`](super::writer).

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::{parser, writer, Flags, Syntax};
use crate::domain::{
    format_bool, format_float, parse_bool, parse_float, parse_int, Key, Section, DEFAULT_SECTION,
};

#[derive(Debug, Error)]
pub enum DataFileError {
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Cannot write {}: {source}", .path.display())]
    FileUnwritable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("No file name is associated with this data file")]
    NoFileName,

    #[error("Section not found: '{0}'")]
    SectionNotFound(String),

    #[error("Key '{key}' not found in section '{section}'")]
    KeyNotFound { key: String, section: String },

    #[error("Auto-creation of {kind} '{name}' is disabled")]
    AutoCreateDisallowed { kind: &'static str, name: String },

    #[error("The default section cannot be deleted")]
    DefaultSectionProtected,

    #[error("Invalid key name: '{0}'")]
    InvalidKeyName(String),

    #[error("Invalid section name: '{0}'")]
    InvalidSectionName(String),

    #[error("Invalid value: '{0}' (values must fit on one line)")]
    InvalidValue(String),

    #[error("Invalid syntax: {0}")]
    InvalidSyntax(String),
}

/// An INI-style document held in memory
#[derive(Debug, Clone)]
pub struct DataFile {
    sections: Vec<Section>,
    file_name: Option<PathBuf>,
    dirty: bool,
    flags: Flags,
    syntax: Syntax,
}

impl Default for DataFile {
    fn default() -> Self {
        Self::new()
    }
}

impl DataFile {
    /// Creates an empty document holding only the default section
    pub fn new() -> Self {
        Self {
            sections: vec![Section::new(DEFAULT_SECTION)],
            file_name: None,
            dirty: false,
            flags: Flags::default(),
            syntax: Syntax::default(),
        }
    }

    /// Creates an empty document bound to `path` without reading it
    pub fn with_file_name(path: impl Into<PathBuf>) -> Self {
        let mut file = Self::new();
        file.file_name = Some(path.into());
        file
    }

    /// Loads the document at `path`; fails if it does not exist
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DataFileError> {
        let mut file = Self::new();
        file.load(path)?;
        Ok(file)
    }

    /// Loads `path` if it exists, otherwise returns an empty document bound to it
    pub fn open_or_create(path: impl AsRef<Path>) -> Result<Self, DataFileError> {
        Self::open_or_create_with(path, Syntax::default(), Flags::default())
    }

    /// Like [`open_or_create`](Self::open_or_create) with explicit syntax and policy
    pub fn open_or_create_with(
        path: impl AsRef<Path>,
        syntax: Syntax,
        flags: Flags,
    ) -> Result<Self, DataFileError> {
        let path = path.as_ref();
        let mut file = Self::with_file_name(path);
        file.syntax = syntax;
        file.flags = flags;

        if path.exists() {
            file.load(path)?;
        } else {
            debug!(path = %path.display(), "starting new data file");
        }
        Ok(file)
    }

    /// Builds a document from text using the default syntax
    pub fn from_text(text: &str) -> Self {
        let mut file = Self::new();
        file.load_str(text);
        file
    }

    /// Replaces the whole document with the contents of `path` and binds to it.
    ///
    /// On error the document and its file name are left untouched.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<(), DataFileError> {
        let path = path.as_ref();
        let text = read_text(path)?;

        self.load_str(&text);
        self.file_name = Some(path.to_path_buf());
        info!(
            path = %path.display(),
            sections = self.section_count(),
            keys = self.key_count(),
            "loaded data file"
        );
        Ok(())
    }

    /// Replaces the whole document with parsed `text`
    pub fn load_str(&mut self, text: &str) {
        self.sections = parser::parse(text, &self.syntax);
        self.dirty = false;
    }

    /// Writes the document to its bound file, replacing the previous contents
    pub fn save(&mut self) -> Result<(), DataFileError> {
        let path = self.file_name.clone().ok_or(DataFileError::NoFileName)?;
        let text = self.render();

        write_atomic(&path, &text)?;
        self.dirty = false;
        info!(path = %path.display(), bytes = text.len(), "saved data file");
        Ok(())
    }

    /// Canonical text for the current document
    pub fn render(&self) -> String {
        writer::render(&self.sections, &self.syntax)
    }

    /// Formats a comment the way it would be written to disk
    pub fn comment_lines(&self, comment: &str) -> Vec<String> {
        writer::comment_lines(comment, &self.syntax)
    }

    pub fn file_name(&self) -> Option<&Path> {
        self.file_name.as_deref()
    }

    pub fn set_file_name(&mut self, path: impl Into<PathBuf>) {
        self.file_name = Some(path.into());
    }

    pub fn flags(&self) -> Flags {
        self.flags
    }

    pub fn set_flags(&mut self, flags: Flags) {
        self.flags = flags;
    }

    pub fn syntax(&self) -> &Syntax {
        &self.syntax
    }

    /// Changes the indicators used by later loads and saves
    pub fn set_syntax(&mut self, syntax: Syntax) {
        self.syntax = syntax;
    }

    /// True if the document changed since the last load, save or clear
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    /// Drops every section and key, keeping only an empty default section
    pub fn clear(&mut self) {
        self.sections = vec![Section::new(DEFAULT_SECTION)];
        self.dirty = false;
    }

    // Lookup

    pub fn sections(&self) -> impl ExactSizeIterator<Item = &Section> {
        self.sections.iter()
    }

    /// Number of sections, including the default section
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Number of keys across all sections
    pub fn key_count(&self) -> usize {
        self.sections.iter().map(Section::key_count).sum()
    }

    pub fn find_section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.is_named(name))
    }

    pub fn has_section(&self, name: &str) -> bool {
        self.section_index(name).is_some()
    }

    /// Looks up `key` in `section`; an empty section name means the default section
    pub fn find_key(&self, key: &str, section: &str) -> Option<&Key> {
        self.find_section(section)?.find_key(key)
    }

    pub fn get_value(&self, key: &str, section: &str) -> Option<&str> {
        self.find_key(key, section).map(|k| k.value.as_str())
    }

    /// The value as owned text, empty if the key is missing
    pub fn get_string(&self, key: &str, section: &str) -> String {
        self.get_value(key, section).unwrap_or_default().to_string()
    }

    /// The value as an integer; missing or malformed values read as 0
    pub fn get_int(&self, key: &str, section: &str) -> i64 {
        self.typed(key, section, parse_int)
    }

    /// The value as a float; missing or malformed values read as 0.0
    pub fn get_float(&self, key: &str, section: &str) -> f64 {
        self.typed(key, section, parse_float)
    }

    /// The value as a boolean; missing or unrecognized values read as false
    pub fn get_bool(&self, key: &str, section: &str) -> bool {
        self.typed(key, section, parse_bool)
    }

    fn typed<T: Default, E: std::fmt::Display>(
        &self,
        key: &str,
        section: &str,
        parse: impl Fn(&str) -> Result<T, E>,
    ) -> T {
        let Some(value) = self.get_value(key, section) else {
            return T::default();
        };
        parse(value).unwrap_or_else(|e| {
            debug!(key, section, error = %e, "falling back to default value");
            T::default()
        })
    }

    // Mutation

    /// Sets `key` in `section`, creating either only if the flags allow it.
    ///
    /// An empty `comment` leaves any existing comment in place.
    pub fn set_value(
        &mut self,
        key: &str,
        value: &str,
        comment: &str,
        section: &str,
    ) -> Result<(), DataFileError> {
        self.write_key(Key::new(key, value).with_comment(comment), section, self.flags)
    }

    pub fn set_int(
        &mut self,
        key: &str,
        value: i64,
        comment: &str,
        section: &str,
    ) -> Result<(), DataFileError> {
        self.set_value(key, &value.to_string(), comment, section)
    }

    pub fn set_float(
        &mut self,
        key: &str,
        value: f64,
        comment: &str,
        section: &str,
    ) -> Result<(), DataFileError> {
        self.set_value(key, &format_float(value), comment, section)
    }

    pub fn set_bool(
        &mut self,
        key: &str,
        value: bool,
        comment: &str,
        section: &str,
    ) -> Result<(), DataFileError> {
        self.set_value(key, format_bool(value), comment, section)
    }

    /// Creates `key` regardless of [`Flags::AUTOCREATE_KEYS`].
    ///
    /// The section is still only created if [`Flags::AUTOCREATE_SECTIONS`]
    /// is set. An existing key of the same name is updated in place.
    pub fn create_key(
        &mut self,
        key: &str,
        value: &str,
        comment: &str,
        section: &str,
    ) -> Result<(), DataFileError> {
        let flags = self.flags | Flags::AUTOCREATE_KEYS;
        self.write_key(Key::new(key, value).with_comment(comment), section, flags)
    }

    /// Creates an empty section. Returns false if it already existed.
    pub fn create_section(&mut self, name: &str, comment: &str) -> Result<bool, DataFileError> {
        self.create_section_with_keys(name, comment, Vec::<Key>::new())
    }

    /// Creates a section holding `keys` in the given order.
    ///
    /// Names and values are checked like [`set_value`](Self::set_value) does;
    /// a later key with the same name replaces an earlier one. Returns false
    /// and changes nothing if the section already exists.
    pub fn create_section_with_keys(
        &mut self,
        name: &str,
        comment: &str,
        keys: impl IntoIterator<Item = Key>,
    ) -> Result<bool, DataFileError> {
        let name = self.syntax.section_name(name)?;
        let keys = keys
            .into_iter()
            .map(|key| self.checked_key(key))
            .collect::<Result<Vec<_>, _>>()?;

        if self.has_section(name) {
            debug!(section = name, "section already exists");
            return Ok(false);
        }

        let mut section = Section::new(name).with_comment(comment);
        for key in keys {
            section.upsert_key(key);
        }
        debug!(section = name, keys = section.key_count(), "created section");
        self.sections.push(section);
        self.dirty = true;
        Ok(true)
    }

    /// Overwrites the comment of `key`; an empty comment clears it
    pub fn set_key_comment(
        &mut self,
        key: &str,
        comment: &str,
        section: &str,
    ) -> Result<(), DataFileError> {
        let index = self.require_section(section)?;
        let entry = self.sections[index]
            .key_mut(key)
            .ok_or_else(|| DataFileError::KeyNotFound {
                key: key.to_string(),
                section: section.to_string(),
            })?;

        if entry.comment != comment {
            entry.comment = comment.to_string();
            self.dirty = true;
        }
        Ok(())
    }

    /// Overwrites the comment of `section`; an empty comment clears it
    pub fn set_section_comment(&mut self, section: &str, comment: &str) -> Result<(), DataFileError> {
        let index = self.require_section(section)?;
        let entry = &mut self.sections[index];

        if entry.comment != comment {
            entry.comment = comment.to_string();
            self.dirty = true;
        }
        Ok(())
    }

    /// Removes the first key answering to `key` in `section`
    pub fn delete_key(&mut self, key: &str, section: &str) -> Result<(), DataFileError> {
        let index = self.require_section(section)?;
        self.sections[index]
            .remove_key(key)
            .ok_or_else(|| DataFileError::KeyNotFound {
                key: key.to_string(),
                section: section.to_string(),
            })?;

        debug!(key, section, "deleted key");
        self.dirty = true;
        Ok(())
    }

    /// Removes a named section and its keys. The default section is kept.
    pub fn delete_section(&mut self, section: &str) -> Result<(), DataFileError> {
        let index = self.require_section(section)?;
        if self.sections[index].is_default() {
            warn!("refusing to delete the default section");
            return Err(DataFileError::DefaultSectionProtected);
        }

        let removed = self.sections.remove(index);
        debug!(section = %removed.name, keys = removed.key_count(), "deleted section");
        self.dirty = true;
        Ok(())
    }

    fn section_index(&self, name: &str) -> Option<usize> {
        self.sections.iter().position(|s| s.is_named(name))
    }

    fn require_section(&self, name: &str) -> Result<usize, DataFileError> {
        self.section_index(name)
            .ok_or_else(|| DataFileError::SectionNotFound(name.to_string()))
    }

    /// `key` with its name and value trimmed, or an error if either would
    /// not read back unchanged
    fn checked_key(&self, key: Key) -> Result<Key, DataFileError> {
        Ok(Key {
            name: self.syntax.key_name(&key.name)?.to_string(),
            value: self.syntax.value(&key.value)?.to_string(),
            comment: key.comment,
        })
    }

    /// Shared path for the setters; every check happens before any mutation
    fn write_key(&mut self, key: Key, section: &str, flags: Flags) -> Result<(), DataFileError> {
        let key = self.checked_key(key)?;
        let section = self.syntax.section_name(section)?;

        let section_index = self.section_index(section);
        if section_index.is_none() && !flags.contains(Flags::AUTOCREATE_SECTIONS) {
            debug!(section, "section missing and auto-creation disabled");
            return Err(DataFileError::AutoCreateDisallowed {
                kind: "section",
                name: section.to_string(),
            });
        }

        let key_exists = section_index
            .and_then(|i| self.sections[i].key_index(&key.name))
            .is_some();
        if !key_exists && !flags.contains(Flags::AUTOCREATE_KEYS) {
            debug!(key = %key.name, section, "key missing and auto-creation disabled");
            return Err(DataFileError::AutoCreateDisallowed {
                kind: "key",
                name: key.name,
            });
        }

        let index = match section_index {
            Some(index) => index,
            None => {
                debug!(section, "auto-creating section");
                self.sections.push(Section::new(section));
                self.sections.len() - 1
            }
        };

        if self.sections[index].upsert_key(key) {
            self.dirty = true;
        }
        Ok(())
    }
}

/// Reads the whole file under a shared lock
pub fn read_text(path: &Path) -> Result<String, DataFileError> {
    let file = File::open(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            DataFileError::FileNotFound(path.to_path_buf())
        } else {
            DataFileError::Read {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    let read_err = |source| DataFileError::Read {
        path: path.to_path_buf(),
        source,
    };

    FileExt::lock_shared(&file).map_err(read_err)?;

    let mut text = String::new();
    (&file).read_to_string(&mut text).map_err(read_err)?;

    // Lock is released when file is dropped
    Ok(text)
}

/// Writes `text` to a sibling temp file, then renames it over `path`
fn write_atomic(path: &Path, text: &str) -> Result<(), DataFileError> {
    let write_err = |source| DataFileError::FileUnwritable {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_err)?;
    }

    let temp_path = temp_path_for(path);

    let result = (|| -> io::Result<()> {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)?;

        FileExt::lock_exclusive(&file)?;

        let mut out = BufWriter::new(&file);
        out.write_all(text.as_bytes())?;
        out.flush()?;
        drop(out);

        file.sync_all()?;
        drop(file);

        fs::rename(&temp_path, path)
    })();

    if let Err(source) = result {
        warn!(path = %path.display(), error = %source, "save failed");
        let _ = fs::remove_file(&temp_path);
        return Err(write_err(source));
    }
    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
