//! The data file a command operates on

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use crate::storage::{read_text, Config, DataFile, Flags, Syntax};

/// Path plus the syntax and policy every opened file gets
pub struct Target {
    path: PathBuf,
    syntax: Syntax,
    flags: Flags,
}

impl Target {
    pub fn new(path: impl Into<PathBuf>, syntax: Syntax, flags: Flags) -> Self {
        Self {
            path: path.into(),
            syntax,
            flags,
        }
    }

    /// Builds a target from the CLI configuration
    pub fn from_config(path: impl Into<PathBuf>, config: &Config, no_autocreate: bool) -> Result<Self> {
        let syntax = config.syntax()?;
        let flags = if no_autocreate {
            Flags::empty()
        } else {
            config.flags()
        };
        Ok(Self::new(path, syntax, flags))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Opens an existing file
    pub fn open(&self) -> Result<DataFile> {
        let mut file = DataFile::with_file_name(&self.path);
        file.set_syntax(self.syntax.clone());
        file.set_flags(self.flags);
        file.load(&self.path)
            .with_context(|| format!("Failed to open {}", self.path.display()))?;
        Ok(file)
    }

    /// Opens an existing file, also returning the text it was parsed from
    pub fn open_with_text(&self) -> Result<(DataFile, String)> {
        let text = read_text(&self.path)
            .with_context(|| format!("Failed to open {}", self.path.display()))?;

        let mut file = DataFile::with_file_name(&self.path);
        file.set_syntax(self.syntax.clone());
        file.set_flags(self.flags);
        file.load_str(&text);
        debug!(path = %self.path.display(), bytes = text.len(), "read data file");
        Ok((file, text))
    }

    /// Opens the file, or starts an empty one bound to the path
    pub fn open_or_create(&self) -> Result<DataFile> {
        DataFile::open_or_create_with(&self.path, self.syntax.clone(), self.flags)
            .with_context(|| format!("Failed to open {}", self.path.display()))
    }

    /// Saves only when something changed. Returns true if the file was written.
    pub fn save_if_dirty(&self, file: &mut DataFile) -> Result<bool> {
        if !file.is_dirty() {
            debug!(path = %self.path.display(), "no changes to save");
            return Ok(false);
        }
        file.save()
            .with_context(|| format!("Failed to save {}", self.path.display()))?;
        Ok(true)
    }
}
