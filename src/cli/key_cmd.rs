//! Key CLI commands

use anyhow::{bail, Result};
use clap::{Subcommand, ValueEnum};
use serde_json::Value;

use super::output::{section_label, Output};
use super::target::Target;
use crate::domain::DEFAULT_SECTION;
use crate::storage::DataFileError;

#[derive(Subcommand)]
pub enum KeyCommands {
    /// Print a key's value
    ///
    /// Examples:
    ///   inidata -F app.ini key get Debug
    ///   inidata -F app.ini key get Port -s Server --as int
    Get {
        /// Key name (case-insensitive)
        key: String,

        /// Section name (omit for the default section)
        #[arg(long, short, default_value = DEFAULT_SECTION)]
        section: String,

        /// Interpret the value as this type
        #[arg(long = "as", value_enum, default_value = "string")]
        value_type: ValueType,
    },

    /// Set a key's value, creating it if auto-creation allows
    Set {
        key: String,

        #[arg(allow_hyphen_values = true)]
        value: String,

        #[arg(long, short, default_value = DEFAULT_SECTION)]
        section: String,

        /// Comment to place above the key (an empty comment keeps the old one)
        #[arg(long, short, default_value = "")]
        comment: String,
    },

    /// Create a key even when key auto-creation is disabled
    Add {
        key: String,

        #[arg(allow_hyphen_values = true)]
        value: String,

        #[arg(long, short, default_value = DEFAULT_SECTION)]
        section: String,

        #[arg(long, short, default_value = "")]
        comment: String,
    },

    /// Delete a key
    Delete {
        key: String,

        #[arg(long, short, default_value = DEFAULT_SECTION)]
        section: String,
    },

    /// Replace a key's comment (an empty comment clears it)
    Comment {
        key: String,
        comment: String,

        #[arg(long, short, default_value = DEFAULT_SECTION)]
        section: String,
    },

    /// List the keys of a section
    List {
        #[arg(long, short, default_value = DEFAULT_SECTION)]
        section: String,
    },
}

/// How `key get` interprets the stored text
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ValueType {
    String,
    Int,
    Float,
    Bool,
}

pub fn run(cmd: KeyCommands, target: &Target, output: &Output) -> Result<()> {
    match cmd {
        KeyCommands::Get {
            key,
            section,
            value_type,
        } => get(target, output, &key, &section, value_type),
        KeyCommands::Set {
            key,
            value,
            section,
            comment,
        } => set(target, output, &key, &value, &comment, &section, false),
        KeyCommands::Add {
            key,
            value,
            section,
            comment,
        } => set(target, output, &key, &value, &comment, &section, true),
        KeyCommands::Delete { key, section } => delete(target, output, &key, &section),
        KeyCommands::Comment {
            key,
            comment,
            section,
        } => set_comment(target, output, &key, &comment, &section),
        KeyCommands::List { section } => list(target, output, &section),
    }
}

fn get(target: &Target, output: &Output, key: &str, section: &str, value_type: ValueType) -> Result<()> {
    let file = target.open()?;

    let Some(raw) = file.get_value(key, section) else {
        bail!(DataFileError::KeyNotFound {
            key: key.to_string(),
            section: section.to_string(),
        });
    };

    let value = match value_type {
        ValueType::String => Value::from(raw),
        ValueType::Int => Value::from(file.get_int(key, section)),
        ValueType::Float => Value::from(file.get_float(key, section)),
        ValueType::Bool => Value::from(file.get_bool(key, section)),
    };

    if output.is_json() {
        output.data(&serde_json::json!({
            "section": section,
            "key": key,
            "value": value,
        }));
    } else {
        match value {
            Value::String(s) => println!("{}", s),
            other => println!("{}", other),
        }
    }

    Ok(())
}

fn set(
    target: &Target,
    output: &Output,
    key: &str,
    value: &str,
    comment: &str,
    section: &str,
    force_create: bool,
) -> Result<()> {
    let mut file = target.open_or_create()?;

    if force_create {
        file.create_key(key, value, comment, section)?;
    } else {
        file.set_value(key, value, comment, section)?;
    }
    let saved = target.save_if_dirty(&mut file)?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "section": section,
            "key": key,
            "value": value,
            "changed": saved,
        }));
    } else if saved {
        output.success(&format!("Set {} in {}", key, section_label(section)));
    } else {
        output.success(&format!("{} already up to date", key));
    }

    Ok(())
}

fn delete(target: &Target, output: &Output, key: &str, section: &str) -> Result<()> {
    let mut file = target.open()?;
    file.delete_key(key, section)?;
    target.save_if_dirty(&mut file)?;

    output.success(&format!("Deleted {} from {}", key, section_label(section)));
    Ok(())
}

fn set_comment(target: &Target, output: &Output, key: &str, comment: &str, section: &str) -> Result<()> {
    let mut file = target.open()?;
    file.set_key_comment(key, comment, section)?;
    target.save_if_dirty(&mut file)?;

    if comment.is_empty() {
        output.success(&format!("Cleared comment on {}", key));
    } else {
        output.success(&format!("Updated comment on {}", key));
    }
    Ok(())
}

fn list(target: &Target, output: &Output, section: &str) -> Result<()> {
    let file = target.open()?;
    let Some(found) = file.find_section(section) else {
        bail!(DataFileError::SectionNotFound(section.to_string()));
    };

    if output.is_json() {
        let keys: Vec<_> = found.keys().collect();
        output.data(&keys);
    } else if found.key_count() == 0 {
        println!("No keys in {}", section_label(section));
    } else {
        for key in found.keys() {
            output.row(&[key.name.as_str(), key.value.as_str()]);
        }
    }

    Ok(())
}
