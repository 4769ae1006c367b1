//! # Storage Layer
//!
//! The in-memory document store and its text format.
//!
//! ## File Format
//!
//! ```text
//! ; comment lines attach to whatever follows them
//! Debug=1            # keys before any header live in the default section
//!
//! [Server]
//! ; listen port
//! Port=8080
//! ```
//!
//! | Element | Recognized | Written as |
//! |---------|------------|------------|
//! | Comment | `;` or `#` at line start | `;` |
//! | Assignment | first `=` or `:` | `=` |
//! | Header | `[Name]` | `[Name]` |
//!
//! Both indicator sets are configurable per store through [`Syntax`].
//!
//! ## Key Types
//!
//! - [`DataFile`] - The store: lookup, CRUD, load and save
//! - [`Syntax`] - Comment and assignment indicators
//! - [`Flags`] - Auto-creation policy for writes
//! - [`Config`] - CLI configuration (TOML)

mod config;
mod datafile;
mod parser;
mod syntax;
mod writer;

pub use config::{AutocreateConfig, Config, ConfigError, OutputFormat, SyntaxConfig};
pub use datafile::{read_text, DataFile, DataFileError};
pub use parser::parse;
pub use syntax::{Flags, Syntax, DEFAULT_COMMENT_INDICATORS, DEFAULT_EQUAL_INDICATORS};
pub use writer::{comment_lines, render, LINE_ENDING};
