//! # Command-Line Interface
//!
//! User-facing commands over a single INI-style data file.
//!
//! ## Command Groups
//!
//! | Group | Purpose | Examples |
//! |-------|---------|----------|
//! | Key | Read and write values | `key get`, `key set`, `key delete` |
//! | Section | Manage sections | `section add`, `section list` |
//! | Document | Whole-file views | `show`, `stats`, `fmt` |
//!
//! ## Selecting the File
//!
//! Every command works on the file given by `--file` (or `INIDATA_FILE`):
//! ```bash
//! inidata --file app.ini key get Port --section Server
//! ```
//!
//! ## Output Formats
//!
//! All commands support `--format`:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! ## Diagnostics
//!
//! `--verbose` turns on debug logging to stderr; `RUST_LOG` overrides it.
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod document_cmd;
mod key_cmd;
mod output;
mod section_cmd;
mod target;

pub use app::{run, Cli, Commands};
pub use output::{Output, OutputFormat};
pub use target::Target;
