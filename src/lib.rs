//! inidata - An in-memory model and text engine for INI-style data files
//!
//! A file is a list of named sections, each holding ordered key/value pairs,
//! with optional comments attached to sections and keys. [`DataFile`] loads
//! such a file, offers lookup and create/update/delete over it, and writes it
//! back in canonical form.
//!
//! ```
//! use inidata::DataFile;
//!
//! let mut file = DataFile::from_text("; global\nDebug=1\n\n[Server]\nPort=8080\n");
//! assert_eq!(file.get_int("port", "server"), 8080);
//!
//! file.set_value("Host", "localhost", "", "Server").unwrap();
//! assert!(file.is_dirty());
//! assert_eq!(file.key_count(), 3);
//! ```

pub mod cli;
pub mod domain;
pub mod storage;

pub use domain::{Key, Section, DEFAULT_SECTION};
pub use storage::{DataFile, DataFileError, Flags, Syntax};
