//! Domain models for inidata
//!
//! The document model (sections holding ordered keys) and the scalar
//! conversions layered on top of text values. No I/O lives here.

mod key;
mod section;
mod value;

pub use key::Key;
pub use section::Section;
pub use value::{format_bool, format_float, parse_bool, parse_float, parse_int, ValueError};

/// Name of the implicit section holding keys that precede any header
pub const DEFAULT_SECTION: &str = "";

/// Case-insensitive name comparison used for both sections and keys.
///
/// Outer whitespace is ignored, as it is when names are parsed.
pub fn names_match(a: &str, b: &str) -> bool {
    a.trim()
        .chars()
        .flat_map(char::to_lowercase)
        .eq(b.trim().chars().flat_map(char::to_lowercase))
}
