//! Text to document parsing
//!
//! Line-oriented. Comment lines accumulate into a pending buffer that is
//! attached to the next section header or key line.

use tracing::{debug, trace};

use super::Syntax;
use crate::domain::{Key, Section, DEFAULT_SECTION};

/// Parses `text` into an ordered section list.
///
/// The first entry is always the default section. A repeated header merges
/// into the section it names, `[]` names the default section, and a repeated
/// key updates the earlier one in place.
pub fn parse(text: &str, syntax: &Syntax) -> Vec<Section> {
    let mut sections = vec![Section::new(DEFAULT_SECTION)];
    let mut current = 0;
    let mut pending = String::new();

    for (line_num, raw) in text.lines().enumerate() {
        let line = raw.trim();

        if line.is_empty() {
            continue;
        }

        if syntax.is_comment(line) {
            if !pending.is_empty() {
                pending.push('\n');
            }
            pending.push_str(line);
            continue;
        }

        if let Some(name) = section_header(line) {
            let comment = std::mem::take(&mut pending);
            current = match sections.iter().position(|s| s.is_named(name)) {
                Some(index) => {
                    debug!(line = line_num + 1, section = name, "merging repeated section header");
                    if !comment.is_empty() {
                        sections[index].comment = comment;
                    }
                    index
                }
                None => {
                    sections.push(Section::new(name).with_comment(comment));
                    sections.len() - 1
                }
            };
            continue;
        }

        if let Some(pos) = syntax.find_equals(line) {
            let separator_len = line[pos..].chars().next().map_or(1, char::len_utf8);
            let name = line[..pos].trim();
            let value = line[pos + separator_len..].trim();

            if name.is_empty() {
                debug!(line = line_num + 1, "skipping assignment without a key name");
                pending.clear();
                continue;
            }

            let comment = std::mem::take(&mut pending);
            let section = &mut sections[current];
            if section.find_key(name).is_some() {
                debug!(line = line_num + 1, key = name, section = %section.name, "repeated key overrides earlier value");
            }
            section.upsert_key(Key::new(name, value).with_comment(comment));
            continue;
        }

        trace!(line = line_num + 1, "skipping unrecognized line");
        pending.clear();
    }

    if !pending.is_empty() {
        trace!("discarding trailing comment with nothing to attach to");
    }

    sections
}

/// Returns the trimmed name inside `[...]`
fn section_header(line: &str) -> Option<&str> {
    line.strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .map(str::trim)
}
