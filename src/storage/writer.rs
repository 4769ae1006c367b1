//! Document to text rendering

use super::Syntax;
use crate::domain::Section;

#[cfg(windows)]
pub const LINE_ENDING: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";

/// Renders sections in stored order using the canonical indicators.
///
/// The default section is written without a header, unless it carries its
/// own comment: then `[]` follows the comment so a reload attaches the
/// comment to the section rather than to its first key. Named sections are
/// separated by one blank line.
pub fn render(sections: &[Section], syntax: &Syntax) -> String {
    let mut out = String::new();
    let equals = syntax.canonical_equals();

    for section in sections {
        if section.is_default() {
            if section.comment.is_empty() && section.key_count() == 0 {
                continue;
            }
        } else if !out.is_empty() {
            out.push_str(LINE_ENDING);
        }

        for line in comment_lines(&section.comment, syntax) {
            push_line(&mut out, &line);
        }
        if !section.is_default() || section.has_comment() {
            push_line(&mut out, &format!("[{}]", section.name));
        }

        for key in section.keys() {
            for line in comment_lines(&key.comment, syntax) {
                push_line(&mut out, &line);
            }
            push_line(&mut out, &format!("{}{}{}", key.name, equals, key.value));
        }
    }

    out
}

/// Splits a stored comment into writable lines.
///
/// Each line keeps its own indicator if it has one; otherwise the canonical
/// indicator and a space are prepended.
pub fn comment_lines(comment: &str, syntax: &Syntax) -> Vec<String> {
    if comment.is_empty() {
        return Vec::new();
    }

    comment
        .lines()
        .map(str::trim)
        .map(|line| {
            if syntax.is_comment(line) {
                line.to_string()
            } else if line.is_empty() {
                syntax.canonical_comment().to_string()
            } else {
                format!("{} {}", syntax.canonical_comment(), line)
            }
        })
        .collect()
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push_str(LINE_ENDING);
}
