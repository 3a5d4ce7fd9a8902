//! Named block extraction within a command section.

use memchr::memchr;
use regex::Regex;

/// How a block label is matched against the start of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelMatch {
    /// The line starts with the label.
    #[default]
    Prefix,

    /// The line starts with the label and the label ends on a token
    /// boundary, so `Gi0/1` does not select the line for `Gi0/10`.
    Token,
}

impl LabelMatch {
    fn pattern(self, label: &str) -> String {
        let label = regex::escape(label);
        match self {
            LabelMatch::Prefix => format!(r"(?m)^{label}"),
            LabelMatch::Token => format!(r"(?m)^{label}(?:[^\w/.]|$)"),
        }
    }
}

/// Find the byte offset of the first column-zero line starting with `label`.
///
/// The label is always matched literally.
fn find_anchor_line(text: &str, label: &str, label_match: LabelMatch) -> Option<usize> {
    Regex::new(&label_match.pattern(label)).ok()?.find(text).map(|m| m.start())
}

/// Offset just past the newline ending the line that starts at `from`.
fn next_line_start(text: &str, from: usize) -> usize {
    memchr(b'\n', &text.as_bytes()[from..]).map_or(text.len(), |i| from + i + 1)
}

/// Extract the block introduced by a column-zero line starting with `label`.
///
/// The block is the anchor line plus every directly following line that
/// starts with whitespace (blank lines included). It ends at the first
/// column-zero line or end of text.
///
/// ```text
/// GigabitEthernet0/1 is up, line protocol is up    <- anchor
///   Internet address is 10.0.0.1/24                <- continuation
///   Address determined by DHCP                     <- continuation
/// GigabitEthernet0/2 is down                       <- stop
/// ```
pub fn extract_named_block<'t>(section: &'t str, label: &str) -> Option<&'t str> {
    extract_block(section, label, LabelMatch::Prefix)
}

/// Same as [`extract_named_block`], with an explicit label match mode.
pub fn extract_block<'t>(section: &'t str, label: &str, label_match: LabelMatch) -> Option<&'t str> {
    let start = find_anchor_line(section, label, label_match)?;
    let mut end = next_line_start(section, start);

    while end < section.len() {
        let next = next_line_start(section, end);
        if !section[end..next].starts_with(char::is_whitespace) {
            break;
        }
        end = next;
    }

    Some(&section[start..end])
}

/// Extract the block from the `label` line up to the next line starting
/// with `next_label` (excluded), or end of text.
///
/// Used for outputs whose records are not indented, such as
/// `show interface switchport`, where each record opens with `Name:`.
pub fn extract_until_next<'t>(
    section: &'t str,
    label: &str,
    next_label: &str,
    label_match: LabelMatch,
) -> Option<&'t str> {
    let start = find_anchor_line(section, label, label_match)?;
    let body = next_line_start(section, start);

    let end = find_anchor_line(&section[body..], next_label, LabelMatch::Prefix)
        .map_or(section.len(), |i| body + i);

    Some(&section[start..end])
}
