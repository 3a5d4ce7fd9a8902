//! Rule matching over extracted sections.
//!
//! Matching happens in two steps: collect every non-overlapping match of a
//! rule's pattern in order, then stitch the raw matches back into findings
//! (see [`Stitching`]).

mod stitch;

pub use stitch::{KeyedStitch, Stitching, stitch_carriage_return, stitch_keyed};

use regex::{Captures, Regex};

fn group<'t>(captures: &Captures<'t>, index: usize) -> &'t str {
    captures.get(index).map_or("", |m| m.as_str())
}

/// Collect the matches of `pattern` in `section`, left to right.
///
/// A pattern without capture groups yields whole matches; otherwise the
/// first group of each match is returned (empty when it did not take part).
pub fn apply_rule<'t>(section: &'t str, pattern: &Regex) -> Vec<&'t str> {
    if pattern.captures_len() == 1 {
        pattern.find_iter(section).map(|m| m.as_str()).collect()
    } else {
        pattern
            .captures_iter(section)
            .map(|c| group(&c, 1))
            .collect()
    }
}

/// Collect the first two capture groups of every match of `pattern`.
pub fn apply_rule_pairs<'t>(section: &'t str, pattern: &Regex) -> Vec<(&'t str, &'t str)> {
    pattern
        .captures_iter(section)
        .map(|c| (group(&c, 1), group(&c, 2)))
        .collect()
}
