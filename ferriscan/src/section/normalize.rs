//! Cleanup of captured terminal text before extraction.

use std::borrow::Cow;

use memchr::memchr;

/// Strip ANSI escape sequences from a captured log.
///
/// Carriage returns and tabs are kept: multi-line stanzas are recognised by
/// a trailing `\r` and continuation lines may be tab-indented. Text without
/// an escape byte is returned unchanged.
pub fn normalize_log(text: &str) -> Cow<'_, str> {
    if memchr(0x1b, text.as_bytes()).is_none() {
        return Cow::Borrowed(text);
    }

    let mut cleaned = String::with_capacity(text.len());
    for piece in text.split_inclusive(['\r', '\t']) {
        let (body, separator) = match piece.strip_suffix(['\r', '\t']) {
            Some(body) => (body, &piece[body.len()..]),
            None => (piece, ""),
        };
        cleaned.push_str(&strip_ansi_escapes::strip_str(body));
        cleaned.push_str(separator);
    }

    Cow::Owned(cleaned)
}
