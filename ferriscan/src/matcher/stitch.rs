//! Continuation stitching.
//!
//! Configuration stanzas often spread a key and its value over two lines:
//!
//! ```text
//! tacacs server ISE-1\r
//!  key 7 0822455D0A16
//! ```
//!
//! A rule matching both lines yields two raw matches. Stitching joins such
//! pairs into a single `key: value` entry in one left-to-right pass.

use regex::Regex;

/// Suffix used when a keyed line has no credential on the following match.
const NOT_FOUND: &str = "key or secret not found";

fn as_str<S: AsRef<str>>(raw: &S) -> &str {
    raw.as_ref()
}

fn join(key: &str, value: &str) -> String {
    format!("{}: {}", key.trim(), value.trim())
}

/// How raw matches are turned into findings.
#[derive(Debug, Clone, Default)]
pub enum Stitching {
    /// Every match is trimmed and emitted on its own.
    #[default]
    None,

    /// A match ending in `\r` is joined with the match after it.
    CarriageReturn,

    /// Matches carrying a keyword are joined with a credential on the
    /// following match, or annotated when there is none.
    Keyed(KeyedStitch),
}

impl Stitching {
    /// Stitch raw matches according to this strategy.
    pub fn apply<S: AsRef<str>>(&self, matches: &[S]) -> Vec<String> {
        match self {
            Stitching::None => matches.iter().map(|m| as_str(m).trim().to_string()).collect(),
            Stitching::CarriageReturn => stitch_carriage_return(matches),
            Stitching::Keyed(keyed) => stitch_keyed(matches, keyed),
        }
    }
}

/// Keyword-driven lookahead configuration.
#[derive(Debug, Clone)]
pub struct KeyedStitch {
    /// Substrings marking a line that expects a credential.
    keywords: Vec<String>,

    /// Pattern the following match must satisfy to be taken as the value.
    continuation: Regex,
}

impl KeyedStitch {
    /// Create a keyed stitch from keywords and a continuation pattern.
    pub fn new<I, S>(keywords: I, continuation: &str) -> Result<Self, regex::Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Ok(Self {
            keywords: keywords.into_iter().map(Into::into).collect(),
            continuation: Regex::new(continuation)?,
        })
    }

    fn is_keyed(&self, raw: &str) -> bool {
        self.keywords.iter().any(|k| raw.contains(k.as_str()))
    }

    fn continues(&self, raw: &str) -> bool {
        self.continuation.is_match(raw)
    }
}

enum State<'m> {
    Normal,
    ExpectingContinuation(&'m str),
}

/// Join every match ending in a carriage return with the match after it.
///
/// Transitions:
/// - `Normal` + match ending in `\r` -> `ExpectingContinuation`
/// - `Normal` + other match -> emit it, stay `Normal`
/// - `ExpectingContinuation` + any match -> emit `key: value`, `Normal`
///
/// A key left waiting at the end of input is emitted on its own.
pub fn stitch_carriage_return<S: AsRef<str>>(matches: &[S]) -> Vec<String> {
    let mut output = Vec::with_capacity(matches.len());
    let mut state = State::Normal;

    for raw in matches.iter().map(as_str) {
        state = match state {
            State::ExpectingContinuation(key) => {
                output.push(join(key, raw));
                State::Normal
            }
            State::Normal if raw.ends_with('\r') => State::ExpectingContinuation(raw),
            State::Normal => {
                output.push(raw.trim().to_string());
                State::Normal
            }
        };
    }

    if let State::ExpectingContinuation(key) = state {
        output.push(key.trim().to_string());
    }

    output
}

/// Join keyed matches with a credential found on the next match.
///
/// The next match is consumed only when it satisfies the continuation
/// pattern; otherwise the keyed match is annotated as having no key.
pub fn stitch_keyed<S: AsRef<str>>(matches: &[S], keyed: &KeyedStitch) -> Vec<String> {
    let mut output = Vec::with_capacity(matches.len());
    let mut raws = matches.iter().map(as_str).peekable();

    while let Some(raw) = raws.next() {
        if !keyed.is_keyed(raw) {
            output.push(raw.trim().to_string());
            continue;
        }

        match raws.next_if(|next| keyed.continues(next)) {
            Some(value) => output.push(join(raw, value)),
            None => output.push(format!("{}: {NOT_FOUND}", raw.trim())),
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn xr_keyed() -> KeyedStitch {
        KeyedStitch::new(
            ["username", "tacacs-server host", "server-private", "key chain"],
            r"^ *(?:key-string|key|secret)",
        )
        .unwrap()
    }

    #[test]
    fn test_carriage_return_pairs() {
        let matches = ["tacacs server ISE\r", " key 7 0822455D0A16", "enable secret 9 abc"];
        assert_eq!(
            stitch_carriage_return(&matches),
            vec!["tacacs server ISE: key 7 0822455D0A16", "enable secret 9 abc"]
        );
    }

    #[test]
    fn test_alternating_matches_halve_the_output() {
        let matches: Vec<String> = (0..6)
            .map(|i| if i % 2 == 0 { format!("k{i}\r") } else { format!(" v{i}") })
            .collect();
        let output = stitch_carriage_return(&matches);
        assert_eq!(output.len(), matches.len() / 2);
        assert_eq!(output, vec!["k0: v1", "k2: v3", "k4: v5"]);
    }

    #[test]
    fn test_consumed_continuation_is_not_revisited() {
        // The second match ends in \r but is consumed as a value.
        let matches = ["a\r", "b\r", "c"];
        assert_eq!(stitch_carriage_return(&matches), vec!["a: b", "c"]);
    }

    #[test]
    fn test_dangling_key_is_emitted() {
        let matches = ["username admin password 7 abc", "radius server dnac\r"];
        assert_eq!(
            stitch_carriage_return(&matches),
            vec!["username admin password 7 abc", "radius server dnac"]
        );
    }

    #[test]
    fn test_none_trims() {
        let matches = ["  username admin secret 5 x\n"];
        assert_eq!(Stitching::None.apply(&matches), vec!["username admin secret 5 x"]);
    }

    #[test]
    fn test_keyed_joins_credential() {
        let matches = ["username admin", " secret 10 $6$abc"];
        assert_eq!(stitch_keyed(&matches, &xr_keyed()), vec!["username admin: secret 10 $6$abc"]);
    }

    #[test]
    fn test_keyed_annotates_missing_credential() {
        let matches = ["username admin", "username oper", " secret 10 $6$xyz"];
        assert_eq!(
            stitch_keyed(&matches, &xr_keyed()),
            vec!["username admin: key or secret not found", "username oper: secret 10 $6$xyz"]
        );
    }

    #[test]
    fn test_keyed_last_match_has_no_lookahead() {
        let matches = ["snmp-server user ops grp v3\n", "key chain ISIS\n"];
        assert_eq!(
            stitch_keyed(&matches, &xr_keyed()),
            vec!["snmp-server user ops grp v3", "key chain ISIS: key or secret not found"]
        );
    }

    #[test]
    fn test_keyed_key_string() {
        let matches = ["key chain ISIS\n", "key-string password 7 1511021F07"];
        assert_eq!(
            Stitching::Keyed(xr_keyed()).apply(&matches),
            vec!["key chain ISIS: key-string password 7 1511021F07"]
        );
    }
}
