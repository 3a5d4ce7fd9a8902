//! Command section extraction.
//!
//! A command section starts at the prompt line that invoked the command and
//! runs up to, but not including, the next prompt line of the same host.
//!
//! ```text
//! R1# show ip interface        <- anchor line (section start)
//! Gig0/1 is up
//!   Address determined by DHCP
//! R1# show version             <- boundary (section end, excluded)
//! ```

use regex::Regex;

/// Strip a path-style qualifier from a hostname.
///
/// Some inventories report hostnames such as `fw01/vsys1`; only the part
/// before the first `/` appears in the device prompt.
pub fn anchor_hostname(hostname: &str) -> &str {
    hostname.split('/').next().unwrap_or(hostname)
}

/// A compiled query locating one command's output inside a captured log.
///
/// The hostname is escaped; the prompt delimiter and command name are
/// interpolated as regex text. Matching is multi-line and case-insensitive.
#[derive(Debug, Clone)]
pub struct SectionQuery {
    /// Matches the prompt line invoking the command.
    anchor: Regex,

    /// Matches the start of any later prompt line for the same host.
    boundary: Regex,
}

impl SectionQuery {
    /// Build a query for prompt lines that start with the hostname.
    pub fn new(hostname: &str, prompt_delimiter: &str, command: &str) -> Result<Self, regex::Error> {
        Self::build(hostname, prompt_delimiter, command, "")
    }

    /// Build a query that also accepts text before the hostname on the
    /// prompt line, e.g. the `admin@` in `admin@fw01> `.
    pub fn with_prompt_prefix(
        hostname: &str,
        prompt_delimiter: &str,
        command: &str,
    ) -> Result<Self, regex::Error> {
        Self::build(hostname, prompt_delimiter, command, r"[^\n]*?")
    }

    fn build(
        hostname: &str,
        prompt_delimiter: &str,
        command: &str,
        prefix: &str,
    ) -> Result<Self, regex::Error> {
        let host = regex::escape(anchor_hostname(hostname));
        let prompt = format!(r"(?mi)^{prefix}{host}{prompt_delimiter}");

        Ok(Self {
            anchor: Regex::new(&format!("{prompt}.*?{command}"))?,
            boundary: Regex::new(&prompt)?,
        })
    }

    /// Return the section of `text` belonging to the command, if invoked.
    pub fn find<'t>(&self, text: &'t str) -> Option<&'t str> {
        let anchor = self.anchor.find(text)?;

        // The boundary search starts on the line after the anchor so the
        // anchor's own prompt is never taken as the end of the section.
        let body_start = match text[anchor.end()..].find('\n') {
            Some(offset) => anchor.end() + offset + 1,
            None => return Some(&text[anchor.start()..]),
        };

        let end = self
            .boundary
            .find(&text[body_start..])
            .map_or(text.len(), |m| body_start + m.start());

        Some(&text[anchor.start()..end])
    }
}

/// Extract the output of `command` from a captured log.
///
/// Returns `None` when the command was never invoked for this host, or when
/// the prompt delimiter is empty.
pub fn extract_command_section<'t>(
    text: &'t str,
    hostname: &str,
    prompt_delimiter: &str,
    command: &str,
) -> Option<&'t str> {
    if prompt_delimiter.is_empty() {
        return None;
    }

    SectionQuery::new(hostname, prompt_delimiter, command)
        .ok()?
        .find(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOG: &str = "R1# show ip interface\n\
                       Gig0/1 is up\n  Address determined by DHCP\n\
                       R1# show version\n\
                       Cisco IOS XE Software\n";

    #[test]
    fn test_section_stops_before_next_prompt() {
        let section = extract_command_section(LOG, "R1", "# ", "show ip interface").unwrap();
        assert_eq!(
            section,
            "R1# show ip interface\nGig0/1 is up\n  Address determined by DHCP\n"
        );
        assert!(!section.contains("R1# show version"));
    }

    #[test]
    fn test_last_section_runs_to_end_of_text() {
        let section = extract_command_section(LOG, "R1", "# ", "show version").unwrap();
        assert_eq!(section, "R1# show version\nCisco IOS XE Software\n");
    }

    #[test]
    fn test_missing_command_is_none() {
        assert!(extract_command_section(LOG, "R1", "# ", "show running-config").is_none());
    }

    #[test]
    fn test_other_host_prompt_is_not_an_anchor() {
        assert!(extract_command_section(LOG, "R2", "# ", "show version").is_none());
    }

    #[test]
    fn test_anchor_without_trailing_newline() {
        let text = "R1# show ip interface\nGig0/1 is up\nR1# show version";
        let section = extract_command_section(text, "R1", "# ", "show version").unwrap();
        assert_eq!(section, "R1# show version");
    }

    #[test]
    fn test_extra_characters_between_prompt_and_command() {
        let text = "R1#  terminal length 0 ; show clock\n12:00:00 UTC\nR1# exit\n";
        let section = extract_command_section(text, "R1", "#", "show clock").unwrap();
        assert_eq!(section, "R1#  terminal length 0 ; show clock\n12:00:00 UTC\n");
    }

    #[test]
    fn test_case_insensitive_anchor() {
        let text = "r1# SHOW VERSION\nversion 17.3\n";
        assert!(extract_command_section(text, "R1", "# ", "show version").is_some());
    }

    #[test]
    fn test_hostname_with_path_qualifier() {
        assert_eq!(anchor_hostname("fw01/vsys1"), "fw01");
        assert_eq!(anchor_hostname("fw01"), "fw01");

        let text = "fw01> show clock\nThu Apr 11\nfw01> exit\n";
        let section = extract_command_section(text, "fw01/vsys1", "> ", "show clock").unwrap();
        assert_eq!(section, "fw01> show clock\nThu Apr 11\n");
    }

    #[test]
    fn test_hostname_is_matched_literally() {
        // '.' in the hostname must not match an arbitrary character.
        let text = "r1xlab# show version\nfake\nr1.lab# show version\nreal\n";
        let section = extract_command_section(text, "r1.lab", "# ", "show version").unwrap();
        assert_eq!(section, "r1.lab# show version\nreal\n");
    }

    #[test]
    fn test_prompt_prefix() {
        let text = "admin@fw01> show config merged\nglobal-protect enable;\nadmin@fw01> exit\n";
        assert!(extract_command_section(text, "fw01", "> ", "show config merged").is_none());

        let query = SectionQuery::with_prompt_prefix("fw01", "> ", "show config merged").unwrap();
        assert_eq!(
            query.find(text).unwrap(),
            "admin@fw01> show config merged\nglobal-protect enable;\n"
        );
    }

    #[test]
    fn test_empty_delimiter_is_none() {
        assert!(extract_command_section(LOG, "R1", "", "show version").is_none());
    }

    #[test]
    fn test_crlf_log() {
        let text = "R1# show version\r\nversion 17.3\r\nR1# show clock\r\n";
        let section = extract_command_section(text, "R1", "# ", "show version").unwrap();
        assert_eq!(section, "R1# show version\r\nversion 17.3\r\n");
    }
}
