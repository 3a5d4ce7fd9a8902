//! Rule definition: which command output to read and what to match in it.

use regex::Regex;

use crate::matcher::{self, Stitching};
use crate::section::{self, LabelMatch, SectionQuery};

/// Placeholder replaced by the interface name in section label templates.
pub const INTERFACE_PLACEHOLDER: &str = "{interface}";

/// Where a named block inside a command section ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Boundary {
    /// At the first non-indented line.
    Indented,

    /// At the next line starting with this label.
    NextAnchor(String),
}

/// Template for the anchor of a named block, e.g. `"Name: {interface}"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionLabel {
    /// Anchor template.
    pub template: String,

    /// How the block is terminated.
    pub boundary: Boundary,
}

impl SectionLabel {
    /// A block made of the anchor line and its indented continuation lines.
    pub fn indented(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            boundary: Boundary::Indented,
        }
    }

    /// A block running from the anchor line to the next `next` line.
    pub fn until_next(template: impl Into<String>, next: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            boundary: Boundary::NextAnchor(next.into()),
        }
    }

    /// Render the anchor label for an interface.
    pub fn anchor(&self, interface: &str) -> String {
        self.template.replace(INTERFACE_PLACEHOLDER, interface)
    }

    /// Extract the block for `interface` from a command section.
    ///
    /// The interface name must end the label, so `Gi0/1` never selects
    /// the block of `Gi0/10`.
    pub fn extract<'t>(&self, section: &'t str, interface: &str) -> Option<&'t str> {
        let anchor = self.anchor(interface);
        match &self.boundary {
            Boundary::Indented => section::extract_block(section, &anchor, LabelMatch::Token),
            Boundary::NextAnchor(next) => {
                section::extract_until_next(section, &anchor, next, LabelMatch::Token)
            }
        }
    }
}

/// A compliance rule for one device family.
///
/// The command name is interpolated into the section query as regex text,
/// so it is validated when the rule is created.
#[derive(Debug, Clone)]
pub struct Rule {
    /// Command whose output is inspected (e.g. "show running-config").
    pub command: String,

    /// Pattern applied to the command output or named block.
    pub pattern: Regex,

    /// Optional named block to narrow the output to.
    pub section: Option<SectionLabel>,

    /// Literal substitutions applied to every raw match before stitching.
    pub replacements: Vec<(String, String)>,

    /// How raw matches are joined into findings.
    pub stitching: Stitching,

    /// Whether prompt lines may carry text before the hostname.
    pub prompt_prefix: bool,
}

impl Rule {
    /// Create a new rule with minimal required fields.
    pub fn new(command: impl Into<String>, pattern: &str) -> Result<Self, regex::Error> {
        let command = command.into();
        Regex::new(&command)?;

        Ok(Self {
            command,
            pattern: Regex::new(pattern)?,
            section: None,
            replacements: vec![],
            stitching: Stitching::None,
            prompt_prefix: false,
        })
    }

    /// Narrow the command output to a named block.
    pub fn with_section(mut self, section: SectionLabel) -> Self {
        self.section = Some(section);
        self
    }

    /// Add a literal substitution applied to raw matches.
    pub fn with_replacement(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.replacements.push((from.into(), to.into()));
        self
    }

    /// Set the stitching strategy.
    pub fn with_stitching(mut self, stitching: Stitching) -> Self {
        self.stitching = stitching;
        self
    }

    /// Accept prompt lines with text before the hostname.
    pub fn with_prompt_prefix(mut self) -> Self {
        self.prompt_prefix = true;
        self
    }

    /// Build the query locating this rule's command for a host.
    pub fn section_query(
        &self,
        hostname: &str,
        prompt_delimiter: &str,
    ) -> Result<SectionQuery, regex::Error> {
        if self.prompt_prefix {
            SectionQuery::with_prompt_prefix(hostname, prompt_delimiter, &self.command)
        } else {
            SectionQuery::new(hostname, prompt_delimiter, &self.command)
        }
    }

    /// Extract the named block for `interface`, if the rule defines one.
    ///
    /// Without a section label the whole command output is returned.
    pub fn extract_section<'t>(&self, output: &'t str, interface: &str) -> Option<&'t str> {
        match &self.section {
            Some(label) => label.extract(output, interface),
            None => Some(output),
        }
    }

    /// Check whether the pattern matches anywhere in `text`.
    pub fn is_match(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }

    fn normalize(&self, raw: &str) -> String {
        self.replacements
            .iter()
            .fold(raw.to_string(), |acc, (from, to)| acc.replace(from.as_str(), to))
    }

    /// Collect, normalize and stitch the matches of this rule in `text`.
    pub fn evaluate(&self, text: &str) -> Vec<String> {
        let raw: Vec<String> = matcher::apply_rule(text, &self.pattern)
            .into_iter()
            .map(|m| self.normalize(m))
            .collect();

        self.stitching.apply(&raw)
    }

    /// Collect the two capture groups of every match in `text`, trimmed.
    pub fn evaluate_pairs(&self, text: &str) -> Vec<(String, String)> {
        matcher::apply_rule_pairs(text, &self.pattern)
            .into_iter()
            .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
            .collect()
    }
}
