//! Generic search driven by caller-supplied rules.
//!
//! Rules are not tied to a device family and apply to every log:
//!
//! ```json
//! [
//!   {"command": "show running-config", "match": "ip ssh version 2"},
//!   {"command": "show ip interface", "match": "Address determined by DHCP", "section": "Vlan10"}
//! ]
//! ```

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::{Check, CheckContext};
use crate::error::{ConfigError, Result, RuleError};
use crate::finding::{Finding, status_enum};
use crate::inventory::LogRecord;
use crate::section::extract_named_block;

status_enum! {
    /// Which stage of a generic search succeeded.
    pub enum SearchStatus {
        Yes => "YES",
        No => "NO",
        SectionNotFound => "SECTION NOT FOUND",
        CommandNotFound => "COMMAND NOT FOUND",
        CommandNotSpecified => "COMMAND NOT SPECIFIED",
        YesNoSection => "YES - NO SECTION",
        NoNoSection => "NO - NO SECTION",
    }
}

impl SearchStatus {
    fn from_match(found: bool, with_section: bool) -> Self {
        match (found, with_section) {
            (true, true) => Self::Yes,
            (false, true) => Self::No,
            (true, false) => Self::YesNoSection,
            (false, false) => Self::NoNoSection,
        }
    }
}

#[derive(Deserialize)]
struct RawSearchRule {
    command: Option<String>,
    #[serde(rename = "match")]
    pattern: String,
    section: Option<String>,
}

/// A search descriptor: where to look and what to look for.
#[derive(Debug, Clone)]
pub struct SearchRule {
    /// Command whose output is searched.
    pub command: Option<String>,

    /// Pattern searched for.
    pub pattern: Regex,

    /// Optional block of the command output to narrow the search to.
    pub section: Option<String>,
}

impl SearchRule {
    /// Create a rule searching the output of `command` for `pattern`.
    pub fn new(command: impl Into<String>, pattern: &str) -> Result<Self> {
        Self::build(Some(command.into()), pattern, None)
    }

    /// Narrow the search to the block introduced by `section`.
    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }

    fn build(command: Option<String>, pattern: &str, section: Option<String>) -> Result<Self> {
        if let Some(command) = &command {
            Regex::new(command).map_err(RuleError::from)?;
        }

        Ok(Self {
            command,
            pattern: Regex::new(pattern).map_err(RuleError::from)?,
            section,
        })
    }

    /// Parse a JSON list of `{command, match, section}` descriptors.
    pub fn from_json_list(raw: &str) -> Result<Vec<Self>> {
        let rules: Vec<RawSearchRule> =
            serde_json::from_str(raw).map_err(|source| ConfigError::InvalidJson {
                name: "INPUT_DATA".to_string(),
                source,
            })?;

        rules
            .into_iter()
            .map(|rule| Self::build(rule.command, &rule.pattern, rule.section))
            .collect()
    }
}

/// Result of one search rule against one device log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchFinding {
    pub hostname: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,

    #[serde(rename = "match")]
    pub pattern: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,

    pub found: SearchStatus,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_section: Option<String>,
}

impl Finding for SearchFinding {
    fn hostname(&self) -> &str {
        &self.hostname
    }

    fn status(&self) -> &'static str {
        self.found.as_str()
    }

    fn is_positive(&self) -> bool {
        matches!(self.found, SearchStatus::Yes | SearchStatus::YesNoSection)
    }
}

/// Applies every search rule to every log.
#[derive(Debug, Clone, Default)]
pub struct SearchCheck {
    rules: Vec<SearchRule>,
}

impl SearchCheck {
    /// Create a search over the given rules.
    pub fn new(rules: Vec<SearchRule>) -> Self {
        Self { rules }
    }

    fn evaluate(
        &self,
        ctx: &CheckContext<'_>,
        log: &LogRecord,
        rule: &SearchRule,
    ) -> (SearchStatus, Option<String>) {
        let Some(command) = &rule.command else {
            return (SearchStatus::CommandNotSpecified, None);
        };

        let Some(output) = ctx.find_command(log, command) else {
            return (SearchStatus::CommandNotFound, None);
        };

        let scope = match &rule.section {
            Some(section) => match extract_named_block(output, section) {
                Some(block) => block,
                None => return (SearchStatus::SectionNotFound, None),
            },
            None => output,
        };

        let found = rule.pattern.is_match(scope);
        (
            SearchStatus::from_match(found, rule.section.is_some()),
            ctx.matched_section(scope),
        )
    }
}

impl Check for SearchCheck {
    type Finding = SearchFinding;

    fn name(&self) -> &'static str {
        "search"
    }

    fn run(&self, ctx: &CheckContext<'_>) -> Vec<SearchFinding> {
        let mut findings = Vec::with_capacity(ctx.logs.len() * self.rules.len());

        for log in ctx.logs {
            for rule in &self.rules {
                let (found, matched_section) = self.evaluate(ctx, log, rule);
                findings.push(SearchFinding {
                    hostname: log.hostname.clone(),
                    command: rule.command.clone(),
                    pattern: rule.pattern.as_str().to_string(),
                    section: rule.section.clone(),
                    found,
                    matched_section,
                });
            }
        }

        findings
    }
}
