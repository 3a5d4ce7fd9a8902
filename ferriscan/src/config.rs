//! Scan configuration.
//!
//! A [`ScanConfig`] is built with [`ScanBuilder`] or read from the
//! environment:
//!
//! | Variable | Meaning | Default |
//! |---|---|---|
//! | `PROMPT_DELIMITER` | text following the hostname on prompt lines | required |
//! | `DEVICES_FILTER` | inventory filter, JSON object | `{}` |
//! | `VERBOSE` | keep matched text in findings | `false` |
//! | `INPUT_DATA` | generic search rules, JSON list | unset |

use log::debug;
use regex::Regex;
use serde_json::Value;

use crate::check::SearchRule;
use crate::error::{ConfigError, Result, RuleError};
use crate::inventory::DeviceFilter;

/// Validated scan settings.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Text following the hostname on a prompt line, e.g. `"# "`.
    pub prompt_delimiter: String,

    /// Keep matched text in findings.
    pub verbose: bool,

    /// Inventory filter selecting the devices to scan.
    pub device_filter: DeviceFilter,

    search_rules: Option<Vec<SearchRule>>,
}

impl ScanConfig {
    /// Create a builder for the given prompt delimiter.
    pub fn builder(prompt_delimiter: impl Into<String>) -> ScanBuilder {
        ScanBuilder::new(prompt_delimiter)
    }

    /// Load the configuration from process environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load the configuration through a variable lookup function.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let prompt_delimiter = lookup("PROMPT_DELIMITER").ok_or(ConfigError::MissingPromptDelimiter)?;

        let mut builder = ScanBuilder::new(prompt_delimiter)
            .verbose(lookup("VERBOSE").is_some_and(|v| is_truthy(&v)));

        if let Some(raw) = lookup("DEVICES_FILTER") {
            builder = builder.device_filter(parse_json("DEVICES_FILTER", &raw)?);
        }

        if let Some(raw) = lookup("INPUT_DATA") {
            builder = builder.search_rules(SearchRule::from_json_list(&raw)?);
        }

        builder.build()
    }

    /// Generic search rules, required for a generic search.
    pub fn search_rules(&self) -> Result<&[SearchRule]> {
        self.search_rules.as_deref().ok_or_else(|| {
            ConfigError::MissingVariable {
                name: "INPUT_DATA".to_string(),
            }
            .into()
        })
    }
}

/// Builder for [`ScanConfig`].
///
/// # Example
///
/// ```rust
/// use ferriscan::config::ScanBuilder;
///
/// # fn example() -> Result<(), ferriscan::Error> {
/// let config = ScanBuilder::new("# ")
///     .verbose(true)
///     .device_filter(serde_json::json!({"family": ["eq", "ios-xe"]}))
///     .build()?;
/// assert!(config.verbose);
/// # Ok(())
/// # }
/// ```
pub struct ScanBuilder {
    prompt_delimiter: String,
    verbose: bool,
    device_filter: DeviceFilter,
    search_rules: Option<Vec<SearchRule>>,
}

impl ScanBuilder {
    /// Create a new builder for the given prompt delimiter.
    pub fn new(prompt_delimiter: impl Into<String>) -> Self {
        Self {
            prompt_delimiter: prompt_delimiter.into(),
            verbose: false,
            device_filter: Value::Object(Default::default()),
            search_rules: None,
        }
    }

    /// Keep matched text in findings (default: false).
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Set the inventory filter (default: `{}`, every device).
    pub fn device_filter(mut self, filter: DeviceFilter) -> Self {
        self.device_filter = filter;
        self
    }

    /// Set the generic search rules.
    pub fn search_rules(mut self, rules: Vec<SearchRule>) -> Self {
        self.search_rules = Some(rules);
        self
    }

    /// Validate and build the configuration.
    ///
    /// The prompt delimiter is interpolated into prompt patterns as regex
    /// text, so it must be non-empty and compile.
    pub fn build(self) -> Result<ScanConfig> {
        if self.prompt_delimiter.is_empty() {
            return Err(ConfigError::MissingPromptDelimiter.into());
        }
        Regex::new(&self.prompt_delimiter).map_err(RuleError::from)?;

        debug!(
            "Scan config: delimiter {:?}, verbose {}, filter {}",
            self.prompt_delimiter, self.verbose, self.device_filter
        );

        Ok(ScanConfig {
            prompt_delimiter: self.prompt_delimiter,
            verbose: self.verbose,
            device_filter: self.device_filter,
            search_rules: self.search_rules,
        })
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

fn parse_json(name: &str, raw: &str) -> Result<Value> {
    serde_json::from_str(raw).map_err(|source| {
        ConfigError::InvalidJson {
            name: name.to_string(),
            source,
        }
        .into()
    })
}
