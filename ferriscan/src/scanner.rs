//! Scan entry point tying inventory, configuration and checks together.

use log::info;

use crate::check::{Check, CheckContext, SearchCheck, SearchFinding};
use crate::config::ScanConfig;
use crate::error::Result;
use crate::finding::FindingSink;
use crate::inventory::{Inventory, collect_logs};
use crate::platform::RuleRegistry;

/// Runs checks against the devices selected by a configuration.
///
/// Each run fetches the filtered device list, downloads logs only for the
/// families the check supports, and evaluates the check over them.
///
/// # Example
///
/// ```rust,no_run
/// use ferriscan::{DhcpCheck, ScanConfig, Scanner, StaticInventory};
///
/// # fn example(inventory: StaticInventory) -> Result<(), ferriscan::Error> {
/// let config = ScanConfig::builder("# ").build()?;
/// let scanner = Scanner::new(&inventory, config);
///
/// for finding in scanner.run(&DhcpCheck) {
///     println!("{} {:?} {}", finding.hostname, finding.interface, finding.found);
/// }
/// # Ok(())
/// # }
/// ```
pub struct Scanner<'a> {
    inventory: &'a dyn Inventory,
    config: ScanConfig,
    rules: &'a RuleRegistry,
}

impl<'a> Scanner<'a> {
    /// Create a scanner using the built-in rules.
    pub fn new(inventory: &'a dyn Inventory, config: ScanConfig) -> Self {
        Self {
            inventory,
            config,
            rules: RuleRegistry::global(),
        }
    }

    /// Use another rule registry.
    pub fn with_rules(mut self, rules: &'a RuleRegistry) -> Self {
        self.rules = rules;
        self
    }

    /// Run a check and return its findings in input order.
    pub fn run<C: Check>(&self, check: &C) -> Vec<C::Finding> {
        let devices = self.inventory.devices(&self.config.device_filter);
        info!("{}: downloading logs for {} devices", check.name(), devices.len());

        let logs = collect_logs(self.inventory, &devices, |family| check.supports(self.rules, family));
        info!("{}: searching through {} log files", check.name(), logs.len());

        let ctx = CheckContext::new(&logs, &devices, self.inventory, &self.config.prompt_delimiter)
            .with_verbose(self.config.verbose)
            .with_rules(self.rules);

        check.run(&ctx)
    }

    /// Run a check and hand its findings to a sink.
    ///
    /// Returns the number of findings delivered.
    pub fn run_into<C, S>(&self, check: &C, sink: &mut S) -> usize
    where
        C: Check,
        S: FindingSink<C::Finding>,
    {
        let findings = self.run(check);
        let count = findings.len();
        sink.accept_all(findings);
        count
    }

    /// Run the generic search configured through `INPUT_DATA`.
    pub fn search(&self) -> Result<Vec<SearchFinding>> {
        let check = SearchCheck::new(self.config.search_rules()?.to_vec());
        Ok(self.run(&check))
    }
}
