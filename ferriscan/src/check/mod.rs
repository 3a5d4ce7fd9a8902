//! Compliance checks.
//!
//! Each check walks the collected device logs, picks the rule registered
//! for the device's family, locates the command output and emits one
//! finding per device or per interface.

mod cve;
mod dhcp;
mod macro_intf;
mod password;
mod search;
mod switchport;

pub use cve::{CveCheck, CveFinding};
pub use dhcp::{DhcpCheck, DhcpFinding, DhcpStatus};
pub use macro_intf::{InterfaceMacro, MacroCheck, MacroFinding};
pub use password::{PasswordCheck, PasswordFinding};
pub use search::{SearchCheck, SearchFinding, SearchRule, SearchStatus};
pub use switchport::{AccessStatus, SwitchportCheck, SwitchportFinding};

use log::{debug, warn};

use crate::finding::Finding;
use crate::inventory::{DeviceRecord, Inventory, LogRecord};
use crate::platform::{CheckKind, Family, Rule, RuleRegistry};
use crate::section::SectionQuery;

/// Outcome of [`CheckContext::rule_for`].
#[derive(Debug, Clone, Copy)]
pub enum RuleLookup<'a> {
    /// The log's device and the rule registered for its family.
    Found(&'a DeviceRecord, &'a Rule),

    /// No device record carries the log's serial number.
    DeviceNotFound,

    /// The device family has no rule for the check; such logs are skipped.
    Unsupported,
}

/// Inputs shared by every check run.
#[derive(Clone, Copy)]
pub struct CheckContext<'a> {
    /// Normalized device logs.
    pub logs: &'a [LogRecord],

    /// Devices the logs were collected for.
    pub devices: &'a [DeviceRecord],

    /// Inventory used for interface lookups.
    pub inventory: &'a dyn Inventory,

    /// Text following the hostname on a prompt line.
    pub prompt_delimiter: &'a str,

    /// Keep the matched text in findings.
    pub verbose: bool,

    /// Rule tables.
    pub rules: &'a RuleRegistry,
}

impl<'a> CheckContext<'a> {
    /// Create a context using the built-in rules.
    pub fn new(
        logs: &'a [LogRecord],
        devices: &'a [DeviceRecord],
        inventory: &'a dyn Inventory,
        prompt_delimiter: &'a str,
    ) -> Self {
        Self {
            logs,
            devices,
            inventory,
            prompt_delimiter,
            verbose: false,
            rules: RuleRegistry::global(),
        }
    }

    /// Keep matched text in findings.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Use another rule registry.
    pub fn with_rules(mut self, rules: &'a RuleRegistry) -> Self {
        self.rules = rules;
        self
    }

    /// Find the device a log was collected for.
    pub fn device(&self, log: &LogRecord) -> Option<&'a DeviceRecord> {
        let device = self
            .devices
            .iter()
            .find(|device| device.serial_number == log.serial_number);
        if device.is_none() {
            warn!("{}: no device record for serial '{}'", log.hostname, log.serial_number);
        }
        device
    }

    /// Find the device and the rule of `check` that apply to a log.
    pub fn rule_for(&self, check: CheckKind, log: &LogRecord) -> RuleLookup<'a> {
        let Some(device) = self.device(log) else {
            return RuleLookup::DeviceNotFound;
        };
        match self.rules.get(check, &device.family) {
            Some(rule) => RuleLookup::Found(device, rule),
            None => {
                debug!("{}: no {} rule for family '{}'", log.hostname, check, device.family);
                RuleLookup::Unsupported
            }
        }
    }

    /// Locate the output of a rule's command in a log.
    pub fn command_output<'t>(&self, rule: &Rule, log: &'t LogRecord) -> Option<&'t str> {
        let query = rule.section_query(&log.hostname, self.prompt_delimiter);
        self.locate(log, &rule.command, query)
    }

    /// Locate the output of an arbitrary command in a log.
    pub fn find_command<'t>(&self, log: &'t LogRecord, command: &str) -> Option<&'t str> {
        let query = SectionQuery::new(&log.hostname, self.prompt_delimiter, command);
        self.locate(log, command, query)
    }

    fn locate<'t>(
        &self,
        log: &'t LogRecord,
        command: &str,
        query: Result<SectionQuery, regex::Error>,
    ) -> Option<&'t str> {
        if self.prompt_delimiter.is_empty() {
            return None;
        }

        let query = match query {
            Ok(query) => query,
            Err(e) => {
                warn!("{}: cannot build prompt pattern: {}", log.hostname, e);
                return None;
            }
        };

        let output = query.find(&log.text);
        if output.is_none() {
            debug!("{}: '{}' not found in log", log.hostname, command);
        }
        output
    }

    /// Copy of matched text, when verbose.
    pub fn matched_section(&self, text: &str) -> Option<String> {
        self.verbose.then(|| text.to_string())
    }
}

/// A compliance check over collected device logs.
pub trait Check {
    /// Finding emitted by the check.
    type Finding: Finding;

    /// Short name of the check, for logging.
    fn name(&self) -> &'static str;

    /// Rule table the check reads, if it is bound to device families.
    fn kind(&self) -> Option<CheckKind> {
        None
    }

    /// Whether devices of `family` are inspected by this check.
    fn supports(&self, rules: &RuleRegistry, family: &Family) -> bool {
        match self.kind() {
            Some(kind) => rules.supports(kind, family),
            None => true,
        }
    }

    /// Run the check over every log of the context.
    fn run(&self, ctx: &CheckContext<'_>) -> Vec<Self::Finding>;
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::inventory::{DeviceRecord, LogRecord, StaticInventory};

    pub const IOSXE_LOG: &str = "\
core-r1# show ip interface
GigabitEthernet0/0 is up, line protocol is up
  Internet address is 10.1.1.5/24
  Address determined by DHCP
GigabitEthernet0/1 is up, line protocol is up
  Internet address is 10.2.2.1/24
  Address determined by setup command
core-r1# show interface switchport
Name: Gi1/0/1
Switchport: Enabled
Administrative Mode: trunk
Name: Gi1/0/14
Switchport: Enabled
Administrative Mode: static access
core-r1# show running-config
Building configuration...
enable secret 9 $9$4Ab
username admin privilege 15 password 7 0822455D0A16
!
interface GigabitEthernet1/0/3
 switchport mode access
 macro description CISCO_PHONE_EVENT
!
interface GigabitEthernet1/0/4
 switchport mode access
!
core-r1# exit
";

    pub const JUNOS_LOG: &str = "\
edge-r2> show configuration
system { root-authentication { encrypted-password \"$6$x\"; } }
edge-r2> exit
";

    /// A log whose serial number matches no device record.
    pub fn orphan_log() -> LogRecord {
        LogRecord::new(
            "R1",
            "SN-unknown",
            "R1# show running-config\nusername admin privilege 15 password 7 0822455D0A16\nR1# exit\n",
        )
    }

    pub fn inventory() -> StaticInventory {
        StaticInventory::new()
            .with_device_log(DeviceRecord::new("SN1", "ios-xe", "17.3.4", "core-r1"), IOSXE_LOG)
            .with_device_log(DeviceRecord::new("SN2", "junos", "21.4R1", "edge-r2"), JUNOS_LOG)
            .with_ip_interface("SN1", "GigabitEthernet0/0")
            .with_ip_interface("SN1", "GigabitEthernet0/1")
            .with_ip_interface("SN1", "GigabitEthernet0/9")
            .with_switchport_interface("core-r1", "Gi1/0/1")
            .with_switchport_interface("core-r1", "Gi1/0/14")
            .with_switchport_interface("core-r1", "Gi1/0/20")
    }
}
