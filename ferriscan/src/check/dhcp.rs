//! DHCP-assigned interface check.

use log::debug;
use serde::Serialize;

use super::{Check, CheckContext, RuleLookup};
use crate::finding::{Finding, status_enum};
use crate::inventory::LogRecord;
use crate::platform::CheckKind;

status_enum! {
    /// Whether an interface obtained its address through DHCP.
    pub enum DhcpStatus {
        Dhcp => "DHCP",
        NotDhcp => "NOT DHCP",
        InterfaceNotFound => "INTERFACE NOT FOUND",
        CommandNotFound => "COMMAND NOT FOUND",
        DeviceNotFound => "DEVICE NOT FOUND",
    }
}

/// DHCP state of one interface, or of a device without a device record
/// or command output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DhcpFinding {
    pub hostname: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub interface: Option<String>,

    pub found: DhcpStatus,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_section: Option<String>,
}

impl DhcpFinding {
    fn device_level(log: &LogRecord, found: DhcpStatus) -> Self {
        Self {
            hostname: log.hostname.clone(),
            interface: None,
            found,
            matched_section: None,
        }
    }
}

impl Finding for DhcpFinding {
    fn hostname(&self) -> &str {
        &self.hostname
    }

    fn interface(&self) -> Option<&str> {
        self.interface.as_deref()
    }

    fn status(&self) -> &'static str {
        self.found.as_str()
    }

    fn is_positive(&self) -> bool {
        self.found == DhcpStatus::Dhcp
    }
}

/// Reports, for every IP-addressed interface, whether its address is
/// DHCP-assigned according to `show ip interface`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DhcpCheck;

impl Check for DhcpCheck {
    type Finding = DhcpFinding;

    fn name(&self) -> &'static str {
        "dhcp"
    }

    fn kind(&self) -> Option<CheckKind> {
        Some(CheckKind::Dhcp)
    }

    fn run(&self, ctx: &CheckContext<'_>) -> Vec<DhcpFinding> {
        let mut findings = Vec::new();

        for log in ctx.logs {
            let rule = match ctx.rule_for(CheckKind::Dhcp, log) {
                RuleLookup::Found(_, rule) => rule,
                RuleLookup::DeviceNotFound => {
                    findings.push(DhcpFinding::device_level(log, DhcpStatus::DeviceNotFound));
                    continue;
                }
                RuleLookup::Unsupported => continue,
            };

            let Some(output) = ctx.command_output(rule, log) else {
                findings.push(DhcpFinding::device_level(log, DhcpStatus::CommandNotFound));
                continue;
            };

            for interface in ctx.inventory.ip_interfaces(&log.serial_number) {
                let finding = match rule.extract_section(output, &interface) {
                    Some(block) => DhcpFinding {
                        hostname: log.hostname.clone(),
                        interface: Some(interface),
                        found: if rule.is_match(block) {
                            DhcpStatus::Dhcp
                        } else {
                            DhcpStatus::NotDhcp
                        },
                        matched_section: ctx.matched_section(block),
                    },
                    None => {
                        debug!("{}: interface '{}' not in output", log.hostname, interface);
                        DhcpFinding {
                            hostname: log.hostname.clone(),
                            interface: Some(interface),
                            found: DhcpStatus::InterfaceNotFound,
                            matched_section: None,
                        }
                    }
                };
                findings.push(finding);
            }
        }

        findings
    }
}
