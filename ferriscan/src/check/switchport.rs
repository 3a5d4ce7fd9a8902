//! Switchport access mode check.

use log::debug;
use serde::Serialize;

use super::{Check, CheckContext, RuleLookup};
use crate::finding::{Finding, status_enum};
use crate::platform::CheckKind;

status_enum! {
    /// Whether a switchport is administratively in access mode.
    pub enum AccessStatus {
        Yes => "YES",
        No => "NO",
        NotInOutput => "NOT IN SWITCHPORT OUTPUT",
        CommandNotFound => "COMMAND NOT FOUND",
        DeviceNotFound => "DEVICE NOT FOUND",
    }
}

/// Access mode of one switchport interface, or of a device without a
/// device record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SwitchportFinding {
    pub hostname: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub interface: Option<String>,

    pub access: AccessStatus,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_section: Option<String>,
}

impl Finding for SwitchportFinding {
    fn hostname(&self) -> &str {
        &self.hostname
    }

    fn interface(&self) -> Option<&str> {
        self.interface.as_deref()
    }

    fn status(&self) -> &'static str {
        self.access.as_str()
    }

    fn is_positive(&self) -> bool {
        self.access == AccessStatus::Yes
    }
}

/// Reports, for every switchport interface, whether its record in
/// `show interface switchport` shows an access administrative mode.
#[derive(Debug, Clone, Copy, Default)]
pub struct SwitchportCheck;

impl Check for SwitchportCheck {
    type Finding = SwitchportFinding;

    fn name(&self) -> &'static str {
        "switchport"
    }

    fn kind(&self) -> Option<CheckKind> {
        Some(CheckKind::Switchport)
    }

    fn run(&self, ctx: &CheckContext<'_>) -> Vec<SwitchportFinding> {
        let mut findings = Vec::new();

        for log in ctx.logs {
            let rule = match ctx.rule_for(CheckKind::Switchport, log) {
                RuleLookup::Found(_, rule) => rule,
                RuleLookup::DeviceNotFound => {
                    findings.push(SwitchportFinding {
                        hostname: log.hostname.clone(),
                        interface: None,
                        access: AccessStatus::DeviceNotFound,
                        matched_section: None,
                    });
                    continue;
                }
                RuleLookup::Unsupported => continue,
            };

            let output = ctx.command_output(rule, log);
            let interfaces = ctx.inventory.switchport_interfaces(&log.hostname);
            debug!("{}: {} switchport interfaces", log.hostname, interfaces.len());

            for interface in interfaces {
                let (access, matched_section) = match output {
                    None => (AccessStatus::CommandNotFound, None),
                    Some(output) => match rule.extract_section(output, &interface) {
                        Some(block) if rule.is_match(block) => (AccessStatus::Yes, ctx.matched_section(block)),
                        Some(block) => (AccessStatus::No, ctx.matched_section(block)),
                        None => (AccessStatus::NotInOutput, None),
                    },
                };

                findings.push(SwitchportFinding {
                    hostname: log.hostname.clone(),
                    interface: Some(interface),
                    access,
                    matched_section,
                });
            }
        }

        findings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::fixtures;
    use crate::inventory::{DeviceRecord, Inventory, StaticInventory, collect_logs};
    use serde_json::json;

    #[test]
    fn test_switchport_scenario() {
        let log = "sw1# show interface switchport\n\
                   Name: Gi1/0/14\n\
                   Switchport: Enabled\n\
                   Administrative Mode: static access\n\
                   Name: Gi1/0/15\n\
                   sw1# exit\n";
        let inventory = StaticInventory::new()
            .with_device_log(DeviceRecord::new("SN1", "ios-xe", "17.3", "sw1"), log)
            .with_switchport_interface("sw1", "Gi1/0/14");
        let devices = inventory.devices(&json!({}));
        let logs = collect_logs(&inventory, &devices, |_| true);
        let ctx = CheckContext::new(&logs, &devices, &inventory, "# ");

        let findings = SwitchportCheck.run(&ctx);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].interface.as_deref(), Some("Gi1/0/14"));
        assert_eq!(findings[0].access, AccessStatus::Yes);
        assert_eq!(
            serde_json::to_value(&findings[0]).unwrap(),
            json!({"hostname": "sw1", "interface": "Gi1/0/14", "access": "YES"})
        );
    }

    #[test]
    fn test_switchport_statuses() {
        let inventory = fixtures::inventory();
        let devices = inventory.devices(&json!({}));
        let logs = collect_logs(&inventory, &devices, |_| true);
        let ctx = CheckContext::new(&logs, &devices, &inventory, "# ");

        let access: Vec<_> = SwitchportCheck.run(&ctx).into_iter().map(|f| f.access).collect();
        assert_eq!(
            access,
            vec![AccessStatus::No, AccessStatus::Yes, AccessStatus::NotInOutput]
        );
    }

    #[test]
    fn test_switchport_block_stops_at_next_record() {
        let inventory = fixtures::inventory();
        let devices = inventory.devices(&json!({}));
        let logs = collect_logs(&inventory, &devices, |_| true);
        let ctx = CheckContext::new(&logs, &devices, &inventory, "# ").with_verbose(true);

        let findings = SwitchportCheck.run(&ctx);
        let block = findings[0].matched_section.as_deref().unwrap();
        assert_eq!(block, "Name: Gi1/0/1\nSwitchport: Enabled\nAdministrative Mode: trunk\n");
    }

    #[test]
    fn test_switchport_command_not_found_per_interface() {
        let inventory = StaticInventory::new()
            .with_device_log(DeviceRecord::new("SN1", "ios", "15.2", "sw2"), "sw2# show version\n")
            .with_switchport_interface("sw2", "Fa0/1")
            .with_switchport_interface("sw2", "Fa0/2");
        let devices = inventory.devices(&json!({}));
        let logs = collect_logs(&inventory, &devices, |_| true);
        let ctx = CheckContext::new(&logs, &devices, &inventory, "# ");

        let findings = SwitchportCheck.run(&ctx);
        assert_eq!(findings.len(), 2);
        assert!(findings.iter().all(|f| f.access == AccessStatus::CommandNotFound));
    }

    #[test]
    fn test_switchport_is_idempotent() {
        let inventory = fixtures::inventory();
        let devices = inventory.devices(&json!({}));
        let logs = collect_logs(&inventory, &devices, |_| true);
        let ctx = CheckContext::new(&logs, &devices, &inventory, "# ").with_verbose(true);

        assert_eq!(SwitchportCheck.run(&ctx), SwitchportCheck.run(&ctx));
    }

    #[test]
    fn test_switchport_device_not_found() {
        let inventory = fixtures::inventory();
        let logs = [fixtures::orphan_log()];
        let ctx = CheckContext::new(&logs, &[], &inventory, "# ");

        let findings = SwitchportCheck.run(&ctx);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].access, AccessStatus::DeviceNotFound);
        assert_eq!(findings[0].interface(), None);
        assert_eq!(
            serde_json::to_value(&findings[0]).unwrap(),
            json!({"hostname": "R1", "access": "DEVICE NOT FOUND"})
        );
    }
}
