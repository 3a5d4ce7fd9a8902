//! Password and secret encryption check.

use log::trace;
use serde::Serialize;

use super::{Check, CheckContext, RuleLookup};
use crate::finding::{Finding, MatchStatus};
use crate::platform::{CheckKind, Family};

/// Credential lines found in a device's running configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PasswordFinding {
    pub hostname: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub family: Option<Family>,

    pub status: MatchStatus,
    pub entries: Vec<String>,
}

impl Finding for PasswordFinding {
    fn hostname(&self) -> &str {
        &self.hostname
    }

    fn status(&self) -> &'static str {
        self.status.as_str()
    }

    fn is_positive(&self) -> bool {
        self.status == MatchStatus::Found
    }
}

/// Lists the credential lines of `show running-config`, with their
/// encryption type, using the family's pattern and stitching.
#[derive(Debug, Clone, Copy, Default)]
pub struct PasswordCheck;

impl Check for PasswordCheck {
    type Finding = PasswordFinding;

    fn name(&self) -> &'static str {
        "password-encryption"
    }

    fn kind(&self) -> Option<CheckKind> {
        Some(CheckKind::PasswordEncryption)
    }

    fn run(&self, ctx: &CheckContext<'_>) -> Vec<PasswordFinding> {
        ctx.logs
            .iter()
            .filter_map(|log| {
                let (device, rule) = match ctx.rule_for(CheckKind::PasswordEncryption, log) {
                    RuleLookup::Found(device, rule) => (device, rule),
                    RuleLookup::DeviceNotFound => {
                        return Some(PasswordFinding {
                            hostname: log.hostname.clone(),
                            family: None,
                            status: MatchStatus::DeviceNotFound,
                            entries: vec![],
                        });
                    }
                    RuleLookup::Unsupported => return None,
                };

                let (status, entries) = match ctx.command_output(rule, log) {
                    Some(output) => {
                        let entries = rule.evaluate(output);
                        trace!("{}: {} credential entries", log.hostname, entries.len());
                        (MatchStatus::from_matches(&entries), entries)
                    }
                    None => (MatchStatus::CommandNotFound, vec![]),
                };

                Some(PasswordFinding {
                    hostname: log.hostname.clone(),
                    family: Some(device.family.clone()),
                    status,
                    entries,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::fixtures;
    use crate::inventory::{DeviceRecord, Inventory, StaticInventory, collect_logs};
    use serde_json::json;

    #[test]
    fn test_unsupported_family_is_skipped() {
        let inventory = fixtures::inventory();
        let devices = inventory.devices(&json!({}));
        let logs = collect_logs(&inventory, &devices, |_| true);
        let ctx = CheckContext::new(&logs, &devices, &inventory, "# ");

        let findings = PasswordCheck.run(&ctx);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].hostname, "core-r1");
        assert_eq!(findings[0].family, Some(Family::IosXe));
        assert_eq!(findings[0].status, MatchStatus::Found);
        assert_eq!(findings[0].entries, vec!["username admin privilege 15: password 7"]);
    }

    #[test]
    fn test_iosxe_multiline_tacacs_key() {
        let log = "r1# show running-config\r\n\
                   tacacs server ISE\r\n \
                   key 7 0822455D0A16\r\n\
                   r1# exit\r\n";
        let inventory =
            StaticInventory::new().with_device_log(DeviceRecord::new("SN1", "ios-xe", "17.3", "r1"), log);
        let devices = inventory.devices(&json!({}));
        let logs = collect_logs(&inventory, &devices, |_| true);
        let ctx = CheckContext::new(&logs, &devices, &inventory, "# ");

        let findings = PasswordCheck.run(&ctx);
        assert_eq!(findings[0].entries, vec!["tacacs server ISE: key 7"]);
    }

    #[test]
    fn test_no_matches_and_missing_command() {
        let inventory = StaticInventory::new()
            .with_device_log(
                DeviceRecord::new("SN1", "eos", "4.28", "leaf1"),
                "leaf1# show running-config\nhostname leaf1\nleaf1# exit\n",
            )
            .with_device_log(DeviceRecord::new("SN2", "nx-os", "9.3", "n9k"), "n9k# show version\n");
        let devices = inventory.devices(&json!({}));
        let logs = collect_logs(&inventory, &devices, |_| true);
        let ctx = CheckContext::new(&logs, &devices, &inventory, "# ");

        let findings = PasswordCheck.run(&ctx);
        assert_eq!(findings[0].status, MatchStatus::NoMatchesFound);
        assert_eq!(findings[1].status, MatchStatus::CommandNotFound);
        assert!(findings[1].entries.is_empty());
    }

    #[test]
    fn test_password_is_idempotent() {
        let inventory = fixtures::inventory();
        let devices = inventory.devices(&json!({}));
        let logs = collect_logs(&inventory, &devices, |_| true);
        let ctx = CheckContext::new(&logs, &devices, &inventory, "# ");

        assert_eq!(PasswordCheck.run(&ctx), PasswordCheck.run(&ctx));
    }

    #[test]
    fn test_password_device_not_found() {
        let inventory = fixtures::inventory();
        let logs = [fixtures::orphan_log()];
        let ctx = CheckContext::new(&logs, &[], &inventory, "# ");

        let findings = PasswordCheck.run(&ctx);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].status, MatchStatus::DeviceNotFound);
        assert_eq!(
            serde_json::to_value(&findings[0]).unwrap(),
            json!({"hostname": "R1", "status": "DEVICE NOT FOUND", "entries": []})
        );
    }
}
