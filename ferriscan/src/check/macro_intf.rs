//! Interface macro binding check.

use log::trace;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use super::{Check, CheckContext, RuleLookup};
use crate::finding::{Finding, MatchStatus};
use crate::platform::CheckKind;

/// An interface bound to a macro, serialized as `{interface: macro}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceMacro {
    pub interface: String,
    pub macro_name: String,
}

impl Serialize for InterfaceMacro {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.interface, &self.macro_name)?;
        map.end()
    }
}

/// Macro bindings of one device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MacroFinding {
    pub hostname: String,
    pub status: MatchStatus,
    pub macros: Vec<InterfaceMacro>,
}

impl Finding for MacroFinding {
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

/// Lists interfaces carrying a `macro description` in the running
/// configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct MacroCheck;

impl Check for MacroCheck {
    type Finding = MacroFinding;

    fn name(&self) -> &'static str {
        "macro-interface"
    }

    fn kind(&self) -> Option<CheckKind> {
        Some(CheckKind::MacroInterface)
    }

    fn run(&self, ctx: &CheckContext<'_>) -> Vec<MacroFinding> {
        ctx.logs
            .iter()
            .filter_map(|log| {
                let rule = match ctx.rule_for(CheckKind::MacroInterface, log) {
                    RuleLookup::Found(_, rule) => rule,
                    RuleLookup::DeviceNotFound => {
                        return Some(MacroFinding {
                            hostname: log.hostname.clone(),
                            status: MatchStatus::DeviceNotFound,
                            macros: vec![],
                        });
                    }
                    RuleLookup::Unsupported => return None,
                };

                let (status, macros) = match ctx.command_output(rule, log) {
                    Some(output) => {
                        // `$`-prefixed names are macro template placeholders
                        let macros: Vec<_> = rule
                            .evaluate_pairs(output)
                            .into_iter()
                            .filter(|(interface, _)| !interface.starts_with('$'))
                            .map(|(interface, macro_name)| InterfaceMacro { interface, macro_name })
                            .collect();
                        trace!("{}: {} macro bindings", log.hostname, macros.len());
                        (MatchStatus::from_matches(&macros), macros)
                    }
                    None => (MatchStatus::CommandNotFound, vec![]),
                };

                Some(MacroFinding {
                    hostname: log.hostname.clone(),
                    status,
                    macros,
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
    fn test_macro_bindings() {
        let inventory = fixtures::inventory();
        let devices = inventory.devices(&json!({}));
        let logs = collect_logs(&inventory, &devices, |_| true);
        let ctx = CheckContext::new(&logs, &devices, &inventory, "# ");

        let findings = MacroCheck.run(&ctx);
        assert_eq!(findings.len(), 1);
        assert_eq!(
            serde_json::to_value(&findings[0]).unwrap(),
            json!({
                "hostname": "core-r1",
                "status": "FOUND",
                "macros": [{"GigabitEthernet1/0/3": "CISCO_PHONE_EVENT"}],
            })
        );
    }

    #[test]
    fn test_macro_template_interfaces_are_dropped() {
        let log = "sw1# show running-config\n\
                   macro name PHONE\n\
                   interface $INTERFACE\n \
                   macro description PHONE\n\
                   @\n\
                   interface Gi1/0/2\n \
                   description uplink\n\
                   !\n\
                   sw1# exit\n";
        let inventory =
            StaticInventory::new().with_device_log(DeviceRecord::new("SN1", "ios", "15.2", "sw1"), log);
        let devices = inventory.devices(&json!({}));
        let logs = collect_logs(&inventory, &devices, |_| true);
        let ctx = CheckContext::new(&logs, &devices, &inventory, "# ");

        let findings = MacroCheck.run(&ctx);
        assert_eq!(findings[0].status, MatchStatus::NoMatchesFound);
        assert!(findings[0].macros.is_empty());
        assert_eq!(
            serde_json::to_value(&findings[0]).unwrap(),
            json!({"hostname": "sw1", "status": "No matches found", "macros": []})
        );
    }

    #[test]
    fn test_macro_is_idempotent() {
        let inventory = fixtures::inventory();
        let devices = inventory.devices(&json!({}));
        let logs = collect_logs(&inventory, &devices, |_| true);
        let ctx = CheckContext::new(&logs, &devices, &inventory, "# ");

        assert_eq!(MacroCheck.run(&ctx), MacroCheck.run(&ctx));
    }

    #[test]
    fn test_macro_device_not_found() {
        let inventory = fixtures::inventory();
        let logs = [fixtures::orphan_log()];
        let ctx = CheckContext::new(&logs, &[], &inventory, "# ");

        let findings = MacroCheck.run(&ctx);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].status, MatchStatus::DeviceNotFound);
        assert!(findings[0].macros.is_empty());
    }
}
