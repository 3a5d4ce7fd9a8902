//! CVE-2024-3400 exposure check (PAN-OS GlobalProtect with telemetry).

use log::trace;
use serde::Serialize;

use super::{Check, CheckContext, RuleLookup};
use crate::finding::{Finding, MatchStatus};
use crate::platform::CheckKind;

/// GlobalProtect indicators found on one device.
///
/// `os_version` is empty when the log has no device record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CveFinding {
    pub hostname: String,
    pub os_version: String,
    pub status: MatchStatus,
    pub indicators: Vec<String>,
}

impl CveFinding {
    /// The OS version followed by every indicator line.
    pub fn output(&self) -> Vec<&str> {
        std::iter::once(self.os_version.as_str())
            .chain(self.indicators.iter().map(String::as_str))
            .collect()
    }
}

impl Finding for CveFinding {
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

/// Looks for GlobalProtect portal or gateway settings with telemetry
/// enabled in `show config merged`. Detection only; the OS version is
/// reported so affected releases can be told apart.
#[derive(Debug, Clone, Copy, Default)]
pub struct CveCheck;

impl Check for CveCheck {
    type Finding = CveFinding;

    fn name(&self) -> &'static str {
        "cve-2024-3400"
    }

    fn kind(&self) -> Option<CheckKind> {
        Some(CheckKind::Cve20243400)
    }

    fn run(&self, ctx: &CheckContext<'_>) -> Vec<CveFinding> {
        ctx.logs
            .iter()
            .filter_map(|log| {
                let (device, rule) = match ctx.rule_for(CheckKind::Cve20243400, log) {
                    RuleLookup::Found(device, rule) => (device, rule),
                    RuleLookup::DeviceNotFound => {
                        return Some(CveFinding {
                            hostname: log.hostname.clone(),
                            os_version: String::new(),
                            status: MatchStatus::DeviceNotFound,
                            indicators: vec![],
                        });
                    }
                    RuleLookup::Unsupported => return None,
                };

                let (status, indicators) = match ctx.command_output(rule, log) {
                    Some(output) => {
                        let indicators = rule.evaluate(output);
                        trace!("{}: {} indicators", log.hostname, indicators.len());
                        (MatchStatus::from_matches(&indicators), indicators)
                    }
                    None => (MatchStatus::CommandNotFound, vec![]),
                };

                Some(CveFinding {
                    hostname: log.hostname.clone(),
                    os_version: device.os_version.clone(),
                    status,
                    indicators,
                })
            })
            .collect()
    }
}
