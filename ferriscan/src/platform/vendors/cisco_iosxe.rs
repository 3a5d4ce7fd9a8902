//! Cisco IOS-XE rule set.
//!
//! Password rule matches look like:
//!
//! ```text
//! enable password 7 0822455D0A16
//! username admin password 7 0822455D0A16
//! snmp-server group RO v3 priv
//! tacacs server ISE-1
//!  key 7 0822455D0A16
//! ```
//!
//! The `tacacs server` stanza spans two lines; the first line's match ends
//! in a carriage return and is stitched to the key match that follows.

use super::cisco_common;
use crate::matcher::Stitching;
use crate::platform::{CheckKind, Family, PlatformRules, Rule};

/// Password and key lines of `show running-config` on IOS-XE.
pub(crate) fn password_encryption() -> Rule {
    Rule::new(
        "show running-config",
        r"\benable password\s\d\s|username.*password\s\d\s|snmp-server.group.*\n|tacacs.server.*\r|radius.server.dnac*\r|.*key\s\d\s\b",
    )
    .unwrap()
    .with_replacement(" password", ": password")
    .with_replacement("server group", "server group:")
    .with_stitching(Stitching::CarriageReturn)
}

/// Create the Cisco IOS-XE rule set.
pub fn platform() -> PlatformRules {
    PlatformRules::new(Family::IosXe)
        .with_rule(CheckKind::Dhcp, cisco_common::dhcp())
        .with_rule(CheckKind::Switchport, cisco_common::switchport())
        .with_rule(CheckKind::PasswordEncryption, password_encryption())
        .with_rule(CheckKind::MacroInterface, cisco_common::macro_interface())
}

#[cfg(test)]
mod tests {
    use super::*;

    const RUNNING_CONFIG: &str = "\
hostname R1\r
enable password 7 0822455D0A16\r
username admin password 7 0822455D0A16\r
snmp-server group RO v3 priv\r
tacacs server ISE-1\r
 address ipv4 10.0.0.10\r
 key 7 1511021F0725\r
";

    #[test]
    fn test_iosxe_platform() {
        let platform = platform();
        assert_eq!(platform.family, Family::IosXe);
        assert_eq!(platform.rules.len(), 4);
        assert!(platform.get(CheckKind::Cve20243400).is_none());
    }

    #[test]
    fn test_password_findings() {
        let findings = password_encryption().evaluate(RUNNING_CONFIG);
        assert_eq!(
            findings,
            vec![
                "enable: password 7",
                "username admin: password 7",
                "snmp-server group: RO v3 priv",
                "tacacs server ISE-1: key 7",
            ]
        );
    }
}
