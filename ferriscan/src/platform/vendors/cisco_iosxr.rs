//! Cisco IOS-XR rule set.
//!
//! IOS-XR places credentials on the line after the object they belong to:
//!
//! ```text
//! username admin
//!  group root-lr
//!  secret 10 $6$Jfk3....
//! !
//! key chain ISIS
//!  key 1
//!   key-string password 7 1511021F07
//! ```
//!
//! Matches on `username`, `tacacs-server host`, `server-private` and
//! `key chain` are joined with the credential match that follows them, or
//! annotated when the object has no key or secret.

use super::cisco_common;
use crate::matcher::{KeyedStitch, Stitching};
use crate::platform::{CheckKind, Family, PlatformRules, Rule};

/// Credential lines of `show running-config` on IOS-XR.
pub(crate) fn password_encryption() -> Rule {
    let keyed = KeyedStitch::new(
        ["username", "tacacs-server host", "server-private", "key chain"],
        r"^ *(?:key-string|key|secret)",
    )
    .unwrap();

    Rule::new(
        "show running-config",
        r"\busername\s\w+|snmp-server.user.*\n|server-private.*\n|tacacs-server.host.*\n|key.chain.*\n|key-string\s\S+|.*secret\s\d+\s|.*key\s\S\s\S+\b",
    )
    .unwrap()
    .with_stitching(Stitching::Keyed(keyed))
}

/// Create the Cisco IOS-XR rule set.
pub fn platform() -> PlatformRules {
    PlatformRules::new(Family::IosXr)
        .with_rule(CheckKind::Dhcp, cisco_common::dhcp())
        .with_rule(CheckKind::Switchport, cisco_common::switchport())
        .with_rule(CheckKind::PasswordEncryption, password_encryption())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iosxr_platform() {
        let platform = platform();
        assert_eq!(platform.family, Family::IosXr);
        assert!(platform.get(CheckKind::MacroInterface).is_none());
    }

    #[test]
    fn test_username_with_secret() {
        let config = "username admin\n group root-lr\n secret 10 $6$Jfk3\n!\n";
        assert_eq!(
            password_encryption().evaluate(config),
            vec!["username admin: secret 10"]
        );
    }

    #[test]
    fn test_username_without_secret() {
        let config = "username guest\n group operator\n!\nusername admin\n secret 10 $6$Jfk3\n";
        assert_eq!(
            password_encryption().evaluate(config),
            vec!["username guest: key or secret not found", "username admin: secret 10"]
        );
    }

    #[test]
    fn test_tacacs_host_with_key() {
        let config = "tacacs-server host 10.0.0.10 port 49\n key 7 1511021F0725\n!\n";
        assert_eq!(
            password_encryption().evaluate(config),
            vec!["tacacs-server host 10.0.0.10 port 49: key 7 1511021F0725"]
        );
    }
}
