//! Cisco NX-OS rule set.
//!
//! NX-OS keeps credentials on a single line, so matches need no stitching.
//!
//! ```text
//! username admin password 5 $5$KHDF...  role network-admin
//! tacacs-server host 10.0.0.10 key 7 "fewhg123"
//! snmp-server user ops network-operator auth md5 0x5a1b... priv 0x5a1b... localizedkey
//! ```

use super::cisco_common;
use crate::platform::{CheckKind, Family, PlatformRules, Rule};

/// Credential lines of `show running-config` on NX-OS.
pub(crate) fn password_encryption() -> Rule {
    Rule::new(
        "show running-config",
        r"\busername\s[\w\S]+\s\w+\s\d+|tacacs-server\shost\s\S+\skey\s\d+|snmp-server\suser\s[\w\S]+.*auth\s\w+\b",
    )
    .unwrap()
}

/// Create the Cisco NX-OS rule set.
pub fn platform() -> PlatformRules {
    PlatformRules::new(Family::NxOs)
        .with_rule(CheckKind::Dhcp, cisco_common::dhcp())
        .with_rule(CheckKind::Switchport, cisco_common::switchport())
        .with_rule(CheckKind::PasswordEncryption, password_encryption())
}
