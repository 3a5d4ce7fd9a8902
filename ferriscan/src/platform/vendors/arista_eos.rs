//! Arista EOS rule set.
//!
//! Only the password check is authored for EOS.
//!
//! ```text
//! username admin privilege 15 role network-admin secret sha512 $6$8Cj...
//! tacacs-server host 10.0.0.10 key 7 070E33455D1D18
//! ```

use crate::platform::{CheckKind, Family, PlatformRules, Rule};

/// Credential lines of `show running-config` on EOS.
pub(crate) fn password_encryption() -> Rule {
    Rule::new(
        "show running-config",
        r"\busername.*secret\s\w+|tacacs-server\shost\s.*key\s\w+\s|.*\w+\skey\s\w+\s|.*\w+\spassword\s\w+\s|snmp-server\suser\s[\w\S]+.*auth\s\w+\b",
    )
    .unwrap()
}

/// Create the Arista EOS rule set.
pub fn platform() -> PlatformRules {
    PlatformRules::new(Family::Eos).with_rule(CheckKind::PasswordEncryption, password_encryption())
}
