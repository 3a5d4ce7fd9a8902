//! Cisco IOS (classic) rule set.
//!
//! IOS shares the interface-level rules with IOS-XE. No password rule is
//! authored for classic IOS, so the password check skips these devices.

use super::cisco_common;
use crate::platform::{CheckKind, Family, PlatformRules};

/// Create the Cisco IOS rule set.
pub fn platform() -> PlatformRules {
    PlatformRules::new(Family::Ios)
        .with_rule(CheckKind::Dhcp, cisco_common::dhcp())
        .with_rule(CheckKind::Switchport, cisco_common::switchport())
        .with_rule(CheckKind::MacroInterface, cisco_common::macro_interface())
}
