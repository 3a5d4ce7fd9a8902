//! Built-in vendor rule sets.

pub mod arista_eos;
pub mod cisco_ios;
pub mod cisco_iosxe;
pub mod cisco_iosxr;
pub mod cisco_nxos;
pub mod paloalto_panos;

mod cisco_common;

use super::PlatformRules;

/// All built-in rule sets, in registration order.
pub fn all() -> Vec<PlatformRules> {
    vec![
        cisco_iosxe::platform(),
        cisco_ios::platform(),
        cisco_iosxr::platform(),
        cisco_nxos::platform(),
        arista_eos::platform(),
        paloalto_panos::platform(),
    ]
}
