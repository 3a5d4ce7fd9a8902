//! Palo Alto PAN-OS rule set.
//!
//! PAN-OS prompts carry the login user before the hostname
//! (`admin@fw01> `), so the command anchor accepts a prompt prefix.
//!
//! The CVE-2024-3400 indicator is a GlobalProtect gateway or portal with
//! telemetry enabled in the merged configuration:
//!
//! ```text
//! global-protect { ... }
//! device-telemetry { ... }
//! global-protect-portal ... telemetry enable;
//! ```

use crate::matcher::Stitching;
use crate::platform::{CheckKind, Family, PlatformRules, Rule};

/// GlobalProtect lines of `show config merged`.
pub(crate) fn cve_2024_3400() -> Rule {
    Rule::new("show config merged", r"global-protect.*enable;")
        .unwrap()
        .with_stitching(Stitching::CarriageReturn)
        .with_prompt_prefix()
}

/// Create the Palo Alto PAN-OS rule set.
pub fn platform() -> PlatformRules {
    PlatformRules::new(Family::PanOs).with_rule(CheckKind::Cve20243400, cve_2024_3400())
}
