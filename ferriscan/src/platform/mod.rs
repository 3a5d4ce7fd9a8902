//! Platform rule tables for multi-vendor support.
//!
//! Each vendor module defines, for its device family, the command and
//! pattern used by every compliance check it supports. The registry maps
//! (check, family) to the rule at run time.

mod definition;
mod family;
mod registry;
mod rule;
pub mod vendors;

pub use definition::PlatformRules;
pub use family::Family;
pub use registry::RuleRegistry;
pub use rule::{Boundary, INTERFACE_PLACEHOLDER, Rule, SectionLabel};

use std::fmt;

/// Compliance checks backed by per-family rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckKind {
    /// Interfaces addressed through DHCP.
    Dhcp,
    /// Switchport administrative access mode.
    Switchport,
    /// Password and secret encryption.
    PasswordEncryption,
    /// Macro descriptions bound to interfaces.
    MacroInterface,
    /// PAN-OS GlobalProtect exposure (CVE-2024-3400).
    Cve20243400,
}

impl CheckKind {
    /// Short name used in logs and errors.
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckKind::Dhcp => "dhcp",
            CheckKind::Switchport => "switchport",
            CheckKind::PasswordEncryption => "password-encryption",
            CheckKind::MacroInterface => "macro-interface",
            CheckKind::Cve20243400 => "cve-2024-3400",
        }
    }
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
