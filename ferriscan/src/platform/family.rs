//! Device family classification.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Vendor/OS family of a device, as reported by the inventory.
///
/// Families without a dedicated variant are kept, trimmed and lowercased,
/// in [`Family::Other`] so they can still be reported and filtered.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Family {
    /// Cisco IOS-XE ("ios-xe")
    IosXe,
    /// Cisco IOS ("ios")
    Ios,
    /// Cisco IOS-XR ("ios-xr")
    IosXr,
    /// Cisco NX-OS ("nxos" or "nx-os")
    NxOs,
    /// Arista EOS ("eos")
    Eos,
    /// Palo Alto PAN-OS ("pan-os")
    PanOs,
    /// Any other family string.
    Other(String),
}

impl Family {
    /// Canonical inventory name of the family.
    pub fn as_str(&self) -> &str {
        match self {
            Family::IosXe => "ios-xe",
            Family::Ios => "ios",
            Family::IosXr => "ios-xr",
            Family::NxOs => "nxos",
            Family::Eos => "eos",
            Family::PanOs => "pan-os",
            Family::Other(name) => name,
        }
    }
}

impl From<&str> for Family {
    fn from(name: &str) -> Self {
        let name = name.trim().to_ascii_lowercase();
        match name.as_str() {
            "ios-xe" => Family::IosXe,
            "ios" => Family::Ios,
            "ios-xr" => Family::IosXr,
            "nxos" | "nx-os" => Family::NxOs,
            "eos" => Family::Eos,
            "pan-os" => Family::PanOs,
            _ => Family::Other(name),
        }
    }
}

impl From<String> for Family {
    fn from(name: String) -> Self {
        Family::from(name.as_str())
    }
}

impl From<Family> for String {
    fn from(family: Family) -> Self {
        family.as_str().to_string()
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nxos_spellings() {
        assert_eq!(Family::from("nxos"), Family::NxOs);
        assert_eq!(Family::from("nx-os"), Family::NxOs);
        assert_eq!(Family::NxOs.to_string(), "nxos");
    }

    #[test]
    fn test_unknown_family_is_kept() {
        let family = Family::from("junos");
        assert_eq!(family, Family::Other("junos".to_string()));
        assert_eq!(family.as_str(), "junos");
    }

    #[test]
    fn test_unknown_family_is_case_insensitive() {
        assert_eq!(Family::from("JunOS"), Family::from("junos"));
        assert_eq!(Family::from(" JunOS "), Family::Other("junos".to_string()));
    }

    #[test]
    fn test_serde_uses_inventory_names() {
        let family: Family = serde_json::from_str("\"pan-os\"").unwrap();
        assert_eq!(family, Family::PanOs);
        assert_eq!(serde_json::to_string(&Family::IosXe).unwrap(), "\"ios-xe\"");
    }
}
