//! Rules shared by the Cisco families.
//!
//! `show ip interface`, `show interface switchport` and interface macros
//! render the same way on IOS, IOS-XE, IOS-XR and NX-OS for what these
//! checks look at.

use crate::platform::{Rule, SectionLabel};

/// DHCP client address on an interface block of `show ip interface`.
///
/// ```text
/// GigabitEthernet0/0 is up, line protocol is up
///   Internet address is 10.1.1.5/24
///   Address determined by DHCP
/// ```
pub(crate) fn dhcp() -> Rule {
    Rule::new("show ip interface", r"Address determined by DHCP")
        .unwrap()
        .with_section(SectionLabel::indented("{interface}"))
}

/// Access mode on a record of `show interface switchport`.
///
/// ```text
/// Name: Gi1/0/14
/// Switchport: Enabled
/// Administrative Mode: static access
/// ```
pub(crate) fn switchport() -> Rule {
    Rule::new("show interface switchport", r"Administrative Mode: .*access")
        .unwrap()
        .with_section(SectionLabel::until_next("Name: {interface}", "Name:"))
}

/// Interface name and macro description within one interface stanza.
///
/// ```text
/// interface GigabitEthernet1/0/3
///  switchport mode access
///  macro description CISCO_PHONE_EVENT
/// ```
pub(crate) fn macro_interface() -> Rule {
    Rule::new(
        "show running-config",
        r"\ninterface (\S+)[^\n]*\n(?:[ \t][^\n]*\n)*?[ \t]+macro description (\S+)",
    )
    .unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dhcp_block() {
        let output = "Gi0/0 is up\n  Address determined by DHCP\nGi0/1 is up\n  Internet address is 10.0.0.1/24\n";
        let rule = dhcp();

        let block = rule.extract_section(output, "Gi0/0").unwrap();
        assert!(rule.is_match(block));

        let block = rule.extract_section(output, "Gi0/1").unwrap();
        assert!(!rule.is_match(block));
    }

    #[test]
    fn test_switchport_modes() {
        let rule = switchport();
        assert!(rule.is_match("Administrative Mode: static access"));
        assert!(rule.is_match("Administrative Mode: access"));
        assert!(!rule.is_match("Administrative Mode: trunk"));
    }

    #[test]
    fn test_macro_stays_within_stanza() {
        let config = "!\ninterface Gi1/0/1\n description no macro\n!\n\
                      interface Gi1/0/2\r\n switchport mode access\r\n macro description CISCO_PHONE\r\n!\n";
        assert_eq!(
            macro_interface().evaluate_pairs(config),
            vec![("Gi1/0/2".to_string(), "CISCO_PHONE".to_string())]
        );
    }
}
