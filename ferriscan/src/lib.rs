//! # Ferriscan
//!
//! Compliance scanner for captured network device logs.
//!
//! Ferriscan takes the terminal logs an inventory platform collected from
//! network devices (one dump of many `show` commands per device), isolates
//! the output of individual commands by their prompt lines, and applies
//! per-vendor rules to report compliance findings.
//!
//! ## Features
//!
//! - Prompt-delimited command section extraction
//! - Named block extraction (one interface, one switchport record)
//! - Multi-line match stitching (carriage return continuations, IOS-XR keyed lines)
//! - Vendor rule registry (Cisco IOS/IOS-XE/IOS-XR/NX-OS, Arista EOS, PAN-OS)
//! - Checks: DHCP interfaces, switchport access mode, password encryption,
//!   interface macros, CVE-2024-3400, and caller-defined searches
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ferriscan::{DeviceRecord, DhcpCheck, ScanConfig, Scanner, StaticInventory};
//!
//! fn main() -> Result<(), ferriscan::Error> {
//!     let inventory = StaticInventory::new()
//!         .with_device_log(
//!             DeviceRecord::new("FOC1234", "ios", "15.2", "R1"),
//!             "R1# show ip interface\nGig0/1 is up\n  Address determined by DHCP\nR1# exit\n",
//!         )
//!         .with_ip_interface("FOC1234", "Gig0/1");
//!
//!     let scanner = Scanner::new(&inventory, ScanConfig::builder("# ").build()?);
//!     for finding in scanner.run(&DhcpCheck) {
//!         println!("{}", serde_json::to_string(&finding).unwrap());
//!     }
//!     Ok(())
//! }
//! ```

pub mod check;
pub mod config;
pub mod error;
pub mod finding;
pub mod inventory;
pub mod matcher;
pub mod platform;
pub mod scanner;
pub mod section;

// Re-export main types for convenience
pub use check::{
    Check, CheckContext, CveCheck, DhcpCheck, MacroCheck, PasswordCheck, SearchCheck, SearchRule,
    SwitchportCheck,
};
pub use config::{ScanBuilder, ScanConfig};
pub use error::Error;
pub use finding::{Finding, FindingSink, MatchStatus};
pub use inventory::{DeviceRecord, Inventory, LogRecord, StaticInventory};
pub use platform::{CheckKind, Family, Rule, RuleRegistry};
pub use scanner::Scanner;
pub use section::extract_command_section;
