//! Device inventory and captured log records.
//!
//! The inventory platform itself is an external collaborator reached
//! through the [`Inventory`] trait. [`StaticInventory`] is an in-memory
//! implementation for tests and offline log dumps.

use std::collections::HashMap;

use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::platform::Family;
use crate::section::normalize_log;

/// Inventory filter, passed through to the platform as JSON.
///
/// Typically an object mapping a column to `[operator, value]`, e.g.
/// `{"hostname": ["like", "core"]}`.
pub type DeviceFilter = Value;

/// One device's captured log/config dump.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    /// Device hostname.
    pub hostname: String,

    /// Device serial number.
    #[serde(rename = "sn")]
    pub serial_number: String,

    /// Full captured text.
    pub text: String,
}

impl LogRecord {
    /// Create a new log record.
    pub fn new(
        hostname: impl Into<String>,
        serial_number: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            hostname: hostname.into(),
            serial_number: serial_number.into(),
            text: text.into(),
        }
    }
}

/// A device as reported by the inventory platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceRecord {
    /// Device serial number.
    #[serde(rename = "sn")]
    pub serial_number: String,

    /// Vendor/OS family.
    pub family: Family,

    /// Operating system version string.
    #[serde(rename = "version", default)]
    pub os_version: String,

    /// Device hostname.
    pub hostname: String,
}

impl DeviceRecord {
    /// Create a new device record.
    pub fn new(
        serial_number: impl Into<String>,
        family: impl Into<Family>,
        os_version: impl Into<String>,
        hostname: impl Into<String>,
    ) -> Self {
        Self {
            serial_number: serial_number.into(),
            family: family.into(),
            os_version: os_version.into(),
            hostname: hostname.into(),
        }
    }

    fn column(&self, name: &str) -> Option<&str> {
        match name {
            "sn" => Some(&self.serial_number),
            "family" => Some(self.family.as_str()),
            "version" => Some(&self.os_version),
            "hostname" => Some(&self.hostname),
            _ => None,
        }
    }
}

/// Access to the network inventory platform.
///
/// Lookups that fail or find nothing return `None` or an empty list;
/// callers treat that as "not found", never as an error.
pub trait Inventory {
    /// List devices matching a filter.
    fn devices(&self, filter: &DeviceFilter) -> Vec<DeviceRecord>;

    /// Fetch the captured log text of a device.
    fn log_text(&self, device: &DeviceRecord) -> Option<String>;

    /// Names of the interfaces holding an IP address on a device.
    fn ip_interfaces(&self, serial_number: &str) -> Vec<String>;

    /// Names of the switchport interfaces on a device.
    fn switchport_interfaces(&self, hostname: &str) -> Vec<String>;
}

/// Fetch and normalize logs for the devices a check supports.
///
/// Devices of other families, and devices without a log, are left out.
pub fn collect_logs<F>(inventory: &dyn Inventory, devices: &[DeviceRecord], supports: F) -> Vec<LogRecord>
where
    F: Fn(&Family) -> bool,
{
    devices
        .iter()
        .filter(|device| {
            let supported = supports(&device.family);
            if !supported {
                debug!("{}: family '{}' not supported, skipping", device.hostname, device.family);
            }
            supported
        })
        .filter_map(|device| {
            let Some(text) = inventory.log_text(device) else {
                debug!("{}: no log available", device.hostname);
                return None;
            };
            let text = normalize_log(&text).into_owned();
            Some(LogRecord::new(&device.hostname, &device.serial_number, text))
        })
        .collect()
}

/// In-memory inventory.
#[derive(Debug, Clone, Default)]
pub struct StaticInventory {
    devices: Vec<DeviceRecord>,
    logs: HashMap<String, String>,
    ip_interfaces: HashMap<String, Vec<String>>,
    switchport_interfaces: HashMap<String, Vec<String>>,
}

impl StaticInventory {
    /// Create an empty inventory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a device without a captured log.
    pub fn with_device(mut self, device: DeviceRecord) -> Self {
        self.devices.push(device);
        self
    }

    /// Add a device and its captured log.
    pub fn with_device_log(mut self, device: DeviceRecord, text: impl Into<String>) -> Self {
        self.logs.insert(device.serial_number.clone(), text.into());
        self.devices.push(device);
        self
    }

    /// Add an IP-addressed interface to the device with this serial number.
    pub fn with_ip_interface(mut self, serial_number: &str, interface: impl Into<String>) -> Self {
        self.ip_interfaces
            .entry(serial_number.to_string())
            .or_default()
            .push(interface.into());
        self
    }

    /// Add a switchport interface to the device with this hostname.
    pub fn with_switchport_interface(mut self, hostname: &str, interface: impl Into<String>) -> Self {
        self.switchport_interfaces
            .entry(hostname.to_string())
            .or_default()
            .push(interface.into());
        self
    }
}

/// Evaluate one `column: [operator, value]` filter entry.
///
/// Supports `eq` and `like` (case-insensitive substring). A bare string
/// value means `eq`. Unknown columns and operators do not filter.
fn filter_matches(device: &DeviceRecord, column: &str, condition: &Value) -> bool {
    let Some(actual) = device.column(column) else {
        return true;
    };

    let (operator, expected) = match condition {
        Value::String(expected) => ("eq", expected.as_str()),
        Value::Array(parts) => match (parts.first(), parts.get(1)) {
            (Some(Value::String(op)), Some(Value::String(expected))) => (op.as_str(), expected.as_str()),
            _ => return true,
        },
        _ => return true,
    };

    match operator {
        "eq" => actual == expected,
        "like" => actual.to_lowercase().contains(&expected.to_lowercase()),
        _ => true,
    }
}

impl Inventory for StaticInventory {
    fn devices(&self, filter: &DeviceFilter) -> Vec<DeviceRecord> {
        let Some(conditions) = filter.as_object() else {
            return self.devices.clone();
        };

        self.devices
            .iter()
            .filter(|device| {
                conditions
                    .iter()
                    .all(|(column, condition)| filter_matches(device, column, condition))
            })
            .cloned()
            .collect()
    }

    fn log_text(&self, device: &DeviceRecord) -> Option<String> {
        self.logs.get(&device.serial_number).cloned()
    }

    fn ip_interfaces(&self, serial_number: &str) -> Vec<String> {
        self.ip_interfaces.get(serial_number).cloned().unwrap_or_default()
    }

    fn switchport_interfaces(&self, hostname: &str) -> Vec<String> {
        self.switchport_interfaces.get(hostname).cloned().unwrap_or_default()
    }
}
