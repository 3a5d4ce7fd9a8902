//! Offline log scan example
//!
//! This example loads device records and their captured logs from disk,
//! runs one compliance check and prints the findings split into compliant
//! and non-compliant, or writes them to a JSON file.
//!
//! # Prerequisites
//!
//! - A device file listing the devices and where their logs live:
//!
//! ```json
//! [
//!   {
//!     "sn": "FOC1234", "family": "ios-xe", "version": "17.3.4", "hostname": "core-r1",
//!     "log": "logs/core-r1.log",
//!     "ipInterfaces": ["GigabitEthernet0/0"],
//!     "switchportInterfaces": ["Gi1/0/14"]
//!   }
//! ]
//! ```
//!
//! - A `.env` file (or environment) with at least `PROMPT_DELIMITER`, and
//!   `INPUT_DATA` for the generic search.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example scan_logs -- --devices devices.json --dhcp
//! cargo run --example scan_logs -- --devices devices.json --password --file-output pwd.json
//! cargo run --example scan_logs -- --devices devices.json   # generic search from INPUT_DATA
//! ```

use std::env;
use std::fs;
use std::path::PathBuf;

use ferriscan::finding::partition;
use ferriscan::{
    Check, CveCheck, DeviceRecord, DhcpCheck, Finding, MacroCheck, PasswordCheck, ScanConfig,
    Scanner, StaticInventory, SwitchportCheck,
};
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeviceEntry {
    #[serde(flatten)]
    device: DeviceRecord,
    log: Option<PathBuf>,
    #[serde(default)]
    ip_interfaces: Vec<String>,
    #[serde(default)]
    switchport_interfaces: Vec<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Pick up PROMPT_DELIMITER, DEVICES_FILTER, VERBOSE and INPUT_DATA
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let Some(devices_path) = &args.devices else {
        eprintln!("Error: Must provide --devices <file>");
        std::process::exit(1);
    };

    let inventory = load_inventory(devices_path)?;

    let mut config = ScanConfig::from_env()?;
    config.verbose |= args.verbose;
    let scanner = Scanner::new(&inventory, config);

    match args.mode {
        Mode::Dhcp => report(&scanner, &DhcpCheck, &args),
        Mode::Switchport => report(&scanner, &SwitchportCheck, &args),
        Mode::Password => report(&scanner, &PasswordCheck, &args),
        Mode::Macro => report(&scanner, &MacroCheck, &args),
        Mode::Cve => report(&scanner, &CveCheck, &args),
        Mode::Search => {
            let findings = scanner.search()?;
            output(findings, "search", &args)
        }
    }
}

fn load_inventory(path: &PathBuf) -> Result<StaticInventory, Box<dyn std::error::Error>> {
    let entries: Vec<DeviceEntry> = serde_json::from_str(&fs::read_to_string(path)?)?;
    let base = path.parent().map(PathBuf::from).unwrap_or_default();

    let mut inventory = StaticInventory::new();
    for entry in entries {
        let serial = entry.device.serial_number.clone();
        let hostname = entry.device.hostname.clone();

        inventory = match &entry.log {
            Some(log) => inventory.with_device_log(entry.device, fs::read_to_string(base.join(log))?),
            None => inventory.with_device(entry.device),
        };
        for interface in entry.ip_interfaces {
            inventory = inventory.with_ip_interface(&serial, interface);
        }
        for interface in entry.switchport_interfaces {
            inventory = inventory.with_switchport_interface(&hostname, interface);
        }
    }

    Ok(inventory)
}

fn report<C: Check>(scanner: &Scanner<'_>, check: &C, args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let findings = scanner.run(check);
    output(findings, check.name(), args)
}

fn output<F: Finding>(findings: Vec<F>, name: &str, args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = &args.file_output {
        fs::write(path, serde_json::to_string_pretty(&findings)?)?;
        println!("\nJSON OUTPUT written to {}", path.display());
        return Ok(());
    }

    let (ok, nok) = partition(findings);

    println!("\n------------- {} OK ({}) -------------", name.to_uppercase(), ok.len());
    for finding in &ok {
        println!("{}", serde_json::to_string(finding)?);
    }

    println!("\n!!!!!!!!!!!!! {} NOT OK ({}) !!!!!!!!!!!!!", name.to_uppercase(), nok.len());
    for finding in &nok {
        println!("{}", serde_json::to_string(finding)?);
    }

    Ok(())
}

enum Mode {
    Dhcp,
    Switchport,
    Password,
    Macro,
    Cve,
    Search,
}

struct Args {
    devices: Option<PathBuf>,
    mode: Mode,
    verbose: bool,
    file_output: Option<PathBuf>,
}

impl Args {
    fn parse() -> Self {
        let args: Vec<String> = env::args().collect();
        let mut devices = None;
        let mut mode = Mode::Search;
        let mut verbose = false;
        let mut file_output = None;

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--devices" | "-d" => {
                    i += 1;
                    if i < args.len() {
                        devices = Some(PathBuf::from(&args[i]));
                    }
                }
                "--dhcp-interfaces" | "--dhcp" => mode = Mode::Dhcp,
                "--switchport-interfaces" | "--sw" => mode = Mode::Switchport,
                "--password-encryption" | "--pwd" => mode = Mode::Password,
                "--macro-interfaces" | "--macro" => mode = Mode::Macro,
                "--cve-2024-3400" | "--cve" => mode = Mode::Cve,
                "--verbose" | "-v" => verbose = true,
                "--file-output" | "-o" => {
                    i += 1;
                    if i < args.len() {
                        file_output = Some(PathBuf::from(&args[i]));
                    }
                }
                "--help" => {
                    println!("Usage: scan_logs --devices <file> [OPTIONS]");
                    println!();
                    println!("Options:");
                    println!("  -d, --devices <FILE>         Device list with log paths (JSON)");
                    println!("      --dhcp                   Check interfaces configured as DHCP client");
                    println!("      --sw                     Check switchport interfaces, access or not");
                    println!("      --pwd                    Check password encryption");
                    println!("      --macro                  Check macros assigned to interfaces");
                    println!("      --cve                    Check PAN-OS CVE-2024-3400 exposure");
                    println!("  -v, --verbose                Keep matched sections in findings");
                    println!("  -o, --file-output <FILE>     Write findings to a JSON file");
                    println!();
                    println!("Without a check option, the searches in INPUT_DATA are run.");
                    std::process::exit(0);
                }
                _ => {}
            }
            i += 1;
        }

        Self {
            devices,
            mode,
            verbose,
            file_output,
        }
    }
}
