//! # Interface Registry Builder
//!
//! Turns the controller's brief interface listing into the registry of owned
//! addresses and local subnet prefixes.
//!
//! Expected line shape (extra columns are ignored):
//!
//! ```text
//! vlan 2       10.1.1.1 / 255.255.255.0  up  up  Enabled
//! vlan 3       unassigned / unassigned   up  up  Enabled
//! ```

use std::collections::BTreeSet;

use mmcollect_common::network::interface::{self, InterfaceRecord, NetworkRegistry};
use tracing::debug;

const VLAN_KEYWORD: &str = "vlan";

/// Parses one interface line. Lines that are not interfaces, or whose address
/// column does not look like an IPv4 address, give `None`.
pub fn parse_interface(line: &str, uplink_vlans: &BTreeSet<String>) -> Option<InterfaceRecord> {
    let tokens: Vec<&str> = line.split_whitespace().collect();

    if !tokens.iter().any(|token| token.eq_ignore_ascii_case(VLAN_KEYWORD)) {
        return None;
    }

    let (vlan, address) = match tokens.as_slice() {
        [_, vlan, address, ..] => (*vlan, *address),
        _ => return None,
    };

    if !interface::looks_like_ipv4(address) {
        return None;
    }

    Some(InterfaceRecord::new(address, vlan, uplink_vlans))
}

/// Parses every interface line, skipping anything that does not match.
pub fn parse_interfaces<S: AsRef<str>>(lines: &[S], uplink_vlans: &BTreeSet<String>) -> Vec<InterfaceRecord> {
    lines
        .iter()
        .filter_map(|line| parse_interface(line.as_ref(), uplink_vlans))
        .collect()
}

/// Builds the registry for one controller. Never fails: malformed or empty
/// input gives an empty registry, which classifies every flow as non-local.
pub fn build_registry<S: AsRef<str>>(lines: &[S], uplink_vlans: &BTreeSet<String>) -> NetworkRegistry {
    let records: Vec<InterfaceRecord> = parse_interfaces(lines, uplink_vlans);
    let registry = NetworkRegistry::from_records(&records);

    debug!(
        "Registry built from {} interface(s): {} owned address(es), local prefixes [{}]",
        records.len(),
        registry.owned_addresses().len(),
        registry
            .local_prefixes()
            .iter()
            .map(String::as_str)
            .collect::<Vec<&str>>()
            .join(", ")
    );

    registry
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
