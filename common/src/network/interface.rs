//! # Controller Interfaces
//!
//! Models the IP interfaces of a controller and the coarse view of the
//! subnets it is attached to.
//!
//! Subnet membership is **not** computed with netmasks. A local subnet is the
//! dotted-decimal text of an interface address up to and including its last
//! `.`, and an address is local when it starts with one of those prefixes.
//! The controllers' brief interface listing is the only input available and
//! this approximation is what the diagnosis has always relied on, so it must
//! stay as is even though it is not CIDR-exact.

use std::collections::BTreeSet;

/// Minimum length of something that may pass as a dotted IPv4 address.
const MIN_ADDRESS_LEN: usize = 7;

/// One IP interface of the controller, as listed by the interface table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceRecord {
    pub address: String,
    pub vlan: String,
    /// The VLAN is one of the configured uplink (trunk/backbone) VLANs.
    pub is_uplink: bool,
}

impl InterfaceRecord {
    pub fn new(address: impl Into<String>, vlan: impl Into<String>, uplink_vlans: &BTreeSet<String>) -> Self {
        let vlan: String = vlan.into();
        let is_uplink: bool = uplink_vlans.contains(&vlan);
        Self {
            address: address.into(),
            vlan,
            is_uplink,
        }
    }
}

/// Addresses owned by the controller and the subnets considered local.
///
/// Built once per device from the full list of interface records. There are
/// no mutating methods: once built it is shared by reference only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetworkRegistry {
    owned_addresses: BTreeSet<String>,
    local_prefixes: BTreeSet<String>,
}

impl NetworkRegistry {
    /// Every record contributes its address to the owned set, uplinks included.
    /// Only non-uplink records contribute a local prefix.
    pub fn from_records(records: &[InterfaceRecord]) -> Self {
        let owned_addresses: BTreeSet<String> =
            records.iter().map(|record| record.address.clone()).collect();

        let local_prefixes: BTreeSet<String> = records
            .iter()
            .filter(|record| !record.is_uplink)
            .filter_map(|record| local_prefix(&record.address))
            .map(str::to_string)
            .collect();

        Self {
            owned_addresses,
            local_prefixes,
        }
    }

    pub fn owned_addresses(&self) -> &BTreeSet<String> {
        &self.owned_addresses
    }

    pub fn local_prefixes(&self) -> &BTreeSet<String> {
        &self.local_prefixes
    }

    pub fn owns(&self, address: &str) -> bool {
        self.owned_addresses.contains(address)
    }

    pub fn is_empty(&self) -> bool {
        self.owned_addresses.is_empty()
    }
}

/// Returns the text of `address` up to and including its last `.`.
///
/// An address without any `.` has no prefix. Deriving an empty one would make
/// every address of the device look local.
pub fn local_prefix(address: &str) -> Option<&str> {
    address.rfind('.').map(|idx| &address[..=idx])
}

/// Loose sanity check for an IPv4 address: at least seven characters, all of
/// them digits or dots. Octet ranges are not validated.
pub fn looks_like_ipv4(candidate: &str) -> bool {
    candidate.len() >= MIN_ADDRESS_LEN
        && candidate.chars().all(|c| c.is_ascii_digit() || c == '.')
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
