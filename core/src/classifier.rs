//! # Locality Classifier
//!
//! A flow is *local* when both endpoints belong to subnets the controller is
//! attached to. Those sessions should never be forwarded through a next hop
//! or an uplink, so they are the symptom the diagnosis looks for.
//!
//! Membership is a plain text-prefix test against the registry's prefixes
//! (see [`mmcollect_common::network::interface`]). It is an approximation: a
//! controller in `10.1.0.0/16` with interface `10.1.1.1` only makes
//! `10.1.1.*` local, and a `/25` interface makes the whole `/24` local.

use std::collections::BTreeSet;

use mmcollect_common::network::{ClassifiedFlow, FlowRecord, NetworkRegistry};

/// True if `address` starts with any of the registry's local prefixes.
pub fn is_local(address: &str, registry: &NetworkRegistry) -> bool {
    registry
        .local_prefixes()
        .iter()
        .any(|prefix| address.starts_with(prefix.as_str()))
}

pub fn classify(flow: &FlowRecord, registry: &NetworkRegistry) -> ClassifiedFlow {
    let is_local: bool = flow
        .endpoints()
        .iter()
        .all(|address| is_local(address, registry));

    let external_endpoints: BTreeSet<String> = if is_local {
        flow.endpoints()
            .into_iter()
            .filter(|address| !registry.owns(address))
            .map(str::to_string)
            .collect()
    } else {
        BTreeSet::new()
    };

    ClassifiedFlow {
        flow: flow.clone(),
        is_local,
        external_endpoints,
    }
}

pub fn classify_all(flows: &[FlowRecord], registry: &NetworkRegistry) -> Vec<ClassifiedFlow> {
    flows.iter().map(|flow| classify(flow, registry)).collect()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
