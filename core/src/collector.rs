//! # Affected-Entity Collector
//!
//! Folds a classified batch into the lines to report and the set of addresses
//! to remediate. The set is ordered, so the dispatch order is the
//! lexicographic order of the addresses whatever order the flows came in.

use std::collections::BTreeSet;

use mmcollect_common::network::ClassifiedFlow;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Collected {
    /// Raw lines of the local flows, in input order.
    pub matched_lines: Vec<String>,
    /// External endpoints of the local flows, deduplicated.
    pub affected: BTreeSet<String>,
    /// Number of flows that were examined.
    pub reviewed: usize,
}

impl Collected {
    pub fn has_matches(&self) -> bool {
        !self.matched_lines.is_empty()
    }
}

pub fn collect(classified: &[ClassifiedFlow]) -> Collected {
    let local: Vec<&ClassifiedFlow> = classified.iter().filter(|flow| flow.is_local).collect();

    let matched_lines: Vec<String> = local
        .iter()
        .map(|flow| flow.flow.raw_line.clone())
        .collect();

    let affected: BTreeSet<String> = local
        .iter()
        .flat_map(|flow| flow.external_endpoints.iter().cloned())
        .collect();

    Collected {
        matched_lines,
        affected,
        reviewed: classified.len(),
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
