//! # Report Assembler

use mmcollect_common::error::FlowParseError;
use mmcollect_common::network::RemediationResult;

use crate::collector::Collected;
use crate::dispatcher::Dispatch;

/// Outcome of one diagnosis round on one controller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    /// Raw lines of the local flows, in input order.
    pub matched_lines: Vec<String>,
    /// Remediation results, in dispatch order.
    pub results: Vec<RemediationResult>,
    /// Candidate session lines that could not be parsed.
    pub parse_errors: Vec<FlowParseError>,
    /// Flows examined.
    pub reviewed: usize,
    /// The device asked to stop collecting for this run.
    pub halt: bool,
}

impl Report {
    /// Matched lines followed by one status line per result.
    pub fn lines(&self) -> Vec<String> {
        self.matched_lines
            .iter()
            .cloned()
            .chain(self.results.iter().map(RemediationResult::to_string))
            .collect()
    }

    pub fn is_affected(&self) -> bool {
        !self.matched_lines.is_empty()
    }

    pub fn failures(&self) -> usize {
        self.results.iter().filter(|r| !r.outcome.is_success()).count()
    }
}

pub fn assemble(collected: Collected, dispatch: Dispatch, parse_errors: Vec<FlowParseError>) -> Report {
    Report {
        matched_lines: collected.matched_lines,
        results: dispatch.results,
        parse_errors,
        reviewed: collected.reviewed,
        halt: dispatch.halt,
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
