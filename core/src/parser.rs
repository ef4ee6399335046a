//! # Flow Record Parser
//!
//! Extracts source/destination pairs from the datapath session listing.
//! Every session entry starts with its source and destination address:
//!
//! ```text
//! 10.1.1.50   10.1.1.60   6  51234 443  0/0  0 0 1 tunnel 12  1a  ... nh 0x1b3
//! ```

use mmcollect_common::error::FlowParseError;
use mmcollect_common::network::FlowRecord;

/// Text that marks a session forwarded through a next hop.
pub const NEXT_HOP_MARKER: &str = "nh 0x";

/// Decides which lines of the session listing are flow candidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowMarker {
    /// Only lines containing this text.
    Substring(String),
    /// Every non-blank line. For listings already narrowed down on the device.
    Any,
}

impl FlowMarker {
    pub fn next_hop() -> Self {
        FlowMarker::Substring(NEXT_HOP_MARKER.to_string())
    }

    pub fn matches(&self, line: &str) -> bool {
        match self {
            FlowMarker::Substring(marker) => line.contains(marker.as_str()),
            FlowMarker::Any => !line.trim().is_empty(),
        }
    }
}

impl Default for FlowMarker {
    fn default() -> Self {
        Self::next_hop()
    }
}

/// Flows found in a session listing, with the candidate lines that could not
/// be parsed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedFlows {
    pub flows: Vec<FlowRecord>,
    pub errors: Vec<FlowParseError>,
}

/// Parses a single line. `Ok(None)` for lines that are not flow candidates.
pub fn parse_flow(line_number: usize, line: &str, marker: &FlowMarker) -> Result<Option<FlowRecord>, FlowParseError> {
    if !marker.matches(line) {
        return Ok(None);
    }

    let mut tokens = line.split_whitespace();
    match (tokens.next(), tokens.next()) {
        (Some(source), Some(destination)) => Ok(Some(FlowRecord::new(source, destination, line))),
        (first, _) => Err(FlowParseError {
            line_number,
            found: usize::from(first.is_some()),
            line: line.to_string(),
        }),
    }
}

/// Parses a whole listing, keeping input order. A bad line is recorded and
/// parsing goes on with the next one.
pub fn parse_flows<S: AsRef<str>>(lines: &[S], marker: &FlowMarker) -> ParsedFlows {
    let mut parsed = ParsedFlows::default();

    for (idx, line) in lines.iter().enumerate() {
        match parse_flow(idx + 1, line.as_ref(), marker) {
            Ok(Some(flow)) => parsed.flows.push(flow),
            Ok(None) => {}
            Err(e) => parsed.errors.push(e),
        }
    }

    parsed
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
