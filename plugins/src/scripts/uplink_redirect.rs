//! Local traffic being sent to the uplink.
//!
//! The uplink session listing only holds sessions already steered to the
//! uplink, so every line is a candidate. A single local match is enough: the
//! controller is asked for a tech-support log bundle and monitoring of that
//! controller stops, since the logs are what is needed to chase the issue.
//!
//! The listing opens with a banner and a column header (`SIDX ...`) followed
//! by a dashed rule. Those lines are dropped before parsing.

use mmcollect_common::ingest::Table;
use mmcollect_core::dispatcher::DispatchPolicy;
use mmcollect_core::parser::FlowMarker;

use super::SHOW_INTERFACES;
use crate::{Script, ScriptKind};

const COLUMN_HEADER: &str = "SIDX";

pub struct UplinkRedirect;

impl Script for UplinkRedirect {
    fn kind(&self) -> ScriptKind {
        ScriptKind::UplinkRedirect
    }

    fn description(&self) -> &'static str {
        "Collect tech-support logs when local traffic is sent to the uplink"
    }

    fn commands(&self) -> &'static [&'static str] {
        &[SHOW_INTERFACES, "show datapath session uplink"]
    }

    fn marker(&self) -> FlowMarker {
        FlowMarker::Any
    }

    fn policy(&self) -> DispatchPolicy {
        DispatchPolicy::tech_support_logs()
    }

    /// Lines after the column header, rules excluded. A listing without the
    /// header is kept whole.
    fn sessions(&self, table: Table) -> Table {
        let lines: &[String] = table.lines();
        let Some(header) = lines.iter().position(|line| line.contains(COLUMN_HEADER)) else {
            return table;
        };
        Table::new(
            lines[header + 1..]
                .iter()
                .filter(|line| !is_rule(line))
                .cloned()
                .collect(),
        )
    }
}

fn is_rule(line: &str) -> bool {
    let line = line.trim();
    !line.is_empty() && line.chars().all(|c| c == '-' || c.is_whitespace())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
