//! # Diagnosis Scripts
//!
//! A script names the show commands to collect from a controller and how the
//! pipeline should treat their output: which session lines are flows and what
//! to do when local flows are found.

use std::fmt;
use std::str::FromStr;

use anyhow::Context;
use mmcollect_common::config::Config;
use mmcollect_common::ingest::Table;
use mmcollect_core::diagnosis::DiagnosisService;
use mmcollect_core::dispatcher::DispatchPolicy;
use mmcollect_core::parser::FlowMarker;
use serde_json::Value;

pub mod scripts;

pub use scripts::uplink_redirect::UplinkRedirect;
pub use scripts::wrong_nexthop::WrongNextHop;

pub trait Script: Send + Sync {
    fn kind(&self) -> ScriptKind;

    /// One-line summary for the command line help.
    fn description(&self) -> &'static str;

    /// Show commands to collect, in order: interface listing first, then the
    /// session listing.
    fn commands(&self) -> &'static [&'static str];

    fn marker(&self) -> FlowMarker;

    fn policy(&self) -> DispatchPolicy;

    /// Session listing as handed to the flow parser.
    fn sessions(&self, table: Table) -> Table {
        table
    }

    /// Pipeline configured for this script. A dry run never sends anything.
    fn service(&self, cfg: &Config) -> DiagnosisService {
        let policy: DispatchPolicy = if cfg.dry_run {
            DispatchPolicy::ReportOnly
        } else {
            self.policy()
        };
        DiagnosisService::new(cfg.uplink_vlans.clone(), self.marker(), policy)
    }

    /// Normalizes the collected outputs into the interface and session tables.
    fn tables(&self, outputs: Vec<Value>) -> anyhow::Result<(Table, Table)> {
        let mut outputs = outputs.into_iter();
        let command = |idx: usize| self.commands().get(idx).copied().unwrap_or("?");

        let interfaces = Table::from_value(outputs.next().unwrap_or(Value::Null))
            .with_context(|| format!("reading output of `{}`", command(0)))?;
        let sessions = Table::from_value(outputs.next().unwrap_or(Value::Null))
            .with_context(|| format!("reading output of `{}`", command(1)))?;

        Ok((interfaces, self.sessions(sessions)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptKind {
    WrongNextHop,
    UplinkRedirect,
}

impl ScriptKind {
    pub const ALL: [ScriptKind; 2] = [ScriptKind::WrongNextHop, ScriptKind::UplinkRedirect];

    pub fn name(&self) -> &'static str {
        match self {
            ScriptKind::WrongNextHop => "wrong-nexthop",
            ScriptKind::UplinkRedirect => "uplink-redirect",
        }
    }

    pub fn script(&self) -> Box<dyn Script> {
        match self {
            ScriptKind::WrongNextHop => Box::new(WrongNextHop),
            ScriptKind::UplinkRedirect => Box::new(UplinkRedirect),
        }
    }
}

impl fmt::Display for ScriptKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ScriptKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        ScriptKind::ALL
            .into_iter()
            .find(|kind| kind.name() == lower)
            .ok_or_else(|| {
                let known: Vec<&str> = ScriptKind::ALL.iter().map(ScriptKind::name).collect();
                format!("unknown script '{s}', expected one of: {}", known.join(", "))
            })
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
