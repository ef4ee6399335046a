//! # Diagnosis Service
//!
//! Runs the whole pipeline for one controller.
//!
//! The service owns the recipe (uplink VLANs, flow marker, dispatch policy).
//! The remote interface is passed per run because it is bound to a session
//! with a single controller.

use std::collections::BTreeSet;

use mmcollect_common::error::FlowParseError;
use mmcollect_common::ingest::Table;
use mmcollect_common::network::{ClassifiedFlow, DeviceContext, NetworkRegistry};
use mmcollect_common::remote::RemoteCommand;
use tracing::{info, warn};

use crate::classifier;
use crate::collector::{self, Collected};
use crate::dispatcher::{self, Dispatch, DispatchPolicy};
use crate::parser::{self, FlowMarker, ParsedFlows};
use crate::registry;
use crate::report::{self, Report};

/// Everything learnt from the tables, before any remote call.
#[derive(Debug, Clone)]
pub struct Examination {
    pub registry: NetworkRegistry,
    pub collected: Collected,
    pub parse_errors: Vec<FlowParseError>,
}

pub struct DiagnosisService {
    uplink_vlans: BTreeSet<String>,
    marker: FlowMarker,
    policy: DispatchPolicy,
}

impl DiagnosisService {
    pub fn new(uplink_vlans: BTreeSet<String>, marker: FlowMarker, policy: DispatchPolicy) -> Self {
        Self {
            uplink_vlans,
            marker,
            policy,
        }
    }

    pub fn policy(&self) -> &DispatchPolicy {
        &self.policy
    }

    /// Builds the registry, then parses, classifies and collects the flows.
    ///
    /// `interfaces` and `sessions` may be the same table when both listings
    /// were dumped together; each stage only picks the lines it recognizes.
    pub fn examine(&self, interfaces: &Table, sessions: &Table) -> Examination {
        let registry: NetworkRegistry = registry::build_registry(interfaces.lines(), &self.uplink_vlans);

        let ParsedFlows { flows, errors } = parser::parse_flows(sessions.lines(), &self.marker);
        for e in &errors {
            warn!("Skipping session entry, {e}");
        }

        let classified: Vec<ClassifiedFlow> = classifier::classify_all(&flows, &registry);
        let collected: Collected = collector::collect(&classified);

        Examination {
            registry,
            collected,
            parse_errors: errors,
        }
    }

    /// Full round: examine, remediate, report.
    pub async fn run(
        &self,
        interfaces: &Table,
        sessions: &Table,
        remote: &dyn RemoteCommand,
        device: &DeviceContext,
    ) -> Report {
        let Examination {
            collected,
            parse_errors,
            ..
        } = self.examine(interfaces, sessions);

        info!(
            "{}: reviewed {} flows, found {} anomalies",
            device.address,
            collected.reviewed,
            collected.matched_lines.len()
        );

        let dispatch: Dispatch = dispatcher::dispatch(&collected, remote, &self.policy, device).await;
        report::assemble(collected, dispatch, parse_errors)
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
