//! # Remediation Dispatcher
//!
//! Sends the corrective commands for a collected batch. Calls go out one at a
//! time, each awaited before the next, and a failed call is recorded as a
//! [`Outcome::Failure`] without stopping the loop. Nothing is retried.

use mmcollect_common::network::{DeviceContext, Outcome, RemediationResult};
use mmcollect_common::remote::{Payload, RemoteCommand};
use tracing::{info, warn};

use crate::collector::Collected;

pub const USER_DELETE_ACTION: &str = "object/aaa_user_delete";
pub const TAR_LOGS_ACTION: &str = "object/tar_logs";

/// What to do with a batch that has locality matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchPolicy {
    /// One call per affected address, with the address sent under `payload_key`.
    PerAddress {
        config_path: String,
        action: String,
        payload_key: String,
    },
    /// A single diagnostic call on the device if anything matched, and a
    /// request to stop collecting from this device.
    DiagnosticCollection {
        config_path: String,
        action: String,
        payload: Payload,
    },
    /// Send nothing.
    ReportOnly,
}

impl DispatchPolicy {
    /// Drops the user entry of each affected client.
    pub fn user_delete() -> Self {
        DispatchPolicy::PerAddress {
            config_path: "/md".to_string(),
            action: USER_DELETE_ACTION.to_string(),
            payload_key: "ipaddr".to_string(),
        }
    }

    /// Asks the device to bundle its tech-support logs.
    pub fn tech_support_logs() -> Self {
        let mut payload = Payload::new();
        payload.insert("tech-support".to_string(), "true".to_string());
        DispatchPolicy::DiagnosticCollection {
            config_path: "/mm".to_string(),
            action: TAR_LOGS_ACTION.to_string(),
            payload,
        }
    }
}

/// Results in call order, plus whether the device asked to stop collecting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dispatch {
    pub results: Vec<RemediationResult>,
    pub halt: bool,
}

pub async fn dispatch(
    collected: &Collected,
    remote: &dyn RemoteCommand,
    policy: &DispatchPolicy,
    device: &DeviceContext,
) -> Dispatch {
    match policy {
        DispatchPolicy::PerAddress {
            config_path,
            action,
            payload_key,
        } => {
            let mut results: Vec<RemediationResult> = Vec::with_capacity(collected.affected.len());
            for address in &collected.affected {
                let mut payload = Payload::new();
                payload.insert(payload_key.clone(), address.clone());
                let outcome: Outcome = call(remote, config_path, action, &payload, address).await;
                results.push(RemediationResult::new(address.as_str(), action.as_str(), outcome));
            }
            Dispatch { results, halt: false }
        }
        DispatchPolicy::DiagnosticCollection {
            config_path,
            action,
            payload,
        } => {
            if !collected.has_matches() {
                return Dispatch::default();
            }
            info!(
                "{}: local traffic on the uplink at {} {}, collecting diagnostics",
                device.address, device.date, device.time
            );
            let outcome: Outcome = call(remote, config_path, action, payload, &device.address).await;
            Dispatch {
                results: vec![RemediationResult::new(device.address.as_str(), action.as_str(), outcome)],
                halt: true,
            }
        }
        DispatchPolicy::ReportOnly => Dispatch::default(),
    }
}

async fn call(
    remote: &dyn RemoteCommand,
    config_path: &str,
    action: &str,
    payload: &Payload,
    target: &str,
) -> Outcome {
    match remote.execute(config_path, action, payload).await {
        Ok(body) => {
            info!("{action} sent for {target}");
            Outcome::Success(body)
        }
        Err(e) => {
            warn!("{action} failed for {target}: {e}");
            Outcome::Failure(e.to_string())
        }
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
