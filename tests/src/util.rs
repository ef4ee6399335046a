use std::collections::BTreeSet;
use std::sync::Mutex;

use async_trait::async_trait;
use mmcollect_common::error::RemoteError;
use mmcollect_common::ingest::Table;
use mmcollect_common::network::DeviceContext;
use mmcollect_common::remote::{Payload, RemoteCommand};

/// One command received by a [`ScriptedRemote`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub config_path: String,
    pub action: String,
    pub payload: Payload,
}

/// Accepts every command and records it, except those whose payload holds
/// one of the `rejected` values.
#[derive(Default)]
pub struct ScriptedRemote {
    calls: Mutex<Vec<Call>>,
    rejected: BTreeSet<String>,
}

impl ScriptedRemote {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rejecting(values: &[&str]) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            rejected: values.iter().map(|v| v.to_string()).collect(),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl RemoteCommand for ScriptedRemote {
    async fn execute(&self, config_path: &str, action: &str, payload: &Payload) -> Result<String, RemoteError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(Call {
                config_path: config_path.to_string(),
                action: action.to_string(),
                payload: payload.clone(),
            });
        }

        match payload.values().find(|value| self.rejected.contains(*value)) {
            Some(value) => Err(RemoteError::Rejected(format!("no entry for {value}"))),
            None => Ok(r#"{"_global_result":{"status":"0","status_str":"success"}}"#.to_string()),
        }
    }
}

pub fn table(lines: &[&str]) -> Table {
    Table::new(lines.iter().map(|line| line.to_string()).collect())
}

pub fn device(address: &str) -> DeviceContext {
    DeviceContext::new(address, "2026-10-17", "10:30:00")
}

/// Interface listing of a controller with one client VLAN (10.1.1.0/24),
/// a management VLAN (172.16.5.0/24) and an uplink in VLAN 3.
pub const INTERFACES: &[&str] = &[
    "Interface                   IP Address / IP Netmask        Admin   Protocol   VRRP-IP",
    "vlan 3                      192.168.0.2 / 255.255.255.0    up      up         Enabled",
    "vlan 20                     10.1.1.1 / 255.255.255.0       up      up         Enabled",
    "vlan 99                     172.16.5.1 / 255.255.255.0     up      up         Enabled",
    "vlan 1                      unassigned / unassigned        up      down       Disabled",
    "loopback                    10.255.0.1 / 255.255.255.255   up      up         ",
];
