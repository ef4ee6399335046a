use std::collections::BTreeSet;
use std::path::PathBuf;
use std::time::Duration;

/// VLANs used as trunk/backbone uplinks on the controllers.
pub const DEFAULT_UPLINK_VLANS: &[&str] = &["3", "4094"];

pub struct Config {
    /// Interfaces in these VLANs never make a subnet local.
    pub uplink_vlans: BTreeSet<String>,
    /// Diagnose and report, but do not send any corrective command.
    pub dry_run: bool,
    /// Waiting time between consecutive show commands on a controller.
    pub delay: Duration,
    /// Repeat the diagnosis of each controller with this period, until the
    /// controller raises the halt signal or `rounds` is reached.
    pub every: Option<Duration>,
    /// Upper bound on repetitions when `every` is set. Zero means unbounded.
    pub rounds: u32,
    /// Write each controller's report to `<prefix><address>.log` instead of stdout.
    pub output_prefix: Option<PathBuf>,
    pub no_banner: bool,
    /// 0 prints everything, 1 skips headers, 2 only prints results.
    pub quiet: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            uplink_vlans: default_uplink_vlans(),
            dry_run: false,
            delay: Duration::ZERO,
            every: None,
            rounds: 0,
            output_prefix: None,
            no_banner: false,
            quiet: 0,
        }
    }
}

pub fn default_uplink_vlans() -> BTreeSet<String> {
    DEFAULT_UPLINK_VLANS.iter().map(|vlan| vlan.to_string()).collect()
}

/// How to reach a controller's REST API.
#[derive(Clone)]
pub struct ControllerConfig {
    pub username: String,
    pub password: String,
    pub timeout: Duration,
    /// Check the controller's HTTPS certificate.
    pub verify_tls: bool,
}

impl std::fmt::Debug for ControllerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ControllerConfig")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("timeout", &self.timeout)
            .field("verify_tls", &self.verify_tls)
            .finish()
    }
}
