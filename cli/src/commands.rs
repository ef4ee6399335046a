pub mod collect;
pub mod run;
pub mod scan;
pub mod scripts;

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use mmcollect_common::config::DEFAULT_UPLINK_VLANS;
use mmcollect_plugins::{Script, ScriptKind};

#[derive(Parser)]
#[command(name = "mmcollect")]
#[command(about = "Finds local flows misrouted by controllers and repairs them.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Less output: once hides headers, twice leaves only results
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub quiet: u8,

    /// Do not print the banner
    #[arg(long, global = true)]
    pub no_banner: bool,

    /// VLANs whose interfaces are uplinks and never make a subnet local
    #[arg(long, value_delimiter = ',', default_values = DEFAULT_UPLINK_VLANS, global = true)]
    pub uplink_vlans: Vec<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the available diagnosis scripts
    #[command(alias = "l")]
    Scripts,
    /// Diagnose live controllers through their REST API
    #[command(alias = "r")]
    Run(RunArgs),
    /// Dump show command output of live controllers, for a later scan
    #[command(alias = "c")]
    Collect(CollectArgs),
    /// Scan controller dumps saved as .log files
    #[command(alias = "s")]
    Scan {
        /// Directory holding one <controller>.log file per controller
        #[arg(default_value = "out")]
        dir: PathBuf,
        /// Script whose flow selection applies to the dumps
        #[arg(long, default_value = "wrong-nexthop")]
        script: ScriptKind,
    },
}

/// How to reach the controllers.
#[derive(Args)]
pub struct ConnectArgs {
    /// Address of the conductor listing the controllers
    #[arg(short = 'H', long)]
    pub host: String,

    /// Username to log in with
    #[arg(short, long)]
    pub user: String,

    #[arg(long, env = "MMCOLLECT_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Controllers to work on, instead of every controller up in the conductor
    #[arg(long, value_delimiter = ',')]
    pub targets: Vec<String>,

    /// Work on only this many controllers, picked at random
    #[arg(short, long, default_value_t = 0)]
    pub limit: usize,

    /// Request timeout in seconds
    #[arg(short = 'T', long, default_value_t = 60)]
    pub timeout: u64,

    /// Verify the controllers' HTTPS certificates
    #[arg(short, long)]
    pub verify: bool,

    /// Seconds to wait between show commands
    #[arg(short, long, default_value_t = 0)]
    pub delay: u64,
}

#[derive(Args)]
pub struct RunArgs {
    #[command(flatten)]
    pub connect: ConnectArgs,

    /// Diagnosis to run on every controller
    #[arg(short, long, default_value = "wrong-nexthop")]
    pub script: ScriptKind,

    /// Repeat the diagnosis of each controller every this many seconds
    #[arg(long)]
    pub every: Option<u64>,

    /// Stop repeating after this many rounds (0 = until halted)
    #[arg(long, default_value_t = 0, requires = "every")]
    pub rounds: u32,

    /// Write reports to <OUTPUT><controller>.log instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Report what would be done without sending any command
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Args)]
pub struct CollectArgs {
    #[command(flatten)]
    pub connect: ConnectArgs,

    /// Show commands to dump; defaults to the ones the script needs
    pub commands: Vec<String>,

    /// Script whose show commands are dumped when none are given
    #[arg(short, long, default_value = "wrong-nexthop")]
    pub script: ScriptKind,

    /// Write dumps to <OUTPUT><controller>.log instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl CollectArgs {
    pub fn show_commands(&self) -> Vec<String> {
        if self.commands.is_empty() {
            self.script.script().commands().iter().map(|c| c.to_string()).collect()
        } else {
            self.commands.clone()
        }
    }
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
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
