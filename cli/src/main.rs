mod commands;
mod output;
mod terminal;

use std::collections::BTreeSet;
use std::time::Duration;

use commands::{CommandLine, Commands, collect, run, scan, scripts};
use mmcollect_common::config::Config;
use terminal::{logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init_logging();
    print::banner(commands.no_banner, commands.quiet);

    let cfg = Config {
        uplink_vlans: commands
            .uplink_vlans
            .iter()
            .map(|vlan| vlan.trim().to_string())
            .filter(|vlan| !vlan.is_empty())
            .collect::<BTreeSet<String>>(),
        no_banner: commands.no_banner,
        quiet: commands.quiet,
        ..Default::default()
    };

    match commands.command {
        Commands::Scripts => {
            scripts::scripts(&cfg);
            Ok(())
        }
        Commands::Run(args) => {
            let cfg = Config {
                dry_run: args.dry_run,
                delay: Duration::from_secs(args.connect.delay),
                every: args.every.map(Duration::from_secs),
                rounds: args.rounds,
                output_prefix: args.output.clone(),
                ..cfg
            };
            print::header("getting ready", cfg.quiet);
            run::run(args, &cfg).await
        }
        Commands::Collect(args) => {
            print::header("getting ready", cfg.quiet);
            collect::collect(args, &cfg).await
        }
        Commands::Scan { dir, script } => {
            scan::scan(&dir, script, &cfg)
        }
    }
}
