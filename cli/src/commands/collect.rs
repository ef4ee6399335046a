use std::time::{Duration, Instant};

use anyhow::Context;
use colored::*;
use serde_json::Value;
use tokio::time;
use tracing::{Instrument, error, info, info_span, warn};

use crate::commands::CollectArgs;
use crate::commands::run::{controller_config, resolve_targets};
use crate::output::ReportWriter;
use crate::terminal::{colors, print};
use mmcollect_common::config::{Config, ControllerConfig};
use mmcollect_common::ingest::Table;
use mmcollect_protocols::{Controller, Session};

/// Dumps the output of show commands from every target, one
/// `<prefix><address>.log` per controller, ready for `scan`.
pub async fn collect(args: CollectArgs, cfg: &Config) -> anyhow::Result<()> {
    let commands: Vec<String> = args.show_commands();
    let ctrl_cfg: ControllerConfig = controller_config(&args.connect);
    let delay = Duration::from_secs(args.connect.delay);

    let start_time: Instant = Instant::now();
    let targets: Vec<String> = resolve_targets(&args.connect, &ctrl_cfg).await?;
    if targets.is_empty() {
        print::header("zero controllers to collect from", cfg.quiet);
        print::no_results("controllers");
        return Ok(());
    }
    info!("Collecting {} commands from {} controllers", commands.len(), targets.len());

    let writer = ReportWriter::new(args.output.as_deref());
    let mut dumped: usize = 0;

    for address in &targets {
        let span = info_span!("controller", indicatif.pb_show = true, address = %address);
        let result = async {
            let controller = Controller::new(address, &ctrl_cfg).context("building the HTTP client")?;
            let lines: Vec<String> = dump_controller(&controller, &commands, delay).await?;
            writer.write(address, &lines)
        }
        .instrument(span)
        .await;

        match result {
            Ok(()) => dumped += 1,
            Err(e) => error!("Collecting from {address}: {e:#}"),
        }
    }

    let total_time: ColoredString = format!("{:.2}s", start_time.elapsed().as_secs_f64()).bold().yellow();
    let summary: String = format!(
        "Collection complete: {} out of {} controllers dumped in {total_time}",
        dumped.to_string().green().bold(),
        targets.len()
    )
    .color(colors::TEXT_DEFAULT)
    .to_string();
    match cfg.quiet {
        0 => {
            print::fat_separator();
            print::centerln(&summary);
        }
        _ => info!("{summary}"),
    }
    Ok(())
}

/// Runs `commands` in one session and returns their output lines, in order.
pub async fn dump_controller(
    controller: &Controller,
    commands: &[String],
    delay: Duration,
) -> anyhow::Result<Vec<String>> {
    let session: Session = controller
        .session()
        .await
        .with_context(|| format!("logging in to {}", controller.address()))?;

    let lines = dump_commands(&session, commands, delay).await;
    let _ = session.close().await;
    lines
}

async fn dump_commands(session: &Session, commands: &[String], delay: Duration) -> anyhow::Result<Vec<String>> {
    let mut lines: Vec<String> = Vec::new();
    for (idx, command) in commands.iter().enumerate() {
        if idx > 0 && !delay.is_zero() {
            time::sleep(delay).await;
        }
        let output: Value = session
            .show(command)
            .await
            .with_context(|| format!("running `{command}`"))?;
        lines.extend(output_lines(command, output));
    }
    Ok(lines)
}

/// Line tables as they are; anything else as its JSON text.
fn output_lines(command: &str, output: Value) -> Vec<String> {
    match Table::from_value(output.clone()) {
        Ok(table) => table.lines().to_vec(),
        Err(e) => {
            warn!("`{command}` is not a line listing ({e}), dumping it as JSON");
            vec![output.to_string()]
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
