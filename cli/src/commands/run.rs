use std::time::{Duration, Instant};

use anyhow::Context;
use chrono::Local;
use colored::*;
use rand::seq::SliceRandom;
use tokio::time;
use tracing::{Instrument, error, info, info_span};

use crate::commands::{ConnectArgs, RunArgs};
use crate::output::ReportWriter;
use crate::terminal::{colors, print};
use crate::mprint;
use mmcollect_common::config::{Config, ControllerConfig};
use mmcollect_common::network::DeviceContext;
use mmcollect_core::diagnosis::DiagnosisService;
use mmcollect_core::report::Report;
use mmcollect_plugins::Script;
use mmcollect_protocols::{Controller, Session};

/// Totals of every round run on one controller.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Tally {
    rounds: u32,
    reviewed: usize,
    anomalies: usize,
    sent: usize,
    failed: usize,
    halted: bool,
}

impl Tally {
    fn record(&mut self, report: &Report) {
        self.rounds += 1;
        self.reviewed += report.reviewed;
        self.anomalies += report.matched_lines.len();
        self.failed += report.failures();
        self.sent += report.results.len() - report.failures();
        self.halted |= report.halt;
    }
}

#[derive(Default)]
struct RunSummary {
    controllers: usize,
    affected: usize,
    sent: usize,
    failed: usize,
    errors: usize,
}

impl RunSummary {
    /// Rounds completed before a failure still count.
    fn record(&mut self, tally: &Tally, failed: bool) {
        if failed {
            self.errors += 1;
        }
        if tally.rounds == 0 {
            return;
        }
        self.controllers += 1;
        if tally.anomalies > 0 {
            self.affected += 1;
        }
        self.sent += tally.sent;
        self.failed += tally.failed;
    }
}

pub async fn run(args: RunArgs, cfg: &Config) -> anyhow::Result<()> {
    let script: Box<dyn Script> = args.script.script();
    let ctrl_cfg: ControllerConfig = controller_config(&args.connect);

    let start_time: Instant = Instant::now();
    let targets: Vec<String> = resolve_targets(&args.connect, &ctrl_cfg).await?;
    if targets.is_empty() {
        print::header("zero controllers to diagnose", cfg.quiet);
        print::no_results("controllers");
        return Ok(());
    }
    info!("Working on a set of {} controllers", targets.len());

    print::header(&format!("running {}", script.kind()), cfg.quiet);

    let service: DiagnosisService = script.service(cfg);
    let writer = ReportWriter::new(cfg.output_prefix.as_deref());
    let mut summary = RunSummary::default();

    for address in &targets {
        let span = info_span!("controller", indicatif.pb_show = true, address = %address);
        let mut tally = Tally::default();
        let watched = watch_controller(address, script.as_ref(), &service, &ctrl_cfg, &writer, cfg, &mut tally)
            .instrument(span)
            .await;

        if let Err(e) = &watched {
            error!("Running against {address}: {e:#}");
        }
        if tally.rounds > 0 {
            print_tally(address, &tally, cfg);
        }
        summary.record(&tally, watched.is_err());
    }

    print_summary(&summary, start_time.elapsed(), cfg);
    Ok(())
}

pub(crate) fn controller_config(args: &ConnectArgs) -> ControllerConfig {
    ControllerConfig {
        username: args.user.clone(),
        password: args.password.clone(),
        timeout: Duration::from_secs(args.timeout),
        verify_tls: args.verify,
    }
}

/// Explicit targets, or the controllers the conductor lists as up, cut down
/// to `--limit`.
pub(crate) async fn resolve_targets(args: &ConnectArgs, ctrl_cfg: &ControllerConfig) -> anyhow::Result<Vec<String>> {
    let targets: Vec<String> = if args.targets.is_empty() {
        info!("Getting the switch list from {}", args.host);
        let conductor = Controller::new(&args.host, ctrl_cfg).context("building the HTTP client")?;
        let session: Session = conductor
            .session()
            .await
            .with_context(|| format!("logging in to conductor {}", args.host))?;
        let switches = session.switches().await;
        let _ = session.close().await;
        switches.with_context(|| format!("listing the controllers of {}", args.host))?
    } else {
        args.targets
            .iter()
            .map(|target| target.trim().to_string())
            .filter(|target| !target.is_empty())
            .collect()
    };

    Ok(limit_targets(targets, args.limit))
}

/// Random subset of `limit` targets. Zero keeps them all, in order.
fn limit_targets(mut targets: Vec<String>, limit: usize) -> Vec<String> {
    if limit == 0 {
        return targets;
    }
    targets.shuffle(&mut rand::rng());
    targets.truncate(limit);
    targets
}

/// Diagnoses one controller, once or every `cfg.every` until it halts or
/// the round limit is reached.
async fn watch_controller(
    address: &str,
    script: &dyn Script,
    service: &DiagnosisService,
    ctrl_cfg: &ControllerConfig,
    writer: &ReportWriter,
    cfg: &Config,
    tally: &mut Tally,
) -> anyhow::Result<()> {
    let controller = Controller::new(address, ctrl_cfg).context("building the HTTP client")?;

    loop {
        let report: Report = diagnose_once(&controller, script, service, cfg.delay).await?;
        writer.write(address, &report.lines())?;
        tally.record(&report);

        if report.halt {
            info!("{address}: halted after round {}", tally.rounds);
            break;
        }
        let Some(every) = cfg.every else {
            break;
        };
        if cfg.rounds != 0 && tally.rounds >= cfg.rounds {
            break;
        }
        time::sleep(every).await;
    }

    Ok(())
}

async fn diagnose_once(
    controller: &Controller,
    script: &dyn Script,
    service: &DiagnosisService,
    delay: Duration,
) -> anyhow::Result<Report> {
    let session: Session = controller
        .session()
        .await
        .with_context(|| format!("logging in to {}", controller.address()))?;

    let report = collect_and_diagnose(&session, script, service, delay).await;
    let _ = session.close().await;
    report
}

async fn collect_and_diagnose(
    session: &Session,
    script: &dyn Script,
    service: &DiagnosisService,
    delay: Duration,
) -> anyhow::Result<Report> {
    let mut outputs = Vec::with_capacity(script.commands().len());
    for (idx, command) in script.commands().iter().enumerate() {
        if idx > 0 && !delay.is_zero() {
            time::sleep(delay).await;
        }
        let output = session
            .show(command)
            .await
            .with_context(|| format!("running `{command}`"))?;
        outputs.push(output);
    }

    let (interfaces, sessions) = script.tables(outputs)?;

    let now = Local::now();
    let device = DeviceContext::new(
        session.controller().address(),
        now.format("%Y-%m-%d").to_string(),
        now.format("%H:%M:%S").to_string(),
    );

    Ok(service.run(&interfaces, &sessions, session, &device).await)
}

fn print_tally(address: &str, tally: &Tally, cfg: &Config) {
    if cfg.quiet > 1 {
        return;
    }
    let anomalies: ColoredString = if tally.anomalies > 0 {
        tally.anomalies.to_string().red().bold()
    } else {
        tally.anomalies.to_string().green()
    };
    let mut details: Vec<(String, ColoredString)> = vec![
        ("Rounds".to_string(), tally.rounds.to_string().normal()),
        ("Flows".to_string(), tally.reviewed.to_string().normal()),
        ("Anomalies".to_string(), anomalies),
    ];
    if tally.sent + tally.failed > 0 {
        details.push((
            "Commands".to_string(),
            format!(
                "{} sent, {} failed",
                tally.sent.to_string().color(colors::SENT),
                tally.failed.to_string().color(colors::FAILED)
            )
            .normal(),
        ));
    }
    if tally.halted {
        details.push(("Halted".to_string(), "yes".yellow()));
    }

    print::tree_head(0, address);
    print::as_tree_one_level(details);
}

fn print_summary(summary: &RunSummary, total_time: Duration, cfg: &Config) {
    let affected: ColoredString = format!("{} controllers affected", summary.affected).bold().red();
    let total_time: ColoredString = format!("{:.2}s", total_time.as_secs_f64()).bold().yellow();
    let output: String = format!(
        "Run complete: {affected} out of {} in {total_time}",
        summary.controllers
    )
    .color(colors::TEXT_DEFAULT)
    .to_string();

    match cfg.quiet {
        0 => {
            print::fat_separator();
            print::centerln(&output);
            let key_width: usize = "Commands failed".len();
            print::aligned_line("Commands sent", summary.sent.to_string(), key_width);
            print::aligned_line("Commands failed", summary.failed.to_string(), key_width);
            print::aligned_line("Unreachable", summary.errors.to_string(), key_width);
            print::end_of_program();
        }
        _ => {
            mprint!();
            info!("{output}");
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

#[cfg(test)]
mod tests {
    use super::*;
    use mmcollect_common::network::{Outcome, RemediationResult};

    fn addresses(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("10.0.0.{i}")).collect()
    }

    #[test]
    fn zero_limit_keeps_every_target_in_order() {
        assert_eq!(limit_targets(addresses(5), 0), addresses(5));
    }

    #[test]
    fn limit_picks_a_subset() {
        let picked = limit_targets(addresses(10), 3);

        assert_eq!(picked.len(), 3);
        assert!(picked.iter().all(|addr| addresses(10).contains(addr)));
    }

    #[test]
    fn limit_above_the_list_keeps_everything() {
        let mut picked = limit_targets(addresses(4), 10);
        picked.sort();

        assert_eq!(picked, addresses(4));
    }

    #[test]
    fn failed_controller_keeps_its_earlier_rounds() {
        let tally = Tally {
            rounds: 2,
            reviewed: 10,
            anomalies: 1,
            sent: 2,
            failed: 1,
            halted: false,
        };
        let mut summary = RunSummary::default();
        summary.record(&tally, true);
        summary.record(&Tally::default(), true);

        assert_eq!(summary.errors, 2);
        assert_eq!(summary.controllers, 1);
        assert_eq!(summary.affected, 1);
        assert_eq!(summary.sent, 2);
        assert_eq!(summary.failed, 1);
    }

    #[test]
    fn tally_adds_up_rounds() {
        let report = Report {
            matched_lines: vec!["a".into(), "b".into()],
            results: vec![
                RemediationResult::new("10.1.1.5", "object/aaa_user_delete", Outcome::Success("ok".into())),
                RemediationResult::new("10.1.1.6", "object/aaa_user_delete", Outcome::Failure("no".into())),
            ],
            parse_errors: Vec::new(),
            reviewed: 7,
            halt: false,
        };
        let mut tally = Tally::default();
        tally.record(&report);
        tally.record(&Report {
            halt: true,
            ..Default::default()
        });

        assert_eq!(
            tally,
            Tally {
                rounds: 2,
                reviewed: 7,
                anomalies: 2,
                sent: 1,
                failed: 1,
                halted: true,
            }
        );
    }
}
