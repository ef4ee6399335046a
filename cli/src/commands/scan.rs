use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use colored::*;
use tracing::{debug, info_span, warn};

use crate::terminal::{colors, print};
use crate::mprint;
use mmcollect_common::config::Config;
use mmcollect_common::ingest::Table;
use mmcollect_core::diagnosis::{DiagnosisService, Examination};
use mmcollect_plugins::ScriptKind;

const DUMP_EXTENSION: &str = "log";

/// A dump with local flows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AffectedDump {
    pub path: PathBuf,
    pub prefixes: Vec<String>,
    pub anomalies: usize,
}

pub fn scan(dir: &Path, kind: ScriptKind, cfg: &Config) -> anyhow::Result<()> {
    let span = info_span!("scan", indicatif.pb_show = true);
    let guard = span.enter();

    let service: DiagnosisService = kind.script().service(&Config {
        dry_run: true,
        uplink_vlans: cfg.uplink_vlans.clone(),
        ..Default::default()
    });
    let affected: Vec<AffectedDump> = scan_dir(dir, &service)?;

    drop(guard);

    print::header(&format!("{kind} in {}", dir.display()), cfg.quiet);
    for (idx, dump) in affected.iter().enumerate() {
        print_dump(idx, dump, cfg);
    }
    if cfg.quiet == 0 && !affected.is_empty() {
        mprint!();
    }

    let summary: String = format!("{} controllers affected", affected.len())
        .color(colors::TEXT_DEFAULT)
        .bold()
        .to_string();
    match cfg.quiet {
        0 => {
            print::fat_separator();
            print::centerln(&summary);
        }
        _ => print::print(&summary),
    }
    Ok(())
}

/// Examines every `*.log` file of `dir`, in file name order.
///
/// Each dump holds both the interface and the session listing, so the same
/// table feeds both stages.
pub fn scan_dir(dir: &Path, service: &DiagnosisService) -> anyhow::Result<Vec<AffectedDump>> {
    let mut affected: Vec<AffectedDump> = Vec::new();

    for path in dump_files(dir)? {
        let text: String = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) => {
                warn!("Skipping {}: {e}", path.display());
                continue;
            }
        };

        let table = Table::from_text(&text);
        let Examination {
            registry,
            collected,
            ..
        } = service.examine(&table, &table);
        debug!(
            "{}: reviewed {} flows, found {} anomalies",
            path.display(),
            collected.reviewed,
            collected.matched_lines.len()
        );

        if collected.has_matches() {
            affected.push(AffectedDump {
                path,
                prefixes: registry.local_prefixes().iter().cloned().collect(),
                anomalies: collected.matched_lines.len(),
            });
        }
    }

    Ok(affected)
}

fn dump_files(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).with_context(|| format!("reading directory {}", dir.display()))?;

    let mut files: Vec<PathBuf> = Vec::new();
    for entry in entries {
        let path: PathBuf = entry
            .with_context(|| format!("listing directory {}", dir.display()))?
            .path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == DUMP_EXTENSION) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn print_dump(idx: usize, dump: &AffectedDump, cfg: &Config) {
    let name: String = dump
        .path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| dump.path.display().to_string());

    if cfg.quiet > 1 {
        print::print(&name);
        return;
    }

    print::tree_head(idx, &name);
    print::as_tree_one_level(vec![
        ("Prefixes".to_string(), dump.prefixes.join(", ").color(colors::ADDRESS)),
        ("Anomalies".to_string(), dump.anomalies.to_string().color(colors::FLOW)),
    ]);
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
