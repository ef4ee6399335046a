//! Where controller reports end up.

use std::ffi::OsString;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use colored::*;

use crate::terminal::{colors, print};

pub enum ReportWriter {
    /// Report lines on stdout, each report labelled with its controller.
    Stdout,
    /// One `<prefix><address>.log` file per controller, appended to.
    Files { prefix: PathBuf },
}

impl ReportWriter {
    pub fn new(output_prefix: Option<&Path>) -> Self {
        match output_prefix {
            Some(prefix) => ReportWriter::Files {
                prefix: prefix.to_path_buf(),
            },
            None => ReportWriter::Stdout,
        }
    }

    /// File receiving the reports of `address`, if reports go to files.
    pub fn path_for(&self, address: &str) -> Option<PathBuf> {
        match self {
            ReportWriter::Stdout => None,
            ReportWriter::Files { prefix } => {
                let mut name: OsString = prefix.clone().into_os_string();
                name.push(format!("{address}.log"));
                Some(PathBuf::from(name))
            }
        }
    }

    /// Empty reports are not written.
    pub fn write(&self, address: &str, lines: &[String]) -> anyhow::Result<()> {
        if lines.is_empty() {
            return Ok(());
        }

        let label: String = format!("*** Controller {}", address.color(colors::ADDRESS));

        match self.path_for(address) {
            None => {
                print::print(&label);
                let mut stdout = io::stdout().lock();
                write_lines(&mut stdout, lines).context("writing report to stdout")?;
            }
            Some(path) => {
                print::print(&format!("{label} [ {} ]", path.display()));
                append_lines(&path, lines)
                    .with_context(|| format!("writing report to {}", path.display()))?;
            }
        }
        Ok(())
    }
}

fn append_lines(path: &Path, lines: &[String]) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    write_lines(&mut file, lines)
}

fn write_lines<W: Write>(w: &mut W, lines: &[String]) -> io::Result<()> {
    for line in lines {
        writeln!(w, "{line}")?;
    }
    w.flush()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
