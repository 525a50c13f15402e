//! The `t2s` command line.
//!
//! - `t2s check <root>` builds the scenario tree and reports what it found.
//!   Every script is parsed, so any initiation error fails here.
//! - `t2s run --dry-run <root>` runs the suite against [`DryRunPage`].

pub mod dry_run;

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use serde::Serialize;
use t2s_kernel::{RunSummary, Suite, SuiteConfig};
use t2s_types::JournalEntry;

pub use dry_run::DryRunPage;

#[derive(Parser, Debug)]
#[command(name = "t2s", version)]
#[command(about = "Run line-oriented browser check scripts")]
pub struct Cli {
    /// Use this config file instead of <root>/t2s.toml or the user config
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Print machine-readable JSON on stdout
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Parse every script and print the scenario tree
    Check {
        /// Suite root directory
        root: PathBuf,
    },
    /// Execute the suite
    Run {
        /// Suite root directory
        root: PathBuf,

        /// Run against a driver that simulates every element
        #[arg(long)]
        dry_run: bool,

        /// Exit non-zero on any severe journal entry, not only aborted tests
        #[arg(long)]
        strict: bool,
    },
}

/// One scenario as reported by `check`.
#[derive(Debug, Serialize)]
pub struct ScenarioReport {
    pub name: String,
    pub tests: Vec<String>,
    pub methods: Vec<String>,
    pub compare_strings: Vec<String>,
}

#[derive(Debug, Serialize)]
struct RunReport<'a> {
    summary: RunSummary,
    journal: &'a [JournalEntry],
}

pub fn run(cli: Cli) -> Result<ExitCode> {
    match &cli.command {
        Command::Check { root } => {
            let suite = open(root, cli.config.as_deref(), true)?;
            let report = check_report(&suite);
            let mut out = io::stdout().lock();
            if cli.json {
                serde_json::to_writer_pretty(&mut out, &report)?;
                writeln!(out)?;
            } else {
                write_check_report(&mut out, &report)?;
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Run {
            root,
            dry_run,
            strict,
        } => {
            if !dry_run {
                bail!("no browser driver is built in; pass --dry-run to simulate the page");
            }
            let suite = open(root, cli.config.as_deref(), false)?;
            let (summary, journal) = suite.run(DryRunPage::new());

            let mut out = io::stdout().lock();
            if cli.json {
                let report = RunReport {
                    summary,
                    journal: journal.entries(),
                };
                serde_json::to_writer_pretty(&mut out, &report)?;
                writeln!(out)?;
            } else {
                writeln!(
                    out,
                    "{} scenarios, {} tests, {} aborted, {} severe",
                    summary.scenarios, summary.tests, summary.aborted, summary.severe
                )?;
            }
            Ok(exit_code(&summary, *strict))
        }
    }
}

fn open(root: &Path, config: Option<&Path>, read_only: bool) -> Result<Suite> {
    let config = match config {
        Some(path) => SuiteConfig::from_file(path)?,
        None => SuiteConfig::load(root)?,
    };
    let suite = if read_only {
        Suite::open_read_only(root, config)
    } else {
        Suite::open_with_config(root, config)
    };
    suite.with_context(|| format!("failed to load suite at {}", root.display()))
}

/// Aborted tests always fail the run; severe entries only with `strict`.
pub fn exit_code(summary: &RunSummary, strict: bool) -> ExitCode {
    if summary.aborted > 0 || (strict && summary.severe > 0) {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

pub fn check_report(suite: &Suite) -> Vec<ScenarioReport> {
    let tree = suite.tree();
    tree.scenarios()
        .iter()
        .map(|scenario| ScenarioReport {
            name: scenario.name(),
            tests: scenario.tests.iter().map(|t| t.name.clone()).collect(),
            methods: owned(tree.methods().local_names(scenario.id)),
            compare_strings: owned(tree.compare_strings().local_names(scenario.id)),
        })
        .collect()
}

fn owned(names: Vec<&str>) -> Vec<String> {
    names.into_iter().map(str::to_string).collect()
}

fn write_check_report(out: &mut impl Write, report: &[ScenarioReport]) -> io::Result<()> {
    let total: usize = report.iter().map(|s| s.tests.len()).sum();
    for scenario in report {
        writeln!(out, "{}", scenario.name)?;
        if !scenario.tests.is_empty() {
            writeln!(out, "  tests: {}", scenario.tests.join(", "))?;
        }
        if !scenario.methods.is_empty() {
            writeln!(out, "  methods: {}", scenario.methods.join(", "))?;
        }
        if !scenario.compare_strings.is_empty() {
            writeln!(out, "  compare strings: {}", scenario.compare_strings.join(", "))?;
        }
    }
    writeln!(out, "{} scenarios, {total} tests", report.len())
}
