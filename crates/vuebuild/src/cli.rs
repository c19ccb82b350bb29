//! Command-line entry points.

use std::io::{self, Write};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use crate::app::build::{BuildOptions, Builder, Trigger};
use crate::app::watch::WatchSession;
use crate::infra::config::{self, Config};
use crate::infra::fs::WalkLister;

#[derive(Debug, Parser)]
#[command(
    name = "vuebuild",
    author,
    version,
    about = "Assemble single-file Vue components from side-by-side fragments",
    long_about = None
)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Assemble every complete component once
    Build {
        #[command(flatten)]
        target: TargetArgs,
        /// Print the artifacts instead of writing them
        #[arg(long, conflicts_with = "json")]
        dry_run: bool,
        /// Print the run report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Assemble, then rebuild whenever files under the root change
    Watch {
        #[command(flatten)]
        target: TargetArgs,
        #[arg(long)]
        debounce_ms: Option<u64>,
    },
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Debug, Args)]
pub struct TargetArgs {
    /// Directory to scan, absolute or relative to the repository root
    #[arg(long)]
    pub root: Option<String>,
    /// Collapse `Name/Name.vue.*` fragments into a sibling `Name.vue`
    #[arg(long)]
    pub folder: bool,
}

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Build {
            target,
            dry_run,
            json,
        } => {
            let (builder, _) = prepare(&target)?;
            if dry_run {
                return print_plan(&builder);
            }
            let report = builder.run(Trigger::Build)?;
            if json {
                let rendered =
                    serde_json::to_string_pretty(&report).context("failed to serialize report")?;
                println!("{rendered}");
            }
            Ok(())
        }
        Commands::Watch {
            target,
            debounce_ms,
        } => {
            let (builder, config) = prepare(&target)?;
            let debounce = Duration::from_millis(debounce_ms.unwrap_or(config.watch.debounce_ms));
            WatchSession::new(builder, debounce).run()
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "vuebuild", &mut io::stdout());
            Ok(())
        }
    }
}

fn prepare(target: &TargetArgs) -> Result<(Builder, Config)> {
    let anchor = config::anchor()?;
    let config = Config::load(&anchor)?;
    let root = target.root.as_deref().unwrap_or(&config.build.root);
    let options = BuildOptions::resolve(root, target.folder || config.build.folder, &anchor);
    let lister = WalkLister::new().with_excludes(&config.ignore.globs)?;
    Ok((Builder::new(options, lister), config))
}

fn print_plan(builder: &Builder) -> Result<()> {
    let plan = builder.plan()?;
    let mut stdout = io::stdout().lock();
    for artifact in plan {
        writeln!(stdout, "==> {}", artifact.path.display())?;
        write!(stdout, "{}", artifact.content)?;
    }
    Ok(())
}
