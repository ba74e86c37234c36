//! CLI Adapter.

mod progress;

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::app::api::{self, ProvisionOptions, ProvisionOutcome};
use crate::domain::AppError;
use progress::ConsoleObserver;

const LOG_ENV: &str = "RIGUP_LOG";

#[derive(Parser)]
#[command(name = "rigup")]
#[command(version)]
#[command(
    about = "Provision a developer workstation: vim, neovim, tmux, powerline and gdb",
    long_about = None
)]
struct Cli {
    /// Run only the named step
    #[arg(long, value_name = "STEP", conflicts_with = "neovim_only")]
    only: Option<String>,
    /// Run only the neovim step
    #[arg(long, conflicts_with = "only")]
    neovim_only: bool,
    /// Directory holding the dotfiles to install (defaults to the bundled set)
    #[arg(long, value_name = "DIR")]
    dist_root: Option<PathBuf>,
    /// Home directory to provision (defaults to $HOME)
    #[arg(long, value_name = "DIR")]
    home: Option<PathBuf>,
    /// Configuration file to load
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// List the available steps and exit
    #[arg(long, conflicts_with_all = ["only", "neovim_only", "dry_run"])]
    list: bool,
    /// Show the actions that would run without executing them
    #[arg(long)]
    dry_run: bool,
    /// Log progress details to stderr
    #[arg(short, long)]
    verbose: bool,
}

/// Entry point for the CLI.
pub fn run() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = if cli.list { run_list(cli.config) } else { run_provision(cli) };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn run_list(config: Option<PathBuf>) -> Result<(), AppError> {
    let steps = api::list_steps(config.as_deref())?;
    let width = steps.iter().map(|step| step.name.len()).max().unwrap_or(0);

    println!("Available steps (in run order):");
    for step in steps {
        println!(
            "  {:<width$}  {} ({} actions)",
            step.name,
            step.summary,
            step.action_count,
            width = width
        );
    }
    Ok(())
}

fn run_provision(cli: Cli) -> Result<(), AppError> {
    let options = ProvisionOptions {
        only: cli.only,
        neovim_only: cli.neovim_only,
        dist_root: cli.dist_root,
        home: cli.home,
        config: cli.config,
        dry_run: cli.dry_run,
    };

    match api::provision(&options, &mut ConsoleObserver)? {
        ProvisionOutcome::Planned(steps) => {
            println!("Dry run: {} step(s) would run", steps.len());
            for step in steps {
                println!("==> {}", step.name);
                for action in step.actions {
                    println!("  • {}", action);
                }
            }
        }
        ProvisionOutcome::Completed(report) => {
            println!("✅ Provisioned {} step(s)", report.steps.len());
        }
    }
    Ok(())
}
