use anyhow::{bail, Context, Result};
use budgetboard_finance::{build_summary, recompute, MonthlySummary, RawBudgetInputs};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

mod config;
mod dashboard;
mod logging;
mod report;
mod state;

use config::Config;

#[derive(Parser, Debug)]
#[command(
    name = "budgetboard",
    version,
    long_version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("BUDGETBOARD_BUILD_SHA"), ")"),
    about = "Personal budget dashboard: needs/wants/savings against your income"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Open the interactive dashboard (gauges + monthly trend)
    Dashboard {
        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        budget: BudgetArgs,
    },

    /// Print the monthly Income/Needs/Wants/Other/Savings table
    Summary {
        #[command(flatten)]
        source: SourceArgs,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Compute one dashboard snapshot without opening the TUI
    Snapshot {
        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        budget: BudgetArgs,

        /// Month position in the summary (default: the most recent month)
        #[arg(long)]
        month_index: Option<usize>,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Manage ~/.budgetboard/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Args, Debug)]
struct SourceArgs {
    /// Transactions CSV (defaults to config data.csv_path)
    #[arg(long)]
    csv: Option<PathBuf>,
}

/// Raw text on purpose: non-numeric values fall back to defaults instead of erroring
#[derive(Args, Debug)]
struct BudgetArgs {
    /// Monthly income
    #[arg(long, allow_hyphen_values = true)]
    income: Option<String>,

    /// Needs share of income, in percent
    #[arg(long, allow_hyphen_values = true)]
    needs_pct: Option<String>,

    /// Wants share of income, in percent
    #[arg(long, allow_hyphen_values = true)]
    wants_pct: Option<String>,

    /// Savings goal as a share of income, in percent
    #[arg(long, allow_hyphen_values = true)]
    savings_pct: Option<String>,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config file if none exists
    Init,
    /// Print the effective config
    Show,
    /// Print the config file path
    Path,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Dashboard { source, budget } => {
            let log_path = logging::init_daily_file()?;
            let cfg = config::load_config()?;
            let summary = load_summary(source, &cfg)?;
            let raw = budget.merge_with(&cfg);
            tracing::info!(log = %log_path.display(), months = summary.len(), "opening dashboard");

            let mut state =
                dashboard::DashboardState::new(&summary, &raw, cfg.dashboard.slider_mark_step);
            dashboard::run_dashboard(&mut state)?;
        }

        Command::Summary { source, json } => {
            logging::init_stderr();
            let cfg = config::load_config()?;
            let summary = load_summary(source, &cfg)?;
            if json {
                println!("{}", serde_json::to_string_pretty(summary.rows())?);
            } else {
                print!("{}", report::summary_table(&summary));
            }
        }

        Command::Snapshot {
            source,
            budget,
            month_index,
            json,
        } => {
            logging::init_stderr();
            let cfg = config::load_config()?;
            let summary = load_summary(source, &cfg)?;
            let inputs = budget.merge_with(&cfg).resolve();
            let index = month_index.unwrap_or_else(|| summary.last_index());
            let snap = recompute(&summary, index, &inputs)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&snap)?);
            } else {
                print!("{}", report::snapshot_text(&snap));
            }
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => {
                let cfg = config::load_config()?;
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
            ConfigCommand::Path => println!("{}", config::config_path()?.display()),
        },
    }

    Ok(())
}

impl BudgetArgs {
    /// Explicit flags win; otherwise the config's starting values are used
    fn merge_with(self, cfg: &Config) -> RawBudgetInputs {
        let from_cfg = RawBudgetInputs::from(&cfg.budget.to_inputs());
        RawBudgetInputs {
            income: self.income.or(from_cfg.income),
            needs_pct: self.needs_pct.or(from_cfg.needs_pct),
            wants_pct: self.wants_pct.or(from_cfg.wants_pct),
            savings_pct: self.savings_pct.or(from_cfg.savings_pct),
        }
    }
}

fn load_summary(source: SourceArgs, cfg: &Config) -> Result<MonthlySummary> {
    let csv_path = config::resolve_csv_path(source.csv, cfg);
    ensure_csv_exists(&csv_path)?;
    build_summary(&csv_path).with_context(|| format!("loading {}", csv_path.display()))
}

fn ensure_csv_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        bail!("CSV not found: {} (pass --csv <path>)", path.display());
    }
    Ok(())
}
