use anyhow::{Context, Result};
use budgetboard_core::BudgetInputs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::state::ensure_budgetboard_home;

pub const DEFAULT_CSV_PATH: &str = "Resources/Personal_Finance_Dataset.csv";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data: DataSection,
    pub budget: BudgetSection,
    pub dashboard: DashboardSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSection {
    /// Transactions CSV; relative paths resolve against the working directory
    pub csv_path: PathBuf,
}

/// Initial values of the dashboard input fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BudgetSection {
    pub income: f64,
    pub needs_pct: f64,
    pub wants_pct: f64,
    pub savings_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardSection {
    /// Label every Nth month under the slider
    pub slider_mark_step: usize,
}

impl Default for DataSection {
    fn default() -> Self {
        Self {
            csv_path: PathBuf::from(DEFAULT_CSV_PATH),
        }
    }
}

impl Default for BudgetSection {
    fn default() -> Self {
        let d = BudgetInputs::default();
        Self {
            income: d.income,
            needs_pct: d.needs_pct,
            wants_pct: d.wants_pct,
            savings_pct: d.savings_pct,
        }
    }
}

impl Default for DashboardSection {
    fn default() -> Self {
        Self { slider_mark_step: 3 }
    }
}

impl BudgetSection {
    pub fn to_inputs(&self) -> BudgetInputs {
        BudgetInputs {
            income: self.income,
            needs_pct: self.needs_pct,
            wants_pct: self.wants_pct,
            savings_pct: self.savings_pct,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_budgetboard_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    load_config_from(&config_path()?)
}

pub fn load_config_from(p: &Path) -> Result<Config> {
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn save_config_to(cfg: &Config, p: &Path) -> Result<()> {
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config_to(&Config::default(), &p)?;
    println!("Wrote {}", p.display());
    Ok(())
}

/// `--csv` flag wins over the config file
pub fn resolve_csv_path(flag: Option<PathBuf>, cfg: &Config) -> PathBuf {
    flag.unwrap_or_else(|| cfg.data.csv_path.clone())
}
