use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

pub fn budgetboard_home() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".budgetboard"))
}

pub fn ensure_budgetboard_home() -> Result<PathBuf> {
    let dir = budgetboard_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

pub fn logs_dir() -> Result<PathBuf> {
    let dir = ensure_budgetboard_home()?.join("logs");
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}
