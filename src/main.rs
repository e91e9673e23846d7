mod config;
mod scrape;
mod structs;

use crate::config::Settings;
use chrono::Datelike;
use log::info;
use std::error::Error;
use std::fs;
use std::path::PathBuf;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let settings = Settings::load()?;
    run(&settings).await
}

/// Builds next year's snapshot unless it already exists. Safe to invoke from
/// a scheduled trigger: once the file is on disk, re-runs are no-ops.
async fn run(settings: &Settings) -> Result<(), Box<dyn Error>> {
    let year = settings
        .year
        .unwrap_or_else(|| chrono::Local::now().year() + 1);
    info!("target year: {year}");

    let out_path =
        PathBuf::from(&settings.out_dir).join(format!("{year}_ephemeris_with_signs.json"));
    if out_path.exists() {
        info!("{} already exists, nothing to do", out_path.display());
        return Ok(());
    }

    let snapshot = scrape::build_year(settings, year).await?;
    if snapshot.is_empty() {
        return Err("no data generated; aborting".into());
    }

    fs::create_dir_all(&settings.out_dir)?;
    fs::write(&out_path, serde_json::to_string_pretty(&snapshot)?)?;
    info!("saved {}", out_path.display());
    Ok(())
}
