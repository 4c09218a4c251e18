//! Investment trend forecast command

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use blockledger_core::{forecast, ForecastConfig};

pub fn cmd_forecast(file: &Path, days: Option<u32>, config: &ForecastConfig) -> Result<()> {
    let csv_file =
        File::open(file).with_context(|| format!("Failed to open file: {}", file.display()))?;
    let closes = forecast::read_closes(csv_file)?;

    let horizon = days.unwrap_or(config.default_horizon_days);
    let result = forecast::predict(&closes, horizon, config.min_history)?;

    println!("🔮 {}", result);
    println!("   Based on {} closing prices", result.samples);

    Ok(())
}
