//! Investment trend forecast
//!
//! Fits an ordinary least-squares line through a series of closing prices
//! (one per trading day, oldest first) and extends it `horizon_days` past
//! the last sample. No market data is fetched here; callers supply the
//! history, typically from a CSV with a `Close` column.

use std::fmt;
use std::io::Read;

use csv::{ReaderBuilder, Trim};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A linear projection of a price series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    /// Projected value `horizon_days` after the last sample
    pub predicted: f64,
    /// Slope of the fitted line, per day
    pub daily_trend: f64,
    pub horizon_days: u32,
    /// Number of closing prices the line was fitted to
    pub samples: usize,
}

impl fmt::Display for Forecast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "The Oracle predicts a value of around {:.2} in {} days, with an average daily growth trend of {:.2}.",
            self.predicted, self.horizon_days, self.daily_trend
        )
    }
}

/// Project `closes` forward by `horizon_days`
///
/// Needs at least `min_history` samples (and never fewer than two).
pub fn predict(closes: &[f64], horizon_days: u32, min_history: usize) -> Result<Forecast> {
    let required = min_history.max(2);
    if closes.len() < required {
        return Err(Error::InsufficientData(format!(
            "need at least {} closing prices to forge a prediction, got {}",
            required,
            closes.len()
        )));
    }
    if closes.iter().any(|c| !c.is_finite()) {
        return Err(Error::Validation(
            "closing prices must be finite numbers".to_string(),
        ));
    }

    let n = closes.len() as f64;
    let mean_x = (n - 1.0) / 2.0;
    let mean_y = closes.iter().sum::<f64>() / n;

    let (covariance, variance) = closes
        .iter()
        .enumerate()
        .fold((0.0, 0.0), |(cov, var), (i, y)| {
            let dx = i as f64 - mean_x;
            (cov + dx * (y - mean_y), var + dx * dx)
        });

    let slope = covariance / variance;
    let intercept = mean_y - slope * mean_x;
    let target_x = (closes.len() - 1) as f64 + horizon_days as f64;

    Ok(Forecast {
        predicted: slope * target_x + intercept,
        daily_trend: slope,
        horizon_days,
        samples: closes.len(),
    })
}

/// Read closing prices from CSV data with a `Close` column
///
/// Blank cells are skipped.
pub fn read_closes<R: Read>(reader: R) -> Result<Vec<f64>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let column = rdr
        .headers()?
        .iter()
        .position(|h| h.eq_ignore_ascii_case("close"))
        .ok_or_else(|| Error::Import("CSV must contain a Close column".to_string()))?;

    let mut closes = Vec::new();
    for (index, result) in rdr.records().enumerate() {
        let record = result?;
        let raw = record.get(column).unwrap_or("");
        if raw.is_empty() {
            continue;
        }
        let close = raw.replace(['$', ','], "").parse::<f64>().map_err(|_| {
            Error::Import(format!("Line {}: unable to parse close: {}", index + 2, raw))
        })?;
        closes.push(close);
    }

    Ok(closes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_perfect_line() {
        // close = 100 + 2 * day
        let closes: Vec<f64> = (0..10).map(|d| 100.0 + 2.0 * d as f64).collect();
        let forecast = predict(&closes, 30, 10).unwrap();

        assert!(approx(forecast.daily_trend, 2.0));
        // last index 9, plus 30 days
        assert!(approx(forecast.predicted, 100.0 + 2.0 * 39.0));
        assert_eq!(forecast.samples, 10);
    }

    #[test]
    fn test_flat_series() {
        let closes = vec![50.0; 12];
        let forecast = predict(&closes, 7, 10).unwrap();
        assert!(approx(forecast.daily_trend, 0.0));
        assert!(approx(forecast.predicted, 50.0));
    }

    #[test]
    fn test_noisy_series_trend_sign() {
        let closes = [10.0, 9.0, 11.0, 10.5, 12.0, 11.5, 13.0, 12.0, 14.0, 13.5];
        let forecast = predict(&closes, 5, 10).unwrap();
        assert!(forecast.daily_trend > 0.0);
        assert!(forecast.predicted > 13.5);
    }

    #[test]
    fn test_insufficient_history() {
        let err = predict(&[1.0, 2.0, 3.0], 30, 10).unwrap_err();
        assert!(matches!(err, Error::InsufficientData(_)));

        // Never fewer than two points, whatever the configured minimum
        assert!(predict(&[1.0], 30, 0).is_err());
        assert!(predict(&[1.0, 3.0], 1, 0).is_ok());
    }

    #[test]
    fn test_display() {
        let closes: Vec<f64> = (0..10).map(|d| d as f64).collect();
        let text = predict(&closes, 1, 10).unwrap().to_string();
        assert_eq!(
            text,
            "The Oracle predicts a value of around 10.00 in 1 days, with an average daily growth trend of 1.00."
        );
    }

    #[test]
    fn test_read_closes() {
        let csv = "Date,Open,Close\n2024-01-01,1,\"1,010.5\"\n2024-01-02,1,\n2024-01-03,1,$12\n";
        let closes = read_closes(csv.as_bytes()).unwrap();
        assert_eq!(closes, vec![1010.5, 12.0]);
    }

    #[test]
    fn test_read_closes_requires_column() {
        let err = read_closes("Date,Price\n2024-01-01,1\n".as_bytes()).unwrap_err();
        assert!(err.to_string().contains("Close column"));
    }
}
