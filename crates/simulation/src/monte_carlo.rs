//! Monte-Carlo outlook for a position.
//!
//! Each run walks a daily geometric Brownian motion path over the position's
//! horizon. The last price of the path becomes the future price and the
//! number of days spent outside the range becomes the out-of-range count,
//! then the usual position math decides the outcome.

use crate::price_path::{GeometricBrownianMotion, PricePathGenerator};
use btb_calc_domain::metrics::fees::DAYS_PER_YEAR;
use btb_calc_domain::{PositionParameters, Recommendation, compute};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Configuration for an outlook run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutlookConfig {
    /// Number of simulated paths.
    pub iterations: usize,
    /// Annualized drift (mu).
    pub drift: f64,
    /// Annualized volatility (sigma).
    pub volatility: f64,
    /// Seed for reproducible runs.
    pub seed: Option<u64>,
}

impl Default for OutlookConfig {
    fn default() -> Self {
        Self {
            iterations: 1000,
            drift: 0.0,
            volatility: 0.8,
            seed: None,
        }
    }
}

impl OutlookConfig {
    #[must_use]
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    #[must_use]
    pub fn with_drift(mut self, drift: f64) -> Self {
        self.drift = drift;
        self
    }

    #[must_use]
    pub fn with_volatility(mut self, volatility: f64) -> Self {
        self.volatility = volatility;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Outcome of one simulated path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathOutcome {
    pub final_price: f64,
    pub days_out_of_range: u32,
    pub impermanent_loss_percent: f64,
    pub pnl_after_yield_dollars: f64,
    pub recommendation: Recommendation,
}

/// Aggregated outlook statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutlookSummary {
    pub config: OutlookConfig,
    pub iterations: usize,
    /// Paths whose PnL was a finite number.
    pub valid_paths: usize,
    pub mean_final_price: f64,
    pub mean_pnl: f64,
    pub median_pnl: f64,
    /// 5th percentile of the PnL distribution.
    pub var_95_pnl: f64,
    pub mean_il_percent: f64,
    pub mean_days_out_of_range: f64,
    /// Fraction of paths where providing liquidity came out ahead.
    pub lp_win_rate: f64,
}

/// Runs the outlook for `params` over `params.days_in_future` daily steps.
pub fn run_outlook(params: &PositionParameters, config: &OutlookConfig) -> OutlookSummary {
    info!(
        iterations = config.iterations,
        volatility = config.volatility,
        drift = config.drift,
        days = params.days_in_future,
        "Running Monte-Carlo outlook"
    );

    let mut gbm = GeometricBrownianMotion::new(
        params.initial_price,
        config.drift,
        config.volatility,
        1.0 / DAYS_PER_YEAR,
    );
    if let Some(seed) = config.seed {
        gbm = gbm.with_seed(seed);
    }

    let steps = params.days_in_future as usize;
    let outcomes: Vec<PathOutcome> = (0..config.iterations)
        .map(|_| evaluate_path(params, &gbm.generate(steps)))
        .collect();

    let summary = aggregate(config, &outcomes);
    debug!(
        valid_paths = summary.valid_paths,
        mean_pnl = summary.mean_pnl,
        lp_win_rate = summary.lp_win_rate,
        "Outlook complete"
    );
    summary
}

/// Evaluates a single path that starts at the entry price.
pub fn evaluate_path(params: &PositionParameters, path: &[f64]) -> PathOutcome {
    let range = params.range();
    let final_price = path.last().copied().unwrap_or(params.initial_price);
    let days_out_of_range = path
        .iter()
        .skip(1)
        .filter(|price| !range.contains(**price))
        .count() as u32;

    let derived = compute(&PositionParameters {
        future_price: final_price,
        days_out_of_range,
        ..*params
    });

    PathOutcome {
        final_price,
        days_out_of_range,
        impermanent_loss_percent: derived.impermanent_loss_percent,
        pnl_after_yield_dollars: derived.pnl_after_yield_dollars,
        recommendation: derived.recommendation,
    }
}

fn aggregate(config: &OutlookConfig, outcomes: &[PathOutcome]) -> OutlookSummary {
    let valid: Vec<&PathOutcome> = outcomes
        .iter()
        .filter(|o| o.pnl_after_yield_dollars.is_finite())
        .collect();

    let mut pnls: Vec<f64> = valid.iter().map(|o| o.pnl_after_yield_dollars).collect();
    pnls.sort_by(f64::total_cmp);

    let count = valid.len();
    let lp_wins = valid
        .iter()
        .filter(|o| o.recommendation == Recommendation::LP)
        .count();

    OutlookSummary {
        config: *config,
        iterations: outcomes.len(),
        valid_paths: count,
        mean_final_price: mean(valid.iter().map(|o| o.final_price), count),
        mean_pnl: mean(pnls.iter().copied(), count),
        median_pnl: median(&pnls),
        var_95_pnl: percentile(&pnls, 0.05),
        mean_il_percent: mean(valid.iter().map(|o| o.impermanent_loss_percent), count),
        mean_days_out_of_range: mean(
            valid.iter().map(|o| f64::from(o.days_out_of_range)),
            count,
        ),
        lp_win_rate: if count == 0 {
            0.0
        } else {
            lp_wins as f64 / count as f64
        },
    }
}

fn mean(values: impl Iterator<Item = f64>, count: usize) -> f64 {
    if count == 0 {
        return f64::NAN;
    }
    values.sum::<f64>() / count as f64
}

fn median(sorted: &[f64]) -> f64 {
    match sorted.len() {
        0 => f64::NAN,
        n if n % 2 == 1 => sorted[n / 2],
        n => (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0,
    }
}

fn percentile(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let index = ((sorted.len() as f64) * q).floor() as usize;
    sorted[index.min(sorted.len() - 1)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_volatility_matches_no_price_change() {
        let params = PositionParameters::default();
        let config = OutlookConfig::default()
            .with_iterations(20)
            .with_volatility(0.0)
            .with_seed(1);

        let summary = run_outlook(&params, &config);
        let expected = compute(&params);

        assert_eq!(summary.valid_paths, 20);
        assert!((summary.mean_pnl - expected.pnl_after_yield_dollars).abs() < 1e-6);
        assert!((summary.median_pnl - expected.pnl_after_yield_dollars).abs() < 1e-6);
        assert_eq!(summary.mean_days_out_of_range, 0.0);
        assert_eq!(summary.lp_win_rate, 1.0);
    }

    #[test]
    fn test_seeded_outlook_is_reproducible() {
        let params = PositionParameters::default();
        let config = OutlookConfig::default().with_iterations(200).with_seed(42);

        let a = run_outlook(&params, &config);
        let b = run_outlook(&params, &config);

        assert_eq!(a.mean_pnl, b.mean_pnl);
        assert_eq!(a.var_95_pnl, b.var_95_pnl);
        assert_eq!(a.lp_win_rate, b.lp_win_rate);
    }

    #[test]
    fn test_var_is_below_median() {
        let params = PositionParameters::default();
        let config = OutlookConfig::default().with_iterations(500).with_seed(3);
        let summary = run_outlook(&params, &config);

        assert!(summary.var_95_pnl <= summary.median_pnl);
        assert!((0.0..=1.0).contains(&summary.lp_win_rate));
        assert!(summary.mean_days_out_of_range <= f64::from(params.days_in_future));
    }

    #[test]
    fn test_evaluate_path_counts_days_out_of_range() {
        let params = PositionParameters::default();
        let path = [2223.24, 2400.0, 2350.0, 2250.0, 2000.0];
        let outcome = evaluate_path(&params, &path);

        assert_eq!(outcome.final_price, 2000.0);
        assert_eq!(outcome.days_out_of_range, 3);

        let expected = compute(&PositionParameters {
            future_price: 2000.0,
            days_out_of_range: 3,
            ..params
        });
        assert_eq!(outcome.pnl_after_yield_dollars, expected.pnl_after_yield_dollars);
    }

    #[test]
    fn test_no_iterations() {
        let summary = run_outlook(
            &PositionParameters::default(),
            &OutlookConfig::default().with_iterations(0),
        );
        assert_eq!(summary.valid_paths, 0);
        assert!(summary.mean_pnl.is_nan());
        assert_eq!(summary.lp_win_rate, 0.0);
    }

    #[test]
    fn test_percentile_and_median() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(median(&sorted), 2.5);
        assert_eq!(percentile(&sorted, 0.05), 1.0);
        assert_eq!(median(&[5.0]), 5.0);
    }
}
