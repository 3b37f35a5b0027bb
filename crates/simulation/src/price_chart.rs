//! Value curves of a position across a sweep of future prices.
//!
//! Every point re-runs the position math with the sampled price as the
//! future price, so the curve always agrees with the single-price result.

use crate::price_path::{DeterministicPricePath, LinearPriceGrid, PricePathGenerator};
use btb_calc_domain::metrics::impermanent_loss::il_constant_product;
use btb_calc_domain::{PositionParameters, RangeRegion, compute};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Configuration for a chart sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    /// Number of sampled prices.
    pub samples: usize,
    /// Fraction of each bound added beyond the range on both sides.
    pub padding: f64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            samples: 100,
            padding: 0.2,
        }
    }
}

impl ChartConfig {
    #[must_use]
    pub fn with_samples(mut self, samples: usize) -> Self {
        self.samples = samples;
        self
    }

    #[must_use]
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    /// Price window swept for `params`: the range widened by `padding`.
    ///
    /// The entry and future prices are kept inside the window even when
    /// they fall outside the padded range.
    pub fn bounds(&self, params: &PositionParameters) -> (f64, f64) {
        let low = (params.lower_tick * (1.0 - self.padding))
            .min(params.initial_price)
            .min(params.future_price)
            .max(0.0);
        let high = (params.upper_tick * (1.0 + self.padding))
            .max(params.initial_price)
            .max(params.future_price);
        (low, high)
    }
}

/// One sampled price and the position outcome at that price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub price: f64,
    pub value_if_lp: f64,
    pub value_if_held: f64,
    pub impermanent_loss_dollars: f64,
    pub impermanent_loss_percent: f64,
    pub pnl_after_yield_dollars: f64,
    /// Full-range IL at the same price, for reference.
    pub constant_product_il_percent: f64,
    pub region: RangeRegion,
}

/// A sampled chart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartSeries {
    pub config: ChartConfig,
    pub points: Vec<ChartPoint>,
}

impl ChartSeries {
    /// Prices at which the yield-adjusted PnL changes sign, linearly
    /// interpolated between neighbouring samples.
    ///
    /// A sample whose PnL is exactly zero is reported at its own price.
    pub fn breakeven_prices(&self) -> Vec<f64> {
        let last = self.points.len().saturating_sub(2);
        self.points
            .windows(2)
            .enumerate()
            .filter_map(|(i, pair)| {
                let (a, b) = (pair[0], pair[1]);
                let (pa, pb) = (a.pnl_after_yield_dollars, b.pnl_after_yield_dollars);
                if !pa.is_finite() || !pb.is_finite() {
                    return None;
                }
                if pa == 0.0 {
                    return Some(a.price);
                }
                // the final sample has no window of its own
                if pb == 0.0 && i == last {
                    return Some(b.price);
                }
                if (pa < 0.0) != (pb < 0.0) && pb != 0.0 {
                    let t = pa / (pa - pb);
                    return Some(a.price + t * (b.price - a.price));
                }
                None
            })
            .collect()
    }

    /// The sampled point with the worst impermanent loss in dollars.
    pub fn worst_loss(&self) -> Option<&ChartPoint> {
        self.points
            .iter()
            .filter(|p| p.impermanent_loss_dollars.is_finite())
            .min_by(|a, b| a.impermanent_loss_dollars.total_cmp(&b.impermanent_loss_dollars))
    }
}

/// Sweeps the configured price window and evaluates the position at each
/// sampled price.
pub fn sample_chart(params: &PositionParameters, config: &ChartConfig) -> ChartSeries {
    if config.samples == 1 {
        let mut single = DeterministicPricePath::new(vec![params.future_price]);
        return sample_path(params, config, &mut single);
    }

    let (low, high) = config.bounds(params);
    debug!(low = low, high = high, "Sampling price chart window");
    sample_path(params, config, &mut LinearPriceGrid::new(low, high))
}

/// Evaluates the position at every price produced by `path`.
pub fn sample_path<P: PricePathGenerator>(
    params: &PositionParameters,
    config: &ChartConfig,
    path: &mut P,
) -> ChartSeries {
    let prices = if config.samples == 0 {
        Vec::new()
    } else {
        path.generate(config.samples - 1)
    };

    debug!(samples = prices.len(), "Evaluating chart points");

    let points = prices
        .into_iter()
        .map(|price| chart_point(params, price))
        .collect();

    ChartSeries {
        config: *config,
        points,
    }
}

/// Evaluates `params` at an arbitrary `price`.
pub fn chart_point(params: &PositionParameters, price: f64) -> ChartPoint {
    let derived = compute(&params.with_future_price(price));
    ChartPoint {
        price,
        value_if_lp: derived.value_if_lp,
        value_if_held: derived.value_if_held,
        impermanent_loss_dollars: derived.impermanent_loss_dollars,
        impermanent_loss_percent: derived.impermanent_loss_percent,
        pnl_after_yield_dollars: derived.pnl_after_yield_dollars,
        constant_product_il_percent: il_constant_product(params.initial_price, price),
        region: derived.range_region,
    }
}
