//! Renders positions, charts and outlooks for display.

use crate::format::{PLACEHOLDER, format_amount, format_currency, format_percent};
use btb_calc_domain::{DerivedPosition, PositionParameters, Recommendation};
use btb_calc_simulation::monte_carlo::OutlookSummary;
use btb_calc_simulation::price_chart::ChartSeries;
use prettytable::format::consts::FORMAT_CLEAN;
use prettytable::{Cell, Row, Table, row};
use serde::Serialize;

/// Decimals shown for volatile token quantities.
const VOLATILE_DECIMALS: usize = 6;
/// Decimals shown for stable token quantities.
const STABLE_DECIMALS: usize = 2;

/// A labelled, formatted value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayRow {
    pub label: String,
    pub value: String,
}

impl DisplayRow {
    fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// The calculator's output for one parameter set.
#[derive(Debug, Clone, Copy)]
pub struct Report<'a> {
    pub asset: &'a str,
    pub params: &'a PositionParameters,
    pub derived: &'a DerivedPosition,
}

#[derive(Serialize)]
struct ReportDocument<'a> {
    asset: &'a str,
    parameters: &'a PositionParameters,
    derived: &'a DerivedPosition,
    display: Vec<DisplayRow>,
    notices: Vec<String>,
}

impl<'a> Report<'a> {
    pub fn new(asset: &'a str, params: &'a PositionParameters, derived: &'a DerivedPosition) -> Self {
        Self {
            asset,
            params,
            derived,
        }
    }

    /// Formatted input rows.
    pub fn input_rows(&self) -> Vec<DisplayRow> {
        let p = self.params;
        vec![
            DisplayRow::new(format!("Initial {} price", self.asset), format_currency(p.initial_price)),
            DisplayRow::new(
                format!("Initial {} amount", self.asset),
                format_amount(p.initial_amount, VOLATILE_DECIMALS),
            ),
            DisplayRow::new("Lower tick", format_currency(p.lower_tick)),
            DisplayRow::new("Upper tick", format_currency(p.upper_tick)),
            DisplayRow::new("Estimated APR", format_percent(p.estimated_apr)),
            DisplayRow::new(format!("Future {} price", self.asset), format_currency(p.future_price)),
            DisplayRow::new("Days in future", p.days_in_future.to_string()),
            DisplayRow::new("Days out of range", p.days_out_of_range.to_string()),
        ]
    }

    /// Formatted derived rows, recommendation excluded.
    pub fn output_rows(&self) -> Vec<DisplayRow> {
        let d = self.derived;
        vec![
            DisplayRow::new("Liquidity (L)", format_amount(d.liquidity, 4)),
            DisplayRow::new(
                "Stables needed",
                format_amount(d.initial_stables_needed, STABLE_DECIMALS),
            ),
            DisplayRow::new("Initial value", format_currency(d.initial_value)),
            DisplayRow::new(
                format!("Future {} amount", self.asset),
                format_amount(d.future_amount_volatile, VOLATILE_DECIMALS),
            ),
            DisplayRow::new(
                "Future stable amount",
                format_amount(d.future_amount_stable, STABLE_DECIMALS),
            ),
            DisplayRow::new("Price position", d.range_region.to_string()),
            DisplayRow::new(
                "Range width",
                format_percent(self.params.range().width_pct(self.params.initial_price)),
            ),
            DisplayRow::new("Future value", format_currency(d.future_value)),
            DisplayRow::new(
                "Future value with interest",
                format_currency(d.future_value_with_interest),
            ),
            DisplayRow::new("Value if held", format_currency(d.value_if_held)),
            DisplayRow::new("Value if LP", format_currency(d.value_if_lp)),
            DisplayRow::new("LP yield", format_percent(d.lp_yield)),
            DisplayRow::new("Effective APR", format_percent(d.effective_apr)),
            DisplayRow::new("Estimated interest", format_currency(d.estimated_interest)),
            DisplayRow::new(
                "Impermanent loss",
                format!(
                    "{} ({})",
                    format_currency(d.impermanent_loss_dollars),
                    format_percent(d.impermanent_loss_percent)
                ),
            ),
            DisplayRow::new(
                "PnL after yield",
                format!(
                    "{} ({})",
                    format_currency(d.pnl_after_yield_dollars),
                    format_percent(d.pnl_after_yield_percent)
                ),
            ),
        ]
    }

    /// Two-column table with the recommendation on the last row.
    pub fn to_table(&self) -> Table {
        let mut table = Table::new();
        table.set_format(*FORMAT_CLEAN);
        table.set_titles(row![b->"Position", b->self.asset]);

        for r in self.input_rows() {
            table.add_row(row![r.label, r.value]);
        }
        table.add_empty_row();
        for r in self.output_rows() {
            table.add_row(row![r.label, r.value]);
        }
        table.add_row(Row::new(vec![
            Cell::new("Recommendation").style_spec("b"),
            recommendation_cell(self.derived.recommendation),
        ]));
        for notice in self.notices() {
            table.add_row(Row::new(vec![
                Cell::new("Note").style_spec("Fy"),
                Cell::new(&notice),
            ]));
        }
        table
    }

    /// See [`range_notices`].
    pub fn notices(&self) -> Vec<String> {
        range_notices(self.params)
    }

    /// One-line summary for incremental display.
    pub fn summary_line(&self) -> String {
        let d = self.derived;
        format!(
            "{} @ {}: IL {} ({}), PnL after yield {} ({}) -> {}",
            self.asset,
            format_currency(self.params.future_price),
            format_currency(d.impermanent_loss_dollars),
            format_percent(d.impermanent_loss_percent),
            format_currency(d.pnl_after_yield_dollars),
            format_percent(d.pnl_after_yield_percent),
            d.recommendation
        )
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        let mut display = self.input_rows();
        display.extend(self.output_rows());
        display.push(DisplayRow::new(
            "Recommendation",
            self.derived.recommendation.to_string(),
        ));

        serde_json::to_string_pretty(&ReportDocument {
            asset: self.asset,
            parameters: self.params,
            derived: self.derived,
            display,
            notices: self.notices(),
        })
    }
}

/// Range problems the math tolerates but a reader should know about: bounds
/// that are unordered or not positive, or an entry price outside the range.
pub fn range_notices(params: &PositionParameters) -> Vec<String> {
    let range = params.range();
    let bounds = format!(
        "{} - {}",
        format_currency(params.lower_tick),
        format_currency(params.upper_tick)
    );

    if !range.is_well_formed() {
        vec![format!("range {bounds} is not an ordered, positive price range")]
    } else if !range.contains(params.initial_price) {
        vec![format!(
            "initial price {} is outside the range {bounds}",
            format_currency(params.initial_price)
        )]
    } else {
        Vec::new()
    }
}

/// `LP` in bold green, `HODL` in bold red.
pub fn recommendation_cell(recommendation: Recommendation) -> Cell {
    let spec = match recommendation {
        Recommendation::LP => "bFg",
        Recommendation::HODL => "bFr",
    };
    Cell::new(&recommendation.to_string()).style_spec(spec)
}

/// Chart points as a table, one row per sampled price.
pub fn chart_table(series: &ChartSeries) -> Table {
    let mut table = Table::new();
    table.set_format(*FORMAT_CLEAN);
    table.set_titles(row![
        b->"Price", b->"Region", b->"LP value", b->"HODL value", b->"IL", b->"IL %",
        b->"Full-range IL %", b->"PnL after yield"
    ]);

    for p in &series.points {
        table.add_row(row![
            r->format_currency(p.price),
            p.region.to_string(),
            r->format_currency(p.value_if_lp),
            r->format_currency(p.value_if_held),
            r->format_currency(p.impermanent_loss_dollars),
            r->format_percent(p.impermanent_loss_percent),
            r->format_percent(p.constant_product_il_percent),
            r->format_currency(p.pnl_after_yield_dollars)
        ]);
    }
    table
}

/// Chart points as CSV with raw numeric columns. Non-finite values are
/// left empty.
pub fn chart_csv(series: &ChartSeries) -> String {
    let mut out = String::from(
        "price,region,value_if_lp,value_if_held,il_dollars,il_percent,constant_product_il_percent,pnl_after_yield\n",
    );
    for p in &series.points {
        let cells = [
            csv_number(p.price),
            p.region.as_str().to_string(),
            csv_number(p.value_if_lp),
            csv_number(p.value_if_held),
            csv_number(p.impermanent_loss_dollars),
            csv_number(p.impermanent_loss_percent),
            csv_number(p.constant_product_il_percent),
            csv_number(p.pnl_after_yield_dollars),
        ];
        out.push_str(&cells.join(","));
        out.push('\n');
    }
    out
}

fn csv_number(value: f64) -> String {
    if value.is_finite() {
        value.to_string()
    } else {
        String::new()
    }
}

/// Breakeven prices, or the placeholder when PnL never changes sign.
pub fn format_breakevens(series: &ChartSeries) -> String {
    let prices = series.breakeven_prices();
    if prices.is_empty() {
        return PLACEHOLDER.to_string();
    }
    prices
        .into_iter()
        .map(format_currency)
        .collect::<Vec<_>>()
        .join(", ")
}

/// The sampled price with the deepest impermanent loss, or the placeholder
/// for an empty chart.
pub fn format_worst_loss(series: &ChartSeries) -> String {
    match series.worst_loss() {
        Some(p) => format!(
            "{} ({}) at {}",
            format_currency(p.impermanent_loss_dollars),
            format_percent(p.impermanent_loss_percent),
            format_currency(p.price)
        ),
        None => PLACEHOLDER.to_string(),
    }
}

pub fn outlook_table(summary: &OutlookSummary) -> Table {
    let mut table = Table::new();
    table.set_format(*FORMAT_CLEAN);
    table.set_titles(row![b->"Outlook", b->""]);

    let c = &summary.config;
    table.add_row(row!["Paths", format!("{} ({} valid)", summary.iterations, summary.valid_paths)]);
    table.add_row(row!["Volatility", format_percent(c.volatility)]);
    table.add_row(row!["Drift", format_percent(c.drift)]);
    table.add_row(row!["Mean final price", format_currency(summary.mean_final_price)]);
    table.add_row(row!["Mean PnL after yield", format_currency(summary.mean_pnl)]);
    table.add_row(row!["Median PnL after yield", format_currency(summary.median_pnl)]);
    table.add_row(row!["5% worst PnL", format_currency(summary.var_95_pnl)]);
    table.add_row(row!["Mean IL", format_percent(summary.mean_il_percent)]);
    table.add_row(row![
        "Mean days out of range",
        format_amount(summary.mean_days_out_of_range, 1)
    ]);
    table.add_row(Row::new(vec![
        Cell::new("LP wins"),
        Cell::new(&format_percent(summary.lp_win_rate)).style_spec(
            if summary.lp_win_rate >= 0.5 { "bFg" } else { "bFr" },
        ),
    ]));
    table
}
