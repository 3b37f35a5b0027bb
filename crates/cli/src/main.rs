//! Command Line Interface for the BTB position calculator.
use anyhow::{Context, Result, bail};
use btb_calc_domain::PositionParameters;
use btb_calc_presentation::report::{
    Report, chart_csv, chart_table, format_breakevens, format_worst_loss, outlook_table,
    range_notices,
};
use btb_calc_presentation::{InputState, format_currency};
use btb_calc_simulation::prelude::*;
use clap::{Args, Parser, Subcommand, ValueEnum};
use dotenv::dotenv;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

mod interactive;

#[derive(Parser)]
#[command(name = "btb-calc")]
#[command(about = "Impermanent loss and concentrated liquidity calculator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare providing liquidity against holding at a future price
    Calculate {
        #[command(flatten)]
        position: PositionArgs,

        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Sweep future prices across the range and print the value curves
    Chart {
        #[command(flatten)]
        position: PositionArgs,

        /// Number of sampled prices
        #[arg(long, default_value_t = 100)]
        samples: usize,

        /// Fraction added beyond each range bound
        #[arg(long, default_value_t = 0.2)]
        padding: f64,

        /// Explicit comma-separated prices instead of an even sweep
        #[arg(long, value_delimiter = ',')]
        prices: Option<Vec<f64>>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Simulate random price paths over the horizon
    Outlook {
        #[command(flatten)]
        position: PositionArgs,

        /// Annualized volatility (0.8 = 80%)
        #[arg(long, default_value_t = 0.8)]
        volatility: f64,

        /// Annualized drift
        #[arg(long, default_value_t = 0.0)]
        drift: f64,

        /// Number of simulated paths
        #[arg(long, default_value_t = 1000)]
        iterations: usize,

        /// Seed for reproducible runs
        #[arg(long)]
        seed: Option<u64>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Edit parameters line by line from stdin
    Interactive {
        #[command(flatten)]
        position: PositionArgs,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

/// Position flags shared by every subcommand.
///
/// Values come from the reference scenario, then the params file, then the
/// flags given explicitly.
#[derive(Args, Debug, Clone, Default)]
struct PositionArgs {
    /// JSON file with position parameters
    #[arg(long)]
    params: Option<PathBuf>,

    /// Volatile asset price at deposit [default: 2223.24]
    #[arg(long)]
    initial_price: Option<f64>,

    /// Volatile asset amount deposited [default: 0.213342]
    #[arg(long)]
    initial_amount: Option<f64>,

    /// Upper price bound [default: 2331.25]
    #[arg(long)]
    upper_tick: Option<f64>,

    /// Lower price bound [default: 2109.22]
    #[arg(long)]
    lower_tick: Option<f64>,

    /// Estimated APR in decimal form, 5.978 = 597.8% [default: 5.978]
    #[arg(long = "apr")]
    estimated_apr: Option<f64>,

    /// Volatile asset price at the horizon [default: initial price]
    #[arg(long)]
    future_price: Option<f64>,

    /// Horizon in days [default: 7]
    #[arg(long = "days")]
    days_in_future: Option<u32>,

    /// Days spent outside the range [default: 0]
    #[arg(long)]
    days_out_of_range: Option<u32>,

    /// Display name of the volatile asset
    #[arg(long, default_value = "ETH")]
    label: String,
}

impl PositionArgs {
    fn resolve(&self) -> Result<PositionParameters> {
        let mut params = match &self.params {
            Some(path) => load_params(path)?,
            None => PositionParameters::default(),
        };

        if let Some(v) = self.initial_price {
            params.initial_price = v;
            if self.future_price.is_none() && self.params.is_none() {
                params.future_price = v;
            }
        }
        if let Some(v) = self.initial_amount {
            params.initial_amount = v;
        }
        if let Some(v) = self.upper_tick {
            params.upper_tick = v;
        }
        if let Some(v) = self.lower_tick {
            params.lower_tick = v;
        }
        if let Some(v) = self.estimated_apr {
            params.estimated_apr = v;
        }
        if let Some(v) = self.future_price {
            params.future_price = v;
        }
        if let Some(v) = self.days_in_future {
            params.days_in_future = v;
        }
        if let Some(v) = self.days_out_of_range {
            params.days_out_of_range = v;
        }

        debug!(?params, "Resolved position parameters");
        for notice in range_notices(&params) {
            warn!(%notice, "Unusual position range");
        }
        Ok(params)
    }
}

fn load_params(path: &Path) -> Result<PositionParameters> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading params file {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing params file {}", path.display()))
}

fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Calculate { position, format } => {
            let params = position.resolve()?;
            let derived = params.compute();
            let report = Report::new(&position.label, &params, &derived);

            match format {
                OutputFormat::Table => report.to_table().printstd(),
                OutputFormat::Json => println!("{}", report.to_json()?),
                OutputFormat::Csv => bail!("csv output is only available for `chart`"),
            }
        }
        Commands::Chart {
            position,
            samples,
            padding,
            prices,
            format,
        } => {
            let params = position.resolve()?;
            let config = ChartConfig::default()
                .with_samples(*samples)
                .with_padding(*padding);

            let series = match prices {
                Some(prices) => {
                    let config = config.with_samples(prices.len());
                    sample_path(
                        &params,
                        &config,
                        &mut DeterministicPricePath::new(prices.clone()),
                    )
                }
                None => sample_chart(&params, &config),
            };

            match format {
                OutputFormat::Table => {
                    println!(
                        "{} range {} - {}, entry {}",
                        position.label,
                        format_currency(params.lower_tick),
                        format_currency(params.upper_tick),
                        format_currency(params.initial_price)
                    );
                    chart_table(&series).printstd();
                    println!("Breakeven after yield: {}", format_breakevens(&series));
                    println!("Worst impermanent loss: {}", format_worst_loss(&series));
                }
                OutputFormat::Csv => print!("{}", chart_csv(&series)),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&series)?),
            }
        }
        Commands::Outlook {
            position,
            volatility,
            drift,
            iterations,
            seed,
            format,
        } => {
            let params = position.resolve()?;
            let mut config = OutlookConfig::default()
                .with_volatility(*volatility)
                .with_drift(*drift)
                .with_iterations(*iterations);
            if let Some(seed) = seed {
                config = config.with_seed(*seed);
            }

            let summary = run_outlook(&params, &config);

            match format {
                OutputFormat::Table => {
                    println!(
                        "{} over {} days from {}",
                        position.label,
                        params.days_in_future,
                        format_currency(params.initial_price)
                    );
                    outlook_table(&summary).printstd();
                }
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
                OutputFormat::Csv => bail!("csv output is only available for `chart`"),
            }
        }
        Commands::Interactive { position } => {
            let params = position.resolve()?;
            let state = InputState::new(params, position.label.clone());
            let stdin = io::stdin();
            let stdout = io::stdout();
            interactive::run_session(state, stdin.lock(), stdout.lock())?;
        }
    }

    Ok(())
}
