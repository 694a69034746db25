//! SignalLab CLI: backtest, sweep and suggestion commands.
//!
//! Commands:
//! - `run`: execute a backtest from a TOML config, CSV inputs, or synthetic data
//! - `sweep`: run the same inputs across several thresholds in parallel
//! - `suggest`: turn today's confidence score into a call/put/wait suggestion

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use signallab_core::signals::{suggest, DEFAULT_THRESHOLD};
use signallab_runner::{
    format_suggestion, format_summary, format_sweep_table, load_data, run_single_backtest,
    sweep_thresholds, threshold_grid, ArtifactManager, BacktestConfig,
};

#[derive(Parser)]
#[command(
    name = "signallab",
    about = "SignalLab CLI: confidence-driven leveraged options backtester"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Where the inputs come from. Exactly one of `--config`, `--prices`, `--synthetic`.
#[derive(Args, Clone)]
struct InputArgs {
    /// Path to a TOML config file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Prices CSV (date + close columns).
    #[arg(long, requires = "confidences")]
    prices: Option<PathBuf>,

    /// Confidences CSV (one score per row).
    #[arg(long, requires = "prices")]
    confidences: Option<PathBuf>,

    /// Use seeded synthetic data.
    #[arg(long, default_value_t = false)]
    synthetic: bool,

    /// Synthetic bar count.
    #[arg(long, default_value_t = 252)]
    bars: usize,

    /// Synthetic RNG seed.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Label used in reports.
    #[arg(long)]
    symbol: Option<String>,

    /// Starting capital. Overrides the config file.
    #[arg(long)]
    capital: Option<f64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute a single backtest and print the summary.
    Run {
        #[command(flatten)]
        input: InputArgs,

        /// Confidence threshold. Overrides the config file.
        #[arg(long)]
        threshold: Option<f64>,

        /// Write trades.csv, equity.csv and result.json under this directory.
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Print the full report as JSON instead of text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Run the same inputs over a range of thresholds.
    Sweep {
        #[command(flatten)]
        input: InputArgs,

        /// Explicit thresholds, comma separated (e.g. 0.55,0.6,0.65).
        #[arg(long, value_delimiter = ',')]
        thresholds: Vec<f64>,

        /// Grid start when --thresholds is not given.
        #[arg(long, default_value_t = 0.55)]
        from: f64,

        /// Grid end (inclusive).
        #[arg(long, default_value_t = 0.80)]
        to: f64,

        /// Grid step.
        #[arg(long, default_value_t = 0.05)]
        step: f64,
    },
    /// Suggest a trade for the next session from the latest score.
    Suggest {
        /// Ticker label (e.g. ^NSEI, RELIANCE.NS).
        #[arg(long, default_value = "^NSEI")]
        ticker: String,

        /// Latest model confidence (bullish probability).
        #[arg(long)]
        confidence: f64,

        /// Current price of the underlying.
        #[arg(long)]
        price: f64,

        /// Confidence threshold.
        #[arg(long, default_value_t = DEFAULT_THRESHOLD)]
        threshold: f64,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            input,
            threshold,
            output_dir,
            json,
        } => run_cmd(input, threshold, output_dir, json),
        Commands::Sweep {
            input,
            thresholds,
            from,
            to,
            step,
        } => sweep_cmd(input, thresholds, from, to, step),
        Commands::Suggest {
            ticker,
            confidence,
            price,
            threshold,
        } => {
            print!("{}", format_suggestion(&suggest(&ticker, confidence, price, threshold)));
            Ok(())
        }
    }
}

fn run_cmd(
    input: InputArgs,
    threshold: Option<f64>,
    output_dir: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let mut config = build_config(&input)?;
    if let Some(t) = threshold {
        config.backtest.threshold = t;
    }

    let report = run_single_backtest(&config)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", format_summary(&report));
    }

    if let Some(dir) = output_dir {
        let paths = ArtifactManager::new(&dir)?.save_run(&report)?;
        info!(dir = %paths.run_dir.display(), "artifacts written");
    }
    Ok(())
}

fn sweep_cmd(
    input: InputArgs,
    thresholds: Vec<f64>,
    from: f64,
    to: f64,
    step: f64,
) -> Result<()> {
    let config = build_config(&input)?;
    let thresholds = if thresholds.is_empty() {
        threshold_grid(from, to, step)
    } else {
        thresholds
    };

    let loaded = load_data(&config.data_source()?)?;
    let rows = sweep_thresholds(
        &loaded,
        &config.backtest.symbol,
        &thresholds,
        config.backtest.initial_capital,
    )?;
    print!("{}", format_sweep_table(&rows));
    Ok(())
}

fn build_config(input: &InputArgs) -> Result<BacktestConfig> {
    let sources = [input.config.is_some(), input.prices.is_some(), input.synthetic]
        .iter()
        .filter(|&&set| set)
        .count();
    if sources != 1 {
        bail!("exactly one of --config, --prices/--confidences or --synthetic is required");
    }

    let mut config = if let Some(path) = &input.config {
        BacktestConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?
    } else if let (Some(prices), Some(confidences)) = (&input.prices, &input.confidences) {
        BacktestConfig::for_csv("UNKNOWN", prices.clone(), confidences.clone())
    } else {
        BacktestConfig::for_synthetic(input.bars, input.seed)
    };

    if let Some(symbol) = &input.symbol {
        config.backtest.symbol = symbol.clone();
    }
    if let Some(capital) = input.capital {
        config.backtest.initial_capital = capital;
    }
    config.validate()?;
    Ok(config)
}
