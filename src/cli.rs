//! CLI definition and dispatch.

use chrono::{Days, Local, NaiveDate};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info, warn};

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::csv_report_adapter::CsvReportAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::fundamentals_csv_adapter::FundamentalsCsvAdapter;
use crate::domain::config_validation::{read_sector, validate_config, SECTOR_SECTION_PREFIX};
use crate::domain::decision::{Decision, EvaluatorConfig};
use crate::domain::error::SwingError;
use crate::domain::fundamentals::SectorTable;
use crate::domain::indicator::{self, IndicatorRow, MIN_BARS};
use crate::domain::screener::{Screener, DEFAULT_LOOKBACK_DAYS};
use crate::domain::watchlist::parse_tickers;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(name = "swingscreen", about = "Trend/momentum swing trade screener")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Evaluate the watchlist (or a single ticker) and print decisions
    Evaluate {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        ticker: Option<String>,
        /// Evaluation date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        as_of: Option<NaiveDate>,
        /// Also write decisions to this CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the indicator table for one ticker
    Snapshot {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        ticker: String,
        #[arg(long)]
        as_of: Option<NaiveDate>,
        /// Number of trailing rows to print
        #[arg(long, default_value_t = 10)]
        rows: usize,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Show the effective sector threshold table
    Sectors {
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Evaluate {
            config,
            ticker,
            as_of,
            output,
        } => run_evaluate(&config, ticker.as_deref(), as_of, output.as_deref()),
        Command::Snapshot {
            config,
            ticker,
            as_of,
            rows,
        } => run_snapshot(&config, &ticker, as_of, rows),
        Command::Validate { config } => run_validate(&config),
        Command::Sectors { config } => run_sectors(config.as_deref()),
    }
}

fn fail(err: SwingError) -> ExitCode {
    error!("{err}");
    ExitCode::from(&err)
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, SwingError> {
    FileConfigAdapter::from_file(path).map_err(|e| SwingError::ConfigParse {
        file: path.display().to_string(),
        reason: e.to_string(),
    })
}

fn load_validated(path: &Path) -> Result<FileConfigAdapter, SwingError> {
    info!("loading config from {}", path.display());
    let adapter = load_config(path)?;
    validate_config(&adapter)?;
    Ok(adapter)
}

pub fn build_evaluator_config(config: &dyn ConfigPort) -> EvaluatorConfig {
    let defaults = EvaluatorConfig::default();
    EvaluatorConfig {
        adx_threshold: config.get_double("evaluator", "adx_threshold", defaults.adx_threshold),
        weak_trend_threshold: config.get_double(
            "evaluator",
            "weak_trend_threshold",
            defaults.weak_trend_threshold,
        ),
        volume_threshold: config.get_double(
            "evaluator",
            "volume_threshold",
            defaults.volume_threshold,
        ),
        stop_atr_multiple: config.get_double(
            "evaluator",
            "stop_atr_multiple",
            defaults.stop_atr_multiple,
        ),
        target_atr_multiple: config.get_double(
            "evaluator",
            "target_atr_multiple",
            defaults.target_atr_multiple,
        ),
    }
}

/// Built-in sector table with every `[sector:<name>]` section applied on top.
pub fn build_sector_table(config: &dyn ConfigPort) -> Result<SectorTable, SwingError> {
    let mut table = SectorTable::default();
    for section in config.sections() {
        if let Some(name) = section.strip_prefix(SECTOR_SECTION_PREFIX) {
            table.set(name, read_sector(config, &section)?);
        }
    }
    Ok(table)
}

pub fn lookback_days(config: &dyn ConfigPort) -> u64 {
    config
        .get_int("data", "lookback_days", DEFAULT_LOOKBACK_DAYS as i64)
        .max(1) as u64
}

pub fn resolve_tickers(
    ticker_override: Option<&str>,
    config: &dyn ConfigPort,
) -> Result<Vec<String>, SwingError> {
    if let Some(t) = ticker_override {
        return Ok(parse_tickers(t)?);
    }
    let list = config.get_string("watchlist", "tickers").unwrap_or_default();
    Ok(parse_tickers(&list)?)
}

fn data_path(config: &dyn ConfigPort, key: &str) -> Result<PathBuf, SwingError> {
    config
        .get_string("data", key)
        .map(PathBuf::from)
        .ok_or_else(|| SwingError::ConfigMissing {
            section: "data".into(),
            key: key.into(),
        })
}

fn open_ports(
    config: &dyn ConfigPort,
) -> Result<(CsvAdapter, FundamentalsCsvAdapter), SwingError> {
    let prices = CsvAdapter::new(data_path(config, "prices_dir")?);
    let fundamentals = FundamentalsCsvAdapter::from_file(data_path(config, "fundamentals")?)?;
    info!(records = fundamentals.len(), "loaded fundamentals");
    Ok((prices, fundamentals))
}

fn run_evaluate(
    config_path: &Path,
    ticker: Option<&str>,
    as_of: Option<NaiveDate>,
    output: Option<&Path>,
) -> ExitCode {
    let adapter = match load_validated(config_path) {
        Ok(a) => a,
        Err(e) => return fail(e),
    };

    let tickers = match resolve_tickers(ticker, &adapter) {
        Ok(t) => t,
        Err(e) => return fail(e),
    };
    let sectors = match build_sector_table(&adapter) {
        Ok(t) => t,
        Err(e) => return fail(e),
    };
    let (prices, fundamentals) = match open_ports(&adapter) {
        Ok(p) => p,
        Err(e) => return fail(e),
    };

    let screener = Screener::new(
        &prices,
        &fundamentals,
        sectors,
        build_evaluator_config(&adapter),
    )
    .with_lookback_days(lookback_days(&adapter));

    run_evaluate_pipeline(
        &screener,
        &tickers,
        as_of.unwrap_or_else(|| Local::now().date_naive()),
        output,
    )
}

/// Screens `tickers`, prints one line per decision, and optionally exports
/// them. Fails only when no ticker could be evaluated at all.
pub fn run_evaluate_pipeline(
    screener: &Screener<'_>,
    tickers: &[String],
    as_of: NaiveDate,
    output: Option<&Path>,
) -> ExitCode {
    let mut decisions: Vec<Decision> = Vec::with_capacity(tickers.len());
    let mut first_error: Option<SwingError> = None;

    for (ticker, result) in screener.evaluate_watchlist(tickers, as_of) {
        match result {
            Ok(evaluation) => {
                if let Some(snapshot) = evaluation
                    .technicals
                    .as_ref()
                    .and_then(|t| t.snapshot())
                {
                    info!(%ticker, %snapshot, "technicals");
                }
                println!("{}", evaluation.decision);
                decisions.push(evaluation.decision);
            }
            Err(e) => {
                warn!("skipping {ticker}: {e}");
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
        }
    }

    let buys = decisions.iter().filter(|d| d.is_buy()).count();
    info!(
        evaluated = decisions.len(),
        buys,
        failed = tickers.len() - decisions.len(),
        "screening complete"
    );

    if decisions.is_empty() {
        if let Some(e) = first_error {
            return fail(e);
        }
    }

    if let Some(path) = output {
        if let Err(e) = CsvReportAdapter.write(&decisions, path) {
            return fail(e);
        }
        info!("decisions written to {}", path.display());
    }

    ExitCode::SUCCESS
}

fn run_snapshot(
    config_path: &Path,
    ticker: &str,
    as_of: Option<NaiveDate>,
    rows: usize,
) -> ExitCode {
    let adapter = match load_validated(config_path) {
        Ok(a) => a,
        Err(e) => return fail(e),
    };
    let prices = match data_path(&adapter, "prices_dir") {
        Ok(p) => CsvAdapter::new(p),
        Err(e) => return fail(e),
    };

    let as_of = as_of.unwrap_or_else(|| Local::now().date_naive());
    let start = as_of
        .checked_sub_days(Days::new(lookback_days(&adapter)))
        .unwrap_or(NaiveDate::MIN);

    match snapshot_table(&prices, &ticker.to_uppercase(), start, as_of, rows) {
        Ok(text) => {
            print!("{text}");
            ExitCode::SUCCESS
        }
        Err(e) => fail(e),
    }
}

/// Renders the trailing `rows` indicator rows for `ticker` as a text table.
pub fn snapshot_table(
    data_port: &dyn DataPort,
    ticker: &str,
    start: NaiveDate,
    end: NaiveDate,
    rows: usize,
) -> Result<String, SwingError> {
    let bars = data_port.fetch_series(ticker, start, end)?;
    let frame = indicator::compute_frame(bars)?;

    let mut out = format!(
        "{} ({} bars, {} to {})\n",
        ticker,
        frame.len(),
        start,
        end
    );
    out.push_str(
        "date        close     ema9    ema21    ema50     atr    +di    -di    adx   rvol\n",
    );
    for row in frame.tail(rows) {
        out.push_str(&format_row(row));
        out.push('\n');
    }

    match frame.latest() {
        Some(snapshot) if frame.len() >= MIN_BARS => {
            out.push_str(&format!(
                "ema aligned: {}, close above ema9: {}, complete: {}\n",
                snapshot.ema_aligned(),
                snapshot.price_above_ema9(),
                snapshot.is_complete()
            ));
        }
        _ => out.push_str(&format!(
            "insufficient data: {} bars, need {}\n",
            frame.len(),
            MIN_BARS
        )),
    }
    Ok(out)
}

fn format_row(row: &IndicatorRow) -> String {
    format!(
        "{} {:>8.2} {:>8.2} {:>8.2} {:>8.2} {:>7.2} {:>6.1} {:>6.1} {:>6.1} {:>6.2}",
        row.date,
        row.close,
        row.ema9,
        row.ema21,
        row.ema50,
        row.atr,
        row.plus_di,
        row.minus_di,
        row.adx,
        row.rvol
    )
}

fn run_validate(config_path: &Path) -> ExitCode {
    let adapter = match load_validated(config_path) {
        Ok(a) => a,
        Err(e) => return fail(e),
    };

    let tickers = match resolve_tickers(None, &adapter) {
        Ok(t) => t,
        Err(e) => return fail(e),
    };
    let sectors = match build_sector_table(&adapter) {
        Ok(t) => t,
        Err(e) => return fail(e),
    };
    let evaluator = build_evaluator_config(&adapter);

    println!("Watchlist: {}", tickers.join(", "));
    println!(
        "Evaluator: ADX > {}, weak trend < {}, RVOL > {}, stop {}x ATR, target {}x ATR",
        evaluator.adx_threshold,
        evaluator.weak_trend_threshold,
        evaluator.volume_threshold,
        evaluator.stop_atr_multiple,
        evaluator.target_atr_multiple
    );
    println!("Sectors: {} configured", sectors.entries().count());
    println!("Lookback: {} days", lookback_days(&adapter));
    println!("\nConfiguration is valid.");
    ExitCode::SUCCESS
}

fn run_sectors(config_path: Option<&Path>) -> ExitCode {
    let table = match config_path {
        Some(path) => match load_config(path).and_then(|c| build_sector_table(&c)) {
            Ok(t) => t,
            Err(e) => return fail(e),
        },
        None => SectorTable::default(),
    };

    println!("{:<24} {:>10} {:>8}", "sector", "max d/e", "max p/e");
    for (name, t) in table.entries() {
        println!("{:<24} {:>10.2} {:>8.2}", name, t.debt_equity_max, t.pe_max);
    }
    let d = table.default_thresholds();
    println!("{:<24} {:>10.2} {:>8.2}", "default", d.debt_equity_max, d.pe_max);
    ExitCode::SUCCESS
}
