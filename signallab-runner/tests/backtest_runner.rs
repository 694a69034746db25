//! Integration tests for the runner: CSV inputs on disk through to artifacts.

use std::path::{Path, PathBuf};

use signallab_core::domain::TradeType;
use signallab_runner::config::BacktestConfig;
use signallab_runner::export::ArtifactManager;
use signallab_runner::runner::{run_single_backtest, RunError};
use signallab_runner::{load_data, sweep_thresholds, DataSource, LoadError};

fn write(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, body).unwrap();
    path
}

/// Three closes and scores reproducing the two-trade compounding example.
fn worked_example(dir: &Path) -> (PathBuf, PathBuf) {
    let prices = write(
        dir,
        "prices.csv",
        "Date,Open,High,Low,Close,Volume\n\
         2024-03-01,99,101,98,100,1000\n\
         2024-03-04,100,103,99,102,1000\n\
         2024-03-05,102,102,95,96,1000\n",
    );
    let conf = write(dir, "conf.csv", "confidence\n0.7\n0.2\n0.55\n");
    (prices, conf)
}

#[test]
fn csv_run_reproduces_worked_example() {
    let dir = tempfile::tempdir().unwrap();
    let (prices, conf) = worked_example(dir.path());
    let report = run_single_backtest(&BacktestConfig::for_csv("TEST", prices, conf)).unwrap();

    let r = &report.result;
    assert!(!report.has_synthetic);
    assert_eq!(r.total_trades, 2);
    assert_eq!(r.trades[0].trade_type, TradeType::Call);
    assert_eq!(r.trades[0].capital, 120_000.0);
    assert_eq!(r.trades[1].trade_type, TradeType::Put);
    let expected = 120_000.0 + 2_400.0 * (6.0 / 102.0) * 500.0;
    assert!((r.final_capital - expected).abs() < 0.006);
    assert_eq!(r.win_rate, 100.0);
}

#[test]
fn toml_config_drives_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let (prices, conf) = worked_example(dir.path());
    let toml_path = write(
        dir.path(),
        "run.toml",
        &format!(
            "[backtest]\nsymbol = \"TEST\"\nthreshold = 0.75\ninitial_capital = 50000\n\n\
             [data]\nprices = {:?}\nconfidences = {:?}\n",
            prices.display().to_string(),
            conf.display().to_string()
        ),
    );

    let config = BacktestConfig::from_file(&toml_path).unwrap();
    let report = run_single_backtest(&config).unwrap();

    // 0.7 sits inside the wider dead zone; only the 0.2 put trades.
    assert_eq!(report.result.total_trades, 1);
    assert_eq!(report.result.trades[0].trade_type, TradeType::Put);
    assert_eq!(report.result.initial_capital, 50_000.0);
    assert_eq!(report.threshold(), 0.75);
}

#[test]
fn longer_price_table_keeps_one_close_past_predictions() {
    let dir = tempfile::tempdir().unwrap();
    let prices = write(
        dir.path(),
        "p.csv",
        "date,close\n2024-01-01,100\n2024-01-02,101\n2024-01-03,102\n2024-01-04,103\n",
    );
    let conf = write(dir.path(), "c.csv", "confidence\n0.9\n0.9\n");
    let loaded = load_data(&DataSource::Csv {
        prices,
        confidences: conf,
    })
    .unwrap();

    assert_eq!(loaded.prices.len(), 3);
    assert_eq!(loaded.end_date(), chrono::NaiveDate::from_ymd_opt(2024, 1, 3));
}

#[test]
fn last_score_trades_against_the_final_close() {
    let dir = tempfile::tempdir().unwrap();
    let prices = write(
        dir.path(),
        "p.csv",
        "date,close\n2024-03-01,100\n2024-03-04,102\n2024-03-05,96\n",
    );
    let conf = write(dir.path(), "c.csv", "confidence\n0.7\n0.2\n");

    let loaded = load_data(&DataSource::Csv {
        prices: prices.clone(),
        confidences: conf.clone(),
    })
    .unwrap();
    assert_eq!(loaded.prices.len(), 3);
    assert_eq!(loaded.confidences.len(), 2);

    let direct = signallab_core::run_backtest(
        &loaded.prices,
        &loaded.confidences,
        &signallab_core::EngineConfig::default(),
    )
    .unwrap();
    let report = run_single_backtest(&BacktestConfig::for_csv("TEST", prices, conf)).unwrap();

    assert_eq!(report.result.total_trades, 2);
    assert_eq!(report.result.trades[1].trade_type, TradeType::Put);
    assert_eq!(report.result, direct);
}

#[test]
fn zero_close_on_trade_day_fails_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let prices = write(
        dir.path(),
        "p.csv",
        "date,close\n2024-01-01,100\n2024-01-02,0\n2024-01-03,102\n",
    );
    let conf = write(dir.path(), "c.csv", "confidence\n0.9\n0.9\n0.5\n");
    let err = run_single_backtest(&BacktestConfig::for_csv("BAD", prices, conf)).unwrap_err();
    assert!(matches!(err, RunError::Engine(_)));
    assert!(err.to_string().contains("invalid close price 0"));
}

#[test]
fn missing_price_file_is_a_data_error() {
    let dir = tempfile::tempdir().unwrap();
    let conf = write(dir.path(), "c.csv", "confidence\n0.9\n");
    let err = run_single_backtest(&BacktestConfig::for_csv(
        "NONE",
        dir.path().join("absent.csv"),
        conf,
    ))
    .unwrap_err();
    assert!(matches!(err, RunError::Data(LoadError::Csv { .. })));
}

#[test]
fn sweep_and_artifacts_on_synthetic_data() {
    let loaded = load_data(&DataSource::Synthetic { bars: 150, seed: 21 }).unwrap();
    let rows = sweep_thresholds(&loaded, "SYN", &[0.55, 0.6, 0.65], 100_000.0).unwrap();
    assert_eq!(rows.len(), 3);

    let report = run_single_backtest(&BacktestConfig::for_synthetic(150, 21)).unwrap();
    assert_eq!(report.result.final_capital, rows[1].final_capital);

    let dir = tempfile::tempdir().unwrap();
    let paths = ArtifactManager::new(dir.path().join("out"))
        .unwrap()
        .save_run(&report)
        .unwrap();
    assert!(paths.trades_csv.exists());
    assert!(paths.equity_csv.exists());
    assert!(paths.result_json.exists());
    assert!(paths.run_dir.starts_with(dir.path()));
}
