// In app/src/main.rs

use std::path::PathBuf;

use anyhow::{Context, Result};
use app_config::{ClassifierProvider, MAX_LOOKBACK_DAYS, Settings};
use chrono::Utc;
use clap::Parser;
use engine::{Engine, RunRequest};
use tracing::Level;
use tracing_subscriber::filter::Targets;
use tracing_subscriber::prelude::*;

mod report;

use crate::report::{RunReport, export_csv};

// --- Command-Line Interface Definition ---

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = "News-driven sentiment bot using FinBERT.")]
struct Cli {
    /// Ticker symbol, e.g. NVDA. Defaults to `app.default_ticker`.
    #[arg(short, long)]
    ticker: Option<String>,

    /// Look-back window in days. Defaults to `app.default_days`.
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_LOOKBACK_DAYS)))]
    days: Option<u32>,

    /// EMA decay parameter in (0, 1].
    #[arg(long, allow_negative_numbers = true)]
    alpha: Option<f64>,

    /// Positive threshold (BUY).
    #[arg(long, allow_negative_numbers = true)]
    pos: Option<f64>,

    /// Negative threshold (SELL).
    #[arg(long, allow_negative_numbers = true)]
    neg: Option<f64>,

    /// Sentiment classifier: "huggingface" or "lexicon".
    #[arg(long)]
    classifier: Option<ClassifierProvider>,

    /// Directory for the scored-headline CSV export.
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Do not write the CSV export.
    #[arg(long)]
    no_save: bool,

    /// Print debug info to stderr.
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Command-line values win over anything loaded from files or the environment.
    fn apply(&self, settings: &mut Settings) {
        if let Some(ticker) = &self.ticker {
            settings.app.default_ticker = ticker.clone();
        }
        if let Some(days) = self.days {
            settings.app.default_days = days;
        }
        if let Some(alpha) = self.alpha {
            settings.scoring.alpha = alpha;
        }
        if let Some(pos) = self.pos {
            settings.scoring.pos_threshold = pos;
        }
        if let Some(neg) = self.neg {
            settings.scoring.neg_threshold = neg;
        }
        if let Some(provider) = self.classifier {
            settings.classifier.provider = provider;
        }
        if let Some(dir) = &self.output_dir {
            settings.app.output_dir = dir.to_string_lossy().into_owned();
        }
        if self.no_save {
            settings.app.save_csv = false;
        }
    }
}

/// `--verbose` only raises our own crates; dependencies stay at WARN.
fn log_targets(verbose: bool) -> Targets {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    WORKSPACE_TARGETS
        .iter()
        .fold(Targets::new().with_default(Level::WARN), |targets, target| {
            targets.with_target(*target, level)
        })
}

const WORKSPACE_TARGETS: &[&str] =
    &["news_sentiment", "engine", "api_client", "scoring", "app_config", "core_types"];

// --- Main Application Entry Point ---

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from a .env file, if it exists.
    dotenvy::dotenv().ok();

    // Parse command-line arguments.
    let cli = Cli::parse();

    // --- Tracing Setup ---
    // Logs go to stderr; stdout carries only the JSON report.
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(log_targets(cli.verbose));
    tracing_subscriber::registry().with(fmt_layer).init();

    // --- 1. Configuration (fatal before any network call) ---
    let mut settings = app_config::load_settings().context("Failed to load configuration")?;
    cli.apply(&mut settings);
    settings.validate().context("Invalid configuration")?;
    tracing::info!(
        ticker = %settings.app.default_ticker,
        days = settings.app.default_days,
        alpha = settings.scoring.alpha,
        pos = settings.scoring.pos_threshold,
        neg = settings.scoring.neg_threshold,
        classifier = %settings.classifier.provider,
        "Application settings loaded successfully."
    );

    // --- 2. Component Instantiation ---
    let source = api_client::new_headline_source(&settings.newsapi)?;
    let classifier = api_client::new_classifier(&settings.classifier)?;
    let engine = Engine::new(&settings.scoring, source, classifier)?;

    // --- 3. Run the pipeline ---
    let request = RunRequest {
        ticker: settings.app.default_ticker.clone(),
        days: settings.app.default_days,
        language: settings.newsapi.language.clone(),
        page_size: settings.newsapi.page_size,
    };
    let run = engine.run(&request, Utc::now()).await?;

    // --- 4. Output JSON to stdout ---
    let report = RunReport::new(&run, &settings.scoring, request.days);
    println!("{}", report.to_json()?);

    // Optional: save scored headlines
    if settings.app.save_csv {
        match export_csv(&run, PathBuf::from(&settings.app.output_dir).as_path()) {
            Ok(Some(path)) => tracing::info!(path = %path.display(), "Scored headlines saved."),
            Ok(None) => tracing::debug!("No scored headlines to save."),
            Err(e) => tracing::warn!(error = %e, "Could not save scored headlines."),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides_settings() {
        let cli = Cli::parse_from([
            "news-sentiment", "--ticker", "aapl", "--days", "3", "--alpha", "0.5",
            "--pos", "0.3", "--neg", "-0.3", "--classifier", "lexicon", "--no-save",
        ]);
        let mut settings = Settings::default();
        cli.apply(&mut settings);

        assert_eq!(settings.app.default_ticker, "aapl");
        assert_eq!(settings.app.default_days, 3);
        assert_eq!(settings.scoring.alpha, 0.5);
        assert_eq!(settings.scoring.pos_threshold, 0.3);
        assert_eq!(settings.scoring.neg_threshold, -0.3);
        assert_eq!(settings.classifier.provider, ClassifierProvider::Lexicon);
        assert!(!settings.app.save_csv);
    }

    #[test]
    fn test_defaults_leave_settings_alone() {
        let cli = Cli::parse_from(["news-sentiment"]);
        let mut settings = Settings::default();
        cli.apply(&mut settings);

        assert_eq!(settings.app.default_ticker, "NVDA");
        assert_eq!(settings.app.default_days, 1);
        assert_eq!(settings.scoring, scoring::ScoringSettings::default());
        assert!(settings.app.save_csv);
    }

    #[test]
    fn test_zero_day_window_is_rejected_by_the_parser() {
        assert!(Cli::try_parse_from(["news-sentiment", "--days", "0"]).is_err());
    }

    #[test]
    fn test_day_window_upper_bound_is_enforced() {
        assert!(Cli::try_parse_from(["news-sentiment", "--days", "3650"]).is_ok());
        assert!(Cli::try_parse_from(["news-sentiment", "--days", "3651"]).is_err());
        assert!(Cli::try_parse_from(["news-sentiment", "--days", "100000000"]).is_err());
    }

    #[test]
    fn test_verbose_raises_only_workspace_crates() {
        let quiet = log_targets(false);
        assert!(quiet.would_enable("engine", &Level::INFO));
        assert!(!quiet.would_enable("engine", &Level::DEBUG));

        let verbose = log_targets(true);
        assert!(verbose.would_enable("engine", &Level::DEBUG));
        assert!(verbose.would_enable("api_client::news_api", &Level::DEBUG));
        assert!(verbose.would_enable("news_sentiment", &Level::DEBUG));
        for dependency in ["hyper_util::client", "h2::codec", "rustls::conn", "reqwest::connect"] {
            assert!(!verbose.would_enable(dependency, &Level::DEBUG));
            assert!(!verbose.would_enable(dependency, &Level::INFO));
            assert!(verbose.would_enable(dependency, &Level::WARN));
        }
    }

    #[test]
    fn test_inverted_thresholds_fail_validation() {
        let cli = Cli::parse_from(["news-sentiment", "--pos", "0.1", "--neg", "0.2"]);
        let mut settings = Settings::default();
        settings.newsapi.api_key = Some("key".to_string());
        cli.apply(&mut settings);
        assert!(matches!(settings.validate(), Err(app_config::Error::InvalidScoring(_))));
    }
}
