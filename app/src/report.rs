// In app/src/report.rs

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::SecondsFormat;
use core_types::{Decision, SentimentLabel};
use engine::SentimentRun;
use scoring::ScoringSettings;
use serde::Serialize;

/// The JSON object printed on stdout at the end of a run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub ticker: String,
    pub timestamp_utc: String,
    pub window_days: u32,
    /// Headlines considered after filtering and de-duplication.
    pub n_headlines: usize,
    pub n_scored: usize,
    pub n_skipped: usize,
    pub score: f64,
    pub decision: Decision,
    pub alpha: f64,
    pub pos_threshold: f64,
    pub neg_threshold: f64,
}

impl RunReport {
    pub fn new(run: &SentimentRun, scoring: &ScoringSettings, window_days: u32) -> Self {
        Self {
            ticker: run.ticker.clone(),
            timestamp_utc: run.window_end.to_rfc3339_opts(SecondsFormat::Secs, true),
            window_days,
            n_headlines: run.considered,
            n_scored: run.scored.len(),
            n_skipped: run.skipped,
            score: run.assessment.score,
            decision: run.assessment.decision,
            alpha: scoring.alpha,
            pos_threshold: scoring.pos_threshold,
            neg_threshold: scoring.neg_threshold,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize the report")
    }
}

/// One line of the scored-headline export.
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    published_at: String,
    title: &'a str,
    description: Option<&'a str>,
    source: Option<&'a str>,
    url: Option<&'a str>,
    label: SentimentLabel,
    confidence: f64,
    signed_value: f64,
}

/// Writes the scored headlines to `{dir}/{TICKER}_{YYYY-MM-DD}.csv`.
///
/// Returns `None` without touching the filesystem when nothing was scored.
pub fn export_csv(run: &SentimentRun, dir: &Path) -> Result<Option<PathBuf>> {
    if run.scored.is_empty() {
        return Ok(None);
    }

    fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    let path = dir.join(format!("{}_{}.csv", run.ticker, run.window_end.format("%Y-%m-%d")));

    let mut writer = csv::Writer::from_path(&path)
        .with_context(|| format!("Failed to open {}", path.display()))?;

    for scored in &run.scored {
        let headline = scored.headline();
        writer.serialize(CsvRow {
            published_at: headline.published_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            title: &headline.text,
            description: headline.description.as_deref(),
            source: headline.source.as_deref(),
            url: headline.url.as_deref(),
            label: scored.label(),
            confidence: scored.confidence(),
            signed_value: scored.signed_value(),
        })?;
    }
    writer.flush()?;

    Ok(Some(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use core_types::{Headline, ScoredHeadline};
    use scoring::Assessment;
    use tempfile::TempDir;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    fn sample_run(scored: Vec<ScoredHeadline>) -> SentimentRun {
        SentimentRun {
            ticker: "NVDA".to_string(),
            window_start: now() - chrono::Duration::days(1),
            window_end: now(),
            fetched: 4,
            considered: 3,
            skipped: 1,
            assessment: Assessment {
                score: 0.4,
                decision: Decision::Buy,
                observations: scored.len(),
            },
            scored,
        }
    }

    fn sample_scored() -> Vec<ScoredHeadline> {
        let mut first = Headline::new("Nvidia beats, guides higher", now() - chrono::Duration::hours(1));
        first.description = Some("Data-center revenue, again, tops forecasts".to_string());
        first.source = Some("Reuters".to_string());
        let second = Headline::new("Export curbs weigh on chip stocks", now() - chrono::Duration::hours(3));

        vec![
            ScoredHeadline::from_parts(first, SentimentLabel::Positive, 0.9).unwrap(),
            ScoredHeadline::from_parts(second, SentimentLabel::Negative, 0.6).unwrap(),
        ]
    }

    #[test]
    fn test_report_json_shape() {
        let run = sample_run(sample_scored());
        let report = RunReport::new(&run, &ScoringSettings::default(), 1);
        let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

        assert_eq!(value["ticker"], "NVDA");
        assert_eq!(value["timestamp_utc"], "2024-05-01T12:00:00Z");
        assert_eq!(value["window_days"], 1);
        assert_eq!(value["n_headlines"], 3);
        assert_eq!(value["n_scored"], 2);
        assert_eq!(value["n_skipped"], 1);
        assert_eq!(value["score"], 0.4);
        assert_eq!(value["decision"], "BUY");
        assert_eq!(value["pos_threshold"], 0.25);
        assert_eq!(value["neg_threshold"], -0.25);
    }

    #[test]
    fn test_csv_export_writes_one_row_per_scored_headline() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("data");
        let path = export_csv(&sample_run(sample_scored()), &out).unwrap().unwrap();

        assert_eq!(path, out.join("NVDA_2024-05-01.csv"));

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(
            headers.iter().collect::<Vec<_>>(),
            vec!["published_at", "title", "description", "source", "url", "label", "confidence", "signed_value"]
        );

        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][0], "2024-05-01T11:00:00Z");
        assert_eq!(&rows[0][2], "Data-center revenue, again, tops forecasts");
        assert_eq!(&rows[0][5], "positive");
        assert_eq!(&rows[1][4], "");
        assert_eq!(&rows[1][5], "negative");
        assert_eq!(&rows[1][7], "-0.6");
    }

    #[test]
    fn test_csv_export_skips_empty_runs() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("data");
        assert!(export_csv(&sample_run(vec![]), &out).unwrap().is_none());
        assert!(!out.exists());
    }
}
