use analysis_core::{AnalysisError, FundamentalsSnapshot, NewsItem, ScoreReport, TechnicalsSnapshot};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Pre-fetched inputs for one ticker, as written by the fetch layer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotBundle {
    pub symbol: Option<String>,
    pub fundamentals: Option<FundamentalsSnapshot>,
    pub technicals: Option<TechnicalsSnapshot>,
    pub news: Vec<NewsItem>,
}

impl SnapshotBundle {
    pub fn load(path: &Path) -> Result<Self, AnalysisError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, AnalysisError> {
        let value: serde_json::Value = serde_json::from_str(raw)?;
        if !value.is_object() {
            return Err(AnalysisError::InvalidData(
                "snapshot bundle must be a JSON object".to_string(),
            ));
        }
        Ok(serde_json::from_value(value)?)
    }
}

/// JSON output wrapper
#[derive(Debug, Clone, Serialize)]
pub struct ReportEnvelope<'a> {
    pub symbol: &'a str,
    pub generated_at: DateTime<Utc>,
    pub report: &'a ScoreReport,
}

impl<'a> ReportEnvelope<'a> {
    pub fn new(symbol: &'a str, report: &'a ScoreReport) -> Self {
        Self { symbol, generated_at: Utc::now(), report }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use analysis_core::{Metric, Sentiment};
    use std::io::Write;

    #[test]
    fn test_load_bundle_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "symbol": "INFY",
                "fundamentals": {{"Current Price": "1,520.5", "Market Cap": 630000}},
                "technicals": null,
                "news": [{{"title": "Deal win", "category": "Orders/Contracts", "sentiment": "Positive"}}]
            }}"#
        )
        .unwrap();

        let bundle = SnapshotBundle::load(file.path()).unwrap();
        assert_eq!(bundle.symbol.as_deref(), Some("INFY"));
        let f = bundle.fundamentals.unwrap();
        assert_eq!(f.current_price, Metric::Value(1520.5));
        assert!(bundle.technicals.is_none());
        assert_eq!(bundle.news.len(), 1);
        assert_eq!(bundle.news[0].sentiment, Sentiment::Positive);
    }

    #[test]
    fn test_news_with_null_fields_loads() {
        let bundle = SnapshotBundle::from_json(
            r#"{"news": [{"title": "Results", "link": null, "category": null, "sentiment": null}]}"#,
        )
        .unwrap();
        assert_eq!(bundle.news.len(), 1);
        assert_eq!(bundle.news[0].link, "");
        assert_eq!(bundle.news[0].category, "General");
        assert_eq!(bundle.news[0].sentiment, Sentiment::Neutral);
    }

    #[test]
    fn test_missing_sections_default() {
        let bundle = SnapshotBundle::from_json("{}").unwrap();
        assert_eq!(bundle, SnapshotBundle::default());
    }

    #[test]
    fn test_load_errors() {
        let dir = tempfile::tempdir().unwrap();
        let err = SnapshotBundle::load(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, AnalysisError::Io(_)));

        assert!(matches!(SnapshotBundle::from_json("{not json").unwrap_err(), AnalysisError::Decode(_)));
        assert!(matches!(SnapshotBundle::from_json("[1, 2]").unwrap_err(), AnalysisError::InvalidData(_)));
    }

    #[test]
    fn test_envelope_shape() {
        let report = analysis_orchestrator::evaluate(None, None, &[]);
        let envelope = ReportEnvelope::new("TCS", &report);
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["symbol"], "TCS");
        assert!(json["generated_at"].as_str().unwrap().contains('T'));
        assert_eq!(json["report"]["cmp"], 0.0);
    }
}
