use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::metric::Metric;

/// Parameters reported per evaluation: 26 fundamental + 5 technical + 8 news
pub const TOTAL_PARAMETERS: usize = 39;

/// Fixed denominator shown in captions ("x/37"). Not a computed maximum.
pub const DISPLAY_SCORE_DENOMINATOR: f64 = 37.0;

/// Scraped fundamental ratios, keyed by the names the scraping layer emits
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FundamentalsSnapshot {
    #[serde(rename = "Market Cap")]
    pub market_cap: Metric,
    #[serde(rename = "Current Price")]
    pub current_price: Metric,
    #[serde(rename = "High_52")]
    pub high_52: Metric,
    #[serde(rename = "Low_52")]
    pub low_52: Metric,
    #[serde(rename = "Stock P/E")]
    pub stock_pe: Metric,
    #[serde(rename = "Industry PE")]
    pub industry_pe: Metric,
    #[serde(rename = "PEG Ratio")]
    pub peg_ratio: Metric,
    #[serde(rename = "EPS Trend")]
    pub eps_trend: Metric,
    #[serde(rename = "EBITDA Trend")]
    pub ebitda_trend: Metric,
    #[serde(rename = "Debt / Equity")]
    pub debt_to_equity: Metric,
    #[serde(rename = "Dividend Yield")]
    pub dividend_yield: Metric,
    #[serde(rename = "Intrinsic Value")]
    pub intrinsic_value: Metric,
    #[serde(rename = "Current Ratio")]
    pub current_ratio: Metric,
    #[serde(rename = "Promoter Holding")]
    pub promoter_holding: Metric,
    #[serde(rename = "FII/DII Change")]
    pub fii_dii_change: Metric,
    #[serde(rename = "Operating Cash Flow")]
    pub operating_cash_flow: Metric,
    #[serde(rename = "Net Profit")]
    pub net_profit: Metric,
    #[serde(rename = "Sales")]
    pub sales: Metric,
    #[serde(rename = "Free Cash Flow")]
    pub free_cash_flow: Metric,
    #[serde(rename = "ROCE")]
    pub roce: Metric,
    #[serde(rename = "ROE")]
    pub roe: Metric,
    #[serde(rename = "Revenue CAGR")]
    pub revenue_cagr: Metric,
    #[serde(rename = "Profit CAGR")]
    pub profit_cagr: Metric,
    #[serde(rename = "Interest Coverage")]
    pub interest_coverage: Metric,
    /// 0-9 composite from an external source
    #[serde(rename = "Piotroski Score")]
    pub piotroski_score: Metric,
    #[serde(rename = "Pledged Shares")]
    pub pledged_shares: Metric,
    #[serde(rename = "Contingent Liabilities")]
    pub contingent_liabilities: Metric,
    #[serde(rename = "Net Worth")]
    pub net_worth: Metric,
    #[serde(rename = "CFO to PAT")]
    pub cfo_to_pat: Metric,
    #[serde(rename = "Book Value")]
    pub book_value: Metric,
    #[serde(rename = "Price to Book")]
    pub price_to_book: Metric,
    #[serde(rename = "Industry PB")]
    pub industry_pb: Metric,
}

fn default_true() -> bool {
    true
}

/// Pre-computed technical indicators for the latest session.
///
/// When `indicators_available` is false the indicator fields hold placeholder
/// defaults from the fetch layer and must not be scored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TechnicalsSnapshot {
    #[serde(rename = "Close")]
    pub close: Metric,
    #[serde(rename = "50DMA")]
    pub dma_50: Metric,
    #[serde(rename = "200DMA")]
    pub dma_200: Metric,
    #[serde(rename = "RSI")]
    pub rsi: Metric,
    #[serde(rename = "MACD")]
    pub macd: Metric,
    #[serde(rename = "MACD_SIGNAL")]
    pub macd_signal: Metric,
    #[serde(rename = "Pivot")]
    pub pivot: Metric,
    #[serde(rename = "S1")]
    pub s1: Metric,
    #[serde(rename = "R1")]
    pub r1: Metric,
    #[serde(rename = "Volume_Trend")]
    pub volume_trend: Option<String>,
    #[serde(rename = "VWAP_Trend")]
    pub vwap_trend: Option<String>,
    #[serde(rename = "Live Price")]
    pub live_price: Metric,
    #[serde(default = "default_true")]
    pub indicators_available: bool,
    pub data_source: Option<String>,
    pub data_note: Option<String>,
}

impl Default for TechnicalsSnapshot {
    fn default() -> Self {
        Self {
            close: Metric::Missing,
            dma_50: Metric::Missing,
            dma_200: Metric::Missing,
            rsi: Metric::Missing,
            macd: Metric::Missing,
            macd_signal: Metric::Missing,
            pivot: Metric::Missing,
            s1: Metric::Missing,
            r1: Metric::Missing,
            volume_trend: None,
            vwap_trend: None,
            live_price: Metric::Missing,
            indicators_available: true,
            data_source: None,
            data_note: None,
        }
    }
}

impl TechnicalsSnapshot {
    /// Snapshot standing in for "no technical data at all"
    pub fn unavailable() -> Self {
        Self {
            indicators_available: false,
            ..Self::default()
        }
    }
}

/// News sentiment tag
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum Sentiment {
    Positive,
    Negative,
    #[default]
    Neutral,
}

impl Sentiment {
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "positive" => Sentiment::Positive,
            "negative" => Sentiment::Negative,
            _ => Sentiment::Neutral,
        }
    }
}

impl<'de> Deserialize<'de> for Sentiment {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Anything that is not a string label reads as neutral
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(value.as_str().map(Sentiment::from_label).unwrap_or_default())
    }
}

fn default_category() -> String {
    "General".to_string()
}

/// News feeds write `null` for fields they could not fill
fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_general<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(default_category))
}

/// A sentiment-tagged news item produced by the news layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub source: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub link: String,
    #[serde(rename = "pubDate", default)]
    pub pub_date: Option<String>,
    #[serde(default = "default_category", deserialize_with = "null_as_general")]
    pub category: String,
    #[serde(default)]
    pub sentiment: Sentiment,
}

impl NewsItem {
    pub fn new(title: impl Into<String>, category: impl Into<String>, sentiment: Sentiment) -> Self {
        Self {
            source: String::new(),
            title: title.into(),
            link: String::new(),
            pub_date: None,
            category: category.into(),
            sentiment,
        }
    }
}

/// Graded outcome for one named parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterResult {
    pub value: String,
    /// One of 0, 0.5, 1
    pub score: f64,
    pub status: String,
}

impl ParameterResult {
    pub fn new(value: impl Into<String>, score: f64, status: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            score,
            status: status.into(),
        }
    }

    pub fn not_available(status: impl Into<String>) -> Self {
        Self::new("N/A", 0.0, status)
    }
}

/// Insertion-ordered map of parameter name to result
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Details(Vec<(String, ParameterResult)>);

impl Details {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace, keeping the original position on replace
    pub fn insert(&mut self, name: impl Into<String>, result: ParameterResult) {
        let name = name.into();
        match self.0.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = result,
            None => self.0.push((name, result)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&ParameterResult> {
        self.0.iter().find(|(n, _)| n == name).map(|(_, r)| r)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParameterResult)> {
        self.0.iter().map(|(n, r)| (n.as_str(), r))
    }

    pub fn extend(&mut self, other: Details) {
        for (name, result) in other.0 {
            self.insert(name, result);
        }
    }
}

impl Serialize for Details {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, result) in &self.0 {
            map.serialize_entry(name, result)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Details {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DetailsVisitor;

        impl<'de> Visitor<'de> for DetailsVisitor {
            type Value = Details;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of parameter name to result")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Details, A::Error> {
                let mut details = Details::new();
                while let Some((name, result)) = access.next_entry::<String, ParameterResult>()? {
                    details.insert(name, result);
                }
                Ok(details)
            }
        }

        deserializer.deserialize_map(DetailsVisitor)
    }
}

/// Sub-score produced by one scorer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreCard {
    pub score: f64,
    pub details: Details,
}

impl ScoreCard {
    /// Record a parameter whose displayed score is also its contribution
    pub fn record(&mut self, name: &str, result: ParameterResult) {
        let contribution = result.score;
        self.record_with_contribution(name, result, contribution);
    }

    /// Record a parameter whose contribution to the total differs from the
    /// score shown in its details entry
    pub fn record_with_contribution(&mut self, name: &str, result: ParameterResult, contribution: f64) {
        self.score += contribution;
        self.details.insert(name, result);
    }
}

/// Trading verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    Buy,
    Hold,
    Avoid,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Buy => "BUY",
            Verdict::Hold => "HOLD",
            Verdict::Avoid => "AVOID",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Long-term health label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthLabel {
    #[serde(rename = "High Quality")]
    HighQuality,
    #[serde(rename = "Medium Risk")]
    MediumRisk,
    #[serde(rename = "High Risk")]
    HighRisk,
    #[serde(rename = "High Risk (Avoid)")]
    HighRiskAvoid,
}

impl HealthLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthLabel::HighQuality => "High Quality",
            HealthLabel::MediumRisk => "Medium Risk",
            HealthLabel::HighRisk => "High Risk",
            HealthLabel::HighRiskAvoid => "High Risk (Avoid)",
        }
    }
}

impl fmt::Display for HealthLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Price levels behind the swing verdict
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SwingPlan {
    Entry { entry: f64, target: f64, stop_loss: f64 },
    Wait { support: f64 },
    Unavailable,
}

impl SwingPlan {
    pub fn support(&self) -> Option<f64> {
        match self {
            SwingPlan::Wait { support } => Some(*support),
            _ => None,
        }
    }
}

/// Output of one evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub fundamental_score: f64,
    pub technical_score: f64,
    pub news_score: f64,
    pub total_score: f64,
    /// Reconciled current market price
    pub cmp: f64,
    pub details: Details,
    pub swing_verdict: Verdict,
    pub swing_action: String,
    pub swing_reason: String,
    pub swing_plan: SwingPlan,
    pub long_term_verdict: Verdict,
    pub long_term_reason: String,
    pub final_action: String,
    pub health_label: HealthLabel,
    pub risk_triggered: bool,
    pub fundamental_summary: String,
    pub technical_summary: String,
    pub news_summary: String,
    pub retail_conclusion: String,
}
