use analysis_core::rules::{Grade, FAIL, PARTIAL, PASS, STATUS_NEGATIVE, STATUS_NEUTRAL, STATUS_POSITIVE};
use analysis_core::{NewsItem, ParameterResult, ScoreCard, Sentiment, SentimentAnalyzer};

pub mod summary;
pub use summary::news_summary;

pub const ORDERS_KEY: &str = "Orders / Business";
pub const DIVIDEND_KEY: &str = "Dividend / Buyback";
pub const RESULTS_KEY: &str = "Results Performance";
pub const REGULATORY_KEY: &str = "Regulatory / Credit";
pub const SECTOR_KEY: &str = "Sector vs Nifty";
pub const PEER_KEY: &str = "Peer Comparison";
pub const PLEDGE_KEY: &str = "Promoter Pledge";
pub const MANAGEMENT_KEY: &str = "Management";

/// Every news parameter, in report order
pub const PARAMETERS: [&str; 8] = [
    ORDERS_KEY,
    DIVIDEND_KEY,
    RESULTS_KEY,
    REGULATORY_KEY,
    SECTOR_KEY,
    PEER_KEY,
    PLEDGE_KEY,
    MANAGEMENT_KEY,
];

/// Net positive count that has to be exceeded to move off neutral
const NET_SENTIMENT_MARGIN: i64 = 1;

/// How a news parameter is graded
#[derive(Debug, Clone, Copy, PartialEq)]
enum NewsRule {
    /// Carries the overall sentiment grade
    Sentiment,
    /// Fixed grade regardless of news
    Fixed(Grade),
    /// Displays `shown` but adds `contribution` to the total
    Placeholder { shown: Grade, contribution: f64 },
}

struct NewsParameter {
    name: &'static str,
    value: Option<&'static str>,
    rule: NewsRule,
}

const NEUTRAL: Grade = Grade::new(PARTIAL, STATUS_NEUTRAL);
const SAFE_PLACEHOLDER: NewsRule =
    NewsRule::Placeholder { shown: Grade::new(PARTIAL, "Safe"), contribution: PASS };

/// `None` as a value means the positive/negative tally is displayed
const NEWS_PARAMETERS: [NewsParameter; 8] = [
    NewsParameter { name: ORDERS_KEY, value: None, rule: NewsRule::Sentiment },
    NewsParameter { name: DIVIDEND_KEY, value: Some("Check News"), rule: NewsRule::Fixed(NEUTRAL) },
    NewsParameter { name: RESULTS_KEY, value: Some("News Sentiment"), rule: NewsRule::Sentiment },
    NewsParameter { name: REGULATORY_KEY, value: Some("Stable"), rule: NewsRule::Fixed(NEUTRAL) },
    NewsParameter { name: SECTOR_KEY, value: Some("Trend"), rule: NewsRule::Sentiment },
    NewsParameter { name: PEER_KEY, value: Some("Fair"), rule: NewsRule::Fixed(NEUTRAL) },
    NewsParameter { name: PLEDGE_KEY, value: Some("Stable"), rule: SAFE_PLACEHOLDER },
    NewsParameter { name: MANAGEMENT_KEY, value: Some("Stable"), rule: SAFE_PLACEHOLDER },
];

/// Positive/negative/total counts over a news list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SentimentTally {
    pub positive: usize,
    pub negative: usize,
    pub total: usize,
}

impl SentimentTally {
    pub fn from_items(items: &[NewsItem]) -> Self {
        let mut tally = Self { total: items.len(), ..Self::default() };
        for item in items {
            match item.sentiment {
                Sentiment::Positive => tally.positive += 1,
                Sentiment::Negative => tally.negative += 1,
                Sentiment::Neutral => {}
            }
        }
        tally
    }

    pub fn net(&self) -> i64 {
        self.positive as i64 - self.negative as i64
    }

    /// Overall grade shared by the sentiment-driven parameters
    pub fn grade(&self) -> Grade {
        if self.total == 0 {
            return NEUTRAL;
        }
        let net = self.net();
        if net > NET_SENTIMENT_MARGIN {
            Grade::new(PASS, STATUS_POSITIVE)
        } else if net < -NET_SENTIMENT_MARGIN {
            Grade::new(FAIL, STATUS_NEGATIVE)
        } else {
            NEUTRAL
        }
    }
}

pub struct SentimentAnalysisEngine;

impl SentimentAnalysisEngine {
    pub fn new() -> Self {
        Self
    }
}

impl SentimentAnalyzer for SentimentAnalysisEngine {
    fn analyze(&self, news: &[NewsItem]) -> ScoreCard {
        let tally = SentimentTally::from_items(news);
        let sentiment = tally.grade();
        let tally_text = format!("+{}/-{}", tally.positive, tally.negative);

        let mut card = ScoreCard::default();
        for param in &NEWS_PARAMETERS {
            let value = param.value.map(str::to_string).unwrap_or_else(|| tally_text.clone());
            match param.rule {
                NewsRule::Sentiment => {
                    card.record(param.name, ParameterResult::new(value, sentiment.score, sentiment.status));
                }
                NewsRule::Fixed(grade) => {
                    card.record(param.name, ParameterResult::new(value, grade.score, grade.status));
                }
                NewsRule::Placeholder { shown, contribution } => {
                    card.record_with_contribution(
                        param.name,
                        ParameterResult::new(value, shown.score, shown.status),
                        contribution,
                    );
                }
            }
        }

        tracing::debug!(
            "News score {:.1} from {} items (+{}/-{})",
            card.score,
            tally.total,
            tally.positive,
            tally.negative
        );
        card
    }
}

impl Default for SentimentAnalysisEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(positive: usize, negative: usize, neutral: usize) -> Vec<NewsItem> {
        let mut news = Vec::new();
        news.extend((0..positive).map(|i| NewsItem::new(format!("up {}", i), "General", Sentiment::Positive)));
        news.extend((0..negative).map(|i| NewsItem::new(format!("down {}", i), "General", Sentiment::Negative)));
        news.extend((0..neutral).map(|i| NewsItem::new(format!("flat {}", i), "General", Sentiment::Neutral)));
        news
    }

    #[test]
    fn test_empty_news_is_neutral() {
        let card = SentimentAnalysisEngine::new().analyze(&[]);
        // Three sentiment params and three fixed at 0.5, two placeholders at 1
        assert!((card.score - 5.0).abs() < 1e-9);
        assert_eq!(card.details.len(), PARAMETERS.len());
        assert_eq!(card.details.get(ORDERS_KEY).unwrap().value, "+0/-0");
        assert_eq!(card.details.get(ORDERS_KEY).unwrap().status, "Neutral");
    }

    #[test]
    fn test_positive_news() {
        let card = SentimentAnalysisEngine::new().analyze(&items(3, 1, 0));
        assert!((card.score - 6.5).abs() < 1e-9);
        for key in [ORDERS_KEY, RESULTS_KEY, SECTOR_KEY] {
            let result = card.details.get(key).unwrap();
            assert_eq!(result.score, 1.0);
            assert_eq!(result.status, "Positive");
        }
        assert_eq!(card.details.get(ORDERS_KEY).unwrap().value, "+3/-1");
    }

    #[test]
    fn test_negative_news() {
        let card = SentimentAnalysisEngine::new().analyze(&items(0, 3, 2));
        assert!((card.score - 3.5).abs() < 1e-9);
        assert_eq!(card.details.get(SECTOR_KEY).unwrap().status, "Negative");
        assert_eq!(card.details.get(DIVIDEND_KEY).unwrap().score, 0.5);
    }

    #[test]
    fn test_net_of_one_stays_neutral() {
        assert_eq!(SentimentTally::from_items(&items(2, 1, 0)).grade().status, "Neutral");
        assert_eq!(SentimentTally::from_items(&items(1, 2, 0)).grade().status, "Neutral");
        assert_eq!(SentimentTally::from_items(&items(3, 1, 0)).grade().status, "Positive");
    }

    #[test]
    fn test_placeholders_display_half_but_add_one() {
        let card = SentimentAnalysisEngine::new().analyze(&items(0, 5, 0));
        for key in [PLEDGE_KEY, MANAGEMENT_KEY] {
            let result = card.details.get(key).unwrap();
            assert_eq!(result.score, 0.5);
            assert_eq!(result.status, "Safe");
            assert_eq!(result.value, "Stable");
        }
        // 0 + 0.5 + 0 + 0.5 + 0 + 0.5 + 1 + 1
        assert!((card.score - 3.5).abs() < 1e-9);
    }

    #[test]
    fn test_parameter_order() {
        let card = SentimentAnalysisEngine::new().analyze(&items(1, 0, 0));
        let keys: Vec<&str> = card.details.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, PARAMETERS.to_vec());
    }
}
