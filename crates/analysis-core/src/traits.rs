use crate::{FundamentalsSnapshot, NewsItem, ScoreCard, TechnicalsSnapshot};

/// Trait for fundamental scoring engines
pub trait FundamentalAnalyzer: Send + Sync {
    fn analyze(&self, fundamentals: &FundamentalsSnapshot) -> ScoreCard;

    /// Card for a ticker with no fundamentals at all: every parameter N/A, score 0
    fn unavailable(&self) -> ScoreCard;
}

/// Trait for technical scoring engines
pub trait TechnicalAnalyzer: Send + Sync {
    fn analyze(&self, technicals: &TechnicalsSnapshot) -> ScoreCard;
}

/// Trait for news sentiment scoring engines
pub trait SentimentAnalyzer: Send + Sync {
    fn analyze(&self, news: &[NewsItem]) -> ScoreCard;
}
