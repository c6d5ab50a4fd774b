use analysis_core::{
    FundamentalAnalyzer, FundamentalsSnapshot, NewsItem, ScoreReport, SentimentAnalyzer,
    TechnicalAnalyzer, TechnicalsSnapshot,
};
use fundamental_analysis::FundamentalAnalysisEngine;
use sentiment_analysis::SentimentAnalysisEngine;
use technical_analysis::TechnicalAnalysisEngine;

pub mod reconcile;
pub mod verdict;

pub use reconcile::{reconcile, ReconciledInputs};
pub use verdict::{synthesize, SwingCall, VerdictInputs, Verdicts};

/// Runs price reconciliation, the three scorers and the verdict synthesizer
pub struct AnalysisOrchestrator {
    fundamental_analyzer: Box<dyn FundamentalAnalyzer>,
    technical_analyzer: Box<dyn TechnicalAnalyzer>,
    sentiment_analyzer: Box<dyn SentimentAnalyzer>,
}

impl AnalysisOrchestrator {
    pub fn new() -> Self {
        Self {
            fundamental_analyzer: Box::new(FundamentalAnalysisEngine::new()),
            technical_analyzer: Box::new(TechnicalAnalysisEngine::new()),
            sentiment_analyzer: Box::new(SentimentAnalysisEngine::new()),
        }
    }

    /// Swap in other scorers, e.g. for a different market's thresholds
    pub fn with_analyzers(
        fundamental_analyzer: Box<dyn FundamentalAnalyzer>,
        technical_analyzer: Box<dyn TechnicalAnalyzer>,
        sentiment_analyzer: Box<dyn SentimentAnalyzer>,
    ) -> Self {
        Self { fundamental_analyzer, technical_analyzer, sentiment_analyzer }
    }

    /// Score one ticker. `None` snapshots mean the fetch layer returned nothing.
    /// Never fails: missing or unparseable inputs degrade to neutral or "N/A".
    pub fn evaluate(
        &self,
        fundamentals: Option<&FundamentalsSnapshot>,
        technicals: Option<&TechnicalsSnapshot>,
        news: &[NewsItem],
    ) -> ScoreReport {
        let ReconciledInputs { cmp, fundamentals, technicals, .. } = reconcile(fundamentals, technicals);
        // Absent fundamentals score nothing; the verdict still reads neutral defaults
        let fundamental = match &fundamentals {
            Some(f) => self.fundamental_analyzer.analyze(f),
            None => self.fundamental_analyzer.unavailable(),
        };
        let fundamentals = fundamentals.unwrap_or_default();
        let technicals = technicals.unwrap_or_else(TechnicalsSnapshot::unavailable);

        let technical = self.technical_analyzer.analyze(&technicals);
        let sentiment = self.sentiment_analyzer.analyze(news);

        let total_score = fundamental.score + technical.score + sentiment.score;
        tracing::info!(
            "Evaluated at cmp {:.2}: total {:.1} (fundamental {:.1}, technical {:.1}, news {:.1})",
            cmp,
            total_score,
            fundamental.score,
            technical.score,
            sentiment.score
        );

        let verdicts = synthesize(&VerdictInputs {
            total_score,
            fundamental_score: fundamental.score,
            technical_score: technical.score,
            cmp,
            fundamentals: &fundamentals,
            technicals: &technicals,
        });

        let mut details = fundamental.details;
        details.extend(technical.details);
        details.extend(sentiment.details);

        ScoreReport {
            fundamental_score: fundamental.score,
            technical_score: technical.score,
            news_score: sentiment.score,
            total_score,
            cmp,
            details,
            swing_verdict: verdicts.swing.verdict,
            swing_action: verdicts.swing.action,
            swing_reason: verdicts.swing.reason,
            swing_plan: verdicts.swing.plan,
            long_term_verdict: verdicts.long_term_verdict,
            long_term_reason: verdicts.long_term_reason,
            final_action: verdicts.final_action,
            health_label: verdicts.health_label,
            risk_triggered: verdicts.risk_triggered,
            fundamental_summary: verdicts.fundamental_summary,
            technical_summary: verdicts.technical_summary,
            news_summary: sentiment_analysis::news_summary(news),
            retail_conclusion: verdicts.retail_conclusion,
        }
    }
}

impl Default for AnalysisOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}

/// Score one ticker with the default scorers
pub fn evaluate(
    fundamentals: Option<&FundamentalsSnapshot>,
    technicals: Option<&TechnicalsSnapshot>,
    news: &[NewsItem],
) -> ScoreReport {
    AnalysisOrchestrator::new().evaluate(fundamentals, technicals, news)
}
