use analysis_core::format::NA;
use analysis_core::rules::{Comparison, Grade, Tier, TierRule, FAIL, PARTIAL, PASS, STATUS_NA};
use analysis_core::{ParameterResult, ScoreCard, TechnicalAnalyzer, TechnicalsSnapshot};

pub const TREND_KEY: &str = "Trend (DMA)";
pub const RSI_KEY: &str = "RSI";
pub const MACD_KEY: &str = "MACD";
pub const PIVOT_KEY: &str = "Pivot Support";
pub const VOLUME_KEY: &str = "Volume Trend";

/// Every technical parameter, in report order
pub const PARAMETERS: [&str; 5] = [TREND_KEY, RSI_KEY, MACD_KEY, PIVOT_KEY, VOLUME_KEY];

/// RSI assumed when the snapshot carries none
pub const NEUTRAL_RSI: f64 = 50.0;

pub const RSI_BANDS: TierRule = TierRule {
    name: "RSI",
    tiers: &[
        Tier::new(Comparison::AtMost, 40.0, PASS, "Oversold (Buy)"),
        Tier::new(Comparison::AtLeast, 70.0, FAIL, "Overbought"),
    ],
    floor: Grade::new(PARTIAL, "Neutral"),
};

const DEFAULT_DATA_NOTE: &str = "Missing Historical Data";

/// Moving-average ribbon classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    StrongBullish,
    FallingKnife,
    BullishAbove200,
    Bearish,
}

impl Trend {
    pub fn classify(close: f64, dma_50: f64, dma_200: f64) -> Self {
        if close > dma_50 && dma_50 > dma_200 {
            Trend::StrongBullish
        } else if close < dma_50 && dma_50 < dma_200 {
            Trend::FallingKnife
        } else if close > dma_200 {
            Trend::BullishAbove200
        } else {
            Trend::Bearish
        }
    }

    pub fn grade(&self) -> Grade {
        match self {
            Trend::StrongBullish => Grade::new(PASS, "Strong Bullish"),
            Trend::FallingKnife => Grade::new(FAIL, "Falling Knife (Bearish)"),
            Trend::BullishAbove200 => Grade::new(PARTIAL, "Bullish (>200DMA)"),
            Trend::Bearish => Grade::new(FAIL, "Bearish"),
        }
    }
}

pub struct TechnicalAnalysisEngine;

impl TechnicalAnalysisEngine {
    pub fn new() -> Self {
        Self
    }

    /// All five parameters at zero with an explanation on the trend line
    fn unavailable(&self, t: &TechnicalsSnapshot) -> ScoreCard {
        let note = t.data_note.as_deref().unwrap_or(DEFAULT_DATA_NOTE);
        let trend_status = match t.data_source.as_deref() {
            Some(source) if source != NA => format!("{} (Source: {})", note, source),
            _ => note.to_string(),
        };

        let mut card = ScoreCard::default();
        card.record(TREND_KEY, ParameterResult::not_available(trend_status));
        for key in [RSI_KEY, MACD_KEY, PIVOT_KEY, VOLUME_KEY] {
            card.record(key, ParameterResult::not_available(STATUS_NA));
        }
        tracing::debug!("Technical indicators unavailable: {}", note);
        card
    }
}

impl TechnicalAnalyzer for TechnicalAnalysisEngine {
    fn analyze(&self, t: &TechnicalsSnapshot) -> ScoreCard {
        if !t.indicators_available {
            return self.unavailable(t);
        }

        let mut card = ScoreCard::default();
        let close = t.close.or(0.0);
        let dma_50 = t.dma_50.or(0.0);
        let dma_200 = t.dma_200.or(0.0);

        let trend = Trend::classify(close, dma_50, dma_200).grade();
        card.record(
            TREND_KEY,
            ParameterResult::new(
                format!("{:.0} vs {:.0}", close, dma_200),
                trend.score,
                trend.status,
            ),
        );

        let rsi = RSI_BANDS.grade(&t.rsi, NEUTRAL_RSI);
        let rsi_value = if t.rsi.is_invalid() {
            NA.to_string()
        } else {
            format!("{:.1}", t.rsi.or(NEUTRAL_RSI))
        };
        card.record(RSI_KEY, ParameterResult::new(rsi_value, rsi.score, rsi.status));

        let macd = t.macd.or(0.0);
        let signal = t.macd_signal.or(0.0);
        let (score, status) = if macd > signal { (PASS, "Bullish") } else { (FAIL, "Bearish") };
        card.record(MACD_KEY, ParameterResult::new(format!("{:.2}", macd), score, status));

        let pivot = t.pivot.or(0.0);
        let (score, status) = if close > pivot { (PASS, "Above Pivot") } else { (FAIL, "Below Pivot") };
        card.record(PIVOT_KEY, ParameterResult::new(format!("{:.1}", pivot), score, status));

        let vwap = t.vwap_trend.as_deref().unwrap_or(NA);
        let score = if vwap == "Bullish" { PASS } else { FAIL };
        let volume = t.volume_trend.as_deref().unwrap_or(NA);
        card.record(VOLUME_KEY, ParameterResult::new(volume, score, vwap));

        tracing::debug!("Technical score {:.1}", card.score);
        card
    }
}

impl Default for TechnicalAnalysisEngine {
    fn default() -> Self {
        Self::new()
    }
}
