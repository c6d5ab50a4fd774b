//! Swing and long-term verdicts with the explanatory text shown to users.

use analysis_core::format::rupees;
use analysis_core::{
    FundamentalsSnapshot, HealthLabel, SwingPlan, TechnicalsSnapshot, Verdict,
    DISPLAY_SCORE_DENOMINATOR,
};

/// Long-term BUY when the total reaches this
pub const BUY_THRESHOLD: f64 = 25.0;
/// Long-term HOLD when the total reaches this
pub const HOLD_THRESHOLD: f64 = 15.0;

const SWING_BUY_SIGNALS: u8 = 2;
const SWING_TARGET: f64 = 1.1;
const SWING_STOP_LOSS: f64 = 0.95;
/// Support candidates must sit at least 1% under the close
const SUPPORT_BUFFER: f64 = 0.99;
const FALLBACK_SUPPORT: f64 = 0.95;
const WATCH_LEVEL: f64 = 0.95;

const NEUTRAL_RSI: f64 = 50.0;
const RSI_SWING_OVERSOLD: f64 = 40.0;
const RSI_OVERSOLD: f64 = 30.0;
const RSI_OVERBOUGHT: f64 = 70.0;

const RISKY_CFO_TO_PAT: f64 = 0.5;
const RISKY_DEBT_TO_EQUITY: f64 = 1.0;

const TECH_UNAVAILABLE: &str = "Historical price data (technicals) not available for this ticker.";

const RETAIL_RISKY: &str = "The company shows critical financial weakness with negative cash flows. \
Despite any other positives, this is a distinct 'Red Flag'. Capital preservation is priority; look elsewhere.";
const RETAIL_BUY: &str = "A stellar compounding candidate. The company exhibits high efficiency, low leverage, \
and price momentum. Ideal for long-term allocation, and swing traders can ride the trend.";
const RETAIL_HOLD: &str = "The company is fundamentally sound but lacks a convincing edge right now. \
It falls into the 'Wait and Watch' category. Accumulate only if you have high conviction in the sector.";
const RETAIL_AVOID: &str = "Avoid this stock. The combination of weak fundamentals and bearish technicals \
makes it a wealth destroyer. Do not attempt to bottom fish.";

/// Everything the synthesizer reads. Snapshots are the reconciled ones.
#[derive(Debug, Clone, Copy)]
pub struct VerdictInputs<'a> {
    pub total_score: f64,
    pub fundamental_score: f64,
    pub technical_score: f64,
    pub cmp: f64,
    pub fundamentals: &'a FundamentalsSnapshot,
    pub technicals: &'a TechnicalsSnapshot,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SwingCall {
    pub verdict: Verdict,
    pub action: String,
    pub reason: String,
    pub plan: SwingPlan,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Verdicts {
    pub swing: SwingCall,
    pub long_term_verdict: Verdict,
    pub long_term_reason: String,
    pub final_action: String,
    pub health_label: HealthLabel,
    pub risk_triggered: bool,
    pub fundamental_summary: String,
    pub technical_summary: String,
    pub retail_conclusion: String,
}

/// Indicator readings with the verdict defaults applied
#[derive(Debug, Clone, Copy)]
struct Readings {
    close: f64,
    dma_50: f64,
    dma_200: f64,
    s1: f64,
    rsi: f64,
    macd: f64,
    macd_signal: f64,
}

impl Readings {
    fn new(t: &TechnicalsSnapshot, close: f64) -> Self {
        Self {
            close,
            dma_50: t.dma_50.or(0.0),
            dma_200: t.dma_200.or(0.0),
            s1: t.s1.or(0.0),
            // The fetch layer writes 0 when RSI could not be computed
            rsi: t.rsi.or_if_zero(NEUTRAL_RSI),
            macd: t.macd.or(0.0),
            macd_signal: t.macd_signal.or(0.0),
        }
    }

    fn above_dma_50(&self) -> bool {
        self.close > self.dma_50
    }

    fn macd_bullish(&self) -> bool {
        self.macd > self.macd_signal
    }

    fn swing_signals(&self) -> u8 {
        [self.above_dma_50(), self.macd_bullish(), self.rsi < RSI_SWING_OVERSOLD]
            .iter()
            .filter(|hit| **hit)
            .count() as u8
    }

    /// Nearest support under the close
    fn support(&self) -> f64 {
        let ceiling = self.close * SUPPORT_BUFFER;
        let candidates: Vec<f64> = [self.s1, self.dma_50]
            .into_iter()
            .filter(|level| *level > 0.0 && *level < ceiling)
            .collect();

        if candidates.is_empty() {
            if self.dma_200 > 0.0 && self.dma_200 < self.close {
                self.dma_200
            } else {
                self.close * FALLBACK_SUPPORT
            }
        } else {
            candidates.into_iter().fold(f64::MIN, f64::max)
        }
    }
}

/// Fundamental ratios used by the risk rule and the strengths list
#[derive(Debug, Clone, Copy)]
struct KeyRatios {
    pe: f64,
    roce: f64,
    debt: f64,
    revenue_growth: f64,
    pledge: f64,
    ocf: f64,
    cfo_to_pat: f64,
}

impl KeyRatios {
    fn new(f: &FundamentalsSnapshot) -> Self {
        Self {
            pe: f.stock_pe.or(0.0),
            roce: f.roce.or(0.0),
            debt: f.debt_to_equity.or(0.0),
            revenue_growth: f.revenue_cagr.or(0.0),
            pledge: f.pledged_shares.or(0.0),
            ocf: f.operating_cash_flow.or(0.0),
            // The scraper writes 0 for "not found"
            cfo_to_pat: f.cfo_to_pat.or_if_zero(1.0),
        }
    }

    /// Negative cash flow, or weak cash conversion on a leveraged balance sheet
    fn is_risky(&self) -> bool {
        self.ocf < 0.0 || (self.cfo_to_pat < RISKY_CFO_TO_PAT && self.debt > RISKY_DEBT_TO_EQUITY)
    }

    fn strengths(&self) -> Vec<&'static str> {
        let mut pros = Vec::new();
        if self.pe > 0.0 && self.pe < 30.0 {
            pros.push("Attractive Valuation");
        }
        if self.roce > 20.0 {
            pros.push("High Capital Efficiency (ROCE > 20%)");
        }
        if self.debt < 0.5 {
            pros.push("Low Debt");
        }
        if self.revenue_growth > 15.0 {
            pros.push("Robust Revenue Growth");
        }
        pros
    }

    fn weaknesses(&self) -> Vec<&'static str> {
        let mut cons = Vec::new();
        if self.pe > 50.0 {
            cons.push("Expensive Valuation");
        }
        if self.roce < 10.0 {
            cons.push("Low Efficiency");
        }
        if self.debt > 1.0 {
            cons.push("High Leverage");
        }
        if self.pledge > 0.0 {
            cons.push("Promoter Pledging Present");
        }
        if self.ocf < 0.0 {
            cons.push("Negative Operating Cash Flow");
        }
        cons
    }
}

pub fn swing_call(technicals: &TechnicalsSnapshot, close: f64) -> SwingCall {
    if !technicals.indicators_available {
        let reason = match technicals.data_note.as_deref() {
            Some(note) => format!("{}. No swing setup can be evaluated without price history", note),
            None => "No swing setup can be evaluated without price history".to_string(),
        };
        return SwingCall {
            verdict: Verdict::Avoid,
            action: "Technical indicators unavailable".to_string(),
            reason,
            plan: SwingPlan::Unavailable,
        };
    }

    let r = Readings::new(technicals, close);
    if r.swing_signals() >= SWING_BUY_SIGNALS {
        let target = close * SWING_TARGET;
        let stop_loss = close * SWING_STOP_LOSS;

        let mut reasons = Vec::new();
        if r.above_dma_50() {
            reasons.push("Price above 50DMA indicates uptrend".to_string());
        }
        if r.macd_bullish() {
            reasons.push("MACD bullish crossover".to_string());
        }
        if r.rsi < RSI_SWING_OVERSOLD {
            reasons.push(format!("RSI at {:.1} (oversold, potential bounce)", r.rsi));
        }

        SwingCall {
            verdict: Verdict::Buy,
            action: format!(
                "Entry: {} | Target: {} | Stop Loss: {}",
                rupees(close),
                rupees(target),
                rupees(stop_loss)
            ),
            reason: join_or(&reasons, "Strong technical setup with positive momentum"),
            plan: SwingPlan::Entry { entry: close, target, stop_loss },
        }
    } else {
        let support = r.support();

        let mut reasons = Vec::new();
        if r.close < r.dma_50 {
            reasons.push("Price below 50DMA indicates downtrend".to_string());
        }
        if r.rsi > RSI_OVERBOUGHT {
            reasons.push(format!("RSI at {:.1} (overbought)", r.rsi));
        } else if r.rsi > NEUTRAL_RSI {
            reasons.push("RSI in neutral zone, no clear signal".to_string());
        }
        if r.macd < r.macd_signal {
            reasons.push("MACD bearish (momentum weakening)".to_string());
        }

        SwingCall {
            verdict: Verdict::Avoid,
            action: format!("Wait for reversal. Support @ {}", rupees(support)),
            reason: join_or(&reasons, "Weak technical indicators, wait for better entry"),
            plan: SwingPlan::Wait { support },
        }
    }
}

fn join_or(parts: &[String], fallback: &str) -> String {
    if parts.is_empty() {
        fallback.to_string()
    } else {
        parts.join(". ")
    }
}

fn strengths_text(pros: &[&str], cons: &[&str]) -> String {
    let mut text = if pros.is_empty() {
        "No major strengths".to_string()
    } else {
        format!("Strengths: {}", pros.join(", "))
    };
    if !cons.is_empty() {
        text.push_str(". Weaknesses: ");
        text.push_str(&cons.join(", "));
    }
    text.push('.');
    text
}

fn technical_text(technicals: &TechnicalsSnapshot, close: f64) -> String {
    if !technicals.indicators_available {
        return TECH_UNAVAILABLE.to_string();
    }
    let r = Readings::new(technicals, close);
    let mut signals = Vec::new();
    signals.push(if r.above_dma_50() { "Price above 50DMA (Uptrend)" } else { "Price below 50DMA (Weakness)" });
    if r.rsi < RSI_OVERSOLD {
        signals.push("Oversold (RSI < 30)");
    } else if r.rsi > RSI_OVERBOUGHT {
        signals.push("Overbought (RSI > 70)");
    }
    signals.push(if r.macd_bullish() { "Bullish MACD Crossover" } else { "Bearish MACD Divergence" });
    format!("{}.", signals.join(", "))
}

pub fn synthesize(inputs: &VerdictInputs<'_>) -> Verdicts {
    let ratios = KeyRatios::new(inputs.fundamentals);
    let risky = ratios.is_risky();
    let swing = swing_call(inputs.technicals, inputs.cmp);

    let pros = ratios.strengths();
    let cons = ratios.weaknesses();
    let fund_text = strengths_text(&pros, &cons);
    let total = inputs.total_score;

    let (long_term_verdict, long_term_reason, health_label, retail, fund_label) = if risky {
        let reason = format!(
            "Critical Risk: Negative Operating Cash Flow detected. CFO/PAT ratio is {:.2} and Debt/Equity is {:.2}. \
             This indicates serious financial stress. Capital preservation is priority - avoid this stock.",
            ratios.cfo_to_pat, ratios.debt
        );
        (Verdict::Avoid, reason, HealthLabel::HighRiskAvoid, RETAIL_RISKY, "Bearish")
    } else if total >= BUY_THRESHOLD {
        let mut parts = Vec::new();
        if inputs.fundamental_score >= 18.0 {
            parts.push(format!("Strong fundamentals (Score: {:.1}/24)", inputs.fundamental_score));
        }
        if inputs.technical_score >= 3.0 {
            parts.push(format!("Positive technicals (Score: {:.1}/5)", inputs.technical_score));
        }
        if ratios.roce > 20.0 {
            parts.push(format!("High ROCE: {:.1}%", ratios.roce));
        }
        if ratios.debt < 0.5 {
            parts.push("Low debt structure".to_string());
        }
        if ratios.revenue_growth > 15.0 {
            parts.push(format!("Strong revenue growth: {:.1}%", ratios.revenue_growth));
        }
        let fallback = format!(
            "Overall score {:.1}/{:.0} indicates strong investment potential with balanced fundamentals and technicals.",
            total, DISPLAY_SCORE_DENOMINATOR
        );
        (Verdict::Buy, join_or(&parts, &fallback), HealthLabel::HighQuality, RETAIL_BUY, "Bullish")
    } else if total >= HOLD_THRESHOLD {
        let mut parts = vec![format!("Overall score: {:.1}/{:.0} (Moderate)", total, DISPLAY_SCORE_DENOMINATOR)];
        if inputs.fundamental_score < 15.0 {
            parts.push("Fundamentals need improvement".to_string());
        }
        if inputs.technical_score < 2.0 {
            parts.push("Technical indicators weak".to_string());
        }
        if !pros.is_empty() {
            parts.push(format!("Some strengths: {}", pros[..pros.len().min(2)].join(", ")));
        }
        let reason = format!("{}. Monitor for better entry point.", parts.join(". "));
        (Verdict::Hold, reason, HealthLabel::MediumRisk, RETAIL_HOLD, "Neutral")
    } else {
        let mut parts = vec![format!("Low overall score: {:.1}/{:.0}", total, DISPLAY_SCORE_DENOMINATOR)];
        if inputs.fundamental_score < 10.0 {
            parts.push(format!("Weak fundamentals ({:.1}/24)", inputs.fundamental_score));
        }
        if inputs.technical_score < 2.0 {
            parts.push("Bearish technicals".to_string());
        }
        if !cons.is_empty() {
            parts.push(format!("Key concerns: {}", cons[..cons.len().min(2)].join(", ")));
        }
        let reason = format!("{}. Not suitable for investment at current levels.", parts.join(". "));
        (Verdict::Avoid, reason, HealthLabel::HighRisk, RETAIL_AVOID, "Bearish")
    };

    let tech_label = if !inputs.technicals.indicators_available {
        "N/A"
    } else if swing.verdict == Verdict::Buy {
        "Bullish"
    } else {
        "Bearish"
    };

    Verdicts {
        long_term_verdict,
        long_term_reason,
        final_action: format!(
            "WATCH for support at {:.0}; initiate Long-Term accumulation ONLY if price stabilizes.",
            inputs.cmp * WATCH_LEVEL
        ),
        health_label,
        risk_triggered: risky,
        fundamental_summary: format!("{}. {}", fund_label, fund_text),
        technical_summary: format!("{}. {}", tech_label, technical_text(inputs.technicals, inputs.cmp)),
        retail_conclusion: retail.to_string(),
        swing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use analysis_core::Metric;

    fn technicals(close: f64, dma_50: f64, rsi: f64, macd: f64, signal: f64) -> TechnicalsSnapshot {
        TechnicalsSnapshot {
            close: Metric::Value(close),
            dma_50: Metric::Value(dma_50),
            rsi: Metric::Value(rsi),
            macd: Metric::Value(macd),
            macd_signal: Metric::Value(signal),
            ..Default::default()
        }
    }

    fn inputs<'a>(
        total: f64,
        fundamentals: &'a FundamentalsSnapshot,
        technicals: &'a TechnicalsSnapshot,
    ) -> VerdictInputs<'a> {
        VerdictInputs {
            total_score: total,
            fundamental_score: 0.0,
            technical_score: 0.0,
            cmp: technicals.close.or(0.0),
            fundamentals,
            technicals,
        }
    }

    #[test]
    fn test_swing_buy_levels() {
        let t = technicals(110.0, 100.0, 35.0, 5.0, 2.0);
        let call = swing_call(&t, 110.0);
        assert_eq!(call.verdict, Verdict::Buy);
        match call.plan {
            SwingPlan::Entry { entry, target, stop_loss } => {
                assert!((entry - 110.0).abs() < 1e-9);
                assert!((target - 121.0).abs() < 1e-9);
                assert!((stop_loss - 104.5).abs() < 1e-9);
            }
            other => panic!("expected entry plan, got {:?}", other),
        }
        assert_eq!(call.action, "Entry: ₹110.0 | Target: ₹121.0 | Stop Loss: ₹104.5");
        assert_eq!(
            call.reason,
            "Price above 50DMA indicates uptrend. MACD bullish crossover. RSI at 35.0 (oversold, potential bounce)"
        );
    }

    #[test]
    fn test_swing_avoid_picks_nearest_support() {
        let mut t = technicals(100.0, 110.0, 60.0, 1.0, 2.0);
        t.s1 = Metric::Value(95.0);
        let call = swing_call(&t, 100.0);
        assert_eq!(call.verdict, Verdict::Avoid);
        assert_eq!(call.plan.support(), Some(95.0));
        assert_eq!(call.action, "Wait for reversal. Support @ ₹95.0");
        assert_eq!(
            call.reason,
            "Price below 50DMA indicates downtrend. RSI in neutral zone, no clear signal. MACD bearish (momentum weakening)"
        );
    }

    #[test]
    fn test_support_fallbacks() {
        // Candidates within 1% of the close are skipped
        let mut t = technicals(100.0, 99.5, 60.0, 1.0, 2.0);
        t.s1 = Metric::Value(99.2);
        t.dma_200 = Metric::Value(90.0);
        assert_eq!(swing_call(&t, 100.0).plan.support(), Some(90.0));

        t.dma_200 = Metric::Value(120.0);
        let support = swing_call(&t, 100.0).plan.support().unwrap();
        assert!((support - 95.0).abs() < 1e-9);

        // Highest of the valid candidates wins
        let mut t = technicals(100.0, 92.0, 60.0, 1.0, 2.0);
        t.s1 = Metric::Value(96.0);
        assert_eq!(swing_call(&t, 100.0).plan.support(), Some(96.0));
    }

    #[test]
    fn test_zero_rsi_reads_neutral() {
        let t = technicals(100.0, 110.0, 0.0, 1.0, 2.0);
        let call = swing_call(&t, 100.0);
        assert_eq!(call.verdict, Verdict::Avoid);
        assert!(!call.reason.contains("RSI"));
    }

    #[test]
    fn test_unavailable_technicals() {
        let mut t = TechnicalsSnapshot::unavailable();
        t.s1 = Metric::Value(1.0);
        let call = swing_call(&t, 100.0);
        assert_eq!(call.verdict, Verdict::Avoid);
        assert_eq!(call.plan, SwingPlan::Unavailable);
        assert_eq!(call.action, "Technical indicators unavailable");

        let f = FundamentalsSnapshot::default();
        let v = synthesize(&inputs(10.0, &f, &t));
        assert_eq!(
            v.technical_summary,
            "N/A. Historical price data (technicals) not available for this ticker."
        );
    }

    #[test]
    fn test_negative_cash_flow_overrides_score() {
        let f = FundamentalsSnapshot {
            operating_cash_flow: Metric::Value(-500.0),
            ..Default::default()
        };
        let t = technicals(110.0, 100.0, 35.0, 5.0, 2.0);
        let v = synthesize(&inputs(30.0, &f, &t));
        assert!(v.risk_triggered);
        assert_eq!(v.long_term_verdict, Verdict::Avoid);
        assert_eq!(v.health_label, HealthLabel::HighRiskAvoid);
        assert!(v.long_term_reason.contains("CFO/PAT ratio is 1.00 and Debt/Equity is 0.00"));
        assert!(v.fundamental_summary.starts_with("Bearish. "));
        assert!(v.fundamental_summary.contains("Negative Operating Cash Flow"));
        assert_eq!(v.retail_conclusion, RETAIL_RISKY);
    }

    #[test]
    fn test_weak_cash_conversion_needs_leverage_to_be_risky() {
        let t = technicals(100.0, 90.0, 50.0, 1.0, 0.0);
        let mut f = FundamentalsSnapshot {
            cfo_to_pat: Metric::Value(0.3),
            debt_to_equity: Metric::Value(0.8),
            ..Default::default()
        };
        assert!(!synthesize(&inputs(20.0, &f, &t)).risk_triggered);

        f.debt_to_equity = Metric::Value(1.5);
        assert!(synthesize(&inputs(20.0, &f, &t)).risk_triggered);
    }

    #[test]
    fn test_long_term_branches() {
        let f = FundamentalsSnapshot {
            stock_pe: Metric::Value(18.0),
            roce: Metric::Value(25.0),
            debt_to_equity: Metric::Value(0.2),
            revenue_cagr: Metric::Value(20.0),
            ..Default::default()
        };
        let t = technicals(110.0, 100.0, 35.0, 5.0, 2.0);

        let mut buy = inputs(28.0, &f, &t);
        buy.fundamental_score = 20.0;
        buy.technical_score = 4.0;
        let v = synthesize(&buy);
        assert_eq!(v.long_term_verdict, Verdict::Buy);
        assert_eq!(v.health_label, HealthLabel::HighQuality);
        assert_eq!(
            v.long_term_reason,
            "Strong fundamentals (Score: 20.0/24). Positive technicals (Score: 4.0/5). High ROCE: 25.0%. \
             Low debt structure. Strong revenue growth: 20.0%"
        );
        assert_eq!(
            v.fundamental_summary,
            "Bullish. Strengths: Attractive Valuation, High Capital Efficiency (ROCE > 20%), Low Debt, Robust Revenue Growth."
        );
        assert!(v.technical_summary.starts_with("Bullish. Price above 50DMA (Uptrend)"));

        let mut hold = inputs(18.0, &f, &t);
        hold.fundamental_score = 12.0;
        hold.technical_score = 1.0;
        let v = synthesize(&hold);
        assert_eq!(v.long_term_verdict, Verdict::Hold);
        assert_eq!(v.health_label, HealthLabel::MediumRisk);
        assert_eq!(
            v.long_term_reason,
            "Overall score: 18.0/37 (Moderate). Fundamentals need improvement. Technical indicators weak. \
             Some strengths: Attractive Valuation, High Capital Efficiency (ROCE > 20%). Monitor for better entry point."
        );

        let weak = FundamentalsSnapshot {
            stock_pe: Metric::Value(60.0),
            roce: Metric::Value(5.0),
            debt_to_equity: Metric::Value(0.8),
            ..Default::default()
        };
        let mut avoid = inputs(8.0, &weak, &t);
        avoid.fundamental_score = 6.0;
        avoid.technical_score = 3.0;
        let v = synthesize(&avoid);
        assert_eq!(v.long_term_verdict, Verdict::Avoid);
        assert_eq!(v.health_label, HealthLabel::HighRisk);
        assert_eq!(
            v.long_term_reason,
            "Low overall score: 8.0/37. Weak fundamentals (6.0/24). Key concerns: Expensive Valuation, Low Efficiency. \
             Not suitable for investment at current levels."
        );
        assert_eq!(
            v.fundamental_summary,
            "Bearish. No major strengths. Weaknesses: Expensive Valuation, Low Efficiency."
        );
    }

    #[test]
    fn test_buy_fallback_reason() {
        let f = FundamentalsSnapshot {
            debt_to_equity: Metric::Value(0.7),
            ..Default::default()
        };
        let t = technicals(100.0, 110.0, 60.0, 1.0, 2.0);
        let mut i = inputs(26.0, &f, &t);
        i.fundamental_score = 17.0;
        i.technical_score = 2.0;
        let v = synthesize(&i);
        assert_eq!(
            v.long_term_reason,
            "Overall score 26.0/37 indicates strong investment potential with balanced fundamentals and technicals."
        );
    }

    #[test]
    fn test_final_action_uses_close() {
        let f = FundamentalsSnapshot::default();
        let t = technicals(200.0, 210.0, 60.0, 1.0, 2.0);
        let v = synthesize(&inputs(10.0, &f, &t));
        assert_eq!(
            v.final_action,
            "WATCH for support at 190; initiate Long-Term accumulation ONLY if price stabilizes."
        );
    }

    #[test]
    fn test_technical_text_extremes() {
        let t = technicals(100.0, 110.0, 75.0, 1.0, 2.0);
        assert_eq!(
            technical_text(&t, 100.0),
            "Price below 50DMA (Weakness), Overbought (RSI > 70), Bearish MACD Divergence."
        );
        let t = technicals(100.0, 90.0, 25.0, 3.0, 2.0);
        assert_eq!(
            technical_text(&t, 100.0),
            "Price above 50DMA (Uptrend), Oversold (RSI < 30), Bullish MACD Crossover."
        );
    }
}
