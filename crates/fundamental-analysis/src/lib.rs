use analysis_core::format::{count, fixed, percent};
use analysis_core::rules::{BinaryRule, Grade, FAIL, PARTIAL, PASS, STATUS_NA, STATUS_NEUTRAL, STATUS_POSITIVE};
use analysis_core::{FundamentalAnalyzer, FundamentalsSnapshot, Metric, ParameterResult, ScoreCard};

pub mod thresholds;

use thresholds::*;

pub const MARKET_CAP_KEY: &str = "Market Cap";
pub const CMP_VS_52W_KEY: &str = "CMP vs 52W";
pub const PE_RATIO_KEY: &str = "P/E Ratio";
pub const PEG_RATIO_KEY: &str = "PEG Ratio";
pub const EPS_TREND_KEY: &str = "EPS Trend";
pub const EBITDA_TREND_KEY: &str = "EBITDA Trend";
pub const DEBT_TO_EQUITY_KEY: &str = "Debt / Equity";
pub const DIVIDEND_YIELD_KEY: &str = "Dividend Yield";
pub const INTRINSIC_VALUE_KEY: &str = "Intrinsic Value";
pub const CURRENT_RATIO_KEY: &str = "Current Ratio";
pub const PROMOTER_HOLDING_KEY: &str = "Promoter Holding";
pub const FII_DII_KEY: &str = "FII/DII Trend";
pub const OCF_KEY: &str = "Operating Cash Flow";
pub const ROCE_KEY: &str = "ROCE";
pub const ROE_KEY: &str = "ROE";
pub const REVENUE_CAGR_KEY: &str = "Revenue CAGR";
pub const PROFIT_CAGR_KEY: &str = "Profit CAGR";
pub const INTEREST_COVERAGE_KEY: &str = "Interest Coverage";
pub const FREE_CASH_FLOW_KEY: &str = "Free Cash Flow";
pub const EQUITY_DILUTION_KEY: &str = "Equity Dilution";
pub const PLEDGED_SHARES_KEY: &str = "Pledged Shares";
pub const CONTINGENT_KEY: &str = "Contingent Liab";
pub const PIOTROSKI_KEY: &str = "Piotroski Score";
pub const WORKING_CAPITAL_KEY: &str = "Working Cap Cycle";
pub const CFO_TO_PAT_KEY: &str = "CFO / PAT";
pub const BOOK_VALUE_KEY: &str = "Book Value Analysis";

/// Every fundamental parameter, in report order
pub const PARAMETERS: [&str; 26] = [
    MARKET_CAP_KEY,
    CMP_VS_52W_KEY,
    PE_RATIO_KEY,
    PEG_RATIO_KEY,
    EPS_TREND_KEY,
    EBITDA_TREND_KEY,
    DEBT_TO_EQUITY_KEY,
    DIVIDEND_YIELD_KEY,
    INTRINSIC_VALUE_KEY,
    CURRENT_RATIO_KEY,
    PROMOTER_HOLDING_KEY,
    FII_DII_KEY,
    OCF_KEY,
    ROCE_KEY,
    ROE_KEY,
    REVENUE_CAGR_KEY,
    PROFIT_CAGR_KEY,
    INTEREST_COVERAGE_KEY,
    FREE_CASH_FLOW_KEY,
    EQUITY_DILUTION_KEY,
    PLEDGED_SHARES_KEY,
    CONTINGENT_KEY,
    PIOTROSKI_KEY,
    WORKING_CAPITAL_KEY,
    CFO_TO_PAT_KEY,
    BOOK_VALUE_KEY,
];

/// How a binary-rule parameter renders its raw value
#[derive(Clone, Copy)]
enum Display {
    Fixed(usize),
    Percent(usize),
}

impl Display {
    fn render(self, metric: &Metric) -> String {
        match self {
            Display::Fixed(d) => fixed(metric, d),
            Display::Percent(d) => percent(metric, d),
        }
    }
}

pub struct FundamentalAnalysisEngine;

impl FundamentalAnalysisEngine {
    pub fn new() -> Self {
        Self
    }

    fn record_grade(card: &mut ScoreCard, key: &str, value: String, grade: Grade) {
        card.record(key, ParameterResult::new(value, grade.score, grade.status));
    }

    fn record_binary(card: &mut ScoreCard, key: &str, rule: &BinaryRule, metric: &Metric, display: Display) {
        let grade = rule.grade(metric);
        Self::record_grade(card, key, display.render(metric), grade);
    }

    fn score_market_cap(&self, f: &FundamentalsSnapshot, card: &mut ScoreCard) {
        let grade = MARKET_CAP.grade(&f.market_cap, 0.0);
        let value = match f.market_cap.value() {
            Some(v) => format!("{:.2}", v),
            None if f.market_cap.is_missing() => "0.00".to_string(),
            None => "N/A".to_string(),
        };
        Self::record_grade(card, MARKET_CAP_KEY, value, grade);
    }

    fn score_cmp_vs_low(&self, f: &FundamentalsSnapshot, card: &mut ScoreCard) {
        let low = f.low_52.or(0.0);
        let cmp = f.current_price.or(0.0);
        let grade = if low > 0.0 && cmp > low * LOW_52_CLEARANCE {
            Grade::new(PASS, STATUS_POSITIVE)
        } else {
            Grade::new(PARTIAL, STATUS_NEUTRAL)
        };
        Self::record_grade(card, CMP_VS_52W_KEY, format!("{:.2}", cmp), grade);
    }

    fn score_pe(&self, f: &FundamentalsSnapshot, card: &mut ScoreCard) {
        let pe = f.stock_pe.or(0.0);
        let industry_pe = f.industry_pe.or(0.0);

        let (score, status) = if pe > 0.0 {
            let grade = PE_RATIO.grade_value(pe);
            let mut status = grade.status.to_string();
            if industry_pe > 0.0 {
                status.push_str(if pe < industry_pe {
                    " (Vs Ind: Attractive)"
                } else {
                    " (Vs Ind: Cautious)"
                });
            }
            (grade.score, status)
        } else {
            (FAIL, STATUS_NA.to_string())
        };

        let value = format!("{} (Ind: {})", fixed(&f.stock_pe, 2), fixed(&f.industry_pe, 2));
        card.record(PE_RATIO_KEY, ParameterResult::new(value, score, status));
    }

    fn score_intrinsic_value(&self, f: &FundamentalsSnapshot, card: &mut ScoreCard) {
        let grade = if f.intrinsic_value.is_invalid() {
            Grade::not_available()
        } else if f.current_price.or(0.0) < f.intrinsic_value.or(0.0) {
            Grade::new(PASS, "Undervalued")
        } else {
            Grade::new(FAIL, "Overvalued")
        };
        Self::record_grade(card, INTRINSIC_VALUE_KEY, fixed(&f.intrinsic_value, 1), grade);
    }

    /// Earnings quality, cash efficiency and FCF conversion folded into one grade.
    /// Negative OCF overrides everything.
    fn score_operating_cash_flow(&self, f: &FundamentalsSnapshot, card: &mut ScoreCard) {
        if f.operating_cash_flow.is_invalid() {
            card.record(OCF_KEY, ParameterResult::not_available(STATUS_NA));
            return;
        }

        let ocf = f.operating_cash_flow.or(0.0);
        let net_profit = f.net_profit.or(0.0);
        let sales = f.sales.or(0.0);
        let mut notes: Vec<&str> = Vec::new();

        if ocf < net_profit {
            notes.push("Low Earnings Quality (OCF < Net Profit)");
        } else {
            notes.push("High Earnings Quality");
        }

        let margin = if sales > 0.0 { ocf / sales * 100.0 } else { 0.0 };
        let efficiency = OCF_MARGIN.grade_value(margin);
        notes.push(efficiency.status);

        if f.free_cash_flow.or(0.0) < 0.0 && ocf > 0.0 {
            notes.push("Capital Intensive");
        }

        let (score, status) = if ocf < 0.0 {
            (FAIL, "Negative OCF (CRITICAL)".to_string())
        } else {
            let score = if efficiency.score >= PASS { PASS } else { PARTIAL };
            (score, notes.join(" | "))
        };

        card.record(OCF_KEY, ParameterResult::new(format!("{:.2}", ocf), score, status));
    }

    fn score_contingent_liabilities(&self, f: &FundamentalsSnapshot, card: &mut ScoreCard) {
        if f.contingent_liabilities.is_invalid() || f.net_worth.is_invalid() {
            card.record(CONTINGENT_KEY, ParameterResult::not_available(STATUS_NA));
            return;
        }

        let liabilities = f.contingent_liabilities.or(0.0);
        let net_worth = f.net_worth.or(1.0);
        let ratio = if net_worth > 0.0 { liabilities / net_worth } else { 0.0 };

        let grade = if ratio > CONTINGENT_LIMIT {
            Grade::new(FAIL, "High Risk (>50% NW)")
        } else {
            Grade::new(PASS, "Safe")
        };
        let weighted = grade.score * CONTINGENT_WEIGHT;
        card.record(
            CONTINGENT_KEY,
            ParameterResult::new(format!("{:.1}%", ratio * 100.0), weighted, grade.status),
        );
    }

    fn score_book_value(&self, f: &FundamentalsSnapshot, card: &mut ScoreCard) {
        if f.book_value.is_invalid() || f.price_to_book.is_invalid() {
            card.record(BOOK_VALUE_KEY, ParameterResult::not_available(STATUS_NA));
            return;
        }

        let book_value = f.book_value.or(0.0);
        let pb = f.price_to_book.or(0.0);
        let industry_pb = f.industry_pb.or(0.0);
        let mut notes: Vec<String> = Vec::new();

        let score: f64 = if pb > 0.0 && industry_pb > 0.0 {
            if pb < industry_pb {
                notes.push("Undervalued (vs Ind)".to_string());
                PASS
            } else {
                notes.push("Overvalued (vs Ind)".to_string());
                FAIL
            }
        } else {
            notes.push("Valuation N/A".to_string());
            PARTIAL
        };

        if book_value > 0.0 {
            notes.push(format!("BV: {}", book_value));
        } else {
            notes.push("Negative BV (Bad)".to_string());
        }

        card.record(
            BOOK_VALUE_KEY,
            ParameterResult::new(format!("P/B: {:.2}", pb), score.min(PASS), notes.join(" | ")),
        );
    }
}

impl FundamentalAnalyzer for FundamentalAnalysisEngine {
    fn analyze(&self, f: &FundamentalsSnapshot) -> ScoreCard {
        let mut card = ScoreCard::default();

        self.score_market_cap(f, &mut card);
        self.score_cmp_vs_low(f, &mut card);
        self.score_pe(f, &mut card);

        // PEG shows the raw input, the rule falls back to 2 when absent
        Self::record_binary(&mut card, PEG_RATIO_KEY, &PEG_RATIO, &f.peg_ratio, Display::Fixed(2));
        Self::record_binary(&mut card, EPS_TREND_KEY, &EPS_TREND, &f.eps_trend, Display::Percent(1));
        Self::record_binary(&mut card, EBITDA_TREND_KEY, &EBITDA_TREND, &f.ebitda_trend, Display::Fixed(2));
        Self::record_binary(&mut card, DEBT_TO_EQUITY_KEY, &DEBT_TO_EQUITY, &f.debt_to_equity, Display::Fixed(2));
        Self::record_binary(&mut card, DIVIDEND_YIELD_KEY, &DIVIDEND_YIELD, &f.dividend_yield, Display::Percent(2));

        self.score_intrinsic_value(f, &mut card);

        Self::record_binary(&mut card, CURRENT_RATIO_KEY, &CURRENT_RATIO, &f.current_ratio, Display::Fixed(2));
        Self::record_binary(&mut card, PROMOTER_HOLDING_KEY, &PROMOTER_HOLDING, &f.promoter_holding, Display::Percent(2));
        Self::record_binary(&mut card, FII_DII_KEY, &FII_DII_CHANGE, &f.fii_dii_change, Display::Percent(2));

        self.score_operating_cash_flow(f, &mut card);

        Self::record_binary(&mut card, ROCE_KEY, &ROCE, &f.roce, Display::Percent(2));
        let roe = ROE.grade(&f.roe, 0.0);
        Self::record_grade(&mut card, ROE_KEY, percent(&f.roe, 2), roe);
        Self::record_binary(&mut card, REVENUE_CAGR_KEY, &REVENUE_CAGR, &f.revenue_cagr, Display::Percent(1));
        Self::record_binary(&mut card, PROFIT_CAGR_KEY, &PROFIT_CAGR, &f.profit_cagr, Display::Percent(1));
        Self::record_binary(&mut card, INTEREST_COVERAGE_KEY, &INTEREST_COVERAGE, &f.interest_coverage, Display::Fixed(1));
        Self::record_binary(&mut card, FREE_CASH_FLOW_KEY, &FREE_CASH_FLOW, &f.free_cash_flow, Display::Fixed(2));

        // Not computed upstream yet
        card.record(EQUITY_DILUTION_KEY, ParameterResult::new("No", PASS, "Stable"));

        Self::record_binary(&mut card, PLEDGED_SHARES_KEY, &PLEDGED_SHARES, &f.pledged_shares, Display::Percent(2));

        self.score_contingent_liabilities(f, &mut card);

        let piotroski = PIOTROSKI.grade(&f.piotroski_score, 0.0);
        Self::record_grade(&mut card, PIOTROSKI_KEY, count(&f.piotroski_score), piotroski);

        // Not computed upstream yet
        card.record(WORKING_CAPITAL_KEY, ParameterResult::new("Stable", PARTIAL, STATUS_NEUTRAL));

        Self::record_binary(&mut card, CFO_TO_PAT_KEY, &CFO_TO_PAT, &f.cfo_to_pat, Display::Fixed(2));

        self.score_book_value(f, &mut card);

        tracing::debug!("Fundamental score {:.1} over {} parameters", card.score, card.details.len());
        card
    }

    fn unavailable(&self) -> ScoreCard {
        let mut card = ScoreCard::default();
        for key in PARAMETERS {
            card.record(key, ParameterResult::not_available(STATUS_NA));
        }
        card
    }
}

impl Default for FundamentalAnalysisEngine {
    fn default() -> Self {
        Self::new()
    }
}
