//! Threshold table for the fundamental parameters.

use analysis_core::rules::{BinaryRule, Comparison, Grade, Tier, TierRule, FAIL, PARTIAL, PASS};

pub const MARKET_CAP: TierRule = TierRule {
    name: "Market Cap",
    tiers: &[
        Tier::new(Comparison::Above, 20000.0, PASS, "Large Cap"),
        Tier::new(Comparison::Above, 5000.0, PASS, "Mid Cap"),
        Tier::new(Comparison::Above, 500.0, PARTIAL, "Small Cap"),
    ],
    floor: Grade::new(FAIL, "Micro Cap (Risky)"),
};

/// Price must clear the 52-week low by this factor to count as positive
pub const LOW_52_CLEARANCE: f64 = 1.1;

/// Applied only to positive P/E; non-positive P/E is N/A
pub const PE_RATIO: TierRule = TierRule {
    name: "P/E Ratio",
    tiers: &[
        Tier::new(Comparison::Below, 12.0, PASS, "Extremely Oversold"),
        Tier::new(Comparison::Below, 15.0, PASS, "Very Attractive"),
        Tier::new(Comparison::Below, 20.0, PARTIAL, "Attractive"),
        Tier::new(Comparison::Below, 25.0, PARTIAL, "Expensive"),
    ],
    floor: Grade::new(FAIL, "Overbought"),
};

pub const PEG_RATIO: BinaryRule = BinaryRule::below("PEG Ratio", 1.0).with_default(2.0);
pub const EPS_TREND: BinaryRule = BinaryRule::above("EPS Trend", 0.0);
pub const EBITDA_TREND: BinaryRule = BinaryRule::above("EBITDA Trend", 0.0);
pub const DEBT_TO_EQUITY: BinaryRule = BinaryRule::below("Debt / Equity", 1.0);
pub const DIVIDEND_YIELD: BinaryRule = BinaryRule::above("Dividend Yield", 0.0);
pub const CURRENT_RATIO: BinaryRule = BinaryRule::above("Current Ratio", 1.5);
pub const PROMOTER_HOLDING: BinaryRule = BinaryRule::above("Promoter Holding", 40.0);
pub const FII_DII_CHANGE: BinaryRule = BinaryRule::above("FII/DII Change", 0.0);
pub const ROCE: BinaryRule = BinaryRule::above("ROCE", 15.0);

pub const ROE: TierRule = TierRule {
    name: "ROE",
    tiers: &[
        Tier::new(Comparison::Above, 15.0, PASS, "Good"),
        Tier::new(Comparison::Below, 10.0, FAIL, "Avoid (Low)"),
    ],
    floor: Grade::new(PARTIAL, "Average"),
};

pub const REVENUE_CAGR: BinaryRule = BinaryRule::above("Revenue CAGR", 10.0);
pub const PROFIT_CAGR: BinaryRule = BinaryRule::above("Profit CAGR", 10.0);
pub const INTEREST_COVERAGE: BinaryRule = BinaryRule::above("Interest Coverage", 3.0);
pub const FREE_CASH_FLOW: BinaryRule = BinaryRule::above("Free Cash Flow", 0.0);
pub const PLEDGED_SHARES: BinaryRule = BinaryRule::below("Pledged Shares", 5.0);
pub const CFO_TO_PAT: BinaryRule = BinaryRule::above("CFO / PAT", 1.0).with_default(1.0);

/// OCF as a percentage of sales
pub const OCF_MARGIN: TierRule = TierRule {
    name: "OCF Margin",
    tiers: &[
        Tier::new(Comparison::Above, 15.0, PASS, "Cash Cow (High Eff)"),
        Tier::new(Comparison::Above, 5.0, PARTIAL, "Standard Eff"),
    ],
    floor: Grade::new(FAIL, "High Risk (Low Margin)"),
};

/// Contingent liabilities above this share of net worth are high risk
pub const CONTINGENT_LIMIT: f64 = 0.5;
/// Contingent liability check counts half
pub const CONTINGENT_WEIGHT: f64 = 0.5;

pub const PIOTROSKI: TierRule = TierRule {
    name: "Piotroski Score",
    tiers: &[
        Tier::new(Comparison::Above, 7.0, PASS, "Good (Strong)"),
        Tier::new(Comparison::AtLeast, 5.0, PARTIAL, "Average"),
    ],
    floor: Grade::new(FAIL, "Avoid (Weak)"),
};
