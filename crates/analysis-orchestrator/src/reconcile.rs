//! Picks one current market price from the three sources and rewrites the
//! price-dependent fundamentals so every scorer sees the same price.

use analysis_core::{FundamentalsSnapshot, Metric, TechnicalsSnapshot};

/// Minimum absolute price move that triggers rescaling
pub const RESCALE_EPSILON: f64 = 0.01;

/// Inputs after price reconciliation. The caller's snapshots are left as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct ReconciledInputs {
    pub cmp: f64,
    pub fundamentals: Option<FundamentalsSnapshot>,
    pub technicals: Option<TechnicalsSnapshot>,
    /// New price over the fundamentals' snapshot price, when a rescale happened
    pub ratio: Option<f64>,
}

/// Live price, then the fundamentals' price, then the technical close.
/// Each source counts only when strictly positive.
pub fn best_price(fundamentals: Option<&FundamentalsSnapshot>, technicals: Option<&TechnicalsSnapshot>) -> f64 {
    let live = technicals.map(|t| t.live_price.or(0.0)).unwrap_or(0.0);
    let fund = fundamentals.map(|f| f.current_price.or(0.0)).unwrap_or(0.0);
    let close = technicals.map(|t| t.close.or(0.0)).unwrap_or(0.0);

    [live, fund]
        .into_iter()
        .find(|price| *price > 0.0)
        .unwrap_or(close)
}

pub fn reconcile(
    fundamentals: Option<&FundamentalsSnapshot>,
    technicals: Option<&TechnicalsSnapshot>,
) -> ReconciledInputs {
    let cmp = best_price(fundamentals, technicals);
    if cmp <= 0.0 && (fundamentals.is_some() || technicals.is_some()) {
        tracing::warn!("No positive price from live, fundamentals or close; using {}", cmp);
    }

    let mut ratio = None;
    let fundamentals = fundamentals.map(|f| {
        let mut f = f.clone();
        let old_price = f.current_price.or(0.0);
        if cmp > 0.0 && old_price > 0.0 && (cmp - old_price).abs() > RESCALE_EPSILON {
            let r = cmp / old_price;
            tracing::warn!(
                "Snapshot price {:.2} differs from current {:.2}; rescaling valuation by {:.4}",
                old_price,
                cmp,
                r
            );
            f.market_cap = f.market_cap.scaled(r);
            f.stock_pe = f.stock_pe.scaled(r);
            f.dividend_yield = f.dividend_yield.scaled(1.0 / r);
            ratio = Some(r);
        }
        f.current_price = Metric::Value(cmp);
        f
    });

    let technicals = technicals.map(|t| {
        let mut t = t.clone();
        t.close = Metric::Value(cmp);
        t
    });

    ReconciledInputs { cmp, fundamentals, technicals, ratio }
}
