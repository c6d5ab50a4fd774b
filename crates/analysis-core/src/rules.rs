//! Threshold rules shared by the scorers.
//!
//! Every graded parameter is described by a named rule (threshold, direction,
//! score tiers) kept in a `const` table next to its scorer, instead of inline
//! conditionals. A rule maps a raw value to a [`Grade`]: a score in
//! {0, 0.5, 1} plus a status label.

use crate::metric::Metric;

pub const PASS: f64 = 1.0;
pub const PARTIAL: f64 = 0.5;
pub const FAIL: f64 = 0.0;

pub const STATUS_POSITIVE: &str = "Positive";
pub const STATUS_NEGATIVE: &str = "Negative";
pub const STATUS_NEUTRAL: &str = "Neutral";
pub const STATUS_NA: &str = "N/A";

/// Comparison applied between a value and a rule threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Above,
    Below,
    AtLeast,
    AtMost,
}

impl Comparison {
    pub fn holds(self, value: f64, threshold: f64) -> bool {
        match self {
            Comparison::Above => value > threshold,
            Comparison::Below => value < threshold,
            Comparison::AtLeast => value >= threshold,
            Comparison::AtMost => value <= threshold,
        }
    }
}

/// Score and status label for one parameter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grade {
    pub score: f64,
    pub status: &'static str,
}

impl Grade {
    pub const fn new(score: f64, status: &'static str) -> Self {
        Self { score, status }
    }

    pub const fn not_available() -> Self {
        Self::new(FAIL, STATUS_NA)
    }
}

/// Pass/fail rule: `Positive` (1) when the comparison holds, `Negative` (0) otherwise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinaryRule {
    pub name: &'static str,
    pub threshold: f64,
    pub comparison: Comparison,
    /// Value assumed when the input is missing
    pub default: f64,
}

impl BinaryRule {
    pub const fn above(name: &'static str, threshold: f64) -> Self {
        Self { name, threshold, comparison: Comparison::Above, default: 0.0 }
    }

    pub const fn below(name: &'static str, threshold: f64) -> Self {
        Self { name, threshold, comparison: Comparison::Below, default: 0.0 }
    }

    pub const fn with_default(mut self, default: f64) -> Self {
        self.default = default;
        self
    }

    pub fn grade_value(&self, value: f64) -> Grade {
        if self.comparison.holds(value, self.threshold) {
            Grade::new(PASS, STATUS_POSITIVE)
        } else {
            Grade::new(FAIL, STATUS_NEGATIVE)
        }
    }

    /// Grade a raw metric. Unparseable input grades as N/A.
    pub fn grade(&self, metric: &Metric) -> Grade {
        match metric {
            Metric::Value(v) => self.grade_value(*v),
            Metric::Missing => self.grade_value(self.default),
            Metric::Invalid(raw) => {
                tracing::warn!("{}: unparseable input {:?}, scoring as N/A", self.name, raw);
                Grade::not_available()
            }
        }
    }
}

/// One step of a tiered rule
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tier {
    pub comparison: Comparison,
    pub bound: f64,
    pub grade: Grade,
}

impl Tier {
    pub const fn new(comparison: Comparison, bound: f64, score: f64, status: &'static str) -> Self {
        Self { comparison, bound, grade: Grade::new(score, status) }
    }
}

/// Multi-tier rule: the first tier whose comparison holds wins, else `floor`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierRule {
    pub name: &'static str,
    pub tiers: &'static [Tier],
    pub floor: Grade,
}

impl TierRule {
    pub fn grade_value(&self, value: f64) -> Grade {
        self.tiers
            .iter()
            .find(|tier| tier.comparison.holds(value, tier.bound))
            .map(|tier| tier.grade)
            .unwrap_or(self.floor)
    }

    /// Grade a raw metric, treating missing input as `default`
    pub fn grade(&self, metric: &Metric, default: f64) -> Grade {
        match metric {
            Metric::Value(v) => self.grade_value(*v),
            Metric::Missing => self.grade_value(default),
            Metric::Invalid(raw) => {
                tracing::warn!("{}: unparseable input {:?}, scoring as N/A", self.name, raw);
                Grade::not_available()
            }
        }
    }
}
