//! Display formatting for parameter values. Anything that is not a parsed
//! number renders as "N/A".

use crate::metric::Metric;

pub const NA: &str = "N/A";

pub fn fixed(metric: &Metric, decimals: usize) -> String {
    match metric.value() {
        Some(v) => format!("{:.*}", decimals, v),
        None => NA.to_string(),
    }
}

pub fn percent(metric: &Metric, decimals: usize) -> String {
    match metric.value() {
        Some(v) => format!("{:.*}%", decimals, v),
        None => NA.to_string(),
    }
}

/// Whole numbers without decimals, anything else as-is
pub fn count(metric: &Metric) -> String {
    match metric.value() {
        Some(v) if v.fract() == 0.0 => format!("{:.0}", v),
        Some(v) => v.to_string(),
        None => NA.to_string(),
    }
}

pub fn rupees(v: f64) -> String {
    format!("₹{:.1}", v)
}
