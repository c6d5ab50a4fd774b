//! One-line digest of the news list: dominant sentiment plus counts for the
//! categories worth calling out.

use std::collections::HashMap;

use analysis_core::NewsItem;

use crate::SentimentTally;

pub const NO_NEWS: &str = "No recent news available. Check exchange filings for updates.";

/// Highlighted categories in priority order, with how each count is phrased
const HIGHLIGHTS: [(&str, &str, &str); 5] = [
    ("Corporate Action", "Corporate actions", " update(s)"),
    ("Analyst", "Analyst updates", ""),
    ("Orders/Contracts", "Business orders", ""),
    ("Management", "Management", " update(s)"),
    ("Results", "Results", " update(s)"),
];

pub fn news_summary(items: &[NewsItem]) -> String {
    if items.is_empty() {
        return NO_NEWS.to_string();
    }

    let mut categories: HashMap<&str, usize> = HashMap::new();
    for item in items {
        *categories.entry(item.category.as_str()).or_insert(0) += 1;
    }

    let highlights: Vec<String> = HIGHLIGHTS
        .iter()
        .filter_map(|(category, label, suffix)| {
            categories
                .get(category)
                .map(|n| format!("{}: {}{}", label, n, suffix))
        })
        .collect();

    let tally = SentimentTally::from_items(items);
    let sentiment = if tally.positive > tally.negative {
        format!("Positive sentiment ({}/{} positive)", tally.positive, tally.total)
    } else if tally.negative > tally.positive {
        format!("Negative sentiment ({}/{} negative)", tally.negative, tally.total)
    } else {
        format!("Neutral sentiment ({} items)", tally.total)
    };

    if highlights.is_empty() {
        format!("{}. {} news item(s) found.", sentiment, tally.total)
    } else {
        format!("{}. Key updates: {}.", sentiment, highlights.join(", "))
    }
}
