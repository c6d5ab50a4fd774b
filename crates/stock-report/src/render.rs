use analysis_core::{ScoreReport, DISPLAY_SCORE_DENOMINATOR};
use std::fmt::Write;

/// Plain-text report for the terminal
pub fn render_text(symbol: &str, report: &ScoreReport, show_details: bool) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail
    let _ = writeln!(
        out,
        "{}: {:.1}/{:.0} - {}",
        symbol, report.total_score, DISPLAY_SCORE_DENOMINATOR, report.health_label
    );
    let _ = writeln!(
        out,
        "CMP {:.2} | Fundamental {:.1} | Technical {:.1} | News {:.1}",
        report.cmp, report.fundamental_score, report.technical_score, report.news_score
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "Swing: {} - {}", report.swing_verdict, report.swing_action);
    let _ = writeln!(out, "  {}", report.swing_reason);
    let _ = writeln!(out, "Long term: {}", report.long_term_verdict);
    let _ = writeln!(out, "  {}", report.long_term_reason);
    let _ = writeln!(out, "Action: {}", report.final_action);
    let _ = writeln!(out);
    let _ = writeln!(out, "Fundamentals: {}", report.fundamental_summary);
    let _ = writeln!(out, "Technicals: {}", report.technical_summary);
    let _ = writeln!(out, "News: {}", report.news_summary);
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", report.retail_conclusion);

    if show_details {
        let width = report.details.iter().map(|(name, _)| name.chars().count()).max().unwrap_or(0);
        let _ = writeln!(out);
        for (name, result) in report.details.iter() {
            let _ = writeln!(
                out,
                "{:<width$}  {:>3}  {} ({})",
                name,
                result.score,
                result.value,
                result.status,
                width = width
            );
        }
    }
    out
}
