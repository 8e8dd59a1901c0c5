use crate::estimate::{Estimate, MIN_SAMPLE_SIZE, Outcome};
use owo_colors::OwoColorize;

pub fn render_report(estimate: &Estimate, color: bool) -> String {
    let mut out = String::new();

    let span_s = estimate.span_ms.unwrap_or(0) as f64 / 1000.0;

    out.push_str(&format!(
        "Index of Dispersion\n\
         ===================\n\
         events: {} | span: {:.3}s\n\n",
        estimate.events, span_s
    ));

    if estimate.iterations.is_empty() {
        out.push_str("Windows: <none evaluated>\n\n");
    } else {
        out.push_str(&format!(
            "  {:>10} {:>9} {:>12} {:>12}\n",
            "window", "windows", "index", "error"
        ));
        for it in &estimate.iterations {
            out.push_str(&format!(
                "  {:>8}ms {:>9} {:>12} {:>12}\n",
                it.window_ms,
                it.sample_len,
                fmt_opt(it.index),
                fmt_opt(it.error)
            ));
        }
        out.push('\n');
    }

    let headline = match estimate.outcome {
        Outcome::Converged { index, window_ms } => {
            format!("Converged to Dispersion Index = {index:.6} (window = {window_ms}ms)")
        }
        Outcome::Insufficient {
            window_ms,
            sample_len,
            ..
        } => format!(
            "Sample for time window = {window_ms}ms is too small \
             ({sample_len} < {MIN_SAMPLE_SIZE} windows). Exiting without converging."
        ),
        Outcome::Cancelled { window_ms, .. } => {
            format!("Cancelled before time window = {window_ms}ms. Exiting without converging.")
        }
    };

    match (color, estimate.outcome.is_converged()) {
        (false, _) => out.push_str(&headline),
        (true, true) => out.push_str(&headline.green().bold().to_string()),
        (true, false) => out.push_str(&headline.yellow().bold().to_string()),
    }
    out.push('\n');

    if !estimate.outcome.is_converged() {
        out.push_str(&format!(
            "Last index = {}\n",
            fmt_opt(estimate.outcome.last_index())
        ));
    }

    out
}

pub fn render_json(estimate: &Estimate) -> serde_json::Result<String> {
    serde_json::to_string_pretty(estimate)
}

fn fmt_opt(v: Option<f64>) -> String {
    v.map(|v| format!("{v:.6}")).unwrap_or_else(|| "-".to_string())
}
