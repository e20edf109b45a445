use crossterm::style::Stylize;

use super::{BenchmarkReport, RunReport};

const PERCENT: f64 = 100.0;

/// Human-readable report, one entry per printed line.
#[must_use]
pub fn report_lines(report: &BenchmarkReport, use_color: bool) -> Vec<String> {
    let mut lines = Vec::new();
    push_run(&mut lines, "Sequential Results", &report.sequential, use_color);
    push_run(&mut lines, "Concurrent Results", &report.concurrent, use_color);

    lines.push(heading("Comparison", use_color));
    let speedup = report
        .comparison
        .speedup
        .map_or_else(|| "inf".to_owned(), |value| format!("{value:.2}x"));
    lines.push(format!("  Speedup: {speedup}"));
    let efficiency = report
        .comparison
        .efficiency
        .map_or_else(|| "n/a".to_owned(), |value| format!("{value:.2}"));
    lines.push(format!("  Efficiency: {efficiency}"));

    if report.interrupted {
        let notice = "Interrupted: results are partial.";
        lines.push(if use_color {
            notice.yellow().to_string()
        } else {
            notice.to_owned()
        });
    }
    lines
}

fn push_run(lines: &mut Vec<String>, title: &str, run: &RunReport, use_color: bool) {
    let stats = &run.stats;
    let total = stats.success_count.saturating_add(stats.error_count);

    lines.push(heading(title, use_color));
    if run.interrupted && total == 0 {
        lines.push("  Skipped".to_owned());
        return;
    }
    lines.push(format!("  Total time: {:.3}s", run.total_secs));
    lines.push(format!(
        "  Successful: {}/{} ({:.2}%)",
        stats.success_count,
        total,
        run.success_rate * PERCENT
    ));
    lines.push(format!("  Errors: {}", stats.error_count));
    lines.push(format!("  Requests/sec: {:.2}", stats.requests_per_second));
    lines.push(format!(
        "  Latency: {:.3}s ± {:.3}s (median {:.3}s)",
        stats.mean_secs, stats.std_dev_secs, stats.median_secs
    ));
    lines.push(format!(
        "  Min/Max: {:.3}s / {:.3}s",
        stats.min_secs, stats.max_secs
    ));
}

fn heading(title: &str, use_color: bool) -> String {
    if use_color {
        title.cyan().bold().to_string()
    } else {
        title.to_owned()
    }
}
