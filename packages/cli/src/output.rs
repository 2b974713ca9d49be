//! Plain-text rendering of search results.

use std::fmt::Write as _;

use pass_finder_pass::Pass;
use pass_finder_search::stats::Histogram;

/// One pass with a profile summary of every path.
#[must_use]
pub fn format_pass_details(pass: &Pass) -> String {
    let mut out = String::new();

    writeln!(out, "{}", pass.name()).unwrap();
    if let Some(alt) = pass.alt() {
        writeln!(out, "  also known as: {alt}").unwrap();
    }
    let coord = pass.coord();
    writeln!(out, "  {} / {}", pass.region(), pass.country()).unwrap();
    writeln!(
        out,
        "  summit: {:.0} m at {:.4}, {:.4}",
        pass.height(),
        coord.lat,
        coord.lon
    )
    .unwrap();
    if !pass.url().is_empty() {
        writeln!(out, "  {}", pass.url()).unwrap();
    }
    writeln!(out).unwrap();

    writeln!(
        out,
        "  {:<28} {:>9} {:>9} {:>7} {:>7} {:>7} {:>8} {:>8}",
        "PATH", "KM", "GAIN M", "AVG %", "MAX %", "MIN %", "FLAT KM", "DOWN KM"
    )
    .unwrap();
    for summary in pass.path_summaries() {
        let Some(profile) = pass.profile(summary.index) else {
            continue;
        };
        writeln!(
            out,
            "  {:<28} {:>9.1} {:>9.0} {:>7.1} {:>7.1} {:>7.1} {:>8.1} {:>8.1}",
            truncate(&summary.name, 28),
            summary.distance_km,
            summary.elevation_m,
            summary.avg_grad,
            profile.grad_max,
            profile.grad_min,
            profile.flat_km,
            profile.descend_km,
        )
        .unwrap();
    }

    let absent = pass.absent_paths();
    if !absent.is_empty() {
        let labels: Vec<&str> = absent
            .iter()
            .filter_map(|index| pass.record().gpts.get(index))
            .map(|path| path.name.as_str())
            .collect();
        writeln!(out, "\n  no trace for: {}", labels.join(", ")).unwrap();
    }

    out
}

/// One line per matching path, grouped by pass.
#[must_use]
pub fn format_results(passes: &[Pass]) -> String {
    let mut out = String::new();

    writeln!(
        out,
        "{:<32} {:<28} {:>7} {:>9} {:>9} {:>7}",
        "PASS", "PATH", "HEIGHT", "KM", "GAIN M", "AVG %"
    )
    .unwrap();
    writeln!(out, "{}", "-".repeat(97)).unwrap();

    for pass in passes {
        let mut summaries = pass.path_summaries().peekable();
        if summaries.peek().is_none() {
            writeln!(
                out,
                "{:<32} {:<28} {:>7.0}",
                truncate(pass.name(), 32),
                "(no profiled paths)",
                pass.height()
            )
            .unwrap();
            continue;
        }
        for summary in summaries {
            writeln!(
                out,
                "{:<32} {:<28} {:>7.0} {:>9.1} {:>9.0} {:>7.1}",
                truncate(pass.name(), 32),
                truncate(&summary.name, 28),
                pass.height(),
                summary.distance_km,
                summary.elevation_m,
                summary.avg_grad,
            )
            .unwrap();
        }
    }

    writeln!(out, "\n{} pass(es)", passes.len()).unwrap();
    out
}

/// A horizontal bar chart of a histogram.
#[must_use]
pub fn format_histogram(histogram: &Histogram, label: &str) -> String {
    const BAR_WIDTH: usize = 40;

    let mut out = String::new();
    writeln!(out, "{label} ({} values)", histogram.total()).unwrap();

    let peak = histogram.counts.iter().copied().max().unwrap_or(0).max(1);
    for (center, &count) in histogram.centers().iter().zip(&histogram.counts) {
        let bar = "#".repeat(count * BAR_WIDTH / peak);
        writeln!(out, "{center:>10.1} | {bar:<width$} {count}", width = BAR_WIDTH).unwrap();
    }

    out
}

/// The name corpus, one name per line.
#[must_use]
pub fn format_names(names: &[String]) -> String {
    let mut out = String::new();
    for name in names {
        writeln!(out, "{name}").unwrap();
    }
    writeln!(out, "\n{} name(s)", names.len()).unwrap();
    out
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let head: String = s.chars().take(width.saturating_sub(3)).collect();
        format!("{head}...")
    }
}

#[cfg(test)]
mod tests {
    use pass_finder_pass::MemoryTraceProvider;
    use pass_finder_search::stats::histogram;
    use serde_json::json;

    use super::*;

    fn pass() -> Pass {
        let samples: Vec<String> = (0..=8)
            .map(|i| {
                let d = f64::from(i) * 0.25;
                format!("46.5,10.4,{},{d}", d.mul_add(80.0, 1000.0))
            })
            .collect();
        let provider = MemoryTraceProvider::new()
            .with_trace("prad", serde_json::to_string(&samples).unwrap());
        Pass::from_value(
            &json!({
                "name": "Stilfser Joch",
                "alt": "Passo dello Stelvio",
                "country": "Italy",
                "region": "Lombardei",
                "coord": [46.5286, 10.4531],
                "height": 2757,
                "url": "",
                "gpts": {
                    "0": { "name": "from Prad", "url": "", "gpt": "prad" },
                    "1": { "name": "from Bormio", "url": "", "gpt": "bormio" }
                }
            }),
            &provider,
            pass_finder_pass::default_palette(),
        )
        .unwrap()
    }

    #[test]
    fn details_list_paths_and_missing_traces() {
        let text = format_pass_details(&pass());
        assert!(text.starts_with("Stilfser Joch\n"), "{text}");
        assert!(text.contains("also known as: Passo dello Stelvio"), "{text}");
        assert!(text.contains("from Prad"), "{text}");
        assert!(text.contains("no trace for: from Bormio"), "{text}");
    }

    #[test]
    fn results_have_one_row_per_path() {
        let text = format_results(&[pass()]);
        let rows: Vec<&str> = text.lines().filter(|l| l.starts_with("Stilfser")).collect();
        assert_eq!(rows.len(), 1);
        assert!(rows[0].contains("2757"), "{}", rows[0]);
        assert!(rows[0].contains("2.0"), "{}", rows[0]);
        assert!(text.ends_with("1 pass(es)\n"));
    }

    #[test]
    fn histogram_bars_scale_to_peak() {
        let values: Vec<f64> = (0..=10).map(f64::from).collect();
        let h = histogram(&values, None, 5).unwrap();
        let text = format_histogram(&h, "Distance (km)");
        let bars: Vec<usize> = text
            .lines()
            .skip(1)
            .map(|l| l.matches('#').count())
            .collect();
        assert_eq!(bars, vec![26, 26, 26, 26, 40]);
    }

    #[test]
    fn truncates_long_names() {
        assert_eq!(truncate("Grossglockner Hochalpenstrasse", 10), "Grossgl...");
        assert_eq!(truncate("Gavia", 10), "Gavia");
    }
}
