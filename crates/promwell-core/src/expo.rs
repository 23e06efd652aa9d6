//! Text exposition formatting.
//!
//! Pure function of a [`Snapshot`]: given the same snapshot the output is
//! byte-identical. Ordering comes pre-sorted from the snapshot; this module
//! only handles line layout, escaping, and number formatting.

use std::fmt::Write;

use crate::snapshot::{FamilySnapshot, SeriesValue, Snapshot};

/// Media type of the text exposition format, forwarded verbatim by the HTTP
/// layer in the `Content-Type` header.
pub const TEXT_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Escape a label value for `name{key="value"}` position.
fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

/// Escape help text for `# HELP` lines (quotes stay literal there).
fn escape_help(v: &str) -> String {
    v.replace('\\', "\\\\").replace('\n', "\\n")
}

/// Format an f64 the way scrapers expect: integral values without a decimal
/// point, other finite values in shortest round-trip form, and the special
/// spellings `+Inf` / `-Inf` / `NaN`.
fn fmt_value(v: f64) -> String {
    if v.is_nan() {
        return "NaN".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "+Inf" } else { "-Inf" }.to_string();
    }
    // i64 covers every value that still has integer precision in an f64.
    if v == v.trunc() && v.abs() < 9.0e15 {
        return format!("{}", v as i64);
    }
    format!("{v}")
}

fn fmt_labels(labels: &[(String, String)]) -> String {
    labels
        .iter()
        .map(|(k, v)| format!("{k}=\"{}\"", escape_label(v)))
        .collect::<Vec<_>>()
        .join(",")
}

/// Render one snapshot into the text exposition format.
pub fn render(snapshot: &Snapshot) -> String {
    let mut out = String::new();
    for family in &snapshot.families {
        render_family(family, &mut out);
    }
    out
}

fn render_family(family: &FamilySnapshot, out: &mut String) {
    if !family.help.is_empty() {
        let _ = writeln!(out, "# HELP {} {}", family.name, escape_help(&family.help));
    }
    let _ = writeln!(out, "# TYPE {} {}", family.name, family.kind.as_str());

    for series in &family.series {
        let labels = fmt_labels(&series.labels);
        match &series.value {
            SeriesValue::Counter(v) | SeriesValue::Gauge(v) => {
                if labels.is_empty() {
                    let _ = writeln!(out, "{} {}", family.name, fmt_value(*v));
                } else {
                    let _ = writeln!(out, "{}{{{}}} {}", family.name, labels, fmt_value(*v));
                }
            }
            SeriesValue::Histogram { buckets, sum, count } => {
                // `le` goes last, after the series' own labels.
                let prefix = if labels.is_empty() {
                    String::new()
                } else {
                    format!("{labels},")
                };
                for (bound, cumulative) in buckets {
                    let _ = writeln!(
                        out,
                        "{}_bucket{{{}le=\"{}\"}} {}",
                        family.name,
                        prefix,
                        fmt_value(*bound),
                        cumulative
                    );
                }
                let _ = writeln!(out, "{}_bucket{{{}le=\"+Inf\"}} {}", family.name, prefix, count);
                if labels.is_empty() {
                    let _ = writeln!(out, "{}_sum {}", family.name, fmt_value(*sum));
                    let _ = writeln!(out, "{}_count {}", family.name, count);
                } else {
                    let _ = writeln!(out, "{}_sum{{{}}} {}", family.name, labels, fmt_value(*sum));
                    let _ = writeln!(out, "{}_count{{{}}} {}", family.name, labels, count);
                }
            }
        }
    }
}
