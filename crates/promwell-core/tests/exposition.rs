//! Exposition formatting against a checked-in fixture.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::fs;

use promwell_core::{expo, Registry};

fn load(name: &str) -> String {
    fs::read_to_string(format!("tests/fixtures/{name}")).unwrap()
}

/// Registry with one family of each kind, deterministic values.
fn mixed_registry() -> Registry {
    let reg = Registry::new();

    let requests = reg
        .register_counter("http_requests_total", "Total HTTP requests.", &["method", "code"])
        .unwrap();
    requests.with_labels(&["get", "200"]).unwrap().inc_by(1027.0).unwrap();
    requests.with_labels(&["post", "400"]).unwrap().inc_by(3.0).unwrap();

    let depth = reg.register_gauge("queue_depth", "", &[]).unwrap();
    depth.with_labels(&[]).unwrap().set(42.0);

    let latency = reg
        .register_histogram("request_duration_seconds", "Request latency.", &[], &[1.0, 5.0, 10.0])
        .unwrap();
    let h = latency.with_labels(&[]).unwrap();
    for v in [0.5, 3.0, 7.0] {
        h.observe(v);
    }

    reg
}

#[test]
fn render_matches_fixture() {
    let out = expo::render(&mixed_registry().snapshot());
    assert_eq!(out, load("mixed.txt"));
}

#[test]
fn render_is_deterministic() {
    let snap = mixed_registry().snapshot();
    assert_eq!(expo::render(&snap), expo::render(&snap));
}

#[test]
fn unlabeled_gauge_renders_bare_line() {
    let reg = Registry::new();
    let depth = reg.register_gauge("queue_depth", "", &[]).unwrap();
    depth.with_labels(&[]).unwrap().set(42.0);

    let out = expo::render(&reg.snapshot());
    assert!(out.lines().any(|l| l == "queue_depth 42"), "got:\n{out}");
}

#[test]
fn label_values_are_escaped() {
    let reg = Registry::new();
    let fam = reg.register_counter("parse_errors_total", "", &["input"]).unwrap();
    fam.with_labels(&["a\"b\\c\nd"]).unwrap().inc();

    let out = expo::render(&reg.snapshot());
    assert!(
        out.contains(r#"parse_errors_total{input="a\"b\\c\nd"} 1"#),
        "got:\n{out}"
    );
}

#[test]
fn help_text_is_escaped() {
    let reg = Registry::new();
    reg.register_gauge("up", "line one\nline two \\ backslash", &[]).unwrap();

    let out = expo::render(&reg.snapshot());
    assert!(
        out.contains(r"# HELP up line one\nline two \\ backslash"),
        "got:\n{out}"
    );
}

#[test]
fn special_float_values() {
    let reg = Registry::new();
    let g = reg.register_gauge("edge", "", &["case"]).unwrap();
    g.with_labels(&["inf"]).unwrap().set(f64::INFINITY);
    g.with_labels(&["neg_inf"]).unwrap().set(f64::NEG_INFINITY);
    g.with_labels(&["frac"]).unwrap().set(0.1);
    g.with_labels(&["int"]).unwrap().set(-7.0);

    let out = expo::render(&reg.snapshot());
    assert!(out.contains(r#"edge{case="inf"} +Inf"#));
    assert!(out.contains(r#"edge{case="neg_inf"} -Inf"#));
    assert!(out.contains(r#"edge{case="frac"} 0.1"#));
    assert!(out.contains(r#"edge{case="int"} -7"#));
}

#[test]
fn labeled_histogram_puts_le_last() {
    let reg = Registry::new();
    let fam = reg
        .register_histogram("io_seconds", "", &["op"], &[1.0])
        .unwrap();
    fam.with_labels(&["read"]).unwrap().observe(0.5);

    let out = expo::render(&reg.snapshot());
    assert!(out.contains(r#"io_seconds_bucket{op="read",le="1"} 1"#), "got:\n{out}");
    assert!(out.contains(r#"io_seconds_bucket{op="read",le="+Inf"} 1"#));
    assert!(out.contains(r#"io_seconds_sum{op="read"} 0.5"#));
    assert!(out.contains(r#"io_seconds_count{op="read"} 1"#));
}

#[test]
fn families_sorted_by_name() {
    let reg = Registry::new();
    reg.register_gauge("zebra", "", &[]).unwrap().with_labels(&[]).unwrap().set(1.0);
    reg.register_gauge("alpha", "", &[]).unwrap().with_labels(&[]).unwrap().set(1.0);

    let out = expo::render(&reg.snapshot());
    let alpha = out.find("alpha").unwrap();
    let zebra = out.find("zebra").unwrap();
    assert!(alpha < zebra);
}

#[test]
fn content_type_is_the_plaintext_exposition_media_type() {
    assert!(expo::TEXT_CONTENT_TYPE.starts_with("text/plain"));
}
