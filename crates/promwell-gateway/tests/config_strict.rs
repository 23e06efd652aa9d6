#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use promwell_gateway::config;

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
gateway:
  listen: "0.0.0.0:9100"
collectors:
  proces: true # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.code().as_str(), "INVALID_CONFIG");
}

#[test]
fn ok_minimal_config() {
    let ok = "version: 1\n";
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.gateway.listen, "0.0.0.0:9100");
    assert_eq!(cfg.gateway.metrics_path, "/metrics");
    assert_eq!(cfg.gateway.shutdown_grace_ms, 5000);
    assert!(cfg.collectors.process);
    assert_eq!(cfg.collectors.prefix, "process");
}

#[test]
fn unsupported_version_rejected() {
    let err = config::load_from_str("version: 2\n").expect_err("must fail");
    assert_eq!(err.code().as_str(), "INVALID_CONFIG");
}

#[test]
fn metrics_path_must_be_rooted() {
    let bad = r#"
version: 1
gateway:
  metrics_path: "metrics"
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.code().as_str(), "INVALID_CONFIG");
}

#[test]
fn shutdown_grace_bounded() {
    let bad = r#"
version: 1
gateway:
  shutdown_grace_ms: 120000
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.code().as_str(), "INVALID_CONFIG");
}

#[test]
fn collector_prefix_must_not_be_empty() {
    let bad = r#"
version: 1
collectors:
  prefix: ""
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.code().as_str(), "INVALID_CONFIG");
}

#[test]
fn collector_prefix_must_be_a_valid_name_prefix() {
    for prefix in ["1bad", "has-dash", "has space"] {
        let bad = format!("version: 1\ncollectors:\n  prefix: \"{prefix}\"\n");
        let err = config::load_from_str(&bad).expect_err("must fail");
        assert_eq!(err.code().as_str(), "INVALID_CONFIG", "prefix: {prefix:?}");
    }
}
