#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::time::Duration;

use gaswatch_core::GasWatchError;
use gaswatch_server::config;

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
simulator:
  update_intervall_ms: 1000 # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert!(matches!(err, GasWatchError::Config(_)));
    assert_eq!(err.client_code().as_str(), "INTERNAL");
}

#[test]
fn ok_minimal_config_uses_defaults() {
    let cfg = config::load_from_str("version: 1\n").expect("must parse");
    assert_eq!(cfg.server.listen, "0.0.0.0:443");
    assert_eq!(cfg.server.tls.cert_path, "server.crt");
    assert_eq!(cfg.server.tls.key_path, "server.key");
    assert!(cfg.simulator.enabled);
    assert_eq!(cfg.simulator.update_interval(), Duration::from_secs(5));
    assert_eq!(cfg.simulator.max_delta, 0.05);
    assert_eq!(cfg.nearby.limit, 3);
}

#[test]
fn full_config_round_trips_values() {
    let ok = r#"
version: 1
server:
  listen: "127.0.0.1:8443"
  tls:
    cert_path: "/etc/gaswatch/tls.crt"
    key_path: "/etc/gaswatch/tls.key"
  shutdown_grace_ms: 1000
simulator:
  enabled: false
  update_interval_ms: 250
  max_delta: 0.2
nearby:
  limit: 5
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.server.listen_addr().unwrap().port(), 8443);
    assert_eq!(cfg.server.shutdown_grace(), Duration::from_secs(1));
    assert!(!cfg.simulator.enabled);
    assert_eq!(cfg.simulator.update_interval_ms, 250);
    assert_eq!(cfg.nearby.limit, 5);
}

#[test]
fn rejects_out_of_range_values() {
    let cases = [
        "version: 2\n",
        "version: 1\nserver:\n  listen: \"not-an-addr\"\n",
        "version: 1\nserver:\n  tls:\n    cert_path: \"\"\n",
        "version: 1\nsimulator:\n  update_interval_ms: 10\n",
        "version: 1\nsimulator:\n  max_delta: 0\n",
        "version: 1\nsimulator:\n  max_delta: -0.1\n",
        "version: 1\nnearby:\n  limit: 0\n",
    ];
    for case in cases {
        let err = config::load_from_str(case).expect_err(case);
        assert!(matches!(err, GasWatchError::Config(_)), "{case}: {err}");
    }
}

#[test]
fn missing_file_is_config_error() {
    let err = config::load_from_file("/definitely/not/here/gaswatch.yaml").expect_err("must fail");
    assert!(matches!(err, GasWatchError::Config(_)));
}
