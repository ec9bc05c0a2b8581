#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use concord_client::config;

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
session:
  request_timeout_ms: 500
  max_pendng: 4 # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.code().as_str(), "BAD_CONFIG");
}

#[test]
fn ok_minimal_config() {
    let cfg = config::load_from_str("version: 1\n").expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.protocol.version, 1);
    assert_eq!(cfg.protocol.max_frame_bytes, 4 * 1024 * 1024);
    assert_eq!(cfg.session.request_timeout_ms, 10_000);
    assert_eq!(cfg.session.max_pending, 1024);
}

#[test]
fn full_config() {
    let ok = r#"
version: 1
protocol:
  version: 1
  max_frame_bytes: 2048
session:
  request_timeout_ms: 250
  max_pending: 3
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.protocol.max_frame_bytes, 2048);
    assert_eq!(cfg.session.request_timeout().as_millis(), 250);
    assert_eq!(cfg.session.max_pending, 3);
}

#[test]
fn out_of_range_values_fail() {
    let cases = [
        "version: 2\n",
        "version: 1\nprotocol:\n  version: 7\n",
        "version: 1\nprotocol:\n  max_frame_bytes: 10\n",
        "version: 1\nsession:\n  request_timeout_ms: 5\n",
        "version: 1\nsession:\n  max_pending: 0\n",
    ];
    for case in cases {
        let err = config::load_from_str(case).expect_err(case);
        assert_eq!(err.code().as_str(), "BAD_CONFIG", "case={case}");
    }
}

#[test]
fn missing_file_is_bad_config() {
    let err = config::load_from_file("does/not/exist.yaml").expect_err("must fail");
    assert_eq!(err.code().as_str(), "BAD_CONFIG");
}

#[test]
fn shipped_config_is_valid() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../concord.yaml");
    let cfg = config::load_from_file(path).expect("repo config must load");
    assert_eq!(cfg.protocol.version, 1);
}
