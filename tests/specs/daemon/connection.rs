//! AMF connection specs
//!
//! Verify the daemon's end-to-end NG Setup outcomes.

use crate::prelude::*;

#[test]
fn connects_when_amf_accepts() {
    let setup = Setup::with_config("");

    let report = setup.ngpd().passes().stdout_has("READY").report();

    assert_eq!(report["outcome"], "connected");
    assert_eq!(report["amf_name"], "open5gs-amf0");
    assert_eq!(report["setup_requests"], 1);
    assert_eq!(report["lost"], serde_json::json!([]));
}

#[test]
fn retries_after_rejection_with_time_to_wait() {
    let setup = Setup::with_config(
        r#"
[peer]
reject_count = 1
time_to_wait = "1s"
amf_name = "lab-amf"
"#,
    );

    let report = setup.ngpd().passes().report();

    assert_eq!(report["outcome"], "connected");
    assert_eq!(report["amf_name"], "lab-amf");
    assert_eq!(report["setup_requests"], 2);
    assert!(report["ticks"].as_u64().unwrap() >= 1000);
}

#[test]
fn gives_up_when_retries_are_exhausted() {
    let setup = Setup::with_config(
        r#"
[peer]
reject_count = 3
time_to_wait = "1s"

[engine]
max_setup_retries = 1
"#,
    );

    let report = setup.ngpd().passes().report();

    assert_eq!(report["outcome"], "failed");
    assert_eq!(report["reason"], "setup retries exhausted after 2 attempts");
    assert_eq!(report["setup_requests"], 2);
}

#[test]
fn rejection_without_time_to_wait_is_terminal() {
    let setup = Setup::with_config("[peer]\nreject_count = 1\n");

    let report = setup.ngpd().passes().report();

    assert_eq!(report["outcome"], "failed");
    assert_eq!(report["reason"], "setup rejected: misc:unspecified");
    assert_eq!(report["setup_requests"], 1);
}

#[test]
fn log_records_startup_and_connection() {
    let setup = Setup::with_config("");
    setup.ngpd().passes();

    let log = setup.log();
    assert!(log.contains("--- ngpd: starting (pid: "));
    assert!(log.contains("amf connection launched"));
}
