// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use ngp_core::TimeToWait;
use std::time::Duration;

#[test]
fn empty_config_uses_defaults() {
    let config = Config::from_toml("").unwrap();

    assert_eq!(config, Config::default());
    assert_eq!(config.amf(), EntityId::new("amf-1"));
    assert_eq!(config.controller(), EntityId::new("ngc"));
    assert!(!config.exit_when_settled);
}

#[test]
fn parses_full_config() {
    let config = Config::from_toml(
        r#"
exit_when_settled = true
log_path = "/tmp/ngpd-test.log"

[node]
gnb_id = 7
plmn = "99970"
controller = "ngc-7"

[amf]
entity = "amf-core"

[peer]
reject_count = 2
time_to_wait = "5s"
amf_name = "lab-amf"

[engine]
tick = "10ms"
max_setup_retries = 3
"#,
    )
    .unwrap();

    assert!(config.exit_when_settled);
    assert_eq!(config.log_path().unwrap(), PathBuf::from("/tmp/ngpd-test.log"));
    assert_eq!(config.node.gnb_id, 7);
    assert_eq!(config.node.tac, 7);
    assert_eq!(config.amf(), EntityId::new("amf-core"));
    assert_eq!(config.peer.reject_count, 2);
    assert_eq!(config.peer.time_to_wait, Some(TimeToWait::V5s));
    assert_eq!(config.peer.amf_name, "lab-amf");
    assert_eq!(config.engine.tick, Duration::from_millis(10));
    assert_eq!(config.engine.max_setup_retries, 3);
}

#[test]
fn setup_message_reflects_node_identity() {
    let mut config = Config::default();
    config.node.plmn = "99970".to_string();

    let message = config.setup_message();

    assert_eq!(message.global_gnb_id.plmn, "99970");
    assert_eq!(message.global_gnb_id.gnb_id, 411);
    assert_eq!(message.supported_ta_list[0].broadcast_plmns, vec!["99970"]);
    assert_eq!(message.ran_node_name.as_deref(), Some("srsgnb01"));
}

#[test]
fn invalid_bit_length_is_rejected() {
    let err = Config::from_toml("[node]\ngnb_id_bit_length = 40\n").unwrap_err();
    assert!(err.to_string().contains("gnb_id_bit_length"));
}

#[test]
fn unknown_time_to_wait_is_a_parse_error() {
    let err = Config::from_toml("[peer]\ntime_to_wait = \"3s\"\n").unwrap_err();
    assert!(matches!(err, ConfigError::Toml(_)));
}

#[test]
fn load_reads_file_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ngpd.toml");
    std::fs::write(&path, "[amf]\nentity = \"amf-9\"\n").unwrap();

    let config = Config::load(&path).unwrap();
    assert_eq!(config.amf(), EntityId::new("amf-9"));

    let err = Config::load(&dir.path().join("missing.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}
