//! Daemon configuration specs
//!
//! Verify how ngpd reacts to missing or malformed configuration.

use crate::prelude::*;

#[test]
fn missing_config_file_fails() {
    ngpd()
        .args(["--config", "/nonexistent/ngpd.toml"])
        .fails()
        .stderr_has("/nonexistent/ngpd.toml");
}

#[test]
fn zero_tick_is_rejected() {
    let setup = Setup::with_config("[engine]\ntick = \"0s\"\n");
    setup.ngpd().fails().stderr_has("tick");
}

#[test]
fn unknown_time_to_wait_is_rejected() {
    let setup = Setup::with_config("[peer]\ntime_to_wait = \"3s\"\n");
    setup.ngpd().fails();
}

#[test]
fn help_lists_config_flag() {
    ngpd().arg("--help").passes().stdout_has("--config");
}
