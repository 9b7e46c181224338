//! Shared test helpers for `f10cfg_core` integration tests.

#![allow(unreachable_pub)]

use std::path::PathBuf;

use f10cfg_core::{ConfigError, Profile, SwitchConfig, parse_with_profile};

/// Lines every configuration needs to satisfy the default profile.
#[allow(dead_code)]
pub const REQUIRED: &str = "redundancy auto-synchronize full\nhardware watchdog\n";

/// Parse `body` followed by the required sections and `end`.
#[allow(dead_code)]
pub fn parse_body(body: &str) -> Result<SwitchConfig, ConfigError> {
    parse_with_profile(&format!("{body}{REQUIRED}end\n"), Profile::default())
}

/// Like [`parse_body`], panicking with the full error chain on failure.
#[allow(dead_code)]
pub fn parse_ok(body: &str) -> SwitchConfig {
    parse_body(body).unwrap_or_else(|err| panic!("parse failed: {:#?}", err.chain()))
}

/// Like [`parse_body`], panicking if the configuration is accepted.
#[allow(dead_code)]
pub fn parse_err(body: &str) -> ConfigError {
    match parse_body(body) {
        Ok(_) => panic!("configuration unexpectedly accepted:\n{body}"),
        Err(err) => err,
    }
}

/// The repository's `samples/` directory.
#[allow(dead_code)]
pub fn samples_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../samples")
}
