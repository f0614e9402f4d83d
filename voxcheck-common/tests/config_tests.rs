//! Unit tests for upload configuration resolution
//!
//! Verifies the priority order: CLI argument > environment variable >
//! config file > compiled default.
//!
//! Note: Uses serial_test to prevent ENV variable race conditions. Tests
//! that manipulate VOXCHECK_ENDPOINT or VOXCHECK_UPLOAD_TIMEOUT_SECS are
//! marked with #[serial] so they run sequentially, not in parallel.

use serial_test::serial;
use std::env;
use std::time::Duration;
use voxcheck_common::config::{
    resolve_upload_config, DEFAULT_ENDPOINT, DEFAULT_UPLOAD_TIMEOUT_SECS, ENDPOINT_ENV_VAR,
    TIMEOUT_ENV_VAR,
};

fn clear_env() {
    env::remove_var(ENDPOINT_ENV_VAR);
    env::remove_var(TIMEOUT_ENV_VAR);
}

#[test]
#[serial]
fn test_defaults_when_nothing_configured() {
    clear_env();

    let config = resolve_upload_config(None, None).unwrap();

    assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
    assert_eq!(
        config.timeout,
        Duration::from_secs(DEFAULT_UPLOAD_TIMEOUT_SECS)
    );
}

#[test]
#[serial]
fn test_cli_argument_takes_priority_over_env() {
    env::set_var(ENDPOINT_ENV_VAR, "http://env.example:9999/predict");

    let config = resolve_upload_config(Some("http://cli.example:5000/predict"), Some(5)).unwrap();

    assert_eq!(config.endpoint, "http://cli.example:5000/predict");
    assert_eq!(config.timeout, Duration::from_secs(5));

    clear_env();
}

#[test]
#[serial]
fn test_env_var_used_when_no_cli_argument() {
    clear_env();
    env::set_var(ENDPOINT_ENV_VAR, "http://env.example:9999/predict");
    env::set_var(TIMEOUT_ENV_VAR, "30");

    let config = resolve_upload_config(None, None).unwrap();

    assert_eq!(config.endpoint, "http://env.example:9999/predict");
    assert_eq!(config.timeout, Duration::from_secs(30));

    clear_env();
}

#[test]
#[serial]
fn test_unparseable_timeout_env_is_rejected() {
    clear_env();
    env::set_var(TIMEOUT_ENV_VAR, "soon");

    let result = resolve_upload_config(None, None);
    assert!(result.is_err());

    clear_env();
}

#[test]
#[serial]
fn test_zero_timeout_is_rejected() {
    clear_env();

    let result = resolve_upload_config(None, Some(0));
    assert!(result.is_err());
}
