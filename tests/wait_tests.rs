use std::time::Duration;

use auth_pages::browser::wait::{
    DEFAULT_POLL_INTERVAL, DEFAULT_TIMEOUT, WaitConfig, wait_for, wait_until,
};
use auth_pages::error::PageError;

fn fast() -> WaitConfig {
    WaitConfig::new(Duration::from_millis(100), Duration::from_millis(5))
}

// =========================================================================
// wait_for
// =========================================================================

#[test]
fn wait_for_succeeds_immediately() {
    let result = wait_for(|| true, fast(), "test condition");
    assert!(result.is_ok());
}

#[test]
fn wait_for_succeeds_eventually() {
    let mut calls = 0;
    let result = wait_for(
        || {
            calls += 1;
            calls >= 3
        },
        fast(),
        "counter >= 3",
    );

    assert!(result.is_ok());
    assert!(calls >= 3);
}

#[test]
fn wait_for_times_out() {
    let config = WaitConfig::new(Duration::from_millis(50), Duration::from_millis(5));
    let result = wait_for(|| false, config, "impossible condition");

    match result {
        Err(PageError::WaitTimeout { condition, timeout }) => {
            assert_eq!(condition, "impossible condition");
            assert_eq!(timeout, Duration::from_millis(50));
        }
        other => panic!("Expected WaitTimeout, got {:?}", other),
    }
}

#[test]
fn wait_for_timeout_message_names_the_condition() {
    let config = WaitConfig::new(Duration::from_millis(20), Duration::from_millis(5));
    let err = wait_for(|| false, config, "Errors are visible").unwrap_err();

    let message = err.to_string();
    assert!(
        message.contains("Errors are visible"),
        "message must carry the wait's label: {}",
        message
    );
}

// =========================================================================
// wait_until
// =========================================================================

#[test]
fn wait_until_returns_the_satisfying_value() {
    let result = wait_until(|| Some(42), fast(), "value appears");
    assert_eq!(result.unwrap(), 42);
}

#[test]
fn wait_until_returns_eventual_value() {
    let mut calls = 0;
    let result = wait_until(
        || {
            calls += 1;
            if calls >= 4 {
                Some(format!("ready after {}", calls))
            } else {
                None
            }
        },
        fast(),
        "value appears",
    );

    assert_eq!(result.unwrap(), "ready after 4");
}

#[test]
fn wait_until_checks_at_least_once_with_zero_budget() {
    let config = WaitConfig::new(Duration::ZERO, Duration::from_millis(5));
    let result = wait_until(|| Some("first try"), config, "zero budget");
    assert_eq!(result.unwrap(), "first try");
}

#[test]
fn wait_until_times_out_with_none() {
    let config = WaitConfig::new(Duration::from_millis(30), Duration::from_millis(5));
    let result: Result<Vec<String>, _> = wait_until(|| None, config, "never");
    assert!(matches!(result, Err(PageError::WaitTimeout { .. })));
}

// =========================================================================
// WaitConfig
// =========================================================================

#[test]
fn wait_config_defaults() {
    let config = WaitConfig::default();
    assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    assert_eq!(config.poll_interval, DEFAULT_POLL_INTERVAL);
}

#[test]
fn wait_config_with_timeout_keeps_default_interval() {
    let config = WaitConfig::with_timeout(Duration::from_secs(5));
    assert_eq!(config.timeout, Duration::from_secs(5));
    assert_eq!(config.poll_interval, DEFAULT_POLL_INTERVAL);
}
