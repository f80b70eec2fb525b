//! Property tests for error types

use guacman_core::error::{ApiError, ConfigError, GuacmanError, ViewError};
use proptest::prelude::*;
use std::path::PathBuf;

// ============================================================================
// ApiError Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Status errors always show the code and the server message
    #[test]
    fn status_error_display_has_code_and_message(
        status in 400u16..600,
        message in "[a-zA-Z .]{1,40}",
    ) {
        let err = ApiError::Status { status, message: message.clone() };
        let text = err.to_string();
        prop_assert!(text.contains(&status.to_string()));
        prop_assert!(text.contains(&message));
        prop_assert_eq!(err.is_permission_denied(), status == 401 || status == 403);
    }
}

#[test]
fn transport_error_has_message() {
    let err = ApiError::Transport("connection refused".to_string());
    assert!(err.to_string().contains("connection refused"));
    assert!(!err.is_permission_denied());
}

#[test]
fn decode_error_has_message() {
    let err = ApiError::Decode("expected value at line 1".to_string());
    assert!(err.to_string().contains("expected value"));
}

// ============================================================================
// ConfigError Tests
// ============================================================================

#[test]
fn config_error_io_has_path() {
    let err = ConfigError::Io {
        path: PathBuf::from("/etc/guacman/config.toml"),
        source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
    };
    let msg = err.to_string();
    assert!(msg.contains("config.toml"));
    assert!(msg.contains("denied"));
}

#[test]
fn missing_server_url_mentions_env_var() {
    assert!(ConfigError::MissingServerUrl.to_string().contains("GUACMAN_URL"));
}

// ============================================================================
// GuacmanError Tests
// ============================================================================

#[test]
fn guacman_error_is_transparent() {
    let api: GuacmanError = ApiError::Unavailable("offline".into()).into();
    assert_eq!(api.to_string(), "Service unavailable: offline");

    let config: GuacmanError = ConfigError::Parse("bad key".into()).into();
    assert!(config.to_string().contains("bad key"));

    let view: GuacmanError = ViewError::Closed.into();
    assert!(matches!(view, GuacmanError::View(ViewError::Closed)));
}
