use super::*;

#[test]
fn test_validate_default_config() {
    let config = Config::default();
    let result = ConfigValidator::validate(&config).unwrap();
    assert!(result.is_valid());
    assert!(result.warnings.is_empty());
}

#[test]
fn test_validate_invalid_port() {
    let mut config = Config::default();
    config.server.port = 0;

    let result = ConfigValidator::validate(&config).unwrap();
    assert!(!result.is_valid());
    assert!(result.errors.iter().any(|e| e.path == "server.port"));
}

#[test]
fn test_validate_empty_host() {
    let mut config = Config::default();
    config.server.host = String::new();

    let result = ConfigValidator::validate(&config).unwrap();
    assert!(result.errors.iter().any(|e| e.path == "server.host"));
}

#[test]
fn test_validate_empty_selectors() {
    let mut config = Config::default();
    config.navigator.focusable_selectors.clear();

    let result = ConfigValidator::validate(&config).unwrap();
    assert!(
        result
            .errors
            .iter()
            .any(|e| e.path == "navigator.focusable_selectors")
    );
}

#[test]
fn test_validate_marker_class_with_space() {
    let mut config = Config::default();
    config.navigator.marker_class = "tv focused".to_string();

    let result = ConfigValidator::validate(&config).unwrap();
    assert!(result.errors.iter().any(|e| e.path == "navigator.marker_class"));
}

#[test]
fn test_validate_volume_step_out_of_range() {
    let mut config = Config::default();
    config.playback.volume_step = 1.5;

    let result = ConfigValidator::validate(&config).unwrap();
    assert!(result.errors.iter().any(|e| e.path == "playback.volume_step"));
}

#[test]
fn test_validate_zero_cursor_timeout() {
    let mut config = Config::default();
    config.ui.cursor_hide_ms = 0;

    let result = ConfigValidator::validate(&config).unwrap();
    assert!(!result.is_valid());

    config.ui.hide_cursor = false;
    let result = ConfigValidator::validate(&config).unwrap();
    assert!(result.is_valid());
}

#[test]
fn test_validate_long_rescan_window_warning() {
    let mut config = Config::default();
    config.navigator.rescan_debounce_ms = 5000;

    let result = ConfigValidator::validate(&config).unwrap();
    assert!(result.is_valid());
    assert!(
        result
            .warnings
            .iter()
            .any(|w| w.path == "navigator.rescan_debounce_ms")
    );
}

#[test]
fn test_validate_no_remote_keys_warning() {
    let mut config = Config::default();
    config.remote.keys.clear();

    let result = ConfigValidator::validate(&config).unwrap();
    assert!(result.is_valid());
    assert!(result.warnings.iter().any(|w| w.path == "remote.keys"));
}

#[test]
fn test_into_result_reports_first_error() {
    let mut config = Config::default();
    config.playback.seek_step_secs = 0.0;

    let err = ConfigValidator::validate(&config)
        .unwrap()
        .into_result()
        .unwrap_err();
    assert!(err.to_string().contains("playback.seek_step_secs"));
}
