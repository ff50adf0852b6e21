//! Configuration validation.

use crate::error::ConfigError;
use crate::schema::Config;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Convert the first error into a [`ConfigError`].
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, ConfigError> {
        match self.errors.into_iter().next() {
            Some(err) => Err(ConfigError::InvalidValue {
                field: err.path,
                message: err.message,
            }),
            None => Ok(self.warnings),
        }
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> Result<ValidationResult, ConfigError> {
        let mut result = ValidationResult::default();

        Self::validate_server(config, &mut result);
        Self::validate_navigator(config, &mut result);
        Self::validate_playback(config, &mut result);
        Self::validate_ui(config, &mut result);
        Self::validate_remote(config, &mut result);

        Ok(result)
    }

    fn validate_server(config: &Config, result: &mut ValidationResult) {
        if config.server.port == 0 {
            result.add_error(ValidationError::new("server.port", "Port cannot be 0"));
        }

        if config.server.host.is_empty() {
            result.add_error(ValidationError::new("server.host", "Host cannot be empty"));
        }
    }

    fn validate_navigator(config: &Config, result: &mut ValidationResult) {
        let nav = &config.navigator;

        if nav.focusable_selectors.is_empty() {
            result.add_error(ValidationError::new(
                "navigator.focusable_selectors",
                "At least one focusable selector is required",
            ));
        }

        if nav.marker_class.is_empty() || nav.marker_class.contains(char::is_whitespace) {
            result.add_error(ValidationError::new(
                "navigator.marker_class",
                "Marker class must be a single non-empty class name",
            ));
        }

        if nav.row_tolerance_px < 0.0 {
            result.add_error(ValidationError::new(
                "navigator.row_tolerance_px",
                "Row tolerance cannot be negative",
            ));
        }

        if nav.same_row_px <= 0.0 {
            result.add_error(ValidationError::new(
                "navigator.same_row_px",
                "Same-row distance must be greater than 0",
            ));
        }

        if nav.rescan_debounce_ms > 1000 {
            result.add_warning(ValidationWarning::new(
                "navigator.rescan_debounce_ms",
                "Rescan window is very long (>1s), focus may lag behind page changes",
            ));
        }

        if nav.media_card_selectors.is_empty() {
            result.add_warning(ValidationWarning::new(
                "navigator.media_card_selectors",
                "No media card selectors, pointer hover will not move focus",
            ));
        }
    }

    fn validate_playback(config: &Config, result: &mut ValidationResult) {
        let playback = &config.playback;

        if playback.seek_step_secs <= 0.0 {
            result.add_error(ValidationError::new(
                "playback.seek_step_secs",
                "Seek step must be greater than 0",
            ));
        }

        if playback.volume_step <= 0.0 || playback.volume_step > 1.0 {
            result.add_error(ValidationError::new(
                "playback.volume_step",
                "Volume step must be in (0, 1]",
            ));
        }
    }

    fn validate_ui(config: &Config, result: &mut ValidationResult) {
        if config.ui.hide_cursor && config.ui.cursor_hide_ms == 0 {
            result.add_error(ValidationError::new(
                "ui.cursor_hide_ms",
                "cursor_hide_ms must be greater than 0 when hide_cursor is enabled",
            ));
        }
    }

    fn validate_remote(config: &Config, result: &mut ValidationResult) {
        if config.remote.register_keys && config.remote.keys.is_empty() {
            result.add_warning(ValidationWarning::new(
                "remote.keys",
                "Key registration is enabled but no keys are listed",
            ));
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
