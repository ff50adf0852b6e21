//! check-config subcommand and the validation gate used by the other commands.

use std::path::Path;

use tracing::warn;

use tvnav_config::{Config, ConfigError, ConfigValidator};
use tvnav_navigator::NavigatorSettings;

/// Reject a configuration the validator reports errors for; log its warnings.
pub(crate) fn ensure_valid(config: &Config) -> Result<(), ConfigError> {
    let warnings = ConfigValidator::validate(config)?.into_result()?;
    for warning in &warnings {
        warn!("{}: {}", warning.path, warning.message);
    }
    Ok(())
}

/// Validate `config` and compile its selectors.
pub(crate) fn check_config(config: &Config, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let result = ConfigValidator::validate(config)?;
    for error in &result.errors {
        eprintln!("error: {}: {}", error.path, error.message);
    }
    let warnings = result.into_result()?;
    for warning in &warnings {
        warn!("{}: {}", warning.path, warning.message);
    }

    let settings = NavigatorSettings::from_config(&config.navigator)?;
    println!("Configuration OK ({})", path.display());
    println!("  listen:      {}:{}", config.server.host, config.server.port);
    println!("  focusable:   {} selectors", settings.focusable.len());
    println!("  media cards: {} selectors", settings.media_cards.len());
    println!("  marker:      .{}", settings.marker_class);
    println!("  warnings:    {}", warnings.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_passes_gate() {
        assert!(ensure_valid(&Config::default()).is_ok());
    }

    #[test]
    fn test_gate_rejects_invalid_values() {
        let mut config = Config::default();
        config.navigator.marker_class = String::new();
        let err = ensure_valid(&config).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "navigator.marker_class"));

        let mut config = Config::default();
        config.playback.seek_step_secs = -5.0;
        assert!(ensure_valid(&config).is_err());
    }

    #[test]
    fn test_sample_config_matches_defaults() {
        use tvnav_config::ConfigLoader;

        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("config/tvnav.toml");
        let config = ConfigLoader::load(&path).unwrap();
        let defaults = Config::default();

        assert_eq!(config.server.port, defaults.server.port);
        assert_eq!(config.navigator.focusable_selectors, defaults.navigator.focusable_selectors);
        assert_eq!(config.remote.keys, defaults.remote.keys);
        assert!(check_config(&config, &path).is_ok());
    }

    #[test]
    fn test_check_config_accepts_defaults() {
        assert!(check_config(&Config::default(), Path::new("config/tvnav.toml")).is_ok());
    }
}
