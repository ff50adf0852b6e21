//! Configuration loader.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::schema::Config;

/// Configuration loader with environment variable substitution.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a TOML file. A leading `~` is expanded.
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        let content = fs::read_to_string(Self::expand_path(path))?;
        Self::load_str(&content)
    }

    /// Load configuration from a TOML file, using defaults when it does not exist.
    pub fn load_or_default(path: &Path) -> Result<Config, ConfigError> {
        let path = Self::expand_path(path);
        if !path.exists() {
            return Ok(Config::default());
        }
        Self::load(&path)
    }

    /// Load configuration from a string.
    pub fn load_str(content: &str) -> Result<Config, ConfigError> {
        let expanded = Self::expand_env_vars(content)?;
        let config: Config = toml::from_str(&expanded)?;
        Ok(config)
    }

    /// Expand environment variables in the format `${VAR}`.
    fn expand_env_vars(content: &str) -> Result<String, ConfigError> {
        let mut result = content.to_string();
        let re = regex::Regex::new(r"\$\{([^}]+)\}")?;

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let var_value = std::env::var(var_name)
                .map_err(|_| ConfigError::EnvVarNotSet(var_name.to_string()))?;
            result = result.replace(&cap[0], &var_value);
        }

        Ok(result)
    }

    /// Expand shell-style paths (e.g., `~/.config`).
    pub fn expand_path(path: &Path) -> PathBuf {
        match path.to_str() {
            Some(raw) => PathBuf::from(shellexpand::tilde(raw).as_ref()),
            None => path.to_path_buf(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_empty_config() {
        let config = ConfigLoader::load_str("").unwrap();
        assert_eq!(config.server.port, 8085);
        assert_eq!(config.ui.cursor_hide_ms, 3000);
    }

    #[test]
    fn test_load_basic_config() {
        let content = r#"
            [server]
            host = "127.0.0.1"
            port = 3000

            [playback]
            seek_step_secs = 30.0
        "#;
        let config = ConfigLoader::load_str(content).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.playback.seek_step_secs, 30.0);
        assert_eq!(config.playback.volume_step, 0.1);
    }

    #[test]
    fn test_load_selector_override() {
        let content = r#"
            [navigator]
            focusable_selectors = ["button", ".tile"]
        "#;
        let config = ConfigLoader::load_str(content).unwrap();
        assert_eq!(config.navigator.focusable_selectors, vec!["button", ".tile"]);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[server]").unwrap();
        writeln!(file, "port = 5000").unwrap();

        let config = ConfigLoader::load(file.path()).unwrap();
        assert_eq!(config.server.port, 5000);
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = ConfigLoader::load(Path::new("/nonexistent/path/tvnav.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config =
            ConfigLoader::load_or_default(Path::new("/nonexistent/path/tvnav.toml")).unwrap();
        assert_eq!(config.server.port, 8085);
    }

    #[test]
    fn test_load_invalid_toml() {
        let result = ConfigLoader::load_str("invalid = [unclosed");
        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn test_expand_env_vars() {
        // SAFETY: the variable name is unique to this test
        unsafe {
            std::env::set_var("TVNAV_TEST_CONFIG_VAR", "test_value");
        }
        let content = "value = \"${TVNAV_TEST_CONFIG_VAR}\"";
        let expanded = ConfigLoader::expand_env_vars(content).unwrap();
        assert!(expanded.contains("test_value"));
        unsafe {
            std::env::remove_var("TVNAV_TEST_CONFIG_VAR");
        }
    }

    #[test]
    fn test_expand_env_vars_not_set() {
        let content = "value = \"${TVNAV_NONEXISTENT_VAR_12345}\"";
        let result = ConfigLoader::expand_env_vars(content);
        assert!(matches!(result, Err(ConfigError::EnvVarNotSet(_))));
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let expanded = ConfigLoader::expand_path(Path::new("~/test"));
        assert!(!expanded.starts_with("~"));
        assert!(expanded.ends_with("test"));
    }

    #[test]
    fn test_expand_path_no_tilde() {
        assert_eq!(
            ConfigLoader::expand_path(Path::new("/etc/tvnav")),
            PathBuf::from("/etc/tvnav")
        );
    }

    #[test]
    fn test_load_expands_home_relative_path() {
        let home = ConfigLoader::expand_path(Path::new("~"));
        let mut file = NamedTempFile::new_in(&home).unwrap();
        writeln!(file, "[server]").unwrap();
        writeln!(file, "port = 6100").unwrap();

        let name = file.path().file_name().unwrap().to_str().unwrap();
        let config = ConfigLoader::load_or_default(&Path::new("~").join(name)).unwrap();
        assert_eq!(config.server.port, 6100);
    }
}
