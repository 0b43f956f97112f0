//! User settings file handling

use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::paths::settings_path;
use super::{Error, Result};

/// Main settings structure, read from `config.toml`
#[derive(Debug, Deserialize, Default)]
pub struct Settings {
    /// Interactive prompt settings
    #[serde(default)]
    pub prompts: Prompts,

    /// Values used when the matching flag is not given
    #[serde(default)]
    pub defaults: Defaults,
}

/// Interactive prompt settings
#[derive(Debug, Deserialize)]
pub struct Prompts {
    /// Ask for missing paths when stdin is a terminal
    #[serde(default = "default_prompts_enabled")]
    pub enabled: bool,
}

impl Default for Prompts {
    fn default() -> Self {
        Self {
            enabled: default_prompts_enabled(),
        }
    }
}

fn default_prompts_enabled() -> bool {
    true
}

/// Fallback flag values
#[derive(Debug, Deserialize, Default)]
pub struct Defaults {
    /// Request timeout in seconds
    pub timeout_secs: Option<f64>,

    /// Overrides document applied when generating suites
    pub overrides_path: Option<PathBuf>,
}

impl Settings {
    /// Load settings from `path`, or from the default settings file
    ///
    /// Returns default settings if no file exists
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => Some(p.to_path_buf()),
            None => settings_path().filter(|p| p.exists()),
        };

        match path {
            Some(path) => {
                let content = std::fs::read_to_string(&path).map_err(|e| {
                    Error::file_unreadable("Settings", &path.display().to_string(), e)
                })?;
                Self::parse(&content)
            }
            None => Ok(Self::default()),
        }
    }

    fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Settings(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_settings_use_defaults() {
        let settings = Settings::parse("").unwrap();
        assert!(settings.prompts.enabled);
        assert!(settings.defaults.timeout_secs.is_none());
    }

    #[test]
    fn test_parse_defaults_section() {
        let settings = Settings::parse(
            "[prompts]\nenabled = false\n\n[defaults]\ntimeout_secs = 2.5\noverrides_path = \"o.json\"\n",
        )
        .unwrap();
        assert!(!settings.prompts.enabled);
        assert_eq!(settings.defaults.timeout_secs, Some(2.5));
        assert_eq!(settings.defaults.overrides_path, Some(PathBuf::from("o.json")));
    }

    #[test]
    fn test_bad_settings_are_reported() {
        let err = Settings::parse("[prompts]\nenabled = \"yes\"").unwrap_err();
        assert!(matches!(err, Error::Settings(_)));
    }

    #[test]
    fn test_explicit_missing_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = Settings::load(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(matches!(err, Error::FileUnreadable { .. }));
    }
}
