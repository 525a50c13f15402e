//! Suite configuration.
//!
//! Lookup order for [`SuiteConfig::load`]:
//!
//! | Source | Path |
//! |--------|------|
//! | Suite file | `<root>/t2s.toml` |
//! | User file | `$XDG_CONFIG_HOME/t2s/config.toml` (`~/.config/t2s/config.toml`) |
//! | Built-in | [`SuiteConfig::default`] |
//!
//! Every field is optional in the file; missing fields take their default.

use std::io;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use serde::Deserialize;

/// Failure to read or parse a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config {}: {source}", path.display())]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Filesystem conventions and run limits for a suite.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SuiteConfig {
    /// Extension of script files, without the dot.
    pub script_extension: String,
    /// Reserved file name holding `key value` compare strings.
    pub compare_strings_file: String,
    /// Reserved sub-directory holding method scripts.
    pub methods_dir: String,
    /// Directory under the root that is the top-level scenario.
    pub tests_dir: String,
    /// Where screenshots are written, relative to the root.
    pub screenshot_dir: PathBuf,
    /// Sort directory listings by name before discovery.
    pub sort_entries: bool,
    /// Maximum nesting of `method` invocations during a run.
    pub max_method_depth: usize,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            script_extension: "t2s".to_string(),
            compare_strings_file: "compare-strings.t2s".to_string(),
            methods_dir: "methods".to_string(),
            tests_dir: "tests".to_string(),
            screenshot_dir: PathBuf::new(),
            sort_entries: true,
            max_method_depth: 32,
        }
    }
}

impl SuiteConfig {
    /// Name of the per-suite config file.
    pub const FILE_NAME: &'static str = "t2s.toml";

    /// Load the config for a suite rooted at `root`.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let suite_file = root.join(Self::FILE_NAME);
        if suite_file.is_file() {
            return Self::from_file(&suite_file);
        }

        let user_file = user_config_file();
        if user_file.is_file() {
            tracing::debug!(path = %user_file.display(), "using user config");
            return Self::from_file(&user_file);
        }

        Ok(Self::default())
    }

    /// Load the config from an explicit TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse a config from TOML text.
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Does `file_name` name a script (by extension)?
    pub fn is_script(&self, file_name: &str) -> bool {
        Path::new(file_name)
            .extension()
            .is_some_and(|ext| ext == self.script_extension.as_str())
    }
}

/// Get the user-wide config file.
///
/// Uses `$XDG_CONFIG_HOME/t2s/config.toml` or falls back to `~/.config/t2s/config.toml`.
pub fn user_config_file() -> PathBuf {
    BaseDirs::new()
        .map(|d| d.config_dir().to_path_buf())
        .unwrap_or_else(|| home_fallback().join(".config"))
        .join("t2s")
        .join("config.toml")
}

/// Fallback home directory when BaseDirs fails.
fn home_fallback() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/tmp"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = SuiteConfig::default();
        assert_eq!(config.script_extension, "t2s");
        assert_eq!(config.methods_dir, "methods");
        assert_eq!(config.tests_dir, "tests");
        assert!(config.sort_entries);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = SuiteConfig::from_toml("script_extension = \"check\"\n").unwrap();
        assert_eq!(config.script_extension, "check");
        assert_eq!(config.compare_strings_file, "compare-strings.t2s");
    }

    #[test]
    fn unknown_field_is_rejected() {
        assert!(SuiteConfig::from_toml("colour = \"blue\"\n").is_err());
    }

    #[test]
    fn is_script_matches_extension_only() {
        let config = SuiteConfig::default();
        assert!(config.is_script("login.t2s"));
        assert!(!config.is_script("login.t2s.bak"));
        assert!(!config.is_script("t2s"));
        assert!(!config.is_script("notes.txt"));
    }

    #[test]
    fn suite_file_wins() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("t2s.toml"), "tests_dir = \"checks\"\n").unwrap();
        let config = SuiteConfig::load(dir.path()).unwrap();
        assert_eq!(config.tests_dir, "checks");
    }

    #[test]
    fn malformed_suite_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("t2s.toml"), "sort_entries = \"yes\"\n").unwrap();
        let err = SuiteConfig::load(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Toml { .. }));
        assert!(err.to_string().contains("t2s.toml"));
    }

    #[test]
    fn user_config_is_under_t2s() {
        let path = user_config_file();
        assert!(path.ends_with("t2s/config.toml"));
    }
}
