//! `pakfiler.toml` loading and flag overrides.
//!
//! ```toml
//! [store]
//! backend = "sqlite"
//! connection_string = "filing.db"
//!
//! [logging]
//! level = "debug"
//! file = "pakfiler.log"
//! ```

use std::path::{Path, PathBuf};

use filer_core::store::StoreConfig;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_CONFIG_FILE: &str = "pakfiler.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Contents of the TOML config file. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub store: StoreSection,
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreSection {
    pub backend: String,
    pub connection_string: String,
}

impl Default for StoreSection {
    fn default() -> Self {
        let StoreConfig {
            backend,
            connection_string,
        } = StoreConfig::default();
        Self {
            backend,
            connection_string,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingSection {
    pub level: String,
    pub file: Option<PathBuf>,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl FileConfig {
    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Reads `path` if given (it must exist), otherwise `pakfiler.toml` in
    /// the working directory when present, otherwise the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !default.is_file() {
                    return Ok(Self::default());
                }
                default
            }
        };

        let text = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        debug!(path = %path.display(), "loaded config file");
        Self::parse(&text).map_err(|source| ConfigError::Parse { path, source })
    }
}

/// Values given on the command line; each one beats the file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub backend: Option<String>,
    pub connection_string: Option<String>,
    pub log_level: Option<String>,
    pub log_file: Option<PathBuf>,
}

/// Effective settings after merging file and flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub store: StoreConfig,
    pub log_level: String,
    pub log_file: Option<PathBuf>,
}

impl AppConfig {
    pub fn resolve(file: FileConfig, overrides: Overrides) -> Self {
        Self {
            store: StoreConfig {
                backend: overrides.backend.unwrap_or(file.store.backend),
                connection_string: overrides
                    .connection_string
                    .unwrap_or(file.store.connection_string),
            },
            log_level: overrides.log_level.unwrap_or(file.logging.level),
            log_file: overrides.log_file.or(file.logging.file),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::resolve(FileConfig::default(), Overrides::default())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = FileConfig::parse("").unwrap();

        assert_eq!(config, FileConfig::default());
        assert_eq!(config.store.backend, "json");
        assert_eq!(config.store.connection_string, ".pakfiler");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = FileConfig::parse("[store]\nbackend = \"sqlite\"\n").unwrap();

        assert_eq!(config.store.backend, "sqlite");
        assert_eq!(config.store.connection_string, ".pakfiler");
        assert_eq!(config.logging, LoggingSection::default());
    }

    #[test]
    fn full_file_parses() {
        let config = FileConfig::parse(
            r#"
            [store]
            backend = "sqlite"
            connection_string = "filing.db"

            [logging]
            level = "debug"
            file = "pakfiler.log"
            "#,
        )
        .unwrap();

        assert_eq!(config.store.connection_string, "filing.db");
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.file, Some(PathBuf::from("pakfiler.log")));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(FileConfig::parse("[store]\nbackedn = \"sqlite\"\n").is_err());
    }

    #[test]
    fn overrides_beat_file_values() {
        let file = FileConfig::parse("[store]\nbackend = \"sqlite\"\n[logging]\nlevel = \"warn\"\n")
            .unwrap();
        let overrides = Overrides {
            backend: Some("memory".to_string()),
            log_level: Some("trace".to_string()),
            ..Overrides::default()
        };

        let config = AppConfig::resolve(file, overrides);

        assert_eq!(config.store.backend, "memory");
        assert_eq!(config.store.connection_string, ".pakfiler");
        assert_eq!(config.log_level, "trace");
        assert_eq!(config.log_file, None);
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let result = FileConfig::load(Some(Path::new("/nonexistent/pakfiler.toml")));

        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }
}
