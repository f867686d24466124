//! Engine configuration
//!
//! Settings are read from a TOML file; every field has a default, so an empty
//! file (or no file) is a valid configuration.
//!
//! ```toml
//! [logging]
//! filter = "atomspace=debug"
//!
//! [engine]
//! prelude = ["facts.metta"]
//! max_results = 100
//!
//! [repl]
//! history = true
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub engine: EngineSection,

    #[serde(default)]
    pub repl: ReplConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive; `RUST_LOG` takes precedence
    #[serde(default = "default_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            filter: default_filter(),
        }
    }
}

fn default_filter() -> String {
    "info".to_string()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineSection {
    /// Files whose atoms are added to the space before anything else runs
    #[serde(default)]
    pub prelude: Vec<PathBuf>,

    /// Cap on results printed per query; 0 means no cap
    #[serde(default)]
    pub max_results: usize,
}

impl EngineSection {
    /// Truncate `results` to the configured cap
    pub fn cap<T>(&self, mut results: Vec<T>) -> Vec<T> {
        if self.max_results > 0 {
            results.truncate(self.max_results);
        }
        results
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReplConfig {
    /// Persist REPL history between sessions
    #[serde(default = "default_history")]
    pub history: bool,
}

impl Default for ReplConfig {
    fn default() -> Self {
        ReplConfig {
            history: default_history(),
        }
    }
}

fn default_history() -> bool {
    true
}

impl ReplConfig {
    /// Where REPL history lives, if enabled and a data directory exists
    pub fn history_path(&self) -> Option<PathBuf> {
        if !self.history {
            return None;
        }
        dirs::data_dir().map(|dir| dir.join("atomspace").join("history.txt"))
    }
}

impl EngineConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = EngineConfig::parse("").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.logging.filter, "info");
        assert!(config.engine.prelude.is_empty());
        assert_eq!(config.engine.max_results, 0);
        assert!(config.repl.history);
    }

    #[test]
    fn test_full_config() {
        let config = EngineConfig::parse(
            r#"
            [logging]
            filter = "atomspace=trace"

            [engine]
            prelude = ["base.metta", "more.metta"]
            max_results = 3

            [repl]
            history = false
            "#,
        )
        .unwrap();

        assert_eq!(config.logging.filter, "atomspace=trace");
        assert_eq!(
            config.engine.prelude,
            vec![PathBuf::from("base.metta"), PathBuf::from("more.metta")]
        );
        assert_eq!(config.engine.max_results, 3);
        assert!(!config.repl.history);
        assert_eq!(config.repl.history_path(), None);
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config = EngineConfig::parse("[engine]\nmax_results = 5\n").unwrap();
        assert_eq!(config.engine.max_results, 5);
        assert_eq!(config.logging.filter, "info");
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = EngineConfig::parse("[engine]\nmax_result = 5\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_cap() {
        let engine = EngineSection {
            prelude: vec![],
            max_results: 2,
        };
        assert_eq!(engine.cap(vec![1, 2, 3]), vec![1, 2]);
        assert_eq!(EngineSection::default().cap(vec![1, 2, 3]), vec![1, 2, 3]);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[logging]\nfilter = \"debug\"").unwrap();
        let config = EngineConfig::load(file.path()).unwrap();
        assert_eq!(config.logging.filter, "debug");
    }

    #[test]
    fn test_load_missing_file() {
        let err = EngineConfig::load(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
