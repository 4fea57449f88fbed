//! This module provides the optional run configuration and utilities for loading it from TOML
//! files.
//!
//! A run configuration lets a site pin the location of the calculator library and the flags
//! forwarded to it without repeating them on every command line. Every key is optional:
//!
//! ```toml
//! library = "/opt/chimes/api/libwrapper-C.so"
//! small = true
//! rank = 0
//! debug_file = "debug.dat"
//! ```

use crate::error::CalcError;
use crate::evaluator::EvaluatorOptions;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default name of the file written when debug output is requested.
pub const DEFAULT_DEBUG_FILE: &str = "debug.dat";

/// Settings read from a run configuration file.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    /// Explicit path to the calculator library. Takes precedence over a binding directory.
    pub library: Option<PathBuf>,
    /// Forwarded to `set_chimes`.
    pub small: Option<bool>,
    /// Forwarded to `init_chimes`.
    pub rank: Option<i32>,
    /// Where to write debug output.
    pub debug_file: Option<PathBuf>,
}

impl RunConfig {
    /// Loads a run configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `CalcError::IoError` if the file cannot be read, or a
    /// `CalcError::DeserializationError` if the content is invalid TOML or contains unknown keys.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use chimes_calc::RunConfig;
    /// use std::path::Path;
    ///
    /// let config = RunConfig::load_from_file(Path::new("chimes.toml")).unwrap();
    /// ```
    pub fn load_from_file(path: &Path) -> Result<Self, CalcError> {
        let content = std::fs::read_to_string(path).map_err(|io_error| CalcError::IoError {
            path: path.to_path_buf(),
            source: io_error,
        })?;

        Self::load_from_str(&content)
    }

    /// Parses a run configuration from a TOML string.
    ///
    /// # Examples
    ///
    /// ```
    /// use chimes_calc::RunConfig;
    ///
    /// let config = RunConfig::load_from_str("small = false\nrank = 3").unwrap();
    /// assert_eq!(config.evaluator_options().rank, 3);
    /// assert!(!config.evaluator_options().small);
    /// ```
    pub fn load_from_str(toml_str: &str) -> Result<Self, CalcError> {
        toml::from_str(toml_str).map_err(CalcError::from)
    }

    /// The evaluator options, with defaults filled in for missing keys.
    pub fn evaluator_options(&self) -> EvaluatorOptions {
        let defaults = EvaluatorOptions::default();
        EvaluatorOptions {
            small: self.small.unwrap_or(defaults.small),
            rank: self.rank.unwrap_or(defaults.rank),
        }
    }

    /// The debug output path, falling back to [`DEFAULT_DEBUG_FILE`].
    pub fn debug_file(&self) -> PathBuf {
        self.debug_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DEBUG_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_from_str_full() {
        let toml_str = r#"
            library = "/opt/chimes/libwrapper-C.so"
            small = false
            rank = 2
            debug_file = "out/debug.dat"
        "#;
        let config = RunConfig::load_from_str(toml_str).unwrap();

        assert_eq!(
            config.library,
            Some(PathBuf::from("/opt/chimes/libwrapper-C.so"))
        );
        assert_eq!(
            config.evaluator_options(),
            EvaluatorOptions {
                small: false,
                rank: 2
            }
        );
        assert_eq!(config.debug_file(), PathBuf::from("out/debug.dat"));
    }

    #[test]
    fn test_load_from_str_empty_uses_defaults() {
        let config = RunConfig::load_from_str("").unwrap();

        assert_eq!(config, RunConfig::default());
        assert_eq!(config.evaluator_options(), EvaluatorOptions::default());
        assert_eq!(config.debug_file(), PathBuf::from(DEFAULT_DEBUG_FILE));
    }

    #[test]
    fn test_load_from_str_unknown_key() {
        let result = RunConfig::load_from_str("nlayers = 2");
        assert!(matches!(result, Err(CalcError::DeserializationError(_))));
    }

    #[test]
    fn test_load_from_str_wrong_type() {
        let result = RunConfig::load_from_str("rank = \"zero\"");
        assert!(matches!(result, Err(CalcError::DeserializationError(_))));
    }

    #[test]
    fn test_load_from_file_valid() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "rank = 1").unwrap();

        let config = RunConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.rank, Some(1));
    }

    #[test]
    fn test_load_from_file_not_found() {
        let result = RunConfig::load_from_file(Path::new("non_existent_file.toml"));
        assert!(matches!(result, Err(CalcError::IoError { .. })));
    }
}
