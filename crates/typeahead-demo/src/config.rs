//! Runtime configuration for `film-suggest`.
//!
//! Settings come from three layers, later ones winning: built-in defaults,
//! an optional TOML file (`--config`), then command-line flags and their
//! environment variables.
//!
//! ```toml
//! filterable = true
//! minimal = false
//! reset_on_close = false
//! reset_on_select = true
//! position = "top-left"
//! max_visible = 8
//! input_width = 40
//! alt_screen = true
//! mouse = true
//! verbosity = 1
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use typeahead::popover::Position;

use crate::cli::Cli;

/// Resolved settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
#[expect(
    clippy::struct_excessive_bools,
    reason = "Settings are naturally bools"
)]
pub struct DemoConfig {
    /// Typing narrows the list.
    pub filterable: bool,
    /// Panel drawn without a border.
    pub minimal: bool,
    pub reset_on_close: bool,
    pub reset_on_select: bool,
    #[serde(with = "position_name")]
    pub position: Position,
    /// Rows shown before the panel scrolls.
    pub max_visible: usize,
    /// Columns of the text input.
    pub input_width: usize,
    pub alt_screen: bool,
    pub mouse: bool,
    /// 0 = warn, 1 = info, 2 = debug, 3+ = trace.
    pub verbosity: u8,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            filterable: true,
            minimal: true,
            reset_on_close: false,
            reset_on_select: false,
            position: Position::BottomLeft,
            max_visible: 10,
            input_width: 30,
            alt_screen: true,
            mouse: true,
            verbosity: 0,
        }
    }
}

/// Errors loading or validating a settings file.
#[derive(thiserror::Error, Debug)]
pub enum ConfigFileError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("max_visible must be at least 1")]
    NoVisibleRows,

    #[error("input_width must be at least 1")]
    NoInputWidth,
}

impl DemoConfig {
    /// Create a new config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults, then the file named by `--config`, then the flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if the
    /// result fails [`DemoConfig::validate`].
    pub fn resolve(cli: &Cli) -> Result<Self, ConfigFileError> {
        let mut config = match &cli.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.apply_cli(cli);
        config.validate()?;
        tracing::debug!(?config, "resolved configuration");
        Ok(config)
    }

    /// Reads a TOML settings file. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML
    /// for this struct.
    pub fn load(path: &Path) -> Result<Self, ConfigFileError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigFileError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigFileError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Applies command-line flags on top of the current values.
    ///
    /// Boolean flags only ever move a setting away from its default, so a
    /// flag that is not given leaves the file's value alone.
    pub fn apply_cli(&mut self, cli: &Cli) {
        if cli.reset_on_close {
            self.reset_on_close = true;
        }
        if cli.reset_on_select {
            self.reset_on_select = true;
        }
        if cli.no_minimal {
            self.minimal = false;
        }
        if cli.not_filterable {
            self.filterable = false;
        }
        if cli.no_alt_screen {
            self.alt_screen = false;
        }
        if cli.no_mouse {
            self.mouse = false;
        }
        if let Some(position) = cli.position {
            self.position = position;
        }
        if let Some(rows) = cli.max_visible {
            self.max_visible = rows;
        }
        self.verbosity = self.verbosity.max(cli.verbose);
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a size is zero.
    pub fn validate(&self) -> Result<(), ConfigFileError> {
        if self.max_visible == 0 {
            return Err(ConfigFileError::NoVisibleRows);
        }
        if self.input_width == 0 {
            return Err(ConfigFileError::NoInputWidth);
        }
        Ok(())
    }

    /// Log filter directive for the verbosity level.
    #[must_use]
    pub const fn log_level(&self) -> &'static str {
        match self.verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }

    /// The settings as a TOML document.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string(self)
    }
}

/// Stores [`Position`] by its kebab-case name.
mod position_name {
    use serde::{Deserialize, Deserializer, Serializer, de};
    use typeahead::popover::Position;

    pub fn serialize<S: Serializer>(
        position: &Position,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_str(position)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Position, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["film-suggest"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = DemoConfig::default();
        assert!(config.filterable);
        assert!(config.minimal);
        assert!(!config.reset_on_close);
        assert!(!config.reset_on_select);
        assert_eq!(config.position, Position::BottomLeft);
        assert_eq!(config.max_visible, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: DemoConfig =
            toml::from_str("reset_on_select = true\nposition = \"top-right\"\n").unwrap();
        assert!(config.reset_on_select);
        assert_eq!(config.position, Position::TopRight);
        assert!(config.minimal);
        assert_eq!(config.input_width, 30);
    }

    #[test]
    fn test_toml_rejects_unknown_position() {
        let err = toml::from_str::<DemoConfig>("position = \"middle\"\n").unwrap_err();
        assert!(err.to_string().contains("unknown popover position"));
    }

    #[test]
    fn test_toml_rejects_unknown_keys() {
        assert!(toml::from_str::<DemoConfig>("colour = \"red\"\n").is_err());
    }

    #[test]
    fn test_to_toml_reads_back() {
        let config = DemoConfig {
            minimal: false,
            position: Position::TopLeft,
            verbosity: 2,
            ..DemoConfig::default()
        };
        let text = config.to_toml().unwrap();
        assert!(text.contains("position = \"top-left\""));
        assert_eq!(toml::from_str::<DemoConfig>(&text).unwrap(), config);
    }

    #[test]
    fn test_flags_override_file_values() {
        let mut config: DemoConfig =
            toml::from_str("position = \"top-left\"\nverbosity = 1\n").unwrap();
        config.apply_cli(&cli(&[
            "--position",
            "bottom-right",
            "--no-minimal",
            "--not-filterable",
            "-vv",
        ]));
        assert_eq!(config.position, Position::BottomRight);
        assert!(!config.minimal);
        assert!(!config.filterable);
        assert_eq!(config.verbosity, 2);
    }

    #[test]
    fn test_absent_flags_keep_file_values() {
        let mut config: DemoConfig =
            toml::from_str("reset_on_close = true\nminimal = false\nverbosity = 3\n").unwrap();
        config.apply_cli(&cli(&[]));
        assert!(config.reset_on_close);
        assert!(!config.minimal);
        assert_eq!(config.verbosity, 3);
    }

    #[test]
    fn test_validate_rejects_zero_rows() {
        let config = DemoConfig {
            max_visible: 0,
            ..DemoConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigFileError::NoVisibleRows)));
    }

    #[test]
    fn test_log_level() {
        let mut config = DemoConfig::default();
        assert_eq!(config.log_level(), "warn");
        config.verbosity = 1;
        assert_eq!(config.log_level(), "info");
        config.verbosity = 2;
        assert_eq!(config.log_level(), "debug");
        config.verbosity = 9;
        assert_eq!(config.log_level(), "trace");
    }

    #[test]
    fn test_load_reports_missing_file() {
        let err = DemoConfig::load(Path::new("/nonexistent/film-suggest.toml")).unwrap_err();
        assert!(matches!(err, ConfigFileError::Read { .. }));
        assert!(err.to_string().contains("film-suggest.toml"));
    }
}
