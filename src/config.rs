//! Engine configuration
//!
//! Every tolerance the detectors use lives here, grouped per detector. All
//! sections and fields are optional in the TOML file; missing values take
//! their defaults.
//!
//! ```toml
//! [logging]
//! level = "debug"
//!
//! [selections]
//! strict = false
//!
//! [wall]
//! max_thickness = 600.0
//! ```

use crate::detectors::{AxisConfig, ColumnConfig, DoorConfig, RoomConfig, WallConfig};
use crate::error::{Result, SemanticError};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit configuration file
pub const CONFIG_ENV: &str = "DXF_SEMANTICS_CONFIG";

/// Root configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub logging: LoggingConfig,
    pub selections: SelectionConfig,
    pub axis: AxisConfig,
    pub column: ColumnConfig,
    pub wall: WallConfig,
    pub room: RoomConfig,
    pub door: DoorConfig,
}

impl EngineConfig {
    /// Load from an explicit path
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|source| SemanticError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|source| SemanticError::Config {
            path: PathBuf::new(),
            source,
        })
    }

    /// Locate the configuration: `DXF_SEMANTICS_CONFIG` if set, else
    /// `./config/semantics.toml` if present, else defaults
    pub fn discover() -> Result<Self> {
        let explicit = env::var_os(CONFIG_ENV).map(PathBuf::from);
        let cwd = env::current_dir()?;
        Self::discover_in(explicit, &cwd)
    }

    fn discover_in(explicit: Option<PathBuf>, cwd: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        let default_path = cwd.join("config").join("semantics.toml");
        if default_path.exists() {
            Self::from_file(default_path)
        } else {
            Ok(Self::default())
        }
    }
}

/// Log output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing` filter directive used when `RUST_LOG` is unset
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Selection map handling
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    /// Reject unknown selection keys instead of ignoring them with a warning
    pub strict: bool,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self { strict: true }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let cfg = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(cfg.logging.level, "info");
        assert!(cfg.selections.strict);
        assert_eq!(cfg.axis.merge_tolerance, 1.0);
        assert_eq!(cfg.column.tolerance, 150.0);
        assert_eq!(cfg.wall.max_thickness, 1000.0);
        assert_eq!(cfg.wall.min_length, 500.0);
        assert_eq!(cfg.room.endpoint_tolerance, 50.0);
        assert_eq!(cfg.room.max_cycle_length, 20);
        assert_eq!(cfg.door.default_width, 900.0);
    }

    #[test]
    fn test_partial_sections_keep_other_defaults() {
        let cfg = EngineConfig::from_toml_str(
            r#"
            [wall]
            max_thickness = 600.0

            [room]
            max_cycles = 50
            "#,
        )
        .unwrap();
        assert_eq!(cfg.wall.max_thickness, 600.0);
        assert_eq!(cfg.wall.min_length, 500.0);
        assert_eq!(cfg.room.max_cycles, 50);
        assert_eq!(cfg.room.min_area, 100.0);
    }

    #[test]
    fn test_load_from_temp_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            [logging]
            level = "debug"

            [selections]
            strict = false
            "#
        )
        .unwrap();
        let cfg = EngineConfig::from_file(file.path()).unwrap();
        assert_eq!(cfg.logging.level, "debug");
        assert!(!cfg.selections.strict);
    }

    #[test]
    fn test_invalid_file_reports_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[wall]\nmax_thickness = \"thick\"").unwrap();
        let err = EngineConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, SemanticError::Config { ref path, .. } if path == file.path()));
    }

    #[test]
    fn test_discover_default_location() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = EngineConfig::discover_in(None, dir.path()).unwrap();
        assert!(cfg.selections.strict);

        fs::create_dir(dir.path().join("config")).unwrap();
        fs::write(
            dir.path().join("config").join("semantics.toml"),
            "[column]\ntolerance = 75.0\n",
        )
        .unwrap();
        let cfg = EngineConfig::discover_in(None, dir.path()).unwrap();
        assert_eq!(cfg.column.tolerance, 75.0);
    }

    #[test]
    fn test_discover_explicit_path_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(matches!(
            EngineConfig::discover_in(Some(missing), dir.path()),
            Err(SemanticError::Io(_))
        ));
    }
}
