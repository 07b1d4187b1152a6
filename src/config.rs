use std::path::Path;

use crate::ai::EngineConfig;
use crate::error::ConfigError;
use crate::game::{Player, Shape, STANDARD_COLUMNS, STANDARD_ROWS};

/// Board dimensions used by the `play` command.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub columns: usize,
    pub rows: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        BoardConfig {
            columns: STANDARD_COLUMNS,
            rows: STANDARD_ROWS,
        }
    }
}

impl BoardConfig {
    pub fn shape(&self) -> Shape {
        Shape::new(self.columns, self.rows)
    }
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub engine: EngineConfig,
    pub board: BoardConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            log::info!("config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    ///
    /// Difficulty is never rejected: anything below 1 plays at one ply.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if Player::from_id(self.engine.player).is_none() {
            return Err(ConfigError::Validation(format!(
                "engine.player must be 1 or 2, got {}",
                self.engine.player
            )));
        }
        if self.board.columns == 0 {
            return Err(ConfigError::Validation(
                "board.columns must be > 0".into(),
            ));
        }
        if self.board.rows == 0 {
            return Err(ConfigError::Validation("board.rows must be > 0".into()));
        }
        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(&AppConfig::default())
    }
}
