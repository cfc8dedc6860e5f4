use std::path::{Path, PathBuf};

use clap::Parser;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data::model::{ColumnNames, DatasetKind};

pub const DEFAULT_PHYSICAL_FILE: &str = "Driblab_Argentina_2025_Fisico.csv";
pub const DEFAULT_EVENTS_FILE: &str = "Driblab_Argentina_2025.csv";
pub const DEFAULT_HIGHLIGHT_TEAM: &str = "River Plate";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("jitter must be a finite, non-negative number (got {0})")]
    InvalidJitter(f64),
}

// ---------------------------------------------------------------------------
// Dashboard configuration
// ---------------------------------------------------------------------------

/// Everything the dashboard needs to know before loading data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    pub physical_path: PathBuf,
    pub events_path: PathBuf,
    /// Players of this team get a purple marker border.
    pub highlight_team: String,
    /// Half-width of the vertical jitter interval.
    pub jitter: f64,
    pub columns: ColumnNames,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            physical_path: PathBuf::from(DEFAULT_PHYSICAL_FILE),
            events_path: PathBuf::from(DEFAULT_EVENTS_FILE),
            highlight_team: DEFAULT_HIGHLIGHT_TEAM.to_string(),
            jitter: 0.5,
            columns: ColumnNames::default(),
        }
    }
}

impl DashboardConfig {
    /// Read a JSON config file; absent fields keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Build the effective config from command-line arguments.
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let mut config = match &cli.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        if let Some(p) = &cli.physical {
            config.physical_path = p.clone();
        }
        if let Some(p) = &cli.events {
            config.events_path = p.clone();
        }
        if let Some(team) = &cli.highlight_team {
            config.highlight_team = team.clone();
        }
        Ok(config)
    }

    pub fn path_for(&self, kind: DatasetKind) -> &Path {
        match kind {
            DatasetKind::Physical => &self.physical_path,
            DatasetKind::Events => &self.events_path,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !self.jitter.is_finite() || self.jitter < 0.0 {
            return Err(ConfigError::InvalidJitter(self.jitter));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Command line
// ---------------------------------------------------------------------------

#[derive(Parser, Debug, Default)]
#[command(name = "driblab-viewer", version, about = "Player metric dashboard for Driblab exports")]
pub struct Cli {
    /// JSON configuration file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Physical data export (.csv, .json or .parquet)
    #[arg(long, value_name = "FILE")]
    pub physical: Option<PathBuf>,

    /// Event data export (.csv, .json or .parquet)
    #[arg(long, value_name = "FILE")]
    pub events: Option<PathBuf>,

    /// Team whose players get a purple border
    #[arg(long, value_name = "TEAM")]
    pub highlight_team: Option<String>,
}
