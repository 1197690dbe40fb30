use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Deserialize;

use crate::errors::BenchError;
use crate::parse::DEFAULT_MARKER;

pub const DEFAULT_REPETITIONS: usize = 10;
pub const DEFAULT_SERVER: &str = "./server3";

/// Payload sizes swept by default: powers of two from 1 to 32768.
pub fn default_sizes() -> Vec<u32> {
    (0..16).map(|shift| 1u32 << shift).collect()
}

/// Effective settings for a sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchConfig {
    pub sizes: Vec<u32>,
    pub repetitions: usize,
    pub server: PathBuf,
    pub marker: String,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            sizes: default_sizes(),
            repetitions: DEFAULT_REPETITIONS,
            server: PathBuf::from(DEFAULT_SERVER),
            marker: DEFAULT_MARKER.to_string(),
        }
    }
}

/// On-disk TOML layout. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub sizes: Option<Vec<u32>>,
    pub repetitions: Option<usize>,
    pub server: Option<PathBuf>,
    pub marker: Option<String>,
}

/// Values given on the command line, applied last.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub sizes: Option<Vec<u32>>,
    pub repetitions: Option<usize>,
    pub server: Option<PathBuf>,
    pub marker: Option<String>,
}

impl BenchConfig {
    pub fn apply_file(&mut self, file: ConfigFile) {
        if let Some(sizes) = file.sizes {
            self.sizes = sizes;
        }
        if let Some(repetitions) = file.repetitions {
            self.repetitions = repetitions;
        }
        if let Some(server) = file.server {
            self.server = server;
        }
        if let Some(marker) = file.marker {
            self.marker = marker;
        }
    }

    pub fn apply_overrides(&mut self, overrides: Overrides) {
        if let Some(sizes) = overrides.sizes {
            self.sizes = sizes;
        }
        if let Some(repetitions) = overrides.repetitions {
            self.repetitions = repetitions;
        }
        if let Some(server) = overrides.server {
            self.server = server;
        }
        if let Some(marker) = overrides.marker {
            self.marker = marker;
        }
    }

    /// Put the size list in sweep order: ascending, without duplicates.
    pub fn normalize(&mut self) {
        self.sizes.sort_unstable();
        self.sizes.dedup();
    }

    pub fn validate(&self) -> Result<()> {
        let invalid = |detail: &str| -> anyhow::Error {
            BenchError::InvalidConfig {
                detail: detail.to_string(),
            }
            .into()
        };

        if self.repetitions == 0 {
            return Err(invalid("repetitions must be at least 1"));
        }
        if self.sizes.is_empty() {
            return Err(invalid("size list is empty"));
        }
        if self.sizes.contains(&0) {
            return Err(invalid("sizes must be greater than zero"));
        }
        if self.marker.trim().is_empty() {
            return Err(invalid("elapsed time marker is empty"));
        }
        Ok(())
    }
}

/// Read and parse a config file.
pub fn read_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).map_err(|source| BenchError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;

    let file: ConfigFile = toml::from_str(&content).map_err(|e| BenchError::ConfigParse {
        path: path.to_path_buf(),
        detail: e.message().to_string(),
    })?;

    Ok(file)
}

/// `<config dir>/rdmabench/config.toml`, if the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("rdmabench").join("config.toml"))
}

/// Build the effective config: defaults, then the config file, then `overrides`.
/// The resulting size list is sorted ascending and deduplicated.
///
/// An explicit `config_path` must exist. Without one, the default location is
/// read only when a file is present there.
pub fn load_config(config_path: Option<&Path>, overrides: Overrides) -> Result<BenchConfig> {
    let mut config = BenchConfig::default();

    match config_path {
        Some(path) => config.apply_file(read_config_file(path)?),
        None => {
            if let Some(path) = default_config_path()
                && path.is_file()
            {
                tracing::debug!(path = %path.display(), "using default config file");
                config.apply_file(read_config_file(&path)?);
            }
        }
    }

    config.apply_overrides(overrides);
    config.normalize();
    config.validate()?;
    Ok(config)
}
