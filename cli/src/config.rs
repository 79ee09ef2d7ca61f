use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use pws::Weights;

/// Defaults read from a `--config` TOML file.
///
/// ```toml
/// out_dir = "circuits"
///
/// [poso]
/// weights = "powers-of-two"
/// check_bits = true
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub out_dir: Option<PathBuf>,
    pub poso: PosoConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PosoConfig {
    pub weights: Option<Weights>,
    pub check_bits: Option<bool>,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("cannot read config file: {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("invalid config file: {}", path.display()))
    }

    /// Load `path` if given, otherwise fall back to defaults.
    pub fn load_optional(path: Option<&str>) -> Result<Self> {
        match path {
            Some(p) => Self::load(Path::new(p)),
            None => Ok(Self::default()),
        }
    }

    /// Command-line `--out-dir` wins over the file.
    pub fn override_out_dir(mut self, out_dir: Option<&str>) -> Self {
        if let Some(dir) = out_dir {
            self.out_dir = Some(PathBuf::from(dir));
        }
        self
    }
}
