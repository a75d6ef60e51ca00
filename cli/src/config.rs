use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use poetle_core::RulesConfig;
use serde::{Deserialize, Serialize};

/// Contents of the optional TOML config file.
///
/// ```toml
/// bank = "poems.json"
/// scores = "scores.json"
///
/// [rules]
/// max_hints = 3
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub rules: RulesConfig,
    /// JSON puzzle bank, the built-in sample is used without one.
    pub bank: Option<PathBuf>,
    /// Where `save` writes and startup resumes from.
    pub snapshot: Option<PathBuf>,
    pub scores: Option<PathBuf>,
}

impl FileConfig {
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("parsing config {}", path.display()))
    }
}
