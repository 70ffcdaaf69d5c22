//! Optional TOML settings file
//!
//! ```toml
//! [search]
//! depth = 7
//! table = { kind = "persist", capacity = 200000 }
//!
//! [connect4]
//! center = 8
//!
//! [othello]
//! mobility = 120
//! ```
//!
//! Every section and key is optional; command-line flags win over the file.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use rduel_core::SearchConfig;
use rduel_core::connect::ConnectWeights;
use rduel_core::othello::OthelloWeights;
use serde::Deserialize;

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub search: SearchConfig,
    pub connect4: ConnectWeights,
    pub othello: OthelloWeights,
}

impl Config {
    /// Read `path`, or the defaults when no file is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Config::default());
        };
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config = Self::parse(&text)
            .with_context(|| format!("invalid config {}", path.display()))?;
        log::debug!("loaded config from {}: {config:?}", path.display());
        Ok(config)
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Search settings with a command-line depth applied on top.
    pub fn search_with(&self, depth: Option<u32>) -> SearchConfig {
        SearchConfig {
            depth: depth.or(self.search.depth),
            ..self.search
        }
    }
}
