//! Persisted registry of named subgraph endpoints and wallet addresses.
//!
//! The store keeps two registries in one JSON file: `subgraphs` (chain name
//! to endpoint URL) and `addresses` (wallet name to on-chain address). A
//! missing file means an empty store; a file that exists but does not parse
//! is a hard error.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// An ordered name-to-value registry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Registry(BTreeMap<String, String>);

impl Registry {
    /// Lists entries in name order.
    pub fn list(&self) -> impl Iterator<Item = (&String, &String)> {
        self.0.iter()
    }

    /// Looks up a value by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Inserts or replaces an entry.
    pub fn put(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoredConfig {
    #[serde(default)]
    subgraphs: Registry,
    #[serde(default)]
    addresses: Registry,
}

/// JSON-file-backed store of chain endpoints and tracked addresses.
#[derive(Debug)]
pub struct ConfigStore {
    path: PathBuf,
    data: StoredConfig,
}

impl ConfigStore {
    /// Loads the store at `path`, starting empty if the file does not exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let data = if path.exists() {
            let raw = fs::read_to_string(&path)
                .with_context(|| format!("reading config {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("parsing config {}", path.display()))?
        } else {
            StoredConfig::default()
        };
        Ok(Self { path, data })
    }

    /// Writes the store back to its file as pretty-printed JSON.
    ///
    /// # Errors
    /// Returns an error if the file cannot be written.
    pub fn save(&self) -> Result<()> {
        let raw = serde_json::to_string_pretty(&self.data)?;
        fs::write(&self.path, raw)
            .with_context(|| format!("writing config {}", self.path.display()))
    }

    /// The chain name to endpoint URL registry.
    #[must_use]
    pub fn subgraphs(&self) -> &Registry {
        &self.data.subgraphs
    }

    pub fn subgraphs_mut(&mut self) -> &mut Registry {
        &mut self.data.subgraphs
    }

    /// The wallet name to address registry.
    #[must_use]
    pub fn addresses(&self) -> &Registry {
        &self.data.addresses
    }

    pub fn addresses_mut(&mut self) -> &mut Registry {
        &mut self.data.addresses
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}
