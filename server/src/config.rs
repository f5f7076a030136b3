use anyhow::{Context, Result};
use std::path::PathBuf;

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:4000";
pub const DEFAULT_LIMIT: usize = 10;

/// Server settings. Every field can be overridden from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// `GRIDQL_BIND_ADDRESS`
    pub bind_address: String,
    /// `GRIDQL_DATASET`: a JSON array of posts. The builtin dataset is served when unset.
    pub dataset: Option<PathBuf>,
    /// `GRIDQL_DEFAULT_LIMIT`: page size when a request gives none
    pub default_limit: usize,
}

impl Default for ServerConfig {
    fn default() -> Self { Self { bind_address: DEFAULT_BIND_ADDRESS.to_string(), dataset: None, default_limit: DEFAULT_LIMIT } }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> { Self::from_lookup(|key| std::env::var(key).ok()) }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();
        if let Some(addr) = lookup("GRIDQL_BIND_ADDRESS") {
            config.bind_address = addr;
        }
        if let Some(path) = lookup("GRIDQL_DATASET") {
            config.dataset = Some(PathBuf::from(path));
        }
        if let Some(limit) = lookup("GRIDQL_DEFAULT_LIMIT") {
            config.default_limit = limit.parse().with_context(|| format!("GRIDQL_DEFAULT_LIMIT is not a number: {}", limit))?;
            anyhow::ensure!(config.default_limit > 0, "GRIDQL_DEFAULT_LIMIT must be greater than zero");
        }
        Ok(config)
    }
}
