//! Runtime configuration.
//!
//! Values come from an optional YAML file (named by `DOCSERVE_CONFIG`) and are
//! then overridden by environment variables.

use anyhow::Context;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::Semaphore;

pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8082";
pub const DEFAULT_DOCUMENT_ROOT: &str = "public";
pub const DEFAULT_DOCUMENT: &str = "/index.html";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Address the listener binds to
    pub listen_addr: String,
    /// Directory request paths are resolved under
    pub document_root: PathBuf,
    /// Path served when `/` is requested or no request line is recognized
    pub default_document: String,
    /// Per-connection read/write deadline; `None` waits forever
    pub io_timeout_secs: Option<u64>,
    /// Upper bound on concurrently served connections; `None` is unbounded
    pub max_connections: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            document_root: PathBuf::from(DEFAULT_DOCUMENT_ROOT),
            default_document: DEFAULT_DOCUMENT.to_string(),
            io_timeout_secs: None,
            max_connections: None,
        }
    }
}

impl Config {
    /// Loads configuration from the process environment.
    pub fn load() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration using `lookup` in place of the environment.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = match lookup("DOCSERVE_CONFIG") {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };

        if let Some(addr) = lookup("LISTEN") {
            cfg.listen_addr = addr;
        }
        if let Some(root) = lookup("DOCUMENT_ROOT") {
            cfg.document_root = PathBuf::from(root);
        }
        if let Some(doc) = lookup("DEFAULT_DOCUMENT") {
            cfg.default_document = doc;
        }
        if let Some(secs) = lookup("IO_TIMEOUT_SECS") {
            let secs = secs
                .trim()
                .parse()
                .with_context(|| format!("invalid IO_TIMEOUT_SECS: {secs:?}"))?;
            cfg.io_timeout_secs = Some(secs);
        }
        if let Some(max) = lookup("MAX_CONNECTIONS") {
            let max = max
                .trim()
                .parse()
                .with_context(|| format!("invalid MAX_CONNECTIONS: {max:?}"))?;
            cfg.max_connections = Some(max);
        }

        cfg.validate()?;
        Ok(cfg)
    }

    /// Parses a YAML configuration file. Missing keys keep their defaults.
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {path}"))?;
        Self::from_yaml(&raw).with_context(|| format!("failed to parse config file {path}"))
    }

    pub fn from_yaml(raw: &str) -> anyhow::Result<Self> {
        let cfg: Self = serde_yaml::from_str(raw)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Checks values that parse but cannot be served with.
    pub fn validate(&self) -> anyhow::Result<()> {
        if let Some(max) = self.max_connections {
            validate_max_connections(max)
                .with_context(|| format!("invalid MAX_CONNECTIONS: {max}"))?;
        }
        Ok(())
    }

    pub fn io_timeout(&self) -> Option<Duration> {
        self.io_timeout_secs.map(Duration::from_secs)
    }
}

/// A connection bound must admit at least one connection and fit in a
/// semaphore.
pub fn validate_max_connections(max: usize) -> anyhow::Result<()> {
    if max == 0 {
        anyhow::bail!("must be at least 1");
    }
    if max > Semaphore::MAX_PERMITS {
        anyhow::bail!("must not exceed {}", Semaphore::MAX_PERMITS);
    }
    Ok(())
}
