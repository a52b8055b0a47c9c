use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_METRICS_BIND: &str = "0.0.0.0:9090";

// Menu API configuration sourced from environment variables.
#[derive(Debug, Clone)]
pub struct MenuApiConfig {
    pub bind_addr: SocketAddr,
    pub metrics_bind: SocketAddr,
    /// YAML seed replacing the built-in dishes and users.
    pub seed_path: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct MenuApiConfigOverride {
    bind_addr: Option<String>,
    metrics_bind: Option<String>,
    seed_path: Option<PathBuf>,
}

impl MenuApiConfig {
    pub fn from_env() -> Result<Self> {
        let bind_addr = std::env::var("MENU_API_BIND")
            .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .with_context(|| "parse MENU_API_BIND")?;
        let metrics_bind = std::env::var("MENU_API_METRICS_BIND")
            .unwrap_or_else(|_| DEFAULT_METRICS_BIND.to_string())
            .parse()
            .with_context(|| "parse MENU_API_METRICS_BIND")?;
        let seed_path = std::env::var("MENU_SEED_PATH").ok().map(PathBuf::from);
        Ok(Self {
            bind_addr,
            metrics_bind,
            seed_path,
        })
    }

    pub fn from_env_or_yaml() -> Result<Self> {
        let mut config = Self::from_env()?;
        if let Ok(path) = std::env::var("MENU_API_CONFIG") {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("read MENU_API_CONFIG: {path}"))?;
            let override_cfg: MenuApiConfigOverride = serde_yaml::from_str(&contents)
                .with_context(|| "parse menu api config yaml")?;
            if let Some(value) = override_cfg.bind_addr {
                config.bind_addr = value.parse().with_context(|| "parse bind_addr")?;
            }
            if let Some(value) = override_cfg.metrics_bind {
                config.metrics_bind = value.parse().with_context(|| "parse metrics_bind")?;
            }
            if let Some(value) = override_cfg.seed_path {
                config.seed_path = Some(value);
            }
        }
        Ok(config)
    }
}
