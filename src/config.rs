use std::collections::HashMap;
use std::time::Duration;
use std::{fs, path::Path};

use anyhow::{Context, bail};
use dotenv::dotenv;
use envsubst::substitute;
use serde::Deserialize;

/// Only variables with these prefixes are substituted into the YAML.
const ENV_PREFIXES: [&str; 3] = ["SERVER_", "RPC_", "APP_"];

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    pub rpc: RpcConfig,
    #[serde(default)]
    pub app: AppConfig,
}

impl Config {
    pub async fn from_yaml(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        dotenv().ok();

        let path = path.as_ref();
        let file_content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file from path: {}", path.display()))?;

        let env_vars: HashMap<String, String> = std::env::vars()
            .filter(|(key, _)| ENV_PREFIXES.iter().any(|prefix| key.starts_with(prefix)))
            .collect();

        let interpolated = substitute(&file_content, &env_vars)
            .context("failed to substitute environment variables in YAML")?;

        let config: Config =
            serde_yaml::from_str(&interpolated).context("failed to parse YAML configuration")?;

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.rpc.url.is_empty() || self.rpc.url.contains("${") {
            bail!("rpc.url is required (set RPC_URL)");
        }
        if self.rpc.request_timeout_secs == 0 {
            bail!("rpc.request_timeout_secs must be greater than zero");
        }
        Ok(())
    }

    pub fn server_uri(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.rpc.request_timeout_secs)
    }

    pub fn is_production(&self) -> bool {
        self.app.environment == "production"
    }

    /// Log filter used when `RUST_LOG` is unset.
    pub fn default_log_filter(&self) -> &'static str {
        if self.is_production() {
            "info,alloy=warn,hyper=warn"
        } else {
            "debug,alloy=info,hyper=info"
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RpcConfig {
    pub url: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_environment")]
    pub environment: String,
    #[serde(default = "default_version")]
    pub version: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: default_environment(),
            version: default_version(),
        }
    }
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    1337
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_environment() -> String {
    "development".to_string()
}

fn default_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
