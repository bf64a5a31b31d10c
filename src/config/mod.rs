// Configuration loading and management.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::model::ActivitySeed;

pub const PROD: &str = "prod";
#[allow(dead_code)]
pub const DEV: &str = "dev";
#[allow(dead_code)]
pub const DEBUG: &str = "debug";
#[allow(dead_code)]
pub const TEST: &str = "test";

pub const DEFAULT_NAME: &str = "activities";
pub const DEFAULT_PORT: &str = "8000";
pub const DEFAULT_STATIC_DIR: &str = "static";
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Service {
    #[serde(rename = "activities_service")]
    pub service: ServiceBox,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServiceBox {
    pub env: String,
    pub logs: Option<Logs>,
    pub runtime: Option<Runtime>,
    pub api: Option<Api>,
    #[serde(rename = "static")]
    pub assets: Option<Assets>,
    pub capacity: Option<Capacity>,
    pub shutdown: Option<Shutdown>,
    pub activities: Option<Vec<ActivitySeed>>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Logs {
    pub level: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Runtime {
    pub num_cpus: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Api {
    pub name: Option<String>,
    pub port: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Assets {
    pub dir: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Capacity {
    pub enforce: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Shutdown {
    #[serde(default, with = "humantime_serde")]
    pub timeout: Option<Duration>,
}

// Config trait
pub trait ConfigTrait {
    fn logs(&self) -> Option<&Logs>;
    fn is_prod(&self) -> bool;
    #[allow(dead_code)]
    fn is_debug(&self) -> bool;
    #[allow(dead_code)]
    fn is_dev(&self) -> bool;
    #[allow(dead_code)]
    fn is_test(&self) -> bool;
    fn runtime(&self) -> &Runtime;
    fn api(&self) -> Option<&Api>;
    fn static_dir(&self) -> &str;
    fn enforce_capacity(&self) -> bool;
    fn shutdown_timeout(&self) -> Duration;
    fn activities(&self) -> Option<&[ActivitySeed]>;
}

// Config type alias for convenience
pub type Config = Service;

impl ConfigTrait for Config {
    fn logs(&self) -> Option<&Logs> {
        self.service.logs.as_ref()
    }

    fn is_prod(&self) -> bool {
        self.service.env == PROD
    }

    fn is_debug(&self) -> bool {
        self.service.env == DEBUG
    }

    fn is_dev(&self) -> bool {
        self.service.env == DEV
    }

    fn is_test(&self) -> bool {
        self.service.env == TEST
    }

    fn runtime(&self) -> &Runtime {
        const ALL_CORES: Runtime = Runtime { num_cpus: 0 };
        self.service.runtime.as_ref().unwrap_or(&ALL_CORES)
    }

    fn api(&self) -> Option<&Api> {
        self.service.api.as_ref()
    }

    fn static_dir(&self) -> &str {
        self.service
            .assets
            .as_ref()
            .and_then(|a| a.dir.as_deref())
            .unwrap_or(DEFAULT_STATIC_DIR)
    }

    fn enforce_capacity(&self) -> bool {
        self.service
            .capacity
            .as_ref()
            .map(|c| c.enforce)
            .unwrap_or(true)
    }

    fn shutdown_timeout(&self) -> Duration {
        self.service
            .shutdown
            .as_ref()
            .and_then(|s| s.timeout)
            .unwrap_or(DEFAULT_SHUTDOWN_TIMEOUT)
    }

    fn activities(&self) -> Option<&[ActivitySeed]> {
        self.service.activities.as_deref()
    }
}

impl Config {
    /// Loads configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        // Resolve absolute path
        let abs_path = path
            .canonicalize()
            .with_context(|| format!("failed to resolve absolute config filepath: {:?}", path))?;

        // Read file
        let data = std::fs::read_to_string(&abs_path)
            .with_context(|| format!("read config yaml file {:?}", abs_path))?;

        Self::parse(&data).with_context(|| format!("unmarshal yaml from {:?}", abs_path))
    }

    /// Parses configuration from YAML text.
    pub fn parse(data: &str) -> Result<Self> {
        let cfg: Service = serde_yaml::from_str(data)?;

        if let Some(ref activities) = cfg.service.activities {
            crate::db::seed::validate(activities).context("invalid activities section")?;
        }

        Ok(cfg)
    }
}

// Test config is always available for integration tests
mod test_config;
#[allow(dead_code)]
pub use test_config::new_test_config;
