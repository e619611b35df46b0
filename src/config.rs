//! Runtime configuration. Defaults target Ukraine against the public endpoints; an optional
//! YAML file (`GENDERSCOPE_CONFIG`) overrides any field, and `GENDERSCOPE_BIND` /
//! `GENDERSCOPE_WORKERS` override the serving knobs.

use std::env;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const CONFIG_PATH_ENV: &str = "GENDERSCOPE_CONFIG";
pub const BIND_ENV: &str = "GENDERSCOPE_BIND";
pub const WORKERS_ENV: &str = "GENDERSCOPE_WORKERS";

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_DECIMALS: u32 = 2;
pub const DEFAULT_PAPER_PAGE_SIZE: u32 = 15;
pub const DEFAULT_WORKERS: usize = 16;
const MAX_DECIMALS: u32 = 6;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub bind_addr: String,
    pub target: TargetCountry,
    pub endpoints: Endpoints,
    /// Decimal places kept on fetched values and derived gaps.
    pub decimals: u32,
    pub paper_query: String,
    pub paper_page_size: u32,
    /// Upper bound on concurrent outbound requests.
    pub workers: usize,
    pub http_timeout_secs: u64,
    pub user_agent: String,
}

/// The single country the dashboard is built around. `name` is the dataset key for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetCountry {
    pub name: String,
    /// ISO alpha-2 code used against the statistics and geography services.
    pub code: String,
    /// Knowledge-graph entity id of the country (Wikidata Q-number).
    pub entity: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub statistics: String,
    pub geography: String,
    pub knowledge_graph: String,
    pub works: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            target: TargetCountry::default(),
            endpoints: Endpoints::default(),
            decimals: DEFAULT_DECIMALS,
            paper_query: "gender equality".to_string(),
            paper_page_size: DEFAULT_PAPER_PAGE_SIZE,
            workers: DEFAULT_WORKERS,
            http_timeout_secs: 30,
            user_agent: concat!(
                "genderscope/",
                env!("CARGO_PKG_VERSION"),
                " (gender equality dashboard)"
            )
            .to_string(),
        }
    }
}

impl Default for TargetCountry {
    fn default() -> Self {
        Self {
            name: "Ukraine".to_string(),
            code: "UA".to_string(),
            entity: "Q212".to_string(),
        }
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            statistics: "https://api.worldbank.org/v2".to_string(),
            geography: "https://restcountries.com/v3.1".to_string(),
            knowledge_graph: "https://query.wikidata.org/sparql".to_string(),
            works: "https://api.openalex.org".to_string(),
        }
    }
}

impl Endpoints {
    /// Points every service at one base URL (used against a local mock server).
    pub fn all_at(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            statistics: base.to_string(),
            geography: base.to_string(),
            knowledge_graph: format!("{base}/sparql"),
            works: base.to_string(),
        }
    }
}

impl Config {
    /// Defaults, then the YAML file named by `GENDERSCOPE_CONFIG` if set, then env overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match env::var(CONFIG_PATH_ENV) {
            Ok(path) if !path.trim().is_empty() => Self::from_yaml_file(path.trim())?,
            _ => Self::default(),
        };
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml_str(&raw).map_err(|err| match err {
            ConfigError::Yaml { source, .. } => ConfigError::Yaml {
                path: path.display().to_string(),
                source,
            },
            other => other,
        })
    }

    pub fn from_yaml_str(raw: &str) -> Result<Self, ConfigError> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(raw).map_err(|source| ConfigError::Yaml {
            path: "<inline>".to_string(),
            source,
        })
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(bind) = env::var(BIND_ENV) {
            if !bind.trim().is_empty() {
                self.bind_addr = bind.trim().to_string();
            }
        }
        if let Ok(raw) = env::var(WORKERS_ENV) {
            self.workers = raw.trim().parse::<usize>().map_err(|_| {
                ConfigError::Invalid(format!("{WORKERS_ENV} must be a positive integer, got '{raw}'"))
            })?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut problems = Vec::new();
        if self.target.name.trim().is_empty() {
            problems.push("target.name must not be empty".to_string());
        }
        if self.target.code.trim().is_empty() {
            problems.push("target.code must not be empty".to_string());
        }
        if self.decimals > MAX_DECIMALS {
            problems.push(format!("decimals must be at most {MAX_DECIMALS}"));
        }
        if self.paper_page_size == 0 {
            problems.push("paper_page_size must be at least 1".to_string());
        }
        if self.workers == 0 {
            problems.push("workers must be at least 1".to_string());
        }
        if problems.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Invalid(problems.join("; ")))
        }
    }
}
