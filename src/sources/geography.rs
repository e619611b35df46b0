//! Country identity: code -> display name and code -> bordering codes.
//!
//! The statistics service speaks alpha-2 while border lists come back as alpha-3, so
//! codes are never converted between schemes; the name returned here is the only
//! display identity a country gets.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::SourceError;
use crate::sources::http::{ensure_success, join_url};

const SERVICE: &str = "geography";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CountryInfo {
    #[serde(default)]
    pub name: Option<CountryName>,
    #[serde(default)]
    pub borders: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CountryName {
    #[serde(default)]
    pub common: Option<String>,
}

#[derive(Debug, Clone)]
pub struct GeographyClient {
    http: Client,
    base_url: String,
}

impl GeographyClient {
    pub fn new(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    /// `GET {base}/alpha/{code}`; the service answers with a one-element array.
    pub fn country(&self, code: &str) -> Result<CountryInfo, SourceError> {
        let url = join_url(&self.base_url, &format!("alpha/{code}"));
        let response = self
            .http
            .get(url)
            .send()
            .map_err(SourceError::http(SERVICE))?;
        let mut entries: Vec<CountryInfo> = ensure_success(SERVICE, response)?
            .json()
            .map_err(SourceError::http(SERVICE))?;
        if entries.is_empty() {
            return Err(SourceError::shape(SERVICE, format!("no entry for '{code}'")));
        }
        Ok(entries.swap_remove(0))
    }
}

/// Process-lifetime code -> name cache. Append-only; concurrent fills of the same key
/// write the same value, so last write wins.
#[derive(Debug, Default)]
pub struct NameCache {
    names: RwLock<HashMap<String, String>>,
}

impl NameCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, code: &str) -> Option<String> {
        let names = self.names.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        names.get(code).cloned()
    }

    pub fn insert(&self, code: &str, name: &str) {
        let mut names = self.names.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        names.insert(code.to_string(), name.to_string());
    }

    pub fn len(&self) -> usize {
        self.names
            .read()
            .map(|names| names.len())
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone)]
pub struct CountryResolver {
    geography: GeographyClient,
    cache: Arc<NameCache>,
}

impl CountryResolver {
    pub fn new(geography: GeographyClient, cache: Arc<NameCache>) -> Self {
        Self { geography, cache }
    }

    pub fn cache(&self) -> &Arc<NameCache> {
        &self.cache
    }

    /// Common display name for `code`; falls back to the code itself and never fails.
    /// Only successful lookups are cached, so a later call retries a failed one.
    pub fn resolve_name(&self, code: &str) -> String {
        if let Some(name) = self.cache.get(code) {
            return name;
        }
        match self.geography.country(code) {
            Ok(info) => match info.name.and_then(|name| name.common) {
                Some(name) if !name.trim().is_empty() => {
                    self.cache.insert(code, &name);
                    name
                }
                _ => {
                    warn!(code, "country has no common name, using code");
                    code.to_string()
                }
            },
            Err(err) => {
                warn!(code, error = %err, "country name lookup failed, using code");
                code.to_string()
            }
        }
    }

    /// Declared border codes; empty on failure. Empty is also a normal answer for islands.
    pub fn resolve_neighbors(&self, code: &str) -> Vec<String> {
        match self.geography.country(code) {
            Ok(info) => {
                if let Some(name) = info.name.as_ref().and_then(|name| name.common.as_deref()) {
                    self.cache.insert(code, name);
                }
                debug!(code, neighbors = info.borders.len(), "borders resolved");
                info.borders
            }
            Err(err) => {
                warn!(code, error = %err, "border lookup failed, continuing without neighbors");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_service_entry() {
        let raw = r#"[{"name":{"common":"Poland","official":"Republic of Poland"},"borders":["BLR","CZE"],"cca3":"POL"}]"#;
        let entries: Vec<CountryInfo> = serde_json::from_str(raw).expect("should parse");
        assert_eq!(
            entries[0].name.as_ref().and_then(|n| n.common.as_deref()),
            Some("Poland")
        );
        assert_eq!(entries[0].borders, vec!["BLR", "CZE"]);
    }

    #[test]
    fn missing_borders_default_to_empty() {
        let raw = r#"[{"name":{"common":"Iceland"}}]"#;
        let entries: Vec<CountryInfo> = serde_json::from_str(raw).expect("should parse");
        assert!(entries[0].borders.is_empty());
    }

    #[test]
    fn cache_overwrites_idempotently() {
        let cache = NameCache::new();
        assert!(cache.is_empty());
        cache.insert("POL", "Poland");
        cache.insert("POL", "Poland");
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("POL").as_deref(), Some("Poland"));
        assert_eq!(cache.get("HUN"), None);
    }
}
