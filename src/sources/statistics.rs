//! Development-indicators service: latest value for a (country, indicator) pair.
//!
//! Responses are `[metadata, observations]` with observations newest first. Many
//! country/indicator combinations have no data, so every failure here degrades to
//! [MetricValue::Absent] instead of an error.

use reqwest::blocking::Client;
use serde_json::Value;
use tracing::debug;

use crate::error::SourceError;
use crate::model::{round_to, MetricValue};
use crate::sources::http::{ensure_success, join_url};

const SERVICE: &str = "statistics";

#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub value: f64,
    pub year: Option<String>,
}

#[derive(Debug, Clone)]
pub struct StatisticsClient {
    http: Client,
    base_url: String,
    decimals: u32,
}

impl StatisticsClient {
    pub fn new(http: Client, base_url: impl Into<String>, decimals: u32) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            decimals,
        }
    }

    /// Latest non-null value, rounded, or `Absent` on any failure.
    pub fn fetch_metric(&self, country_code: &str, indicator_code: &str) -> MetricValue {
        match self.fetch_observation(country_code, indicator_code) {
            Ok(Some(observation)) => {
                debug!(
                    country = country_code,
                    indicator = indicator_code,
                    year = observation.year.as_deref().unwrap_or("?"),
                    value = observation.value,
                    "observation found"
                );
                MetricValue::Present(observation.value)
            }
            Ok(None) => {
                debug!(country = country_code, indicator = indicator_code, "no observations");
                MetricValue::Absent
            }
            Err(err) => {
                debug!(country = country_code, indicator = indicator_code, error = %err, "metric unavailable");
                MetricValue::Absent
            }
        }
    }

    pub fn fetch_observation(
        &self,
        country_code: &str,
        indicator_code: &str,
    ) -> Result<Option<Observation>, SourceError> {
        let url = join_url(
            &self.base_url,
            &format!("country/{country_code}/indicator/{indicator_code}"),
        );
        let response = self
            .http
            .get(url)
            .query(&[("format", "json")])
            .send()
            .map_err(SourceError::http(SERVICE))?;
        let body: Value = ensure_success(SERVICE, response)?
            .json()
            .map_err(SourceError::http(SERVICE))?;
        Ok(latest_observation(&body, self.decimals))
    }
}

/// First observation with a non-null numeric value, in the order returned.
pub fn latest_observation(body: &Value, decimals: u32) -> Option<Observation> {
    let observations = body.as_array()?.get(1)?.as_array()?;
    observations.iter().find_map(|record| {
        let value = record.get("value")?.as_f64()?;
        let year = record
            .get("date")
            .and_then(Value::as_str)
            .map(str::to_string);
        Some(Observation {
            value: round_to(value, decimals),
            year,
        })
    })
}
