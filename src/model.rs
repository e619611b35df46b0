//! Merged per-country data: one [CountryRecord] per country, keyed by display name.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::Index;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use tracing::warn;

use crate::catalog::IndicatorKey;

/// Latest value for one (country, indicator) pair. `Absent` is "no data" and never
/// takes part in arithmetic as a zero.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum MetricValue {
    #[default]
    Absent,
    Present(f64),
}

impl MetricValue {
    pub fn value(self) -> Option<f64> {
        match self {
            Self::Present(value) => Some(value),
            Self::Absent => None,
        }
    }

    pub fn is_present(self) -> bool {
        matches!(self, Self::Present(_))
    }
}

impl From<Option<f64>> for MetricValue {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Self::Absent, Self::Present)
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Present(value) => write!(f, "{value}"),
            Self::Absent => f.write_str("N/A"),
        }
    }
}

impl Serialize for MetricValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Present(value) => serializer.serialize_f64(*value),
            Self::Absent => serializer.serialize_none(),
        }
    }
}

/// Round half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10_f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Fixed-width record: one slot per catalog indicator, so every key is always present.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CountryRecord {
    values: [MetricValue; IndicatorKey::COUNT],
}

impl CountryRecord {
    /// Record with every indicator marked absent.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, key: IndicatorKey) -> MetricValue {
        self.values[key.index()]
    }

    pub fn set(&mut self, key: IndicatorKey, value: MetricValue) {
        self.values[key.index()] = value;
    }

    pub fn with(mut self, key: IndicatorKey, value: f64) -> Self {
        self.set(key, MetricValue::Present(value));
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (IndicatorKey, MetricValue)> + '_ {
        IndicatorKey::ALL.iter().map(|key| (*key, self.get(*key)))
    }

    pub fn present_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_present()).count()
    }
}

impl FromIterator<(IndicatorKey, MetricValue)> for CountryRecord {
    fn from_iter<T: IntoIterator<Item = (IndicatorKey, MetricValue)>>(iter: T) -> Self {
        let mut record = Self::empty();
        for (key, value) in iter {
            record.set(key, value);
        }
        record
    }
}

impl Index<IndicatorKey> for CountryRecord {
    type Output = MetricValue;

    fn index(&self, key: IndicatorKey) -> &Self::Output {
        &self.values[key.index()]
    }
}

impl Serialize for CountryRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(IndicatorKey::COUNT))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key.as_str(), &value)?;
        }
        map.end()
    }
}

/// Target country plus its neighbors, keyed by display name.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    target: String,
    countries: BTreeMap<String, CountryRecord>,
}

impl Dataset {
    pub fn new(target: impl Into<String>, record: CountryRecord) -> Self {
        let target = target.into();
        let mut countries = BTreeMap::new();
        countries.insert(target.clone(), record);
        Self { target, countries }
    }

    /// Adds neighbors. A neighbor whose name collides with the target is dropped so the
    /// target entry stays the one fetched for the configured code.
    pub fn with_neighbors(mut self, neighbors: BTreeMap<String, CountryRecord>) -> Self {
        for (name, record) in neighbors {
            if name == self.target {
                warn!(country = %name, "neighbor name collides with target country, skipping");
                continue;
            }
            self.countries.insert(name, record);
        }
        self
    }

    pub fn target_name(&self) -> &str {
        &self.target
    }

    pub fn target(&self) -> &CountryRecord {
        // Inserted in `new` and never removed.
        &self.countries[&self.target]
    }

    pub fn get(&self, country: &str) -> Option<&CountryRecord> {
        self.countries.get(country)
    }

    pub fn countries(&self) -> impl Iterator<Item = (&str, &CountryRecord)> {
        self.countries
            .iter()
            .map(|(name, record)| (name.as_str(), record))
    }

    pub fn neighbors(&self) -> impl Iterator<Item = (&str, &CountryRecord)> {
        self.countries().filter(|(name, _)| *name != self.target)
    }

    pub fn len(&self) -> usize {
        self.countries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }
}

impl Serialize for Dataset {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.countries.serialize(serializer)
    }
}
