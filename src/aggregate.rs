//! Fan-out of metric fetches over countries × indicators, merged into one record per
//! country.
//!
//! Every fetch is independent and degrades to [MetricValue::Absent], so merging is
//! a plain keyed write. Neighbor records are created before dispatch, which keeps a
//! neighbor in the result even when none of its fetches succeed.

use std::collections::BTreeMap;
use std::time::Instant;

use rayon::prelude::*;
use tracing::{debug, info};

use crate::catalog::IndicatorKey;
use crate::model::{CountryRecord, MetricValue};
use crate::sources::{CountryResolver, StatisticsClient};

/// Neighbor display name -> record. Never contains the target country.
pub type NeighborRecords = BTreeMap<String, CountryRecord>;

#[derive(Debug, Clone, Copy)]
pub struct NeighborAggregator<'a> {
    statistics: &'a StatisticsClient,
    resolver: &'a CountryResolver,
}

impl<'a> NeighborAggregator<'a> {
    pub fn new(statistics: &'a StatisticsClient, resolver: &'a CountryResolver) -> Self {
        Self {
            statistics,
            resolver,
        }
    }

    /// All `indicators` for one country, fetched in parallel on the current pool.
    pub fn fetch_country_record(&self, code: &str, indicators: &[IndicatorKey]) -> CountryRecord {
        indicators
            .par_iter()
            .map(|key| (*key, self.statistics.fetch_metric(code, key.code())))
            .collect::<Vec<_>>()
            .into_iter()
            .collect()
    }

    /// Records for every bordering country of `main_code`, keyed by display name.
    pub fn fetch_for_neighbors(&self, main_code: &str, indicators: &[IndicatorKey]) -> NeighborRecords {
        let started = Instant::now();
        let neighbor_codes = self.resolver.resolve_neighbors(main_code);
        if neighbor_codes.is_empty() {
            info!(country = main_code, "no neighbors to fetch");
            return NeighborRecords::new();
        }

        // Resolve names up front so each neighbor's record exists before any fetch lands.
        let names: Vec<(String, String)> = neighbor_codes
            .par_iter()
            .map(|code| (code.clone(), self.resolver.resolve_name(code)))
            .collect();
        let mut records: NeighborRecords = names
            .iter()
            .map(|(_, name)| (name.clone(), CountryRecord::empty()))
            .collect();
        let name_by_code: BTreeMap<&str, &str> = names
            .iter()
            .map(|(code, name)| (code.as_str(), name.as_str()))
            .collect();

        let tasks: Vec<(&str, IndicatorKey)> = neighbor_codes
            .iter()
            .flat_map(|code| indicators.iter().map(move |key| (code.as_str(), *key)))
            .collect();
        let results: Vec<(&str, IndicatorKey, MetricValue)> = tasks
            .par_iter()
            .map(|(code, key)| (*code, *key, self.statistics.fetch_metric(code, key.code())))
            .collect();

        let mut present = 0usize;
        for (code, key, value) in &results {
            let name = name_by_code.get(code).copied().unwrap_or(*code);
            if value.is_present() {
                present += 1;
            }
            records
                .entry(name.to_string())
                .or_insert_with(CountryRecord::empty)
                .set(*key, *value);
        }

        for (name, record) in &records {
            debug!(country = %name, present = record.present_count(), "neighbor record assembled");
        }
        info!(
            country = main_code,
            neighbors = records.len(),
            fetched = results.len(),
            present,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "neighbor metrics assembled"
        );
        records
    }
}
