use std::collections::BTreeMap;

use crate::catalog::IndicatorKey;
use crate::model::{round_to, Dataset};

/// Mean of each indicator over the neighbors that report it. `None` when no neighbor does.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionalAverages {
    means: [Option<f64>; IndicatorKey::COUNT],
}

impl RegionalAverages {
    pub fn compute(dataset: &Dataset) -> Self {
        let mut totals = [0.0_f64; IndicatorKey::COUNT];
        let mut counts = [0usize; IndicatorKey::COUNT];
        for (_, record) in dataset.neighbors() {
            for (key, value) in record.iter() {
                if let Some(value) = value.value() {
                    totals[key.index()] += value;
                    counts[key.index()] += 1;
                }
            }
        }

        let mut means = [None; IndicatorKey::COUNT];
        for key in IndicatorKey::ALL {
            let i = key.index();
            if counts[i] > 0 {
                means[i] = Some(totals[i] / counts[i] as f64);
            }
        }
        Self { means }
    }

    pub fn get(&self, key: IndicatorKey) -> Option<f64> {
        self.means[key.index()]
    }

    pub fn rounded(&self, decimals: u32) -> BTreeMap<IndicatorKey, Option<f64>> {
        IndicatorKey::ALL
            .iter()
            .map(|key| (*key, self.get(*key).map(|mean| round_to(mean, decimals))))
            .collect()
    }
}

/// 1-indexed position of `country` when every country reporting `key` is sorted by value,
/// highest first. Equal values are ordered by name. `None` when `country` has no value.
pub fn rank_descending(dataset: &Dataset, key: IndicatorKey, country: &str) -> Option<usize> {
    let mut ranked: Vec<(&str, f64)> = dataset
        .countries()
        .filter_map(|(name, record)| record.get(key).value().map(|value| (name, value)))
        .collect();

    ranked.sort_by(|left, right| {
        right
            .1
            .total_cmp(&left.1)
            .then_with(|| left.0.cmp(right.0))
    });

    ranked
        .iter()
        .position(|(name, _)| *name == country)
        .map(|position| position + 1)
}
