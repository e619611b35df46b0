//! Headline extremes across every country in the dataset, target included.

use std::cmp::Ordering;

use serde::Serialize;

use crate::catalog::IndicatorKey;
use crate::model::Dataset;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Highlight {
    pub country: String,
    pub value: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Highlights {
    pub top_female_population: Option<Highlight>,
    pub top_parliament: Option<Highlight>,
    pub lowest_labor_force: Option<Highlight>,
}

pub fn summarize_highlights(dataset: &Dataset) -> Highlights {
    Highlights {
        top_female_population: extreme(dataset, IndicatorKey::FemalePopulation, Extreme::Max),
        top_parliament: extreme(dataset, IndicatorKey::WomenInParliament, Extreme::Max),
        lowest_labor_force: extreme(
            dataset,
            IndicatorKey::LaborForceParticipationFemale,
            Extreme::Min,
        ),
    }
}

#[derive(Debug, Clone, Copy)]
enum Extreme {
    Max,
    Min,
}

/// Countries without a value never win; equal values go to the first name in order.
fn extreme(dataset: &Dataset, key: IndicatorKey, which: Extreme) -> Option<Highlight> {
    let mut best: Option<(&str, f64)> = None;
    for (name, record) in dataset.countries() {
        let Some(value) = record.get(key).value() else {
            continue;
        };
        let better = match best {
            None => true,
            Some((_, current)) => {
                let ordering = value.total_cmp(&current);
                match which {
                    Extreme::Max => ordering == Ordering::Greater,
                    Extreme::Min => ordering == Ordering::Less,
                }
            }
        };
        if better {
            best = Some((name, value));
        }
    }
    best.map(|(country, value)| Highlight {
        country: country.to_string(),
        value,
    })
}
