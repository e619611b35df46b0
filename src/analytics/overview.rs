//! Quick-overview metrics: the target country against its neighbors.
//!
//! Absent values never enter arithmetic. Every comparison that needs a missing input
//! yields `None` rather than a verdict; the one exception is the employment-sector
//! argmax, where a missing sector counts as zero.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::analytics::regional::{rank_descending, RegionalAverages};
use crate::catalog::IndicatorKey;
use crate::model::{round_to, Dataset, MetricValue};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverviewMetrics {
    pub regional_averages: BTreeMap<IndicatorKey, Option<f64>>,
    pub female_population: FemalePopulation,
    pub labor_force_participation: GenderGap,
    pub women_in_parliament: ParliamentPosition,
    pub unemployment_rate: UnemploymentTrend,
    pub sector_employment: SectorEmployment,
    pub wage_and_salaried_workers: ValueContext,
    pub maternal_mortality_comparison: RegionalComparison,
    pub youth_literacy_gap: GenderGap,
    pub self_employment: GenderContext,
    pub financial_access: FinancialAccess,
    pub vulnerable_employment: GenderContext,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FemalePopulation {
    pub value: MetricValue,
    /// Target minus regional average.
    pub difference: Option<f64>,
    pub ranking: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenderGap {
    pub female: MetricValue,
    pub male: MetricValue,
    /// Female minus male.
    pub gap: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RegionalPosition {
    #[serde(rename = "Above Regional Average")]
    Above,
    #[serde(rename = "Below Regional Average")]
    Below,
}

impl fmt::Display for RegionalPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Above => f.write_str("Above Regional Average"),
            Self::Below => f.write_str("Below Regional Average"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParliamentPosition {
    pub value: MetricValue,
    pub regional_position: Option<RegionalPosition>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnemploymentTrend {
    pub female: MetricValue,
    pub male: MetricValue,
    pub trend: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Sector {
    Agriculture,
    Industry,
    Services,
}

impl Sector {
    /// Enumeration order doubles as the tie-break order.
    pub const ALL: [Sector; 3] = [Self::Agriculture, Self::Industry, Self::Services];

    pub fn indicator(self) -> IndicatorKey {
        match self {
            Self::Agriculture => IndicatorKey::EmploymentInAgricultureFemale,
            Self::Industry => IndicatorKey::EmploymentInIndustryFemale,
            Self::Services => IndicatorKey::EmploymentInServicesFemale,
        }
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Agriculture => "Agriculture",
            Self::Industry => "Industry",
            Self::Services => "Services",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectorEmployment {
    pub most_common: Sector,
    pub comparison_to_region: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueContext {
    pub female: MetricValue,
    pub context: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionalComparison {
    pub value: MetricValue,
    pub comparison_to_region: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenderContext {
    pub female: MetricValue,
    pub male: MetricValue,
    pub context: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinancialAccess {
    pub value: MetricValue,
    pub context: String,
}

pub fn compute_overview(dataset: &Dataset, decimals: u32) -> OverviewMetrics {
    let target = dataset.target();
    let averages = RegionalAverages::compute(dataset);
    let get = |key: IndicatorKey| target.get(key);

    let female_population = FemalePopulation {
        value: get(IndicatorKey::FemalePopulation),
        difference: difference(
            get(IndicatorKey::FemalePopulation).value(),
            averages.get(IndicatorKey::FemalePopulation),
            decimals,
        ),
        ranking: rank_descending(dataset, IndicatorKey::FemalePopulation, dataset.target_name()),
    };

    let labor_force_participation = gender_gap(
        get(IndicatorKey::LaborForceParticipationFemale),
        get(IndicatorKey::LaborForceParticipationMale),
        decimals,
    );

    let parliament = get(IndicatorKey::WomenInParliament);
    let women_in_parliament = ParliamentPosition {
        value: parliament,
        regional_position: both(parliament.value(), averages.get(IndicatorKey::WomenInParliament))
            .map(|(value, average)| {
                if value > average {
                    RegionalPosition::Above
                } else {
                    RegionalPosition::Below
                }
            }),
    };

    let unemployment_female = get(IndicatorKey::UnemploymentRateFemale);
    let unemployment_male = get(IndicatorKey::UnemploymentRateMale);
    let unemployment_rate = UnemploymentTrend {
        female: unemployment_female,
        male: unemployment_male,
        trend: both(unemployment_female.value(), unemployment_male.value()).map(|(female, male)| {
            if female > male {
                "Higher unemployment among women".to_string()
            } else {
                "Lower unemployment among women".to_string()
            }
        }),
    };

    let most_common = most_common_sector(dataset);
    let sector_employment = SectorEmployment {
        most_common,
        comparison_to_region: format!(
            "More women work in {most_common} compared to other sectors regionally."
        ),
    };

    let salaried = get(IndicatorKey::WageAndSalariedWorkersFemale);
    let wage_and_salaried_workers = ValueContext {
        female: salaried,
        context: salaried
            .value()
            .map(|value| format!("{value}% of women are in salaried positions.")),
    };

    let maternal = get(IndicatorKey::MaternalMortalityRatio);
    let maternal_mortality_comparison = RegionalComparison {
        value: maternal,
        comparison_to_region: both(maternal.value(), averages.get(IndicatorKey::MaternalMortalityRatio))
            .map(|(value, average)| {
                if value > average {
                    "Higher than region".to_string()
                } else {
                    "Lower than region".to_string()
                }
            }),
    };

    let youth_literacy_gap = gender_gap(
        get(IndicatorKey::LiteracyRateFemaleYouth),
        get(IndicatorKey::LiteracyRateMaleYouth),
        decimals,
    );

    let self_female = get(IndicatorKey::SelfEmployedFemale);
    let self_male = get(IndicatorKey::SelfEmployedMale);
    let self_employment = GenderContext {
        female: self_female,
        male: self_male,
        context: both(self_female.value(), self_male.value()).map(|(female, male)| {
            let group = if female > male { "women" } else { "men" };
            format!("Self-employment is higher among {group}.")
        }),
    };

    let accounts = get(IndicatorKey::AccountOwnershipFemale);
    let financial_access = FinancialAccess {
        value: accounts,
        context: format!("Percentage of women with bank accounts: {accounts}%"),
    };

    let vulnerable_female = get(IndicatorKey::VulnerableEmploymentFemale);
    let vulnerable_male = get(IndicatorKey::VulnerableEmploymentMale);
    let vulnerable_employment = GenderContext {
        female: vulnerable_female,
        male: vulnerable_male,
        context: both(vulnerable_female.value(), vulnerable_male.value()).map(|(female, male)| {
            let degree = if female > male { "more" } else { "less" };
            format!("Women are {degree} likely to have vulnerable employment than men.")
        }),
    };

    OverviewMetrics {
        regional_averages: averages.rounded(decimals),
        female_population,
        labor_force_participation,
        women_in_parliament,
        unemployment_rate,
        sector_employment,
        wage_and_salaried_workers,
        maternal_mortality_comparison,
        youth_literacy_gap,
        self_employment,
        financial_access,
        vulnerable_employment,
    }
}

/// Sector with the largest female employment share for the target. Missing sectors count
/// as zero here only; ties go to the first sector in [Sector::ALL].
pub fn most_common_sector(dataset: &Dataset) -> Sector {
    let target = dataset.target();
    let mut best = Sector::Agriculture;
    let mut best_value = f64::NEG_INFINITY;
    for sector in Sector::ALL {
        let value = target.get(sector.indicator()).value().unwrap_or(0.0);
        if value > best_value {
            best = sector;
            best_value = value;
        }
    }
    best
}

fn both(left: Option<f64>, right: Option<f64>) -> Option<(f64, f64)> {
    left.zip(right)
}

fn difference(left: Option<f64>, right: Option<f64>, decimals: u32) -> Option<f64> {
    both(left, right).map(|(left, right)| round_to(left - right, decimals))
}

fn gender_gap(female: MetricValue, male: MetricValue, decimals: u32) -> GenderGap {
    GenderGap {
        female,
        male,
        gap: difference(female.value(), male.value(), decimals),
    }
}
