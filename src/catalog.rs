//! Indicator catalog: every statistic the dashboard tracks, with its statistics-service
//! code, display label and chart color. Records are indexed by [IndicatorKey], so the
//! set of keys is fixed at compile time.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IndicatorKey {
    FemalePopulation,
    LaborForceParticipationFemale,
    LaborForceParticipationMale,
    WomenInParliament,
    UnemploymentRateFemale,
    UnemploymentRateMale,
    EmploymentInAgricultureFemale,
    EmploymentInIndustryFemale,
    EmploymentInServicesFemale,
    VulnerableEmploymentFemale,
    VulnerableEmploymentMale,
    WageAndSalariedWorkersFemale,
    WageAndSalariedWorkersMale,
    SelfEmployedFemale,
    SelfEmployedMale,
    LiteracyRateFemaleYouth,
    LiteracyRateMaleYouth,
    PrimaryCompletionRateFemale,
    PrimaryCompletionRateMale,
    MaternalMortalityRatio,
    AccountOwnershipFemale,
}

impl IndicatorKey {
    pub const COUNT: usize = 21;

    /// All keys in catalog order. The position of a key in this array is its [index](Self::index).
    pub const ALL: [IndicatorKey; Self::COUNT] = [
        Self::FemalePopulation,
        Self::LaborForceParticipationFemale,
        Self::LaborForceParticipationMale,
        Self::WomenInParliament,
        Self::UnemploymentRateFemale,
        Self::UnemploymentRateMale,
        Self::EmploymentInAgricultureFemale,
        Self::EmploymentInIndustryFemale,
        Self::EmploymentInServicesFemale,
        Self::VulnerableEmploymentFemale,
        Self::VulnerableEmploymentMale,
        Self::WageAndSalariedWorkersFemale,
        Self::WageAndSalariedWorkersMale,
        Self::SelfEmployedFemale,
        Self::SelfEmployedMale,
        Self::LiteracyRateFemaleYouth,
        Self::LiteracyRateMaleYouth,
        Self::PrimaryCompletionRateFemale,
        Self::PrimaryCompletionRateMale,
        Self::MaternalMortalityRatio,
        Self::AccountOwnershipFemale,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Stable symbolic name, used as the JSON/CSV key.
    pub fn as_str(self) -> &'static str {
        self.definition().key
    }

    /// Statistics-service indicator code.
    pub fn code(self) -> &'static str {
        self.definition().code
    }

    pub fn label(self) -> &'static str {
        self.definition().label
    }

    pub fn color(self) -> &'static str {
        self.definition().color
    }

    pub fn definition(self) -> &'static IndicatorDefinition {
        &CATALOG[self.index()]
    }
}

impl fmt::Display for IndicatorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IndicatorKey {
    type Err = UnknownIndicator;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|key| key.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| UnknownIndicator(needle.to_string()))
    }
}

impl Serialize for IndicatorKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown indicator key '{0}'")]
pub struct UnknownIndicator(pub String);

#[derive(Debug, Clone, Copy, Serialize)]
pub struct IndicatorDefinition {
    pub key: &'static str,
    pub code: &'static str,
    pub label: &'static str,
    pub color: &'static str,
}

const fn def(
    key: &'static str,
    code: &'static str,
    label: &'static str,
    color: &'static str,
) -> IndicatorDefinition {
    IndicatorDefinition {
        key,
        code,
        label,
        color,
    }
}

/// Ordered to match [IndicatorKey::ALL].
pub static CATALOG: [IndicatorDefinition; IndicatorKey::COUNT] = [
    def("female_population", "SP.POP.TOTL.FE.ZS", "Female Population (%)", "#f48fb1"),
    def(
        "labor_force_participation_female",
        "SL.TLF.CACT.FE.ZS",
        "Female Labor Force Participation (%)",
        "#81d4fa",
    ),
    def(
        "labor_force_participation_male",
        "SL.TLF.CACT.MA.ZS",
        "Male Labor Force Participation (%)",
        "#90caf9",
    ),
    def("women_in_parliament", "SG.GEN.PARL.ZS", "Women in Parliament (%)", "#a5d6a7"),
    def(
        "unemployment_rate_female",
        "SL.UEM.TOTL.FE.ZS",
        "Female Unemployment Rate (%)",
        "#ffcc80",
    ),
    def(
        "unemployment_rate_male",
        "SL.UEM.TOTL.MA.ZS",
        "Male Unemployment Rate (%)",
        "#ffab91",
    ),
    def(
        "employment_in_agriculture_female",
        "SL.AGR.EMPL.FE.ZS",
        "Employment in Agriculture (Female, %)",
        "#c5e1a5",
    ),
    def(
        "employment_in_industry_female",
        "SL.IND.EMPL.FE.ZS",
        "Employment in Industry (Female, %)",
        "#80cbc4",
    ),
    def(
        "employment_in_services_female",
        "SL.SRV.EMPL.FE.ZS",
        "Employment in Services (Female, %)",
        "#b39ddb",
    ),
    def(
        "vulnerable_employment_female",
        "SL.EMP.VULN.FE.ZS",
        "Vulnerable Employment (Female, %)",
        "#e57373",
    ),
    def(
        "vulnerable_employment_male",
        "SL.EMP.VULN.MA.ZS",
        "Vulnerable Employment (Male, %)",
        "#fe3bc5",
    ),
    def(
        "wage_and_salaried_workers_female",
        "SL.EMP.WORK.FE.ZS",
        "Wage and Salaried Workers (Female, %)",
        "#4db6ac",
    ),
    def(
        "wage_and_salaried_workers_male",
        "SL.EMP.WORK.MA.ZS",
        "Wage and Salaried Workers (Male, %)",
        "#ceb0bd",
    ),
    def(
        "self_employed_female",
        "SL.EMP.SELF.FE.ZS",
        "Self-Employed (Female, %)",
        "#ff8a65",
    ),
    def(
        "self_employed_male",
        "SL.EMP.SELF.MA.ZS",
        "Self-Employed (Male, %)",
        "#f06292",
    ),
    def(
        "literacy_rate_female_youth",
        "SE.ADT.1524.LT.FE.ZS",
        "Youth Literacy Rate (Female, %)",
        "#ba68c8",
    ),
    def(
        "literacy_rate_male_youth",
        "SE.ADT.1524.LT.MA.ZS",
        "Youth Literacy Rate (Male, %)",
        "#9575cd",
    ),
    def(
        "primary_completion_rate_female",
        "SE.PRM.CMPT.FE.ZS",
        "Primary Completion Rate (Female, %)",
        "#aed581",
    ),
    def(
        "primary_completion_rate_male",
        "SE.PRM.CMPT.MA.ZS",
        "Primary Completion Rate (Male, %)",
        "#fff176",
    ),
    def(
        "maternal_mortality_ratio",
        "SH.STA.MMRT",
        "Maternal Mortality Ratio (per 100,000)",
        "#e57373",
    ),
    def(
        "account_ownership_female",
        "FX.OWN.TOTL.FE.ZS",
        "Account Ownership (Female, %)",
        "#81c784",
    ),
];
