#![allow(dead_code)]

use genderscope::config::{Config, Endpoints};
use genderscope::IndicatorKey;
use httpmock::prelude::*;
use httpmock::Mock;
use serde_json::json;

/// Config pointing every service at `server`, with a small pool and short timeout.
pub fn config_for(server: &MockServer) -> Config {
    Config {
        endpoints: Endpoints::all_at(&server.base_url()),
        workers: 4,
        http_timeout_secs: 5,
        ..Config::default()
    }
}

pub fn mock_country<'a>(
    server: &'a MockServer,
    code: &str,
    name: &str,
    borders: &[&str],
) -> Mock<'a> {
    let path = format!("/alpha/{code}");
    let body = json!([{ "name": { "common": name, "official": name }, "borders": borders }]);
    server.mock(|when, then| {
        when.method(GET).path(path);
        then.status(200).json_body(body);
    })
}

pub fn mock_country_status<'a>(server: &'a MockServer, code: &str, status: u16) -> Mock<'a> {
    let path = format!("/alpha/{code}");
    server.mock(|when, then| {
        when.method(GET).path(path);
        then.status(status).json_body(json!({ "status": status, "message": "Not Found" }));
    })
}

/// Statistics response with a leading null observation, as the service returns for the
/// current year before data is published.
pub fn mock_metric<'a>(
    server: &'a MockServer,
    code: &str,
    key: IndicatorKey,
    value: f64,
) -> Mock<'a> {
    let path = format!("/country/{code}/indicator/{}", key.code());
    let body = json!([
        { "page": 1, "pages": 1, "per_page": 50, "total": 2 },
        [
            { "value": null, "date": "2024", "indicator": { "id": key.code() } },
            { "value": value, "date": "2023", "indicator": { "id": key.code() } }
        ]
    ]);
    server.mock(|when, then| {
        when.method(GET).path(path).query_param("format", "json");
        then.status(200).json_body(body);
    })
}

pub fn mock_named_counts<'a>(server: &'a MockServer, female: u64, male: u64) -> Mock<'a> {
    let body = json!({
        "head": { "vars": ["genderLabel", "count"] },
        "results": { "bindings": [
            { "genderLabel": { "type": "literal", "value": "female" }, "count": { "type": "literal", "value": female.to_string() } },
            { "genderLabel": { "type": "literal", "value": "male" }, "count": { "type": "literal", "value": male.to_string() } }
        ] }
    });
    server.mock(|when, then| {
        when.method(GET).path("/sparql").query_param_exists("query");
        then.status(200).json_body(body);
    })
}

pub fn mock_named_counts_status(server: &MockServer, status: u16) -> Mock<'_> {
    server.mock(|when, then| {
        when.method(GET).path("/sparql");
        then.status(status).body("upstream timeout");
    })
}

pub fn mock_works(server: &MockServer) -> Mock<'_> {
    let body = json!({
        "meta": { "count": 2 },
        "results": [
            {
                "id": "https://openalex.org/W100",
                "display_name": "Women in post-war reconstruction",
                "authorships": [
                    { "author": { "display_name": "O. Shevchenko" } },
                    { "author": { "display_name": "K. Nowak" } }
                ],
                "publication_date": "2024-11-02",
                "license": { "url": "https://creativecommons.org/licenses/by/4.0/" },
                "open_access": { "is_oa": true },
                "primary_location": { "landing_page_url": "https://doi.org/10.1000/w100" },
                "concepts": [
                    { "display_name": "Political science", "score": 0.61 },
                    { "display_name": "Gender equality", "score": 0.93 }
                ]
            },
            {
                "id": "https://openalex.org/W99",
                "display_name": "Pay gaps in Central Europe",
                "authorships": [],
                "publication_date": "2024-10-28",
                "open_access": { "is_oa": false },
                "primary_location": null,
                "concepts": []
            }
        ]
    });
    server.mock(|when, then| {
        when.method(GET)
            .path("/works")
            .query_param("search", "gender equality")
            .query_param("sort", "publication_date:desc")
            .query_param("per-page", "15");
        then.status(200).json_body(body);
    })
}

/// Ukraine with two neighbors: Poland reports a few indicators, Moldova reports none.
pub fn mock_region(server: &MockServer) {
    mock_country(server, "UA", "Ukraine", &["POL", "MDA"]);
    mock_country(server, "POL", "Poland", &["UKR", "DEU"]);
    mock_country(server, "MDA", "Moldova", &["ROU", "UKR"]);

    mock_metric(server, "UA", IndicatorKey::FemalePopulation, 53.6);
    mock_metric(server, "UA", IndicatorKey::LaborForceParticipationFemale, 48.0);
    mock_metric(server, "UA", IndicatorKey::LaborForceParticipationMale, 60.0);
    mock_metric(server, "UA", IndicatorKey::WomenInParliament, 20.8);
    mock_metric(server, "UA", IndicatorKey::EmploymentInServicesFemale, 71.3);
    mock_metric(server, "UA", IndicatorKey::MaternalMortalityRatio, 17.0);

    mock_metric(server, "POL", IndicatorKey::FemalePopulation, 51.7);
    mock_metric(server, "POL", IndicatorKey::WomenInParliament, 28.3);
    mock_metric(server, "POL", IndicatorKey::LaborForceParticipationFemale, 49.2);
    mock_metric(server, "POL", IndicatorKey::MaternalMortalityRatio, 2.0);
}
