mod common;

use std::sync::Arc;

use genderscope::aggregate::NeighborAggregator;
use genderscope::sources::{
    build_client, CountryResolver, GeographyClient, NameCache, StatisticsClient,
};
use genderscope::{IndicatorKey, MetricValue};
use httpmock::prelude::*;

use common::{config_for, mock_country, mock_country_status, mock_metric, mock_region};

struct Clients {
    statistics: StatisticsClient,
    resolver: CountryResolver,
}

fn clients(server: &MockServer) -> Clients {
    let config = config_for(server);
    let http = build_client(&config).expect("client should build");
    Clients {
        statistics: StatisticsClient::new(http.clone(), &config.endpoints.statistics, 2),
        resolver: CountryResolver::new(
            GeographyClient::new(http, &config.endpoints.geography),
            Arc::new(NameCache::new()),
        ),
    }
}

#[test]
fn neighbors_are_keyed_by_display_name_with_every_indicator() {
    let server = MockServer::start();
    mock_region(&server);
    let clients = clients(&server);
    let aggregator = NeighborAggregator::new(&clients.statistics, &clients.resolver);

    let neighbors = aggregator.fetch_for_neighbors("UA", &IndicatorKey::ALL);

    assert_eq!(
        neighbors.keys().map(String::as_str).collect::<Vec<_>>(),
        vec!["Moldova", "Poland"]
    );
    let poland = &neighbors["Poland"];
    assert_eq!(poland.iter().count(), IndicatorKey::COUNT);
    assert_eq!(poland.get(IndicatorKey::WomenInParliament), MetricValue::Present(28.3));
    assert_eq!(poland.get(IndicatorKey::UnemploymentRateFemale), MetricValue::Absent);
    assert_eq!(poland.present_count(), 4);
}

#[test]
fn neighbor_without_any_data_is_kept_with_all_absent() {
    let server = MockServer::start();
    mock_region(&server);
    let clients = clients(&server);
    let aggregator = NeighborAggregator::new(&clients.statistics, &clients.resolver);

    let neighbors = aggregator.fetch_for_neighbors("UA", &IndicatorKey::ALL);

    let moldova = neighbors.get("Moldova").expect("Moldova should be present");
    assert_eq!(moldova.present_count(), 0);
    assert!(moldova.iter().all(|(_, value)| value == MetricValue::Absent));
}

#[test]
fn unresolved_neighbor_name_falls_back_to_code() {
    let server = MockServer::start();
    mock_country(&server, "FI", "Finland", &["NOR", "SWE"]);
    mock_country(&server, "SWE", "Sweden", &["FIN", "NOR"]);
    mock_country_status(&server, "NOR", 502);
    mock_metric(&server, "NOR", IndicatorKey::WomenInParliament, 45.0);
    let clients = clients(&server);
    let aggregator = NeighborAggregator::new(&clients.statistics, &clients.resolver);

    let neighbors =
        aggregator.fetch_for_neighbors("FI", &[IndicatorKey::WomenInParliament]);

    assert_eq!(
        neighbors["NOR"].get(IndicatorKey::WomenInParliament),
        MetricValue::Present(45.0)
    );
    assert!(neighbors.contains_key("Sweden"));
}

#[test]
fn border_lookup_failure_yields_no_neighbors() {
    let server = MockServer::start();
    mock_country_status(&server, "UA", 503);
    let clients = clients(&server);
    let aggregator = NeighborAggregator::new(&clients.statistics, &clients.resolver);

    assert!(aggregator.fetch_for_neighbors("UA", &IndicatorKey::ALL).is_empty());
}

#[test]
fn target_record_collects_requested_indicators() {
    let server = MockServer::start();
    mock_region(&server);
    let clients = clients(&server);
    let aggregator = NeighborAggregator::new(&clients.statistics, &clients.resolver);

    let record = aggregator.fetch_country_record(
        "UA",
        &[
            IndicatorKey::FemalePopulation,
            IndicatorKey::LaborForceParticipationMale,
            IndicatorKey::LiteracyRateFemaleYouth,
        ],
    );

    assert_eq!(record.get(IndicatorKey::FemalePopulation), MetricValue::Present(53.6));
    assert_eq!(
        record.get(IndicatorKey::LaborForceParticipationMale),
        MetricValue::Present(60.0)
    );
    assert_eq!(record.get(IndicatorKey::LiteracyRateFemaleYouth), MetricValue::Absent);
    assert_eq!(record.present_count(), 2);
}
