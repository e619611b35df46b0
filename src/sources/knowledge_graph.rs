//! Knowledge-graph SPARQL query: how many streets and buildings in the target country are
//! named after women versus men. Unlike the statistics fetch, a failure here is an
//! error; the pipeline decides how to degrade.

use std::collections::BTreeMap;

use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use serde::Deserialize;

use crate::error::SourceError;
use crate::sources::http::ensure_success;

const SERVICE: &str = "knowledge-graph";

/// Gender label -> number of distinct named features.
pub type GenderNamedCounts = BTreeMap<String, u64>;

#[derive(Debug, Clone)]
pub struct KnowledgeGraphClient {
    http: Client,
    endpoint: String,
    query: String,
}

impl KnowledgeGraphClient {
    pub fn new(http: Client, endpoint: impl Into<String>, country_entity: &str) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
            query: gender_named_features_query(country_entity),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn fetch_gender_named_counts(&self) -> Result<GenderNamedCounts, SourceError> {
        let response = self
            .http
            .get(&self.endpoint)
            .header(ACCEPT, "application/json")
            .query(&[("query", self.query.as_str())])
            .send()
            .map_err(SourceError::http(SERVICE))?;
        let body: SparqlResponse = ensure_success(SERVICE, response)?
            .json()
            .map_err(SourceError::http(SERVICE))?;
        parse_counts(body)
    }
}

#[derive(Debug, Deserialize)]
struct SparqlResponse {
    results: SparqlResults,
}

#[derive(Debug, Deserialize)]
struct SparqlResults {
    #[serde(default)]
    bindings: Vec<CountBinding>,
}

#[derive(Debug, Deserialize)]
struct CountBinding {
    #[serde(rename = "genderLabel")]
    gender_label: BindingValue,
    count: BindingValue,
}

#[derive(Debug, Deserialize)]
struct BindingValue {
    value: String,
}

fn parse_counts(body: SparqlResponse) -> Result<GenderNamedCounts, SourceError> {
    body.results
        .bindings
        .into_iter()
        .map(|binding| {
            let count = binding.count.value.trim().parse::<u64>().map_err(|_| {
                SourceError::shape(
                    SERVICE,
                    format!("count '{}' is not an integer", binding.count.value),
                )
            })?;
            Ok((binding.gender_label.value, count))
        })
        .collect()
}

/// Features (streets, buildings and their subclasses) located in `country_entity` that are
/// named after a person of known gender, counted per gender; only currently valid namings.
pub fn gender_named_features_query(country_entity: &str) -> String {
    format!(
        r#"PREFIX wdt: <http://www.wikidata.org/prop/direct/>
PREFIX wd: <http://www.wikidata.org/entity/>
PREFIX p: <http://www.wikidata.org/prop/>
PREFIX ps: <http://www.wikidata.org/prop/statement/>
PREFIX pq: <http://www.wikidata.org/prop/qualifier/>
PREFIX rdfs: <http://www.w3.org/2000/01/rdf-schema#>
PREFIX wikibase: <http://wikiba.se/ontology#>
PREFIX bd: <http://www.bigdata.com/rdf#>

SELECT ?genderLabel (COUNT(DISTINCT ?item) AS ?count) WHERE {{
  ?item wdt:P31/wdt:P279* ?class .
  VALUES ?superclass {{ wd:Q83620 wd:Q41176 }}
  ?class wdt:P279* ?superclass .
  ?item wdt:P17 wd:{country_entity} .
  ?item p:P138 ?statement .
  ?statement ps:P138 ?namedAfter .
  OPTIONAL {{ ?statement pq:P580 ?startTime . }}
  OPTIONAL {{ ?statement pq:P582 ?endTime . }}
  FILTER (
    ( !BOUND(?startTime) || ?startTime <= NOW() ) &&
    ( !BOUND(?endTime) || ?endTime > NOW() )
  )
  ?namedAfter wdt:P21 ?gender .
  VALUES ?gender {{ wd:Q6581097 wd:Q6581072 }}
  SERVICE wikibase:label {{ bd:serviceParam wikibase:language "[AUTO_LANGUAGE],en". }}
}}
GROUP BY ?genderLabel
ORDER BY ?genderLabel
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_targets_country_entity() {
        let query = gender_named_features_query("Q212");
        assert!(query.contains("?item wdt:P17 wd:Q212 ."));
        assert!(query.contains("GROUP BY ?genderLabel"));
    }

    #[test]
    fn parses_bindings() {
        let raw = r#"{"head":{"vars":["genderLabel","count"]},"results":{"bindings":[
            {"genderLabel":{"type":"literal","value":"female"},"count":{"type":"literal","value":"412"}},
            {"genderLabel":{"type":"literal","value":"male"},"count":{"type":"literal","value":"3870"}}
        ]}}"#;
        let body: SparqlResponse = serde_json::from_str(raw).expect("should parse");
        let counts = parse_counts(body).expect("counts should parse");
        assert_eq!(counts.get("female"), Some(&412));
        assert_eq!(counts.get("male"), Some(&3870));
    }

    #[test]
    fn non_integer_count_is_shape_error() {
        let raw = r#"{"results":{"bindings":[{"genderLabel":{"value":"female"},"count":{"value":"many"}}]}}"#;
        let body: SparqlResponse = serde_json::from_str(raw).expect("should parse");
        assert!(matches!(parse_counts(body), Err(SourceError::Shape { .. })));
    }
}
