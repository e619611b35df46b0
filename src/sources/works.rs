//! Scholarly-works search: most recent publications for a topic query.

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::SourceError;
use crate::sources::http::{ensure_success, join_url};

const SERVICE: &str = "works";
const TOP_CATEGORIES: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResearchPaper {
    pub id: String,
    pub title: String,
    pub authors: String,
    pub publication_date: String,
    pub license: Option<String>,
    pub open_access: bool,
    pub link: String,
    pub categories: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct WorksClient {
    http: Client,
    base_url: String,
    query: String,
    per_page: u32,
}

impl WorksClient {
    pub fn new(http: Client, base_url: impl Into<String>, query: impl Into<String>, per_page: u32) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            query: query.into(),
            per_page,
        }
    }

    /// Newest papers first; empty on any failure.
    pub fn fetch_latest_research_papers(&self) -> Vec<ResearchPaper> {
        match self.try_fetch() {
            Ok(papers) => {
                debug!(count = papers.len(), "research papers fetched");
                papers
            }
            Err(err) => {
                warn!(error = %err, "research paper search failed, showing none");
                Vec::new()
            }
        }
    }

    pub fn try_fetch(&self) -> Result<Vec<ResearchPaper>, SourceError> {
        let per_page = self.per_page.to_string();
        let response = self
            .http
            .get(join_url(&self.base_url, "works"))
            .query(&[
                ("search", self.query.as_str()),
                ("sort", "publication_date:desc"),
                ("per-page", per_page.as_str()),
            ])
            .send()
            .map_err(SourceError::http(SERVICE))?;
        let body: WorksResponse = ensure_success(SERVICE, response)?
            .json()
            .map_err(SourceError::http(SERVICE))?;
        Ok(body.results.into_iter().map(ResearchPaper::from).collect())
    }
}

#[derive(Debug, Default, Deserialize)]
struct WorksResponse {
    #[serde(default)]
    results: Vec<WorkRecord>,
}

#[derive(Debug, Default, Deserialize)]
struct WorkRecord {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    authorships: Vec<Authorship>,
    #[serde(default)]
    publication_date: Option<String>,
    /// Object with a `url`, or a bare license string, depending on record vintage.
    #[serde(default)]
    license: Option<Value>,
    #[serde(default)]
    open_access: Option<OpenAccess>,
    #[serde(default)]
    primary_location: Option<PrimaryLocation>,
    #[serde(default)]
    concepts: Vec<Concept>,
}

#[derive(Debug, Default, Deserialize)]
struct Authorship {
    #[serde(default)]
    author: Option<Author>,
}

#[derive(Debug, Default, Deserialize)]
struct Author {
    #[serde(default)]
    display_name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct OpenAccess {
    #[serde(default)]
    is_oa: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
struct PrimaryLocation {
    #[serde(default)]
    landing_page_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct Concept {
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    score: Option<f64>,
}

impl From<WorkRecord> for ResearchPaper {
    fn from(record: WorkRecord) -> Self {
        let authors = record
            .authorships
            .into_iter()
            .filter_map(|authorship| authorship.author.and_then(|author| author.display_name))
            .collect::<Vec<_>>()
            .join(", ");

        let mut concepts = record.concepts;
        // Stable sort keeps service order among equal scores.
        concepts.sort_by(|left, right| {
            right
                .score
                .unwrap_or(0.0)
                .total_cmp(&left.score.unwrap_or(0.0))
        });
        let categories = concepts
            .into_iter()
            .take(TOP_CATEGORIES)
            .map(|concept| concept.display_name.unwrap_or_else(|| "General".to_string()))
            .collect();

        let license = record.license.and_then(|license| match license {
            Value::String(name) => Some(name),
            Value::Object(map) => map.get("url").and_then(Value::as_str).map(str::to_string),
            _ => None,
        });

        Self {
            id: record.id.unwrap_or_else(|| "N/A".to_string()),
            title: record
                .display_name
                .unwrap_or_else(|| "No Title Available".to_string()),
            authors,
            publication_date: record
                .publication_date
                .unwrap_or_else(|| "N/A".to_string()),
            license,
            open_access: record
                .open_access
                .and_then(|oa| oa.is_oa)
                .unwrap_or(false),
            link: record
                .primary_location
                .and_then(|location| location.landing_page_url)
                .unwrap_or_else(|| "#".to_string()),
            categories,
        }
    }
}
