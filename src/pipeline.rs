//! One dashboard build: fetch the four source groups concurrently, merge, derive.
//!
//! Building never fails. Per-datapoint and per-country failures are absorbed by the
//! sources; whole-feature failures become an empty result plus a warning on the bundle.

use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tracing::{info, warn};

use crate::aggregate::NeighborAggregator;
use crate::analytics::{compute_overview, summarize_highlights, Highlights, OverviewMetrics};
use crate::catalog::{IndicatorDefinition, IndicatorKey, CATALOG};
use crate::config::Config;
use crate::model::Dataset;
use crate::parallel::WorkerPool;
use crate::sources::{
    build_client, CountryResolver, GenderNamedCounts, GeographyClient, KnowledgeGraphClient,
    NameCache, ResearchPaper, StatisticsClient, WorksClient,
};

#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
    #[error("failed to build worker pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardBundle {
    pub target_country: String,
    pub generated_at: String,
    pub data: Dataset,
    pub overview: OverviewMetrics,
    pub highlights: Highlights,
    pub gender_named_counts: GenderNamedCounts,
    pub research_papers: Vec<ResearchPaper>,
    pub indicators: &'static [IndicatorDefinition],
    /// Whole features that degraded to an empty result during this build.
    pub warnings: Vec<String>,
}

/// Long-lived dashboard service: clients, the worker pool and the country-name cache
/// live as long as this value.
#[derive(Debug)]
pub struct Dashboard {
    config: Config,
    statistics: StatisticsClient,
    resolver: CountryResolver,
    knowledge_graph: KnowledgeGraphClient,
    works: WorksClient,
    pool: WorkerPool,
}

impl Dashboard {
    /// Builds the blocking HTTP client, so call it outside an async runtime.
    pub fn new(config: Config) -> Result<Self, SetupError> {
        Self::with_name_cache(config, Arc::new(NameCache::new()))
    }

    pub fn with_name_cache(config: Config, cache: Arc<NameCache>) -> Result<Self, SetupError> {
        let http = build_client(&config)?;
        let endpoints = &config.endpoints;
        let statistics = StatisticsClient::new(http.clone(), &endpoints.statistics, config.decimals);
        let resolver = CountryResolver::new(
            GeographyClient::new(http.clone(), &endpoints.geography),
            cache,
        );
        let knowledge_graph =
            KnowledgeGraphClient::new(http.clone(), &endpoints.knowledge_graph, &config.target.entity);
        let works = WorksClient::new(
            http,
            &endpoints.works,
            &config.paper_query,
            config.paper_page_size,
        );
        let pool = WorkerPool::with_workers(config.workers)?;
        Ok(Self {
            config,
            statistics,
            resolver,
            knowledge_graph,
            works,
            pool,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn name_cache(&self) -> &Arc<NameCache> {
        self.resolver.cache()
    }

    pub fn build(&self) -> DashboardBundle {
        let started = Instant::now();
        let target = &self.config.target;
        let aggregator = NeighborAggregator::new(&self.statistics, &self.resolver);
        let indicators = &IndicatorKey::ALL;

        let ((target_record, neighbors), (named_counts, research_papers)) = self.pool.install(|| {
            rayon::join(
                || {
                    rayon::join(
                        || aggregator.fetch_country_record(&target.code, indicators),
                        || aggregator.fetch_for_neighbors(&target.code, indicators),
                    )
                },
                || {
                    rayon::join(
                        || self.knowledge_graph.fetch_gender_named_counts(),
                        || self.works.fetch_latest_research_papers(),
                    )
                },
            )
        });

        let mut warnings = Vec::new();
        let gender_named_counts = named_counts.unwrap_or_else(|err| {
            warn!(error = %err, "gender-named feature counts unavailable");
            warnings.push(format!("gender-named feature counts unavailable: {err}"));
            GenderNamedCounts::new()
        });
        if research_papers.is_empty() {
            warnings.push("no research papers available".to_string());
        }

        let data = Dataset::new(target.name.clone(), target_record).with_neighbors(neighbors);
        let overview = compute_overview(&data, self.config.decimals);
        let highlights = summarize_highlights(&data);

        info!(
            target = %target.name,
            countries = data.len(),
            papers = research_papers.len(),
            warnings = warnings.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "dashboard built"
        );

        DashboardBundle {
            target_country: target.name.clone(),
            generated_at: chrono::Utc::now().to_rfc3339(),
            data,
            overview,
            highlights,
            gender_named_counts,
            research_papers,
            indicators: &CATALOG,
            warnings,
        }
    }
}
