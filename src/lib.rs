//! Gender-equality dashboard for one target country and its neighbors.
//!
//! Statistics, country metadata, knowledge-graph counts and research papers are fetched
//! concurrently from four public services, merged into one record per country, and
//! reduced to a handful of comparative metrics for a single dashboard page.

pub mod aggregate;
pub mod analytics;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod model;
pub mod parallel;
pub mod pipeline;
pub mod server;
pub mod sources;

pub use catalog::IndicatorKey;
pub use config::Config;
pub use model::{CountryRecord, Dataset, MetricValue};
pub use pipeline::{Dashboard, DashboardBundle};
