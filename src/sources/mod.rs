//! Clients for the four outbound services. Each call is a single blocking attempt;
//! callers decide how a failure degrades.

pub mod geography;
pub mod http;
pub mod knowledge_graph;
pub mod statistics;
pub mod works;

pub use geography::{CountryResolver, GeographyClient, NameCache};
pub use http::build_client;
pub use knowledge_graph::{GenderNamedCounts, KnowledgeGraphClient};
pub use statistics::{Observation, StatisticsClient};
pub use works::{ResearchPaper, WorksClient};
