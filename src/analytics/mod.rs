//! Comparative metrics derived from the merged dataset.

pub mod insights;
pub mod overview;
pub mod regional;

pub use insights::{summarize_highlights, Highlight, Highlights};
pub use overview::{compute_overview, most_common_sector, OverviewMetrics, RegionalPosition, Sector};
pub use regional::{rank_descending, RegionalAverages};
