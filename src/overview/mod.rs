//! Live game-server overview: candidate resolution, status fetches, normalization.

pub mod aggregator;
pub mod candidates;
pub mod fetcher;
pub mod models;
pub mod normalize;

pub use aggregator::OverviewService;
pub use candidates::resolve_candidates;
pub use fetcher::{HttpStatusFetcher, StatusFetcher};
pub use models::{OverviewPlayer, ServerOverview};
