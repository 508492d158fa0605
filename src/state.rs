//! Shared application state for all routes.

use crate::overview::OverviewService;
use crate::store::GameDataRepository;

#[derive(Clone)]
pub struct AppState {
    pub repository: GameDataRepository,
    pub overview: OverviewService,
}

impl AppState {
    pub fn new(repository: GameDataRepository, overview: OverviewService) -> Self {
        Self { repository, overview }
    }
}
