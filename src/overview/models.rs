use serde::{Deserialize, Serialize};

/// One connected player, always fully populated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverviewPlayer {
    pub id: String,
    pub name: String,
    pub identifier: Option<String>,
    pub ping: Option<i64>,
}

/// Aggregated live status of one game server. Either the reachable fields
/// (`source_url`, counts, players) or `error` is populated, never both.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerOverview {
    pub reachable: bool,
    pub source_url: Option<String>,
    pub hostname: Option<String>,
    pub players_online: i64,
    pub players_max: Option<i64>,
    pub players: Vec<OverviewPlayer>,
    pub error: Option<String>,
}

impl ServerOverview {
    pub fn reachable(
        source_url: String,
        hostname: Option<String>,
        players_online: i64,
        players_max: Option<i64>,
        players: Vec<OverviewPlayer>,
    ) -> Self {
        Self {
            reachable: true,
            source_url: Some(source_url),
            hostname,
            players_online,
            players_max,
            players,
            error: None,
        }
    }

    pub fn unreachable(error: String) -> Self {
        Self {
            reachable: false,
            source_url: None,
            hostname: None,
            players_online: 0,
            players_max: None,
            players: Vec::new(),
            error: Some(error),
        }
    }
}
