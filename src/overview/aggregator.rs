//! Probe candidates in order and build a `ServerOverview` from the first one that answers.

use crate::error::{ConfigError, FetchError};
use crate::overview::candidates::resolve_candidates;
use crate::overview::fetcher::StatusFetcher;
use crate::overview::models::ServerOverview;
use crate::overview::normalize::{as_object, hostname, normalize_players, players_max, players_online};
use serde_json::Value;
use std::sync::Arc;

pub const DYNAMIC_PATH: &str = "/dynamic.json";
pub const PLAYERS_PATH: &str = "/players.json";
pub const INFO_PATH: &str = "/info.json";

pub const UNREACHABLE_FALLBACK: &str = "server status endpoints unreachable";

struct StatusSnapshot {
    dynamic: Value,
    players: Value,
    info: Value,
}

#[derive(Clone)]
pub struct OverviewService {
    fetcher: Arc<dyn StatusFetcher>,
    default_base_url: Option<String>,
}

impl OverviewService {
    pub fn new(fetcher: Arc<dyn StatusFetcher>, default_base_url: Option<String>) -> Self {
        Self {
            fetcher,
            default_base_url,
        }
    }

    /// Overview for `base_url`, or the configured default when `None`.
    /// Only an unusable base URL is an error; unreachable servers are a normal result.
    pub async fn overview(&self, base_url: Option<&str>) -> Result<ServerOverview, ConfigError> {
        let raw = base_url.or(self.default_base_url.as_deref()).unwrap_or_default();
        let candidates = resolve_candidates(raw)?;

        let mut last_error: Option<String> = None;
        for candidate in &candidates {
            match self.snapshot(candidate).await {
                Ok(snapshot) => {
                    tracing::debug!(candidate = %candidate, "status endpoints answered");
                    return Ok(build_overview(candidate, snapshot));
                }
                Err(e) => {
                    tracing::warn!(candidate = %candidate, error = %e, "status probe failed");
                    last_error = Some(format!("{}: {}", candidate, e));
                }
            }
        }

        Ok(ServerOverview::unreachable(
            last_error.unwrap_or_else(|| UNREACHABLE_FALLBACK.to_string()),
        ))
    }

    /// All three resources from one candidate. The fetches run concurrently; the first
    /// failure in dynamic, players, info order is reported.
    async fn snapshot(&self, candidate: &str) -> Result<StatusSnapshot, FetchError> {
        let (dynamic, players, info) = tokio::join!(
            self.fetcher.fetch_json(candidate, DYNAMIC_PATH),
            self.fetcher.fetch_json(candidate, PLAYERS_PATH),
            self.fetcher.fetch_json(candidate, INFO_PATH),
        );
        Ok(StatusSnapshot {
            dynamic: dynamic?,
            players: players?,
            info: info?,
        })
    }
}

fn build_overview(candidate: &str, snapshot: StatusSnapshot) -> ServerOverview {
    let dynamic = as_object(snapshot.dynamic);
    let info = as_object(snapshot.info);
    let players = normalize_players(&snapshot.players);

    ServerOverview::reachable(
        candidate.to_string(),
        hostname(&dynamic, &info),
        players_online(&dynamic, &players),
        players_max(&dynamic, &info),
        players,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overview::models::OverviewPlayer;
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Canned responses keyed by full URL; anything unlisted is a connection failure.
    #[derive(Default)]
    struct FakeFetcher {
        responses: HashMap<String, Result<Value, FetchError>>,
        calls: Mutex<Vec<String>>,
    }

    impl FakeFetcher {
        fn serve(mut self, candidate: &str, dynamic: Value, players: Value, info: Value) -> Self {
            for (path, body) in [(DYNAMIC_PATH, dynamic), (PLAYERS_PATH, players), (INFO_PATH, info)] {
                self.responses.insert(format!("{}{}", candidate, path), Ok(body));
            }
            self
        }

        fn fail(mut self, url: &str, err: FetchError) -> Self {
            self.responses.insert(url.to_string(), Err(err));
            self
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl StatusFetcher for FakeFetcher {
        async fn fetch_json(&self, candidate: &str, path: &str) -> Result<Value, FetchError> {
            let url = format!("{}{}", candidate, path);
            self.calls.lock().unwrap().push(url.clone());
            self.responses
                .get(&url)
                .cloned()
                .unwrap_or_else(|| Err(FetchError::Network("connection refused".into())))
        }
    }

    fn service(fetcher: FakeFetcher, default: Option<&str>) -> (OverviewService, Arc<FakeFetcher>) {
        let fetcher = Arc::new(fetcher);
        let svc = OverviewService::new(fetcher.clone(), default.map(String::from));
        (svc, fetcher)
    }

    #[tokio::test]
    async fn worked_example() {
        let (svc, _) = service(
            FakeFetcher::default().serve(
                "http://host:30120",
                json!({"clients": 12, "hostname": "My Server"}),
                json!([{"id": 3, "name": " Bob ", "identifiers": ["steam:111"], "ping": "45"}]),
                json!({"vars": {"sv_maxClients": "32"}}),
            ),
            None,
        );
        let overview = svc.overview(Some("http://host:30120")).await.unwrap();
        assert_eq!(
            overview,
            ServerOverview {
                reachable: true,
                source_url: Some("http://host:30120".into()),
                hostname: Some("My Server".into()),
                players_online: 12,
                players_max: Some(32),
                players: vec![OverviewPlayer {
                    id: "3".into(),
                    name: "Bob".into(),
                    identifier: Some("steam:111".into()),
                    ping: Some(45),
                }],
                error: None,
            }
        );
    }

    #[tokio::test]
    async fn both_candidates_down_reports_last_error() {
        let (svc, fetcher) = service(FakeFetcher::default(), Some("http://host:40100"));
        let overview = svc.overview(None).await.unwrap();
        assert_eq!(overview, ServerOverview::unreachable("http://host:30100: network error: connection refused".into()));
        let calls = fetcher.calls();
        assert_eq!(calls.len(), 6);
        assert!(calls.contains(&"http://host:40100/info.json".to_string()));
        assert!(calls.contains(&"http://host:30100/dynamic.json".to_string()));
    }

    #[tokio::test]
    async fn falls_back_to_alternate_port() {
        let (svc, _) = service(
            FakeFetcher::default().serve("http://host:30100", json!({}), json!([]), json!({})),
            None,
        );
        let overview = svc.overview(Some("http://host:40100/")).await.unwrap();
        assert!(overview.reachable);
        assert_eq!(overview.source_url.as_deref(), Some("http://host:30100"));
        assert_eq!(overview.error, None);
    }

    #[tokio::test]
    async fn first_candidate_wins_when_it_answers() {
        let (svc, fetcher) = service(
            FakeFetcher::default()
                .serve("http://host:40100", json!({}), json!([]), json!({}))
                .serve("http://host:30100", json!({"hostname": "other"}), json!([]), json!({})),
            None,
        );
        let overview = svc.overview(Some("http://host:40100")).await.unwrap();
        assert_eq!(overview.source_url.as_deref(), Some("http://host:40100"));
        assert_eq!(overview.hostname, None);
        assert_eq!(fetcher.calls().len(), 3);
    }

    #[tokio::test]
    async fn one_failed_resource_disqualifies_the_candidate() {
        let (svc, _) = service(
            FakeFetcher::default()
                .serve("http://host:30120", json!({"clients": 1}), json!([]), json!({}))
                .fail(
                    "http://host:30120/info.json",
                    FetchError::Parse {
                        url: "http://host:30120/info.json".into(),
                        reason: "expected value".into(),
                    },
                ),
            None,
        );
        let overview = svc.overview(Some("http://host:30120")).await.unwrap();
        assert!(!overview.reachable);
        assert_eq!(
            overview.error.as_deref(),
            Some("http://host:30120: invalid JSON from http://host:30120/info.json: expected value")
        );
        assert!(overview.players.is_empty());
        assert_eq!(overview.players_max, None);
    }

    #[tokio::test]
    async fn malformed_payloads_are_coerced() {
        let (svc, _) = service(
            FakeFetcher::default().serve(
                "http://host:30120",
                json!([1, 2, 3]),
                json!({"not": "a list"}),
                json!("info"),
            ),
            None,
        );
        let overview = svc.overview(Some("http://host:30120")).await.unwrap();
        assert!(overview.reachable);
        assert_eq!(overview.players_online, 0);
        assert_eq!(overview.players_max, None);
        assert_eq!(overview.hostname, None);
        assert!(overview.players.is_empty());
    }

    #[tokio::test]
    async fn online_count_falls_back_to_truncated_players() {
        let raw: Vec<Value> = (0..75).map(|i| json!({"id": i, "name": format!("p{}", i)})).collect();
        let (svc, _) = service(
            FakeFetcher::default().serve("http://host:30120", json!({"clients": "?"}), Value::Array(raw), json!({})),
            None,
        );
        let overview = svc.overview(Some("http://host:30120")).await.unwrap();
        assert_eq!(overview.players.len(), 50);
        assert_eq!(overview.players_online, 50);
        assert_eq!(overview.players[49].name, "p49");
    }

    #[tokio::test]
    async fn bad_or_missing_base_url_is_config_error() {
        let (svc, fetcher) = service(FakeFetcher::default(), None);
        assert!(matches!(svc.overview(None).await, Err(ConfigError::InvalidBaseUrl(_))));
        assert!(matches!(svc.overview(Some("ftp://host")).await, Err(ConfigError::InvalidBaseUrl(_))));
        assert!(fetcher.calls().is_empty());
    }

    #[tokio::test]
    async fn request_base_url_overrides_default() {
        let (svc, _) = service(
            FakeFetcher::default().serve("http://other:30120", json!({}), json!([]), json!({})),
            Some("http://host:30120"),
        );
        let overview = svc.overview(Some("http://other:30120")).await.unwrap();
        assert_eq!(overview.source_url.as_deref(), Some("http://other:30120"));
    }
}
