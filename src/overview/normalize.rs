//! Coercions from untrusted status JSON into overview fields. Every function here is total:
//! malformed input degrades to a default, never an error.

use crate::overview::models::OverviewPlayer;
use serde_json::{Map, Value};

pub const MAX_PLAYERS: usize = 50;

/// Best-effort integer: integers as-is, finite floats truncated, booleans as 1/0,
/// strings trimmed then parsed base 10. Everything else is `None`.
pub fn coerce_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && *f >= i64::MIN as f64 && *f <= i64::MAX as f64)
                .map(|f| f.trunc() as i64)
        }),
        Value::Bool(b) => Some(i64::from(*b)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Trimmed string if `value` is a string with non-whitespace content.
pub fn non_blank(value: &Value) -> Option<String> {
    value
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

/// Objects pass through; any other JSON value reads as an empty object.
pub fn as_object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(m) => m,
        _ => Map::new(),
    }
}

pub fn normalize_player(index: usize, entry: &Value) -> OverviewPlayer {
    let ordinal = index + 1;
    let fallback_id = || format!("player-{}", ordinal);
    let fallback_name = || format!("Jugador {}", ordinal);

    let Value::Object(fields) = entry else {
        return OverviewPlayer {
            id: fallback_id(),
            name: fallback_name(),
            identifier: None,
            ping: None,
        };
    };

    let id = match fields.get("id") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => fallback_id(),
        Some(other) => other.to_string(),
    };
    let name = fields.get("name").and_then(non_blank).unwrap_or_else(fallback_name);
    let identifier = fields
        .get("identifiers")
        .and_then(Value::as_array)
        .and_then(|ids| ids.iter().find_map(non_blank));
    let ping = fields.get("ping").and_then(coerce_int);

    OverviewPlayer {
        id,
        name,
        identifier,
        ping,
    }
}

/// Normalize a `players.json` payload, keeping the first `MAX_PLAYERS` entries in order.
/// A payload that is not an array yields no players.
pub fn normalize_players(payload: &Value) -> Vec<OverviewPlayer> {
    payload
        .as_array()
        .map(|entries| {
            entries
                .iter()
                .take(MAX_PLAYERS)
                .enumerate()
                .map(|(i, e)| normalize_player(i, e))
                .collect()
        })
        .unwrap_or_default()
}

fn vars(info: &Map<String, Value>) -> Option<&Map<String, Value>> {
    info.get("vars").and_then(Value::as_object)
}

pub fn players_online(dynamic: &Map<String, Value>, players: &[OverviewPlayer]) -> i64 {
    dynamic
        .get("clients")
        .and_then(coerce_int)
        .unwrap_or(players.len() as i64)
}

pub fn players_max(dynamic: &Map<String, Value>, info: &Map<String, Value>) -> Option<i64> {
    dynamic
        .get("sv_maxclients")
        .and_then(coerce_int)
        .or_else(|| vars(info)?.get("sv_maxClients").and_then(coerce_int))
}

pub fn hostname(dynamic: &Map<String, Value>, info: &Map<String, Value>) -> Option<String> {
    dynamic
        .get("hostname")
        .and_then(non_blank)
        .or_else(|| vars(info)?.get("sv_projectName").and_then(non_blank))
}
