//! Response envelope helpers. Record endpoints wrap their payload under a single key,
//! e.g. `{"users": [...]}` or `{"user": {...}}`.

use axum::{http::StatusCode, Json};
use serde::Serialize;
use serde_json::{Map, Value};

pub fn keyed<T: Serialize>(key: &str, data: T) -> (StatusCode, Json<Value>) {
    let value = serde_json::to_value(data).unwrap_or(Value::Null);
    let mut body = Map::with_capacity(1);
    body.insert(key.to_string(), value);
    (StatusCode::OK, Json(Value::Object(body)))
}

pub fn keyed_many(key: &str, rows: Vec<Value>) -> (StatusCode, Json<Value>) {
    keyed(key, Value::Array(rows))
}

pub fn error_body(code: &str, message: String) -> Value {
    serde_json::json!({
        "error": {
            "code": code,
            "message": message,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyed_many_wraps_rows_under_key() {
        let (status, Json(body)) = keyed_many("players", vec![serde_json::json!({"citizenid": "ABC123"})]);
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!({"players": [{"citizenid": "ABC123"}]}));
    }

    #[test]
    fn keyed_many_keeps_empty_list() {
        let (_, Json(body)) = keyed_many("player_vehicles", Vec::new());
        assert_eq!(body, serde_json::json!({"player_vehicles": []}));
    }
}
