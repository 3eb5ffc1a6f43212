// SPDX-License-Identifier: MIT
//! Route interpretation — (method, path, body) to a normalized operation.
//!
//! The route table:
//!
//! ```text
//! GET    /skills       => ListSkills
//! POST   /skills       => CreateSkill
//! PATCH  /skills/{id}  => UpdateSkill
//! DELETE /skills/{id}  => DeleteSkill
//! GET    /badges       => ListBadges
//! anything else        => Unmatched (404)
//! ```

use serde_json::{Map, Value};

use crate::skills::model::coerce_level;

/// A recognized API operation, or `Unmatched` for any other method/path
/// combination under the prefix.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    ListSkills,
    CreateSkill {
        name: String,
        level: i64,
    },
    /// Partial update: only fields present in the body are carried.
    UpdateSkill {
        id: String,
        name: Option<String>,
        level: Option<i64>,
    },
    DeleteSkill {
        id: String,
    },
    ListBadges,
    Unmatched,
}

/// Interpret a request against the route table.
///
/// `api_path` is the request path with the API prefix already stripped.
pub fn interpret(method: &str, api_path: &str, record: &Map<String, Value>) -> Operation {
    let segments: Vec<&str> = api_path.split('/').filter(|s| !s.is_empty()).collect();
    match (method.to_ascii_uppercase().as_str(), segments.as_slice()) {
        ("GET", ["skills"]) => Operation::ListSkills,
        ("POST", ["skills"]) => Operation::CreateSkill {
            name: string_field(record, "name").unwrap_or_default(),
            level: coerce_level(record.get("level")),
        },
        ("PATCH", ["skills", id]) => Operation::UpdateSkill {
            id: (*id).to_string(),
            name: string_field(record, "name"),
            level: record.get("level").map(|v| coerce_level(Some(v))),
        },
        ("DELETE", ["skills", id]) => Operation::DeleteSkill {
            id: (*id).to_string(),
        },
        ("GET", ["badges"]) => Operation::ListBadges,
        _ => Operation::Unmatched,
    }
}

/// Read a field as a string: strings pass through, other present values
/// render as their JSON text.
fn string_field(record: &Map<String, Value>, key: &str) -> Option<String> {
    record.get(key).map(|v| match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    })
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn list_and_badges_routes() {
        let empty = Map::new();
        assert_eq!(interpret("GET", "/skills", &empty), Operation::ListSkills);
        assert_eq!(interpret("GET", "/badges", &empty), Operation::ListBadges);
        // method matching is case-insensitive
        assert_eq!(interpret("get", "/skills", &empty), Operation::ListSkills);
        // trailing slash tolerated
        assert_eq!(interpret("GET", "/skills/", &empty), Operation::ListSkills);
    }

    #[test]
    fn create_route_reads_body_fields() {
        let op = interpret("POST", "/skills", &record(json!({"name": "Go", "level": 5})));
        assert_eq!(
            op,
            Operation::CreateSkill {
                name: "Go".to_string(),
                level: 5
            }
        );
    }

    #[test]
    fn create_route_defaults_missing_fields() {
        let op = interpret("POST", "/skills", &Map::new());
        assert_eq!(
            op,
            Operation::CreateSkill {
                name: String::new(),
                level: 0
            }
        );
    }

    #[test]
    fn update_route_carries_only_present_fields() {
        let op = interpret("PATCH", "/skills/abc", &record(json!({"level": 4})));
        assert_eq!(
            op,
            Operation::UpdateSkill {
                id: "abc".to_string(),
                name: None,
                level: Some(4),
            }
        );

        let op = interpret("PATCH", "/skills/abc", &record(json!({"name": "Rust"})));
        assert_eq!(
            op,
            Operation::UpdateSkill {
                id: "abc".to_string(),
                name: Some("Rust".to_string()),
                level: None,
            }
        );
    }

    #[test]
    fn update_route_coerces_invalid_level_to_zero() {
        let op = interpret("PATCH", "/skills/abc", &record(json!({"level": "high"})));
        assert_eq!(
            op,
            Operation::UpdateSkill {
                id: "abc".to_string(),
                name: None,
                level: Some(0),
            }
        );
    }

    #[test]
    fn delete_route() {
        assert_eq!(
            interpret("DELETE", "/skills/abc", &Map::new()),
            Operation::DeleteSkill {
                id: "abc".to_string()
            }
        );
    }

    #[test]
    fn unrecognized_routes_are_unmatched() {
        let empty = Map::new();
        assert_eq!(interpret("PUT", "/skills/abc", &empty), Operation::Unmatched);
        assert_eq!(interpret("POST", "/badges", &empty), Operation::Unmatched);
        assert_eq!(interpret("GET", "/unknown", &empty), Operation::Unmatched);
        assert_eq!(interpret("GET", "", &empty), Operation::Unmatched);
        assert_eq!(interpret("GET", "/skills/abc/extra", &empty), Operation::Unmatched);
    }
}
