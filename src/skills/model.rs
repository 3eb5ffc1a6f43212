// SPDX-License-Identifier: MIT
//! Skill data model — serialisable record mutated by the simulated API.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// A tracked competency with a display name and a proficiency level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    /// Unique identifier, assigned once at creation (UUID v4).
    pub id: String,

    /// Display name, e.g. `"Rust"`.
    #[serde(default)]
    pub name: String,

    /// Proficiency level. Missing values in stored data default to 0.
    #[serde(default)]
    pub level: i64,
}

impl Skill {
    /// Build a new skill with a freshly generated unique id.
    pub fn new(name: impl Into<String>, level: i64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            level,
        }
    }
}

/// Coerce an arbitrary JSON value into a proficiency level.
///
/// Numbers truncate toward zero, numeric strings parse, everything else
/// (including an absent value) is 0.
pub fn coerce_level(value: Option<&Value>) -> i64 {
    match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        Some(Value::String(s)) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().map(|f| f as i64))
                .unwrap_or(0)
        }
        _ => 0,
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
