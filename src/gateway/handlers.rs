// SPDX-License-Identifier: MIT
//! Operation handlers — execute one normalized operation against the store
//! and badge engine.
//!
//! Entity-not-found is a 404 reply, not an error: the only `Err` out of
//! `execute` is a failed store write, which the backend classifies to 500.

use anyhow::Result;
use serde_json::{json, Value};

use crate::badges;
use crate::skills::{Skill, SkillStore};

use super::routes::Operation;

/// Status + body of a simulated server reply, before enveloping.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub status: u16,
    pub data: Value,
}

impl Reply {
    fn ok(data: Value) -> Self {
        Self { status: 200, data }
    }

    fn created(data: Value) -> Self {
        Self { status: 201, data }
    }

    fn no_content() -> Self {
        Self {
            status: 204,
            data: Value::Null,
        }
    }

    pub fn not_found() -> Self {
        Self {
            status: 404,
            data: json!({ "message": "Not Found" }),
        }
    }

    pub fn internal_error() -> Self {
        Self {
            status: 500,
            data: json!({ "message": "Internal Server Error" }),
        }
    }
}

/// Execute `op`, persisting any mutation before returning.
pub async fn execute(op: Operation, store: &dyn SkillStore) -> Result<Reply> {
    match op {
        Operation::ListSkills => list(store).await,
        Operation::CreateSkill { name, level } => create(name, level, store).await,
        Operation::UpdateSkill { id, name, level } => update(&id, name, level, store).await,
        Operation::DeleteSkill { id } => delete(&id, store).await,
        Operation::ListBadges => list_badges(store).await,
        Operation::Unmatched => Ok(Reply::not_found()),
    }
}

async fn list(store: &dyn SkillStore) -> Result<Reply> {
    let skills = store.load().await;
    Ok(Reply::ok(serde_json::to_value(skills)?))
}

async fn create(name: String, level: i64, store: &dyn SkillStore) -> Result<Reply> {
    let mut skills = store.load().await;
    let skill = Skill::new(name, level);
    skills.push(skill.clone());
    store.save(&skills).await?;
    Ok(Reply::created(serde_json::to_value(skill)?))
}

async fn update(
    id: &str,
    name: Option<String>,
    level: Option<i64>,
    store: &dyn SkillStore,
) -> Result<Reply> {
    let mut skills = store.load().await;
    let Some(skill) = skills.iter_mut().find(|s| s.id == id) else {
        return Ok(Reply::not_found());
    };
    if let Some(name) = name {
        skill.name = name;
    }
    if let Some(level) = level {
        skill.level = level;
    }
    let updated = skill.clone();
    store.save(&skills).await?;
    Ok(Reply::ok(serde_json::to_value(updated)?))
}

async fn delete(id: &str, store: &dyn SkillStore) -> Result<Reply> {
    let mut skills = store.load().await;
    let before = skills.len();
    skills.retain(|s| s.id != id);
    if skills.len() == before {
        return Ok(Reply::not_found());
    }
    store.save(&skills).await?;
    Ok(Reply::no_content())
}

async fn list_badges(store: &dyn SkillStore) -> Result<Reply> {
    let skills = store.load().await;
    let badges = badges::compute_badges(&skills);
    Ok(Reply::ok(serde_json::to_value(badges)?))
}
