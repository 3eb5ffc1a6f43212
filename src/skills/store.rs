// SPDX-License-Identifier: MIT
//! Skill persistence — a single named slot holding the whole collection as
//! a JSON array.
//!
//! `load` is infallible: an absent, unreadable, or undecodable slot yields
//! an empty collection. `save` overwrites the slot with one write.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::warn;

use super::model::Skill;
use crate::error::StoreError;

/// Name of the slot file under the data directory.
const SLOT_FILE: &str = "skills.json";

/// Persistence collaborator owning the canonical skill collection.
#[async_trait]
pub trait SkillStore: Send + Sync {
    /// Read the whole collection from the slot.
    async fn load(&self) -> Vec<Skill>;

    /// Serialize and overwrite the slot with the whole collection.
    async fn save(&self, skills: &[Skill]) -> Result<(), StoreError>;
}

// ─── FileStore ────────────────────────────────────────────────────────────────

/// JSON slot file at `{data_dir}/skills.json`.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            path: data_dir.as_ref().join(SLOT_FILE),
        }
    }

    /// Path of the slot file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SkillStore for FileStore {
    async fn load(&self) -> Vec<Skill> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            // Absent slot is the normal first-run state.
            Err(_) => return Vec::new(),
        };
        match serde_json::from_str::<Vec<Skill>>(&raw) {
            Ok(skills) => skills,
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    err = %e,
                    "slot is not a skill array — resetting to empty"
                );
                Vec::new()
            }
        }
    }

    async fn save(&self, skills: &[Skill]) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent() {
            tokio::fs::create_dir_all(dir).await?;
        }
        let encoded = serde_json::to_string(skills)?;
        tokio::fs::write(&self.path, encoded).await?;
        Ok(())
    }
}

// ─── MemoryStore ──────────────────────────────────────────────────────────────

/// In-memory store for tests and embedded use.
#[derive(Default)]
pub struct MemoryStore {
    skills: RwLock<Vec<Skill>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the collection wholesale (test fixture helper).
    pub async fn seed(&self, skills: Vec<Skill>) {
        *self.skills.write().await = skills;
    }
}

#[async_trait]
impl SkillStore for MemoryStore {
    async fn load(&self) -> Vec<Skill> {
        self.skills.read().await.clone()
    }

    async fn save(&self, skills: &[Skill]) -> Result<(), StoreError> {
        *self.skills.write().await = skills.to_vec();
        Ok(())
    }
}
