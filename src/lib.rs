// SPDX-License-Identifier: MIT
//! skillsim — client-side simulated REST backend for a skills tracker.
//!
//! Outgoing requests whose path falls under the API prefix are answered
//! locally from a persisted skill collection, with real status codes and
//! artificial latency; badges derive on every read; everything else passes
//! through to the configured transport.

pub mod badges;
pub mod config;
pub mod error;
pub mod gateway;
pub mod skills;

pub use config::SimConfig;
pub use error::StoreError;
pub use gateway::{BodyPayload, Gateway, HttpResponse, MockBackend, RequestConfig, Transport};
pub use skills::{FileStore, MemoryStore, Skill, SkillStore};
