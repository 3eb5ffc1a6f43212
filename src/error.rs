// SPDX-License-Identifier: MIT
//! Typed errors for the storage seam.

use thiserror::Error;

/// Failure writing the persisted skill slot.
///
/// Reads never produce this: an unreadable or undecodable slot loads as an
/// empty collection.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to write skill slot: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode skill collection: {0}")]
    Encode(#[from] serde_json::Error),
}
