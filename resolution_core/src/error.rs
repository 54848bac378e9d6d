//! Evaluation errors for chain resolution.

use game_rules::{EntityId, RulesError};
use thiserror::Error;

/// A chain evaluation either resolves fully or fails with one of these.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error(transparent)]
    Rules(#[from] RulesError),

    /// Equipment sharing re-entered an item already on the relay trail, or
    /// nested deeper than the configured limit.
    #[error("equipment relay through item {item} aborted at depth {depth} (max {max_depth})")]
    RelayCycle {
        item: EntityId,
        depth: usize,
        max_depth: usize,
    },

    #[error("failed to parse modifier chain: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ResolveError>;
