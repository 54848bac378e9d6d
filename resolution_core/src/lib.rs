//! # Resolution Core
//!
//! Elemental matchup and HP-delta resolution over data-driven modifier chains.
//! Reads master data from `game_rules` and exposes the entry points the
//! combat layer calls.
//!
//! ## Core Components
//!
//! - **modifier**: modifier families, their contexts and priority chains
//! - **relay**: equipment sharing, a depth-limited re-entry into an item's chain
//! - **state**: typed, deep-cloning payloads attached to entities
//! - **entities**: characters, items, statuses, skills, tiles and terrain
//! - **pipeline**: the [`Engine`] entry points
//!
//! The library emits `tracing` events but never installs a subscriber.

pub mod entities;
pub mod error;
pub mod modifier;
pub mod pipeline;
mod relay;
pub mod state;

pub use entities::*;
pub use error::{ResolveError, Result};
pub use game_rules::{effectiveness_to_phrase, Phrase};
pub use modifier::*;
pub use pipeline::*;
pub use state::*;
