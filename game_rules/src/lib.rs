//! # Game Rules
//!
//! Master data for the matchup engine: element ids, the type chart, effectiveness
//! tiers and their multipliers, stat curve tables and engine configuration.
//! This crate holds no modifier logic; it is the table layer the resolution
//! pipeline reads from.

pub mod chart;
pub mod config;
pub mod element;
pub mod error;
pub mod ids;
pub mod mechanics;

pub use chart::*;
pub use config::*;
pub use element::*;
pub use error::*;
pub use ids::*;
pub use mechanics::*;
