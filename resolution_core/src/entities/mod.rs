//! The entity data model the pipeline reads: characters, held items and the
//! status/skill/tile/terrain markers that carry chains and state payloads.

mod character;
mod markers;

pub use character::*;
pub use markers::*;
