//! Modifiers and the scope they evaluate in.
//!
//! A modifier is an immutable value that maps one evaluation context to the
//! next. Chains fold a context through their modifiers in priority order;
//! there is no early exit, so a modifier that wants to suppress later ones
//! writes a value they treat as a no-op.

mod chain;
mod effectiveness;
mod hp;

pub use chain::*;
pub use effectiveness::*;
pub use hp::*;

use game_rules::{EntityId, TypeChart};
use std::fmt;

use crate::entities::{Character, Item};
use crate::error::Result;

/// Chain ordering key. Lower runs first.
pub type Priority = i32;

/// Externally supplied check deciding whether an item's chains may be shared.
pub type PassThrough<'a> = dyn Fn(&Item) -> bool + 'a;

/// A closed family of modifiers over one context type.
pub trait Modifier: Clone + fmt::Debug + Sized {
    type Context: fmt::Debug;

    /// Short name used in logs.
    fn name(&self) -> &'static str;

    fn apply(&self, ctx: Self::Context, scope: &Scope<'_>) -> Result<Self::Context>;

    /// The chain of this family an item carries, for equipment sharing.
    fn equipment_chain(item: &Item) -> &PriorityChain<Self>;
}

/// Read-only inputs shared by every modifier in one evaluation.
pub struct Scope<'a> {
    pub chart: &'a TypeChart,
    /// The character whose chain is running, if any.
    pub owner: Option<&'a Character>,
    pub pass_through: &'a PassThrough<'a>,
    /// Items already entered through equipment sharing, outermost first.
    pub(crate) trail: Vec<EntityId>,
    pub(crate) max_depth: usize,
}

impl<'a> Scope<'a> {
    pub fn new(
        chart: &'a TypeChart,
        owner: Option<&'a Character>,
        pass_through: &'a PassThrough<'a>,
        max_depth: usize,
    ) -> Self {
        Self {
            chart,
            owner,
            pass_through,
            trail: Vec::new(),
            max_depth,
        }
    }

    /// Current equipment sharing depth.
    pub fn depth(&self) -> usize {
        self.trail.len()
    }

    /// Whether the owner's species is one of `species`. No owner never matches.
    pub fn owner_in(&self, species: &[String]) -> bool {
        self.owner
            .is_some_and(|owner| species.iter().any(|s| *s == owner.species))
    }
}

impl fmt::Debug for Scope<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scope")
            .field("owner", &self.owner.map(|owner| owner.id))
            .field("trail", &self.trail)
            .field("max_depth", &self.max_depth)
            .finish()
    }
}

/// A chain to run plus the character it belongs to.
pub struct Source<'a, M> {
    pub chain: &'a PriorityChain<M>,
    pub owner: Option<&'a Character>,
}

impl<'a, M> Source<'a, M> {
    pub fn new(chain: &'a PriorityChain<M>, owner: Option<&'a Character>) -> Self {
        Self { chain, owner }
    }

    /// A chain with no owning character, such as terrain.
    pub fn unowned(chain: &'a PriorityChain<M>) -> Self {
        Self { chain, owner: None }
    }
}

impl<M> Clone for Source<'_, M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M> Copy for Source<'_, M> {}
