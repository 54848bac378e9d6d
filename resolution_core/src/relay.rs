//! Equipment sharing: running a held item's chain inside the holder's chain.
//!
//! The relay re-enters chain evaluation with an explicit trail of visited
//! items. Revisiting an item, or nesting past the configured depth, fails
//! with [`ResolveError::RelayCycle`] instead of recursing forever.

use game_rules::EntityId;
use tracing::{debug, warn};

use crate::error::{ResolveError, Result};
use crate::modifier::{Modifier, Scope};

impl<'a> Scope<'a> {
    /// Scope for evaluating `item`'s chain one level deeper.
    pub(crate) fn enter(&self, item: EntityId) -> Result<Scope<'a>> {
        let depth = self.trail.len() + 1;
        if depth > self.max_depth || self.trail.contains(&item) {
            warn!(
                %item,
                depth,
                max_depth = self.max_depth,
                "equipment relay cycle, aborting evaluation"
            );
            return Err(ResolveError::RelayCycle {
                item,
                depth,
                max_depth: self.max_depth,
            });
        }

        let mut trail = self.trail.clone();
        trail.push(item);
        Ok(Scope {
            chart: self.chart,
            owner: self.owner,
            pass_through: self.pass_through,
            trail,
            max_depth: self.max_depth,
        })
    }
}

/// Run the owner's held item chain against `ctx` in place.
///
/// No owner, no held item, or an item the pass-through check rejects all
/// leave `ctx` unchanged.
pub(crate) fn share_equipment<M: Modifier>(
    ctx: M::Context,
    scope: &Scope<'_>,
) -> Result<M::Context> {
    let Some(item) = scope.owner.and_then(|owner| owner.held_item.as_ref()) else {
        return Ok(ctx);
    };
    if !(scope.pass_through)(item) {
        debug!(item = %item.id, name = %item.name, "item may not share its effects");
        return Ok(ctx);
    }

    let nested = scope.enter(item.id)?;
    debug!(item = %item.id, depth = nested.depth(), "sharing equipment chain");
    M::equipment_chain(item).run(ctx, &nested)
}
