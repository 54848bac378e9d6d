//! Priority chains: stable ordered multimaps of modifiers.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use tracing::trace;

use super::{Modifier, Priority, Scope};
use crate::error::Result;

/// Modifiers keyed by priority. Lower priorities run first; modifiers that
/// share a priority run in insertion order.
///
/// Cloning a chain clones every modifier it owns.
#[derive(Debug, Clone, PartialEq)]
pub struct PriorityChain<M> {
    slots: BTreeMap<Priority, Vec<M>>,
}

impl<M> Default for PriorityChain<M> {
    fn default() -> Self {
        Self {
            slots: BTreeMap::new(),
        }
    }
}

impl<M> PriorityChain<M> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, priority: Priority, modifier: M) {
        self.slots.entry(priority).or_default().push(modifier);
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, priority: Priority, modifier: M) -> Self {
        self.insert(priority, modifier);
        self
    }

    /// Modifiers in evaluation order.
    pub fn iter(&self) -> impl Iterator<Item = (Priority, &M)> {
        self.slots
            .iter()
            .flat_map(|(priority, modifiers)| modifiers.iter().map(move |m| (*priority, m)))
    }

    pub fn modifiers_mut(&mut self) -> impl Iterator<Item = &mut M> {
        self.slots.values_mut().flatten()
    }

    /// Drop every modifier at `priority`, returning them.
    pub fn remove_priority(&mut self, priority: Priority) -> Vec<M> {
        self.slots.remove(&priority).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.slots.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.values().all(Vec::is_empty)
    }
}

impl<M: Clone> PriorityChain<M> {
    /// Append copies of another chain's modifiers after this chain's
    /// modifiers of equal priority.
    pub fn merge(&mut self, other: &PriorityChain<M>) {
        for (priority, modifier) in other.iter() {
            self.insert(priority, modifier.clone());
        }
    }
}

impl<M: Modifier> PriorityChain<M> {
    /// Fold `ctx` through every modifier in order.
    pub fn run(&self, ctx: M::Context, scope: &Scope<'_>) -> Result<M::Context> {
        self.iter().try_fold(ctx, |ctx, (priority, modifier)| {
            let next = modifier.apply(ctx, scope)?;
            trace!(
                modifier = modifier.name(),
                priority,
                depth = scope.depth(),
                ctx = ?next,
                "modifier applied"
            );
            Ok(next)
        })
    }
}

impl<M: DeserializeOwned> PriorityChain<M> {
    /// Parse an authored chain: a JSON list of `{ "priority", "modifier" }` entries.
    pub fn from_json_str(source: &str) -> Result<Self> {
        Ok(serde_json::from_str(source)?)
    }
}

impl<M: Serialize> PriorityChain<M> {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl<M> FromIterator<(Priority, M)> for PriorityChain<M> {
    fn from_iter<I: IntoIterator<Item = (Priority, M)>>(iter: I) -> Self {
        let mut chain = Self::new();
        for (priority, modifier) in iter {
            chain.insert(priority, modifier);
        }
        chain
    }
}

#[derive(Serialize)]
struct EntryRef<'a, M> {
    priority: Priority,
    modifier: &'a M,
}

#[derive(Deserialize)]
struct Entry<M> {
    priority: Priority,
    modifier: M,
}

impl<M: Serialize> Serialize for PriorityChain<M> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(
            self.iter()
                .map(|(priority, modifier)| EntryRef { priority, modifier }),
        )
    }
}

impl<'de, M: Deserialize<'de>> Deserialize<'de> for PriorityChain<M> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let entries = Vec::<Entry<M>>::deserialize(deserializer)?;
        Ok(entries
            .into_iter()
            .map(|entry| (entry.priority, entry.modifier))
            .collect())
    }
}
