//! Typed state payloads attached to characters, items, statuses, skills, tiles and terrain.
//!
//! Each owning entity holds one [`StateSet`], a map from payload type to a
//! boxed value. Cloning the set clones every payload, so duplicated entities
//! never share state.

mod kinds;

pub use kinds::*;

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;

/// A payload that can live in a [`StateSet`].
///
/// Implemented for every `Clone + Debug + 'static` type.
pub trait State: Any + fmt::Debug {
    /// Clone this state into a boxed trait object.
    ///
    /// This is required because `Clone` is not object-safe.
    fn clone_box(&self) -> Box<dyn State>;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<T: Any + Clone + fmt::Debug> State for T {
    fn clone_box(&self) -> Box<dyn State> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

/// At most one payload per type.
#[derive(Default)]
pub struct StateSet {
    states: HashMap<TypeId, Box<dyn State>>,
}

impl StateSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a payload, returning the one it replaced.
    pub fn insert<T: State>(&mut self, state: T) -> Option<T> {
        self.states
            .insert(TypeId::of::<T>(), Box::new(state))
            .and_then(downcast)
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with<T: State>(mut self, state: T) -> Self {
        self.insert(state);
        self
    }

    pub fn get<T: State>(&self) -> Option<&T> {
        self.states
            .get(&TypeId::of::<T>())
            .and_then(|state| (**state).as_any().downcast_ref::<T>())
    }

    pub fn get_mut<T: State>(&mut self) -> Option<&mut T> {
        self.states
            .get_mut(&TypeId::of::<T>())
            .and_then(|state| (**state).as_any_mut().downcast_mut::<T>())
    }

    pub fn remove<T: State>(&mut self) -> Option<T> {
        self.states.remove(&TypeId::of::<T>()).and_then(downcast)
    }

    pub fn contains<T: State>(&self) -> bool {
        self.states.contains_key(&TypeId::of::<T>())
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

fn downcast<T: State>(state: Box<dyn State>) -> Option<T> {
    state.into_any().downcast::<T>().ok().map(|boxed| *boxed)
}

impl Clone for StateSet {
    fn clone(&self) -> Self {
        Self {
            states: self
                .states
                .iter()
                .map(|(id, state)| (*id, (**state).clone_box()))
                .collect(),
        }
    }
}

impl fmt::Debug for StateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.states.values()).finish()
    }
}
