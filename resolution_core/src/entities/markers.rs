//! Status effects, skills, tiles and terrain.
//!
//! These are thin carriers: a name or position, optional chains, and a
//! [`StateSet`] for anything else. They have no lifetime of their own beyond
//! the entity that holds them.

use game_rules::{Element, GridPos};
use serde::{Deserialize, Serialize};

use crate::modifier::{EffectivenessModifier, HpModifier, PriorityChain, Source};
use crate::state::{Countdown, GrantedModifiers, MarkedLocations, StateSet, StoredElement};

/// A status condition on a character.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusEffect {
    pub name: String,
    #[serde(default)]
    pub effectiveness_chain: PriorityChain<EffectivenessModifier>,
    #[serde(default)]
    pub hp_chain: PriorityChain<HpModifier>,
    #[serde(skip)]
    pub states: StateSet,
}

impl StatusEffect {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            effectiveness_chain: PriorityChain::new(),
            hp_chain: PriorityChain::new(),
            states: StateSet::new(),
        }
    }

    pub fn with_effectiveness(mut self, chain: PriorityChain<EffectivenessModifier>) -> Self {
        self.effectiveness_chain = chain;
        self
    }

    pub fn with_hp(mut self, chain: PriorityChain<HpModifier>) -> Self {
        self.hp_chain = chain;
        self
    }

    /// Limit the status to `turns` turns.
    pub fn lasting(mut self, turns: u32) -> Self {
        self.states.insert(Countdown::new(turns));
        self
    }

    /// Advance one turn. Returns true once the status has expired.
    /// Statuses without a countdown never expire.
    pub fn tick(&mut self) -> bool {
        self.states
            .get_mut::<Countdown>()
            .is_some_and(|countdown| countdown.tick())
    }
}

/// A move a character uses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    pub element: Element,
    #[serde(skip)]
    pub states: StateSet,
}

impl Skill {
    pub fn new(name: impl Into<String>, element: impl Into<Element>) -> Self {
        Self {
            name: name.into(),
            element: element.into(),
            states: StateSet::new(),
        }
    }

    pub fn with_state<T: crate::state::State>(mut self, state: T) -> Self {
        self.states.insert(state);
        self
    }

    /// The element the skill attacks with. A [`StoredElement`] state wins.
    pub fn attack_element(&self) -> &Element {
        self.states
            .get::<StoredElement>()
            .map(|stored| &stored.element)
            .unwrap_or(&self.element)
    }

    pub fn granted(&self) -> Option<&GrantedModifiers> {
        self.states.get::<GrantedModifiers>()
    }
}

/// Battlefield terrain. Its chains apply to every evaluation on it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Terrain {
    pub name: String,
    #[serde(default)]
    pub effectiveness_chain: PriorityChain<EffectivenessModifier>,
    #[serde(default)]
    pub hp_chain: PriorityChain<HpModifier>,
    #[serde(skip)]
    pub states: StateSet,
}

impl Terrain {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            effectiveness_chain: PriorityChain::new(),
            hp_chain: PriorityChain::new(),
            states: StateSet::new(),
        }
    }

    pub fn with_effectiveness(mut self, chain: PriorityChain<EffectivenessModifier>) -> Self {
        self.effectiveness_chain = chain;
        self
    }

    pub fn with_hp(mut self, chain: PriorityChain<HpModifier>) -> Self {
        self.hp_chain = chain;
        self
    }

    pub fn effectiveness_source(&self) -> Source<'_, EffectivenessModifier> {
        Source::unowned(&self.effectiveness_chain)
    }

    pub fn hp_source(&self) -> Source<'_, HpModifier> {
        Source::unowned(&self.hp_chain)
    }

    /// Whether terrain spread over marked tiles reaches `pos`. Terrain with
    /// no [`MarkedLocations`] covers the whole field.
    pub fn covers(&self, pos: GridPos) -> bool {
        self.states
            .get::<MarkedLocations>()
            .map_or(true, |marked| marked.covers(pos))
    }
}

/// A map cell.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tile {
    pub position: GridPos,
    pub terrain: Option<Terrain>,
    #[serde(skip)]
    pub states: StateSet,
}

impl Tile {
    pub fn new(position: GridPos) -> Self {
        Self {
            position,
            terrain: None,
            states: StateSet::new(),
        }
    }

    pub fn with_terrain(mut self, terrain: Terrain) -> Self {
        self.terrain = Some(terrain);
        self
    }

    /// The terrain in effect on this tile, if it reaches here.
    pub fn active_terrain(&self) -> Option<&Terrain> {
        self.terrain.as_ref().filter(|t| t.covers(self.position))
    }
}
