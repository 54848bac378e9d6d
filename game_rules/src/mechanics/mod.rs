//! Game mechanics: effectiveness tiers, multipliers, player-facing phrases and stat curves.

mod curves;

pub use curves::*;

use serde::{Deserialize, Serialize};

use crate::error::{Result, RulesError};

/// Discrete matchup outcome. Coarse tiers live in `[IMMUNE, SUPER_EFFECTIVE]`.
pub type Tier = i32;

/// 0x damage.
pub const IMMUNE: Tier = 0;
/// 0.5x damage.
pub const NOT_VERY_EFFECTIVE: Tier = 3;
/// 1x damage.
pub const NORMAL: Tier = 4;
/// 2x damage.
pub const SUPER_EFFECTIVE: Tier = 5;

/// Get the damage multiplier for a coarse tier.
///
/// Only the four named tiers are valid. Values between [`IMMUNE`] and
/// [`NOT_VERY_EFFECTIVE`] would sum onto the immune zone of the fine scale.
pub fn multiplier(tier: Tier) -> Result<f32> {
    match tier {
        IMMUNE => Ok(0.0),
        NOT_VERY_EFFECTIVE => Ok(0.5),
        NORMAL => Ok(1.0),
        SUPER_EFFECTIVE => Ok(2.0),
        _ => Err(RulesError::TierOutOfRange {
            tier,
            min: IMMUNE,
            max: SUPER_EFFECTIVE,
        }),
    }
}

/// Reject anything but the four named coarse tiers.
pub fn ensure_tier(tier: Tier) -> Result<Tier> {
    multiplier(tier).map(|_| tier)
}

/// The fine scale: two coarse tiers summed, one per defending element.
///
/// A single-typed defender fills its second slot with `none`, which always
/// contributes [`NORMAL`], so `8` is neutral on this scale.
pub mod fine {
    use super::Tier;

    /// Any sum at or below this has an immune component, since the lowest
    /// non-immune coarse tier is 3.
    pub const IMMUNE: Tier = 5;
    pub const NOT_VERY_EFFECTIVE_SEVERE: Tier = 6;
    pub const NOT_VERY_EFFECTIVE: Tier = 7;
    pub const NORMAL: Tier = 8;
    pub const SUPER_EFFECTIVE: Tier = 9;
    pub const SUPER_EFFECTIVE_SEVERE: Tier = 10;
}

/// Combine two coarse tiers onto the fine scale.
pub fn combine(first: Tier, second: Tier) -> Tier {
    first + second
}

/// Get the damage multiplier for a fine (dual) tier.
pub fn fine_multiplier(fine_tier: Tier) -> Result<f32> {
    match fine_tier {
        t if !(0..=fine::SUPER_EFFECTIVE_SEVERE).contains(&t) => Err(RulesError::TierOutOfRange {
            tier: t,
            min: 0,
            max: fine::SUPER_EFFECTIVE_SEVERE,
        }),
        t if t <= fine::IMMUNE => Ok(0.0),
        t => Ok(2f32.powi(t - fine::NORMAL)),
    }
}

/// Player-facing label for a matchup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phrase {
    Immune,
    NotVeryEffectiveSevere,
    NotVeryEffective,
    SuperEffective,
    SuperEffectiveSevere,
}

impl Phrase {
    pub fn text(&self) -> &'static str {
        match self {
            Phrase::Immune => "It had no effect...",
            Phrase::NotVeryEffectiveSevere => "It was barely effective...",
            Phrase::NotVeryEffective => "It's not very effective...",
            Phrase::SuperEffective => "It's super effective!",
            Phrase::SuperEffectiveSevere => "It's extremely effective!",
        }
    }
}

/// Translate a fine tier into a label. The neutral midpoint has no label.
pub fn effectiveness_to_phrase(fine_tier: Tier) -> Option<Phrase> {
    match fine_tier {
        t if t <= fine::IMMUNE => Some(Phrase::Immune),
        fine::NOT_VERY_EFFECTIVE_SEVERE => Some(Phrase::NotVeryEffectiveSevere),
        fine::NOT_VERY_EFFECTIVE => Some(Phrase::NotVeryEffective),
        fine::NORMAL => None,
        fine::SUPER_EFFECTIVE => Some(Phrase::SuperEffective),
        _ => Some(Phrase::SuperEffectiveSevere),
    }
}
