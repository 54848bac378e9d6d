//! Modifiers over an elemental matchup tier.

use game_rules::{Element, Tier, IMMUNE, NORMAL, NOT_VERY_EFFECTIVE, SUPER_EFFECTIVE};
use serde::{Deserialize, Serialize};

use super::{Modifier, PriorityChain, Scope};
use crate::entities::Item;
use crate::error::Result;
use crate::relay;

/// One attacking element against one defending element, and the running tier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectivenessContext {
    pub attacker: Element,
    pub defender: Element,
    pub tier: Tier,
}

impl EffectivenessContext {
    pub fn new(attacker: Element, defender: Element, tier: Tier) -> Self {
        Self {
            attacker,
            defender,
            tier,
        }
    }

    fn with_tier(self, tier: Tier) -> Self {
        Self { tier, ..self }
    }
}

/// Which side of the matchup an element check looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchSide {
    Attacker,
    Defender,
}

impl MatchSide {
    fn pick<'c>(&self, ctx: &'c EffectivenessContext) -> &'c Element {
        match self {
            MatchSide::Attacker => &ctx.attacker,
            MatchSide::Defender => &ctx.defender,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EffectivenessModifier {
    /// Fold in the added element's own matchup against the defender.
    /// An immune sub-matchup makes the whole result immune; otherwise its
    /// offset from normal is added and the sum clamped to `[NVE, S_E]`.
    TypeAdd { element: Element },
    /// Treat every hit on `defender` as normal.
    RemoveMatchup { defender: Element },
    /// Super effective becomes normal. Resistances are left alone.
    RemoveWeakness,
    NoImmunity,
    /// Immunity is ignored for attacks of either element.
    Scrappy { elements: [Element; 2] },
    /// Immunity is ignored for attacks of one element.
    Vulnerable { attacker: Element },
    /// Immunity for exactly this pair drops to not very effective.
    LessImmunity { attacker: Element, defender: Element },
    NoResistance,
    TypeSuper { element: Element, side: MatchSide },
    TypeImmune { element: Element, side: MatchSide },
    Normalize,
    /// Immune and resisted become super effective; super effective becomes
    /// resisted. Normal is a fixed point.
    Invert,
    /// Apply `inner` only when the owner's species is listed.
    FamilyOnly {
        species: Vec<String>,
        inner: Box<EffectivenessModifier>,
    },
    /// Run the owner's held item chain in place, if the item may share.
    ShareEquipment,
}

impl EffectivenessModifier {
    pub fn type_add(element: impl Into<Element>) -> Self {
        Self::TypeAdd {
            element: element.into(),
        }
    }

    pub fn type_super(element: impl Into<Element>, side: MatchSide) -> Self {
        Self::TypeSuper {
            element: element.into(),
            side,
        }
    }

    pub fn type_immune(element: impl Into<Element>, side: MatchSide) -> Self {
        Self::TypeImmune {
            element: element.into(),
            side,
        }
    }

    pub fn scrappy(first: impl Into<Element>, second: impl Into<Element>) -> Self {
        Self::Scrappy {
            elements: [first.into(), second.into()],
        }
    }

    pub fn family_only<S: Into<String>>(
        species: impl IntoIterator<Item = S>,
        inner: EffectivenessModifier,
    ) -> Self {
        Self::FamilyOnly {
            species: species.into_iter().map(Into::into).collect(),
            inner: Box::new(inner),
        }
    }
}

impl Modifier for EffectivenessModifier {
    type Context = EffectivenessContext;

    fn name(&self) -> &'static str {
        match self {
            Self::TypeAdd { .. } => "type_add",
            Self::RemoveMatchup { .. } => "remove_matchup",
            Self::RemoveWeakness => "remove_weakness",
            Self::NoImmunity => "no_immunity",
            Self::Scrappy { .. } => "scrappy",
            Self::Vulnerable { .. } => "vulnerable",
            Self::LessImmunity { .. } => "less_immunity",
            Self::NoResistance => "no_resistance",
            Self::TypeSuper { .. } => "type_super",
            Self::TypeImmune { .. } => "type_immune",
            Self::Normalize => "normalize",
            Self::Invert => "invert",
            Self::FamilyOnly { .. } => "family_only",
            Self::ShareEquipment => "share_equipment",
        }
    }

    fn apply(&self, ctx: EffectivenessContext, scope: &Scope<'_>) -> Result<EffectivenessContext> {
        let tier = ctx.tier;
        let next = match self {
            Self::TypeAdd { element } => {
                let sub = scope.chart.lookup(element, &ctx.defender)?;
                if sub == IMMUNE {
                    IMMUNE
                } else {
                    (tier + sub - NORMAL).clamp(NOT_VERY_EFFECTIVE, SUPER_EFFECTIVE)
                }
            }
            Self::RemoveMatchup { defender } if ctx.defender == *defender => NORMAL,
            Self::RemoveWeakness if tier > NORMAL => NORMAL,
            Self::NoImmunity if tier == IMMUNE => NORMAL,
            Self::Scrappy { elements } if tier == IMMUNE && elements.contains(&ctx.attacker) => {
                NORMAL
            }
            Self::Vulnerable { attacker } if tier == IMMUNE && ctx.attacker == *attacker => NORMAL,
            Self::LessImmunity { attacker, defender }
                if tier == IMMUNE && ctx.attacker == *attacker && ctx.defender == *defender =>
            {
                NOT_VERY_EFFECTIVE
            }
            Self::NoResistance if tier == NOT_VERY_EFFECTIVE => NORMAL,
            Self::TypeSuper { element, side } if side.pick(&ctx) == element => SUPER_EFFECTIVE,
            Self::TypeImmune { element, side } if side.pick(&ctx) == element => IMMUNE,
            Self::Normalize => NORMAL,
            Self::Invert => match tier {
                t if t < NORMAL => SUPER_EFFECTIVE,
                t if t > NORMAL => NOT_VERY_EFFECTIVE,
                t => t,
            },
            Self::FamilyOnly { species, inner } if scope.owner_in(species) => {
                return inner.apply(ctx, scope);
            }
            Self::ShareEquipment => return relay::share_equipment::<Self>(ctx, scope),
            _ => tier,
        };
        Ok(ctx.with_tier(next))
    }

    fn equipment_chain(item: &Item) -> &PriorityChain<Self> {
        &item.effectiveness_chain
    }
}
