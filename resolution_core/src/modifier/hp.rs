//! Modifiers over a pending HP change. Positive amounts heal, negative amounts damage or drain.

use game_rules::RulesError;
use serde::{Deserialize, Serialize};

use super::{Modifier, PriorityChain, Scope};
use crate::entities::Item;
use crate::error::Result;
use crate::relay;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HpContext {
    pub amount: i32,
}

impl HpContext {
    pub fn new(amount: i32) -> Self {
        Self { amount }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HpModifier {
    /// Scale healing by `numerator / denominator`. Damage is untouched.
    HealMult { numerator: i32, denominator: i32 },
    /// Scale damage by `numerator / denominator`. Healing is untouched.
    DamageMult { numerator: i32, denominator: i32 },
    BlockHealing,
    /// Healing turns into the same amount of damage.
    ReverseHealing,
    FamilyOnly {
        species: Vec<String>,
        inner: Box<HpModifier>,
    },
    ShareEquipment,
}

impl HpModifier {
    pub fn heal_mult(numerator: i32, denominator: i32) -> Self {
        Self::HealMult {
            numerator,
            denominator,
        }
    }

    pub fn damage_mult(numerator: i32, denominator: i32) -> Self {
        Self::DamageMult {
            numerator,
            denominator,
        }
    }

    pub fn family_only<S: Into<String>>(
        species: impl IntoIterator<Item = S>,
        inner: HpModifier,
    ) -> Self {
        Self::FamilyOnly {
            species: species.into_iter().map(Into::into).collect(),
            inner: Box::new(inner),
        }
    }
}

fn scale(amount: i32, numerator: i32, denominator: i32) -> Result<i32> {
    if denominator == 0 {
        return Err(RulesError::DivideByZero {
            what: "scaling an HP change",
        }
        .into());
    }
    let scaled = i64::from(amount) * i64::from(numerator) / i64::from(denominator);
    Ok(scaled.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32)
}

impl Modifier for HpModifier {
    type Context = HpContext;

    fn name(&self) -> &'static str {
        match self {
            Self::HealMult { .. } => "heal_mult",
            Self::DamageMult { .. } => "damage_mult",
            Self::BlockHealing => "block_healing",
            Self::ReverseHealing => "reverse_healing",
            Self::FamilyOnly { .. } => "family_only",
            Self::ShareEquipment => "share_equipment",
        }
    }

    fn apply(&self, ctx: HpContext, scope: &Scope<'_>) -> Result<HpContext> {
        let amount = ctx.amount;
        let next = match self {
            Self::HealMult {
                numerator,
                denominator,
            } if amount > 0 => scale(amount, *numerator, *denominator)?,
            Self::DamageMult {
                numerator,
                denominator,
            } if amount < 0 => scale(amount, *numerator, *denominator)?,
            Self::BlockHealing if amount > 0 => 0,
            Self::ReverseHealing if amount > 0 => -amount,
            Self::FamilyOnly { species, inner } if scope.owner_in(species) => {
                return inner.apply(ctx, scope);
            }
            Self::ShareEquipment => return relay::share_equipment::<Self>(ctx, scope),
            _ => amount,
        };
        Ok(HpContext::new(next))
    }

    fn equipment_chain(item: &Item) -> &PriorityChain<Self> {
        &item.hp_chain
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ResolveError;
    use game_rules::TypeChart;

    fn apply(modifier: &HpModifier, amount: i32) -> Result<i32> {
        let chart = TypeChart::new();
        let pass = |_: &Item| true;
        let scope = Scope::new(&chart, None, &pass, 4);
        modifier.apply(HpContext::new(amount), &scope).map(|ctx| ctx.amount)
    }

    #[test]
    fn test_heal_mult_only_scales_healing() {
        let heal = HpModifier::heal_mult(3, 2);
        assert_eq!(apply(&heal, 10).unwrap(), 15);
        assert_eq!(apply(&heal, -10).unwrap(), -10);
        assert_eq!(apply(&heal, 0).unwrap(), 0);
        assert_eq!(apply(&heal, 5).unwrap(), 7);
    }

    #[test]
    fn test_damage_mult_only_scales_damage() {
        let damage = HpModifier::damage_mult(1, 2);
        assert_eq!(apply(&damage, -10).unwrap(), -5);
        assert_eq!(apply(&damage, 10).unwrap(), 10);
    }

    #[test]
    fn test_zero_denominator() {
        let broken = HpModifier::heal_mult(1, 0);
        assert!(matches!(
            apply(&broken, 10),
            Err(ResolveError::Rules(RulesError::DivideByZero { .. }))
        ));
        // skipped paths never divide
        assert_eq!(apply(&broken, -10).unwrap(), -10);
    }

    #[test]
    fn test_block_and_reverse_healing() {
        assert_eq!(apply(&HpModifier::BlockHealing, 12).unwrap(), 0);
        assert_eq!(apply(&HpModifier::BlockHealing, -12).unwrap(), -12);
        assert_eq!(apply(&HpModifier::ReverseHealing, 12).unwrap(), -12);
        assert_eq!(apply(&HpModifier::ReverseHealing, -12).unwrap(), -12);
    }

    #[test]
    fn test_chain_order_matters() {
        let chart = TypeChart::new();
        let pass = |_: &Item| true;
        let scope = Scope::new(&chart, None, &pass, 4);

        let boost_then_reverse = PriorityChain::new()
            .with(0, HpModifier::heal_mult(2, 1))
            .with(1, HpModifier::ReverseHealing);
        let reverse_then_boost = PriorityChain::new()
            .with(1, HpModifier::heal_mult(2, 1))
            .with(0, HpModifier::ReverseHealing);

        let a = boost_then_reverse.run(HpContext::new(10), &scope).unwrap();
        let b = reverse_then_boost.run(HpContext::new(10), &scope).unwrap();
        assert_eq!(a.amount, -20);
        assert_eq!(b.amount, -10);
    }

    #[test]
    fn test_large_values_saturate() {
        assert_eq!(apply(&HpModifier::heal_mult(4, 1), i32::MAX).unwrap(), i32::MAX);
    }
}
