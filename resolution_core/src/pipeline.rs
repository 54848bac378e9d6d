//! Pipeline entry points used by the combat layer.
//!
//! Each call assembles the relevant chains, folds a fresh context through
//! them and validates the result. Evaluation is synchronous and all-or-nothing:
//! any error discards the partially resolved context.

use game_rules::{
    combine, ensure_tier, fine_multiplier, multiplier, Element, EngineConfig, Tier, TypeChart,
    NORMAL,
};
use std::fmt;
use tracing::debug;

use crate::entities::{Character, Item, Skill, Terrain};
use crate::error::Result;
use crate::modifier::{
    EffectivenessContext, EffectivenessModifier, HpContext, HpModifier, PassThrough, Scope, Source,
};

/// The resolution engine: a type chart, tunables and the pass-through check
/// that gates equipment sharing.
pub struct Engine {
    chart: TypeChart,
    config: EngineConfig,
    pass_through: Box<PassThrough<'static>>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(TypeChart::default(), EngineConfig::default())
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("elements", &self.chart.elements().len())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Engine {
    /// Items share their chains when [`Item::is_transferable`] holds.
    pub fn new(chart: TypeChart, config: EngineConfig) -> Self {
        Self {
            chart,
            config,
            pass_through: Box::new(Item::is_transferable),
        }
    }

    /// Replace the equipment sharing check.
    pub fn with_pass_through(mut self, pass_through: impl Fn(&Item) -> bool + 'static) -> Self {
        self.pass_through = Box::new(pass_through);
        self
    }

    pub fn chart(&self) -> &TypeChart {
        &self.chart
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn scope<'a>(&'a self, owner: Option<&'a Character>) -> Scope<'a> {
        Scope::new(
            &self.chart,
            owner,
            &*self.pass_through,
            self.config.relay_max_depth,
        )
    }

    /// Resolve one attacking element against one defending element.
    ///
    /// Sources run in the order given; within each, modifiers run by priority.
    pub fn compute_effectiveness(
        &self,
        attack: &Element,
        defend: &Element,
        sources: &[Source<'_, EffectivenessModifier>],
    ) -> Result<Tier> {
        let base = self.chart.lookup(attack, defend)?;
        let ctx = EffectivenessContext::new(attack.clone(), defend.clone(), base);
        let resolved = sources.iter().try_fold(ctx, |ctx, source| {
            source.chain.run(ctx, &self.scope(source.owner))
        })?;
        let tier = ensure_tier(resolved.tier)?;
        debug!(attacker = %attack, defender = %defend, base, tier, "effectiveness resolved");
        Ok(tier)
    }

    /// Sum the per-element tiers for a defender onto the fine scale.
    ///
    /// A `none` slot contributes [`NORMAL`] without running any chain.
    pub fn dual_effectiveness(
        &self,
        attack: &Element,
        defender: &Character,
        sources: &[Source<'_, EffectivenessModifier>],
    ) -> Result<Tier> {
        let mut total = 0;
        for element in defender.defending_elements() {
            let tier = if element.is_none() {
                NORMAL
            } else {
                self.compute_effectiveness(attack, &element, sources)?
            };
            total = combine(total, tier);
        }
        Ok(total)
    }

    /// Fine tier for `attacker` hitting `defender` with `attack`.
    /// The attacker's chains run before the defender's.
    pub fn compute_dual_effectiveness(
        &self,
        attacker: &Character,
        defender: &Character,
        attack: &Element,
    ) -> Result<Tier> {
        let mut sources = attacker.effectiveness_sources();
        sources.extend(defender.effectiveness_sources());
        self.dual_effectiveness(attack, defender, &sources)
    }

    /// Fine tier for a skill, including its granted modifiers and any terrain.
    ///
    /// Order: attacker, skill, defender, terrain.
    pub fn compute_skill_effectiveness(
        &self,
        attacker: &Character,
        defender: &Character,
        skill: &Skill,
        terrain: Option<&Terrain>,
    ) -> Result<Tier> {
        let mut sources = attacker.effectiveness_sources();
        if let Some(granted) = skill.granted() {
            sources.push(Source::new(&granted.effectiveness, Some(attacker)));
        }
        sources.extend(defender.effectiveness_sources());
        sources.extend(terrain.map(Terrain::effectiveness_source));
        self.dual_effectiveness(skill.attack_element(), defender, &sources)
    }

    /// Run HP-delta chains in order over `base`.
    pub fn compute_hp_change(&self, base: i32, sources: &[Source<'_, HpModifier>]) -> Result<i32> {
        let resolved = sources
            .iter()
            .try_fold(HpContext::new(base), |ctx, source| {
                source.chain.run(ctx, &self.scope(source.owner))
            })?;
        debug!(base, amount = resolved.amount, "hp change resolved");
        Ok(resolved.amount)
    }

    /// HP change landing on `target`, through its own chains then terrain.
    pub fn compute_hp_change_for(
        &self,
        base: i32,
        target: &Character,
        terrain: Option<&Terrain>,
    ) -> Result<i32> {
        let mut sources = target.hp_sources();
        sources.extend(terrain.map(Terrain::hp_source));
        self.compute_hp_change(base, &sources)
    }

    /// HP change landing on a skill's `user`, such as draining or recoil.
    ///
    /// Order: user, skill, terrain.
    pub fn compute_skill_hp_change(
        &self,
        base: i32,
        user: &Character,
        skill: &Skill,
        terrain: Option<&Terrain>,
    ) -> Result<i32> {
        let mut sources = user.hp_sources();
        if let Some(granted) = skill.granted() {
            sources.push(Source::new(&granted.hp, Some(user)));
        }
        sources.extend(terrain.map(Terrain::hp_source));
        self.compute_hp_change(base, &sources)
    }

    pub fn effectiveness_multiplier(&self, tier: Tier) -> Result<f32> {
        Ok(multiplier(tier)?)
    }

    pub fn fine_multiplier(&self, fine_tier: Tier) -> Result<f32> {
        Ok(fine_multiplier(fine_tier)?)
    }

    pub fn crit_chance(&self, stage: i32) -> f32 {
        self.config.crit_chance.evaluate(stage)
    }

    /// Hit multiplier for the net of accuracy and evasion stages.
    pub fn accuracy_multiplier(&self, accuracy: i32, evasion: i32) -> f32 {
        self.config.accuracy.evaluate(accuracy.saturating_sub(evasion))
    }

    pub fn scale_attack(&self, stat: i32, level: i32) -> Result<i32> {
        Ok(self.config.attack_scaling.scale(stat, level)?)
    }

    pub fn scale_defense(&self, stat: i32, level: i32) -> Result<i32> {
        Ok(self.config.defense_scaling.scale(stat, level)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::StatusEffect;
    use crate::error::ResolveError;
    use crate::modifier::{MatchSide, PriorityChain};
    use crate::state::{GrantedModifiers, StoredElement};
    use game_rules::{
        effectiveness_to_phrase, fine, Phrase, RulesError, IMMUNE, NOT_VERY_EFFECTIVE,
        SUPER_EFFECTIVE,
    };

    fn e(key: &str) -> Element {
        Element::new(key)
    }

    fn water_charm() -> Item {
        Item::new("Water Charm").with_effectiveness(
            PriorityChain::new().with(
                0,
                EffectivenessModifier::type_super("water", MatchSide::Attacker),
            ),
        )
    }

    fn sharer(item: Item) -> Character {
        Character::new("Sharer")
            .with_elements(["normal"])
            .with_item(item)
            .with_effectiveness(PriorityChain::new().with(0, EffectivenessModifier::ShareEquipment))
    }

    #[test]
    fn test_no_modifiers_matches_chart() {
        let engine = Engine::default();
        for attack in engine.chart().elements() {
            for defend in engine.chart().elements() {
                let tier = engine.compute_effectiveness(attack, defend, &[]).unwrap();
                assert_eq!(tier, engine.chart().lookup(attack, defend).unwrap());
                assert!([IMMUNE, NOT_VERY_EFFECTIVE, NORMAL, SUPER_EFFECTIVE].contains(&tier));
            }
        }
    }

    #[test]
    fn test_fire_vs_grass_is_super_effective() {
        let engine = Engine::default();
        assert_eq!(
            engine.compute_effectiveness(&e("fire"), &e("grass"), &[]).unwrap(),
            SUPER_EFFECTIVE
        );

        let attacker = Character::new("Charmander").with_elements(["fire"]);
        let defender = Character::new("Oddish").with_elements(["grass"]);
        let fine_tier = engine
            .compute_dual_effectiveness(&attacker, &defender, &e("fire"))
            .unwrap();
        assert_eq!(fine_tier, fine::SUPER_EFFECTIVE);
        assert_eq!(effectiveness_to_phrase(fine_tier), Some(Phrase::SuperEffective));
        assert_eq!(engine.fine_multiplier(fine_tier).unwrap(), 2.0);
    }

    #[test]
    fn test_no_immunity_lifts_normal_vs_ghost() {
        let engine = Engine::default();
        assert_eq!(
            engine.compute_effectiveness(&e("normal"), &e("ghost"), &[]).unwrap(),
            IMMUNE
        );

        let chain = PriorityChain::new().with(0, EffectivenessModifier::NoImmunity);
        let tier = engine
            .compute_effectiveness(&e("normal"), &e("ghost"), &[Source::unowned(&chain)])
            .unwrap();
        assert_eq!(tier, NORMAL);
    }

    #[test]
    fn test_dual_typed_defenders() {
        let engine = Engine::default();
        let attacker = Character::new("Attacker");
        let rhyhorn = Character::new("Rhyhorn").with_elements(["ground", "rock"]);
        let gyarados = Character::new("Gyarados").with_elements(["water", "flying"]);
        let gengar = Character::new("Gengar").with_elements(["ghost", "poison"]);
        let swampert = Character::new("Swampert").with_elements(["water", "ground"]);

        let water_vs_rhyhorn = engine
            .compute_dual_effectiveness(&attacker, &rhyhorn, &e("water"))
            .unwrap();
        assert_eq!(water_vs_rhyhorn, fine::SUPER_EFFECTIVE_SEVERE);
        assert_eq!(engine.fine_multiplier(water_vs_rhyhorn).unwrap(), 4.0);

        let fire_vs_gyarados = engine
            .compute_dual_effectiveness(&attacker, &gyarados, &e("fire"))
            .unwrap();
        assert_eq!(fire_vs_gyarados, fine::NOT_VERY_EFFECTIVE);

        let normal_vs_gengar = engine
            .compute_dual_effectiveness(&attacker, &gengar, &e("normal"))
            .unwrap();
        assert_eq!(effectiveness_to_phrase(normal_vs_gengar), Some(Phrase::Immune));

        let electric_vs_swampert = engine
            .compute_dual_effectiveness(&attacker, &swampert, &e("electric"))
            .unwrap();
        assert!(electric_vs_swampert <= fine::IMMUNE);
        assert_eq!(engine.fine_multiplier(electric_vs_swampert).unwrap(), 0.0);

        let fire_vs_swampert = engine
            .compute_dual_effectiveness(&attacker, &swampert, &e("fire"))
            .unwrap();
        assert_eq!(fire_vs_swampert, fine::NOT_VERY_EFFECTIVE);
        let grass_vs_rhyhorn = engine
            .compute_dual_effectiveness(&attacker, &rhyhorn, &e("grass"))
            .unwrap();
        assert_eq!(grass_vs_rhyhorn, fine::SUPER_EFFECTIVE_SEVERE);
        let charizard = Character::new("Charizard").with_elements(["fire", "flying"]);
        let grass_vs_charizard = engine
            .compute_dual_effectiveness(&attacker, &charizard, &e("grass"))
            .unwrap();
        assert_eq!(grass_vs_charizard, fine::NOT_VERY_EFFECTIVE_SEVERE);
        assert_eq!(engine.fine_multiplier(grass_vs_charizard).unwrap(), 0.25);
    }

    #[test]
    fn test_heal_mult_scenario() {
        let engine = Engine::default();
        let chain = PriorityChain::new().with(0, HpModifier::heal_mult(3, 2));
        let sources = [Source::unowned(&chain)];
        assert_eq!(engine.compute_hp_change(10, &sources).unwrap(), 15);
        assert_eq!(engine.compute_hp_change(-10, &sources).unwrap(), -10);
    }

    #[test]
    fn test_hp_chains_run_in_sequence() {
        let engine = Engine::default();
        let target = Character::new("Target")
            .with_hp(PriorityChain::new().with(0, HpModifier::heal_mult(2, 1)))
            .with_status(
                StatusEffect::new("Heal Block")
                    .with_hp(PriorityChain::new().with(0, HpModifier::BlockHealing)),
            );
        assert_eq!(engine.compute_hp_change_for(10, &target, None).unwrap(), 0);

        let swamp = Terrain::new("Swamp")
            .with_hp(PriorityChain::new().with(0, HpModifier::damage_mult(3, 2)));
        let plain = Character::new("Plain");
        assert_eq!(engine.compute_hp_change_for(-10, &plain, Some(&swamp)).unwrap(), -15);
    }

    #[test]
    fn test_equipment_relay_forces_super_effective() {
        let engine = Engine::default().with_pass_through(|_| true);
        let holder = sharer(water_charm());
        for defend in engine.chart().elements() {
            let tier = engine
                .compute_effectiveness(&e("water"), defend, &holder.effectiveness_sources())
                .unwrap();
            assert_eq!(tier, SUPER_EFFECTIVE);
        }
    }

    #[test]
    fn test_equipment_relay_blocked_by_predicate() {
        let engine = Engine::default().with_pass_through(|_| false);
        let holder = sharer(water_charm());
        for defend in engine.chart().elements() {
            let tier = engine
                .compute_effectiveness(&e("water"), defend, &holder.effectiveness_sources())
                .unwrap();
            assert_eq!(tier, engine.chart().lookup(&e("water"), defend).unwrap());
        }
    }

    #[test]
    fn test_default_predicate_uses_transferable_flag() {
        let engine = Engine::default();
        let holder = sharer(water_charm().non_transferable());
        let tier = engine
            .compute_effectiveness(&e("water"), &e("grass"), &holder.effectiveness_sources())
            .unwrap();
        assert_eq!(tier, NOT_VERY_EFFECTIVE);
    }

    #[test]
    fn test_relay_cycle_aborts_evaluation() {
        let config = EngineConfig::from_toml_str("relay_max_depth = 3").unwrap();
        let engine = Engine::new(TypeChart::default(), config);
        let mirror = Item::new("Mirror").with_effectiveness(
            PriorityChain::new().with(0, EffectivenessModifier::ShareEquipment),
        );
        let holder = sharer(mirror);

        let err = engine
            .compute_effectiveness(&e("water"), &e("grass"), &holder.effectiveness_sources())
            .unwrap_err();
        assert!(matches!(err, ResolveError::RelayCycle { max_depth: 3, .. }));
    }

    #[test]
    fn test_unknown_element_surfaces() {
        let engine = Engine::default();
        let err = engine
            .compute_effectiveness(&e("plasma"), &e("fire"), &[])
            .unwrap_err();
        assert!(matches!(err, ResolveError::Rules(RulesError::UnknownElement(_))));

        let chain = PriorityChain::new().with(0, EffectivenessModifier::type_add("plasma"));
        let err = engine
            .compute_effectiveness(&e("fire"), &e("grass"), &[Source::unowned(&chain)])
            .unwrap_err();
        assert!(matches!(err, ResolveError::Rules(RulesError::UnknownElement(_))));
    }

    #[test]
    fn test_attacker_then_defender_order() {
        let engine = Engine::default();
        let attacker = Character::new("Inverter")
            .with_effectiveness(PriorityChain::new().with(0, EffectivenessModifier::Invert));
        let defender = Character::new("Steady")
            .with_elements(["grass"])
            .with_effectiveness(
                PriorityChain::new().with(0, EffectivenessModifier::RemoveWeakness),
            );

        // fire vs grass: invert gives NVE, then remove-weakness leaves it
        let fine_tier = engine
            .compute_dual_effectiveness(&attacker, &defender, &e("fire"))
            .unwrap();
        assert_eq!(fine_tier, fine::NOT_VERY_EFFECTIVE);

        // reversed order: remove-weakness first gives NRM, invert keeps NRM
        let mut sources = defender.effectiveness_sources();
        sources.extend(attacker.effectiveness_sources());
        assert_eq!(
            engine.compute_effectiveness(&e("fire"), &e("grass"), &sources).unwrap(),
            NORMAL
        );
    }

    #[test]
    fn test_skill_effectiveness() {
        let engine = Engine::default();
        let attacker = Character::new("Caster").with_species("eevee");
        let defender = Character::new("Target").with_elements(["ghost"]);
        let granted = GrantedModifiers {
            effectiveness: PriorityChain::new().with(
                0,
                EffectivenessModifier::family_only(["eevee"], EffectivenessModifier::NoImmunity),
            ),
            hp: PriorityChain::new(),
        };
        let skill = Skill::new("Foresight Strike", "normal").with_state(granted);
        assert_eq!(
            engine
                .compute_skill_effectiveness(&attacker, &defender, &skill, None)
                .unwrap(),
            fine::NORMAL
        );

        let stranger = Character::new("Stranger").with_species("pichu");
        assert!(
            engine
                .compute_skill_effectiveness(&stranger, &defender, &skill, None)
                .unwrap()
                <= fine::IMMUNE
        );

        let converted = Skill::new("Weather Ball", "normal").with_state(StoredElement::new("fire"));
        let fog = Terrain::new("Fog").with_effectiveness(PriorityChain::new().with(
            0,
            EffectivenessModifier::type_immune("fire", MatchSide::Attacker),
        ));
        let grass = Character::new("Leaf").with_elements(["grass"]);
        assert_eq!(
            engine
                .compute_skill_effectiveness(&attacker, &grass, &converted, None)
                .unwrap(),
            fine::SUPER_EFFECTIVE
        );
        assert!(
            engine
                .compute_skill_effectiveness(&attacker, &grass, &converted, Some(&fog))
                .unwrap()
                <= fine::IMMUNE
        );
    }

    #[test]
    fn test_skill_hp_change() {
        let engine = Engine::default();
        let granted = GrantedModifiers {
            effectiveness: PriorityChain::new(),
            hp: PriorityChain::new()
                .with(0, HpModifier::family_only(["oddish"], HpModifier::heal_mult(3, 2))),
        };
        let drain = Skill::new("Giga Drain", "grass").with_state(granted);
        let oddish = Character::new("Oddish").with_species("oddish");
        assert_eq!(engine.compute_skill_hp_change(20, &oddish, &drain, None).unwrap(), 30);

        let stranger = Character::new("Stranger").with_species("pichu");
        assert_eq!(engine.compute_skill_hp_change(20, &stranger, &drain, None).unwrap(), 20);

        // the user's heal block runs before the skill can boost anything
        let blocked = Character::new("Blocked").with_species("oddish").with_status(
            StatusEffect::new("Heal Block")
                .with_hp(PriorityChain::new().with(0, HpModifier::BlockHealing)),
        );
        assert_eq!(engine.compute_skill_hp_change(20, &blocked, &drain, None).unwrap(), 0);

        let thorns = Terrain::new("Thorns")
            .with_hp(PriorityChain::new().with(0, HpModifier::ReverseHealing));
        assert_eq!(
            engine
                .compute_skill_hp_change(20, &oddish, &drain, Some(&thorns))
                .unwrap(),
            -30
        );

        let plain = Skill::new("Tackle", "normal");
        assert_eq!(engine.compute_skill_hp_change(-8, &oddish, &plain, None).unwrap(), -8);
    }

    #[test]
    fn test_cloned_chain_is_independent() {
        let original = PriorityChain::new()
            .with(0, EffectivenessModifier::type_super("water", MatchSide::Attacker));
        let mut copy = original.clone();
        for modifier in copy.modifiers_mut() {
            if let EffectivenessModifier::TypeSuper { element, .. } = modifier {
                *element = e("fire");
            }
        }

        let engine = Engine::default();
        let original_tier = engine
            .compute_effectiveness(&e("water"), &e("grass"), &[Source::unowned(&original)])
            .unwrap();
        let copy_tier = engine
            .compute_effectiveness(&e("water"), &e("grass"), &[Source::unowned(&copy)])
            .unwrap();
        assert_eq!(original_tier, SUPER_EFFECTIVE);
        assert_eq!(copy_tier, NOT_VERY_EFFECTIVE);
    }

    #[test]
    fn test_stat_helpers() {
        let engine = Engine::default();
        assert_eq!(engine.crit_chance(10), 1.0);
        assert_eq!(engine.accuracy_multiplier(2, 2), 1.0);
        assert_eq!(engine.accuracy_multiplier(6, -6), 3.0);
        assert_eq!(engine.scale_attack(50, 2).unwrap(), 100);
        assert_eq!(engine.scale_defense(50, -2).unwrap(), 25);
        assert_eq!(engine.effectiveness_multiplier(NOT_VERY_EFFECTIVE).unwrap(), 0.5);
        assert!(matches!(
            engine.effectiveness_multiplier(9),
            Err(ResolveError::Rules(RulesError::TierOutOfRange { .. }))
        ));
    }

    #[test]
    fn test_divide_by_zero_scaling() {
        let config = EngineConfig::from_toml_str(
            r#"
            [attack_scaling]
            base = -1
            "#,
        )
        .unwrap();
        let engine = Engine::new(TypeChart::default(), config);
        assert!(matches!(
            engine.scale_attack(10, -1),
            Err(ResolveError::Rules(RulesError::DivideByZero { .. }))
        ));
    }
}
