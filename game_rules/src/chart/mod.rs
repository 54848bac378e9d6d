//! The type chart: element index plus the square matchup matrix.

mod defaults;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

use crate::element::Element;
use crate::error::{Result, RulesError};
use crate::mechanics::{self, Tier, NORMAL};
use defaults::DEFAULT_MATCHUPS;

/// One authored matchup override.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchupEntry {
    pub attacker: Element,
    pub defender: Element,
    pub tier: Tier,
}

/// On-disk form of a chart.
///
/// An empty `elements` list is re-seeded with the default ordering. An empty
/// `matrix` starts from all-normal plus the built-in matchups for every
/// known element pair. `matchups` are applied last.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartSpec {
    pub elements: Vec<Element>,
    pub matrix: Vec<Vec<Tier>>,
    pub matchups: Vec<MatchupEntry>,
}

/// Base matchups absent any modifiers, `matrix[attacker][defender]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeChart {
    elements: Vec<Element>,
    index: HashMap<Element, usize>,
    matrix: Vec<Vec<Tier>>,
}

impl Default for TypeChart {
    fn default() -> Self {
        let mut chart = Self::with_index(Element::defaults());
        chart.fill_builtin();
        chart
    }
}

impl TypeChart {
    /// The default 19-element chart.
    pub fn new() -> Self {
        Self::default()
    }

    fn with_index(elements: Vec<Element>) -> Self {
        let index = elements
            .iter()
            .enumerate()
            .map(|(i, element)| (element.clone(), i))
            .collect();
        let size = elements.len();
        Self {
            elements,
            index,
            matrix: vec![vec![NORMAL; size]; size],
        }
    }

    /// A chart where every pair is normal.
    pub fn neutral(elements: Vec<Element>) -> Result<Self> {
        let chart = Self::with_index(elements);
        if chart.index.len() != chart.elements.len() {
            return Err(RulesError::MalformedChart(
                "element list contains duplicates".to_owned(),
            ));
        }
        Ok(chart)
    }

    fn fill_builtin(&mut self) {
        for (attacker, row) in DEFAULT_MATCHUPS {
            let Some(&a) = self.index.get(&Element::from(*attacker)) else {
                continue;
            };
            for (defender, tier) in row.iter() {
                if let Some(&d) = self.index.get(&Element::from(*defender)) {
                    self.matrix[a][d] = *tier;
                }
            }
        }
    }

    pub fn from_spec(spec: ChartSpec) -> Result<Self> {
        let elements = if spec.elements.is_empty() {
            debug!("chart has no element list, seeding the default ordering");
            Element::defaults()
        } else {
            spec.elements
        };

        let mut chart = Self::neutral(elements)?;
        if spec.matrix.is_empty() {
            chart.fill_builtin();
        } else {
            let size = chart.elements.len();
            if spec.matrix.len() != size || spec.matrix.iter().any(|row| row.len() != size) {
                return Err(RulesError::MalformedChart(format!(
                    "matrix must be {size}x{size} to match the element list"
                )));
            }
            for tier in spec.matrix.iter().flatten() {
                mechanics::ensure_tier(*tier)?;
            }
            chart.matrix = spec.matrix;
        }

        for entry in &spec.matchups {
            chart.set(&entry.attacker, &entry.defender, entry.tier)?;
        }

        debug!(
            elements = chart.elements.len(),
            overrides = spec.matchups.len(),
            "type chart loaded"
        );
        Ok(chart)
    }

    pub fn from_toml_str(source: &str) -> Result<Self> {
        let spec: ChartSpec = toml::from_str(source)?;
        Self::from_spec(spec)
    }

    /// Load a chart from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Export the full matrix so a saved chart round-trips positionally.
    pub fn to_spec(&self) -> ChartSpec {
        ChartSpec {
            elements: self.elements.clone(),
            matrix: self.matrix.clone(),
            matchups: Vec::new(),
        }
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn contains(&self, element: &Element) -> bool {
        self.index.contains_key(element)
    }

    pub fn index_of(&self, element: &Element) -> Result<usize> {
        self.index
            .get(element)
            .copied()
            .ok_or_else(|| RulesError::UnknownElement(element.clone()))
    }

    /// Base matchup of `attacker` against `defender`.
    pub fn lookup(&self, attacker: &Element, defender: &Element) -> Result<Tier> {
        let a = self.index_of(attacker)?;
        let d = self.index_of(defender)?;
        Ok(self.matrix[a][d])
    }

    pub fn set(&mut self, attacker: &Element, defender: &Element, tier: Tier) -> Result<()> {
        mechanics::ensure_tier(tier)?;
        let a = self.index_of(attacker)?;
        let d = self.index_of(defender)?;
        self.matrix[a][d] = tier;
        Ok(())
    }

    pub fn multiplier(&self, tier: Tier) -> Result<f32> {
        mechanics::multiplier(tier)
    }
}
