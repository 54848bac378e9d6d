//! Stat curve tables: stage lookups and level scaling.
//!
//! Inputs are clamped to the table bounds before use. Out-of-range stages
//! saturate rather than fail.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::error::{Result, RulesError};

/// A lookup array indexed by a clamped stage, offset by `min`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StageTableSpec", into = "StageTableSpec")]
pub struct StageTable {
    min: i32,
    max: i32,
    values: Vec<f32>,
}

/// Unvalidated on-disk form of a [`StageTable`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageTableSpec {
    pub min: i32,
    pub max: i32,
    pub values: Vec<f32>,
}

impl StageTable {
    pub fn new(min: i32, max: i32, values: Vec<f32>) -> Result<Self> {
        if min > max {
            return Err(RulesError::MalformedCurve(format!(
                "stage bounds [{min}, {max}] are inverted"
            )));
        }
        if values.is_empty() {
            return Err(RulesError::MalformedCurve(
                "stage table has no values".to_owned(),
            ));
        }
        Ok(Self { min, max, values })
    }

    /// Critical hit chance by stage, 0 through 4.
    pub fn crit_chance() -> Self {
        Self {
            min: 0,
            max: 4,
            values: vec![1.0 / 24.0, 1.0 / 8.0, 1.0 / 2.0, 1.0, 1.0],
        }
    }

    /// Accuracy/evasion multiplier by net stage, -6 through 6.
    pub fn accuracy() -> Self {
        Self {
            min: -6,
            max: 6,
            values: vec![
                3.0 / 9.0,
                3.0 / 8.0,
                3.0 / 7.0,
                3.0 / 6.0,
                3.0 / 5.0,
                3.0 / 4.0,
                1.0,
                4.0 / 3.0,
                5.0 / 3.0,
                2.0,
                7.0 / 3.0,
                8.0 / 3.0,
                3.0,
            ],
        }
    }

    pub fn min(&self) -> i32 {
        self.min
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    pub fn evaluate(&self, stage: i32) -> f32 {
        let stage = stage.max(self.min).min(self.max);
        let offset = i64::from(stage) - i64::from(self.min);
        let index = usize::try_from(offset).unwrap_or(usize::MAX);
        let last = self.values.len() - 1;
        self.values[index.min(last)]
    }
}

impl TryFrom<StageTableSpec> for StageTable {
    type Error = RulesError;

    fn try_from(spec: StageTableSpec) -> Result<Self> {
        Self::new(spec.min, spec.max, spec.values)
    }
}

impl From<StageTable> for StageTableSpec {
    fn from(table: StageTable) -> Self {
        Self {
            min: table.min,
            max: table.max,
            values: table.values,
        }
    }
}

/// Attack/defense scaling by a signed level around a base constant.
///
/// Negative levels give `base / (base - level)`, positive levels give
/// `(base + level) / base`, and level zero is identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelScaling {
    pub base: i32,
    pub min: i32,
    pub max: i32,
}

impl Default for LevelScaling {
    fn default() -> Self {
        Self {
            base: 2,
            min: -6,
            max: 6,
        }
    }
}

impl LevelScaling {
    fn ratio(&self, level: i32) -> Result<(i64, i64)> {
        let level = i64::from(level.max(self.min).min(self.max));
        let base = i64::from(self.base);
        let (numerator, denominator) = match level.cmp(&0) {
            Ordering::Less => (base, base - level),
            Ordering::Greater => (base + level, base),
            Ordering::Equal => return Ok((1, 1)),
        };
        if denominator == 0 {
            return Err(RulesError::DivideByZero {
                what: "scaling a stat by level",
            });
        }
        Ok((numerator, denominator))
    }

    /// Get the multiplier for a level.
    pub fn multiplier(&self, level: i32) -> Result<f32> {
        let (numerator, denominator) = self.ratio(level)?;
        Ok(numerator as f32 / denominator as f32)
    }

    /// Scale an integer stat, truncating toward zero.
    pub fn scale(&self, stat: i32, level: i32) -> Result<i32> {
        let (numerator, denominator) = self.ratio(level)?;
        let scaled = i64::from(stat) * numerator / denominator;
        Ok(scaled.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32)
    }
}
