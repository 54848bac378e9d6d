//! Errors raised while loading or querying master data.

use thiserror::Error;

use crate::element::Element;
use crate::mechanics::Tier;

/// Failures surfaced by chart lookups, tier tables, stat curves and config loading.
#[derive(Debug, Error)]
pub enum RulesError {
    /// An element id is absent from the chart's element index.
    #[error("unknown element `{0}`")]
    UnknownElement(Element),

    /// A tier is not one of the named tiers in its scale. Always a content bug.
    #[error("effectiveness tier {tier} is not a valid tier in [{min}, {max}]")]
    TierOutOfRange { tier: Tier, min: Tier, max: Tier },

    #[error("division by zero while {what}")]
    DivideByZero { what: &'static str },

    #[error("malformed type chart: {0}")]
    MalformedChart(String),

    #[error("malformed stat curve: {0}")]
    MalformedCurve(String),

    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to read file: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RulesError>;
