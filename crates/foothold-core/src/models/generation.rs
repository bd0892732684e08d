//! Outcome types for automatic plan generation.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ExposureTarget;

/// One stage of the fallback search strategy, tried in declaration order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Concurrent multi-category search, nearest places first
    Hierarchical,
    /// Single free-text "nearby" search over a wider area
    Broad,
    /// Search along the street the origin reverse-geocodes to
    Street,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Hierarchical => "hierarchical",
            Tier::Broad => "broad",
            Tier::Street => "street",
        }
    }
}

impl FromStr for Tier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hierarchical" => Ok(Tier::Hierarchical),
            "broad" => Ok(Tier::Broad),
            "street" => Ok(Tier::Street),
            _ => Err(format!("Invalid tier: {s}")),
        }
    }
}

/// How a generation run ended.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum GenerationStatus {
    /// Targets from `tier` replaced the plan's previous targets
    Generated { tier: Tier },
    /// Every tier ran and none found a usable place
    NoCandidates,
    /// The street tier could not resolve a street for the origin
    Inconclusive,
}

impl GenerationStatus {
    pub fn tier(&self) -> Option<Tier> {
        match self {
            GenerationStatus::Generated { tier } => Some(*tier),
            _ => None,
        }
    }
}

/// Result of a generation run.
///
/// When nothing was committed, `targets` is empty and the plan keeps whatever
/// targets it had before.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenerationReport {
    pub plan_id: u64,
    #[serde(flatten)]
    pub status: GenerationStatus,
    pub targets: Vec<ExposureTarget>,
}

impl GenerationReport {
    pub fn is_generated(&self) -> bool {
        matches!(self.status, GenerationStatus::Generated { .. })
    }
}
