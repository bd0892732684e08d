//! Tunable parameters for plan generation and progress analysis.
//!
//! [`GenerationSettings::default`] reproduces the stock behavior: eight
//! everyday categories searched within 5 km and kept between 50 m and 1 km,
//! then a broad "nearby" search and finally a street search, each kept
//! between 50 m and 2 km.

use std::{path::Path, time::Duration};

use serde::{Deserialize, Serialize};

use crate::{
    error::{FootholdError, Result},
    geo::DistanceBand,
    models::Tier,
};

/// Default categories searched concurrently by the hierarchical tier.
pub const DEFAULT_CATEGORIES: [&str; 8] = [
    "shop",
    "convenience store",
    "cafe",
    "restaurant",
    "pharmacy",
    "post office",
    "park",
    "library",
];

/// Name given to a plan that is still unnamed after generation.
pub const DEFAULT_PLAN_NAME: &str = "My Exposure Plan";

/// A trace point at most this far from a target counts as reaching it.
pub const DEFAULT_REACHED_RADIUS_M: f64 = 30.0;

/// Linear wait-time progression: `base + increment * index` seconds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct WaitSchedule {
    pub base_seconds: u32,
    pub increment_seconds: u32,
}

impl WaitSchedule {
    pub const fn new(base_seconds: u32, increment_seconds: u32) -> Self {
        Self {
            base_seconds,
            increment_seconds,
        }
    }

    /// Wait time for the target at `index` (0-based).
    pub fn wait_for(&self, index: usize) -> u32 {
        let step = u32::try_from(index).unwrap_or(u32::MAX);
        self.base_seconds
            .saturating_add(self.increment_seconds.saturating_mul(step))
    }
}

/// Search and selection parameters for one tier.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TierSettings {
    /// Radius of the region handed to the place search, in meters
    pub search_radius_m: f64,
    /// Distances from the origin a candidate must fall within
    pub band: DistanceBand,
    /// Upper bound on targets committed by this tier
    pub max_targets: usize,
    pub wait: WaitSchedule,
}

/// All generation and analysis tunables.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GenerationSettings {
    pub categories: Vec<String>,
    /// Free-text query used by the broad tier
    pub broad_query: String,
    pub hierarchical: TierSettings,
    pub broad: TierSettings,
    pub street: TierSettings,
    pub default_plan_name: String,
    /// How long to wait for a device position before giving up
    pub location_timeout_ms: u64,
    pub reached_radius_m: f64,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
            broad_query: "nearby".to_string(),
            hierarchical: TierSettings {
                search_radius_m: 5_000.0,
                band: DistanceBand::new(50.0, 1_000.0),
                max_targets: 8,
                wait: WaitSchedule::new(30, 15),
            },
            broad: TierSettings {
                search_radius_m: 2_000.0,
                band: DistanceBand::new(50.0, 2_000.0),
                max_targets: 5,
                wait: WaitSchedule::new(60, 30),
            },
            street: TierSettings {
                search_radius_m: 1_000.0,
                band: DistanceBand::new(50.0, 2_000.0),
                max_targets: 5,
                wait: WaitSchedule::new(60, 30),
            },
            default_plan_name: DEFAULT_PLAN_NAME.to_string(),
            location_timeout_ms: 2_000,
            reached_radius_m: DEFAULT_REACHED_RADIUS_M,
        }
    }
}

impl GenerationSettings {
    /// Reads settings from a JSON file. Missing fields keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| FootholdError::FileSystem {
            path: path.to_path_buf(),
            source: e,
        })?;
        let settings: Self = serde_json::from_str(&raw)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn tier(&self, tier: Tier) -> &TierSettings {
        match tier {
            Tier::Hierarchical => &self.hierarchical,
            Tier::Broad => &self.broad,
            Tier::Street => &self.street,
        }
    }

    pub fn location_timeout(&self) -> Duration {
        Duration::from_millis(self.location_timeout_ms)
    }

    /// Rejects settings no generation run could use.
    pub fn validate(&self) -> Result<()> {
        if self.categories.iter().all(|c| c.trim().is_empty()) {
            return Err(FootholdError::Configuration {
                message: "at least one search category is required".to_string(),
            });
        }
        if self.broad_query.trim().is_empty() {
            return Err(FootholdError::Configuration {
                message: "broad_query must not be empty".to_string(),
            });
        }
        for tier in [Tier::Hierarchical, Tier::Broad, Tier::Street] {
            let t = self.tier(tier);
            if !(t.band.min_m >= 0.0 && t.band.min_m <= t.band.max_m) {
                return Err(FootholdError::Configuration {
                    message: format!("{} band {} is empty", tier.as_str(), t.band),
                });
            }
            if t.max_targets == 0 || !(t.search_radius_m > 0.0) {
                return Err(FootholdError::Configuration {
                    message: format!(
                        "{} tier needs a positive radius and result cap",
                        tier.as_str()
                    ),
                });
            }
        }
        if !(self.reached_radius_m >= 0.0) {
            return Err(FootholdError::Configuration {
                message: "reached_radius_m must be non-negative".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        GenerationSettings::default().validate().unwrap();
    }

    #[test]
    fn test_hierarchical_schedule() {
        let s = GenerationSettings::default();
        let waits: Vec<u32> = (0..4).map(|i| s.hierarchical.wait.wait_for(i)).collect();
        assert_eq!(waits, vec![30, 45, 60, 75]);
    }

    #[test]
    fn test_fallback_schedule() {
        let s = GenerationSettings::default();
        let waits: Vec<u32> = (0..3).map(|i| s.street.wait.wait_for(i)).collect();
        assert_eq!(waits, vec![60, 90, 120]);
        assert_eq!(s.broad.wait, s.street.wait);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let s: GenerationSettings =
            serde_json::from_str(r#"{ "categories": ["bakery"], "location_timeout_ms": 500 }"#)
                .unwrap();
        assert_eq!(s.categories, vec!["bakery".to_string()]);
        assert_eq!(s.location_timeout(), Duration::from_millis(500));
        assert_eq!(s.hierarchical.max_targets, 8);
    }

    #[test]
    fn test_validate_rejects_inverted_band() {
        let mut s = GenerationSettings::default();
        s.broad.band = DistanceBand::new(500.0, 100.0);
        assert!(matches!(
            s.validate(),
            Err(FootholdError::Configuration { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_empty_categories() {
        let s = GenerationSettings {
            categories: vec![],
            ..Default::default()
        };
        assert!(s.validate().is_err());
    }
}
