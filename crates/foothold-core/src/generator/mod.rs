//! Automatic construction of an exposure plan around an origin.
//!
//! Generation walks three tiers and stops at the first one that yields at
//! least one usable place:
//!
//! 1. [`Tier::Hierarchical`]: every configured category is searched
//!    concurrently, merged, de-duplicated and sorted by distance; up to eight
//!    of the nearest places between 50 m and 1 km are kept.
//! 2. [`Tier::Broad`]: a single "nearby" search; the first five results of the
//!    response (service order) that fall between 50 m and 2 km are kept.
//! 3. [`Tier::Street`]: the origin is reverse-geocoded and its street name is
//!    searched the same way. Without a street the run ends as
//!    [`GenerationStatus::Inconclusive`].
//!
//! The chosen places become a staged batch with wait times growing by a
//! fixed step per position, and the store swaps that batch in for the plan's
//! previous targets in one transaction. Only one run per plan may be active
//! at a time against a store; the claim is taken through
//! [`PlanStore::claim_generation`].

use std::sync::Arc;

use log::{info, warn};

use crate::{
    error::{FootholdError, Result},
    geo::Coordinate,
    models::{GenerationReport, GenerationStatus, Tier},
    places::{
        CandidateAggregator, CandidateLocator, CandidatePlace, LocateRequest, LocationProvider,
        PlaceSearch, ReverseGeocoder,
    },
    settings::GenerationSettings,
    store::PlanStore,
};

pub mod latch;
pub mod tiers;

pub use latch::{FlightGuard, InFlightPlans};

use tiers::{select_within, stage_targets};

/// Which tier produced candidates, or why none did.
#[derive(Debug)]
enum Selection {
    Found {
        tier: Tier,
        candidates: Vec<CandidatePlace>,
    },
    Empty(GenerationStatus),
}

/// Builds exposure plans from nearby places.
#[derive(Clone)]
pub struct PlanGenerator {
    locator: CandidateLocator,
    aggregator: CandidateAggregator,
    geocoder: Arc<dyn ReverseGeocoder>,
    settings: GenerationSettings,
}

impl PlanGenerator {
    /// Creates a generator with default settings.
    pub fn new(search: Arc<dyn PlaceSearch>, geocoder: Arc<dyn ReverseGeocoder>) -> Self {
        let locator = CandidateLocator::new(search);
        Self {
            aggregator: CandidateAggregator::new(locator.clone()),
            locator,
            geocoder,
            settings: GenerationSettings::default(),
        }
    }

    /// Replaces the settings after validating them.
    pub fn with_settings(mut self, settings: GenerationSettings) -> Result<Self> {
        settings.validate()?;
        self.settings = settings;
        Ok(self)
    }

    /// Generates targets for `plan_id` around `origin`.
    ///
    /// Returns [`FootholdError::GenerationInProgress`] if another run for the
    /// same plan against the same store has not finished, and [`FootholdError::PlanNotFound`] for an
    /// unknown plan. Finding nothing is not an error: the report's status
    /// says so and the plan's existing targets are left as they were.
    pub async fn generate(
        &self,
        store: &dyn PlanStore,
        plan_id: u64,
        origin: Coordinate,
    ) -> Result<GenerationReport> {
        let _guard = store.claim_generation(plan_id)?;
        self.run(store, plan_id, origin).await
    }

    /// Like [`PlanGenerator::generate`], taking the origin from `location`.
    ///
    /// The position is awaited for at most the configured timeout; if none
    /// arrives the call fails with [`FootholdError::LocationUnavailable`]
    /// before any search is made.
    pub async fn generate_from_location(
        &self,
        store: &dyn PlanStore,
        plan_id: u64,
        location: &dyn LocationProvider,
    ) -> Result<GenerationReport> {
        let _guard = store.claim_generation(plan_id)?;

        let timeout = self.settings.location_timeout();
        let origin = match tokio::time::timeout(timeout, location.current_position()).await {
            Ok(Some(origin)) => origin,
            Ok(None) => {
                warn!("No position available for plan {plan_id}");
                return Err(FootholdError::LocationUnavailable);
            }
            Err(_) => {
                warn!("Position not available within {timeout:?} for plan {plan_id}");
                return Err(FootholdError::LocationUnavailable);
            }
        };

        self.run(store, plan_id, origin).await
    }

    async fn run(
        &self,
        store: &dyn PlanStore,
        plan_id: u64,
        origin: Coordinate,
    ) -> Result<GenerationReport> {
        if store.plan(plan_id).await?.is_none() {
            return Err(FootholdError::PlanNotFound { id: plan_id });
        }

        match self.select(origin).await {
            Selection::Found { tier, candidates } => {
                let batch = stage_targets(&candidates, self.settings.tier(tier).wait);
                let targets = store
                    .commit_generated_targets(plan_id, batch, &self.settings.default_plan_name)
                    .await?;

                info!(
                    "Plan {plan_id}: committed {} targets from the {} tier",
                    targets.len(),
                    tier.as_str()
                );

                Ok(GenerationReport {
                    plan_id,
                    status: GenerationStatus::Generated { tier },
                    targets,
                })
            }
            Selection::Empty(status) => {
                info!("Plan {plan_id}: generation produced no targets ({status:?})");
                Ok(GenerationReport {
                    plan_id,
                    status,
                    targets: Vec::new(),
                })
            }
        }
    }

    async fn select(&self, origin: Coordinate) -> Selection {
        let candidates = self.hierarchical(origin).await;
        if !candidates.is_empty() {
            return Selection::Found {
                tier: Tier::Hierarchical,
                candidates,
            };
        }

        let candidates = self.broad(origin).await;
        if !candidates.is_empty() {
            return Selection::Found {
                tier: Tier::Broad,
                candidates,
            };
        }

        let street = match self.geocoder.street_name(origin).await {
            Ok(Some(street)) if !street.trim().is_empty() => street,
            Ok(_) => {
                warn!("Reverse geocoding found no street at {origin}");
                return Selection::Empty(GenerationStatus::Inconclusive);
            }
            Err(e) => {
                warn!("Reverse geocoding failed at {origin}: {e}");
                return Selection::Empty(GenerationStatus::Inconclusive);
            }
        };

        let candidates = self.street(origin, street.trim()).await;
        if candidates.is_empty() {
            Selection::Empty(GenerationStatus::NoCandidates)
        } else {
            Selection::Found {
                tier: Tier::Street,
                candidates,
            }
        }
    }

    async fn hierarchical(&self, origin: Coordinate) -> Vec<CandidatePlace> {
        let tier = &self.settings.hierarchical;
        info!(
            "Hierarchical search over {} categories within {} m",
            self.settings.categories.len(),
            tier.search_radius_m
        );

        let merged = self
            .aggregator
            .gather(
                origin,
                &self.settings.categories,
                tier.search_radius_m,
                tier.band,
            )
            .await;

        select_within(merged, tier.band, tier.max_targets)
    }

    async fn broad(&self, origin: Coordinate) -> Vec<CandidatePlace> {
        let tier = &self.settings.broad;
        info!(
            "Broad search for '{}' within {} m",
            self.settings.broad_query, tier.search_radius_m
        );

        let found = self
            .locator
            .locate(&LocateRequest {
                origin,
                query: &self.settings.broad_query,
                search_radius_m: tier.search_radius_m,
                band: tier.band,
                raw_limit: Some(tier.max_targets),
            })
            .await;

        select_within(found, tier.band, tier.max_targets)
    }

    async fn street(&self, origin: Coordinate, street: &str) -> Vec<CandidatePlace> {
        let tier = &self.settings.street;
        info!("Street search along '{street}' within {} m", tier.search_radius_m);

        let found = self
            .locator
            .locate(&LocateRequest {
                origin,
                query: street,
                search_radius_m: tier.search_radius_m,
                band: tier.band,
                raw_limit: Some(tier.max_targets),
            })
            .await;

        select_within(found, tier.band, tier.max_targets)
    }
}
