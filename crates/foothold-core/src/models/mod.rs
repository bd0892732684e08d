//! Data models for plans, targets and journeys.
//!
//! Persisted entities ([`ExposurePlan`], [`ExposureTarget`], [`Journey`])
//! carry a [`Lifecycle`] instead of being physically removed, and a
//! [`SyncState`] that every local write resets to
//! [`SyncState::PendingPush`]. Derived values ([`PlanProgress`],
//! [`GenerationReport`]) are recomputed on demand.
//!
//! Display implementations live in [`crate::display::models`].
//!
//! # Examples
//!
//! ```rust
//! use foothold_core::geo::Coordinate;
//! use foothold_core::models::{ExposureTarget, Lifecycle, SyncState};
//! use jiff::Timestamp;
//!
//! let target = ExposureTarget {
//!     id: 1,
//!     plan_id: 1,
//!     name: "Corner Shop".to_string(),
//!     coordinate: Coordinate::new(51.501, -0.125),
//!     wait_time_seconds: 30,
//!     order_index: 0,
//!     lifecycle: Lifecycle::Active,
//!     sync_state: SyncState::PendingPush,
//!     created_at: Timestamp::now(),
//!     updated_at: Timestamp::now(),
//! };
//! println!("{}", target);
//! ```

pub mod generation;
pub mod journey;
pub mod lifecycle;
pub mod plan;
pub mod progress;
pub mod requests;
pub mod target;


pub use generation::{GenerationReport, GenerationStatus, Tier};
pub use journey::{Journey, PathTrace, TracePoint};
pub use lifecycle::{Lifecycle, SyncState};
pub use plan::ExposurePlan;
pub use progress::{AttemptProgress, PlanProgress};
pub use requests::UpdateTargetRequest;
pub use target::{ExposureTarget, StagedTarget};
