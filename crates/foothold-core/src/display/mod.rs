//! Markdown presentation of plans, targets, journeys and reports.
//!
//! Domain models implement [`std::fmt::Display`] directly (see [`models`]);
//! this module adds newtype wrappers for collections and for operation
//! outcomes so front ends can print any result with `{}` and hand the text
//! to a markdown renderer.
//!
//! - [`collections`]: `Plans`, `Targets`, `Journeys`
//! - [`results`]: `CreateResult`, `UpdateResult`, `DeleteResult`
//! - [`status`]: `OperationStatus`
//! - [`datetime`]: `LocalDateTime`, `WaitTime`
//!
//! ```rust
//! use foothold_core::display::OperationStatus;
//!
//! let status = OperationStatus::success("Marked plan 3 as synced");
//! assert_eq!(status.to_string(), "Success: Marked plan 3 as synced\n");
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;
pub mod status;

pub use collections::{Journeys, Plans, Targets};
pub use datetime::{LocalDateTime, WaitTime};
pub use results::{CreateResult, DeleteResult, UpdateResult};
pub use status::OperationStatus;
