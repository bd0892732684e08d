//! Command-line argument definitions.
//!
//! Each subcommand gets a clap `Args` struct that converts into the matching
//! core parameter type with `From`, so the core stays free of clap derives:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Planner
//! ```

use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};
use foothold_core::params::*;

/// Build and follow exposure plans from the command line
///
/// foothold generates ordered lists of nearby places to visit, each with a
/// wait time that grows along the list, and tracks journeys that follow them.
#[derive(Parser)]
#[command(version, about, name = "foothold")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/foothold/foothold.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage exposure plans
    #[command(alias = "p")]
    Plan {
        #[command(subcommand)]
        command: PlanCommands,
    },
    /// Manage the targets of a plan
    #[command(alias = "t")]
    Target {
        #[command(subcommand)]
        command: TargetCommands,
    },
    /// Record journeys
    #[command(alias = "j")]
    Journey {
        #[command(subcommand)]
        command: JourneyCommands,
    },
}

// ----------------------------------------------------------------------------
// Plans
// ----------------------------------------------------------------------------

#[derive(ClapArgs)]
pub struct CreatePlanArgs {
    /// Name of the plan. Left empty, generation names it.
    #[arg(default_value = "")]
    pub name: String,
}

impl From<CreatePlanArgs> for CreatePlan {
    fn from(val: CreatePlanArgs) -> Self {
        CreatePlan { name: val.name }
    }
}

/// A command that only needs a resource ID
#[derive(ClapArgs)]
pub struct IdArgs {
    #[arg(help = "Unique identifier of the resource")]
    pub id: u64,
}

impl From<IdArgs> for Id {
    fn from(val: IdArgs) -> Self {
        Id { id: val.id }
    }
}

#[derive(ClapArgs)]
pub struct RenamePlanArgs {
    #[arg(help = "Unique identifier of the plan to rename")]
    pub id: u64,
    /// New name of the plan
    pub name: String,
}

impl From<RenamePlanArgs> for RenamePlan {
    fn from(val: RenamePlanArgs) -> Self {
        RenamePlan {
            id: val.id,
            name: val.name,
        }
    }
}

/// Generate targets for a plan from nearby places
///
/// Places come from an offline JSON catalog. Without --lat/--lon the
/// device position is used, which this front end cannot determine.
#[derive(ClapArgs)]
pub struct GeneratePlanArgs {
    #[arg(help = "Unique identifier of the plan to fill")]
    pub id: u64,
    #[arg(long, allow_hyphen_values = true, requires = "lon", help = "Latitude of the origin")]
    pub lat: Option<f64>,
    #[arg(long, allow_hyphen_values = true, requires = "lat", help = "Longitude of the origin")]
    pub lon: Option<f64>,
    #[arg(long, help = "JSON place catalog to search")]
    pub catalog: Option<PathBuf>,
    #[arg(long, help = "JSON file overriding the generation settings")]
    pub settings: Option<PathBuf>,
}

#[derive(ClapArgs)]
pub struct ProgressArgs {
    #[arg(help = "Unique identifier of the plan")]
    pub id: u64,
    #[arg(long, help = "JSON file overriding the reached radius")]
    pub settings: Option<PathBuf>,
}

#[derive(ClapArgs)]
pub struct SyncArgs {
    /// Mark this plan and its targets as pushed instead of listing
    #[arg(long)]
    pub mark: Option<u64>,
}

#[derive(Subcommand)]
pub enum PlanCommands {
    /// Create a new plan
    #[command(alias = "c")]
    Create(CreatePlanArgs),
    /// List all plans
    #[command(aliases = ["l", "ls"])]
    List,
    /// Show a plan and its targets
    #[command(alias = "s")]
    Show(IdArgs),
    /// Rename a plan
    Rename(RenamePlanArgs),
    /// Delete a plan and its targets
    #[command(aliases = ["d", "rm"])]
    Delete(IdArgs),
    /// Generate targets from nearby places
    #[command(alias = "g")]
    Generate(GeneratePlanArgs),
    /// Show how far the plan's journeys got
    Progress(ProgressArgs),
    /// List plans with changes not yet pushed
    Sync(SyncArgs),
}

// ----------------------------------------------------------------------------
// Targets
// ----------------------------------------------------------------------------

#[derive(ClapArgs)]
pub struct AddTargetArgs {
    #[arg(help = "Unique identifier of the plan to add this target to")]
    pub plan_id: u64,
    /// Name of the place
    pub name: String,
    #[arg(long, allow_hyphen_values = true)]
    pub lat: f64,
    #[arg(long, allow_hyphen_values = true)]
    pub lon: f64,
    #[arg(short, long, default_value_t = 30, help = "Seconds to stay at the target")]
    pub wait: u32,
}

impl From<AddTargetArgs> for TargetCreate {
    fn from(val: AddTargetArgs) -> Self {
        TargetCreate {
            plan_id: val.plan_id,
            name: val.name,
            latitude: val.lat,
            longitude: val.lon,
            wait_time_seconds: val.wait,
        }
    }
}

#[derive(ClapArgs)]
pub struct InsertTargetArgs {
    #[arg(help = "Unique identifier of the plan to insert this target into")]
    pub plan_id: u64,
    #[arg(help = "0-based position index where to insert the target (0 = first position)")]
    pub position: u32,
    pub name: String,
    #[arg(long, allow_hyphen_values = true)]
    pub lat: f64,
    #[arg(long, allow_hyphen_values = true)]
    pub lon: f64,
    #[arg(short, long, default_value_t = 30, help = "Seconds to stay at the target")]
    pub wait: u32,
}

impl From<InsertTargetArgs> for InsertTarget {
    fn from(val: InsertTargetArgs) -> Self {
        InsertTarget {
            target: TargetCreate {
                plan_id: val.plan_id,
                name: val.name,
                latitude: val.lat,
                longitude: val.lon,
                wait_time_seconds: val.wait,
            },
            position: val.position,
        }
    }
}

#[derive(ClapArgs)]
pub struct UpdateTargetArgs {
    #[arg(help = "Unique identifier of the target to update")]
    pub id: u64,
    #[arg(short, long, help = "Updated name of the place")]
    pub name: Option<String>,
    #[arg(long, allow_hyphen_values = true, requires = "lon")]
    pub lat: Option<f64>,
    #[arg(long, allow_hyphen_values = true, requires = "lat")]
    pub lon: Option<f64>,
    #[arg(short, long, help = "Updated wait time in seconds")]
    pub wait: Option<u32>,
}

impl From<UpdateTargetArgs> for UpdateTarget {
    fn from(val: UpdateTargetArgs) -> Self {
        UpdateTarget {
            id: val.id,
            name: val.name,
            latitude: val.lat,
            longitude: val.lon,
            wait_time_seconds: val.wait,
        }
    }
}

#[derive(ClapArgs)]
pub struct SwapTargetsArgs {
    #[arg(help = "Unique identifier of the first target to swap")]
    pub target1_id: u64,
    #[arg(help = "Unique identifier of the second target to swap")]
    pub target2_id: u64,
}

impl From<SwapTargetsArgs> for SwapTargets {
    fn from(val: SwapTargetsArgs) -> Self {
        SwapTargets {
            target1_id: val.target1_id,
            target2_id: val.target2_id,
        }
    }
}

#[derive(Subcommand)]
pub enum TargetCommands {
    /// Append a target to a plan
    #[command(alias = "a")]
    Add(AddTargetArgs),
    /// Insert a target at a specific position in a plan
    #[command(alias = "i")]
    Insert(InsertTargetArgs),
    /// Update a target's name, location or wait time
    #[command(alias = "u")]
    Update(UpdateTargetArgs),
    /// Remove a target from its plan
    #[command(alias = "rm")]
    Remove(IdArgs),
    /// Swap the order of two targets within the same plan
    #[command(alias = "sw")]
    Swap(SwapTargetsArgs),
    /// List the targets of a plan in visiting order
    #[command(aliases = ["l", "ls"])]
    List(IdArgs),
    /// Show a single target
    #[command(alias = "s")]
    Show(IdArgs),
}

// ----------------------------------------------------------------------------
// Journeys
// ----------------------------------------------------------------------------

#[derive(ClapArgs)]
pub struct StartJourneyArgs {
    /// Plan to follow; omit for a free-form journey
    #[arg(long)]
    pub plan: Option<u64>,
}

impl From<StartJourneyArgs> for StartJourney {
    fn from(val: StartJourneyArgs) -> Self {
        StartJourney { plan_id: val.plan }
    }
}

#[derive(ClapArgs)]
pub struct RecordPositionArgs {
    #[arg(help = "Unique identifier of the journey")]
    pub journey_id: u64,
    #[arg(long, allow_hyphen_values = true)]
    pub lat: f64,
    #[arg(long, allow_hyphen_values = true)]
    pub lon: f64,
}

impl From<RecordPositionArgs> for RecordPosition {
    fn from(val: RecordPositionArgs) -> Self {
        RecordPosition {
            journey_id: val.journey_id,
            latitude: val.lat,
            longitude: val.lon,
        }
    }
}

#[derive(Subcommand)]
pub enum JourneyCommands {
    /// Start recording a journey
    Start(StartJourneyArgs),
    /// Append a position to a journey's path
    #[command(alias = "r")]
    Record(RecordPositionArgs),
    /// Mark a journey completed
    Complete(IdArgs),
    /// Stop a journey without completing it
    End(IdArgs),
    /// Delete a journey
    #[command(alias = "rm")]
    Delete(IdArgs),
    /// List the journeys of a plan
    #[command(aliases = ["l", "ls"])]
    List(IdArgs),
    /// Show the journey being recorded
    Current,
    /// Show a journey and its path
    #[command(alias = "s")]
    Show(IdArgs),
}
