//! Command handlers: run a planner operation and render its result.

use std::sync::Arc;

use anyhow::{Context, Result};
use foothold_core::{
    params::{GeneratePlan, Id},
    CreateResult, DeleteResult, GenerationSettings, Journeys, LocalDateTime, OperationStatus,
    PlanGenerator, Planner, Plans, ProgressAnalyzer, Targets, UpdateResult,
};
use log::debug;

use crate::{
    args::{
        GeneratePlanArgs, JourneyCommands, PlanCommands, ProgressArgs, SyncArgs, TargetCommands,
    },
    catalog::{NoDeviceLocation, PlaceCatalog},
    renderer::TerminalRenderer,
};

pub struct Cli {
    planner: Planner,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(planner: Planner, renderer: TerminalRenderer) -> Self {
        Self { planner, renderer }
    }

    pub async fn handle_plan_command(&self, command: PlanCommands) -> Result<()> {
        match command {
            PlanCommands::Create(args) => {
                let plan = self.planner.create_plan(&args.into()).await?;
                self.renderer.show(&CreateResult::new(plan));
            }
            PlanCommands::List => self.list_plans().await?,
            PlanCommands::Show(args) => {
                let id: Id = args.into();
                let plan = self
                    .planner
                    .get_plan(&id)
                    .await?
                    .with_context(|| format!("Plan with ID {} not found", id.id))?;
                self.renderer.show(&plan);
            }
            PlanCommands::Rename(args) => {
                let plan = self.planner.rename_plan(&args.into()).await?;
                let change = format!("Name set to '{}'", plan.name);
                self.renderer
                    .show(&UpdateResult::with_changes(plan, vec![change]));
            }
            PlanCommands::Delete(args) => {
                let plan = self.planner.delete_plan(&args.into()).await?;
                self.renderer.show(&DeleteResult::new(plan));
            }
            PlanCommands::Generate(args) => self.generate(args).await?,
            PlanCommands::Progress(args) => self.progress(args).await?,
            PlanCommands::Sync(args) => self.sync(args).await?,
        }
        Ok(())
    }

    pub async fn handle_target_command(&self, command: TargetCommands) -> Result<()> {
        match command {
            TargetCommands::Add(args) => {
                let target = self.planner.add_target(&args.into()).await?;
                self.renderer.show(&CreateResult::new(target));
            }
            TargetCommands::Insert(args) => {
                let target = self.planner.insert_target(&args.into()).await?;
                self.renderer.show(&CreateResult::new(target));
            }
            TargetCommands::Update(args) => {
                let mut changes = Vec::new();
                if let Some(name) = &args.name {
                    changes.push(format!("Name set to '{name}'"));
                }
                if let (Some(lat), Some(lon)) = (args.lat, args.lon) {
                    changes.push(format!("Moved to {lat:.6}, {lon:.6}"));
                }
                if let Some(wait) = args.wait {
                    changes.push(format!("Wait set to {wait}s"));
                }

                let target = self.planner.update_target(&args.into()).await?;
                self.renderer
                    .show(&UpdateResult::with_changes(target, changes));
            }
            TargetCommands::Remove(args) => {
                let target = self.planner.remove_target(&args.into()).await?;
                self.renderer.show(&DeleteResult::new(target));
            }
            TargetCommands::Swap(args) => {
                let (first, second) = (args.target1_id, args.target2_id);
                self.planner.swap_targets(&args.into()).await?;
                self.renderer.show(&OperationStatus::success(format!(
                    "Swapped targets {first} and {second}"
                )));
            }
            TargetCommands::List(args) => {
                let targets = self.planner.list_targets(&args.into()).await?;
                self.renderer.show(&Targets(targets));
            }
            TargetCommands::Show(args) => {
                let id: Id = args.into();
                let target = self
                    .planner
                    .get_target(&id)
                    .await?
                    .with_context(|| format!("Target with ID {} not found", id.id))?;
                self.renderer.show(&target);
            }
        }
        Ok(())
    }

    pub async fn handle_journey_command(&self, command: JourneyCommands) -> Result<()> {
        match command {
            JourneyCommands::Start(args) => {
                let journey = self.planner.start_journey(&args.into()).await?;
                self.renderer.show(&CreateResult::new(journey));
            }
            JourneyCommands::Record(args) => {
                let journey_id = args.journey_id;
                let point = self.planner.record_position(&args.into()).await?;
                self.renderer.show(&OperationStatus::success(format!(
                    "Recorded {} for journey {journey_id}",
                    point.coordinate
                )));
            }
            JourneyCommands::Complete(args) => {
                let journey = self.planner.complete_journey(&args.into()).await?;
                self.renderer.show(&UpdateResult::new(journey));
            }
            JourneyCommands::End(args) => {
                let journey = self.planner.end_journey(&args.into()).await?;
                self.renderer.show(&UpdateResult::new(journey));
            }
            JourneyCommands::Delete(args) => {
                let id = args.id;
                self.planner.delete_journey(&args.into()).await?;
                self.renderer
                    .show(&OperationStatus::success(format!("Deleted journey {id}")));
            }
            JourneyCommands::List(args) => {
                let journeys = self.planner.list_plan_journeys(&args.into()).await?;
                self.renderer.show(&Journeys(journeys));
            }
            JourneyCommands::Current => match self.planner.current_journey().await? {
                Some(journey) => self.renderer.show(&journey),
                None => self
                    .renderer
                    .show(&OperationStatus::failure("No journey is being recorded")),
            },
            JourneyCommands::Show(args) => {
                let id: Id = args.into();
                let journey = self
                    .planner
                    .get_journey(&id)
                    .await?
                    .with_context(|| format!("Journey with ID {} not found", id.id))?;
                let trace = self.planner.get_path_trace(&id).await?;

                let mut output = journey.to_string();
                match trace {
                    Some(trace) => {
                        output.push_str(&format!("### Path ({} points)\n\n", trace.len()));
                        for point in &trace.points {
                            output.push_str(&format!(
                                "- {} at {}\n",
                                point.coordinate,
                                LocalDateTime(&point.recorded_at)
                            ));
                        }
                    }
                    None => output.push_str("No positions recorded.\n"),
                }
                self.renderer.render(&output);
            }
        }
        Ok(())
    }

    pub async fn list_plans(&self) -> Result<()> {
        let plans = self.planner.list_plans().await?;
        self.renderer.show(&Plans(plans));
        Ok(())
    }

    async fn generate(&self, args: GeneratePlanArgs) -> Result<()> {
        let settings = load_settings(args.settings.as_deref())?;
        let catalog = match &args.catalog {
            Some(path) => PlaceCatalog::from_json_file(path)?,
            None => PlaceCatalog::default(),
        };
        let catalog = Arc::new(catalog);
        let generator = PlanGenerator::new(catalog.clone(), catalog)
            .with_settings(settings)
            .context("Invalid generation settings")?;

        let report = match (args.lat, args.lon) {
            (Some(latitude), Some(longitude)) => {
                let params = GeneratePlan {
                    plan_id: args.id,
                    latitude,
                    longitude,
                };
                self.planner.generate_plan(&generator, &params).await?
            }
            _ => {
                debug!("No origin given, asking for the device position");
                self.planner
                    .generate_plan_here(&generator, &Id { id: args.id }, &NoDeviceLocation)
                    .await?
            }
        };

        self.renderer.show(&report);
        Ok(())
    }

    async fn progress(&self, args: ProgressArgs) -> Result<()> {
        let settings = load_settings(args.settings.as_deref())?;
        let analyzer = ProgressAnalyzer::from_settings(&settings);
        let progress = self
            .planner
            .plan_progress(&analyzer, &Id { id: args.id })
            .await?;
        self.renderer.show(&progress);
        Ok(())
    }

    async fn sync(&self, args: SyncArgs) -> Result<()> {
        if let Some(id) = args.mark {
            self.planner.mark_plan_synced(&Id { id }).await?;
            self.renderer
                .show(&OperationStatus::success(format!("Plan {id} marked as synced")));
            return Ok(());
        }

        let pending = self.planner.plans_pending_sync().await?;
        if pending.is_empty() {
            self.renderer.show(&OperationStatus::success("Nothing to sync"));
        } else {
            self.renderer.show(&Plans(pending));
        }
        Ok(())
    }
}

fn load_settings(path: Option<&std::path::Path>) -> Result<GenerationSettings> {
    match path {
        Some(path) => GenerationSettings::from_json_file(path)
            .with_context(|| format!("Failed to load settings from {}", path.display())),
        None => Ok(GenerationSettings::default()),
    }
}

