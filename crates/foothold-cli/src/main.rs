//! foothold command-line interface.

mod args;
mod catalog;
mod cli;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use foothold_core::PlannerBuilder;
use log::info;
use renderer::TerminalRenderer;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        no_color,
        command,
    } = Args::parse();

    let mut builder = PlannerBuilder::new();
    if let Some(path) = database_file {
        builder = builder.with_database_path(path);
    }
    let planner = builder
        .build()
        .await
        .context("Failed to initialize planner")?;

    info!("foothold started");

    let cli = Cli::new(planner, TerminalRenderer::new(!no_color));
    match command {
        Some(Plan { command }) => cli.handle_plan_command(command).await,
        Some(Target { command }) => cli.handle_target_command(command).await,
        Some(Journey { command }) => cli.handle_journey_command(command).await,
        None => cli.list_plans().await,
    }
}
