// ABOUTME: Command-line replay of a scripted workout against an in-memory repository
// ABOUTME: Loads a routine snapshot and a command script, prints the resulting session as JSON
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Replay a workout script
//!
//! Usage:
//! ```bash
//! workout-replay --routine routine.json --commands commands.json --finish --pretty
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use pierre_workout::config::WorkoutConfig;
use pierre_workout::logging::LoggingConfig;
use pierre_workout::models::RoutineSnapshot;
use pierre_workout::replay::{load_json, replay, ReplayCommand, ReplayReport};
use pierre_workout::repository::InMemoryWorkoutRepository;
use pierre_workout::runtime::WorkoutRuntime;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

#[derive(Parser)]
#[command(
    name = "workout-replay",
    about = "Pierre Workout Replay",
    long_about = "Start a workout from a routine snapshot, apply a scripted list of commands, and print the resulting session"
)]
struct Cli {
    /// Routine snapshot (JSON)
    #[arg(long)]
    routine: PathBuf,

    /// Command script (JSON array)
    #[arg(long)]
    commands: PathBuf,

    /// User the workout belongs to; random when omitted
    #[arg(long)]
    user: Option<Uuid>,

    /// Commit the workout after the last command
    #[arg(long)]
    finish: bool,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

#[derive(Serialize)]
struct Output {
    #[serde(flatten)]
    report: ReplayReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    committed_session_id: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    LoggingConfig::from_env().init()?;

    let config = WorkoutConfig::from_env()?;
    let routine: RoutineSnapshot = load_json(&cli.routine)
        .with_context(|| format!("Loading routine {}", cli.routine.display()))?;
    let commands: Vec<ReplayCommand> = load_json(&cli.commands)
        .with_context(|| format!("Loading commands {}", cli.commands.display()))?;
    let user_id = cli.user.unwrap_or_else(Uuid::new_v4);
    let routine_id = routine.id.clone();

    let repository = Arc::new(InMemoryWorkoutRepository::new().with_routine(routine));
    let mut runtime = WorkoutRuntime::new(repository, user_id, config);

    let started_at = Utc::now();
    runtime.start_from_routine(&routine_id, started_at).await?;
    let report = replay(&mut runtime, &commands, started_at).await?;
    info!(steps = report.steps.len(), "Replay complete");

    let committed_session_id = if cli.finish {
        Some(runtime.finish(report.session.finished_at).await?)
    } else {
        None
    };

    let output = Output {
        report,
        committed_session_id,
    };
    let json = if cli.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{json}");
    Ok(())
}
