//! # catpointd: catpoint daemon
//!
//! Composition root that wires all adapters together and runs the command shell.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars)
//! - Initialize logging
//! - Initialize the `SQLite` connection pool and run migrations
//! - Construct the repository and classifier implementations (adapters)
//! - Construct the decision engine, injecting adapters via port traits
//! - Read one command per line from stdin and execute it to completion
//! - Print status notifications as JSON lines after every command
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer: no alarm logic belongs here.

mod command;
mod config;
mod shell;

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use catpoint_adapter_storage_sqlite_sqlx::SqliteSecurityRepository;
use catpoint_adapter_virtual::{FakeImageClassifier, demo_sensors};
use catpoint_app::decision_engine::DecisionEngine;
use catpoint_app::event_bus::StatusBroadcaster;

use crate::command::Command;
use crate::config::Config;
use crate::shell::Reply;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .with_writer(std::io::stderr)
        .init();

    // Database
    let db = catpoint_adapter_storage_sqlite_sqlx::Config {
        database_url: config.database.url.clone(),
    }
    .build()
    .await?;
    let repo = SqliteSecurityRepository::new(db.pool().clone());

    // Engine
    let broadcaster = Arc::new(StatusBroadcaster::new(256));
    let mut events = broadcaster.subscribe();
    let mut engine = DecisionEngine::new(repo, FakeImageClassifier);
    engine.add_status_listener(broadcaster);

    if config.demo.seed_sensors && engine.get_sensors().await?.is_empty() {
        for sensor in demo_sensors() {
            engine.add_sensor(sensor).await?;
        }
        tracing::info!("seeded demo sensors");
    }
    shell::drain(&mut events);

    tracing::info!(database = %config.database.url, "catpointd ready, type `help`");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("interrupted");
                break;
            }
        };
        let Some(line) = line else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        match line.parse::<Command>() {
            Ok(command) => match shell::execute(&engine, command).await {
                Ok(Reply::Quit) => break,
                Ok(Reply::Lines(output)) => {
                    for text in output {
                        println!("{text}");
                    }
                }
                Err(err) => {
                    tracing::warn!(error = %shell::describe(&err), "command failed");
                    println!("error: {}", shell::describe(&err));
                }
            },
            Err(err) => println!("error: {err}"),
        }

        for event in shell::drain(&mut events) {
            println!("{}", serde_json::to_string(&event)?);
        }
    }

    tracing::info!("catpointd stopped");
    Ok(())
}
