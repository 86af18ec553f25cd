//! Executes parsed commands against the decision engine.

use std::error::Error;
use std::path::PathBuf;

use tokio::sync::broadcast;

use catpoint_app::decision_engine::DecisionEngine;
use catpoint_app::ports::{ImageClassifier, SecurityRepository};
use catpoint_domain::error::CatpointError;
use catpoint_domain::event::StatusEvent;
use catpoint_domain::frame::CameraFrame;
use catpoint_domain::sensor::Sensor;

use crate::command::{Command, USAGE};

/// What the shell should do after a command.
#[derive(Debug, PartialEq, Eq)]
pub enum Reply {
    Lines(Vec<String>),
    Quit,
}

/// A command that parsed but failed to execute.
#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error(transparent)]
    Engine(#[from] CatpointError),

    #[error("failed to read image {path}")]
    ReadImage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Render an error with its whole source chain on one line.
pub fn describe(err: &dyn Error) -> String {
    let mut text = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        text.push_str(": ");
        text.push_str(&cause.to_string());
        source = cause.source();
    }
    text
}

fn sensor_line(sensor: &Sensor) -> String {
    let state = if sensor.active { "active" } else { "inactive" };
    format!(
        "{}  {:<6}  {:<8}  {}",
        sensor.id, sensor.sensor_type, state, sensor.name
    )
}

/// Run one command to completion.
///
/// # Errors
///
/// Returns [`ShellError`] when the engine rejects the command or the image
/// file cannot be read.
pub async fn execute<R, C>(
    engine: &DecisionEngine<R, C>,
    command: Command,
) -> Result<Reply, ShellError>
where
    R: SecurityRepository,
    C: ImageClassifier,
{
    let lines = match command {
        Command::Status => {
            let arming = engine.get_arming_status().await?;
            let alarm = engine.get_alarm_status().await?;
            vec![
                format!("arming: {arming} ({})", arming.description()),
                format!("alarm: {alarm} ({})", alarm.description()),
            ]
        }
        Command::SetArming(arming) => {
            engine.set_arming_status(arming).await?;
            vec![format!("arming: {arming} ({})", arming.description())]
        }
        Command::Sensors => {
            let sensors = engine.get_sensors().await?;
            if sensors.is_empty() {
                vec!["no sensors".to_string()]
            } else {
                sensors.iter().map(sensor_line).collect()
            }
        }
        Command::AddSensor { sensor_type, name } => {
            let sensor = Sensor::builder()
                .name(name)
                .sensor_type(sensor_type)
                .build()?;
            let sensor = engine.add_sensor(sensor).await?;
            vec![format!("added {}", sensor_line(&sensor))]
        }
        Command::RemoveSensor(id) => {
            engine.remove_sensor(id).await?;
            vec![format!("removed {id}")]
        }
        Command::SetSensor { id, active } => {
            let sensor = engine.change_sensor_activation_status(id, active).await?;
            vec![sensor_line(&sensor)]
        }
        Command::Image(path) => {
            let bytes = tokio::fs::read(&path)
                .await
                .map_err(|source| ShellError::ReadImage { path, source })?;
            let frame = CameraFrame::new(bytes).map_err(CatpointError::from)?;
            let cat = engine.process_image(&frame).await?;
            vec![if cat { "cat detected" } else { "no cat detected" }.to_string()]
        }
        Command::Help => USAGE.iter().map(ToString::to_string).collect(),
        Command::Quit => return Ok(Reply::Quit),
    };
    Ok(Reply::Lines(lines))
}

/// Collect every notification published since the last drain.
pub fn drain(events: &mut broadcast::Receiver<StatusEvent>) -> Vec<StatusEvent> {
    let mut drained = Vec::new();
    loop {
        match events.try_recv() {
            Ok(event) => drained.push(event),
            Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "status notifications dropped");
            }
            Err(broadcast::error::TryRecvError::Empty | broadcast::error::TryRecvError::Closed) => {
                break;
            }
        }
    }
    drained
}
