//! Sensor: an intrusion detector whose only relevant state is `active`.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CatpointError, ValidationError};
use crate::id::SensorId;

/// Kind of detector. Informational only; alarm logic never branches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SensorType {
    #[default]
    Door,
    Window,
    Motion,
}

impl SensorType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Door => "door",
            Self::Window => "window",
            Self::Motion => "motion",
        }
    }
}

impl fmt::Display for SensorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for SensorType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "door" => Ok(Self::Door),
            "window" => Ok(Self::Window),
            "motion" => Ok(Self::Motion),
            other => Err(ValidationError::UnknownSensorType(other.to_string())),
        }
    }
}

/// A single intrusion sensor.
///
/// Sensors are totally ordered by name, then id. The order exists only to make
/// iteration deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sensor {
    pub id: SensorId,
    pub name: String,
    pub sensor_type: SensorType,
    pub active: bool,
}

impl Sensor {
    /// Create a builder for constructing a [`Sensor`].
    #[must_use]
    pub fn builder() -> SensorBuilder {
        SensorBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`CatpointError::Validation`] when `name` is blank.
    pub fn validate(&self) -> Result<(), CatpointError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        Ok(())
    }
}

impl Ord for Sensor {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name
            .cmp(&other.name)
            .then_with(|| self.id.cmp(&other.id))
            .then_with(|| self.active.cmp(&other.active))
            .then_with(|| self.sensor_type.as_str().cmp(other.sensor_type.as_str()))
    }
}

impl PartialOrd for Sensor {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Step-by-step builder for [`Sensor`].
#[derive(Debug, Default)]
pub struct SensorBuilder {
    id: Option<SensorId>,
    name: Option<String>,
    sensor_type: SensorType,
    active: bool,
}

impl SensorBuilder {
    #[must_use]
    pub fn id(mut self, id: SensorId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn sensor_type(mut self, sensor_type: SensorType) -> Self {
        self.sensor_type = sensor_type;
        self
    }

    #[must_use]
    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Consume the builder, validate, and return a [`Sensor`].
    ///
    /// # Errors
    ///
    /// Returns [`CatpointError::Validation`] if `name` is missing or blank.
    pub fn build(self) -> Result<Sensor, CatpointError> {
        let sensor = Sensor {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            sensor_type: self.sensor_type,
            active: self.active,
        };
        sensor.validate()?;
        Ok(sensor)
    }
}
