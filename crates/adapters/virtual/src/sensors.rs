//! Simulated sensor set used to seed an empty installation.

use catpoint_domain::sensor::{Sensor, SensorType};

/// One inactive sensor of each type.
#[must_use]
pub fn demo_sensors() -> Vec<Sensor> {
    [
        ("Front Door", SensorType::Door),
        ("Back Window", SensorType::Window),
        ("Hallway", SensorType::Motion),
    ]
    .into_iter()
    .map(|(name, sensor_type)| Sensor {
        id: catpoint_domain::id::SensorId::new(),
        name: name.to_string(),
        sensor_type,
        active: false,
    })
    .collect()
}
