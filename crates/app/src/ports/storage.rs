//! Storage port: the durable store for sensors and both statuses.

use std::future::Future;

use catpoint_domain::error::CatpointError;
use catpoint_domain::id::SensorId;
use catpoint_domain::sensor::Sensor;
use catpoint_domain::status::{AlarmStatus, ArmingStatus};

/// Single source of truth for the security system state.
///
/// Holds exactly one [`ArmingStatus`], one [`AlarmStatus`] and a set of
/// sensors unique by id.
pub trait SecurityRepository {
    /// Read the stored alarm status.
    fn get_alarm_status(&self) -> impl Future<Output = Result<AlarmStatus, CatpointError>> + Send;

    /// Persist a new alarm status.
    fn set_alarm_status(
        &self,
        status: AlarmStatus,
    ) -> impl Future<Output = Result<(), CatpointError>> + Send;

    /// Read the stored arming status.
    fn get_arming_status(
        &self,
    ) -> impl Future<Output = Result<ArmingStatus, CatpointError>> + Send;

    /// Persist a new arming status.
    fn set_arming_status(
        &self,
        status: ArmingStatus,
    ) -> impl Future<Output = Result<(), CatpointError>> + Send;

    /// All sensors, ordered by name then id.
    fn get_sensors(&self) -> impl Future<Output = Result<Vec<Sensor>, CatpointError>> + Send;

    /// Get a sensor by its unique identifier.
    fn get_sensor(
        &self,
        id: SensorId,
    ) -> impl Future<Output = Result<Option<Sensor>, CatpointError>> + Send;

    /// Add a sensor. Adding an id that is already stored is a no-op.
    fn add_sensor(&self, sensor: Sensor) -> impl Future<Output = Result<(), CatpointError>> + Send;

    /// Remove a sensor. Removing an unknown id is a no-op.
    fn remove_sensor(&self, id: SensorId)
    -> impl Future<Output = Result<(), CatpointError>> + Send;

    /// Overwrite a stored sensor.
    ///
    /// Fails with [`CatpointError::NotFound`] when the id is not stored.
    fn update_sensor(
        &self,
        sensor: Sensor,
    ) -> impl Future<Output = Result<(), CatpointError>> + Send;
}

impl<T: SecurityRepository + Send + Sync> SecurityRepository for std::sync::Arc<T> {
    fn get_alarm_status(&self) -> impl Future<Output = Result<AlarmStatus, CatpointError>> + Send {
        (**self).get_alarm_status()
    }

    fn set_alarm_status(
        &self,
        status: AlarmStatus,
    ) -> impl Future<Output = Result<(), CatpointError>> + Send {
        (**self).set_alarm_status(status)
    }

    fn get_arming_status(
        &self,
    ) -> impl Future<Output = Result<ArmingStatus, CatpointError>> + Send {
        (**self).get_arming_status()
    }

    fn set_arming_status(
        &self,
        status: ArmingStatus,
    ) -> impl Future<Output = Result<(), CatpointError>> + Send {
        (**self).set_arming_status(status)
    }

    fn get_sensors(&self) -> impl Future<Output = Result<Vec<Sensor>, CatpointError>> + Send {
        (**self).get_sensors()
    }

    fn get_sensor(
        &self,
        id: SensorId,
    ) -> impl Future<Output = Result<Option<Sensor>, CatpointError>> + Send {
        (**self).get_sensor(id)
    }

    fn add_sensor(&self, sensor: Sensor) -> impl Future<Output = Result<(), CatpointError>> + Send {
        (**self).add_sensor(sensor)
    }

    fn remove_sensor(
        &self,
        id: SensorId,
    ) -> impl Future<Output = Result<(), CatpointError>> + Send {
        (**self).remove_sensor(id)
    }

    fn update_sensor(
        &self,
        sensor: Sensor,
    ) -> impl Future<Output = Result<(), CatpointError>> + Send {
        (**self).update_sensor(sensor)
    }
}
