//! Decision engine: the alarm state machine.
//!
//! The engine reads the current arming status, alarm status and sensors from
//! the [`SecurityRepository`] on every call, computes the transition, writes
//! the result back and then notifies the registered [`StatusListener`]s.
//!
//! ```text
//! DISARMED/*            --arm(X)-->    X/NO_ALARM (after bulk deactivate)
//! */*                   --disarm-->    DISARMED/NO_ALARM
//! ARMED_*/NO_ALARM      --activate-->  ARMED_*/PENDING_ALARM
//! ARMED_*/PENDING_ALARM --activate-->  ARMED_*/ALARM
//! ARMED_*/PENDING_ALARM --deact_last-> ARMED_*/NO_ALARM
//! ARMED_HOME/*          --cat_true-->  ARMED_HOME/ALARM
//! */*                   --cat_false ∧ all_inactive --> */NO_ALARM
//! ```
//!
//! Every other (state, event) pair is a fixed point.

use std::sync::Arc;

use catpoint_domain::error::{CatpointError, NotFoundError};
use catpoint_domain::frame::CameraFrame;
use catpoint_domain::id::SensorId;
use catpoint_domain::sensor::Sensor;
use catpoint_domain::status::{AlarmStatus, ArmingStatus};

use crate::ports::{ImageClassifier, ListenerId, SecurityRepository, StatusListener};

/// Confidence threshold passed to the classifier for every frame.
pub const CAT_CONFIDENCE_THRESHOLD: f32 = 50.0;

struct Registration {
    id: ListenerId,
    listener: Arc<dyn StatusListener>,
}

/// Alarm state machine over an injected repository and classifier.
///
/// Operations run to completion one at a time; hosts with several producers
/// must serialize calls (e.g. behind a single mutex).
pub struct DecisionEngine<R, C> {
    repo: R,
    classifier: C,
    listeners: Vec<Registration>,
    next_listener_id: u64,
}

impl<R, C> DecisionEngine<R, C>
where
    R: SecurityRepository,
    C: ImageClassifier,
{
    /// Create a new engine with no listeners.
    pub fn new(repo: R, classifier: C) -> Self {
        Self {
            repo,
            classifier,
            listeners: Vec::new(),
            next_listener_id: 0,
        }
    }

    /// Register a listener.
    ///
    /// Registering the same `Arc` twice returns the original token and does
    /// not add a second registration.
    pub fn add_status_listener(&mut self, listener: Arc<dyn StatusListener>) -> ListenerId {
        if let Some(existing) = self
            .listeners
            .iter()
            .find(|registration| Arc::ptr_eq(&registration.listener, &listener))
        {
            tracing::debug!(listener = %existing.id, "listener already registered");
            return existing.id;
        }

        let id = ListenerId(self.next_listener_id);
        self.next_listener_id += 1;
        self.listeners.push(Registration { id, listener });
        tracing::debug!(listener = %id, "listener registered");
        id
    }

    /// Deregister a listener. Returns `false` if the token was unknown.
    pub fn remove_status_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|registration| registration.id != id);
        let removed = self.listeners.len() != before;
        tracing::debug!(listener = %id, removed, "listener deregistered");
        removed
    }

    /// Change the arming status.
    ///
    /// Disarming clears the alarm. Arming deactivates every active sensor
    /// first, against the *previous* arming status, then persists the new one.
    ///
    /// # Errors
    ///
    /// Propagates any repository error. Sensors deactivated before the failing
    /// write stay deactivated and are announced through `sensors_changed`.
    #[tracing::instrument(skip(self))]
    pub async fn set_arming_status(&self, arming: ArmingStatus) -> Result<(), CatpointError> {
        let previous = self.repo.get_arming_status().await?;

        match arming {
            ArmingStatus::Disarmed => self.set_alarm_status(AlarmStatus::NoAlarm).await?,
            ArmingStatus::ArmedHome | ArmingStatus::ArmedAway => {
                self.deactivate_all_sensors().await?;
            }
        }

        self.repo.set_arming_status(arming).await?;
        if previous != arming {
            tracing::info!(from = %previous, to = %arming, "arming status changed");
            self.notify(|listener| listener.arming_status_changed(arming));
        }
        Ok(())
    }

    /// Set one sensor's `active` flag, applying the alarm effects of an
    /// activation or deactivation first.
    ///
    /// Returns the sensor as persisted.
    ///
    /// # Errors
    ///
    /// Returns [`CatpointError::NotFound`] when no sensor with `id` exists,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn change_sensor_activation_status(
        &self,
        id: SensorId,
        active: bool,
    ) -> Result<Sensor, CatpointError> {
        let sensor = self.repo.get_sensor(id).await?.ok_or_else(|| NotFoundError {
            entity: "Sensor",
            id: id.to_string(),
        })?;
        self.apply_activation(sensor, active).await
    }

    /// Classify a camera frame and feed the verdict into the state machine.
    ///
    /// Returns whether a cat was detected.
    ///
    /// # Errors
    ///
    /// Propagates classifier and repository errors. No listener hears about
    /// a frame whose classification failed.
    #[tracing::instrument(skip(self, frame), fields(frame_len = frame.len()))]
    pub async fn process_image(&self, frame: &CameraFrame) -> Result<bool, CatpointError> {
        let cat = self
            .classifier
            .contains_cat(frame, CAT_CONFIDENCE_THRESHOLD)
            .await?;
        self.cat_detected(cat).await?;
        Ok(cat)
    }

    /// Add a sensor after validating it.
    ///
    /// # Errors
    ///
    /// Returns [`CatpointError::Validation`] if invariants fail, or a
    /// storage error propagated from the repository.
    #[tracing::instrument(skip(self, sensor), fields(sensor_name = %sensor.name))]
    pub async fn add_sensor(&self, sensor: Sensor) -> Result<Sensor, CatpointError> {
        sensor.validate()?;
        self.repo.add_sensor(sensor.clone()).await?;
        self.notify(|listener| listener.sensors_changed());
        Ok(sensor)
    }

    /// Remove a sensor by id.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn remove_sensor(&self, id: SensorId) -> Result<(), CatpointError> {
        self.repo.remove_sensor(id).await?;
        self.notify(|listener| listener.sensors_changed());
        Ok(())
    }

    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn get_alarm_status(&self) -> Result<AlarmStatus, CatpointError> {
        self.repo.get_alarm_status().await
    }

    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn get_arming_status(&self) -> Result<ArmingStatus, CatpointError> {
        self.repo.get_arming_status().await
    }

    /// All sensors, ordered by name then id.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn get_sensors(&self) -> Result<Vec<Sensor>, CatpointError> {
        self.repo.get_sensors().await
    }

    async fn apply_activation(
        &self,
        mut sensor: Sensor,
        active: bool,
    ) -> Result<Sensor, CatpointError> {
        match (sensor.active, active) {
            (false, true) => {
                tracing::debug!(sensor_id = %sensor.id, name = %sensor.name, "activating sensor");
                self.handle_sensor_activated().await?;
            }
            (true, false) => {
                tracing::debug!(sensor_id = %sensor.id, name = %sensor.name, "deactivating sensor");
                self.handle_sensor_deactivated(sensor.id).await?;
            }
            (false, false) | (true, true) => {}
        }

        sensor.active = active;
        self.repo.update_sensor(sensor.clone()).await?;
        Ok(sensor)
    }

    /// Deactivate every active sensor through the single-sensor path.
    async fn deactivate_all_sensors(&self) -> Result<(), CatpointError> {
        // Snapshot first: each deactivation writes back to the repository.
        let active: Vec<Sensor> = self
            .repo
            .get_sensors()
            .await?
            .into_iter()
            .filter(|sensor| sensor.active)
            .collect();

        if active.is_empty() {
            return Ok(());
        }

        let mut deactivated = 0_usize;
        let mut failure = None;
        for sensor in active {
            match self.apply_activation(sensor, false).await {
                Ok(_) => deactivated += 1,
                Err(err) => {
                    failure = Some(err);
                    break;
                }
            }
        }

        // Sensors persisted before a failed write still changed.
        if deactivated > 0 {
            self.notify(|listener| listener.sensors_changed());
        }
        match failure {
            Some(err) => {
                tracing::warn!(deactivated, "bulk sensor deactivation interrupted");
                Err(err)
            }
            None => Ok(()),
        }
    }

    async fn handle_sensor_activated(&self) -> Result<(), CatpointError> {
        if !self.repo.get_arming_status().await?.is_armed() {
            return Ok(());
        }

        match self.repo.get_alarm_status().await? {
            AlarmStatus::NoAlarm => self.set_alarm_status(AlarmStatus::PendingAlarm).await,
            AlarmStatus::PendingAlarm => self.set_alarm_status(AlarmStatus::Alarm).await,
            AlarmStatus::Alarm => Ok(()),
        }
    }

    async fn handle_sensor_deactivated(&self, id: SensorId) -> Result<(), CatpointError> {
        if !self.repo.get_arming_status().await?.is_armed() {
            return Ok(());
        }

        match self.repo.get_alarm_status().await? {
            AlarmStatus::PendingAlarm => {
                let others_inactive = self
                    .repo
                    .get_sensors()
                    .await?
                    .iter()
                    .filter(|sensor| sensor.id != id)
                    .all(|sensor| !sensor.active);
                if others_inactive {
                    self.set_alarm_status(AlarmStatus::NoAlarm).await?;
                }
                Ok(())
            }
            // ALARM is sticky until disarmed.
            AlarmStatus::NoAlarm | AlarmStatus::Alarm => Ok(()),
        }
    }

    async fn cat_detected(&self, cat: bool) -> Result<(), CatpointError> {
        if cat {
            match self.repo.get_arming_status().await? {
                ArmingStatus::ArmedHome => self.set_alarm_status(AlarmStatus::Alarm).await?,
                ArmingStatus::ArmedAway | ArmingStatus::Disarmed => {}
            }
        } else if self.all_sensors_inactive().await? {
            self.set_alarm_status(AlarmStatus::NoAlarm).await?;
        }

        self.notify(|listener| listener.cat_detected(cat));
        Ok(())
    }

    async fn all_sensors_inactive(&self) -> Result<bool, CatpointError> {
        Ok(self
            .repo
            .get_sensors()
            .await?
            .iter()
            .all(|sensor| !sensor.active))
    }

    /// The only path that writes the alarm status.
    async fn set_alarm_status(&self, status: AlarmStatus) -> Result<(), CatpointError> {
        let current = self.repo.get_alarm_status().await?;
        if current == status {
            tracing::trace!(%status, "alarm status unchanged");
            return Ok(());
        }

        self.repo.set_alarm_status(status).await?;
        tracing::info!(from = %current, to = %status, "alarm status changed");
        self.notify(|listener| listener.alarm_status_changed(status));
        Ok(())
    }

    fn notify(&self, f: impl Fn(&dyn StatusListener)) {
        for registration in &self.listeners {
            f(registration.listener.as_ref());
        }
    }
}
