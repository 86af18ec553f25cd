//! Observer port: sinks notified by the decision engine.

use std::fmt;

use catpoint_domain::status::{AlarmStatus, ArmingStatus};

/// Receives notifications from the [`DecisionEngine`](crate::decision_engine::DecisionEngine).
///
/// Callbacks run synchronously, inside the engine operation that caused them,
/// and always after the corresponding change has been persisted.
pub trait StatusListener: Send + Sync {
    /// The alarm status changed to `status`.
    fn alarm_status_changed(&self, status: AlarmStatus);

    /// A camera frame was classified.
    fn cat_detected(&self, cat: bool);

    /// Sensors were added, removed, or bulk-deactivated by an arming change.
    fn sensors_changed(&self);

    /// The arming status changed to `status`.
    fn arming_status_changed(&self, _status: ArmingStatus) {}
}

/// Token returned on registration, used to deregister a listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub(crate) u64);

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listener-{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_render_listener_id_for_logs() {
        assert_eq!(ListenerId(3).to_string(), "listener-3");
    }
}
