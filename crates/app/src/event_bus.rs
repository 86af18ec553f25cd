//! In-process status broadcaster backed by a tokio broadcast channel.

use tokio::sync::broadcast;

use catpoint_domain::event::StatusEvent;
use catpoint_domain::status::{AlarmStatus, ArmingStatus};

use crate::ports::StatusListener;

/// A [`StatusListener`] that republishes every callback as a [`StatusEvent`]
/// on a tokio [`broadcast`] channel.
///
/// Publishing succeeds even when there are no active subscribers
/// (the event is simply dropped).
pub struct StatusBroadcaster {
    sender: broadcast::Sender<StatusEvent>,
}

impl StatusBroadcaster {
    /// Create a new broadcaster with the given channel capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to status events.
    ///
    /// Returns a receiver that will get all events published *after*
    /// the subscription is created.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<StatusEvent> {
        self.sender.subscribe()
    }

    fn publish(&self, event: StatusEvent) {
        // Send fails only when nobody is subscribed.
        let _ = self.sender.send(event);
    }
}

impl StatusListener for StatusBroadcaster {
    fn alarm_status_changed(&self, status: AlarmStatus) {
        self.publish(StatusEvent::AlarmStatusChanged { status });
    }

    fn cat_detected(&self, cat: bool) {
        self.publish(StatusEvent::CatDetected { cat });
    }

    fn sensors_changed(&self) {
        self.publish(StatusEvent::SensorsChanged);
    }

    fn arming_status_changed(&self, status: ArmingStatus) {
        self.publish(StatusEvent::ArmingStatusChanged { status });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn should_deliver_event_to_subscriber() {
        let bus = StatusBroadcaster::new(16);
        let mut rx = bus.subscribe();

        bus.alarm_status_changed(AlarmStatus::PendingAlarm);

        let received = rx.recv().await.unwrap();
        assert_eq!(
            received,
            StatusEvent::AlarmStatusChanged {
                status: AlarmStatus::PendingAlarm
            }
        );
    }

    #[tokio::test]
    async fn should_deliver_event_to_multiple_subscribers() {
        let bus = StatusBroadcaster::new(16);
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.cat_detected(true);

        assert_eq!(rx1.recv().await.unwrap(), StatusEvent::CatDetected { cat: true });
        assert_eq!(rx2.recv().await.unwrap(), StatusEvent::CatDetected { cat: true });
    }

    #[test]
    fn should_not_panic_when_no_subscribers() {
        let bus = StatusBroadcaster::new(16);
        bus.sensors_changed();
        bus.arming_status_changed(ArmingStatus::ArmedAway);
    }

    #[tokio::test]
    async fn should_not_deliver_events_published_before_subscription() {
        let bus = StatusBroadcaster::new(16);
        bus.sensors_changed();

        let mut rx = bus.subscribe();
        bus.arming_status_changed(ArmingStatus::ArmedHome);

        let received = rx.recv().await.unwrap();
        assert_eq!(
            received,
            StatusEvent::ArmingStatusChanged {
                status: ArmingStatus::ArmedHome
            }
        );
    }

    #[test]
    fn should_preserve_publish_order() {
        let bus = StatusBroadcaster::new(16);
        let mut rx = bus.subscribe();

        bus.alarm_status_changed(AlarmStatus::NoAlarm);
        bus.arming_status_changed(ArmingStatus::Disarmed);

        assert_eq!(
            rx.try_recv().unwrap(),
            StatusEvent::AlarmStatusChanged {
                status: AlarmStatus::NoAlarm
            }
        );
        assert_eq!(
            rx.try_recv().unwrap(),
            StatusEvent::ArmingStatusChanged {
                status: ArmingStatus::Disarmed
            }
        );
        assert!(rx.try_recv().is_err());
    }
}
