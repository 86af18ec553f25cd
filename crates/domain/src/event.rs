//! Status events: observer notifications expressed as plain values.
//!
//! The engine talks to observers through callbacks; hosts that prefer a
//! channel receive the same notifications as [`StatusEvent`]s.

use serde::{Deserialize, Serialize};

use crate::status::{AlarmStatus, ArmingStatus};

/// One notification emitted by the decision engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StatusEvent {
    AlarmStatusChanged { status: AlarmStatus },
    ArmingStatusChanged { status: ArmingStatus },
    CatDetected { cat: bool },
    SensorsChanged,
}
