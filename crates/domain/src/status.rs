//! Arming and alarm statuses: the two externally observable state variables.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Whether the premises are watched, and under which profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArmingStatus {
    #[default]
    Disarmed,
    ArmedHome,
    ArmedAway,
}

impl ArmingStatus {
    /// `true` for [`ArmedHome`](Self::ArmedHome) and [`ArmedAway`](Self::ArmedAway).
    #[must_use]
    pub fn is_armed(self) -> bool {
        match self {
            Self::Disarmed => false,
            Self::ArmedHome | Self::ArmedAway => true,
        }
    }

    /// Stable machine spelling, used for storage and the command shell.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Disarmed => "disarmed",
            Self::ArmedHome => "armed_home",
            Self::ArmedAway => "armed_away",
        }
    }

    /// Human readable label shown to the user.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::Disarmed => "Disarmed",
            Self::ArmedHome => "Armed - At Home",
            Self::ArmedAway => "Armed - Away",
        }
    }
}

impl fmt::Display for ArmingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArmingStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "disarmed" => Ok(Self::Disarmed),
            "armed_home" => Ok(Self::ArmedHome),
            "armed_away" => Ok(Self::ArmedAway),
            other => Err(ValidationError::UnknownArmingStatus(other.to_string())),
        }
    }
}

/// Current alert level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlarmStatus {
    #[default]
    NoAlarm,
    PendingAlarm,
    Alarm,
}

impl AlarmStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NoAlarm => "no_alarm",
            Self::PendingAlarm => "pending_alarm",
            Self::Alarm => "alarm",
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::NoAlarm => "Cool and Good",
            Self::PendingAlarm => "I'm in Danger...",
            Self::Alarm => "Awooga!",
        }
    }
}

impl fmt::Display for AlarmStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlarmStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "no_alarm" => Ok(Self::NoAlarm),
            "pending_alarm" => Ok(Self::PendingAlarm),
            "alarm" => Ok(Self::Alarm),
            other => Err(ValidationError::UnknownAlarmStatus(other.to_string())),
        }
    }
}
