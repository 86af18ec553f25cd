//! Shell command grammar: one command per input line.

use std::path::PathBuf;
use std::str::FromStr;

use catpoint_domain::error::ValidationError;
use catpoint_domain::id::SensorId;
use catpoint_domain::sensor::SensorType;
use catpoint_domain::status::ArmingStatus;

pub const USAGE: &[&str] = &[
    "status                                  show arming and alarm status",
    "arm home | arm away | disarm            change the arming status",
    "sensors                                 list sensors",
    "sensor add <door|window|motion> <name>  add a sensor",
    "sensor remove <id>                      remove a sensor",
    "sensor on <id> | sensor off <id>        change a sensor's activation",
    "image <path>                            classify a camera frame",
    "help | quit",
];

/// A parsed shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Status,
    SetArming(ArmingStatus),
    Sensors,
    AddSensor {
        sensor_type: SensorType,
        name: String,
    },
    RemoveSensor(SensorId),
    SetSensor {
        id: SensorId,
        active: bool,
    },
    Image(PathBuf),
    Help,
    Quit,
}

/// Why a line could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,

    #[error("unknown command `{0}`, try `help`")]
    Unknown(String),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("invalid sensor id `{0}`")]
    InvalidSensorId(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

fn sensor_id(token: Option<&str>, usage: &'static str) -> Result<SensorId, CommandError> {
    let token = token.ok_or(CommandError::Usage(usage))?;
    SensorId::from_str(token).map_err(|_| CommandError::InvalidSensorId(token.to_string()))
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut tokens = line.split_whitespace();
        let head = tokens.next().ok_or(CommandError::Empty)?;

        let command = match head {
            "status" => Self::Status,
            "sensors" => Self::Sensors,
            "help" => Self::Help,
            "quit" | "exit" => Self::Quit,
            "disarm" => Self::SetArming(ArmingStatus::Disarmed),
            "arm" => match tokens.next() {
                Some("home") => Self::SetArming(ArmingStatus::ArmedHome),
                Some("away") => Self::SetArming(ArmingStatus::ArmedAway),
                _ => return Err(CommandError::Usage("arm home | arm away")),
            },
            "image" => {
                let path: Vec<&str> = tokens.by_ref().collect();
                if path.is_empty() {
                    return Err(CommandError::Usage("image <path>"));
                }
                Self::Image(PathBuf::from(path.join(" ")))
            }
            "sensor" => match tokens.next() {
                Some("add") => {
                    const ADD_USAGE: &str = "sensor add <door|window|motion> <name>";
                    let sensor_type: SensorType = tokens
                        .next()
                        .ok_or(CommandError::Usage(ADD_USAGE))?
                        .parse()?;
                    let name: Vec<&str> = tokens.by_ref().collect();
                    if name.is_empty() {
                        return Err(CommandError::Usage(ADD_USAGE));
                    }
                    Self::AddSensor {
                        sensor_type,
                        name: name.join(" "),
                    }
                }
                Some("remove") => {
                    Self::RemoveSensor(sensor_id(tokens.next(), "sensor remove <id>")?)
                }
                Some("on") => Self::SetSensor {
                    id: sensor_id(tokens.next(), "sensor on <id>")?,
                    active: true,
                },
                Some("off") => Self::SetSensor {
                    id: sensor_id(tokens.next(), "sensor off <id>")?,
                    active: false,
                },
                _ => return Err(CommandError::Usage("sensor add|remove|on|off ...")),
            },
            other => return Err(CommandError::Unknown(other.to_string())),
        };

        if tokens.next().is_some() {
            return Err(CommandError::Unknown(line.trim().to_string()));
        }
        Ok(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_arming_commands() {
        assert_eq!(
            "arm home".parse(),
            Ok(Command::SetArming(ArmingStatus::ArmedHome))
        );
        assert_eq!(
            "arm away".parse(),
            Ok(Command::SetArming(ArmingStatus::ArmedAway))
        );
        assert_eq!(
            "  disarm ".parse(),
            Ok(Command::SetArming(ArmingStatus::Disarmed))
        );
    }

    #[test]
    fn should_reject_arm_without_profile() {
        assert_eq!(
            "arm".parse::<Command>(),
            Err(CommandError::Usage("arm home | arm away"))
        );
    }

    #[test]
    fn should_parse_sensor_add_with_multi_word_name() {
        assert_eq!(
            "sensor add window Back  Bedroom Window".parse(),
            Ok(Command::AddSensor {
                sensor_type: SensorType::Window,
                name: "Back Bedroom Window".to_string(),
            })
        );
    }

    #[test]
    fn should_reject_unknown_sensor_type() {
        assert_eq!(
            "sensor add garage Door".parse::<Command>(),
            Err(CommandError::Validation(ValidationError::UnknownSensorType(
                "garage".to_string()
            )))
        );
    }

    #[test]
    fn should_parse_sensor_toggle() {
        let id = SensorId::new();
        assert_eq!(
            format!("sensor on {id}").parse(),
            Ok(Command::SetSensor { id, active: true })
        );
        assert_eq!(
            format!("sensor off {id}").parse(),
            Ok(Command::SetSensor { id, active: false })
        );
    }

    #[test]
    fn should_reject_malformed_sensor_id() {
        assert_eq!(
            "sensor remove 42".parse::<Command>(),
            Err(CommandError::InvalidSensorId("42".to_string()))
        );
    }

    #[test]
    fn should_parse_image_path() {
        assert_eq!(
            "image frames/cat 1.png".parse(),
            Ok(Command::Image(PathBuf::from("frames/cat 1.png")))
        );
    }

    #[test]
    fn should_reject_trailing_tokens() {
        assert!(matches!(
            "status now".parse::<Command>(),
            Err(CommandError::Unknown(_))
        ));
    }

    #[test]
    fn should_report_empty_and_unknown_lines() {
        assert_eq!("   ".parse::<Command>(), Err(CommandError::Empty));
        assert_eq!(
            "siren".parse::<Command>(),
            Err(CommandError::Unknown("siren".to_string()))
        );
    }
}
