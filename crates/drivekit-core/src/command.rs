//! Abstract command vocabulary
//!
//! One closed set of device operations shared by every platform driver. A
//! [`Command`] pairs a [`CommandKind`] with the arguments that kind requires;
//! the factory validates the pairing so a driver never sees a command with a
//! missing or stray argument.

use crate::error::CommandError;
use crate::DeviceKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Abstract device operations understood by the dispatch layer
///
/// Stable across platforms; not every platform implements every kind. What an
/// unimplemented kind does (error out or produce an empty result) is a
/// documented per-platform policy, not a property of the kind itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CommandKind {
    /// Read reflected-light intensity from a color sensor
    GetColorIlluminance,
    /// Read raw RGB channels from a color sensor
    GetColorRgb,
    /// Read accumulated rotation angle from a gyro sensor
    GetGyroAngle,
    /// Read rotation rate from a gyro sensor
    GetGyroRate,
    /// Read a line (reflectance) sensor
    GetLineValue,
    /// Read distance from a rangefinder
    GetRangefinderDistance,
    /// Read the pushed-button code from a remote-control receiver
    GetRemoteButton,
    /// Read distance to the remote controller
    GetRemoteDistance,
    /// Read the current angle of a servomotor
    GetServoAngle,
    /// Read sound level in decibels
    GetSoundDb,
    /// Read the bump count of a touch sensor
    GetTouchCount,
    /// Read whether a touch sensor is currently pressed
    GetTouchTouched,
    /// Emit a short beep
    SetBuzzerBeep,
    /// Turn a buzzer off
    SetBuzzerOff,
    /// Turn a buzzer on
    SetBuzzerOn,
    /// Turn an LED off
    SetLedOff,
    /// Turn an LED on
    SetLedOn,
    /// Set a motor's speed
    SetMotorSpeed,
    /// Move a servomotor to an angle
    SetServoAngle,
}

impl CommandKind {
    /// The device category this operation applies to
    pub fn device_kind(&self) -> DeviceKind {
        match self {
            Self::GetColorIlluminance | Self::GetColorRgb => DeviceKind::Color,
            Self::GetGyroAngle | Self::GetGyroRate => DeviceKind::Gyro,
            Self::GetLineValue => DeviceKind::Line,
            Self::GetRangefinderDistance => DeviceKind::Rangefinder,
            Self::GetRemoteButton | Self::GetRemoteDistance => DeviceKind::RemoteReceiver,
            Self::GetServoAngle | Self::SetServoAngle => DeviceKind::Servo,
            Self::GetSoundDb => DeviceKind::Sound,
            Self::GetTouchCount | Self::GetTouchTouched => DeviceKind::Touch,
            Self::SetBuzzerBeep | Self::SetBuzzerOff | Self::SetBuzzerOn => DeviceKind::Buzzer,
            Self::SetLedOff | Self::SetLedOn => DeviceKind::Led,
            Self::SetMotorSpeed => DeviceKind::Motor,
        }
    }

    fn requires_speed(&self) -> bool {
        matches!(self, Self::SetMotorSpeed)
    }

    fn requires_angle(&self) -> bool {
        matches!(self, Self::SetServoAngle)
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::GetColorIlluminance => "GET_COLOR_ILLUMINANCE",
            Self::GetColorRgb => "GET_COLOR_RGB",
            Self::GetGyroAngle => "GET_GYRO_ANGLE",
            Self::GetGyroRate => "GET_GYRO_RATE",
            Self::GetLineValue => "GET_LINE_VALUE",
            Self::GetRangefinderDistance => "GET_RANGEFINDER_DIST",
            Self::GetRemoteButton => "GET_REMOTECONTROLLER_BUTTON",
            Self::GetRemoteDistance => "GET_REMOTECONTROLLER_DIST",
            Self::GetServoAngle => "GET_SERVO_ANGLE",
            Self::GetSoundDb => "GET_SOUND_DB",
            Self::GetTouchCount => "GET_TOUCH_COUNT",
            Self::GetTouchTouched => "GET_TOUCH_TOUCHED",
            Self::SetBuzzerBeep => "SET_BUZZER_BEEP",
            Self::SetBuzzerOff => "SET_BUZZER_OFF",
            Self::SetBuzzerOn => "SET_BUZZER_ON",
            Self::SetLedOff => "SET_LED_OFF",
            Self::SetLedOn => "SET_LED_ON",
            Self::SetMotorSpeed => "SET_MOTOR_SPEED",
            Self::SetServoAngle => "SET_SERVO_ANGLE",
        };
        write!(f, "{}", name)
    }
}

/// Arguments attached to a command
///
/// Tagged union standing in for the dynamic name→value map of looser
/// implementations: the argument shape is decided once, at the factory
/// boundary, and drivers read it without runtime casts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommandArgs {
    /// The command takes no arguments
    None,
    /// Motor speed, signed percent
    MotorSpeed {
        /// Requested speed. Range checks are per-platform.
        speed: i32,
    },
    /// Servomotor target angle in degrees
    ServoAngle {
        /// Requested angle.
        angle: i32,
    },
}

/// An abstract command: one operation plus its arguments
///
/// Immutable once built. Created fresh per call and owned by the calling
/// device object for the duration of one `exec`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    kind: CommandKind,
    args: CommandArgs,
}

impl Command {
    /// Build a command, validating that `args` carries exactly what `kind`
    /// requires.
    pub fn new(kind: CommandKind, args: CommandArgs) -> Result<Self, CommandError> {
        match args {
            CommandArgs::None => {
                if kind.requires_speed() {
                    return Err(CommandError::MissingArgument {
                        kind: kind.to_string(),
                        name: "speed".into(),
                    });
                }
                if kind.requires_angle() {
                    return Err(CommandError::MissingArgument {
                        kind: kind.to_string(),
                        name: "angle".into(),
                    });
                }
            }
            CommandArgs::MotorSpeed { .. } => {
                if !kind.requires_speed() {
                    return Err(CommandError::UnexpectedArgument {
                        kind: kind.to_string(),
                        name: "speed".into(),
                    });
                }
            }
            CommandArgs::ServoAngle { .. } => {
                if !kind.requires_angle() {
                    return Err(CommandError::UnexpectedArgument {
                        kind: kind.to_string(),
                        name: "angle".into(),
                    });
                }
            }
        }
        Ok(Self { kind, args })
    }

    /// Shorthand for argument-less commands.
    pub fn bare(kind: CommandKind) -> Result<Self, CommandError> {
        Self::new(kind, CommandArgs::None)
    }

    /// The operation this command performs
    pub fn kind(&self) -> CommandKind {
        self.kind
    }

    /// The device category this command applies to
    pub fn device_kind(&self) -> DeviceKind {
        self.kind.device_kind()
    }

    /// The motor speed argument, if this command carries one
    ///
    /// Drivers call this at dispatch; a `None` on a motor command means the
    /// command was built outside the factory and is a defect.
    pub fn motor_speed(&self) -> Result<i32, CommandError> {
        match self.args {
            CommandArgs::MotorSpeed { speed } => Ok(speed),
            _ => Err(CommandError::MissingArgument {
                kind: self.kind.to_string(),
                name: "speed".into(),
            }),
        }
    }

    /// The servo angle argument, if this command carries one
    pub fn servo_angle(&self) -> Result<i32, CommandError> {
        match self.args {
            CommandArgs::ServoAngle { angle } => Ok(angle),
            _ => Err(CommandError::MissingArgument {
                kind: self.kind.to_string(),
                name: "angle".into(),
            }),
        }
    }
}
