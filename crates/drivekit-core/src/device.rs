//! Device categories

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sensor and actuator categories
///
/// Used for documentation and validation only; dispatch is always on
/// [`CommandKind`](crate::CommandKind).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviceKind {
    /// Gyro sensor
    Gyro,
    /// Touch sensor
    Touch,
    /// Color sensor
    Color,
    /// Plain motor
    Motor,
    /// Servomotor
    Servo,
    /// Sound (dB) sensor
    Sound,
    /// Distance rangefinder
    Rangefinder,
    /// Remote-control receiver
    RemoteReceiver,
    /// Buzzer
    Buzzer,
    /// LED
    Led,
    /// Line (reflectance) sensor
    Line,
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gyro => write!(f, "gyro sensor"),
            Self::Touch => write!(f, "touch sensor"),
            Self::Color => write!(f, "color sensor"),
            Self::Motor => write!(f, "motor"),
            Self::Servo => write!(f, "servomotor"),
            Self::Sound => write!(f, "sound sensor"),
            Self::Rangefinder => write!(f, "rangefinder"),
            Self::RemoteReceiver => write!(f, "remote-control receiver"),
            Self::Buzzer => write!(f, "buzzer"),
            Self::Led => write!(f, "LED"),
            Self::Line => write!(f, "line sensor"),
        }
    }
}
