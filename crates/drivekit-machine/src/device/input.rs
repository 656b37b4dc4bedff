//! Input devices (sensors)
//!
//! Each getter builds one command, executes it through the shared driver
//! handle, and unwraps the single typed value from the result.

use crate::device::DeviceHandle;
use drivekit_core::{Command, CommandKind, DeviceKind, Port, Result};

/// Gyro sensor
pub struct GyroSensor {
    handle: DeviceHandle,
}

impl GyroSensor {
    pub(crate) fn new(handle: DeviceHandle) -> Self {
        Self { handle }
    }

    /// The connector this sensor sits on.
    pub fn port(&self) -> Port {
        self.handle.port()
    }

    /// This device's category.
    pub fn device_kind(&self) -> DeviceKind {
        DeviceKind::Gyro
    }

    /// Rotation rate in degrees per second.
    pub fn rate(&self) -> Result<i32> {
        let cmd = Command::bare(CommandKind::GetGyroRate)?;
        Ok(self.handle.exec(&cmd)?.int(CommandKind::GetGyroRate)?)
    }

    /// Accumulated rotation angle in degrees.
    pub fn angle(&self) -> Result<i32> {
        let cmd = Command::bare(CommandKind::GetGyroAngle)?;
        Ok(self.handle.exec(&cmd)?.int(CommandKind::GetGyroAngle)?)
    }
}

/// Touch sensor
pub struct TouchSensor {
    handle: DeviceHandle,
}

impl TouchSensor {
    pub(crate) fn new(handle: DeviceHandle) -> Self {
        Self { handle }
    }

    /// The connector this sensor sits on.
    pub fn port(&self) -> Port {
        self.handle.port()
    }

    /// This device's category.
    pub fn device_kind(&self) -> DeviceKind {
        DeviceKind::Touch
    }

    /// Whether the sensor is currently pressed.
    pub fn is_touched(&self) -> Result<bool> {
        let cmd = Command::bare(CommandKind::GetTouchTouched)?;
        Ok(self.handle.exec(&cmd)?.bool(CommandKind::GetTouchTouched)?)
    }

    /// How many times the sensor has been bumped.
    pub fn touch_count(&self) -> Result<i32> {
        let cmd = Command::bare(CommandKind::GetTouchCount)?;
        Ok(self.handle.exec(&cmd)?.int(CommandKind::GetTouchCount)?)
    }
}

/// Color sensor
pub struct ColorSensor {
    handle: DeviceHandle,
}

impl ColorSensor {
    pub(crate) fn new(handle: DeviceHandle) -> Self {
        Self { handle }
    }

    /// The connector this sensor sits on.
    pub fn port(&self) -> Port {
        self.handle.port()
    }

    /// This device's category.
    pub fn device_kind(&self) -> DeviceKind {
        DeviceKind::Color
    }

    /// Reflected-light intensity in percent.
    pub fn illuminance(&self) -> Result<i32> {
        let cmd = Command::bare(CommandKind::GetColorIlluminance)?;
        Ok(self.handle.exec(&cmd)?.int(CommandKind::GetColorIlluminance)?)
    }

    /// Raw RGB channels.
    pub fn rgb(&self) -> Result<Vec<f32>> {
        let cmd = Command::bare(CommandKind::GetColorRgb)?;
        Ok(self.handle.exec(&cmd)?.floats(CommandKind::GetColorRgb)?)
    }
}

/// Line (reflectance) sensor
pub struct LineSensor {
    handle: DeviceHandle,
}

impl LineSensor {
    pub(crate) fn new(handle: DeviceHandle) -> Self {
        Self { handle }
    }

    /// The connector this sensor sits on.
    pub fn port(&self) -> Port {
        self.handle.port()
    }

    /// This device's category.
    pub fn device_kind(&self) -> DeviceKind {
        DeviceKind::Line
    }

    /// Current reflectance reading.
    pub fn value(&self) -> Result<i32> {
        let cmd = Command::bare(CommandKind::GetLineValue)?;
        Ok(self.handle.exec(&cmd)?.int(CommandKind::GetLineValue)?)
    }
}

/// Distance rangefinder
pub struct Rangefinder {
    handle: DeviceHandle,
}

impl Rangefinder {
    pub(crate) fn new(handle: DeviceHandle) -> Self {
        Self { handle }
    }

    /// The connector this sensor sits on.
    pub fn port(&self) -> Port {
        self.handle.port()
    }

    /// This device's category.
    pub fn device_kind(&self) -> DeviceKind {
        DeviceKind::Rangefinder
    }

    /// Distance to the nearest obstacle in centimeters.
    pub fn distance(&self) -> Result<i32> {
        let cmd = Command::bare(CommandKind::GetRangefinderDistance)?;
        Ok(self
            .handle
            .exec(&cmd)?
            .int(CommandKind::GetRangefinderDistance)?)
    }
}

/// Sound sensor
pub struct SoundSensor {
    handle: DeviceHandle,
}

impl SoundSensor {
    pub(crate) fn new(handle: DeviceHandle) -> Self {
        Self { handle }
    }

    /// The connector this sensor sits on.
    pub fn port(&self) -> Port {
        self.handle.port()
    }

    /// This device's category.
    pub fn device_kind(&self) -> DeviceKind {
        DeviceKind::Sound
    }

    /// Sound level in decibels.
    pub fn db(&self) -> Result<i32> {
        let cmd = Command::bare(CommandKind::GetSoundDb)?;
        Ok(self.handle.exec(&cmd)?.int(CommandKind::GetSoundDb)?)
    }
}

/// Remote-control receiver
pub struct RemoteControlReceiver {
    handle: DeviceHandle,
}

impl RemoteControlReceiver {
    pub(crate) fn new(handle: DeviceHandle) -> Self {
        Self { handle }
    }

    /// The connector this receiver sits on.
    pub fn port(&self) -> Port {
        self.handle.port()
    }

    /// This device's category.
    pub fn device_kind(&self) -> DeviceKind {
        DeviceKind::RemoteReceiver
    }

    /// Code of the button pushed on the controller.
    pub fn button(&self) -> Result<i32> {
        let cmd = Command::bare(CommandKind::GetRemoteButton)?;
        Ok(self.handle.exec(&cmd)?.int(CommandKind::GetRemoteButton)?)
    }

    /// Distance between this receiver and the controller in centimeters.
    pub fn distance(&self) -> Result<i32> {
        let cmd = Command::bare(CommandKind::GetRemoteDistance)?;
        Ok(self.handle.exec(&cmd)?.int(CommandKind::GetRemoteDistance)?)
    }
}
