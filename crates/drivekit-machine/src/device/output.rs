//! Output devices (actuators)

use crate::device::DeviceHandle;
use drivekit_core::{Command, CommandArgs, CommandKind, DeviceKind, Port, Result};

/// Plain motor
pub struct Motor {
    handle: DeviceHandle,
}

impl Motor {
    pub(crate) fn new(handle: DeviceHandle) -> Self {
        Self { handle }
    }

    /// The connector this motor sits on.
    pub fn port(&self) -> Port {
        self.handle.port()
    }

    /// This device's category.
    pub fn device_kind(&self) -> DeviceKind {
        DeviceKind::Motor
    }

    /// Set the motor's speed. Range limits are per-platform; the Pile board
    /// rejects speeds outside `-100..=100` before sending anything.
    pub fn set_speed(&self, speed: i32) -> Result<()> {
        let cmd = Command::new(CommandKind::SetMotorSpeed, CommandArgs::MotorSpeed { speed })?;
        self.handle.exec(&cmd)?;
        Ok(())
    }
}

/// Servomotor
pub struct Servomotor {
    handle: DeviceHandle,
}

impl Servomotor {
    pub(crate) fn new(handle: DeviceHandle) -> Self {
        Self { handle }
    }

    /// The connector this servomotor sits on.
    pub fn port(&self) -> Port {
        self.handle.port()
    }

    /// This device's category.
    pub fn device_kind(&self) -> DeviceKind {
        DeviceKind::Servo
    }

    /// The servomotor's current angle in degrees.
    pub fn angle(&self) -> Result<i32> {
        let cmd = Command::bare(CommandKind::GetServoAngle)?;
        Ok(self.handle.exec(&cmd)?.int(CommandKind::GetServoAngle)?)
    }

    /// Move the servomotor to an angle.
    pub fn set_angle(&self, angle: i32) -> Result<()> {
        let cmd = Command::new(CommandKind::SetServoAngle, CommandArgs::ServoAngle { angle })?;
        self.handle.exec(&cmd)?;
        Ok(())
    }
}

/// Buzzer
pub struct Buzzer {
    handle: DeviceHandle,
}

impl Buzzer {
    pub(crate) fn new(handle: DeviceHandle) -> Self {
        Self { handle }
    }

    /// The connector this buzzer sits on.
    pub fn port(&self) -> Port {
        self.handle.port()
    }

    /// This device's category.
    pub fn device_kind(&self) -> DeviceKind {
        DeviceKind::Buzzer
    }

    /// Emit a short beep.
    pub fn beep(&self) -> Result<()> {
        let cmd = Command::bare(CommandKind::SetBuzzerBeep)?;
        self.handle.exec(&cmd)?;
        Ok(())
    }

    /// Turn the buzzer on.
    pub fn on(&self) -> Result<()> {
        let cmd = Command::bare(CommandKind::SetBuzzerOn)?;
        self.handle.exec(&cmd)?;
        Ok(())
    }

    /// Turn the buzzer off.
    pub fn off(&self) -> Result<()> {
        let cmd = Command::bare(CommandKind::SetBuzzerOff)?;
        self.handle.exec(&cmd)?;
        Ok(())
    }
}

/// LED
pub struct Led {
    handle: DeviceHandle,
}

impl Led {
    pub(crate) fn new(handle: DeviceHandle) -> Self {
        Self { handle }
    }

    /// The connector this LED sits on.
    pub fn port(&self) -> Port {
        self.handle.port()
    }

    /// This device's category.
    pub fn device_kind(&self) -> DeviceKind {
        DeviceKind::Led
    }

    /// Turn the LED on.
    pub fn on(&self) -> Result<()> {
        let cmd = Command::bare(CommandKind::SetLedOn)?;
        self.handle.exec(&cmd)?;
        Ok(())
    }

    /// Turn the LED off.
    pub fn off(&self) -> Result<()> {
        let cmd = Command::bare(CommandKind::SetLedOff)?;
        self.handle.exec(&cmd)?;
        Ok(())
    }
}
