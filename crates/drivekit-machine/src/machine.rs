//! Machine front end
//!
//! A [`Machine`] owns one protocol driver behind a mutex (the driver itself
//! provides no serialization) and creates the typed device objects for its
//! connectors.

use crate::device::input::{
    ColorSensor, GyroSensor, LineSensor, Rangefinder, RemoteControlReceiver, SoundSensor,
    TouchSensor,
};
use crate::device::output::{Buzzer, Led, Motor, Servomotor};
use crate::device::DeviceHandle;
use drivekit_communication::{Platform, ProtocolDriver};
use drivekit_core::{Port, Result};
use parking_lot::Mutex;
use std::sync::Arc;

/// One connected robot controller
pub struct Machine {
    driver: Arc<Mutex<Box<dyn ProtocolDriver>>>,
}

impl Machine {
    /// Wrap a protocol driver. The machine owns the driver (and through it
    /// the communicator) until dropped.
    pub fn new(driver: Box<dyn ProtocolDriver>) -> Self {
        Self {
            driver: Arc::new(Mutex::new(driver)),
        }
    }

    /// The platform this machine speaks.
    pub fn platform(&self) -> Platform {
        self.driver.lock().platform()
    }

    /// Open the connection. Must precede any device operation.
    pub fn connect(&self) -> Result<()> {
        let mut driver = self.driver.lock();
        driver.open()?;
        tracing::debug!(platform = %driver.platform(), "machine connected");
        Ok(())
    }

    /// Close the connection. Idempotent.
    pub fn disconnect(&self) {
        let mut driver = self.driver.lock();
        driver.close();
        tracing::debug!(platform = %driver.platform(), "machine disconnected");
    }

    fn handle(&self, port: u8) -> Result<DeviceHandle> {
        Ok(DeviceHandle::new(Port::new(port)?, self.driver.clone()))
    }

    /// A motor on an output port.
    pub fn motor(&self, port: u8) -> Result<Motor> {
        Ok(Motor::new(self.handle(port)?))
    }

    /// A servomotor on an output port.
    pub fn servomotor(&self, port: u8) -> Result<Servomotor> {
        Ok(Servomotor::new(self.handle(port)?))
    }

    /// A buzzer on an output port.
    pub fn buzzer(&self, port: u8) -> Result<Buzzer> {
        Ok(Buzzer::new(self.handle(port)?))
    }

    /// An LED on an output port.
    pub fn led(&self, port: u8) -> Result<Led> {
        Ok(Led::new(self.handle(port)?))
    }

    /// A line sensor on an input port.
    pub fn line_sensor(&self, port: u8) -> Result<LineSensor> {
        Ok(LineSensor::new(self.handle(port)?))
    }

    /// A gyro sensor on an input port.
    pub fn gyro_sensor(&self, port: u8) -> Result<GyroSensor> {
        Ok(GyroSensor::new(self.handle(port)?))
    }

    /// A touch sensor on an input port.
    pub fn touch_sensor(&self, port: u8) -> Result<TouchSensor> {
        Ok(TouchSensor::new(self.handle(port)?))
    }

    /// A color sensor on an input port.
    pub fn color_sensor(&self, port: u8) -> Result<ColorSensor> {
        Ok(ColorSensor::new(self.handle(port)?))
    }

    /// A rangefinder on an input port.
    pub fn rangefinder(&self, port: u8) -> Result<Rangefinder> {
        Ok(Rangefinder::new(self.handle(port)?))
    }

    /// A sound sensor on an input port.
    pub fn sound_sensor(&self, port: u8) -> Result<SoundSensor> {
        Ok(SoundSensor::new(self.handle(port)?))
    }

    /// A remote-control receiver on an input port.
    pub fn remote_receiver(&self, port: u8) -> Result<RemoteControlReceiver> {
        Ok(RemoteControlReceiver::new(self.handle(port)?))
    }
}
