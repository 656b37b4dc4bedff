//! # DriveKit Machine
//!
//! The typed front end over a protocol driver: a [`Machine`] owns the driver
//! for one controller and hands out thin device objects that build one
//! command, execute it, and unwrap one typed value.

pub mod device;
pub mod machine;

pub use device::input::{
    ColorSensor, GyroSensor, LineSensor, Rangefinder, RemoteControlReceiver, SoundSensor,
    TouchSensor,
};
pub use device::output::{Buzzer, Led, Motor, Servomotor};
pub use machine::Machine;
