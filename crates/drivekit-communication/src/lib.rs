//! # DriveKit Communication
//!
//! The byte-stream communicator contract with its serial implementation, and
//! the three platform protocol drivers (EV3, NXT, Pile) that translate the
//! abstract command vocabulary into each platform's wire format.

pub mod communication;
pub mod protocol;

pub use communication::{
    serial::{list_ports, SerialCommunicator, SerialPortInfo},
    Communicator, ConnectionParams, NoOpCommunicator, SerialParity,
};

pub use protocol::{
    create_driver, ev3::Ev3Driver, nxt::NxtDriver, pile::PileDriver, Platform, ProtocolDriver,
};
