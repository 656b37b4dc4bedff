//! # DriveKit
//!
//! One vocabulary of device operations for three heterogeneous robot
//! controller platforms. The workspace crates are re-exported here so an
//! application can depend on `drivekit` alone:
//!
//! ```no_run
//! use drivekit::{create_driver, ConnectionParams, Machine, Platform, SerialCommunicator};
//!
//! # fn main() -> drivekit::Result<()> {
//! let comm = SerialCommunicator::new(ConnectionParams::for_port("/dev/rfcomm0"));
//! let machine = Machine::new(create_driver(Platform::Ev3, Box::new(comm)));
//!
//! machine.connect()?;
//! let gyro = machine.gyro_sensor(1)?;
//! let _angle = gyro.angle()?;
//! machine.disconnect();
//! # Ok(())
//! # }
//! ```

pub use drivekit_core::{
    Command, CommandArgs, CommandError, CommandKind, ConnectionError, DeviceKind, Error,
    ExecResult, Port, ProtocolError, Result, Value,
};

pub use drivekit_communication::{
    communication, create_driver, list_ports, protocol, Communicator, ConnectionParams,
    NoOpCommunicator, Platform, ProtocolDriver, SerialCommunicator,
};

pub use drivekit_machine::{device, Machine};
