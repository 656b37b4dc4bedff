//! # DriveKit Core
//!
//! Core types for DriveKit: the abstract command vocabulary shared by every
//! platform driver, the normalized result values, connector numbering, and
//! the error taxonomy.

pub mod command;
pub mod device;
pub mod error;
pub mod port;
pub mod value;

pub use command::{Command, CommandArgs, CommandKind};
pub use device::DeviceKind;
pub use error::{CommandError, ConnectionError, Error, ProtocolError, Result};
pub use port::{Port, PORT_MAX, PORT_MIN};
pub use value::{ExecResult, Value};
