//! Platform protocol drivers
//!
//! Supported platforms:
//! - EV3: variable-length "direct command" bytecode with reply buffers
//! - NXT: legacy fixed-layout direct commands
//! - Pile: minimal checksummed packets for the Pile controller board
//!
//! Each driver implements [`ProtocolDriver`] over the communicator it owns.
//! There is no shared base state: the platform is selected once, at
//! construction, through [`create_driver`].

pub mod ev3;
pub mod nxt;
pub mod pile;

use crate::communication::Communicator;
use drivekit_core::{Command, CommandError, ExecResult, Result, PORT_MAX};
use std::fmt;

/// Supported robot controller platforms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Platform {
    /// EV3-style controller (default, most common)
    #[default]
    Ev3,
    /// NXT-style legacy controller
    Nxt,
    /// Pile custom controller board
    Pile,
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ev3 => write!(f, "EV3"),
            Self::Nxt => write!(f, "NXT"),
            Self::Pile => write!(f, "Pile"),
        }
    }
}

/// A protocol driver: the single entry point the device layer talks to
///
/// Every implementation validates the port before doing any I/O, dispatches
/// purely on the command kind, and performs strictly sequential
/// write-then-read exchanges over its communicator. A failure terminates the
/// current `exec` call without partially populating the result.
pub trait ProtocolDriver: Send {
    /// Open the underlying communicator.
    fn open(&mut self) -> Result<()>;

    /// Close the underlying communicator. Idempotent.
    fn close(&mut self);

    /// Execute one abstract command against a device on `port`.
    fn exec(&mut self, port: u8, command: &Command) -> Result<ExecResult>;

    /// The platform this driver speaks.
    fn platform(&self) -> Platform;
}

/// Construct the driver for a platform over the given communicator
///
/// The communicator is exclusively owned by the returned driver for the
/// connection's lifetime.
pub fn create_driver(platform: Platform, comm: Box<dyn Communicator>) -> Box<dyn ProtocolDriver> {
    match platform {
        Platform::Ev3 => Box::new(ev3::Ev3Driver::new(comm)),
        Platform::Nxt => Box::new(nxt::NxtDriver::new(comm)),
        Platform::Pile => Box::new(pile::PileDriver::new(comm)),
    }
}

/// Reject out-of-range ports before any I/O happens.
pub(crate) fn ensure_port(port: u8) -> Result<()> {
    if port > PORT_MAX {
        return Err(CommandError::InvalidPort {
            port: i32::from(port),
        }
        .into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::communication::NoOpCommunicator;

    #[test]
    fn factory_selects_the_platform() {
        for platform in [Platform::Ev3, Platform::Nxt, Platform::Pile] {
            let driver = create_driver(platform, Box::new(NoOpCommunicator::new()));
            assert_eq!(driver.platform(), platform);
        }
    }

    #[test]
    fn platform_names() {
        assert_eq!(Platform::Ev3.to_string(), "EV3");
        assert_eq!(Platform::Nxt.to_string(), "NXT");
        assert_eq!(Platform::Pile.to_string(), "Pile");
    }
}
