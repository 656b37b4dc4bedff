//! Device objects
//!
//! Every device is a port number plus a shared reference to the machine's
//! protocol driver. A device method builds one command, executes it, and
//! extracts one field from the result.

pub mod input;
pub mod output;

use drivekit_communication::ProtocolDriver;
use drivekit_core::{Command, ExecResult, Port, Result};
use parking_lot::Mutex;
use std::sync::Arc;

/// Shared base of every device object
#[derive(Clone)]
pub struct DeviceHandle {
    port: Port,
    driver: Arc<Mutex<Box<dyn ProtocolDriver>>>,
}

impl DeviceHandle {
    pub(crate) fn new(port: Port, driver: Arc<Mutex<Box<dyn ProtocolDriver>>>) -> Self {
        Self { port, driver }
    }

    /// The connector this device sits on.
    pub fn port(&self) -> Port {
        self.port
    }

    /// Execute one command against this device's port.
    pub(crate) fn exec(&self, command: &Command) -> Result<ExecResult> {
        self.driver.lock().exec(self.port.index(), command)
    }
}
