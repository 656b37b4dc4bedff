//! Byte-stream transport abstraction
//!
//! A communicator is a blocking byte stream with an explicit open/close
//! lifecycle. Protocol drivers own exactly one communicator for the lifetime
//! of a connection and perform strictly sequential write-then-read exchanges
//! over it, each bounded by a timeout.

pub mod serial;
pub mod testing;

use drivekit_core::{ConnectionError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Blocking byte-stream transport
///
/// `read_exact` must return exactly `n` bytes or fail; short reads are never
/// surfaced to callers. Timeout expiry is a recoverable
/// [`ConnectionError::Timeout`], not retried internally.
pub trait Communicator: Send {
    /// Open the transport. Calling `exec` on a driver before this is a
    /// precondition violation.
    fn open(&mut self) -> Result<()>;

    /// Close the transport. Idempotent.
    fn close(&mut self);

    /// Write the whole buffer within `timeout`.
    fn write(&mut self, data: &[u8], timeout: Duration) -> Result<()>;

    /// Read exactly `n` bytes within `timeout`.
    fn read_exact(&mut self, n: usize, timeout: Duration) -> Result<Vec<u8>>;
}

/// Serial parity setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SerialParity {
    /// No parity bit
    #[default]
    None,
    /// Even parity
    Even,
    /// Odd parity
    Odd,
}

/// Connection parameters for a serial communicator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionParams {
    /// Port name (e.g., "/dev/ttyUSB0", "COM3")
    pub port: String,
    /// Baud rate
    pub baud_rate: u32,
    /// Data bits (5-8)
    pub data_bits: u8,
    /// Stop bits (1-2)
    pub stop_bits: u8,
    /// Parity
    pub parity: SerialParity,
    /// Per-exchange timeout in milliseconds
    pub timeout_ms: u64,
}

impl Default for ConnectionParams {
    fn default() -> Self {
        Self {
            port: String::new(),
            baud_rate: 115_200,
            data_bits: 8,
            stop_bits: 1,
            parity: SerialParity::None,
            timeout_ms: 1000,
        }
    }
}

impl ConnectionParams {
    /// Parameters for a named port with everything else at defaults.
    pub fn for_port(port: impl Into<String>) -> Self {
        Self {
            port: port.into(),
            ..Self::default()
        }
    }

    /// Parse parameters from a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| {
            ConnectionError::Io {
                reason: format!("bad connection parameters: {}", e),
            }
            .into()
        })
    }

    /// Serialize parameters to a JSON document.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ConnectionError::Io {
                reason: format!("failed to serialize connection parameters: {}", e),
            }
            .into()
        })
    }
}

/// Inert communicator
///
/// Accepts everything and returns nothing; useful as a placeholder before a
/// real transport is attached.
#[derive(Debug, Default)]
pub struct NoOpCommunicator {
    open: bool,
}

impl NoOpCommunicator {
    /// Create a new inert communicator
    pub fn new() -> Self {
        Self::default()
    }
}

impl Communicator for NoOpCommunicator {
    fn open(&mut self) -> Result<()> {
        self.open = true;
        Ok(())
    }

    fn close(&mut self) {
        self.open = false;
    }

    fn write(&mut self, _data: &[u8], _timeout: Duration) -> Result<()> {
        Ok(())
    }

    fn read_exact(&mut self, _n: usize, timeout: Duration) -> Result<Vec<u8>> {
        Err(ConnectionError::Timeout {
            timeout_ms: timeout.as_millis() as u64,
        }
        .into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connection_params_json_round_trip() {
        let params = ConnectionParams {
            port: "/dev/ttyACM0".into(),
            baud_rate: 57_600,
            ..ConnectionParams::default()
        };
        let json = params.to_json().unwrap();
        assert_eq!(ConnectionParams::from_json(&json).unwrap(), params);
    }

    #[test]
    fn noop_communicator_never_yields_data() {
        let mut comm = NoOpCommunicator::new();
        comm.open().unwrap();
        comm.write(&[1, 2, 3], Duration::from_millis(10)).unwrap();
        let err = comm
            .read_exact(2, Duration::from_millis(10))
            .unwrap_err();
        assert!(err.is_timeout());
    }
}
