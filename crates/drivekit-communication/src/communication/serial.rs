//! Serial port communicator
//!
//! Blocking serial transport for direct connection to robot controller
//! bridges over USB or Bluetooth-SPP device nodes.
//!
//! Supports:
//! - Port enumeration and discovery
//! - Baud rate, parity, and stop bit configuration
//! - Exact-length blocking reads bounded by a deadline

use crate::communication::{Communicator, ConnectionParams, SerialParity};
use drivekit_core::{ConnectionError, Result};
use parking_lot::Mutex;
use std::io::{Read, Write};
use std::time::{Duration, Instant};

/// Information about an available serial port
#[derive(Debug, Clone)]
pub struct SerialPortInfo {
    /// Port name (e.g., "/dev/ttyUSB0", "COM3")
    pub port_name: String,

    /// Port description (e.g., "USB Serial Port")
    pub description: String,

    /// Manufacturer name if available
    pub manufacturer: Option<String>,

    /// USB vendor ID if applicable
    pub vid: Option<u16>,

    /// USB product ID if applicable
    pub pid: Option<u16>,
}

/// List available serial ports on the system
///
/// Filters ports to the device-node patterns robot bridges show up under:
/// - Windows: COM* (e.g., COM1, COM3)
/// - Linux: /dev/ttyUSB*, /dev/ttyACM*, /dev/rfcomm*
/// - macOS: /dev/cu.usbserial-*, /dev/cu.usbmodem*
pub fn list_ports() -> Result<Vec<SerialPortInfo>> {
    match serialport::available_ports() {
        Ok(ports) => {
            let infos: Vec<SerialPortInfo> = ports
                .iter()
                .filter(|port| is_candidate_port(&port.port_name))
                .map(|port| {
                    let (manufacturer, vid, pid, description) = match &port.port_type {
                        serialport::SerialPortType::UsbPort(usb) => (
                            usb.manufacturer.clone(),
                            Some(usb.vid),
                            Some(usb.pid),
                            format!(
                                "USB {} {}",
                                usb.manufacturer.as_deref().unwrap_or("Device"),
                                usb.product.as_deref().unwrap_or("Serial Port")
                            ),
                        ),
                        serialport::SerialPortType::BluetoothPort => {
                            (None, None, None, "Bluetooth Serial".to_string())
                        }
                        _ => (None, None, None, "Serial Port".to_string()),
                    };
                    SerialPortInfo {
                        port_name: port.port_name.clone(),
                        description,
                        manufacturer,
                        vid,
                        pid,
                    }
                })
                .collect();
            Ok(infos)
        }
        Err(e) => {
            tracing::error!("failed to enumerate serial ports: {}", e);
            Err(ConnectionError::Io {
                reason: format!("failed to enumerate ports: {}", e),
            }
            .into())
        }
    }
}

/// Check if a port name matches the device-node patterns robot bridges use
fn is_candidate_port(port_name: &str) -> bool {
    // Windows COM ports
    if port_name.starts_with("COM") && port_name[3..].chars().all(|c| c.is_ascii_digit()) {
        return true;
    }

    // Linux USB, ACM, and Bluetooth RFCOMM devices
    if port_name.starts_with("/dev/ttyUSB")
        || port_name.starts_with("/dev/ttyACM")
        || port_name.starts_with("/dev/rfcomm")
    {
        return true;
    }

    // macOS serial and modem devices
    if port_name.starts_with("/dev/cu.usbserial-") || port_name.starts_with("/dev/cu.usbmodem") {
        return true;
    }

    false
}

fn to_serialport_parity(parity: SerialParity) -> serialport::Parity {
    match parity {
        SerialParity::None => serialport::Parity::None,
        SerialParity::Even => serialport::Parity::Even,
        SerialParity::Odd => serialport::Parity::Odd,
    }
}

// The underlying handle uses a short poll timeout; exact-read deadlines are
// enforced by the read loop, not by the serialport crate.
const POLL_TIMEOUT: Duration = Duration::from_millis(10);

trait ReadWrite: Read + Write + Send {}
impl<T: Read + Write + Send> ReadWrite for T {}

/// Serial communicator backed by the `serialport` crate
pub struct SerialCommunicator {
    params: ConnectionParams,
    port: Mutex<Option<Box<dyn ReadWrite>>>,
}

impl SerialCommunicator {
    /// Create an unopened communicator for the given parameters.
    pub fn new(params: ConnectionParams) -> Self {
        Self {
            params,
            port: Mutex::new(None),
        }
    }

    /// The parameters this communicator was created with.
    pub fn params(&self) -> &ConnectionParams {
        &self.params
    }

    fn build(&self) -> Result<Box<dyn ReadWrite>> {
        let builder = serialport::new(&self.params.port, self.params.baud_rate)
            .timeout(POLL_TIMEOUT)
            .data_bits(match self.params.data_bits {
                5 => serialport::DataBits::Five,
                6 => serialport::DataBits::Six,
                7 => serialport::DataBits::Seven,
                8 => serialport::DataBits::Eight,
                other => {
                    return Err(ConnectionError::FailedToOpen {
                        port: self.params.port.clone(),
                        reason: format!("invalid data bits: {}", other),
                    }
                    .into())
                }
            })
            .stop_bits(match self.params.stop_bits {
                1 => serialport::StopBits::One,
                2 => serialport::StopBits::Two,
                other => {
                    return Err(ConnectionError::FailedToOpen {
                        port: self.params.port.clone(),
                        reason: format!("invalid stop bits: {}", other),
                    }
                    .into())
                }
            })
            .parity(to_serialport_parity(self.params.parity));

        match builder.open_native() {
            Ok(port) => Ok(Box::new(port)),
            Err(e) => {
                tracing::warn!("failed to open serial port {}: {}", self.params.port, e);
                Err(ConnectionError::FailedToOpen {
                    port: self.params.port.clone(),
                    reason: e.to_string(),
                }
                .into())
            }
        }
    }
}

impl Communicator for SerialCommunicator {
    fn open(&mut self) -> Result<()> {
        let mut guard = self.port.lock();
        if guard.is_none() {
            *guard = Some(self.build()?);
            tracing::debug!(port = %self.params.port, "serial port opened");
        }
        Ok(())
    }

    fn close(&mut self) {
        // Dropping the handle releases the device node.
        if self.port.lock().take().is_some() {
            tracing::debug!(port = %self.params.port, "serial port closed");
        }
    }

    fn write(&mut self, data: &[u8], timeout: Duration) -> Result<()> {
        let mut guard = self.port.lock();
        let port = guard.as_mut().ok_or(ConnectionError::Io {
            reason: "port is not open".into(),
        })?;

        let deadline = Instant::now() + timeout;
        let mut written = 0;
        while written < data.len() {
            if Instant::now() >= deadline {
                return Err(ConnectionError::Timeout {
                    timeout_ms: timeout.as_millis() as u64,
                }
                .into());
            }
            match port.write(&data[written..]) {
                Ok(n) => written += n,
                Err(e) if e.kind() == std::io::ErrorKind::TimedOut => continue,
                Err(e) => {
                    return Err(ConnectionError::Io {
                        reason: e.to_string(),
                    }
                    .into())
                }
            }
        }
        port.flush().map_err(|e| ConnectionError::Io {
            reason: e.to_string(),
        })?;
        tracing::trace!(bytes = data.len(), "serial write");
        Ok(())
    }

    fn read_exact(&mut self, n: usize, timeout: Duration) -> Result<Vec<u8>> {
        let mut guard = self.port.lock();
        let port = guard.as_mut().ok_or(ConnectionError::Io {
            reason: "port is not open".into(),
        })?;

        let deadline = Instant::now() + timeout;
        let mut buf = vec![0u8; n];
        let mut filled = 0;
        while filled < n {
            if Instant::now() >= deadline {
                return Err(ConnectionError::Timeout {
                    timeout_ms: timeout.as_millis() as u64,
                }
                .into());
            }
            match port.read(&mut buf[filled..]) {
                Ok(0) => {
                    return Err(ConnectionError::Io {
                        reason: "port closed mid-read".into(),
                    }
                    .into())
                }
                Ok(read) => filled += read,
                Err(e) if e.kind() == std::io::ErrorKind::TimedOut => continue,
                Err(e) => {
                    return Err(ConnectionError::Io {
                        reason: e.to_string(),
                    }
                    .into())
                }
            }
        }
        tracing::trace!(bytes = n, "serial read");
        Ok(buf)
    }
}
