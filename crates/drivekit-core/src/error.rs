//! Error handling for DriveKit
//!
//! Provides error types for all layers of the stack:
//! - Command errors (bad ports, bad arguments, result-shape mismatches)
//! - Protocol errors (unsupported operations, malformed replies)
//! - Connection errors (transport open/read/write failures)
//!
//! All error types use `thiserror` for ergonomic error handling.
//! Command errors are precondition violations: they are raised before any
//! bytes cross the wire and are never retried.

use thiserror::Error;

/// Command error type
///
/// Precondition violations and result-shape mismatches detected at the
/// command/device boundary, always before any transport I/O.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommandError {
    /// Port outside the valid connector range
    #[error("port {port} out of range (expected 0..=3)")]
    InvalidPort {
        /// The rejected port number.
        port: i32,
    },

    /// Motor speed outside the accepted input domain
    #[error("motor speed {speed} out of range (expected -100..=100)")]
    SpeedOutOfRange {
        /// The rejected speed value.
        speed: i32,
    },

    /// The command kind requires an argument that was not supplied
    #[error("command {kind} requires argument '{name}'")]
    MissingArgument {
        /// The command kind being built or dispatched.
        kind: String,
        /// The name of the missing argument.
        name: String,
    },

    /// The command kind takes no argument of this shape
    #[error("command {kind} does not take argument '{name}'")]
    UnexpectedArgument {
        /// The command kind being built.
        kind: String,
        /// The name of the unexpected argument.
        name: String,
    },

    /// A typed extractor was called on an empty result
    #[error("command {kind} produced no result on this platform")]
    EmptyResult {
        /// The command kind that was executed.
        kind: String,
    },

    /// A typed extractor was called on a result of another shape
    #[error("expected a {expected} result, got {actual}")]
    ValueType {
        /// The expected value shape.
        expected: &'static str,
        /// The shape actually carried by the result.
        actual: &'static str,
    },
}

/// Protocol error type
///
/// Errors raised by a protocol driver while translating or executing a
/// command against its platform.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProtocolError {
    /// The platform does not implement this command kind
    #[error("{kind} is not implemented by the {platform} protocol")]
    Unsupported {
        /// The platform that rejected the command.
        platform: String,
        /// The command kind that is not implemented.
        kind: String,
    },

    /// The reply did not match the platform's wire layout
    #[error("malformed {platform} reply: {reason}")]
    MalformedReply {
        /// The platform whose reply could not be parsed.
        platform: String,
        /// What was wrong with the reply.
        reason: String,
    },

    /// `exec` was called outside the open/close window
    #[error("protocol driver is not connected")]
    NotConnected,
}

/// Connection error type
///
/// Errors surfaced by the communicator: transport open failures, timed-out
/// exchanges, and raw I/O faults.
#[derive(Error, Debug, Clone)]
pub enum ConnectionError {
    /// Named port does not exist on this system
    #[error("port not found: {port}")]
    PortNotFound {
        /// The name of the port that was not found.
        port: String,
    },

    /// Transport could not be opened
    #[error("failed to open {port}: {reason}")]
    FailedToOpen {
        /// The name of the port that failed to open.
        port: String,
        /// The reason the port failed to open.
        reason: String,
    },

    /// A read or write did not complete in time
    #[error("transport operation timed out after {timeout_ms}ms")]
    Timeout {
        /// The timeout duration in milliseconds.
        timeout_ms: u64,
    },

    /// No candidate ports were found during enumeration
    #[error("no serial ports found")]
    NoPortsFound,

    /// Raw transport I/O error
    #[error("I/O error: {reason}")]
    Io {
        /// The reason for the I/O error.
        reason: String,
    },
}

/// Main error type for DriveKit
///
/// A unified error type covering every layer. This is the primary error type
/// used in public APIs.
#[derive(Error, Debug, Clone)]
pub enum Error {
    /// Command error
    #[error(transparent)]
    Command(#[from] CommandError),

    /// Protocol error
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// Connection error
    #[error(transparent)]
    Connection(#[from] ConnectionError),
}

impl Error {
    /// Check if this is a transport timeout
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Connection(ConnectionError::Timeout { .. }))
    }

    /// Check if this is an unsupported-operation error
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Error::Protocol(ProtocolError::Unsupported { .. }))
    }

    /// Check if this is a precondition violation raised before any I/O
    pub fn is_precondition(&self) -> bool {
        matches!(self, Error::Command(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
