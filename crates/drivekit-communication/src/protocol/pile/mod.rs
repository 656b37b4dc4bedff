//! Pile board protocol
//!
//! Minimal checksummed packets for the Pile custom controller board: short
//! requests, fixed 4-byte replies. The codec in [`packet`] is pure;
//! [`driver`] wires it to the communicator.

pub mod driver;
pub mod packet;

pub use driver::PileDriver;
