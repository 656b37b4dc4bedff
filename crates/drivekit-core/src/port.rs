//! Physical connector numbering

use crate::error::CommandError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lowest valid connector number.
pub const PORT_MIN: u8 = 0;
/// Highest valid connector number.
pub const PORT_MAX: u8 = 3;

/// A physical connector on the controller, numbered `0..=3`
///
/// Some platforms remap the logical number to a hardware bitmask or offset;
/// that remapping belongs to the platform driver, never to this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Port(u8);

impl Port {
    /// Validate and wrap a connector number.
    pub fn new(index: u8) -> Result<Self, CommandError> {
        if index > PORT_MAX {
            return Err(CommandError::InvalidPort {
                port: i32::from(index),
            });
        }
        Ok(Self(index))
    }

    /// The logical connector number.
    pub fn index(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "port {}", self.0)
    }
}
