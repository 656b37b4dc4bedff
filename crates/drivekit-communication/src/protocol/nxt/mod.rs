//! NXT-style protocol
//!
//! Legacy fixed-layout direct commands: every opcode has a statically known
//! parameter layout and a fixed-size reply. The codec in [`codec`] is pure;
//! [`driver`] performs the two-step sensor exchanges.

pub mod codec;
pub mod driver;

pub use driver::NxtDriver;
