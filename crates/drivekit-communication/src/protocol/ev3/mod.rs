//! EV3-style protocol
//!
//! Variable-length "direct command" bytecode frames with reply-side global
//! buffers. The codec in [`bytecode`] is pure; [`driver`] wires it to the
//! communicator.

pub mod bytecode;
pub mod driver;
pub mod opcodes;

pub use driver::Ev3Driver;
