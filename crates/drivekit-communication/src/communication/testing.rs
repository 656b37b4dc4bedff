//! Scripted communicator for driver conformance tests
//!
//! Records every write and replays queued reply bytes. The communicator is
//! cheaply cloneable around a shared buffer, so a test can hand one clone to
//! a driver and keep another to script replies and inspect traffic, in
//! particular to assert that precondition failures happen before any
//! transport I/O.

use crate::communication::Communicator;
use drivekit_core::{ConnectionError, Result};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Default)]
struct Inner {
    writes: Vec<Vec<u8>>,
    replies: VecDeque<u8>,
    reads: usize,
    opens: usize,
    closes: usize,
}

/// A communicator that replays scripted replies and records all traffic
#[derive(Debug, Clone, Default)]
pub struct ScriptedCommunicator {
    inner: Arc<Mutex<Inner>>,
}

impl ScriptedCommunicator {
    /// Create an empty scripted communicator
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue reply bytes to be consumed by subsequent reads.
    pub fn queue_reply(&self, bytes: &[u8]) {
        self.inner.lock().replies.extend(bytes.iter().copied());
    }

    /// Every frame written so far, in order.
    pub fn writes(&self) -> Vec<Vec<u8>> {
        self.inner.lock().writes.clone()
    }

    /// Number of frames written so far.
    pub fn write_count(&self) -> usize {
        self.inner.lock().writes.len()
    }

    /// Total transport calls observed (writes plus read attempts).
    pub fn io_calls(&self) -> usize {
        let inner = self.inner.lock();
        inner.writes.len() + inner.reads
    }

    /// How many times `open` was called.
    pub fn open_count(&self) -> usize {
        self.inner.lock().opens
    }

    /// How many times `close` was called.
    pub fn close_count(&self) -> usize {
        self.inner.lock().closes
    }
}

impl Communicator for ScriptedCommunicator {
    fn open(&mut self) -> Result<()> {
        self.inner.lock().opens += 1;
        Ok(())
    }

    fn close(&mut self) {
        self.inner.lock().closes += 1;
    }

    fn write(&mut self, data: &[u8], _timeout: Duration) -> Result<()> {
        self.inner.lock().writes.push(data.to_vec());
        Ok(())
    }

    fn read_exact(&mut self, n: usize, timeout: Duration) -> Result<Vec<u8>> {
        let mut inner = self.inner.lock();
        inner.reads += 1;
        if inner.replies.len() < n {
            // Exactly-n or failure, like the real transport.
            return Err(ConnectionError::Timeout {
                timeout_ms: timeout.as_millis() as u64,
            }
            .into());
        }
        Ok(inner.replies.drain(..n).collect())
    }
}
