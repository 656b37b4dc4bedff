//! Pile board protocol driver
//!
//! Small command subset over checksummed packets. An invalid reply is not an
//! error: the read path yields the protocol's `-1` sentinel and the driver
//! passes it through unchanged.

use crate::communication::Communicator;
use crate::protocol::ensure_port;
use crate::protocol::pile::packet::{self, MotorDir, PileCommand, PilePacket};
use crate::protocol::{Platform, ProtocolDriver};
use drivekit_core::{
    Command, CommandError, CommandKind, ExecResult, ProtocolError, Result, Value,
};
use std::time::Duration;

const TIMEOUT: Duration = Duration::from_millis(1000);

/// Invalid-reply sentinel surfaced by single-byte reads.
const INVALID_READ: i32 = -1;

/// Driver for the Pile controller board
pub struct PileDriver {
    comm: Box<dyn Communicator>,
    connected: bool,
}

impl PileDriver {
    /// Create a driver owning `comm` for the connection's lifetime.
    pub fn new(comm: Box<dyn Communicator>) -> Self {
        Self {
            comm,
            connected: false,
        }
    }

    fn unsupported(&self, kind: CommandKind) -> ProtocolError {
        ProtocolError::Unsupported {
            platform: Platform::Pile.to_string(),
            kind: kind.to_string(),
        }
    }

    /// One-data-byte request carrying the port; returns the reply's data
    /// byte as an unsigned value, or the `-1` sentinel on an invalid reply.
    fn request_one_byte(&mut self, port: u8, command: PileCommand) -> Result<i32> {
        let mut request = PilePacket::new(command);
        request.data_byte(port);
        self.comm.write(&request.finish(), TIMEOUT)?;

        let reply = self.comm.read_exact(packet::REPLY_LEN, TIMEOUT)?;
        match packet::parse_reply(&reply) {
            Some(data) => Ok(i32::from(data)),
            None => {
                tracing::warn!(?reply, "Pile reply failed validity check");
                Ok(INVALID_READ)
            }
        }
    }

    /// Drive a motor: direction and port packed into one data byte, the
    /// speed magnitude in the next. Returns the board's acknowledgment bit.
    fn set_motor(&mut self, port: u8, speed: i32) -> Result<bool> {
        let (dir, magnitude) = if speed < 0 {
            (MotorDir::Backward, -speed)
        } else {
            (MotorDir::Forward, speed)
        };

        let mut request = PilePacket::new(PileCommand::Move);
        request
            .data_byte(((port & 0x0F) << 2) | dir as u8)
            .data_byte(magnitude as u8);
        self.comm.write(&request.finish(), TIMEOUT)?;

        let reply = self.comm.read_exact(packet::REPLY_LEN, TIMEOUT)?;
        Ok((reply[2] & 0x01) == 0x01)
    }
}

impl ProtocolDriver for PileDriver {
    fn open(&mut self) -> Result<()> {
        self.comm.open()?;
        self.connected = true;
        Ok(())
    }

    fn close(&mut self) {
        self.comm.close();
        self.connected = false;
    }

    fn exec(&mut self, port: u8, command: &Command) -> Result<ExecResult> {
        ensure_port(port)?;
        if !self.connected {
            return Err(ProtocolError::NotConnected.into());
        }
        let kind = command.kind();
        tracing::debug!(%kind, port, "Pile exec");

        let result = match kind {
            CommandKind::GetLineValue => {
                let raw = self.request_one_byte(port, PileCommand::LineSensor)?;
                ExecResult::with_value(Value::Int(raw))
            }
            CommandKind::GetRangefinderDistance => {
                let raw = self.request_one_byte(port, PileCommand::Distance)?;
                // The board reports proximity; invert to a distance. The
                // invalid-read sentinel passes through unchanged.
                let distance = if raw == INVALID_READ { raw } else { 0xFF - raw };
                ExecResult::with_value(Value::Int(distance))
            }
            CommandKind::GetTouchTouched => {
                let raw = self.request_one_byte(port, PileCommand::Touch)?;
                ExecResult::with_value(Value::Bool(raw == 1))
            }
            CommandKind::SetMotorSpeed => {
                let speed = command.motor_speed()?;
                if !(-100..=100).contains(&speed) {
                    return Err(CommandError::SpeedOutOfRange { speed }.into());
                }
                let ack = self.set_motor(port, speed)?;
                ExecResult::with_value(Value::Int(i32::from(ack)))
            }
            CommandKind::GetColorIlluminance
            | CommandKind::GetColorRgb
            | CommandKind::GetGyroAngle
            | CommandKind::GetGyroRate
            | CommandKind::GetRemoteButton
            | CommandKind::GetRemoteDistance
            | CommandKind::GetServoAngle
            | CommandKind::GetSoundDb
            | CommandKind::GetTouchCount
            | CommandKind::SetBuzzerBeep
            | CommandKind::SetBuzzerOff
            | CommandKind::SetBuzzerOn
            | CommandKind::SetLedOff
            | CommandKind::SetLedOn
            | CommandKind::SetServoAngle => return Err(self.unsupported(kind).into()),
        };
        Ok(result)
    }

    fn platform(&self) -> Platform {
        Platform::Pile
    }
}
