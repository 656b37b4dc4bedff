//! EV3 protocol driver
//!
//! Translates the abstract command vocabulary into EV3 direct commands.
//! Sensor reads go through two shared paths: SI reads (IEEE-754 floats) and
//! percent reads (signed bytes), both starting at the reply's value offset.

use crate::communication::Communicator;
use crate::protocol::ensure_port;
use crate::protocol::ev3::bytecode::{self, ByteCode};
use crate::protocol::ev3::opcodes::*;
use crate::protocol::{Platform, ProtocolDriver};
use drivekit_core::{Command, CommandKind, ExecResult, ProtocolError, Result, Value};
use std::time::Duration;

const TIMEOUT: Duration = Duration::from_millis(1000);

/// Driver for EV3-style controllers
pub struct Ev3Driver {
    comm: Box<dyn Communicator>,
    sequence: u8,
    connected: bool,
}

impl Ev3Driver {
    /// Create a driver owning `comm` for the connection's lifetime.
    pub fn new(comm: Box<dyn Communicator>) -> Self {
        Self {
            comm,
            sequence: 0,
            connected: false,
        }
    }

    fn next_sequence(&mut self) -> u8 {
        self.sequence = self.sequence.wrapping_add(1);
        self.sequence
    }

    fn unsupported(&self, kind: CommandKind) -> ProtocolError {
        ProtocolError::Unsupported {
            platform: Platform::Ev3.to_string(),
            kind: kind.to_string(),
        }
    }

    /// Read one reply: 2-byte length header, then exactly that many payload
    /// bytes.
    fn read_reply(&mut self) -> Result<Vec<u8>> {
        let header = self.comm.read_exact(2, TIMEOUT)?;
        let len = bytecode::reply_length([header[0], header[1]]);
        if len <= 0 {
            tracing::warn!(len, "EV3 reply header with nonpositive length");
            return Err(ProtocolError::MalformedReply {
                platform: Platform::Ev3.to_string(),
                reason: format!("reply header length {}", len),
            }
            .into());
        }
        let payload = self.comm.read_exact(len as usize, TIMEOUT)?;
        tracing::debug!(bytes = payload.len(), "EV3 reply");
        Ok(payload)
    }

    /// SI read: request `nvalue` floats from a device and decode them.
    fn si_value(&mut self, port: u8, dev_type: u8, mode: u8, nvalue: u8) -> Result<Vec<f32>> {
        let mut code = ByteCode::new(self.next_sequence(), DIRECT_COMMAND_REPLY);
        code.global_and_local_buffer_size(4 * u16::from(nvalue), 0)
            .op(OP_INPUT_DEVICE)
            .op(CMD_READY_SI)
            .param_u8(LAYER_MASTER)
            .param_u8(port)
            .param_u8(dev_type)
            .param_u8(mode)
            .param_u8(nvalue)
            .global_index(0x00);

        self.comm.write(&code.finish(), TIMEOUT)?;
        let reply = self.read_reply()?;
        bytecode::si_values(&reply, usize::from(nvalue))
    }

    /// Percent read: request `nvalue` signed percent bytes from a device.
    fn percent_value(&mut self, port: u8, dev_type: u8, mode: u8, nvalue: u8) -> Result<Vec<i8>> {
        let mut code = ByteCode::new(self.next_sequence(), DIRECT_COMMAND_REPLY);
        code.global_and_local_buffer_size(u16::from(nvalue), 0)
            .op(OP_INPUT_DEVICE)
            .op(CMD_READY_PCT)
            .param_u8(LAYER_MASTER)
            .param_u8(port)
            .param_u8(dev_type)
            .param_u8(mode)
            .param_u8(nvalue)
            .global_index(0x00);

        self.comm.write(&code.finish(), TIMEOUT)?;
        let reply = self.read_reply()?;
        bytecode::percent_values(&reply, usize::from(nvalue))
    }

    /// Set output power and start the output, in one no-reply frame.
    fn set_output_state(&mut self, port: u8, speed: i32) -> Result<()> {
        let mask = output_port_mask(port);

        let mut code = ByteCode::new(self.next_sequence(), DIRECT_COMMAND_NO_REPLY);
        code.global_and_local_buffer_size(0, 0)
            .op(OP_OUTPUT_POWER)
            .param_u8(LAYER_MASTER)
            .param_u8(mask)
            .param_u8(speed as u8)
            .op(OP_OUTPUT_START)
            .param_u8(LAYER_MASTER)
            .param_u8(mask);

        self.comm.write(&code.finish(), TIMEOUT)
    }

    /// Play a tone: volume in percent, frequency and duration as 2-byte
    /// parameters.
    fn sound_tone(&mut self, volume: u8, freq: i16, duration_ms: i16) -> Result<()> {
        let mut code = ByteCode::new(self.next_sequence(), DIRECT_COMMAND_REPLY);
        code.global_and_local_buffer_size(0, 0)
            .op(OP_SOUND)
            .op(CMD_SOUND_TONE)
            .param_u8(volume)
            .param_i16(freq)
            .param_i16(duration_ms);

        self.comm.write(&code.finish(), TIMEOUT)
    }
}

impl ProtocolDriver for Ev3Driver {
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
        tracing::debug!(%kind, port, "EV3 exec");

        let result = match kind {
            CommandKind::GetColorIlluminance => {
                let v = self.percent_value(port, TYPE_EV3_COLOR, MODE_COL_REFLECT, 1)?;
                ExecResult::with_value(Value::Int(i32::from(v[0])))
            }
            CommandKind::GetColorRgb => {
                let v = self.si_value(port, TYPE_EV3_COLOR, MODE_COL_RGB, 3)?;
                // All three channels, no scalar truncation.
                ExecResult::with_value(Value::Floats(v))
            }
            CommandKind::GetGyroAngle => {
                let v = self.si_value(port, TYPE_EV3_GYRO, MODE_GYRO_ANGLE, 1)?;
                ExecResult::with_value(Value::Int(v[0] as i32))
            }
            CommandKind::GetGyroRate => {
                let v = self.si_value(port, TYPE_EV3_GYRO, MODE_GYRO_RATE, 1)?;
                ExecResult::with_value(Value::Int(v[0] as i32))
            }
            CommandKind::GetLineValue => {
                let v = self.percent_value(port, TYPE_NXT_LIGHT, MODE_LIGHT_REFLECT, 1)?;
                ExecResult::with_value(Value::Int(i32::from(v[0])))
            }
            CommandKind::GetRangefinderDistance => {
                let v = self.si_value(port, TYPE_EV3_ULTRASONIC, MODE_US_CM, 1)?;
                ExecResult::with_value(Value::Int(v[0] as i32))
            }
            CommandKind::GetRemoteButton => {
                let v = self.si_value(port, TYPE_EV3_IR, MODE_IR_REMOTE, 1)?;
                ExecResult::with_value(Value::Int(v[0] as i32))
            }
            CommandKind::GetRemoteDistance => {
                let v = self.si_value(port, TYPE_EV3_IR, MODE_IR_PROX, 1)?;
                ExecResult::with_value(Value::Int(v[0] as i32))
            }
            CommandKind::GetServoAngle => {
                // The servo motor lives in a separate device-type space,
                // selected by ORing the flag into the port byte.
                let v =
                    self.si_value(SERVO_PORT_FLAG | port, TYPE_LARGE_MOTOR, MODE_MOTOR_DEGREE, 1)?;
                ExecResult::with_value(Value::Int(v[0] as i32))
            }
            CommandKind::GetSoundDb => {
                let v = self.si_value(port, TYPE_NXT_SOUND, MODE_SOUND_DB, 1)?;
                ExecResult::with_value(Value::Int(v[0] as i32))
            }
            CommandKind::GetTouchCount => {
                let v = self.si_value(port, TYPE_EV3_TOUCH, MODE_TOUCH_BUMPS, 1)?;
                ExecResult::with_value(Value::Int(v[0] as i32))
            }
            CommandKind::GetTouchTouched => {
                let v = self.si_value(port, TYPE_EV3_TOUCH, MODE_TOUCH_TOUCH, 1)?;
                ExecResult::with_value(Value::Bool(v[0] != 0.0))
            }
            CommandKind::SetBuzzerBeep => {
                self.sound_tone(50, 600, 200)?;
                ExecResult::empty()
            }
            CommandKind::SetMotorSpeed => {
                let speed = command.motor_speed()?;
                self.set_output_state(port, speed)?;
                ExecResult::empty()
            }
            CommandKind::SetBuzzerOff
            | CommandKind::SetBuzzerOn
            | CommandKind::SetLedOff
            | CommandKind::SetLedOn
            | CommandKind::SetServoAngle => return Err(self.unsupported(kind).into()),
        };
        Ok(result)
    }

    fn platform(&self) -> Platform {
        Platform::Ev3
    }
}
