//! NXT protocol driver
//!
//! Sensor reads are a two-step, per-call exchange: SET_INPUT_MODE (no reply)
//! followed by GET_INPUT_VALUES (66-byte reply). Command kinds this platform
//! does not implement produce an empty result rather than an error; that
//! asymmetry with the other drivers is deliberate and preserved.

use crate::communication::Communicator;
use crate::protocol::ensure_port;
use crate::protocol::nxt::codec::{self, InputValues};
use crate::protocol::{Platform, ProtocolDriver};
use drivekit_core::{Command, CommandKind, ExecResult, ProtocolError, Result, Value};
use std::time::Duration;

const TIMEOUT: Duration = Duration::from_millis(1000);

/// Scaled values below this count as "touched" for the switch sensor.
const TOUCH_THRESHOLD: i16 = 600;

/// Driver for NXT-style legacy controllers
pub struct NxtDriver {
    comm: Box<dyn Communicator>,
    connected: bool,
}

impl NxtDriver {
    /// Create a driver owning `comm` for the connection's lifetime.
    pub fn new(comm: Box<dyn Communicator>) -> Self {
        Self {
            comm,
            connected: false,
        }
    }

    fn set_input_mode(&mut self, port: u8, sensor_type: u8, sensor_mode: u8) -> Result<()> {
        self.comm
            .write(&codec::set_input_mode(port, sensor_type, sensor_mode), TIMEOUT)
    }

    fn get_input_values(&mut self, port: u8) -> Result<InputValues> {
        self.comm.write(&codec::get_input_values(port), TIMEOUT)?;
        let reply = self.comm.read_exact(codec::INPUT_VALUES_REPLY_LEN, TIMEOUT)?;
        let values = InputValues::parse(&reply)?;
        tracing::debug!(port, scaled = values.scaled, valid = values.valid, "NXT input values");
        Ok(values)
    }

    /// Configure the sensor, then read its snapshot.
    fn read_sensor(&mut self, port: u8, sensor_type: u8, sensor_mode: u8) -> Result<InputValues> {
        self.set_input_mode(port, sensor_type, sensor_mode)?;
        self.get_input_values(port)
    }

    fn set_motor_speed(&mut self, port: u8, speed: i32) -> Result<()> {
        // Unconditional, unlimited-run speed control: brake + on + regulated,
        // speed regulation, zero turn ratio, running, no tacho limit.
        let frame = codec::set_output_state(
            port,
            speed as i8,
            codec::MODE_BRAKE | codec::MODE_MOTOR_ON | codec::MODE_REGULATED,
            codec::REGULATION_MODE_MOTOR_SPEED,
            0,
            codec::MOTOR_RUN_STATE_RUNNING,
            0,
        );
        self.comm.write(&frame, TIMEOUT)
    }
}

impl ProtocolDriver for NxtDriver {
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
        tracing::debug!(%kind, port, "NXT exec");

        let result = match kind {
            CommandKind::GetLineValue => {
                let values = self.read_sensor(
                    port,
                    codec::SENSOR_TYPE_LIGHT_ACTIVE,
                    codec::SENSOR_MODE_PCT_FULL_SCALE,
                )?;
                ExecResult::with_value(Value::Int(i32::from(values.scaled) / 10))
            }
            CommandKind::GetSoundDb => {
                let values = self.read_sensor(
                    port,
                    codec::SENSOR_TYPE_SOUND_DB,
                    codec::SENSOR_MODE_PCT_FULL_SCALE,
                )?;
                ExecResult::with_value(Value::Int(i32::from(values.scaled) / 10))
            }
            CommandKind::GetTouchTouched => {
                let values = self.read_sensor(
                    port,
                    codec::SENSOR_TYPE_SWITCH,
                    codec::SENSOR_MODE_BOOLEAN,
                )?;
                ExecResult::with_value(Value::Bool(values.scaled < TOUCH_THRESHOLD))
            }
            CommandKind::SetMotorSpeed => {
                let speed = command.motor_speed()?;
                self.set_motor_speed(port, speed)?;
                ExecResult::empty()
            }
            // This platform's documented policy for everything else: an
            // empty result, not an error.
            CommandKind::GetColorIlluminance
            | CommandKind::GetColorRgb
            | CommandKind::GetGyroAngle
            | CommandKind::GetGyroRate
            | CommandKind::GetRangefinderDistance
            | CommandKind::GetRemoteButton
            | CommandKind::GetRemoteDistance
            | CommandKind::GetServoAngle
            | CommandKind::GetTouchCount
            | CommandKind::SetBuzzerBeep
            | CommandKind::SetBuzzerOff
            | CommandKind::SetBuzzerOn
            | CommandKind::SetLedOff
            | CommandKind::SetLedOn
            | CommandKind::SetServoAngle => ExecResult::empty(),
        };
        Ok(result)
    }

    fn platform(&self) -> Platform {
        Platform::Nxt
    }
}
