//! NXT direct-command frame codec
//!
//! Pure encode/decode for the legacy fixed-layout wire format; no I/O.
//! Requests are `[2-byte LE length][command type][opcode][fixed params...]`.
//! The GET_INPUT_VALUES reply is always 66 bytes with values at fixed
//! offsets.

use drivekit_core::{ProtocolError, Result};

/// Direct command expecting a reply
pub const DIRECT_COMMAND_REPLY: u8 = 0x00;
/// Direct command with no reply
pub const DIRECT_COMMAND_NO_REPLY: u8 = 0x80;

/// Opcode: set output state
pub const SET_OUTPUT_STATE: u8 = 0x04;
/// Opcode: set input mode
pub const SET_INPUT_MODE: u8 = 0x05;
/// Opcode: get input values
pub const GET_INPUT_VALUES: u8 = 0x07;

// Sensor types.
pub const SENSOR_TYPE_SWITCH: u8 = 0x01;
pub const SENSOR_TYPE_LIGHT_ACTIVE: u8 = 0x05;
pub const SENSOR_TYPE_SOUND_DB: u8 = 0x07;

// Sensor modes.
pub const SENSOR_MODE_BOOLEAN: u8 = 0x20;
pub const SENSOR_MODE_PCT_FULL_SCALE: u8 = 0x80;

// Output mode bitfield.
pub const MODE_MOTOR_ON: u8 = 0x01;
pub const MODE_BRAKE: u8 = 0x02;
pub const MODE_REGULATED: u8 = 0x04;

/// Regulation mode: speed regulation
pub const REGULATION_MODE_MOTOR_SPEED: u8 = 0x01;
/// Run state: running
pub const MOTOR_RUN_STATE_RUNNING: u8 = 0x20;

/// Size of a GET_INPUT_VALUES reply.
pub const INPUT_VALUES_REPLY_LEN: usize = 66;

/// Prepend the 2-byte little-endian length to a request body.
pub fn frame(request: &[u8]) -> Vec<u8> {
    let mut data = Vec::with_capacity(request.len() + 2);
    data.push(request.len() as u8);
    data.push((request.len() >> 8) as u8);
    data.extend_from_slice(request);
    data
}

/// SET_INPUT_MODE frame: tell the brick what sensor sits on a port and the
/// mode to sample it in. No reply.
pub fn set_input_mode(port: u8, sensor_type: u8, sensor_mode: u8) -> Vec<u8> {
    frame(&[
        DIRECT_COMMAND_NO_REPLY,
        SET_INPUT_MODE,
        port,
        sensor_type,
        sensor_mode,
    ])
}

/// GET_INPUT_VALUES frame: request the 66-byte sensor snapshot for a port.
pub fn get_input_values(port: u8) -> Vec<u8> {
    frame(&[DIRECT_COMMAND_REPLY, GET_INPUT_VALUES, port])
}

/// SET_OUTPUT_STATE frame: ten fixed fields, with the tachometer limit
/// split little-endian across the last four bytes.
#[allow(clippy::too_many_arguments)]
pub fn set_output_state(
    port: u8,
    speed: i8,
    mode: u8,
    regulation_mode: u8,
    turn_ratio: i8,
    run_state: u8,
    tacho_limit: u32,
) -> Vec<u8> {
    frame(&[
        DIRECT_COMMAND_NO_REPLY,
        SET_OUTPUT_STATE,
        port,
        speed as u8,
        mode,
        regulation_mode,
        turn_ratio as u8,
        run_state,
        tacho_limit as u8,
        (tacho_limit >> 8) as u8,
        (tacho_limit >> 16) as u8,
        (tacho_limit >> 24) as u8,
    ])
}

/// One GET_INPUT_VALUES snapshot, decoded from the 66-byte reply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputValues {
    /// Echoed port number
    pub port: u8,
    /// Whether the reading is valid
    pub valid: bool,
    /// Whether the sensor is calibrated (wire value 0 means calibrated)
    pub is_calibrated: bool,
    /// Sensor type echoed back
    pub sensor_type: u8,
    /// Sensor mode echoed back
    pub sensor_mode: u8,
    /// Raw ADC reading
    pub raw: i16,
    /// Normalized reading
    pub normalized: i16,
    /// Scaled reading (firmware calibration applied)
    pub scaled: i16,
    /// Calibrated reading
    pub calibrated: i16,
}

fn i16_le(lo: u8, hi: u8) -> i16 {
    (u16::from(lo) | (u16::from(hi) << 8)) as i16
}

impl InputValues {
    /// Decode a 66-byte GET_INPUT_VALUES reply.
    pub fn parse(reply: &[u8]) -> Result<Self> {
        if reply.len() != INPUT_VALUES_REPLY_LEN {
            return Err(ProtocolError::MalformedReply {
                platform: "NXT".into(),
                reason: format!(
                    "input-values reply of {} bytes, expected {}",
                    reply.len(),
                    INPUT_VALUES_REPLY_LEN
                ),
            }
            .into());
        }
        Ok(Self {
            port: reply[3],
            valid: reply[4] != 0,
            // Inverted on the wire: zero means calibrated.
            is_calibrated: reply[5] == 0,
            sensor_type: reply[6],
            sensor_mode: reply[7],
            raw: i16_le(reply[8], reply[9]),
            normalized: i16_le(reply[10], reply[11]),
            scaled: i16_le(reply[12], reply[13]),
            calibrated: i16_le(reply[14], reply[15]),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_prepends_le_length() {
        let framed = frame(&[DIRECT_COMMAND_REPLY, GET_INPUT_VALUES, 0x02]);
        assert_eq!(framed, vec![0x03, 0x00, 0x00, 0x07, 0x02]);
    }

    #[test]
    fn set_input_mode_layout() {
        let framed = set_input_mode(1, SENSOR_TYPE_SWITCH, SENSOR_MODE_BOOLEAN);
        assert_eq!(framed, vec![0x05, 0x00, 0x80, 0x05, 0x01, 0x01, 0x20]);
    }

    #[test]
    fn set_output_state_splits_tacho_limit() {
        let framed = set_output_state(
            2,
            -100,
            MODE_BRAKE | MODE_MOTOR_ON | MODE_REGULATED,
            REGULATION_MODE_MOTOR_SPEED,
            0,
            MOTOR_RUN_STATE_RUNNING,
            0x0102_0304,
        );
        assert_eq!(framed[0..2], [0x0C, 0x00]);
        assert_eq!(framed[2..4], [0x80, 0x04]);
        assert_eq!(framed[5], 0x9C); // -100 as a byte
        assert_eq!(framed[10..14], [0x04, 0x03, 0x02, 0x01]);
    }

    #[test]
    fn input_values_decode_at_fixed_offsets() {
        let mut reply = [0u8; INPUT_VALUES_REPLY_LEN];
        reply[3] = 1;
        reply[4] = 1;
        reply[5] = 0;
        reply[6] = SENSOR_TYPE_LIGHT_ACTIVE;
        reply[7] = SENSOR_MODE_PCT_FULL_SCALE;
        reply[12] = 0x64; // scaled = 100
        reply[13] = 0x00;
        let values = InputValues::parse(&reply).unwrap();
        assert!(values.valid);
        assert!(values.is_calibrated);
        assert_eq!(values.scaled, 100);
    }

    #[test]
    fn scaled_value_is_signed() {
        let mut reply = [0u8; INPUT_VALUES_REPLY_LEN];
        reply[12] = 0xFF;
        reply[13] = 0xFF;
        assert_eq!(InputValues::parse(&reply).unwrap().scaled, -1);
    }

    #[test]
    fn short_reply_is_rejected() {
        assert!(InputValues::parse(&[0u8; 10]).is_err());
    }
}
