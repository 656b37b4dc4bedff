//! EV3 direct-command opcode space
//!
//! Byte codes for the subset of the EV3 direct-command vocabulary this
//! driver emits. Device type and mode codes cover both native EV3 sensors
//! and the legacy NXT sensors the brick also accepts.

/// Direct command expecting a reply
pub const DIRECT_COMMAND_REPLY: u8 = 0x00;
/// Direct command with no reply
pub const DIRECT_COMMAND_NO_REPLY: u8 = 0x80;
/// Reply status: command succeeded
pub const DIRECT_REPLY_OK: u8 = 0x02;
/// Reply status: command failed
pub const DIRECT_REPLY_ERROR: u8 = 0x04;

/// Input-device operation
pub const OP_INPUT_DEVICE: u8 = 0x99;
/// Input-device sub-command: read as percent
pub const CMD_READY_PCT: u8 = 0x1B;
/// Input-device sub-command: read in SI units
pub const CMD_READY_SI: u8 = 0x1D;

/// Output power operation
pub const OP_OUTPUT_POWER: u8 = 0xA4;
/// Output start operation
pub const OP_OUTPUT_START: u8 = 0xA6;

/// Sound operation
pub const OP_SOUND: u8 = 0x94;
/// Sound sub-command: play a tone
pub const CMD_SOUND_TONE: u8 = 0x01;

/// Daisy-chain layer of the directly connected brick
pub const LAYER_MASTER: u8 = 0x00;

/// ORed into the port byte to address the servo motor's device-type space
pub const SERVO_PORT_FLAG: u8 = 0x10;

// Device type codes.
pub const TYPE_NXT_LIGHT: u8 = 2;
pub const TYPE_NXT_SOUND: u8 = 3;
pub const TYPE_LARGE_MOTOR: u8 = 7;
pub const TYPE_EV3_TOUCH: u8 = 16;
pub const TYPE_EV3_COLOR: u8 = 29;
pub const TYPE_EV3_ULTRASONIC: u8 = 30;
pub const TYPE_EV3_GYRO: u8 = 32;
pub const TYPE_EV3_IR: u8 = 33;

// Device mode codes, per type.
pub const MODE_TOUCH_TOUCH: u8 = 0;
pub const MODE_TOUCH_BUMPS: u8 = 1;
pub const MODE_COL_REFLECT: u8 = 0;
pub const MODE_COL_RGB: u8 = 4;
pub const MODE_US_CM: u8 = 0;
pub const MODE_GYRO_ANGLE: u8 = 0;
pub const MODE_GYRO_RATE: u8 = 1;
pub const MODE_IR_PROX: u8 = 0;
pub const MODE_IR_REMOTE: u8 = 2;
pub const MODE_SOUND_DB: u8 = 0;
pub const MODE_LIGHT_REFLECT: u8 = 0;
pub const MODE_MOTOR_DEGREE: u8 = 0;

/// Remap a logical output port to the brick's single-bit hardware mask.
///
/// Port index selects a bit; this is not a sequential integer encoding.
pub fn output_port_mask(port: u8) -> u8 {
    match port {
        0 => 0x01,
        1 => 0x02,
        2 => 0x04,
        3 => 0x08,
        _ => 0x00,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_ports_map_to_single_bits() {
        assert_eq!(output_port_mask(0), 0x01);
        assert_eq!(output_port_mask(1), 0x02);
        assert_eq!(output_port_mask(2), 0x04);
        assert_eq!(output_port_mask(3), 0x08);
    }
}
