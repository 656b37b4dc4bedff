//! EV3 driver conformance against scripted byte traffic.

use drivekit_communication::communication::testing::ScriptedCommunicator;
use drivekit_communication::protocol::ev3::bytecode;
use drivekit_communication::{Ev3Driver, Platform, ProtocolDriver};
use drivekit_core::{Command, CommandArgs, CommandKind, Value};

fn driver_with_tap() -> (Ev3Driver, ScriptedCommunicator) {
    let tap = ScriptedCommunicator::new();
    let mut driver = Ev3Driver::new(Box::new(tap.clone()));
    driver.open().unwrap();
    (driver, tap)
}

/// Queue a reply whose payload carries `floats` at the value offset.
fn queue_si_reply(tap: &ScriptedCommunicator, sequence: u8, floats: &[f32]) {
    let mut payload = vec![sequence, 0x00, 0x02];
    for f in floats {
        payload.extend_from_slice(&f.to_le_bytes());
    }
    let header = (payload.len() as u16).to_le_bytes();
    tap.queue_reply(&header);
    tap.queue_reply(&payload);
}

fn queue_percent_reply(tap: &ScriptedCommunicator, sequence: u8, percents: &[i8]) {
    let mut payload = vec![sequence, 0x00, 0x02];
    payload.extend(percents.iter().map(|&p| p as u8));
    let header = (payload.len() as u16).to_le_bytes();
    tap.queue_reply(&header);
    tap.queue_reply(&payload);
}

#[test]
fn gyro_rate_si_read_request_and_decode() {
    let (mut driver, tap) = driver_with_tap();
    queue_si_reply(&tap, 1, &[42.0]);

    let cmd = Command::bare(CommandKind::GetGyroRate).unwrap();
    let result = driver.exec(1, &cmd).unwrap();
    assert_eq!(result.int(CommandKind::GetGyroRate).unwrap(), 42);

    let writes = tap.writes();
    assert_eq!(writes.len(), 1);
    // [len][seq][reply type][buffer 4,0][opInput][READY_SI][layer][port][gyro][rate][n][gindex]
    assert_eq!(
        writes[0],
        vec![0x0C, 0x00, 0x01, 0x00, 0x04, 0x00, 0x99, 0x1D, 0x00, 0x01, 0x20, 0x01, 0x01, 0x00]
    );
}

#[test]
fn color_illuminance_uses_percent_read() {
    let (mut driver, tap) = driver_with_tap();
    queue_percent_reply(&tap, 1, &[37]);

    let cmd = Command::bare(CommandKind::GetColorIlluminance).unwrap();
    let result = driver.exec(0, &cmd).unwrap();
    assert_eq!(result.int(CommandKind::GetColorIlluminance).unwrap(), 37);

    let writes = tap.writes();
    // READY_PCT with a 1-byte global buffer and the EV3 color type.
    assert_eq!(
        writes[0],
        vec![0x0C, 0x00, 0x01, 0x00, 0x01, 0x00, 0x99, 0x1B, 0x00, 0x00, 0x1D, 0x00, 0x01, 0x00]
    );
}

#[test]
fn percent_reads_sign_extend() {
    let (mut driver, tap) = driver_with_tap();
    queue_percent_reply(&tap, 1, &[-10]);

    let cmd = Command::bare(CommandKind::GetLineValue).unwrap();
    let result = driver.exec(0, &cmd).unwrap();
    assert_eq!(result.int(CommandKind::GetLineValue).unwrap(), -10);
}

#[test]
fn rgb_read_preserves_three_channels() {
    let (mut driver, tap) = driver_with_tap();
    queue_si_reply(&tap, 1, &[12.0, 34.0, 56.0]);

    let cmd = Command::bare(CommandKind::GetColorRgb).unwrap();
    let result = driver.exec(2, &cmd).unwrap();
    assert_eq!(
        result.into_value(),
        Some(Value::Floats(vec![12.0, 34.0, 56.0]))
    );
}

#[test]
fn servo_angle_selects_the_servo_device_space() {
    let (mut driver, tap) = driver_with_tap();
    queue_si_reply(&tap, 1, &[90.0]);

    let cmd = Command::bare(CommandKind::GetServoAngle).unwrap();
    let result = driver.exec(2, &cmd).unwrap();
    assert_eq!(result.int(CommandKind::GetServoAngle).unwrap(), 90);

    // Port byte is 0x10 | 2, device type is the large motor.
    let frame = &tap.writes()[0];
    assert_eq!(frame[9], 0x12);
    assert_eq!(frame[10], 7);
}

#[test]
fn touch_touched_normalizes_to_bool() {
    let (mut driver, tap) = driver_with_tap();
    queue_si_reply(&tap, 1, &[1.0]);

    let cmd = Command::bare(CommandKind::GetTouchTouched).unwrap();
    let result = driver.exec(0, &cmd).unwrap();
    assert_eq!(result.bool(CommandKind::GetTouchTouched).unwrap(), true);
}

#[test]
fn motor_speed_is_power_then_start_in_one_no_reply_frame() {
    let (mut driver, tap) = driver_with_tap();

    let cmd = Command::new(CommandKind::SetMotorSpeed, CommandArgs::MotorSpeed { speed: 42 })
        .unwrap();
    let result = driver.exec(2, &cmd).unwrap();
    assert!(result.is_empty());

    let writes = tap.writes();
    assert_eq!(writes.len(), 1);
    // Port 2 remaps to bitmask 0x04; power opcode then start opcode.
    assert_eq!(
        writes[0],
        vec![0x0B, 0x00, 0x01, 0x80, 0x00, 0x00, 0xA4, 0x00, 0x04, 42, 0xA6, 0x00, 0x04]
    );
    // No reply is read for a no-reply frame.
    assert_eq!(tap.io_calls(), 1);
}

#[test]
fn buzzer_beep_emits_a_fixed_tone() {
    let (mut driver, tap) = driver_with_tap();

    let cmd = Command::bare(CommandKind::SetBuzzerBeep).unwrap();
    let result = driver.exec(0, &cmd).unwrap();
    assert!(result.is_empty());

    // volume 50, 600 Hz, 200 ms, both as 2-byte little-endian.
    assert_eq!(
        tap.writes()[0],
        vec![0x0B, 0x00, 0x01, 0x00, 0x00, 0x00, 0x94, 0x01, 50, 0x58, 0x02, 0xC8, 0x00]
    );
}

#[test]
fn unsupported_kinds_fail_explicitly() {
    let (mut driver, tap) = driver_with_tap();

    for kind in [
        CommandKind::SetBuzzerOn,
        CommandKind::SetBuzzerOff,
        CommandKind::SetLedOn,
        CommandKind::SetLedOff,
    ] {
        let cmd = Command::bare(kind).unwrap();
        let err = driver.exec(0, &cmd).unwrap_err();
        assert!(err.is_unsupported(), "{kind} should be unsupported");
    }

    let cmd = Command::new(CommandKind::SetServoAngle, CommandArgs::ServoAngle { angle: 45 })
        .unwrap();
    assert!(driver.exec(0, &cmd).unwrap_err().is_unsupported());
    assert_eq!(tap.io_calls(), 0);
}

#[test]
fn out_of_range_port_is_rejected_before_io() {
    let (mut driver, tap) = driver_with_tap();

    for port in [4u8, 17, 255] {
        let cmd = Command::bare(CommandKind::GetGyroAngle).unwrap();
        let err = driver.exec(port, &cmd).unwrap_err();
        assert!(err.is_precondition());
    }
    assert_eq!(tap.io_calls(), 0);
}

#[test]
fn exec_before_open_is_a_precondition_violation() {
    let tap = ScriptedCommunicator::new();
    let mut driver = Ev3Driver::new(Box::new(tap.clone()));

    let cmd = Command::bare(CommandKind::GetGyroAngle).unwrap();
    assert!(driver.exec(0, &cmd).is_err());
    assert_eq!(tap.io_calls(), 0);
}

#[test]
fn si_round_trip_for_every_supported_read() {
    // Encode a request, synthesize a valid reply embedding a known value,
    // and confirm the decoded result matches.
    let cases = [
        CommandKind::GetGyroAngle,
        CommandKind::GetGyroRate,
        CommandKind::GetRangefinderDistance,
        CommandKind::GetRemoteButton,
        CommandKind::GetRemoteDistance,
        CommandKind::GetServoAngle,
        CommandKind::GetSoundDb,
        CommandKind::GetTouchCount,
    ];
    for (i, kind) in cases.into_iter().enumerate() {
        let (mut driver, tap) = driver_with_tap();
        let embedded = (i as f32 + 1.0) * 3.0;
        queue_si_reply(&tap, 1, &[embedded]);

        let cmd = Command::bare(kind).unwrap();
        let result = driver.exec(3, &cmd).unwrap();
        assert_eq!(result.int(kind).unwrap(), embedded as i32, "{kind}");
    }
}

#[test]
fn truncated_reply_is_malformed() {
    let (mut driver, tap) = driver_with_tap();
    // Header promises 7 bytes but the payload only carries status bytes.
    tap.queue_reply(&[0x03, 0x00]);
    tap.queue_reply(&[0x01, 0x00, 0x02]);

    let cmd = Command::bare(CommandKind::GetGyroAngle).unwrap();
    let err = driver.exec(0, &cmd).unwrap_err();
    assert!(!err.is_timeout());
}

#[test]
fn header_decode_matches_the_raw_shift_rule() {
    assert_eq!(bytecode::reply_length([0x05, 0x00]), 5);
    assert_eq!(bytecode::reply_length([0xFF, 0x01]), 511);
}

#[test]
fn driver_reports_its_platform() {
    let (driver, _tap) = driver_with_tap();
    assert_eq!(driver.platform(), Platform::Ev3);
}
