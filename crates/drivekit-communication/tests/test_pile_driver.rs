//! Pile driver conformance against scripted byte traffic.

use drivekit_communication::communication::testing::ScriptedCommunicator;
use drivekit_communication::protocol::pile::packet;
use drivekit_communication::{PileDriver, Platform, ProtocolDriver};
use drivekit_core::{Command, CommandArgs, CommandKind, Error, Value};

fn driver_with_tap() -> (PileDriver, ScriptedCommunicator) {
    let tap = ScriptedCommunicator::new();
    let mut driver = PileDriver::new(Box::new(tap.clone()));
    driver.open().unwrap();
    (driver, tap)
}

fn motor_cmd(speed: i32) -> Command {
    Command::new(CommandKind::SetMotorSpeed, CommandArgs::MotorSpeed { speed }).unwrap()
}

#[test]
fn line_read_returns_the_data_byte() {
    let (mut driver, tap) = driver_with_tap();
    tap.queue_reply(&packet::make_reply(0x2A));

    let cmd = Command::bare(CommandKind::GetLineValue).unwrap();
    let result = driver.exec(1, &cmd).unwrap();
    assert_eq!(result.int(CommandKind::GetLineValue).unwrap(), 0x2A);

    // [command][port][checksum]
    assert_eq!(tap.writes()[0], vec![0x02, 0x01, 0x03]);
}

#[test]
fn rangefinder_inverts_the_raw_byte() {
    let (mut driver, tap) = driver_with_tap();
    tap.queue_reply(&packet::make_reply(10));

    let cmd = Command::bare(CommandKind::GetRangefinderDistance).unwrap();
    let result = driver.exec(0, &cmd).unwrap();
    assert_eq!(
        result.int(CommandKind::GetRangefinderDistance).unwrap(),
        245
    );
}

#[test]
fn invalid_reply_surfaces_the_sentinel() {
    let (mut driver, tap) = driver_with_tap();
    let mut corrupt = packet::make_reply(10);
    corrupt[3] ^= 0x40;
    tap.queue_reply(&corrupt);

    let cmd = Command::bare(CommandKind::GetLineValue).unwrap();
    let result = driver.exec(0, &cmd).unwrap();
    assert_eq!(result.int(CommandKind::GetLineValue).unwrap(), -1);
}

#[test]
fn rangefinder_passes_the_sentinel_through_unchanged() {
    let (mut driver, tap) = driver_with_tap();
    let mut corrupt = packet::make_reply(10);
    corrupt[0] = 0x00;
    tap.queue_reply(&corrupt);

    let cmd = Command::bare(CommandKind::GetRangefinderDistance).unwrap();
    let result = driver.exec(0, &cmd).unwrap();
    // Not 255 - (-1): the sentinel is never inverted.
    assert_eq!(result.int(CommandKind::GetRangefinderDistance).unwrap(), -1);
}

#[test]
fn touch_is_true_only_for_one() {
    for (data, expected) in [(1u8, true), (0, false), (2, false)] {
        let (mut driver, tap) = driver_with_tap();
        tap.queue_reply(&packet::make_reply(data));

        let cmd = Command::bare(CommandKind::GetTouchTouched).unwrap();
        let result = driver.exec(3, &cmd).unwrap();
        assert_eq!(
            result.bool(CommandKind::GetTouchTouched).unwrap(),
            expected,
            "data {data}"
        );
    }
}

#[test]
fn backward_motor_speed_packs_direction_and_magnitude() {
    let (mut driver, tap) = driver_with_tap();
    tap.queue_reply(&packet::make_reply(0x01));

    let result = driver.exec(1, &motor_cmd(-50)).unwrap();
    assert_eq!(result.into_value(), Some(Value::Int(1)));

    // data0 = (port << 2) | backward, data1 = |speed|
    let expected_data0 = (1 << 2) | 0b10;
    assert_eq!(
        tap.writes()[0],
        vec![
            0x01,
            expected_data0,
            50,
            0x01 ^ expected_data0 ^ 50,
        ]
    );
}

#[test]
fn forward_motor_ack_bit_zero_reports_zero() {
    let (mut driver, tap) = driver_with_tap();
    tap.queue_reply(&packet::make_reply(0x02)); // bit 0 clear

    let result = driver.exec(0, &motor_cmd(80)).unwrap();
    assert_eq!(result.into_value(), Some(Value::Int(0)));

    let expected_data0 = 0b01; // port 0, forward
    assert_eq!(tap.writes()[0][1], expected_data0);
    assert_eq!(tap.writes()[0][2], 80);
}

#[test]
fn out_of_range_speed_is_rejected_before_io() {
    let (mut driver, tap) = driver_with_tap();

    for speed in [150, -101, 101, i32::MAX] {
        let err = driver.exec(0, &motor_cmd(speed)).unwrap_err();
        assert!(err.is_precondition(), "speed {speed}");
        assert!(matches!(err, Error::Command(_)));
    }
    assert_eq!(tap.io_calls(), 0);
}

#[test]
fn boundary_speeds_are_accepted() {
    for speed in [-100, 100, 0] {
        let (mut driver, tap) = driver_with_tap();
        tap.queue_reply(&packet::make_reply(0x01));
        assert!(driver.exec(0, &motor_cmd(speed)).is_ok(), "speed {speed}");
        assert_eq!(tap.write_count(), 1);
    }
}

#[test]
fn unsupported_kinds_fail_explicitly_without_io() {
    let (mut driver, tap) = driver_with_tap();

    for kind in [
        CommandKind::GetGyroAngle,
        CommandKind::GetGyroRate,
        CommandKind::GetColorIlluminance,
        CommandKind::GetColorRgb,
        CommandKind::GetRemoteButton,
        CommandKind::GetRemoteDistance,
        CommandKind::GetServoAngle,
        CommandKind::GetSoundDb,
        CommandKind::GetTouchCount,
        CommandKind::SetBuzzerBeep,
        CommandKind::SetBuzzerOn,
        CommandKind::SetBuzzerOff,
        CommandKind::SetLedOn,
        CommandKind::SetLedOff,
    ] {
        let cmd = Command::bare(kind).unwrap();
        let err = driver.exec(0, &cmd).unwrap_err();
        assert!(err.is_unsupported(), "{kind}");
    }
    assert_eq!(tap.io_calls(), 0);
}

#[test]
fn out_of_range_port_is_rejected_before_io() {
    let (mut driver, tap) = driver_with_tap();

    let cmd = Command::bare(CommandKind::GetTouchTouched).unwrap();
    assert!(driver.exec(9, &cmd).unwrap_err().is_precondition());
    assert_eq!(tap.io_calls(), 0);
}

#[test]
fn driver_reports_its_platform() {
    let (driver, _tap) = driver_with_tap();
    assert_eq!(driver.platform(), Platform::Pile);
}
