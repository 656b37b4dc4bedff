//! Property tests for the pure frame codecs.

use drivekit_communication::protocol::ev3::bytecode::{self, ByteCode};
use drivekit_communication::protocol::nxt::codec;
use drivekit_communication::protocol::pile::packet;
use proptest::prelude::*;

proptest! {
    /// The buffer word packs 10 bits of global and 6 bits of local size and
    /// unpacks to the same pair.
    #[test]
    fn ev3_buffer_word_round_trips(global in 0u16..1024, local in 0u8..64) {
        let mut code = ByteCode::new(0, 0);
        code.global_and_local_buffer_size(global, local);
        let frame = code.finish();

        let lo = u16::from(frame[4]);
        let hi = u16::from(frame[5]);
        let unpacked_global = lo | ((hi & 0x03) << 8);
        let unpacked_local = (hi >> 2) as u8;
        prop_assert_eq!(unpacked_global, global);
        prop_assert_eq!(unpacked_local, local);
    }

    /// The length prefix always counts every byte after itself.
    #[test]
    fn ev3_length_prefix_counts_the_body(params in proptest::collection::vec(any::<u8>(), 0..40)) {
        let mut code = ByteCode::new(1, 0x80);
        for p in &params {
            code.param_u8(*p);
        }
        let frame = code.finish();
        let len = u16::from_le_bytes([frame[0], frame[1]]) as usize;
        prop_assert_eq!(len, frame.len() - 2);
    }

    /// SI float decode inverts the encoding at any value slot.
    #[test]
    fn ev3_si_decode_inverts_encode(values in proptest::collection::vec(-1e6f32..1e6, 1..4)) {
        let mut payload = vec![0x01, 0x00, 0x02];
        for v in &values {
            payload.extend_from_slice(&v.to_le_bytes());
        }
        let decoded = bytecode::si_values(&payload, values.len()).unwrap();
        prop_assert_eq!(decoded, values);
    }

    /// The 16-bit fields of an input-values reply decode as little-endian
    /// signed integers.
    #[test]
    fn nxt_scaled_decode_matches_i16(scaled in any::<i16>()) {
        let mut reply = [0u8; codec::INPUT_VALUES_REPLY_LEN];
        let bytes = scaled.to_le_bytes();
        reply[12] = bytes[0];
        reply[13] = bytes[1];
        prop_assert_eq!(codec::InputValues::parse(&reply).unwrap().scaled, scaled);
    }

    /// Any reply built by `make_reply` validates, and flipping any bit of it
    /// does not.
    #[test]
    fn pile_checksum_accepts_valid_and_rejects_corrupt(data in any::<u8>(), flip in 0u8..32) {
        let reply = packet::make_reply(data);
        prop_assert_eq!(packet::parse_reply(&reply), Some(data));

        let mut corrupt = reply;
        corrupt[usize::from(flip / 8)] ^= 1 << (flip % 8);
        // Flipping a data bit breaks the checksum; flipping a checksum or
        // framing bit breaks validity directly.
        prop_assert_eq!(packet::parse_reply(&corrupt), None);
    }
}
