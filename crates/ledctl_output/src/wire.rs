//! Outbound LED frame wire format: four octets per LED, `R, G, B, 0`,
//! wrapped as a single OSC blob argument.

use ledctl_core::Frame;
use rosc::{OscMessage, OscPacket, OscType};

/// Lays out `frame` as `R₀ G₀ B₀ 0 R₁ G₁ B₁ 0 …`, one quartet per LED in
/// index order. The trailing octet is reserved and always zero.
#[must_use]
pub fn encode_payload(frame: &Frame) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(frame.len() * 4);
    for pixel in frame.as_slice() {
        bytes.push(pixel.r);
        bytes.push(pixel.g);
        bytes.push(pixel.b);
        bytes.push(0);
    }
    bytes
}

/// Wraps a frame's wire payload as a single-blob OSC message addressed to
/// `control_address`, using the same message framing the dispatcher
/// consumes inbound.
pub fn encode_datagram(frame: &Frame, control_address: &str) -> Vec<u8> {
    let payload = encode_payload(frame);
    let packet = OscPacket::Message(OscMessage {
        addr: control_address.to_string(),
        args: vec![OscType::Blob(payload)],
    });
    rosc::encoder::encode(&packet).expect("a blob-only OSC message always encodes")
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledctl_core::Rgb;

    #[test]
    fn payload_lays_out_four_octets_per_led() {
        let mut frame = Frame::black(2);
        frame.composite_max_at(0, &[Rgb::new(10, 20, 30), Rgb::new(40, 50, 60)]);
        assert_eq!(
            encode_payload(&frame),
            vec![10, 20, 30, 0, 40, 50, 60, 0]
        );
    }

    #[test]
    fn datagram_round_trips_through_rosc() {
        let frame = Frame::black(1);
        let bytes = encode_datagram(&frame, "/light/serial");
        let (_, packet) = rosc::decoder::decode_udp(&bytes).unwrap();
        let OscPacket::Message(msg) = packet else {
            panic!("expected a message");
        };
        assert_eq!(msg.addr, "/light/serial");
        assert_eq!(msg.args, vec![OscType::Blob(vec![0, 0, 0, 0])]);
    }
}
