//! Wire-level decode of a single inbound UDP datagram into an address and
//! argument list. Bit-exact OSC framing is left to `rosc`; this module
//! only decides what a "message" means for dispatch purposes.

use rosc::{OscPacket, OscType};

use crate::error::{ProtoError, Result};

/// Decodes a raw datagram into `(address, args)`. Bundles are rejected:
/// the control protocol's address table is defined only in terms of
/// single messages.
pub fn decode(bytes: &[u8]) -> Result<(String, Vec<OscType>)> {
    let (_, packet) =
        rosc::decoder::decode_udp(bytes).map_err(|e| ProtoError::Malformed(e.to_string()))?;
    match packet {
        OscPacket::Message(msg) => Ok((msg.addr, msg.args)),
        OscPacket::Bundle(_) => Err(ProtoError::Malformed(
            "OSC bundles are not a supported control message shape".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rosc::{OscMessage, OscPacket, OscType};

    #[test]
    fn round_trips_a_simple_message() {
        let msg = OscPacket::Message(OscMessage {
            addr: "/change_scene".to_string(),
            args: vec![OscType::Int(3)],
        });
        let bytes = rosc::encoder::encode(&msg).unwrap();
        let (addr, args) = decode(&bytes).unwrap();
        assert_eq!(addr, "/change_scene");
        assert_eq!(args, vec![OscType::Int(3)]);
    }
}
