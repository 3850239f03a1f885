use crate::bits::BitBuffer;
use crate::config::CommConfig;
use log::debug;

/// CRC-8/CCITT: polynomial 0x07, zero init, no reflection, no xorout.
pub fn crc8(data: &[u8]) -> u8 {
    const POLYNOMIAL: u8 = 0x07; // x^8 + x^2 + x + 1
    let mut crc = 0u8;
    for &byte in data {
        crc ^= byte;
        for _ in 0..8 {
            if crc & 0x80 != 0 {
                crc = (crc << 1) ^ POLYNOMIAL;
            } else {
                crc <<= 1;
            }
        }
    }
    crc
}

/// Fixed-rate framing: `[start][payload: packet_len][crc?][stop]`.
pub struct Framer;

impl Framer {
    /// On-air size of one packet in bytes.
    pub fn packet_size(cfg: &CommConfig) -> usize {
        cfg.packet_len as usize + 2 + usize::from(cfg.use_crc)
    }

    /// Split the payload into fixed-size packets and serialize them to
    /// a transmission-ordered bit sequence.
    ///
    /// The final short chunk is zero-padded to the full packet length;
    /// an empty payload produces an empty bit buffer.
    pub fn encode(payload: &[u8], cfg: &CommConfig) -> BitBuffer {
        let packet_len = (cfg.packet_len as usize).max(1);
        let mut framed = Vec::new();

        for chunk in payload.chunks(packet_len) {
            let mut body = chunk.to_vec();
            body.resize(packet_len, 0);

            framed.push(cfg.start_byte);
            if cfg.use_crc {
                let sum = crc8(&body);
                framed.extend_from_slice(&body);
                framed.push(sum);
            } else {
                framed.extend_from_slice(&body);
            }
            framed.push(cfg.stop_byte);
        }

        debug!(
            "framed {} payload bytes into {} packets ({} bytes on air)",
            payload.len(),
            payload.len().div_ceil(packet_len),
            framed.len()
        );
        BitBuffer::from_bytes(&framed)
    }

    /// Strip framing from raw packets and reassemble the payload.
    ///
    /// Best effort: a CRC mismatch marks the whole result bad but the
    /// remaining packets are still decoded. Trailing zero bytes left
    /// over from chunk padding are removed from the tail.
    pub fn decode(packets: &[Vec<u8>], cfg: &CommConfig) -> (Vec<u8>, bool) {
        let packet_len = cfg.packet_len as usize;
        let mut payload = Vec::with_capacity(packets.len() * packet_len);
        let mut crc_ok = true;

        for packet in packets {
            if packet.len() != Self::packet_size(cfg) {
                debug!("skipping malformed packet of {} bytes", packet.len());
                crc_ok = false;
                continue;
            }
            // start marker at [0], stop marker at the end; neither is
            // value-checked, framing is fixed-length
            let body = &packet[1..1 + packet_len];
            if cfg.use_crc {
                let expected = packet[1 + packet_len];
                let computed = crc8(body);
                if expected != computed {
                    debug!(
                        "packet CRC mismatch: expected {:#04x}, computed {:#04x}",
                        expected, computed
                    );
                    crc_ok = false;
                }
            }
            payload.extend_from_slice(body);
        }

        strip_trailing_zeros(&mut payload);
        (payload, crc_ok)
    }
}

/// Drop the zero bytes introduced by chunk padding: scan backward
/// while the byte is zero, stop at the first nonzero one.
pub fn strip_trailing_zeros(bytes: &mut Vec<u8>) {
    while bytes.last() == Some(&0) {
        bytes.pop();
    }
}
