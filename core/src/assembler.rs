use crate::config::CommConfig;
use crate::framing::{crc8, strip_trailing_zeros, Framer};
use crate::sector::Sector;
use log::{debug, warn};

/// Turns recovered bit sectors back into payload bytes.
///
/// Bits are grouped MSB-first into bytes, bytes into fixed-size
/// packets; incomplete trailing groups are dropped. The markers are
/// stripped positionally (fixed-length framing, no marker search) and
/// every packet's CRC verdict is ANDed into the aggregate flag.
///
/// This stage never fails: when the stream does not contain a single
/// complete packet it reports an empty payload with `crc_ok = false`
/// so the caller can still inspect the rest of the result.
pub struct PacketAssembler;

impl PacketAssembler {
    pub fn assemble(bit_sectors: &[Sector], cfg: &CommConfig) -> (Vec<u8>, bool) {
        let mut bytes = Vec::with_capacity(bit_sectors.len() / 8);
        for group in bit_sectors.chunks_exact(8) {
            bytes.push(group.iter().fold(0u8, |byte, s| (byte << 1) | s.value));
        }

        let packet_size = Framer::packet_size(cfg);
        let packet_len = cfg.packet_len as usize;
        let packets = bytes.chunks_exact(packet_size);

        if packets.len() == 0 {
            warn!(
                "recovered {} bits, not enough for a single {}-byte packet",
                bit_sectors.len(),
                packet_size
            );
            return (Vec::new(), false);
        }
        debug!(
            "assembling {} packets from {} recovered bits",
            packets.len(),
            bit_sectors.len()
        );

        let mut payload = Vec::new();
        let mut crc_ok = true;
        for packet in packets {
            let body = &packet[1..1 + packet_len];
            if cfg.use_crc {
                let expected = packet[1 + packet_len];
                let computed = crc8(body);
                if expected != computed {
                    warn!(
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
