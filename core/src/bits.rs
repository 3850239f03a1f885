use crate::error::{ModemError, Result};

/// Ordered bit sequence, insertion order = transmission order.
///
/// Built from bytes MSB-first, so `from_bytes(&[0x80])` yields
/// `[1, 0, 0, 0, 0, 0, 0, 0]`. Round-trips losslessly through
/// [`BitBuffer::to_bytes`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitBuffer {
    bits: Vec<u8>,
}

impl BitBuffer {
    /// Expand each byte into 8 bits, most-significant bit first.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut bits = Vec::with_capacity(bytes.len() * 8);
        for &byte in bytes {
            for i in (0..8).rev() {
                bits.push((byte >> i) & 1);
            }
        }
        Self { bits }
    }

    /// Wrap a raw bit sequence. Any nonzero value counts as a one.
    pub fn from_bits(bits: impl IntoIterator<Item = u8>) -> Self {
        Self {
            bits: bits.into_iter().map(|b| (b != 0) as u8).collect(),
        }
    }

    /// Pack back into bytes, MSB-first.
    ///
    /// Fails with [`ModemError::BitLength`] when the length is not a
    /// multiple of 8; that indicates a framing bug upstream.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        if self.bits.len() % 8 != 0 {
            return Err(ModemError::BitLength(self.bits.len()));
        }
        let mut bytes = Vec::with_capacity(self.bits.len() / 8);
        for chunk in self.bits.chunks_exact(8) {
            bytes.push(chunk.iter().fold(0u8, |byte, &bit| (byte << 1) | bit));
        }
        Ok(bytes)
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_msb_first_expansion() {
        let bits = BitBuffer::from_bytes(&[0b1010_0011]);
        assert_eq!(bits.as_slice(), &[1, 0, 1, 0, 0, 0, 1, 1]);
    }

    #[test]
    fn test_round_trip() {
        let data: Vec<u8> = (0..=255).collect();
        let bits = BitBuffer::from_bytes(&data);
        assert_eq!(bits.len(), 8 * data.len());
        assert_eq!(bits.to_bytes().unwrap(), data);
    }

    #[test]
    fn test_empty_round_trip() {
        let bits = BitBuffer::from_bytes(&[]);
        assert!(bits.is_empty());
        assert_eq!(bits.to_bytes().unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_length_error() {
        let bits = BitBuffer::from_bits([1, 0, 1]);
        match bits.to_bytes() {
            Err(ModemError::BitLength(3)) => {}
            other => panic!("expected BitLength error, got {:?}", other),
        }
    }
}
