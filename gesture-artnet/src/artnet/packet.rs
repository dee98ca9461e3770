//! ArtDmx packet framing
//!
//! ```text
//! | "Art-Net\0" | OpCode (LE) | ProtVer (BE) | Seq | Phys | SubUni | Net | Len (BE) | Data |
//! |   8 bytes   |   0x5000    |      14      |  1  |  1   |   1    |  1  |    2     | 2-512|
//! ```

use bytes::{Buf, BufMut, Bytes, BytesMut};

use super::payload::{ControlPayload, CHANNEL_GROUP_START, CHANNEL_GROUP_WIDTH};
use crate::error::{GestureLinkError, Result};

/// Packet identifier that starts every Art-Net packet
pub const ARTNET_ID: &[u8; 8] = b"Art-Net\0";

/// OpOutput / ArtDmx
pub const OP_DMX: u16 = 0x5000;

pub const PROTOCOL_VERSION: u16 = 14;

/// Registered Art-Net UDP port
pub const DEFAULT_PORT: u16 = 6454;

/// Bytes before the DMX data
pub const HEADER_LEN: usize = 18;

/// DMX slots per universe
pub const MAX_CHANNELS: usize = 512;

/// Highest 15-bit port-address
pub const MAX_UNIVERSE: u16 = 0x7FFF;

/// One DMX frame for one universe
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArtDmx {
    /// 1-255, or 0 to disable receiver-side reordering
    pub sequence: u8,
    pub physical: u8,
    /// 15-bit port-address (Net << 8 | Sub-Net << 4 | Universe)
    pub universe: u16,
    pub data: Vec<u8>,
}

impl ArtDmx {
    /// Frame carrying `payload` on the channel group
    ///
    /// Data is padded with zeros to the even length Art-Net requires.
    pub fn channel_group(sequence: u8, universe: u16, payload: ControlPayload) -> Self {
        let offset = (CHANNEL_GROUP_START - 1) as usize;
        let mut data = vec![0u8; offset + CHANNEL_GROUP_WIDTH];
        data[offset..offset + CHANNEL_GROUP_WIDTH].copy_from_slice(&payload.to_bytes());
        Self {
            sequence,
            physical: 0,
            universe,
            data,
        }
    }

    /// Channel-group payload carried by this frame
    pub fn payload(&self) -> Result<ControlPayload> {
        let offset = (CHANNEL_GROUP_START - 1) as usize;
        let slots = self.data.get(offset..).unwrap_or(&[]);
        ControlPayload::from_bytes(slots)
    }

    pub fn encode(&self) -> Result<Bytes> {
        if self.universe > MAX_UNIVERSE {
            return Err(GestureLinkError::Packet(format!(
                "universe {} exceeds {}",
                self.universe, MAX_UNIVERSE
            )));
        }
        if self.data.len() > MAX_CHANNELS {
            return Err(GestureLinkError::Packet(format!(
                "{} slots exceeds {}",
                self.data.len(),
                MAX_CHANNELS
            )));
        }

        let length = padded_len(self.data.len());
        let mut buf = BytesMut::with_capacity(HEADER_LEN + length);
        buf.put_slice(ARTNET_ID);
        buf.put_u16_le(OP_DMX);
        buf.put_u16(PROTOCOL_VERSION);
        buf.put_u8(self.sequence);
        buf.put_u8(self.physical);
        buf.put_u8((self.universe & 0xFF) as u8);
        buf.put_u8((self.universe >> 8) as u8);
        buf.put_u16(length as u16);
        buf.put_slice(&self.data);
        buf.put_bytes(0, length - self.data.len());
        Ok(buf.freeze())
    }

    pub fn decode(mut buf: &[u8]) -> Result<Self> {
        if buf.len() < HEADER_LEN {
            return Err(GestureLinkError::Packet(format!(
                "{} bytes is shorter than the header",
                buf.len()
            )));
        }
        if &buf[..ARTNET_ID.len()] != ARTNET_ID {
            return Err(GestureLinkError::Packet("missing Art-Net id".into()));
        }
        buf.advance(ARTNET_ID.len());

        let opcode = buf.get_u16_le();
        if opcode != OP_DMX {
            return Err(GestureLinkError::Packet(format!(
                "opcode {opcode:#06x} is not ArtDmx"
            )));
        }
        let version = buf.get_u16();
        if version < PROTOCOL_VERSION {
            return Err(GestureLinkError::Packet(format!(
                "protocol version {version} too old"
            )));
        }

        let sequence = buf.get_u8();
        let physical = buf.get_u8();
        let sub_uni = buf.get_u8() as u16;
        let net = (buf.get_u8() & 0x7F) as u16;
        let length = buf.get_u16() as usize;

        if !(2..=MAX_CHANNELS).contains(&length) || length % 2 != 0 {
            return Err(GestureLinkError::Packet(format!(
                "invalid data length {length}"
            )));
        }
        if buf.remaining() < length {
            return Err(GestureLinkError::Packet(format!(
                "declared {length} slots, got {}",
                buf.remaining()
            )));
        }

        Ok(Self {
            sequence,
            physical,
            universe: (net << 8) | sub_uni,
            data: buf[..length].to_vec(),
        })
    }
}

fn padded_len(len: usize) -> usize {
    let len = len.max(2);
    len + len % 2
}

/// ArtDmx sequence numbers: 1..=255, wrapping back to 1
#[derive(Clone, Debug, Default)]
pub struct SequenceCounter {
    last: u8,
}

impl SequenceCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&mut self) -> u8 {
        self.last = if self.last == u8::MAX { 1 } else { self.last + 1 };
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_layout() {
        let frame = ArtDmx::channel_group(7, 0x0123, ControlPayload::new(2, 100, 200));
        let bytes = frame.encode().unwrap();

        assert_eq!(&bytes[..8], ARTNET_ID);
        assert_eq!(&bytes[8..10], &[0x00, 0x50]);
        assert_eq!(&bytes[10..12], &[0, 14]);
        assert_eq!(bytes[12], 7);
        assert_eq!(bytes[13], 0);
        assert_eq!(bytes[14], 0x23);
        assert_eq!(bytes[15], 0x01);
        assert_eq!(&bytes[16..18], &[0, 4]);
        assert_eq!(&bytes[18..], &[2, 100, 200, 0]);
    }

    #[test]
    fn test_decode_recovers_payload() {
        let payload = ControlPayload::new(2, 255, 25);
        let bytes = ArtDmx::channel_group(1, 3, payload).encode().unwrap();
        let decoded = ArtDmx::decode(&bytes).unwrap();
        assert_eq!(decoded.universe, 3);
        assert_eq!(decoded.sequence, 1);
        assert_eq!(decoded.payload().unwrap(), payload);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(ArtDmx::decode(b"Art-Net").is_err());
        let mut bytes = ArtDmx::channel_group(1, 0, ControlPayload::default())
            .encode()
            .unwrap()
            .to_vec();
        bytes[0] = b'X';
        assert!(ArtDmx::decode(&bytes).is_err());

        let mut truncated = ArtDmx::channel_group(1, 0, ControlPayload::default())
            .encode()
            .unwrap()
            .to_vec();
        truncated.pop();
        assert!(ArtDmx::decode(&truncated).is_err());
    }

    #[test]
    fn test_encode_rejects_out_of_range_universe() {
        let frame = ArtDmx::channel_group(1, 0x8000, ControlPayload::default());
        assert!(frame.encode().is_err());
    }

    #[test]
    fn test_sequence_skips_zero() {
        let mut seq = SequenceCounter::new();
        assert_eq!(seq.next(), 1);
        for _ in 0..253 {
            seq.next();
        }
        assert_eq!(seq.next(), 255);
        assert_eq!(seq.next(), 1);
    }
}
