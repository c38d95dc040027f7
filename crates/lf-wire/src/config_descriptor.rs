//! Channel configuration descriptor (§4.C).
//!
//! Encodes service/channel identity plus the negotiated color/XY bit
//! widths. Prepended to a data message whenever the 200ms republish
//! ceiling has elapsed (§4.C republish policy).

use lf_core::OutputConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelConfigDescriptor {
    pub service_id: u8,
    pub channel_id: u8,
    pub color_bit_depth: u8,
    pub xy_bit_depth: u8,
}

impl ChannelConfigDescriptor {
    pub const WIRE_LEN: usize = 4;

    pub fn new(service_id: u8, channel_id: u8, output_config: OutputConfig) -> Self {
        Self {
            service_id,
            channel_id,
            color_bit_depth: output_config.color_bit_depth(),
            xy_bit_depth: output_config.xy_bit_depth(),
        }
    }

    /// Encodes a bit depth of 8 or 16 into a single flag bit (0 = 8-bit,
    /// 1 = 16-bit); `OutputConfig` guarantees no other value reaches here.
    #[inline]
    fn bits_flag(bits: u8) -> u8 {
        if bits == 16 { 1 } else { 0 }
    }

    pub fn write_to(&self, buf: &mut Vec<u8>) {
        buf.push(self.service_id);
        buf.push(self.channel_id);
        let width_byte =
            Self::bits_flag(self.color_bit_depth) | (Self::bits_flag(self.xy_bit_depth) << 1);
        buf.push(width_byte);
        buf.push(0); // reserved
    }

    pub fn read_from(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < Self::WIRE_LEN {
            return None;
        }
        let width_byte = bytes[2];
        let color_bit_depth = if width_byte & 0x01 != 0 { 16 } else { 8 };
        let xy_bit_depth = if width_byte & 0x02 != 0 { 16 } else { 8 };
        Some(Self {
            service_id: bytes[0],
            channel_id: bytes[1],
            color_bit_depth,
            xy_bit_depth,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_bytes() {
        let cfg = OutputConfig::make(16, 8).unwrap();
        let descriptor = ChannelConfigDescriptor::new(3, 7, cfg);
        let mut buf = Vec::new();
        descriptor.write_to(&mut buf);
        assert_eq!(buf.len(), ChannelConfigDescriptor::WIRE_LEN);

        let decoded = ChannelConfigDescriptor::read_from(&buf).unwrap();
        assert_eq!(decoded.service_id, 3);
        assert_eq!(decoded.channel_id, 7);
        assert_eq!(decoded.color_bit_depth, 16);
        assert_eq!(decoded.xy_bit_depth, 8);
    }

    #[test]
    fn rejects_truncated_bytes() {
        assert!(ChannelConfigDescriptor::read_from(&[1, 2]).is_none());
    }
}
