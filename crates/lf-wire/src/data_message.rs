//! Channel data message: point payload in the negotiated wire format (§4.C).
//!
//! Layout: `[channel_id:1][timestamp:4 BE us][point_count:2 BE][points...]`.
//! Each point is encoded as `x, y` (1 or 2 bytes each, per `xy_bit_depth`)
//! followed by `r, g, b` (1 or 2 bytes each, per `color_bit_depth`),
//! mirroring the manual big-endian sample packing used for other wire
//! payloads in this codebase.

use lf_core::{Frame, OutputConfig, Point};

#[derive(Debug, Clone, PartialEq)]
pub struct ChannelDataMessage<'a> {
    pub channel_id: u8,
    pub timestamp_us: u32,
    pub frame: &'a Frame,
}

/// An owned, decoded data message (used by tests and by any future peer
/// that needs to parse what this core sent).
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedDataMessage {
    pub channel_id: u8,
    pub timestamp_us: u32,
    pub frame: Frame,
}

impl<'a> ChannelDataMessage<'a> {
    pub const HEADER_LEN: usize = 1 + 4 + 2;

    pub fn new(channel_id: u8, timestamp_us: u32, frame: &'a Frame) -> Self {
        Self {
            channel_id,
            timestamp_us,
            frame,
        }
    }

    pub fn write_to(&self, buf: &mut Vec<u8>, output_config: &OutputConfig) {
        buf.push(self.channel_id);
        buf.extend_from_slice(&self.timestamp_us.to_be_bytes());
        let count = self.frame.points.len() as u16;
        buf.extend_from_slice(&count.to_be_bytes());
        for point in &self.frame.points {
            encode_point(buf, point, output_config);
        }
    }

    pub fn read_from(bytes: &[u8], output_config: &OutputConfig) -> Option<DecodedDataMessage> {
        if bytes.len() < Self::HEADER_LEN {
            return None;
        }
        let channel_id = bytes[0];
        let timestamp_us = u32::from_be_bytes([bytes[1], bytes[2], bytes[3], bytes[4]]);
        let count = u16::from_be_bytes([bytes[5], bytes[6]]) as usize;
        let mut cursor = Self::HEADER_LEN;
        let stride = point_wire_len(output_config);
        let mut points = Vec::with_capacity(count);
        for _ in 0..count {
            let slice = bytes.get(cursor..cursor + stride)?;
            points.push(decode_point(slice, output_config));
            cursor += stride;
        }
        Some(DecodedDataMessage {
            channel_id,
            timestamp_us,
            frame: Frame::from_points(points),
        })
    }
}

fn coord_len(bits: u8) -> usize {
    if bits == 16 { 2 } else { 1 }
}

fn point_wire_len(output_config: &OutputConfig) -> usize {
    2 * coord_len(output_config.xy_bit_depth()) + 3 * coord_len(output_config.color_bit_depth())
}

fn encode_coord(buf: &mut Vec<u8>, value: i16, bits: u8) {
    if bits == 16 {
        buf.extend_from_slice(&value.to_be_bytes());
    } else {
        // Narrow to 8 bits by taking the high byte, preserving sign.
        buf.push((value >> 8) as u8);
    }
}

fn decode_coord(bytes: &[u8], bits: u8) -> i16 {
    if bits == 16 {
        i16::from_be_bytes([bytes[0], bytes[1]])
    } else {
        ((bytes[0] as i8) as i16) << 8
    }
}

fn encode_color_channel(buf: &mut Vec<u8>, value: u16, bits: u8) {
    if bits == 16 {
        buf.extend_from_slice(&value.to_be_bytes());
    } else {
        buf.push((value >> 8) as u8);
    }
}

fn decode_color_channel(bytes: &[u8], bits: u8) -> u16 {
    if bits == 16 {
        u16::from_be_bytes([bytes[0], bytes[1]])
    } else {
        (bytes[0] as u16) << 8
    }
}

fn encode_point(buf: &mut Vec<u8>, point: &Point, output_config: &OutputConfig) {
    let xy_bits = output_config.xy_bit_depth();
    let color_bits = output_config.color_bit_depth();
    encode_coord(buf, point.x, xy_bits);
    encode_coord(buf, point.y, xy_bits);
    encode_color_channel(buf, point.r, color_bits);
    encode_color_channel(buf, point.g, color_bits);
    encode_color_channel(buf, point.b, color_bits);
}

fn decode_point(bytes: &[u8], output_config: &OutputConfig) -> Point {
    let xy_bits = output_config.xy_bit_depth();
    let color_bits = output_config.color_bit_depth();
    let xy_stride = coord_len(xy_bits);
    let color_stride = coord_len(color_bits);

    let x = decode_coord(&bytes[0..xy_stride], xy_bits);
    let y = decode_coord(&bytes[xy_stride..2 * xy_stride], xy_bits);
    let mut cursor = 2 * xy_stride;
    let r = decode_color_channel(&bytes[cursor..cursor + color_stride], color_bits);
    cursor += color_stride;
    let g = decode_color_channel(&bytes[cursor..cursor + color_stride], color_bits);
    cursor += color_stride;
    let b = decode_color_channel(&bytes[cursor..cursor + color_stride], color_bits);

    Point::new(x, y, r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_frame_encodes_zero_point_count() {
        let frame = Frame::empty();
        let cfg = OutputConfig::default();
        let message = ChannelDataMessage::new(0, 0, &frame);
        let mut buf = Vec::new();
        message.write_to(&mut buf, &cfg);
        assert_eq!(buf.len(), ChannelDataMessage::HEADER_LEN);
        assert_eq!(u16::from_be_bytes([buf[5], buf[6]]), 0);
    }

    #[test]
    fn roundtrip_16_16() {
        let cfg = OutputConfig::make(16, 16).unwrap();
        let frame = Frame::from_points(vec![
            Point::new(12345, -12345, 1000, 2000, 65535),
            Point::new(0, 0, 0, 0, 0),
        ]);
        let message = ChannelDataMessage::new(2, 999, &frame);
        let mut buf = Vec::new();
        message.write_to(&mut buf, &cfg);
        let decoded = ChannelDataMessage::read_from(&buf, &cfg).unwrap();
        assert_eq!(decoded.channel_id, 2);
        assert_eq!(decoded.timestamp_us, 999);
        assert_eq!(decoded.frame, frame);
    }

    #[test]
    fn roundtrip_8_8_narrows_precision() {
        let cfg = OutputConfig::make(8, 8).unwrap();
        let frame = Frame::from_points(vec![Point::new(256, -256, 512, 1024, 2048)]);
        let message = ChannelDataMessage::new(0, 0, &frame);
        let mut buf = Vec::new();
        message.write_to(&mut buf, &cfg);
        assert_eq!(
            buf.len(),
            ChannelDataMessage::HEADER_LEN + point_wire_len(&cfg)
        );
        let decoded = ChannelDataMessage::read_from(&buf, &cfg).unwrap();
        // 8-bit narrowing loses the low byte; high byte round-trips exactly.
        assert_eq!(decoded.frame.points[0].x, 256);
        assert_eq!(decoded.frame.points[0].r, 512);
    }

    #[test]
    fn truncated_payload_fails_to_decode() {
        let cfg = OutputConfig::default();
        assert!(ChannelDataMessage::read_from(&[0; 3], &cfg).is_none());
    }
}
