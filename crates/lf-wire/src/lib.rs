//! lf-wire: bit-exact IDN-Hello / IDN-Stream packet construction (§4.C, §6).
//!
//! Every outgoing UDP datagram is an IDN-Hello envelope — a fixed 4-byte
//! header (command, flags, big-endian sequence) — wrapping one of three
//! payload shapes: a channel data message, a channel data message with a
//! channel configuration descriptor prepended, or a channel close message.
//!
//! This crate only assembles bytes; it owns no socket. `lf-engine` drives
//! it from the streaming loop.

mod close;
mod command;
mod config_descriptor;
mod data_message;
mod header;

pub use close::*;
pub use command::*;
pub use config_descriptor::*;
pub use data_message::*;
pub use header::*;

use lf_core::{Frame, OutputConfig};

/// Assembles a complete channel-data datagram: IDN-Hello header + (optional
/// config descriptor) + point payload.
///
/// `timestamp_us` is relative to the engine's `start_time_ns` (§4.C); the
/// caller is responsible for wrapping it into the 32-bit field and for
/// tracking whether the 200ms republish ceiling has elapsed.
pub fn build_data_datagram(
    sequence: u16,
    timestamp_us: u32,
    channel_id: u8,
    service_id: u8,
    output_config: &OutputConfig,
    frame: &Frame,
    with_config: bool,
) -> Vec<u8> {
    let header = IdnHelloHeader::new(Command::ChannelMessage, sequence, with_config);
    let mut buf = Vec::with_capacity(header.wire_len() + 256);
    header.write_to(&mut buf);

    if with_config {
        let descriptor = ChannelConfigDescriptor::new(service_id, channel_id, *output_config);
        descriptor.write_to(&mut buf);
    }

    let message = ChannelDataMessage::new(channel_id, timestamp_us, frame);
    message.write_to(&mut buf, output_config);
    buf
}

/// Assembles a channel close datagram (§4.C, §4.I stop sequence).
pub fn build_close_datagram(sequence: u16, channel_id: u8, service_id: u8) -> Vec<u8> {
    let header = IdnHelloHeader::new(Command::CloseChannelRequest, sequence, false);
    let mut buf = Vec::with_capacity(header.wire_len() + ChannelClose::WIRE_LEN);
    header.write_to(&mut buf);
    ChannelClose::new(channel_id, service_id).write_to(&mut buf);
    buf
}

#[cfg(test)]
mod tests {
    use super::*;
    use lf_core::Point;

    #[test]
    fn data_datagram_starts_with_hello_header() {
        let cfg = OutputConfig::default();
        let frame = Frame::empty();
        let datagram = build_data_datagram(7, 1_000, 0, 0, &cfg, &frame, false);
        assert_eq!(datagram[0], Command::ChannelMessage as u8);
        // sequence big-endian at offset 2..4
        assert_eq!(u16::from_be_bytes([datagram[2], datagram[3]]), 7);
    }

    #[test]
    fn with_config_flag_is_reflected_in_header_flags() {
        let cfg = OutputConfig::default();
        let frame = Frame::empty();
        let plain = build_data_datagram(0, 0, 0, 0, &cfg, &frame, false);
        let prefixed = build_data_datagram(0, 0, 0, 0, &cfg, &frame, true);
        assert_eq!(plain[1] & CONFIG_PREPENDED_FLAG, 0);
        assert_ne!(prefixed[1] & CONFIG_PREPENDED_FLAG, 0);
        assert!(prefixed.len() > plain.len());
    }

    #[test]
    fn close_datagram_uses_close_command() {
        let datagram = build_close_datagram(42, 3, 1);
        assert_eq!(datagram[0], Command::CloseChannelRequest as u8);
        assert_eq!(u16::from_be_bytes([datagram[2], datagram[3]]), 42);
    }

    #[test]
    fn data_datagram_round_trips_points() {
        let cfg = OutputConfig::make(16, 16).unwrap();
        let frame = Frame::from_points(vec![Point::new(100, -100, 1000, 2000, 3000)]);
        let datagram = build_data_datagram(1, 0, 2, 5, &cfg, &frame, false);
        let decoded = ChannelDataMessage::read_from(
            &datagram[IdnHelloHeader::WIRE_LEN..],
            &cfg,
        )
        .expect("decode");
        assert_eq!(decoded.frame.points.len(), 1);
        assert_eq!(decoded.frame.points[0].x, 100);
        assert_eq!(decoded.frame.points[0].y, -100);
    }
}
