//! Channel close message (§4.C, §4.I graceful stop).

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelClose {
    pub channel_id: u8,
    pub service_id: u8,
}

impl ChannelClose {
    pub const WIRE_LEN: usize = 2;

    pub fn new(channel_id: u8, service_id: u8) -> Self {
        Self {
            channel_id,
            service_id,
        }
    }

    pub fn write_to(&self, buf: &mut Vec<u8>) {
        buf.push(self.channel_id);
        buf.push(self.service_id);
    }

    pub fn read_from(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < Self::WIRE_LEN {
            return None;
        }
        Some(Self {
            channel_id: bytes[0],
            service_id: bytes[1],
        })
    }
}
