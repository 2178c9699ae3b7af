//! Reference decoder for checking encoder output.
//!
//! Written against the MQTT v3.1.1 wire format directly, without reusing any
//! of the crate's encoding code.
#![allow(dead_code)]

/// A packet split into its fixed header and body.
#[derive(Debug)]
pub struct Frame<'a> {
    pub control_byte: u8,
    pub remaining_length: usize,
    pub header_len: usize,
    pub body: &'a [u8],
}

impl Frame<'_> {
    pub fn packet_type(&self) -> u8 {
        self.control_byte >> 4
    }

    pub fn flags(&self) -> u8 {
        self.control_byte & 0x0F
    }
}

/// Decode a remaining-length field, returning `(value, bytes_used)`.
pub fn decode_remaining_length(buf: &[u8]) -> (usize, usize) {
    let mut value = 0usize;
    let mut multiplier = 1usize;
    for (i, byte) in buf.iter().take(4).enumerate() {
        value += (*byte as usize & 0x7F) * multiplier;
        if byte & 0x80 == 0 {
            return (value, i + 1);
        }
        multiplier *= 128;
    }
    panic!("malformed remaining length: {:02x?}", &buf[..buf.len().min(4)]);
}

/// Split a complete packet. Panics if the body length disagrees with the header.
pub fn frame(packet: &[u8]) -> Frame<'_> {
    let (remaining_length, n) = decode_remaining_length(&packet[1..]);
    let header_len = 1 + n;
    assert_eq!(
        packet.len(),
        header_len + remaining_length,
        "remaining length does not match packet size"
    );
    Frame {
        control_byte: packet[0],
        remaining_length,
        header_len,
        body: &packet[header_len..],
    }
}

/// Cursor over a packet body.
pub struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub fn u8(&mut self) -> u8 {
        let v = self.buf[self.pos];
        self.pos += 1;
        v
    }

    pub fn u16(&mut self) -> u16 {
        let v = u16::from_be_bytes([self.buf[self.pos], self.buf[self.pos + 1]]);
        self.pos += 2;
        v
    }

    pub fn binary(&mut self) -> &'a [u8] {
        let len = self.u16() as usize;
        let v = &self.buf[self.pos..self.pos + len];
        self.pos += len;
        v
    }

    pub fn string(&mut self) -> &'a str {
        std::str::from_utf8(self.binary()).expect("invalid UTF-8")
    }

    pub fn rest(&mut self) -> &'a [u8] {
        let v = &self.buf[self.pos..];
        self.pos = self.buf.len();
        v
    }

    pub fn is_empty(&self) -> bool {
        self.pos == self.buf.len()
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct ConnectFields<'a> {
    pub protocol_name: &'a str,
    pub protocol_level: u8,
    pub flags: u8,
    pub keep_alive: u16,
    pub client_id: &'a str,
    pub will_topic: Option<&'a str>,
    pub will_message: Option<&'a [u8]>,
    pub user_name: Option<&'a str>,
    pub password: Option<&'a [u8]>,
}

pub fn decode_connect(packet: &[u8]) -> ConnectFields<'_> {
    let f = frame(packet);
    assert_eq!(f.control_byte, 0x10);
    let mut r = Reader::new(f.body);
    let protocol_name = r.string();
    let protocol_level = r.u8();
    let flags = r.u8();
    let keep_alive = r.u16();
    let client_id = r.string();
    let (will_topic, will_message) = if flags & 0x04 != 0 {
        (Some(r.string()), Some(r.binary()))
    } else {
        (None, None)
    };
    let user_name = (flags & 0x80 != 0).then(|| r.string());
    let password = (flags & 0x40 != 0).then(|| r.binary());
    assert!(r.is_empty(), "trailing bytes after CONNECT payload");
    ConnectFields {
        protocol_name,
        protocol_level,
        flags,
        keep_alive,
        client_id,
        will_topic,
        will_message,
        user_name,
        password,
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct PublishFields<'a> {
    pub dup: bool,
    pub qos: u8,
    pub retain: bool,
    pub topic_name: &'a str,
    pub packet_id: Option<u16>,
    pub message: &'a [u8],
}

pub fn decode_publish(packet: &[u8]) -> PublishFields<'_> {
    let f = frame(packet);
    assert_eq!(f.packet_type(), 3);
    let flags = f.flags();
    let qos = (flags >> 1) & 0x03;
    let mut r = Reader::new(f.body);
    let topic_name = r.string();
    let packet_id = (qos > 0).then(|| r.u16());
    PublishFields {
        dup: flags & 0x08 != 0,
        qos,
        retain: flags & 0x01 != 0,
        topic_name,
        packet_id,
        message: r.rest(),
    }
}

/// Decode a SUBSCRIBE into `(packet_id, [(filter, qos)])`.
pub fn decode_subscribe(packet: &[u8]) -> (u16, Vec<(&str, u8)>) {
    let f = frame(packet);
    assert_eq!(f.control_byte, 0x82);
    let mut r = Reader::new(f.body);
    let packet_id = r.u16();
    let mut entries = Vec::new();
    while !r.is_empty() {
        let filter = r.string();
        entries.push((filter, r.u8()));
    }
    (packet_id, entries)
}

/// Decode an UNSUBSCRIBE into `(packet_id, [filter])`.
pub fn decode_unsubscribe(packet: &[u8]) -> (u16, Vec<&str>) {
    let f = frame(packet);
    assert_eq!(f.control_byte, 0xA2);
    let mut r = Reader::new(f.body);
    let packet_id = r.u16();
    let mut filters = Vec::new();
    while !r.is_empty() {
        filters.push(r.string());
    }
    (packet_id, filters)
}
