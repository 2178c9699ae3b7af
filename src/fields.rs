//! Primitive field encoders.
//!
//! MQTT v3.1.1 builds every packet out of three field shapes:
//!
//! - 16-bit big-endian integers (packet identifiers, keep-alive, lengths)
//! - UTF-8 strings with a 2-byte big-endian length prefix
//! - binary data with the same 2-byte length prefix
//!
//! Each encoder takes the remaining slice of the destination and either writes
//! the whole field or writes nothing and returns [`Error::BufferTooSmall`].

use crate::error::{Error, Result, Violation};

/// Longest string or binary field a 2-byte length prefix can describe.
pub const MAX_FIELD_LEN: usize = u16::MAX as usize;

/// Encoded size of a length-prefixed string.
pub fn string_len(s: &str) -> Result<usize> {
    if s.len() > MAX_FIELD_LEN {
        return Err(Violation::StringTooLong.into());
    }
    Ok(2 + s.len())
}

/// Encoded size of a length-prefixed binary field.
pub fn binary_len(data: &[u8]) -> Result<usize> {
    if data.len() > MAX_FIELD_LEN {
        return Err(Violation::BinaryTooLong.into());
    }
    Ok(2 + data.len())
}

/// Write `value` big-endian into the first two bytes of `buf`.
pub fn encode_u16(buf: &mut [u8], value: u16) -> Result<usize> {
    if buf.len() < 2 {
        return Err(Error::BufferTooSmall);
    }
    buf[..2].copy_from_slice(&value.to_be_bytes());
    Ok(2)
}

/// Write a length-prefixed UTF-8 string.
///
/// ```rust
/// use mqttpack::fields::encode_str;
///
/// let mut buf = [0u8; 6];
/// assert_eq!(encode_str(&mut buf, "MQTT"), Ok(6));
/// assert_eq!(buf, [0x00, 0x04, b'M', b'Q', b'T', b'T']);
/// ```
pub fn encode_str(buf: &mut [u8], s: &str) -> Result<usize> {
    let len = string_len(s)?;
    write_prefixed(buf, s.as_bytes(), len)
}

/// Write a length-prefixed binary field.
pub fn encode_binary(buf: &mut [u8], data: &[u8]) -> Result<usize> {
    let len = binary_len(data)?;
    write_prefixed(buf, data, len)
}

fn write_prefixed(buf: &mut [u8], data: &[u8], len: usize) -> Result<usize> {
    if buf.len() < len {
        return Err(Error::BufferTooSmall);
    }
    buf[..2].copy_from_slice(&(data.len() as u16).to_be_bytes());
    buf[2..len].copy_from_slice(data);
    Ok(len)
}

/// A forward-only cursor over a destination buffer.
///
/// Packet encoders check up front that the whole packet fits, then emit their
/// fields through a `Writer`. Every `put_*` call is still bounds checked and
/// leaves the buffer untouched when the field does not fit.
#[derive(Debug)]
pub struct Writer<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> Writer<'a> {
    /// Start writing at the beginning of `buf`.
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Number of bytes written so far.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Number of bytes still available.
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Write a single byte.
    pub fn put_u8(&mut self, value: u8) -> Result<()> {
        let slot = self.buf.get_mut(self.pos).ok_or(Error::BufferTooSmall)?;
        *slot = value;
        self.pos += 1;
        Ok(())
    }

    /// Write a big-endian 16-bit integer.
    pub fn put_u16(&mut self, value: u16) -> Result<()> {
        self.pos += encode_u16(&mut self.buf[self.pos..], value)?;
        Ok(())
    }

    /// Write a length-prefixed string.
    pub fn put_str(&mut self, s: &str) -> Result<()> {
        self.pos += encode_str(&mut self.buf[self.pos..], s)?;
        Ok(())
    }

    /// Write a length-prefixed binary field.
    pub fn put_binary(&mut self, data: &[u8]) -> Result<()> {
        self.pos += encode_binary(&mut self.buf[self.pos..], data)?;
        Ok(())
    }

    /// Write raw bytes with no length prefix.
    pub fn put_slice(&mut self, data: &[u8]) -> Result<()> {
        if self.remaining() < data.len() {
            return Err(Error::BufferTooSmall);
        }
        self.buf[self.pos..self.pos + data.len()].copy_from_slice(data);
        self.pos += data.len();
        Ok(())
    }

    /// Let `f` write into the unwritten tail, then advance by the count it returns.
    pub(crate) fn put_with<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce(&mut [u8]) -> Result<usize>,
    {
        self.pos += f(&mut self.buf[self.pos..])?;
        Ok(())
    }
}
