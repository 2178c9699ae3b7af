//! The [`Encode`] trait shared by every request packet.

use crate::error::{Error, Result, Violation};
use crate::fields::Writer;
use crate::header::FixedHeader;
use heapless::Vec;

/// A client-to-server packet that can be packed into a byte buffer.
///
/// Implementors describe a packet in three parts: validation, the fixed
/// header, and the body. The provided methods tie them together so that
/// every packet obeys the same contract:
///
/// * all validation happens before any byte is written
/// * the whole packet size is known before any byte is written
/// * on error the destination buffer is left untouched
///
/// # Examples
///
/// ```rust
/// use mqttpack::{Encode, Error, Publish};
///
/// let publish = Publish::new("sensors/temperature", b"23.5");
/// let mut buf = [0u8; 64];
///
/// let n = publish.encode(&mut buf).unwrap();
/// assert_eq!(n, publish.encoded_len().unwrap());
///
/// // One byte short: nothing is written.
/// assert_eq!(publish.encode(&mut buf[..n - 1]), Err(Error::BufferTooSmall));
/// ```
pub trait Encode {
    /// Check cross-field rules. Runs before anything else.
    fn validate(&self) -> Result<()> {
        Ok(())
    }

    /// The fixed header for this packet.
    fn fixed_header(&self) -> Result<FixedHeader>;

    /// Exact number of bytes following the fixed header.
    fn remaining_length(&self) -> Result<usize>;

    /// Write the variable header and payload.
    ///
    /// Only called once the whole packet is known to fit.
    fn encode_body(&self, writer: &mut Writer<'_>) -> Result<()>;

    /// Exact size of the encoded packet, without encoding it.
    fn encoded_len(&self) -> Result<usize> {
        self.validate()?;
        let header = self.fixed_header()?;
        header.packet_len(self.remaining_length()?)
    }

    /// Pack the packet into `buf` and return the number of bytes written.
    ///
    /// # Errors
    ///
    /// * [`Error::BufferTooSmall`] - `buf` cannot hold the whole packet
    /// * [`Error::ProtocolViolation`] - the request is not a legal packet
    fn encode(&self, buf: &mut [u8]) -> Result<usize> {
        let result = pack(self, buf);
        if let Err(Error::ProtocolViolation(v)) = &result {
            log_refused(*v);
        }
        result
    }

    /// Pack the packet into a fresh fixed-capacity vector.
    ///
    /// A packet larger than `N` bytes is reported as [`Error::BufferTooSmall`].
    fn encode_to_vec<const N: usize>(&self) -> Result<Vec<u8, N>>
    where
        Self: Sized,
    {
        let len = self.encoded_len()?;
        let mut out = Vec::new();
        out.resize(len, 0).map_err(|_| Error::BufferTooSmall)?;
        let n = self.encode(&mut out)?;
        out.truncate(n);
        Ok(out)
    }
}

fn pack<E: Encode + ?Sized>(packet: &E, buf: &mut [u8]) -> Result<usize> {
    packet.validate()?;
    let header = packet.fixed_header()?;
    let remaining = packet.remaining_length()?;
    let mut writer = Writer::new(buf);
    header.write(&mut writer, remaining)?;
    let body_start = writer.position();
    packet.encode_body(&mut writer)?;
    debug_assert_eq!(writer.position() - body_start, remaining);
    log_packed(&header, writer.position());
    Ok(writer.position())
}

#[cfg(feature = "defmt")]
fn log_packed(header: &FixedHeader, len: usize) {
    defmt::trace!("packed {} ({=usize} bytes)", header.control_type(), len);
}

#[cfg(not(feature = "defmt"))]
fn log_packed(_header: &FixedHeader, _len: usize) {}

#[cfg(feature = "defmt")]
fn log_refused(violation: Violation) {
    defmt::debug!("refused to pack: {}", violation);
}

#[cfg(not(feature = "defmt"))]
fn log_refused(_violation: Violation) {}
