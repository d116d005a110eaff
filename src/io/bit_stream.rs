//! Bit-level stream reader and writer
//!
//! Bits are packed most-significant-first within each byte, and multi-bit fields
//! are written most-significant bit first. Both ends have sticky error semantics:
//! the first failure is remembered and every later call returns a clone of it
//! without touching the underlying reader or writer.

use std::io::{Read, Write};

use crate::error::{HuffwireError, Result};

/// Maximum number of bits accepted by a single `write_bits` / `read_bits` call
pub const MAX_FIELD_BITS: u8 = 64;

#[inline]
fn low_mask(bits: u8) -> u8 {
    ((1u16 << bits) - 1) as u8
}

/// Bit stream writer over any [`std::io::Write`]
///
/// Completed bytes are handed to the inner writer one at a time; wrap it in a
/// `BufWriter` when the sink is unbuffered.
pub struct BitWriter<W: Write> {
    inner: W,
    pending: u8,
    pending_bits: u8,
    bits_written: u64,
    error: Option<HuffwireError>,
}

impl<W: Write> BitWriter<W> {
    /// Create a new bit writer
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            pending: 0,
            pending_bits: 0,
            bits_written: 0,
            error: None,
        }
    }

    #[inline]
    fn check(&self) -> Result<()> {
        match &self.error {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    /// Poison the stream. The first recorded error wins; the recorded error is returned.
    pub fn fail(&mut self, err: HuffwireError) -> HuffwireError {
        self.error.get_or_insert(err).clone()
    }

    /// The sticky error, if the stream has failed
    pub fn error(&self) -> Option<&HuffwireError> {
        self.error.as_ref()
    }

    fn emit(&mut self) -> Result<()> {
        let byte = self.pending;
        self.pending = 0;
        self.pending_bits = 0;
        match self.inner.write_all(&[byte]) {
            Ok(()) => Ok(()),
            Err(e) => Err(self.fail(e.into())),
        }
    }

    /// Write the low `count` bits of `value`, most significant first
    pub fn write_bits(&mut self, value: u64, count: u8) -> Result<()> {
        self.check()?;
        if count > MAX_FIELD_BITS {
            return Err(self.fail(HuffwireError::invalid_data(format!(
                "Cannot write more than {} bits at once: {}",
                MAX_FIELD_BITS, count
            ))));
        }

        let mut remaining = count;
        while remaining > 0 {
            let free = 8 - self.pending_bits;
            let take = free.min(remaining);
            let chunk = (value >> (remaining - take)) as u8 & low_mask(take);
            self.pending |= chunk << (free - take);
            self.pending_bits += take;
            self.bits_written += take as u64;
            remaining -= take;

            if self.pending_bits == 8 {
                self.emit()?;
            }
        }
        Ok(())
    }

    /// Write a single bit
    #[inline]
    pub fn write_bit(&mut self, bit: bool) -> Result<()> {
        self.write_bits(bit as u64, 1)
    }

    /// Write a boolean as one bit (`true` = 1)
    #[inline]
    pub fn write_bool(&mut self, value: bool) -> Result<()> {
        self.write_bit(value)
    }

    /// Write a whole byte, not necessarily on a byte boundary
    #[inline]
    pub fn write_byte(&mut self, byte: u8) -> Result<()> {
        self.write_bits(byte as u64, 8)
    }

    /// Write every byte of `data`
    pub fn write_bytes(&mut self, data: &[u8]) -> Result<()> {
        if self.pending_bits == 0 {
            self.check()?;
            if let Err(e) = self.inner.write_all(data) {
                return Err(self.fail(e.into()));
            }
            self.bits_written += data.len() as u64 * 8;
            return Ok(());
        }
        for &byte in data {
            self.write_byte(byte)?;
        }
        Ok(())
    }

    /// Pad with zero bits up to the next byte boundary, returning the number of bits skipped
    pub fn align(&mut self) -> Result<u8> {
        self.check()?;
        if self.pending_bits == 0 {
            return Ok(0);
        }
        let skipped = 8 - self.pending_bits;
        self.write_bits(0, skipped)?;
        Ok(skipped)
    }

    /// Total number of bits accepted so far, including the pending partial byte
    pub fn bits_written(&self) -> u64 {
        self.bits_written
    }

    /// Flush the inner writer. A pending partial byte stays buffered.
    pub fn flush(&mut self) -> Result<()> {
        self.check()?;
        match self.inner.flush() {
            Ok(()) => Ok(()),
            Err(e) => Err(self.fail(e.into())),
        }
    }

    /// Pad the last byte with zero bits, flush and return the inner writer
    pub fn finish(mut self) -> Result<W> {
        self.align()?;
        self.flush()?;
        Ok(self.inner)
    }

    /// Borrow the inner writer
    pub fn get_ref(&self) -> &W {
        &self.inner
    }
}

/// Bit stream reader over any [`std::io::Read`]
///
/// Bytes are pulled from the inner reader one at a time; wrap it in a
/// `BufReader` when the source is unbuffered.
pub struct BitReader<R: Read> {
    inner: R,
    current: u8,
    available: u8,
    bits_read: u64,
    error: Option<HuffwireError>,
}

impl<R: Read> BitReader<R> {
    /// Create a new bit reader
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            current: 0,
            available: 0,
            bits_read: 0,
            error: None,
        }
    }

    #[inline]
    fn check(&self) -> Result<()> {
        match &self.error {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    /// Poison the stream. The first recorded error wins; the recorded error is returned.
    pub fn fail(&mut self, err: HuffwireError) -> HuffwireError {
        self.error.get_or_insert(err).clone()
    }

    /// The sticky error, if the stream has failed
    pub fn error(&self) -> Option<&HuffwireError> {
        self.error.as_ref()
    }

    fn fill(&mut self) -> Result<()> {
        let mut byte = [0u8; 1];
        match self.inner.read_exact(&mut byte) {
            Ok(()) => {
                self.current = byte[0];
                self.available = 8;
                Ok(())
            }
            Err(e) => Err(self.fail(e.into())),
        }
    }

    /// Read `count` bits, most significant first
    pub fn read_bits(&mut self, count: u8) -> Result<u64> {
        self.check()?;
        if count > MAX_FIELD_BITS {
            return Err(self.fail(HuffwireError::invalid_data(format!(
                "Cannot read more than {} bits at once: {}",
                MAX_FIELD_BITS, count
            ))));
        }

        let mut value = 0u64;
        let mut remaining = count;
        while remaining > 0 {
            if self.available == 0 {
                self.fill()?;
            }
            let take = self.available.min(remaining);
            let chunk = (self.current >> (self.available - take)) & low_mask(take);
            value = (value << take) | chunk as u64;
            self.available -= take;
            self.bits_read += take as u64;
            remaining -= take;
        }
        Ok(value)
    }

    /// Read a single bit
    #[inline]
    pub fn read_bit(&mut self) -> Result<bool> {
        Ok(self.read_bits(1)? == 1)
    }

    /// Read a boolean stored as one bit
    #[inline]
    pub fn read_bool(&mut self) -> Result<bool> {
        self.read_bit()
    }

    /// Read a whole byte, not necessarily on a byte boundary
    #[inline]
    pub fn read_byte(&mut self) -> Result<u8> {
        Ok(self.read_bits(8)? as u8)
    }

    /// Fill `buf` completely
    pub fn read_bytes(&mut self, buf: &mut [u8]) -> Result<()> {
        if self.available == 0 {
            self.check()?;
            if let Err(e) = self.inner.read_exact(buf) {
                return Err(self.fail(e.into()));
            }
            self.bits_read += buf.len() as u64 * 8;
            return Ok(());
        }
        for slot in buf.iter_mut() {
            *slot = self.read_byte()?;
        }
        Ok(())
    }

    /// Discard the rest of the current byte, returning the number of bits skipped
    pub fn align(&mut self) -> Result<u8> {
        self.check()?;
        let skipped = self.available;
        self.available = 0;
        self.bits_read += skipped as u64;
        Ok(skipped)
    }

    /// Total number of bits consumed so far
    pub fn bits_read(&self) -> u64 {
        self.bits_read
    }

    /// Return the inner reader. Bits left in a partially consumed byte are lost.
    pub fn into_inner(self) -> R {
        self.inner
    }
}
