//! Value encoder

use std::io::Write;

use super::{selector_len, symbol_class, Value, ValueKind, SYMBOL_WIDTHS};
use crate::entropy::{tables, StaticTables, ASCII_END, BYTES_END};
use crate::error::{HuffwireError, Result};
use crate::io::BitWriter;

/// Writes tagged values to a bit stream
///
/// After any write fails, the encoder keeps returning that same error.
pub struct Encoder<W: Write> {
    writer: BitWriter<W>,
    tables: &'static StaticTables,
}

impl<W: Write> Encoder<W> {
    /// Create an encoder writing to `inner`
    pub fn new(inner: W) -> Self {
        Self::from_bit_writer(BitWriter::new(inner))
    }

    /// Create an encoder on top of an existing bit writer, continuing at its bit position
    pub fn from_bit_writer(writer: BitWriter<W>) -> Self {
        Self {
            writer,
            tables: tables(),
        }
    }

    #[inline]
    fn write_kind(&mut self, kind: ValueKind) -> Result<()> {
        self.tables.kinds.encode(&mut self.writer, kind as usize)
    }

    /// Write 7-bit text. Bytes with the high bit set are dropped.
    pub fn write_ascii(&mut self, text: impl AsRef<[u8]>) -> Result<()> {
        let tables = self.tables;
        let ascii = &tables.ascii;
        self.write_kind(ValueKind::Ascii)?;
        for &byte in text.as_ref() {
            if byte >= 0x80 {
                continue;
            }
            ascii.encode(&mut self.writer, byte as usize)?;
        }
        ascii.encode(&mut self.writer, ASCII_END)
    }

    /// Write arbitrary bytes with the full byte table
    pub fn write_utf8(&mut self, text: impl AsRef<[u8]>) -> Result<()> {
        let tables = self.tables;
        let bytes = &tables.bytes;
        self.write_kind(ValueKind::Utf8)?;
        for &byte in text.as_ref() {
            bytes.encode(&mut self.writer, byte as usize)?;
        }
        bytes.encode(&mut self.writer, BYTES_END)
    }

    /// Write literal bytes terminated by a zero byte. Embedded zero bytes are dropped.
    pub fn write_raw(&mut self, text: impl AsRef<[u8]>) -> Result<()> {
        self.write_kind(ValueKind::Raw)?;
        for &byte in text.as_ref() {
            if byte == 0 {
                continue;
            }
            self.writer.write_byte(byte)?;
        }
        self.writer.write_byte(0)
    }

    /// Write text with the cheapest representation that keeps it intact
    ///
    /// All bytes below 128 go as ascii, otherwise zero-free content goes raw,
    /// and anything else goes through the full byte table.
    /// Returns the kind that was written.
    pub fn write_encoded(&mut self, text: impl AsRef<[u8]>) -> Result<ValueKind> {
        let text = text.as_ref();
        let has_high = text.iter().any(|&b| b >= 0x80);
        let has_zero = text.contains(&0);

        let kind = if !has_high {
            ValueKind::Ascii
        } else if !has_zero {
            ValueKind::Raw
        } else {
            ValueKind::Utf8
        };
        log::trace!("write_encoded: {} bytes as {}", text.len(), kind);

        match kind {
            ValueKind::Ascii => self.write_ascii(text)?,
            ValueKind::Raw => self.write_raw(text)?,
            _ => self.write_utf8(text)?,
        }
        Ok(kind)
    }

    /// Write an unsigned integer with a unary width selector and 4/8/16/32 payload bits
    pub fn write_symbol(&mut self, value: u32) -> Result<()> {
        self.write_kind(ValueKind::Symbol)?;
        let class = symbol_class(value);
        let len = selector_len(class);
        // `class` ones, then a terminating zero unless all three selector bits are ones
        let selector = ((1u64 << class) - 1) << (len as usize - class);
        self.writer.write_bits(selector, len)?;
        self.writer.write_bits(value as u64, SYMBOL_WIDTHS[class])
    }

    /// Write a value using its own kind
    ///
    /// Ascii and raw values are written as given, so bytes those kinds cannot
    /// carry are dropped.
    pub fn write_value(&mut self, value: &Value) -> Result<()> {
        match value {
            Value::Ascii(b) => self.write_ascii(b),
            Value::Utf8(b) => self.write_utf8(b),
            Value::Raw(b) => self.write_raw(b),
            Value::Symbol(v) => self.write_symbol(*v),
        }
    }

    /// Write one untagged byte
    pub fn write_byte(&mut self, byte: u8) -> Result<()> {
        self.writer.write_byte(byte)
    }

    /// Write untagged bytes
    pub fn write_bytes(&mut self, data: &[u8]) -> Result<()> {
        self.writer.write_bytes(data)
    }

    /// Pad to the next byte boundary, returning the number of padding bits
    pub fn align(&mut self) -> Result<u8> {
        self.writer.align()
    }

    /// Total bits written so far
    pub fn bits_written(&self) -> u64 {
        self.writer.bits_written()
    }

    /// The sticky error, if the stream has failed
    pub fn error(&self) -> Option<&HuffwireError> {
        self.writer.error()
    }

    /// Flush whole bytes to the inner writer
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()
    }

    /// Pad the last byte, flush and return the inner writer
    pub fn finish(self) -> Result<W> {
        self.writer.finish()
    }
}
