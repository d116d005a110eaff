//! Value decoder

use std::io::Read;

use super::{Value, ValueKind, SYMBOL_WIDTHS};
use crate::config::{CodecConfig, Config};
use crate::entropy::{tables, PrefixCodeTable, StaticTables, ASCII_END, BYTES_END};
use crate::error::{HuffwireError, Result};
use crate::io::BitReader;

/// Reads tagged values from a bit stream
///
/// Read failures and protocol violations are sticky: once one occurs, every
/// later call returns the same error.
pub struct Decoder<R: Read> {
    reader: BitReader<R>,
    tables: &'static StaticTables,
    config: CodecConfig,
}

impl<R: Read> Decoder<R> {
    /// Create a decoder with the default configuration
    pub fn new(inner: R) -> Self {
        Self {
            reader: BitReader::new(inner),
            tables: tables(),
            config: CodecConfig::default(),
        }
    }

    /// Create a decoder with a validated configuration
    pub fn with_config(inner: R, config: CodecConfig) -> Result<Self> {
        Self::from_bit_reader(BitReader::new(inner), config)
    }

    /// Create a decoder on top of an existing bit reader, continuing at its bit position
    pub fn from_bit_reader(reader: BitReader<R>, config: CodecConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            reader,
            tables: tables(),
            config,
        })
    }

    /// Active configuration
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    fn poison(&mut self, err: HuffwireError) -> HuffwireError {
        log::warn!("decoder stream poisoned: {}", err);
        self.reader.fail(err)
    }

    fn push(&mut self, buf: &mut Vec<u8>, byte: u8) -> Result<()> {
        if let Some(limit) = self.config.max_value_len {
            if buf.len() >= limit {
                return Err(self.poison(HuffwireError::protocol(format!(
                    "decoded value exceeds {} bytes",
                    limit
                ))));
            }
        }
        buf.push(byte);
        Ok(())
    }

    fn read_coded(&mut self, table: &PrefixCodeTable, end: usize) -> Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(self.config.initial_capacity());
        loop {
            let symbol = table.decode(&mut self.reader)?;
            if symbol >= end {
                return Ok(buf);
            }
            self.push(&mut buf, symbol as u8)?;
        }
    }

    fn read_raw(&mut self) -> Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(self.config.initial_capacity());
        loop {
            let byte = self.reader.read_byte()?;
            if byte == 0 {
                return Ok(buf);
            }
            self.push(&mut buf, byte)?;
        }
    }

    fn read_symbol_body(&mut self) -> Result<u32> {
        let mut class = 0;
        while class < 3 && self.reader.read_bit()? {
            class += 1;
        }
        Ok(self.reader.read_bits(SYMBOL_WIDTHS[class])? as u32)
    }

    /// Read the next value of any kind
    pub fn read_value(&mut self) -> Result<Value> {
        let tables = self.tables;
        let symbol = tables.kinds.decode(&mut self.reader)?;
        match ValueKind::from_symbol(symbol) {
            Some(ValueKind::Ascii) => Ok(Value::Ascii(self.read_coded(&tables.ascii, ASCII_END)?)),
            Some(ValueKind::Utf8) => Ok(Value::Utf8(self.read_coded(&tables.bytes, BYTES_END)?)),
            Some(ValueKind::Raw) => Ok(Value::Raw(self.read_raw()?)),
            Some(ValueKind::Symbol) => Ok(Value::Symbol(self.read_symbol_body()?)),
            None => Err(self.poison(HuffwireError::protocol(format!(
                "unknown value tag {}",
                symbol
            )))),
        }
    }

    /// Read the next value, which must be text of any kind
    pub fn read_text(&mut self) -> Result<Vec<u8>> {
        let value = self.read_value()?;
        let kind = value.kind();
        value
            .into_bytes()
            .ok_or_else(|| HuffwireError::unexpected_kind("text", kind))
    }

    /// Read the next value, which must be a symbol
    pub fn read_u32(&mut self) -> Result<u32> {
        match self.read_value()? {
            Value::Symbol(v) => Ok(v),
            other => Err(HuffwireError::unexpected_kind("symbol", other.kind())),
        }
    }

    /// Read one untagged byte
    pub fn read_byte(&mut self) -> Result<u8> {
        self.reader.read_byte()
    }

    /// Fill `buf` with untagged bytes
    pub fn read_bytes(&mut self, buf: &mut [u8]) -> Result<()> {
        self.reader.read_bytes(buf)
    }

    /// Skip to the next byte boundary, returning the number of bits skipped
    pub fn align(&mut self) -> Result<u8> {
        self.reader.align()
    }

    /// Total bits consumed so far
    pub fn bits_read(&self) -> u64 {
        self.reader.bits_read()
    }

    /// The sticky error, if the stream has failed
    pub fn error(&self) -> Option<&HuffwireError> {
        self.reader.error()
    }

    /// Return the inner reader
    pub fn into_inner(self) -> R {
        self.reader.into_inner()
    }
}
