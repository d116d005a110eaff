//! Process-wide prefix-code tables used by the value codec
//!
//! The weights are part of the wire format: an encoder and decoder built with
//! different weights produce incompatible bit layouts without noticing.

use std::sync::OnceLock;

use crate::codec::ValueKind;
use crate::entropy::prefix_code::{PrefixCodeTable, WeightedAlphabet};
use crate::error::Result;

/// Terminator symbol of the 7-bit text alphabet
pub const ASCII_END: usize = 128;
/// Terminator symbol of the full byte alphabet
pub const BYTES_END: usize = 256;

const UPPER_WEIGHT: u64 = 20;
const LOWER_WEIGHT: u64 = 30;
const DIGIT_WEIGHT: u64 = 10;
const HIGH_BYTE_WEIGHT: u64 = 5;

/// The three shared tables
#[derive(Debug)]
pub struct StaticTables {
    /// Value-kind tag table, one symbol per [`ValueKind`]
    pub kinds: PrefixCodeTable,
    /// Bytes 0..=127 plus [`ASCII_END`]
    pub ascii: PrefixCodeTable,
    /// Bytes 0..=255 plus [`BYTES_END`]
    pub bytes: PrefixCodeTable,
}

static TABLES: OnceLock<StaticTables> = OnceLock::new();

/// Shared tables, built on first use
pub fn tables() -> &'static StaticTables {
    TABLES.get_or_init(|| {
        let tables = StaticTables::build().expect("built-in table weights always seal");
        log::debug!(
            "built static tables: kinds {} symbols (max {} bits), ascii {} symbols (max {} bits), bytes {} symbols (max {} bits)",
            tables.kinds.len(),
            tables.kinds.max_code_len(),
            tables.ascii.len(),
            tables.ascii.max_code_len(),
            tables.bytes.len(),
            tables.bytes.max_code_len()
        );
        tables
    })
}

fn weight_alphanumerics(alphabet: &mut WeightedAlphabet) -> Result<()> {
    alphabet.bump_range(b'A' as usize, b'Z' as usize, UPPER_WEIGHT)?;
    alphabet.bump_range(b'a' as usize, b'z' as usize, LOWER_WEIGHT)?;
    alphabet.bump_range(b'0' as usize, b'9' as usize, DIGIT_WEIGHT)?;
    Ok(())
}

impl StaticTables {
    /// Build a fresh copy of the tables
    ///
    /// Most callers want the shared instance from [`tables`].
    pub fn build() -> Result<Self> {
        let mut kinds = WeightedAlphabet::new(ValueKind::COUNT);
        kinds.bump(ValueKind::Ascii as usize, 16)?;
        kinds.bump(ValueKind::Utf8 as usize, 8)?;
        kinds.bump(ValueKind::Raw as usize, 4)?;

        let mut ascii = WeightedAlphabet::new(ASCII_END + 1);
        weight_alphanumerics(&mut ascii)?;

        let mut bytes = WeightedAlphabet::new(BYTES_END + 1);
        weight_alphanumerics(&mut bytes)?;
        bytes.bump_range(128, 255, HIGH_BYTE_WEIGHT)?;

        Ok(Self {
            kinds: kinds.seal()?,
            ascii: ascii.seal()?,
            bytes: bytes.seal()?,
        })
    }
}
