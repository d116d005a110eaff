//! Tagged value codec
//!
//! Every value is a kind tag (coded with the kind table) followed by a body:
//!
//! | Kind   | Body |
//! |--------|------|
//! | ascii  | ASCII-table codes, then the code for [`ASCII_END`](crate::entropy::ASCII_END) |
//! | utf8   | byte-table codes, then the code for [`BYTES_END`](crate::entropy::BYTES_END) |
//! | raw    | literal bytes without zeros, then one literal zero byte |
//! | symbol | unary width selector `0`/`10`/`110`/`111`, then 4/8/16/32 payload bits |
//!
//! Values are packed back to back with no padding, length prefix or stream header.

pub mod decoder;
pub mod encoder;
pub mod value;

pub use decoder::Decoder;
pub use encoder::Encoder;
pub use value::{Value, ValueKind};

use std::io::Cursor;

use crate::error::Result;

/// Payload widths of the symbol encoding, indexed by the number of leading `1` selector bits
pub const SYMBOL_WIDTHS: [u8; 4] = [4, 8, 16, 32];

/// Width class of `value`: the index into [`SYMBOL_WIDTHS`]
#[inline]
pub fn symbol_class(value: u32) -> usize {
    if value < 1 << 4 {
        0
    } else if value < 1 << 8 {
        1
    } else if value < 1 << 16 {
        2
    } else {
        3
    }
}

/// Bits taken by a symbol body (selector plus payload), excluding the kind tag
#[inline]
pub fn symbol_body_bits(value: u32) -> u8 {
    let class = symbol_class(value);
    selector_len(class) + SYMBOL_WIDTHS[class]
}

#[inline]
fn selector_len(class: usize) -> u8 {
    (class as u8 + 1).min(3)
}

/// Encode `values` into a byte vector, zero-padding the final byte
pub fn encode_values(values: &[Value]) -> Result<Vec<u8>> {
    let mut encoder = Encoder::new(Vec::new());
    for value in values {
        encoder.write_value(value)?;
    }
    encoder.finish()
}

/// Decode `count` values from `data`
///
/// Streams carry no value count, so the caller provides it.
pub fn decode_values(data: &[u8], count: usize) -> Result<Vec<Value>> {
    let mut decoder = Decoder::new(Cursor::new(data));
    (0..count).map(|_| decoder.read_value()).collect()
}
