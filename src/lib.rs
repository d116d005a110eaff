//! # Huffwire: Compact Bit-Packed Value Codec
//!
//! Serializes short text and small integers into a densely bit-packed stream,
//! using static Huffman tables tuned for mixed-case alphanumeric text.
//!
//! ## Key Features
//!
//! - **Prefix-Code Tables**: Deterministic Huffman tables over small integer alphabets
//! - **Adaptive Text Encoding**: Picks 7-bit, literal or full-byte coding per value
//! - **Variable-Width Integers**: Unary width selector with 4/8/16/32-bit payloads
//! - **Sticky Bit Streams**: The first I/O failure is reported by every later call
//!
//! ## Quick Start
//!
//! ```rust
//! use huffwire::{Decoder, Encoder, Value};
//! use std::io::Cursor;
//!
//! let mut encoder = Encoder::new(Vec::new());
//! encoder.write_encoded("Hello42").unwrap();
//! encoder.write_symbol(300).unwrap();
//! let bytes = encoder.finish().unwrap();
//!
//! let mut decoder = Decoder::new(Cursor::new(bytes));
//! assert_eq!(decoder.read_value().unwrap(), Value::Ascii(b"Hello42".to_vec()));
//! assert_eq!(decoder.read_u32().unwrap(), 300);
//! ```
//!
//! The stream has no header or length prefix, and the table weights are part of
//! the format: both sides must run the same version of this crate.

#![warn(missing_docs)]

pub mod codec;
pub mod config;
pub mod entropy;
pub mod error;
pub mod io;

// Re-export core types
pub use codec::{decode_values, encode_values, Decoder, Encoder, Value, ValueKind};
pub use config::{CodecConfig, Config};
pub use entropy::{tables, Code, PrefixCodeTable, StaticTables, WeightedAlphabet};
pub use error::{HuffwireError, Result};
pub use io::{BitReader, BitWriter};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build the shared prefix-code tables now instead of on first use
pub fn init() {
    log::debug!("Initializing huffwire v{}", VERSION);
    let _ = tables();
}
