//! Bit-level I/O
//!
//! Sticky-error bit streams over any `std::io::Read` / `std::io::Write`.

pub mod bit_stream;

pub use bit_stream::{BitReader, BitWriter, MAX_FIELD_BITS};
