//! Entropy coding
//!
//! Static prefix (Huffman) codes over small fixed alphabets, and the shared
//! tables the value codec is built on.

pub mod prefix_code;
pub mod static_tables;

pub use prefix_code::{Code, PrefixCodeTable, WeightedAlphabet, MAX_CODE_LEN};
pub use static_tables::{tables, StaticTables, ASCII_END, BYTES_END};
