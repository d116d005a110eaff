//! Value kinds and decoded values

use std::fmt;

/// Discriminator written in front of every value
///
/// The discriminant is the symbol index in the kind tag table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// 7-bit text coded with the ASCII table
    Ascii = 0,
    /// Arbitrary bytes coded with the full byte table
    Utf8 = 1,
    /// Literal bytes terminated by a zero byte
    Raw = 2,
    /// Variable-width unsigned integer
    Symbol = 3,
}

impl ValueKind {
    /// Number of value kinds
    pub const COUNT: usize = 4;

    /// Map a tag table symbol back to a kind
    pub fn from_symbol(symbol: usize) -> Option<Self> {
        match symbol {
            0 => Some(Self::Ascii),
            1 => Some(Self::Utf8),
            2 => Some(Self::Raw),
            3 => Some(Self::Symbol),
            _ => None,
        }
    }

    /// Short lowercase name
    pub fn name(self) -> &'static str {
        match self {
            Self::Ascii => "ascii",
            Self::Utf8 => "utf8",
            Self::Raw => "raw",
            Self::Symbol => "symbol",
        }
    }

    /// Whether values of this kind carry bytes
    pub fn is_text(self) -> bool {
        !matches!(self, Self::Symbol)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One decoded (or to-be-encoded) value
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    /// Bytes below 128
    Ascii(Vec<u8>),
    /// Any bytes, including zero and high bytes
    Utf8(Vec<u8>),
    /// Bytes without embedded zeros
    Raw(Vec<u8>),
    /// Unsigned integer
    Symbol(u32),
}

impl Value {
    /// The kind tag this value is written with
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Ascii(_) => ValueKind::Ascii,
            Self::Utf8(_) => ValueKind::Utf8,
            Self::Raw(_) => ValueKind::Raw,
            Self::Symbol(_) => ValueKind::Symbol,
        }
    }

    /// Byte content of a text value
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Ascii(b) | Self::Utf8(b) | Self::Raw(b) => Some(b),
            Self::Symbol(_) => None,
        }
    }

    /// Consume a text value into its bytes
    pub fn into_bytes(self) -> Option<Vec<u8>> {
        match self {
            Self::Ascii(b) | Self::Utf8(b) | Self::Raw(b) => Some(b),
            Self::Symbol(_) => None,
        }
    }

    /// Integer content of a symbol value
    pub fn as_symbol(&self) -> Option<u32> {
        match self {
            Self::Symbol(v) => Some(*v),
            _ => None,
        }
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Self::Symbol(value)
    }
}
