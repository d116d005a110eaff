//! Static prefix-code (Huffman) tables over small integer alphabets
//!
//! A table goes through two phases:
//! - [`WeightedAlphabet`]: every symbol starts at weight 1 and weights can only be bumped.
//! - [`PrefixCodeTable`]: produced by [`WeightedAlphabet::seal`], immutable afterwards and
//!   safe to share between threads.
//!
//! Construction is deterministic. Nodes are merged lightest first; equal weights are
//! ordered by creation, leaves in symbol order before any internal node, internal
//! nodes in merge order. The first node taken becomes the `0` branch.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::fmt;
use std::io::{Read, Write};

use crate::error::{check_bounds, check_range, HuffwireError, Result};
use crate::io::{BitReader, BitWriter};

/// Longest code a sealed table may contain
pub const MAX_CODE_LEN: u8 = 64;

/// Bit pattern assigned to one symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Code {
    /// Code bits, right-aligned; the first bit on the wire is bit `len - 1`
    pub bits: u64,
    /// Number of significant bits
    pub len: u8,
}

impl Code {
    /// Whether `self` is a bit-prefix of `other` (a code is a prefix of itself)
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        if self.len == 0 {
            return true;
        }
        self.len <= other.len && other.bits >> (other.len - self.len) == self.bits
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in (0..self.len).rev() {
            let bit = (self.bits >> i) & 1;
            write!(f, "{}", bit)?;
        }
        Ok(())
    }
}

/// Symbol weights of a table still under construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightedAlphabet {
    weights: Vec<u64>,
}

impl WeightedAlphabet {
    /// Create an alphabet of `n` symbols, each with baseline weight 1
    pub fn new(n: usize) -> Self {
        Self { weights: vec![1; n] }
    }

    /// Number of symbols
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Whether the alphabet has no symbols
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Current weight of `symbol`
    pub fn weight(&self, symbol: usize) -> Option<u64> {
        self.weights.get(symbol).copied()
    }

    /// Add `amount` to the weight of one symbol
    pub fn bump(&mut self, symbol: usize, amount: u64) -> Result<()> {
        check_bounds(symbol, self.weights.len())?;
        self.weights[symbol] = self.weights[symbol].saturating_add(amount);
        Ok(())
    }

    /// Add `amount` to every symbol in the inclusive range `lo..=hi`
    pub fn bump_range(&mut self, lo: usize, hi: usize, amount: u64) -> Result<()> {
        check_range(lo, hi, self.weights.len())?;
        for weight in &mut self.weights[lo..=hi] {
            *weight = weight.saturating_add(amount);
        }
        Ok(())
    }

    /// Build the prefix tree and cache every symbol's code
    pub fn seal(self) -> Result<PrefixCodeTable> {
        if self.weights.is_empty() {
            return Err(HuffwireError::configuration(
                "cannot build a prefix code over an empty alphabet",
            ));
        }

        let n = self.weights.len();
        let mut nodes: Vec<Node> = (0..n).map(Node::Leaf).collect();
        nodes.reserve(n - 1);

        // (weight, node index); the index doubles as creation order for ties
        let mut heap: BinaryHeap<Reverse<(u64, usize)>> = self
            .weights
            .iter()
            .enumerate()
            .map(|(symbol, &weight)| Reverse((weight, symbol)))
            .collect();

        let root = loop {
            let Some(Reverse((w0, zero))) = heap.pop() else {
                return Err(HuffwireError::invalid_data("prefix tree heap drained"));
            };
            let Some(Reverse((w1, one))) = heap.pop() else {
                break zero;
            };
            nodes.push(Node::Branch { zero, one });
            heap.push(Reverse((w0.saturating_add(w1), nodes.len() - 1)));
        };

        let codes = assign_codes(&nodes, root, n)?;
        let max_code_len = codes.iter().map(|c| c.len).max().unwrap_or(0);
        log::trace!(
            "sealed prefix code table: {} symbols, {} nodes, max code length {}",
            n,
            nodes.len(),
            max_code_len
        );

        Ok(PrefixCodeTable {
            weights: self.weights,
            nodes,
            root,
            codes,
            max_code_len,
        })
    }
}

/// Arena node; children are indices into the same arena
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Node {
    Leaf(usize),
    Branch { zero: usize, one: usize },
}

fn assign_codes(nodes: &[Node], root: usize, n: usize) -> Result<Vec<Code>> {
    let mut codes = vec![Code::default(); n];
    let mut stack = vec![(root, Code::default())];

    while let Some((index, code)) = stack.pop() {
        match nodes[index] {
            Node::Leaf(symbol) => codes[symbol] = code,
            Node::Branch { zero, one } => {
                if code.len == MAX_CODE_LEN {
                    return Err(HuffwireError::configuration(format!(
                        "weights produce a code longer than {} bits",
                        MAX_CODE_LEN
                    )));
                }
                let len = code.len + 1;
                stack.push((one, Code { bits: (code.bits << 1) | 1, len }));
                stack.push((zero, Code { bits: code.bits << 1, len }));
            }
        }
    }
    Ok(codes)
}

/// Sealed prefix-code table
///
/// Encoding writes a cached code; decoding walks the tree one bit at a time.
/// A single-symbol table has a zero-length code, so its symbol costs no bits.
#[derive(Debug, Clone)]
pub struct PrefixCodeTable {
    weights: Vec<u64>,
    nodes: Vec<Node>,
    root: usize,
    codes: Vec<Code>,
    max_code_len: u8,
}

impl PrefixCodeTable {
    /// Number of symbols
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Always false; a sealed table has at least one symbol
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Code assigned to `symbol`
    pub fn code(&self, symbol: usize) -> Option<Code> {
        self.codes.get(symbol).copied()
    }

    /// All codes, indexed by symbol
    pub fn codes(&self) -> &[Code] {
        &self.codes
    }

    /// Length of the longest code
    pub fn max_code_len(&self) -> u8 {
        self.max_code_len
    }

    /// Weight `symbol` had when the table was sealed
    pub fn weight(&self, symbol: usize) -> Option<u64> {
        self.weights.get(symbol).copied()
    }

    /// Total number of bits needed to encode `symbols`
    pub fn encoded_len<I>(&self, symbols: I) -> Result<u64>
    where
        I: IntoIterator<Item = usize>,
    {
        let mut total = 0u64;
        for symbol in symbols {
            check_bounds(symbol, self.codes.len())?;
            total += self.codes[symbol].len as u64;
        }
        Ok(total)
    }

    /// Write the code for `symbol`
    #[inline]
    pub fn encode<W: Write>(&self, writer: &mut BitWriter<W>, symbol: usize) -> Result<()> {
        check_bounds(symbol, self.codes.len())?;
        let code = self.codes[symbol];
        writer.write_bits(code.bits, code.len)
    }

    /// Read one symbol by walking the tree from the root
    pub fn decode<R: Read>(&self, reader: &mut BitReader<R>) -> Result<usize> {
        let mut index = self.root;
        loop {
            match self.nodes[index] {
                Node::Leaf(symbol) => return Ok(symbol),
                Node::Branch { zero, one } => {
                    index = if reader.read_bit()? { one } else { zero };
                }
            }
        }
    }
}

impl fmt::Display for PrefixCodeTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (symbol, code) in self.codes.iter().enumerate() {
            writeln!(
                f,
                "{:>4} w={:<6} len={:<2} {}",
                symbol, self.weights[symbol], code.len, code
            )?;
        }
        Ok(())
    }
}
