use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use log::debug;

use crate::compression::bitstream::{pack_codes, unpack_payload};
use crate::compression::decoder::decode_bits;
use crate::compression::table::CodeTable;
use crate::compression::Result;
use crate::error::Error;

/// Represents a node in the Huffman tree.
///
/// An internal node exclusively owns its two children; the tree is torn
/// down as a unit once the code table has been extracted from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffmanNode {
    /// A leaf node contains a byte value and its frequency.
    Leaf { byte: u8, freq: usize },
    /// An internal node with left and right children and combined frequency.
    Internal {
        freq: usize,
        left: Box<HuffmanNode>,
        right: Box<HuffmanNode>,
    },
}

impl HuffmanNode {
    /// Returns the frequency of the node.
    pub fn freq(&self) -> usize {
        match self {
            HuffmanNode::Leaf { freq, .. } => *freq,
            HuffmanNode::Internal { freq, .. } => *freq,
        }
    }
}

/// A helper wrapper for HuffmanNode for use in a BinaryHeap.
///
/// The heap is a max-heap, so the ordering is reversed: the node with the
/// smallest frequency has the highest priority. `seq` is the node's
/// insertion sequence number; among equal frequencies the node inserted
/// earliest is extracted first, which keeps merge order deterministic.
#[derive(Debug)]
struct NodeWrapper {
    seq: u64,
    node: Box<HuffmanNode>,
}

impl PartialEq for NodeWrapper {
    fn eq(&self, other: &Self) -> bool {
        self.seq == other.seq && self.node.freq() == other.node.freq()
    }
}

impl Eq for NodeWrapper {}

impl Ord for NodeWrapper {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse: lower frequency comes first, then lower sequence number.
        other
            .node
            .freq()
            .cmp(&self.node.freq())
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for NodeWrapper {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Build a frequency table mapping each byte in `input` to its occurrence
/// count. An empty input produces an empty table.
pub fn build_frequency_table(input: &[u8]) -> HashMap<u8, usize> {
    let mut freq = HashMap::new();
    for &byte in input {
        *freq.entry(byte).or_insert(0) += 1;
    }
    freq
}

/// Build the Huffman tree for a frequency table.
///
/// Leaf nodes are seeded into the priority queue in ascending byte order
/// and every node carries an insertion sequence number. When several
/// nodes share the lowest frequency, the one inserted earliest is
/// extracted first, and the first of the two extracted nodes becomes the
/// left child of the merged node. The resulting tree, and therefore the
/// code assignment, is reproducible for a given frequency table.
///
/// # Errors
///
/// Returns [`Error::EmptyInput`] if the frequency table is empty.
pub fn build_huffman_tree(freq_table: &HashMap<u8, usize>) -> Result<Box<HuffmanNode>> {
    if freq_table.is_empty() {
        return Err(Error::EmptyInput);
    }

    let mut symbols: Vec<(u8, usize)> = freq_table.iter().map(|(&b, &f)| (b, f)).collect();
    symbols.sort_unstable();

    let mut seq = 0u64;
    let mut heap = BinaryHeap::with_capacity(symbols.len());
    for (byte, freq) in symbols {
        heap.push(NodeWrapper {
            seq,
            node: Box::new(HuffmanNode::Leaf { byte, freq }),
        });
        seq += 1;
    }

    // Combine nodes until only one tree remains.
    while heap.len() > 1 {
        let NodeWrapper { node: left, .. } = heap.pop().unwrap();
        let NodeWrapper { node: right, .. } = heap.pop().unwrap();
        let combined_freq = left.freq() + right.freq();
        heap.push(NodeWrapper {
            seq,
            node: Box::new(HuffmanNode::Internal {
                freq: combined_freq,
                left,
                right,
            }),
        });
        seq += 1;
    }

    Ok(heap.pop().unwrap().node)
}

/// Build the code table for a Huffman tree.
///
/// Walks the tree depth-first, appending `'0'` on each left branch and
/// `'1'` on each right branch; a leaf records the accumulated bit-string.
/// If the tree consists of a single leaf (one distinct symbol), that
/// symbol is assigned the fixed code `"0"` so the encoding is never
/// zero-length. The resulting codes are prefix-free by construction.
pub fn build_code_table(root: &HuffmanNode) -> CodeTable {
    let mut table = CodeTable::new();
    build_code_table_helper(root, String::new(), &mut table);
    table
}

fn build_code_table_helper(node: &HuffmanNode, prefix: String, table: &mut CodeTable) {
    match node {
        HuffmanNode::Leaf { byte, .. } => {
            let code = if prefix.is_empty() {
                "0".to_string()
            } else {
                prefix
            };
            table.insert(*byte, code);
        }
        HuffmanNode::Internal { left, right, .. } => {
            let mut left_prefix = prefix.clone();
            left_prefix.push('0');
            build_code_table_helper(left, left_prefix, table);
            let mut right_prefix = prefix;
            right_prefix.push('1');
            build_code_table_helper(right, right_prefix, table);
        }
    }
}

/// Compress `input` into a framed payload and its code table.
///
/// The payload starts with one byte holding the padding-bit count,
/// followed by the packed codeword bytes; the table is the companion
/// artifact needed to decompress. An empty input short-circuits to a
/// header-only payload and an empty table, so the round-trip holds for
/// every input.
///
/// # Example
///
/// ```
/// use huffzip::compression::huffman::{huffman_compress, huffman_decompress};
///
/// let (payload, table) = huffman_compress(b"aaabbc").unwrap();
/// assert_eq!(huffman_decompress(&payload, &table).unwrap(), b"aaabbc");
/// ```
pub fn huffman_compress(input: &[u8]) -> Result<(Vec<u8>, CodeTable)> {
    if input.is_empty() {
        debug!("empty input: emitting header-only payload");
        return Ok((vec![0], CodeTable::new()));
    }

    let freq_table = build_frequency_table(input);
    let tree = build_huffman_tree(&freq_table)?;
    let table = build_code_table(&tree);
    debug!(
        "code table ready: {} symbols, longest code {} bits",
        table.len(),
        table.max_code_len()
    );

    let payload = pack_codes(input, &table)?;
    debug!(
        "packed {} input bytes into {} payload bytes",
        input.len(),
        payload.len()
    );
    Ok((payload, table))
}

/// Decompress a framed payload against its code table.
///
/// Reverses [`huffman_compress`]: unpacks the payload into its bit
/// sequence, strips the recorded padding, and resolves each prefix
/// against the table.
pub fn huffman_decompress(payload: &[u8], table: &CodeTable) -> Result<Vec<u8>> {
    let bits = unpack_payload(payload)?;
    decode_bits(&bits, table)
}
