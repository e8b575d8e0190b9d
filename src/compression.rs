//! Static Huffman compression.
//!
//! This module implements lossless byte-stream compression based on
//! static Huffman coding:
//! - Frequency analysis over the input bytes
//! - Prefix-tree construction with a deterministic tie-break
//! - Code table derivation and a persisted text artifact
//! - Bitstream packing/unpacking with padding accounting
//! - Greedy prefix-match decoding
//!
//! The code table is the only artifact persisted alongside the packed
//! payload; the tree exists during compression only and is never
//! serialized or rebuilt.
//!
//! # Examples
//!
//! ```rust
//! use huffzip::compression::huffman::{huffman_compress, huffman_decompress};
//!
//! let input = b"this is an example for huffman encoding";
//! let (payload, table) = huffman_compress(input).unwrap();
//! let restored = huffman_decompress(&payload, &table).unwrap();
//! assert_eq!(restored, input);
//! ```

use crate::error::Error;

/// Result type for compression operations
pub type Result<T> = std::result::Result<T, Error>;

pub mod bitstream;
pub mod decoder;
pub mod huffman;
pub mod table;

pub use bitstream::{pack_codes, unpack_payload};
pub use decoder::decode_bits;
pub use huffman::{
    build_code_table, build_frequency_table, build_huffman_tree, huffman_compress,
    huffman_decompress, HuffmanNode,
};
pub use table::CodeTable;
