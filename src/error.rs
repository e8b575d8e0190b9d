use thiserror::Error;

/// Result type alias using the crate error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by compression, decompression, and code table handling.
///
/// Each failure mode is a distinct variant so callers can tell bad input
/// apart from a corrupted artifact. None of these are retried internally.
#[derive(Debug, Error)]
pub enum Error {
    /// The input contained no bytes, so there is no tree to build.
    #[error("nothing to compress: input is empty")]
    EmptyInput,

    /// A byte in the input has no entry in the code table.
    #[error("byte {0} has no entry in the code table")]
    UnknownSymbol(u8),

    /// Two symbols map to the same code; the table is corrupt.
    #[error("code {code} is assigned to both byte {first} and byte {second}")]
    DuplicateCode {
        /// The shared bit-string code.
        code: String,
        /// The lower of the two conflicting byte values.
        first: u8,
        /// The higher of the two conflicting byte values.
        second: u8,
    },

    /// The packed bitstream cannot be fully resolved against the code table.
    #[error("malformed bitstream: {0}")]
    MalformedStream(String),

    /// No valid code table is available for decoding.
    #[error("code table unavailable: {0}")]
    MissingTable(String),

    /// An I/O failure from the surrounding file collaborator.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
