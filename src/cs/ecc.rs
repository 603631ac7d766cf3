//! Error correction code implementations.
//!
//! This module provides a generalized SECDED Hamming code:
//! - [`layout`]: parity-bit count and placement for a given data length
//! - [`hamming`]: encoding and decoding with single-bit correction and double-bit detection
//! - [`bits`]: the bit-sequence capabilities the codec is written against
//!
//! # Error Correction Algorithms
//!
//! Error correction codes are used to detect and correct errors in data
//! transmission and storage, making digital communications more reliable.
//!
//! # Examples
//!
//! ```rust
//! use secded::cs::ecc::{decode, encode};
//!
//! let codeword = encode(&vec![true, true, false, true]);
//! assert_eq!(codeword.len(), 8);
//! assert_eq!(decode(&codeword).unwrap().len(), 4);
//! ```

/// Result type for error correction operations
pub type Result<T> = std::result::Result<T, crate::error::Error>;

pub mod bits;
pub mod hamming;
pub mod layout;

pub use bits::{BitContainer, BitSequence, BitSequenceMut, PackedBits};
pub use hamming::{
    decode, decode_bytes, decode_detailed, decode_detailed_into, encode, encode_bytes,
    encode_into, syndrome, Codeword, DecodeStatus, Decoded, Syndrome,
};
pub use layout::{Layout, MAX_DATA_BITS};
