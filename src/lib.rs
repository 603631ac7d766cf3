//! Generalized SECDED (single error correction, double error detection) Hamming codes.
//!
//! A message of any length is protected by one codeword of `m + r + 1` bits, where `r`
//! is the smallest parity count with `2^r >= m + r + 1` and the extra bit is a global
//! parity bit stored at index 0.
//!
//! ```
//! use secded::{decode, encode, BitSequenceMut, Error};
//!
//! let data = vec![true, false, true, false, true, false];
//! let mut codeword = encode(data.as_slice());
//!
//! codeword.flip_bit(3);
//! assert_eq!(decode(&codeword).unwrap().len(), data.len());
//!
//! codeword.flip_bit(5);
//! assert!(matches!(decode(&codeword), Err(Error::Uncorrectable { .. })));
//! ```

pub mod cs;
pub mod error;

pub use cs::ecc::{
    decode, decode_detailed, encode, BitContainer, BitSequence, BitSequenceMut, Codeword,
    DecodeStatus, Decoded, Layout,
};
pub use error::{Error, Result};
