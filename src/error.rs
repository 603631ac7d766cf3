//! Error types shared by the coding modules.

/// Errors reported by SECDED decoding and the bit-sequence helpers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The codeword length has no valid `(data, parity)` decomposition, or it does
    /// not match the layout the caller asked for.
    #[error("malformed codeword of {length} bits: {reason}")]
    MalformedInput {
        /// Length of the rejected codeword in bits.
        length: usize,
        /// What made the length invalid.
        reason: String,
    },

    /// At least two bits were corrupted. The syndrome is reported but no data is
    /// recovered.
    #[error("uncorrectable error detected (syndrome {syndrome})")]
    Uncorrectable {
        /// The nonzero syndrome computed from the received codeword.
        syndrome: usize,
    },

    /// A fixed-capacity bit container was asked to hold more bits than it can.
    #[error("input of {length} bits exceeds the maximum of {max_length}")]
    InputTooLarge {
        /// Requested length in bits.
        length: usize,
        /// Capacity of the container in bits.
        max_length: usize,
    },
}

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn malformed(length: usize, reason: impl Into<String>) -> Self {
        Error::MalformedInput {
            length,
            reason: reason.into(),
        }
    }

    /// Returns `true` if the error reports corruption rather than caller misuse.
    pub fn is_uncorrectable(&self) -> bool {
        matches!(self, Error::Uncorrectable { .. })
    }
}
