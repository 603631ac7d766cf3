//! Generalized SECDED Hamming code for bit sequences of any length.
//!
//! Hamming codes are a family of linear error-correcting codes developed by Richard Hamming in 1950.
//! Adding one overall parity bit to a Hamming code gives a SECDED code (single error correction,
//! double error detection): any one flipped bit is corrected and any two flipped bits are
//! reported instead of being silently mis-corrected.
//!
//! Unlike the classic (7,4) and (8,4) block codes, the code here is not split into fixed-size
//! blocks. The whole message is protected by a single codeword whose parity count grows with
//! the message length, see [`Layout`].
//!
//! This implementation provides:
//! - Encoding of any [`BitSequence`] into a codeword
//! - Decoding with single-bit correction and double-bit detection
//! - A detailed decode that reports what was corrected
//! - Byte-oriented wrappers
//!
//! # Codeword layout
//!
//! Index 0 is the global parity bit. Indices `1..n` are the Hamming portion, with parity
//! bits at the power-of-two indices and data bits everywhere else.
//!
//! # Examples
//!
//! ```
//! use secded::cs::ecc::hamming::{decode, encode};
//! use secded::cs::ecc::bits::BitSequenceMut;
//!
//! let data = vec![true, false, true, false, true, false];
//! let mut codeword = encode(data.as_slice());
//! assert_eq!(codeword.len(), 11);
//!
//! // Flip one bit in transit
//! codeword.flip_bit(3);
//!
//! let decoded = decode(&codeword).unwrap();
//! assert_eq!(decoded.iter().by_vals().collect::<Vec<_>>(), data);
//! ```
//!
//! # Limitations
//!
//! Three or more flipped bits can alias a single-bit error and be "corrected" to the wrong
//! data. Like every SECDED code this one only guarantees behavior for up to two errors.

use crate::cs::ecc::bits::{
    bits_to_bytes, bytes_to_bits, BitContainer, BitSequence, BitSequenceMut,
};
use crate::cs::ecc::layout::Layout;
use crate::cs::ecc::Result;
use crate::error::Error;
use bitvec::prelude::*;
use log::{debug, trace, warn};

/// Canonical codeword storage.
pub type Codeword = BitVec<u8, Msb0>;

/// Index of the global parity bit within a codeword.
pub const GLOBAL_PARITY_INDEX: usize = 0;

/// Codewords at least this long have their parity checks computed in parallel.
#[cfg(feature = "parallel")]
pub const PARALLEL_THRESHOLD: usize = 1 << 16;

/// Result of a parity check over a received codeword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Syndrome {
    /// Combined Hamming checks: bit `i` is set if the check of parity bit `2^i` failed.
    pub position: usize,
    /// Whether the XOR over the whole codeword, global bit included, is zero.
    pub overall_parity_ok: bool,
}

impl Syndrome {
    /// Returns `true` if every check passed.
    pub fn is_clean(&self) -> bool {
        self.position == 0 && self.overall_parity_ok
    }
}

/// What decoding had to do to recover the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecodeStatus {
    /// The codeword was received intact.
    Clean,
    /// Only the global parity bit was flipped; the data was never affected.
    GlobalParityCorrected,
    /// A single bit at this codeword index was flipped and has been corrected.
    Corrected {
        /// Index of the corrected bit.
        position: usize,
    },
}

impl DecodeStatus {
    /// Returns `true` if any bit had to be corrected.
    pub fn was_corrected(&self) -> bool {
        !matches!(self, DecodeStatus::Clean)
    }
}

/// Output of a detailed decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded<B> {
    /// The recovered data bits.
    pub data: B,
    /// The received codeword after correction.
    pub codeword: B,
    /// What was corrected, if anything.
    pub status: DecodeStatus,
}

/// XOR over every codeword bit whose index has bit `parity_index` set.
///
/// While encoding the parity bit itself is still zero, so this yields the parity bit's
/// value. While decoding the parity bit is included, so a set result is a failed check.
fn parity_check(codeword: &BitSlice<u8, Msb0>, parity_index: usize) -> bool {
    let mask = 1usize << parity_index;
    codeword.xor_where(|index| index & mask != 0)
}

/// Runs all `parity_bits` checks and packs the failures into one integer.
fn parity_checks(codeword: &BitSlice<u8, Msb0>, parity_bits: usize) -> usize {
    #[cfg(feature = "parallel")]
    {
        if codeword.len() >= PARALLEL_THRESHOLD {
            use rayon::prelude::*;

            return (0..parity_bits)
                .into_par_iter()
                .filter(|&i| parity_check(codeword, i))
                .map(|i| 1usize << i)
                .reduce(|| 0, |a, b| a | b);
        }
    }

    (0..parity_bits)
        .filter(|&i| parity_check(codeword, i))
        .fold(0, |syndrome, i| syndrome | (1 << i))
}

fn compute_syndrome(codeword: &BitSlice<u8, Msb0>, layout: &Layout) -> Syndrome {
    Syndrome {
        position: parity_checks(codeword, layout.parity_bits()),
        overall_parity_ok: !codeword.parity(),
    }
}

fn extract_data(codeword: &BitSlice<u8, Msb0>, layout: &Layout) -> BitVec<u8, Msb0> {
    layout
        .data_positions()
        .map(|position| codeword[position])
        .collect()
}

impl Layout {
    /// Encodes `data` into a codeword of this layout.
    ///
    /// Returns `Error::MalformedInput` if `data` is not exactly `data_bits()` long.
    pub fn encode<D>(&self, data: &D) -> Result<Codeword>
    where
        D: BitSequence + ?Sized,
    {
        if data.len() != self.data_bits() {
            return Err(Error::malformed(
                data.len(),
                format!("layout expects {} data bits", self.data_bits()),
            ));
        }
        Ok(encode_with_layout(data, self))
    }

    /// Decodes a codeword that is claimed to carry `data_bits()` bits of data.
    pub fn decode<C>(&self, codeword: &C) -> Result<BitVec<u8, Msb0>>
    where
        C: BitSequence + ?Sized,
    {
        self.decode_detailed(codeword).map(|decoded| decoded.data)
    }

    /// Like [`Layout::decode`], but also reports the corrected codeword and what was fixed.
    pub fn decode_detailed<C>(&self, codeword: &C) -> Result<Decoded<BitVec<u8, Msb0>>>
    where
        C: BitSequence + ?Sized,
    {
        if !self.matches(codeword.len()) {
            warn!(
                "Rejecting {}-bit codeword, layout for {} data bits needs {}",
                codeword.len(),
                self.data_bits(),
                self.codeword_len()
            );
            return Err(Error::malformed(
                codeword.len(),
                format!(
                    "expected {} bits for {} data bits",
                    self.codeword_len(),
                    self.data_bits()
                ),
            ));
        }

        let mut working = Codeword::from_sequence(codeword);
        let syndrome = compute_syndrome(&working, self);
        trace!(
            "Syndrome {} (overall parity {}) over {} bits",
            syndrome.position,
            if syndrome.overall_parity_ok { "ok" } else { "failed" },
            working.len()
        );

        let status = match (syndrome.position, syndrome.overall_parity_ok) {
            (0, true) => DecodeStatus::Clean,
            (0, false) => {
                debug!("Correcting flipped global parity bit");
                working.flip_bit(GLOBAL_PARITY_INDEX);
                DecodeStatus::GlobalParityCorrected
            }
            (position, false) if position <= self.hamming_len() => {
                debug!("Correcting single-bit error at position {}", position);
                working.flip_bit(position);
                DecodeStatus::Corrected { position }
            }
            // Either the overall parity is even (two flips) or the syndrome points past the
            // end of the Hamming portion, which no single flip can produce.
            (position, _) => {
                warn!(
                    "Uncorrectable error in {}-bit codeword, syndrome {}",
                    working.len(),
                    position
                );
                return Err(Error::Uncorrectable { syndrome: position });
            }
        };

        let data = extract_data(&working, self);
        Ok(Decoded {
            data,
            codeword: working,
            status,
        })
    }
}

fn encode_with_layout<D>(data: &D, layout: &Layout) -> Codeword
where
    D: BitSequence + ?Sized,
{
    let mut codeword = Codeword::zeroed(layout.codeword_len());

    for (rank, position) in layout.data_positions().enumerate() {
        if data.bit(rank) {
            codeword.set(position, true);
        }
    }

    let parity = parity_checks(&codeword, layout.parity_bits());
    for position in layout.parity_positions() {
        if parity & position != 0 {
            codeword.set(position, true);
        }
    }

    // The global bit is still zero, so the parity of the whole buffer covers the rest.
    let overall = codeword.count_ones() % 2 == 1;
    codeword.set(GLOBAL_PARITY_INDEX, overall);

    codeword
}

/// Encodes `data` into a SECDED codeword of `data.len() + r + 1` bits.
///
/// Never fails: every data length up to [`MAX_DATA_BITS`](crate::cs::ecc::layout::MAX_DATA_BITS)
/// has a layout.
pub fn encode<D>(data: &D) -> Codeword
where
    D: BitSequence + ?Sized,
{
    let layout = Layout::for_data_len(data.len());
    encode_with_layout(data, &layout)
}

/// Encodes `data` into any growable bit container.
pub fn encode_into<D, B>(data: &D) -> B
where
    D: BitSequence + ?Sized,
    B: BitContainer,
{
    B::from_sequence(encode(data).as_bitslice())
}

/// Computes the syndrome of a received codeword without correcting it.
pub fn syndrome<C>(codeword: &C) -> Result<Syndrome>
where
    C: BitSequence + ?Sized,
{
    let layout = Layout::from_codeword_len(codeword.len())?;
    let working = Codeword::from_sequence(codeword);
    Ok(compute_syndrome(&working, &layout))
}

/// Recovers the data from a codeword, correcting a single flipped bit.
///
/// # Errors
///
/// - `Error::MalformedInput` if the length matches no layout
/// - `Error::Uncorrectable` if two bits were flipped
pub fn decode<C>(codeword: &C) -> Result<BitVec<u8, Msb0>>
where
    C: BitSequence + ?Sized,
{
    decode_detailed(codeword).map(|decoded| decoded.data)
}

/// Like [`decode`], but also reports the corrected codeword and what was fixed.
pub fn decode_detailed<C>(codeword: &C) -> Result<Decoded<BitVec<u8, Msb0>>>
where
    C: BitSequence + ?Sized,
{
    let layout = Layout::from_codeword_len(codeword.len()).inspect_err(|err| {
        warn!("{}", err);
    })?;
    layout.decode_detailed(codeword)
}

/// Like [`decode_detailed`], with data and codeword returned in a caller-chosen container.
pub fn decode_detailed_into<C, B>(codeword: &C) -> Result<Decoded<B>>
where
    C: BitSequence + ?Sized,
    B: BitContainer,
{
    let decoded = decode_detailed(codeword)?;
    Ok(Decoded {
        data: B::from_sequence(decoded.data.as_bitslice()),
        codeword: B::from_sequence(decoded.codeword.as_bitslice()),
        status: decoded.status,
    })
}

/// Encodes bytes, most significant bit of each byte first.
pub fn encode_bytes(bytes: &[u8]) -> Codeword {
    encode(bytes_to_bits(bytes).as_bitslice())
}

/// Decodes a codeword and packs the data back into bytes.
///
/// A data length that is not a multiple of eight leaves the trailing bits right-aligned
/// in the last byte.
pub fn decode_bytes<C>(codeword: &C) -> Result<Vec<u8>>
where
    C: BitSequence + ?Sized,
{
    let data = decode(codeword)?;
    Ok(bits_to_bytes(data.as_bitslice()))
}
