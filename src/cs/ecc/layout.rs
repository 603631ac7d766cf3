//! Parity layout of a generalized SECDED Hamming codeword.
//!
//! A codeword protecting `m` data bits with `r` Hamming parity bits is laid out as
//!
//! ```text
//! index:  0        1   2   3   4   5   6   7   8   9  ...  m + r
//! bit:    global   p1  p2  d0  p4  d1  d2  d3  p8  d4 ...
//! ```
//!
//! Index 0 holds the global (overall) parity bit. Indices `1..=m + r` form the
//! Hamming portion, where the index is also the 1-based Hamming position: parity
//! bits sit at powers of two and data bits fill every other position in order.
//!
//! `r` is the smallest integer with `2^r >= m + r + 1`. Because `r` appears on both
//! sides the value is found by search.

use crate::error::{Error, Result};

/// Largest data length for which a layout is defined.
///
/// For `m <= MAX_DATA_BITS` the parity count never exceeds `usize::BITS`, so the
/// full codeword length `m + r + 1` fits in a `usize`. Every in-memory bit
/// container is far below this bound.
pub const MAX_DATA_BITS: usize = usize::MAX - (usize::BITS as usize + 1);

/// Number of Hamming parity bits needed to protect `data_bits` bits.
///
/// Does not include the global SECDED parity bit.
pub fn parity_bits_for(data_bits: usize) -> usize {
    // Widened so the shift and the sum cannot overflow for any usize input
    let m = data_bits as u128;
    let mut parity_bits: u32 = 0;
    while (1u128 << parity_bits) < m + u128::from(parity_bits) + 1 {
        parity_bits += 1;
    }
    parity_bits as usize
}

/// Returns `true` if the 1-based Hamming position holds a parity bit.
pub fn is_parity_position(position: usize) -> bool {
    position.is_power_of_two()
}

/// Returns `true` if the 1-based Hamming position holds a data bit.
pub fn is_data_position(position: usize) -> bool {
    position >= 3 && !position.is_power_of_two()
}

/// Hamming position of the `rank`-th data bit (0-based rank).
///
/// The data bit of rank `k` sits after exactly `t` parity positions, where `t` is
/// the parity count for a `k + 1` bit message.
///
/// Returns `None` for `rank >= MAX_DATA_BITS`, where no layout holds that many data bits.
pub fn data_position(rank: usize) -> Option<usize> {
    if rank >= MAX_DATA_BITS {
        return None;
    }
    let data_bits = rank + 1;
    Some(data_bits + parity_bits_for(data_bits))
}

/// The parity layout of a codeword, fixed by its data length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Layout {
    /// Number of data bits
    data_bits: usize,
    /// Number of Hamming parity bits, excluding the global parity bit
    parity_bits: usize,
}

impl Layout {
    /// Layout for a message of `data_bits` bits.
    pub fn for_data_len(data_bits: usize) -> Self {
        Layout {
            data_bits,
            parity_bits: parity_bits_for(data_bits),
        }
    }

    /// Recovers the layout from a received codeword length.
    ///
    /// Fails with `Error::MalformedInput` when no data length produces a codeword
    /// of exactly `codeword_len` bits. That happens for a zero length and whenever
    /// the Hamming portion would end on a power-of-two position (lengths 2, 3, 5,
    /// 9, 17, ...), since no minimal layout has a trailing parity bit.
    pub fn from_codeword_len(codeword_len: usize) -> Result<Self> {
        let hamming_len = codeword_len.checked_sub(1).ok_or_else(|| {
            Error::malformed(codeword_len, "missing the global parity bit")
        })?;

        // Smallest r with 2^r >= hamming_len + 1
        let parity_bits = ((hamming_len as u128) + 1)
            .next_power_of_two()
            .trailing_zeros() as usize;

        let layout = hamming_len
            .checked_sub(parity_bits)
            .map(Layout::for_data_len)
            .filter(|layout| layout.parity_bits == parity_bits);

        layout.ok_or_else(|| {
            Error::malformed(
                codeword_len,
                format!(
                    "no data length pairs with {} parity bits to fill {} Hamming positions",
                    parity_bits, hamming_len
                ),
            )
        })
    }

    /// Number of data bits.
    pub fn data_bits(&self) -> usize {
        self.data_bits
    }

    /// Number of Hamming parity bits, excluding the global parity bit.
    pub fn parity_bits(&self) -> usize {
        self.parity_bits
    }

    /// Length of the Hamming portion (data plus Hamming parity bits).
    pub fn hamming_len(&self) -> usize {
        self.data_bits + self.parity_bits
    }

    /// Total codeword length, including the global parity bit at index 0.
    pub fn codeword_len(&self) -> usize {
        self.hamming_len() + 1
    }

    /// Parity positions `1, 2, 4, ..., 2^(r-1)` in ascending order.
    pub fn parity_positions(&self) -> impl Iterator<Item = usize> {
        (0..self.parity_bits).map(|i| 1usize << i)
    }

    /// Positions of the data bits in ascending order, one per data bit.
    pub fn data_positions(&self) -> impl Iterator<Item = usize> {
        (3..=self.hamming_len()).filter(|&p| !p.is_power_of_two())
    }

    /// Ranks of the data bits covered by parity check `parity_index`, i.e. by the
    /// parity bit at position `2^parity_index`.
    pub fn covered_data_bits(&self, parity_index: u32) -> impl Iterator<Item = usize> {
        let mask = 1usize.checked_shl(parity_index).unwrap_or(0);
        self.data_positions()
            .enumerate()
            .filter(move |&(_, position)| position & mask != 0)
            .map(|(rank, _)| rank)
    }

    /// Returns `true` if `length` is exactly this layout's codeword length.
    pub fn matches(&self, length: usize) -> bool {
        length == self.codeword_len()
    }
}
