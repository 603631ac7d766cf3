//! Bit-sequence capabilities used by the SECDED codec.
//!
//! The codec never touches a concrete container directly. It only needs to read
//! the length, read and write single bits, and fold XOR over a subset of
//! positions. Those capabilities are split over three traits so that read-only
//! views, in-place mutable buffers and growable containers can each take part:
//!
//! - [`BitSequence`]: length, `bit(i)` and XOR folds
//! - [`BitSequenceMut`]: `set_bit(i, v)` and `flip_bit(i)`
//! - [`BitContainer`]: allocation of a zeroed sequence of a given length
//!
//! Implementations are provided for `[bool]`, `Vec<bool>`, bitvec's
//! `BitSlice`/`BitVec` with any store and ordering, and [`PackedBits`], which
//! keeps a short sequence in a single unsigned integer. Shared references to any
//! of these are bit sequences too.
//!
//! # Examples
//!
//! ```
//! use secded::cs::ecc::bits::{bits_to_bytes, bytes_to_bits, BitSequence};
//!
//! let bits = bytes_to_bits(&[0x96]);
//! assert_eq!(bits.len(), 8);
//! assert!(bits.bit(0));
//! assert_eq!(bits_to_bytes(&bits), vec![0x96]);
//! ```

use crate::error::{Error, Result};
use bitvec::prelude::*;
use num_traits::{PrimInt, Unsigned};

/// Number of bits in a byte.
pub const BITS_PER_BYTE: usize = 8;

/// Read access to an ordered sequence of bits.
pub trait BitSequence {
    /// Number of bits in the sequence.
    fn len(&self) -> usize;

    /// Returns `true` if the sequence holds no bits.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the bit at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    fn bit(&self, index: usize) -> bool;

    /// XOR of every bit whose index satisfies `pred`.
    fn xor_where<F>(&self, mut pred: F) -> bool
    where
        F: FnMut(usize) -> bool,
    {
        (0..self.len())
            .filter(|&i| pred(i))
            .fold(false, |acc, i| acc ^ self.bit(i))
    }

    /// XOR of every bit in the sequence.
    fn parity(&self) -> bool {
        self.xor_where(|_| true)
    }
}

/// In-place write access to a bit sequence of fixed length.
pub trait BitSequenceMut: BitSequence {
    /// Sets the bit at `index` to `value`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    fn set_bit(&mut self, index: usize, value: bool);

    /// Inverts the bit at `index`.
    fn flip_bit(&mut self, index: usize) {
        let value = self.bit(index);
        self.set_bit(index, !value);
    }
}

/// A bit sequence that can be allocated at any length.
pub trait BitContainer: BitSequenceMut + Sized {
    /// Creates a sequence of `len` zero bits.
    fn zeroed(len: usize) -> Self;

    /// Copies an arbitrary bit sequence into a new container.
    fn from_sequence<S>(source: &S) -> Self
    where
        S: BitSequence + ?Sized,
    {
        let mut out = Self::zeroed(source.len());
        for i in 0..source.len() {
            if source.bit(i) {
                out.set_bit(i, true);
            }
        }
        out
    }
}

impl<B> BitSequence for &B
where
    B: BitSequence + ?Sized,
{
    fn len(&self) -> usize {
        (**self).len()
    }

    fn bit(&self, index: usize) -> bool {
        (**self).bit(index)
    }

    fn xor_where<F>(&self, pred: F) -> bool
    where
        F: FnMut(usize) -> bool,
    {
        (**self).xor_where(pred)
    }

    fn parity(&self) -> bool {
        (**self).parity()
    }
}

impl BitSequence for [bool] {
    fn len(&self) -> usize {
        <[bool]>::len(self)
    }

    fn bit(&self, index: usize) -> bool {
        self[index]
    }
}

impl BitSequenceMut for [bool] {
    fn set_bit(&mut self, index: usize, value: bool) {
        self[index] = value;
    }
}

impl BitSequence for Vec<bool> {
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    fn bit(&self, index: usize) -> bool {
        self[index]
    }
}

impl BitSequenceMut for Vec<bool> {
    fn set_bit(&mut self, index: usize, value: bool) {
        self[index] = value;
    }
}

impl BitContainer for Vec<bool> {
    fn zeroed(len: usize) -> Self {
        vec![false; len]
    }
}

impl<T, O> BitSequence for BitSlice<T, O>
where
    T: BitStore,
    O: BitOrder,
{
    fn len(&self) -> usize {
        BitSlice::len(self)
    }

    fn bit(&self, index: usize) -> bool {
        self[index]
    }

    fn xor_where<F>(&self, mut pred: F) -> bool
    where
        F: FnMut(usize) -> bool,
    {
        // Only set bits contribute to an XOR, so skip the zeros outright.
        self.iter_ones().filter(|&i| pred(i)).count() % 2 == 1
    }

    fn parity(&self) -> bool {
        self.count_ones() % 2 == 1
    }
}

impl<T, O> BitSequenceMut for BitSlice<T, O>
where
    T: BitStore,
    O: BitOrder,
{
    fn set_bit(&mut self, index: usize, value: bool) {
        self.set(index, value);
    }
}

impl<T, O> BitSequence for BitVec<T, O>
where
    T: BitStore,
    O: BitOrder,
{
    fn len(&self) -> usize {
        self.as_bitslice().len()
    }

    fn bit(&self, index: usize) -> bool {
        self.as_bitslice()[index]
    }

    fn xor_where<F>(&self, pred: F) -> bool
    where
        F: FnMut(usize) -> bool,
    {
        BitSequence::xor_where(self.as_bitslice(), pred)
    }

    fn parity(&self) -> bool {
        BitSequence::parity(self.as_bitslice())
    }
}

impl<T, O> BitSequenceMut for BitVec<T, O>
where
    T: BitStore,
    O: BitOrder,
{
    fn set_bit(&mut self, index: usize, value: bool) {
        self.as_mut_bitslice().set(index, value);
    }
}

impl<T, O> BitContainer for BitVec<T, O>
where
    T: BitStore,
    O: BitOrder,
{
    fn zeroed(len: usize) -> Self {
        BitVec::repeat(false, len)
    }
}

/// A short bit sequence packed into one unsigned integer.
///
/// Bit `i` of the sequence is the `i`-th least significant bit of the word.
/// Bits at or above `len` are always zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PackedBits<W> {
    word: W,
    len: usize,
}

impl<W> PackedBits<W>
where
    W: PrimInt + Unsigned,
{
    /// Number of bits a single word can hold.
    pub fn capacity() -> usize {
        W::zero().count_zeros() as usize
    }

    /// Wraps the low `len` bits of `word`.
    ///
    /// Returns `Error::InputTooLarge` if `len` exceeds the width of `W`.
    pub fn new(word: W, len: usize) -> Result<Self> {
        let capacity = Self::capacity();
        if len > capacity {
            return Err(Error::InputTooLarge {
                length: len,
                max_length: capacity,
            });
        }

        let mask = if len == capacity {
            !W::zero()
        } else {
            (W::one() << len) - W::one()
        };

        Ok(PackedBits {
            word: word & mask,
            len,
        })
    }

    /// Copies a bit sequence into a packed word.
    pub fn from_sequence<S>(source: &S) -> Result<Self>
    where
        S: BitSequence + ?Sized,
    {
        let mut packed = Self::new(W::zero(), source.len())?;
        for i in 0..source.len() {
            if source.bit(i) {
                packed.set_bit(i, true);
            }
        }
        Ok(packed)
    }

    /// The underlying word.
    pub fn word(&self) -> W {
        self.word
    }
}

impl<W> BitSequence for PackedBits<W>
where
    W: PrimInt + Unsigned,
{
    fn len(&self) -> usize {
        self.len
    }

    fn bit(&self, index: usize) -> bool {
        assert!(index < self.len, "bit index {index} out of range");
        (self.word >> index) & W::one() == W::one()
    }

    fn parity(&self) -> bool {
        self.word.count_ones() % 2 == 1
    }
}

impl<W> BitSequenceMut for PackedBits<W>
where
    W: PrimInt + Unsigned,
{
    fn set_bit(&mut self, index: usize, value: bool) {
        assert!(index < self.len, "bit index {index} out of range");
        let mask = W::one() << index;
        self.word = if value {
            self.word | mask
        } else {
            self.word & !mask
        };
    }
}

/// Expands bytes into bits, most significant bit of each byte first.
pub fn bytes_to_bits(bytes: &[u8]) -> BitVec<u8, Msb0> {
    BitVec::from_slice(bytes)
}

/// Packs bits into bytes, eight at a time, most significant bit first.
///
/// A trailing group shorter than a byte is right-aligned into the low bits of the
/// last byte, so `100` becomes `0x04`.
pub fn bits_to_bytes<S>(bits: &S) -> Vec<u8>
where
    S: BitSequence + ?Sized,
{
    let mut bytes = Vec::with_capacity(bits.len().div_ceil(BITS_PER_BYTE));
    let mut start = 0;
    while start < bits.len() {
        let end = (start + BITS_PER_BYTE).min(bits.len());
        let byte = (start..end).fold(0u8, |acc, i| (acc << 1) | u8::from(bits.bit(i)));
        bytes.push(byte);
        start = end;
    }
    bytes
}
