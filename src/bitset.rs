//! Bitset over the inclusive universe `0..=max`.
//!
//! Bit `i` lives in byte `i >> 3` at offset `7 - (i % 8)`, i.e. the most
//! significant bit of each byte comes first. The raw bytes are what
//! [`Bitset::hash`] feeds through FNV, so the layout is part of the hash
//! contract.
//!
//! Combining two sets (`union`, `difference`, `intersect`) starts from a
//! copy of the operand with the larger universe (`self` on a tie) and
//! combines the other operand's bytes into it over the overlapping range.
//! Bits past `max` in the last byte are never set.

use crate::error::{Error, Result};
use crate::fnv;
use core::fmt;

const BIT_MASK: u8 = 0b1000_0000_u8;

#[inline]
fn byte_of(bit: usize) -> usize {
    bit >> 3
}

#[inline]
fn mask_of(bit: usize) -> u8 {
    BIT_MASK >> (bit % 8)
}

/// Number of bytes covering `0..=max`.
#[inline]
fn byte_count(max: usize) -> usize {
    byte_of(max) + 1
}

fn zeroed(len: usize) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    bytes.try_reserve_exact(len)?;
    bytes.resize(len, 0);
    Ok(bytes)
}

pub struct Bitset {
    bytes: Box<[u8]>,
    max: usize,
}

impl Bitset {
    /// Creates an empty set over `0..=max`.
    ///
    /// # Errors
    /// Returns [`Error::Alloc`] when the byte buffer cannot be reserved.
    pub fn new(max: usize) -> Result<Self> {
        Ok(Self {
            bytes: zeroed(byte_count(max))?.into_boxed_slice(),
            max,
        })
    }

    /// Deep copy.
    ///
    /// # Errors
    /// Returns [`Error::Alloc`] when the byte buffer cannot be reserved.
    pub fn try_clone(&self) -> Result<Self> {
        self.resized(self.max)
    }

    /// Copy of `self` over the universe `0..=max`, where `max >= self.max`.
    fn resized(&self, max: usize) -> Result<Self> {
        debug_assert!(max >= self.max);
        let mut bytes = zeroed(byte_count(max))?;
        bytes[..self.bytes.len()].copy_from_slice(&self.bytes);
        Ok(Self {
            bytes: bytes.into_boxed_slice(),
            max,
        })
    }

    /// Inclusive upper bound of the universe.
    pub fn max(&self) -> usize {
        self.max
    }

    pub fn size_in_bytes(&self) -> usize {
        self.bytes.len()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Number of set bits.
    pub fn count(&self) -> usize {
        self.bytes.iter().map(|b| b.count_ones() as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.iter().all(|&b| b == 0)
    }

    /// Unsets every bit; the universe is kept.
    pub fn clear(&mut self) {
        self.bytes.fill(0);
    }

    /// Returns `false` for any bit past `max`.
    pub fn has(&self, bit: usize) -> bool {
        bit <= self.max && self.bytes[byte_of(bit)] & mask_of(bit) != 0
    }

    /// Sets `bit`.
    ///
    /// # Errors
    /// Returns [`Error::OutOfUniverse`] when `bit > max`.
    pub fn incl(&mut self, bit: usize) -> Result<()> {
        if bit > self.max {
            return Err(Error::OutOfUniverse { bit, max: self.max });
        }
        self.bytes[byte_of(bit)] |= mask_of(bit);
        Ok(())
    }

    /// Unsets `bit`; bits past `max` are ignored.
    pub fn excl(&mut self, bit: usize) {
        if bit <= self.max {
            self.bytes[byte_of(bit)] &= !mask_of(bit);
        }
    }

    /// Smallest set bit `>= from`.
    pub fn next(&self, from: usize) -> Option<usize> {
        if from > self.max {
            return None;
        }
        let mut idx = byte_of(from);
        // Drop the bits of the first byte that precede `from`.
        let mut byte = self.bytes[idx] & (u8::MAX >> (from % 8));
        loop {
            if byte != 0 {
                let bit = (idx << 3) + byte.leading_zeros() as usize;
                return (bit <= self.max).then_some(bit);
            }
            idx += 1;
            byte = *self.bytes.get(idx)?;
        }
    }

    /// Smallest set bit.
    pub fn first(&self) -> Option<usize> {
        self.next(0)
    }

    /// Set bits in ascending order.
    pub fn iter(&self) -> Iter<'_> {
        Iter { set: self, pos: 0 }
    }

    /// True when every bit of `self` is also in `other`.
    pub fn is_subset(&self, other: &Bitset) -> bool {
        self.iter().all(|bit| other.has(bit))
    }

    /// True when `self` is a subset of `other` but not the other way round.
    pub fn is_proper_subset(&self, other: &Bitset) -> bool {
        self.is_subset(other) && !other.is_subset(self)
    }

    /// Compares membership bit by bit over `0..=max(self.max, other.max)`.
    pub fn eql(&self, other: &Bitset) -> bool {
        (0..=self.max.max(other.max)).all(|bit| self.has(bit) == other.has(bit))
    }

    /// True when the two sets share at least one bit.
    pub fn intersects(&self, other: &Bitset) -> bool {
        self.bytes
            .iter()
            .zip(other.bytes.iter())
            .any(|(a, b)| a & b != 0)
    }

    /// `self ∪ other`, over the larger universe.
    ///
    /// # Errors
    /// Returns [`Error::Alloc`] when the result cannot be allocated.
    pub fn union(&self, other: &Bitset) -> Result<Bitset> {
        let (larger, smaller) = self.by_universe(other);
        let mut out = larger.try_clone()?;
        for (dst, src) in out.bytes.iter_mut().zip(smaller.bytes.iter()) {
            *dst |= src;
        }
        Ok(out)
    }

    /// The larger-universe operand minus the smaller one.
    ///
    /// This is `self \ other` when `self.max >= other.max` and
    /// `other \ self` otherwise.
    ///
    /// # Errors
    /// Returns [`Error::Alloc`] when the result cannot be allocated.
    pub fn difference(&self, other: &Bitset) -> Result<Bitset> {
        let (larger, smaller) = self.by_universe(other);
        let mut out = larger.try_clone()?;
        for (dst, src) in out.bytes.iter_mut().zip(smaller.bytes.iter()) {
            *dst &= !src;
        }
        Ok(out)
    }

    /// `self ∩ other`, over the larger universe. Bytes of the larger operand
    /// past the overlap are cleared.
    ///
    /// # Errors
    /// Returns [`Error::Alloc`] when the result cannot be allocated.
    pub fn intersect(&self, other: &Bitset) -> Result<Bitset> {
        let (larger, smaller) = self.by_universe(other);
        let mut out = larger.try_clone()?;
        let overlap = smaller.bytes.len();
        for (dst, src) in out.bytes.iter_mut().zip(smaller.bytes.iter()) {
            *dst &= src;
        }
        out.bytes[overlap..].fill(0);
        Ok(out)
    }

    /// FNV hash of the raw byte buffer.
    ///
    /// Sets with a different `max` hash differently even when [`eql`]
    /// holds, because their buffers differ in length.
    ///
    /// [`eql`]: Bitset::eql
    pub fn hash(&self) -> u32 {
        fnv::hash(&self.bytes)
    }

    /// Orders `(self, other)` as `(larger universe, smaller universe)`;
    /// ties go to `self`.
    fn by_universe<'a>(&'a self, other: &'a Bitset) -> (&'a Bitset, &'a Bitset) {
        if other.max > self.max {
            (other, self)
        } else {
            (self, other)
        }
    }
}

impl PartialEq for Bitset {
    fn eq(&self, other: &Self) -> bool {
        self.eql(other)
    }
}

impl Eq for Bitset {}

impl fmt::Debug for Bitset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bitset(max={}) ", self.max)?;
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Iterator over set bits, ascending.
pub struct Iter<'a> {
    set: &'a Bitset,
    pos: usize,
}

impl Iterator for Iter<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let bit = self.set.next(self.pos)?;
        self.pos = bit + 1;
        Some(bit)
    }
}

impl<'a> IntoIterator for &'a Bitset {
    type Item = usize;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
