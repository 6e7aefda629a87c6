//! The word-width abstraction this crate's containers are generic over.
//!
//! `FlatVector` and `BitVector` both store their backing bits as a stream of
//! fixed-width words, where the width is a build-time choice of 32 or 64
//! bits. Rather than hand-duplicating every method for both widths, both
//! containers are generic over a `Word`, implemented here for `u32` and
//! `u64`. All arithmetic inside the containers goes through `to_u64`/
//! `from_u64`, so the generic code reads as ordinary 64-bit bit-twiddling and
//! the width-specific branches collapse to `W::BITS == 32` checks the
//! compiler prunes at monomorphization time.

/// A word a bit vector or flat vector can be packed into: `u32` or `u64`.
pub trait Word:
    Copy + Clone + Default + PartialEq + Eq + std::fmt::Debug + bytemuck::Pod + Send + Sync + 'static
{
    /// Width of this word in bits.
    const BITS: u32;

    fn from_u64(v: u64) -> Self;
    fn to_u64(self) -> u64;
    fn count_ones(self) -> u32;
}

impl Word for u32 {
    const BITS: u32 = 32;

    #[inline]
    fn from_u64(v: u64) -> Self {
        v as u32
    }

    #[inline]
    fn to_u64(self) -> u64 {
        self as u64
    }

    #[inline]
    fn count_ones(self) -> u32 {
        u32::count_ones(self)
    }
}

impl Word for u64 {
    const BITS: u32 = 64;

    #[inline]
    fn from_u64(v: u64) -> Self {
        v
    }

    #[inline]
    fn to_u64(self) -> u64 {
        self
    }

    #[inline]
    fn count_ones(self) -> u32 {
        u64::count_ones(self)
    }
}
