//! `BitVector<W>`: an immutable bit sequence with a three-level rank index
//! (super-block/sub-block/word) and optional sparse select-sample arrays.
//!
//! Bits are accumulated with [`BitVectorBuilder`], then frozen into a
//! `BitVector` by [`BitVectorBuilder::build`], which computes the rank index
//! and (optionally) the select0/select1 sample arrays in one pass.

mod rank_index;

use std::borrow::Cow;

pub use rank_index::RankIndex;

use crate::error::{Error, Result};
use crate::io::{Mapper, Reader, Writer};
use crate::popcount::PopCount;
use crate::select_table::select_byte;
use crate::word::Word;

/// Mutable scratch bit sequence used to populate a [`BitVector`] before its
/// rank/select index is built. Has no rank/select support and no persisted
/// form of its own.
#[derive(Clone)]
pub struct BitVectorBuilder<W: Word = u64> {
    words: Vec<W>,
    size: usize,
}

impl<W: Word> Default for BitVectorBuilder<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Word> BitVectorBuilder<W> {
    pub fn new() -> Self {
        Self {
            words: Vec::new(),
            size: 0,
        }
    }

    /// A builder pre-sized to `size` bits, all initially zero.
    pub fn with_len(size: usize) -> Self {
        let word_bits = W::BITS as usize;
        let num_words = size.div_ceil(word_bits);
        Self {
            words: vec![W::from_u64(0); num_words],
            size,
        }
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn get(&self, i: usize) -> bool {
        debug_assert!(i < self.size);
        let word_bits = W::BITS as usize;
        (self.words[i / word_bits].to_u64() >> (i % word_bits)) & 1 == 1
    }

    /// Sets bit `i` (which must already exist, e.g. via [`Self::with_len`]).
    pub fn set(&mut self, i: usize, bit: bool) {
        debug_assert!(i < self.size);
        let word_bits = W::BITS as usize;
        let u = i / word_bits;
        let o = i % word_bits;
        let word = self.words[u].to_u64();
        let updated = if bit { word | (1u64 << o) } else { word & !(1u64 << o) };
        self.words[u] = W::from_u64(updated);
    }

    /// Appends a new bit.
    pub fn push(&mut self, bit: bool) {
        let word_bits = W::BITS as usize;
        if self.size % word_bits == 0 {
            self.words.push(W::from_u64(0));
        }
        self.size += 1;
        self.set(self.size - 1, bit);
    }

    /// Freezes the accumulated bits into an immutable [`BitVector`],
    /// computing its rank index and, if requested, its select sample
    /// arrays.
    pub fn build(self, want_select0: bool, want_select1: bool) -> BitVector<'static, W> {
        let BitVectorBuilder { words, size } = self;
        let word_bits = W::BITS as usize;

        let num_ranks = (size.div_ceil(512) + 1).max(1);
        let mut ranks = vec![RankIndex::default(); num_ranks];

        let mut select0s: Vec<u32> = Vec::new();
        let mut select1s: Vec<u32> = Vec::new();
        let mut c0 = 0usize;
        let mut c1 = 0usize;

        let bit_at = |i: usize| -> bool { (words[i / word_bits].to_u64() >> (i % word_bits)) & 1 == 1 };

        for i in 0..size {
            if i % 64 == 0 {
                let k = i / 512;
                let j = (i / 64) % 8;
                if j == 0 {
                    ranks[k].set_abs(c1);
                } else {
                    let rel = c1 - ranks[k].abs();
                    ranks[k].set_rel(j, rel);
                }
            }
            if bit_at(i) {
                if want_select1 && c1 % 512 == 0 {
                    select1s.push(i as u32);
                }
                c1 += 1;
            } else {
                if want_select0 && c0 % 512 == 0 {
                    select0s.push(i as u32);
                }
                c0 += 1;
            }
        }

        // Tail-fill: any rel_j past the last sub-block boundary actually
        // reached by the walk above still needs to equal the (identical)
        // final count, so that rank1(min(512k+64j, n)) == abs + rel_j holds
        // for every j even when the last super-block is incomplete.
        if size > 0 && size % 512 != 0 {
            let k = (size - 1) / 512;
            let last_j = ((size - 1) / 64) % 8;
            let filled = c1 - ranks[k].abs();
            for j in (last_j + 1)..=7 {
                ranks[k].set_rel(j, filled);
            }
        }

        if let Some(last) = ranks.last_mut() {
            last.set_abs(c1);
        }

        if want_select1 {
            select1s.push(size as u32);
            select1s.shrink_to_fit();
        }
        if want_select0 {
            select0s.push(size as u32);
            select0s.shrink_to_fit();
        }

        BitVector {
            words: Cow::Owned(words),
            size,
            num_1s: c1,
            ranks,
            select0s: want_select0.then(|| Cow::Owned(select0s)),
            select1s: want_select1.then(|| Cow::Owned(select1s)),
        }
    }
}

/// An immutable bit sequence with O(1) rank and amortized O(1) select,
/// over a word stream of width `W`.
#[derive(Clone)]
pub struct BitVector<'a, W: Word = u64> {
    words: Cow<'a, [W]>,
    size: usize,
    num_1s: usize,
    ranks: Vec<RankIndex>,
    select0s: Option<Cow<'a, [u32]>>,
    select1s: Option<Cow<'a, [u32]>>,
}

impl<'a, W: Word> Default for BitVector<'a, W> {
    fn default() -> Self {
        Self {
            words: Cow::Owned(Vec::new()),
            size: 0,
            num_1s: 0,
            ranks: Vec::new(),
            select0s: None,
            select1s: None,
        }
    }
}

impl<'a, W: Word> BitVector<'a, W> {
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn num_ones(&self) -> usize {
        self.num_1s
    }

    pub fn num_zeros(&self) -> usize {
        self.size - self.num_1s
    }

    pub fn get(&self, i: usize) -> Result<bool> {
        if i >= self.size {
            return Err(Error::Bound {
                index: i,
                limit: self.size,
            });
        }
        let word_bits = W::BITS as usize;
        Ok((self.words[i / word_bits].to_u64() >> (i % word_bits)) & 1 == 1)
    }

    /// Count of 1-bits in `[0, i)`.
    pub fn rank1(&self, i: usize) -> Result<usize> {
        if self.ranks.is_empty() {
            return Err(Error::State);
        }
        if i > self.size {
            return Err(Error::Bound {
                index: i,
                limit: self.size,
            });
        }
        Ok(self.rank1_unchecked(i))
    }

    /// Count of 0-bits in `[0, i)`.
    pub fn rank0(&self, i: usize) -> Result<usize> {
        let ones = self.rank1(i)?;
        Ok(i - ones)
    }

    fn rank1_unchecked(&self, i: usize) -> usize {
        let k = i / 512;
        let j = (i / 64) % 8;
        let rank = &self.ranks[k];
        let mut offset = rank.abs();
        if j >= 1 {
            offset += rank.rel(j);
        }

        let word_bits = W::BITS as usize;
        if word_bits == 32 && ((i / 32) & 1) == 1 {
            offset += self.words[(i / 32) - 1].to_u64().count_ones() as usize;
        }

        let word_index = i / word_bits;
        let bit_in_word = i % word_bits;
        if bit_in_word > 0 {
            let word = self.words[word_index].to_u64();
            let mask = (1u64 << bit_in_word) - 1;
            offset += (word & mask).count_ones() as usize;
        }
        offset
    }

    /// Position of the `i`-th (0-indexed) 1-bit.
    pub fn select1(&self, i: usize) -> Result<usize> {
        if i >= self.num_1s {
            return Err(Error::Bound {
                index: i,
                limit: self.num_1s,
            });
        }
        let samples = self.select1s.as_deref().ok_or(Error::State)?;

        let s = i / 512;
        if i % 512 == 0 {
            return Ok(samples[s] as usize);
        }

        let mut begin = samples[s] as usize / 512;
        let mut end = (samples[s + 1] as usize + 511) / 512;
        if end - begin <= 10 {
            while i >= self.ranks[begin + 1].abs() {
                begin += 1;
            }
        } else {
            while begin + 1 < end {
                let mid = (begin + end) / 2;
                if i < self.ranks[mid].abs() {
                    end = mid;
                } else {
                    begin = mid;
                }
            }
        }

        let k = begin;
        let mut residual = i - self.ranks[k].abs();

        let rank = &self.ranks[k];
        let mut j = 0usize;
        for jj in 1..=7 {
            if rank.rel(jj) <= residual {
                j = jj;
            } else {
                break;
            }
        }
        if j > 0 {
            residual -= rank.rel(j);
        }

        let word_bits = W::BITS as usize;
        let units_per_subblock = 64 / word_bits;
        let mut unit_id = k * (512 / word_bits) + j * units_per_subblock;

        if word_bits == 32 {
            let c = self.words[unit_id].to_u64().count_ones() as usize;
            if residual >= c {
                residual -= c;
                unit_id += 1;
            }
        }

        let word = self.words[unit_id].to_u64();
        let bit_id = unit_id * word_bits;
        Ok(bit_id + finish_select(residual, word))
    }

    /// Position of the `i`-th (0-indexed) 0-bit.
    pub fn select0(&self, i: usize) -> Result<usize> {
        if i >= self.num_zeros() {
            return Err(Error::Bound {
                index: i,
                limit: self.num_zeros(),
            });
        }
        let samples = self.select0s.as_deref().ok_or(Error::State)?;

        let s = i / 512;
        if i % 512 == 0 {
            return Ok(samples[s] as usize);
        }

        let mut begin = samples[s] as usize / 512;
        let mut end = (samples[s + 1] as usize + 511) / 512;
        if end - begin <= 10 {
            while i >= 512 * (begin + 1) - self.ranks[begin + 1].abs() {
                begin += 1;
            }
        } else {
            while begin + 1 < end {
                let mid = (begin + end) / 2;
                if i < 512 * mid - self.ranks[mid].abs() {
                    end = mid;
                } else {
                    begin = mid;
                }
            }
        }

        let k = begin;
        let mut residual = i - (512 * k - self.ranks[k].abs());

        let rank = &self.ranks[k];
        let mut j = 0usize;
        for jj in 1..=7 {
            if 64 * jj - rank.rel(jj) <= residual {
                j = jj;
            } else {
                break;
            }
        }
        if j > 0 {
            residual -= 64 * j - rank.rel(j);
        }

        let word_bits = W::BITS as usize;
        let word_mask = if word_bits == 64 { u64::MAX } else { (1u64 << word_bits) - 1 };
        let units_per_subblock = 64 / word_bits;
        let mut unit_id = k * (512 / word_bits) + j * units_per_subblock;

        if word_bits == 32 {
            let comp = (!self.words[unit_id].to_u64()) & word_mask;
            let c = comp.count_ones() as usize;
            if residual >= c {
                residual -= c;
                unit_id += 1;
            }
        }

        let comp_word = (!self.words[unit_id].to_u64()) & word_mask;
        let bit_id = unit_id * word_bits;
        Ok(bit_id + finish_select(residual, comp_word))
    }

    /// Byte cost of this vector's persisted form.
    pub fn io_size(&self) -> usize {
        let word_bytes = W::BITS as usize / 8;
        let words_size = 8 + self.words.len() * word_bytes;
        let ranks_size = 8 + self.ranks.len() * 16;
        let sel0_size = 8 + self.select0s.as_ref().map_or(0, |s| s.len()) * 4;
        let sel1_size = 8 + self.select1s.as_ref().map_or(0, |s| s.len()) * 4;
        words_size + 8 + 8 + ranks_size + sel0_size + sel1_size
    }

    pub fn write(&self, writer: &mut impl Writer) -> Result<()> {
        writer.write_scalar::<u64>(self.words.len() as u64)?;
        writer.write_array::<W>(&self.words)?;
        writer.write_scalar::<u64>(self.size as u64)?;
        writer.write_scalar::<u64>(self.num_1s as u64)?;
        writer.write_scalar::<u64>(self.ranks.len() as u64)?;
        for r in self.ranks.iter() {
            write_rank(writer, r)?;
        }
        write_u32_array(writer, self.select0s.as_deref())?;
        write_u32_array(writer, self.select1s.as_deref())?;
        Ok(())
    }

    pub fn read(reader: &mut impl Reader) -> Result<Self> {
        let m = crate::error::narrow_size(reader.read_scalar::<u64>()?)?;
        let words = reader.read_array::<W>(m)?;
        let size = crate::error::narrow_size(reader.read_scalar::<u64>()?)?;
        let num_1s = crate::error::narrow_size(reader.read_scalar::<u64>()?)?;
        let r = crate::error::narrow_size(reader.read_scalar::<u64>()?)?;
        let mut ranks = Vec::with_capacity(r);
        for _ in 0..r {
            ranks.push(read_rank(reader)?);
        }
        let select0s = read_u32_array(reader)?;
        let select1s = read_u32_array(reader)?;

        let temp = Self {
            words: Cow::Owned(words),
            size,
            num_1s,
            ranks,
            select0s: (!select0s.is_empty()).then(|| Cow::Owned(select0s)),
            select1s: (!select1s.is_empty()).then(|| Cow::Owned(select1s)),
        };
        temp.validate()?;
        Ok(temp)
    }

    pub fn map(mapper: &mut impl Mapper<'a>) -> Result<Self> {
        let m = crate::error::narrow_size(mapper.map_scalar::<u64>()?)?;
        let words = mapper.map_array::<W>(m)?;
        let size = crate::error::narrow_size(mapper.map_scalar::<u64>()?)?;
        let num_1s = crate::error::narrow_size(mapper.map_scalar::<u64>()?)?;
        let r = crate::error::narrow_size(mapper.map_scalar::<u64>()?)?;
        let mut ranks = Vec::with_capacity(r);
        for _ in 0..r {
            ranks.push(map_rank(mapper)?);
        }
        let select0s = map_u32_array(mapper)?;
        let select1s = map_u32_array(mapper)?;

        let temp = Self {
            words: Cow::Borrowed(words),
            size,
            num_1s,
            ranks,
            select0s: (!select0s.is_empty()).then(|| Cow::Borrowed(select0s)),
            select1s: (!select1s.is_empty()).then(|| Cow::Borrowed(select1s)),
        };
        temp.validate()?;
        Ok(temp)
    }

    fn validate(&self) -> Result<()> {
        let expected_ranks = (self.size.div_ceil(512) + 1).max(1);
        if self.ranks.len() != expected_ranks {
            return Err(Error::Format(format!(
                "rank array has {} records, expected {}",
                self.ranks.len(),
                expected_ranks
            )));
        }
        let word_bits = W::BITS as usize;
        let needed_units = self.size.div_ceil(word_bits);
        if self.words.len() < needed_units {
            return Err(Error::Format(
                "word array too short for the declared size".into(),
            ));
        }
        if let Some(s) = self.select0s.as_deref() {
            if s.last().is_some_and(|&last| last as usize != self.size) {
                return Err(Error::Format("select0s sentinel does not equal size".into()));
            }
        }
        if let Some(s) = self.select1s.as_deref() {
            if s.last().is_some_and(|&last| last as usize != self.size) {
                return Err(Error::Format("select1s sentinel does not equal size".into()));
            }
        }
        Ok(())
    }

    /// Drops all contents. After this, rank/select return `Error::State`.
    pub fn clear(&mut self) {
        let mut empty = Self::default();
        std::mem::swap(self, &mut empty);
    }
}

impl<'a, W: Word> std::fmt::Debug for BitVector<'a, W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BitVector")
            .field("size", &self.size)
            .field("num_1s", &self.num_1s)
            .field("has_select0", &self.select0s.is_some())
            .field("has_select1", &self.select1s.is_some())
            .finish()
    }
}

/// Locates the `i`-th set bit within `word` by repeatedly halving the
/// search range using the popcount kernel's byte-boundary prefix counts.
fn finish_select(mut i: usize, mut word: u64) -> usize {
    let count = PopCount::new(word);
    let mut bit_id = 0usize;
    if i < count.lo32() {
        if i < count.lo16() {
            if i >= count.lo8() {
                bit_id += 8;
                word >>= 8;
                i -= count.lo8();
            }
        } else if i < count.lo24() {
            bit_id += 16;
            word >>= 16;
            i -= count.lo16();
        } else {
            bit_id += 24;
            word >>= 24;
            i -= count.lo24();
        }
    } else if i < count.lo48() {
        if i < count.lo40() {
            bit_id += 32;
            word >>= 32;
            i -= count.lo32();
        } else {
            bit_id += 40;
            word >>= 40;
            i -= count.lo40();
        }
    } else if i < count.lo56() {
        bit_id += 48;
        word >>= 48;
        i -= count.lo48();
    } else {
        bit_id += 56;
        word >>= 56;
        i -= count.lo56();
    }
    bit_id + select_byte(i, (word & 0xFF) as u8)
}

fn write_rank(writer: &mut impl Writer, r: &RankIndex) -> Result<()> {
    writer.write_scalar::<u32>(r.raw_abs())?;
    writer.write_scalar::<u32>(0)?; // alignment padding
    writer.write_scalar::<u64>(r.raw_rel())?;
    Ok(())
}

fn read_rank(reader: &mut impl Reader) -> Result<RankIndex> {
    let abs = reader.read_scalar::<u32>()?;
    let _pad = reader.read_scalar::<u32>()?;
    let rel = reader.read_scalar::<u64>()?;
    Ok(RankIndex::from_raw(abs, rel))
}

fn map_rank<'a>(mapper: &mut impl Mapper<'a>) -> Result<RankIndex> {
    let abs = mapper.map_scalar::<u32>()?;
    let _pad = mapper.map_scalar::<u32>()?;
    let rel = mapper.map_scalar::<u64>()?;
    Ok(RankIndex::from_raw(abs, rel))
}

fn write_u32_array(writer: &mut impl Writer, arr: Option<&[u32]>) -> Result<()> {
    let data = arr.unwrap_or(&[]);
    writer.write_scalar::<u64>(data.len() as u64)?;
    writer.write_array::<u32>(data)?;
    Ok(())
}

fn read_u32_array(reader: &mut impl Reader) -> Result<Vec<u32>> {
    let n = crate::error::narrow_size(reader.read_scalar::<u64>()?)?;
    reader.read_array::<u32>(n)
}

fn map_u32_array<'a>(mapper: &mut impl Mapper<'a>) -> Result<&'a [u32]> {
    let n = crate::error::narrow_size(mapper.map_scalar::<u64>()?)?;
    mapper.map_array::<u32>(n)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build_from_bits<W: Word>(bits: &[bool], want_select0: bool, want_select1: bool) -> BitVector<'static, W> {
        let mut b = BitVectorBuilder::<W>::new();
        for &bit in bits {
            b.push(bit);
        }
        b.build(want_select0, want_select1)
    }

    #[test]
    fn empty_vector_has_zero_rank_and_no_state_error() {
        let bv: BitVector<u64> = build_from_bits(&[], true, true);
        assert_eq!(bv.rank1(0).unwrap(), 0);
    }

    #[test]
    fn default_is_unbuilt_and_errors() {
        let bv: BitVector<u64> = BitVector::default();
        assert!(matches!(bv.rank1(0), Err(Error::State)));
    }

    #[test]
    fn clear_puts_instance_back_into_state_error() {
        let mut bv: BitVector<u64> = build_from_bits(&[true, false, true], true, true);
        bv.clear();
        assert!(matches!(bv.rank1(0), Err(Error::State)));
    }

    #[test]
    fn scenario_one_from_spec() {
        let bits = [true, false, true, false, true, true, false, false];
        let bv: BitVector<u64> = build_from_bits(&bits, true, true);
        assert_eq!(bv.num_ones(), 4);

        let expected_rank1 = [0, 1, 1, 2, 2, 3, 4, 4, 4];
        for (i, &expected) in expected_rank1.iter().enumerate() {
            assert_eq!(bv.rank1(i).unwrap(), expected, "rank1({i})");
        }

        let expected_select1 = [0, 2, 4, 5];
        for (i, &expected) in expected_select1.iter().enumerate() {
            assert_eq!(bv.select1(i).unwrap(), expected, "select1({i})");
        }

        let expected_select0 = [1, 3, 6, 7];
        for (i, &expected) in expected_select0.iter().enumerate() {
            assert_eq!(bv.select0(i).unwrap(), expected, "select0({i})");
        }
    }

    #[test]
    fn all_zero_vector() {
        let bits = vec![false; 100];
        let bv: BitVector<u64> = build_from_bits(&bits, true, true);
        assert_eq!(bv.num_ones(), 0);
        assert_eq!(bv.rank1(100).unwrap(), 0);
        for i in 0..100 {
            assert_eq!(bv.select0(i).unwrap(), i);
        }
    }

    #[test]
    fn all_one_vector() {
        let bits = vec![true; 100];
        let bv: BitVector<u64> = build_from_bits(&bits, true, true);
        assert_eq!(bv.num_ones(), 100);
        for i in 0..100 {
            assert_eq!(bv.rank1(i).unwrap(), i);
            assert_eq!(bv.select1(i).unwrap(), i);
        }
    }

    #[test]
    fn out_of_range_select_is_bound_error() {
        let bv: BitVector<u64> = build_from_bits(&[true, false], true, true);
        assert!(matches!(bv.select1(1), Err(Error::Bound { .. })));
        assert!(matches!(bv.select0(1), Err(Error::Bound { .. })));
    }

    #[test]
    fn select_without_the_option_is_state_error() {
        let bv: BitVector<u64> = build_from_bits(&[true, false, true], false, false);
        assert!(matches!(bv.select1(0), Err(Error::State)));
        assert!(matches!(bv.select0(0), Err(Error::State)));
    }

    #[test]
    fn boundary_sizes_round_trip_rank_and_select_u64() {
        for &n in &[1usize, 63, 64, 65, 511, 512, 513, 4095, 4096] {
            let bits: Vec<bool> = (0..n).map(|i| i % 7 == 0).collect();
            let bv: BitVector<u64> = build_from_bits(&bits, true, true);
            let ones = bits.iter().filter(|&&b| b).count();
            assert_eq!(bv.num_ones(), ones, "n={n}");
            assert_eq!(bv.rank1(n).unwrap(), ones, "n={n}");
            for i in 0..ones {
                let pos = bv.select1(i).unwrap();
                assert!(bits[pos], "n={n} select1({i})={pos} should be a 1-bit");
                assert_eq!(bv.rank1(pos).unwrap(), i, "n={n} select1({i})");
            }
        }
    }

    #[test]
    fn boundary_sizes_round_trip_rank_and_select_u32() {
        for &n in &[1usize, 63, 64, 65, 511, 512, 513, 4095, 4096] {
            let bits: Vec<bool> = (0..n).map(|i| i % 5 == 0).collect();
            let bv: BitVector<u32> = build_from_bits(&bits, true, true);
            let ones = bits.iter().filter(|&&b| b).count();
            assert_eq!(bv.rank1(n).unwrap(), ones, "n={n}");
            for i in 0..ones {
                let pos = bv.select1(i).unwrap();
                assert!(bits[pos], "n={n} select1({i})={pos} should be a 1-bit");
            }
        }
    }

    #[test]
    fn rank0_plus_rank1_is_identity() {
        let bits: Vec<bool> = (0..2000).map(|i| (i * 13) % 17 == 0).collect();
        let bv: BitVector<u64> = build_from_bits(&bits, true, true);
        for i in 0..=2000 {
            assert_eq!(bv.rank0(i).unwrap() + bv.rank1(i).unwrap(), i);
        }
    }

    #[test]
    fn write_then_read_round_trips_queries() {
        let bits: Vec<bool> = (0..3000).map(|i| (i * 7) % 11 == 0).collect();
        let bv: BitVector<u64> = build_from_bits(&bits, true, true);

        let mut buf = Vec::new();
        bv.write(&mut buf).unwrap();
        let mut cursor = std::io::Cursor::new(&buf);
        let back: BitVector<u64> = BitVector::read(&mut cursor).unwrap();

        assert_eq!(back.num_ones(), bv.num_ones());
        for i in (0..=3000).step_by(37) {
            assert_eq!(back.rank1(i).unwrap(), bv.rank1(i).unwrap());
        }
        for i in (0..back.num_ones()).step_by(13) {
            assert_eq!(back.select1(i).unwrap(), bv.select1(i).unwrap());
        }
    }

    #[test]
    fn write_then_map_round_trips_queries() {
        let bits: Vec<bool> = (0..2500).map(|i| (i * 3) % 8 == 0).collect();
        let bv: BitVector<u32> = build_from_bits(&bits, true, true);

        let mut buf = Vec::new();
        bv.write(&mut buf).unwrap();
        let mut mapper = crate::io::ByteMapper::new(&buf);
        let back: BitVector<u32> = BitVector::map(&mut mapper).unwrap();

        for i in (0..=2500).step_by(29) {
            assert_eq!(back.rank1(i).unwrap(), bv.rank1(i).unwrap());
        }
    }

    #[test]
    fn format_error_on_truncated_persisted_data() {
        let bits: Vec<bool> = (0..200).map(|i| i % 2 == 0).collect();
        let bv: BitVector<u64> = build_from_bits(&bits, true, true);
        let mut buf = Vec::new();
        bv.write(&mut buf).unwrap();
        buf.truncate(buf.len() - 4);

        let mut cursor = std::io::Cursor::new(&buf);
        let result: Result<BitVector<u64>> = BitVector::read(&mut cursor);
        assert!(result.is_err());
    }
}
