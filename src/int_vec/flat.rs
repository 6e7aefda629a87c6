//! `FlatVector<W>`: an immutable array of fixed-width unsigned integers,
//! packed into a stream of `W`-bit words at exactly the width needed to fit
//! the largest value.

use std::borrow::Cow;

use crate::error::{Error, Result};
use crate::io::{Mapper, Reader, Writer};
use crate::word::Word;

/// An immutable, densely packed array of `u32` values, each stored in
/// exactly `value_size` bits.
///
/// `value_size` is chosen at `build` time as `⌈log2(max+1)⌉`; it is a
/// runtime field, not a const generic, since the data itself determines it.
#[derive(Clone)]
pub struct FlatVector<'a, W: Word = u64> {
    units: Cow<'a, [W]>,
    value_size: u32,
    mask: u32,
    size: usize,
}

impl<'a, W: Word> Default for FlatVector<'a, W> {
    fn default() -> Self {
        Self {
            units: Cow::Owned(Vec::new()),
            value_size: 0,
            mask: 0,
            size: 0,
        }
    }
}

impl<'a, W: Word> FlatVector<'a, W> {
    /// Number of elements.
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Bits used to store each element.
    pub fn value_size(&self) -> u32 {
        self.value_size
    }

    /// `(1 << value_size) - 1`, or 0 if `value_size == 0`.
    pub fn mask(&self) -> u32 {
        self.mask
    }

    /// Builds a flat vector holding exactly `values`, choosing the smallest
    /// width that fits every element.
    pub fn build(values: &[u32]) -> Self {
        let max = values.iter().copied().max().unwrap_or(0);
        let value_size = if max == 0 { 0 } else { 32 - max.leading_zeros() };
        let mask = if value_size == 0 {
            0
        } else {
            u32::MAX >> (32 - value_size)
        };

        let word_bits = W::BITS as usize;
        let units_per_slot = 64 / word_bits; // 1 or 2; always exact since W in {32,64}
        let num_units = if values.is_empty() {
            0
        } else if value_size == 0 {
            units_per_slot
        } else {
            let mut n = (value_size as u64 * values.len() as u64).div_ceil(word_bits as u64);
            // Rounds up to a multiple of `units_per_slot`. This only works
            // because `units_per_slot` is 1 or 2 for this crate's two word
            // widths: adding `n % units_per_slot` either no-ops (already a
            // multiple) or adds exactly 1 to an odd count, landing on the
            // next even number.
            n += n % units_per_slot as u64;
            n as usize
        };

        let mut fv = Self {
            units: Cow::Owned(vec![W::from_u64(0); num_units]),
            value_size,
            mask,
            size: values.len(),
        };
        for (i, &v) in values.iter().enumerate() {
            fv.set(i, v);
        }
        fv
    }

    fn set(&mut self, i: usize, v: u32) {
        debug_assert!(i < self.size);
        debug_assert!(v & !self.mask == 0);

        let word_bits = W::BITS as usize;
        let pos = i * self.value_size as usize;
        let u = pos / word_bits;
        let o = pos % word_bits;
        let units = self.units.to_mut();

        let clear = !((self.mask as u64) << o);
        let set_bits = (v as u64) << o;
        let merged = (units[u].to_u64() & clear) | set_bits;
        units[u] = W::from_u64(merged);

        if o + self.value_size as usize > word_bits {
            let shift = (word_bits - o) as u32;
            let clear_hi = !((self.mask as u64) >> shift);
            let set_hi = (v as u64) >> shift;
            let merged_hi = (units[u + 1].to_u64() & clear_hi) | set_hi;
            units[u + 1] = W::from_u64(merged_hi);
        }
    }

    /// Returns the value at `i` without bounds checking.
    ///
    /// # Safety
    /// `i` must be `< self.len()`.
    pub unsafe fn get_unchecked(&self, i: usize) -> u32 {
        let word_bits = W::BITS as usize;
        let pos = i * self.value_size as usize;
        let u = pos / word_bits;
        let o = pos % word_bits;

        let lo = (self.units[u].to_u64() >> o) as u32;
        if o + self.value_size as usize <= word_bits {
            lo & self.mask
        } else {
            let shift = (word_bits - o) as u32;
            let hi = (self.units[u + 1].to_u64() << shift) as u32;
            (lo | hi) & self.mask
        }
    }

    /// Returns the value at `i`.
    pub fn get(&self, i: usize) -> Result<u32> {
        if i >= self.size {
            return Err(Error::Bound {
                index: i,
                limit: self.size,
            });
        }
        Ok(unsafe { self.get_unchecked(i) })
    }

    /// Byte cost of this vector's persisted form: the word array plus the
    /// three scalar fields (`value_size`, `mask`, `size`).
    pub fn io_size(&self) -> usize {
        8 + self.units.len() * (W::BITS as usize / 8) + 4 + 4 + 8
    }

    pub fn write(&self, writer: &mut impl Writer) -> Result<()> {
        writer.write_scalar::<u64>(self.units.len() as u64)?;
        writer.write_array::<W>(&self.units)?;
        writer.write_scalar::<u32>(self.value_size)?;
        writer.write_scalar::<u32>(self.mask)?;
        writer.write_scalar::<u64>(self.size as u64)?;
        Ok(())
    }

    pub fn read(reader: &mut impl Reader) -> Result<Self> {
        let m = crate::error::narrow_size(reader.read_scalar::<u64>()?)?;
        let units = reader.read_array::<W>(m)?;
        let value_size = reader.read_scalar::<u32>()?;
        let mask = reader.read_scalar::<u32>()?;
        let size = crate::error::narrow_size(reader.read_scalar::<u64>()?)?;
        let temp = Self {
            units: Cow::Owned(units),
            value_size,
            mask,
            size,
        };
        temp.validate()?;
        Ok(temp)
    }

    pub fn map(mapper: &mut impl Mapper<'a>) -> Result<Self> {
        let m = crate::error::narrow_size(mapper.map_scalar::<u64>()?)?;
        let units = mapper.map_array::<W>(m)?;
        let value_size = mapper.map_scalar::<u32>()?;
        let mask = mapper.map_scalar::<u32>()?;
        let size = crate::error::narrow_size(mapper.map_scalar::<u64>()?)?;
        let temp = Self {
            units: Cow::Borrowed(units),
            value_size,
            mask,
            size,
        };
        temp.validate()?;
        Ok(temp)
    }

    fn validate(&self) -> Result<()> {
        if self.value_size > 32 {
            return Err(Error::Format(format!(
                "value_size {} exceeds 32",
                self.value_size
            )));
        }
        let word_bits = W::BITS as usize;
        let needed_bits = self.value_size as u64 * self.size as u64;
        let needed_units = needed_bits.div_ceil(word_bits as u64) as usize;
        if needed_units > self.units.len() {
            return Err(Error::Format(
                "word array too short for the declared size/value_size".into(),
            ));
        }
        Ok(())
    }

    /// Drops all contents, leaving an empty vector.
    pub fn clear(&mut self) {
        let mut empty = Self::default();
        std::mem::swap(self, &mut empty);
    }
}

impl<'a, W: Word> std::fmt::Debug for FlatVector<'a, W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlatVector")
            .field("value_size", &self.value_size)
            .field("size", &self.size)
            .finish()
    }
}
