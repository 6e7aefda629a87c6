//! Byte-stream collaborators the core containers read from and write to:
//! `Reader` (stream input), `Writer` (stream output), and `Mapper` (borrowed,
//! zero-copy input over a memory-mapped region).
//!
//! All three speak little-endian fixed-width scalars (`u32`/`u64`, via the
//! [`crate::word::Word`] trait) and arrays of the same. `Reader`/`Writer` are
//! blanket-implemented for anything that is [`std::io::Read`]/
//! [`std::io::Write`], so a plain `File` or `Vec<u8>` already satisfies them.
//! `Mapper` is implemented by [`ByteMapper`], a cursor over a borrowed
//! `&[u8]` — what callers get from `memmap2::Mmap::deref()` or any other
//! byte-slice-producing mapping.
//!
//! `Mapper::map_array` returns a zero-copy slice via `bytemuck::try_cast_slice`,
//! which validates alignment before reinterpreting the bytes; this assumes a
//! little-endian host, matching this crate's stated non-goal of endianness
//! portability beyond the native build target.

use crate::error::{Error, Result};
use crate::word::Word;

/// Reads fixed-width little-endian scalars and arrays from a byte stream.
pub trait Reader {
    fn read_scalar<T: Word>(&mut self) -> Result<T>;
    fn read_array<T: Word>(&mut self, n: usize) -> Result<Vec<T>>;
}

impl<R: std::io::Read> Reader for R {
    fn read_scalar<T: Word>(&mut self) -> Result<T> {
        let elem = (T::BITS / 8) as usize;
        let mut buf = [0u8; 8];
        self.read_exact(&mut buf[..elem])?;
        Ok(T::from_u64(u64::from_le_bytes(buf)))
    }

    fn read_array<T: Word>(&mut self, n: usize) -> Result<Vec<T>> {
        let elem = (T::BITS / 8) as usize;
        let mut buf = vec![0u8; n * elem];
        self.read_exact(&mut buf)?;
        let mut out = Vec::with_capacity(n);
        for chunk in buf.chunks_exact(elem) {
            let mut padded = [0u8; 8];
            padded[..elem].copy_from_slice(chunk);
            out.push(T::from_u64(u64::from_le_bytes(padded)));
        }
        Ok(out)
    }
}

/// Writes fixed-width little-endian scalars and arrays to a byte stream.
pub trait Writer {
    fn write_scalar<T: Word>(&mut self, value: T) -> Result<()>;
    fn write_array<T: Word>(&mut self, values: &[T]) -> Result<()>;
}

impl<W: std::io::Write> Writer for W {
    fn write_scalar<T: Word>(&mut self, value: T) -> Result<()> {
        let elem = (T::BITS / 8) as usize;
        let bytes = value.to_u64().to_le_bytes();
        self.write_all(&bytes[..elem])?;
        Ok(())
    }

    fn write_array<T: Word>(&mut self, values: &[T]) -> Result<()> {
        let elem = (T::BITS / 8) as usize;
        let mut buf = Vec::with_capacity(values.len() * elem);
        for &v in values {
            buf.extend_from_slice(&v.to_u64().to_le_bytes()[..elem]);
        }
        self.write_all(&buf)?;
        Ok(())
    }
}

/// Borrows fixed-width little-endian scalars and arrays from a
/// memory-mapped (or otherwise externally owned) byte slice.
///
/// Unlike `Reader`, `map_array` does not copy: it returns a slice borrowed
/// from the mapper's own lifetime, so the caller's mapping must outlive the
/// container built from it.
pub trait Mapper<'a> {
    fn map_scalar<T: Word>(&mut self) -> Result<T>;
    fn map_array<T: Word>(&mut self, n: usize) -> Result<&'a [T]>;
}

/// A [`Mapper`] over a borrowed byte slice, e.g. `&mmap[..]`.
pub struct ByteMapper<'a> {
    bytes: &'a [u8],
}

impl<'a> ByteMapper<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.bytes.len()
    }
}

impl<'a> Mapper<'a> for ByteMapper<'a> {
    fn map_scalar<T: Word>(&mut self) -> Result<T> {
        let elem = (T::BITS / 8) as usize;
        if self.bytes.len() < elem {
            return Err(Error::Format(
                "unexpected end of mapped region while reading a scalar".into(),
            ));
        }
        let (head, rest) = self.bytes.split_at(elem);
        self.bytes = rest;
        let mut padded = [0u8; 8];
        padded[..elem].copy_from_slice(head);
        Ok(T::from_u64(u64::from_le_bytes(padded)))
    }

    fn map_array<T: Word>(&mut self, n: usize) -> Result<&'a [T]> {
        let elem = (T::BITS / 8) as usize;
        let nbytes = n * elem;
        if self.bytes.len() < nbytes {
            return Err(Error::Format(
                "unexpected end of mapped region while reading an array".into(),
            ));
        }
        let (head, rest) = self.bytes.split_at(nbytes);
        self.bytes = rest;
        bytemuck::try_cast_slice::<u8, T>(head)
            .map_err(|_| Error::Format("misaligned array in mapped region".into()))
    }
}
