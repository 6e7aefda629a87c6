//! Error taxonomy shared by every container in this crate.

use thiserror::Error;

/// Everything that can go wrong building, querying, or (de)serializing a
/// [`crate::bit_vec::BitVector`] or [`crate::int_vec::FlatVector`].
#[derive(Debug, Error)]
pub enum Error {
    /// The operation needs a built rank/select index (or a built flat
    /// vector), but the instance has none — e.g. `rank1` on a cleared
    /// `BitVector`, or `select1` when `want_select1` was `false` at build
    /// time.
    #[error("operation requires a built index, but none is present")]
    State,

    /// An index argument fell outside the operation's precondition.
    #[error("index {index} out of bounds (limit {limit})")]
    Bound { index: usize, limit: usize },

    /// A persisted size exceeds what this platform can address.
    #[error("persisted size {size} exceeds this platform's addressable range")]
    Size { size: u64 },

    /// Persisted bytes failed a layout/consistency check.
    #[error("malformed persisted data: {0}")]
    Format(String),

    /// The underlying reader, writer, or mapper reported a short transfer.
    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Narrows a persisted `u64` scalar (a size, element count, or array length)
/// to this platform's `usize`, reporting [`Error::Size`] instead of silently
/// truncating on a 32-bit target.
pub(crate) fn narrow_size(v: u64) -> Result<usize> {
    usize::try_from(v).map_err(|_| Error::Size { size: v })
}
