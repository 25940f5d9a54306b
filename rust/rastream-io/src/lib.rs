//! Random-access read abstractions:
//! - `RandomAccessStream`: positional reader filling a caller-supplied [`Buffer`] with the
//!   bytes at an explicit absolute offset, safe to call concurrently.
//! - `PositionalRead`: the offset-explicit OS primitive underneath file-backed streams.
//!
//! Provides a file-backed implementation, in-memory implementations for byte slices,
//! and a sequential `std::io::Read` adapter.

use std::sync::Arc;

use rastream_bytes::Buffer;
use rastream_common::{Result, error::Error, verify_arg};

pub mod file;
pub mod fs;
pub mod memory;
pub mod utils;

pub use file::FileRandomAccessStream;
pub use fs::{PositionalRead, SeekReadLock};
pub use utils::{read_adapter::ReadAdapter, read_all};

/// A trait representing a conceptual file or buffer that supports reading from
/// arbitrary positions without any shared cursor.
///
/// Every call is independent: there is no stream-level state to advance, and any
/// number of threads may issue overlapping reads against the same instance.
pub trait RandomAccessStream: Send + Sync {
    /// Returns the logical size of the stream in bytes.
    ///
    /// The value is fixed when the stream is constructed and never changes
    /// afterwards.
    fn size(&self) -> i64;

    /// Reads up to `count` bytes starting at the absolute byte `position` into `dest`.
    ///
    /// On success, `dest.size()` is the number of bytes actually read. It equals
    /// `count` unless the range extends past the end of the stream, in which case
    /// only `size() - position` bytes are read. A short read is not an error.
    ///
    /// # Errors
    ///
    /// * `InvalidArgument` if `position` or `count` is negative, or `count` exceeds
    ///   `dest.capacity()`. `dest` is left untouched.
    /// * `OutOfRange` with the message `"EOF"` if `position >= size()`. The occupied
    ///   size of `dest` is set to zero.
    /// * `Io` if the underlying source fails. `dest.size()` is at most `count`.
    fn pread(&self, position: i64, count: i64, dest: &mut Buffer) -> Result<()>;

    /// Retrieves the storage profile associated with this stream.
    fn storage_profile(&self) -> StorageProfile {
        StorageProfile::default()
    }
}

/// Characterizes the performance aspects of the underlying storage implementation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageProfile {
    /// Suggested minimum size for an effective I/O request.
    /// Using buffers smaller than this size may be inefficient, as the round-trip time
    /// could dominate the overall I/O operation time.
    pub min_io_size: usize,

    /// Suggested maximum size for a single I/O request.
    /// Buffers larger than this size won't enhance performance and might even degrade
    /// the system's efficiency.
    pub max_io_size: usize,
}

impl StorageProfile {
    /// Clamps a given I/O size to the recommended range defined by this profile.
    ///
    /// The minimum size is guaranteed to be at least 1, and the maximum size is
    /// guaranteed to be at least the minimum size.
    pub fn clamp_io_size(&self, size: usize) -> usize {
        let min = self.min_io_size.max(1).min(self.max_io_size);
        let max = self.max_io_size.max(1).max(min);
        size.clamp(min, max)
    }
}

impl Default for StorageProfile {
    fn default() -> StorageProfile {
        Self {
            min_io_size: 4 * 1024,
            max_io_size: 4 * 1024 * 1024,
        }
    }
}

/// Validates the arguments of a [`RandomAccessStream::pread`] call against a stream
/// of the given logical `size`.
///
/// Returns the number of bytes the read should produce: `count`, clipped to the
/// end of the stream. When `position` is at or past the end, the occupied size of
/// `dest` is reset and the EOF error is returned.
pub fn check_read_args(size: i64, position: i64, count: i64, dest: &mut Buffer) -> Result<usize> {
    verify_arg!(position, position >= 0);
    verify_arg!(count, count >= 0);
    verify_arg!(dest, (count as u64) <= (dest.capacity() as u64));
    if position >= size {
        dest.clear();
        return Err(Error::eof());
    }
    Ok(std::cmp::min(count, size - position) as usize)
}

impl<T> RandomAccessStream for Arc<T>
where
    T: RandomAccessStream + ?Sized,
{
    fn size(&self) -> i64 {
        self.as_ref().size()
    }

    fn pread(&self, position: i64, count: i64, dest: &mut Buffer) -> Result<()> {
        self.as_ref().pread(position, count, dest)
    }

    fn storage_profile(&self) -> StorageProfile {
        self.as_ref().storage_profile()
    }
}

impl<T> RandomAccessStream for Box<T>
where
    T: RandomAccessStream + ?Sized,
{
    fn size(&self) -> i64 {
        self.as_ref().size()
    }

    fn pread(&self, position: i64, count: i64, dest: &mut Buffer) -> Result<()> {
        self.as_ref().pread(position, count, dest)
    }

    fn storage_profile(&self) -> StorageProfile {
        self.as_ref().storage_profile()
    }
}

impl<T> RandomAccessStream for &T
where
    T: RandomAccessStream + ?Sized,
{
    fn size(&self) -> i64 {
        (**self).size()
    }

    fn pread(&self, position: i64, count: i64, dest: &mut Buffer) -> Result<()> {
        (**self).pread(position, count, dest)
    }

    fn storage_profile(&self) -> StorageProfile {
        (**self).storage_profile()
    }
}
