//! Offset-explicit read primitives.
//!
//! A [`PositionalRead`] source reads at an absolute offset passed with each call and
//! never depends on a shared file cursor, so one handle can serve any number of
//! concurrent readers without locking.

use std::{
    fs::File,
    io::{Read, Seek, SeekFrom},
    sync::Mutex,
};

/// A readable source supporting reads at an explicit absolute offset.
pub trait PositionalRead: Send + Sync {
    /// Reads some bytes starting at `offset` into `buf` and returns the number of
    /// bytes read.
    ///
    /// As with `std::io::Read::read`, a single call may return fewer bytes than
    /// requested even when more data remains, and returns `0` at end of file.
    fn read_at(&self, buf: &mut [u8], offset: u64) -> std::io::Result<usize>;

    /// Returns the current length of the source in bytes.
    fn file_size(&self) -> std::io::Result<u64>;
}

#[cfg(unix)]
impl PositionalRead for File {
    #[inline]
    fn read_at(&self, buf: &mut [u8], offset: u64) -> std::io::Result<usize> {
        std::os::unix::fs::FileExt::read_at(self, buf, offset)
    }

    fn file_size(&self) -> std::io::Result<u64> {
        Ok(self.metadata()?.len())
    }
}

/// On Windows `seek_read` updates the handle's cursor as a side effect, but the
/// offset is still passed with every call and the cursor is never consulted.
#[cfg(windows)]
impl PositionalRead for File {
    #[inline]
    fn read_at(&self, buf: &mut [u8], offset: u64) -> std::io::Result<usize> {
        std::os::windows::fs::FileExt::seek_read(self, buf, offset)
    }

    fn file_size(&self) -> std::io::Result<u64> {
        Ok(self.metadata()?.len())
    }
}

/// Emulates positional reads over a cursor-based `Read + Seek` source.
///
/// Each read performs a seek followed by a read while holding a lock, so concurrent
/// callers are serialized. Intended for sources and platforms without a native
/// positional primitive.
pub struct SeekReadLock<R> {
    inner: Mutex<R>,
}

impl<R> SeekReadLock<R> {
    pub fn new(inner: R) -> SeekReadLock<R> {
        SeekReadLock {
            inner: Mutex::new(inner),
        }
    }

    /// Consumes the wrapper, returning the underlying reader.
    pub fn into_inner(self) -> R {
        self.inner
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<R> PositionalRead for SeekReadLock<R>
where
    R: Read + Seek + Send,
{
    fn read_at(&self, buf: &mut [u8], offset: u64) -> std::io::Result<usize> {
        // The cursor is always re-established, so a poisoned lock is harmless.
        let mut inner = self
            .inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        inner.seek(SeekFrom::Start(offset))?;
        inner.read(buf)
    }

    fn file_size(&self) -> std::io::Result<u64> {
        let mut inner = self
            .inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        inner.seek(SeekFrom::End(0))
    }
}

/// Reads from `source` at `pos` until `buf` is full or the source reports end of
/// file, and returns the number of bytes read.
///
/// Short reads are retried at the advanced offset, and so are `Interrupted` errors.
/// No single request asks for more than `max_io_size` bytes.
pub fn read_full_at<S>(
    source: &S,
    mut pos: u64,
    buf: &mut [u8],
    max_io_size: usize,
) -> std::io::Result<usize>
where
    S: PositionalRead + ?Sized,
{
    let max_io_size = max_io_size.max(1);
    let mut filled = 0;
    while filled < buf.len() {
        let end = filled + std::cmp::min(buf.len() - filled, max_io_size);
        match source.read_at(&mut buf[filled..end], pos) {
            Ok(0) => break,
            Ok(n) => {
                filled += n;
                pos += n as u64;
            }
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
