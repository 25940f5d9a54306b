//! File-backed [`RandomAccessStream`].

use std::{fs::File, path::Path, sync::Arc};

use rastream_bytes::Buffer;
use rastream_common::{Result, error::Error};

use crate::{RandomAccessStream, StorageProfile, check_read_args, fs::PositionalRead};


/// A [`RandomAccessStream`] over a shared, already-open file handle.
///
/// The logical size is queried once at construction and cached: later changes to
/// the file do not affect [`size`](RandomAccessStream::size), and reads never
/// extend past it.
///
/// Reads go through the offset-explicit [`PositionalRead`] primitive, so the stream
/// carries no cursor and no lock; concurrent `pread` calls are independent.
///
/// # Handle ownership
///
/// The stream holds a shared reference to the handle and never closes it on its
/// own. Dropping the stream only releases that reference; the handle is closed
/// when the caller drops the last one.
pub struct FileRandomAccessStream<F = File> {
    file: Arc<F>,
    size: i64,
    profile: StorageProfile,
}

impl<F> FileRandomAccessStream<F>
where
    F: PositionalRead,
{
    /// Wraps an open, readable handle and snapshots its size.
    ///
    /// # Errors
    ///
    /// * `Io` if the size query fails.
    /// * `InvalidArgument` if the size does not fit an `i64`.
    pub fn new(file: Arc<F>) -> Result<FileRandomAccessStream<F>> {
        let len = file.file_size().map_err(|e| Error::io("query file size", e))?;
        let size = i64::try_from(len)
            .map_err(|_| Error::invalid_arg("file", format!("size {len} exceeds i64::MAX")))?;
        log::debug!("file stream created, size {size}");
        Ok(FileRandomAccessStream {
            file,
            size,
            profile: StorageProfile {
                min_io_size: 16 * 1024,
                max_io_size: 1024 * 1024,
            },
        })
    }

    /// Replaces the storage profile. `max_io_size` bounds the length of a single
    /// underlying read request.
    pub fn with_storage_profile(mut self, profile: StorageProfile) -> Self {
        self.profile = profile;
        self
    }

    /// Returns the shared handle this stream reads from.
    pub fn file(&self) -> &Arc<F> {
        &self.file
    }
}

#[cfg(any(unix, windows))]
impl FileRandomAccessStream<File> {
    /// Wraps an owned file handle.
    pub fn from_file(file: File) -> Result<FileRandomAccessStream<File>> {
        FileRandomAccessStream::new(Arc::new(file))
    }

    /// Opens the file at `path` read-only and wraps it.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<FileRandomAccessStream<File>> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| Error::io(format!("open {}", path.display()), e))?;
        Self::from_file(file)
    }
}

impl<F> RandomAccessStream for FileRandomAccessStream<F>
where
    F: PositionalRead,
{
    fn size(&self) -> i64 {
        self.size
    }

    fn pread(&self, position: i64, count: i64, dest: &mut Buffer) -> Result<()> {
        let len = check_read_args(self.size, position, count, dest)?;
        log::trace!("pread position {position}, count {count}, clipped to {len}");
        let filled = dest.fill_with(len, |region| {
            crate::fs::read_full_at(
                &*self.file,
                position as u64,
                region,
                self.profile.max_io_size,
            )
            .map_err(|e| Error::io(format!("pread at {position}"), e))
        })?;
        if filled < len {
            log::trace!(
                "file ended at {} before the cached size {}",
                position as u64 + filled as u64,
                self.size
            );
        }
        Ok(())
    }

    fn storage_profile(&self) -> StorageProfile {
        self.profile.clone()
    }
}
