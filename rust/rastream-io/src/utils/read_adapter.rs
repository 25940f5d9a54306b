//! A helper that turns any `RandomAccessStream` into a standard `std::io::Read`.

use rastream_bytes::Buffer;
use rastream_common::Result;

use crate::{RandomAccessStream, StorageProfile};

/// A helper that turns any `RandomAccessStream` into a standard `std::io::Read` and
/// `std::io::Seek`.
///
/// The adapter keeps its own position and reads sequentially from the underlying
/// stream, one `pread` per `read` call, each request capped by the stream's storage
/// profile. The stream itself stays cursor-free and can be shared with other readers.
pub struct ReadAdapter<S> {
    inner: S,
    pos: u64,
    /// Scratch destination for `pread`, grown on demand.
    scratch: Option<Buffer>,
}

impl<S> ReadAdapter<S> {
    /// Creates a new `ReadAdapter` wrapping the given stream, starting at position 0.
    pub fn new(inner: S) -> Self {
        Self::new_at_position(inner, 0)
    }

    /// Creates a new `ReadAdapter` starting from the specified position.
    pub fn new_at_position(inner: S, pos: u64) -> Self {
        Self {
            inner,
            pos,
            scratch: None,
        }
    }

    /// Returns the current read position.
    pub fn position(&self) -> u64 {
        self.pos
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: RandomAccessStream> ReadAdapter<S> {
    fn size(&self) -> u64 {
        self.inner.size().max(0) as u64
    }
}

impl<S: RandomAccessStream> std::io::Read for ReadAdapter<S> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }

        let size = self.size();
        if self.pos >= size {
            return Ok(0);
        }

        let profile = self.inner.storage_profile();
        let max_io_size = profile.max_io_size.max(1) as u64;
        let to_read = (buf.len() as u64).min(size - self.pos).min(max_io_size) as usize;

        let scratch = scratch_buffer(&mut self.scratch, to_read, &profile)?;
        self.inner.pread(self.pos as i64, to_read as i64, scratch)?;
        let bytes_read = scratch.size();
        buf[..bytes_read].copy_from_slice(scratch.as_slice());

        self.pos += bytes_read as u64;
        Ok(bytes_read)
    }
}

/// Returns the scratch buffer, replacing it with a larger one if it cannot hold
/// `len` bytes.
fn scratch_buffer<'a>(
    scratch: &'a mut Option<Buffer>,
    len: usize,
    profile: &StorageProfile,
) -> Result<&'a mut Buffer> {
    let buffer = match scratch.take() {
        Some(buffer) if buffer.capacity() >= len => buffer,
        _ => Buffer::new(profile.clamp_io_size(len).max(len) as i64)?,
    };
    Ok(scratch.insert(buffer))
}

impl<S: RandomAccessStream> std::io::Seek for ReadAdapter<S> {
    fn seek(&mut self, pos: std::io::SeekFrom) -> std::io::Result<u64> {
        use std::io::SeekFrom;

        let size = self.size();

        let new_pos = match pos {
            SeekFrom::Start(offset) => offset,
            SeekFrom::End(offset) => {
                if offset >= 0 {
                    size.saturating_add(offset as u64)
                } else {
                    size.saturating_sub(offset.unsigned_abs())
                }
            }
            SeekFrom::Current(offset) => {
                if offset >= 0 {
                    self.pos.saturating_add(offset as u64)
                } else {
                    self.pos.saturating_sub(offset.unsigned_abs())
                }
            }
        };

        // Seeking past the end is allowed, as per std::io::Seek behavior.
        self.pos = new_pos;
        Ok(self.pos)
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Read, Seek, SeekFrom};

    use rastream_testkit::TestFile;

    use super::*;
    use crate::FileRandomAccessStream;

    #[test]
    fn test_read_adapter_basic() {
        let mut adapter = ReadAdapter::new(b"Hello, World!".to_vec());

        let mut buf = [0u8; 5];
        let n = adapter.read(&mut buf).unwrap();
        assert_eq!(n, 5);
        assert_eq!(&buf, b"Hello");
        assert_eq!(adapter.position(), 5);

        let n = adapter.read(&mut buf).unwrap();
        assert_eq!(n, 5);
        assert_eq!(&buf, b", Wor");
        assert_eq!(adapter.position(), 10);

        let mut buf = [0u8; 10];
        let n = adapter.read(&mut buf).unwrap();
        assert_eq!(n, 3);
        assert_eq!(&buf[..3], b"ld!");
        assert_eq!(adapter.position(), 13);

        // EOF
        let n = adapter.read(&mut buf).unwrap();
        assert_eq!(n, 0);
        assert_eq!(adapter.position(), 13);
    }

    #[test]
    fn test_read_adapter_empty_source() {
        let mut adapter = ReadAdapter::new(Vec::<u8>::new());

        let mut buf = [0u8; 10];
        let n = adapter.read(&mut buf).unwrap();
        assert_eq!(n, 0);
        assert_eq!(adapter.position(), 0);

        let mut buf = [];
        assert_eq!(adapter.read(&mut buf).unwrap(), 0);
    }

    #[test]
    fn test_read_adapter_start_at_position() {
        let mut adapter = ReadAdapter::new_at_position(b"Hello, World!".to_vec(), 7);

        let mut result = Vec::new();
        adapter.read_to_end(&mut result).unwrap();
        assert_eq!(result, b"World!");
        assert_eq!(adapter.position(), 13);

        let mut adapter = ReadAdapter::new_at_position(b"Hello".to_vec(), 10);
        let mut buf = [0u8; 5];
        assert_eq!(adapter.read(&mut buf).unwrap(), 0);
        assert_eq!(adapter.position(), 10);
        assert_eq!(adapter.into_inner().size(), 5);
    }

    #[test]
    fn test_read_adapter_seek() {
        let mut adapter = ReadAdapter::new(b"Hello, World!".to_vec());

        let mut buf = [0u8; 5];
        adapter.read_exact(&mut buf).unwrap();
        assert_eq!(&buf, b"Hello");

        assert_eq!(adapter.seek(SeekFrom::Current(2)).unwrap(), 7);
        let mut buf = [0u8; 6];
        adapter.read_exact(&mut buf).unwrap();
        assert_eq!(&buf, b"World!");

        assert_eq!(adapter.seek(SeekFrom::End(-6)).unwrap(), 7);
        assert_eq!(adapter.seek(SeekFrom::Current(-20)).unwrap(), 0);
        assert_eq!(adapter.seek(SeekFrom::Start(20)).unwrap(), 20);
        assert_eq!(adapter.read(&mut buf).unwrap(), 0);

        adapter.seek(SeekFrom::Start(0)).unwrap();
        let mut result = Vec::new();
        adapter.read_to_end(&mut result).unwrap();
        assert_eq!(result, b"Hello, World!");
    }

    #[test]
    fn test_read_adapter_over_file_stream() {
        let test_file = TestFile::with_random_contents("adapter.bin", 10000).unwrap();
        let stream = FileRandomAccessStream::open(test_file.path())
            .unwrap()
            .with_storage_profile(StorageProfile {
                min_io_size: 16,
                max_io_size: 1000,
            });
        let mut adapter = ReadAdapter::new(&stream);

        let mut buf = vec![0u8; 4096];
        let n = adapter.read(&mut buf).unwrap();
        assert_eq!(n, 1000);
        assert_eq!(&buf[..n], &test_file.contents()[..n]);

        let mut rest = Vec::new();
        adapter.read_to_end(&mut rest).unwrap();
        assert_eq!(rest, &test_file.contents()[1000..]);
    }
}
