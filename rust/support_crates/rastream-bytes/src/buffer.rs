use rastream_common::{Result, error::Error, verify_arg};

/// A fixed-capacity, mutable memory region with an occupied-size counter.
///
/// The backing region is allocated once, zero-filled, and never grows. Readers
/// only look at the occupied prefix `[0, size)`; the bytes beyond it are left
/// over from earlier fills and carry no meaning.
///
/// `Buffer` is exclusively owned by its creator. Stream implementations receive
/// it as `&mut Buffer` for the duration of a single read call.
pub struct Buffer {
    mem: Box<[u8]>,
    size: usize,
}

impl Buffer {
    /// Creates a buffer with the requested capacity and an occupied size of zero.
    ///
    /// # Errors
    ///
    /// * `InvalidArgument` if `capacity` is negative or does not fit the address space.
    /// * `AllocationFailure` if the backing memory cannot be allocated.
    pub fn new(capacity: i64) -> Result<Buffer> {
        verify_arg!(capacity, capacity >= 0);
        let capacity = usize::try_from(capacity)
            .map_err(|_| Error::invalid_arg("capacity", "capacity <= usize::MAX"))?;

        let mut mem = Vec::<u8>::new();
        mem.try_reserve_exact(capacity)
            .map_err(|_| Error::allocation_failure(capacity))?;
        mem.resize(capacity, 0);
        Ok(Buffer {
            mem: mem.into_boxed_slice(),
            size: 0,
        })
    }

    /// Returns the fixed capacity of the buffer.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.mem.len()
    }

    /// Returns the number of occupied bytes.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if no bytes are occupied.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the occupied contents, `[0, size)`.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.mem[..self.size]
    }

    /// Returns the whole backing region, `capacity` bytes long.
    #[inline]
    pub fn mem_block(&self) -> &[u8] {
        &self.mem
    }

    /// Returns exclusive mutable access to the whole backing region.
    #[inline]
    pub fn mem_block_mut(&mut self) -> &mut [u8] {
        &mut self.mem
    }

    /// Sets the occupied size.
    ///
    /// Fails with `InvalidArgument` if `size` is negative or exceeds the capacity,
    /// leaving the current size unchanged.
    pub fn set_size(&mut self, size: i64) -> Result<()> {
        verify_arg!(size, size >= 0);
        verify_arg!(size, (size as u64) <= (self.capacity() as u64));
        self.size = size as usize;
        Ok(())
    }

    /// Resets the occupied size to zero.
    #[inline]
    pub fn clear(&mut self) {
        self.size = 0;
    }

    /// Fills the first `len` bytes of the region through `fill` and sets the
    /// occupied size to the count it reports.
    ///
    /// The occupied size is reset to zero before `fill` runs, so a failed fill
    /// leaves an empty buffer behind. This is the entry point for stream
    /// implementations writing the result of a read.
    ///
    /// # Errors
    ///
    /// * `InvalidArgument` if `len` exceeds the capacity, or if `fill` reports
    ///   more bytes than it was given.
    /// * Any error returned by `fill`.
    pub fn fill_with<F>(&mut self, len: usize, fill: F) -> Result<usize>
    where
        F: FnOnce(&mut [u8]) -> Result<usize>,
    {
        verify_arg!(len, len <= self.capacity());
        self.size = 0;
        let filled = fill(&mut self.mem[..len])?;
        verify_arg!(fill, filled <= len);
        self.size = filled;
        Ok(filled)
    }

    /// Replaces the contents with a copy of `data`.
    ///
    /// Fails with `InvalidArgument` if `data` is longer than the capacity.
    pub fn copy_from_slice(&mut self, data: &[u8]) -> Result<()> {
        self.fill_with(data.len(), |region| {
            region.copy_from_slice(data);
            Ok(data.len())
        })?;
        Ok(())
    }
}

impl std::ops::Deref for Buffer {
    type Target = [u8];

    #[inline]
    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl AsRef<[u8]> for Buffer {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl std::fmt::Debug for Buffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Buffer")
            .field("size", &self.size)
            .field("capacity", &self.capacity())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use rastream_common::error::ErrorKind;

    use super::*;

    #[test]
    fn test_buffer_new() {
        let buffer = Buffer::new(42).unwrap();
        assert_eq!(buffer.capacity(), 42);
        assert_eq!(buffer.size(), 0);
        assert!(buffer.is_empty());
        assert!(buffer.as_slice().is_empty());
        assert_eq!(buffer.mem_block().len(), 42);

        let buffer = Buffer::new(0).unwrap();
        assert_eq!(buffer.capacity(), 0);
        assert_eq!(buffer.size(), 0);
    }

    #[test]
    fn test_buffer_negative_capacity() {
        for capacity in [-100, -10, -1] {
            let err = Buffer::new(capacity).unwrap_err();
            assert!(err.is_invalid_arg(), "capacity = {capacity}");
        }
    }

    #[test]
    fn test_buffer_allocation_failure() {
        let err = Buffer::new(i64::MAX).unwrap_err();
        assert!(
            matches!(
                err.kind(),
                ErrorKind::AllocationFailure { .. } | ErrorKind::InvalidArgument { .. }
            ),
            "{err}"
        );
    }

    #[test]
    fn test_buffer_set_size() {
        let mut buffer = Buffer::new(10).unwrap();
        buffer.mem_block_mut()[..4].copy_from_slice(b"abcd");
        buffer.set_size(4).unwrap();
        assert_eq!(buffer.as_slice(), b"abcd");
        assert_eq!(&buffer[..2], b"ab");

        buffer.set_size(10).unwrap();
        assert_eq!(buffer.size(), 10);

        assert!(buffer.set_size(11).unwrap_err().is_invalid_arg());
        assert!(buffer.set_size(-1).unwrap_err().is_invalid_arg());
        assert_eq!(buffer.size(), 10);

        buffer.clear();
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_buffer_fill_with() {
        let mut buffer = Buffer::new(8).unwrap();
        let n = buffer
            .fill_with(5, |region| {
                assert_eq!(region.len(), 5);
                region[..3].copy_from_slice(b"xyz");
                Ok(3)
            })
            .unwrap();
        assert_eq!(n, 3);
        assert_eq!(buffer.as_slice(), b"xyz");

        assert!(buffer.fill_with(9, |_| Ok(0)).unwrap_err().is_invalid_arg());
        assert!(buffer.fill_with(2, |_| Ok(3)).unwrap_err().is_invalid_arg());
        assert_eq!(buffer.size(), 0);
    }

    #[test]
    fn test_buffer_failed_fill_leaves_empty() {
        let mut buffer = Buffer::new(8).unwrap();
        buffer.copy_from_slice(b"12345").unwrap();
        assert_eq!(buffer.size(), 5);

        let err = buffer
            .fill_with(8, |_| Err(Error::io("read", std::io::ErrorKind::Other.into())))
            .unwrap_err();
        assert!(err.is_io());
        assert_eq!(buffer.size(), 0);
    }

    #[test]
    fn test_buffer_copy_from_slice() {
        let mut buffer = Buffer::new(4).unwrap();
        buffer.copy_from_slice(b"ab").unwrap();
        assert_eq!(buffer.as_ref(), b"ab");
        assert!(buffer.copy_from_slice(b"abcde").unwrap_err().is_invalid_arg());
    }
}
