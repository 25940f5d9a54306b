use rastream_bytes::Buffer;
use rastream_common::Result;

use crate::RandomAccessStream;

pub mod read_adapter;

/// Reads the entire stream through successive non-overlapping `pread` calls of
/// `chunk_size` bytes, until the stream reports EOF.
///
/// A successful empty read, which happens when the underlying source ran dry
/// before its recorded size, also ends the loop. Any error other than EOF is
/// returned as is.
pub fn read_all<S>(stream: &S, chunk_size: usize) -> Result<Vec<u8>>
where
    S: RandomAccessStream + ?Sized,
{
    let chunk_size = chunk_size.max(1);
    let mut buffer = Buffer::new(chunk_size as i64)?;
    let mut contents = Vec::with_capacity(stream.size().max(0) as usize);
    loop {
        match stream.pread(contents.len() as i64, chunk_size as i64, &mut buffer) {
            Ok(()) if buffer.is_empty() => return Ok(contents),
            Ok(()) => contents.extend_from_slice(buffer.as_slice()),
            Err(e) if e.is_eof() => return Ok(contents),
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use rastream_testkit::data_gen::random_bytes;

    use super::read_all;

    #[test]
    fn test_read_all() {
        for size in [0usize, 1, 10, 100, 1000] {
            let data = random_bytes(size);
            for chunk_size in [1, 3, 64, 1000, 5000] {
                assert_eq!(read_all(&data, chunk_size).unwrap(), data, "size = {size}");
            }
        }
    }

    #[test]
    fn test_read_all_zero_chunk() {
        let data = random_bytes(10);
        assert_eq!(read_all(data.as_slice(), 0).unwrap(), data);
    }
}
