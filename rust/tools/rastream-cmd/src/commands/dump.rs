use std::ops::Range;

use anyhow::{Context, Result};
use rastream_bytes::Buffer;
use rastream_io::RandomAccessStream;

use crate::{commands::open_stream, utils::format_size};

pub fn run(chunk_size: usize, threads: usize, path: String) -> Result<()> {
    let stream = open_stream(&path)?;
    let contents = read_parallel(&stream, threads, chunk_size)?;
    let checksum = xxhash_rust::xxh3::xxh3_64(&contents);
    println!(
        "{path}: {} bytes ({}), xxh3 {checksum:016x}",
        contents.len(),
        format_size(contents.len() as u64)
    );
    Ok(())
}

/// Reads the whole stream, splitting it into `threads` contiguous ranges that are
/// read concurrently, and concatenates the results in order.
pub fn read_parallel<S>(stream: &S, threads: usize, chunk_size: usize) -> Result<Vec<u8>>
where
    S: RandomAccessStream + ?Sized,
{
    let ranges = split_ranges(stream.size(), threads);
    log::debug!("reading {} ranges: {ranges:?}", ranges.len());
    let parts = std::thread::scope(|s| {
        let handles = ranges
            .into_iter()
            .map(|range| s.spawn(move || read_range(stream, range, chunk_size)))
            .collect::<Vec<_>>();
        handles
            .into_iter()
            .map(|handle| {
                handle
                    .join()
                    .map_err(|_| anyhow::anyhow!("reader thread panicked"))?
            })
            .collect::<Result<Vec<_>>>()
    })?;
    Ok(parts.concat())
}

/// Reads `range` through successive `pread` calls of at most `chunk_size` bytes.
pub fn read_range<S>(stream: &S, range: Range<i64>, chunk_size: usize) -> Result<Vec<u8>>
where
    S: RandomAccessStream + ?Sized,
{
    let chunk_size = chunk_size.max(1) as i64;
    let mut buffer = Buffer::new(chunk_size)?;
    let mut contents = Vec::with_capacity((range.end - range.start) as usize);
    let mut pos = range.start;
    while pos < range.end {
        let count = chunk_size.min(range.end - pos);
        stream
            .pread(pos, count, &mut buffer)
            .with_context(|| format!("pread of {count} bytes at {pos}"))?;
        if buffer.is_empty() {
            anyhow::bail!("file ended at {pos}, before its recorded size");
        }
        contents.extend_from_slice(buffer.as_slice());
        pos += buffer.size() as i64;
    }
    Ok(contents)
}

/// Splits `[0, size)` into at most `parts` contiguous, non-empty ranges.
fn split_ranges(size: i64, parts: usize) -> Vec<Range<i64>> {
    let parts = (parts.max(1) as i64).min(size.max(1));
    let step = ((size + parts - 1) / parts).max(1);
    (0..parts)
        .map(|i| (i * step).min(size)..((i + 1) * step).min(size))
        .filter(|range| !range.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use rastream_io::FileRandomAccessStream;
    use rastream_testkit::TestFile;

    use super::*;

    #[test]
    fn test_split_ranges() {
        assert!(split_ranges(0, 4).is_empty());
        assert_eq!(split_ranges(10, 1), vec![0..10]);
        assert_eq!(split_ranges(10, 3), vec![0..4, 4..8, 8..10]);
        assert_eq!(split_ranges(3, 8), vec![0..1, 1..2, 2..3]);
    }

    #[test]
    fn test_read_parallel_matches_file() {
        let test_file = TestFile::with_random_contents("dump.bin", 12345).unwrap();
        let stream = FileRandomAccessStream::open(test_file.path()).unwrap();
        for threads in [1, 2, 4, 7] {
            for chunk_size in [1000, 4096] {
                let contents = read_parallel(&stream, threads, chunk_size).unwrap();
                assert_eq!(contents, test_file.contents(), "threads = {threads}");
            }
        }
    }

    #[test]
    fn test_read_range() {
        let data = rastream_testkit::data_gen::random_bytes(100);
        assert_eq!(read_range(&data, 10..55, 7).unwrap(), &data[10..55]);
        assert!(read_range(&data, 10..10, 7).unwrap().is_empty());
    }
}
