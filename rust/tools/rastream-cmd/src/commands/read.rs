use std::io::Write;

use anyhow::{Context, Result};
use rastream_bytes::Buffer;
use rastream_io::RandomAccessStream;

use crate::{commands::open_stream, utils::hex_dump};

pub fn run(offset: i64, count: i64, hex: bool, path: String) -> Result<()> {
    let stream = open_stream(&path)?;
    let mut buffer = Buffer::new(count).context("Failed to allocate the read buffer")?;
    stream
        .pread(offset, count, &mut buffer)
        .with_context(|| format!("pread of {count} bytes at offset {offset} failed"))?;
    log::debug!("read {} of {count} requested bytes", buffer.size());

    if hex {
        print!("{}", hex_dump(offset as u64, buffer.as_slice()));
    } else {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(buffer.as_slice())?;
        stdout.flush()?;
    }
    Ok(())
}
