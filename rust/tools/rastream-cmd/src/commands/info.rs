use anyhow::Result;
use rastream_io::RandomAccessStream;

use crate::{commands::open_stream, utils::format_size};

pub fn run(path: String) -> Result<()> {
    let stream = open_stream(&path)?;
    let size = stream.size();
    let profile = stream.storage_profile();
    println!("path: {path}");
    println!("size: {size} ({})", format_size(size as u64));
    println!(
        "io size: {}..{}",
        format_size(profile.min_io_size as u64),
        format_size(profile.max_io_size as u64)
    );
    Ok(())
}
