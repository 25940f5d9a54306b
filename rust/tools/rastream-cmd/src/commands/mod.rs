//! Command implementations for rastream-cmd

use std::{fs::File, path::Path};

use anyhow::{Context, Result};
use rastream_io::FileRandomAccessStream;

pub mod dump;
pub mod info;
pub mod read;

/// Opens `path` read-only and wraps it in a file-backed stream.
pub fn open_stream(path: &str) -> Result<FileRandomAccessStream<File>> {
    let path = Path::new(path);
    if !path.is_file() {
        anyhow::bail!("Not a file: {}", path.display());
    }
    FileRandomAccessStream::open(path)
        .with_context(|| format!("Failed to open stream over {}", path.display()))
}
