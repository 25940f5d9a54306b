//! Temporary files with known contents.

use std::{
    fs::{File, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};

use anyhow::Context;
use tempfile::TempDir;

use crate::data_gen::random_bytes;

/// A file in a private temporary directory, holding a known sequence of bytes.
///
/// The directory and the file are removed when the `TestFile` is dropped. Handles
/// opened from it stay usable on Unix after that, but tests should keep the
/// `TestFile` alive for as long as they read.
pub struct TestFile {
    _dir: TempDir,
    path: PathBuf,
    contents: Vec<u8>,
}

impl TestFile {
    /// Creates a file named `name` containing `size` random bytes.
    pub fn with_random_contents(name: &str, size: usize) -> anyhow::Result<TestFile> {
        Self::with_contents(name, random_bytes(size))
    }

    /// Creates a file named `name` containing `contents`.
    pub fn with_contents(name: &str, contents: Vec<u8>) -> anyhow::Result<TestFile> {
        let dir = tempfile::tempdir().context("create temp dir")?;
        let path = dir.path().join(name);
        let mut file =
            File::create_new(&path).with_context(|| format!("create {}", path.display()))?;
        file.write_all(&contents)
            .with_context(|| format!("write {} bytes to {}", contents.len(), path.display()))?;
        file.sync_all()?;
        Ok(TestFile {
            _dir: dir,
            path,
            contents,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The bytes written to the file at creation.
    pub fn contents(&self) -> &[u8] {
        &self.contents
    }

    pub fn size(&self) -> usize {
        self.contents.len()
    }

    /// Opens a fresh read-only handle to the file.
    pub fn open(&self) -> anyhow::Result<File> {
        File::open(&self.path).with_context(|| format!("re-open {}", self.path.display()))
    }

    /// Opens a separate write handle to the file, for tests that modify it behind
    /// a reader's back.
    pub fn open_for_write(&self) -> anyhow::Result<File> {
        OpenOptions::new()
            .write(true)
            .open(&self.path)
            .with_context(|| format!("open {} for write", self.path.display()))
    }
}
