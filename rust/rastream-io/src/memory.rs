use rastream_bytes::Buffer;
use rastream_common::Result;

use crate::{RandomAccessStream, StorageProfile, check_read_args};

impl RandomAccessStream for [u8] {
    fn size(&self) -> i64 {
        self.len() as i64
    }

    fn pread(&self, position: i64, count: i64, dest: &mut Buffer) -> Result<()> {
        let len = check_read_args(self.size(), position, count, dest)?;
        let start = position as usize;
        dest.copy_from_slice(&self[start..start + len])
    }

    fn storage_profile(&self) -> StorageProfile {
        StorageProfile {
            min_io_size: 1,
            max_io_size: self.len().min(StorageProfile::default().max_io_size),
        }
    }
}

impl RandomAccessStream for Vec<u8> {
    fn size(&self) -> i64 {
        self.as_slice().size()
    }

    fn pread(&self, position: i64, count: i64, dest: &mut Buffer) -> Result<()> {
        self.as_slice().pread(position, count, dest)
    }

    fn storage_profile(&self) -> StorageProfile {
        self.as_slice().storage_profile()
    }
}
