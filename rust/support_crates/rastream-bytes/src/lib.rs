//! Fixed-capacity byte buffers used as destinations for positional reads.

pub mod buffer;

pub use buffer::Buffer;
