//! Test utilities and helpers for the rastream project.
//!
//! This crate provides:
//! - Random data generation
//! - Temporary files pre-filled with known contents
//!
//! It is intended for use by the rastream test suites and tools only.

pub mod data_gen;
pub mod temp_file;

pub use temp_file::TestFile;
