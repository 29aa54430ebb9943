// Utility functions and helpers
//
// This module provides file I/O helpers for reading containers and committing
// decoded output.

pub mod io_utils;

pub use io_utils::{open_file_as_reader, write_atomically};
