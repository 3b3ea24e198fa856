//! Path and file name generators.

pub mod filename;
pub mod folder;
