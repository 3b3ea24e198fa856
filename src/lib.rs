//! Strm Mounter Library
//!
//! Mirrors a download catalog into `.strm` pointer files, optionally cleaning up
//! file names with an LLM before writing.

pub mod cli;
pub mod core;
pub mod error;
pub mod generators;
pub mod models;
pub mod preflight;
pub mod services;
pub mod utils;

pub use error::{Error, Result};
