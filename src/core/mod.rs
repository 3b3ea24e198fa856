//! Core business logic modules.

pub mod materializer;
pub mod naming;
pub mod source;
