//! CLI command implementations.

pub mod check;
pub mod mount;
pub mod unmount;
