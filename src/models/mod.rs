//! Data models.

pub mod config;
pub mod download;
pub mod report;
