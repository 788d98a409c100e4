// ABOUTME: Library root for stackdrop - exposes the pipeline and its capabilities for testing.
// ABOUTME: The main binary is in main.rs.

pub mod aws;
pub mod command;
pub mod config;
pub mod deploy;
pub mod diagnostics;
pub mod error;
pub mod stack;
pub mod storage;
pub mod types;
