//! Integration test utilities for the skill-swap services
//!
//! This crate provides in-memory adapters for the repository and blob
//! storage ports, plus fixtures for exercising the service layer end to
//! end without Postgres or Redis.

pub mod fixtures;
pub mod memory;

pub use fixtures::*;
pub use memory::*;
