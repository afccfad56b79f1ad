//! Core domain logic for the gradebook project.
//!
//! This crate follows the Functional Core pattern: pure types, traits and
//! functions with no I/O. Backend implementations (Redis, SQLite, in-memory)
//! live in the `gradebook` crate and plug into the contracts defined here.

pub mod cache;
pub mod metrics;
pub mod serde;
pub mod service;
pub mod storage;
pub mod student;
