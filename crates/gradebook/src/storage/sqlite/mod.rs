//! SQLite storage backend.
//!
//! Implements `gradebook_core::storage::StudentRepository` on top of
//! `rusqlite` with `tokio-rusqlite` for async access.

mod conversions;
mod error;
mod repository;
mod schema;

pub use repository::SqliteRepository;
