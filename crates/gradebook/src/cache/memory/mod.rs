//! In-memory cache backend implementation.
//!
//! Single-process stand-in for Redis, used in development and tests.
//! Mirrors the Redis backend's observable behavior: TTL expiry, namespace
//! invalidation with a deleted-entry count, and hit/miss counters for the
//! backend stats endpoint.

mod cache;

pub use cache::MemoryCache;
