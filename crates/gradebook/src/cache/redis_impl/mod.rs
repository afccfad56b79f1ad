//! Redis cache backend implementation.
//!
//! Provides a shared cache using Redis for multi-instance deployments.
//! Supports connection pooling, TTL, namespace invalidation and the
//! `INFO`-based operational stats passthrough.

mod cache;
mod error;
mod info;

pub use cache::RedisCache;
